use serde::{Deserialize, Serialize};

/// Calendar fields of an instant as seen on a wall clock in Paris.
///
/// `time` is a 24-hour `H:MM` string: the hour is not padded, minutes are.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalStamp {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub time: String,
}

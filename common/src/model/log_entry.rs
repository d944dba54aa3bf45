use crate::model::geo::GeoInfo;
use crate::model::identity::ClientIdentity;
use crate::model::stamp::LocalStamp;
use serde::{Deserialize, Serialize};

/// Result marker and status label written for a lookup that found nothing.
pub const FAILURE_MARKER: &str = "Échec";
/// Status label written for a lookup that returned a date.
pub const SUCCESS_LABEL: &str = "Succès";

/// Number of columns a log row occupies (A through M).
pub const LOG_COLUMNS: usize = 13;

/// One access log row, created once per answered lookup and only ever appended.
///
/// Field order is the column order of the log table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub time: String,
    pub user: String,
    pub machine: String,
    pub copy: u32,
    pub client_ip: String,
    pub country: String,
    pub city: String,
    pub serial: String,
    /// The date on a hit, `FAILURE_MARKER` on a miss.
    pub result: String,
    pub status: String,
}

impl LogEntry {
    /// Assembles the row for a lookup of `serial` that produced `date` (or nothing).
    pub fn new(
        stamp: LocalStamp,
        identity: ClientIdentity,
        client_ip: String,
        geo: GeoInfo,
        serial: String,
        date: Option<String>,
    ) -> Self {
        let (result, status) = match date {
            Some(date) => (date, SUCCESS_LABEL.to_string()),
            None => (FAILURE_MARKER.to_string(), FAILURE_MARKER.to_string()),
        };

        Self {
            year: stamp.year,
            month: stamp.month,
            day: stamp.day,
            time: stamp.time,
            user: identity.user,
            machine: identity.machine,
            copy: identity.copy,
            client_ip,
            country: geo.country,
            city: geo.city,
            serial,
            result,
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_LABEL
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.year.to_string(),
            self.month.to_string(),
            self.day.to_string(),
            self.time.clone(),
            self.user.clone(),
            self.machine.clone(),
            self.copy.to_string(),
            self.client_ip.clone(),
            self.country.clone(),
            self.city.clone(),
            self.serial.clone(),
            self.result.clone(),
            self.status.clone(),
        ]
    }

    /// Rebuilds an entry from a row read back from the log table.
    ///
    /// Returns `None` when the row is short or a numeric column does not parse.
    pub fn from_row(row: &[String]) -> Option<Self> {
        if row.len() < LOG_COLUMNS {
            return None;
        }

        Some(Self {
            year: row[0].trim().parse().ok()?,
            month: row[1].trim().parse().ok()?,
            day: row[2].trim().parse().ok()?,
            time: row[3].clone(),
            user: row[4].clone(),
            machine: row[5].clone(),
            copy: row[6].trim().parse().ok()?,
            client_ip: row[7].clone(),
            country: row[8].clone(),
            city: row[9].clone(),
            serial: row[10].clone(),
            result: row[11].clone(),
            status: row[12].clone(),
        })
    }
}

use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
/// Request payload for `POST /api/getDate`.
/// `serial` is the lookup key; `uuid` is the optional client identifier used for the access log.
pub struct GetDateRequest {
    #[serde(default)]
    pub serial: Option<String>,
    #[serde(default)]
    pub uuid: Option<String>,
}

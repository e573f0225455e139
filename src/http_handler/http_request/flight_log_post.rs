use super::super::http_response::flight_log::FlightLogResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};
use chrono::{DateTime, Utc};

/// One flight-log entry for the pirep progress track.
#[derive(serde::Serialize, Debug, Clone)]
pub struct FlightLog {
    pub pirep_id: String,
    pub lat: f64,
    pub lon: f64,
    pub heading: i32,
    pub altitude: i32,
    pub indicated_speed: i32,
    pub ground_speed: i32,
    pub fuel_flow: f64,
    pub vs: f64,
    pub sim_time: DateTime<Utc>,
    pub zulu_time: DateTime<Utc>,
    pub distance: f64,
}

/// Request type for the /log endpoint.
#[derive(serde::Serialize, Debug)]
pub(crate) struct FlightLogRequest {
    #[serde(flatten)]
    pub(crate) log: FlightLog,
}

impl JSONBodyHTTPRequestType for FlightLogRequest {
    type Body = FlightLogRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for FlightLogRequest {
    type Response = FlightLogResponse;
    fn endpoint(&self) -> &'static str { "/log" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}

use super::super::http_response::pirep_submit::PirepSubmitResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// The final flight report, built once from accumulated tracker state.
#[derive(serde::Serialize, Debug, Clone)]
pub struct Pirep {
    pub pirep_id: String,
    pub fuel_used: f64,
    pub landing_rate: f64,
    pub touchdown_lat: f64,
    pub touchdown_lon: f64,
    pub touchdown_bank: f64,
    pub touchdown_pitch: f64,
    pub block_off_time: String,
    pub block_on_time: String,
    pub distance: f64,
    pub aircraft_used: String,
    pub sim_used: String,
    pub engine_hot_start: bool,
}

/// Request type for the /pirep/submit endpoint.
#[derive(serde::Serialize, Debug)]
pub(crate) struct PirepSubmitRequest {
    #[serde(flatten)]
    pub(crate) pirep: Pirep,
}

impl JSONBodyHTTPRequestType for PirepSubmitRequest {
    type Body = PirepSubmitRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for PirepSubmitRequest {
    type Response = PirepSubmitResponse;
    fn endpoint(&self) -> &'static str { "/pirep/submit" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}

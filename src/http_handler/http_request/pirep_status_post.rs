use super::super::http_response::pirep_status::PirepStatusResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /pirep/status endpoint.
#[derive(serde::Serialize, Debug)]
pub(crate) struct PirepStatusRequest {
    /// The report the status belongs to.
    pub(crate) pirep_id: String,
    /// The flight phase encoded with the platform's wire codes.
    pub(crate) status: i32,
}

impl JSONBodyHTTPRequestType for PirepStatusRequest {
    type Body = PirepStatusRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for PirepStatusRequest {
    type Response = PirepStatusResponse;
    fn endpoint(&self) -> &'static str { "/pirep/status" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}

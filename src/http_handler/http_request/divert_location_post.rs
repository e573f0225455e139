use super::super::http_response::divert_location::DivertLocationResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, JSONBodyHTTPRequestType};

/// Request type for the /pirep/destination endpoint: asks the dispatch
/// service for the nearest airport to the actual landing position.
#[derive(serde::Serialize, Debug)]
pub(crate) struct DivertLocationRequest {
    pub(crate) lat: f64,
    pub(crate) lon: f64,
    pub(crate) pirep_id: String,
}

impl JSONBodyHTTPRequestType for DivertLocationRequest {
    type Body = DivertLocationRequest;
    fn body(&self) -> &Self::Body { self }
}

impl HTTPRequestType for DivertLocationRequest {
    type Response = DivertLocationResponse;
    fn endpoint(&self) -> &'static str { "/pirep/destination" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}

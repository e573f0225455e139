use super::super::http_response::pirep_reset::PirepResetResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Cancels the active pirep and removes its progress logs on the server.
#[derive(Debug)]
pub struct PirepResetRequest {}

impl NoBodyHTTPRequestType for PirepResetRequest {}

impl HTTPRequestType for PirepResetRequest {
    type Response = PirepResetResponse;
    fn endpoint(&self) -> &'static str { "/pirep/reset" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}

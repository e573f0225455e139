use super::super::http_response::dispatch::Dispatch;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

#[derive(Debug)]
pub struct DispatchRequest {}

impl NoBodyHTTPRequestType for DispatchRequest {}

impl HTTPRequestType for DispatchRequest {
    type Response = Dispatch;
    fn endpoint(&self) -> &'static str { "/dispatch" }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}

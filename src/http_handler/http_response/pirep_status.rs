use super::response_common::{HTTPResponseType, ResponseError};

/// Acknowledgment of a phase status push; the body is ignored.
#[derive(Debug)]
pub struct PirepStatusResponse {}

impl HTTPResponseType for PirepStatusResponse {
    type ParsedResponseType = PirepStatusResponse;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        Self::unwrap_return_code(response).await?;
        Ok(PirepStatusResponse {})
    }
}

use super::response_common::{HTTPResponseType, ResponseError};

/// Acknowledgment of a cancellation. A 404 counts as success: there was no
/// active pirep left to reset on the server.
#[derive(Debug)]
pub struct PirepResetResponse {}

impl HTTPResponseType for PirepResetResponse {
    type ParsedResponseType = PirepResetResponse;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(PirepResetResponse {});
        }
        Self::unwrap_return_code(response).await?;
        Ok(PirepResetResponse {})
    }
}

use super::response_common::{HTTPResponseType, ResponseError};

/// The submit endpoint acknowledges with an empty 200.
#[derive(Debug)]
pub struct PirepSubmitResponse {}

impl HTTPResponseType for PirepSubmitResponse {
    type ParsedResponseType = PirepSubmitResponse;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        Self::unwrap_return_code(response).await?;
        Ok(PirepSubmitResponse {})
    }
}

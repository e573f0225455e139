use super::response_common::{HTTPResponseType, ResponseError};

/// Acknowledgment of a flight-log entry (201 Created on success).
#[derive(Debug)]
pub struct FlightLogResponse {}

impl HTTPResponseType for FlightLogResponse {
    type ParsedResponseType = FlightLogResponse;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        Self::unwrap_return_code(response).await?;
        Ok(FlightLogResponse {})
    }
}

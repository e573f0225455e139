use super::http_client::HTTPClient;
use super::http_request::{
    dispatch_get::DispatchRequest,
    divert_location_post::DivertLocationRequest,
    flight_log_post::{FlightLog, FlightLogRequest},
    pirep_reset_get::PirepResetRequest,
    pirep_status_post::PirepStatusRequest,
    pirep_submit_post::{Pirep, PirepSubmitRequest},
    request_common::{JSONBodyHTTPRequestType, NoBodyHTTPRequestType},
};
use super::http_response::dispatch::Dispatch;
use super::http_response::response_common::ResponseError;
use std::sync::Arc;

/// A resolved diversion airport.
#[derive(Debug, Clone)]
pub struct DivertLocation {
    pub icao: String,
    pub lat: f64,
    pub lon: f64,
}

/// The dispatch/report service as consumed by the tracker. Request/response
/// only; retries and state belong to the caller.
#[async_trait::async_trait]
pub trait DispatchApi: Send + Sync {
    async fn fetch_dispatch(&self) -> Result<Dispatch, ResponseError>;
    async fn post_status(&self, pirep_id: &str, status: i32) -> Result<(), ResponseError>;
    async fn post_log(&self, log: FlightLog) -> Result<(), ResponseError>;
    async fn submit_report(&self, pirep: Pirep) -> Result<(), ResponseError>;
    async fn cancel_report(&self) -> Result<(), ResponseError>;
    async fn resolve_diversion(
        &self,
        pirep_id: &str,
        lat: f64,
        lon: f64,
    ) -> Result<DivertLocation, ResponseError>;
}

/// Production implementation over the typed request layer.
pub struct HttpDispatchApi {
    client: Arc<HTTPClient>,
}

impl HttpDispatchApi {
    pub(crate) fn new(client: Arc<HTTPClient>) -> Self { Self { client } }
}

#[async_trait::async_trait]
impl DispatchApi for HttpDispatchApi {
    async fn fetch_dispatch(&self) -> Result<Dispatch, ResponseError> {
        DispatchRequest {}.send_request(&self.client).await
    }

    async fn post_status(&self, pirep_id: &str, status: i32) -> Result<(), ResponseError> {
        let req = PirepStatusRequest { pirep_id: pirep_id.to_string(), status };
        req.send_request(&self.client).await.map(|_| ())
    }

    async fn post_log(&self, log: FlightLog) -> Result<(), ResponseError> {
        FlightLogRequest { log }.send_request(&self.client).await.map(|_| ())
    }

    async fn submit_report(&self, pirep: Pirep) -> Result<(), ResponseError> {
        PirepSubmitRequest { pirep }.send_request(&self.client).await.map(|_| ())
    }

    async fn cancel_report(&self) -> Result<(), ResponseError> {
        PirepResetRequest {}.send_request(&self.client).await.map(|_| ())
    }

    async fn resolve_diversion(
        &self,
        pirep_id: &str,
        lat: f64,
        lon: f64,
    ) -> Result<DivertLocation, ResponseError> {
        let req = DivertLocationRequest { lat, lon, pirep_id: pirep_id.to_string() };
        let res = req.send_request(&self.client).await?;
        Ok(DivertLocation {
            icao: res.icao().to_string(),
            lat: res.lat(),
            lon: res.lon(),
        })
    }
}

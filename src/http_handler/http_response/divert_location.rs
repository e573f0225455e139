use super::response_common::SerdeJSONBodyHTTPResponseType;

/// The nearest airport resolved for a diversion.
#[derive(serde::Deserialize, Debug)]
pub struct DivertLocationResponse {
    icao: String,
    lat: f64,
    lon: f64,
}

impl SerdeJSONBodyHTTPResponseType for DivertLocationResponse {}

impl DivertLocationResponse {
    pub fn icao(&self) -> &str { &self.icao }
    pub fn lat(&self) -> f64 { self.lat }
    pub fn lon(&self) -> f64 { self.lon }
}

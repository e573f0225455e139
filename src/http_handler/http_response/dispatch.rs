use super::response_common::SerdeJSONBodyHTTPResponseType;

/// Planned fuel variety, as dispatched.
#[derive(serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum FuelType {
    Avgas,
    Jet,
}

/// A server-assigned flight plan. Immutable once fetched, except that a
/// diversion may rewrite the arrival fields.
#[derive(serde::Deserialize, Debug, Clone)]
pub struct Dispatch {
    #[serde(rename = "departure_airport_id")]
    departure: String,
    #[serde(rename = "destination_airport_id")]
    arrival: String,
    #[serde(rename = "departure_airport_lat")]
    dep_lat: f64,
    #[serde(rename = "departure_airport_lon")]
    dep_lon: f64,
    #[serde(rename = "destination_airport_lat")]
    arr_lat: f64,
    #[serde(rename = "destination_airport_lon")]
    arr_lon: f64,
    #[serde(rename = "name")]
    aircraft: String,
    registration: String,
    aircraft_type: String,
    planned_fuel: f64,
    fuel_type: Option<FuelType>,
    cargo_weight: f64,
    passenger_count: u32,
    total_payload: f64,
    id: String,
    is_empty: i32,
    tour: Option<String>,
}

impl SerdeJSONBodyHTTPResponseType for Dispatch {}

impl Dispatch {
    pub fn departure(&self) -> &str { &self.departure }
    pub fn arrival(&self) -> &str { &self.arrival }
    pub fn dep_lat(&self) -> f64 { self.dep_lat }
    pub fn dep_lon(&self) -> f64 { self.dep_lon }
    pub fn arr_lat(&self) -> f64 { self.arr_lat }
    pub fn arr_lon(&self) -> f64 { self.arr_lon }
    pub fn aircraft(&self) -> &str { &self.aircraft }
    pub fn registration(&self) -> &str { &self.registration }
    pub fn aircraft_type(&self) -> &str { &self.aircraft_type }
    pub fn planned_fuel(&self) -> f64 { self.planned_fuel }
    pub fn fuel_type(&self) -> Option<FuelType> { self.fuel_type }
    pub fn cargo_weight(&self) -> f64 { self.cargo_weight }
    pub fn passenger_count(&self) -> u32 { self.passenger_count }
    pub fn total_payload(&self) -> f64 { self.total_payload }
    pub fn id(&self) -> &str { &self.id }
    /// True for a deadhead leg with no cargo aboard.
    pub fn is_empty(&self) -> bool { self.is_empty != 0 }
    pub fn tour(&self) -> Option<&str> { self.tour.as_deref() }

    /// Rewrites the arrival after the dispatch service resolved a diversion.
    pub fn apply_diversion(&mut self, icao: &str, lat: f64, lon: f64) {
        self.arrival = icao.to_string();
        self.arr_lat = lat;
        self.arr_lon = lon;
    }
}

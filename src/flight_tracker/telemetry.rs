/// Periodic aircraft snapshot delivered by the sim adapter.
///
/// Speeds are knots, altitudes feet, vertical speed feet per second and
/// `ground_speed` the surface-relative speed in feet per second. The adapter
/// normalizes `fuel_qty` to include unusable fuel where the simulator's
/// reporting convention requires it.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TelemetrySample {
    pub title: String,
    pub camera_state: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub indicated_altitude: f64,
    pub plane_altitude: f64,
    pub pitch: f64,
    pub bank: f64,
    pub airspeed_true: f64,
    pub airspeed_indicated: f64,
    pub ground_speed: f64,
    pub vertical_speed: f64,
    pub heading_magnetic: f64,
    pub heading_true: f64,
    pub engine_combustion: [bool; 4],
    pub zulu_time_secs: i64,
    pub local_time_secs: i64,
    pub on_ground: bool,
    pub surface_type: i32,
    pub fuel_qty: f64,
    pub fuel_flow: f64,
}

impl TelemetrySample {
    /// Water surface code as reported by the simulator.
    pub const SURFACE_WATER: i32 = 2;

    pub fn engines_running(&self) -> bool { self.engine_combustion.iter().any(|e| *e) }
}

/// Touchdown attitude and velocity as reported by the simulator at contact.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LandingEvent {
    pub bank: f64,
    pub heading_magnetic: f64,
    pub heading_true: f64,
    pub latitude: f64,
    pub longitude: f64,
    /// Touchdown normal velocity in feet per minute.
    pub velocity: f64,
    pub pitch: f64,
}

/// Aircraft/session configuration snapshot, delivered on change.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SettingsSnapshot {
    pub aircraft_name: String,
    pub atc_id: String,
    pub atc_type: String,
    pub atc_model: String,
    pub unlimited_fuel: bool,
    pub slew_mode: bool,
    pub payload_station_count: usize,
    pub payload_station_weights: Vec<f64>,
}

impl SettingsSnapshot {
    /// Total payload weight over the active stations.
    pub fn total_weight(&self) -> f64 {
        self.payload_station_weights
            .iter()
            .take(self.payload_station_count)
            .sum()
    }
}

/// The worst touchdown retained since the last reset.
#[derive(Debug, Clone, Copy, Default)]
pub struct LandingRecord {
    pub rate: f64,
    pub pitch: f64,
    pub bank: f64,
    pub latitude: f64,
    pub longitude: f64,
}

//! Boundary to the simulator process: a `SimLink` produces the three event
//! streams the tracker consumes plus connection lifecycle notifications, and
//! accepts a small set of best-effort commands back.

mod replay;

pub use replay::ReplaySimLink;

use crate::flight_tracker::telemetry::{LandingEvent, SettingsSnapshot, TelemetrySample};
use strum_macros::Display;

/// Camera/view codes shared by the supported simulators.
pub mod camera {
    pub const COCKPIT: i32 = 2;
    pub const CHASE: i32 = 3;
    pub const DRONE: i32 = 4;

    /// FS2024 reports menu screens as camera states.
    pub mod fs2024 {
        pub const WORLD_MAP: i32 = 12;
        pub const MAIN_MENU: i32 = 32;
    }
}

/// Identity of the simulator on the other end of the link.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum SimVersion {
    #[strum(to_string = "FS2020")]
    Fs2020,
    #[strum(to_string = "FS2024")]
    Fs2024,
}

/// True if the given camera code means the pilot is looking at a menu or the
/// world map rather than flying. Only FS2024 surfaces these states.
pub fn is_menu_view(version: Option<SimVersion>, camera_state: i32) -> bool {
    version == Some(SimVersion::Fs2024)
        && (camera_state == camera::fs2024::WORLD_MAP
            || camera_state == camera::fs2024::MAIN_MENU)
}

/// One event on the serialized stream from the sim adapter to the tracker.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimEvent {
    Telemetry(TelemetrySample),
    Landing(LandingEvent),
    Settings(SettingsSnapshot),
    Connected,
    Disconnected,
}

#[derive(Debug, Display)]
pub enum SimLinkError {
    #[strum(to_string = "simulator source unavailable: {0}")]
    SourceUnavailable(String),
    #[strum(to_string = "simulator link already closed")]
    Closed,
}

impl std::error::Error for SimLinkError {}

/// A simulator backend. One implementation per interconnect; all of them
/// feed the same single-consumer event channel.
#[async_trait::async_trait]
pub trait SimLink: Send + Sync {
    async fn connect(&self) -> Result<(), SimLinkError>;
    async fn disconnect(&self);
    fn is_connected(&self) -> bool;
    /// True while the camera is a cockpit/chase/drone view, i.e. the pilot
    /// is actually in the world and in control.
    fn is_user_controlled(&self) -> bool;
    fn sim_version(&self) -> Option<SimVersion>;
    /// Best-effort text overlay in the simulator, no acknowledgment.
    fn send_text_to_sim(&self, text: &str);
    /// Ask the simulator to disallow (or re-allow) slew/free-camera mode.
    fn set_strict_mode(&self, enabled: bool);
}

pub mod geo;
pub mod readiness;
pub mod telemetry;
pub mod tracker_state;
mod notice;
mod supervisor;
mod tracker;

pub use notice::{NoticeSender, Severity, TrackerNotice};
pub use supervisor::Supervisor;
pub use tracker::FlightTracker;

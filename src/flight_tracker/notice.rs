use crate::flight_tracker::readiness::ReadinessErrors;
use crate::flight_tracker::tracker_state::{FlightPhase, TrackerState};
use crate::http_handler::http_response::dispatch::Dispatch;
use strum_macros::Display;
use tokio::sync::broadcast;

/// Severity of a status message shown to the pilot.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Neutral,
    Error,
}

/// Notifications the core publishes for the presentation layer. Consumers
/// subscribe through a broadcast channel and may drop behind; the tracker
/// never blocks on them.
#[derive(Debug, Clone)]
pub enum TrackerNotice {
    StateChanged(TrackerState),
    PhaseChanged(FlightPhase),
    ReadinessErrors(ReadinessErrors),
    Status { text: String, severity: Severity },
    DispatchChanged(Option<Dispatch>),
}

/// Publishing half of the notice channel, cheap to clone.
#[derive(Clone)]
pub struct NoticeSender {
    tx: broadcast::Sender<TrackerNotice>,
}

impl NoticeSender {
    pub fn channel(capacity: usize) -> (Self, broadcast::Receiver<TrackerNotice>) {
        let (tx, rx) = broadcast::channel(capacity);
        (Self { tx }, rx)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TrackerNotice> { self.tx.subscribe() }

    /// Fire-and-forget send; a closed or lagging channel is not an error.
    pub fn send(&self, notice: TrackerNotice) { let _ = self.tx.send(notice); }

    pub fn status(&self, text: impl Into<String>, severity: Severity) {
        self.send(TrackerNotice::Status { text: text.into(), severity });
    }
}

use super::{SimEvent, SimLink, SimLinkError, SimVersion, camera};
use crate::event;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Delay between replayed telemetry samples.
const REPLAY_TICK: std::time::Duration = std::time::Duration::from_secs(1);

/// A `SimLink` fed from a recorded flight: one JSON-encoded `SimEvent` per
/// line. Landing and settings events are delivered immediately, telemetry is
/// paced at the replay tick so the tracker sees a realistic cadence.
pub struct ReplaySimLink {
    path: PathBuf,
    version: SimVersion,
    events: mpsc::Sender<SimEvent>,
    connected: Arc<AtomicBool>,
    camera_state: Arc<AtomicI32>,
    strict_mode: AtomicBool,
    shutdown: CancellationToken,
}

impl ReplaySimLink {
    pub fn new(path: PathBuf, version: SimVersion, events: mpsc::Sender<SimEvent>) -> Self {
        Self {
            path,
            version,
            events,
            connected: Arc::new(AtomicBool::new(false)),
            camera_state: Arc::new(AtomicI32::new(camera::COCKPIT)),
            strict_mode: AtomicBool::new(false),
            shutdown: CancellationToken::new(),
        }
    }

    /// Parses a recorded flight, one `SimEvent` per non-empty line.
    pub fn parse_events(recording: &str) -> Result<Vec<SimEvent>, serde_json::Error> {
        recording
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(serde_json::from_str)
            .collect()
    }
}

#[async_trait::async_trait]
impl SimLink for ReplaySimLink {
    async fn connect(&self) -> Result<(), SimLinkError> {
        let recording = std::fs::read_to_string(&self.path)
            .map_err(|e| SimLinkError::SourceUnavailable(e.to_string()))?;
        let events = Self::parse_events(&recording)
            .map_err(|e| SimLinkError::SourceUnavailable(e.to_string()))?;

        self.connected.store(true, Ordering::Relaxed);
        if self.events.send(SimEvent::Connected).await.is_err() {
            return Err(SimLinkError::Closed);
        }

        let tx = self.events.clone();
        let connected = Arc::clone(&self.connected);
        let camera_state = Arc::clone(&self.camera_state);
        let token = self.shutdown.clone();
        tokio::spawn(async move {
            for event in events {
                if token.is_cancelled() {
                    return;
                }
                let pace = matches!(event, SimEvent::Telemetry(_));
                if let SimEvent::Telemetry(sample) = &event {
                    camera_state.store(sample.camera_state, Ordering::Relaxed);
                }
                if tx.send(event).await.is_err() {
                    return;
                }
                if pace {
                    tokio::time::sleep(REPLAY_TICK).await;
                }
            }
            // recording exhausted, the "simulator" quits
            connected.store(false, Ordering::Relaxed);
            let _ = tx.send(SimEvent::Disconnected).await;
        });
        Ok(())
    }

    async fn disconnect(&self) {
        self.shutdown.cancel();
        if self.connected.swap(false, Ordering::Relaxed) {
            let _ = self.events.send(SimEvent::Disconnected).await;
        }
    }

    fn is_connected(&self) -> bool { self.connected.load(Ordering::Relaxed) }

    fn is_user_controlled(&self) -> bool {
        let cam = self.camera_state.load(Ordering::Relaxed);
        self.is_connected()
            && (cam == camera::COCKPIT || cam == camera::CHASE || cam == camera::DRONE)
    }

    fn sim_version(&self) -> Option<SimVersion> {
        if self.is_connected() { Some(self.version) } else { None }
    }

    fn send_text_to_sim(&self, text: &str) {
        event!("sim text: {text}");
    }

    fn set_strict_mode(&self, enabled: bool) {
        self.strict_mode.store(enabled, Ordering::Relaxed);
        event!("strict mode: {enabled}");
    }
}

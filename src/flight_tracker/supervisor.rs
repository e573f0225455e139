use super::tracker::FlightTracker;
use crate::event;
use crate::sim_link::SimEvent;
use std::sync::Arc;
use tokio::sync::mpsc::Receiver;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

/// Single consumer of the sim event channel. Every event is handled under
/// the tracker's write lock before the next one is taken, so telemetry,
/// landing and settings deliveries can never interleave.
pub struct Supervisor {
    tracker: Arc<RwLock<FlightTracker>>,
    events: Mutex<Receiver<SimEvent>>,
}

impl Supervisor {
    pub fn new(tracker: Arc<RwLock<FlightTracker>>, events: Receiver<SimEvent>) -> Self {
        Self {
            tracker,
            events: Mutex::new(events),
        }
    }

    /// Runs until the channel closes or the token is cancelled.
    pub async fn run(&self, token: CancellationToken) {
        let mut events = self.events.lock().await;
        loop {
            tokio::select! {
                () = token.cancelled() => break,

                event = events.recv() => {
                    let Some(event) = event else { break };
                    let mut tracker = self.tracker.write().await;
                    match event {
                        SimEvent::Telemetry(sample) => {
                            event!(
                                "telemetry at ({:.4}, {:.4}) alt {:.0}",
                                sample.latitude, sample.longitude, sample.plane_altitude
                            );
                            tracker.on_telemetry(sample).await;
                        }
                        SimEvent::Landing(landing) => tracker.on_landing_event(landing),
                        SimEvent::Settings(settings) => tracker.on_settings(settings),
                        SimEvent::Connected => tracker.on_connected(),
                        SimEvent::Disconnected => tracker.on_disconnected(),
                    }
                }
            }
        }
    }
}

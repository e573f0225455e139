use crate::flight_tracker::{FlightTracker, NoticeSender, TrackerNotice};
use crate::http_handler::dispatch_api::{DispatchApi, HttpDispatchApi};
use crate::http_handler::http_client::HTTPClient;
use crate::sim_link::SimLink;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Struct representing the key components of the application, providing
/// access to the HTTP client, dispatch API, flight tracker and sim link.
#[derive(Clone)]
pub struct Keychain {
    /// The HTTP client for performing network requests.
    client: Arc<HTTPClient>,
    /// The dispatch service boundary.
    api: Arc<dyn DispatchApi>,
    /// The simulator link feeding the event channel.
    sim: Arc<dyn SimLink>,
    /// The flight tracking state machine.
    tracker: Arc<RwLock<FlightTracker>>,
    /// The notice channel the tracker publishes through.
    notices: NoticeSender,
}

impl Keychain {
    /// Creates a new instance of `Keychain`.
    ///
    /// # Arguments
    /// - `base_url`: The base URL for the dispatch service.
    /// - `api_key`: The pilot's bearer token.
    /// - `sim`: The simulator link to track against.
    ///
    /// # Returns
    /// The keychain plus a first subscription to the notice channel.
    pub fn new(
        base_url: &str,
        api_key: &str,
        sim: Arc<dyn SimLink>,
    ) -> (Self, broadcast::Receiver<TrackerNotice>) {
        let client = Arc::new(HTTPClient::new(base_url, api_key));
        let api: Arc<dyn DispatchApi> = Arc::new(HttpDispatchApi::new(Arc::clone(&client)));
        let (notices, notice_rx) = NoticeSender::channel(64);
        let tracker = Arc::new(RwLock::new(FlightTracker::new(
            Arc::clone(&api),
            Arc::clone(&sim),
            notices.clone(),
        )));
        (
            Self {
                client,
                api,
                sim,
                tracker,
                notices,
            },
            notice_rx,
        )
    }

    /// Provides a cloned reference to the HTTP client.
    pub fn client(&self) -> Arc<HTTPClient> { Arc::clone(&self.client) }

    /// Provides a cloned reference to the dispatch API.
    pub fn api(&self) -> Arc<dyn DispatchApi> { Arc::clone(&self.api) }

    /// Provides a cloned reference to the sim link.
    pub fn sim(&self) -> Arc<dyn SimLink> { Arc::clone(&self.sim) }

    /// Provides a cloned reference to the flight tracker.
    pub fn tracker(&self) -> Arc<RwLock<FlightTracker>> { Arc::clone(&self.tracker) }

    /// Provides a cloned handle to the notice channel.
    pub fn notices(&self) -> NoticeSender { self.notices.clone() }
}

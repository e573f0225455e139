#![allow(dead_code, clippy::similar_names)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod flight_tracker;
mod http_handler;
mod keychain;
mod logger;
mod sim_link;

use crate::flight_tracker::readiness::ReadinessErrors;
use crate::flight_tracker::{Severity, Supervisor, TrackerNotice};
use crate::http_handler::http_response::dispatch::{Dispatch, FuelType};
use crate::keychain::Keychain;
use crate::sim_link::{ReplaySimLink, SimLink, SimVersion};
use std::{env, path::PathBuf, sync::Arc};
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;

const EVENT_CHANNEL_CAPACITY: usize = 32;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() {
    let base_url_var = env::var("BUSHTRACKER_BASE_URL");
    let base_url =
        base_url_var.as_ref().map_or("https://fly.bushdivers.com/api", |v| v.as_str());
    let api_key = env::var("BUSHTRACKER_API_KEY").unwrap_or_default();
    let replay = env::var("BUSHTRACKER_REPLAY")
        .map_or_else(|_| PathBuf::from("flight.jsonl"), PathBuf::from);

    let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let sim: Arc<dyn SimLink> =
        Arc::new(ReplaySimLink::new(replay, SimVersion::Fs2024, event_tx));
    let (keychain, notice_rx) = Keychain::new(base_url, &api_key, Arc::clone(&sim));

    tokio::spawn(render_notices(notice_rx));

    {
        let tracker_lock = keychain.tracker();
        let mut tracker = tracker_lock.write().await;
        tracker.set_allow_start(env::var("BUSHTRACKER_AUTO_START").map_or(true, |v| v != "0"));
        tracker
            .set_allow_engine_hotstart(env::var("BUSHTRACKER_ALLOW_HOTSTART").is_ok_and(|v| v == "1"));
        tracker.set_allow_hot_end(env::var("BUSHTRACKER_ALLOW_HOT_END").is_ok_and(|v| v == "1"));
    }

    let dispatch = match keychain.api().fetch_dispatch().await {
        Ok(dispatch) => dispatch,
        Err(e) => fatal!("Fetching dispatch info: {e}"),
    };
    print_dispatch(&dispatch);
    keychain.tracker().write().await.assign_dispatch(Some(dispatch));

    if let Err(e) = sim.connect().await {
        fatal!("Issue connecting to sim: {e}");
    }

    let token = CancellationToken::new();
    let supervisor = Supervisor::new(keychain.tracker(), event_rx);
    let loop_token = token.clone();
    let event_loop = tokio::spawn(async move { supervisor.run(loop_token).await });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Interrupted, closing out the flight"),
        _ = event_loop => info!("Event stream ended, closing out the flight"),
    }
    token.cancel();

    if keychain.tracker().write().await.stop().await {
        info!("Flight closed out");
    } else {
        error!("Could not close out the flight - cancel the dispatch on the web if needed");
    }
    sim.disconnect().await;
}

/// Presentation sink: renders tracker notices through the logger.
async fn render_notices(mut notices: broadcast::Receiver<TrackerNotice>) {
    loop {
        match notices.recv().await {
            Ok(TrackerNotice::StateChanged(state)) => info!("Tracker state: {state}"),
            Ok(TrackerNotice::PhaseChanged(phase)) => info!("Flight phase: {phase}"),
            Ok(TrackerNotice::ReadinessErrors(errors)) => print_readiness(&errors),
            Ok(TrackerNotice::Status { text, severity }) => match severity {
                Severity::Ok | Severity::Neutral => info!("{text}"),
                Severity::Error => error!("{text}"),
            },
            Ok(TrackerNotice::DispatchChanged(Some(dispatch))) => {
                info!("Destination now {}", dispatch.arrival());
            }
            Ok(TrackerNotice::DispatchChanged(None)) => info!("Dispatch cleared"),
            Err(broadcast::error::RecvError::Lagged(_)) => {}
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

fn print_readiness(errors: &ReadinessErrors) {
    if errors.aircraft {
        warn!("Aircraft does not match");
    }
    if errors.fuel {
        warn!("Fuel does not match planned fuel");
    }
    if errors.cargo {
        warn!("Cargo does not match dispatch");
    }
    if errors.departure {
        warn!("Incorrect starting location");
    }
    if errors.settings_invalid {
        warn!("Turn off unlimited fuel and slew mode");
    }
}

fn print_dispatch(dispatch: &Dispatch) {
    info!(
        "Dispatch {}: {} -> {}",
        dispatch.id(),
        dispatch.departure(),
        dispatch.arrival()
    );
    info!(
        "Aircraft: {} ({}) reg {}",
        dispatch.aircraft(),
        dispatch.aircraft_type(),
        dispatch.registration()
    );
    let fuel_type = dispatch.fuel_type().map_or("-", |f| match f {
        FuelType::Avgas => "AVGAS",
        FuelType::Jet => "JET",
    });
    info!(
        "Fuel: {:.1} gal {}, cargo {:.0} lbs, {} pax, payload {:.0} lbs",
        dispatch.planned_fuel(),
        fuel_type,
        dispatch.cargo_weight(),
        dispatch.passenger_count(),
        dispatch.total_payload()
    );
    if dispatch.is_empty() {
        info!("Deadhead leg - no cargo aboard");
    }
    if let Some(tour) = dispatch.tour() {
        info!("Tour: {tour}");
    }
}

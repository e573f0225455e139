use super::geo;
use super::notice::{NoticeSender, Severity, TrackerNotice};
use super::readiness::{self, StartVerdict};
use super::telemetry::{LandingEvent, LandingRecord, SettingsSnapshot, TelemetrySample};
use super::tracker_state::{FlightPhase, TrackerState};
use crate::http_handler::dispatch_api::DispatchApi;
use crate::http_handler::http_request::flight_log_post::FlightLog;
use crate::http_handler::http_request::pirep_submit_post::Pirep;
use crate::http_handler::http_response::dispatch::Dispatch;
use crate::sim_link::{SimLink, is_menu_view};
use crate::{error, event, log};
use chrono::{DateTime, TimeDelta, Utc};
use std::sync::Arc;

/// The flight tracking state machine. Consumes the serialized event streams
/// from the sim link, accrues the flight record and drives the dispatch
/// service. Single writer; collaborators observe it through the notice
/// channel.
pub struct FlightTracker {
    api: Arc<dyn DispatchApi>,
    sim: Arc<dyn SimLink>,
    notices: NoticeSender,

    state: TrackerState,
    phase: FlightPhase,
    dispatch: Option<Dispatch>,

    /// The "allow start" gate: readiness alone does not begin tracking.
    allow_start: bool,
    /// Permit starting with engines already running.
    allow_engine_hotstart: bool,
    /// Permit finalizing from the landed-with-engines-running state.
    allow_hot_end: bool,

    last_sample: Option<TelemetrySample>,
    last_settings: Option<SettingsSnapshot>,
    settings_invalid: bool,
    worst_landing: Option<LandingRecord>,
    engine_hotstart: bool,
    prev_in_menu: bool,

    current_distance: f64,
    start_fuel_qty: f64,
    end_fuel_qty: f64,
    block_off: Option<DateTime<Utc>>,
    block_on: Option<DateTime<Utc>>,
    aircraft_name: String,
    log_last_sent: Option<DateTime<Utc>>,
}

impl FlightTracker {
    /// Altitude that confirms a real liftoff, guarding against bounces on
    /// water takeoffs.
    const LIFTOFF_ALTITUDE_FT: f64 = 200.0;
    const CRUISE_ALTITUDE_FT: f64 = 1000.0;
    const GO_AROUND_ALTITUDE_FT: f64 = 50.0;
    /// Below this surface-relative speed (ft/s) the aircraft has stopped rolling out.
    const STOPPED_ROLLING_SPEED: f64 = 40.0;
    /// Below this surface-relative speed (ft/s) the aircraft counts as stationary.
    const STATIONARY_SPEED: f64 = 15.0;
    /// Maximum speed (ft/s) at which a hot-end submission is accepted.
    const HOT_END_MAX_SPEED: f64 = 10.0;
    /// A sample-to-sample jump beyond this is a teleport, not flying.
    const TELEPORT_JUMP_NM: f64 = 50.0;
    /// Fuel may not grow by more than 1% between samples mid-flight.
    const REFUEL_GROWTH_LIMIT: f64 = 1.01;
    /// The aircraft must come to rest within this range of the planned
    /// arrival, otherwise a diversion is resolved.
    const ARRIVAL_TOLERANCE_NM: f64 = 2.0;
    const LOG_PUSH_INTERVAL: TimeDelta = TimeDelta::seconds(60);
    const BLOCK_TIME_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    pub fn new(api: Arc<dyn DispatchApi>, sim: Arc<dyn SimLink>, notices: NoticeSender) -> Self {
        Self {
            api,
            sim,
            notices,
            state: TrackerState::None,
            phase: FlightPhase::Preflight,
            dispatch: None,
            allow_start: true,
            allow_engine_hotstart: false,
            allow_hot_end: false,
            last_sample: None,
            last_settings: None,
            settings_invalid: false,
            worst_landing: None,
            engine_hotstart: false,
            prev_in_menu: false,
            current_distance: 0.0,
            start_fuel_qty: 0.0,
            end_fuel_qty: 0.0,
            block_off: None,
            block_on: None,
            aircraft_name: String::new(),
            log_last_sent: None,
        }
    }

    pub fn state(&self) -> TrackerState { self.state }
    pub fn phase(&self) -> FlightPhase { self.phase }
    pub fn dispatch(&self) -> Option<&Dispatch> { self.dispatch.as_ref() }
    pub fn current_distance(&self) -> f64 { self.current_distance }
    pub fn worst_landing(&self) -> Option<LandingRecord> { self.worst_landing }
    pub fn block_off(&self) -> Option<DateTime<Utc>> { self.block_off }
    pub fn block_on(&self) -> Option<DateTime<Utc>> { self.block_on }
    pub fn start_fuel_qty(&self) -> f64 { self.start_fuel_qty }

    pub fn set_allow_start(&mut self, allow: bool) { self.allow_start = allow; }
    pub fn set_allow_engine_hotstart(&mut self, allow: bool) { self.allow_engine_hotstart = allow; }
    pub fn set_allow_hot_end(&mut self, allow: bool) { self.allow_hot_end = allow; }

    /// Sets or clears the active dispatch and resets all per-flight
    /// bookkeeping for a fresh attempt.
    pub fn assign_dispatch(&mut self, dispatch: Option<Dispatch>) {
        self.dispatch = dispatch;
        self.set_state(if self.dispatch.is_some() {
            TrackerState::HasDispatch
        } else {
            TrackerState::None
        });
        self.set_phase(if self.dispatch.is_some() {
            FlightPhase::Boarding
        } else {
            FlightPhase::Preflight
        });

        self.last_sample = None;
        self.current_distance = 0.0;
        self.start_fuel_qty = 0.0;
        self.end_fuel_qty = 0.0;
        self.block_off = None;
        self.block_on = None;
        self.aircraft_name.clear();
        self.engine_hotstart = false;
        self.worst_landing = None;
        self.prev_in_menu = false;
        self.log_last_sent = None;

        if self.dispatch.is_some() {
            self.push_status(FlightPhase::Boarding);
        }
        self.notices.send(TrackerNotice::DispatchChanged(self.dispatch.clone()));
    }

    /// Primary state-transition entry point, one call per inbound sample,
    /// strictly in arrival order.
    pub async fn on_telemetry(&mut self, sample: TelemetrySample) {
        if self.state == TrackerState::None
            || self.dispatch.is_none()
            || self.last_settings.is_none()
        {
            return;
        }

        // Integrity guard: tampered settings or a mid-flight refuel void the
        // attempt outright.
        if self.state >= TrackerState::InFlight {
            let refueled = self
                .last_sample
                .as_ref()
                .is_some_and(|prev| sample.fuel_qty > prev.fuel_qty * Self::REFUEL_GROWTH_LIMIT);
            if self.settings_invalid || refueled {
                let reason = if refueled {
                    "Mid-flight refueling detected"
                } else {
                    "Aircraft settings were changed mid-flight"
                };
                self.abandon_flight(reason).await;
                return;
            }
        }

        match self.state {
            TrackerState::HasDispatch => self.check_start_conditions(&sample),
            TrackerState::ReadyToStart => self.check_for_block_off(&sample),
            TrackerState::InFlight => self.advance_flight_phase(&sample).await,
            TrackerState::Shutdown => self.check_for_engine_restart(&sample),
            TrackerState::None => unreachable!("telemetry is ignored without a dispatch"),
        }

        if self.state >= TrackerState::ReadyToStart {
            let in_menu = is_menu_view(self.sim.sim_version(), sample.camera_state);
            let prev_deltas = self.last_sample.as_ref().map(|prev| {
                (
                    geo::distance_nm(prev.latitude, prev.longitude, sample.latitude, sample.longitude),
                    geo::heading_changed(prev.heading_magnetic, sample.heading_magnetic),
                    geo::altitude_changed(prev.indicated_altitude, sample.indicated_altitude),
                )
            });
            if let Some((jump, heading_changed, alt_changed)) = prev_deltas {
                if jump > Self::TELEPORT_JUMP_NM || (in_menu && self.prev_in_menu) {
                    if self.state == TrackerState::Shutdown {
                        // flight already complete, finalize instead of voiding it
                        if !self.submit_flight().await {
                            self.set_state(TrackerState::None);
                        }
                    } else {
                        self.abandon_flight("It looks like you have abandoned your flight")
                            .await;
                    }
                    return;
                }

                self.current_distance += jump;

                let stale = self
                    .log_last_sent
                    .is_none_or(|t| Utc::now() > t + Self::LOG_PUSH_INTERVAL);
                if heading_changed || alt_changed || stale {
                    self.push_flight_log(&sample);
                    self.log_last_sent = Some(Utc::now());
                }
            }
            self.prev_in_menu = in_menu;
        }

        self.last_sample = Some(sample);
    }

    /// Keeps the worst touchdown reported by the simulator. Events without a
    /// position are bogus and ignored.
    pub fn on_landing_event(&mut self, event: LandingEvent) {
        if event.latitude == 0.0 && event.longitude == 0.0 {
            return;
        }
        log!(
            "Landing data received: {:.2}fpm {:.2}deg / {:.2}deg at {:.2} {:.2}",
            event.velocity,
            event.pitch,
            event.bank,
            event.latitude,
            event.longitude
        );
        if self.worst_landing.is_none_or(|worst| event.velocity > worst.rate) {
            self.worst_landing = Some(LandingRecord {
                rate: event.velocity,
                pitch: event.pitch,
                bank: event.bank,
                latitude: event.latitude,
                longitude: event.longitude,
            });
        }
    }

    /// Stores the latest configuration snapshot and re-derives the invalid
    /// flag used by both readiness and the in-flight integrity guard.
    pub fn on_settings(&mut self, snapshot: SettingsSnapshot) {
        let weight_mismatch = self
            .dispatch
            .as_ref()
            .is_some_and(|d| !geo::weight_valid(snapshot.total_weight(), d.total_payload()));
        self.settings_invalid =
            snapshot.unlimited_fuel || snapshot.slew_mode || weight_mismatch;
        self.last_settings = Some(snapshot);
    }

    pub fn on_connected(&mut self) {
        self.notices.status("Connected to simulator", Severity::Ok);
    }

    pub fn on_disconnected(&mut self) {
        // tracker state survives a dropped link, the pilot may reconnect
        self.notices.status("Simulator connection lost", Severity::Error);
    }

    /// Finalizes the flight: resolves a possible diversion, builds the pirep
    /// from accumulated state and submits it. Leaves state untouched on
    /// failure so the caller may retry.
    pub async fn submit_flight(&mut self) -> bool {
        let Some(last) = self.last_sample.clone() else { return false };
        if self.dispatch.is_none() || self.last_settings.is_none() || self.worst_landing.is_none()
        {
            return false;
        }
        let hot_end = self.allow_hot_end
            && self.state == TrackerState::InFlight
            && self.phase == FlightPhase::Landed;
        if self.sim.is_connected() && self.state != TrackerState::Shutdown && !hot_end {
            return false;
        }
        if hot_end && last.ground_speed.abs() >= Self::HOT_END_MAX_SPEED {
            self.notices.status("Come to a stop before ending the flight", Severity::Error);
            return false;
        }

        // The arrival capture never ran when ending hot; take it from the
        // last sample instead.
        if self.block_on.is_none() {
            self.block_on = Some(Utc::now());
            self.end_fuel_qty = last.fuel_qty;
            self.aircraft_name = last.title.clone();
        }

        if !self.check_and_divert(last.latitude, last.longitude).await {
            return false;
        }

        let Some(dispatch) = self.dispatch.as_ref() else { return false };
        let Some(worst) = self.worst_landing else { return false };
        let pirep = Pirep {
            pirep_id: dispatch.id().to_string(),
            fuel_used: self.start_fuel_qty - self.end_fuel_qty,
            landing_rate: worst.rate,
            touchdown_lat: worst.latitude,
            touchdown_lon: worst.longitude,
            touchdown_bank: worst.bank,
            touchdown_pitch: worst.pitch,
            block_off_time: self
                .block_off
                .unwrap_or_else(Utc::now)
                .format(Self::BLOCK_TIME_FORMAT)
                .to_string(),
            block_on_time: self
                .block_on
                .unwrap_or_else(Utc::now)
                .format(Self::BLOCK_TIME_FORMAT)
                .to_string(),
            distance: self.current_distance,
            aircraft_used: self.aircraft_name.clone(),
            sim_used: self
                .sim
                .sim_version()
                .map_or_else(|| "unknown".to_string(), |v| v.to_string()),
            engine_hot_start: self.engine_hotstart,
        };

        match self.api.submit_report(pirep).await {
            Ok(()) => {
                self.notices.status("Pirep submitted", Severity::Ok);
                self.assign_dispatch(None);
                true
            }
            Err(e) => {
                error!("Post pirep: {e}");
                self.notices.status("Error submitting pirep", Severity::Error);
                false
            }
        }
    }

    /// Cancels or finalizes the current flight depending on state. Returns
    /// false without clearing anything if the remote call fails, so the
    /// caller can decide whether to force-close.
    pub async fn stop(&mut self) -> bool {
        if self.dispatch.is_none() {
            return true;
        }
        if self.state == TrackerState::Shutdown {
            if self.submit_flight().await {
                self.notices.status("Dispatch submitted", Severity::Ok);
                true
            } else {
                self.notices.status("Error submitting flight", Severity::Error);
                false
            }
        } else {
            match self.api.cancel_report().await {
                Ok(()) => {
                    self.notices.status("Tracking stopped", Severity::Neutral);
                    self.assign_dispatch(None);
                    true
                }
                Err(e) => {
                    self.notices
                        .status(format!("Error cancelling tracking: {e}"), Severity::Error);
                    false
                }
            }
        }
    }

    /// Runs the readiness evaluation while holding a dispatch, and arms the
    /// flight once everything checks out and the start gate is open.
    fn check_start_conditions(&mut self, sample: &TelemetrySample) {
        let result = {
            let (Some(dispatch), Some(settings)) =
                (self.dispatch.as_ref(), self.last_settings.as_ref())
            else {
                return;
            };
            readiness::check_ready(
                dispatch,
                sample,
                settings,
                self.allow_engine_hotstart,
                self.sim.is_user_controlled(),
            )
        };

        self.notices.send(TrackerNotice::ReadinessErrors(result.errors));
        match result.verdict {
            StartVerdict::WorldLoading => {
                self.notices.status("Waiting for world to load", Severity::Error);
            }
            StartVerdict::NotReady => {
                self.notices.status("Start conditions not met", Severity::Error);
            }
            StartVerdict::EnginesRunning => {
                self.notices.status("Shutdown engines before starting", Severity::Error);
            }
            StartVerdict::Ready => {
                self.notices.status("Ready to start", Severity::Ok);
            }
        }

        if result.ready {
            if self.allow_start {
                self.engine_hotstart = sample.engines_running();
                // Clear the landing record so the next touchdown reported by
                // the simulator is seen as new.
                self.worst_landing = None;
                self.set_state(TrackerState::ReadyToStart);
                self.notices.status("Pre-flight|Loading", Severity::Ok);
                self.sim.send_text_to_sim("Bush Tracker Status: Pre-Flight - Ready");
            } else {
                self.notices.status("Waiting for start checkbox", Severity::Neutral);
            }
        }
    }

    /// Once the engines run on the ground the blocks are off.
    fn check_for_block_off(&mut self, sample: &TelemetrySample) {
        if sample.engines_running() && sample.on_ground {
            self.block_off = Some(Utc::now());
            self.start_fuel_qty = sample.fuel_qty;
            self.set_phase(FlightPhase::Boarding);
            self.set_state(TrackerState::InFlight);
            self.push_status(FlightPhase::Boarding);
        }
    }

    async fn advance_flight_phase(&mut self, sample: &TelemetrySample) {
        let on_ground = sample.on_ground;
        let engines_running = sample.engines_running();
        match self.phase {
            FlightPhase::Boarding => {
                if !on_ground && sample.plane_altitude > Self::LIFTOFF_ALTITUDE_FT {
                    self.set_phase(FlightPhase::Departed);
                    self.push_status(FlightPhase::Departed);
                    self.notices.status("Departed", Severity::Ok);
                    self.sim
                        .send_text_to_sim("Bush Tracker Status: Departed - Have a good flight!");
                }
            }
            FlightPhase::Departed => {
                if sample.plane_altitude > Self::CRUISE_ALTITUDE_FT {
                    self.set_phase(FlightPhase::Cruise);
                    self.push_status(FlightPhase::Cruise);
                    self.notices.status("Cruise", Severity::Ok);
                }
            }
            FlightPhase::Cruise => {
                if on_ground && sample.ground_speed.abs() < Self::STOPPED_ROLLING_SPEED {
                    self.set_phase(FlightPhase::Landed);
                    self.push_status(FlightPhase::Landed);
                    self.notices.status("Landed", Severity::Ok);
                    self.sim.send_text_to_sim("Bush Tracker Status: Landed");
                }
                self.check_water_touchdown(sample);
            }
            FlightPhase::Landed => {
                if !on_ground && sample.plane_altitude > Self::GO_AROUND_ALTITUDE_FT {
                    self.set_phase(FlightPhase::Cruise);
                    self.push_status(FlightPhase::Cruise);
                    self.notices.status("Cruise", Severity::Ok);
                } else if !engines_running && sample.ground_speed.abs() < Self::STATIONARY_SPEED {
                    self.arrive(sample).await;
                }
            }
            FlightPhase::Preflight | FlightPhase::Arrived => {}
        }
    }

    /// Floats have no touchdown event; derive a landing rate from the
    /// vertical speed across the ground-contact transition.
    fn check_water_touchdown(&mut self, sample: &TelemetrySample) {
        let Some(prev) = self.last_sample.as_ref() else { return };
        if !(sample.on_ground
            && !prev.on_ground
            && sample.surface_type == TelemetrySample::SURFACE_WATER)
        {
            return;
        }
        // ft/s averaged across the two refs, scaled to ft/min; a bounce
        // between them can come out negative.
        let rate = (-(sample.vertical_speed + prev.vertical_speed) * 60.0 / 2.0).max(0.0);
        if self.worst_landing.is_none_or(|worst| rate > worst.rate) {
            self.worst_landing = Some(LandingRecord {
                rate,
                pitch: sample.pitch,
                bank: sample.bank,
                latitude: sample.latitude,
                longitude: sample.longitude,
            });
        }
    }

    async fn arrive(&mut self, sample: &TelemetrySample) {
        self.set_phase(FlightPhase::Arrived);
        self.set_state(TrackerState::Shutdown);
        self.push_status(FlightPhase::Arrived);
        self.notices.status("Flight ended", Severity::Ok);
        self.sim.send_text_to_sim(
            "Bush Tracker Status: Flight ended - Thanks for flying with Bush Divers",
        );

        self.end_fuel_qty = sample.fuel_qty;
        self.block_on = Some(Utc::now());
        self.aircraft_name = sample.title.clone();

        // Resolve a diversion right away; a failure here is tolerated, the
        // submission re-checks before building the pirep.
        let _ = self.check_and_divert(sample.latitude, sample.longitude).await;
    }

    /// Engines running again after shutdown: back to a landed flight, the
    /// pilot is taxiing before submission.
    fn check_for_engine_restart(&mut self, sample: &TelemetrySample) {
        if sample.engines_running() {
            self.set_state(TrackerState::InFlight);
            self.set_phase(FlightPhase::Landed);
            self.push_status(FlightPhase::Landed);
            self.notices.status("Landed", Severity::Ok);
        }
    }

    /// Checks the rest position against the planned arrival and resolves the
    /// nearest airport if the pilot landed elsewhere. Does _not_ check
    /// whether the aircraft is on the ground.
    async fn check_and_divert(&mut self, lat: f64, lon: f64) -> bool {
        let (pirep_id, distance) = {
            let Some(dispatch) = self.dispatch.as_ref() else { return false };
            (
                dispatch.id().to_string(),
                geo::distance_nm(dispatch.arr_lat(), dispatch.arr_lon(), lat, lon),
            )
        };
        if distance <= Self::ARRIVAL_TOLERANCE_NM {
            return true;
        }

        match self.api.resolve_diversion(&pirep_id, lat, lon).await {
            Ok(location) => {
                if let Some(dispatch) = self.dispatch.as_mut() {
                    dispatch.apply_diversion(&location.icao, location.lat, location.lon);
                }
                self.notices.send(TrackerNotice::DispatchChanged(self.dispatch.clone()));
                true
            }
            Err(e) => {
                log!("Finding nearest airport: {e}");
                self.notices.status("No airport within 2NM", Severity::Error);
                false
            }
        }
    }

    /// The integrity-violation path: cancel on the server, drop to `None`
    /// and tell the pilot why.
    async fn abandon_flight(&mut self, reason: &str) {
        self.notices.status(
            format!(
                "{reason} - tracking will now stop and your progress is cancelled. \
                 You can start your flight again by returning to the departure location"
            ),
            Severity::Error,
        );
        let cancelled = self.api.cancel_report().await.is_ok();
        self.set_state(TrackerState::None);
        if cancelled {
            self.notices.status("Tracking stopped", Severity::Neutral);
            self.assign_dispatch(None);
        } else {
            self.notices.status("Issue cancelling pirep", Severity::Error);
        }
    }

    fn set_state(&mut self, new_state: TrackerState) {
        if self.state == new_state {
            return;
        }
        if self.state.is_strict() != new_state.is_strict() {
            self.sim.set_strict_mode(new_state.is_strict());
        }
        self.state = new_state;
        self.notices.send(TrackerNotice::StateChanged(self.state));
    }

    fn set_phase(&mut self, new_phase: FlightPhase) {
        if self.phase == new_phase {
            return;
        }
        self.phase = new_phase;
        self.notices.send(TrackerNotice::PhaseChanged(self.phase));
    }

    /// Pushes a phase status to the dispatch service, fire-and-forget.
    fn push_status(&self, phase: FlightPhase) {
        let Some(dispatch) = self.dispatch.as_ref() else { return };
        let pirep_id = dispatch.id().to_string();
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            if let Err(e) = api.post_status(&pirep_id, i32::from(phase)).await {
                event!("Post pirep status: {e}");
            }
        });
    }

    /// Pushes a flight-log entry to the dispatch service, fire-and-forget.
    fn push_flight_log(&self, sample: &TelemetrySample) {
        let Some(dispatch) = self.dispatch.as_ref() else { return };
        let entry = FlightLog {
            pirep_id: dispatch.id().to_string(),
            lat: sample.latitude,
            lon: sample.longitude,
            heading: sample.heading_magnetic.round() as i32,
            altitude: sample.indicated_altitude.round() as i32,
            indicated_speed: sample.airspeed_indicated.round() as i32,
            ground_speed: sample.airspeed_true.round() as i32,
            fuel_flow: sample.fuel_flow,
            vs: sample.vertical_speed,
            sim_time: geo::zulu_date_time(sample.local_time_secs),
            zulu_time: geo::zulu_date_time(sample.zulu_time_secs),
            distance: self.current_distance,
        };
        let api = Arc::clone(&self.api);
        let notices = self.notices.clone();
        tokio::spawn(async move {
            match api.post_log(entry).await {
                Ok(()) => notices.status("Flight log updated", Severity::Ok),
                Err(e) => notices
                    .status(format!("Error submitting flight update: {e}"), Severity::Error),
            }
        });
    }
}

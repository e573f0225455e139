use crate::flight_tracker::geo;
use crate::flight_tracker::telemetry::{SettingsSnapshot, TelemetrySample};
use crate::http_handler::http_response::dispatch::Dispatch;

/// Departure check tolerance: the aircraft must sit within this many
/// nautical miles of the dispatched departure point.
const DEPARTURE_TOLERANCE_NM: f64 = 2.0;

/// Per-field readiness failures, published to the presentation layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadinessErrors {
    /// Reserved: aircraft-type matching is intentionally not enforced.
    pub aircraft: bool,
    pub fuel: bool,
    pub cargo: bool,
    pub departure: bool,
    pub settings_invalid: bool,
}

impl ReadinessErrors {
    pub fn any(&self) -> bool {
        self.aircraft || self.fuel || self.cargo || self.departure || self.settings_invalid
    }
}

/// The single most relevant start condition, in display priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartVerdict {
    /// The camera is in a menu/map view, the world has not loaded yet.
    WorldLoading,
    /// One or more readiness checks failed.
    NotReady,
    /// Everything checks out except the engines are already running.
    EnginesRunning,
    Ready,
}

/// Outcome of a readiness evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Readiness {
    pub ready: bool,
    pub errors: ReadinessErrors,
    pub verdict: StartVerdict,
}

/// Judges whether the pilot may start the dispatched flight.
///
/// Pure over its inputs; the tracker owns publishing the error flags and
/// the status message derived from the verdict.
pub fn check_ready(
    dispatch: &Dispatch,
    sample: &TelemetrySample,
    settings: &SettingsSnapshot,
    hot_start_allowed: bool,
    user_controlled: bool,
) -> Readiness {
    let errors = ReadinessErrors {
        aircraft: false,
        fuel: !geo::weight_valid(sample.fuel_qty, dispatch.planned_fuel()),
        cargo: !geo::weight_valid(settings.total_weight(), dispatch.total_payload()),
        departure: geo::distance_nm(
            dispatch.dep_lat(),
            dispatch.dep_lon(),
            sample.latitude,
            sample.longitude,
        ) > DEPARTURE_TOLERANCE_NM,
        settings_invalid: settings.unlimited_fuel || settings.slew_mode,
    };

    let engines_blocking = sample.engines_running() && !hot_start_allowed;
    let verdict = if !user_controlled {
        StartVerdict::WorldLoading
    } else if errors.any() {
        StartVerdict::NotReady
    } else if engines_blocking {
        StartVerdict::EnginesRunning
    } else {
        StartVerdict::Ready
    };

    Readiness {
        ready: !errors.any() && user_controlled && !engines_blocking,
        errors,
        verdict,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flight_tracker::tests::{dispatch_fixture, sample_fixture, settings_fixture};

    #[test]
    fn ready_when_everything_matches() {
        let dispatch = dispatch_fixture(100.0, (0.0, 0.0), 225.0);
        let sample = sample_fixture(|s| s.fuel_qty = 100.0);
        let settings = settings_fixture(225.0);

        let res = check_ready(&dispatch, &sample, &settings, false, true);
        assert!(res.ready);
        assert_eq!(res.errors, ReadinessErrors::default());
        assert_eq!(res.verdict, StartVerdict::Ready);
    }

    #[test]
    fn short_fuel_flags_fuel_error() {
        let dispatch = dispatch_fixture(100.0, (0.0, 0.0), 225.0);
        let sample = sample_fixture(|s| s.fuel_qty = 70.0);
        let settings = settings_fixture(225.0);

        let res = check_ready(&dispatch, &sample, &settings, false, true);
        assert!(!res.ready);
        assert!(res.errors.fuel);
        assert!(!res.errors.departure);
        assert_eq!(res.verdict, StartVerdict::NotReady);
    }

    #[test]
    fn wrong_position_flags_departure_error() {
        let dispatch = dispatch_fixture(100.0, (47.0, 11.0), 225.0);
        let sample = sample_fixture(|s| s.fuel_qty = 100.0);

        let res = check_ready(&dispatch, &sample, &settings_fixture(225.0), false, true);
        assert!(!res.ready);
        assert!(res.errors.departure);
    }

    #[test]
    fn menu_view_outranks_other_failures() {
        let dispatch = dispatch_fixture(100.0, (0.0, 0.0), 225.0);
        let sample = sample_fixture(|s| s.fuel_qty = 70.0);

        let res = check_ready(&dispatch, &sample, &settings_fixture(225.0), false, false);
        assert!(!res.ready);
        assert_eq!(res.verdict, StartVerdict::WorldLoading);
    }

    #[test]
    fn running_engines_block_unless_hotstart_allowed() {
        let dispatch = dispatch_fixture(100.0, (0.0, 0.0), 225.0);
        let sample = sample_fixture(|s| {
            s.fuel_qty = 100.0;
            s.engine_combustion[0] = true;
        });
        let settings = settings_fixture(225.0);

        let blocked = check_ready(&dispatch, &sample, &settings, false, true);
        assert!(!blocked.ready);
        assert_eq!(blocked.verdict, StartVerdict::EnginesRunning);

        let allowed = check_ready(&dispatch, &sample, &settings, true, true);
        assert!(allowed.ready);
        assert_eq!(allowed.verdict, StartVerdict::Ready);
    }

    #[test]
    fn tampered_settings_flag_invalid() {
        let dispatch = dispatch_fixture(100.0, (0.0, 0.0), 225.0);
        let sample = sample_fixture(|s| s.fuel_qty = 100.0);
        let mut settings = settings_fixture(225.0);
        settings.slew_mode = true;

        let res = check_ready(&dispatch, &sample, &settings, false, true);
        assert!(!res.ready);
        assert!(res.errors.settings_invalid);
    }
}

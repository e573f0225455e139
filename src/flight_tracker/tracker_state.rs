use strum_macros::Display;

/// Coarse lifecycle stage of the tracker. States only move forward through
/// the ordering, apart from the engine-restart regression out of `Shutdown`.
#[derive(Debug, Display, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum TrackerState {
    None,
    HasDispatch,
    ReadyToStart,
    InFlight,
    Shutdown,
}

impl TrackerState {
    /// True while the sim adapter should refuse slew/free-camera mode.
    pub fn is_strict(self) -> bool {
        matches!(self, TrackerState::ReadyToStart | TrackerState::InFlight)
    }
}

/// Fine-grained stage within an active flight. The wire codes must stay in
/// sync with the dispatch platform.
#[derive(Debug, Display, PartialEq, Eq, Clone, Copy)]
pub enum FlightPhase {
    Preflight,
    Boarding,
    Departed,
    Cruise,
    Landed,
    Arrived,
}

impl From<FlightPhase> for i32 {
    fn from(value: FlightPhase) -> Self {
        match value {
            FlightPhase::Preflight => 0,
            FlightPhase::Boarding => 1,
            FlightPhase::Departed => 2,
            FlightPhase::Cruise => 3,
            FlightPhase::Landed => 4,
            FlightPhase::Arrived => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_states_are_ordered() {
        assert!(TrackerState::None < TrackerState::HasDispatch);
        assert!(TrackerState::HasDispatch < TrackerState::ReadyToStart);
        assert!(TrackerState::ReadyToStart < TrackerState::InFlight);
        assert!(TrackerState::InFlight < TrackerState::Shutdown);
    }

    #[test]
    fn strict_mode_covers_ready_and_in_flight() {
        assert!(!TrackerState::None.is_strict());
        assert!(!TrackerState::HasDispatch.is_strict());
        assert!(TrackerState::ReadyToStart.is_strict());
        assert!(TrackerState::InFlight.is_strict());
        assert!(!TrackerState::Shutdown.is_strict());
    }

    #[test]
    fn phase_wire_codes() {
        assert_eq!(i32::from(FlightPhase::Preflight), 0);
        assert_eq!(i32::from(FlightPhase::Arrived), 5);
    }
}

//! Update/reset/accumulate tracking for a content element.

use std::time::SystemTime;

/// The lifecycle state machine owned by every content element.
///
/// The flags are independent axes, not mutually exclusive states:
///
/// - the *update* flag records whether content varied since the cycle
///   driver last looked;
/// - the *reset* policy flag says whether content should be discarded at
///   the end of a monitoring cycle;
/// - the *accumulate* flag suppresses content resets while set;
/// - the *soft-reset* flag records whether a baseline snapshot is
///   active in the backing store.
///
/// A fresh state counts as updated: a newly booked element has never
/// been observed by the driver.
#[derive(Debug)]
pub struct ElementState {
    varied_since_check: bool,
    reset_on_cycle_end: bool,
    accumulate: bool,
    soft_reset_enabled: bool,
    created_at: SystemTime,
}

impl ElementState {
    /// Create the state for a freshly booked element.
    pub fn new() -> Self {
        Self {
            varied_since_check: true,
            reset_on_cycle_end: false,
            accumulate: false,
            soft_reset_enabled: false,
            created_at: SystemTime::now(),
        }
    }

    /// True if content changed since the last `clear_updated`.
    pub fn was_updated(&self) -> bool {
        self.varied_since_check
    }

    /// Record a content mutation. Called by every mutating entry point.
    pub fn mark_updated(&mut self) {
        self.varied_since_check = true;
    }

    /// Clear the update flag.
    ///
    /// Called by the cycle driver after it has observed the flag; content
    /// resets do not touch it.
    pub fn clear_updated(&mut self) {
        self.varied_since_check = false;
    }

    /// Whether content should be reset at the end of a monitoring cycle.
    pub fn reset_on_cycle_end(&self) -> bool {
        self.reset_on_cycle_end
    }

    /// Set the end-of-cycle reset policy. No content side effects.
    pub fn set_reset_on_cycle_end(&mut self, flag: bool) {
        self.reset_on_cycle_end = flag;
    }

    /// Whether content accumulates across monitoring cycles.
    pub fn accumulate(&self) -> bool {
        self.accumulate
    }

    /// Set the accumulate policy.
    ///
    /// While set, content resets are no-ops; clearing it restores normal
    /// reset behavior from the next reset on.
    pub fn set_accumulate(&mut self, flag: bool) {
        self.accumulate = flag;
    }

    /// Whether a soft-reset baseline is active.
    pub fn soft_reset_enabled(&self) -> bool {
        self.soft_reset_enabled
    }

    pub(crate) fn set_soft_reset_enabled(&mut self, flag: bool) {
        self.soft_reset_enabled = flag;
    }

    /// When the element was created.
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }
}

impl Default for ElementState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_counts_as_updated() {
        let state = ElementState::new();
        assert!(state.was_updated());
    }

    #[test]
    fn clear_then_mark_roundtrip() {
        let mut state = ElementState::new();
        state.clear_updated();
        assert!(!state.was_updated());

        state.mark_updated();
        assert!(state.was_updated());
        state.mark_updated(); // idempotent
        assert!(state.was_updated());

        state.clear_updated();
        assert!(!state.was_updated());
    }

    #[test]
    fn policy_flags_default_off_and_are_independent() {
        let mut state = ElementState::new();
        assert!(!state.reset_on_cycle_end());
        assert!(!state.accumulate());
        assert!(!state.soft_reset_enabled());

        state.set_accumulate(true);
        assert!(state.accumulate());
        assert!(!state.reset_on_cycle_end());

        state.set_reset_on_cycle_end(true);
        state.set_accumulate(false);
        assert!(state.reset_on_cycle_end());
        assert!(!state.accumulate());
    }

    #[test]
    fn policy_setters_do_not_touch_update_flag() {
        let mut state = ElementState::new();
        state.clear_updated();

        state.set_accumulate(true);
        state.set_reset_on_cycle_end(true);
        assert!(!state.was_updated());
    }

    #[test]
    fn creation_time_is_in_the_past() {
        let state = ElementState::new();
        assert!(state.created_at() <= SystemTime::now());
    }
}

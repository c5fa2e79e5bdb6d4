//! Per-target reveal state machine.
//!
//! ```text
//! Hidden  --[in view]-------------> Visible        (once = false)
//! Hidden  --[in view]-------------> Released(vis)  (once = true, latch)
//! Visible --[out of view]---------> Hidden         (once = false)
//! Hidden | Visible --[release]----> Released       (unmount / handle)
//! ```
//!
//! `Released` is terminal and remembers whether the target was showing, so a
//! latched target stays visible for the rest of its lifetime.

use crate::source::IntersectionEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Hidden,
    Visible,
    Released {
        visible: bool,
    },
}

/// Trigger settings fixed at attach time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trigger {
    pub threshold: f64,
    pub once: bool,
}

/// Outcome of feeding one event into the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Unchanged,
    Show,
    Hide,
    /// Shown and latched; the subscription must be released now.
    ShowAndRelease,
}

impl RevealState {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Visible | Self::Released { visible: true })
    }

    pub fn is_released(self) -> bool {
        matches!(self, Self::Released { .. })
    }

    pub fn on_entry(&mut self, entry: IntersectionEntry, trigger: Trigger) -> Step {
        let in_view = entry.meets(trigger.threshold);
        let (next, step) = match (*self, in_view) {
            (Self::Released { .. }, _) => return Step::Unchanged,
            (Self::Hidden, true) if trigger.once => {
                (Self::Released { visible: true }, Step::ShowAndRelease)
            }
            (Self::Hidden, true) => (Self::Visible, Step::Show),
            // A once-target only reaches Visible by failing open; it latches
            // on the next in-view event like any other.
            (Self::Visible, true) if trigger.once => {
                (Self::Released { visible: true }, Step::ShowAndRelease)
            }
            (Self::Visible, false) if !trigger.once => (Self::Hidden, Step::Hide),
            (state, _) => (state, Step::Unchanged),
        };
        *self = next;
        step
    }

    /// Show without an intersection signal.
    pub fn fail_open(&mut self) -> Step {
        match *self {
            Self::Hidden => {
                *self = Self::Visible;
                Step::Show
            }
            _ => Step::Unchanged,
        }
    }

    /// Enter the terminal state. Returns false if already released.
    pub fn release(&mut self) -> bool {
        if self.is_released() {
            return false;
        }
        *self = Self::Released {
            visible: self.is_visible(),
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONCE: Trigger = Trigger {
        threshold: 0.1,
        once: true,
    };
    const REPEAT: Trigger = Trigger {
        threshold: 0.1,
        once: false,
    };

    #[test]
    fn test_once_latches_on_first_entry() {
        let mut state = RevealState::Hidden;
        assert_eq!(state.on_entry(IntersectionEntry::entering(0.5), ONCE), Step::ShowAndRelease);
        assert_eq!(state, RevealState::Released { visible: true });
        assert_eq!(state.on_entry(IntersectionEntry::leaving(), ONCE), Step::Unchanged);
        assert!(state.is_visible());
    }

    #[test]
    fn test_once_ignores_leave_while_hidden() {
        let mut state = RevealState::Hidden;
        assert_eq!(state.on_entry(IntersectionEntry::leaving(), ONCE), Step::Unchanged);
        assert_eq!(state, RevealState::Hidden);
    }

    #[test]
    fn test_below_threshold_counts_as_out_of_view() {
        let mut state = RevealState::Hidden;
        assert_eq!(state.on_entry(IntersectionEntry::entering(0.05), REPEAT), Step::Unchanged);
        assert_eq!(state.on_entry(IntersectionEntry::entering(0.2), REPEAT), Step::Show);
        assert_eq!(state.on_entry(IntersectionEntry::entering(0.05), REPEAT), Step::Hide);
    }

    #[test]
    fn test_repeat_toggles_and_ignores_duplicates() {
        let mut state = RevealState::Hidden;
        assert_eq!(state.on_entry(IntersectionEntry::entering(1.0), REPEAT), Step::Show);
        assert_eq!(state.on_entry(IntersectionEntry::entering(1.0), REPEAT), Step::Unchanged);
        assert_eq!(state.on_entry(IntersectionEntry::leaving(), REPEAT), Step::Hide);
        assert_eq!(state.on_entry(IntersectionEntry::leaving(), REPEAT), Step::Unchanged);
        assert_eq!(state, RevealState::Hidden);
    }

    #[test]
    fn test_release_is_terminal_and_keeps_visibility() {
        let mut state = RevealState::Visible;
        assert!(state.release());
        assert!(!state.release());
        assert_eq!(state, RevealState::Released { visible: true });
        assert_eq!(state.on_entry(IntersectionEntry::leaving(), REPEAT), Step::Unchanged);
        assert_eq!(state.fail_open(), Step::Unchanged);

        let mut hidden = RevealState::Hidden;
        assert!(hidden.release());
        assert!(!hidden.is_visible());
    }

    #[test]
    fn test_fail_open_then_latch() {
        let mut state = RevealState::Hidden;
        assert_eq!(state.fail_open(), Step::Show);
        assert_eq!(state.on_entry(IntersectionEntry::leaving(), ONCE), Step::Unchanged);
        assert_eq!(state, RevealState::Visible);
        assert_eq!(state.on_entry(IntersectionEntry::entering(1.0), ONCE), Step::ShowAndRelease);
    }
}

use tracing::debug;

use super::intent::{NavigationIntent, RejectReason, StateDelta, StateFields};
use super::ring::wrap;
use super::tabs;

/// Authoritative carousel state. Only [`CarouselState::apply`] mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselState {
    len: usize,
    fields: StateFields,
}

impl CarouselState {
    /// State for a ring of `len` items centered on item 0. `len` must be >= 1.
    pub fn new(len: usize) -> crate::Result<Self> {
        if len == 0 {
            return Err(crate::Error::EmptyCarousel);
        }
        Ok(Self {
            len,
            fields: StateFields {
                front: 0,
                previous_front: 0,
                expanded: false,
                active_tab: 0,
            },
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn fields(&self) -> StateFields {
        self.fields
    }

    pub fn front(&self) -> usize {
        self.fields.front
    }

    pub fn previous_front(&self) -> usize {
        self.fields.previous_front
    }

    pub fn is_expanded(&self) -> bool {
        self.fields.expanded
    }

    pub fn active_tab(&self) -> usize {
        self.fields.active_tab
    }

    /// Apply one intent. Never panics; invalid or disallowed intents come back
    /// as [`StateDelta::Rejected`] with the state untouched.
    pub fn apply(&mut self, intent: NavigationIntent) -> StateDelta {
        let before = self.fields;
        let outcome = match intent {
            NavigationIntent::Navigate(direction) => {
                if before.expanded {
                    Err(RejectReason::Expanded)
                } else {
                    let mut after = before;
                    after.previous_front = before.front;
                    after.front = wrap(before.front as i64 + direction.step(), self.len);
                    Ok(after)
                }
            }
            NavigationIntent::Open(index) => {
                if index >= self.len {
                    Err(RejectReason::OutOfRange)
                } else if before.expanded {
                    Err(RejectReason::Expanded)
                } else if index != before.front {
                    Err(RejectReason::NotFront)
                } else {
                    let mut after = before;
                    after.expanded = true;
                    after.active_tab = before.front;
                    Ok(after)
                }
            }
            NavigationIntent::Close => {
                if !before.expanded {
                    Err(RejectReason::Collapsed)
                } else {
                    let mut after = before;
                    after.expanded = false;
                    Ok(after)
                }
            }
            NavigationIntent::SelectTab(tab) => {
                if tab >= self.len {
                    Err(RejectReason::OutOfRange)
                } else {
                    let mut after = before;
                    after.active_tab = tab;
                    after.front = tab;
                    Ok(after)
                }
            }
        };

        match outcome {
            Ok(mut after) => {
                after.active_tab = tabs::synced_tab(&before, &after);
                debug_assert!(tabs::is_coherent(&after));
                self.fields = after;
                debug!(?intent, front = after.front, expanded = after.expanded, "Intent applied");
                StateDelta::Applied {
                    intent,
                    before,
                    after,
                }
            }
            Err(reason) => {
                debug!(?intent, ?reason, "Intent rejected");
                StateDelta::Rejected { intent, reason }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::intent::Direction;

    fn state() -> CarouselState {
        CarouselState::new(3).unwrap()
    }

    #[test]
    fn test_empty_ring_is_an_error() {
        assert!(matches!(
            CarouselState::new(0),
            Err(crate::Error::EmptyCarousel)
        ));
    }

    #[test]
    fn test_navigate_wraps_both_ways() {
        let mut state = state();
        state.apply(NavigationIntent::Navigate(Direction::Previous));
        assert_eq!(state.front(), 2);
        assert_eq!(state.previous_front(), 0);
        assert_eq!(state.active_tab(), 2);

        state.apply(NavigationIntent::Navigate(Direction::Next));
        assert_eq!(state.front(), 0);
        assert_eq!(state.previous_front(), 2);
    }

    #[test]
    fn test_open_only_front() {
        let mut state = state();
        let delta = state.apply(NavigationIntent::Open(1));
        assert_eq!(delta.rejection(), Some(RejectReason::NotFront));
        assert!(!state.is_expanded());

        let delta = state.apply(NavigationIntent::Open(7));
        assert_eq!(delta.rejection(), Some(RejectReason::OutOfRange));

        assert!(state.apply(NavigationIntent::Open(0)).is_applied());
        assert!(state.is_expanded());
        assert_eq!(state.active_tab(), 0);
    }

    #[test]
    fn test_close_when_collapsed_is_rejected() {
        let mut state = state();
        let delta = state.apply(NavigationIntent::Close);
        assert_eq!(delta.rejection(), Some(RejectReason::Collapsed));
        assert_eq!(state.fields(), CarouselState::new(3).unwrap().fields());
    }

    #[test]
    fn test_select_tab_out_of_range_leaves_state() {
        let mut state = state();
        let before = state.fields();
        let delta = state.apply(NavigationIntent::SelectTab(3));
        assert_eq!(delta.rejection(), Some(RejectReason::OutOfRange));
        assert_eq!(state.fields(), before);
    }

    #[test]
    fn test_select_tab_keeps_previous_front() {
        let mut state = state();
        state.apply(NavigationIntent::Navigate(Direction::Next));
        state.apply(NavigationIntent::SelectTab(2));
        assert_eq!(state.front(), 2);
        assert_eq!(state.active_tab(), 2);
        assert_eq!(state.previous_front(), 0);
    }

    #[test]
    fn test_single_item_ring() {
        let mut state = CarouselState::new(1).unwrap();
        let delta = state.apply(NavigationIntent::Navigate(Direction::Next));
        assert!(delta.is_applied());
        assert!(!delta.front_changed());
        assert_eq!(state.front(), 0);
    }
}

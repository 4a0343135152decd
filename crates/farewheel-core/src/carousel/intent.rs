//! Canonical intents accepted by [`CarouselState`](super::CarouselState) and
//! the deltas it returns.

/// Navigation step around the ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// -1 or +1
    #[inline]
    pub fn step(self) -> i64 {
        match self {
            Direction::Previous => -1,
            Direction::Next => 1,
        }
    }

    /// Direction for a signed amount; `None` for zero or NaN.
    pub fn from_sign(value: f64) -> Option<Self> {
        if value > 0.0 {
            Some(Direction::Next)
        } else if value < 0.0 {
            Some(Direction::Previous)
        } else {
            None
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Previous => Direction::Next,
            Direction::Next => Direction::Previous,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    Navigate(Direction),
    Open(usize),
    Close,
    SelectTab(usize),
}

/// Why an intent left the state untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Navigation and open are disabled in the detail view
    Expanded,
    /// Close while already collapsed
    Collapsed,
    /// Open targeted a card other than the front one
    NotFront,
    /// Index outside `[0, len)`
    OutOfRange,
}

/// The mutable fields of the carousel at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateFields {
    pub front: usize,
    pub previous_front: usize,
    pub expanded: bool,
    pub active_tab: usize,
}

/// Result of applying one intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateDelta {
    Applied {
        intent: NavigationIntent,
        before: StateFields,
        after: StateFields,
    },
    Rejected {
        intent: NavigationIntent,
        reason: RejectReason,
    },
}

impl StateDelta {
    pub fn intent(&self) -> NavigationIntent {
        match self {
            StateDelta::Applied { intent, .. } | StateDelta::Rejected { intent, .. } => *intent,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, StateDelta::Applied { .. })
    }

    pub fn rejection(&self) -> Option<RejectReason> {
        match self {
            StateDelta::Rejected { reason, .. } => Some(*reason),
            StateDelta::Applied { .. } => None,
        }
    }

    pub fn front_changed(&self) -> bool {
        match self {
            StateDelta::Applied { before, after, .. } => before.front != after.front,
            StateDelta::Rejected { .. } => false,
        }
    }

    /// Direction of a committed navigation, if this delta is one
    pub fn navigated(&self) -> Option<Direction> {
        match self {
            StateDelta::Applied {
                intent: NavigationIntent::Navigate(direction),
                ..
            } => Some(*direction),
            _ => None,
        }
    }
}

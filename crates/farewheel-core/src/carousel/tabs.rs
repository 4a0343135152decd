//! Keeps the selected detail tab coherent with the front card
//!
//! Tab clicks and gesture navigation take different paths into
//! [`CarouselState`](super::CarouselState) but must converge on the same
//! `(front, active_tab, expanded)` triple.

use super::intent::StateFields;

/// Tab to show after a transition from `before` to `after`. The tab follows
/// `front` whenever `front` moves or the view is expanded; otherwise the last
/// selection is kept.
#[inline]
pub fn synced_tab(before: &StateFields, after: &StateFields) -> usize {
    if after.expanded || after.front != before.front {
        after.front
    } else {
        after.active_tab
    }
}

/// True when the fields satisfy the expanded-tab invariant
pub fn is_coherent(fields: &StateFields) -> bool {
    !fields.expanded || fields.active_tab == fields.front
}

//! Card motion for the carousel view
//!
//! - `curve` - remaining-travel curves and the damped hint wave
//! - `timing` - progress at an explicit frame time
//! - `slide` - slide/wiggle animator keyed on the swipe pulse

pub mod curve;
pub mod slide;
pub mod timing;

pub use slide::SlideAnimator;

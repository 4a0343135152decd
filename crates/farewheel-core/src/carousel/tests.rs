use std::time::{Duration, Instant};

use super::*;
use crate::config::{AnimationConfig, GestureConfig};

fn carousel() -> Carousel {
    Carousel::with_default_items(&GestureConfig::default(), &AnimationConfig::default()).unwrap()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn at(x: f64) -> PointerPosition {
    PointerPosition::new(x, 10.0)
}

/// Press at x=0, move to `dx` after `dt`, release in place
fn swipe(c: &mut Carousel, t0: Instant, dx: f64, dt: Duration, target: Option<usize>) -> Option<StateDelta> {
    c.pointer_down(at(0.0), t0);
    c.pointer_move(at(dx), t0 + dt);
    c.pointer_up(at(dx), target, t0 + dt)
}

#[test]
fn test_empty_items_rejected() {
    let result = Carousel::new(Vec::new(), &GestureConfig::default(), &AnimationConfig::default());
    assert!(matches!(result, Err(crate::Error::EmptyCarousel)));
}

#[test]
fn test_invalid_gesture_config_rejected() {
    let gesture = GestureConfig {
        scroll_debounce_ms: 0,
        ..Default::default()
    };
    let result = Carousel::with_default_items(&gesture, &AnimationConfig::default());
    assert!(matches!(result, Err(crate::Error::Config(_))));
}

#[test]
fn test_three_nexts_return_to_start() {
    let t0 = Instant::now();
    let mut c = carousel();
    for _ in 0..3 {
        assert!(c.apply(NavigationIntent::Navigate(Direction::Next), t0).is_applied());
    }
    assert_eq!(c.state().front(), 0);
}

#[test]
fn test_previous_front_is_one_step_back() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.apply(NavigationIntent::Navigate(Direction::Next), t0);
    c.apply(NavigationIntent::Navigate(Direction::Previous), t0);
    c.apply(NavigationIntent::Navigate(Direction::Next), t0);
    let snap = c.snapshot();
    assert_eq!(snap.front, 1);
    assert_eq!(snap.previous_front, 0);

    let mut c = carousel();
    c.apply(NavigationIntent::Navigate(Direction::Previous), t0);
    c.apply(NavigationIntent::Navigate(Direction::Next), t0);
    let snap = c.snapshot();
    assert_eq!(snap.front, 0);
    assert_eq!(snap.previous_front, 2);
}

#[test]
fn test_open_front_and_reject_others() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.apply(NavigationIntent::Navigate(Direction::Next), t0);

    let delta = c.apply(NavigationIntent::Open(2), t0);
    assert_eq!(delta.rejection(), Some(RejectReason::NotFront));
    assert!(!c.snapshot().expanded);

    assert!(c.apply(NavigationIntent::Open(1), t0).is_applied());
    let snap = c.snapshot();
    assert!(snap.expanded);
    assert_eq!(snap.active_tab, 1);
}

#[test]
fn test_expanded_blocks_navigation_but_not_tabs() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.apply(NavigationIntent::Open(0), t0);

    let delta = c.apply(NavigationIntent::Navigate(Direction::Next), t0);
    assert_eq!(delta.rejection(), Some(RejectReason::Expanded));
    let delta = c.apply(NavigationIntent::Open(0), t0);
    assert_eq!(delta.rejection(), Some(RejectReason::Expanded));
    assert_eq!(c.snapshot().front, 0);

    assert!(c.select_tab(2, t0).is_applied());
    let snap = c.snapshot();
    assert_eq!(snap.front, 2);
    assert_eq!(snap.active_tab, 2);
    assert!(snap.expanded);

    assert!(c.close(t0).is_applied());
    assert!(!c.snapshot().expanded);
    assert_eq!(c.close(t0).rejection(), Some(RejectReason::Collapsed));
}

#[test]
fn test_six_wheel_deltas_commit_once() {
    let t0 = Instant::now();
    let mut c = carousel();
    for i in 0..6 {
        assert_eq!(c.wheel(10.0, t0 + ms(i * 10)), WheelDisposition::Accumulated);
    }
    // Still inside the window of the last delta
    assert!(c.tick(t0 + ms(120)).is_empty());

    let deltas = c.tick(t0 + ms(150));
    assert_eq!(deltas.len(), 1);
    assert_eq!(deltas[0].navigated(), Some(Direction::Next));
    assert_eq!(c.snapshot().front, 1);
    assert_eq!(c.arbiter().scroll_sum(), 0.0);
    assert!(c.tick(t0 + ms(1000)).is_empty());
}

#[test]
fn test_five_wheel_deltas_do_not_cross_threshold() {
    let t0 = Instant::now();
    let mut c = carousel();
    for i in 0..5 {
        c.wheel(10.0, t0 + ms(i * 10));
    }
    assert!(c.tick(t0 + ms(500)).is_empty());
    assert_eq!(c.snapshot().front, 0);
    assert_eq!(c.arbiter().scroll_sum(), 0.0);
}

#[test]
fn test_small_wheel_resets_after_window() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.wheel(5.0, t0);
    assert_eq!(c.arbiter().scroll_sum(), 5.0);
    assert!(c.tick(t0 + ms(100)).is_empty());
    assert_eq!(c.arbiter().scroll_sum(), 0.0);
    assert!(!c.has_pending_timers());
}

#[test]
fn test_negative_wheel_goes_back() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.wheel(-60.0, t0);
    let deltas = c.tick(t0 + ms(100));
    assert_eq!(deltas[0].navigated(), Some(Direction::Previous));
    assert_eq!(c.snapshot().front, 2);
}

#[test]
fn test_superseded_window_does_not_fire() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.wheel(60.0, t0);
    c.wheel(60.0, t0 + ms(90));
    // First window's deadline passes without a decision
    assert!(c.tick(t0 + ms(100)).is_empty());
    assert_eq!(c.tick(t0 + ms(190)).len(), 1);
    assert_eq!(c.snapshot().front, 1);
}

#[test]
fn test_wheel_ignored_while_expanded() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.apply(NavigationIntent::Open(0), t0);
    assert_eq!(c.wheel(200.0, t0), WheelDisposition::IgnoredExpanded);
    assert!(c.tick(t0 + ms(500)).is_empty());
    assert_eq!(c.arbiter().scroll_sum(), 0.0);
}

#[test]
fn test_open_discards_pending_scroll() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.wheel(80.0, t0);
    c.apply(NavigationIntent::Open(0), t0 + ms(20));
    assert!(c.tick(t0 + ms(500)).is_empty());
    let snap = c.snapshot();
    assert!(snap.expanded);
    assert_eq!(snap.front, 0);
}

#[test]
fn test_tap_navigation_discards_pending_scroll() {
    let t0 = Instant::now();
    let mut c = carousel();
    assert_eq!(c.wheel(60.0, t0), WheelDisposition::Accumulated);

    c.pointer_down(at(0.0), t0 + ms(10));
    let delta = c.pointer_up(at(0.0), Some(1), t0 + ms(20)).unwrap();
    assert_eq!(delta.navigated(), Some(Direction::Next));
    assert_eq!(c.arbiter().scroll_sum(), 0.0);

    assert!(c.tick(t0 + ms(200)).is_empty());
    let snap = c.snapshot();
    assert_eq!(snap.front, 1);
    assert_eq!(snap.pulse.nonce, 1);
}

#[test]
fn test_key_navigation_discards_pending_scroll() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.wheel(-80.0, t0);
    c.apply(NavigationIntent::Navigate(Direction::Next), t0 + ms(30));
    assert!(c.tick(t0 + ms(500)).is_empty());
    assert_eq!(c.snapshot().front, 1);
}

#[test]
fn test_wheel_ignored_while_dragging() {
    let t0 = Instant::now();
    let mut c = carousel();
    // A slow drag: 3 units over a second stays under the flick threshold
    c.pointer_down(at(0.0), t0);
    c.pointer_move(at(-3.0), t0 + ms(1000));
    assert_eq!(c.wheel(100.0, t0 + ms(1010)), WheelDisposition::IgnoredDragging);
    assert!(c.pointer_up(at(-3.0), Some(0), t0 + ms(1020)).is_none());
    assert!(c.tick(t0 + ms(2000)).is_empty());
    assert_eq!(c.snapshot().front, 0);
}

#[test]
fn test_fast_flick_navigates_against_velocity() {
    let t0 = Instant::now();
    let mut c = carousel();
    // Velocity -11 units/s: leftward flick advances
    let delta = swipe(&mut c, t0, -11.0, ms(1000), Some(0)).unwrap();
    assert_eq!(delta.navigated(), Some(Direction::Next));
    assert_eq!(c.snapshot().front, 1);

    // Velocity +11 units/s: rightward flick goes back
    let delta = swipe(&mut c, t0 + ms(2000), 11.0, ms(1000), Some(1)).unwrap();
    assert_eq!(delta.navigated(), Some(Direction::Previous));
    assert_eq!(c.snapshot().front, 0);
}

#[test]
fn test_slow_drag_commits_nothing_and_suppresses_tap() {
    let t0 = Instant::now();
    let mut c = carousel();
    // Velocity 9 units/s is under the threshold of 10
    let delta = swipe(&mut c, t0, -9.0, ms(1000), Some(0));
    assert!(delta.is_none());
    let snap = c.snapshot();
    assert_eq!(snap.front, 0);
    assert!(!snap.expanded);
}

#[test]
fn test_one_pixel_drag_suppresses_tap_open() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.pointer_down(at(20.0), t0);
    c.pointer_move(at(21.0), t0 + ms(300));
    assert_eq!(c.arbiter().phase(), PointerPhase::Dragging);
    let delta = c.pointer_up(at(21.0), Some(0), t0 + ms(310));
    assert!(delta.is_none());
    assert!(!c.snapshot().expanded);
    assert_eq!(c.snapshot().pulse.nonce, 0);
}

#[test]
fn test_flick_on_center_card_does_not_also_open() {
    let t0 = Instant::now();
    let mut c = carousel();
    let delta = swipe(&mut c, t0, -40.0, ms(100), Some(0)).unwrap();
    assert_eq!(delta.navigated(), Some(Direction::Next));
    assert!(!c.snapshot().expanded);
}

#[test]
fn test_tap_resolution() {
    let t0 = Instant::now();
    let mut c = carousel();

    // Tap the right neighbor
    c.pointer_down(at(60.0), t0);
    let delta = c.pointer_up(at(60.0), Some(1), t0 + ms(80)).unwrap();
    assert_eq!(delta.navigated(), Some(Direction::Next));
    assert_eq!(c.snapshot().front, 1);

    // Tap the left neighbor (item 0 is now on the left)
    c.pointer_down(at(5.0), t0 + ms(200));
    let delta = c.pointer_up(at(5.0), Some(0), t0 + ms(280)).unwrap();
    assert_eq!(delta.navigated(), Some(Direction::Previous));
    assert_eq!(c.snapshot().front, 0);

    // Tap the center card opens it
    c.pointer_down(at(30.0), t0 + ms(400));
    let delta = c.pointer_up(at(30.0), Some(0), t0 + ms(480)).unwrap();
    assert_eq!(delta.intent(), NavigationIntent::Open(0));
    assert!(c.snapshot().expanded);

    // Tapping it again while expanded does nothing
    c.pointer_down(at(30.0), t0 + ms(600));
    assert!(c.pointer_up(at(30.0), Some(0), t0 + ms(680)).is_none());
    assert!(c.snapshot().expanded);
}

#[test]
fn test_cancelled_drag_leaves_no_state() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.pointer_down(at(0.0), t0);
    c.pointer_move(at(-50.0), t0 + ms(20));
    assert!(c.snapshot().drag_offset.is_some());
    c.pointer_cancel();

    assert_eq!(c.arbiter().phase(), PointerPhase::Idle);
    assert_eq!(c.snapshot().drag_offset, None);
    // A stray release after the cancel has no session to classify
    assert!(c.pointer_up(at(-50.0), Some(0), t0 + ms(25)).is_none());
    assert_eq!(c.snapshot().front, 0);
}

#[test]
fn test_tab_select_matches_gesture_navigation() {
    let t0 = Instant::now();
    let mut by_tab = carousel();
    by_tab.select_tab(2, t0);

    let mut by_gesture = carousel();
    by_gesture.apply(NavigationIntent::Navigate(Direction::Next), t0);
    by_gesture.apply(NavigationIntent::Navigate(Direction::Next), t0);

    let a = by_tab.snapshot();
    let b = by_gesture.snapshot();
    assert_eq!(a.front, b.front);
    assert_eq!(a.active_tab, b.active_tab);
    assert_eq!(a.expanded, b.expanded);
    assert_eq!(a.ring_offsets, b.ring_offsets);

    // Both paths open into the same detail view
    by_tab.apply(NavigationIntent::Open(2), t0);
    by_gesture.apply(NavigationIntent::Open(2), t0);
    let a = by_tab.state().fields();
    let b = by_gesture.state().fields();
    assert_eq!((a.front, a.active_tab, a.expanded), (b.front, b.active_tab, b.expanded));
    assert!(is_coherent(&a));
}

#[test]
fn test_pulse_only_on_navigation() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.apply(NavigationIntent::Navigate(Direction::Next), t0);
    let snap = c.snapshot();
    assert_eq!(snap.pulse.nonce, 1);
    assert_eq!(snap.pulse.direction, Some(Direction::Next));
    assert!(snap.pulse_active);

    c.apply(NavigationIntent::Open(1), t0);
    c.select_tab(0, t0);
    c.close(t0);
    assert_eq!(c.snapshot().pulse.nonce, 1);

    // Rejected navigation issues no pulse either
    c.apply(NavigationIntent::Open(0), t0);
    c.apply(NavigationIntent::Navigate(Direction::Next), t0);
    assert_eq!(c.snapshot().pulse.nonce, 1);
}

#[test]
fn test_pulse_auto_clears() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.apply(NavigationIntent::Navigate(Direction::Previous), t0);
    c.tick(t0 + ms(499));
    assert!(c.snapshot().pulse_active);
    c.tick(t0 + ms(500));
    assert!(!c.snapshot().pulse_active);

    // Same direction again restarts with a new nonce
    c.apply(NavigationIntent::Navigate(Direction::Previous), t0 + ms(600));
    let snap = c.snapshot();
    assert!(snap.pulse_active);
    assert_eq!(snap.pulse.nonce, 2);
}

#[test]
fn test_teardown_cancels_everything() {
    let t0 = Instant::now();
    let mut c = carousel();
    c.apply(NavigationIntent::Navigate(Direction::Next), t0);
    c.wheel(90.0, t0);
    c.pointer_down(at(0.0), t0);
    c.teardown();

    assert!(!c.has_pending_timers());
    assert_eq!(c.next_deadline(), None);
    assert!(c.tick(t0 + ms(5000)).is_empty());
    let snap = c.snapshot();
    assert_eq!(snap.front, 1);
    assert!(!snap.pulse_active);
    assert_eq!(c.arbiter().phase(), PointerPhase::Idle);
}

#[test]
fn test_ring_offsets_follow_front() {
    let t0 = Instant::now();
    let mut c = carousel();
    assert_eq!(c.snapshot().ring_offsets, vec![0, 1, 2]);
    c.apply(NavigationIntent::Navigate(Direction::Next), t0);
    assert_eq!(c.snapshot().ring_offsets, vec![2, 0, 1]);
    assert_eq!(c.current_item().kind, crate::VehicleKind::Bus);
}

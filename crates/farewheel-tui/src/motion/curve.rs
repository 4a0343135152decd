//! Progress curves for card motion
//!
//! A slide is expressed as the distance still left to travel, so every curve
//! starts at 1 and lands on 0. The ease-outs move fast off the mark and
//! settle gently into the resting slot.

use std::f64::consts::TAU;

use farewheel_core::EasingType;

/// Fraction of the slide still ahead at progress `t` in [0, 1]
pub fn remaining(easing: EasingType, t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        return 0.0;
    }
    match easing {
        // Snaps; slides are not started with this curve
        EasingType::None => 0.0,
        EasingType::Linear => 1.0 - t,
        EasingType::Cubic => (1.0 - t).powi(3),
        EasingType::Quintic => (1.0 - t).powi(5),
        EasingType::EaseOut => 2.0_f64.powf(-10.0 * t),
    }
}

/// Sine of `cycles` full turns over [0, 1], fading linearly to nothing
pub fn damped_wave(t: f64, cycles: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    (t * cycles * TAU).sin() * (1.0 - t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SLIDING: [EasingType; 4] = [
        EasingType::Linear,
        EasingType::Cubic,
        EasingType::Quintic,
        EasingType::EaseOut,
    ];

    #[test]
    fn test_remaining_runs_from_one_to_zero() {
        for easing in SLIDING {
            assert_eq!(remaining(easing, 0.0), 1.0, "{:?} at start", easing);
            assert_eq!(remaining(easing, 1.0), 0.0, "{:?} at end", easing);

            let mut prev = 1.0;
            for i in 1..=20 {
                let left = remaining(easing, i as f64 / 20.0);
                assert!(left <= prev, "{:?} moved backwards at step {}", easing, i);
                prev = left;
            }
        }
        assert_eq!(remaining(EasingType::None, 0.0), 0.0);
    }

    #[test]
    fn test_ease_out_front_loads_travel() {
        // Half way through the time, a cubic slide has covered 7/8 of the way
        assert!((remaining(EasingType::Cubic, 0.5) - 0.125).abs() < 1e-9);
        assert!(remaining(EasingType::Quintic, 0.5) < remaining(EasingType::Cubic, 0.5));
        assert_eq!(remaining(EasingType::Linear, -3.0), 1.0);
    }

    #[test]
    fn test_damped_wave_dies_out() {
        assert!(damped_wave(0.0, 2.0).abs() < 1e-9);
        assert!(damped_wave(1.0, 2.0).abs() < 1e-9);
        // First crest of two cycles sits at t = 1/8
        assert!((damped_wave(0.125, 2.0) - 0.875).abs() < 1e-9);
        for i in 0..=16 {
            let t = i as f64 / 16.0;
            assert!(damped_wave(t, 2.0).abs() <= 1.0 - t + 1e-9);
        }
    }
}

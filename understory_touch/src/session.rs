// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Touch sessions and swipe classification.
//!
//! A [`TouchSession`] captures where and when a single-finger touch started.
//! [`TouchSession::release`] turns the release point and time into a [`Release`],
//! which is the whole swipe decision.

use core::time::Duration;

use kurbo::{Point, Vec2};

/// What to do with a press that arrives while a session is already running.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum RepressPolicy {
    /// Overwrite the running session with the new press.
    #[default]
    Restart,
    /// Keep the running session and ignore the new press.
    Ignore,
}

/// Tunables for gesture classification.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GestureConfig {
    /// Distance a release must exceed on at least one axis to count as a swipe.
    pub swipe_threshold: f64,
    /// A swipe must be released strictly sooner than this after the press.
    pub swipe_time_limit: Duration,
    /// Handling of a press during a running session.
    pub repress: RepressPolicy,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 60.0,
            swipe_time_limit: Duration::from_millis(600),
            repress: RepressPolicy::Restart,
        }
    }
}

impl GestureConfig {
    /// Whether `delta` exceeds the swipe threshold on either axis.
    ///
    /// Compares squares, so the sign of each component does not matter and no root is taken.
    /// A delta exactly at the threshold does not exceed it.
    pub fn exceeds_threshold(&self, delta: Vec2) -> bool {
        let t2 = self.swipe_threshold * self.swipe_threshold;
        delta.x * delta.x > t2 || delta.y * delta.y > t2
    }
}

/// Per-element state between press and release.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TouchSession {
    /// Page coordinates of the contact at press.
    pub start_point: Point,
    /// Timestamp at press.
    pub start_time: Duration,
    /// `(left, top)` of the element at press; zero unless a drag is registered.
    pub start_position: Point,
}

impl TouchSession {
    /// Start a session.
    pub fn new(start_point: Point, start_time: Duration, start_position: Point) -> Self {
        Self {
            start_point,
            start_time,
            start_position,
        }
    }

    /// Displacement from the press point to `point`.
    pub fn delta(&self, point: Point) -> Vec2 {
        point - self.start_point
    }

    /// Classify a release at `point` and time `now`.
    pub fn release(&self, point: Point, now: Duration, config: &GestureConfig) -> Release {
        let delta = self.delta(point);
        let elapsed = now.saturating_sub(self.start_time);
        Release {
            delta,
            elapsed,
            exceeds_threshold: config.exceeds_threshold(delta),
            in_time: elapsed < config.swipe_time_limit,
        }
    }
}

/// The measured result of a session at release.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Release {
    /// Total displacement from press to release.
    pub delta: Vec2,
    /// Time from press to release.
    pub elapsed: Duration,
    /// Displacement exceeded the threshold on some axis.
    ///
    /// This alone decides whether a non-bubbling release event is consumed.
    pub exceeds_threshold: bool,
    /// Released within the time limit.
    pub in_time: bool,
}

impl Release {
    /// Whether the session was a swipe: far enough and fast enough.
    pub fn is_swipe(&self) -> bool {
        self.exceeds_threshold && self.in_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_at_origin() -> TouchSession {
        TouchSession::new(Point::ZERO, Duration::ZERO, Point::ZERO)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn delta_is_exact_difference() {
        let s = TouchSession::new(Point::new(100.0, 100.0), ms(0), Point::ZERO);
        assert_eq!(s.delta(Point::new(100.0, 170.0)), Vec2::new(0.0, 70.0));
        assert_eq!(s.delta(Point::new(37.5, 212.25)), Vec2::new(-62.5, 112.25));
    }

    // Exactly at threshold does not qualify; one past it does.
    #[test]
    fn threshold_is_strict() {
        let cfg = GestureConfig::default();
        let s = session_at_origin();
        let at = s.release(Point::new(60.0, 0.0), ms(599), &cfg);
        assert!(!at.exceeds_threshold);
        assert!(!at.is_swipe());

        let past = s.release(Point::new(61.0, 0.0), ms(599), &cfg);
        assert!(past.exceeds_threshold);
        assert!(past.is_swipe());
    }

    #[test]
    fn negative_deltas_count() {
        let cfg = GestureConfig::default();
        let s = session_at_origin();
        assert!(s.release(Point::new(0.0, -61.0), ms(10), &cfg).is_swipe());
        assert!(s.release(Point::new(-61.0, 0.0), ms(10), &cfg).is_swipe());
        // Diagonal below threshold on both axes: not a swipe even though its length is > 60.
        assert!(!s.release(Point::new(50.0, 50.0), ms(10), &cfg).is_swipe());
    }

    #[test]
    fn time_limit_is_strict() {
        let cfg = GestureConfig::default();
        let s = session_at_origin();
        let late = s.release(Point::new(61.0, 0.0), ms(600), &cfg);
        assert!(late.exceeds_threshold);
        assert!(!late.in_time);
        assert!(!late.is_swipe());

        let slow = s.release(Point::new(61.0, 0.0), ms(1000), &cfg);
        assert_eq!(slow.elapsed, ms(1000));
        assert!(!slow.is_swipe());
    }

    #[test]
    fn zero_elapsed_is_valid() {
        let cfg = GestureConfig::default();
        let s = TouchSession::new(Point::ZERO, ms(250), Point::ZERO);
        let r = s.release(Point::new(0.0, 90.0), ms(250), &cfg);
        assert_eq!(r.elapsed, Duration::ZERO);
        assert!(r.is_swipe());
    }

    #[test]
    fn clock_going_backwards_saturates() {
        let cfg = GestureConfig::default();
        let s = TouchSession::new(Point::ZERO, ms(500), Point::ZERO);
        let r = s.release(Point::new(0.0, 90.0), ms(100), &cfg);
        assert_eq!(r.elapsed, Duration::ZERO);
    }

    #[test]
    fn custom_config() {
        let cfg = GestureConfig {
            swipe_threshold: 10.0,
            swipe_time_limit: ms(50),
            ..GestureConfig::default()
        };
        let s = session_at_origin();
        assert!(s.release(Point::new(11.0, 0.0), ms(49), &cfg).is_swipe());
        assert!(!s.release(Point::new(11.0, 0.0), ms(50), &cfg).is_swipe());
        assert_eq!(cfg.repress, RepressPolicy::Restart);
    }
}

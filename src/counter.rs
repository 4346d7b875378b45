//! Frame-pumped counter ramps for the summary cards.
//!
//! A [`CounterRamp`] is a finite iterator: the host pulls one value per
//! rendered frame and displays it. Every ramp of a card region shares one
//! [`AnimationHandle`]; cancelling the handle ends all of them at their next
//! pull, which is how a new fetch cycle retires the previous region's
//! animation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Number of frames a ramp takes to reach its target.
pub const RAMP_FRAMES: u32 = 60;

/// Shared cancellation flag for a group of ramps.
#[derive(Debug, Clone, Default)]
pub struct AnimationHandle {
    cancelled: Arc<AtomicBool>,
}

impl AnimationHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Ramp from 0 towards `target` in steps of `target / 60`.
///
/// Yields `floor(current)` while below the target, then the exact target once,
/// then ends. The sequence is non-decreasing and never exceeds the target.
#[derive(Debug, Clone)]
pub struct CounterRamp {
    target: u64,
    current: f64,
    increment: f64,
    finished: bool,
    handle: AnimationHandle,
}

impl CounterRamp {
    pub fn new(target: u64, handle: AnimationHandle) -> Self {
        Self {
            target,
            current: 0.0,
            increment: target as f64 / RAMP_FRAMES as f64,
            finished: false,
            handle,
        }
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// True once the final value was produced or the ramp was cancelled.
    pub fn is_done(&self) -> bool {
        self.finished || self.handle.is_cancelled()
    }
}

impl Iterator for CounterRamp {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.is_done() {
            return None;
        }
        self.current += self.increment;
        if self.current < self.target as f64 {
            // floor() keeps the display strictly below the target until the last frame
            Some((self.current.floor() as u64).min(self.target))
        } else {
            self.finished = true;
            Some(self.target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_target_finishes_immediately() {
        let values: Vec<u64> = CounterRamp::new(0, AnimationHandle::new()).collect();
        assert_eq!(values, vec![0]);
    }

    #[test]
    fn roughly_sixty_frames() {
        let n = CounterRamp::new(1_000_000, AnimationHandle::new()).count();
        assert!((60..=61).contains(&n), "got {n} frames");
    }

    #[test]
    fn cancel_stops_mid_ramp() {
        let handle = AnimationHandle::new();
        let mut ramp = CounterRamp::new(600, handle.clone());
        assert_eq!(ramp.next(), Some(10));
        handle.cancel();
        assert_eq!(ramp.next(), None);
        assert!(ramp.is_done());
    }
}

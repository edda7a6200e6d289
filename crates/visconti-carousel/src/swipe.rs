//! Touch gesture recognition.

use std::time::{Duration, Instant};

use crate::config::CarouselConfig;

/// A recognized gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Swipe {
    /// Finger moved left: show the next slide.
    Next,
    /// Finger moved right: show the previous slide.
    Prev,
    /// Too short, too slow, or no movement.
    Tap,
}

/// Tracks one touch at a time and classifies it on release.
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    min_distance: f64,
    max_duration: Duration,
    start: Option<(f64, Instant)>,
    last_x: Option<f64>,
}

impl SwipeTracker {
    pub fn new(min_distance: f64, max_duration: Duration) -> Self {
        Self {
            min_distance,
            max_duration,
            start: None,
            last_x: None,
        }
    }

    pub fn with_config(config: &CarouselConfig) -> Self {
        Self::new(config.min_swipe_distance, config.max_swipe_duration)
    }

    /// Finger down at horizontal position `x`.
    pub fn touch_start(&mut self, x: f64, at: Instant) {
        self.start = Some((x, at));
        self.last_x = None;
    }

    /// Finger moved to `x`.
    pub fn touch_move(&mut self, x: f64) {
        if self.start.is_some() {
            self.last_x = Some(x);
        }
    }

    /// Finger up. Classifies the gesture and resets the tracker.
    pub fn touch_end(&mut self, at: Instant) -> Swipe {
        let start = self.start.take();
        let last_x = self.last_x.take();

        let (Some((start_x, started_at)), Some(end_x)) = (start, last_x) else {
            return Swipe::Tap;
        };
        if at.saturating_duration_since(started_at) > self.max_duration {
            return Swipe::Tap;
        }

        let distance = start_x - end_x;
        if distance >= self.min_distance {
            Swipe::Next
        } else if -distance >= self.min_distance {
            Swipe::Prev
        } else {
            Swipe::Tap
        }
    }

    /// Drop any touch in progress.
    pub fn cancel(&mut self) {
        self.start = None;
        self.last_x = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::with_config(&CarouselConfig::default())
    }
}

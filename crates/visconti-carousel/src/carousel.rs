//! Carousel navigation state machine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::CarouselConfig;
use crate::swipe::Swipe;

/// Direction of the last move, used to pick the slide animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
        }
    }
}

/// Why a navigation request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    /// Fewer than two items: nothing to cycle to.
    NotEnoughItems,
    /// A transition is still settling.
    Transitioning,
    /// `go_to` the slide already shown.
    SameIndex,
    /// `go_to` past the last slide.
    OutOfRange,
    /// A tap rather than a swipe.
    Tap,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Moved {
        from: usize,
        to: usize,
        direction: Direction,
    },
    Ignored(Ignored),
}

impl Navigation {
    /// Whether the index changed.
    pub fn moved(&self) -> bool {
        matches!(self, Navigation::Moved { .. })
    }
}

/// A cyclic list of slides with a current index.
///
/// Every move sets a transitioning flag that rejects further moves until
/// [`Carousel::settle`] is called. With a zero settle delay moves settle
/// immediately.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    index: usize,
    direction: Option<Direction>,
    transitioning: bool,
    settle_delay: Duration,
}

impl<T> Carousel<T> {
    /// Create a carousel at index 0.
    pub fn new(items: Vec<T>, settle_delay: Duration) -> Self {
        Self {
            items,
            index: 0,
            direction: None,
            transitioning: false,
            settle_delay,
        }
    }

    /// Create a carousel using the configured settle delay.
    pub fn with_config(items: Vec<T>, config: &CarouselConfig) -> Self {
        Self::new(items, config.settle_delay)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    /// The slide shown, `None` when empty.
    pub fn current(&self) -> Option<&T> {
        self.items.get(self.index)
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Whether navigation controls should be enabled.
    pub fn can_navigate(&self) -> bool {
        self.items.len() > 1
    }

    /// Advance one slide, wrapping to the first.
    pub fn next(&mut self) -> Navigation {
        if let Err(reason) = self.check_ready() {
            return Navigation::Ignored(reason);
        }
        let to = (self.index + 1) % self.items.len();
        self.move_to(to, Direction::Forward)
    }

    /// Go back one slide, wrapping to the last.
    pub fn prev(&mut self) -> Navigation {
        if let Err(reason) = self.check_ready() {
            return Navigation::Ignored(reason);
        }
        let n = self.items.len();
        let to = (self.index + n - 1) % n;
        self.move_to(to, Direction::Backward)
    }

    /// Jump to slide `k`.
    pub fn go_to(&mut self, k: usize) -> Navigation {
        if let Err(reason) = self.check_ready() {
            return Navigation::Ignored(reason);
        }
        if k >= self.items.len() {
            return Navigation::Ignored(Ignored::OutOfRange);
        }
        if k == self.index {
            return Navigation::Ignored(Ignored::SameIndex);
        }
        let direction = if k > self.index {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.move_to(k, direction)
    }

    /// Navigate for a recognized gesture.
    pub fn apply_swipe(&mut self, swipe: Swipe) -> Navigation {
        match swipe {
            Swipe::Next => self.next(),
            Swipe::Prev => self.prev(),
            Swipe::Tap => Navigation::Ignored(Ignored::Tap),
        }
    }

    /// End the current transition. Returns whether one was in progress.
    pub fn settle(&mut self) -> bool {
        std::mem::replace(&mut self.transitioning, false)
    }

    /// Swap in a new slide list and start over at index 0.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.index = 0;
        self.direction = None;
        self.transitioning = false;
    }

    fn check_ready(&self) -> Result<(), Ignored> {
        if !self.can_navigate() {
            return Err(Ignored::NotEnoughItems);
        }
        if self.transitioning {
            return Err(Ignored::Transitioning);
        }
        Ok(())
    }

    fn move_to(&mut self, to: usize, direction: Direction) -> Navigation {
        let from = self.index;
        self.index = to;
        self.direction = Some(direction);
        self.transitioning = !self.settle_delay.is_zero();
        tracing::trace!(from, to, direction = direction.as_str(), "carousel moved");
        Navigation::Moved {
            from,
            to,
            direction,
        }
    }
}

//! Thinking sweep animation
//!
//! While the agent is thinking, a highlight index bounces back and forth
//! across the visualizer bands at a fixed interval. The sweep owns its own
//! schedule: the deadline lives inside the struct, so leaving the thinking
//! state cancels any pending step and no timer can fire into a reset sweep.

use std::time::{Duration, Instant};

/// Direction the sweep highlight is moving
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SweepDirection {
    /// Toward lower band indices
    Left,
    /// Toward higher band indices
    #[default]
    Right,
}

impl std::fmt::Display for SweepDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SweepDirection::Left => write!(f, "Left"),
            SweepDirection::Right => write!(f, "Right"),
        }
    }
}

/// Bouncing highlight index driven while the agent is thinking
#[derive(Clone, Debug)]
pub struct ThinkingSweep {
    band_count: usize,
    interval: Duration,
    index: usize,
    direction: SweepDirection,
    /// Next step time; `None` while idle or not yet scheduled
    deadline: Option<Instant>,
    thinking: bool,
}

impl ThinkingSweep {
    /// Create a sweep over `band_count` bands stepping every `interval`
    ///
    /// The highlight starts at the visual center with the direction set
    /// toward higher indices.
    pub fn new(band_count: usize, interval: Duration) -> Self {
        Self {
            band_count,
            interval,
            index: band_count / 2,
            direction: SweepDirection::Right,
            deadline: None,
            thinking: false,
        }
    }

    /// Currently highlighted band index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current travel direction
    pub fn direction(&self) -> SweepDirection {
        self.direction
    }

    /// Check if the sweep is being driven
    pub fn is_active(&self) -> bool {
        self.thinking
    }

    /// Follow the agent in or out of the thinking state
    ///
    /// Entering arms the sweep; the first subsequent `tick` schedules the
    /// initial step one interval later. Leaving resets the highlight to the
    /// center, the direction to `Right`, and clears the pending deadline.
    /// Redundant transitions are ignored so repeated thinking events do not
    /// restart the schedule.
    pub fn set_thinking(&mut self, thinking: bool) {
        if thinking == self.thinking {
            return;
        }
        self.thinking = thinking;
        if !thinking {
            self.index = self.band_count / 2;
            self.direction = SweepDirection::Right;
            self.deadline = None;
        }
    }

    /// Advance the sweep if its deadline has passed
    ///
    /// Performs at most one step per call regardless of how overdue the
    /// deadline is, then schedules the next step relative to `now`. Returns
    /// whether a step fired.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.thinking {
            return false;
        }

        match self.deadline {
            None => {
                self.deadline = Some(now + self.interval);
                false
            }
            Some(deadline) if now >= deadline => {
                self.step();
                self.deadline = Some(now + self.interval);
                true
            }
            Some(_) => false,
        }
    }

    /// Move the highlight one band, bouncing at the edges
    fn step(&mut self) {
        if self.band_count <= 1 {
            return;
        }

        match self.direction {
            SweepDirection::Right => {
                if self.index >= self.band_count - 1 {
                    self.direction = SweepDirection::Left;
                    self.index -= 1;
                } else {
                    self.index += 1;
                }
            }
            SweepDirection::Left => {
                if self.index == 0 {
                    self.direction = SweepDirection::Right;
                    self.index += 1;
                } else {
                    self.index -= 1;
                }
            }
        }
    }
}

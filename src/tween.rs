//! Tween scheduling: which pair of states is on screen and how far along
//! the blend between them is.

use serde::{Deserialize, Serialize};

use crate::easing::cubic_in_out;
use crate::error::{Error, Result};

/// Where the tick fed to [`TweenState::advance`] comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Clock {
    /// One tick per displayed frame.
    #[default]
    Tick,
    /// Wall-clock seconds converted at the target frame rate, so a slow
    /// display skips ticks instead of slowing down.
    Elapsed,
}

impl Clock {
    pub fn tick(self, frame: u64, elapsed_secs: f64, fps: f64) -> u64 {
        match self {
            Clock::Tick => frame,
            Clock::Elapsed => (elapsed_secs.max(0.0) * fps).floor() as u64,
        }
    }
}

/// Number of frames one tween lasts, `fps * seconds` rounded.
pub fn frames_per_cycle(fps: f64, seconds: f64) -> Result<u64> {
    let frames = (fps * seconds).round();
    if !(frames >= 1.0) {
        return Err(Error::ZeroFrames { fps, seconds });
    }
    Ok(frames as u64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing { state_index: usize, frame_in_cycle: u64 },
}

/// What to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenFrame {
    pub current: usize,
    pub next: usize,
    pub progress: f32,
}

/// The tween cursor. Owned by the frame loop and stepped once per frame.
#[derive(Debug, Clone)]
pub struct TweenState {
    frames_per_cycle: u64,
    num_states: usize,
    cycle: u64,
    phase: Phase,
}

impl TweenState {
    pub fn new(frames_per_cycle: u64, num_states: usize) -> Result<Self> {
        if num_states == 0 {
            return Err(Error::EmptySequence);
        }
        if frames_per_cycle == 0 {
            return Err(Error::ZeroFrames {
                fps: 0.0,
                seconds: 0.0,
            });
        }
        Ok(Self {
            frames_per_cycle,
            num_states,
            cycle: 0,
            phase: Phase::Idle,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn frames_per_cycle(&self) -> u64 {
        self.frames_per_cycle
    }

    /// Moves the cursor to `tick`. The state index steps forward once for
    /// every cycle boundary crossed since the previous call.
    pub fn advance(&mut self, tick: u64) -> TweenFrame {
        let cycle = tick / self.frames_per_cycle;
        let frame_in_cycle = tick % self.frames_per_cycle;

        let state_index = match self.phase {
            Phase::Idle => (cycle % self.num_states as u64) as usize,
            Phase::Playing { state_index, .. } => {
                let steps = cycle.saturating_sub(self.cycle) % self.num_states as u64;
                (state_index + steps as usize) % self.num_states
            }
        };
        self.cycle = cycle;
        self.phase = Phase::Playing {
            state_index,
            frame_in_cycle,
        };

        TweenFrame {
            current: state_index,
            next: (state_index + 1) % self.num_states,
            progress: frame_in_cycle as f32 / self.frames_per_cycle as f32,
        }
    }
}

/// Time-based tween where point `i` starts `delay_by_index * i`
/// milliseconds late.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedTween {
    pub duration_ms: f32,
    pub delay_by_index: f32,
}

impl TimedTween {
    /// Spreads `total_delay_ms` evenly over `count` points.
    pub fn staggered(duration_ms: f32, total_delay_ms: f32, count: usize) -> Self {
        Self {
            duration_ms,
            delay_by_index: total_delay_ms / count.max(1) as f32,
        }
    }

    /// Time until the last of `count` points has arrived.
    pub fn max_duration(&self, count: usize) -> f32 {
        self.duration_ms + self.delay_by_index * count as f32
    }

    pub fn is_done(&self, elapsed_ms: f32, count: usize) -> bool {
        elapsed_ms > self.max_duration(count)
    }

    /// Eased progress of point `index`; the vertex shader computes the same.
    pub fn point_progress(&self, elapsed_ms: f32, index: usize) -> f32 {
        if self.duration_ms == 0.0 {
            return 1.0;
        }
        let delay = self.delay_by_index * index as f32;
        if elapsed_ms < delay {
            return 0.0;
        }
        let t = (elapsed_ms - delay) / self.duration_ms;
        cubic_in_out(t.min(1.0)).min(1.0)
    }
}

//! # Gesture Classification
//!
//! Turns one touch interaction (start → moves → end) into a decision:
//!
//! ```text
//!            Start                Move (elapsed ≥ hold)
//!   Idle ───────────▶ Tracking ──────────────────────▶ Tracking(held)
//!    ▲                   │                                  │
//!    └──── End ──────────┴──────────────── End ─────────────┘
//!          (classify, then reset)
//! ```
//!
//! The rules live in [`classify`], a pure function, so they can be tested
//! without any event plumbing:
//!
//! - `|delta| ≤ distance` → [`Classification::NoOp`] (tap or jitter)
//! - held, or `elapsed ≥ hold` → [`Classification::Navigate`]
//! - fast flick on a screen with content → [`Classification::ContentSwipe`]
//! - fast flick anywhere else → [`Classification::NoOp`], unless
//!   [`GestureSettings::bare_flick_navigates`] is set
//!
//! Malformed sequences (an end with no start, a move while idle) never
//! error. They are no-ops, because touch input is lossy.

use log::debug;

use crate::core::screen::Direction;

pub const DEFAULT_DISTANCE_THRESHOLD: f32 = 50.0;
pub const DEFAULT_HOLD_THRESHOLD_MS: u64 = 500;

/// Tuning for the hold-vs-flick heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    /// Minimum travel (exclusive) along the swipe axis for a swipe to count.
    pub distance: f32,
    /// Press duration after which a drag counts as deliberate navigation.
    pub hold_ms: u64,
    /// Let a fast flick navigate on screens that have no content to page.
    /// Off by default: such flicks are ignored.
    pub bare_flick_navigates: bool,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE_THRESHOLD,
            hold_ms: DEFAULT_HOLD_THRESHOLD_MS,
            bare_flick_navigates: false,
        }
    }
}

/// Raw touch input for the active screen. Timestamps are milliseconds on
/// any monotonic clock; positions are along the swipe axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    Start { position: f32, at_ms: u64 },
    Move { at_ms: u64 },
    End { position: f32, at_ms: u64 },
}

/// What a finished touch interaction means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    NoOp,
    /// Move to the previous/next screen.
    Navigate(Direction),
    /// Page to the previous/next item within the current screen.
    ContentSwipe(Direction),
}

/// Transient record of a touch in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSample {
    pub start_position: f32,
    pub start_ms: u64,
    /// Latched once a move arrives after the hold threshold.
    pub is_held: bool,
}

impl GestureSample {
    pub fn new(start_position: f32, start_ms: u64) -> Self {
        Self {
            start_position,
            start_ms,
            is_held: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Tracking(GestureSample),
}

/// Event-driven wrapper around [`classify`].
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    settings: GestureSettings,
    phase: Phase,
}

impl GestureClassifier {
    pub fn new(settings: GestureSettings) -> Self {
        Self {
            settings,
            phase: Phase::Idle,
        }
    }

    pub fn settings(&self) -> GestureSettings {
        self.settings
    }

    /// The touch currently being tracked, if any.
    pub fn sample(&self) -> Option<&GestureSample> {
        match &self.phase {
            Phase::Tracking(sample) => Some(sample),
            Phase::Idle => None,
        }
    }

    /// Feeds one event. Returns a classification only for `End`; `Start`
    /// and `Move` return `None`.
    ///
    /// A second `Start` while tracking abandons the earlier touch.
    pub fn handle(
        &mut self,
        event: TouchEvent,
        has_selectable_content: bool,
    ) -> Option<Classification> {
        match event {
            TouchEvent::Start { position, at_ms } => {
                self.phase = Phase::Tracking(GestureSample::new(position, at_ms));
                None
            }
            TouchEvent::Move { at_ms } => {
                if let Phase::Tracking(sample) = &mut self.phase
                    && !sample.is_held
                    && at_ms.saturating_sub(sample.start_ms) >= self.settings.hold_ms
                {
                    sample.is_held = true;
                    debug!(
                        "Gesture became held after {}ms",
                        at_ms.saturating_sub(sample.start_ms)
                    );
                }
                None
            }
            TouchEvent::End { position, at_ms } => {
                let phase = std::mem::replace(&mut self.phase, Phase::Idle);
                let result = match phase {
                    Phase::Tracking(sample) => classify(
                        &sample,
                        position,
                        at_ms,
                        has_selectable_content,
                        &self.settings,
                    ),
                    Phase::Idle => {
                        debug!("Touch end without start, ignoring");
                        Classification::NoOp
                    }
                };
                Some(result)
            }
        }
    }

    /// Drops any touch in progress, e.g. when the screen changes underneath it.
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(GestureSettings::default())
    }
}

/// Classifies a finished touch.
pub fn classify(
    sample: &GestureSample,
    end_position: f32,
    end_ms: u64,
    has_selectable_content: bool,
    settings: &GestureSettings,
) -> Classification {
    let delta = end_position - sample.start_position;
    let elapsed = end_ms.saturating_sub(sample.start_ms);

    // NaN fails both comparisons below and falls out through from_delta.
    if delta.abs() <= settings.distance {
        return Classification::NoOp;
    }
    let Some(direction) = Direction::from_delta(delta) else {
        return Classification::NoOp;
    };

    let result = if sample.is_held || elapsed >= settings.hold_ms {
        Classification::Navigate(direction)
    } else if has_selectable_content {
        Classification::ContentSwipe(direction)
    } else if settings.bare_flick_navigates {
        Classification::Navigate(direction)
    } else {
        Classification::NoOp
    };
    debug!(
        "Classified gesture delta={delta} elapsed={elapsed}ms held={} → {result:?}",
        sample.is_held
    );
    result
}

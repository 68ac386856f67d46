use serde::{Deserialize, Serialize};
use tracing::trace;

/// Hold time after which a press turns into a scrub.
pub const LONG_PRESS_TIMEOUT_MS: u64 = 50;

/// Distance a touch may wander before it counts as a scroll.
pub const DEFAULT_TOUCH_SLOP_PX: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Pointer input in view pixels with a monotonic timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
    pub time_ms: u64,
}

impl PointerEvent {
    #[must_use]
    pub fn new(kind: PointerEventKind, x: f64, y: f64, time_ms: u64) -> Self {
        Self { kind, x, y, time_ms }
    }

    #[must_use]
    pub fn down(x: f64, y: f64, time_ms: u64) -> Self {
        Self::new(PointerEventKind::Down, x, y, time_ms)
    }

    #[must_use]
    pub fn moved(x: f64, y: f64, time_ms: u64) -> Self {
        Self::new(PointerEventKind::Move, x, y, time_ms)
    }

    #[must_use]
    pub fn up(x: f64, y: f64, time_ms: u64) -> Self {
        Self::new(PointerEventKind::Up, x, y, time_ms)
    }

    #[must_use]
    pub fn cancel(time_ms: u64) -> Self {
        Self::new(PointerEventKind::Cancel, 0.0, 0.0, time_ms)
    }
}

/// Tuning for press-and-hold scrub detection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrubGestureConfig {
    pub touch_slop_px: f64,
    pub long_press_timeout_ms: u64,
}

impl Default for ScrubGestureConfig {
    fn default() -> Self {
        Self {
            touch_slop_px: DEFAULT_TOUCH_SLOP_PX,
            long_press_timeout_ms: LONG_PRESS_TIMEOUT_MS,
        }
    }
}

/// Where and when the active gesture started.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PressOrigin {
    pub x: f64,
    pub y: f64,
    pub time_ms: u64,
}

/// Pending long-press deadline handed to the host scheduler.
///
/// Firing a timer whose id is no longer pending is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongPressTimer {
    pub id: u64,
    pub deadline_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GestureState {
    Idle,
    Pressed {
        down: PressOrigin,
        timer: LongPressTimer,
    },
    Scrubbing {
        down: PressOrigin,
    },
}

/// Whether the gesture detector consumed a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchResponse {
    /// Consumed; more events of this gesture are expected.
    ConsumedContinue,
    /// Consumed; the gesture is over.
    ConsumedEnd,
    /// Not ours; the host may hand the gesture to another handler.
    NotConsumed,
}

impl TouchResponse {
    #[must_use]
    pub fn is_consumed(self) -> bool {
        self != Self::NotConsumed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ScrubEvent {
    Begin { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureOutcome {
    pub response: TouchResponse,
    pub scrub: Option<ScrubEvent>,
}

impl GestureOutcome {
    const IGNORED: Self = Self {
        response: TouchResponse::NotConsumed,
        scrub: None,
    };

    fn consumed(scrub: Option<ScrubEvent>) -> Self {
        Self {
            response: TouchResponse::ConsumedContinue,
            scrub,
        }
    }

    fn ended() -> Self {
        Self {
            response: TouchResponse::ConsumedEnd,
            scrub: Some(ScrubEvent::End),
        }
    }
}

/// Press-and-hold scrub detector.
///
/// Pure state machine: the host feeds pointer events and fires (or polls)
/// the long-press timer; scrub events come back as return values.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrubGestureDetector {
    config: ScrubGestureConfig,
    enabled: bool,
    state: GestureState,
    next_timer_id: u64,
}

impl Default for ScrubGestureDetector {
    fn default() -> Self {
        Self::new(ScrubGestureConfig::default())
    }
}

impl ScrubGestureDetector {
    #[must_use]
    pub fn new(config: ScrubGestureConfig) -> Self {
        Self {
            config,
            enabled: true,
            state: GestureState::Idle,
            next_timer_id: 0,
        }
    }

    #[must_use]
    pub fn config(&self) -> ScrubGestureConfig {
        self.config
    }

    #[must_use]
    pub fn state(&self) -> GestureState {
        self.state
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub fn is_scrubbing(&self) -> bool {
        matches!(self.state, GestureState::Scrubbing { .. })
    }

    /// Timer the host should schedule, if a press is waiting on it.
    #[must_use]
    pub fn pending_long_press(&self) -> Option<LongPressTimer> {
        match self.state {
            GestureState::Pressed { timer, .. } => Some(timer),
            _ => None,
        }
    }

    /// Enables or disables detection. Disabling mid-gesture returns `End`
    /// when the gesture had reached or was waiting on the scrub.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<ScrubEvent> {
        self.enabled = enabled;
        if enabled {
            return None;
        }
        let was_active = self.state != GestureState::Idle;
        self.state = GestureState::Idle;
        was_active.then_some(ScrubEvent::End)
    }

    pub fn handle(&mut self, event: PointerEvent) -> GestureOutcome {
        if !self.enabled {
            return GestureOutcome::IGNORED;
        }
        let outcome = match event.kind {
            PointerEventKind::Down => self.on_pressed_down(event),
            PointerEventKind::Move => self.on_moved(event),
            PointerEventKind::Up | PointerEventKind::Cancel => self.on_released(),
        };
        trace!(
            kind = ?event.kind,
            x = event.x,
            y = event.y,
            state = ?self.state,
            response = ?outcome.response,
            "scrub gesture event"
        );
        outcome
    }

    /// Fires the long-press timer `id`. Stale ids return `None`.
    pub fn on_long_press_timeout(&mut self, id: u64) -> Option<ScrubEvent> {
        if !self.enabled {
            return None;
        }
        let GestureState::Pressed { down, timer } = self.state else {
            return None;
        };
        if timer.id != id {
            trace!(id, pending = timer.id, "ignored stale long-press timer");
            return None;
        }
        self.state = GestureState::Scrubbing { down };
        trace!(id, x = down.x, y = down.y, "long press began scrub");
        Some(ScrubEvent::Begin {
            x: down.x,
            y: down.y,
        })
    }

    /// Fires the pending timer when `now_ms` reached its deadline.
    pub fn poll(&mut self, now_ms: u64) -> Option<ScrubEvent> {
        let timer = self.pending_long_press()?;
        if now_ms >= timer.deadline_ms {
            self.on_long_press_timeout(timer.id)
        } else {
            None
        }
    }

    fn on_pressed_down(&mut self, event: PointerEvent) -> GestureOutcome {
        let interrupted = self.is_scrubbing().then_some(ScrubEvent::End);
        let timer = self.arm_timer(event.time_ms);
        self.state = GestureState::Pressed {
            down: PressOrigin {
                x: event.x,
                y: event.y,
                time_ms: event.time_ms,
            },
            timer,
        };
        GestureOutcome::consumed(interrupted)
    }

    fn on_moved(&mut self, event: PointerEvent) -> GestureOutcome {
        match self.state {
            GestureState::Idle => GestureOutcome::IGNORED,
            GestureState::Pressed { down, .. } => {
                if self.is_long_press(down, event.time_ms) {
                    self.state = GestureState::Scrubbing { down };
                    GestureOutcome::consumed(Some(ScrubEvent::Begin {
                        x: event.x,
                        y: event.y,
                    }))
                } else if self.is_outside_touch_slop(down, event) {
                    self.state = GestureState::Idle;
                    GestureOutcome::IGNORED
                } else {
                    GestureOutcome::consumed(None)
                }
            }
            GestureState::Scrubbing { .. } => GestureOutcome::consumed(Some(ScrubEvent::Move {
                x: event.x,
                y: event.y,
            })),
        }
    }

    fn on_released(&mut self) -> GestureOutcome {
        if self.state == GestureState::Idle {
            return GestureOutcome::IGNORED;
        }
        self.state = GestureState::Idle;
        GestureOutcome::ended()
    }

    fn arm_timer(&mut self, now_ms: u64) -> LongPressTimer {
        self.next_timer_id = self.next_timer_id.wrapping_add(1);
        LongPressTimer {
            id: self.next_timer_id,
            deadline_ms: now_ms.saturating_add(self.config.long_press_timeout_ms),
        }
    }

    fn is_long_press(&self, down: PressOrigin, now_ms: u64) -> bool {
        now_ms.saturating_sub(down.time_ms) >= self.config.long_press_timeout_ms
    }

    fn is_outside_touch_slop(&self, down: PressOrigin, event: PointerEvent) -> bool {
        (down.x - event.x).abs() >= self.config.touch_slop_px
            || (down.y - event.y).abs() >= self.config.touch_slop_px
    }
}

//! Visibility and auto-hide
//!
//! Owns the `visible` flag and every timer that can flip it. Each timer
//! lives in its own [`TimerSlot`], so there is never more than one pending
//! hide, hover-show or wheel timer at a time.

use std::sync::Arc;
use std::time::Duration;

use overlay_core::{Fired, TimerQueue, TimerSlot};
use tracing::trace;

use crate::config::ResolvedAutoHide;

/// Hover on the track region shows the bar after this debounce
pub const HOVER_SHOW_DELAY: Duration = Duration::from_millis(100);
/// A wheel tick counts as "recent" for this long
pub const WHEEL_DECAY: Duration = Duration::from_millis(300);
/// Wheel ticks show the bar after this debounce unless a scroll arrives first
pub const WHEEL_SHOW_DELAY: Duration = Duration::from_millis(50);
/// Second geometry refresh after mount, once layout has settled
pub const SETTLE_REFRESH_DELAY: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Hide,
    HoverShow,
    WheelDecay,
    WheelShow,
    InitialDelay,
    SettleRefresh,
}

/// Visibility flag plus its timers
#[derive(Debug)]
pub struct Visibility {
    visible: bool,
    policy: Arc<ResolvedAutoHide>,
    timers: TimerQueue<TimerKind>,
    hide: TimerSlot,
    hover_show: TimerSlot,
    wheel_decay: TimerSlot,
    wheel_show: TimerSlot,
    initial_delay: TimerSlot,
    settle: TimerSlot,
    wheel_active: bool,
    initial_delay_active: bool,
}

impl Visibility {
    /// Start hidden, with the initial delay and the settle refresh armed
    pub fn new(policy: Arc<ResolvedAutoHide>, now: Duration) -> Self {
        let mut timers = TimerQueue::new();
        let mut initial_delay = TimerSlot::new();
        let initial_delay_active = policy.initial_delay > Duration::ZERO;
        if initial_delay_active {
            initial_delay.arm(&mut timers, now, policy.initial_delay, TimerKind::InitialDelay);
        }
        let mut settle = TimerSlot::new();
        settle.arm(&mut timers, now, SETTLE_REFRESH_DELAY, TimerKind::SettleRefresh);

        Self {
            visible: false,
            policy,
            timers,
            hide: TimerSlot::new(),
            hover_show: TimerSlot::new(),
            wheel_decay: TimerSlot::new(),
            wheel_show: TimerSlot::new(),
            initial_delay,
            settle,
            wheel_active: false,
            initial_delay_active,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn policy(&self) -> &Arc<ResolvedAutoHide> {
        &self.policy
    }

    /// Swap the timing policy
    ///
    /// Disabling auto-hide drops a pending hide. Re-enabling it while the bar
    /// is up arms the default hide from `now`.
    pub fn set_policy(&mut self, policy: Arc<ResolvedAutoHide>, now: Duration) {
        let was_enabled = self.policy.enabled;
        if !policy.enabled {
            self.cancel_hide();
        }
        self.policy = policy;
        if !was_enabled && self.policy.enabled && self.visible {
            self.arm_default_hide(now);
        }
    }

    pub fn auto_hide_enabled(&self) -> bool {
        self.policy.enabled
    }

    pub fn initial_delay_active(&self) -> bool {
        self.initial_delay_active
    }

    pub fn wheel_active(&self) -> bool {
        self.wheel_active
    }

    // ========================================================================
    // Hide timer
    // ========================================================================

    /// Replace any pending hide with one `delay` from now. No-op when auto-hide is off.
    pub fn arm_hide(&mut self, now: Duration, delay: Duration) {
        if !self.policy.enabled {
            return;
        }
        self.hide.arm(&mut self.timers, now, delay, TimerKind::Hide);
    }

    pub fn arm_default_hide(&mut self, now: Duration) {
        let delay = self.policy.delay;
        self.arm_hide(now, delay);
    }

    pub fn cancel_hide(&mut self) {
        self.hide.cancel(&mut self.timers);
    }

    pub fn hide_deadline(&self) -> Option<Duration> {
        self.hide.deadline(&self.timers)
    }

    /// Pending hide timers; never more than one
    pub fn pending_hide_timers(&self) -> usize {
        self.timers.count_of(TimerKind::Hide)
    }

    // ========================================================================
    // Triggers
    // ========================================================================

    /// Pointer entered the track region
    pub fn pointer_entered(&mut self, now: Duration) {
        self.cancel_hide();
        self.hover_show
            .arm(&mut self.timers, now, HOVER_SHOW_DELAY, TimerKind::HoverShow);
    }

    /// Pointer left the track region
    pub fn pointer_left(&mut self, now: Duration, dragging: bool) {
        self.hover_show.cancel(&mut self.timers);
        if !dragging {
            self.arm_default_hide(now);
        }
    }

    /// A wheel tick reached the instance
    pub fn wheel(&mut self, now: Duration) {
        self.wheel_active = true;
        self.wheel_decay
            .arm(&mut self.timers, now, WHEEL_DECAY, TimerKind::WheelDecay);
        self.wheel_show
            .arm(&mut self.timers, now, WHEEL_SHOW_DELAY, TimerKind::WheelShow);
    }

    /// The scroll target moved. Returns false while the initial delay suppresses showing.
    ///
    /// With `arm_hide` false the bar stays up until something else arms the hide.
    pub fn scrolled(&mut self, now: Duration, arm_hide: bool) -> bool {
        if self.initial_delay_active {
            return false;
        }
        self.wheel_show.cancel(&mut self.timers);
        self.cancel_hide();
        self.visible = true;
        if arm_hide {
            let delay = if self.wheel_active {
                self.policy.delay_on_wheel
            } else {
                self.policy.delay
            };
            self.arm_hide(now, delay);
        }
        true
    }

    /// Show for a debounced wheel tick and arm the wheel delay from `now`
    pub fn show_for_wheel(&mut self, now: Duration) {
        self.visible = true;
        let delay = self.policy.delay_on_wheel;
        self.arm_hide(now, delay);
    }

    // ========================================================================
    // Timer pump
    // ========================================================================

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Fire the earliest due timer and apply its own effect
    ///
    /// Wheel-show, initial-delay and settle timers need the owner's geometry
    /// to finish their work, so the fired timer is handed back to the owner.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<TimerKind>> {
        let fired = self.timers.pop_due(now)?;
        let Fired { id, kind, deadline } = fired;
        trace!(?kind, ?deadline, "timer fired");
        match kind {
            TimerKind::Hide => {
                self.hide.fired(id);
                self.visible = false;
            }
            TimerKind::HoverShow => {
                self.hover_show.fired(id);
                self.visible = true;
            }
            TimerKind::WheelDecay => {
                self.wheel_decay.fired(id);
                self.wheel_active = false;
            }
            TimerKind::WheelShow => {
                self.wheel_show.fired(id);
            }
            TimerKind::InitialDelay => {
                self.initial_delay.fired(id);
                self.initial_delay_active = false;
            }
            TimerKind::SettleRefresh => {
                self.settle.fired(id);
            }
        }
        Some(fired)
    }

    /// Drop every pending timer
    pub fn cancel_all(&mut self) {
        self.timers.clear();
        self.hide = TimerSlot::new();
        self.hover_show = TimerSlot::new();
        self.wheel_decay = TimerSlot::new();
        self.wheel_show = TimerSlot::new();
        self.initial_delay = TimerSlot::new();
        self.settle = TimerSlot::new();
        self.wheel_active = false;
        self.initial_delay_active = false;
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }
}

//! LIDAR activation state machine.
//!
//! The backend owns the sensor: local state only ever follows what an
//! activation check reports. A click while inactive produces a one-shot
//! activation request, but the plotter keeps showing the placeholder until a
//! later check confirms the sensor is running.
//!
//! ```text
//!             check(false)                       check(true)
//!   Unknown ──────────────► Inactive ─────────────────────► Active
//!      │                    (click armed)   ◄──────────────  (click disarmed)
//!      └──────────────────────────────────────────────────►    check(false)
//!                           check(true)
//! ```

/// Backend-confirmed sensor state.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum LidarActivation {
    /// Sensor stopped. Placeholder shown, click handler attached.
    Inactive,
    /// Sensor running. Packets fetched each tick, no click handler.
    Active,
}

/// Effect of applying one activation check.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Transition {
    /// State entered by this check (`None` when unchanged).
    pub entered: Option<LidarActivation>,
    /// Click handler was attached by this check.
    pub attached: bool,
    /// Click handler was detached by this check.
    pub detached: bool,
}

impl Transition {
    /// Whether the check changed anything visible.
    #[inline]
    pub const fn is_change(&self) -> bool { self.entered.is_some() }
}

/// Tracks confirmed state, the click handler and pending activation requests.
#[derive(Debug, Default)]
pub struct ActivationMachine {
    state: Option<LidarActivation>,
    click_attached: bool,
    request_pending: bool,
    attach_count: u32,
    detach_count: u32,
}

impl ActivationMachine {
    /// Create a machine whose state is unknown until the first check.
    pub const fn new() -> Self {
        Self {
            state: None,
            click_attached: false,
            request_pending: false,
            attach_count: 0,
            detach_count: 0,
        }
    }

    /// Last confirmed state (`None` before the first check).
    #[inline]
    pub const fn state(&self) -> Option<LidarActivation> { self.state }

    /// Whether the last confirmed state is `Active`.
    #[inline]
    pub fn is_active(&self) -> bool { self.state == Some(LidarActivation::Active) }

    /// Whether a click currently reaches the handler.
    #[inline]
    pub const fn click_attached(&self) -> bool { self.click_attached }

    /// Whether an activation request is waiting for the next check.
    #[inline]
    pub const fn request_pending(&self) -> bool { self.request_pending }

    /// Number of times the click handler has been attached.
    #[inline]
    pub const fn attach_count(&self) -> u32 { self.attach_count }

    /// Number of times the click handler has been detached.
    #[inline]
    pub const fn detach_count(&self) -> u32 { self.detach_count }

    /// Apply the flag returned by an activation check.
    ///
    /// Any check answers a pending request, whichever way it went: a request
    /// the backend ignored can be retried with the next click.
    ///
    /// Checks are not matched to clicks. A check already in flight when the
    /// click was handled also re-arms it, so a quick second click can post a
    /// second activation request. Activation is idempotent on the backend, and
    /// either way the state only follows checks.
    pub fn confirm(
        &mut self,
        active: bool,
    ) -> Transition {
        self.request_pending = false;

        let next = if active {
            LidarActivation::Active
        } else {
            LidarActivation::Inactive
        };

        let mut transition = Transition::default();
        if self.state != Some(next) {
            self.state = Some(next);
            transition.entered = Some(next);
        }

        match next {
            LidarActivation::Inactive if !self.click_attached => {
                self.click_attached = true;
                self.attach_count += 1;
                transition.attached = true;
            }
            LidarActivation::Active if self.click_attached => {
                self.click_attached = false;
                self.detach_count += 1;
                transition.detached = true;
            }
            _ => {}
        }

        transition
    }

    /// Handle a click on the plotter surface.
    ///
    /// Returns `true` when an activation request should be sent. Clicks are
    /// ignored while no handler is attached or a request is already pending.
    /// State is never changed here.
    pub fn click(&mut self) -> bool {
        if !self.click_attached || self.request_pending {
            return false;
        }
        self.request_pending = true;
        true
    }
}

use std::time::{Duration, Instant};

use crate::roles::{Destination, Role};

pub const SUBMIT_LABEL_IDLE: &str = "Sign In";
pub const SUBMIT_LABEL_BUSY: &str = "Signing In...";
pub const INVALID_ROLE_MESSAGE: &str = "Invalid role selected";

/// The single top-level error banner. Replaces any prior banner and
/// expires on its own after the flow's banner TTL.
#[derive(Debug, Clone)]
pub struct Banner {
    pub message: String,
    pub shown_at: Instant,
}

impl Banner {
    /// Age of the banner, for the fade-in effect.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.shown_at)
    }
}

#[derive(Debug, Clone, Copy)]
enum FlowState {
    Idle,
    /// A submit is pending; the deadline is the moment the simulated
    /// authentication round trip completes.
    Submitting { deadline: Instant },
}

/// Simulated sign-in round trip: Idle -> Submitting -> (redirect | Idle
/// with banner). Deadlines are explicit and owned here, so an abandoned
/// flow simply stops being polled -- nothing fires against a torn-down
/// screen -- and Esc can cancel a pending submit outright.
#[derive(Debug)]
pub struct SigninFlow {
    state: FlowState,
    pending_role: String,
    banner: Option<Banner>,
    submit_delay: Duration,
    banner_ttl: Duration,
}

impl SigninFlow {
    pub fn new(submit_delay: Duration, banner_ttl: Duration) -> Self {
        Self {
            state: FlowState::Idle,
            pending_role: String::new(),
            banner: None,
            submit_delay,
            banner_ttl,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, FlowState::Submitting { .. })
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMIT_LABEL_BUSY
        } else {
            SUBMIT_LABEL_IDLE
        }
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Start the simulated round trip. Only valid from Idle; a re-submit
    /// while one is pending is ignored.
    pub fn begin(&mut self, role_value: &str, now: Instant) {
        if self.is_submitting() {
            return;
        }
        self.pending_role = role_value.trim().to_string();
        self.state = FlowState::Submitting {
            deadline: now + self.submit_delay,
        };
    }

    /// Drop a pending submit (Esc while the spinner runs).
    pub fn cancel(&mut self) {
        self.state = FlowState::Idle;
        self.pending_role.clear();
    }

    /// Show the top-level banner, replacing any existing one.
    pub fn show_banner(&mut self, message: impl Into<String>, now: Instant) {
        self.banner = Some(Banner {
            message: message.into(),
            shown_at: now,
        });
    }

    /// Advance timers. Returns the destination to navigate to when the
    /// submit deadline has passed and the pending role is recognized.
    /// An unrecognized role value (defensively kept -- the role field is a
    /// closed selection, so this should be unreachable) raises the banner
    /// and drops back to Idle.
    pub fn tick(&mut self, now: Instant) -> Option<Destination> {
        if let Some(banner) = &self.banner {
            if banner.age(now) >= self.banner_ttl {
                self.banner = None;
            }
        }

        let FlowState::Submitting { deadline } = self.state else {
            return None;
        };
        if now < deadline {
            return None;
        }

        self.state = FlowState::Idle;
        let role = std::mem::take(&mut self.pending_role);
        match role.parse::<Role>() {
            Ok(role) => Some(role.destination()),
            Err(_) => {
                self.show_banner(INVALID_ROLE_MESSAGE, now);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(1500);
    const TTL: Duration = Duration::from_millis(5000);

    fn flow() -> SigninFlow {
        SigninFlow::new(DELAY, TTL)
    }

    #[test]
    fn idle_until_deadline_passes() {
        let t0 = Instant::now();
        let mut flow = flow();
        flow.begin("operator", t0);
        assert!(flow.is_submitting());
        assert_eq!(flow.button_label(), SUBMIT_LABEL_BUSY);
        assert_eq!(flow.tick(t0 + Duration::from_millis(1499)), None);
        assert!(flow.is_submitting());
    }

    #[test]
    fn known_role_redirects_after_delay() {
        let t0 = Instant::now();
        let mut flow = flow();
        flow.begin("operator", t0);
        let dest = flow.tick(t0 + DELAY).expect("redirect");
        assert_eq!(dest.page(), "operator.html");
        assert!(!flow.is_submitting());
        assert!(flow.banner().is_none());
    }

    #[test]
    fn unknown_role_raises_banner_and_resets() {
        let t0 = Instant::now();
        let mut flow = flow();
        flow.begin("supervisor", t0);
        assert_eq!(flow.tick(t0 + DELAY), None);
        assert!(!flow.is_submitting());
        assert_eq!(flow.button_label(), SUBMIT_LABEL_IDLE);
        let banner = flow.banner().expect("banner raised");
        assert_eq!(banner.message, INVALID_ROLE_MESSAGE);
    }

    #[test]
    fn banner_expires_after_ttl() {
        let t0 = Instant::now();
        let mut flow = flow();
        flow.show_banner("boom", t0);
        flow.tick(t0 + TTL - Duration::from_millis(1));
        assert!(flow.banner().is_some());
        flow.tick(t0 + TTL);
        assert!(flow.banner().is_none());
    }

    #[test]
    fn new_banner_replaces_old() {
        let t0 = Instant::now();
        let mut flow = flow();
        flow.show_banner("first", t0);
        flow.show_banner("second", t0 + Duration::from_millis(100));
        assert_eq!(flow.banner().unwrap().message, "second");
    }

    #[test]
    fn resubmit_while_pending_is_ignored() {
        let t0 = Instant::now();
        let mut flow = flow();
        flow.begin("operator", t0);
        // Second submit must not reset the deadline or change the role.
        flow.begin("manager", t0 + Duration::from_millis(1000));
        let dest = flow.tick(t0 + DELAY).expect("redirect");
        assert_eq!(dest.page(), "operator.html");
    }

    #[test]
    fn cancel_drops_pending_submit() {
        let t0 = Instant::now();
        let mut flow = flow();
        flow.begin("operator", t0);
        flow.cancel();
        assert!(!flow.is_submitting());
        assert_eq!(flow.tick(t0 + DELAY), None);
    }

    #[test]
    fn role_value_is_trimmed_before_dispatch() {
        let t0 = Instant::now();
        let mut flow = flow();
        flow.begin("  emt  ", t0);
        let dest = flow.tick(t0 + DELAY).expect("redirect");
        assert_eq!(dest.page(), "emt.html");
    }
}

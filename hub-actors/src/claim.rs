//! The claim state machine: local UI state reconciled against the remote
//! eligibility poll.
//!
//! All mutation goes through [`ClaimState::apply`], a pure transition
//! function from (state, event) to (state, effects). The controller actor
//! interprets the returned [`Effect`]s (spawn a status fetch, arm or cancel
//! the auto-dismiss timer); nothing in this module touches the network, a
//! timer, or the terminal, which keeps every rule testable in isolation.

use hub_api::EligibilityStatus;

/// Fixed text shown when a status poll fails.
pub const STATUS_FETCH_ERROR: &str = "Failed to check status";
/// Fallback text shown when a claim fails without a server-authored message.
pub const CLAIM_FALLBACK_ERROR: &str = "Failed to claim coupon";

/// Everything that can happen to the claim state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimEvent {
    /// A status poll resolved. `seq` orders overlapping in-flight polls;
    /// a result older than the newest applied one is dropped.
    StatusFetched { seq: u64, status: EligibilityStatus },
    /// A status poll failed. The next scheduled poll is the retry.
    StatusFetchFailed,
    /// The user triggered a claim and no claim is in flight.
    ClaimStarted,
    ClaimSucceeded { coupon: String },
    /// `message` is the server-authored error text, when the response had one.
    ClaimFailed { message: Option<String> },
    /// The countdown overlay was closed, by the user or by the 5 s timer.
    CountdownDismissed,
    CouponDismissed,
    ErrorDismissed,
}

/// Instructions for the controller, emitted by [`ClaimState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Issue an immediate eligibility re-sync (after a successful claim).
    RefreshStatus,
    /// Start (or restart) the one-shot countdown auto-dismiss timer.
    ArmDismissTimer,
    /// Abort any pending auto-dismiss timer.
    CancelDismissTimer,
}

/// Mutually exclusive display modes derived from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Claim button available.
    Claimable,
    /// Claim request in flight.
    Claiming,
    /// Coupon modal shown. Always supersedes the countdown.
    CouponDisplay,
    /// Countdown modal shown.
    Waiting,
    /// Countdown dismissed; the clock keeps running via status polls.
    WaitingDismissed,
    /// Error modal shown.
    ErrorDisplay,
}

#[derive(Debug, Clone, Default)]
pub struct ClaimState {
    pub status: EligibilityStatus,
    pub coupon: Option<String>,
    pub loading: bool,
    /// Empty string means no error.
    pub error: String,
    /// The user (or the auto-dismiss timer) closed the countdown overlay for
    /// the current waiting window.
    pub countdown_dismissed: bool,
    last_status_seq: u64,
}

impl ClaimState {
    /// True when the countdown auto-dismiss timer should be pending:
    /// not claimable, no coupon held, not yet dismissed.
    pub fn wants_dismiss_timer(&self) -> bool {
        !self.status.can_claim && self.coupon.is_none() && !self.countdown_dismissed
    }

    /// A claim may start only when eligible and none is already in flight.
    pub fn can_start_claim(&self) -> bool {
        !self.loading && self.status.can_claim
    }

    /// The inputs the dismiss timer condition depends on. A change in any of
    /// them re-evaluates the timer; `time_left` ticking down does not.
    fn timer_inputs(&self) -> (bool, bool, bool) {
        (
            self.status.can_claim,
            self.coupon.is_some(),
            self.countdown_dismissed,
        )
    }

    /// Apply one event and return the effects the controller must run.
    pub fn apply(&mut self, event: ClaimEvent) -> Vec<Effect> {
        let inputs_before = self.timer_inputs();
        let mut effects = Vec::new();

        match event {
            ClaimEvent::StatusFetched { seq, status } => {
                if seq < self.last_status_seq {
                    // Stale in-flight poll; a newer status already landed.
                    return effects;
                }
                self.last_status_seq = seq;

                // A claimable -> not-claimable transition starts a new
                // waiting window, so a dismissal from the previous window
                // must not suppress the new countdown.
                if self.status.can_claim && !status.can_claim {
                    self.countdown_dismissed = false;
                }
                self.status = status;
            }
            ClaimEvent::StatusFetchFailed => {
                self.error = STATUS_FETCH_ERROR.to_string();
            }
            ClaimEvent::ClaimStarted => {
                if self.loading {
                    return effects;
                }
                self.loading = true;
                self.error.clear();
            }
            ClaimEvent::ClaimSucceeded { coupon } => {
                self.loading = false;
                self.coupon = Some(coupon);
                effects.push(Effect::RefreshStatus);
            }
            ClaimEvent::ClaimFailed { message } => {
                self.loading = false;
                self.error = message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| CLAIM_FALLBACK_ERROR.to_string());
            }
            ClaimEvent::CountdownDismissed => {
                self.countdown_dismissed = true;
            }
            ClaimEvent::CouponDismissed => {
                self.coupon = None;
            }
            ClaimEvent::ErrorDismissed => {
                self.error.clear();
            }
        }

        if self.timer_inputs() != inputs_before {
            if self.wants_dismiss_timer() {
                effects.push(Effect::ArmDismissTimer);
            } else {
                effects.push(Effect::CancelDismissTimer);
            }
        }

        effects
    }

    /// Derive the single visible display mode. Precedence mirrors the modal
    /// stacking of the original page: error on top, then coupon, then the
    /// in-flight claim, then the countdown states.
    pub fn display(&self) -> DisplayMode {
        if !self.error.is_empty() {
            DisplayMode::ErrorDisplay
        } else if self.coupon.is_some() {
            DisplayMode::CouponDisplay
        } else if self.loading {
            DisplayMode::Claiming
        } else if !self.status.can_claim {
            if self.countdown_dismissed {
                DisplayMode::WaitingDismissed
            } else {
                DisplayMode::Waiting
            }
        } else {
            DisplayMode::Claimable
        }
    }
}

//! End-to-end walk of the claim lifecycle, event by event, checking the
//! display invariants after every step.

use hub_actors::{ClaimEvent, ClaimState, DisplayMode, Effect};
use hub_api::EligibilityStatus;

fn fetched(seq: u64, can_claim: bool, time_left: u64) -> ClaimEvent {
    ClaimEvent::StatusFetched {
        seq,
        status: EligibilityStatus {
            can_claim,
            time_left,
        },
    }
}

/// The coupon modal and the countdown overlay must never be visible at once.
fn assert_exclusive(state: &ClaimState) {
    let waiting = matches!(state.display(), DisplayMode::Waiting);
    let coupon_shown = matches!(state.display(), DisplayMode::CouponDisplay);
    assert!(!(waiting && coupon_shown));
    if state.coupon.is_some() {
        assert_ne!(state.display(), DisplayMode::Waiting);
    }
}

#[test]
fn full_claim_cycle() {
    let mut state = ClaimState::default();
    let mut effects_log: Vec<Effect> = Vec::new();

    let step = |effects_log: &mut Vec<Effect>, state: &mut ClaimState, ev: ClaimEvent| {
        let effects = state.apply(ev);
        assert_exclusive(state);
        effects_log.extend(effects);
    };

    // Boot: first poll says claimable.
    step(&mut effects_log, &mut state, fetched(1, true, 0));
    assert_eq!(state.display(), DisplayMode::Claimable);

    // User claims; service answers with a coupon.
    step(&mut effects_log, &mut state, ClaimEvent::ClaimStarted);
    assert_eq!(state.display(), DisplayMode::Claiming);
    step(
        &mut effects_log,
        &mut state,
        ClaimEvent::ClaimSucceeded {
            coupon: "SAVE20".into(),
        },
    );
    assert_eq!(state.coupon.as_deref(), Some("SAVE20"));
    assert!(!state.loading);
    // Eligibility re-sync was requested right away.
    assert!(effects_log.contains(&Effect::RefreshStatus));

    // The re-sync reports the hour-long lockout. Coupon stays on top.
    step(&mut effects_log, &mut state, fetched(2, false, 3600));
    assert_eq!(state.display(), DisplayMode::CouponDisplay);

    // Closing the coupon reveals the countdown and arms the auto-dismiss.
    step(&mut effects_log, &mut state, ClaimEvent::CouponDismissed);
    assert_eq!(state.display(), DisplayMode::Waiting);
    assert_eq!(effects_log.last(), Some(&Effect::ArmDismissTimer));

    // Five seconds later the timer folds the overlay away; polls keep
    // updating the remaining time underneath.
    step(&mut effects_log, &mut state, ClaimEvent::CountdownDismissed);
    assert_eq!(state.display(), DisplayMode::WaitingDismissed);
    step(&mut effects_log, &mut state, fetched(3, false, 3595));
    assert_eq!(state.status.time_left, 3595);
    assert_eq!(state.display(), DisplayMode::WaitingDismissed);

    // Window reopens; a second claim fails with a server message.
    step(&mut effects_log, &mut state, fetched(4, true, 0));
    assert_eq!(state.display(), DisplayMode::Claimable);
    step(&mut effects_log, &mut state, ClaimEvent::ClaimStarted);
    step(
        &mut effects_log,
        &mut state,
        ClaimEvent::ClaimFailed {
            message: Some("Already claimed".into()),
        },
    );
    assert!(!state.loading);
    assert_eq!(state.error, "Already claimed");
    assert_eq!(state.display(), DisplayMode::ErrorDisplay);

    // Dismissing the error falls back to whatever the status implies.
    step(&mut effects_log, &mut state, ClaimEvent::ErrorDismissed);
    assert_eq!(state.display(), DisplayMode::Claimable);
}

use serde::{Deserialize, Serialize};

/// Claim eligibility as reported by `GET /status`.
///
/// Wire format is camelCase: `{"canClaim": true, "timeLeft": 0}`.
/// `time_left` counts down the seconds until the next eligibility window
/// opens; it is only meaningful while `can_claim` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityStatus {
    pub can_claim: bool,
    pub time_left: u64,
}

impl Default for EligibilityStatus {
    /// The optimistic pre-first-poll state: claimable, no countdown.
    fn default() -> Self {
        Self {
            can_claim: true,
            time_left: 0,
        }
    }
}

/// Body of a successful `GET /claim-coupon`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CouponResponse {
    pub coupon: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_decodes_camel_case() {
        let status: EligibilityStatus =
            serde_json::from_str(r#"{"canClaim":false,"timeLeft":3661}"#).unwrap();
        assert!(!status.can_claim);
        assert_eq!(status.time_left, 3661);
    }

    #[test]
    fn default_is_claimable() {
        let status = EligibilityStatus::default();
        assert!(status.can_claim);
        assert_eq!(status.time_left, 0);
    }
}

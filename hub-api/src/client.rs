use crate::types::CouponResponse;
use crate::{CouponApi, EligibilityStatus};
use async_trait::async_trait;
use hub_http::{HttpClient, HttpError, RequestOpts};
use std::time::Duration;

/// Real client for the coupon service, built on the shared HTTP client.
///
/// Both calls are issued with `retries: Some(0)`: a failed status poll is
/// covered by the next scheduled poll, and a failed claim must surface to the
/// user rather than be silently re-attempted.
#[derive(Clone)]
pub struct CouponHubApi {
    http: HttpClient,
}

impl CouponHubApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, HttpError> {
        let http = HttpClient::new(base_url)?.with_timeout(timeout);
        Ok(Self { http })
    }
}

#[async_trait]
impl CouponApi for CouponHubApi {
    async fn status(&self) -> Result<EligibilityStatus, HttpError> {
        let status: EligibilityStatus = self
            .http
            .get_json(
                "status",
                RequestOpts {
                    retries: Some(0),
                    ..Default::default()
                },
            )
            .await?;

        tracing::debug!(can_claim = status.can_claim, time_left = status.time_left, "api.status");
        Ok(status)
    }

    async fn claim(&self) -> Result<String, HttpError> {
        let resp: CouponResponse = self
            .http
            .get_json(
                "claim-coupon",
                RequestOpts {
                    retries: Some(0),
                    ..Default::default()
                },
            )
            .await?;

        tracing::info!("api.claim.succeeded");
        Ok(resp.coupon)
    }
}

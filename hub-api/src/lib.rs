//! Typed client for the remote coupon-distribution service.
//!
//! Two endpoints, both GET, both carrying session cookies so the backend can
//! key eligibility to the caller:
//!
//! - `/status` → [`EligibilityStatus`]
//! - `/claim-coupon` → a coupon code, or an error body with a `message`
//!
//! The [`CouponApi`] trait is the seam the UI depends on; tests substitute
//! their own implementation.

mod client;
mod types;

pub use client::CouponHubApi;
pub use types::EligibilityStatus;

use async_trait::async_trait;
use hub_http::HttpError;

#[async_trait]
pub trait CouponApi: Send + Sync {
    /// Fetch the caller's current claim eligibility.
    async fn status(&self) -> Result<EligibilityStatus, HttpError>;

    /// Request a coupon. Returns the opaque code on success; on failure the
    /// error may carry a server-authored message (see
    /// [`HttpError::server_message`]).
    async fn claim(&self) -> Result<String, HttpError>;
}

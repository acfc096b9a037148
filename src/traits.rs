//! Capability traits
//!
//! The submission handler only knows it can ask something to describe an
//! image. Keeping that behind a trait lets the web layer run against a fake
//! in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Description, DescriptionRequest};

/// Something that turns an ordered text+image request into a description.
#[async_trait]
pub trait DescribeImage: Send + Sync {
    /// Issue exactly one model call for `request`.
    ///
    /// Errors from the transport or the API are returned unmodified.
    async fn describe(&self, request: DescriptionRequest) -> Result<Description>;

    /// Short provider name for logs
    fn provider_id(&self) -> &'static str;
}

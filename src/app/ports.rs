use async_trait::async_trait;

use crate::error::Result;
use crate::types::{RawServiceResponse, SourceRequest};

/// Outbound HTTP port shared by every source adapter.
///
/// `Ok` is returned for any response that arrived, including non-2xx statuses
/// (`success == false`). `Err` means the request never completed: connection
/// failure, timeout or an unreadable body.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn call(&self, request: &SourceRequest) -> Result<RawServiceResponse>;
}

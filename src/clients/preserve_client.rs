use crate::clients::{ClientError, Envelope, ServiceClient};
use crate::model::OrderRequest;
use tracing::{debug, info, instrument};

pub const PRESERVE_PATH: &str = "/api/v1/preserveservice/preserve";

/// Client for order submission.
#[derive(Clone)]
pub struct PreserveClient {
    inner: ServiceClient,
}

impl PreserveClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// Submits a reservation. Every call is a new purchase attempt; the backend
    /// decides what to do with duplicates.
    #[instrument(skip(self, order, token), fields(trip_id = %order.trip_id))]
    pub async fn submit(&self, order: &OrderRequest, token: &str) -> Result<Envelope, ClientError> {
        debug!(?order, "submit called");
        let envelope = self.inner.post(PRESERVE_PATH, order, Some(token)).await?;
        info!(status = ?envelope.status, msg = ?envelope.msg, "Submitted");
        Ok(envelope)
    }
}

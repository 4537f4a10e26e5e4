use crate::clients::{ClientError, ServiceClient};
use crate::model::LeftTicketQuery;
use serde_json::Value;
use tracing::{debug, instrument};

pub const LEFT_TICKETS_PATH: &str = "/api/v1/seatservice/seats/left_tickets";

/// Client for the seat service.
#[derive(Clone)]
pub struct SeatClient {
    inner: ServiceClient,
}

impl SeatClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// Seats left on a train segment.
    #[instrument(skip(self, token))]
    pub async fn left_tickets(&self, query: &LeftTicketQuery, token: &str) -> Result<Value, ClientError> {
        debug!("Sending request");
        let envelope = self.inner.post(LEFT_TICKETS_PATH, query, Some(token)).await?;
        Ok(envelope.data.unwrap_or(Value::Null))
    }
}

use crate::clients::{ClientError, ServiceClient};
use crate::model::{OrderQuery, OrderSummary, TicketQuery};
use serde_json::Value;
use tracing::{debug, instrument};

pub const ORDERS_PATH: &str = "/api/v1/orderservice/order";
pub const ORDER_QUERY_PATH: &str = "/api/v1/orderservice/order/query";
pub const SOLD_TICKETS_PATH: &str = "/api/v1/orderservice/order/tickets";
pub const ALREADY_SOLD_PATH: &str = "/api/v1/orderservice/order/query_already_sold_orders";

/// Client for the order service.
///
/// Query results are returned as raw JSON: nothing downstream consumes them
/// beyond logging.
#[derive(Clone)]
pub struct OrderClient {
    inner: ServiceClient,
}

impl OrderClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    #[instrument(skip_all)]
    pub async fn all_orders(&self, token: &str) -> Result<Vec<OrderSummary>, ClientError> {
        debug!("Sending request");
        self.inner.get_list(ORDERS_PATH, token).await
    }

    #[instrument(skip(self, token))]
    pub async fn query(&self, query: &OrderQuery, token: &str) -> Result<Value, ClientError> {
        debug!("Sending request");
        let envelope = self.inner.post(ORDER_QUERY_PATH, query, Some(token)).await?;
        Ok(envelope.data.unwrap_or(Value::Null))
    }

    #[instrument(skip(self, token))]
    pub async fn sold_tickets(&self, query: &TicketQuery, token: &str) -> Result<Value, ClientError> {
        debug!("Sending request");
        let envelope = self.inner.post(SOLD_TICKETS_PATH, query, Some(token)).await?;
        Ok(envelope.data.unwrap_or(Value::Null))
    }

    #[instrument(skip(self, token))]
    pub async fn already_sold(&self, query: &TicketQuery, token: &str) -> Result<Value, ClientError> {
        debug!("Sending request");
        let envelope = self.inner.post(ALREADY_SOLD_PATH, query, Some(token)).await?;
        Ok(envelope.data.unwrap_or(Value::Null))
    }
}

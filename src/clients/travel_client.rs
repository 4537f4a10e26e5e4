use crate::clients::{ClientError, ServiceClient};
use crate::model::{LeftTrip, LeftTripQuery, Trip};
use tracing::{debug, instrument};

pub const TRIPS_PATH: &str = "/api/v1/travelservice/trips";
pub const LEFT_TRIPS_PATH: &str = "/api/v1/travelservice/trips/left";

/// Client for the travel service.
#[derive(Clone)]
pub struct TravelClient {
    inner: ServiceClient,
}

impl TravelClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    #[instrument(skip_all)]
    pub async fn all_trips(&self, token: &str) -> Result<Vec<Trip>, ClientError> {
        debug!("Sending request");
        self.inner.get_list(TRIPS_PATH, token).await
    }

    /// Direct search for trips with tickets left between two stations.
    #[instrument(skip(self, token))]
    pub async fn search_left(
        &self,
        query: &LeftTripQuery,
        token: &str,
    ) -> Result<Vec<LeftTrip>, ClientError> {
        debug!("Sending request");
        self.inner.post_list(LEFT_TRIPS_PATH, query, token).await
    }
}

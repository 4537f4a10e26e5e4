use crate::clients::{ClientError, ServiceClient};
use crate::model::Station;
use tracing::{debug, instrument};

pub const STATIONS_PATH: &str = "/api/v1/stationservice/stations";

/// Client for the station service.
#[derive(Clone)]
pub struct StationClient {
    inner: ServiceClient,
}

impl StationClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    #[instrument(skip_all)]
    pub async fn all_stations(&self, token: &str) -> Result<Vec<Station>, ClientError> {
        debug!("Sending request");
        self.inner.get_list(STATIONS_PATH, token).await
    }
}

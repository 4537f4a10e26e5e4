use crate::clients::{ClientError, ServiceClient};
use crate::model::{FoodListing, TravelDate};
use serde_json::Value;
use tracing::{debug, instrument};

pub const FOODS_PATH: &str = "/api/v1/foodservice/foods";
pub const TRAIN_FOODS_PATH: &str = "/api/v1/foodmapservice/trainfoods";
pub const FOOD_STORES_PATH: &str = "/api/v1/foodmapservice/foodstores";

/// Client for the food service and the auxiliary food-map service.
#[derive(Clone)]
pub struct FoodClient {
    foods: ServiceClient,
    food_map: ServiceClient,
}

impl FoodClient {
    pub fn new(foods: ServiceClient, food_map: ServiceClient) -> Self {
        Self { foods, food_map }
    }

    /// Food on offer for one trip. `None` when the service has nothing for it.
    #[instrument(skip(self, token))]
    pub async fn listing(
        &self,
        date: TravelDate,
        start: &str,
        end: &str,
        trip_id: &str,
        token: &str,
    ) -> Result<Option<FoodListing>, ClientError> {
        debug!("Sending request");
        let path = format!("{FOODS_PATH}/{date}/{start}/{end}/{trip_id}");
        self.foods.get_optional(&path, token).await
    }

    #[instrument(skip_all)]
    pub async fn train_foods(&self, token: &str) -> Result<Value, ClientError> {
        debug!("Sending request");
        let envelope = self
            .food_map
            .call(reqwest::Method::GET, TRAIN_FOODS_PATH, None, Some(token))
            .await?;
        Ok(envelope.data.unwrap_or(Value::Null))
    }

    #[instrument(skip_all)]
    pub async fn food_stores(&self, token: &str) -> Result<Value, ClientError> {
        debug!("Sending request");
        let envelope = self
            .food_map
            .call(reqwest::Method::GET, FOOD_STORES_PATH, None, Some(token))
            .await?;
        Ok(envelope.data.unwrap_or(Value::Null))
    }
}

use serde::Deserialize;
use std::collections::BTreeMap;

/// A single purchasable food item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Food {
    pub food_name: String,
    pub price: f64,
}

/// Food served on board one train.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainFood {
    #[serde(default)]
    pub trip_id: String,
    #[serde(default)]
    pub food_list: Vec<Food>,
}

/// A station-side food store.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodStore {
    #[serde(default)]
    pub store_name: String,
    #[serde(default)]
    pub food_list: Vec<Food>,
}

/// `data` of the food listing for a trip.
///
/// The service may fill either part, both or neither. Store lists are keyed by
/// station name; a `BTreeMap` keeps the iteration order stable so a scripted
/// choice always lands on the same store.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodListing {
    #[serde(default)]
    pub train_food_list: Option<Vec<TrainFood>>,
    #[serde(default)]
    pub food_store_list_map: Option<BTreeMap<String, Vec<FoodStore>>>,
}

/// Which part of a [`FoodListing`] the user looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodShape {
    /// Food sold on the train (first entry of `trainFoodList`).
    OnBoard,
    /// Food sold at station stores (`foodStoreListMap`).
    StationStore,
}

impl FoodShape {
    pub const ALL: [FoodShape; 2] = [Self::OnBoard, Self::StationStore];
}

/// The food attached to an order, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodSelection {
    pub food_name: String,
    pub price: f64,
}

impl From<&Food> for FoodSelection {
    fn from(food: &Food) -> Self {
        Self {
            food_name: food.food_name.clone(),
            price: food.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listing_accepts_either_shape() {
        let stores: FoodListing = serde_json::from_value(json!({
            "foodStoreListMap": {
                "nanjing": [{"storeName": "KFC", "foodList": [{"foodName": "Burger", "price": 12.5}]}]
            }
        }))
        .unwrap();
        assert!(stores.train_food_list.is_none());
        assert_eq!(stores.food_store_list_map.unwrap()["nanjing"][0].food_list[0].food_name, "Burger");

        let train: FoodListing = serde_json::from_value(json!({
            "trainFoodList": [{"tripId": "G1234", "foodList": [{"foodName": "Rice", "price": 8.0}]}],
            "foodStoreListMap": null
        }))
        .unwrap();
        assert!(train.food_store_list_map.is_none());
        assert_eq!(train.train_food_list.unwrap()[0].food_list[0].price, 8.0);
    }
}

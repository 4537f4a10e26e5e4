//! # Order Assembler
//!
//! Given a resolved trip, the assembler:
//!
//! 1. Fetches the user's contacts and picks one.
//! 2. Fetches the trip's food listing and, if there is one, looks at one of its
//!    two parts ([`FoodShape`]) chosen by coin flip. The choice ignores which part
//!    the backend actually filled: looking at an empty part yields no food, even
//!    when the other part has some.
//! 3. Picks one of the eight seat categories.
//! 4. Builds the [`OrderRequest`].

use crate::clients::{ContactClient, FoodClient};
use crate::model::{FoodListing, FoodSelection, FoodShape, OrderRequest, SeatType, TravelDate, TripCandidate};
use crate::order::OrderError;
use crate::random::{choose, Dice};
use crate::session::Session;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderAssembler {
    contacts: ContactClient,
    food: FoodClient,
}

impl OrderAssembler {
    pub fn new(contacts: ContactClient, food: FoodClient) -> Self {
        Self { contacts, food }
    }

    #[instrument(skip(self, session, dice, trip), fields(trip_id = %trip.trip_id()))]
    pub async fn assemble_order(
        &self,
        session: &Session,
        dice: &mut dyn Dice,
        trip: &TripCandidate,
        date: TravelDate,
    ) -> Result<OrderRequest, OrderError> {
        let token = session.token()?;

        let contacts = self.contacts.all_contacts(token).await?;
        let contact = choose(dice, &contacts)
            .ok_or_else(|| OrderError::NoContacts(session.username().to_string()))?;

        let listing = self
            .food
            .listing(date, trip.starting_station(), trip.terminal_station(), trip.trip_id(), token)
            .await?;
        let food = match &listing {
            Some(listing) => {
                let shape = FoodShape::ALL[dice.pick(FoodShape::ALL.len())];
                let food = select_food(listing, shape, dice);
                debug!(?shape, ?food, "Food lookup");
                food
            }
            None => None,
        };

        let seat_type = SeatType::from_index(dice.pick(SeatType::COUNT));
        let order = OrderRequest::new(
            session.account_id()?,
            contact.id.clone(),
            trip,
            seat_type,
            date,
            food.as_ref(),
        );
        info!(contact_id = %contact.id, seat_type = seat_type.code(), food = %order.food_name, "Order assembled");
        Ok(order)
    }
}

/// Looks at one part of the listing and picks an item from it.
///
/// - [`FoodShape::OnBoard`]: a random item of the first train food list.
/// - [`FoodShape::StationStore`]: a random station, then a random store there,
///   then a random item of that store.
///
/// Any empty step along the way means no food.
pub fn select_food(listing: &FoodListing, shape: FoodShape, dice: &mut dyn Dice) -> Option<FoodSelection> {
    let food = match shape {
        FoodShape::OnBoard => {
            let train = listing.train_food_list.as_ref()?.first()?;
            choose(dice, &train.food_list)?
        }
        FoodShape::StationStore => {
            let stations: Vec<_> = listing.food_store_list_map.as_ref()?.values().collect();
            let stores = *choose(dice, &stations)?;
            let store = choose(dice, stores)?;
            choose(dice, &store.food_list)?
        }
    };
    Some(FoodSelection::from(food))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedDice;
    use serde_json::json;

    fn listing() -> FoodListing {
        serde_json::from_value(json!({
            "trainFoodList": [
                {"tripId": "G1234", "foodList": [{"foodName": "Rice", "price": 8.0}, {"foodName": "Noodles", "price": 9.5}]},
                {"tripId": "G1234", "foodList": [{"foodName": "Never", "price": 1.0}]}
            ],
            "foodStoreListMap": {
                "nanjing": [{"storeName": "A", "foodList": [{"foodName": "Duck", "price": 30.0}]}],
                "shanghai": [
                    {"storeName": "B", "foodList": []},
                    {"storeName": "C", "foodList": [{"foodName": "Bun", "price": 3.0}, {"foodName": "Tea", "price": 2.0}]}
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_on_board_uses_first_train_list() {
        let food = select_food(&listing(), FoodShape::OnBoard, &mut ScriptedDice::new([1]));
        assert_eq!(food, Some(FoodSelection { food_name: "Noodles".into(), price: 9.5 }));
    }

    #[test]
    fn test_station_store_walks_station_store_item() {
        // station 1 = shanghai (ordered map), store 1 = C, item 1 = Tea
        let food = select_food(&listing(), FoodShape::StationStore, &mut ScriptedDice::new([1, 1, 1]));
        assert_eq!(food, Some(FoodSelection { food_name: "Tea".into(), price: 2.0 }));
    }

    #[test]
    fn test_empty_store_yields_nothing() {
        let food = select_food(&listing(), FoodShape::StationStore, &mut ScriptedDice::new([1, 0]));
        assert_eq!(food, None);
    }

    #[test]
    fn test_chosen_shape_absent_does_not_fall_back() {
        let only_train: FoodListing = serde_json::from_value(json!({
            "trainFoodList": [{"foodList": [{"foodName": "Rice", "price": 8.0}]}],
            "foodStoreListMap": null
        }))
        .unwrap();
        assert_eq!(select_food(&only_train, FoodShape::StationStore, &mut ScriptedDice::default()), None);

        let only_stores: FoodListing = serde_json::from_value(json!({
            "foodStoreListMap": {"x": [{"foodList": [{"foodName": "Bun", "price": 3.0}]}]}
        }))
        .unwrap();
        assert_eq!(select_food(&only_stores, FoodShape::OnBoard, &mut ScriptedDice::default()), None);
    }
}

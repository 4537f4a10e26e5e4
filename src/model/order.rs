use crate::model::{FoodSelection, TravelDate, TripCandidate};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Seat category code, `1..=8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SeatType(u8);

impl SeatType {
    pub const COUNT: usize = 8;

    /// Maps a zero-based index onto the category codes, clamping out-of-range input.
    pub fn from_index(index: usize) -> Self {
        Self((index.min(Self::COUNT - 1) + 1) as u8)
    }

    pub fn code(self) -> u8 {
        self.0
    }
}

/// The full reservation payload sent to the preserve service.
///
/// Built once per successful trip discovery and replayed verbatim for every
/// repeated submission. Fields the workflow never fills are sent as empty
/// strings, the same way the web UI sends them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub account_id: String,
    pub contacts_id: String,
    pub trip_id: String,
    pub seat_type: SeatType,
    pub date: TravelDate,
    pub from: String,
    pub to: String,
    pub assurance: String,
    pub food_type: String,
    pub station_name: String,
    pub store_name: String,
    pub food_name: String,
    #[serde(serialize_with = "blank_or_number")]
    pub food_price: Option<f64>,
    pub handle_date: String,
    pub consignee_name: String,
    pub consignee_phone: String,
    pub consignee_weight: String,
    pub is_within: String,
}

impl OrderRequest {
    pub fn new(
        account_id: impl Into<String>,
        contacts_id: impl Into<String>,
        trip: &TripCandidate,
        seat_type: SeatType,
        date: TravelDate,
        food: Option<&FoodSelection>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            contacts_id: contacts_id.into(),
            trip_id: trip.trip_id().to_string(),
            seat_type,
            date,
            from: trip.starting_station().to_string(),
            to: trip.terminal_station().to_string(),
            assurance: String::new(),
            food_type: String::new(),
            station_name: trip.starting_station().to_string(),
            store_name: String::new(),
            food_name: food.map(|f| f.food_name.clone()).unwrap_or_default(),
            food_price: food.map(|f| f.price),
            handle_date: String::new(),
            consignee_name: String::new(),
            consignee_phone: String::new(),
            consignee_weight: String::new(),
            is_within: String::new(),
        }
    }
}

/// Absent prices go over the wire as `""`, never as `null` or a missing key.
fn blank_or_number<S: Serializer>(price: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match price {
        Some(value) => serializer.serialize_f64(*value),
        None => serializer.serialize_str(""),
    }
}

/// An existing order, as much of it as the probes need.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    #[serde(default)]
    pub id: String,
    /// Passed back verbatim; the order service is not consistent about its encoding.
    pub travel_date: Value,
    pub train_number: String,
}

/// Filter half of an order query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OrderFilter {
    #[serde(rename_all = "camelCase")]
    TravelDate {
        enable_travel_date_query: bool,
        travel_date_start: TravelDate,
        travel_date_end: TravelDate,
    },
    #[serde(rename_all = "camelCase")]
    State { enable_state_query: bool, state: u8 },
    #[serde(rename_all = "camelCase")]
    BoughtDate {
        enable_bought_date_query: bool,
        bought_date_start: TravelDate,
        bought_date_end: TravelDate,
    },
}

/// Body of `POST /orderservice/order/query`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderQuery {
    pub login_id: String,
    #[serde(flatten)]
    pub filter: OrderFilter,
}

/// Body of the sold-ticket lookups.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketQuery {
    pub travel_date: Value,
    pub train_number: String,
}

/// Body of `POST /seatservice/seats/left_tickets`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeftTicketQuery {
    pub travel_date: TravelDate,
    pub train_number: String,
    pub start_station: String,
    pub dest_station: String,
    pub seat_type: SeatType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidate() -> TripCandidate {
        TripCandidate::try_new("G1234", "shanghai", "beijing").unwrap()
    }

    #[test]
    fn test_order_without_food_has_blank_food_fields() {
        let order = OrderRequest::new("acc", "c1", &candidate(), SeatType::from_index(1), TravelDate(9), None);
        let body = serde_json::to_value(&order).unwrap();

        assert_eq!(body["foodName"], json!(""));
        assert_eq!(body["foodPrice"], json!(""));
        assert_eq!(body["seatType"], json!(2));
        assert_eq!(body["from"], json!("shanghai"));
        assert_eq!(body["to"], json!("beijing"));
        assert_eq!(body["stationName"], json!("shanghai"));
        assert_eq!(body["contactsId"], json!("c1"));
        assert_eq!(body["isWithin"], json!(""));
    }

    #[test]
    fn test_order_with_food_carries_price_as_number() {
        let food = FoodSelection { food_name: "Rice".into(), price: 8.5 };
        let order = OrderRequest::new("acc", "c1", &candidate(), SeatType::from_index(0), TravelDate(9), Some(&food));
        let body = serde_json::to_value(&order).unwrap();

        assert_eq!(body["foodName"], json!("Rice"));
        assert_eq!(body["foodPrice"], json!(8.5));
    }

    #[test]
    fn test_seat_type_range() {
        assert_eq!(SeatType::from_index(0).code(), 1);
        assert_eq!(SeatType::from_index(7).code(), 8);
        assert_eq!(SeatType::from_index(40).code(), 8);
    }

    #[test]
    fn test_order_query_flattens_filter() {
        let query = OrderQuery {
            login_id: "u1".into(),
            filter: OrderFilter::State { enable_state_query: true, state: 1 },
        };
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({"loginId": "u1", "enableStateQuery": true, "state": 1})
        );
    }
}

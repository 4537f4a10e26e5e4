use serde_json::json;
use std::sync::Arc;
use ticket_loadgen::clients::{
    CONTACTS_PATH, FOODS_PATH, LOGIN_PATH, ORDERS_PATH, ORDER_QUERY_PATH, PRESERVE_PATH, ROUTES_PATH,
    ROUTE_PLAN_PATH, LEFT_TICKETS_PATH, SOLD_TICKETS_PATH, STATIONS_PATH, TRAIN_FOODS_PATH,
    FOOD_STORES_PATH, TRIPS_PATH,
};
use ticket_loadgen::probe::{ProbeError, ProbeKind};
use ticket_loadgen::random::{DiceSource, ScriptedDice};
use ticket_loadgen::runtime::{DriverError, LoadDriver};
use ticket_loadgen::transport::mock::MockTransport;
use ticket_loadgen::{Config, ConfigError};

fn config(users: usize) -> Config {
    let mut toml = String::from("gateway = \"127.0.0.1:8080\"\n");
    for i in 0..users {
        toml.push_str(&format!(
            "[[users]]\nusername = \"fdse_microservice{i}\"\npassword = \"111111\"\n"
        ));
    }
    Config::from_toml(&toml).unwrap()
}

fn login_ok(mock: &MockTransport, token: &str) {
    mock.expect_post(LOGIN_PATH)
        .return_ok(json!({"status": 1, "data": {"token": token, "userId": format!("acc-{token}")}}));
}

/// Every service a workflow touches, with a trip found on every search.
fn services(mock: &MockTransport) {
    mock.expect_get(ROUTES_PATH).always_ok(json!({"status": 1, "data": [
        {"id": "r1", "stations": ["shanghai", "suzhou", "nanjing"], "distances": [0, 100, 300]}
    ]}));
    mock.expect_post(format!("{ROUTE_PLAN_PATH}/*")).always_ok(json!({"status": 1, "data": [
        {"tripId": "G1234", "fromStationName": "shanghai", "toStationName": "suzhou"}
    ]}));
    mock.expect_get(CONTACTS_PATH).always_ok(json!({"status": 1, "data": [{"id": "c1"}]}));
    mock.expect_get(format!("{FOODS_PATH}/*")).always_ok(json!({"status": 0, "data": null}));
    mock.expect_post(PRESERVE_PATH).always_ok(json!({"status": 1, "msg": "Success."}));
}

/// Scout login, one login per user, then [`services`].
fn backend(users: usize) -> MockTransport {
    let mock = MockTransport::new();
    login_ok(&mock, "scout");
    for i in 0..users {
        login_ok(&mock, &format!("tok-{i}"));
    }
    services(&mock);
    mock
}

fn driver(mock: &MockTransport, config: &Config, dice: DiceSource) -> LoadDriver {
    LoadDriver::with_parts(
        Arc::new(mock.clone()),
        Arc::new(config.directory()),
        config,
        dice,
    )
}

fn submission_tokens(mock: &MockTransport) -> Vec<String> {
    mock.calls_to(PRESERVE_PATH)
        .into_iter()
        .map(|call| call.bearer.unwrap_or_default())
        .collect()
}

/// Five users, three rounds: fifteen submissions, round by round.
#[tokio::test]
async fn test_interleaved_users_submit_round_by_round() {
    let mock = backend(5);
    let mut driver = driver(&mock, &config(5), DiceSource::scripted([]));

    let report = driver.run_interleaved(5, 3).await.unwrap();

    assert_eq!(report.total_submissions(), 15);
    assert_eq!(report.failures(), 0);

    let expected: Vec<String> = (0..3)
        .flat_map(|_| (0..5).map(|i| format!("tok-{i}")))
        .collect();
    assert_eq!(submission_tokens(&mock), expected);

    // everyone is prepared before the first submission goes out
    let calls = mock.calls();
    let first_submit = calls.iter().position(|c| c.path == PRESERVE_PATH).unwrap();
    let last_contacts = calls.iter().rposition(|c| c.path == CONTACTS_PATH).unwrap();
    assert!(last_contacts < first_submit);
    mock.verify();
}

#[tokio::test]
async fn test_consecutive_users_finish_one_by_one() {
    let mock = backend(3);
    let mut driver = driver(&mock, &config(3), DiceSource::scripted([]));

    let report = driver.run_consecutive(3, 2).await.unwrap();

    assert_eq!(report.total_submissions(), 6);
    assert_eq!(
        submission_tokens(&mock),
        ["tok-0", "tok-0", "tok-1", "tok-1", "tok-2", "tok-2"]
    );
    mock.verify();
}

#[tokio::test]
async fn test_scouted_stations_are_shared() {
    let mock = backend(2);
    let mut driver = driver(&mock, &config(2), DiceSource::scripted([]));

    driver.run_consecutive(2, 1).await.unwrap();

    let plans = mock.calls_to(&format!("{ROUTE_PLAN_PATH}/cheapestRoute"));
    assert_eq!(plans.len(), 2);
    for call in plans {
        let body = call.body.unwrap();
        assert_eq!(body["formStationName"], "shanghai");
        assert_eq!(body["toStationName"], "suzhou");
    }

    let logins = mock.calls_to(LOGIN_PATH);
    assert_eq!(logins[0].body.as_ref().unwrap()["username"], "fdse_microservice0");
    assert_eq!(logins[0].body.as_ref().unwrap()["verificationCode"], "1234");
}

#[tokio::test]
async fn test_failed_user_does_not_stop_siblings() {
    let mock = MockTransport::new();
    login_ok(&mock, "scout");
    login_ok(&mock, "tok-0");
    login_ok(&mock, "tok-1");
    mock.expect_post(LOGIN_PATH)
        .return_ok(json!({"status": 0, "msg": "Incorrect username or password.", "data": null}));
    login_ok(&mock, "tok-3");
    login_ok(&mock, "tok-4");
    services(&mock);

    let mut driver = driver(&mock, &config(5), DiceSource::scripted([]));
    let report = driver.run_interleaved(5, 3).await.unwrap();

    assert_eq!(report.failures(), 1);
    assert_eq!(report.total_submissions(), 12);
    let failed = &report.outcomes[2];
    assert_eq!(failed.username, "fdse_microservice2");
    assert_eq!(failed.submissions, 0);
    assert!(failed.error.as_deref().unwrap().contains("Incorrect"));
    assert!(!submission_tokens(&mock).iter().any(|t| t == "tok-2"));
}

#[tokio::test]
async fn test_consecutive_failure_moves_on_to_next_user() {
    let mock = MockTransport::new();
    login_ok(&mock, "scout");
    login_ok(&mock, "tok-0");
    mock.expect_post(LOGIN_PATH)
        .return_ok(json!({"status": 0, "msg": "Incorrect username or password.", "data": null}));
    login_ok(&mock, "tok-2");
    services(&mock);

    let mut driver = driver(&mock, &config(3), DiceSource::scripted([]));
    let report = driver.run_consecutive(3, 2).await.unwrap();

    assert_eq!(report.failures(), 1);
    assert_eq!(report.total_submissions(), 4);
    assert_eq!(report.outcomes[1].username, "fdse_microservice1");
    assert_eq!(report.outcomes[1].submissions, 0);
    assert!(report.outcomes[1].error.as_deref().unwrap().contains("Incorrect"));
    assert!(report.outcomes[2].is_success());
    assert_eq!(submission_tokens(&mock), ["tok-0", "tok-0", "tok-2", "tok-2"]);
    mock.verify();
}

#[tokio::test]
async fn test_too_few_users_is_a_config_error() {
    let mock = MockTransport::new();
    let mut driver = driver(&mock, &config(3), DiceSource::scripted([]));

    let err = driver.run_consecutive(5, 1).await.unwrap_err();

    assert_eq!(
        err,
        DriverError::Config(ConfigError::NotEnoughUsers { requested: 5, available: 3 })
    );
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_sold_tickets_probe_samples_an_order() {
    let mock = MockTransport::new();
    login_ok(&mock, "tok-0");
    mock.expect_get(ORDERS_PATH).return_ok(json!({"status": 1, "data": [
        {"id": "o1", "travelDate": "2024-01-01", "trainNumber": "G1234"},
        {"id": "o2", "travelDate": 1704067200000_i64, "trainNumber": "D1345"}
    ]}));
    mock.expect_post(SOLD_TICKETS_PATH)
        .return_ok(json!({"status": 1, "data": {"travelDate": 1704067200000_i64, "trainNumber": "D1345", "seats": 3}}));

    let dice = DiceSource::scripted([ScriptedDice::new([1])]);
    let mut driver = driver(&mock, &config(1), dice);
    let data = driver.probe(ProbeKind::SoldTickets).await.unwrap();

    assert_eq!(data["seats"], 3);
    let body = mock.calls_to(SOLD_TICKETS_PATH)[0].body.clone().unwrap();
    assert_eq!(body, json!({"travelDate": 1704067200000_i64, "trainNumber": "D1345"}));
    mock.verify();
}

#[tokio::test]
async fn test_left_tickets_probe_queries_a_route_segment() {
    let mock = MockTransport::new();
    login_ok(&mock, "tok-0");
    mock.expect_get(TRIPS_PATH).return_ok(json!({"status": 1, "data": [
        {"tripId": {"type": "G", "number": "1234"}, "routeId": "r1", "trainTypeId": "GaoTieOne"}
    ]}));
    mock.expect_get(format!("{ROUTES_PATH}/r1")).return_ok(json!({"status": 1, "data":
        {"id": "r1", "stations": ["shanghai", "suzhou", "nanjing"]}
    }));
    mock.expect_post(LEFT_TICKETS_PATH).return_ok(json!({"status": 1, "data": 42}));

    // date +0, trip 0, stations (0, 2), seat index 4
    let dice = DiceSource::scripted([ScriptedDice::new([0, 0, 0, 1, 4])]);
    let mut driver = driver(&mock, &config(1), dice);
    let data = driver.probe(ProbeKind::LeftTickets).await.unwrap();

    assert_eq!(data, json!(42));
    let body = mock.calls_to(LEFT_TICKETS_PATH)[0].body.clone().unwrap();
    assert_eq!(body["trainNumber"], "G1234");
    assert_eq!(body["startStation"], "shanghai");
    assert_eq!(body["destStation"], "nanjing");
    assert_eq!(body["seatType"], 5);
    mock.verify();
}

#[tokio::test]
async fn test_query_orders_by_state() {
    let mock = MockTransport::new();
    login_ok(&mock, "tok-0");
    mock.expect_post(ORDER_QUERY_PATH)
        .return_ok(json!({"status": 1, "data": [{"id": "o1", "status": 0}]}));

    // filter 1 = state, coin 0 = state 0
    let dice = DiceSource::scripted([ScriptedDice::new([1, 0])]);
    let mut driver = driver(&mock, &config(1), dice);
    let data = driver.probe(ProbeKind::QueryOrders).await.unwrap();

    assert_eq!(data, json!([{"id": "o1", "status": 0}]));
    let call = &mock.calls_to(ORDER_QUERY_PATH)[0];
    assert_eq!(call.bearer.as_deref(), Some("tok-0"));
    assert_eq!(
        call.body,
        Some(json!({"loginId": "acc-tok-0", "enableStateQuery": true, "state": 0}))
    );
    mock.verify();
}

#[tokio::test]
async fn test_all_trips_counts_listing() {
    let mock = MockTransport::new();
    login_ok(&mock, "tok-0");
    mock.expect_get(TRIPS_PATH).return_ok(json!({"status": 1, "data": [
        {"tripId": {"type": "G", "number": "1234"}, "routeId": "r1", "trainTypeId": "GaoTieOne"},
        {"tripId": {"type": "D", "number": "1345"}, "routeId": "r2", "trainTypeId": "DongCheOne"}
    ]}));

    let mut driver = driver(&mock, &config(1), DiceSource::scripted([]));
    let data = driver.probe(ProbeKind::AllTrips).await.unwrap();

    assert_eq!(data, json!(2));
    mock.verify();
}

#[tokio::test]
async fn test_probe_without_orders_reports_it() {
    let mock = MockTransport::new();
    login_ok(&mock, "tok-0");
    mock.expect_get(ORDERS_PATH).return_ok(json!({"status": 1, "data": null}));

    let mut driver = driver(&mock, &config(1), DiceSource::scripted([]));
    let err = driver.probe(ProbeKind::AlreadySold).await.unwrap_err();

    assert_eq!(
        err,
        DriverError::Probe(ProbeError::NoOrders("fdse_microservice0".into()))
    );
}

#[tokio::test]
async fn test_listing_probes() {
    let mock = MockTransport::new();
    login_ok(&mock, "tok-0");
    login_ok(&mock, "tok-0");
    mock.expect_get(STATIONS_PATH).return_ok(json!({"status": 1, "data": [
        {"id": "shanghai", "name": "Shang Hai", "stayTime": 10},
        {"id": "nanjing", "name": "Nan Jing", "stayTime": 5}
    ]}));
    mock.expect_get(TRAIN_FOODS_PATH).return_ok(json!({"status": 1, "data": [{"tripId": "G1234"}]}));
    mock.expect_get(FOOD_STORES_PATH).return_ok(json!({"status": 1, "data": []}));

    let mut driver = driver(&mock, &config(1), DiceSource::scripted([]));
    let stations = driver.probe(ProbeKind::AllStations).await.unwrap();
    let food = driver.probe(ProbeKind::FoodMap).await.unwrap();

    assert_eq!(stations, json!(["Shang Hai", "Nan Jing"]));
    assert_eq!(food, json!({"trainFoods": [{"tripId": "G1234"}], "foodStores": []}));
    mock.verify();
}

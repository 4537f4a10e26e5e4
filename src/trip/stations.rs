use crate::clients::RouteClient;
use crate::model::StationPair;
use crate::random::{choose, Dice};
use crate::session::Session;
use crate::trip::TripError;
use tracing::{debug, info, instrument};

/// Picks a route at random, then two distinct positions on it.
///
/// The earlier position becomes `start`, so the pair is always traversable in
/// travel direction and both stations lie on the same route.
#[instrument(skip_all, fields(username = %session.username()))]
pub async fn pick_stations(
    session: &Session,
    routes: &RouteClient,
    dice: &mut dyn Dice,
) -> Result<StationPair, TripError> {
    let all = routes.all_routes(session.token()?).await?;
    let usable: Vec<_> = all.into_iter().filter(|r| r.stations.len() >= 2).collect();
    debug!(routes = usable.len(), "Usable routes");

    let route = choose(dice, &usable).ok_or(TripError::NoRoutes)?;
    let (first, second) = dice.pick_two(route.stations.len());
    let pair = StationPair::new(&route.stations[first], &route.stations[second]);

    if pair.start == pair.end {
        return Err(TripError::DegenerateRoute(route.id.clone()));
    }
    info!(route_id = %route.id, start = %pair.start, end = %pair.end, "Picked stations");
    Ok(pair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{Clients, LOGIN_PATH, ROUTES_PATH};
    use crate::directory::StaticDirectory;
    use crate::model::Credentials;
    use crate::random::{RngDice, ScriptedDice};
    use crate::transport::mock::MockTransport;
    use serde_json::{json, Value};
    use std::sync::Arc;

    async fn fixture(mock: &MockTransport, routes: Value) -> (RouteClient, Session) {
        mock.expect_post(LOGIN_PATH)
            .return_ok(json!({"data": {"token": "tok", "userId": "acc-1"}}));
        mock.expect_get(ROUTES_PATH).always_ok(json!({"status": 1, "data": routes}));
        let clients = Clients::new(
            Arc::new(mock.clone()),
            Arc::new(StaticDirectory::uniform("127.0.0.1:8080")),
        );
        let mut session = Session::new(Credentials::new("u", "p"), clients.auth.clone());
        session.login("1234").await.unwrap();
        (clients.routes, session)
    }

    #[tokio::test]
    async fn test_pairs_follow_route_order() {
        let routes = vec![
            vec!["shanghai", "suzhou", "nanjing"],
            vec!["beijing", "tianjin", "jinan", "xuzhou", "hefei"],
            vec!["lonely"],
            vec!["wuxi", "changzhou"],
        ];
        let listing: Vec<_> = routes
            .iter()
            .enumerate()
            .map(|(i, stations)| json!({"id": format!("r{i}"), "stations": stations}))
            .collect();
        let mock = MockTransport::new();
        let (client, session) = fixture(&mock, json!(listing)).await;

        let mut dice = RngDice::seeded(11);
        for _ in 0..200 {
            let pair = pick_stations(&session, &client, &mut dice).await.unwrap();
            assert_ne!(pair.start, pair.end);
            assert_ne!(pair.start, "lonely");

            let route = routes
                .iter()
                .find(|r| r.contains(&pair.start.as_str()))
                .unwrap();
            let start = route.iter().position(|s| *s == pair.start).unwrap();
            let end = route
                .iter()
                .position(|s| *s == pair.end)
                .expect("both stations on one route");
            assert!(start < end, "{} before {}", pair.start, pair.end);
        }
    }

    #[tokio::test]
    async fn test_only_short_routes_is_no_routes() {
        let mock = MockTransport::new();
        let (client, session) = fixture(
            &mock,
            json!([{"id": "r1", "stations": ["a"]}, {"id": "r2", "stations": []}]),
        )
        .await;

        let result = pick_stations(&session, &client, &mut ScriptedDice::default()).await;
        assert_eq!(result, Err(TripError::NoRoutes));
    }

    #[tokio::test]
    async fn test_repeated_station_is_degenerate() {
        let mock = MockTransport::new();
        let (client, session) =
            fixture(&mock, json!([{"id": "loop", "stations": ["shanghai", "shanghai"]}])).await;

        let result = pick_stations(&session, &client, &mut ScriptedDice::default()).await;
        assert_eq!(result, Err(TripError::DegenerateRoute("loop".into())));
    }
}

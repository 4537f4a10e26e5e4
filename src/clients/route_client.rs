use crate::clients::{ClientError, ServiceClient};
use crate::model::{Route, RoutePlanEntry, RoutePlanMode, RoutePlanQuery};
use tracing::{debug, instrument};

pub const ROUTES_PATH: &str = "/api/v1/routeservice/routes";
pub const ROUTE_PLAN_PATH: &str = "/api/v1/routeplanservice/routePlan";

/// Client for the route service and the route-planning service.
#[derive(Clone)]
pub struct RouteClient {
    routes: ServiceClient,
    plans: ServiceClient,
}

impl RouteClient {
    pub fn new(routes: ServiceClient, plans: ServiceClient) -> Self {
        Self { routes, plans }
    }

    #[instrument(skip_all)]
    pub async fn all_routes(&self, token: &str) -> Result<Vec<Route>, ClientError> {
        debug!("Sending request");
        self.routes.get_list(ROUTES_PATH, token).await
    }

    #[instrument(skip(self, token))]
    pub async fn route(&self, route_id: &str, token: &str) -> Result<Route, ClientError> {
        debug!("Sending request");
        let path = format!("{ROUTES_PATH}/{route_id}");
        self.routes.get_data(&path, token).await
    }

    /// Planned trips between two stations under the given criterion.
    #[instrument(skip(self, query, token))]
    pub async fn plan(
        &self,
        mode: RoutePlanMode,
        query: &RoutePlanQuery,
        token: &str,
    ) -> Result<Vec<RoutePlanEntry>, ClientError> {
        debug!(?query, "Sending request");
        let path = format!("{ROUTE_PLAN_PATH}/{}", mode.path_segment());
        self.plans.post_list(&path, query, token).await
    }
}

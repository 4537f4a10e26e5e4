use crate::clients::{ClientError, Envelope, ServiceClient};
use crate::model::LoginRequest;
use tracing::{debug, instrument};

pub const LOGIN_PATH: &str = "/api/v1/users/login";

/// Client for the login endpoint. The only unauthenticated call.
#[derive(Clone)]
pub struct AuthClient {
    inner: ServiceClient,
}

impl AuthClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// Returns the raw envelope; [`Session`](crate::session::Session) decides
    /// whether it is a success.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: &LoginRequest) -> Result<Envelope, ClientError> {
        debug!("Sending request");
        self.inner.post(LOGIN_PATH, request, None).await
    }
}

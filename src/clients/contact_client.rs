use crate::clients::{ClientError, ServiceClient};
use crate::model::Contact;
use tracing::{debug, instrument};

pub const CONTACTS_PATH: &str = "/api/v1/contactservice/contacts";

/// Client for the contacts service.
#[derive(Clone)]
pub struct ContactClient {
    inner: ServiceClient,
}

impl ContactClient {
    pub fn new(inner: ServiceClient) -> Self {
        Self { inner }
    }

    #[instrument(skip_all)]
    pub async fn all_contacts(&self, token: &str) -> Result<Vec<Contact>, ClientError> {
        debug!("Sending request");
        self.inner.get_list(CONTACTS_PATH, token).await
    }
}

//! # Generic Service Client
//!
//! [`ServiceClient`] knows one logical service. It resolves the address through
//! the [`ServiceDirectory`], sends through the [`Transport`], and unwraps the
//! `{status, msg, data}` envelope every backend answers with.
//!
//! The typed clients in this module wrap it and expose one method per endpoint.

use crate::clients::ClientError;
use crate::directory::ServiceDirectory;
use crate::transport::{ApiRequest, Transport};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// The response wrapper shared by all backends.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// A client bound to one logical service.
#[derive(Clone)]
pub struct ServiceClient {
    service: &'static str,
    transport: Arc<dyn Transport>,
    directory: Arc<dyn ServiceDirectory>,
}

impl ServiceClient {
    pub fn new(
        service: &'static str,
        transport: Arc<dyn Transport>,
        directory: Arc<dyn ServiceDirectory>,
    ) -> Self {
        Self {
            service,
            transport,
            directory,
        }
    }

    /// Sends one request and returns the decoded envelope.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> Result<Envelope, ClientError> {
        let address = self.directory.resolve(self.service)?;
        let mut request = ApiRequest::new(method, address, path);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        if let Some(token) = bearer {
            request = request.with_bearer(token);
        }

        let raw = self.transport.send(request).await?;
        debug!(service = self.service, path, response = %raw, "Received");
        serde_json::from_value(raw).map_err(|e| self.decode_error(path, e))
    }

    /// `GET` and decode `data`; a missing or `null` `data` is an error.
    pub async fn get_data<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: &str,
    ) -> Result<T, ClientError> {
        let envelope = self.call(Method::GET, path, None, Some(bearer)).await?;
        self.require_data(path, envelope)
    }

    /// `GET` a collection; `data: null` reads as an empty list.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: &str,
    ) -> Result<Vec<T>, ClientError> {
        let envelope = self.call(Method::GET, path, None, Some(bearer)).await?;
        self.list_data(path, envelope)
    }

    /// `GET` and decode `data` if present.
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: &str,
    ) -> Result<Option<T>, ClientError> {
        let envelope = self.call(Method::GET, path, None, Some(bearer)).await?;
        match envelope.data {
            None | Some(Value::Null) => Ok(None),
            Some(data) => serde_json::from_value(data)
                .map(Some)
                .map_err(|e| self.decode_error(path, e)),
        }
    }

    /// `POST` a JSON body and return the raw envelope.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<Envelope, ClientError> {
        let body = serde_json::to_value(body).map_err(|e| ClientError::Encode(e.to_string()))?;
        self.call(Method::POST, path, Some(body), bearer).await
    }

    /// `POST` a search; `data: null` reads as an empty list.
    pub async fn post_list<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        bearer: &str,
    ) -> Result<Vec<T>, ClientError> {
        let envelope = self.post(path, body, Some(bearer)).await?;
        self.list_data(path, envelope)
    }

    fn require_data<T: DeserializeOwned>(
        &self,
        path: &str,
        envelope: Envelope,
    ) -> Result<T, ClientError> {
        match envelope.data {
            None | Some(Value::Null) => Err(ClientError::MissingData {
                service: self.service.to_string(),
                path: path.to_string(),
                msg: envelope.msg.unwrap_or_default(),
            }),
            Some(data) => serde_json::from_value(data).map_err(|e| self.decode_error(path, e)),
        }
    }

    fn list_data<T: DeserializeOwned>(
        &self,
        path: &str,
        envelope: Envelope,
    ) -> Result<Vec<T>, ClientError> {
        match envelope.data {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(data) => serde_json::from_value(data).map_err(|e| self.decode_error(path, e)),
        }
    }

    fn decode_error(&self, path: &str, e: serde_json::Error) -> ClientError {
        ClientError::Decode {
            service: self.service.to_string(),
            path: path.to_string(),
            message: e.to_string(),
        }
    }
}

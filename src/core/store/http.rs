//! HTTP secret store adapter.
//!
//! Thin blocking REST client for the control plane's secrets API. One
//! request per trait call, no retries; transport failures surface as
//! `StoreError::Unavailable` and the engine decides what to do with them.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::SecretStore;
use crate::core::secret::Secret;
use crate::error::StoreError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking REST adapter scoped to one namespace.
pub struct HttpStore {
    client: Client,
    base_url: String,
    token: Option<String>,
    namespace: String,
}

/// Wire shape of a list response.
#[derive(Deserialize)]
struct SecretList {
    #[serde(default)]
    items: Vec<Secret>,
}

impl HttpStore {
    /// Build a client for `server`, authenticating with `token` when given.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` when the TLS backend fails to
    /// initialize.
    pub fn new(
        server: &str,
        token: Option<&str>,
        namespace: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self {
            client,
            base_url: server.trim_end_matches('/').to_string(),
            token: token.map(str::to_string),
            namespace: namespace.to_string(),
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/v1/namespaces/{}/secrets", self.base_url, self.namespace)
    }

    fn object_url(&self, name: &str) -> String {
        format!("{}/{}", self.collection_url(), name)
    }

    /// Send a request with bearer auth and map transport failures.
    fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        request
            .send()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    /// Map non-success statuses onto the store error taxonomy.
    fn check(&self, response: Response, name: &str) -> Result<Response, StoreError> {
        let status = response.status();
        debug!(%status, name, namespace = %self.namespace, "store response");

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(StoreError::NotFound(name.to_string())),
            StatusCode::CONFLICT => Err(StoreError::Conflict(name.to_string())),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(StoreError::Rejected(body))
            }
            _ => Err(StoreError::Unavailable(format!("{status}: {body}"))),
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        response
            .json()
            .map_err(|e| StoreError::Unavailable(format!("invalid store response: {e}")))
    }
}

impl SecretStore for HttpStore {
    fn create(&self, secret: &Secret) -> Result<Secret, StoreError> {
        let response = self.send(self.client.post(self.collection_url()).json(secret))?;
        Self::parse(self.check(response, &secret.name)?)
    }

    fn get(&self, name: &str) -> Result<Secret, StoreError> {
        let response = self.send(self.client.get(self.object_url(name)))?;
        Self::parse(self.check(response, name)?)
    }

    fn list(&self, name_filter: Option<&str>) -> Result<Vec<Secret>, StoreError> {
        let mut request = self.client.get(self.collection_url());
        if let Some(name) = name_filter {
            request = request.query(&[("name", name)]);
        }
        let response = self.send(request)?;
        let list: SecretList = Self::parse(self.check(response, name_filter.unwrap_or(""))?)?;
        Ok(list.items)
    }

    fn delete(&self, name: &str) -> Result<(), StoreError> {
        let response = self.send(self.client.delete(self.object_url(name)))?;
        self.check(response, name).map(|_| ())
    }

    fn patch(&self, name: &str, merge: &Secret) -> Result<Secret, StoreError> {
        let response = self.send(self.client.patch(self.object_url(name)).json(merge))?;
        Self::parse(self.check(response, name)?)
    }
}

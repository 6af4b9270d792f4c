//! Production [`Backend`] over the Firebase REST APIs.

use time::OffsetDateTime;
use webarchive::net::types::Article;

use super::backend::{Backend, BackendError, BackendSession, IdpCredential, RefreshedTokens};
use super::{firestore, identity, storage};
use crate::config::FirebaseConfig;

pub struct FirebaseClient {
    http: reqwest::Client,
    config: FirebaseConfig,
}

impl FirebaseClient {
    #[must_use]
    pub fn new(http: reqwest::Client, config: FirebaseConfig) -> Self {
        Self { http, config }
    }

    #[must_use]
    pub fn project_id(&self) -> &str {
        &self.config.project_id
    }

    /// Send a request and return the body of a successful response.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        on_error: fn(u16, &str) -> BackendError,
    ) -> Result<String, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(on_error(status, &text));
        }
        Ok(text)
    }
}

#[async_trait::async_trait]
impl Backend for FirebaseClient {
    async fn sign_in_with_idp(
        &self,
        credential: &IdpCredential,
        request_uri: &str,
    ) -> Result<BackendSession, BackendError> {
        let url = format!("{}/accounts:signInWithIdp", self.config.endpoints.identity);
        let request = self
            .http
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&identity::sign_in_body(credential, request_uri));
        let body = self.send(request, identity::identity_error).await?;
        identity::decode_sign_in(&body, OffsetDateTime::now_utc())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<RefreshedTokens, BackendError> {
        let url = format!("{}/token", self.config.endpoints.securetoken);
        let request = self
            .http
            .post(url)
            .query(&[("key", self.config.api_key.as_str())])
            .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)]);
        let body = self.send(request, identity::identity_error).await?;
        identity::decode_refresh(&body, OffsetDateTime::now_utc())
    }

    async fn query_articles(&self, id_token: &str) -> Result<Vec<Article>, BackendError> {
        let url = firestore::run_query_url(&self.config.endpoints.firestore, &self.config.project_id);
        let request = self
            .http
            .post(url)
            .bearer_auth(id_token)
            .json(&firestore::run_query_body(&self.config.articles_collection));
        let body = self.send(request, BackendError::from_status).await?;
        firestore::decode_articles(&body)
    }

    async fn download_url(&self, id_token: &str, path: &str) -> Result<String, BackendError> {
        let object_url = storage::object_url(&self.config.endpoints.storage, &self.config.storage_bucket, path)?;
        let request = self
            .http
            .get(object_url.clone())
            .header(reqwest::header::AUTHORIZATION, format!("Firebase {id_token}"));
        let body = self.send(request, BackendError::from_status).await?;
        let token = storage::first_download_token(&body)?;
        Ok(storage::download_url(object_url, &token))
    }
}

//! HTTP client for the Socialinsider JSON-RPC endpoint.
//!
//! [`UpstreamClient::relay`] is the single outbound path: it attaches the
//! bearer credential, POSTs the payload and returns the upstream JSON
//! verbatim. The typed helpers build an RPC request for one profile, relay it,
//! and decode the `resp` envelope.

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use socialproxy_core::{DateRange, Profile};

use crate::error::UpstreamError;
use crate::types::{PostsPage, ProfileDataMap, RpcEnvelope, RpcMethod, RpcRequest};

const DEFAULT_ENDPOINT: &str = "https://app.socialinsider.io/api";

/// Client for the Socialinsider API.
///
/// Use [`UpstreamClient::new`] for production or
/// [`UpstreamClient::with_endpoint`] to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl UpstreamClient {
    /// Creates a client pointed at the production Socialinsider endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str) -> Result<Self, UpstreamError> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT)
    }

    /// Creates a client that relays to `endpoint`.
    ///
    /// No request timeout is configured; calls wait as long as the upstream does.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`UpstreamError::InvalidEndpoint`] if
    /// `endpoint` is not a valid URL.
    pub fn with_endpoint(api_key: &str, endpoint: &str) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .user_agent("socialproxy/0.1 (analytics-relay)")
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| UpstreamError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            endpoint,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Forwards `payload` to the upstream and returns its JSON body unchanged.
    ///
    /// # Errors
    ///
    /// - [`UpstreamError::Http`] on network failure or a non-2xx status.
    /// - [`UpstreamError::Deserialize`] if the body is not valid JSON.
    pub async fn relay<T>(&self, payload: &T) -> Result<Value, UpstreamError>
    where
        T: Serialize + ?Sized,
    {
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await?;
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| UpstreamError::Deserialize {
            context: self.endpoint.to_string(),
            source: e,
        })
    }

    /// Fetches the first page of posts for `profile`.
    ///
    /// # Errors
    ///
    /// Any relay error, or [`UpstreamError::Deserialize`] if `resp` lacks a
    /// numeric `total` or a `posts` array.
    pub async fn get_posts(
        &self,
        profile: &Profile,
        range: &DateRange,
    ) -> Result<PostsPage, UpstreamError> {
        let request = RpcRequest::for_profile(RpcMethod::GetPosts, profile, range);
        let envelope: RpcEnvelope<PostsPage> = self.call(&request, profile).await?;
        Ok(envelope.resp)
    }

    /// Fetches the day-keyed statistics for `profile`.
    ///
    /// Returns `None` when the upstream `resp` has no entry for the profile id.
    ///
    /// # Errors
    ///
    /// Any relay error, or [`UpstreamError::Deserialize`] if `resp` is missing
    /// or not an object.
    pub async fn get_profile_data(
        &self,
        profile: &Profile,
        range: &DateRange,
    ) -> Result<Option<Value>, UpstreamError> {
        let request = RpcRequest::for_profile(RpcMethod::GetProfileData, profile, range);
        let envelope: RpcEnvelope<ProfileDataMap> = self.call(&request, profile).await?;
        let mut resp = envelope.resp;
        Ok(resp.remove(&profile.id))
    }

    async fn call<R>(&self, request: &RpcRequest<'_>, profile: &Profile) -> Result<R, UpstreamError>
    where
        R: DeserializeOwned,
    {
        tracing::debug!(
            method = request.method.as_str(),
            profile_id = %profile.id,
            profile_type = %profile.profile_type,
            "relaying rpc request"
        );
        let body = self.relay(request).await?;
        serde_json::from_value(body).map_err(|e| UpstreamError::Deserialize {
            context: format!("{}(id={})", request.method.as_str(), profile.id),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

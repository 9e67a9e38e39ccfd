//! Reqwest-backed LocalPay API client.
//!
//! This adapter owns transport details only: URL and query building, bearer
//! authentication, timeout and HTTP error mapping, and JSON decoding into
//! domain records.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::dto::{
    BalanceBodyDto, ErrorBodyDto, PaymentsResponseDto, TokenResponseDto, UsersResponseDto,
};
use crate::domain::ports::{
    ApiError, AuthApi, PaymentsApi, ReportsApi, TokenGrant, UserList, UsersApi,
};
use crate::domain::{
    BalanceAdjustment, BalanceRange, CredentialStore, LoginCredentials, NewPayment, Payment,
    PaymentFilters, PaymentUpdate, ProfileFilters, Registration, ReportRequest, UserId,
    UserRecord, UserUpdate,
};

/// Client for one LocalPay API deployment.
///
/// Authenticated calls read the bearer token from the shared
/// [`CredentialStore`] at send time, so a new login takes effect on the next
/// request.
pub struct LocalPayHttpClient {
    client: Client,
    base: Url,
    store: Arc<CredentialStore>,
}

impl LocalPayHttpClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base: Url,
        timeout: Duration,
        store: Arc<CredentialStore>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base,
            store,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        endpoint_url(&self.base, path)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
        let request = match self.store.bearer() {
            Some(token) => request.bearer_auth(token.as_str()),
            None => request,
        };
        execute(request).await
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.send(request).await?;
        decode(&body)
    }

    async fn fetch_page<F>(
        &self,
        path: &str,
        request: &PageRequest<F>,
        filters: Vec<(&'static str, String)>,
    ) -> Result<Page<Payment>, ApiError> {
        let mut url = self.endpoint(path)?;
        request.append_query(&mut url);
        url.query_pairs_mut().extend_pairs(filters);
        let dto: PaymentsResponseDto = self.fetch_json(self.client.get(url)).await?;
        Ok(dto.into_page())
    }
}

#[async_trait]
impl AuthApi for LocalPayHttpClient {
    async fn issue_token(&self, credentials: &LoginCredentials) -> Result<TokenGrant, ApiError> {
        let url = self.endpoint("/token")?;
        let form = [
            ("username", credentials.login()),
            ("password", credentials.password()),
        ];
        let body = execute(self.client.post(url).form(&form)).await?;
        let dto: TokenResponseDto = decode(&body)?;
        Ok(TokenGrant::new(dto.access_token))
    }
}

#[async_trait]
impl UsersApi for LocalPayHttpClient {
    async fn list_users(
        &self,
        balance: &BalanceRange,
        per_page: usize,
    ) -> Result<UserList, ApiError> {
        let mut url = self.endpoint("/users")?;
        url.query_pairs_mut()
            .append_pair("per_page", &per_page.to_string())
            .extend_pairs(balance.query_pairs());
        let dto: UsersResponseDto = self.fetch_json(self.client.get(url)).await?;
        Ok(dto.into_domain())
    }

    async fn user_by_id(&self, id: UserId) -> Result<UserRecord, ApiError> {
        let url = self.endpoint(&format!("/user_by_id/{id}"))?;
        self.fetch_json(self.client.get(url)).await
    }

    async fn update_user(&self, id: UserId, update: &UserUpdate) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/update_user/{id}"))?;
        self.send(self.client.patch(url).json(update)).await?;
        Ok(())
    }

    async fn adjust_balance(
        &self,
        id: UserId,
        adjustment: BalanceAdjustment,
    ) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/update_user/{id}"))?;
        let body = BalanceBodyDto::from(adjustment);
        self.send(self.client.patch(url).json(&body)).await?;
        Ok(())
    }

    async fn create_user(&self, registration: &Registration) -> Result<(), ApiError> {
        let url = self.endpoint("/create_user")?;
        self.send(self.client.post(url).json(registration)).await?;
        Ok(())
    }
}

#[async_trait]
impl PaymentsApi for LocalPayHttpClient {
    async fn list_payments(
        &self,
        request: &PageRequest<PaymentFilters>,
    ) -> Result<Page<Payment>, ApiError> {
        self.fetch_page("/payments", request, request.filters.query_pairs())
            .await
    }

    async fn payments_by_user(
        &self,
        request: &PageRequest<ProfileFilters>,
    ) -> Result<Page<Payment>, ApiError> {
        self.fetch_page("/payments_by_user", request, request.filters.query_pairs())
            .await
    }

    async fn update_payment(&self, id: i64, update: &PaymentUpdate) -> Result<(), ApiError> {
        let url = self.endpoint(&format!("/update_payment/{id}"))?;
        self.send(self.client.patch(url).json(update)).await?;
        Ok(())
    }

    async fn create_payment(&self, payment: &NewPayment) -> Result<(), ApiError> {
        let mut url = self.endpoint("/create_payment")?;
        url.query_pairs_mut()
            .append_pair("ls_abon", payment.ls_abon())
            .append_pair("money", &payment.money().to_string());
        self.send(self.client.post(url)).await?;
        Ok(())
    }
}

#[async_trait]
impl ReportsApi for LocalPayHttpClient {
    async fn download(&self, request: &ReportRequest) -> Result<Vec<u8>, ApiError> {
        let mut url = self.endpoint(request.path())?;
        let pairs = request.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        self.send(self.client.get(url)).await
    }
}

/// Join `path` onto `base`, keeping any path prefix the base already has.
///
/// A trailing `/` in `path` is preserved.
fn endpoint_url(base: &Url, path: &str) -> Result<Url, ApiError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| ApiError::transport("base URL cannot carry a path"))?
        .pop_if_empty()
        .extend(path.trim_start_matches('/').split('/'));
    Ok(url)
}

async fn execute(request: RequestBuilder) -> Result<Vec<u8>, ApiError> {
    let response = request.send().await.map_err(map_transport_error)?;
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    debug!(status = status.as_u16(), bytes = body.len(), "API response");
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    Ok(body.to_vec())
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|error| ApiError::decode(format!("invalid LocalPay JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::timeout(error.to_string())
    } else {
        ApiError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = error_message(status, body);
    match status {
        StatusCode::UNAUTHORIZED => ApiError::unauthorized(message),
        StatusCode::FORBIDDEN => ApiError::forbidden(message),
        StatusCode::NOT_FOUND => ApiError::not_found(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ApiError::timeout(message),
        _ if status.is_client_error() => ApiError::rejected(status.as_u16(), message),
        _ => ApiError::server(status.as_u16(), message),
    }
}

/// `detail` of the error body, else a compact preview, else the status.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    if let Ok(dto) = serde_json::from_slice::<ErrorBodyDto>(body) {
        return dto.into_message();
    }
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        preview
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

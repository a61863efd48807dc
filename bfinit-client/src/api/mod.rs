//! Typed API surface
//!
//! [`BfinitClient`] wraps one transport for the order/payment/catalog API
//! and one for the auth service, both reading the same [`Session`].
//! [`OrderApi`] is the slice of it the order desk depends on.

mod auth;
mod catalog;
mod orders;
mod payments;

pub use catalog::CategoryImage;

use async_trait::async_trait;
use shared::ApiEnvelope;
use shared::models::{ManualOrder, ManualStatus, OnlineOrder, PaymentOrder};

use crate::http::NetworkHttpClient;
use crate::{ClientConfig, ClientError, ClientResult, Session, SessionStorage};

/// Order and payment operations used by the listing controllers
#[async_trait]
pub trait OrderApi: Send + Sync {
    /// GET `/orders/order/index`
    async fn online_orders(&self) -> ClientResult<Vec<OnlineOrder>>;
    /// GET `/orders/order/retail/package/index`
    async fn manual_orders(&self) -> ClientResult<Vec<ManualOrder>>;
    /// POST `/orders/order/retail/package/status/?id=<id>`
    async fn update_manual_status(&self, id: &str, status: ManualStatus) -> ClientResult<()>;
    /// GET `/orders/order/confirm/paid/<id>`
    async fn approve_order(&self, id: &str) -> ClientResult<()>;
    /// GET `/payments/bitss/all`
    async fn bitss_payments(&self) -> ClientResult<Vec<PaymentOrder>>;
    /// GET `/payments/bitss/payment/approved/<id>`
    async fn confirm_payment(&self, id: &str) -> ClientResult<()>;
}

/// Client for the BFINIT API
#[derive(Debug, Clone)]
pub struct BfinitClient {
    api: NetworkHttpClient,
    auth: NetworkHttpClient,
    session: Session,
}

impl BfinitClient {
    /// Build a client; the session is file-backed when `session_dir` is set.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let session = match &config.session_dir {
            Some(dir) => Session::persistent(SessionStorage::new(dir)),
            None => Session::in_memory(),
        };
        Self::with_session(config, session)
    }

    /// Build a client around an existing session
    pub fn with_session(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url is required".into()));
        }
        let api = NetworkHttpClient::new(&config.base_url, config.timeout, session.clone())?;
        let auth = NetworkHttpClient::new(&config.auth_url, config.timeout, session.clone())?;
        Ok(Self { api, auth, session })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }
}

/// Unwrap a collection envelope; a successful envelope without data is empty.
pub(crate) fn into_data<T: Default>(envelope: ApiEnvelope<T>) -> ClientResult<T> {
    if !envelope.success {
        return Err(ClientError::Rejected(envelope.failure_message()));
    }
    Ok(envelope.data.unwrap_or_default())
}

/// Unwrap an envelope whose data is required
pub(crate) fn require_data<T>(envelope: ApiEnvelope<T>, what: &str) -> ClientResult<T> {
    if !envelope.success {
        return Err(ClientError::Rejected(envelope.failure_message()));
    }
    envelope
        .data
        .ok_or_else(|| ClientError::InvalidResponse(format!("missing {} data", what)))
}

/// Check an acknowledgement envelope
pub(crate) fn ensure_success<T>(envelope: &ApiEnvelope<T>) -> ClientResult<()> {
    if envelope.success {
        Ok(())
    } else {
        Err(ClientError::Rejected(envelope.failure_message()))
    }
}

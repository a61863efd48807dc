//! Omada / legacy payment listing

use shared::ApiEnvelope;
use shared::models::PaymentOrder;

use super::{BfinitClient, into_data};
use crate::ClientResult;
use crate::http::HttpClient;

impl BfinitClient {
    /// GET `/payments/all` (no authentication)
    pub async fn legacy_payments(&self) -> ClientResult<Vec<PaymentOrder>> {
        let env: ApiEnvelope<Vec<PaymentOrder>> = self.api.get_public("payments/all").await?;
        into_data(env)
    }
}

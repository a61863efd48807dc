//! Order endpoints

use async_trait::async_trait;
use serde_json::Value;
use shared::models::{ManualOrder, ManualStatus, ManualStatusUpdate, OnlineOrder, PaymentOrder};
use shared::response::Ack;
use shared::ApiEnvelope;

use super::{BfinitClient, OrderApi, ensure_success, into_data, require_data};
use crate::http::{HttpClient, encoded_path};
use crate::{ClientError, ClientResult};

impl BfinitClient {
    /// GET `/orders/order/show/<id>`
    pub async fn order_details(&self, id: &str) -> ClientResult<OnlineOrder> {
        let env: ApiEnvelope<OnlineOrder> =
            self.api.get(&encoded_path(&["orders", "order", "show", id], &[])?).await?;
        require_data(env, "order")
    }
}

#[async_trait]
impl OrderApi for BfinitClient {
    async fn online_orders(&self) -> ClientResult<Vec<OnlineOrder>> {
        let env: ApiEnvelope<Vec<OnlineOrder>> = self.api.get("orders/order/index").await?;
        into_data(env)
    }

    async fn manual_orders(&self) -> ClientResult<Vec<ManualOrder>> {
        let env: ApiEnvelope<Vec<ManualOrder>> =
            self.api.get("orders/order/retail/package/index").await?;
        into_data(env)
    }

    async fn update_manual_status(&self, id: &str, status: ManualStatus) -> ClientResult<()> {
        let body = ManualStatusUpdate {
            order_status: status,
        };
        let ack: Ack = self
            .api
            .post(
                &encoded_path(
                    &["orders", "order", "retail", "package", "status", ""],
                    &[("id", id)],
                )?,
                &body,
            )
            .await?;
        ensure_success(&ack)?;
        tracing::info!(order_id = %id, %status, "Manual order status updated");
        Ok(())
    }

    /// The approve endpoint answers with an arbitrary object; only an
    /// explicit `success: false` counts as a refusal.
    async fn approve_order(&self, id: &str) -> ClientResult<()> {
        let resp: Value = self
            .api
            .get(&encoded_path(&["orders", "order", "confirm", "paid", id], &[])?)
            .await?;
        if resp.get("success").and_then(Value::as_bool) == Some(false) {
            let message = resp
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("order approval refused");
            return Err(ClientError::Rejected(message.to_string()));
        }
        tracing::info!(order_id = %id, "Order approved");
        Ok(())
    }

    async fn bitss_payments(&self) -> ClientResult<Vec<PaymentOrder>> {
        let env: ApiEnvelope<Vec<PaymentOrder>> = self.api.get("payments/bitss/all").await?;
        into_data(env)
    }

    async fn confirm_payment(&self, id: &str) -> ClientResult<()> {
        let ack: Ack = self
            .api
            .get(&encoded_path(&["payments", "bitss", "payment", "approved", id], &[])?)
            .await?;
        ensure_success(&ack)?;
        tracing::info!(payment_id = %id, "Payment confirmed");
        Ok(())
    }
}

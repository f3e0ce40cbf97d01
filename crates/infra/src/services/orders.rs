use std::sync::Arc;

use serde_json::json;

use billing_orders::{Order, PublicOrderStatus};

use crate::config::Lookups;
use crate::error::ServiceResult;
use crate::external::MessageBroker;

/// Publishes the merchant-facing status of orders.
#[derive(Debug)]
pub struct OrderStatusNotifier<B> {
    broker: B,
    lookups: Arc<Lookups>,
    topic: String,
}

impl<B: MessageBroker> OrderStatusNotifier<B> {
    pub fn new(broker: B, lookups: Arc<Lookups>, topic: impl Into<String>) -> Self {
        Self {
            broker,
            lookups,
            topic: topic.into(),
        }
    }

    /// Refresh `order.status` and publish the public view of the order.
    ///
    /// Orders in an intermediate private status are rejected before anything
    /// is published. `order.status` changes only after a successful publish.
    pub async fn notify(&self, order: &mut Order) -> ServiceResult<PublicOrderStatus> {
        let public = order.public_status(&self.lookups.order_statuses)?;

        let decline = order.is_declined().then(|| {
            json!({
                "code": order.public_decline_code(&self.lookups.decline_codes),
                "reason": order.decline_reason(),
            })
        });

        let payload = json!({
            "id": order.uuid,
            "status": public,
            "is_final": public.is_final(),
            "merchant_id": order.merchant_id(),
            "amount": order.total_payment_amount,
            "currency": order.currency,
            "decline": decline,
        });

        tracing::info!(order_id = %order.id, status = %public, "publishing order status");
        self.broker.publish(&self.topic, payload).await?;
        order.publish_status(&self.lookups.order_statuses)?;
        Ok(public)
    }
}

//! services/api/src/adapters/payment.rs
//!
//! Stand-in for the payment processor. It implements the `PaymentService` port
//! and never charges anything.

use async_trait::async_trait;
use lexinary_core::domain::Subscription;
use lexinary_core::mock;
use lexinary_core::ports::{PaymentService, PortResult};
use tracing::info;

#[derive(Clone, Debug, Default)]
pub struct MockPaymentAdapter;

#[async_trait]
impl PaymentService for MockPaymentAdapter {
    async fn subscribe(&self, user_id: &str) -> PortResult<Subscription> {
        let subscription = mock::subscribe(user_id);
        info!(%user_id, plan = %subscription.plan, "Mock subscription activated");
        Ok(subscription)
    }
}

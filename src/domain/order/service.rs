//! The order-service capability the draft controller submits through.

use super::{OrderRecord, SubmissionPayload};
use crate::error::SubmissionError;
use async_trait::async_trait;
use std::sync::Arc;

/// Accepts assembled order requests and persists them somewhere else.
#[async_trait]
pub trait OrderService: Send + Sync {
    async fn submit(&self, order: &SubmissionPayload) -> Result<OrderRecord, SubmissionError>;

    /// True while the service has its own request outstanding. The
    /// controller refuses to submit while this is set.
    fn is_loading(&self) -> bool {
        false
    }
}

#[async_trait]
impl<T: OrderService + ?Sized> OrderService for Arc<T> {
    async fn submit(&self, order: &SubmissionPayload) -> Result<OrderRecord, SubmissionError> {
        (**self).submit(order).await
    }

    fn is_loading(&self) -> bool {
        (**self).is_loading()
    }
}

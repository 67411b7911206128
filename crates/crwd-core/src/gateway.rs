//! Persistence gateway for donation boxes
//!
//! Saving is the only point where session state leaves the process. The
//! session hands a finished [`UpdateDonationBoxRequest`] to a gateway and only
//! looks at whether it succeeded.

use async_trait::async_trait;
use chrono::Utc;
use crwd_calculator::round2;
use crwd_types::{SaveReceipt, UpdateDonationBoxRequest};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The backend refused the request (4xx)
    #[error("Save rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The backend could not be reached or failed (5xx, timeouts)
    #[error("Donation box service unavailable: {message}")]
    Unavailable { message: String },
}

impl GatewayError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Unavailable { .. })
    }
}

/// External "update donation box" operation.
#[async_trait]
pub trait DonationBoxGateway: Send + Sync {
    async fn update_donation_box(
        &self,
        request: &UpdateDonationBoxRequest,
    ) -> Result<SaveReceipt, GatewayError>;
}

/// A gateway that keeps accepted requests in memory.
///
/// Requests whose percentages do not add up to 100.00 are rejected with a
/// 400, the same check the backend applies.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDonationBoxGateway {
    receipts: Arc<RwLock<Vec<SaveReceipt>>>,
    failure: Option<GatewayError>,
}

impl InMemoryDonationBoxGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// A gateway that fails every save with `failure`.
    pub fn failing(failure: GatewayError) -> Self {
        Self { receipts: Arc::default(), failure: Some(failure) }
    }

    pub async fn save_count(&self) -> usize {
        self.receipts.read().await.len()
    }

    pub async fn latest(&self) -> Option<SaveReceipt> {
        self.receipts.read().await.last().cloned()
    }
}

#[async_trait]
impl DonationBoxGateway for InMemoryDonationBoxGateway {
    async fn update_donation_box(
        &self,
        request: &UpdateDonationBoxRequest,
    ) -> Result<SaveReceipt, GatewayError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }

        let total = round2(request.total_percentage());
        if total != 100.0 {
            return Err(GatewayError::Rejected {
                status: 400,
                message: format!("percentages must sum to 100, got {total:.2}"),
            });
        }

        let receipt = SaveReceipt { saved_at: Utc::now(), request: request.clone() };
        self.receipts.write().await.push(receipt.clone());
        Ok(receipt)
    }
}

use crate::{CauseId, CollectiveId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Payload of the external "update donation box" operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateDonationBoxRequest {
    /// Monthly amount formatted with two decimals, e.g. `"34.00"`
    pub monthly_amount: String,
    /// One allocation per cause; percentages sum to exactly 100.00
    pub causes: Vec<CauseAllocation>,
}

impl UpdateDonationBoxRequest {
    /// Sum of all allocated percentages.
    pub fn total_percentage(&self) -> f64 {
        self.causes.iter().map(|c| c.percentage).sum()
    }
}

/// A single cause's share inside an [`UpdateDonationBoxRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseAllocation {
    /// Cause receiving the share
    pub cause_id: CauseId,
    /// Share of the monthly amount, rounded to two decimals
    pub percentage: f64,
    /// Collective credited for the referral, omitted when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributed_collective: Option<CollectiveId>,
}

/// Acknowledgement returned by a gateway after a successful save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveReceipt {
    /// When the gateway accepted the request
    pub saved_at: DateTime<Utc>,
    /// The request that was accepted
    pub request: UpdateDonationBoxRequest,
}

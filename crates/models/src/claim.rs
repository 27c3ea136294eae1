use serde::{Deserialize, Serialize};

use crate::record::{merge, Patch, Record};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ClaimStatus {
    Pending,
    Approved,
}

/// A filed service claim. Service name and fee are snapshots taken at submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceClaim {
    #[serde(rename = "Claim ID")]
    pub claim_id: String,
    /// `MM-DD-YYYY HH:MM:SS`, local time.
    #[serde(rename = "Current Date/Time")]
    pub submitted_at: String,
    #[serde(rename = "Date of Service")]
    pub date_of_service: String,
    #[serde(rename = "Provider Number")]
    pub provider_number: String,
    #[serde(rename = "Member ID")]
    pub member_id: String,
    #[serde(rename = "Service Code")]
    pub service_code: String,
    #[serde(rename = "Service Name")]
    pub service_name: String,
    #[serde(rename = "Fee")]
    pub fee: f64,
    #[serde(rename = "Comments")]
    pub comments: String,
    #[serde(rename = "Status")]
    pub status: ClaimStatus,
}

impl Record for ServiceClaim {
    const ENTITY: &'static str = "claim";

    fn key(&self) -> &str { &self.claim_id }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimInput {
    pub member_id: String,
    pub date_of_service: String,
    pub provider_number: String,
    pub service_code: String,
    #[serde(default)]
    pub comments: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClaimUpdate {
    pub date_of_service: Option<String>,
    pub provider_number: Option<String>,
    pub member_id: Option<String>,
    pub comments: Option<String>,
    pub status: Option<ClaimStatus>,
}

impl Patch<ServiceClaim> for ClaimUpdate {
    fn apply_to(self, c: &mut ServiceClaim) {
        merge(&mut c.date_of_service, self.date_of_service);
        merge(&mut c.provider_number, self.provider_number);
        merge(&mut c.member_id, self.member_id);
        merge(&mut c.comments, self.comments);
        merge(&mut c.status, self.status);
    }
}

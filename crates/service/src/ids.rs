//! Identifier allocation for members, providers and claims.

use configs::ClaimIdPolicy;
use models::ServiceClaim;
use rand::Rng;

use crate::errors::ServiceError;

/// Smallest and largest 9-digit member/provider id.
pub const ID_MIN: u32 = 100_000_000;
pub const ID_MAX: u32 = 999_999_999;

/// Claim ids count up from one past this value.
pub const CLAIM_ID_BASE: u64 = 1_000_000;

/// Draw uniformly from the 9-digit range until `taken` rejects nothing,
/// giving up after `max_attempts` draws.
pub fn generate_unique_id<R, F>(rng: &mut R, max_attempts: u32, mut taken: F) -> Result<String, ServiceError>
where
    R: Rng + ?Sized,
    F: FnMut(&str) -> bool,
{
    for _ in 0..max_attempts {
        let id = rng.gen_range(ID_MIN..=ID_MAX).to_string();
        if !taken(&id) {
            return Ok(id);
        }
    }
    Err(ServiceError::IdSpaceExhausted { attempts: max_attempts })
}

/// Next claim id under `policy`.
///
/// `Length` reproduces the historic `1_000_001 + count` rule, which hands out
/// an id that is still in use once any claim has been deleted.
pub fn next_claim_id(policy: ClaimIdPolicy, claims: &[ServiceClaim]) -> String {
    match policy {
        ClaimIdPolicy::Length => (CLAIM_ID_BASE + claims.len() as u64 + 1).to_string(),
        ClaimIdPolicy::Monotonic => {
            let highest = claims
                .iter()
                .filter_map(|c| c.claim_id.parse::<u64>().ok())
                .max()
                .unwrap_or(CLAIM_ID_BASE)
                .max(CLAIM_ID_BASE);
            (highest + 1).to_string()
        }
    }
}

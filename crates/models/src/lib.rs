//! Record types persisted by the ChocAn record store, plus caller-side field checks.

pub mod errors;
pub mod record;
pub mod user;
pub mod member;
pub mod provider;
pub mod claim;
pub mod service_entry;
pub mod validation;

pub use claim::{ClaimInput, ClaimStatus, ClaimUpdate, ServiceClaim};
pub use member::{Member, MemberInput, MemberStatus, MemberUpdate};
pub use provider::{Provider, ProviderInput, ProviderUpdate};
pub use record::{Patch, Record};
pub use service_entry::{ServiceEntry, ServiceUpdate};
pub use user::{derive_provider_username, Role, User, UserTable};

#[cfg(test)]
mod tests;

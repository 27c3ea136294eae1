use serde::{Deserialize, Serialize};

use crate::record::{merge, Patch, Record};
use crate::user::derive_provider_username;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Provider {
    pub provider_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl Provider {
    pub fn username(&self) -> String { derive_provider_username(&self.name) }
}

impl Record for Provider {
    const ENTITY: &'static str = "provider";

    fn key(&self) -> &str { &self.provider_id }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderInput {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Renaming a provider does not touch its credential.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

impl Patch<Provider> for ProviderUpdate {
    fn apply_to(self, p: &mut Provider) {
        merge(&mut p.name, self.name);
        merge(&mut p.address, self.address);
        merge(&mut p.city, self.city);
        merge(&mut p.state, self.state);
        merge(&mut p.zip, self.zip);
    }
}

use serde::{Deserialize, Serialize};

use crate::record::{merge, Patch, Record};

/// One row of the service directory (provider fee catalog).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceEntry {
    pub code: String,
    pub name: String,
    pub fee: f64,
}

impl ServiceEntry {
    pub fn new(code: impl Into<String>, name: impl Into<String>, fee: f64) -> Self {
        Self { code: code.into(), name: name.into(), fee }
    }

    /// Case-insensitive substring match on code or name. `needle` must already be lower-case.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.code.to_lowercase().contains(needle) || self.name.to_lowercase().contains(needle)
    }
}

impl Record for ServiceEntry {
    const ENTITY: &'static str = "service";

    fn key(&self) -> &str { &self.code }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ServiceUpdate {
    pub name: Option<String>,
    pub fee: Option<f64>,
}

impl Patch<ServiceEntry> for ServiceUpdate {
    fn apply_to(self, s: &mut ServiceEntry) {
        merge(&mut s.name, self.name);
        merge(&mut s.fee, self.fee);
    }
}

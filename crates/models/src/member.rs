use serde::{Deserialize, Serialize};

use crate::record::{merge, Patch, Record};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MemberStatus {
    Valid,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub member_id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub status: MemberStatus,
}

impl Member {
    pub fn is_expired(&self) -> bool { self.status == MemberStatus::Expired }
}

impl Record for Member {
    const ENTITY: &'static str = "member";

    fn key(&self) -> &str { &self.member_id }
}

/// Member fields a caller supplies on creation; the id and status are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberInput {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub status: Option<MemberStatus>,
}

impl Patch<Member> for MemberUpdate {
    fn apply_to(self, m: &mut Member) {
        merge(&mut m.name, self.name);
        merge(&mut m.address, self.address);
        merge(&mut m.city, self.city);
        merge(&mut m.state, self.state);
        merge(&mut m.zip, self.zip);
        merge(&mut m.status, self.status);
    }
}

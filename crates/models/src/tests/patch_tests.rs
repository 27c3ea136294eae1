use crate::record::{find_by_key, position_by_key, Patch};
use crate::{
    ClaimStatus, ClaimUpdate, Member, MemberStatus, MemberUpdate, Provider, ProviderUpdate, ServiceClaim,
    ServiceEntry, ServiceUpdate,
};

fn member() -> Member {
    Member {
        member_id: "123456789".into(),
        name: "John Doe".into(),
        address: "123 Main St".into(),
        city: "Anytown".into(),
        state: "CA".into(),
        zip: "12345".into(),
        status: MemberStatus::Valid,
    }
}

#[test]
fn member_update_only_touches_given_fields() {
    let mut m = member();
    MemberUpdate { city: Some("Newtown".into()), ..Default::default() }.apply_to(&mut m);
    let expected = Member { city: "Newtown".into(), ..member() };
    assert_eq!(m, expected);
}

#[test]
fn empty_member_update_is_identity() {
    let mut m = member();
    MemberUpdate::default().apply_to(&mut m);
    assert_eq!(m, member());
}

#[test]
fn provider_update_merges() {
    let mut p = Provider {
        provider_id: "555555555".into(),
        name: "Jane Roe".into(),
        address: "1 Clinic Way".into(),
        city: "Portland".into(),
        state: "OR".into(),
        zip: "97201".into(),
    };
    ProviderUpdate { zip: Some("97202".into()), name: Some("Jane Q Roe".into()), ..Default::default() }.apply_to(&mut p);
    assert_eq!(p.zip, "97202");
    assert_eq!(p.name, "Jane Q Roe");
    assert_eq!(p.city, "Portland");
    assert_eq!(p.username(), "janeqroe");
}

#[test]
fn service_and_claim_updates() {
    let mut s = ServiceEntry::new("100017", "Flu Shot", 30.0);
    ServiceUpdate { fee: Some(35.5), ..Default::default() }.apply_to(&mut s);
    assert_eq!(s, ServiceEntry::new("100017", "Flu Shot", 35.5));

    let mut c = ServiceClaim {
        claim_id: "1000001".into(),
        submitted_at: "01-02-2025 03:04:05".into(),
        date_of_service: "01-01-2025".into(),
        provider_number: "987654321".into(),
        member_id: "123456789".into(),
        service_code: "100017".into(),
        service_name: "Flu Shot".into(),
        fee: 30.0,
        comments: String::new(),
        status: ClaimStatus::Pending,
    };
    ClaimUpdate { status: Some(ClaimStatus::Approved), ..Default::default() }.apply_to(&mut c);
    assert_eq!(c.status, ClaimStatus::Approved);
    assert_eq!(c.fee, 30.0);
}

#[test]
fn key_lookup_returns_first_match() {
    let first = member();
    let second = Member { name: "Duplicate".into(), ..member() };
    let rows = vec![first.clone(), second];
    assert_eq!(find_by_key(&rows, "123456789"), Some(&first));
    assert_eq!(position_by_key(&rows, "123456789"), Some(0));
    assert_eq!(find_by_key(&rows, "000000000"), None);
}

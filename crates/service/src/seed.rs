//! Default records installed into empty collections.

use models::{Member, MemberStatus, Role, ServiceEntry, User, UserTable};

pub fn default_users() -> UserTable {
    let mut users = UserTable::new();
    users.insert("manager".into(), User::new("manager", "manager123", Role::Manager));
    users.insert("provider".into(), User::new("quinn", "quinn123", Role::Provider));
    users.insert("mjin".into(), User::new("Mjin", "Mjin123", Role::Manager));
    users
}

fn member(id: &str, name: &str, status: MemberStatus, address: &str, city: &str, state: &str, zip: &str) -> Member {
    Member {
        member_id: id.into(),
        name: name.into(),
        address: address.into(),
        city: city.into(),
        state: state.into(),
        zip: zip.into(),
        status,
    }
}

pub fn default_members() -> Vec<Member> {
    vec![
        member("123456789", "John Doe", MemberStatus::Valid, "123 Main St", "Anytown", "CA", "12345"),
        member("543210987", "Jane Smith", MemberStatus::Expired, "456 Elm St", "Othertown", "NY", "67890"),
        member("333333333", "Bob Johnson", MemberStatus::Valid, "789 Oak St", "Smalltown", "TX", "34567"),
    ]
}

const SERVICES: [(&str, &str, f64); 20] = [
    ("100001", "Therapy Session", 100.00),
    ("100002", "Dental Cleaning", 80.00),
    ("100003", "Vision Exam", 60.00),
    ("100004", "Physical Therapy", 120.00),
    ("100005", "Nutrition Counseling", 75.00),
    ("100006", "Psychological Therapy", 150.00),
    ("100007", "Occupational Therapy", 110.00),
    ("100008", "Speech Therapy", 95.00),
    ("100009", "Massage Therapy", 85.00),
    ("100010", "Chiropractic Adjustment", 90.00),
    ("100011", "Acupuncture Session", 70.00),
    ("100012", "Dental X-Ray", 45.00),
    ("100013", "Eye Glasses Fitting", 55.00),
    ("100014", "Hearing Test", 65.00),
    ("100015", "Blood Pressure Check", 25.00),
    ("100016", "Diabetes Screening", 40.00),
    ("100017", "Flu Shot", 30.00),
    ("100018", "Smoking Cessation Program", 200.00),
    ("100019", "Weight Loss Consultation", 85.00),
    ("100020", "Stress Management Session", 95.00),
];

pub fn default_services() -> Vec<ServiceEntry> {
    SERVICES.iter().map(|&(code, name, fee)| ServiceEntry::new(code, name, fee)).collect()
}

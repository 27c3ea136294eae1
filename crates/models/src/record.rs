//! Traits shared by every stored record.

/// A record identified within its collection by a string business key.
pub trait Record {
    /// Human-readable collection entity name, used in log fields.
    const ENTITY: &'static str;

    fn key(&self) -> &str;
}

/// A partial update. `None` fields leave the target untouched.
pub trait Patch<T> {
    fn apply_to(self, target: &mut T);
}

/// Linear scan by business key; the first match wins.
pub fn find_by_key<'a, T: Record>(records: &'a [T], key: &str) -> Option<&'a T> {
    records.iter().find(|r| r.key() == key)
}

/// Index of the first record with the given key.
pub fn position_by_key<T: Record>(records: &[T], key: &str) -> Option<usize> {
    records.iter().position(|r| r.key() == key)
}

pub(crate) fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

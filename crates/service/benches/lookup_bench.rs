use criterion::{criterion_group, criterion_main, Criterion};

use models::{MemberInput, Role};
use service::{MemoryBackend, RecordStore, StoreOptions};

fn bench_lookups(c: &mut Criterion) {
    let mut store = RecordStore::with_backend(MemoryBackend::new(), StoreOptions::default()).unwrap();

    // a few thousand rows, the upper end of what the store is meant for
    let mut last_id = String::new();
    for i in 0..2_000 {
        last_id = store
            .create_member(MemberInput {
                name: format!("Member {i}"),
                address: "1 Cocoa Ln".into(),
                city: "Portland".into(),
                state: "OR".into(),
                zip: "97201".into(),
            })
            .unwrap();
    }

    c.bench_function("get_member_last_row", |b| {
        b.iter(|| store.get_member(&last_id).is_some());
    });
    c.bench_function("search_services_therapy", |b| {
        b.iter(|| store.search_services("therapy").len());
    });
    c.bench_function("authenticate_manager", |b| {
        b.iter(|| store.authenticate("manager", "manager123", Role::Manager));
    });
}

criterion_group!(benches, bench_lookups);
criterion_main!(benches);

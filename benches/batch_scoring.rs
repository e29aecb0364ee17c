use chrono::{Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use safescore::{
    Entity, EntityKind, EntityStatus, ScoreCalculator, ScoreInputs, VerificationStatus,
};

fn build_entities(count: usize) -> Vec<Entity> {
    let now = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            let status = match i % 4 {
                0 => EntityStatus::Active,
                1 => EntityStatus::Inactive,
                2 => EntityStatus::Emergency,
                _ => EntityStatus::CheckedOut,
            };
            let verification_status = match i % 3 {
                0 => VerificationStatus::Verified,
                1 => VerificationStatus::Pending,
                _ => VerificationStatus::Rejected,
            };
            Entity {
                id: format!("T-{i:05}"),
                name: format!("Entity {i}"),
                kind: if i % 5 == 0 {
                    EntityKind::Zone
                } else {
                    EntityKind::Tourist
                },
                inputs: ScoreInputs {
                    status,
                    verification_status,
                    active_alert_count: (i % 6) as u32,
                    last_check_in: now - Duration::hours((i % 40) as i64),
                },
            }
        })
        .collect()
}

fn bench_batch_scoring(c: &mut Criterion) {
    let now = Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0).unwrap();
    let calculator = ScoreCalculator::default();

    for size in [100, 1_000, 10_000] {
        let entities = build_entities(size);
        c.bench_function(&format!("build_report_{size}"), |b| {
            b.iter(|| calculator.build_report(std::hint::black_box(&entities), now))
        });
    }

    let single = build_entities(1);
    c.bench_function("single_score", |b| {
        b.iter(|| calculator.score(std::hint::black_box(&single[0].inputs), now))
    });
}

criterion_group!(benches, bench_batch_scoring);
criterion_main!(benches);

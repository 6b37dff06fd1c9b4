use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use buildstamp::{
    BuildIdGenerator, BuildToken, BuildTokenGenerator, MemoryStateStore, OsRandom,
    PropertyGenerator, Result, SchedulerId, StateStore, ThreadRandom, TimeSource, normalize_name,
};
use time::OffsetDateTime;

struct FixedMockTime {
    secs: i64,
}

impl TimeSource for FixedMockTime {
    fn now(&self) -> Result<OffsetDateTime> {
        Ok(OffsetDateTime::from_unix_timestamp(self.secs).unwrap_or(OffsetDateTime::UNIX_EPOCH))
    }
}

// Number of allocations per benchmark iteration.
const TOTAL_IDS: usize = 4096;

const BRANCHES: &[(&str, Option<&str>)] = &[
    ("mozilla-beta", None),
    ("comm-release", Some("thunderbird")),
    ("spidermonkey-errasdebug", None),
    ("mozilla-central", Some("b2g")),
    ("try-comm-central", Some("seamonkey")),
    ("some-unknown_branch-l10n", Some("calendar")),
];

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    group.throughput(Throughput::Elements(BRANCHES.len() as u64));

    group.bench_function(format!("elems/{}", BRANCHES.len()), |b| {
        b.iter(|| {
            for (name, product) in BRANCHES {
                black_box(normalize_name(black_box(name), *product));
            }
        });
    });

    group.finish();
}

/// Benchmarks allocation with a stalled clock, so every call takes the carry
/// path.
fn bench_build_id(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_id");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            let store = MemoryStateStore::new();
            let scheduler = SchedulerId::from("bench");
            let generator = BuildIdGenerator::new(FixedMockTime { secs: 1_700_000_000 });
            for _ in 0..TOTAL_IDS {
                let id = store
                    .transact(|txn| generator.allocate(&scheduler, txn))
                    .unwrap();
                black_box(id);
            }
        });
    });

    group.finish();
}

fn bench_build_token<R>(c: &mut Criterion, group_name: &str, rng: R)
where
    R: buildstamp::RandSource<BuildToken>,
{
    let mut group = c.benchmark_group(group_name);
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let store = MemoryStateStore::new();
    let scheduler = SchedulerId::from("bench");
    let generator = BuildTokenGenerator::new(rng);

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.generate_in(&store, &scheduler, None).unwrap());
            }
        });
    });

    group.finish();
}

fn bench_build_tokens(c: &mut Criterion) {
    bench_build_token(c, "build_token/thread_random", ThreadRandom);
    bench_build_token(c, "build_token/os_random", OsRandom);
}

criterion_group!(benches, bench_normalize, bench_build_id, bench_build_tokens);
criterion_main!(benches);

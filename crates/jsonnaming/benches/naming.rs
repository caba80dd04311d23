//! Benchmark – property-name conversion paths of `jsonnaming::WorkingPolicy`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use jsonnaming::{
    JsonWrite, JsonWriter, NamingConvention, NamingPolicy, SerializerOptions, WorkingPolicy,
};

const NAMES: &[&str] = &[
    "Id",
    "MaxRetries",
    "HTTPServerAddress",
    "XMLHttpRequestTimeoutMilliseconds",
];

/// Writes every name in `names` into one object and returns the output length
/// so the work cannot be optimised away.
fn write_names(policy: &WorkingPolicy, names: &[&str], utf8: bool) -> usize {
    let mut writer = JsonWriter::with_capacity(1024);
    writer.write_start_object().unwrap();
    for name in names {
        if utf8 {
            policy
                .write_property_name_utf8(&mut writer, name.as_bytes())
                .unwrap();
        } else {
            policy.write_property_name(&mut writer, name).unwrap();
        }
        writer.write_null_value().unwrap();
    }
    writer.write_end_object().unwrap();
    writer.as_str().len()
}

fn bench_naming(c: &mut Criterion) {
    let span = WorkingPolicy::new(Some(&SerializerOptions::with_convention(
        NamingConvention::CamelCase,
    )));
    let plain = WorkingPolicy::new(Some(&SerializerOptions::with_policy(NamingPolicy::plain(
        |name: &str| NamingPolicy::camel_case().convert_name(name),
    ))));
    let unset = WorkingPolicy::new(None);
    let long = "LongPropertyName".repeat(32);

    let mut group = c.benchmark_group("write_property_name");
    for (label, policy, utf8) in [
        ("span", &span, false),
        ("span_utf8", &span, true),
        ("plain", &plain, false),
        ("none", &unset, false),
    ] {
        group.bench_with_input(BenchmarkId::new("short", label), policy, |b, p| {
            b.iter(|| black_box(write_names(p, black_box(NAMES), utf8)));
        });
        group.bench_with_input(BenchmarkId::new("pooled", label), policy, |b, p| {
            b.iter(|| black_box(write_names(p, &[black_box(long.as_str())], utf8)));
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_naming }
criterion_main!(benches);

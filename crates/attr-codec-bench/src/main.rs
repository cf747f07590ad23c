//! Benchmark for attribute value encoding using a synthetic dataset.
//!
//! Encodes and decodes a deterministic mix of integers, floats, timestamps
//! and booleans, then checks that sorting the encoded strings sorts the
//! values. Pass a path to also write the results as JSON.

use std::cmp::Ordering;
use std::fs;
use std::time::{Duration, Instant};

use attr_codec::{
    decode_attribute_value, encode_attribute_value_with_options, EncodeOptions, Timestamp,
    TimestampPrecision, TypedValue,
};
use rand::prelude::*;
use serde::Serialize;

const VALUE_COUNT: usize = 200_000;
const ITERS: u32 = 5;
const SEED: u64 = 42;

// Years 1900..2100 in microseconds
const MIN_MICROS: i64 = -2_208_988_800_000_000;
const MAX_MICROS: i64 = 4_102_444_800_000_000;

// =============================================================================
// SYNTHETIC DATA
// =============================================================================

fn random_float(rng: &mut StdRng) -> f64 {
    let magnitude: f64 = rng.random::<f64>() * 10f64.powi(rng.random_range(-20..20));
    if rng.random_bool(0.5) { magnitude } else { -magnitude }
}

fn generate(kind: &str, count: usize, rng: &mut StdRng) -> Vec<TypedValue> {
    (0..count)
        .map(|_| match kind {
            "integer" => {
                TypedValue::Integer(rng.random_range(-1_000_000_000_000..1_000_000_000_000i64))
            }
            "float" => TypedValue::Float(random_float(rng)),
            "timestamp" => {
                TypedValue::Timestamp(Timestamp::from_epoch_micros(rng.random_range(MIN_MICROS..MAX_MICROS)))
            }
            _ => TypedValue::Boolean(rng.random_bool(0.5)),
        })
        .collect()
}

fn compare_values(a: &TypedValue, b: &TypedValue) -> Ordering {
    match (a, b) {
        (TypedValue::Integer(x), TypedValue::Integer(y)) => x.cmp(y),
        (TypedValue::Float(x), TypedValue::Float(y)) => x.total_cmp(y),
        (TypedValue::Timestamp(x), TypedValue::Timestamp(y)) => x.cmp(y),
        (TypedValue::Boolean(x), TypedValue::Boolean(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

/// Sorts the encoded strings and checks the decoded values come out sorted.
fn sorts_like_values(encoded: &[String]) -> bool {
    let mut sorted = encoded.to_vec();
    sorted.sort();
    let sorted_values: Vec<TypedValue> = sorted
        .iter()
        .map(|s| decode_attribute_value(s.as_str()).expect("Failed to decode"))
        .collect();
    sorted_values
        .windows(2)
        .all(|w| compare_values(&w[0], &w[1]) != Ordering::Greater)
}

// =============================================================================
// REPORT
// =============================================================================

#[derive(Debug, Serialize)]
struct KindReport {
    kind: String,
    values: usize,
    encoded_bytes: usize,
    encode_ns_per_value: f64,
    decode_ns_per_value: f64,
    order_preserved: bool,
    roundtrip_mismatches: usize,
}

#[derive(Debug, Serialize)]
struct Report {
    crate_version: &'static str,
    iterations: u32,
    kinds: Vec<KindReport>,
}

/// Names of the kinds whose order or round-trip check failed.
fn failed_kinds(kinds: &[KindReport]) -> Vec<String> {
    kinds
        .iter()
        .filter(|k| !k.order_preserved || k.roundtrip_mismatches > 0)
        .map(|k| k.kind.clone())
        .collect()
}

fn per_value_ns(total: Duration, count: usize) -> f64 {
    total.as_nanos() as f64 / count as f64
}

fn bench_kind(kind: &str, options: &EncodeOptions, rng: &mut StdRng) -> KindReport {
    let values = generate(kind, VALUE_COUNT, rng);

    // Warmup
    for value in values.iter().take(1000) {
        let _ = encode_attribute_value_with_options(value, options).expect("Failed to encode");
    }

    let encode_start = Instant::now();
    let mut encoded = Vec::new();
    for _ in 0..ITERS {
        encoded = values
            .iter()
            .map(|v| {
                encode_attribute_value_with_options(v, options)
                    .expect("Failed to encode")
                    .unwrap_or_default()
            })
            .collect();
    }
    let encode_time = encode_start.elapsed() / ITERS;

    let decode_start = Instant::now();
    let mut decoded = Vec::new();
    for _ in 0..ITERS {
        decoded = encoded
            .iter()
            .map(|s| decode_attribute_value(s.as_str()).expect("Failed to decode"))
            .collect::<Vec<_>>();
    }
    let decode_time = decode_start.elapsed() / ITERS;

    // Floats are compared after one encode/decode pass, since precision is finite
    let roundtrip_mismatches = values
        .iter()
        .zip(&decoded)
        .filter(|(original, back)| match (original, back) {
            (TypedValue::Float(a), TypedValue::Float(b)) => {
                let tolerance = 10f64.powi(1 - options.float_precision_digits as i32);
                (a - b).abs() > a.abs() * tolerance
            }
            (a, b) => a != b,
        })
        .count();

    let order_preserved = sorts_like_values(&encoded);

    let encoded_bytes = encoded.iter().map(String::len).sum();

    println!("\n{}: {} values, {} bytes encoded", kind, values.len(), encoded_bytes);
    println!(
        "  Encode: {:?} ({:.1} ns/value)",
        encode_time,
        per_value_ns(encode_time, values.len())
    );
    println!(
        "  Decode: {:?} ({:.1} ns/value)",
        decode_time,
        per_value_ns(decode_time, values.len())
    );
    println!(
        "  Order preserved: {}, round-trip mismatches: {}",
        order_preserved, roundtrip_mismatches
    );

    KindReport {
        kind: kind.to_string(),
        values: values.len(),
        encoded_bytes,
        encode_ns_per_value: per_value_ns(encode_time, values.len()),
        decode_ns_per_value: per_value_ns(decode_time, values.len()),
        order_preserved,
        roundtrip_mismatches,
    }
}

fn main() {
    let report_path = std::env::args().nth(1);

    let options = EncodeOptions::new()
        .with_integer_digits(13)
        .with_float_digits(2, 15)
        .with_timestamp_precision(TimestampPrecision::Micros);

    println!("attr-codec {} benchmark", attr_codec::VERSION);
    println!("  {} values per kind, {} iterations", VALUE_COUNT, ITERS);

    let mut rng = StdRng::seed_from_u64(SEED);
    let kinds = ["integer", "float", "timestamp", "boolean"]
        .iter()
        .map(|kind| bench_kind(kind, &options, &mut rng))
        .collect::<Vec<_>>();

    let failed = failed_kinds(&kinds);

    let report = Report {
        crate_version: attr_codec::VERSION,
        iterations: ITERS,
        kinds,
    };

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report).expect("Failed to serialize report");
        fs::write(&path, json).expect("Failed to write report");
        println!("\n=== Report ===");
        println!("Written to: {}", path);
    }

    assert!(failed.is_empty(), "Order or round trip failed for: {:?}", failed);
}

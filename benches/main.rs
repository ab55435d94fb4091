use criterion::{criterion_group, criterion_main, Criterion};
use grib_message::{BufMessage, DynamicKeyType, KeyRead, RefMessage};
use std::hint::black_box;

pub fn key_reading(c: &mut Criterion) {
    //prepare the variables for benchmark
    let msg = BufMessage::new_from_sample("regular_ll_sfc_grib2").unwrap();

    c.bench_function("long reading", |b| {
        b.iter(|| msg.read_key_dynamic(black_box("dataDate")).unwrap())
    });

    c.bench_function("static long reading", |b| {
        b.iter(|| -> i64 { msg.read_key(black_box("dataDate")).unwrap() })
    });

    c.bench_function("double reading", |b| {
        b.iter(|| {
            msg.read_key_dynamic(black_box("jDirectionIncrementInDegrees"))
                .unwrap()
        })
    });

    c.bench_function("string reading", |b| {
        b.iter(|| msg.read_key_dynamic(black_box("name")).unwrap())
    });

    c.bench_function("key probing", |b| {
        b.iter(|| msg.has_key(black_box("nonexistentKey12345")))
    });
}

pub fn grid_reading(c: &mut Criterion) {
    let msg = BufMessage::new_from_sample("regular_ll_sfc_grib2").unwrap();

    c.bench_function("values grid reading", |b| {
        b.iter(|| match msg.read_key_dynamic(black_box("values")).unwrap() {
            DynamicKeyType::Grid(grid) => grid,
            _ => panic!("values key is not a grid"),
        })
    });

    c.bench_function("masked values", |b| b.iter(|| msg.masked_values().unwrap()));

    c.bench_function("grid data", |b| b.iter(|| msg.grid_data().unwrap()));
}

pub fn message_construction(c: &mut Criterion) {
    let data = BufMessage::new_from_sample("regular_ll_sfc_grib2")
        .unwrap()
        .to_raw_bytes()
        .unwrap();

    c.bench_function("message from bytes", |b| {
        b.iter(|| RefMessage::new_from_bytes(black_box(&data)).unwrap())
    });

    let msg = RefMessage::new_from_bytes(&data).unwrap();

    c.bench_function("message clone", |b| {
        b.iter(|| msg.try_clone().unwrap())
    });
}

criterion_group!(benches, key_reading, grid_reading, message_construction);
criterion_main!(benches);

//! Mat conversion throughput
//!
//! Both directions copy the full payload, so cost should scale linearly
//! with image size. Measured for common frame sizes in 8UC3.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cvbridge_core::mat::CV_8UC3;
use cvbridge_core::{from_external, to_external, ExternalValue, Mat, Point2f};

fn frame(rows: i32, cols: i32) -> Mat {
    let mut mat = Mat::new(rows, cols, CV_8UC3).expect("frame allocation");
    for (i, byte) in mat.data_mut().iter_mut().enumerate() {
        *byte = (i % 251) as u8;
    }
    mat
}

fn bench_mat_conversion(c: &mut Criterion) {
    let mut group = c.benchmark_group("mat_conversion");

    for &(name, rows, cols) in &[("vga", 480, 640), ("hd", 720, 1280), ("full_hd", 1080, 1920)] {
        let mat = frame(rows, cols);
        let external = to_external(&mat);
        group.throughput(Throughput::Bytes(mat.data().len() as u64));

        group.bench_with_input(BenchmarkId::new("to_external", name), &mat, |b, mat| {
            b.iter(|| black_box(to_external(black_box(mat))))
        });

        group.bench_with_input(
            BenchmarkId::new("from_external", name),
            &external,
            |b, external| b.iter(|| black_box(from_external::<Mat>(black_box(external)).unwrap())),
        );
    }

    group.finish();
}

fn bench_point_sequence(c: &mut Criterion) {
    let points: Vec<Point2f> = (0..10_000)
        .map(|i| Point2f::new(i as f32 * 0.5, i as f32 * 0.25))
        .collect();
    let external: ExternalValue = to_external(&points);

    c.bench_function("points_10k_roundtrip", |b| {
        b.iter(|| black_box(from_external::<Vec<Point2f>>(black_box(&external)).unwrap()))
    });
}

criterion_group!(benches, bench_mat_conversion, bench_point_sequence);
criterion_main!(benches);

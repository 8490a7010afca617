use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::fs;
use std::path::Path;
use zlc::Level;
use zlc::transcode::{compress_bytes, decompress_bytes};

/// Text-like data: an LCG picking from a small alphabet so deflate has
/// something to find.
fn gen_data(size: usize, seed: u64) -> Vec<u8> {
    const ALPHABET: &[u8] = b"etaoin shrdlu cmfwyp vbgkqjxz\n";
    let mut s = seed;
    let mut out = Vec::with_capacity(size);
    for _ in 0..size {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        out.push(ALPHABET[((s >> 33) as usize) % ALPHABET.len()]);
    }
    out
}

fn level(l: u32) -> Level {
    Level::new(l).unwrap()
}

fn write_ratio_snapshot() {
    let data = gen_data(2 * 1024 * 1024, 123);
    let mut csv = String::from("level,container_bytes,raw_bytes,ratio\n");
    for l in Level::MIN..=Level::MAX {
        let container = compress_bytes(&data, level(l)).unwrap();
        let ratio = container.len() as f64 / data.len() as f64;
        csv.push_str(&format!("{l},{},{},{}\n", container.len(), data.len(), ratio));
    }
    let out_dir = Path::new("target/criterion/custom_reports");
    let _ = fs::create_dir_all(out_dir);
    let _ = fs::write(out_dir.join("ratio_snapshot.csv"), csv);
}

fn bench_compress_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("compress_speed_mb_s");
    for size in [64 * 1024usize, 1024 * 1024, 8 * 1024 * 1024] {
        let data = gen_data(size, 1);
        g.throughput(Throughput::Bytes(size as u64));
        g.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let container = compress_bytes(black_box(&data), Level::DEFAULT).unwrap();
                black_box(container);
            });
        });
    }
    g.finish();
}

fn bench_decompress_speed(c: &mut Criterion) {
    let mut g = c.benchmark_group("decompress_speed_mb_s");
    for size in [64 * 1024usize, 1024 * 1024, 8 * 1024 * 1024] {
        let data = gen_data(size, 2);
        let container = compress_bytes(&data, Level::DEFAULT).unwrap();
        g.throughput(Throughput::Bytes(size as u64));
        g.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let out = decompress_bytes(black_box(&container)).unwrap();
                black_box(out);
            });
        });
    }
    g.finish();
}

fn bench_ratio_vs_level(c: &mut Criterion) {
    write_ratio_snapshot();
    let mut g = c.benchmark_group("compress_time_vs_level");
    let data = gen_data(1024 * 1024, 3);
    g.throughput(Throughput::Bytes(data.len() as u64));
    for l in Level::MIN..=Level::MAX {
        g.bench_with_input(BenchmarkId::from_parameter(l), &l, |b, l| {
            b.iter(|| {
                let container = compress_bytes(&data, level(*l)).unwrap();
                black_box(container.len());
            });
        });
    }
    g.finish();
}

criterion_group!(
    benches,
    bench_compress_speed,
    bench_decompress_speed,
    bench_ratio_vs_level
);
criterion_main!(benches);

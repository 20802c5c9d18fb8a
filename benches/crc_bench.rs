use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wlkread::crc::crc16_all;

fn bench_crc16(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc16");
    for size in [267usize, 4 * 1024, 64 * 1024] {
        let data: Vec<u8> = (0..size).map(|i| (i * 31) as u8).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("{size}B"), |b| {
            b.iter(|| crc16_all(black_box(&data)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_crc16);
criterion_main!(benches);

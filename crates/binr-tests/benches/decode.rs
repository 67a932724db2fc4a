use binr_decoder::{MemorySource, ReadingContext};
use binr_tests::sample_record;
use binr_types::{BeString16, ByteBlock, LeFloat16, LeInt64, LeUInt16, LeUInt32, String8, Varint};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

async fn decode_record(bytes: Vec<u8>, chunk_size: usize) {
    let mut ctx = ReadingContext::new(MemorySource::split(bytes, chunk_size));
    ctx.read_with_args(&ByteBlock, 4).await.unwrap();
    ctx.skip(2).await.unwrap();
    let count = ctx.read(&LeUInt16).await.unwrap();
    ctx.read_array(&LeFloat16, usize::from(count)).await.unwrap();
    ctx.read_with_args(&String8, 8).await.unwrap();
    ctx.read(&String8).await.unwrap();
    ctx.read(&BeString16).await.unwrap();
    ctx.read_array(&Varint, 2).await.unwrap();
    ctx.read(&LeInt64).await.unwrap();
}

fn bench_record_chunking(c: &mut Criterion) {
    let rt = runtime();
    let bytes = sample_record();
    let mut group = c.benchmark_group("record_chunking");

    for chunk_size in [1, 7, bytes.len()] {
        group.bench_with_input(
            BenchmarkId::from_parameter(chunk_size),
            &chunk_size,
            |b, &size| b.iter(|| rt.block_on(decode_record(bytes.clone(), size))),
        );
    }

    group.finish();
}

fn bench_u32_throughput(c: &mut Criterion) {
    let rt = runtime();
    let mut group = c.benchmark_group("u32_throughput");

    for count in [1_024usize, 65_536] {
        let bytes: Vec<u8> = (0..count as u32).flat_map(u32::to_le_bytes).collect();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        for chunk_size in [3, 4096] {
            group.bench_with_input(
                BenchmarkId::new(format!("{count}"), chunk_size),
                &chunk_size,
                |b, &size| {
                    b.iter(|| {
                        rt.block_on(async {
                            let source = MemorySource::split(bytes.clone(), size);
                            let mut ctx = ReadingContext::new(source);
                            ctx.read_array(&LeUInt32, count).await.unwrap()
                        })
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_bare_strings(c: &mut Criterion) {
    let rt = runtime();
    let text = "field value ".repeat(64);
    let mut bytes = text.as_bytes().to_vec();
    bytes.push(0);

    c.bench_function("bare_string8_768", |b| {
        b.iter(|| {
            rt.block_on(async {
                let mut ctx = ReadingContext::new(MemorySource::split(bytes.clone(), 256));
                ctx.read(&String8).await.unwrap()
            })
        });
    });
}

criterion_group!(
    benches,
    bench_record_chunking,
    bench_u32_throughput,
    bench_bare_strings
);
criterion_main!(benches);

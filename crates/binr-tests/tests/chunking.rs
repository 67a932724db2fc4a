//! Chunk-split invariance: decoding a record yields the same values and
//! consumes the same bytes whatever the chunk boundaries, and whichever
//! source delivers them.

use binr_decoder::{
    ByteSource, ChannelSource, MemorySource, ReaderConfig, ReaderSource, ReadingContext,
};
use binr_tests::{chunk_sizes, sample_record};
use binr_types::{
    BeString16, BeUInt16, ByteBlock, FieldType, LeFloat16, LeInt64, LeUInt16, String8, Value,
    Varint,
};
use bytes::Bytes;

/// The sample record decoded with statically typed decoders.
#[derive(Debug, PartialEq)]
struct Record {
    magic: Vec<u8>,
    version: u16,
    points: Vec<f32>,
    name: String,
    comment: String,
    title: String,
    sizes: Vec<u64>,
    tail: i64,
}

async fn read_record<S: ByteSource>(ctx: &mut ReadingContext<S>) -> Record {
    let magic = ctx.read_with_args(&ByteBlock, 4).await.unwrap();
    let version = ctx.read(&BeUInt16).await.unwrap();
    let count = ctx.read(&LeUInt16).await.unwrap();
    let points = ctx.read_array(&LeFloat16, usize::from(count)).await.unwrap();
    let name = ctx.read_with_args(&String8, 8).await.unwrap();
    let comment = ctx.read(&String8).await.unwrap();
    let title = ctx.read(&BeString16).await.unwrap();
    let sizes = ctx.read_array(&Varint, 2).await.unwrap();
    let tail = ctx.read(&LeInt64).await.unwrap();
    Record {
        magic,
        version,
        points,
        name,
        comment,
        title,
        sizes,
        tail,
    }
}

fn expected() -> Record {
    Record {
        magic: b"BINR".to_vec(),
        version: 0x0102,
        points: vec![1.0, -2.0, 65504.0],
        name: "probe".into(),
        comment: "ok".into(),
        title: "てすと!".into(),
        sizes: vec![300, 1],
        tail: -2,
    }
}

#[tokio::test]
async fn every_chunk_size_decodes_identically() {
    let bytes = sample_record();
    for size in chunk_sizes(bytes.len()) {
        let mut ctx = ReadingContext::new(MemorySource::split(bytes.clone(), size));
        assert_eq!(read_record(&mut ctx).await, expected(), "{size}-byte chunks");
        assert_eq!(ctx.position(), bytes.len() as u64);
        assert!(ctx.at_end().await.unwrap());
    }
}

#[tokio::test]
async fn irregular_chunks_with_empty_ones() {
    let bytes = sample_record();
    let mut chunks = Vec::new();
    let mut rest = &bytes[..];
    for width in [3, 0, 1, 7, 0, 0, 2, 11, 5].into_iter().cycle() {
        if rest.is_empty() {
            break;
        }
        let take = width.min(rest.len());
        chunks.push(rest[..take].to_vec());
        rest = &rest[take..];
    }

    let mut ctx = ReadingContext::new(MemorySource::new(chunks));
    assert_eq!(read_record(&mut ctx).await, expected());
}

#[tokio::test]
async fn reader_source_any_chunk_size() {
    let bytes = sample_record();
    for size in [1, 2, 3, 5, 8, 13, 64] {
        let source = ReaderSource::with_config(&bytes[..], ReaderConfig::with_chunk_size(size));
        let mut ctx = ReadingContext::new(source);
        assert_eq!(read_record(&mut ctx).await, expected(), "{size}-byte reads");
    }
}

#[tokio::test]
async fn channel_source_from_producer_task() {
    let bytes = sample_record();
    let (tx, source) = ChannelSource::channel(2);
    let producer = tokio::spawn(async move {
        for chunk in bytes.chunks(3) {
            tx.send(Ok(Bytes::copy_from_slice(chunk))).await.unwrap();
        }
    });

    let mut ctx = ReadingContext::new(source);
    assert_eq!(read_record(&mut ctx).await, expected());
    producer.await.unwrap();
    assert!(ctx.at_end().await.unwrap());
}

#[tokio::test]
async fn dynamic_catalogue_matches_typed_decoders() {
    let layout: [(FieldType, Option<i64>, Option<usize>); 9] = [
        (FieldType::Bytes, Some(4), None),
        (FieldType::BeUInt16, None, None),
        (FieldType::LeUInt16, None, None),
        (FieldType::LeFloat16, None, Some(3)),
        (FieldType::String8, Some(8), None),
        (FieldType::String8, None, None),
        (FieldType::BeString16, None, None),
        (FieldType::Varint, None, Some(2)),
        (FieldType::LeInt64, None, None),
    ];

    let bytes = sample_record();
    let mut renders = Vec::new();
    for size in [1, 4, bytes.len()] {
        let mut ctx = ReadingContext::new(MemorySource::split(bytes.clone(), size));
        let mut values = Vec::new();
        for (ty, length, count) in layout {
            let decoder = ty.decoder(length).unwrap();
            let value = match count {
                Some(n) => Value::Array(ctx.read_array(&decoder, n).await.unwrap()),
                None => ctx.read(&decoder).await.unwrap(),
            };
            values.push(value);
        }

        let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
        renders.push(rendered.join(" | "));
    }

    assert!(renders.windows(2).all(|pair| pair[0] == pair[1]), "{renders:#?}");
    insta::assert_snapshot!(
        renders[0],
        @r#"<42 49 4e 52> | 258 | 3 | [1, -2, 65504] | "probe" | "ok" | "てすと!" | [300, 1] | -2"#
    );
}

#![no_main]

use arbitrary::Arbitrary;
use binr_decoder::{DecodeError, MemorySource, ReadingContext};
use binr_types::{FieldType, Value};
use libfuzzer_sys::fuzz_target;

// Fuzz target: a random layout decoded from random bytes must give the
// same outcome whether the bytes arrive in one chunk or in many.
//
// Catches bugs in:
// - Carry-buffer assembly across chunk boundaries
// - Delimited scans (bare strings, varints) split mid-unit
// - End-of-stream reporting (offset / needed / available)
// - Position accounting

#[derive(Debug, Arbitrary)]
struct FuzzField {
    type_id: u8,
    length: Option<u8>,
    count: Option<u8>,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    fields: Vec<FuzzField>,
    chunk_size: u8,
    data: Vec<u8>,
}

/// Outcome of one decoding run in a form that compares NaN payloads
/// by their rendering rather than by float equality.
#[derive(Debug, PartialEq)]
struct Outcome {
    values: Vec<String>,
    error: Option<String>,
    position: u64,
}

async fn run(input: &FuzzInput, chunk_size: usize) -> Outcome {
    let source = MemorySource::split(input.data.clone(), chunk_size);
    let mut ctx = ReadingContext::new(source);
    let mut values = Vec::new();
    let mut error = None;

    for field in &input.fields {
        let ty = FieldType::ALL[usize::from(field.type_id) % FieldType::ALL.len()];
        let length = field.length.map(i64::from).filter(|_| ty.takes_length());
        let decoder = match ty.decoder(length) {
            Ok(decoder) => decoder,
            Err(_) => continue,
        };

        let result: Result<Value, DecodeError> = match field.count {
            Some(n) => ctx
                .read_array(&decoder, usize::from(n % 8))
                .await
                .map(Value::Array),
            None => ctx.read(&decoder).await,
        };
        match result {
            Ok(value) => values.push(value.to_string()),
            Err(e) => {
                error = Some(e.to_string());
                if matches!(e, DecodeError::UnexpectedEndOfStream { .. }) {
                    break;
                }
            }
        }
    }

    Outcome {
        values,
        error,
        position: ctx.position(),
    }
}

fuzz_target!(|input: FuzzInput| {
    let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    let whole = rt.block_on(run(&input, input.data.len().max(1)));
    let split = rt.block_on(run(&input, usize::from(input.chunk_size).max(1)));
    assert_eq!(whole, split);
});

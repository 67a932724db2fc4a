/// Implementation of `binr decode`.
///
/// Streams a file (or stdin with `-`) through a [`ReadingContext`] and
/// decodes one record described by `--layout`. Nothing is buffered beyond
/// the active chunk and the value in flight, so arbitrarily large inputs
/// work with a small `--chunk-size`.
///
/// # Output
///
/// ```text
/// text (default)                     --json
/// ────────────────────────────────   ──────────────────────────────────────
///        0  magic: <42 49 4e 52>     [{"name":"magic","type":"bytes",
///        4  count: 2                   "offset":0,"value":[66,73,78,82]},
///        6  points: [1.5, -2]         ...]
///       14  label: "hello"
/// ```
///
/// The left column is the byte offset at which each field starts.
/// Non-finite floats are `null` in JSON.
use std::collections::HashMap;
use std::io::{self, Write as _};

use anyhow::{Context, Result, anyhow, bail};
use binr_decoder::{ByteSource, ReaderConfig, ReaderSource, ReadingContext};
use binr_types::{Decoder as _, Framing, Value};
use log::info;
use serde_json::json;

use crate::DecodeArgs;
use crate::layout::{Arg, FieldSpec, Layout};

/// Largest count accepted for an array of zero-width elements, which
/// never touch the stream and so are not bounded by the input size.
const ZERO_WIDTH_COUNT_LIMIT: usize = 1 << 16;

/// One decoded field.
struct Decoded {
    name: String,
    ty: &'static str,
    offset: u64,
    value: Value,
}

/// Run the `binr decode` command.
///
/// # Errors
///
/// Returns an error if the layout is invalid, the input cannot be opened,
/// a field fails to decode, or `--strict` finds trailing bytes.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let layout = Layout::parse(&args.layout).context("invalid --layout")?;
    let config = ReaderConfig::with_chunk_size(args.chunk_size);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start async runtime")?;

    let record = runtime.block_on(decode_input(args, &layout, config))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let fields: Vec<_> = record.iter().map(to_json).collect();
        serde_json::to_writer_pretty(&mut out, &fields).context("cannot write to stdout")?;
        writeln!(out).context("cannot write to stdout")?;
    } else {
        let width = record.iter().map(|d| d.name.len()).max().unwrap_or(0);
        for field in &record {
            writeln!(
                out,
                "{:>8}  {:<width$}  {}",
                field.offset,
                format!("{}:", field.name),
                field.value,
                width = width + 1
            )
            .context("cannot write to stdout")?;
        }
    }

    Ok(())
}

async fn decode_input(
    args: &DecodeArgs,
    layout: &Layout,
    config: ReaderConfig,
) -> Result<Vec<Decoded>> {
    if args.file == "-" {
        let source = ReaderSource::with_config(tokio::io::stdin(), config);
        return decode_record(source, layout, args.strict)
            .await
            .context("failed to decode stdin");
    }

    let file = tokio::fs::File::open(&args.file)
        .await
        .with_context(|| format!("cannot open {}", args.file))?;
    let source = ReaderSource::with_config(file, config);
    decode_record(source, layout, args.strict)
        .await
        .with_context(|| format!("failed to decode {}", args.file))
}

/// Decode every field of `layout` from `source`, in order.
async fn decode_record<S: ByteSource>(
    source: S,
    layout: &Layout,
    strict: bool,
) -> Result<Vec<Decoded>> {
    let mut ctx = ReadingContext::new(source);
    let mut record: Vec<Decoded> = Vec::with_capacity(layout.fields.len());
    let mut by_name: HashMap<&str, usize> = HashMap::new();

    for field in &layout.fields {
        let offset = ctx.position();
        let value = decode_field(&mut ctx, field, &record, &by_name)
            .await
            .with_context(|| format!("field {:?} ({}) at offset {offset}", field.name, field.ty))?;

        by_name.insert(field.name.as_str(), record.len());
        record.push(Decoded {
            name: field.name.clone(),
            ty: field.ty.name(),
            offset,
            value,
        });
    }

    info!("decoded {} fields, {} bytes", record.len(), ctx.position());

    if strict && !ctx.at_end().await? {
        bail!(
            "trailing bytes after offset {} (drop --strict to ignore them)",
            ctx.position()
        );
    }

    Ok(record)
}

async fn decode_field<S: ByteSource>(
    ctx: &mut ReadingContext<S>,
    field: &FieldSpec,
    record: &[Decoded],
    by_name: &HashMap<&str, usize>,
) -> Result<Value> {
    let length = field
        .length
        .as_ref()
        .map(|arg| resolve(arg, record, by_name))
        .transpose()?;
    let decoder = field.ty.decoder(length)?;

    let Some(count) = &field.count else {
        return Ok(ctx.read(&decoder).await?);
    };
    let count = resolve(count, record, by_name)?;
    let count = usize::try_from(count).map_err(|_| anyhow!("invalid array count {count}"))?;
    if decoder.framing() == Framing::Fixed(0) && count > ZERO_WIDTH_COUNT_LIMIT {
        bail!("array count {count} of zero-width elements exceeds {ZERO_WIDTH_COUNT_LIMIT}");
    }
    Ok(Value::Array(ctx.read_array(&decoder, count).await?))
}

/// Value of a length or count argument.
fn resolve(arg: &Arg, record: &[Decoded], by_name: &HashMap<&str, usize>) -> Result<i64> {
    match arg {
        Arg::Literal(n) => Ok(*n),
        Arg::Field(name) => {
            let decoded = by_name
                .get(name.as_str())
                .map(|&idx| &record[idx])
                .ok_or_else(|| anyhow!("unknown field {name:?}"))?;
            decoded.value.as_i64().ok_or_else(|| {
                anyhow!(
                    "field {name:?} holds {}, not an integer usable as a length or count",
                    decoded.value
                )
            })
        }
    }
}

fn to_json(field: &Decoded) -> serde_json::Value {
    json!({
        "name": field.name,
        "type": field.ty,
        "offset": field.offset,
        "value": value_to_json(&field.value),
    })
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Int(v) => json!(v),
        Value::UInt(v) => json!(v),
        Value::Float(v) => serde_json::Number::from_f64(*v)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        Value::Bytes(bytes) => json!(bytes),
        Value::Text(s) => json!(s),
        Value::Array(items) => items.iter().map(value_to_json).collect(),
    }
}

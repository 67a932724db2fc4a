/// Implementation of `binr types`.
///
/// Lists the decoder catalogue with the byte width of each entry and
/// whether it takes a length argument.
///
/// ```text
/// TYPE         WIDTH         LENGTH
/// int8         1             -
/// lestring16   2-byte units  optional
/// bytes        length        required
/// ```
use std::io::{self, Write as _};

use anyhow::{Context, Result};
use binr_types::{Decoder, FieldType, Framing};

/// Run the `binr types` command.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run() -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "{:<12} {:<13} LENGTH", "TYPE", "WIDTH").context("cannot write to stdout")?;
    for &ty in FieldType::ALL {
        writeln!(out, "{:<12} {:<13} {}", ty.name(), width(ty), length(ty))
            .context("cannot write to stdout")?;
    }
    Ok(())
}

fn width(ty: FieldType) -> String {
    match ty.decoder(None).map(|d| d.framing()) {
        Ok(Framing::Fixed(n)) => n.to_string(),
        Ok(Framing::Delimited { unit: 1, .. }) => "bytewise".to_owned(),
        Ok(Framing::Delimited { unit, .. }) => format!("{unit}-byte units"),
        Err(_) => "length".to_owned(),
    }
}

fn length(ty: FieldType) -> &'static str {
    if ty.requires_length() {
        "required"
    } else if ty.takes_length() {
        "optional"
    } else {
        "-"
    }
}

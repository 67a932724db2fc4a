/// Flat record layouts for `binr decode`.
///
/// A layout is a comma-separated list of fields decoded in order:
///
/// ```text
/// field   := [name ":"] type ["(" arg ")"] ["[" arg "]"]
/// arg     := integer | name-of-earlier-integer-field
///
/// magic:bytes(4),count:leuint16,points:lefloat32[count],label:string8
/// ```
///
/// `(arg)` is the length bound to `bytes` / `string8` / `lestring16` /
/// `bestring16`; `[arg]` turns the field into an array of that many
/// values. An argument naming an earlier field uses the integer decoded
/// for it, so length-prefixed data needs no extra syntax. Unnamed fields
/// are called `field0`, `field1`, ... after their position.
use std::collections::HashSet;

use anyhow::{Context, Result, anyhow, bail, ensure};
use binr_types::FieldType;

/// A parsed layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub fields: Vec<FieldSpec>,
}

/// One field of a layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub ty: FieldType,
    pub length: Option<Arg>,
    pub count: Option<Arg>,
}

/// A length or count: literal, or taken from an earlier field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Arg {
    Literal(i64),
    Field(String),
}

impl Layout {
    /// Parse and validate a layout string.
    ///
    /// Every check that does not depend on stream contents happens here:
    /// unknown types, a missing `bytes` length, a length on a fixed-width
    /// type, negative literal counts, duplicate names, and references to
    /// fields that are not defined earlier.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field.
    pub fn parse(s: &str) -> Result<Self> {
        let mut fields: Vec<FieldSpec> = Vec::new();
        let mut seen = HashSet::new();

        for (idx, raw) in s.split(',').map(str::trim).enumerate() {
            ensure!(!raw.is_empty(), "empty field at position {idx}");
            let field =
                parse_field(raw, idx).with_context(|| format!("invalid field {raw:?}"))?;

            for arg in [&field.length, &field.count].into_iter().flatten() {
                if let Arg::Field(name) = arg {
                    ensure!(
                        seen.contains(name.as_str()),
                        "field {:?} refers to {name:?}, which is not defined before it",
                        field.name
                    );
                }
            }
            ensure!(
                seen.insert(field.name.clone()),
                "duplicate field name {:?}",
                field.name
            );
            fields.push(field);
        }

        Ok(Self { fields })
    }
}

fn parse_field(raw: &str, idx: usize) -> Result<FieldSpec> {
    let (name, rest) = match raw.split_once(':') {
        Some((name, rest)) => {
            let name = name.trim();
            ensure!(is_identifier(name), "bad field name {name:?}");
            (name.to_owned(), rest.trim())
        }
        None => (format!("field{idx}"), raw),
    };

    let type_end = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    let (type_name, mut rest) = rest.split_at(type_end);
    let ty = FieldType::from_name(type_name)?;

    let length = match take_group(&mut rest, '(', ')')? {
        Some(arg) => Some(parse_arg(arg)?),
        None => None,
    };
    let count = match take_group(&mut rest, '[', ']')? {
        Some(arg) => Some(parse_arg(arg)?),
        None => None,
    };
    ensure!(rest.is_empty(), "unexpected trailing text {rest:?}");

    if length.is_some() && !ty.takes_length() {
        bail!("{ty} does not take a length");
    }
    if length.is_none() && ty.requires_length() {
        bail!("{ty} requires a length, e.g. {ty}(16)");
    }
    if let Some(Arg::Literal(n)) = count {
        ensure!(n >= 0, "negative count {n}");
    }

    Ok(FieldSpec {
        name,
        ty,
        length,
        count,
    })
}

/// Strip `open ... close` from the front of `rest`, returning the inside.
fn take_group<'a>(rest: &mut &'a str, open: char, close: char) -> Result<Option<&'a str>> {
    let Some(inner) = rest.strip_prefix(open) else {
        return Ok(None);
    };
    let end = inner
        .find(close)
        .ok_or_else(|| anyhow!("missing {close:?}"))?;
    *rest = &inner[end + close.len_utf8()..];
    Ok(Some(inner[..end].trim()))
}

fn parse_arg(s: &str) -> Result<Arg> {
    if let Ok(n) = s.parse::<i64>() {
        return Ok(Arg::Literal(n));
    }
    ensure!(is_identifier(s), "expected an integer or a field name, got {s:?}");
    Ok(Arg::Field(s.to_owned()))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str, ty: FieldType) -> FieldSpec {
        FieldSpec {
            name: name.to_owned(),
            ty,
            length: None,
            count: None,
        }
    }

    #[test]
    fn full_example() {
        let layout =
            Layout::parse("magic:bytes(4),count:leuint16,points:lefloat32[3],label:string8")
                .unwrap();
        assert_eq!(
            layout.fields,
            vec![
                FieldSpec {
                    length: Some(Arg::Literal(4)),
                    ..field("magic", FieldType::Bytes)
                },
                field("count", FieldType::LeUInt16),
                FieldSpec {
                    count: Some(Arg::Literal(3)),
                    ..field("points", FieldType::LeFloat32)
                },
                field("label", FieldType::String8),
            ]
        );
    }

    #[test]
    fn unnamed_fields_get_positional_names() {
        let layout = Layout::parse("uint8, int8").unwrap();
        assert_eq!(layout.fields[0].name, "field0");
        assert_eq!(layout.fields[1].name, "field1");
    }

    #[test]
    fn references_to_earlier_fields() {
        let layout = Layout::parse("n:uint8,len:leuint16,items:lestring16(len)[n]").unwrap();
        let items = &layout.fields[2];
        assert_eq!(items.length, Some(Arg::Field("len".into())));
        assert_eq!(items.count, Some(Arg::Field("n".into())));
    }

    #[test]
    fn forward_reference_rejected() {
        let err = Layout::parse("data:bytes(len),len:uint8").unwrap_err();
        assert!(err.to_string().contains("not defined before it"));
    }

    #[test]
    fn length_rules() {
        assert!(Layout::parse("bytes").is_err());
        assert!(Layout::parse("leint16(2)").is_err());
        assert!(Layout::parse("string8").is_ok());
        assert!(Layout::parse("string8(8)").is_ok());
    }

    #[test]
    fn malformed_fields() {
        assert!(Layout::parse("").is_err());
        assert!(Layout::parse("uint8,,uint8").is_err());
        assert!(Layout::parse("int128").is_err());
        assert!(Layout::parse("bytes(4").is_err());
        assert!(Layout::parse("uint8[-1]").is_err());
        assert!(Layout::parse("uint8[2]x").is_err());
        assert!(Layout::parse("a:uint8,a:uint8").is_err());
        assert!(Layout::parse("1a:uint8").is_err());
    }
}

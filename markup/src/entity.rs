use std::borrow::Cow;

/// A reference in an attribute value that we can't decode.
#[derive(Debug, thiserror::Error)]
#[error("invalid entity or character reference '&{reference}'")]
pub struct BadReference {
    /// Byte offset of the '&' within the raw value.
    pub pos: usize,
    pub reference: String,
}

/// Decode predefined entities and numeric character references.
/// Values without any references are returned without copying.
pub fn unescape(raw: &str) -> Result<Cow<'_, str>, BadReference> {
    if !raw.contains('&') {
        return Ok(Cow::Borrowed(raw));
    }
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let pos = raw.len() - rest.len() + amp;
        let after = &rest[amp + 1..];
        let end = after.find(';').ok_or_else(|| BadReference {
            pos,
            reference: after.chars().take(8).collect(),
        })?;
        let name = &after[..end];
        let c = resolve(name).ok_or_else(|| BadReference {
            pos,
            reference: format!("{name};"),
        })?;
        out.push(c);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(Cow::Owned(out))
}

fn resolve(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x") {
                u32::from_str_radix(hex, 16).ok()?
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse().ok()?
            } else {
                return None;
            };
            char::from_u32(code)
        }
    }
}

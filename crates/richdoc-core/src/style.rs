// SPDX-License-Identifier: AGPL-3.0-or-later
//! Inline style attribute handling: colour grammar and text alignment

use crate::ast::Alignment;

/// Iterate the `property: value` declarations of a style attribute.
///
/// Property names are lowercased; values are trimmed. Malformed
/// declarations (no colon, empty property) are skipped.
pub fn declarations(style: &str) -> impl Iterator<Item = (String, &str)> {
    style.split(';').filter_map(|decl| {
        let (prop, value) = decl.split_once(':')?;
        let prop = prop.trim();
        if prop.is_empty() {
            return None;
        }
        Some((prop.to_ascii_lowercase(), value.trim()))
    })
}

/// Value of the last declaration of `property`, if any
pub fn declaration<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    declarations(style)
        .filter(|(prop, _)| prop == property)
        .map(|(_, value)| value)
        .last()
}

/// Resolve the foreground colour declared in a style attribute
pub fn style_color(style: &str) -> Option<String> {
    declaration(style, "color").and_then(parse_color)
}

/// Parse a CSS colour into six hex digits without the leading `#`.
///
/// Accepts `#RRGGBB` (returned as written), `#RGB` shorthand (each digit
/// doubled) and `rgb()`/`rgba()` functional notation (alpha ignored).
/// Anything else resolves to `None`.
pub fn parse_color(raw: &str) -> Option<String> {
    let value = raw.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex);
    }
    parse_rgb_function(value)
}

fn parse_hex(hex: &str) -> Option<String> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(hex.to_string()),
        3 => Some(hex.chars().flat_map(|c| [c, c]).collect()),
        _ => None,
    }
}

fn parse_rgb_function(value: &str) -> Option<String> {
    let lower = value.to_ascii_lowercase();
    let args = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("))?
        .strip_suffix(')')?;

    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return None;
    }

    let mut out = String::with_capacity(6);
    for channel in &parts[..3] {
        out.push_str(&format!("{:02x}", parse_channel(channel)?));
    }
    Some(out)
}

fn parse_channel(channel: &str) -> Option<u8> {
    let n: f64 = channel.parse().ok()?;
    if !n.is_finite() {
        return None;
    }
    Some(n.round().clamp(0.0, 255.0) as u8)
}

/// Resolve paragraph alignment from a style attribute.
///
/// Checks for `text-align` center, right and justify in that order; the
/// first present wins. Left/start is never encoded and yields `None`.
pub fn resolve_alignment(style: &str) -> Option<Alignment> {
    let compact: String = style
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    if compact.contains("text-align:center") {
        Some(Alignment::Center)
    } else if compact.contains("text-align:right") {
        Some(Alignment::End)
    } else if compact.contains("text-align:justify") {
        Some(Alignment::Justify)
    } else {
        None
    }
}

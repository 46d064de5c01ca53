//! Cleanup of free-text catalog values

use regex::{Captures, Regex};
use std::sync::OnceLock;

static MARKUP_RE: OnceLock<Regex> = OnceLock::new();
static ENTITY_RE: OnceLock<Regex> = OnceLock::new();

fn markup_regex() -> &'static Regex {
    MARKUP_RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("valid regex"))
}

fn entity_regex() -> &'static Regex {
    ENTITY_RE.get_or_init(|| {
        Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid regex")
    })
}

/// Strip embedded markup, unescape entity references and collapse
/// whitespace. Returns `None` when nothing is left.
pub(crate) fn sanitize_text(raw: &str) -> Option<String> {
    let stripped = markup_regex().replace_all(raw, "");
    let unescaped = entity_regex().replace_all(&stripped, |caps: &Captures| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    let collapsed = unescaped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

fn decode_entity(body: &str) -> Option<String> {
    let c = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => {
            let code = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                body.strip_prefix('#')?.parse::<u32>().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some(c.to_string())
}

//! Text escaping helpers shared by the target encoders.

use std::borrow::Cow;

use lazy_static::lazy_static;
use quick_xml::escape::resolve_html5_entity;
use regex::{Captures, Regex};

lazy_static! {
    static ref ENTITY_REGEX: Regex =
        Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);").unwrap();
    // Escaped or literal line-break tags, including the near-miss spellings
    // seen in exports (`</br>`, `<br >`, `&lt;BR/&gt;`, ...).
    static ref LINE_BREAK_REGEX: Regex =
        Regex::new(r"(?i)(?:&lt;|<)\s*/?\s*br\s*/?\s*(?:&gt;|>)").unwrap();
}

/// Decodes HTML character references.
///
/// Unknown names and invalid code points are left untouched, so a stray `&`
/// never causes an error.
pub fn html_unescape(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    ENTITY_REGEX.replace_all(text, |caps: &Captures<'_>| {
        let body = &caps[1];
        let decoded = match body.strip_prefix('#') {
            Some(number) => {
                let code = match number.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => number.parse::<u32>().ok(),
                };
                code.and_then(char::from_u32).map(String::from)
            }
            None => resolve_html5_entity(body).map(String::from),
        };
        decoded.unwrap_or_else(|| caps[0].to_string())
    })
}

/// Escapes a value for an Android `strings.xml` resource.
///
/// The order of the steps is significant: quotes are escaped before any
/// `&quot;` entity is turned into a quote, which then gets escaped too, and
/// markup is rewritten last.
pub fn escape_android(text: &str) -> String {
    let text = text.replace('\'', r"\'");
    let text = text.replace("&quot;", "\"");
    let text = text.replace('"', "\\\"");
    let text = text.replace("&lt;b&gt;", "<b>");
    let text = text.replace("&lt;/b&gt;", "</b>");
    LINE_BREAK_REGEX.replace_all(&text, r"\n").into_owned()
}

/// Escapes `text` for use inside a double-quoted Kotlin or Swift literal.
pub(crate) fn escape_double_quoted(text: &str) -> String {
    text.replace('\\', r"\\").replace('"', "\\\"")
}

/// Escapes `text` for use inside a single-quoted TypeScript literal.
pub(crate) fn escape_single_quoted(text: &str) -> String {
    text.replace('\\', r"\\").replace('\'', r"\'")
}

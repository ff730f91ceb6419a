//! HTML entity decoding and escaping.
//!
//! Only the entity forms the console's pages actually emit are handled;
//! anything unrecognized passes through as literal text.

use std::borrow::Cow;

/// Longest entity body this decoder will look for between `&` and `;`.
/// Unmatched ampersands in page text would otherwise trigger unbounded
/// scans for a `;` that never comes.
const MAX_ENTITY_LEN: usize = 10;

/// Decode the named and numeric entities found in console markup.
///
/// Returns the input unchanged (borrowed) when it contains no `&`.
pub(crate) fn decode(input: &str) -> Cow<'_, str> {
    if !input.contains('&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        if let Some((ch, consumed)) = decode_entity(rest) {
            out.push(ch);
            rest = &rest[consumed..];
        } else {
            out.push('&');
            rest = &rest[1..];
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Decode a single entity at the start of `input` (which begins with `&`).
/// Returns the decoded char and the number of bytes consumed.
fn decode_entity(input: &str) -> Option<(char, usize)> {
    let semicolon = input[1..]
        .find(';')
        .filter(|&i| i > 0 && i <= MAX_ENTITY_LEN)?;
    let body = &input[1..=semicolon];
    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => {
            let digits = body.strip_prefix('#')?;
            let code = if let Some(hex) = digits.strip_prefix(['x', 'X']) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                digits.parse::<u32>().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some((ch, semicolon + 2))
}

/// Escape a value the way the console embeds it in its edit-form markup.
///
/// Matches the console's encoding choices exactly, including the named
/// `&quot;` form for double quotes; the deep search relies on the escaped
/// string being byte-identical to what the edit page contains.
#[must_use]
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

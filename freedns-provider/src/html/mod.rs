//! Forward-only HTML tokenizer.
//!
//! The console renders everything server-side, so every extraction in this
//! crate is a single pass over the lexical token stream of one page. This
//! tokenizer is deliberately not a parser: no tree, no backtracking, no
//! validation. Malformed markup never errors; it degrades into more text
//! and tag tokens, the way a browser's tokenizer would keep going.

pub mod entities;

use std::borrow::Cow;

/// One lexical unit of an HTML stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// An opening tag with its (unparsed) attribute source.
    StartTag(Tag<'a>),
    /// A closing tag name, as written.
    EndTag(&'a str),
    /// A run of character data with entities decoded.
    Text(Cow<'a, str>),
    /// End of stream. Repeats forever once reached.
    Eof,
}

/// An opening tag. Attributes are parsed lazily through [`Tag::attrs`], so
/// a consumer that only needs one key can stop at the first match without
/// materializing the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag<'a> {
    name: &'a str,
    attr_src: &'a str,
}

impl<'a> Tag<'a> {
    /// Tag name as written in the source.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Case-insensitive name comparison.
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Iterate the tag's attributes in source order.
    #[must_use]
    pub fn attrs(&self) -> Attrs<'a> {
        Attrs {
            src: self.attr_src,
            pos: 0,
        }
    }

    /// The value of the first attribute with the given (case-insensitive)
    /// name, decoding entities. Stops scanning at the first match.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<Cow<'a, str>> {
        self.attrs()
            .find(|a| a.name.eq_ignore_ascii_case(name))
            .map(|a| a.value)
    }
}

/// A single attribute key/value pair. Valueless attributes carry an empty
/// value.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr<'a> {
    /// Attribute name, as written.
    pub name: &'a str,
    /// Attribute value with entities decoded; empty when absent.
    pub value: Cow<'a, str>,
}

fn is_attr_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

/// Lazy attribute iterator over a start tag's attribute source.
#[derive(Debug, Clone)]
pub struct Attrs<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Iterator for Attrs<'a> {
    type Item = Attr<'a>;

    fn next(&mut self) -> Option<Attr<'a>> {
        let bytes = self.src.as_bytes();
        let len = bytes.len();
        loop {
            while self.pos < len
                && (bytes[self.pos].is_ascii_whitespace() || bytes[self.pos] == b'/')
            {
                self.pos += 1;
            }
            if self.pos >= len {
                return None;
            }

            let name_start = self.pos;
            while self.pos < len && is_attr_name_byte(bytes[self.pos]) {
                self.pos += 1;
            }
            if name_start == self.pos {
                // junk byte; skip it and try again
                self.pos += 1;
                continue;
            }
            let name = &self.src[name_start..self.pos];

            while self.pos < len && bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos >= len || bytes[self.pos] != b'=' {
                return Some(Attr {
                    name,
                    value: Cow::Borrowed(""),
                });
            }
            self.pos += 1;
            while self.pos < len && bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }

            let value = if self.pos < len && (bytes[self.pos] == b'"' || bytes[self.pos] == b'\'')
            {
                let quote = bytes[self.pos];
                self.pos += 1;
                let value_start = self.pos;
                while self.pos < len && bytes[self.pos] != quote {
                    self.pos += 1;
                }
                let raw = &self.src[value_start..self.pos];
                if self.pos < len {
                    self.pos += 1;
                }
                entities::decode(raw)
            } else {
                let value_start = self.pos;
                while self.pos < len
                    && !bytes[self.pos].is_ascii_whitespace()
                    && bytes[self.pos] != b'>'
                {
                    self.pos += 1;
                }
                entities::decode(&self.src[value_start..self.pos])
            };

            return Some(Attr { name, value });
        }
    }
}

/// Tokenizer over one page of markup.
///
/// Yields a lazy, finite sequence of [`Token`]s ending in [`Token::Eof`].
/// `<script>` and `<style>` bodies are treated as raw text up to their
/// matching close tag, mirroring browser rawtext handling.
pub struct Tokenizer<'a> {
    input: &'a str,
    pos: usize,
    /// Pending rawtext element name after a `<script>`/`<style>` start tag.
    rawtext: Option<&'a str>,
}

impl<'a> Tokenizer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            rawtext: None,
        }
    }

    /// The next token. Never fails; returns [`Token::Eof`] at (and past)
    /// the end of input.
    pub fn next_token(&mut self) -> Token<'a> {
        let bytes = self.input.as_bytes();
        let len = bytes.len();
        loop {
            if let Some(name) = self.rawtext.take() {
                if let Some(token) = self.rawtext_body(name) {
                    return token;
                }
                continue;
            }

            if self.pos >= len {
                return Token::Eof;
            }

            if bytes[self.pos] != b'<' {
                return self.text_run();
            }

            let rest = &self.input[self.pos..];
            if rest.starts_with("<!--") {
                // comment; nothing in it interests the scrapers
                match rest.find("-->") {
                    Some(end) => self.pos += end + 3,
                    None => self.pos = len,
                }
                continue;
            }
            if rest.len() >= 2 && (bytes[self.pos + 1] == b'!' || bytes[self.pos + 1] == b'?') {
                // doctype or processing instruction; skip to '>'
                match rest.find('>') {
                    Some(end) => self.pos += end + 1,
                    None => self.pos = len,
                }
                continue;
            }
            if rest.len() >= 2 && bytes[self.pos + 1] == b'/' {
                return self.end_tag();
            }
            if rest.len() >= 2 && bytes[self.pos + 1].is_ascii_alphabetic() {
                return self.start_tag();
            }

            // stray '<'; fold it into the following text run
            return self.text_run();
        }
    }

    /// Collect character data up to the next '<' (the current byte is
    /// included even when it is a stray '<').
    fn text_run(&mut self) -> Token<'a> {
        let bytes = self.input.as_bytes();
        let start = self.pos;
        self.pos += 1;
        while self.pos < bytes.len() && bytes[self.pos] != b'<' {
            self.pos += 1;
        }
        Token::Text(entities::decode(&self.input[start..self.pos]))
    }

    fn end_tag(&mut self) -> Token<'a> {
        let bytes = self.input.as_bytes();
        let len = bytes.len();
        let name_start = self.pos + 2;
        let mut end = name_start;
        while end < len && bytes[end].is_ascii_alphanumeric() {
            end += 1;
        }
        let name = &self.input[name_start..end];
        while end < len && bytes[end] != b'>' {
            end += 1;
        }
        self.pos = if end < len { end + 1 } else { len };
        Token::EndTag(name)
    }

    fn start_tag(&mut self) -> Token<'a> {
        let bytes = self.input.as_bytes();
        let len = bytes.len();
        let name_start = self.pos + 1;
        let mut cursor = name_start;
        while cursor < len && bytes[cursor].is_ascii_alphanumeric() {
            cursor += 1;
        }
        let name = &self.input[name_start..cursor];

        // find the closing '>', skipping over quoted attribute values
        let attr_start = cursor;
        let mut quote: Option<u8> = None;
        while cursor < len {
            let b = bytes[cursor];
            match quote {
                Some(q) => {
                    if b == q {
                        quote = None;
                    }
                }
                None => {
                    if b == b'"' || b == b'\'' {
                        quote = Some(b);
                    } else if b == b'>' {
                        break;
                    }
                }
            }
            cursor += 1;
        }
        let attr_src = &self.input[attr_start..cursor];
        self.pos = if cursor < len { cursor + 1 } else { len };

        let self_closing = attr_src.trim_end().ends_with('/');
        if !self_closing && (name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style"))
        {
            self.rawtext = Some(name);
        }

        Token::StartTag(Tag { name, attr_src })
    }

    /// Raw text after a `<script>`/`<style>` start tag, up to the matching
    /// close tag (which the main loop then tokenizes normally). Entities are
    /// not decoded in rawtext. Returns `None` when the body is empty.
    fn rawtext_body(&mut self, name: &'a str) -> Option<Token<'a>> {
        let bytes = self.input.as_bytes();
        let len = bytes.len();
        let start = self.pos;
        let mut cursor = start;
        while cursor < len {
            if bytes[cursor] == b'<'
                && cursor + 1 < len
                && bytes[cursor + 1] == b'/'
                && self.input[cursor + 2..]
                    .get(..name.len())
                    .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
            {
                let after = cursor + 2 + name.len();
                if after >= len
                    || bytes[after] == b'>'
                    || bytes[after] == b'/'
                    || bytes[after].is_ascii_whitespace()
                {
                    break;
                }
            }
            cursor += 1;
        }
        self.pos = cursor;
        if cursor == start {
            return None;
        }
        Some(Token::Text(Cow::Borrowed(&self.input[start..cursor])))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<Token<'_>> {
        let mut tokenizer = Tokenizer::new(input);
        let mut out = Vec::new();
        loop {
            let token = tokenizer.next_token();
            if token == Token::Eof {
                return out;
            }
            out.push(token);
        }
    }

    // ---- basic shapes ----

    #[test]
    fn start_text_end() {
        let tokens = collect("<b>example.com</b>");
        assert!(matches!(
            tokens.as_slice(),
            [Token::StartTag(tag), Token::Text(text), Token::EndTag(end)]
                if tag.is("b") && text == "example.com" && *end == "b"
        ));
    }

    #[test]
    fn eof_repeats() {
        let mut tokenizer = Tokenizer::new("x");
        assert!(matches!(tokenizer.next_token(), Token::Text(_)));
        assert_eq!(tokenizer.next_token(), Token::Eof);
        assert_eq!(tokenizer.next_token(), Token::Eof);
    }

    #[test]
    fn comments_and_doctype_are_skipped() {
        let tokens = collect("<!DOCTYPE html><!-- row --><td>TXT</td>");
        assert!(matches!(
            tokens.as_slice(),
            [Token::StartTag(tag), Token::Text(text), Token::EndTag(_)]
                if tag.is("td") && text == "TXT"
        ));
    }

    #[test]
    fn entities_decoded_in_text() {
        let tokens = collect("<td>&quot;TEST&quot;</td>");
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == "\"TEST\"")),
            "expected decoded text, got: {tokens:?}"
        );
    }

    // ---- attributes ----

    #[test]
    fn attr_lookup_finds_href() {
        let tokens = collect(r#"<a class="mgt" href="/subdomain/?limit=1234567">[Manage]</a>"#);
        let Some(Token::StartTag(tag)) = tokens.first() else {
            panic!("expected start tag, got: {tokens:?}");
        };
        assert_eq!(tag.attr("href").as_deref(), Some("/subdomain/?limit=1234567"));
        assert_eq!(tag.attr("missing"), None);
    }

    #[test]
    fn attrs_stop_early_without_full_materialization() {
        let tokens = collect(r#"<a href="edit.php?data_id=1" onclick="x()" title="t">e</a>"#);
        let Some(Token::StartTag(tag)) = tokens.first() else {
            panic!("expected start tag, got: {tokens:?}");
        };
        let mut attrs = tag.attrs();
        let first = attrs.next().unwrap();
        assert_eq!(first.name, "href");
        assert_eq!(first.value, "edit.php?data_id=1");
        // remaining attributes stay unparsed inside the iterator
        drop(attrs);
    }

    #[test]
    fn attr_variants() {
        let tokens = collect("<td bgcolor=#eeeeee nowrap align = 'left'>v</td>");
        let Some(Token::StartTag(tag)) = tokens.first() else {
            panic!("expected start tag, got: {tokens:?}");
        };
        let attrs: Vec<_> = tag.attrs().collect();
        assert_eq!(attrs.len(), 3);
        assert_eq!(attrs[0].name, "bgcolor");
        assert_eq!(attrs[0].value, "#eeeeee");
        assert_eq!(attrs[1].name, "nowrap");
        assert_eq!(attrs[1].value, "");
        assert_eq!(attrs[2].name, "align");
        assert_eq!(attrs[2].value, "left");
    }

    #[test]
    fn attr_value_entities_decoded() {
        let tokens = collect(r#"<input value="&quot;TEST&quot;">"#);
        let Some(Token::StartTag(tag)) = tokens.first() else {
            panic!("expected start tag, got: {tokens:?}");
        };
        assert_eq!(tag.attr("value").as_deref(), Some("\"TEST\""));
    }

    #[test]
    fn quoted_gt_does_not_end_tag() {
        let tokens = collect(r#"<a href="edit.php?a>b">x</a>"#);
        let Some(Token::StartTag(tag)) = tokens.first() else {
            panic!("expected start tag, got: {tokens:?}");
        };
        assert_eq!(tag.attr("href").as_deref(), Some("edit.php?a>b"));
        assert!(matches!(&tokens[1], Token::Text(s) if s == "x"));
    }

    // ---- permissiveness ----

    #[test]
    fn stray_lt_degrades_to_text() {
        let tokens = collect("a < b <b>c</b>");
        assert!(matches!(&tokens[0], Token::Text(s) if s == "a "));
        assert!(matches!(&tokens[1], Token::Text(s) if s == "< b "));
        assert!(matches!(&tokens[2], Token::StartTag(tag) if tag.is("b")));
    }

    #[test]
    fn unterminated_tag_does_not_panic() {
        let tokens = collect("<td bgcolor=\"#eeeeee");
        assert!(matches!(
            tokens.as_slice(),
            [Token::StartTag(tag)] if tag.is("td")
        ));
    }

    #[test]
    fn unterminated_comment_does_not_panic() {
        assert!(collect("x<!-- never closed").len() == 1);
    }

    #[test]
    fn uppercase_names_match_case_insensitively() {
        let tokens = collect("<TD>TXT</TD>");
        assert!(matches!(&tokens[0], Token::StartTag(tag) if tag.is("td")));
        assert!(matches!(&tokens[2], Token::EndTag(name) if name.eq_ignore_ascii_case("td")));
    }

    #[test]
    fn non_ascii_text_survives() {
        let tokens = collect("<b>café 日本</b>");
        assert!(
            tokens
                .iter()
                .any(|t| matches!(t, Token::Text(s) if s == "café 日本")),
            "expected UTF-8 text token, got: {tokens:?}"
        );
    }

    // ---- rawtext ----

    #[test]
    fn script_body_is_one_raw_text_token() {
        let tokens = collect("<script>if (a < b) { x(); }</script><td>v</td>");
        assert!(matches!(
            &tokens[..3],
            [Token::StartTag(tag), Token::Text(body), Token::EndTag(end)]
                if tag.is("script") && body == "if (a < b) { x(); }" && end.eq_ignore_ascii_case("script")
        ));
        assert!(matches!(&tokens[3], Token::StartTag(tag) if tag.is("td")));
    }

    #[test]
    fn script_close_tag_matched_case_insensitively() {
        let tokens = collect("<script>let x = 1;</SCRIPT>");
        assert!(matches!(
            tokens.as_slice(),
            [Token::StartTag(_), Token::Text(body), Token::EndTag(_)]
                if body == "let x = 1;"
        ));
    }

    #[test]
    fn unclosed_script_consumes_rest_as_text() {
        let tokens = collect("<script>const x = '<td>';");
        assert!(matches!(
            tokens.as_slice(),
            [Token::StartTag(_), Token::Text(body)] if body == "const x = '<td>';"
        ));
    }
}

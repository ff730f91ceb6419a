//! Domain-id extraction from the domain listing page.

use crate::html::{Token, Tokenizer};

/// Prefix of the management anchor's href; the domain id trails it.
const MANAGE_HREF_PREFIX: &str = "/subdomain/?limit=";

/// Each domain is listed as a bold name followed by its management anchor:
///
/// ```html
/// <b>DOMAIN_NAME</b> <a href="/subdomain/?limit=1234567">[Manage]</a>
/// ```
enum ScanState {
    /// Waiting for the target name to show up inside a bold element.
    SeekLabel,
    /// Name matched; the next management anchor carries the id.
    SeekAnchor,
}

/// Scan the domain listing page for the internal id of `domain`.
///
/// The scan commits to the first bold label whose following management
/// anchor matches and stops there; later candidates with the same name are
/// never evaluated.
pub(crate) fn domain_id(page: &str, domain: &str) -> Option<String> {
    let mut tokens = Tokenizer::new(page);
    let mut state = ScanState::SeekLabel;
    // true only while the most recently opened tag is literally <b>
    let mut in_bold = false;

    loop {
        match tokens.next_token() {
            Token::Eof => return None,
            Token::Text(text) => {
                if matches!(state, ScanState::SeekLabel) && in_bold && text.trim() == domain {
                    log::info!("[freedns] found {domain}, looking for its domain id");
                    state = ScanState::SeekAnchor;
                }
            }
            Token::StartTag(tag) => {
                in_bold = tag.is("b");
                if matches!(state, ScanState::SeekAnchor) && tag.is("a") {
                    if let Some(href) = tag.attr("href") {
                        if let Some(id) = href.strip_prefix(MANAGE_HREF_PREFIX) {
                            log::debug!("[freedns] domain id for '{domain}' is {id}");
                            return Some(id.to_string());
                        }
                    }
                }
            }
            Token::EndTag(_) => {}
        }
    }
}

//! Record-row extraction from the record listing page.

use crate::html::{Token, Tokenizer};

/// Marker inside a row's edit anchor; the record id trails it.
const EDIT_HREF_MARKER: &str = "edit.php?data_id=";

/// The listing truncates long values and marks the cut with an ellipsis.
const TRUNCATION_SUFFIX: &str = "...";

/// One listing row that matched the queried (type, label) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RowHit {
    /// Record id from the row's edit anchor.
    pub id: String,
    /// The value cell as displayed, possibly truncated.
    pub value: String,
}

/// Scan result: at most one exact hit, plus the truncated rows whose
/// visible prefix is compatible with the queried value, in page order.
#[derive(Debug, Default)]
pub(crate) struct ListingScan {
    pub exact: Option<RowHit>,
    pub candidates: Vec<RowHit>,
}

/// Each logical record spans an edit anchor (id + subdomain label) and the
/// two plain cells that follow it (type, then value):
///
/// ```html
/// <td bgcolor="#eeeeee">
///     <a href="edit.php?data_id=0000000">SUBDOMAIN</a> (<b><font color="blue">G</font></b>)
/// </td>
/// <td bgcolor="#eeeeee">TXT</td>
/// <td bgcolor="#eeeeee">"google-site-verification=truncated_text...</td>
/// ```
enum RowState {
    /// No row armed; waiting for the next edit anchor.
    Idle,
    /// Anchor seen; its text is the label, the next plain cell the type.
    AwaitType { id: String, label: Option<String> },
    /// Type captured; the next plain cell holds the value.
    AwaitValue {
        id: String,
        label: Option<String>,
        cell_type: String,
    },
}

/// Scan the listing for a row matching (subdomain, type, address).
///
/// Rows are assumed append-ordered, so the first exact value match wins and
/// ends the scan immediately. Truncated rows whose prefix matches are
/// queued for the caller's deep search instead.
pub(crate) fn scan(
    page: &str,
    subdomain: &str,
    record_type: &str,
    address: &str,
) -> ListingScan {
    let mut tokens = Tokenizer::new(page);
    let mut state = RowState::Idle;
    // the most recently opened tag, deliberately not a stack: the row
    // markup is flat enough that the trailing status glyph markup
    // (<b><font>..</font></b>) simply moves the context off 'a'/'td'
    let mut last_open = "";
    let mut candidates = Vec::new();

    loop {
        match tokens.next_token() {
            Token::Eof => break,
            Token::StartTag(tag) => {
                last_open = tag.name();
                if tag.is("a") {
                    if let Some(href) = tag.attr("href") {
                        if let Some((_, id)) = href.split_once(EDIT_HREF_MARKER) {
                            state = RowState::AwaitType {
                                id: id.to_string(),
                                label: None,
                            };
                        }
                    }
                }
            }
            Token::Text(text) => {
                state = match state {
                    RowState::AwaitType { id, label: None }
                        if last_open.eq_ignore_ascii_case("a") =>
                    {
                        RowState::AwaitType {
                            id,
                            label: Some(text.trim().to_string()),
                        }
                    }
                    RowState::AwaitType { id, label }
                        if last_open.eq_ignore_ascii_case("td") =>
                    {
                        RowState::AwaitValue {
                            id,
                            label,
                            cell_type: text.into_owned(),
                        }
                    }
                    RowState::AwaitValue {
                        id,
                        label,
                        cell_type,
                    } if last_open.eq_ignore_ascii_case("td") => {
                        let value = text.into_owned();
                        if cell_type == record_type
                            && label.as_deref().unwrap_or("") == subdomain
                        {
                            if value == address {
                                return ListingScan {
                                    exact: Some(RowHit { id, value }),
                                    candidates,
                                };
                            }
                            if let Some(prefix) = value.strip_suffix(TRUNCATION_SUFFIX) {
                                if address.starts_with(prefix) {
                                    log::debug!(
                                        "[freedns] record {id} shows truncated value, queueing for deep search"
                                    );
                                    candidates.push(RowHit { id, value });
                                }
                            }
                        }
                        RowState::Idle
                    }
                    other => other,
                };
            }
            Token::EndTag(_) => {}
        }
    }

    ListingScan {
        exact: None,
        candidates,
    }
}

//! Validation-message extraction from a rejected save-form response.

use crate::html::{Token, Tokenizer};

/// The console wraps its complaints in `<font>` elements.
const EMPHASIS_TAG: &str = "font";

/// The page announces "1 error" / "N errors" and then renders each message
/// in its own emphasis element:
///
/// ```html
/// <font size="2"><b>2 errors</b></font>
/// <font color="red">Type is required</font>
/// <font color="red">Invalid subdomain</font>
/// ```
///
/// The count message itself sits inside an emphasis element, so N+1 closes
/// remain once the count is read; the count element's own close consumes
/// the extra one without emitting a message. This accounting is coupled to
/// the console's exact nesting and lives only here, so a page change
/// touches one function.
/// TODO: verify the off-by-one against a page announcing more than 9
/// errors; no capture of one exists yet.
enum BlockState {
    /// Looking for the "N error(s)" count text.
    SeekCount,
    /// Count read; waiting for the next emphasis element to open or close.
    SeekOpen { remaining: i32 },
    /// Inside an emphasis element, buffering its text.
    Collect { remaining: i32, buf: String },
}

fn close_step(remaining: i32) -> BlockState {
    if remaining > 0 {
        BlockState::SeekOpen { remaining }
    } else {
        BlockState::SeekCount
    }
}

/// Collect the ordered validation messages from a rejected save response.
/// Returns an empty list when the page carries no recognizable error block.
pub(crate) fn extract(page: &str) -> Vec<String> {
    let mut tokens = Tokenizer::new(page);
    let mut state = BlockState::SeekCount;
    let mut messages = Vec::new();

    loop {
        match tokens.next_token() {
            Token::Eof => break,
            Token::Text(text) => {
                let text = text.trim();
                // the count announcement takes precedence even while
                // collecting; a fresh "N errors" restarts the block
                if text.ends_with("error") || text.ends_with("errors") {
                    let lead = text.strip_suffix('s').unwrap_or(text);
                    let lead = lead.strip_suffix("error").unwrap_or(lead).trim();
                    let count = lead.parse::<i8>().unwrap_or(0);
                    state = BlockState::SeekOpen {
                        remaining: i32::from(count) + 1,
                    };
                } else if let BlockState::Collect { buf, .. } = &mut state {
                    buf.push_str(text);
                }
            }
            Token::StartTag(tag) => {
                if tag.is(EMPHASIS_TAG) {
                    state = match state {
                        BlockState::SeekOpen { remaining } | BlockState::Collect { remaining, .. }
                            if remaining > 0 =>
                        {
                            BlockState::Collect {
                                remaining,
                                buf: String::new(),
                            }
                        }
                        other => other,
                    };
                }
            }
            Token::EndTag(name) => {
                if name.eq_ignore_ascii_case(EMPHASIS_TAG) {
                    state = match state {
                        BlockState::SeekOpen { remaining } if remaining > 0 => {
                            // the count element closing; no message in it
                            close_step(remaining - 1)
                        }
                        BlockState::Collect { remaining, buf } if remaining > 0 => {
                            messages.push(buf.trim().to_string());
                            close_step(remaining - 1)
                        }
                        other => other,
                    };
                }
            }
        }
    }

    messages
}

//! Command-line tokenizer.
//!
//! Splits a raw input line into argv-style words. A run of characters
//! enclosed in matching single or double quotes becomes one word with the
//! quotes stripped and inner whitespace preserved; quoting does not nest and
//! has no escape sequences. `<` and `>` are reserved for the shell's stream
//! redirection and are rejected anywhere outside a quoted region.
//!
//! Every yielded word is an owned `String`; nothing aliases the input line.

use objdbg_error::{ObjdbgError, Result};

/// Maximum accepted input line length in bytes.
pub const MAX_LINE_LEN: usize = 64 * 1024;

/// Tokenize an input line into an ordered sequence of words.
///
/// An empty (or all-whitespace) line yields an empty vector; that is not an
/// error. Any malformed input fails the whole call with `InvalidArgument`
/// and no partial word list escapes.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    if line.len() >= MAX_LINE_LEN {
        return Err(ObjdbgError::invalid(format!(
            "input line is {} bytes; the limit is {MAX_LINE_LEN}",
            line.len()
        )));
    }

    let mut words = Vec::new();
    // `Some` while inside a word; a quoted empty region still yields a word.
    let mut current: Option<String> = None;
    let mut chars = line.chars();

    while let Some(ch) = chars.next() {
        match ch {
            c if c.is_whitespace() => {
                if let Some(word) = current.take() {
                    words.push(word);
                }
            }
            '<' | '>' => {
                return Err(ObjdbgError::invalid(format!(
                    "reserved redirection character '{ch}' in input"
                )));
            }
            '\'' | '"' => {
                let quote = ch;
                let word = current.get_or_insert_with(String::new);
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == quote {
                        closed = true;
                        break;
                    }
                    word.push(c);
                }
                if !closed {
                    return Err(ObjdbgError::invalid(format!(
                        "unterminated {quote} quote in input"
                    )));
                }
            }
            c => {
                current.get_or_insert_with(String::new).push(c);
            }
        }
    }

    if let Some(word) = current {
        words.push(word);
    }
    Ok(words)
}

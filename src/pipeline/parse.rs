//! Tolerant parsing of sanitized model output.
//!
//! Ordered parser strategies, first success wins: strict JSON via
//! `serde_json`, then a permissive pass for near-JSON the model may
//! emit (single-quoted strings, Python-style `True`/`False`/`None`,
//! trailing commas). Both strategies are pure so tests can feed
//! literal strings directly.

use std::iter::Peekable;
use std::str::Chars;

use serde_json::Value;

use super::PrimaryError;

/// Parse sanitized model output into a JSON value tree.
///
/// Exhausting both strategies is a primary-tier failure and triggers
/// the OCR fallback upstream.
pub fn parse_model_output(text: &str) -> Result<Value, PrimaryError> {
    let strict_err = match serde_json::from_str(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    relaxed_to_json(text)
        .and_then(|rewritten| serde_json::from_str(&rewritten).ok())
        .ok_or_else(|| {
            PrimaryError::Parse(format!(
                "strict parse failed ({strict_err}); permissive parse failed too"
            ))
        })
}

/// Rewrite near-JSON into strict JSON: single-quoted strings become
/// double-quoted, bare `True`/`False`/`None` become their JSON
/// equivalents, and trailing commas are dropped. Returns `None` on an
/// unterminated string.
fn relaxed_to_json(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' => {
                out.push('"');
                copy_double_quoted(&mut chars, &mut out)?;
            }
            '\'' => {
                out.push('"');
                rewrite_single_quoted(&mut chars, &mut out)?;
            }
            c if c.is_ascii_alphabetic() => {
                let word = take_word(c, &mut chars);
                match word.as_str() {
                    "True" => out.push_str("true"),
                    "False" => out.push_str("false"),
                    "None" => out.push_str("null"),
                    other => out.push_str(other),
                }
            }
            _ => out.push(c),
        }
    }

    Some(strip_trailing_commas(&out))
}

/// Copy a double-quoted string verbatim, including the closing quote.
fn copy_double_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> Option<()> {
    while let Some(c) = chars.next() {
        out.push(c);
        match c {
            '\\' => out.push(chars.next()?),
            '"' => return Some(()),
            _ => {}
        }
    }
    None
}

/// Re-emit a single-quoted string as a double-quoted one: `\'` becomes
/// a plain apostrophe, embedded `"` gets escaped.
fn rewrite_single_quoted(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> Option<()> {
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let next = chars.next()?;
                if next == '\'' {
                    out.push('\'');
                } else {
                    out.push('\\');
                    out.push(next);
                }
            }
            '\'' => {
                out.push('"');
                return Some(());
            }
            '"' => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    None
}

fn take_word(first: char, chars: &mut Peekable<Chars<'_>>) -> String {
    let mut word = String::new();
    word.push(first);
    while let Some(&next) = chars.peek() {
        if next.is_ascii_alphanumeric() || next == '_' {
            word.push(next);
            chars.next();
        } else {
            break;
        }
    }
    word
}

/// Drop commas left dangling before `}` or `]`. Runs on the rewritten
/// text, where all strings are canonically double-quoted.
fn strip_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in text.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '}' | ']' => {
                let trimmed_len = out.trim_end().len();
                if out[..trimmed_len].ends_with(',') {
                    out.truncate(trimmed_len - 1);
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out
}

//! Recovers a JSON value from free-text model output.
//!
//! Strategies run in order and the first one that parses wins:
//! 1. the whole trimmed text,
//! 2. the slice from the first `{` to the last `}`,
//! 3. the body of a ```` ```json ```` fenced block,
//! 4. a regex match of `{` greedy to the last `}`.
//!
//! Slicing from the first to the last brace can span several unrelated
//! objects separated by prose. That case is not repaired; it falls through
//! to the fenced-block strategy or fails.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unable to parse JSON from model output")]
pub struct ParseFailure;

lazy_static! {
    static ref JSON_FENCE_RE: Regex = Regex::new(r"(?is)```json\s*(.*?)```").unwrap();
    static ref OBJECT_RE: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}

pub fn extract_json(text: &str) -> Result<Value, ParseFailure> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ParseFailure);
    }

    parse(trimmed)
        .or_else(|| brace_slice(text).and_then(parse))
        .or_else(|| fenced_block(text).and_then(parse))
        .or_else(|| OBJECT_RE.find(text).and_then(|m| parse(m.as_str())))
        .ok_or(ParseFailure)
}

fn parse(candidate: &str) -> Option<Value> {
    serde_json::from_str(candidate).ok()
}

fn brace_slice(text: &str) -> Option<&str> {
    let first = text.find('{')?;
    let last = text.rfind('}')?;
    (last > first).then(|| &text[first..=last])
}

fn fenced_block(text: &str) -> Option<&str> {
    JSON_FENCE_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
}

//! Decoding of the opaque client identifier (`uuid` in the request body).
//!
//! Two policies exist. `AnchorDecoder` looks for the `User-`, `Machine-` and
//! `Copy-` keywords anywhere in the string and tolerates reordering. The older
//! `PositionDecoder` splits on `-` and reads fixed positions. Both are total:
//! malformed input yields `ClientIdentity::default()` or per-field placeholders.

use crate::error::AppError;
use common::model::identity::{ClientIdentity, UNKNOWN};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

const ANCHOR_PATTERN: &str = r"(User|Machine|Copy)-";

pub trait IdentifierDecoder: Send + Sync {
    fn decode(&self, raw: &str) -> ClientIdentity;
}

/// Which decoder the service runs with, chosen by `IDENTIFIER_POLICY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierPolicy {
    Anchor,
    Position,
}

impl IdentifierPolicy {
    pub fn decoder(self) -> Result<Arc<dyn IdentifierDecoder>, AppError> {
        Ok(match self {
            IdentifierPolicy::Anchor => Arc::new(AnchorDecoder::new()?),
            IdentifierPolicy::Position => Arc::new(PositionDecoder),
        })
    }
}

impl FromStr for IdentifierPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anchor" => Ok(IdentifierPolicy::Anchor),
            "position" => Ok(IdentifierPolicy::Position),
            other => Err(format!("unknown identifier policy '{other}'")),
        }
    }
}

impl fmt::Display for IdentifierPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentifierPolicy::Anchor => write!(f, "anchor"),
            IdentifierPolicy::Position => write!(f, "position"),
        }
    }
}

/// Keyword-anchor policy.
///
/// Each value runs from the end of its anchor to the start of the next anchor,
/// whichever keyword that is. All three anchors must be present.
pub struct AnchorDecoder {
    anchors: Regex,
}

impl AnchorDecoder {
    pub fn new() -> Result<Self, AppError> {
        let anchors = Regex::new(ANCHOR_PATTERN)
            .map_err(|e| AppError::Config(format!("Regex error: {}", e)))?;
        Ok(Self { anchors })
    }
}

impl IdentifierDecoder for AnchorDecoder {
    fn decode(&self, raw: &str) -> ClientIdentity {
        // (keyword, anchor start, value start)
        let found: Vec<(&str, usize, usize)> = self
            .anchors
            .captures_iter(raw)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let keyword = caps.get(1)?.as_str();
                Some((keyword, whole.start(), whole.end()))
            })
            .collect();

        match (
            anchor_value(raw, &found, "User"),
            anchor_value(raw, &found, "Machine"),
            anchor_value(raw, &found, "Copy"),
        ) {
            (Some(user), Some(machine), Some(copy)) => ClientIdentity {
                user: or_unknown(user),
                machine: or_unknown(machine),
                copy: leading_count(copy),
            },
            _ => ClientIdentity::default(),
        }
    }
}

/// Fixed-position policy: `X-user-X-machine-X-copy`.
pub struct PositionDecoder;

impl IdentifierDecoder for PositionDecoder {
    fn decode(&self, raw: &str) -> ClientIdentity {
        let parts: Vec<&str> = raw.split('-').collect();
        let at = |idx: usize| parts.get(idx).map(|p| p.trim()).unwrap_or("");

        ClientIdentity {
            user: or_unknown(at(1)),
            machine: or_unknown(at(3)),
            copy: leading_count(at(5)),
        }
    }
}

fn anchor_value<'a>(
    raw: &'a str,
    found: &[(&str, usize, usize)],
    keyword: &str,
) -> Option<&'a str> {
    let &(_, _, value_start) = found.iter().find(|(k, _, _)| *k == keyword)?;
    let value_end = found
        .iter()
        .map(|&(_, start, _)| start)
        .filter(|&start| start >= value_start)
        .min()
        .unwrap_or(raw.len());
    Some(strip_separator(&raw[value_start..value_end]))
}

fn strip_separator(value: &str) -> &str {
    let value = value.trim();
    value.strip_suffix('-').unwrap_or(value).trim()
}

fn or_unknown(value: &str) -> String {
    if value.is_empty() {
        UNKNOWN.to_string()
    } else {
        value.to_string()
    }
}

/// Leading ASCII digits as a count; anything else is 0.
fn leading_count(value: &str) -> u32 {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

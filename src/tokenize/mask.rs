use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Token, TokenKind};
use crate::error::DetectError;

/// Policy controlling which token categories participate in hashing.
///
/// Whitespace and newline tokens never participate — layout is not
/// content. Beyond that:
///
/// - `Strict`: every remaining token contributes its lexeme, comments
///   included.
/// - `Mild`: comments contribute nothing.
/// - `Weak`: comments contribute nothing, and identifiers and literals
///   collapse to their category, so renamed variables still match.
///   Keywords, puncts, and semantic tokens keep their lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskMode {
    Strict,
    #[default]
    Mild,
    Weak,
}

impl FromStr for MaskMode {
    type Err = DetectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "strict" => Ok(MaskMode::Strict),
            "mild" => Ok(MaskMode::Mild),
            "weak" => Ok(MaskMode::Weak),
            other => Err(DetectError::InvalidConfig(format!(
                "unknown mode {other:?} (use strict, mild, or weak)"
            ))),
        }
    }
}

impl fmt::Display for MaskMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaskMode::Strict => "strict",
            MaskMode::Mild => "mild",
            MaskMode::Weak => "weak",
        };
        f.write_str(name)
    }
}

/// Derive the canonical mask key for a token under a mode.
///
/// Returns `None` when the token does not participate in matching under
/// that mode (it is not *significant*). The derivation is deterministic
/// from `(token, mode, ignore_case)`: two tokens with equal keys are
/// interchangeable for matching.
pub fn mask_key(token: &Token, mode: MaskMode, ignore_case: bool) -> Option<Box<str>> {
    let key: &str = match (mode, token.kind) {
        (_, TokenKind::Whitespace | TokenKind::Newline) => return None,
        (MaskMode::Strict, _) => &token.value,
        (MaskMode::Mild | MaskMode::Weak, TokenKind::Comment) => return None,
        (MaskMode::Mild, _) => &token.value,
        (MaskMode::Weak, TokenKind::Identifier) => "ident",
        (MaskMode::Weak, TokenKind::Number) => "num",
        (MaskMode::Weak, TokenKind::String) => "str",
        (MaskMode::Weak, _) => &token.value,
    };
    if ignore_case {
        Some(key.to_lowercase().into_boxed_str())
    } else {
        Some(key.into())
    }
}

#[cfg(test)]
#[path = "mask_test.rs"]
mod tests;

//! Language-aware tokenization.
//!
//! Reduces raw source to an ordered sequence of tokens with byte-range
//! provenance. The scanner is a byte-level state machine driven by the
//! format's syntax spec; it is total — unknown bytes become `Unknown`
//! tokens instead of errors, and unterminated comments or strings extend
//! to end of input. Comment and whitespace tokens are always emitted;
//! whether they participate in matching is decided later by the mask
//! mode (see `mask`).
pub(crate) mod mask;
mod scanner;

use crate::error::{DetectError, Result};
use crate::lang;

/// Syntactic category of a token.
///
/// `Semantic` marks identifiers from the format's semantic table (e.g.
/// Flutter widget names for Dart); they keep their lexeme even under the
/// weak mask mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Semantic,
    Number,
    String,
    Punct,
    Comment,
    Whitespace,
    Newline,
    Unknown,
}

/// A single token with source-position provenance.
///
/// `line` and `column` are 1-based; columns count bytes. `range` holds
/// byte offsets `[start, end)` into the source. Tokens are totally
/// ordered by `range.start` and their ranges partition the source.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: usize,
    pub column: usize,
    pub range: (usize, usize),
    pub format: &'static str,
}

impl Token {
    /// Line/column (1-based) just past the last byte of this token,
    /// accounting for newlines inside multi-line tokens such as block
    /// comments and triple-quoted strings.
    pub fn end_position(&self) -> (usize, usize) {
        let mut line = self.line;
        let mut column = self.column;
        for &b in self.value.as_bytes() {
            if b == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}

/// Tokenize `source` under the named format.
///
/// Fails with `UnknownFormat` for unregistered format ids and with
/// `Tokenizer` for content no token grammar covers (embedded NUL bytes —
/// binary data that slipped past discovery).
pub fn tokenize(source: &str, format: &str) -> Result<Vec<Token>> {
    let spec = lang::find(format).ok_or_else(|| DetectError::UnknownFormat(format.to_string()))?;
    if source.as_bytes().contains(&0) {
        return Err(DetectError::Tokenizer("binary content (NUL byte)".to_string()));
    }
    let table = lang::keywords::table_for(format);
    Ok(scanner::Scanner::new(source, spec, table).scan())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

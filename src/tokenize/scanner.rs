use super::{Token, TokenKind};
use crate::lang::FormatSpec;
use crate::lang::keywords::KeywordTable;

/// Multi-character operators recognized across the registry's formats,
/// longest first so that `>>=` matches before `>>` or `>`.
/// Single unrecognized ASCII bytes fall through to one-byte punct tokens.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "===", "!==", "**=", "//=", "..=", "...", "?.", "??", "=>", "->", "::", "&&",
    "||", "==", "!=", "<=", ">=", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>",
    "++", "--", "..", ":=", "<-",
];

/// Byte-level tokenizer driven by a `FormatSpec`.
///
/// States (normal / string / block comment) are handled inline per token:
/// every call to `scan_token` consumes at least one byte and emits exactly
/// one token, so the emitted ranges partition the input.
pub(super) struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    spec: &'static FormatSpec,
    table: &'static KeywordTable,
    pos: usize,
    line: usize,
    col: usize,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str, spec: &'static FormatSpec, table: &'static KeywordTable) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            spec,
            table,
            pos: 0,
            line: 1,
            col: 1,
            tokens: Vec::new(),
        }
    }

    pub fn scan(mut self) -> Vec<Token> {
        while self.pos < self.bytes.len() {
            self.scan_token();
        }
        self.tokens
    }

    fn scan_token(&mut self) {
        let start = self.pos;
        let line = self.line;
        let col = self.col;
        let b = self.bytes[self.pos];

        let kind = if b == b'\n' {
            self.advance(1);
            TokenKind::Newline
        } else if b == b' ' || b == b'\t' || b == b'\r' {
            while self
                .peek()
                .is_some_and(|c| c == b' ' || c == b'\t' || c == b'\r')
            {
                self.advance(1);
            }
            TokenKind::Whitespace
        } else if let Some((open, close)) = self.at_block_comment() {
            self.consume_block_comment(open, close);
            TokenKind::Comment
        } else if self.at_line_comment() {
            while self.peek().is_some_and(|c| c != b'\n') {
                self.advance(1);
            }
            TokenKind::Comment
        } else if let Some(quote) = self.at_triple_quote() {
            self.consume_triple_string(quote);
            TokenKind::String
        } else if b == b'"' || (b == b'\'' && self.spec.single_quote_strings) {
            self.consume_string(b);
            TokenKind::String
        } else if b.is_ascii_alphabetic() || b == b'_' {
            self.consume_word();
            let word = &self.src[start..self.pos];
            if self.table.is_keyword(word) {
                TokenKind::Keyword
            } else if self.table.is_semantic(word) {
                TokenKind::Semantic
            } else {
                TokenKind::Identifier
            }
        } else if b.is_ascii_digit() {
            self.consume_number();
            TokenKind::Number
        } else if let Some(op) = self.match_operator() {
            self.advance(op.len());
            TokenKind::Punct
        } else if b.is_ascii() {
            self.advance(1);
            TokenKind::Punct
        } else {
            // Non-ASCII outside strings/comments: consume one whole char
            // so token boundaries stay on char boundaries.
            let ch_len = self.src[self.pos..].chars().next().map_or(1, char::len_utf8);
            self.advance(ch_len);
            TokenKind::Unknown
        };

        self.tokens.push(Token {
            kind,
            value: self.src[start..self.pos].to_string(),
            line,
            column: col,
            range: (start, self.pos),
            format: self.spec.format,
        });
    }

    // ── consumers ───────────────────────────────────────────────────────

    fn consume_block_comment(&mut self, open: &str, close: &str) {
        self.advance(open.len());
        let mut depth = 1usize;
        while self.pos < self.bytes.len() {
            if self.spec.nested_block_comments && self.rest().starts_with(open.as_bytes()) {
                depth += 1;
                self.advance(open.len());
            } else if self.rest().starts_with(close.as_bytes()) {
                depth -= 1;
                self.advance(close.len());
                if depth == 0 {
                    return;
                }
            } else {
                self.advance(1);
            }
        }
        // Unterminated comment runs to end of input.
    }

    /// Plain quoted string: ends at the closing quote or, unterminated,
    /// at end of line (most formats do not allow bare multi-line strings).
    fn consume_string(&mut self, quote: u8) {
        self.advance(1);
        while let Some(c) = self.peek() {
            if c == b'\\' {
                self.advance(2.min(self.bytes.len() - self.pos));
            } else if c == quote {
                self.advance(1);
                return;
            } else if c == b'\n' {
                return;
            } else {
                self.advance(1);
            }
        }
    }

    fn consume_triple_string(&mut self, quote: u8) {
        let delim = [quote; 3];
        self.advance(3);
        while self.pos < self.bytes.len() {
            if self.rest().starts_with(&delim) {
                self.advance(3);
                return;
            }
            if self.bytes[self.pos] == b'\\' {
                self.advance(2.min(self.bytes.len() - self.pos));
            } else {
                self.advance(1);
            }
        }
    }

    fn consume_word(&mut self) {
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_')
        {
            self.advance(1);
        }
    }

    /// Numeric literal: leading digit, then alphanumerics/underscores
    /// (covers hex, binary, exponents) and a fraction part when a dot is
    /// directly followed by a digit.
    fn consume_number(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_alphanumeric() || c == b'_' => self.advance(1),
                Some(b'.')
                    if self
                        .bytes
                        .get(self.pos + 1)
                        .is_some_and(u8::is_ascii_digit) =>
                {
                    self.advance(1)
                }
                _ => return,
            }
        }
    }

    // ── lookahead ───────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn rest(&self) -> &[u8] {
        &self.bytes[self.pos..]
    }

    /// Block comment openers are checked before line comment markers so
    /// that prefixes like Lua's `--[[` win over its `--` line marker.
    fn at_block_comment(&self) -> Option<(&'static str, &'static str)> {
        self.spec
            .block_comment
            .filter(|(open, _)| self.rest().starts_with(open.as_bytes()))
    }

    fn at_line_comment(&self) -> bool {
        self.spec
            .line_comments
            .iter()
            .any(|marker| self.rest().starts_with(marker.as_bytes()))
    }

    fn at_triple_quote(&self) -> Option<u8> {
        if !self.spec.triple_quote_strings {
            return None;
        }
        if self.rest().starts_with(b"\"\"\"") {
            return Some(b'"');
        }
        if self.spec.single_quote_strings && self.rest().starts_with(b"'''") {
            return Some(b'\'');
        }
        None
    }

    fn match_operator(&self) -> Option<&'static str> {
        OPERATORS
            .iter()
            .find(|op| self.rest().starts_with(op.as_bytes()))
            .copied()
    }

    /// Consume `n` bytes, updating line and (byte-based) column.
    fn advance(&mut self, n: usize) {
        for &b in &self.bytes[self.pos..self.pos + n] {
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
        self.pos += n;
    }
}

#[cfg(test)]
#[path = "scanner_test.rs"]
mod tests;

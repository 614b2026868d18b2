use super::*;
use crate::tokenize::{Token, TokenKind};

fn tok(kind: TokenKind, value: &str) -> Token {
    Token {
        kind,
        value: value.to_string(),
        line: 1,
        column: 1,
        range: (0, value.len()),
        format: "javascript",
    }
}

#[test]
fn whitespace_never_significant() {
    for mode in [MaskMode::Strict, MaskMode::Mild, MaskMode::Weak] {
        assert!(mask_key(&tok(TokenKind::Whitespace, "  "), mode, false).is_none());
        assert!(mask_key(&tok(TokenKind::Newline, "\n"), mode, false).is_none());
    }
}

#[test]
fn strict_keeps_comments() {
    let key = mask_key(&tok(TokenKind::Comment, "// note"), MaskMode::Strict, false);
    assert_eq!(key.as_deref(), Some("// note"));
}

#[test]
fn mild_drops_comments_keeps_identifiers() {
    assert!(mask_key(&tok(TokenKind::Comment, "// note"), MaskMode::Mild, false).is_none());
    let key = mask_key(&tok(TokenKind::Identifier, "alpha"), MaskMode::Mild, false);
    assert_eq!(key.as_deref(), Some("alpha"));
}

#[test]
fn weak_collapses_by_category() {
    assert_eq!(
        mask_key(&tok(TokenKind::Identifier, "alpha"), MaskMode::Weak, false).as_deref(),
        Some("ident")
    );
    assert_eq!(
        mask_key(&tok(TokenKind::Number, "42"), MaskMode::Weak, false).as_deref(),
        Some("num")
    );
    assert_eq!(
        mask_key(&tok(TokenKind::String, "\"hi\""), MaskMode::Weak, false).as_deref(),
        Some("str")
    );
}

#[test]
fn weak_keeps_keywords_puncts_and_semantic() {
    assert_eq!(
        mask_key(&tok(TokenKind::Keyword, "return"), MaskMode::Weak, false).as_deref(),
        Some("return")
    );
    assert_eq!(
        mask_key(&tok(TokenKind::Punct, "{"), MaskMode::Weak, false).as_deref(),
        Some("{")
    );
    assert_eq!(
        mask_key(&tok(TokenKind::Semantic, "Container"), MaskMode::Weak, false).as_deref(),
        Some("Container")
    );
}

#[test]
fn ignore_case_lowercases() {
    let key = mask_key(&tok(TokenKind::Identifier, "Alpha"), MaskMode::Mild, true);
    assert_eq!(key.as_deref(), Some("alpha"));
}

#[test]
fn identical_tokens_same_key() {
    let a = mask_key(&tok(TokenKind::Identifier, "x"), MaskMode::Mild, false);
    let b = mask_key(&tok(TokenKind::Identifier, "x"), MaskMode::Mild, false);
    assert_eq!(a, b);
}

#[test]
fn mode_parses_from_str() {
    assert_eq!("strict".parse::<MaskMode>().unwrap(), MaskMode::Strict);
    assert_eq!("mild".parse::<MaskMode>().unwrap(), MaskMode::Mild);
    assert_eq!("weak".parse::<MaskMode>().unwrap(), MaskMode::Weak);
    assert!("fuzzy".parse::<MaskMode>().is_err());
}

#[test]
fn mode_display_round_trips() {
    for mode in [MaskMode::Strict, MaskMode::Mild, MaskMode::Weak] {
        assert_eq!(mode.to_string().parse::<MaskMode>().unwrap(), mode);
    }
}

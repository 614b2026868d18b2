use crate::tokenize::{Token, TokenKind, tokenize};

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

fn values(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.value.as_str()).collect()
}

/// Token ranges must partition the source: contiguous, in order,
/// covering every byte.
fn assert_partition(source: &str, tokens: &[Token]) {
    let mut expected_start = 0;
    for token in tokens {
        assert_eq!(token.range.0, expected_start, "gap before {:?}", token.value);
        assert!(token.range.1 > token.range.0, "empty token {:?}", token.value);
        assert_eq!(&source[token.range.0..token.range.1], token.value);
        expected_start = token.range.1;
    }
    assert_eq!(expected_start, source.len());
}

#[test]
fn partitions_rust_source() {
    let source = "fn main() {\n    let x = 1; // init\n}\n";
    let tokens = tokenize(source, "rust").unwrap();
    assert_partition(source, &tokens);
}

#[test]
fn classifies_keywords_and_identifiers() {
    let tokens = tokenize("fn main", "rust").unwrap();
    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::Keyword, TokenKind::Whitespace, TokenKind::Identifier]
    );
}

#[test]
fn line_comment_token() {
    let tokens = tokenize("x = 1 // note\ny", "rust").unwrap();
    let comment = tokens.iter().find(|t| t.kind == TokenKind::Comment).unwrap();
    assert_eq!(comment.value, "// note");
    // The newline is its own token, not part of the comment.
    assert!(tokens.iter().any(|t| t.kind == TokenKind::Newline));
}

#[test]
fn nested_block_comment_rust() {
    let source = "/* a /* b */ c */ x";
    let tokens = tokenize(source, "rust").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].value, "/* a /* b */ c */");
    assert_partition(source, &tokens);
}

#[test]
fn non_nested_block_comment_c() {
    // In C the first */ closes the comment.
    let tokens = tokenize("/* a /* b */ rest", "c").unwrap();
    assert_eq!(tokens[0].value, "/* a /* b */");
    assert!(tokens.iter().any(|t| t.value == "rest"));
}

#[test]
fn unterminated_block_comment_runs_to_eof() {
    let source = "x /* never closed\nmore";
    let tokens = tokenize(source, "c").unwrap();
    assert_eq!(tokens.last().unwrap().kind, TokenKind::Comment);
    assert_partition(source, &tokens);
}

#[test]
fn string_with_escaped_quote() {
    let tokens = tokenize(r#"s = "he \" said""#, "javascript").unwrap();
    let string = tokens.iter().find(|t| t.kind == TokenKind::String).unwrap();
    assert_eq!(string.value, r#""he \" said""#);
}

#[test]
fn comment_marker_inside_string() {
    let tokens = tokenize(r#"s = "// not a comment""#, "javascript").unwrap();
    assert!(tokens.iter().all(|t| t.kind != TokenKind::Comment));
}

#[test]
fn single_quote_string_with_escape() {
    let tokens = tokenize(r"s = 'it\'s'", "javascript").unwrap();
    let string = tokens.iter().find(|t| t.kind == TokenKind::String).unwrap();
    assert_eq!(string.value, r"'it\'s'");
}

#[test]
fn single_quote_not_string_in_rust() {
    // Rust lifetimes must not open a string.
    let source = "fn foo<'a>(x: &'a str)";
    let tokens = tokenize(source, "rust").unwrap();
    assert!(tokens.iter().all(|t| t.kind != TokenKind::String));
    assert_partition(source, &tokens);
}

#[test]
fn python_triple_quote_spans_lines() {
    let source = "s = \"\"\"a\nb\"\"\"\nx";
    let tokens = tokenize(source, "python").unwrap();
    let string = tokens.iter().find(|t| t.kind == TokenKind::String).unwrap();
    assert_eq!(string.value, "\"\"\"a\nb\"\"\"");
    // Line tracking continues correctly after the multi-line token.
    let x = tokens.iter().find(|t| t.value == "x").unwrap();
    assert_eq!(x.line, 3);
    assert_eq!(x.column, 1);
}

#[test]
fn unterminated_string_stops_at_newline() {
    let source = "s = \"abc\nx = 1";
    let tokens = tokenize(source, "javascript").unwrap();
    let string = tokens.iter().find(|t| t.kind == TokenKind::String).unwrap();
    assert_eq!(string.value, "\"abc");
    assert!(tokens.iter().any(|t| t.value == "x"));
    assert_partition(source, &tokens);
}

#[test]
fn lua_block_comment_wins_over_line_marker() {
    let tokens = tokenize("--[[ block ]] x", "lua").unwrap();
    assert_eq!(tokens[0].value, "--[[ block ]]");
    assert_eq!(tokens[0].kind, TokenKind::Comment);
}

#[test]
fn number_forms() {
    let source = "1.5 0xFF 1_000 2e10";
    let tokens = tokenize(source, "javascript").unwrap();
    let numbers: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Number)
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(numbers, vec!["1.5", "0xFF", "1_000", "2e10"]);
}

#[test]
fn operators_longest_match() {
    let tokens = tokenize(">>= >> >", "c").unwrap();
    let puncts: Vec<&str> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Punct)
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(puncts, vec![">>=", ">>", ">"]);
}

#[test]
fn dart_widget_is_semantic() {
    let tokens = tokenize("Container(child: widget)", "dart").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Semantic);
    assert_eq!(tokens[0].value, "Container");
}

#[test]
fn non_ascii_becomes_unknown() {
    let source = "λ = 1";
    let tokens = tokenize(source, "python").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Unknown);
    assert_eq!(tokens[0].value, "λ");
    assert_partition(source, &tokens);
}

#[test]
fn line_and_column_tracking() {
    let tokens = tokenize("ab cd\nef", "javascript").unwrap();
    let positions: Vec<(usize, usize, &str)> = tokens
        .iter()
        .map(|t| (t.line, t.column, t.value.as_str()))
        .collect();
    assert_eq!(
        positions,
        vec![
            (1, 1, "ab"),
            (1, 3, " "),
            (1, 4, "cd"),
            (1, 6, "\n"),
            (2, 1, "ef"),
        ]
    );
}

#[test]
fn values_preserved_verbatim() {
    let source = "if (a == 1) { return; }";
    let tokens = tokenize(source, "javascript").unwrap();
    assert_eq!(values(&tokens).concat(), source);
}

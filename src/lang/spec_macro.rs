/// The `format_spec!` macro for declaring format specifications.
///
/// Provides a compact syntax for defining `FormatSpec` entries with the
/// combinations of comment and string syntax the registry needs.
///
/// # Variants
///
/// - `line: + block:` — line and block comments (e.g., Rust, C)
/// - `line:` only — line comment formats (e.g., Python, Shell)
/// - `lines: [...]` — multiple line comment markers (e.g., PHP)
///
/// # Optional flags
///
/// - `nested: true` — nested block comment tracking
/// - `sq: true` — single quotes delimit strings
/// - `tq: true` — triple-quote string support
/// - `shebangs: [...]` — shebang interpreter names
macro_rules! format_spec {
    ($format:expr, ext: [$($ext:expr),*], $($rest:tt)*) => {
        format_spec!(@build $format, &[$($ext),*], $($rest)*)
    };
    // line + block
    (@build $format:expr, $ext:expr,
     line: $lc:expr, block: $bo:expr, $bc:expr
     $(, nested: $nested:expr)?
     $(, sq: $sq:expr)?
     $(, tq: $tq:expr)?
     $(, shebangs: [$($sh:expr),*])?
    ) => {
        FormatSpec {
            format: $format,
            extensions: $ext,
            line_comments: &[$lc],
            block_comment: Some(($bo, $bc)),
            nested_block_comments: false $(|| $nested)?,
            single_quote_strings: false $(|| $sq)?,
            triple_quote_strings: false $(|| $tq)?,
            shebangs: &[$($($sh),*)?],
        }
    };
    // line comment only
    (@build $format:expr, $ext:expr,
     line: $lc:expr
     $(, sq: $sq:expr)?
     $(, tq: $tq:expr)?
     $(, shebangs: [$($sh:expr),*])?
    ) => {
        FormatSpec {
            format: $format,
            extensions: $ext,
            line_comments: &[$lc],
            block_comment: None,
            nested_block_comments: false,
            single_quote_strings: false $(|| $sq)?,
            triple_quote_strings: false $(|| $tq)?,
            shebangs: &[$($($sh),*)?],
        }
    };
    // multiple line comment markers, optional block comment (e.g. PHP)
    (@build $format:expr, $ext:expr,
     lines: [$($lc:expr),+]
     $(, block: $bo:expr, $bc:expr)?
     $(, sq: $sq:expr)?
     $(, shebangs: [$($sh:expr),*])?
    ) => {
        FormatSpec {
            format: $format,
            extensions: $ext,
            line_comments: &[$($lc),+],
            block_comment: { #[allow(unused_mut)] let mut _bc: Option<(&'static str, &'static str)> = None; $(_bc = Some(($bo, $bc));)? _bc },
            nested_block_comments: false,
            single_quote_strings: false $(|| $sq)?,
            triple_quote_strings: false,
            shebangs: &[$($($sh),*)?],
        }
    };
}

pub(super) use format_spec;

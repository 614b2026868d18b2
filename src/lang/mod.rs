//! Format registry: per-language syntax specifications and detection.
//!
//! Each supported format declares its file extensions, comment syntax,
//! string delimiter rules, and shebang patterns via the `format_spec!`
//! macro. The scanner in `tokenize` is driven entirely by these specs;
//! keyword and semantic-identifier tables live in `keywords.rs`.
mod spec_macro;

pub(crate) mod keywords;

use std::path::Path;

use spec_macro::format_spec;

/// Specification of a format's surface syntax for tokenization.
///
/// `format` is the registry id used in configuration, clone output, and
/// statistics (lowercase, e.g. `"javascript"`). Formats are detected by
/// file extension or shebang line.
#[derive(Debug)]
pub struct FormatSpec {
    pub format: &'static str,
    pub extensions: &'static [&'static str],
    pub line_comments: &'static [&'static str],
    pub block_comment: Option<(&'static str, &'static str)>,
    pub nested_block_comments: bool,
    pub single_quote_strings: bool,
    pub triple_quote_strings: bool,
    pub shebangs: &'static [&'static str],
}

/// Return the static registry of all supported format specifications.
pub fn formats() -> &'static [FormatSpec] {
    static FORMATS: &[FormatSpec] = &[
        format_spec!("rust", ext: ["rs"],
              line: "//", block: "/*", "*/", nested: true),
        format_spec!("python", ext: ["py", "pyi"],
              line: "#", sq: true, tq: true,
              shebangs: ["python", "python3"]),
        format_spec!("javascript", ext: ["js", "mjs", "cjs", "jsx"],
              line: "//", block: "/*", "*/", sq: true,
              shebangs: ["node"]),
        format_spec!("typescript", ext: ["ts", "tsx", "mts", "cts"],
              line: "//", block: "/*", "*/", sq: true),
        format_spec!("java", ext: ["java"],
              line: "//", block: "/*", "*/"),
        format_spec!("c", ext: ["c", "h"],
              line: "//", block: "/*", "*/"),
        format_spec!("cpp", ext: ["cpp", "cxx", "cc", "hpp", "hxx"],
              line: "//", block: "/*", "*/"),
        format_spec!("csharp", ext: ["cs"],
              line: "//", block: "/*", "*/"),
        format_spec!("go", ext: ["go"],
              line: "//", block: "/*", "*/"),
        format_spec!("ruby", ext: ["rb"],
              line: "#", sq: true,
              shebangs: ["ruby"]),
        format_spec!("php", ext: ["php"],
              lines: ["//", "#"], block: "/*", "*/", sq: true,
              shebangs: ["php"]),
        format_spec!("dart", ext: ["dart"],
              line: "//", block: "/*", "*/", sq: true),
        format_spec!("kotlin", ext: ["kt", "kts"],
              line: "//", block: "/*", "*/", nested: true),
        format_spec!("swift", ext: ["swift"],
              line: "//", block: "/*", "*/", nested: true),
        format_spec!("scala", ext: ["scala", "sc"],
              line: "//", block: "/*", "*/", nested: true),
        format_spec!("shell", ext: ["sh", "bash", "zsh"],
              line: "#", sq: true,
              shebangs: ["sh", "bash", "zsh"]),
        format_spec!("lua", ext: ["lua"],
              line: "--", block: "--[[", "]]", sq: true,
              shebangs: ["lua"]),
        format_spec!("perl", ext: ["pl", "pm"],
              line: "#", sq: true,
              shebangs: ["perl"]),
    ];
    FORMATS
}

/// Look up a format specification by registry id.
pub fn find(format: &str) -> Option<&'static FormatSpec> {
    formats().iter().find(|spec| spec.format == format)
}

/// Detect the format of a file by matching its extension against the
/// registry. Returns `None` for unrecognized files.
pub fn detect(path: &Path) -> Option<&'static FormatSpec> {
    let ext = path.extension()?.to_str()?;
    formats()
        .iter()
        .find(|spec| spec.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

/// Detect the format from a shebang line (e.g. `#!/usr/bin/env python3`).
/// Handles both direct interpreter paths and `env` wrappers with flags.
pub fn detect_by_shebang(first_line: &str) -> Option<&'static FormatSpec> {
    let line = first_line.trim();
    if !line.starts_with("#!") {
        return None;
    }

    let interpreter = line
        .rsplit('/')
        .next()
        .unwrap_or("")
        .split_whitespace()
        .next()
        .unwrap_or("");

    // If "env", the real interpreter is the first non-flag argument.
    // Handles: #!/usr/bin/env python3, #!/usr/bin/env -S python3 -u
    let prog = if interpreter == "env" {
        line.split_whitespace()
            .skip_while(|s| !s.ends_with("env"))
            .skip(1) // skip "env" itself
            .find(|s| !s.starts_with('-'))
            .unwrap_or("")
    } else {
        interpreter
    };

    for spec in formats() {
        for shebang in spec.shebangs {
            if prog == *shebang || prog.starts_with(*shebang) {
                return Some(spec);
            }
        }
    }

    None
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

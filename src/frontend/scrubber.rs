//! Comment/literal-safe scrubbing and logical line splitting
//!
//! C cannot be sliced into statements with naive regexes: comments and
//! string/char literals may contain `{`, `}`, `;` and `/` that would derail
//! any structural match. The scrubber neutralizes both before the matchers
//! run:
//!
//! 1. escaped quotes and apostrophes are hidden so a literal's closing
//!    delimiter can be found reliably,
//! 2. structural characters inside single-line literals are swapped for
//!    reversible placeholder tokens,
//! 3. comments are removed - first line comments that would open a block
//!    comment (so a `// ... /*` cannot swallow real code), then block
//!    comments, then the remaining line comments.
//!
//! The placeholder mapping is a bijection; [`unshield`] restores the original
//! literal text exactly. `@` never appears in a valid C token, so the markers
//! cannot collide with real code, and scrubbing already-scrubbed text is a
//! no-op.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Reversible placeholders for structural characters inside literals.
const SHIELDS: &[(&str, &str)] = &[
    ("{", "@co@"),
    ("}", "@cc@"),
    (";", "@ss@"),
    ("/", "@fs@"),
];

const ESCAPED_QUOTE: &str = "@quote@";
const ESCAPED_APOS: &str = "@apos@";

lazy_static! {
    /// A string or char literal confined to one line.
    static ref LITERAL: Regex = Regex::new(r#"("[^"\n]*")|('[^'\n]*')"#).unwrap();
    /// A line comment that would leave a dangling block-comment opener
    /// behind (`// ... /*` or `//* ...`).
    static ref LINE_COMMENT_OPENING_BLOCK: Regex =
        Regex::new(r"(?m)//(?:.+/\*|\*(?:$|[^/])).*$").unwrap();
    /// A complete block comment, possibly spanning lines.
    static ref BLOCK_COMMENT: Regex = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    /// Any remaining line comment.
    static ref LINE_COMMENT: Regex = Regex::new(r"(?m)//.*$").unwrap();
    /// Logical line boundaries: a preprocessor directive line is one atomic
    /// unit; otherwise statements end at `;`, `{` or `}`.
    static ref BOUNDARY: Regex = Regex::new(r"(?m)(^\s*#.*$)|([;{}])").unwrap();
}

/// Hide escape sequences and shield structural characters inside literals.
///
/// Exposed separately from [`scrub`] so the shielding bijection can be
/// exercised on its own.
pub fn shield(source: &str) -> String {
    let hidden = source
        .replace("\\\"", ESCAPED_QUOTE)
        .replace("\\'", ESCAPED_APOS);
    LITERAL
        .replace_all(&hidden, |caps: &Captures| {
            let mut literal = caps[0].to_string();
            for (ch, marker) in SHIELDS {
                literal = literal.replace(ch, marker);
            }
            literal
        })
        .into_owned()
}

/// Restore shielded characters and escape sequences in one logical line.
pub fn unshield(line: &str) -> String {
    let mut restored = line.to_string();
    for (ch, marker) in SHIELDS {
        restored = restored.replace(marker, ch);
    }
    restored
        .replace(ESCAPED_QUOTE, "\\\"")
        .replace(ESCAPED_APOS, "\\'")
}

/// Remove all comments. Order matters: a line comment containing `/*` must
/// go before block-comment removal or its tail would swallow real code.
pub fn strip_comments(text: &str) -> String {
    let without_openers = LINE_COMMENT_OPENING_BLOCK.replace_all(text, "");
    let without_blocks = BLOCK_COMMENT.replace_all(&without_openers, "");
    LINE_COMMENT.replace_all(&without_blocks, "").into_owned()
}

/// Produce text safe for structural matching: literals shielded, comments
/// gone. Idempotent.
pub fn scrub(source: &str) -> String {
    strip_comments(&shield(source))
}

/// Split scrubbed text into logical lines and unshield each one.
///
/// Boundary tokens themselves are kept as their own entries, mirroring how
/// the matcher expects one statement (or directive) per entry; a bare `;` or
/// `{` can never match a test declaration, so keeping them is harmless.
pub fn logical_lines(scrubbed: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for boundary in BOUNDARY.find_iter(scrubbed) {
        pieces.push(&scrubbed[last..boundary.start()]);
        pieces.push(boundary.as_str());
        last = boundary.end();
    }
    pieces.push(&scrubbed[last..]);
    pieces.iter().map(|piece| unshield(piece)).collect()
}

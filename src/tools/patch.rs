//! HTML asset-tag repair.
//!
//! A shell one-liner once rewrote `index.html` and left both asset tags
//! mangled: attribute quotes turned into literal `\"` escapes and the
//! newline before the closing tag turned into a literal `` `r`n ``. This
//! tool rewrites those two exact byte sequences back to clean markup.
//!
//! The replacement joins tag and closing element with a literal CRLF.
//! Whether the file's CRLF convention was deliberate is unknowable from the
//! source, so the bytes are preserved exactly rather than normalized.

use anyhow::Context;
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

const LINK_MANGLED: &str =
    r#"<link rel=\\"stylesheet\\" href=\\"mascot-styles\.css\\">`r`n</head>"#;
const LINK_REPAIRED: &str = "<link rel=\"stylesheet\" href=\"mascot-styles.css\">\r\n</head>";

const SCRIPT_MANGLED: &str = r#"<script src=\\"mascot\.js\\"></script>`r`n</body>"#;
const SCRIPT_REPAIRED: &str = "<script src=\"mascot.js\"></script>\r\n</body>";

/// Apply both repairs to an HTML document.
///
/// Once repaired, the mangled patterns no longer occur, so a second pass
/// leaves the content untouched.
pub fn repair(content: &str) -> anyhow::Result<String> {
    let link = Regex::new(LINK_MANGLED).context("link pattern failed to compile")?;
    let script = Regex::new(SCRIPT_MANGLED).context("script pattern failed to compile")?;

    let patched: Cow<'_, str> = link.replace(content, LINK_REPAIRED);
    let patched = script.replace(&patched, SCRIPT_REPAIRED);
    Ok(patched.into_owned())
}

/// Repair `path` in place. Returns whether the file changed; an unchanged
/// file is not rewritten.
pub fn repair_file(path: &Path) -> anyhow::Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let repaired = repair(&content)?;
    if repaired == content {
        return Ok(false);
    }

    fs::write(path, repaired)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}

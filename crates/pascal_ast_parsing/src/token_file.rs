//! Token files, holding one `KIND(text)` token per line

use log::trace;
use pascal_ast::token::{Token, TokenKind};
use std::path::Path;
use std::str::FromStr;

/// Token files are recognized by this extension
pub const TOKEN_FILE_EXTENSION: &str = "txt";

/// Checks if a path should be read as a token file rather than lexed as source
pub fn is_token_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TOKEN_FILE_EXTENSION))
}

/// Writes tokens in the token file form, one per line
pub fn write_tokens<'a>(tokens: impl IntoIterator<Item = &'a Token>) -> String {
    let mut out = String::new();
    for token in tokens {
        out.push_str(&token.to_string());
        out.push('\n');
    }
    out
}

/// Reads the tokens of a token file.
///
/// Each line is split on its first `(` and last `)`. Blank lines and lines without such a pair are
/// skipped.
pub fn read_tokens(text: &str) -> Result<Vec<Token>, TokenFileError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut tokens = vec![];
    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let (Some(open), Some(close)) = (line.find('('), line.rfind(')')) else {
            trace!("skipping line {}: {line:?}", index + 1);
            continue;
        };
        if close < open {
            trace!("skipping line {}: {line:?}", index + 1);
            continue;
        }
        let kind = line[..open].trim();
        let kind = TokenKind::from_str(kind).map_err(|_| TokenFileError::UnknownKind {
            line: index + 1,
            kind: kind.to_string(),
        })?;
        let text = unescape(&line[open + 1..close]);
        tokens.push(Token::detached(kind, text));
    }
    Ok(tokens)
}

/// Reverses the escaping done when a token is written: `\\` is a backslash and `\n` a newline.
/// Any other backslash is kept as is.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('\\') => {
                chars.next();
                out.push('\\');
            }
            Some('n') => {
                chars.next();
                out.push('\n');
            }
            _ => out.push('\\'),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenFileError {
    #[error("unknown token kind {kind:?} on line {line}")]
    UnknownKind { line: usize, kind: String },
}

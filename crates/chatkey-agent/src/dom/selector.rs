//! A small CSS-selector subset for element matching.
//!
//! Adapters and user-supplied custom target/exclude lists only ever need
//! compound simple selectors — `button[aria-label*="Send"]`,
//! `.tiptap.ProseMirror`, `#prompt-textarea`, `[data-qa="texty_send_button"]`
//! — so that is all this parser accepts.  Combinators (descendant, `>`, `+`,
//! `~`) and pseudo-classes are rejected as unsupported.
//!
//! Selectors reaching the engine from user configuration may be arbitrarily
//! malformed; [`parse_list_lossy`] drops the broken ones with a warning
//! instead of surfacing an error into the keystroke path.

use thiserror::Error;
use tracing::warn;

use super::DomNode;

/// Error type for selector parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectorError {
    /// The input was empty or all whitespace.
    #[error("empty selector")]
    Empty,
    /// Unsupported or malformed syntax at the given byte offset.
    #[error("unsupported selector syntax at byte {0}")]
    Unsupported(usize),
    /// An attribute test was opened with `[` but never closed.
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
}

/// How an attribute test compares its value.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    /// `[attr]` — present with any value.
    Present,
    /// `[attr="v"]` — exact value.
    Equals(String),
    /// `[attr*="v"]` — value contains the substring.
    Contains(String),
}

/// One simple test within a compound selector.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SimplePart {
    Tag(String),
    Id(String),
    Class(String),
    Attr { name: String, op: AttrOp },
}

/// A parsed compound selector; matches when every part matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    parts: Vec<SimplePart>,
}

impl Selector {
    /// Parses a single compound selector.
    ///
    /// # Errors
    ///
    /// Returns [`SelectorError`] for empty input, combinators, pseudo
    /// classes, or malformed attribute tests.
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SelectorError::Empty);
        }

        let mut parts = Vec::new();
        let mut chars = trimmed.char_indices().peekable();

        // Optional leading type selector.
        if matches!(chars.peek(), Some((_, c)) if is_ident_char(*c)) {
            parts.push(SimplePart::Tag(take_ident(&mut chars)));
        }

        while let Some(&(index, c)) = chars.peek() {
            match c {
                '#' => {
                    chars.next();
                    let ident = take_ident(&mut chars);
                    if ident.is_empty() {
                        return Err(SelectorError::Unsupported(index));
                    }
                    parts.push(SimplePart::Id(ident));
                }
                '.' => {
                    chars.next();
                    let ident = take_ident(&mut chars);
                    if ident.is_empty() {
                        return Err(SelectorError::Unsupported(index));
                    }
                    parts.push(SimplePart::Class(ident));
                }
                '[' => {
                    chars.next();
                    parts.push(parse_attribute(&mut chars, index)?);
                }
                _ => return Err(SelectorError::Unsupported(index)),
            }
        }

        if parts.is_empty() {
            return Err(SelectorError::Empty);
        }
        Ok(Self { parts })
    }

    /// Tests this selector against a single element (no tree traversal).
    pub fn matches<D: DomNode>(&self, node: &D) -> bool {
        self.parts.iter().all(|part| match part {
            SimplePart::Tag(tag) => node.tag_name().eq_ignore_ascii_case(tag),
            SimplePart::Id(id) => node.attribute("id").as_deref() == Some(id.as_str()),
            SimplePart::Class(class) => node
                .attribute("class")
                .is_some_and(|attr| attr.split_whitespace().any(|c| c == class)),
            SimplePart::Attr { name, op } => {
                let value = node.attribute(name);
                match op {
                    AttrOp::Present => value.is_some(),
                    AttrOp::Equals(expected) => value.as_deref() == Some(expected.as_str()),
                    AttrOp::Contains(needle) => value.is_some_and(|v| v.contains(needle.as_str())),
                }
            }
        })
    }
}

/// Parses a comma-separated selector list, dropping malformed entries.
///
/// This is the entry point for user-supplied custom target/exclude strings:
/// one broken selector must not disable the rest of the list, and nothing in
/// the keystroke path may fail over it.
pub fn parse_list_lossy(inputs: &[String]) -> Vec<Selector> {
    let mut selectors = Vec::new();
    for input in inputs {
        for piece in split_list(input) {
            match Selector::parse(piece) {
                Ok(selector) => selectors.push(selector),
                Err(error) => warn!(selector = piece, %error, "ignoring malformed selector"),
            }
        }
    }
    selectors
}

/// Parses a fixed, known-good selector list (adapter construction).
///
/// Malformed entries are skipped with a warning rather than panicking; a
/// missing candidate just shortens a lookup ladder.
pub fn parse_static_list(inputs: &[&str]) -> Vec<Selector> {
    let mut selectors = Vec::new();
    for input in inputs {
        match Selector::parse(input) {
            Ok(selector) => selectors.push(selector),
            Err(error) => warn!(selector = input, %error, "ignoring malformed selector"),
        }
    }
    selectors
}

/// Splits on top-level commas, ignoring commas inside attribute brackets
/// and quoted values.
fn split_list(input: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (index, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                pieces.push(&input[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    pieces.push(&input[start..]);
    pieces
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        chars.next();
        ident.push(c);
    }
    ident
}

fn parse_attribute(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    open_index: usize,
) -> Result<SimplePart, SelectorError> {
    let name = take_ident(chars);
    if name.is_empty() {
        return Err(SelectorError::Unsupported(open_index));
    }

    let op = match chars.peek().copied() {
        Some((_, ']')) => {
            chars.next();
            return Ok(SimplePart::Attr {
                name,
                op: AttrOp::Present,
            });
        }
        Some((_, '=')) => {
            chars.next();
            false
        }
        Some((index, '*')) => {
            chars.next();
            match chars.next() {
                Some((_, '=')) => true,
                _ => return Err(SelectorError::Unsupported(index)),
            }
        }
        Some((index, _)) => return Err(SelectorError::Unsupported(index)),
        None => return Err(SelectorError::UnterminatedAttribute),
    };

    let value = take_attribute_value(chars)?;
    match chars.next() {
        Some((_, ']')) => Ok(SimplePart::Attr {
            name,
            op: if op {
                AttrOp::Contains(value)
            } else {
                AttrOp::Equals(value)
            },
        }),
        Some((index, _)) => Err(SelectorError::Unsupported(index)),
        None => Err(SelectorError::UnterminatedAttribute),
    }
}

fn take_attribute_value(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) -> Result<String, SelectorError> {
    let mut value = String::new();
    match chars.peek().copied() {
        Some((_, q)) if q == '"' || q == '\'' => {
            chars.next();
            loop {
                match chars.next() {
                    Some((_, c)) if c == q => break,
                    Some((_, c)) => value.push(c),
                    None => return Err(SelectorError::UnterminatedAttribute),
                }
            }
        }
        _ => {
            while let Some(&(_, c)) = chars.peek() {
                if c == ']' {
                    break;
                }
                chars.next();
                value.push(c);
            }
        }
    }
    Ok(value)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

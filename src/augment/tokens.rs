//! Token-boundary substitution over opaque expression text.
//!
//! Expressions are never parsed. A name occurrence is recognised purely by
//! its neighbours: it must not be preceded or followed by an
//! identifier-like character, so `x` is found in `x + 1` and `f (x)` but
//! not in `x1`, `max` or `x'`.

use std::borrow::Cow;

use super::error::AugmentError;

/// Returns `true` if `c` can continue an identifier.
///
/// Identifier-like characters are Unicode alphanumerics (which include
/// subscript digits such as `₁`), `_` and the prime `'`.
#[must_use]
pub fn is_identifier_like(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '\''
}

/// Replaces every whole-token occurrence of `old` in `text` with `new`.
///
/// The text is scanned left to right. A match that violates the token
/// boundary is copied through and scanning resumes one character later,
/// so overlapping candidates are still considered. Returns
/// [`Cow::Borrowed`] when nothing was replaced.
///
/// # Errors
///
/// Returns [`AugmentError::EmptyToken`] if `old` is empty.
///
/// # Examples
///
///     use leantree_augment::augment::substitute;
///
///     assert_eq!(substitute("max x", "x", "y").unwrap(), "max y");
///     assert_eq!(substitute("maxx", "x", "y").unwrap(), "maxx");
pub fn substitute<'a>(text: &'a str, old: &str, new: &str) -> Result<Cow<'a, str>, AugmentError> {
    if old.is_empty() {
        return Err(AugmentError::EmptyToken);
    }

    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut from = 0;
    while let Some(start) = text
        .get(from..)
        .and_then(|rest| rest.find(old))
        .map(|offset| from + offset)
    {
        let end = start + old.len();
        if is_whole_token(text, start, end) {
            let buf = out.get_or_insert_with(|| String::with_capacity(text.len()));
            buf.push_str(text.get(copied..start).unwrap_or_default());
            buf.push_str(new);
            copied = end;
            from = end;
        } else {
            from = start + char_len_at(text, start);
        }
    }

    Ok(match out {
        None => Cow::Borrowed(text),
        Some(mut buf) => {
            buf.push_str(text.get(copied..).unwrap_or_default());
            Cow::Owned(buf)
        }
    })
}

/// Splits `text` into its maximal runs of identifier-like characters.
pub fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c| !is_identifier_like(c))
        .filter(|token| !token.is_empty())
}

fn is_whole_token(text: &str, start: usize, end: usize) -> bool {
    let before = text.get(..start).and_then(|s| s.chars().next_back());
    let after = text.get(end..).and_then(|s| s.chars().next());
    !before.is_some_and(is_identifier_like) && !after.is_some_and(is_identifier_like)
}

fn char_len_at(text: &str, at: usize) -> usize {
    text.get(at..)
        .and_then(|s| s.chars().next())
        .map_or(1, char::len_utf8)
}

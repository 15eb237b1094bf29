//! Body flattening — multipart trees down to one plain-text string.
//!
//! Text leaves are concatenated in pre-order (left to right, depth first)
//! with no separator between parts; opaque leaves contribute nothing.
//! Downstream token matching depends on the no-separator concatenation,
//! so it is covered by tests rather than left as a style choice.

use crate::error::Error;
use crate::message::Body;

/// Nesting levels tolerated before a body tree is rejected as malformed.
const MAX_DEPTH: usize = 32;

/// Flatten a body tree into the concatenation of its text leaves.
///
/// Walks an explicit worklist instead of recursing, so pathological
/// nesting surfaces as `Error::MalformedContent` rather than a blown
/// stack. A body with no text leaves yields the empty string — that is
/// not an error.
pub fn flatten_text(body: &Body) -> Result<String, Error> {
    let mut text = String::new();
    let mut worklist: Vec<(&Body, usize)> = vec![(body, 0)];

    while let Some((node, depth)) = worklist.pop() {
        if depth > MAX_DEPTH {
            return Err(Error::MalformedContent(format!(
                "multipart nesting exceeds {MAX_DEPTH} levels"
            )));
        }
        match node {
            Body::Text(part) => text.push_str(part),
            Body::Multipart(children) => {
                // Reverse push keeps the pop order left-to-right.
                for child in children.iter().rev() {
                    worklist.push((child, depth + 1));
                }
            }
            Body::Opaque => {}
        }
    }

    Ok(text)
}

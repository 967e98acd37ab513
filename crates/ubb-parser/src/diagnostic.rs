use serde::Serialize;

use crate::tag::NodeKind;

/// Recovery the parser made on malformed input.
///
/// Diagnostics are informative only: parsing never fails, the recovered tree is already in the
/// [`Document`](crate::Document) when a diagnostic is recorded.
///
/// Positions are character offsets of the tokens involved, `None` when the token is past the end
/// of input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Input ended before the closing tag, the tag holds everything after it.
    #[error("tag {kind:?} opened at {position:?} is never closed")]
    UnclosedTag {
        kind: NodeKind,
        position: Option<usize>,
    },

    /// An open tag ended early because the closing tag of an outer tag showed up.
    #[error("tag {expected:?} implicitly closed by closing tag {found:?} at {position:?}")]
    MismatchedClosingTag {
        expected: NodeKind,
        found: String,
        position: Option<usize>,
    },

    /// Closing tag with no open tag to close.
    #[error("closing tag {name:?} at {position:?} has no open tag to close")]
    UnmatchedClosingTag {
        name: String,
        position: Option<usize>,
    },

    /// Tag name not in the tag table.
    #[error("unknown tag {name:?} at {position:?}")]
    UnknownTag {
        name: String,
        position: Option<usize>,
    },

    /// Tag head or tail not terminated by `]`.
    #[error("missing `]` after tag {name:?} at {position:?}")]
    MissingRightBracket {
        name: String,
        position: Option<usize>,
    },

    /// `[` followed by neither a tag name nor `/`.
    #[error("`[` at {position:?} does not start a tag")]
    MalformedTagHeader { position: Option<usize> },

    /// `=` or `,` in tag head not followed by a value.
    #[error("attribute separator at {position:?} has no value")]
    EmptyAttribute { position: Option<usize> },

    /// `$` or `$$` without the matching delimiter after the expression.
    #[error("latex expression at {position:?} is not terminated")]
    UnterminatedLatex { position: Option<usize> },

    /// Tag nested deeper than [`ParseOptions::max_depth`](crate::ParseOptions::max_depth), its
    /// content is kept as siblings.
    #[error("tag {kind:?} at {position:?} nested too deep")]
    NestingTooDeep {
        kind: NodeKind,
        position: Option<usize>,
    },
}

impl Diagnostic {
    /// Character offset the diagnostic refers to.
    pub fn position(&self) -> Option<usize> {
        match self {
            Diagnostic::UnclosedTag { position, .. }
            | Diagnostic::MismatchedClosingTag { position, .. }
            | Diagnostic::UnmatchedClosingTag { position, .. }
            | Diagnostic::UnknownTag { position, .. }
            | Diagnostic::MissingRightBracket { position, .. }
            | Diagnostic::MalformedTagHeader { position }
            | Diagnostic::EmptyAttribute { position }
            | Diagnostic::UnterminatedLatex { position }
            | Diagnostic::NestingTooDeep { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_and_position() {
        let diagnostic = Diagnostic::UnknownTag {
            name: "upload".into(),
            position: Some(4),
        };
        assert_eq!(r#"unknown tag "upload" at Some(4)"#, diagnostic.to_string());
        assert_eq!(Some(4), diagnostic.position());
        assert_eq!(
            None,
            Diagnostic::UnterminatedLatex { position: None }.position()
        );
    }
}

use std::str::FromStr;

use serde::Deserialize;

/// Default value of [`ParseOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error("invalid fallback policy {0:?}, expected \"literal\" or \"discard\"")]
    InvalidFallbackPolicy(String),
}

/// What to do with tag syntax that does not become a tag node.
///
/// Applies to tags with unknown names (`[upload=jpg]`), closing tags no open tag claimed (`[/b]`
/// with no `[b]` open) and `[` tokens not followed by a tag name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Keep the source spelling as a text node.
    #[default]
    Literal,

    /// Drop it.
    Discard,
}

impl FromStr for FallbackPolicy {
    type Err = OptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "literal" => Ok(FallbackPolicy::Literal),
            "discard" => Ok(FallbackPolicy::Discard),
            _ => Err(OptionError::InvalidFallbackPolicy(s.to_string())),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub fallback: FallbackPolicy,

    /// Maximum nesting of tags.
    ///
    /// A tag opened at this depth gets no content: what would be its content becomes its
    /// siblings.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fallback_policy() {
        assert_eq!(Ok(FallbackPolicy::Literal), "literal".parse());
        assert_eq!(Ok(FallbackPolicy::Discard), "Discard".parse());
        assert_eq!(
            Err(OptionError::InvalidFallbackPolicy("keep".into())),
            "keep".parse::<FallbackPolicy>()
        );
    }
}

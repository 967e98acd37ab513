use serde::Serialize;

/// All kinds of tokens.
///
/// Tokens are the units the lexer splits ubb markup into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// `[` opening a tag header.
    LeftBracket,

    /// `]` closing a tag header.
    RightBracket,

    /// `/` right after the `[` of a closing tag.
    Slash,

    /// `=` between tag name and the first attribute value.
    Equal,

    /// `,` between attribute values.
    Comma,

    /// Tag name, as written in source.
    TagName,

    /// One attribute value.
    AttrValue,

    /// Plain text.
    Text,

    /// `$`, inline latex delimiter.
    Dollar,

    /// `$$`, block latex delimiter.
    DoubleDollar,

    /// End of input.
    ///
    /// Never produced by the lexer, only used as the sentinel when peeking past the end.
    Eof,
}

impl TokenKind {
    /// The fixed spelling of punctuation tokens.
    ///
    /// Return `None` for kinds carrying their text in [`Token::value`].
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            TokenKind::LeftBracket => Some("["),
            TokenKind::RightBracket => Some("]"),
            TokenKind::Slash => Some("/"),
            TokenKind::Equal => Some("="),
            TokenKind::Comma => Some(","),
            TokenKind::Dollar => Some("$"),
            TokenKind::DoubleDollar => Some("$$"),
            TokenKind::Eof => Some(""),
            TokenKind::TagName | TokenKind::AttrValue | TokenKind::Text => None,
        }
    }
}

/// A single token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Kind of token.
    pub kind: TokenKind,

    /// Literal text.
    ///
    /// Empty for punctuation.
    pub value: String,

    /// Character offset in source where the token starts.
    ///
    /// Only used in diagnostics. `None` for tokens not coming from source, like [`Token::eof`].
    pub position: Option<usize>,
}

impl Token {
    /// Construct a token.
    pub fn new(kind: TokenKind, value: impl Into<String>, position: Option<usize>) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    /// Construct a punctuation token which has no value.
    pub fn punct(kind: TokenKind, position: usize) -> Self {
        Self::new(kind, String::new(), Some(position))
    }

    /// The end of input sentinel.
    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, String::new(), None)
    }

    /// Source spelling of the token.
    ///
    /// Concatenating the lexemes of all tokens lexed from a string gives back that string.
    pub fn lexeme(&self) -> &str {
        self.kind.symbol().unwrap_or(self.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexeme_of_punctuation_and_text() {
        assert_eq!("[", Token::punct(TokenKind::LeftBracket, 0).lexeme());
        assert_eq!("$$", Token::punct(TokenKind::DoubleDollar, 3).lexeme());
        assert_eq!(
            "quote",
            Token::new(TokenKind::TagName, "quote", Some(1)).lexeme()
        );
        assert_eq!("", Token::eof().lexeme());
        assert_eq!(None, Token::eof().position);
    }
}

use tracing::trace;

use crate::scanner::Scanner;
use crate::token::{Token, TokenKind};
use crate::{CLOSE, COMMA, DOLLAR, EQUAL, OPEN, SLASH};

/// Split `data` into tokens.
///
/// Never fails: anything not recognized as tag syntax or latex delimiter ends up in [`TokenKind::Text`]
/// tokens. The returned sequence does not carry a trailing [`TokenKind::Eof`].
pub fn lex(data: impl AsRef<str>) -> Vec<Token> {
    let mut lexer = Lexer::new(data.as_ref());
    lexer.scan();
    lexer.into_tokens()
}

pub struct Lexer {
    /// Inner scanner.
    source: Scanner,

    /// Start position of the text run currently constructing.
    start: usize,

    /// Scanned tokens.
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(data: &str) -> Self {
        Self {
            source: Scanner::new(data),
            start: 0,
            tokens: vec![],
        }
    }

    /// Run the process.
    pub fn scan(&mut self) {
        while let Some(ch) = self.source.curr() {
            match ch {
                OPEN => match self.scan_header() {
                    Some((tokens, len)) => {
                        self.collect_text();
                        self.tokens.extend(tokens);
                        self.source.advance(len);
                        self.start = self.source.position();
                    }
                    None => {
                        // Not a tag, keep the `[` in text.
                        self.source.next();
                    }
                },
                DOLLAR => {
                    self.collect_text();
                    let position = self.source.position();
                    if self.source.peek(1) == Some(DOLLAR) {
                        self.tokens
                            .push(Token::punct(TokenKind::DoubleDollar, position));
                        self.source.advance(2);
                    } else {
                        self.tokens.push(Token::punct(TokenKind::Dollar, position));
                        self.source.advance(1);
                    }
                    self.start = self.source.position();
                }
                _ => {
                    self.source.next();
                }
            }
        }
        self.collect_text();
        trace!("lexed {} tokens", self.tokens.len());
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    /// Push chars between `start` and the current position as a [`TokenKind::Text`] token, if any.
    fn collect_text(&mut self) {
        let end = self.source.position();
        if self.start < end {
            self.tokens.push(Token::new(
                TokenKind::Text,
                self.source.get_range(self.start, end),
                Some(self.start),
            ));
        }
        self.start = end;
    }

    /// Try to recognize a complete tag head or tail starting at the current `[`.
    ///
    /// ```console
    /// [ / name ]
    /// [ name = value , value ]
    /// ```
    ///
    /// Return the tokens and the count of characters they cover, or `None` if what follows the
    /// `[` is not a well-formed tag. Nothing is consumed here.
    fn scan_header(&self) -> Option<(Vec<Token>, usize)> {
        let base = self.source.position();
        let mut tokens = vec![Token::punct(TokenKind::LeftBracket, base)];
        let mut offset = 1;

        let closing = self.source.peek(offset) == Some(SLASH);
        if closing {
            tokens.push(Token::punct(TokenKind::Slash, base + offset));
            offset += 1;
        }

        let name_start = offset;
        while self.source.peek(offset).is_some_and(is_name_char) {
            offset += 1;
        }
        if offset == name_start {
            return None;
        }
        tokens.push(Token::new(
            TokenKind::TagName,
            self.source.get_range(base + name_start, base + offset),
            Some(base + name_start),
        ));

        match self.source.peek(offset)? {
            CLOSE => {}
            EQUAL if !closing => {
                tokens.push(Token::punct(TokenKind::Equal, base + offset));
                offset += 1;
                loop {
                    let value_start = offset;
                    let end = loop {
                        match self.source.peek(offset)? {
                            ch @ (CLOSE | COMMA) => break ch,
                            OPEN | '\n' => return None,
                            _ => offset += 1,
                        }
                    };
                    if offset > value_start {
                        tokens.push(Token::new(
                            TokenKind::AttrValue,
                            self.source.get_range(base + value_start, base + offset),
                            Some(base + value_start),
                        ));
                    }
                    if end == CLOSE {
                        break;
                    }
                    tokens.push(Token::punct(TokenKind::Comma, base + offset));
                    offset += 1;
                }
            }
            _ => return None,
        }

        tokens.push(Token::punct(TokenKind::RightBracket, base + offset));
        offset += 1;

        Some((tokens, offset))
    }
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '*')
}

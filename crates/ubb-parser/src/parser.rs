use std::collections::HashMap;
use std::mem;

use tracing::{debug, trace};

use crate::diagnostic::Diagnostic;
use crate::node::{Attributes, Document, Node, NodeId};
use crate::options::{FallbackPolicy, ParseOptions};
use crate::tag::{map_to_node_kind, NodeKind};
use crate::token::{Token, TokenKind};
use crate::{CLOSE, OPEN, SLASH};

/// Build the document tree from `tokens` with default options.
pub fn parse(tokens: Vec<Token>) -> Document {
    Parser::new(tokens).parse()
}

pub fn parse_with_options(tokens: Vec<Token>, options: ParseOptions) -> Document {
    Parser::with_options(tokens, options).parse()
}

/// Recursive descent parser over a token sequence.
///
/// Each tag opens a content region that ends at its closing tag. A closing tag of some other
/// known tag ends the region without being consumed, so an outer region can claim it:
///
/// ```console
/// [b][i]Text[/b][/i]
///
/// document
/// ├── bold
/// │   └── italic
/// │       └── "Text"
/// └── "[/i]"
/// ```
///
/// Running out of tokens ends every open region.
pub struct Parser {
    tokens: Vec<Token>,

    /// Cursor, only moves forward.
    index: usize,

    /// Count of open content regions.
    depth: usize,

    /// Tags cut off by the depth limit whose closing tag is still ahead, by kind.
    truncated: HashMap<NodeKind, usize>,

    options: ParseOptions,

    document: Document,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParseOptions::default())
    }

    pub fn with_options(tokens: Vec<Token>, options: ParseOptions) -> Self {
        Self {
            tokens,
            index: 0,
            depth: 0,
            truncated: HashMap::new(),
            options,
            document: Document::new(),
        }
    }

    /// Run the process.
    pub fn parse(mut self) -> Document {
        self.parse_content(NodeId::ROOT, None);
        trace!(
            "parsed {} nodes with {} diagnostics",
            self.document.node_count(),
            self.document.diagnostics().len()
        );
        self.document
    }

    /// Parse children of `parent` until its closing tag of kind `expected`, or the end of input.
    ///
    /// At the root `expected` is `None`.
    fn parse_content(&mut self, parent: NodeId, expected: Option<NodeKind>) {
        while !self.done() {
            let closing = self.closing_tag_ahead();
            if closing.is_some_and(|x| self.claim_truncated(x)) {
                continue;
            }
            if let (Some(expected), Some(found)) = (expected, closing) {
                if found == expected {
                    self.consume_closing_tag();
                    return;
                }
                if found != NodeKind::Text {
                    // Leave it to outer regions.
                    let found = self.tokens[self.index + 2].value.clone();
                    let position = self.tokens[self.index].position;
                    self.record(Diagnostic::MismatchedClosingTag {
                        expected,
                        found,
                        position,
                    });
                    return;
                }
            }

            let Some(node) = self.parse_element() else {
                continue;
            };
            let opens_region = node.opens_region();
            let kind = node.kind();
            let position = node.position();
            let id = self.document.append(parent, node);
            if !opens_region {
                continue;
            }
            if self.depth >= self.options.max_depth {
                self.record(Diagnostic::NestingTooDeep { kind, position });
                *self.truncated.entry(kind).or_default() += 1;
                continue;
            }
            self.depth += 1;
            self.parse_content(id, Some(kind));
            self.depth -= 1;
        }

        if let Some(kind) = expected {
            let position = self.document.node(parent).position();
            self.record(Diagnostic::UnclosedTag { kind, position });
        }
    }

    /// Parse one unit starting at the current token.
    ///
    /// Return `None` when the unit produces no node.
    fn parse_element(&mut self) -> Option<Node> {
        let token = self.consume();
        match token.kind {
            TokenKind::Text => Some(Node::text(token.value, token.position)),
            TokenKind::Dollar | TokenKind::DoubleDollar => {
                let is_block = token.kind == TokenKind::DoubleDollar;
                let expression = self
                    .eat(TokenKind::Text)
                    .map(|x| x.value)
                    .unwrap_or_default();
                if self.eat(token.kind).is_none() {
                    self.record(Diagnostic::UnterminatedLatex {
                        position: token.position,
                    });
                }
                Some(Node::latex(expression, is_block, token.position))
            }
            TokenKind::LeftBracket => self.parse_tag_header(token.position),
            _ => {
                trace!("skip stray token {:?} at {:?}", token.kind, token.position);
                None
            }
        }
    }

    /// Parse `name=value,value]` after a `[` at `position`.
    fn parse_tag_header(&mut self, position: Option<usize>) -> Option<Node> {
        match self.peek_kind(0) {
            TokenKind::TagName => {}
            TokenKind::Slash => return self.parse_unclaimed_closing_tag(position),
            _ => {
                self.record(Diagnostic::MalformedTagHeader { position });
                return self.fallback(OPEN.to_string(), position);
            }
        }

        let name = self.consume().value;
        // Source spelling, for the fallback.
        let mut literal = format!("{OPEN}{name}");
        let mut attributes = Attributes::default();

        while !matches!(
            self.peek_kind(0),
            TokenKind::RightBracket | TokenKind::Eof
        ) {
            let token = self.consume();
            literal.push_str(token.lexeme());
            if !matches!(token.kind, TokenKind::Equal | TokenKind::Comma) {
                continue;
            }
            match self.eat(TokenKind::AttrValue) {
                Some(value) => {
                    literal.push_str(&value.value);
                    attributes.push(value.value);
                }
                None => self.record(Diagnostic::EmptyAttribute {
                    position: token.position,
                }),
            }
        }

        if self.eat(TokenKind::RightBracket).is_some() {
            literal.push(CLOSE);
        } else {
            self.record(Diagnostic::MissingRightBracket {
                name: name.clone(),
                position,
            });
        }

        let kind = map_to_node_kind(&name);
        if kind == NodeKind::Text {
            self.record(Diagnostic::UnknownTag { name, position });
            return self.fallback(literal, position);
        }

        Some(Node::tag(kind, name, attributes, position))
    }

    /// A `[/name]` no open region claimed.
    fn parse_unclaimed_closing_tag(&mut self, position: Option<usize>) -> Option<Node> {
        self.consume();
        let mut literal = format!("{OPEN}{SLASH}");
        match self.eat(TokenKind::TagName) {
            Some(name) => {
                literal.push_str(&name.value);
                self.record(Diagnostic::UnmatchedClosingTag {
                    name: name.value,
                    position,
                });
            }
            None => self.record(Diagnostic::MalformedTagHeader { position }),
        }
        if self.eat(TokenKind::RightBracket).is_some() {
            literal.push(CLOSE);
        }
        self.fallback(literal, position)
    }

    fn fallback(&self, literal: String, position: Option<usize>) -> Option<Node> {
        match self.options.fallback {
            FallbackPolicy::Literal => Some(Node::text(literal, position)),
            FallbackPolicy::Discard => None,
        }
    }

    /// Classify the closing tag `[/name` at the cursor, if there is one.
    fn closing_tag_ahead(&self) -> Option<NodeKind> {
        if self.peek_kind(0) != TokenKind::LeftBracket
            || self.peek_kind(1) != TokenKind::Slash
            || self.peek_kind(2) != TokenKind::TagName
        {
            return None;
        }
        Some(map_to_node_kind(&self.tokens[self.index + 2].value))
    }

    /// Consume the closing tag ahead if it belongs to a tag cut off by the depth limit.
    fn claim_truncated(&mut self, kind: NodeKind) -> bool {
        match self.truncated.get_mut(&kind) {
            Some(count) if *count > 0 => {
                *count -= 1;
                self.consume_closing_tag();
                true
            }
            _ => false,
        }
    }

    /// Consume `[/name]`, tolerating a missing `]`.
    fn consume_closing_tag(&mut self) {
        let position = self.consume().position;
        self.consume();
        let name = self.consume().value;
        if self.eat(TokenKind::RightBracket).is_none() {
            self.record(Diagnostic::MissingRightBracket { name, position });
        }
    }

    // === Token consumption ===

    fn done(&self) -> bool {
        self.peek_kind(0) == TokenKind::Eof
    }

    fn peek_kind(&self, offset: usize) -> TokenKind {
        self.tokens
            .get(self.index + offset)
            .map_or(TokenKind::Eof, |x| x.kind)
    }

    /// Move past the current token and return it.
    ///
    /// The cursor never moves back, so the value is moved out instead of cloned.
    fn consume(&mut self) -> Token {
        match self.tokens.get_mut(self.index) {
            Some(token) => {
                self.index += 1;
                Token::new(token.kind, mem::take(&mut token.value), token.position)
            }
            None => Token::eof(),
        }
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        (self.peek_kind(0) == kind).then(|| self.consume())
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        debug!("{diagnostic}");
        self.document.push_diagnostic(diagnostic);
    }
}

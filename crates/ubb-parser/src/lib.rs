//! Parser turning ubb markup (`[b]bold[/b]`, `[quote=author]...[/quote]`, `$x^2$`) into a
//! document tree.
//!
//! ```
//! use ubb_parser::{parse_str, NodeKind};
//!
//! let document = parse_str("Outer [b]Inner Text");
//! let bold = document.root().child(1).unwrap();
//! assert_eq!(NodeKind::Bold, bold.kind());
//! assert_eq!("Inner Text", bold.text_content());
//! ```

mod diagnostic;
pub mod lexer;
mod node;
mod options;
pub mod parser;
mod scanner;
pub mod tag;
pub mod token;

pub use diagnostic::Diagnostic;
pub use node::{
    Attributes, Descendants, Document, LatexData, NodeData, NodeId, NodeRef, TagData,
};
pub use options::{FallbackPolicy, OptionError, ParseOptions, DEFAULT_MAX_DEPTH};
pub use tag::{is_known_tag, map_to_node_kind, NodeKind};

const OPEN: char = '[';
const CLOSE: char = ']';
const SLASH: char = '/';
const EQUAL: char = '=';
const COMMA: char = ',';
const DOLLAR: char = '$';

/// Parse ubb markup with default options.
pub fn parse_str(data: impl AsRef<str>) -> Document {
    parse_str_with_options(data, ParseOptions::default())
}

pub fn parse_str_with_options(data: impl AsRef<str>, options: ParseOptions) -> Document {
    parser::parse_with_options(lexer::lex(data), options)
}

use std::fmt;
use std::fmt::Formatter;

use ubb_parser::{Document, NodeData, NodeRef, TagData};

/// Types that can be written as ubb markup.
pub trait UbbWrite {
    fn write_ubb(&self, formatter: &mut Formatter<'_>) -> fmt::Result;
}

struct UbbWrapper<'a, T>(&'a T);

impl<T: UbbWrite> fmt::Display for UbbWrapper<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.write_ubb(f)
    }
}

/// Write `code` as ubb markup.
///
/// Output is normalized: open tags are always closed, in nesting order, and empty attribute values
/// are gone. Parsing the output gives back the same tree.
pub fn to_ubb_string<T: UbbWrite>(code: &T) -> String {
    UbbWrapper(code).to_string()
}

impl UbbWrite for Document {
    fn write_ubb(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        self.root().write_ubb(formatter)
    }
}

impl UbbWrite for NodeRef<'_> {
    fn write_ubb(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self.data() {
            NodeData::Document => write_children(self, formatter),
            NodeData::Text(content) => formatter.write_str(content),
            NodeData::Latex(latex) => {
                let delimiter = if latex.is_block { "$$" } else { "$" };
                formatter.write_str(delimiter)?;
                formatter.write_str(&latex.expression)?;
                formatter.write_str(delimiter)
            }
            NodeData::Tag(tag) => {
                write_head(tag, formatter)?;
                if self.kind().is_self_closing() {
                    return Ok(());
                }
                write_children(self, formatter)?;
                formatter.write_fmt(format_args!("[/{}]", tag.name))
            }
        }
    }
}

/// `[name]` or `[name=value,value]`.
fn write_head(tag: &TagData, formatter: &mut Formatter<'_>) -> fmt::Result {
    formatter.write_str("[")?;
    formatter.write_str(&tag.name)?;
    for (idx, value) in tag.attributes.values().enumerate() {
        formatter.write_str(if idx == 0 { "=" } else { "," })?;
        formatter.write_str(value)?;
    }
    formatter.write_str("]")
}

fn write_children(node: &NodeRef<'_>, formatter: &mut Formatter<'_>) -> fmt::Result {
    for child in node.children() {
        child.write_ubb(formatter)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ubb_parser::parse_str;

    fn rewrite(data: &str) -> String {
        to_ubb_string(&parse_str(data))
    }

    #[test]
    fn well_formed_input_is_unchanged() {
        for data in [
            "[b][i]Hello[/i][/b]",
            "[quote=alice,42]hi[/quote]",
            "Math: $x^2$ and $$y$$",
            "[hr]Next Text[br][ac01]",
            "[url=https://example.com/?a=1]link[/url]",
            "正常[B]加粗[/B]",
            "[upload=jpg,1]File[/upload]",
            "a [ b ] c",
            "",
        ] {
            assert_eq!(data, rewrite(data));
        }
    }

    fn shape(node: NodeRef<'_>) -> String {
        let children = node.children().map(shape).collect::<Vec<_>>();
        format!("{}({})", node.kind().name(), children.join(","))
    }

    #[test]
    fn list_items_keep_their_shape() {
        for data in [
            "[list][*]one[/*][*]two[/*][/list]",
            "[list][*]one[*]two[/list]",
        ] {
            let document = parse_str(data);
            let written = to_ubb_string(&document);
            assert_eq!(
                shape(document.root()),
                shape(parse_str(&written).root()),
                "{data:?} written as {written:?}"
            );
        }
        assert_eq!(
            "[list][*]one[/*][*]two[/*][/list]",
            rewrite("[list][*]one[/*][*]two[/*][/list]")
        );
    }

    #[test]
    fn normalizes_recovered_input() {
        assert_eq!("Outer [b]Inner Text[/b]", rewrite("Outer [b]Inner Text"));
        assert_eq!("[b][i]Text[/i][/b][/i]", rewrite("[b][i]Text[/b][/i]"));
        assert_eq!("[size=3]x[/size]", rewrite("[size=,3]x[/size]"));
        assert_eq!("$x$", rewrite("$x"));
    }

    #[test]
    fn single_node() {
        let document = parse_str("[color=red]a[b]b[/b][/color]");
        let bold = document.root().child(0).unwrap().child(1).unwrap();
        assert_eq!("[b]b[/b]", to_ubb_string(&bold));
    }
}

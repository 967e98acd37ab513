use ubb_parser::{Document, NodeData, NodeRef};

/// Render the document as an indented tree, one node per line.
///
/// ```console
/// document
/// ├── bold
/// │   └── "Text"
/// └── latex $x$
/// ```
pub fn render_tree(document: &Document) -> String {
    let mut lines = vec![];
    let root = document.root();
    lines.push(describe(root));

    // (node, line prefix, is last child)
    let mut stack = root
        .children()
        .rev()
        .enumerate()
        .map(|(index, child)| (child, String::new(), index == 0))
        .collect::<Vec<_>>();

    while let Some((node, prefix, last)) = stack.pop() {
        let branch = if last { "└── " } else { "├── " };
        lines.push(format!("{prefix}{branch}{}", describe(node)));

        let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
        stack.extend(
            node.children()
                .rev()
                .enumerate()
                .map(|(index, child)| (child, child_prefix.clone(), index == 0)),
        );
    }

    lines.join("\n")
}

fn describe(node: NodeRef<'_>) -> String {
    match node.data() {
        NodeData::Document => "document".to_string(),
        NodeData::Text(content) => format!("{content:?}"),
        NodeData::Latex(latex) => {
            let delimiter = if latex.is_block { "$$" } else { "$" };
            format!("latex {delimiter}{}{delimiter}", latex.expression)
        }
        NodeData::Tag(tag) => {
            let mut line = node.kind().name().to_string();
            if !tag.attributes.is_empty() {
                let attributes = tag
                    .attributes
                    .iter()
                    .map(|(key, value)| format!("{key}={value:?}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                line.push(' ');
                line.push_str(attributes.as_str());
            }
            line
        }
    }
}

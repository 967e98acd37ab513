use serde::Serialize;

/// Kinds of node in a parsed document.
///
/// Tag names map to these kinds through [`map_to_node_kind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Root of the tree.
    Document,

    /// Plain text.
    ///
    /// Also the fallback classification of unknown tag names.
    Text,

    /// `[b]`.
    Bold,

    /// `[i]`.
    Italic,

    /// `[u]`.
    Underline,

    /// `[del]`.
    Strikethrough,

    /// `[size=$SIZE]`.
    Size,

    /// `[font=$NAME]`.
    Font,

    /// `[color=$COLOR]`.
    Color,

    /// `[url=$URL]`.
    Url,

    /// `[img]`.
    Image,

    /// `[audio]`.
    Audio,

    /// `[video]`.
    Video,

    /// `[code=$LANGUAGE]`.
    Code,

    /// `[quote=$AUTHOR]`.
    Quote,

    /// `[align=$ALIGN]`.
    Align,

    /// `[left]`.
    Left,

    /// `[right]`.
    Right,

    /// `[list]`.
    List,

    /// `[*]`, item in a list.
    ListItem,

    /// `[hr]`. Self-closing.
    Divider,

    /// `[br]`. Self-closing.
    LineBreak,

    /// `[math]` tag, or a `$...$` / `$$...$$` expression.
    Latex,

    /// `[bili]`, bilibili video.
    Bilibili,

    /// `[ac01]`, `[em12]`, `[cc98-03]`... Self-closing.
    Emoji,
}

/// Tag name prefixes classified as [`NodeKind::Emoji`].
const EMOJI_PREFIXES: [&str; 3] = ["ac", "em", "cc98"];

/// Classify a tag name, case-insensitive.
///
/// Total: names not recognized are classified as [`NodeKind::Text`].
pub fn map_to_node_kind(tag_name: &str) -> NodeKind {
    let name = tag_name.to_lowercase();
    if EMOJI_PREFIXES.iter().any(|x| name.starts_with(x)) {
        return NodeKind::Emoji;
    }

    match name.as_str() {
        "b" => NodeKind::Bold,
        "i" => NodeKind::Italic,
        "u" => NodeKind::Underline,
        "del" => NodeKind::Strikethrough,
        "size" => NodeKind::Size,
        "font" => NodeKind::Font,
        "color" => NodeKind::Color,
        "url" => NodeKind::Url,
        "img" => NodeKind::Image,
        "audio" => NodeKind::Audio,
        "video" => NodeKind::Video,
        "code" => NodeKind::Code,
        "quote" => NodeKind::Quote,
        "align" => NodeKind::Align,
        "left" => NodeKind::Left,
        "right" => NodeKind::Right,
        "list" => NodeKind::List,
        "*" => NodeKind::ListItem,
        "hr" => NodeKind::Divider,
        "br" => NodeKind::LineBreak,
        "math" => NodeKind::Latex,
        "bili" => NodeKind::Bilibili,
        _ => NodeKind::Text,
    }
}

/// Check the tag name is a tag we know, i.e. not falling back to [`NodeKind::Text`].
pub fn is_known_tag(tag_name: &str) -> bool {
    map_to_node_kind(tag_name) != NodeKind::Text
}

impl NodeKind {
    /// Tags of these kinds never have content or a closing tag.
    pub fn is_self_closing(&self) -> bool {
        match self {
            NodeKind::Divider | NodeKind::LineBreak | NodeKind::Emoji => true,
            NodeKind::Document
            | NodeKind::Text
            | NodeKind::Bold
            | NodeKind::Italic
            | NodeKind::Underline
            | NodeKind::Strikethrough
            | NodeKind::Size
            | NodeKind::Font
            | NodeKind::Color
            | NodeKind::Url
            | NodeKind::Image
            | NodeKind::Audio
            | NodeKind::Video
            | NodeKind::Code
            | NodeKind::Quote
            | NodeKind::Align
            | NodeKind::Left
            | NodeKind::Right
            | NodeKind::List
            | NodeKind::ListItem
            | NodeKind::Latex
            | NodeKind::Bilibili => false,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Text => "text",
            NodeKind::Bold => "bold",
            NodeKind::Italic => "italic",
            NodeKind::Underline => "underline",
            NodeKind::Strikethrough => "strikethrough",
            NodeKind::Size => "size",
            NodeKind::Font => "font",
            NodeKind::Color => "color",
            NodeKind::Url => "url",
            NodeKind::Image => "image",
            NodeKind::Audio => "audio",
            NodeKind::Video => "video",
            NodeKind::Code => "code",
            NodeKind::Quote => "quote",
            NodeKind::Align => "align",
            NodeKind::Left => "left",
            NodeKind::Right => "right",
            NodeKind::List => "list",
            NodeKind::ListItem => "list_item",
            NodeKind::Divider => "divider",
            NodeKind::LineBreak => "line_break",
            NodeKind::Latex => "latex",
            NodeKind::Bilibili => "bilibili",
            NodeKind::Emoji => "emoji",
        }
    }
}

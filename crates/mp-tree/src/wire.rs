//! Wire-shape decoding.
//!
//! The wire shape is an ordered JSON sequence where each element is either a
//! string scalar or an object carrying a `t` discriminant and, for container
//! kinds, a `c` children array. The shape is produced by an external parser
//! and must be accepted as-is, so decoding is lenient: missing children
//! default to empty, mistyped optional fields fall back to defaults, and
//! unknown discriminants become [`RenderTreeElem::Unknown`]. Only invalid
//! JSON itself is an error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::elem::{ColumnAlign, RenderTreeElem};

/// Error decoding a render tree message.
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The message was not valid JSON.
    #[error("invalid render tree message: {0}")]
    Json(#[from] serde_json::Error),
    /// The top-level value was not an array of elements.
    #[error("render tree message must be an array of elements")]
    NotASequence,
}

/// Decode a full render tree from its JSON wire form.
pub fn parse_tree(json: &str) -> Result<Vec<RenderTreeElem>, WireError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(WireError::NotASequence);
    };
    Ok(items.iter().map(elem_from_value).collect())
}

/// Decode a single element from its JSON wire form.
///
/// Never fails: anything that is not a recognized node becomes either a text
/// leaf (for scalars) or [`RenderTreeElem::Unknown`].
#[must_use]
pub fn elem_from_value(value: &Value) -> RenderTreeElem {
    let Value::Object(obj) = value else {
        // A leaf is a raw text scalar. Non-string scalars are not produced by
        // the serializer but degrade to their display form rather than fail.
        return match value {
            Value::String(s) => RenderTreeElem::Text(s.clone()),
            other => RenderTreeElem::Text(other.to_string()),
        };
    };

    let kind = obj.get("t").and_then(Value::as_str).unwrap_or_default();
    let children = || -> Vec<RenderTreeElem> {
        obj.get("c")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(elem_from_value).collect())
            .unwrap_or_default()
    };
    let str_field = |name: &str| obj.get(name).and_then(Value::as_str).map(str::to_owned);

    match kind {
        "p" => RenderTreeElem::Paragraph { children: children() },
        "h" => RenderTreeElem::Heading {
            level: obj
                .get("level")
                .and_then(Value::as_u64)
                .map_or(1, |level| u8::try_from(level).unwrap_or(6)),
            id: str_field("id"),
            children: children(),
        },
        "a" => RenderTreeElem::Link {
            href: str_field("href").unwrap_or_default(),
            title: str_field("title"),
            auto: obj.get("auto").and_then(Value::as_bool).unwrap_or(false),
            children: children(),
        },
        "img" => RenderTreeElem::Image {
            src: str_field("src").unwrap_or_default(),
            title: str_field("title"),
            children: children(),
        },
        "br" => RenderTreeElem::HardBreak,
        "blockquote" => RenderTreeElem::Blockquote { children: children() },
        "em" => RenderTreeElem::Emphasis { children: children() },
        "strong" => RenderTreeElem::Strong { children: children() },
        "del" => RenderTreeElem::Strikethrough { children: children() },
        "pre" => RenderTreeElem::CodeFence { children: children() },
        "code" => RenderTreeElem::Code {
            lang: str_field("lang"),
            children: children(),
        },
        "ol" => RenderTreeElem::OrderedList {
            start: obj.get("start").and_then(Value::as_u64),
            children: children(),
        },
        "ul" => RenderTreeElem::UnorderedList { children: children() },
        "li" => RenderTreeElem::ListItem { children: children() },
        "task-li" => RenderTreeElem::TaskListItem { children: children() },
        "checkbox" => RenderTreeElem::Checkbox {
            checked: obj.get("checked").and_then(Value::as_bool).unwrap_or(false),
        },
        "emoji" => RenderTreeElem::Emoji {
            name: str_field("name").unwrap_or_default(),
            children: children(),
        },
        "table" => RenderTreeElem::Table {
            align: obj
                .get("align")
                .and_then(Value::as_array)
                .map(|aligns| aligns.iter().map(align_from_value).collect())
                .unwrap_or_default(),
            children: children(),
        },
        "thead" => RenderTreeElem::TableHead { children: children() },
        "tbody" => RenderTreeElem::TableBody { children: children() },
        "tr" => RenderTreeElem::TableRow { children: children() },
        "th" => RenderTreeElem::TableHeaderCell { children: children() },
        "td" => RenderTreeElem::TableDataCell { children: children() },
        "hr" => RenderTreeElem::Rule,
        "fn-ref" => RenderTreeElem::FootnoteRef {
            id: obj.get("id").and_then(Value::as_u64).unwrap_or(0),
        },
        "fn-def" => RenderTreeElem::FootnoteDef {
            id: obj.get("id").and_then(Value::as_u64).unwrap_or(0),
            name: str_field("name"),
            children: children(),
        },
        "math" => RenderTreeElem::Math {
            expr: str_field("expr").unwrap_or_default(),
            inline: obj.get("inline").and_then(Value::as_bool).unwrap_or(false),
        },
        "html" => RenderTreeElem::RawHtml {
            raw: str_field("raw").unwrap_or_default(),
        },
        "modified" => RenderTreeElem::Modified,
        "match" => RenderTreeElem::Match { children: children() },
        "match-current" => RenderTreeElem::MatchCurrent { children: children() },
        "match-start" => RenderTreeElem::MatchStart { children: children() },
        "match-current-start" => RenderTreeElem::MatchCurrentStart { children: children() },
        other => RenderTreeElem::Unknown {
            kind: other.to_owned(),
            raw: Value::Object(obj.clone()).to_string(),
        },
    }
}

fn align_from_value(value: &Value) -> ColumnAlign {
    match value.as_str() {
        Some("left") => ColumnAlign::Left,
        Some("center") => ColumnAlign::Center,
        Some("right") => ColumnAlign::Right,
        _ => ColumnAlign::None,
    }
}

impl<'de> Deserialize<'de> for RenderTreeElem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(elem_from_value(&value))
    }
}

//! Funnel document schema shared across crates.
//!
//! Wire field names follow the upload format (`bgColor`, `pages[].blocks[].type`, ...).
//! Blocks are decoded leniently: a block whose `type` is unknown or whose
//! fields do not match its variant becomes [`BlockSlot::Malformed`] instead of
//! failing the whole document.

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// A complete uploaded funnel: a named, ordered list of mobile pages.
///
/// Decodes only from a JSON object; the derived impl alone would also take
/// an array of field values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct FunnelDocument {
    /// Display name shown in the header. Empty when absent from the input.
    #[serde(default)]
    pub name: String,
    /// CSS-style background colour of the preview canvas.
    #[serde(rename = "bgColor", default)]
    pub bg_color: String,
    #[serde(default)]
    pub pages: Vec<FunnelPage>,
}

impl FunnelDocument {
    pub fn page(&self, index: usize) -> Option<&FunnelPage> {
        self.pages.get(index)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Index of the last page, `None` for a document without pages.
    pub fn last_page_index(&self) -> Option<usize> {
        self.pages.len().checked_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct FunnelPage {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub blocks: Vec<BlockSlot>,
}

impl FunnelPage {
    pub fn new(id: impl Into<String>, blocks: Vec<FunnelBlock>) -> Self {
        Self {
            id: id.into(),
            blocks: blocks.into_iter().map(BlockSlot::Block).collect(),
        }
    }
}

impl<'de> Deserialize<'de> for FunnelDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = object_value(deserializer, "a funnel document object")?;
        FunnelDocument::deserialize(raw).map_err(de::Error::custom)
    }
}

impl Serialize for FunnelDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FunnelDocument::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for FunnelPage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = object_value(deserializer, "a page object")?;
        FunnelPage::deserialize(raw).map_err(de::Error::custom)
    }
}

impl Serialize for FunnelPage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FunnelPage::serialize(self, serializer)
    }
}

fn object_value<'de, D>(deserializer: D, expected: &'static str) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    if raw.is_object() {
        return Ok(raw);
    }
    let unexpected = match &raw {
        Value::Null => Unexpected::Unit,
        Value::Bool(b) => Unexpected::Bool(*b),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(s) => Unexpected::Str(s),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    };
    Err(de::Error::invalid_type(unexpected, &expected))
}

/// One renderable content unit, discriminated by the `type` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FunnelBlock {
    Text(TextBlock),
    Image(ImageBlock),
    List(ListBlock),
    Button(ButtonBlock),
}

impl FunnelBlock {
    pub fn id(&self) -> &str {
        match self {
            FunnelBlock::Text(b) => &b.id,
            FunnelBlock::Image(b) => &b.id,
            FunnelBlock::List(b) => &b.id,
            FunnelBlock::Button(b) => &b.id,
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            FunnelBlock::Text(_) => BlockKind::Text,
            FunnelBlock::Image(_) => BlockKind::Image,
            FunnelBlock::List(_) => BlockKind::List,
            FunnelBlock::Button(_) => BlockKind::Button,
        }
    }
}

/// Wire discriminant of a [`FunnelBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Text,
    Image,
    List,
    Button,
}

impl BlockKind {
    pub const ALL: [BlockKind; 4] = [
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::List,
        BlockKind::Button,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::List => "list",
            BlockKind::Button => "button",
        }
    }

    pub fn from_wire(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub id: String,
    pub text: String,
    pub color: String,
    /// CSS `text-align` value, interpreted at render time.
    #[serde(default)]
    pub align: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub id: String,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBlock {
    pub id: String,
    pub items: Vec<ListItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub title: String,
    pub description: String,
    #[serde(alias = "imageSrc")]
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonBlock {
    pub id: String,
    pub text: String,
    pub color: String,
    #[serde(rename = "bgColor")]
    pub bg_color: String,
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Justify,
    #[default]
    Start,
    End,
}

impl TextAlign {
    /// Interpret a CSS `text-align` value. The CSS-wide keywords (and an empty
    /// value) mean the initial alignment, `start`. `None` for anything else.
    pub fn from_css(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "left" => Some(TextAlign::Left),
            "center" => Some(TextAlign::Center),
            "right" => Some(TextAlign::Right),
            "justify" => Some(TextAlign::Justify),
            "end" => Some(TextAlign::End),
            "start" | "" => Some(TextAlign::Start),
            "inherit" | "initial" | "unset" | "revert" | "revert-layer" | "match-parent" => {
                Some(TextAlign::Start)
            }
            _ => None,
        }
    }
}

/// A block entry as found in `pages[].blocks`.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockSlot {
    Block(FunnelBlock),
    Malformed(MalformedBlock),
}

/// A block entry that could not be decoded into a known variant.
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedBlock {
    pub id: Option<String>,
    /// The raw `type` value, if it was a string.
    pub kind: Option<String>,
    pub reason: String,
    /// The original JSON, kept so the document serializes back unchanged.
    pub raw: Value,
}

impl BlockSlot {
    /// Decode one block entry, never failing.
    pub fn from_value(raw: Value) -> Self {
        match FunnelBlock::deserialize(&raw) {
            Ok(block) => BlockSlot::Block(block),
            Err(e) => {
                let id = raw.get("id").and_then(Value::as_str).map(str::to_owned);
                let kind = raw.get("type").and_then(Value::as_str).map(str::to_owned);
                let reason = match kind.as_deref() {
                    Some(k) if BlockKind::from_wire(k).is_none() => {
                        format!("unknown block type \"{k}\"")
                    }
                    None if raw.get("type").is_none() => "missing block type".to_string(),
                    _ => e.to_string(),
                };
                BlockSlot::Malformed(MalformedBlock {
                    id,
                    kind,
                    reason,
                    raw,
                })
            }
        }
    }

    pub fn as_block(&self) -> Option<&FunnelBlock> {
        match self {
            BlockSlot::Block(b) => Some(b),
            BlockSlot::Malformed(_) => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            BlockSlot::Block(b) => Some(b.id()),
            BlockSlot::Malformed(m) => m.id.as_deref(),
        }
    }
}

impl From<FunnelBlock> for BlockSlot {
    fn from(block: FunnelBlock) -> Self {
        BlockSlot::Block(block)
    }
}

impl<'de> Deserialize<'de> for BlockSlot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(BlockSlot::from_value(raw))
    }
}

impl Serialize for BlockSlot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            BlockSlot::Block(b) => b.serialize(serializer),
            BlockSlot::Malformed(m) => m.raw.serialize(serializer),
        }
    }
}

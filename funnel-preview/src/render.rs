//! Block renderer dispatch.
//!
//! Blocks are turned into a UI-independent [`PageView`]; the GUI paints it.
//! Keeping the view model separate lets tests inspect exactly what would be
//! drawn (colours, alignment, which images are block images) without a window.

use funnel_model::{BlockSlot, FunnelBlock, FunnelDocument, MalformedBlock, TextAlign};
use serde::Serialize;

use crate::assets::AssetResolver;
use crate::color::{parse_css_color, Rgba8};

pub const DEFAULT_CANVAS: Rgba8 = Rgba8::WHITE;
pub const DEFAULT_TEXT: Rgba8 = Rgba8::BLACK;
pub const DEFAULT_BUTTON_TEXT: Rgba8 = Rgba8::WHITE;
pub const DEFAULT_BUTTON_FILL: Rgba8 = Rgba8::rgb(0x25, 0x63, 0xeb);

/// Where an image appears; block images and list item images are told apart by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRole {
    Block,
    ListItem,
}

impl ImageRole {
    /// Stable identifier used by the GUI for widget ids.
    pub fn test_id(self) -> &'static str {
        match self {
            ImageRole::Block => "image-block",
            ImageRole::ListItem => "list-image-block",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageView {
    pub role: ImageRole,
    /// `src` as written in the document.
    pub src: String,
    /// URI handed to the image loader.
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListItemView {
    pub image: ImageView,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum Element {
    Paragraph {
        block_id: String,
        text: String,
        color: Rgba8,
        align: TextAlign,
    },
    Image { block_id: String, image: ImageView },
    List {
        block_id: String,
        items: Vec<ListItemView>,
    },
    /// Inert: clicking it never navigates.
    Button {
        block_id: String,
        label: String,
        foreground: Rgba8,
        background: Rgba8,
    },
    /// A block that could not be decoded, shown as an error card.
    Invalid {
        block_id: Option<String>,
        message: String,
    },
}

impl Element {
    pub fn block_id(&self) -> Option<&str> {
        match self {
            Element::Paragraph { block_id, .. }
            | Element::Image { block_id, .. }
            | Element::List { block_id, .. }
            | Element::Button { block_id, .. } => Some(block_id.as_str()),
            Element::Invalid { block_id, .. } => block_id.as_deref(),
        }
    }
}

/// Everything drawn for one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub page_id: String,
    pub index: usize,
    pub background: Rgba8,
    pub elements: Vec<Element>,
}

impl PageView {
    /// Images with the given role, in paint order.
    pub fn images(&self, role: ImageRole) -> Vec<&ImageView> {
        let mut out = Vec::new();
        for element in &self.elements {
            match element {
                Element::Image { image, .. } if image.role == role => out.push(image),
                Element::List { items, .. } => {
                    out.extend(items.iter().map(|i| &i.image).filter(|img| img.role == role));
                }
                _ => {}
            }
        }
        out
    }

    /// All user-visible strings, in paint order.
    pub fn visible_text(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for element in &self.elements {
            match element {
                Element::Paragraph { text, .. } => out.push(text.as_str()),
                Element::List { items, .. } => {
                    for item in items {
                        out.push(item.title.as_str());
                        out.push(item.description.as_str());
                    }
                }
                Element::Button { label, .. } => out.push(label.as_str()),
                Element::Invalid { message, .. } => out.push(message.as_str()),
                Element::Image { .. } => {}
            }
        }
        out
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.visible_text().iter().any(|t| t.contains(needle))
    }

    /// First paragraph whose text contains `needle`.
    pub fn find_paragraph(&self, needle: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| matches!(e, Element::Paragraph { text, .. } if text.contains(needle)))
    }
}

pub fn render_block(block: &FunnelBlock, assets: &AssetResolver) -> Element {
    match block {
        FunnelBlock::Text(t) => Element::Paragraph {
            block_id: t.id.clone(),
            text: t.text.clone(),
            color: color_or(&t.color, DEFAULT_TEXT, &t.id),
            align: align_or_start(&t.align, &t.id),
        },
        FunnelBlock::Image(i) => Element::Image {
            block_id: i.id.clone(),
            image: image_view(ImageRole::Block, &i.src, assets),
        },
        FunnelBlock::List(l) => Element::List {
            block_id: l.id.clone(),
            items: l
                .items
                .iter()
                .map(|item| ListItemView {
                    image: image_view(ImageRole::ListItem, &item.src, assets),
                    title: item.title.clone(),
                    description: item.description.clone(),
                })
                .collect(),
        },
        FunnelBlock::Button(b) => Element::Button {
            block_id: b.id.clone(),
            label: b.text.clone(),
            foreground: color_or(&b.color, DEFAULT_BUTTON_TEXT, &b.id),
            background: color_or(&b.bg_color, DEFAULT_BUTTON_FILL, &b.id),
        },
    }
}

pub fn render_slot(slot: &BlockSlot, assets: &AssetResolver) -> Element {
    match slot {
        BlockSlot::Block(block) => render_block(block, assets),
        BlockSlot::Malformed(m) => invalid_element(m),
    }
}

/// Render page `index` of `doc`; `None` when the page does not exist.
pub fn render_page(doc: &FunnelDocument, index: usize, assets: &AssetResolver) -> Option<PageView> {
    let page = doc.page(index)?;
    Some(PageView {
        page_id: page.id.clone(),
        index,
        background: canvas_color(doc),
        elements: page.blocks.iter().map(|slot| render_slot(slot, assets)).collect(),
    })
}

pub fn canvas_color(doc: &FunnelDocument) -> Rgba8 {
    if doc.bg_color.trim().is_empty() {
        return DEFAULT_CANVAS;
    }
    color_or(&doc.bg_color, DEFAULT_CANVAS, "bgColor")
}

fn image_view(role: ImageRole, src: &str, assets: &AssetResolver) -> ImageView {
    ImageView {
        role,
        src: src.to_string(),
        uri: assets.resolve(src),
    }
}

fn invalid_element(m: &MalformedBlock) -> Element {
    tracing::warn!(block = ?m.id, kind = ?m.kind, reason = %m.reason, "cannot render block");
    let label = match &m.id {
        Some(id) => format!("Block \"{id}\" cannot be displayed: {}", m.reason),
        None => format!("Block cannot be displayed: {}", m.reason),
    };
    Element::Invalid {
        block_id: m.id.clone(),
        message: label,
    }
}

fn align_or_start(raw: &str, block_id: &str) -> TextAlign {
    TextAlign::from_css(raw).unwrap_or_else(|| {
        tracing::warn!(block = block_id, align = raw, "unrecognised alignment, using start");
        TextAlign::Start
    })
}

fn color_or(raw: &str, fallback: Rgba8, block_id: &str) -> Rgba8 {
    match parse_css_color(raw) {
        Some(c) => c,
        None => {
            tracing::warn!(block = block_id, color = raw, "unrecognised colour, using default");
            fallback
        }
    }
}

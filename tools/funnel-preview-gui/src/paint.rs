//! Paints a [`PageView`] with egui widgets.

use eframe::egui::{self, Align, Color32, Layout, RichText, Stroke, Ui};
use funnel_model::TextAlign;
use funnel_preview::color::Rgba8;
use funnel_preview::render::{Element, ImageView, ListItemView, PageView};

const LIST_IMAGE_SIZE: f32 = 24.0;
const BUTTON_HEIGHT: f32 = 36.0;

pub fn color(c: Rgba8) -> Color32 {
    Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

pub fn page(ui: &mut Ui, view: &PageView) {
    for (i, element) in view.elements.iter().enumerate() {
        ui.push_id((view.index, i), |ui| paint_element(ui, element));
    }
}

fn paint_element(ui: &mut Ui, element: &Element) {
    match element {
        Element::Paragraph { text, color: c, align, .. } => {
            ui.add_space(16.0);
            paragraph(ui, text, color(*c), *align);
        }
        Element::Image { image, .. } => {
            ui.add_space(8.0);
            block_image(ui, image);
        }
        Element::List { items, .. } => {
            ui.add_space(8.0);
            list(ui, items);
        }
        Element::Button { label, foreground, background, .. } => {
            ui.add_space(16.0);
            inert_button(ui, label, color(*foreground), color(*background));
        }
        Element::Invalid { message, .. } => {
            ui.add_space(8.0);
            invalid(ui, message);
        }
    }
}

fn paragraph(ui: &mut Ui, text: &str, color: Color32, align: TextAlign) {
    let layout = match align {
        TextAlign::Left | TextAlign::Start => Layout::top_down(Align::Min),
        TextAlign::Center => Layout::top_down(Align::Center),
        TextAlign::Right | TextAlign::End => Layout::top_down(Align::Max),
        TextAlign::Justify => Layout::top_down_justified(Align::Min),
    };
    ui.with_layout(layout, |ui| {
        ui.add(egui::Label::new(RichText::new(text).color(color)).wrap(true));
    });
}

fn block_image(ui: &mut Ui, image: &ImageView) {
    if image.uri.is_empty() {
        missing_image(ui, egui::vec2(ui.available_width(), 120.0));
        return;
    }
    let width = ui.available_width();
    ui.push_id(image.role.test_id(), |ui| {
        ui.add(egui::Image::new(image.uri.as_str()).max_width(width));
    });
}

fn list_image(ui: &mut Ui, image: &ImageView) {
    let size = egui::vec2(LIST_IMAGE_SIZE, LIST_IMAGE_SIZE);
    if image.uri.is_empty() {
        missing_image(ui, size);
        return;
    }
    ui.push_id(image.role.test_id(), |ui| {
        ui.add(egui::Image::new(image.uri.as_str()).fit_to_exact_size(size));
    });
}

fn missing_image(ui: &mut Ui, size: egui::Vec2) {
    let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
    ui.painter().rect_filled(rect, 4.0, Color32::from_gray(220));
}

fn list(ui: &mut Ui, items: &[ListItemView]) {
    for (i, item) in items.iter().enumerate() {
        ui.push_id(i, |ui| {
            egui::Frame::none()
                .fill(Color32::WHITE)
                .stroke(Stroke::new(1.0, Color32::from_gray(229)))
                .rounding(6.0)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        list_image(ui, &item.image);
                        ui.add_space(16.0);
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&item.title).color(Color32::BLACK));
                            ui.label(RichText::new(&item.description).color(Color32::DARK_GRAY));
                        });
                    });
                });
            ui.add_space(8.0);
        });
    }
}

// Preview buttons never navigate; the click response is ignored.
fn inert_button(ui: &mut Ui, label: &str, foreground: Color32, background: Color32) {
    let button = egui::Button::new(RichText::new(label).color(foreground))
        .fill(background)
        .rounding(4.0);
    ui.add_sized([ui.available_width(), BUTTON_HEIGHT], button);
}

fn invalid(ui: &mut Ui, message: &str) {
    egui::Frame::none()
        .fill(Color32::from_rgb(254, 226, 226))
        .stroke(Stroke::new(1.0, Color32::from_rgb(220, 38, 38)))
        .rounding(4.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.colored_label(Color32::from_rgb(153, 27, 27), format!("⚠ {message}"));
        });
}

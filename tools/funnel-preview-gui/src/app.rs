use eframe::egui::{self, Align, Color32, Layout, RichText};
use funnel_preview::config::PreviewConfig;
use funnel_preview::viewport::{Axis, ViewportPreset};
use funnel_preview::{FunnelStore, PreviewController, UploadDialog};
use rfd::FileDialog;

use crate::paint;

const FRAME_ROUNDING: f32 = 16.0;
const FRAME_PADDING: f32 = 16.0;
const RESIZE_GRIP: f32 = 14.0;
const MIN_DRAG_SIZE: f32 = 120.0;

pub struct PreviewApp {
    store: FunnelStore,
    upload: UploadDialog,
    preview: PreviewController,
    status: String,
    // Frame size while a drag-resize is in progress.
    drag_size: Option<egui::Vec2>,
}

impl PreviewApp {
    pub fn new(cfg: PreviewConfig) -> Self {
        let mut app = Self {
            store: FunnelStore::new(),
            upload: UploadDialog::new(),
            preview: PreviewController::new(),
            status: String::new(),
            drag_size: None,
        };
        if let Some(path) = cfg.initial_file.as_deref() {
            match app.upload.upload_path_blocking(path, &mut app.store) {
                Ok(doc) => app.status = loaded_status(&doc.name),
                Err(e) => {
                    tracing::error!(file = %path.display(), error = %e, "startup upload failed");
                    app.status = format!("Could not open {}: {e}", path.display());
                }
            }
        }
        app
    }

    fn header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let brand = Color32::from_rgb(0x25, 0x63, 0xeb);
                ui.heading(RichText::new("◆ Funnel Preview").color(brand));
                if let Some(doc) = self.store.get() {
                    ui.separator();
                    ui.label(RichText::new(&doc.name).strong());
                }
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("⬆ Upload funnel data").clicked() {
                        self.upload.open();
                    }
                });
            });
        });
    }

    fn status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status.as_str());
                if let Some(origin) = self.store.origin() {
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.monospace(origin.display().to_string());
                    });
                }
            });
        });
    }

    fn upload_window(&mut self, ctx: &egui::Context) {
        if !self.upload.is_open() {
            return;
        }
        let mut open = true;
        let mut pick = false;
        let mut submit = false;
        egui::Window::new("Upload funnel data")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, [0.0, 120.0])
            .show(ctx, |ui| {
                ui.label("Upload a json file containing funnel data to preview it on mobile devices");
                ui.add_space(8.0);
                let chooser = egui::Button::new("Choose file to upload");
                pick = ui.add_sized([ui.available_width(), 64.0], chooser).clicked();
                if !self.upload.file_name().is_empty() {
                    ui.label(format!("📄 {}", self.upload.file_name()));
                }
                if let Some(err) = self.upload.error() {
                    ui.colored_label(Color32::RED, err);
                }
                ui.add_space(8.0);
                submit = ui
                    .add_enabled(self.upload.can_submit(), egui::Button::new("Upload"))
                    .clicked();
            });

        if pick {
            self.pick_file(ctx);
        }
        if submit {
            self.submit();
        }
        if !open {
            self.upload.cancel();
        }
    }

    fn pick_file(&mut self, ctx: &egui::Context) {
        match FileDialog::new().add_filter("Funnel data", &["json"]).pick_file() {
            Some(path) => {
                let token = self.upload.select_file(&path);
                let ctx = ctx.clone();
                self.upload.read_and_stage(token, path, move || ctx.request_repaint());
            }
            None => self.upload.clear_selection(),
        }
    }

    fn submit(&mut self) {
        match self.upload.confirm(&mut self.store) {
            Ok(doc) => self.status = loaded_status(&doc.name),
            Err(e) => self.status = format!("Upload failed: {e}"),
        }
    }

    fn toolbar(&mut self, ui: &mut egui::Ui) {
        let pager = *self.preview.pager();
        let viewport = *self.preview.viewport();
        ui.horizontal(|ui| {
            let previous = egui::Button::new("◀ Previous Page");
            if ui.add_enabled(pager.can_go_previous(), previous).clicked() {
                self.preview.go_previous();
            }
            ui.separator();

            ui.label("Dimensions:");
            let mut chosen = None;
            egui::ComboBox::from_id_source("viewport-preset")
                .selected_text(viewport.preset().label())
                .show_ui(ui, |ui| {
                    for preset in ViewportPreset::ALL {
                        let selected = viewport.preset() == preset;
                        if ui.selectable_label(selected, preset.label()).clicked() {
                            chosen = Some(preset);
                        }
                    }
                });
            if let Some(preset) = chosen {
                self.preview.viewport_mut().select_preset(preset);
            }

            let enabled = viewport.dimension_inputs_enabled();
            let mut width = viewport.width();
            let mut height = viewport.height();
            let width_input = ui.add_enabled(enabled, egui::DragValue::new(&mut width));
            if width_input.on_hover_text("width").changed() {
                self.preview.viewport_mut().set_dimension(Axis::Width, width);
            }
            ui.label("x");
            let height_input = ui.add_enabled(enabled, egui::DragValue::new(&mut height));
            if height_input.on_hover_text("height").changed() {
                self.preview.viewport_mut().set_dimension(Axis::Height, height);
            }
            ui.separator();

            if ui.add_enabled(pager.can_go_next(), egui::Button::new("Next Page ▶")).clicked() {
                self.preview.go_next();
            }
            ui.separator();
            ui.label(pager.label());
        });
    }

    fn preview_frame(&mut self, ui: &mut egui::Ui) {
        let viewport = *self.preview.viewport();
        let size = self
            .drag_size
            .unwrap_or_else(|| egui::vec2(viewport.width() as f32, viewport.height() as f32));

        ui.vertical_centered(|ui| {
            let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
            let view = self.preview.page_view(&self.store);
            let fill = view
                .map(|v| paint::color(v.background))
                .unwrap_or(ui.visuals().extreme_bg_color);
            ui.painter().rect_filled(rect, FRAME_ROUNDING, fill);

            let content = rect.shrink(FRAME_PADDING);
            ui.allocate_ui_at_rect(content, |ui| {
                egui::ScrollArea::vertical()
                    .id_source("preview-scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.set_width(content.width());
                        match view {
                            Some(view) => paint::page(ui, view),
                            None => {
                                ui.label("Nothing to preview. Please upload your funnel data first");
                            }
                        }
                    });
            });

            self.resize_grip(ui, rect);
        });
    }

    // The frame is centred horizontally, so width follows twice the pointer's
    // distance from the centre line.
    fn resize_grip(&mut self, ui: &mut egui::Ui, frame: egui::Rect) {
        let grip_size = egui::vec2(RESIZE_GRIP, RESIZE_GRIP);
        let grip = egui::Rect::from_min_size(frame.max - grip_size, grip_size);
        let response = ui.interact(grip, ui.id().with("preview-resize"), egui::Sense::drag());
        if response.hovered() || response.dragged() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeNwSe);
        }
        let stroke = egui::Stroke::new(1.5, Color32::from_gray(140));
        for offset in [4.0, 8.0] {
            let from = egui::pos2(frame.max.x - offset, frame.max.y - 2.0);
            let to = egui::pos2(frame.max.x - 2.0, frame.max.y - offset);
            ui.painter().line_segment([from, to], stroke);
        }

        if response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let width = 2.0 * (pointer.x - frame.center().x);
                let size = egui::vec2(width, pointer.y - frame.min.y);
                self.drag_size = Some(size.max(egui::vec2(MIN_DRAG_SIZE, MIN_DRAG_SIZE)));
            }
        } else if let Some(size) = self.drag_size.take() {
            tracing::debug!(width = size.x, height = size.y, "preview frame resized");
            self.preview.viewport_mut().resize_to(size.x.round() as u32, size.y.round() as u32);
        }
    }
}

impl eframe::App for PreviewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.upload.poll();
        self.preview.sync(&self.store);

        self.header(ctx);
        self.status_bar(ctx);
        self.upload_window(ctx);

        let dialog_open = self.upload.is_open();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!dialog_open, |ui| {
                if self.store.get().is_some() {
                    self.toolbar(ui);
                    ui.add_space(12.0);
                }
                egui::ScrollArea::both().id_source("canvas").drag_to_scroll(false).show(ui, |ui| {
                    self.preview_frame(ui);
                });
            });
        });
    }
}

fn loaded_status(name: &str) -> String {
    format!("Loaded \"{name}\" at {}", chrono::Local::now().format("%H:%M:%S"))
}

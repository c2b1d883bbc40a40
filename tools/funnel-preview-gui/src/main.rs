mod app;
mod fonts;
mod paint;

use eframe::egui;
use funnel_preview::config::{PreviewConfig, PREVIEW_DEFAULTS, USAGE};
use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    let cfg = match PreviewConfig::from_args_and_env(std::env::args().skip(1)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{e}\n\n{USAGE}");
            std::process::exit(2);
        }
    };
    if cfg.show_help {
        print!("{USAGE}");
        return Ok(());
    }
    init_tracing(&cfg.log_filter);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(PREVIEW_DEFAULTS.window_title)
            .with_inner_size(PREVIEW_DEFAULTS.window_size),
        ..Default::default()
    };
    eframe::run_native(
        PREVIEW_DEFAULTS.window_title,
        options,
        Box::new(move |cc| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            fonts::install_fallback_fonts(&cc.egui_ctx, cfg.font_path.as_deref());
            Box::new(app::PreviewApp::new(cfg))
        }),
    )
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|e| {
        eprintln!("invalid log filter {filter:?} ({e}), using {}", PREVIEW_DEFAULTS.log_filter);
        EnvFilter::new(PREVIEW_DEFAULTS.log_filter)
    });
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

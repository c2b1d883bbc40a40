use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use eframe::egui;

// Funnel copy is often Japanese or Chinese; egui's bundled fonts have no CJK glyphs.
pub fn install_fallback_fonts(ctx: &egui::Context, configured: Option<&Path>) {
    let Some((path, data)) = candidate_font_paths(configured)
        .into_iter()
        .find_map(|p| fs::read(&p).ok().map(|d| (p, d)))
    else {
        tracing::debug!("no CJK fallback font found");
        return;
    };
    tracing::info!(font = %path.display(), "installing fallback font");

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert("cjk_fallback".into(), egui::FontData::from_owned(data));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        // after the defaults so Latin text keeps the stock look
        fonts.families.entry(family).or_default().push("cjk_fallback".into());
    }
    ctx.set_fonts(fonts);
}

fn candidate_font_paths(configured: Option<&Path>) -> Vec<PathBuf> {
    let mut paths: Vec<PathBuf> = configured.map(Path::to_path_buf).into_iter().collect();

    if let Ok(windir) = env::var("WINDIR") {
        let fonts_dir = PathBuf::from(windir).join("Fonts");
        paths.extend(["YuGothM.ttc", "meiryo.ttc", "msgothic.ttc"].map(|f| fonts_dir.join(f)));
    }
    paths.extend(
        [
            "/System/Library/Fonts/Hiragino Sans W3.ttc",
            "/Library/Fonts/Osaka.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
            "fonts/NotoSansJP-Regular.otf",
        ]
        .map(PathBuf::from),
    );
    paths
}

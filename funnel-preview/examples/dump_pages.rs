use std::path::PathBuf;

use funnel_preview::{FunnelStore, PreviewController, UploadDialog};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo run -p funnel-preview --example dump_pages -- <FILE.json>");
        std::process::exit(1);
    }
    let path = PathBuf::from(&args[1]);

    let mut store = FunnelStore::new();
    let mut dialog = UploadDialog::new();
    let doc = dialog.upload_path_blocking(&path, &mut store)?;
    println!("Funnel: {} ({} pages)", doc.name, doc.page_count());

    let mut preview = PreviewController::new();
    loop {
        if let Some(view) = preview.page_view(&store) {
            println!("{}", serde_json::to_string_pretty(view)?);
        }
        if !preview.go_next() {
            break;
        }
    }
    Ok(())
}

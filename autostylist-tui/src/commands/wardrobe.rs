use std::path::Path;

use autostylist_common::models::{Category, Gender, Style, UploadFile, WardrobeItem};
use autostylist_core::services::CategoryFilter;

use super::{describe_error, image_link};
use crate::TuiModule;

/// Handle "upload", "wardrobe", "stats" and "delete".
pub async fn handle_wardrobe_command(cmd: &str, args: &[&str], tui: &TuiModule) -> String {
    match cmd {
        "upload" => upload(args, tui).await,
        "wardrobe" => {
            let filter = match args.first() {
                Some(s) => match s.parse::<CategoryFilter>() {
                    Ok(f) => f,
                    Err(e) => return e,
                },
                None => CategoryFilter::All,
            };
            if let Err(e) = tui.wardrobe.refresh().await {
                return describe_error(&e);
            }
            let items = tui.wardrobe.items(filter).await;
            if items.is_empty() {
                return format!("No items ({filter}).");
            }
            let mut out = format!("{} item(s) ({filter}):\n", items.len());
            for item in &items {
                out.push_str(&format!("  {}\n", show_item(tui, item)));
            }
            out
        }
        "stats" => match tui.wardrobe.remote_stats().await {
            Ok(stats) => {
                let mut out = format!("Total items: {}\n", stats.total);
                for (cat, n) in &stats.categories {
                    out.push_str(&format!("  {:<12} {}\n", cat, n));
                }
                out
            }
            Err(e) => describe_error(&e),
        },
        "delete" => {
            let Some(id) = args.first() else {
                return "Usage: delete <item_id>".to_string();
            };
            match tui.wardrobe.delete(id).await {
                Ok(ack) if ack.message.is_empty() => format!("Deleted {id}"),
                Ok(ack) => ack.message,
                Err(e) => describe_error(&e),
            }
        }
        _ => format!("Unknown wardrobe command '{}'", cmd),
    }
}

async fn upload(args: &[&str], tui: &TuiModule) -> String {
    if args.len() < 2 {
        return "Usage: upload <path> <category> [style] [gender]".to_string();
    }
    let category = match args[1].parse::<Category>() {
        Ok(c) => c,
        Err(e) => return e,
    };
    let style = match args.get(2).map(|s| s.parse::<Style>()).transpose() {
        Ok(s) => s.unwrap_or_default(),
        Err(e) => return e,
    };
    let gender = match args.get(3).map(|s| s.parse::<Gender>()).transpose() {
        Ok(g) => g.unwrap_or_default(),
        Err(e) => return e,
    };
    let file = match UploadFile::from_path(Path::new(args[0])) {
        Ok(f) => f,
        Err(e) => return describe_error(&e),
    };

    match tui.wardrobe.upload(&file, category, style, gender).await {
        Ok(resp) => {
            let colors: Vec<String> = resp.colors.iter().map(|c| c.to_css()).collect();
            let image = tui.client.probe_image(Some(&resp.image)).await;
            format!(
                "Uploaded {} -> {}\n  colors: {}",
                file.file_name,
                image.as_url(),
                if colors.is_empty() { "-".to_string() } else { colors.join(", ") }
            )
        }
        Err(e) => describe_error(&e),
    }
}

fn show_item(tui: &TuiModule, item: &WardrobeItem) -> String {
    format!(
        "{}  {:<11} {:<11} {:<6} used {}x  {}",
        item.id,
        item.category.as_str(),
        item.style.as_str(),
        item.gender.as_str(),
        item.usage_count,
        image_link(tui, &item.image_path)
    )
}

use autostylist_common::models::{
    FeedbackAction, Gender, Occasion, Outfit, OutfitBase, OutfitRank, RecommendationResponse,
};

use autostylist_core::services::RecommendationService;

use super::{describe_error, image_link};
use crate::TuiModule;

/// Handle "recommend", "context", "show", "like", "dislike" and "wear".
pub async fn handle_recommend_command(cmd: &str, args: &[&str], tui: &TuiModule) -> String {
    match cmd {
        "recommend" => {
            let Some(occasion) = args.first() else {
                return "Usage: recommend <occasion> [gender]".to_string();
            };
            let occasion = match occasion.parse::<Occasion>() {
                Ok(o) => o,
                Err(e) => return e,
            };
            let gender = match args.get(1).map(|s| s.parse::<Gender>()).transpose() {
                Ok(g) => g.unwrap_or_default(),
                Err(e) => return e,
            };
            match tui.recommend.recommend(occasion, gender).await {
                Ok(resp) => {
                    let selected = tui.recommend.selected().await;
                    show_response(tui, &resp, selected)
                }
                Err(e) => match RecommendationService::hint(&e) {
                    Some(hint) => format!("{} ({hint})", describe_error(&e)),
                    None => describe_error(&e),
                },
            }
        }
        "context" => {
            let Some(occasion) = args.first() else {
                return "Usage: context <occasion>".to_string();
            };
            let occasion = match occasion.parse::<Occasion>() {
                Ok(o) => o,
                Err(e) => return e,
            };
            match tui.recommend.context(occasion).await {
                Ok(ctx) => format!(
                    "{}: {:.1}°C, {}{} ({})",
                    ctx.city,
                    ctx.temperature,
                    ctx.weather,
                    ctx.weather_type.map(|w| format!(" / {w}")).unwrap_or_default(),
                    ctx.occasion
                ),
                Err(e) => describe_error(&e),
            }
        }
        "show" => {
            let Some(rank) = args.first() else {
                return "Usage: show <best|medium|average>".to_string();
            };
            let rank = match rank.parse::<OutfitRank>() {
                Ok(r) => r,
                Err(e) => return e,
            };
            if let Err(e) = tui.recommend.select(rank).await {
                return describe_error(&e);
            }
            match tui.recommend.last().await {
                Some(resp) => show_response(tui, &resp, rank),
                None => "Get recommendations first".to_string(),
            }
        }
        "like" | "dislike" | "wear" => {
            let action = match cmd.parse::<FeedbackAction>() {
                Ok(a) => a,
                Err(e) => return e,
            };
            match tui.recommend.send_feedback(action).await {
                Ok(ack) if ack.message.is_empty() => "Thanks for the feedback!".to_string(),
                Ok(ack) => ack.message,
                Err(e) => describe_error(&e),
            }
        }
        _ => format!("Unknown recommendation command '{}'", cmd),
    }
}

fn show_response(tui: &TuiModule, resp: &RecommendationResponse, selected: OutfitRank) -> String {
    let ctx = &resp.context;
    let mut out = format!(
        "{} outfits in {} ({:.1}°C, {})\n",
        ctx.occasion, ctx.city, ctx.temperature, ctx.weather
    );
    for (rank, outfit) in resp.recommendations.iter() {
        let marker = if rank == selected { "*" } else { " " };
        out.push_str(&format!("{marker} {}:\n", rank.label()));
        out.push_str(&show_outfit(tui, outfit));
    }
    out
}

fn show_outfit(tui: &TuiModule, outfit: &Outfit) -> String {
    let mut out = String::new();
    match &outfit.base {
        OutfitBase::Separates { top, bottom } => {
            out.push_str(&format!("    top        {}\n", image_link(tui, &top.image_path)));
            out.push_str(&format!("    bottom     {}\n", image_link(tui, &bottom.image_path)));
        }
        OutfitBase::FullBody(item) => {
            out.push_str(&format!("    full body  {}\n", image_link(tui, &item.image_path)));
        }
    }
    if let Some(shoes) = &outfit.extras.shoes {
        out.push_str(&format!("    shoes      {}\n", image_link(tui, &shoes.image_path)));
    }
    if let Some(jewellery) = &outfit.extras.jewellery {
        out.push_str(&format!("    jewellery  {}\n", image_link(tui, &jewellery.image_path)));
    }
    for acc in &outfit.extras.accessories {
        out.push_str(&format!("    accessory  {}\n", image_link(tui, &acc.image_path)));
    }
    out
}

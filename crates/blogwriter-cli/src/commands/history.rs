use crate::app::App;
use anyhow::Result;
use blogwriter_core::WriterError;
use blogwriter_core::generation::PostHistoryItem;

const EMPTY_HISTORY: &str = "No posts yet.";

pub async fn run(app: &App, json: bool) -> Result<()> {
    if !app.controller.is_signed_in() {
        return Err(WriterError::Unauthenticated.into());
    }

    let items = app.controller.refresh_history().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print!("{}", render(&items));
    }
    Ok(())
}

/// One line per post, in server order.
fn render(items: &[PostHistoryItem]) -> String {
    if items.is_empty() {
        return format!("{}\n", EMPTY_HISTORY);
    }

    let mut out = String::new();
    for item in items {
        let created = item
            .created_at_local()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| item.created_at.clone());

        let mut details = Vec::new();
        if let Some(tone) = &item.tone {
            details.push(tone.clone());
        }
        if let Some(length) = item.length {
            details.push(format!("{} chars", length));
        }

        out.push_str(&format!("{}  {}", created, item.keyword));
        if !details.is_empty() {
            out.push_str(&format!("  ({})", details.join(", ")));
        }
        out.push('\n');
    }
    out
}

use anyhow::Result;
use colored::Colorize;
use ecowatch_core::record::RecordId;

use super::Context;

pub fn list(ctx: &Context) {
    let entries = ctx.app.favorites().entries();
    if entries.is_empty() {
        println!("{}", "No favorites yet".bright_black());
        return;
    }
    for entry in entries {
        println!("{} #{} {}", "♥".red(), entry.id, entry.title);
    }
}

pub async fn add(ctx: &mut Context, id: RecordId) -> Result<()> {
    let record = ctx.app.records().get_by_id(id).await?;
    ctx.app.favorites_mut().add(&record);
    ctx.save_favorites().await?;
    println!("{}", format!("Added #{} {}", id, record.title).green());
    Ok(())
}

pub async fn remove(ctx: &mut Context, id: RecordId) -> Result<()> {
    ctx.app.favorites_mut().remove(id);
    ctx.save_favorites().await?;
    println!("{}", format!("Removed #{}", id).green());
    Ok(())
}

pub async fn clear(ctx: &mut Context) -> Result<()> {
    ctx.app.favorites_mut().clear();
    ctx.save_favorites().await
}

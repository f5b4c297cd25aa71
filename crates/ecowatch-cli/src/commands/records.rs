use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use ecowatch_application::annotate;
use ecowatch_core::EcowatchError;
use ecowatch_core::record::{RecordId, RecordPayload};

use super::Context;
use crate::render;

#[derive(Args)]
pub struct NewRecordArgs {
    #[arg(long)]
    pub title: String,
    /// Pollution type, e.g. "Plastique"
    #[arg(long = "type")]
    pub kind: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub location: String,
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: f64,
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: f64,
    /// Observation date (YYYY-MM-DD); today when omitted
    #[arg(long)]
    pub date: Option<String>,
    /// Photo URL
    #[arg(long)]
    pub photo: Option<String>,
}

impl NewRecordArgs {
    fn into_payload(self) -> RecordPayload {
        RecordPayload {
            title: self.title,
            kind: self.kind,
            description: self.description,
            observed_on: self.date.unwrap_or_else(today),
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            photo: self.photo,
        }
    }
}

/// Fields to change; anything omitted keeps its current value.
#[derive(Args)]
pub struct RecordPatchArgs {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long = "type")]
    pub kind: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    pub latitude: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    pub longitude: Option<f64>,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub photo: Option<String>,
}

impl RecordPatchArgs {
    fn apply(self, payload: &mut RecordPayload) {
        if let Some(title) = self.title {
            payload.title = title;
        }
        if let Some(kind) = self.kind {
            payload.kind = kind;
        }
        if let Some(description) = self.description {
            payload.description = description;
        }
        if let Some(location) = self.location {
            payload.location = location;
        }
        if let Some(latitude) = self.latitude {
            payload.latitude = latitude;
        }
        if let Some(longitude) = self.longitude {
            payload.longitude = longitude;
        }
        if let Some(date) = self.date {
            payload.observed_on = date;
        }
        if self.photo.is_some() {
            payload.photo = self.photo;
        }
    }
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

pub async fn list(ctx: &Context, search: Option<&str>) -> Result<()> {
    let records = ctx.app.records().search(search.unwrap_or_default()).await?;
    render::print_items(&annotate(&records, ctx.app.favorites()));
    Ok(())
}

pub async fn show(ctx: &Context, id: RecordId) -> Result<()> {
    match ctx.app.records().get_by_id(id).await {
        Ok(record) => {
            render::print_detail(&record, ctx.app.favorites());
            Ok(())
        }
        Err(e) => Err(missing_record(id, e)),
    }
}

pub async fn create(ctx: &Context, args: NewRecordArgs) -> Result<()> {
    require_login(ctx)?;
    let record = ctx.app.records().create(&args.into_payload()).await?;
    println!("{}", "Report created".bright_green());
    render::print_detail(&record, ctx.app.favorites());
    Ok(())
}

pub async fn update(ctx: &Context, id: RecordId, patch: RecordPatchArgs) -> Result<()> {
    require_login(ctx)?;
    let records = ctx.app.records();
    let current = records
        .get_by_id(id)
        .await
        .map_err(|e| missing_record(id, e))?;

    let mut payload = RecordPayload::from(&current);
    patch.apply(&mut payload);
    let record = records
        .update(id, &payload)
        .await
        .map_err(|e| missing_record(id, e))?;

    println!("{}", "Report updated".bright_green());
    render::print_detail(&record, ctx.app.favorites());
    Ok(())
}

pub async fn delete(ctx: &Context, id: RecordId) -> Result<()> {
    require_login(ctx)?;
    ctx.app
        .records()
        .delete(id)
        .await
        .map_err(|e| missing_record(id, e))?;
    println!("{}", format!("Report #{} deleted", id).bright_green());
    Ok(())
}

fn require_login(ctx: &Context) -> Result<()> {
    if !ctx.app.session().is_authenticated() {
        bail!("You need to log in first (ecowatch login --email ...)");
    }
    Ok(())
}

fn missing_record(id: RecordId, err: EcowatchError) -> anyhow::Error {
    if err.is_not_found() {
        anyhow::anyhow!("Report #{} no longer exists", id)
    } else {
        anyhow::anyhow!(err.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> RecordPayload {
        RecordPayload {
            title: "Sacs plastiques".to_string(),
            kind: "Plastique".to_string(),
            description: "Plage couverte".to_string(),
            observed_on: "2025-01-04".to_string(),
            location: "Marseille".to_string(),
            latitude: 43.29,
            longitude: 5.37,
            photo: None,
        }
    }

    #[test]
    fn test_patch_keeps_unset_fields() {
        let mut current = payload();
        RecordPatchArgs {
            title: Some("Sacs et bouteilles".to_string()),
            kind: None,
            description: None,
            location: None,
            latitude: Some(-1.5),
            longitude: None,
            date: None,
            photo: None,
        }
        .apply(&mut current);

        assert_eq!(current.title, "Sacs et bouteilles");
        assert_eq!(current.latitude, -1.5);
        assert_eq!(current.location, "Marseille");
        assert_eq!(current.observed_on, "2025-01-04");
    }

    #[test]
    fn test_new_record_defaults_date_to_today() {
        let args = NewRecordArgs {
            title: "Smog".to_string(),
            kind: "Air".to_string(),
            description: "Thick haze".to_string(),
            location: "Lyon".to_string(),
            latitude: 45.76,
            longitude: 4.83,
            date: None,
            photo: None,
        };

        let payload = args.into_payload();
        assert!(chrono::NaiveDate::parse_from_str(&payload.observed_on, "%Y-%m-%d").is_ok());
        assert!(payload.validate().is_ok());
    }
}

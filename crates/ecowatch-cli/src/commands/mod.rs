pub mod browse;
pub mod favorites;
pub mod records;
pub mod session;

use anyhow::Result;
use ecowatch_application::{AppBootstrap, Collaborators, FavoritesStore};
use ecowatch_core::config::AppConfig;
use ecowatch_infrastructure::{ConfigService, FavoritesFile, FileCredentialStore, FileSessionStore};
use std::path::Path;
use std::sync::Arc;

/// Everything a command needs, started the same way for every command.
pub struct Context {
    pub app: AppBootstrap,
    pub config: AppConfig,
    pub config_service: ConfigService,
    pub favorites_file: FavoritesFile,
}

impl Context {
    pub async fn load(home: Option<&Path>) -> Result<Self> {
        let config_service = ConfigService::new(home)?;
        let config = config_service.get_config();

        let collaborators = Collaborators::http(
            &config,
            Arc::new(FileSessionStore::new(home)?),
            Arc::new(FileCredentialStore::new(home)?),
        )?;
        let mut app = AppBootstrap::start(&config, collaborators).await;

        let favorites_file = FavoritesFile::new(home)?;
        match favorites_file.load().await {
            Ok(entries) => *app.favorites_mut() = FavoritesStore::from_entries(entries),
            Err(e) => tracing::warn!("[CLI] Ignoring unreadable favorites: {}", e),
        }

        Ok(Self {
            app,
            config,
            config_service,
            favorites_file,
        })
    }

    pub async fn save_favorites(&self) -> Result<()> {
        self.favorites_file
            .save(self.app.favorites().entries())
            .await?;
        Ok(())
    }
}

pub fn show_config(ctx: &Context) -> Result<()> {
    println!("# {}", ctx.config_service.path().display());
    print!("{}", toml::to_string_pretty(&ctx.config)?);
    Ok(())
}

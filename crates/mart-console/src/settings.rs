//! Platform-wide settings.

use mart_core::error::MartResult;
use mart_core::models::settings::{GlobalSettings, UpdateSettings};
use mart_core::repository::SettingsRepository;
use tracing::info;

pub struct PlatformSettingsService<G: SettingsRepository> {
    repo: G,
}

impl<G: SettingsRepository> PlatformSettingsService<G> {
    pub fn new(repo: G) -> Self {
        Self { repo }
    }

    /// Stored settings, or the defaults when none were ever saved.
    pub async fn get(&self) -> MartResult<GlobalSettings> {
        Ok(self.repo.get().await?.unwrap_or_default())
    }

    pub async fn update(&self, fields: UpdateSettings) -> MartResult<GlobalSettings> {
        let settings = self.repo.merge(fields).await?;
        info!(
            allow_public_registration = settings.allow_public_registration,
            maintenance_mode = settings.maintenance_mode,
            "Platform settings updated"
        );
        Ok(settings)
    }
}

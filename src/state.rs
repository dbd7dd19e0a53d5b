use std::sync::Arc;

use crate::{
    auth::repo::{PgUserStore, UserStore},
    config::AppConfig,
    db,
    profiles::repo::{PgProfileStore, ProfileStore},
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserStore>,
    pub profiles: Arc<dyn ProfileStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let pool = db::connect(&config.database_url).await?;
        db::migrate(&pool).await?;

        let users = Arc::new(PgUserStore::new(pool.clone()));
        let profiles = Arc::new(PgProfileStore::new(pool));
        Ok(Self::from_parts(config, users, profiles))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        profiles: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            config,
            users,
            profiles,
        }
    }
}

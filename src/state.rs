use crate::config::AppConfig;
use crate::db::PgStore;
use crate::nutrition::foods::FoodTable;
use crate::store::{MemoryStore, ProgressStore};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub foods: Arc<FoodTable>,
    pub store: Arc<dyn ProgressStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let foods = Arc::new(FoodTable::from_path_or_builtin(
            config.foods_path.as_deref(),
        )?);

        let store = match &config.database {
            Some(db) => Arc::new(PgStore::connect(db).await?) as Arc<dyn ProgressStore>,
            None => {
                tracing::warn!("DATABASE_URL not set; records are kept in memory only");
                Arc::new(MemoryStore::new()) as Arc<dyn ProgressStore>
            }
        };

        Ok(Self::from_parts(config, foods, store))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        foods: Arc<FoodTable>,
        store: Arc<dyn ProgressStore>,
    ) -> Self {
        Self {
            config,
            foods,
            store,
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database: None,
            host: "127.0.0.1".into(),
            port: 0,
            foods_path: None,
        });
        let foods = Arc::new(FoodTable::builtin().expect("builtin food table"));
        let store = Arc::new(MemoryStore::new()) as Arc<dyn ProgressStore>;
        Self::from_parts(config, foods, store)
    }
}

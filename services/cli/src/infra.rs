use chrono::NaiveDate;
use placement_tracker::config::AppConfig;
use placement_tracker::error::AppError;
use placement_tracker::workflows::placement::{CsvStore, PlacementService};
use std::path::PathBuf;
use tracing::debug;

/// A loaded data directory: the store it came from plus the service built over its contents.
pub(crate) struct Workspace {
    store: CsvStore,
    service: PlacementService,
}

impl Workspace {
    /// `data_dir` overrides `APP_DATA_DIR` when given on the command line.
    pub(crate) fn open(config: &AppConfig, data_dir: Option<PathBuf>) -> Result<Self, AppError> {
        let dir = data_dir.unwrap_or_else(|| config.storage.data_dir.clone());
        let store = CsvStore::new(dir);
        let registry = store.load()?;
        debug!(dir = %store.dir().display(), "workspace opened");

        Ok(Self {
            store,
            service: PlacementService::with_registry(registry, config.policy),
        })
    }

    pub(crate) fn service(&mut self) -> &mut PlacementService {
        &mut self.service
    }

    pub(crate) fn save(&self) -> Result<(), AppError> {
        self.store.save(self.service.registry())?;
        Ok(())
    }

    pub(crate) fn store(&self) -> &CsvStore {
        &self.store
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

/// Configuration pointing at a scratch data directory.
#[cfg(test)]
pub(crate) fn test_config(dir: &std::path::Path) -> AppConfig {
    use placement_tracker::config::{AppEnvironment, StorageConfig, TelemetryConfig};
    use placement_tracker::workflows::placement::PlacementPolicy;

    AppConfig {
        environment: AppEnvironment::Test,
        storage: StorageConfig {
            data_dir: dir.to_path_buf(),
        },
        telemetry: TelemetryConfig {
            log_level: "warn".to_string(),
        },
        policy: PlacementPolicy::default(),
    }
}

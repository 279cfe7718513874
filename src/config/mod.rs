use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::chart::ChartKind;
use crate::core::period::Period;
use crate::currency::CurrencyFormat;
use crate::errors::BudgetError;
use crate::utils::paths::{self, ensure_dir, write_atomic};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    pub default_period: Period,
    pub default_chart: ChartKind,
    /// Sample expense feed; defaults to `budgetwise-sample.json` in the data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_data: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            default_period: Period::Month,
            default_chart: ChartKind::Pie,
            sample_data: None,
            export_dir: None,
        }
    }
}

impl Config {
    pub fn currency_format(&self) -> CurrencyFormat {
        CurrencyFormat::for_locale(&self.locale, &self.currency)
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, BudgetError> {
        Self::with_base_dir(paths::app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, BudgetError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: paths::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config, BudgetError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| {
                BudgetError::ConfigError(format!("{}: {}", self.path.display(), err))
            })
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), BudgetError> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    /// Configured sample feed, or the default file in the data dir.
    pub fn sample_path(&self, config: &Config) -> PathBuf {
        config
            .sample_data
            .clone()
            .unwrap_or_else(|| paths::sample_file_in(&self.base))
    }

    pub fn store_dir(&self) -> PathBuf {
        paths::store_dir_in(&self.base)
    }
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;

use super::{
    ConfigContentProvider, ConfigError, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads, validates and caches a configuration document.
///
/// The first successful load is cached; later calls to [`ConfigManager::get_config`]
/// return the cached value until [`ConfigManager::set_config`] replaces it.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: Mutex<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config_serializer,
            config_content_provider,
            config: Mutex::new(None),
        }
    }

    /// Returns the stored config, or the default one when nothing is stored.
    pub fn get_config(&self) -> Result<TConfig, ConfigError> {
        Ok(self.load()?.unwrap_or_default())
    }

    /// Like [`ConfigManager::get_config`], but persists the default config when nothing is stored.
    pub fn get_or_init(&self) -> Result<TConfig, ConfigError> {
        match self.load()? {
            Some(config) => Ok(config),
            None => {
                let config = TConfig::default();
                self.set_config(&config)?;
                Ok(config)
            }
        }
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        *self.cache() = Some(config.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<TConfig>, ConfigError> {
        let mut current = self.cache();

        if let Some(config) = current.as_ref() {
            return Ok(Some(config.clone()));
        }

        let Some(content) = self.config_content_provider.get_config_content()? else {
            return Ok(None);
        };

        let config = self.config_serializer.deserialize(&content)?;
        config.validate().map_err(ConfigError::Invalid)?;

        *current = Some(config.clone());
        Ok(Some(config))
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, Option<TConfig>> {
        // the cached value stays consistent even if a holder panicked
        self.config.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

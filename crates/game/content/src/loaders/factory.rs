//! Content factory for building battle inputs from data files.

use std::path::{Path, PathBuf};

use battle_core::{BattleConfig, BattleTables};

use crate::loaders::{ConfigLoader, LoadResult, TablesLoader};

/// Content factory that loads all battle content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── tables.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the sample data shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load battle configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<BattleConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load static rows from `tables.ron`.
    pub fn load_tables(&self) -> LoadResult<BattleTables> {
        let path = self.data_dir.join("tables.ron");
        TablesLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn bundled_content_loads() {
        let factory = ContentFactory::bundled();
        let config = factory.load_config().unwrap();
        let tables = factory.load_tables().unwrap();

        assert_eq!(config.hand_size, 5);
        assert!(tables.card_count() > 0);
        assert!(tables.enemy("slime").is_some());
    }
}

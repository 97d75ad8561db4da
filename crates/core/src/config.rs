//! Loader configuration and input locations.

use crate::error::{MappingError, Result};
use crate::source::SourceSupplier;
use std::path::{Path, PathBuf};

/// Worker budget used when nothing else is configured.
pub const DEFAULT_WORKERS: usize = 3;

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Threads in the parse/merge pool. Clamped to at least one.
    pub workers: usize,
    pub log_dir: PathBuf,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            log_dir: Self::default_log_dir(),
        }
    }
}

impl LoaderConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn worker_count(&self) -> usize {
        self.workers.max(1)
    }

    /// Log directory, honouring `NAMEBRIDGE_LOG_DIR`.
    pub fn default_log_dir() -> PathBuf {
        if let Ok(env_dir) = std::env::var("NAMEBRIDGE_LOG_DIR") {
            return PathBuf::from(env_dir);
        }
        home_dir().join(".namebridge").join("logs")
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Paths to every input the loader consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    /// Origin to intermediate mappings (`PK`/`CL`/`FD`/`MD` records).
    pub intermediate: PathBuf,
    /// Constructor records (`<id> <intermediateClass> <descriptor>`).
    pub constructors: PathBuf,
    pub canonical_methods: PathBuf,
    pub canonical_fields: PathBuf,
    /// The compiled program, as a jar of origin-named classes.
    pub program: PathBuf,
}

impl SourceSet {
    /// Gradle cache root, honouring `NAMEBRIDGE_GRADLE_CACHE`.
    pub fn default_gradle_cache() -> PathBuf {
        if let Ok(env_dir) = std::env::var("NAMEBRIDGE_GRADLE_CACHE") {
            return PathBuf::from(env_dir);
        }
        home_dir()
            .join(".gradle")
            .join("caches")
            .join("minecraft")
    }

    pub fn from_gradle_cache(game_version: &str, names_version: &str) -> Result<Self> {
        Self::from_cache_root(&Self::default_gradle_cache(), game_version, names_version)
    }

    /// Resolves the conventional decompile-workspace layout under `cache`.
    pub fn from_cache_root(cache: &Path, game_version: &str, names_version: &str) -> Result<Self> {
        if !cache.is_dir() {
            return Err(MappingError::MissingSource {
                what: "gradle cache",
                path: cache.to_path_buf(),
            });
        }

        let program = cache
            .join("net/minecraft/minecraft")
            .join(game_version)
            .join(format!("minecraft-{game_version}.jar"));
        let config = cache
            .join("de/oceanlabs/mcp/mcp")
            .join(game_version)
            .join("config");
        let snapshot = cache.join("de/oceanlabs/mcp/mcp_snapshot").join(names_version);

        let set = Self {
            intermediate: config.join("joined.srg"),
            constructors: config.join("constructors.txt"),
            canonical_methods: snapshot.join("methods.csv"),
            canonical_fields: snapshot.join("fields.csv"),
            program,
        };
        set.check_exists()?;
        Ok(set)
    }

    pub fn check_exists(&self) -> Result<()> {
        let required = [
            ("program jar", &self.program),
            ("intermediate mappings", &self.intermediate),
            ("constructor mappings", &self.constructors),
            ("canonical method names", &self.canonical_methods),
            ("canonical field names", &self.canonical_fields),
        ];
        for (what, path) in required {
            if !path.is_file() {
                return Err(MappingError::MissingSource {
                    what,
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }

    /// Text suppliers for the four mapping inputs; the program jar is opened separately.
    pub fn text_sources(&self) -> TextSources {
        TextSources {
            intermediate: SourceSupplier::file(&self.intermediate),
            constructors: SourceSupplier::file(&self.constructors),
            canonical_methods: SourceSupplier::file(&self.canonical_methods),
            canonical_fields: SourceSupplier::file(&self.canonical_fields),
        }
    }
}

/// The four text inputs of a load, each re-openable.
#[derive(Clone)]
pub struct TextSources {
    pub intermediate: SourceSupplier,
    /// Read by the constructor pass in place of a second pass over `intermediate`;
    /// pass the intermediate supplier here when both live in one file.
    pub constructors: SourceSupplier,
    pub canonical_methods: SourceSupplier,
    pub canonical_fields: SourceSupplier,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_gradle_layout_resolution() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("net/minecraft/minecraft/1.13/minecraft-1.13.jar"));
        touch(&root.join("de/oceanlabs/mcp/mcp/1.13/config/joined.srg"));
        touch(&root.join("de/oceanlabs/mcp/mcp/1.13/config/constructors.txt"));
        touch(&root.join("de/oceanlabs/mcp/mcp_snapshot/20180801/methods.csv"));
        touch(&root.join("de/oceanlabs/mcp/mcp_snapshot/20180801/fields.csv"));

        let set = SourceSet::from_cache_root(root, "1.13", "20180801").unwrap();
        assert!(set.intermediate.ends_with("config/joined.srg"));
        assert!(set.canonical_fields.ends_with("20180801/fields.csv"));
        assert!(set.program.ends_with("minecraft-1.13.jar"));
    }

    #[test]
    fn test_missing_source_is_named() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("net/minecraft/minecraft/1.13/minecraft-1.13.jar"));

        let err = SourceSet::from_cache_root(root, "1.13", "20180801").unwrap_err();
        match err {
            MappingError::MissingSource { what, path } => {
                assert_eq!(what, "intermediate mappings");
                assert!(path.ends_with("joined.srg"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_worker_count_is_clamped() {
        let config = LoaderConfig::default().with_workers(0);
        assert_eq!(config.worker_count(), 1);
        assert_eq!(LoaderConfig::default().worker_count(), DEFAULT_WORKERS);
    }
}

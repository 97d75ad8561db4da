use crate::jar::JarClassReader;
use namebridge_core::{LoadOutcome, LoaderConfig, MappingLoader, MappingTable, Result, SourceSet};
use std::path::Path;

/// Builds a table from files on disk, reading class metadata from the program jar.
pub fn load_from_sources(sources: &SourceSet, config: &LoaderConfig) -> Result<LoadOutcome> {
    sources.check_exists()?;
    let reader = JarClassReader::open(&sources.program)?;
    MappingLoader::new(config.clone()).load_with_stats(&sources.text_sources(), &reader)
}

/// Builds a table for the given game and names versions out of the Gradle cache.
pub fn load_from_gradle_cache(
    game_version: &str,
    names_version: &str,
    config: &LoaderConfig,
) -> Result<MappingTable> {
    let sources = SourceSet::from_gradle_cache(game_version, names_version)?;
    load_from_sources(&sources, config).map(|outcome| outcome.table)
}

/// As [`load_from_gradle_cache`], then saves the table to `to`.
pub fn save_from_gradle_cache(
    game_version: &str,
    names_version: &str,
    config: &LoaderConfig,
    to: &Path,
) -> Result<MappingTable> {
    let table = load_from_gradle_cache(game_version, names_version, config)?;
    table.save(to)?;
    Ok(table)
}

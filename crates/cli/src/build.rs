use crate::InputArgs;
use namebridge_core::{LoaderConfig, SourceSet};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(
    inputs: &InputArgs,
    config: LoaderConfig,
    output: &Path,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let sources = resolve_sources(inputs)?;
    info!(
        "Building mappings from {} with {} workers...",
        sources.intermediate.display(),
        config.worker_count()
    );

    let outcome = namebridge_java::load_from_sources(&sources, &config)?;
    let table = outcome.table;
    let stats = outcome.propagation;

    info!("Build complete!");
    info!("Classes: {}", table.len());
    info!(
        "Inherited: {} methods, {} fields from {} roots",
        stats.inherited_methods, stats.inherited_fields, stats.roots
    );
    if !stats.unreachable.is_empty() {
        info!("Skipped {} classes in hierarchy cycles", stats.unreachable.len());
    }

    table.save(output)?;

    if json {
        let json_path = json_dump_path(output);
        info!("Saving JSON dump to: {}...", json_path.display());
        table.save_to_json(&json_path)?;
    }

    Ok(())
}

/// `<output>.json`, appended rather than swapped so it never replaces `output`.
fn json_dump_path(output: &Path) -> PathBuf {
    let mut path = output.as_os_str().to_owned();
    path.push(".json");
    PathBuf::from(path)
}

fn resolve_sources(inputs: &InputArgs) -> Result<SourceSet, Box<dyn std::error::Error>> {
    if let (Some(game), Some(names)) = (&inputs.game, &inputs.names) {
        return Ok(SourceSet::from_gradle_cache(game, names)?);
    }

    let sources = SourceSet {
        intermediate: required(&inputs.srg, "--srg")?,
        constructors: required(&inputs.constructors, "--constructors")?,
        canonical_methods: required(&inputs.methods, "--methods")?,
        canonical_fields: required(&inputs.fields, "--fields")?,
        program: required(&inputs.jar, "--jar")?,
    };
    sources.check_exists()?;
    Ok(sources)
}

fn required(path: &Option<PathBuf>, flag: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    path.clone()
        .ok_or_else(|| format!("{flag} is required unless --game and --names are given").into())
}

mod build;
mod inspect;

use clap::{Args, Parser, Subcommand};
use namebridge_core::LoaderConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "namebridge",
    version,
    about = "Builds origin -> canonical rename tables for obfuscated Java programs",
    long_about = "Namebridge joins an intermediate mapping, its constructor list and the \
                  community canonical name tables with the compiled program, propagates \
                  inherited members down the class hierarchy, and stores the result as a \
                  single mapping table."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a mapping table and save it
    #[command(
        long_about = "Loads every input, builds the mapping table and writes it to OUTPUT. \
                      Inputs come either from the Gradle cache (--game and --names) or from \
                      explicit paths."
    )]
    Build {
        #[command(flatten)]
        inputs: InputArgs,

        /// Where to write the table
        #[arg(short, long, value_name = "OUTPUT")]
        output: PathBuf,

        /// Worker threads for parsing and merging
        #[arg(short, long, default_value_t = namebridge_core::config::DEFAULT_WORKERS)]
        workers: usize,

        /// Also write a human-readable JSON dump next to OUTPUT
        #[arg(long)]
        json: bool,
    },
    /// Print the contents of a saved mapping table
    Inspect {
        /// Path to a table written by `build`
        #[arg(value_name = "TABLE")]
        table: PathBuf,

        /// Only show this class, by origin or canonical name
        #[arg(short, long)]
        class: Option<String>,
    },
}

#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Game version to look up in the Gradle cache
    #[arg(long, requires = "names")]
    pub game: Option<String>,

    /// Canonical names snapshot to look up in the Gradle cache
    #[arg(long, requires = "game")]
    pub names: Option<String>,

    /// Intermediate mapping file
    #[arg(long, conflicts_with = "game")]
    pub srg: Option<PathBuf>,

    /// Constructor list
    #[arg(long, conflicts_with = "game")]
    pub constructors: Option<PathBuf>,

    /// Canonical method names table
    #[arg(long, conflicts_with = "game")]
    pub methods: Option<PathBuf>,

    /// Canonical field names table
    #[arg(long, conflicts_with = "game")]
    pub fields: Option<PathBuf>,

    /// Program jar holding the origin-named classes
    #[arg(long, conflicts_with = "game")]
    pub jar: Option<PathBuf>,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Build { .. } => "build",
        Commands::Inspect { .. } => "inspect",
    };
    let config = LoaderConfig::default();
    let _guard = namebridge_core::logging::init_logging(component, &config.log_dir, true);

    match cli.command {
        Commands::Build {
            inputs,
            output,
            workers,
            json,
        } => build::run(&inputs, config.with_workers(workers), &output, json),
        Commands::Inspect { table, class } => inspect::run(&table, class.as_deref()),
    }
}

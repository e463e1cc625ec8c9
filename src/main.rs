use anyhow::Context;
use asa_scoreboard::model::TableSet;
use asa_scoreboard::output::{self, Style};
use asa_scoreboard::scoring::ScoreEdit;
use asa_scoreboard::{EngineError, JsonFileStore, Store};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const EXIT_SUCCESS: i32 = 0;
const EXIT_USAGE: i32 = 1;
const EXIT_STORE: i32 = 2;
const EXIT_VALIDATION: i32 = 3;
const EXIT_CONFIG: i32 = 4;
const EXIT_FINANCE: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the judged segments
    Segments,
    /// Show a segment's scoring sheet
    Sheet {
        /// Segment name (or id when no name matches)
        segment: String,
        /// Print the sheet as an editable YAML score file instead
        #[arg(long)]
        yaml: bool,
    },
    /// Save a segment's scores from a YAML file, replacing all of its rows
    Score {
        /// Segment name (or id when no name matches)
        segment: String,
        /// YAML list of {contestant_no, judge_1, judge_2, judge_3}
        #[arg(short, long)]
        input: PathBuf,
    },
    /// Show the Mr and Mrs leaderboards (default if no subcommand)
    Leaderboard,
    /// Show revenue, expenses and net profit/loss
    Finance,
    /// Create an empty workbook
    Init {
        /// Overwrite an existing workbook
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "asa-scoreboard")]
#[command(about = "Mr & Mrs ASA scoring, leaderboard and finance CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/asa-scoreboard/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the workbook (overrides the config file)
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "asa_scoreboard=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Report an engine error and exit with the code for its kind.
fn exit_with(err: EngineError) -> ! {
    let code = match &err {
        EngineError::Validation { issues, .. } => {
            eprintln!("Scores rejected, nothing was saved:");
            for issue in issues {
                eprintln!("  - {}", issue);
            }
            std::process::exit(EXIT_VALIDATION);
        }
        EngineError::MissingTotal(_) => EXIT_FINANCE,
        EngineError::UnknownSegment(_) => EXIT_USAGE,
        EngineError::StoreUnavailable { .. }
        | EngineError::StoreWrite { .. }
        | EngineError::Schema(_) => EXIT_STORE,
    };
    eprintln!("Error: {}", err);
    std::process::exit(code);
}

fn load(store: &JsonFileStore) -> TableSet {
    store.load_tables().unwrap_or_else(|e| exit_with(e))
}

fn read_edits(path: &Path) -> anyhow::Result<Vec<ScoreEdit>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read score file at {}", path.display()))?;
    let edits: Vec<ScoreEdit> = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse scores: invalid YAML in {}", path.display()))?;
    Ok(edits)
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Leaderboard);

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match asa_scoreboard::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Err(errors) = asa_scoreboard::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let store = JsonFileStore::new(cli.store.unwrap_or_else(|| config.store_path()));
    tracing::debug!(store = %store.path().display(), "using workbook");

    let style = Style {
        use_colors: output::should_use_colors(),
        currency: config.currency().to_string(),
        score_decimals: config.score_decimals(),
    };

    match command {
        Commands::Segments => {
            let tables = load(&store);
            println!("{}", output::format_segments(&tables.segments));
        }
        Commands::Sheet { segment, yaml } => {
            let tables = load(&store);
            let sheet = asa_scoreboard::scoring::scoring_sheet(&tables, &segment)
                .unwrap_or_else(|e| exit_with(e));
            if yaml {
                match serde_saphyr::to_string(&sheet.to_edits()) {
                    Ok(text) => print!("{}", text),
                    Err(e) => {
                        eprintln!("Failed to render score file: {}", e);
                        std::process::exit(EXIT_USAGE);
                    }
                }
            } else {
                println!("{}", output::format_sheet(&sheet, &style));
            }
        }
        Commands::Score { segment, input } => {
            let edits = match read_edits(&input) {
                Ok(edits) => edits,
                Err(e) => {
                    eprintln!("Input error: {:#}", e);
                    std::process::exit(EXIT_USAGE);
                }
            };
            let outcome = asa_scoreboard::scoring::save_segment_scores(&store, &segment, &edits)
                .unwrap_or_else(|e| exit_with(e));
            println!(
                "{}",
                output::format_replace_outcome(&outcome, style.use_colors)
            );
        }
        Commands::Leaderboard => {
            let tables = load(&store);
            let board = asa_scoreboard::leaderboard::build_leaderboard(&tables);
            if board.excluded_rows > 0 {
                tracing::info!(
                    excluded_rows = board.excluded_rows,
                    "some score rows could not be ranked"
                );
            }
            println!("{}", output::format_leaderboard(&board, &style));
        }
        Commands::Finance => {
            let tables = load(&store);
            let report = asa_scoreboard::finance::reconcile(&tables.revenue, &tables.expenses)
                .unwrap_or_else(|e| exit_with(e));
            println!("{}", output::format_finance(&report, &style));
        }
        Commands::Init { force } => {
            if store.exists() && !force {
                eprintln!(
                    "Workbook already exists at {} (use --force to overwrite)",
                    store.path().display()
                );
                std::process::exit(EXIT_USAGE);
            }
            if let Err(e) = store.persist_tables(&TableSet::default()) {
                exit_with(e);
            }
            println!("Created empty workbook at {}", store.path().display());
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

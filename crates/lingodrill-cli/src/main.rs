//! lingodrill CLI — fetch content, generate and take tests, drill vocabulary.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod console;
mod test_file;

#[derive(Parser)]
#[command(
    name = "lingodrill",
    version,
    about = "Chinese-Vietnamese vocabulary and reading trainer"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config file
    Init,

    /// Download every content pool into a local snapshot
    Fetch {
        /// Snapshot directory
        #[arg(long, default_value = "./lingodrill-pools")]
        out: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a pool snapshot and summarize its contents
    Validate {
        /// Snapshot directory
        #[arg(long, default_value = "./lingodrill-pools")]
        pools: PathBuf,
    },

    /// Generate a test from a pool snapshot
    Generate {
        /// Snapshot directory
        #[arg(long, default_value = "./lingodrill-pools")]
        pools: PathBuf,

        /// Test mode: quick-test, classic-exam, challenge, time-attack, random-reading
        #[arg(long, default_value = "quick-test")]
        mode: String,

        /// Number of questions (defaults to the mode's preset)
        #[arg(long)]
        count: Option<usize>,

        /// Output file
        #[arg(long, default_value = "test.json")]
        out: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade an answer sheet against a generated test
    Grade {
        /// Generated test JSON
        #[arg(long)]
        test: PathBuf,

        /// Answers JSON: {"question id": "answer"}
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, json, html
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the output to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Take a generated test interactively
    Take {
        /// Generated test JSON
        #[arg(long)]
        test: PathBuf,

        /// Write an HTML report of the run
        #[arg(long)]
        report: Option<PathBuf>,

        /// Report the session to the Content API
        #[arg(long)]
        track: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Type the hanzi for each meaning before the deadline
    SpeedRound {
        /// Snapshot directory
        #[arg(long, default_value = "./lingodrill-pools")]
        pools: PathBuf,

        /// Seconds per item (defaults to the config value)
        #[arg(long)]
        deadline: Option<f64>,

        /// Number of items
        #[arg(long, default_value = "20")]
        count: usize,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Untimed study drills
    Drill {
        /// Snapshot directory
        #[arg(long, default_value = "./lingodrill-pools")]
        pools: PathBuf,

        /// Drill: typing, streak, flashcard, choice, pinyin, match, translate, cloze, arrange, lesson, role-play
        #[arg(long, default_value = "typing")]
        kind: String,

        /// Vocabulary units to study (comma-separated, default: all)
        #[arg(long)]
        units: Option<String>,

        /// Order: sequential, random
        #[arg(long, default_value = "sequential")]
        order: String,

        /// Lesson id or title for sentence drills (default: all lessons)
        #[arg(long)]
        lesson: Option<String>,

        /// Report the session to the Content API
        #[arg(long)]
        track: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Upload a content spreadsheet to the Content API
    Import {
        /// Spreadsheet to upload
        #[arg(long)]
        file: PathBuf,

        /// Content kind: vocabulary, reading-units
        #[arg(long, default_value = "vocabulary")]
        kind: String,

        /// Import mode: append, overwrite
        #[arg(long, default_value = "append")]
        mode: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List past imports
    ImportLogs {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lingodrill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Fetch { out, config } => commands::fetch::execute(out, config).await,
        Commands::Validate { pools } => commands::validate::execute(pools).await,
        Commands::Generate {
            pools,
            mode,
            count,
            out,
            config,
        } => commands::generate::execute(pools, mode, count, out, config).await,
        Commands::Grade {
            test,
            answers,
            format,
            out,
        } => commands::grade::execute(test, answers, format, out),
        Commands::Take {
            test,
            report,
            track,
            config,
        } => commands::take::execute(test, report, track, config).await,
        Commands::SpeedRound {
            pools,
            deadline,
            count,
            config,
        } => commands::speed_round::execute(pools, deadline, count, config).await,
        Commands::Drill {
            pools,
            kind,
            units,
            order,
            lesson,
            track,
            config,
        } => commands::drill::execute(pools, kind, units, order, lesson, track, config).await,
        Commands::Import {
            file,
            kind,
            mode,
            config,
        } => commands::import::execute(file, kind, mode, config).await,
        Commands::ImportLogs { config } => commands::import::execute_logs(config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

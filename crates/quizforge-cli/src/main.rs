//! quizforge CLI: play quizzes, list and validate question banks, show reports.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizforge", version, about = "Terminal quiz engine")]
struct Cli {
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a quiz interactively
    Play {
        /// Path to .toml question bank or directory (default: from config)
        #[arg(long)]
        bank: Option<PathBuf>,

        /// Player name attempts are recorded under
        #[arg(long)]
        player: Option<String>,

        /// Number of questions per quiz (default: all)
        #[arg(long)]
        num_questions: Option<usize>,

        /// Only use questions with one of these tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,

        /// RNG seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,

        /// Write the player's report as JSON to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List the questions in a bank, with answers
    List {
        /// Path to .toml question bank or directory
        #[arg(long)]
        bank: PathBuf,

        /// Only list questions with one of these tags (comma-separated)
        #[arg(long)]
        tags: Option<String>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to question bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Show a saved player report
    Report {
        /// Report JSON written by `play --output`
        #[arg(long)]
        input: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example question bank
    Init,
}

fn main() {
    let cli = Cli::parse();

    let default_directive = if cli.verbose {
        "quizforge_core=debug,quizforge_cli=debug"
    } else {
        "quizforge_core=warn,quizforge_cli=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Play {
            bank,
            player,
            num_questions,
            tags,
            seed,
            output,
            config,
        } => commands::play::execute(commands::play::PlayOptions {
            bank,
            player,
            num_questions,
            tags: commands::parse_tags(tags.as_deref()),
            seed,
            output,
            config,
        }),
        Commands::List { bank, tags } => {
            commands::list::execute(bank, commands::parse_tags(tags.as_deref()))
        }
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Report { input, format } => commands::report::execute(input, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

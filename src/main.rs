use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use spelcheck::cli::output::{self, OutputFormat};
use spelcheck::config::{Config, Overrides};
use spelcheck::controller::replace;
use spelcheck::dict::loader;
use spelcheck::{checker, cli, Session};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "spelcheck")]
#[command(version, about = "An interactive spellchecker with inline suggestions", long_about = None)]
struct Cli {
    /// Dictionary locale (e.g., en_US)
    #[arg(short, long, global = true)]
    locale: Option<String>,

    /// Base URL serving <locale>/<locale>.aff and .dic
    #[arg(long, global = true, value_name = "URL")]
    dictionary_url: Option<String>,

    /// Directory holding <locale>.aff and <locale>.dic
    #[arg(long, global = true, value_name = "DIR", conflicts_with = "dictionary_url")]
    dictionary_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a file (or stdin) once and report misspellings
    Check {
        /// File to check; reads stdin when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Output format (text, json, html)
        #[arg(short = 'o', long, default_value = "text")]
        format: OutputFormat,

        /// Apply the top suggestion for every misspelling and print the result
        #[arg(short, long)]
        fix: bool,

        /// Exit with code 0 even if errors are found
        #[arg(long)]
        no_fail: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spelcheck", &mut io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose);

    let config = Config::load(Overrides {
        locale: cli.locale.clone(),
        dictionary_url: cli.dictionary_url.clone(),
        dictionary_dir: cli.dictionary_dir.clone(),
    })?;
    let colored = !cli.no_color;

    // Everything runs on one thread; only the dictionary fetches overlap.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;

    match cli.command {
        None => runtime.block_on(cli::interactive::run(&config, colored)),
        Some(Commands::Check {
            file,
            format,
            fix,
            no_fail,
        }) => {
            let errors = runtime.block_on(check(&config, file, format, fix, colored))?;
            if errors > 0 && !no_fail && !fix {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "spelcheck=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Returns the number of misspellings found
async fn check(
    config: &Config,
    file: Option<PathBuf>,
    format: OutputFormat,
    fix: bool,
    colored: bool,
) -> Result<usize> {
    let (source, text) = match &file {
        Some(path) => (
            path.display().to_string(),
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()))?,
        ),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            ("<stdin>".to_string(), text)
        }
    };

    let engine = loader::load(
        &config.dictionary_source(),
        &config.locale,
        config.max_suggestions,
    )
    .await
    .context("Could not load dictionary")?;
    let session = Session::new();

    let result = checker::check(&text, &*engine, &session, config.max_suggestions);

    if !fix {
        output::print_report(&source, &result, colored, format);
        return Ok(result.error_count);
    }

    let (corrected, count) =
        replace::correct_all(&text, &result.overlay, config.correct_all_scope)
            .context("Failed to apply corrections")?;
    print!("{}", corrected);
    output::print_fix_summary(count, colored);

    Ok(result.error_count)
}

mod config;
mod render;
mod session;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use formcheck::{catalog::validate_field, FieldName, FormEngine, RuleSet};
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing::Level;

use config::{Config, DEFAULT_CONFIG_PATH};
use session::SessionOptions;

#[derive(Parser)]
#[command(name = "formcheck", about = "Sign-up form validation from the terminal")]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a password and print the requirement checklist
    Strength {
        password: String,
    },
    /// Validate one value against a field's rules
    Check {
        /// Field name (e.g. email, confirmPassword)
        field: String,
        /// Value to validate; omitted means empty
        #[arg(default_value = "")]
        value: String,
    },
    /// Drive a whole form with line commands
    Session {
        /// Read commands from a file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
        /// Print snapshots as JSON lines
        #[arg(long)]
        json: bool,
    },
}

fn init_logging(level: &str) -> Result<()> {
    let level: Level = level
        .parse()
        .with_context(|| format!("Invalid log level: {level:?}"))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

fn check(config: &Config, field: &str, value: &str) -> Result<()> {
    let name: FieldName = field.parse()?;
    let rules = RuleSet::signup(&config.rules);

    // The confirmation is checked without a password to compare against
    match validate_field(value, rules.rules_for(name)) {
        Some(message) => println!("{}: {}", name.label(), message),
        None => println!("{}: ok", name.label()),
    }
    Ok(())
}

async fn session(config: &Config, script: Option<PathBuf>, json: bool) -> Result<()> {
    let engine = FormEngine::new(
        RuleSet::signup(&config.rules),
        session::demo_handler(config.submit.clone()),
    );
    let mut stdout = io::stdout().lock();

    match script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("Failed to open script: {:?}", path))?;
            let options = SessionOptions { json, prompt: false };
            session::run(&engine, BufReader::new(file), &mut stdout, options).await
        }
        None => {
            let stdin = io::stdin();
            let options = SessionOptions {
                json,
                prompt: !json && stdin.is_terminal(),
            };
            session::run(&engine, stdin.lock(), &mut stdout, options).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    init_logging(&config.logging.level)?;

    match cli.command {
        Commands::Strength { password } => {
            let strength = formcheck::catalog::score(&password);
            render::render_strength(&mut io::stdout().lock(), &strength)?;
        }
        Commands::Check { field, value } => check(&config, &field, &value)?,
        Commands::Session { script, json } => session(&config, script, json).await?,
    }
    Ok(())
}

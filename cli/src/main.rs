use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Deserialize;
use tracing::{info, warn};
use typeahead_core::{
    BoxedEngine, Config, Coordinator, DictionaryEngine, EngineRegistry, PredictionRequest,
    SessionKey, DEFAULT_LANGUAGE,
};

mod logging;

#[derive(Parser, Debug)]
#[command(name = "typeahead", version, about = "Word prediction for text input")]
struct Cli {
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Corpus for one language, as LANG=PATH. Repeatable.
    #[arg(long = "corpus", value_name = "LANG=PATH", value_parser = parse_corpus, global = true)]
    corpora: Vec<(String, PathBuf)>,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict once for the given text and print the response.
    Predict {
        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        lang: String,

        /// Character right after the cursor.
        #[arg(long)]
        next_char: Option<char>,

        /// Text before the cursor.
        text: String,
    },
    /// Read JSON-lines requests from stdin; answer at blank lines and EOF.
    Serve,
}

/// Non-request lines understood by `serve`.
#[derive(Deserialize, Debug)]
#[serde(tag = "command", rename_all = "camelCase")]
enum ControlMessage {
    SetConfig { config: Config },
    Cancel {
        #[serde(flatten)]
        session: SessionKey,
    },
}

fn parse_corpus(arg: &str) -> std::result::Result<(String, PathBuf), String> {
    match arg.split_once('=') {
        Some((lang, path)) if !lang.is_empty() && !path.is_empty() => {
            Ok((lang.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected LANG=PATH, got {arg:?}")),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => Config::load_toml(p)
            .with_context(|| format!("failed to load config from {}", p.display())),
        None => Ok(Config::default()),
    }
}

fn build_engines(corpora: &[(String, PathBuf)]) -> EngineRegistry {
    let engines = EngineRegistry::build(corpora.iter().map(|(lang, _)| lang), |lang| {
        let path = corpora
            .iter()
            .find(|(l, _)| l == lang)
            .map(|(_, p)| p)
            .context("no corpus configured")?;
        let engine = DictionaryEngine::load(path)
            .with_context(|| format!("failed to read corpus {}", path.display()))?;
        Ok(Box::new(engine) as BoxedEngine)
    });

    if engines.is_empty() {
        warn!("no prediction engine available; responses will be empty");
    }
    engines
}

fn serve(mut coordinator: Coordinator) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            flush(&mut coordinator, &mut out)?;
            continue;
        }

        let value: serde_json::Value = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "skipping malformed line");
                continue;
            }
        };

        if value.get("command").is_some() {
            match serde_json::from_value::<ControlMessage>(value) {
                Ok(ControlMessage::SetConfig { config }) => coordinator.set_config(config),
                Ok(ControlMessage::Cancel { session }) => {
                    coordinator.cancel(&session);
                }
                Err(e) => warn!(error = %e, "skipping unknown command"),
            }
            continue;
        }

        match serde_json::from_value::<PredictionRequest>(value) {
            Ok(request) => {
                coordinator.submit(request);
            }
            Err(e) => warn!(error = %e, "skipping malformed request"),
        }
    }

    flush(&mut coordinator, &mut out)?;
    info!(
        hits = coordinator.cache_stats().0,
        misses = coordinator.cache_stats().1,
        "input closed"
    );
    Ok(())
}

fn flush<W: Write>(coordinator: &mut Coordinator, out: &mut W) -> Result<()> {
    for delivery in coordinator.run_pending() {
        writeln!(out, "{}", serde_json::to_string(&delivery)?)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    let config = load_config(cli.config.as_deref())?;
    let engines = build_engines(&cli.corpora);
    let coordinator = Coordinator::with_config(engines, config);

    match cli.command {
        Command::Predict {
            lang,
            next_char,
            text,
        } => {
            let request = PredictionRequest::new(text, next_char, lang, SessionKey::default());
            let response = coordinator.run_prediction(&request);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Command::Serve => serve(coordinator)?,
    }

    Ok(())
}

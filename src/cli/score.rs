//! Score commands - read a snapshot, print a number

use anyhow::{Context, Result};
use blackbox::config::{load_scoring_config, load_scoring_config_from, CONFIG_FILE_NAME};
use blackbox::{
    ArticleSnapshot, BlackBox, CommentSnapshot, ExternalScoring, FunctionInvoker, HttpInvoker,
    NoopInvoker, ScoringConfig,
};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScoreKind {
    Hotness,
    Quality,
    Spaminess,
}

impl ScoreKind {
    fn name(self) -> &'static str {
        match self {
            ScoreKind::Hotness => "hotness",
            ScoreKind::Quality => "quality",
            ScoreKind::Spaminess => "spaminess",
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ScoreOptions {
    pub config: Option<PathBuf>,
    pub offline: bool,
    pub json: bool,
}

pub(crate) fn run(kind: ScoreKind, input: &Path, options: &ScoreOptions) -> Result<()> {
    let config = resolve_config(options.config.as_deref())?;
    let external = if options.offline {
        ExternalScoring::Disabled
    } else {
        ExternalScoring::from_env()
    };
    let engine = BlackBox::try_new(config, external).context("Invalid scoring configuration")?;
    let invoker = make_invoker(&engine);

    let score = match kind {
        ScoreKind::Hotness => {
            let article: ArticleSnapshot = read_snapshot(input)?;
            engine.article_hotness_score(&article, &*invoker)
        }
        ScoreKind::Quality => {
            let comment: CommentSnapshot = read_snapshot(input)?;
            engine.comment_quality_score(&comment)
        }
        ScoreKind::Spaminess => {
            let comment: CommentSnapshot = read_snapshot(input)?;
            engine.calculate_spaminess(&comment, &*invoker)
        }
    };

    println!("{}", render(kind, score, options.json));
    Ok(())
}

/// Explicit --config is strict; the implicit lookups fall back to defaults
fn resolve_config(explicit: Option<&Path>) -> Result<ScoringConfig> {
    if let Some(path) = explicit {
        return load_scoring_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()));
    }

    let cwd = std::env::current_dir()?;
    if cwd.join(CONFIG_FILE_NAME).exists() {
        return Ok(load_scoring_config(&cwd));
    }

    if let Some(user_dir) = dirs::config_dir().map(|p| p.join("blackbox")) {
        if user_dir.join(CONFIG_FILE_NAME).exists() {
            return Ok(load_scoring_config(&user_dir));
        }
    }

    debug!("No scoring config found, using defaults");
    Ok(ScoringConfig::default())
}

fn make_invoker(engine: &BlackBox) -> Box<dyn FunctionInvoker> {
    if !engine.external_scoring_enabled() {
        return Box::new(NoopInvoker);
    }
    match HttpInvoker::from_env() {
        Ok(invoker) => {
            debug!("Using function service at {}", invoker.endpoint());
            Box::new(invoker)
        }
        Err(e) => {
            warn!("External scoring enabled but unavailable ({}); scoring locally", e);
            Box::new(NoopInvoker)
        }
    }
}

fn read_snapshot<T: DeserializeOwned>(input: &Path) -> Result<T> {
    let content = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read snapshot from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?
    };
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid snapshot JSON in {}", input.display()))
}

fn render(kind: ScoreKind, score: i64, json: bool) -> String {
    if json {
        serde_json::json!({ "kind": kind.name(), "score": score }).to_string()
    } else {
        score.to_string()
    }
}

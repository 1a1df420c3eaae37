//! BlackBox - article and comment scoring
//!
//! Computes article hotness, comment quality and comment spaminess from
//! narrow entity snapshots, optionally mixing in a value from an external
//! function service.
//!
//! ```rust,ignore
//! use blackbox::{BlackBox, ExternalScoring, NoopInvoker, ScoringConfig};
//!
//! let engine = BlackBox::new(ScoringConfig::default(), ExternalScoring::from_env());
//! let hotness = engine.article_hotness_score(&article, &NoopInvoker);
//! ```

pub mod config;
pub mod invoker;
pub mod models;
pub mod scoring;

pub use config::{ExternalScoring, ScoringConfig};
pub use invoker::{FunctionInvoker, HttpInvoker, InvokerError, NoopInvoker};
pub use models::{ArticleSnapshot, CommentSnapshot, Reaction, UserSnapshot};
pub use scoring::{BlackBox, DEFAULT_SPAMINESS, MAX_SPAMINESS};

//! The scoring engine
//!
//! `BlackBox` holds the scoring constants and the external-scoring flag,
//! both fixed at construction. The invoker is passed per call so hosts can
//! share one engine across threads and still choose the transport.

use super::bonus::{body_bonus, dampen_reaction_points, descendants_bonus, recency_bonus};
use crate::config::{ConfigError, ExternalScoring, ScoringConfig};
use crate::invoker::{FunctionInvoker, InvokerResult};
use crate::models::{ArticleSnapshot, CommentSnapshot, UserSnapshot};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, warn};

/// Spaminess of a comment with no author
pub const MAX_SPAMINESS: i64 = 100;

/// Spaminess when no external score is available
pub const DEFAULT_SPAMINESS: i64 = 0;

#[derive(Serialize)]
struct HotnessPayload<'a> {
    article: &'a ArticleSnapshot,
}

#[derive(Serialize)]
struct SpamPayload<'a> {
    story: &'a CommentSnapshot,
    user: &'a UserSnapshot,
}

#[derive(Debug, Clone, Default)]
pub struct BlackBox {
    config: ScoringConfig,
    external: ExternalScoring,
}

impl BlackBox {
    pub fn new(config: ScoringConfig, external: ExternalScoring) -> Self {
        Self { config, external }
    }

    /// Like [`BlackBox::new`], but rejects configs that break scoring invariants
    pub fn try_new(config: ScoringConfig, external: ExternalScoring) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config, external))
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn external_scoring_enabled(&self) -> bool {
        self.external.is_enabled()
    }

    /// Hotness of an article right now
    pub fn article_hotness_score<I>(&self, article: &ArticleSnapshot, invoker: &I) -> i64
    where
        I: FunctionInvoker + ?Sized,
    {
        self.article_hotness_score_at(article, invoker, Utc::now())
    }

    /// Hotness of an article as of `now`
    pub fn article_hotness_score_at<I>(
        &self,
        article: &ArticleSnapshot,
        invoker: &I,
        now: DateTime<Utc>,
    ) -> i64
    where
        I: FunctionInvoker + ?Sized,
    {
        let recency = self.recency_bonus(article.published_at, now);

        let mut reaction_points = article.score;
        if article.has_tag(&self.config.watercooler.tag) {
            reaction_points = dampen_reaction_points(reaction_points, self.config.watercooler.factor);
        }

        let external = if self.external.is_enabled() {
            let key = &self.config.functions.article_hotness;
            match serde_json::to_string(&HotnessPayload { article }) {
                Ok(payload) => external_value(key, invoker.invoke(key, &payload)).unwrap_or(0),
                Err(e) => {
                    warn!("Could not encode article {} for {}: {}", article.id, key, e);
                    0
                }
            }
        } else {
            0
        };

        let score = recency
            .saturating_add(reaction_points)
            .saturating_add(external);
        debug!(
            "Article {} hotness: recency={} reactions={} external={} total={}",
            article.id, recency, reaction_points, external, score
        );
        score
    }

    /// Quality of a comment within its thread
    pub fn comment_quality_score(&self, comment: &CommentSnapshot) -> i64 {
        let rep_points = comment.reaction_points();
        let descendants_points = descendants_bonus(&self.config.comment, comment.descendants_count);
        let bonus_points = self.body_bonus(&comment.body_markdown);
        let spaminess_rating = DEFAULT_SPAMINESS;

        let score = rep_points
            .saturating_add(descendants_points)
            .saturating_add(bonus_points)
            .saturating_sub(spaminess_rating);
        debug!(
            "Comment {} quality: reactions={} descendants={} bonus={} spaminess={} total={}",
            comment.id, rep_points, descendants_points, bonus_points, spaminess_rating, score
        );
        score
    }

    /// Spam likelihood of a comment, 0-100
    pub fn calculate_spaminess<I>(&self, comment: &CommentSnapshot, invoker: &I) -> i64
    where
        I: FunctionInvoker + ?Sized,
    {
        let Some(user) = comment.user.as_ref() else {
            debug!("Comment {} has no user, maximal spaminess", comment.id);
            return MAX_SPAMINESS;
        };

        if !self.external.is_enabled() {
            return DEFAULT_SPAMINESS;
        }

        let key = &self.config.functions.spam_score;
        let payload = match serde_json::to_string(&SpamPayload { story: comment, user }) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Could not encode comment {} for {}: {}", comment.id, key, e);
                return DEFAULT_SPAMINESS;
            }
        };

        external_value(key, invoker.invoke(key, &payload)).unwrap_or(DEFAULT_SPAMINESS)
    }

    pub fn recency_bonus(&self, published_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
        recency_bonus(&self.config, published_at, now)
    }

    pub fn body_bonus(&self, body: &str) -> i64 {
        body_bonus(&self.config.comment, body)
    }
}

/// Collapse an invoker result to an integer contribution, logging why
/// nothing was contributed.
fn external_value(key: &str, result: InvokerResult<Option<f64>>) -> Option<i64> {
    match result {
        Ok(Some(value)) if value.is_finite() => Some(value.trunc() as i64),
        Ok(Some(value)) => {
            warn!("{} returned non-finite value {}, ignoring", key, value);
            None
        }
        Ok(None) => {
            debug!("{} returned no value", key);
            None
        }
        Err(e) => {
            warn!("{} failed: {}", key, e);
            None
        }
    }
}

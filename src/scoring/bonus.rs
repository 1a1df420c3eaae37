//! Local score components
//!
//! Pure functions over snapshot fields; none of these touch the invoker.

use crate::config::{CommentConfig, ScoringConfig};
use chrono::{DateTime, Utc};

/// Sum of recency tiers an article published at `published_at` still
/// qualifies for. Future timestamps count as age zero.
pub fn recency_bonus(config: &ScoringConfig, published_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let age_secs = (now - published_at).num_seconds().max(0);
    config.recency_bonus_for_age(age_secs as f64 / 3600.0)
}

/// Reduce reaction points for a low-priority article. Always strictly
/// lower than the input, including for zero and negative scores.
pub fn dampen_reaction_points(points: i64, factor: f64) -> i64 {
    let scaled = (points as f64 * factor).floor() as i64;
    scaled.min(points.saturating_sub(1))
}

/// One point per `descendants_divisor` replies
pub fn descendants_bonus(config: &CommentConfig, descendants_count: u32) -> i64 {
    match config.descendants_divisor {
        0 => 0,
        divisor => i64::from(descendants_count / divisor),
    }
}

/// Content bonus for a comment body
pub fn body_bonus(config: &CommentConfig, body: &str) -> i64 {
    let code_bonus = if !config.code_marker.is_empty() && body.contains(&config.code_marker) {
        config.code_block_bonus
    } else {
        0
    };
    let length_bonus = if body.chars().count() > config.min_length {
        config.length_bonus
    } else {
        0
    };
    code_bonus.saturating_add(length_bonus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn canonical_body() -> String {
        format!("```{}```", "hello, world! ".repeat(20))
    }

    #[test]
    fn test_recency_bonus_fresh() {
        let config = ScoringConfig::default();
        let now = Utc::now();
        assert_eq!(recency_bonus(&config, now, now), 1194);
    }

    #[test]
    fn test_recency_bonus_future_counts_as_fresh() {
        let config = ScoringConfig::default();
        let now = Utc::now();
        assert_eq!(recency_bonus(&config, now + Duration::hours(3), now), 1194);
    }

    #[test]
    fn test_recency_bonus_tiers() {
        let config = ScoringConfig::default();
        let now = Utc::now();
        assert_eq!(recency_bonus(&config, now - Duration::minutes(90), now), 1166);
        assert_eq!(recency_bonus(&config, now - Duration::hours(10), now), 1135);
        assert_eq!(recency_bonus(&config, now - Duration::hours(20), now), 1055);
        assert_eq!(recency_bonus(&config, now - Duration::hours(72), now), 330);
        assert_eq!(recency_bonus(&config, now - Duration::days(5), now), 0);
    }

    #[test]
    fn test_dampen_is_strictly_lower() {
        assert_eq!(dampen_reaction_points(99, 0.8), 79);
        assert_eq!(dampen_reaction_points(100, 0.8), 80);
        assert_eq!(dampen_reaction_points(0, 0.8), -1);
        assert_eq!(dampen_reaction_points(1, 0.8), 0);
        assert_eq!(dampen_reaction_points(-10, 0.8), -11);
        for points in -50..50 {
            assert!(dampen_reaction_points(points, 0.8) < points, "points={points}");
        }
    }

    #[test]
    fn test_descendants_bonus() {
        let config = CommentConfig::default();
        assert_eq!(descendants_bonus(&config, 0), 0);
        assert_eq!(descendants_bonus(&config, 1), 0);
        assert_eq!(descendants_bonus(&config, 5), 2);
    }

    #[test]
    fn test_body_bonus_canonical() {
        let config = CommentConfig::default();
        assert_eq!(body_bonus(&config, &canonical_body()), 3);
    }

    #[test]
    fn test_body_bonus_parts() {
        let config = CommentConfig::default();
        assert_eq!(body_bonus(&config, "short"), 0);
        assert_eq!(body_bonus(&config, "```let x = 1;```"), 2);
        assert_eq!(body_bonus(&config, &"a".repeat(201)), 1);
        // exactly at the threshold does not count
        assert_eq!(body_bonus(&config, &"a".repeat(200)), 0);
    }

    #[test]
    fn test_body_bonus_counts_chars_not_bytes() {
        let config = CommentConfig::default();
        // 150 two-byte chars: 300 bytes but below the 200 char threshold
        assert_eq!(body_bonus(&config, &"é".repeat(150)), 0);
    }
}

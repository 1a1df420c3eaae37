//! Article and comment scoring
//!
//! Three scores feed the platform's ranking: article hotness, comment
//! quality and comment spaminess. Each is an integer built from local
//! signals plus, for hotness and spaminess, an optional value from the
//! external function service.
//!
//! # Scoring Formulas
//!
//! ```text
//! Hotness    = Σ recency tiers (age < max_age) + reaction points' + external
//!   reaction points' = min(floor(score × factor), score - 1)  if watercooler
//!                    = score                                   otherwise
//!
//! Quality    = Σ reaction points + descendants / 2 + body bonus - spaminess
//!   body bonus = 2 (has ``` code block) + 1 (longer than 200 chars)
//!
//! Spaminess  = 100       if no user
//!            = external  if external scoring is enabled
//!            = 0         otherwise
//! ```
//!
//! # Example
//!
//! A brand-new article with score 99 and an external value of 5:
//! 28 + 31 + 80 + 395 + 330 + 330 = 1194 recency, so 1194 + 99 + 5 = 1298.

mod black_box;
mod bonus;

pub use black_box::{BlackBox, DEFAULT_SPAMINESS, MAX_SPAMINESS};
pub use bonus::{body_bonus, dampen_reaction_points, descendants_bonus, recency_bonus};

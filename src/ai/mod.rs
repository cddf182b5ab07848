//! Computer-controlled robots.
//!
//! ## Key Types
//!
//! - `CardPolicy`: fills registers from a dealt hand
//! - `RandomPolicy`: easy difficulty
//! - `GreedyPolicy`: medium and hard difficulty
//! - `Pose`: simulated position and facing used for scoring

pub mod policy;
pub mod simulate;

pub use policy::{policy_for, CardPolicy, GreedyPolicy, RandomPolicy};
pub use simulate::{score_card, target_for, Pose};

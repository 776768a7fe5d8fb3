//! GATOR Firing-Solution Engine
//!
//! Platform-agnostic scoring for tabletop 'Mech gunnery: Gunnery, Attacker
//! movement, Target movement, Other modifiers and Range combine into a single
//! target number. This crate provides the pure engine and the committed score
//! history without UI or platform-specific dependencies.

pub mod constants;
pub mod gator;
pub mod history;
mod range;
pub mod result;
pub mod state;
pub mod weapons;

// Re-export commonly used types
pub use constants::{AUTO_HIT_MAX_TN, AUTO_MISS_ABOVE_TN, HISTORY_STORAGE_KEY};
pub use gator::{
    classify_range, compute, heat_modifier, minimum_range_modifier, target_movement_modifier,
};
pub use history::{
    HistoryBook, HistoryError, HistoryStorage, MemoryHistoryStorage, ScoreHistory, ScoreRecord,
    decode_history, encode_history,
};
pub use result::{
    AttackerScore, AutoResult, GatorBreakdown, GatorResult, GunneryScore, OtherBreakdown,
    RangeBracket, RangeScore, ResultStatus, TargetScore,
};
pub use state::{
    AttackContext, AttackerState, DamageFlags, GatorInputs, MovementMode, ProneStatus,
    TargetState, WeaponBrackets,
};
pub use weapons::{CatalogError, WeaponCatalog, WeaponProfile};

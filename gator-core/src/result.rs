//! Scored output of one GATOR computation.
use serde::{Deserialize, Serialize};

use crate::constants::{STATUS_GOOD_MAX_TN, STATUS_WARNING_MAX_TN};
use crate::state::MovementMode;

/// Automatic outcome that bypasses the 2D6 roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoResult {
    #[default]
    None,
    AutoHit,
    AutoMiss,
}

impl AutoResult {
    /// Short badge used in history listings.
    #[must_use]
    pub const fn badge(self) -> &'static str {
        match self {
            Self::None => "NORMAL",
            Self::AutoHit => "AUTO HIT",
            Self::AutoMiss => "AUTO MISS",
        }
    }
}

impl std::fmt::Display for AutoResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::AutoHit => write!(f, "auto_hit"),
            Self::AutoMiss => write!(f, "auto_miss"),
        }
    }
}

/// Range band the shot falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeBracket {
    Short,
    Medium,
    Long,
    /// Past the weapon's long range; the attack is not legal.
    Beyond,
}

impl RangeBracket {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
            Self::Beyond => "beyond",
        }
    }

    #[must_use]
    pub const fn status(self) -> ResultStatus {
        match self {
            Self::Short => ResultStatus::Good,
            Self::Medium => ResultStatus::Warning,
            Self::Long | Self::Beyond => ResultStatus::Danger,
        }
    }
}

impl std::fmt::Display for RangeBracket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Traffic-light banding of how likely a shot is to land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Good,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GunneryScore {
    pub gunnery: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackerScore {
    pub mode: MovementMode,
    pub movement: i32,
    pub prone: i32,
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetScore {
    /// Hexes moved as entered.
    pub moved_hexes: u32,
    /// Hexes used for the movement table (zero while prone).
    pub effective_hexes: u32,
    pub jumped: bool,
    pub immobile: bool,
    /// Table modifier, or the immobile penalty.
    pub movement: i32,
    pub jump: i32,
    pub prone: i32,
    /// A head shot discarded the target-movement value.
    pub head_aim_override: bool,
    pub value: i32,
}

/// Every term that feeds the "other" sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OtherBreakdown {
    pub target_in_light_woods: i32,
    pub target_in_heavy_woods: i32,
    pub intervening_light_woods: i32,
    pub intervening_heavy_woods: i32,
    pub woods_los_blocked: bool,
    pub partial_cover: i32,
    pub heat: i32,
    pub damage: i32,
    pub multi_target_forward: i32,
    pub multi_target_side_rear: i32,
    pub indirect_fire: i32,
    pub spotter_movement: i32,
    pub spotting: i32,
    pub aimed_shot_adjustments: i32,
    pub sum: i32,
}

impl OtherBreakdown {
    /// Sum of the individual terms; equal to `sum` for engine output.
    #[must_use]
    pub const fn term_total(&self) -> i32 {
        self.target_in_light_woods
            .saturating_add(self.target_in_heavy_woods)
            .saturating_add(self.intervening_light_woods)
            .saturating_add(self.intervening_heavy_woods)
            .saturating_add(self.partial_cover)
            .saturating_add(self.heat)
            .saturating_add(self.damage)
            .saturating_add(self.multi_target_forward)
            .saturating_add(self.multi_target_side_rear)
            .saturating_add(self.indirect_fire)
            .saturating_add(self.spotter_movement)
            .saturating_add(self.spotting)
            .saturating_add(self.aimed_shot_adjustments)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeScore {
    pub bracket: RangeBracket,
    pub bracket_mod: i32,
    pub min_range_mod: i32,
    pub value: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatorBreakdown {
    #[serde(rename = "G")]
    pub g: GunneryScore,
    #[serde(rename = "A")]
    pub a: AttackerScore,
    #[serde(rename = "T")]
    pub t: TargetScore,
    #[serde(rename = "O")]
    pub o: OtherBreakdown,
    #[serde(rename = "R")]
    pub r: RangeScore,
}

impl GatorBreakdown {
    #[must_use]
    pub const fn total(&self) -> i32 {
        self.g
            .gunnery
            .saturating_add(self.a.value)
            .saturating_add(self.t.value)
            .saturating_add(self.o.sum)
            .saturating_add(self.r.value)
    }
}

/// Immutable outcome of [`crate::compute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatorResult {
    pub weapon: String,
    pub range_hexes: u32,
    pub gator: GatorBreakdown,
    #[serde(rename = "total_TN")]
    pub total_tn: i32,
    pub auto_result: AutoResult,
    /// Every modifier that fired, in evaluation order.
    pub notes: Vec<String>,
}

impl GatorResult {
    #[must_use]
    pub const fn bracket(&self) -> RangeBracket {
        self.gator.r.bracket
    }

    #[must_use]
    pub const fn status(&self) -> ResultStatus {
        match self.auto_result {
            AutoResult::AutoHit => ResultStatus::Good,
            AutoResult::AutoMiss => ResultStatus::Danger,
            AutoResult::None => {
                if self.total_tn <= STATUS_GOOD_MAX_TN {
                    ResultStatus::Good
                } else if self.total_tn <= STATUS_WARNING_MAX_TN {
                    ResultStatus::Warning
                } else {
                    ResultStatus::Danger
                }
            }
        }
    }

    /// What the player has to do with this number.
    #[must_use]
    pub fn verdict_label(&self) -> String {
        match self.auto_result {
            AutoResult::AutoHit => "AUTOMATIC HIT".to_string(),
            AutoResult::AutoMiss => "AUTOMATIC MISS".to_string(),
            AutoResult::None => format!("Roll 2D6 ≥ {}", self.total_tn),
        }
    }
}

//! Input records describing one attack: who fires, at what, and how.
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GUNNERY, DEFAULT_LONG_MAX, DEFAULT_MEDIUM_MAX, DEFAULT_MIN_RANGE, DEFAULT_RANGE_HEXES,
    DEFAULT_SHORT_MAX, DEFAULT_WEAPON_NAME,
};
use crate::result::GatorResult;

/// How a unit moved this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementMode {
    #[default]
    Stationary,
    Walked,
    Ran,
    Jumped,
    Prone,
}

impl MovementMode {
    /// Movement penalty applied to the firing unit (or to its spotter).
    #[must_use]
    pub const fn modifier(self) -> i32 {
        match self {
            Self::Stationary | Self::Prone => 0,
            Self::Walked => 1,
            Self::Ran => 2,
            Self::Jumped => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Stationary => "stationary",
            Self::Walked => "walked",
            Self::Ran => "ran",
            Self::Jumped => "jumped",
            Self::Prone => "prone",
        }
    }
}

impl std::fmt::Display for MovementMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Prone status of the target relative to the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProneStatus {
    #[serde(rename = "adjacent")]
    Adjacent,
    #[serde(rename = "non_adjacent")]
    NonAdjacent,
    #[default]
    #[serde(rename = "no", alias = "not_prone")]
    NotProne,
}

impl ProneStatus {
    #[must_use]
    pub const fn is_prone(self) -> bool {
        !matches!(self, Self::NotProne)
    }
}

/// Critical damage on the firing unit that affects to-hit rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DamageFlags {
    pub sensor_hit: bool,
    pub shoulder_hit_arm_firing: bool,
    pub upper_arm_actuator_hit_arm_firing: u32,
    pub lower_arm_actuator_hit_arm_firing: u32,
}

/// The firing unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackerState {
    /// Pilot gunnery skill, 0 (elite) to 8.
    pub gunnery: u8,
    pub moved_mode: MovementMode,
    pub heat_points: u32,
    pub damage_flags: DamageFlags,
    pub is_spotting_this_turn: bool,
    pub is_making_indirect_fire: bool,
    pub spotter_moved_mode: Option<MovementMode>,
    /// Recorded for completeness; never scored.
    #[serde(alias = "spotter_has_LOS_to_target")]
    pub spotter_has_los_to_target: bool,
    pub spotter_attacked_this_turn: bool,
    pub attacker_is_prone: bool,
}

impl Default for AttackerState {
    fn default() -> Self {
        Self {
            gunnery: DEFAULT_GUNNERY,
            moved_mode: MovementMode::Stationary,
            heat_points: 0,
            damage_flags: DamageFlags::default(),
            is_spotting_this_turn: false,
            is_making_indirect_fire: false,
            spotter_moved_mode: None,
            spotter_has_los_to_target: false,
            spotter_attacked_this_turn: false,
            attacker_is_prone: false,
        }
    }
}

/// The unit being fired upon and the terrain around it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetState {
    /// Hexes moved since the target last reversed direction.
    #[serde(alias = "target_moved_hexes_from_last_reverse")]
    pub moved_hexes: u32,
    #[serde(alias = "target_jumped_this_turn")]
    pub jumped: bool,
    #[serde(alias = "target_is_prone")]
    pub prone: ProneStatus,
    #[serde(alias = "target_is_immobile")]
    pub immobile: bool,
    #[serde(alias = "target_is_in_light_woods")]
    pub in_light_woods: bool,
    #[serde(alias = "target_is_in_heavy_woods")]
    pub in_heavy_woods: bool,
    pub intervening_light_woods_hexes: u32,
    pub intervening_heavy_woods_hexes: u32,
    pub has_partial_cover: bool,
    /// Reserved; not consulted by scoring.
    pub partial_cover_from_water_depth1: bool,
    /// Reserved; not consulted by scoring.
    #[serde(alias = "target_is_submerged")]
    pub submerged: bool,
}

/// Upper bound (inclusive) of each range band, in hexes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponBrackets {
    pub short_max: u32,
    pub medium_max: u32,
    pub long_max: u32,
}

impl Default for WeaponBrackets {
    fn default() -> Self {
        Self {
            short_max: DEFAULT_SHORT_MAX,
            medium_max: DEFAULT_MEDIUM_MAX,
            long_max: DEFAULT_LONG_MAX,
        }
    }
}

/// Weapon and geometry of the shot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttackContext {
    pub weapon_name: String,
    pub range_hexes: u32,
    pub weapon_brackets: WeaponBrackets,
    pub weapon_min_range: u32,
    pub is_secondary_target_in_forward_arc: bool,
    pub is_secondary_target_in_side_or_rear_arc: bool,
    pub is_aimed_shot: bool,
    /// Only meaningful when `is_aimed_shot` is set.
    pub is_head_aim: bool,
    /// Informational only.
    #[serde(alias = "LOS_blocked")]
    pub los_blocked: bool,
}

impl Default for AttackContext {
    fn default() -> Self {
        Self {
            weapon_name: DEFAULT_WEAPON_NAME.to_string(),
            range_hexes: DEFAULT_RANGE_HEXES,
            weapon_brackets: WeaponBrackets::default(),
            weapon_min_range: DEFAULT_MIN_RANGE,
            is_secondary_target_in_forward_arc: false,
            is_secondary_target_in_side_or_rear_arc: false,
            is_aimed_shot: false,
            is_head_aim: false,
            los_blocked: false,
        }
    }
}

/// The complete set of caller-owned inputs for one computation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatorInputs {
    pub attacker: AttackerState,
    pub target: TargetState,
    #[serde(alias = "attack_context")]
    pub context: AttackContext,
}

impl GatorInputs {
    #[must_use]
    pub fn compute(&self) -> GatorResult {
        crate::gator::compute(&self.attacker, &self.target, &self.context)
    }

    /// Restore every input to the form's starting values.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_table_matches_rules() {
        assert_eq!(MovementMode::Stationary.modifier(), 0);
        assert_eq!(MovementMode::Walked.modifier(), 1);
        assert_eq!(MovementMode::Ran.modifier(), 2);
        assert_eq!(MovementMode::Jumped.modifier(), 3);
        assert_eq!(MovementMode::Prone.modifier(), 0);
    }

    #[test]
    fn defaults_match_fresh_form() {
        let inputs = GatorInputs::default();
        assert_eq!(inputs.attacker.gunnery, 4);
        assert_eq!(inputs.context.weapon_name, "PPC");
        assert_eq!(inputs.context.range_hexes, 10);
        assert_eq!(inputs.context.weapon_min_range, 3);
        assert_eq!(inputs.context.weapon_brackets.long_max, 18);
        assert_eq!(inputs.target.prone, ProneStatus::NotProne);
    }

    #[test]
    fn reset_discards_edits() {
        let mut inputs = GatorInputs::default();
        inputs.attacker.heat_points = 20;
        inputs.target.immobile = true;
        inputs.context.range_hexes = 2;
        inputs.reset();
        assert_eq!(inputs, GatorInputs::default());
    }

    #[test]
    fn accepts_legacy_field_names() {
        let json = r#"{
            "attacker": { "gunnery": 3, "moved_mode": "ran", "spotter_has_LOS_to_target": true },
            "target": { "target_moved_hexes_from_last_reverse": 7, "target_is_prone": "non_adjacent" },
            "attack_context": { "range_hexes": 4, "LOS_blocked": true }
        }"#;
        let inputs: GatorInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.attacker.gunnery, 3);
        assert_eq!(inputs.attacker.moved_mode, MovementMode::Ran);
        assert!(inputs.attacker.spotter_has_los_to_target);
        assert_eq!(inputs.target.moved_hexes, 7);
        assert_eq!(inputs.target.prone, ProneStatus::NonAdjacent);
        assert_eq!(inputs.context.range_hexes, 4);
        assert!(inputs.context.los_blocked);
        assert_eq!(inputs.context.weapon_name, "PPC");
    }

    #[test]
    fn partial_brackets_keep_remaining_defaults() {
        let json = r#"{"context": {"weapon_brackets": {"short_max": 3}}}"#;
        let inputs: GatorInputs = serde_json::from_str(json).unwrap();
        assert_eq!(
            inputs.context.weapon_brackets,
            WeaponBrackets {
                short_max: 3,
                medium_max: 12,
                long_max: 18,
            }
        );
        assert_eq!(inputs.context.range_hexes, 10);
        assert_eq!(inputs.compute().bracket(), crate::result::RangeBracket::Medium);
    }

    #[test]
    fn prone_status_serializes_with_short_names() {
        assert_eq!(
            serde_json::to_string(&ProneStatus::NotProne).unwrap(),
            "\"no\""
        );
        let parsed: ProneStatus = serde_json::from_str("\"not_prone\"").unwrap();
        assert_eq!(parsed, ProneStatus::NotProne);
    }
}

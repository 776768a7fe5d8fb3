//! The GATOR scoring engine.
//!
//! [`compute`] is a pure, total function: it never fails, holds no state and
//! yields identical output (notes included) for identical input. Conditions
//! that make an attack questionable, such as woods blocking line of sight or a
//! target past long range, are reported as notes and never alter the number.

use crate::constants::{
    ATTACKER_PRONE_MOD, AUTO_HIT_MAX_TN, AUTO_MISS_ABOVE_TN, HEAD_AIM_MOD, HEAT_BREAKPOINTS,
    HEAVY_WOODS_MOD, INDIRECT_FIRE_MOD, INTERVENING_HEAVY_WOODS_PER_HEX,
    INTERVENING_LIGHT_WOODS_PER_HEX, LIGHT_WOODS_MOD, LONG_RANGE_MOD, MEDIUM_RANGE_MOD,
    PARTIAL_COVER_MOD, SECONDARY_FORWARD_MOD, SECONDARY_SIDE_REAR_MOD, SENSOR_HIT_MOD,
    SHORT_RANGE_MOD, SHOULDER_HIT_MOD, SPOTTER_ATTACKED_MOD, SPOTTING_MOD, TARGET_IMMOBILE_MOD,
    TARGET_JUMPED_MOD, TARGET_PRONE_ADJACENT_MOD, TARGET_PRONE_NON_ADJACENT_MOD, TMM_BEYOND_TABLE,
    TMM_BREAKPOINTS, WOODS_LOS_LIMIT,
};
use crate::result::{
    AttackerScore, AutoResult, GatorBreakdown, GatorResult, GunneryScore, OtherBreakdown,
    RangeBracket, RangeScore, TargetScore,
};
use crate::state::{AttackContext, AttackerState, ProneStatus, TargetState};

/// Convert an entered count into modifier points, saturating on absurd input.
fn points(count: u32, per_unit: i32) -> i32 {
    i32::try_from(count)
        .unwrap_or(i32::MAX)
        .saturating_mul(per_unit)
}

/// Target movement modifier for the hexes a target moved.
#[must_use]
pub fn target_movement_modifier(hexes: u32) -> i32 {
    TMM_BREAKPOINTS
        .iter()
        .find(|(max_hexes, _)| hexes <= *max_hexes)
        .map_or(TMM_BEYOND_TABLE, |(_, modifier)| *modifier)
}

/// To-hit penalty for the attacker's accumulated heat.
#[must_use]
pub fn heat_modifier(heat_points: u32) -> i32 {
    HEAT_BREAKPOINTS
        .iter()
        .find(|(min_heat, _)| heat_points >= *min_heat)
        .map_or(0, |(_, modifier)| *modifier)
}

/// Band a range against the weapon brackets, returning the band and its modifier.
#[must_use]
pub fn classify_range(context: &AttackContext) -> (RangeBracket, i32) {
    let range = context.range_hexes;
    let brackets = &context.weapon_brackets;
    if range <= brackets.short_max {
        (RangeBracket::Short, SHORT_RANGE_MOD)
    } else if range <= brackets.medium_max {
        (RangeBracket::Medium, MEDIUM_RANGE_MOD)
    } else if range <= brackets.long_max {
        (RangeBracket::Long, LONG_RANGE_MOD)
    } else {
        (RangeBracket::Beyond, 0)
    }
}

/// Penalty for firing inside a weapon's minimum range.
#[must_use]
pub fn minimum_range_modifier(context: &AttackContext) -> i32 {
    if context.range_hexes < context.weapon_min_range {
        points(context.weapon_min_range - context.range_hexes, 1).saturating_add(1)
    } else {
        0
    }
}

const fn auto_result(total_tn: i32) -> AutoResult {
    if total_tn <= AUTO_HIT_MAX_TN {
        AutoResult::AutoHit
    } else if total_tn > AUTO_MISS_ABOVE_TN {
        AutoResult::AutoMiss
    } else {
        AutoResult::None
    }
}

fn score_attacker(attacker: &AttackerState, notes: &mut Vec<String>) -> AttackerScore {
    let movement = attacker.moved_mode.modifier();
    let prone = if attacker.attacker_is_prone {
        notes.push(format!("Attacker firing while prone: +{ATTACKER_PRONE_MOD}"));
        ATTACKER_PRONE_MOD
    } else {
        0
    };
    AttackerScore {
        mode: attacker.moved_mode,
        movement,
        prone,
        value: movement + prone,
    }
}

fn score_target(target: &TargetState, notes: &mut Vec<String>) -> TargetScore {
    let mut score = TargetScore {
        moved_hexes: target.moved_hexes,
        effective_hexes: 0,
        jumped: target.jumped,
        immobile: target.immobile,
        movement: 0,
        jump: 0,
        prone: 0,
        head_aim_override: false,
        value: 0,
    };

    if target.immobile {
        notes.push(format!("Target immobile: {TARGET_IMMOBILE_MOD}"));
        score.movement = TARGET_IMMOBILE_MOD;
        score.value = TARGET_IMMOBILE_MOD;
        return score;
    }

    // A prone target contributes no movement of its own.
    score.effective_hexes = if target.prone.is_prone() {
        0
    } else {
        target.moved_hexes
    };
    score.movement = target_movement_modifier(score.effective_hexes);

    if target.jumped {
        notes.push(format!("Target jumped: +{TARGET_JUMPED_MOD}"));
        score.jump = TARGET_JUMPED_MOD;
    }

    score.prone = match target.prone {
        ProneStatus::Adjacent => {
            notes.push(format!(
                "Target prone (adjacent): {TARGET_PRONE_ADJACENT_MOD}"
            ));
            TARGET_PRONE_ADJACENT_MOD
        }
        ProneStatus::NonAdjacent => {
            notes.push(format!(
                "Target prone (non-adjacent): +{TARGET_PRONE_NON_ADJACENT_MOD}"
            ));
            TARGET_PRONE_NON_ADJACENT_MOD
        }
        ProneStatus::NotProne => 0,
    };

    score.value = score.movement + score.jump + score.prone;
    score
}

fn score_terrain(
    attacker: &AttackerState,
    target: &TargetState,
    other: &mut OtherBreakdown,
    notes: &mut Vec<String>,
) {
    if target.in_light_woods {
        other.target_in_light_woods = LIGHT_WOODS_MOD;
        notes.push(format!("Target in light woods: +{LIGHT_WOODS_MOD}"));
    }
    if target.in_heavy_woods {
        other.target_in_heavy_woods = HEAVY_WOODS_MOD;
        notes.push(format!("Target in heavy woods: +{HEAVY_WOODS_MOD}"));
    }

    other.intervening_light_woods = points(
        target.intervening_light_woods_hexes,
        INTERVENING_LIGHT_WOODS_PER_HEX,
    );
    if other.intervening_light_woods > 0 {
        notes.push(format!(
            "Intervening light woods: +{}",
            other.intervening_light_woods
        ));
    }
    other.intervening_heavy_woods = points(
        target.intervening_heavy_woods_hexes,
        INTERVENING_HEAVY_WOODS_PER_HEX,
    );
    if other.intervening_heavy_woods > 0 {
        notes.push(format!(
            "Intervening heavy woods: +{}",
            other.intervening_heavy_woods
        ));
    }

    let woods_points = other
        .intervening_light_woods
        .saturating_add(other.intervening_heavy_woods);
    if woods_points > WOODS_LOS_LIMIT && !attacker.is_making_indirect_fire {
        other.woods_los_blocked = true;
        notes.push(format!("LOS blocked by woods (>{WOODS_LOS_LIMIT} points)"));
    }
}

fn score_damage(attacker: &AttackerState, notes: &mut Vec<String>) -> i32 {
    let flags = &attacker.damage_flags;
    let mut damage = 0_i32;
    if flags.sensor_hit {
        damage += SENSOR_HIT_MOD;
        notes.push(format!("Sensor hit: +{SENSOR_HIT_MOD}"));
    }
    if flags.shoulder_hit_arm_firing {
        damage += SHOULDER_HIT_MOD;
        notes.push(format!("Shoulder hit (firing arm): +{SHOULDER_HIT_MOD}"));
    }
    let upper = points(flags.upper_arm_actuator_hit_arm_firing, 1);
    damage = damage.saturating_add(upper);
    if upper > 0 {
        notes.push(format!("Upper arm actuator hits: +{upper}"));
    }
    let lower = points(flags.lower_arm_actuator_hit_arm_firing, 1);
    damage = damage.saturating_add(lower);
    if lower > 0 {
        notes.push(format!("Lower arm actuator hits: +{lower}"));
    }
    damage
}

fn score_indirect_fire(
    attacker: &AttackerState,
    other: &mut OtherBreakdown,
    notes: &mut Vec<String>,
) {
    if attacker.is_making_indirect_fire {
        other.indirect_fire = INDIRECT_FIRE_MOD;
        notes.push(format!("Indirect fire: +{INDIRECT_FIRE_MOD}"));

        if let Some(spotter_mode) = attacker.spotter_moved_mode {
            other.spotter_movement = spotter_mode.modifier();
            if other.spotter_movement > 0 {
                notes.push(format!("Spotter movement: +{}", other.spotter_movement));
            }
        }

        if attacker.spotter_attacked_this_turn {
            other.indirect_fire += SPOTTER_ATTACKED_MOD;
            notes.push(format!("Spotter also attacked: +{SPOTTER_ATTACKED_MOD}"));
        }
    }

    if attacker.is_spotting_this_turn {
        other.spotting = SPOTTING_MOD;
        notes.push(format!("Spotting this turn: +{SPOTTING_MOD}"));
    }
}

fn score_other(
    attacker: &AttackerState,
    target: &TargetState,
    context: &AttackContext,
    target_score: &mut TargetScore,
    notes: &mut Vec<String>,
) -> OtherBreakdown {
    let mut other = OtherBreakdown::default();

    score_terrain(attacker, target, &mut other, notes);

    if target.has_partial_cover && !context.is_aimed_shot {
        other.partial_cover = PARTIAL_COVER_MOD;
        notes.push(format!(
            "Partial cover: +{PARTIAL_COVER_MOD} (legs cannot be hit)"
        ));
    }

    other.heat = heat_modifier(attacker.heat_points);
    if other.heat > 0 {
        notes.push(format!("Heat penalty: +{}", other.heat));
    }

    other.damage = score_damage(attacker, notes);

    if context.is_secondary_target_in_forward_arc {
        other.multi_target_forward = SECONDARY_FORWARD_MOD;
        notes.push(format!(
            "Secondary target (forward arc): +{SECONDARY_FORWARD_MOD}"
        ));
    }
    if context.is_secondary_target_in_side_or_rear_arc {
        other.multi_target_side_rear = SECONDARY_SIDE_REAR_MOD;
        notes.push(format!(
            "Secondary target (side/rear arc): +{SECONDARY_SIDE_REAR_MOD}"
        ));
    }

    score_indirect_fire(attacker, &mut other, notes);

    if context.is_aimed_shot {
        if context.is_head_aim {
            // Head shots never benefit from the target's movement, immobile or not.
            other.aimed_shot_adjustments = HEAD_AIM_MOD;
            target_score.head_aim_override = true;
            target_score.value = 0;
            notes.push(format!(
                "Aimed shot (head): +{HEAD_AIM_MOD} (no immobile bonus)"
            ));
        } else {
            notes.push("Aimed shot (non-head): keeps immobile bonus".to_string());
        }
    }

    other.sum = other.term_total();
    other
}

fn score_range(context: &AttackContext, notes: &mut Vec<String>) -> RangeScore {
    let (bracket, bracket_mod) = classify_range(context);
    if bracket == RangeBracket::Beyond {
        notes.push("Range beyond maximum - attack invalid".to_string());
    }

    let min_range_mod = minimum_range_modifier(context);
    if min_range_mod > 0 {
        notes.push(format!("Minimum range penalty: +{min_range_mod}"));
    }

    RangeScore {
        bracket,
        bracket_mod,
        min_range_mod,
        value: bracket_mod.saturating_add(min_range_mod),
    }
}

/// Compute the GATOR target number for one attack.
#[must_use]
pub fn compute(
    attacker: &AttackerState,
    target: &TargetState,
    context: &AttackContext,
) -> GatorResult {
    let mut notes = Vec::new();

    let g = GunneryScore {
        gunnery: i32::from(attacker.gunnery),
    };
    let a = score_attacker(attacker, &mut notes);
    let mut t = score_target(target, &mut notes);
    let o = score_other(attacker, target, context, &mut t, &mut notes);
    let r = score_range(context, &mut notes);

    let gator = GatorBreakdown { g, a, t, o, r };
    let total_tn = gator.total();

    let auto_result = auto_result(total_tn);
    match auto_result {
        AutoResult::AutoHit => notes.push(format!("Automatic hit (TN ≤ {AUTO_HIT_MAX_TN})")),
        AutoResult::AutoMiss => {
            notes.push(format!("Automatic miss (TN > {AUTO_MISS_ABOVE_TN})"));
        }
        AutoResult::None => {}
    }

    log::debug!(
        "GATOR | {} @ {} hexes | G{} A{} T{} O{} R{} = {} ({})",
        context.weapon_name,
        context.range_hexes,
        gator.g.gunnery,
        gator.a.value,
        gator.t.value,
        gator.o.sum,
        gator.r.value,
        total_tn,
        auto_result
    );

    GatorResult {
        weapon: context.weapon_name.clone(),
        range_hexes: context.range_hexes,
        gator,
        total_tn,
        auto_result,
        notes,
    }
}

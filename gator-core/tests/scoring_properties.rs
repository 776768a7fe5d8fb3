use gator_core::{
    AttackContext, AttackerState, AutoResult, GatorInputs, GatorResult, MovementMode, ProneStatus,
    RangeBracket, TargetState, compute,
};

fn baseline() -> GatorInputs {
    GatorInputs::default()
}

/// A spread of situations touching every rule at least once.
fn situations() -> Vec<GatorInputs> {
    let mut out = Vec::new();
    let modes = [
        MovementMode::Stationary,
        MovementMode::Walked,
        MovementMode::Ran,
        MovementMode::Jumped,
        MovementMode::Prone,
    ];
    let prone = [
        ProneStatus::NotProne,
        ProneStatus::Adjacent,
        ProneStatus::NonAdjacent,
    ];
    for (i, mode) in modes.into_iter().enumerate() {
        for (j, prone_status) in prone.into_iter().enumerate() {
            for range in [0_u32, 2, 5, 9, 14, 30] {
                let idx = u32::try_from(i * 3 + j).unwrap();
                let mut inputs = baseline();
                inputs.attacker = AttackerState {
                    gunnery: u8::try_from(idx % 9).unwrap(),
                    moved_mode: mode,
                    heat_points: idx * 2,
                    attacker_is_prone: idx % 2 == 0,
                    is_making_indirect_fire: idx % 3 == 0,
                    spotter_moved_mode: Some(modes[(i + j) % 4]),
                    spotter_attacked_this_turn: idx % 4 == 0,
                    is_spotting_this_turn: idx % 5 == 0,
                    ..AttackerState::default()
                };
                inputs.attacker.damage_flags.sensor_hit = idx % 6 == 0;
                inputs.attacker.damage_flags.lower_arm_actuator_hit_arm_firing = idx % 3;
                inputs.target = TargetState {
                    moved_hexes: idx * 2,
                    jumped: j == 1,
                    prone: prone_status,
                    immobile: idx % 7 == 0,
                    in_light_woods: idx % 2 == 1,
                    intervening_light_woods_hexes: idx % 3,
                    intervening_heavy_woods_hexes: idx % 2,
                    has_partial_cover: idx % 4 == 1,
                    ..TargetState::default()
                };
                inputs.context = AttackContext {
                    range_hexes: range,
                    is_aimed_shot: idx % 5 == 2,
                    is_head_aim: idx % 10 == 2,
                    is_secondary_target_in_forward_arc: idx % 8 == 3,
                    ..AttackContext::default()
                };
                out.push(inputs);
            }
        }
    }
    out
}

fn assert_sums(result: &GatorResult) {
    let gator = &result.gator;
    assert_eq!(gator.o.sum, gator.o.term_total());
    assert_eq!(gator.r.value, gator.r.bracket_mod + gator.r.min_range_mod);
    assert_eq!(
        result.total_tn,
        gator.g.gunnery + gator.a.value + gator.t.value + gator.o.sum + gator.r.value
    );
}

#[test]
fn total_is_sum_of_reported_sub_scores() {
    for inputs in situations() {
        assert_sums(&inputs.compute());
    }
}

#[test]
fn identical_inputs_give_identical_results() {
    for inputs in situations() {
        let first = compute(&inputs.attacker, &inputs.target, &inputs.context);
        let second = compute(&inputs.attacker, &inputs.target, &inputs.context.clone());
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn heat_raises_other_by_one_at_each_breakpoint() {
    let mut inputs = baseline();
    let mut previous = inputs.compute().gator.o.sum;
    for heat in 1..=30_u32 {
        inputs.attacker.heat_points = heat;
        let current = inputs.compute().gator.o.sum;
        let expected_step = i32::from(matches!(heat, 8 | 13 | 17 | 24));
        assert_eq!(current - previous, expected_step, "heat {heat}");
        previous = current;
    }
}

#[test]
fn immobile_target_is_minus_four_unless_head_aimed() {
    for hexes in [0, 5, 30] {
        for jumped in [false, true] {
            let mut inputs = baseline();
            inputs.target.immobile = true;
            inputs.target.moved_hexes = hexes;
            inputs.target.jumped = jumped;
            assert_eq!(inputs.compute().gator.t.value, -4);

            inputs.context.is_aimed_shot = true;
            assert_eq!(inputs.compute().gator.t.value, -4);

            inputs.context.is_head_aim = true;
            assert_eq!(inputs.compute().gator.t.value, 0);
        }
    }
}

#[test]
fn verdict_boundaries() {
    // TN 2: elite gunner at minimum range.
    let mut inputs = baseline();
    inputs.attacker.gunnery = 2;
    inputs.context.range_hexes = 3;
    let result = inputs.compute();
    assert_eq!(result.total_tn, 2);
    assert_eq!(result.auto_result, AutoResult::AutoHit);

    // TN 3.
    inputs.attacker.gunnery = 3;
    let result = inputs.compute();
    assert_eq!(result.total_tn, 3);
    assert_eq!(result.auto_result, AutoResult::None);

    // TN 12: long range and maximum heat.
    let mut inputs = baseline();
    inputs.context.range_hexes = 13;
    inputs.attacker.heat_points = 24;
    let result = inputs.compute();
    assert_eq!(result.total_tn, 12);
    assert_eq!(result.auto_result, AutoResult::None);

    // TN 13.
    inputs.attacker.is_spotting_this_turn = true;
    let result = inputs.compute();
    assert_eq!(result.total_tn, 13);
    assert_eq!(result.auto_result, AutoResult::AutoMiss);
    assert_eq!(
        result.notes.last().map(String::as_str),
        Some("Automatic miss (TN > 12)")
    );
}

#[test]
fn beyond_long_range_is_flagged_not_fatal() {
    let mut inputs = baseline();
    inputs.context.range_hexes = 19;
    let result = inputs.compute();
    assert_eq!(result.gator.r.bracket, RangeBracket::Beyond);
    assert_eq!(result.gator.r.bracket_mod, 0);
    assert!(
        result
            .notes
            .contains(&"Range beyond maximum - attack invalid".to_string())
    );
    assert_sums(&result);
}

#[test]
fn medium_range_ppc_scenario() {
    let result = baseline().compute();
    assert_eq!(result.weapon, "PPC");
    assert_eq!(result.range_hexes, 10);
    assert_eq!(result.gator.g.gunnery, 4);
    assert_eq!(result.gator.a.value, 0);
    assert_eq!(result.gator.t.value, 0);
    assert_eq!(result.gator.o.sum, 0);
    assert_eq!(result.gator.r.value, 2);
    assert_eq!(result.gator.r.bracket, RangeBracket::Medium);
    assert_eq!(result.total_tn, 6);
    assert_eq!(result.auto_result, AutoResult::None);
}

#[test]
fn head_shot_on_immobile_target_scenario() {
    let mut inputs = baseline();
    inputs.target.immobile = true;
    inputs.context.is_aimed_shot = true;
    inputs.context.is_head_aim = true;
    let result = inputs.compute();
    assert_eq!(result.gator.t.value, 0);
    assert_eq!(result.gator.o.aimed_shot_adjustments, 3);
    assert_eq!(result.total_tn, 9);
    assert_eq!(
        result.notes,
        vec![
            "Target immobile: -4",
            "Aimed shot (head): +3 (no immobile bonus)"
        ]
    );
}

#[test]
fn inside_minimum_range_scenario() {
    let mut inputs = baseline();
    inputs.context.range_hexes = 2;
    let result = inputs.compute();
    assert_eq!(result.gator.r.min_range_mod, 2);
    assert_eq!(result.gator.r.value, 2);
    assert_eq!(result.total_tn, 6);
}

#[test]
fn reserved_target_fields_do_not_score() {
    let mut inputs = baseline();
    let plain = inputs.compute();
    inputs.target.submerged = true;
    inputs.target.partial_cover_from_water_depth1 = true;
    inputs.attacker.spotter_has_los_to_target = true;
    inputs.context.los_blocked = true;
    assert_eq!(inputs.compute(), plain);
}

#[test]
fn note_order_follows_evaluation_order() {
    let mut inputs = baseline();
    inputs.attacker.attacker_is_prone = true;
    inputs.target.jumped = true;
    inputs.target.in_light_woods = true;
    inputs.attacker.heat_points = 9;
    inputs.context.range_hexes = 1;
    let result = inputs.compute();
    assert_eq!(
        result.notes,
        vec![
            "Attacker firing while prone: +2",
            "Target jumped: +1",
            "Target in light woods: +1",
            "Heat penalty: +1",
            "Minimum range penalty: +3",
        ]
    );
    assert_eq!(result.total_tn, 4 + 2 + 1 + 2 + 3);
}

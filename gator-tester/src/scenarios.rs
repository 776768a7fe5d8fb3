use anyhow::{Result, ensure};

use gator_core::{
    AutoResult, GatorInputs, GatorResult, MovementMode, ProneStatus, RangeBracket, weapons,
};

type Expectation = fn(&GatorResult) -> Result<()>;

/// A named firing situation and what the engine must say about it.
#[derive(Clone)]
pub struct ScoringScenario {
    pub key: &'static str,
    pub name: &'static str,
    pub inputs: GatorInputs,
    expectation: Expectation,
}

impl std::fmt::Debug for ScoringScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringScenario")
            .field("key", &self.key)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ScoringScenario {
    fn new(
        key: &'static str,
        name: &'static str,
        build: impl FnOnce(&mut GatorInputs),
        expectation: Expectation,
    ) -> Self {
        let mut inputs = GatorInputs::default();
        build(&mut inputs);
        Self {
            key,
            name,
            inputs,
            expectation,
        }
    }

    /// Check a computed result against this scenario's expectation.
    ///
    /// # Errors
    ///
    /// Returns a description of the first expectation that does not hold.
    pub fn check(&self, result: &GatorResult) -> Result<()> {
        (self.expectation)(result)
    }
}

pub fn catalog() -> Vec<ScoringScenario> {
    vec![
        ScoringScenario::new(
            "smoke",
            "Medium-range PPC baseline",
            |_| {},
            baseline_expectation,
        ),
        ScoringScenario::new(
            "head-shot-immobile",
            "Head shot on an immobile target",
            |inputs| {
                inputs.target.immobile = true;
                inputs.context.is_aimed_shot = true;
                inputs.context.is_head_aim = true;
            },
            head_shot_expectation,
        ),
        ScoringScenario::new(
            "minimum-range",
            "Firing inside minimum range",
            |inputs| inputs.context.range_hexes = 2,
            minimum_range_expectation,
        ),
        ScoringScenario::new(
            "beyond-range",
            "Target past long range",
            |inputs| inputs.context.range_hexes = 25,
            beyond_range_expectation,
        ),
        ScoringScenario::new(
            "woods-los",
            "Heavy woods along the line of fire",
            |inputs| {
                inputs.target.in_light_woods = true;
                inputs.target.intervening_heavy_woods_hexes = 2;
            },
            woods_expectation,
        ),
        ScoringScenario::new(
            "indirect-fire",
            "LRM indirect fire with a running spotter",
            |inputs| {
                if let Some(lrm) = weapons::catalog().find("LRM-20") {
                    inputs.context = inputs.context.clone().with_weapon(lrm);
                }
                inputs.context.range_hexes = 15;
                inputs.attacker.is_making_indirect_fire = true;
                inputs.attacker.spotter_moved_mode = Some(MovementMode::Ran);
                inputs.attacker.spotter_attacked_this_turn = true;
                inputs.target.intervening_heavy_woods_hexes = 3;
            },
            indirect_fire_expectation,
        ),
        ScoringScenario::new(
            "auto-hit",
            "Elite gunner against an immobile target",
            |inputs| {
                inputs.attacker.gunnery = 1;
                inputs.target.immobile = true;
                inputs.context.range_hexes = 4;
            },
            auto_hit_expectation,
        ),
        ScoringScenario::new(
            "auto-miss",
            "Overheated, damaged jumper at long range",
            |inputs| {
                inputs.attacker.moved_mode = MovementMode::Jumped;
                inputs.attacker.heat_points = 17;
                inputs.attacker.damage_flags.sensor_hit = true;
                inputs.context.range_hexes = 16;
            },
            auto_miss_expectation,
        ),
        ScoringScenario::new(
            "prone-target",
            "Running target that fell prone next to the attacker",
            |inputs| {
                inputs.target.moved_hexes = 8;
                inputs.target.prone = ProneStatus::Adjacent;
                inputs.context.range_hexes = 1;
                inputs.context.weapon_min_range = 0;
            },
            prone_target_expectation,
        ),
    ]
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    catalog()
        .into_iter()
        .map(|scenario| (scenario.key, scenario.name))
        .collect()
}

pub fn get_scenario(key: &str) -> Option<ScoringScenario> {
    catalog().into_iter().find(|scenario| scenario.key == key)
}

fn baseline_expectation(result: &GatorResult) -> Result<()> {
    ensure!(result.total_tn == 6, "expected TN 6, got {}", result.total_tn);
    ensure!(
        result.bracket() == RangeBracket::Medium,
        "expected medium bracket, got {}",
        result.bracket()
    );
    ensure!(result.auto_result == AutoResult::None, "no automatic result");
    ensure!(result.notes.is_empty(), "baseline should emit no notes");
    Ok(())
}

fn head_shot_expectation(result: &GatorResult) -> Result<()> {
    ensure!(result.gator.t.value == 0, "head shot must zero T");
    ensure!(
        result.gator.o.aimed_shot_adjustments == 3,
        "head shot adds +3"
    );
    ensure!(result.total_tn == 9, "expected TN 9, got {}", result.total_tn);
    Ok(())
}

fn minimum_range_expectation(result: &GatorResult) -> Result<()> {
    ensure!(
        result.gator.r.min_range_mod == 2,
        "expected minimum-range penalty 2, got {}",
        result.gator.r.min_range_mod
    );
    ensure!(result.bracket() == RangeBracket::Short, "inside minimum is short range");
    Ok(())
}

fn beyond_range_expectation(result: &GatorResult) -> Result<()> {
    ensure!(result.bracket() == RangeBracket::Beyond, "expected beyond bracket");
    ensure!(result.gator.r.bracket_mod == 0, "beyond adds no bracket modifier");
    ensure!(
        result
            .notes
            .iter()
            .any(|note| note == "Range beyond maximum - attack invalid"),
        "beyond range must be flagged"
    );
    Ok(())
}

fn woods_expectation(result: &GatorResult) -> Result<()> {
    ensure!(result.gator.o.woods_los_blocked, "4 woods points block LOS");
    ensure!(result.gator.o.sum == 5, "expected O 5, got {}", result.gator.o.sum);
    ensure!(
        result.total_tn == 11,
        "LOS advisory must not change the TN (got {})",
        result.total_tn
    );
    Ok(())
}

fn indirect_fire_expectation(result: &GatorResult) -> Result<()> {
    ensure!(result.weapon == "LRM-20", "catalog weapon applied");
    ensure!(!result.gator.o.woods_los_blocked, "indirect fire ignores woods LOS");
    ensure!(result.gator.o.indirect_fire == 2, "indirect + spotter attacked");
    ensure!(result.gator.o.spotter_movement == 2, "running spotter adds 2");
    ensure!(
        result.bracket() == RangeBracket::Long,
        "15 hexes is long range for an LRM"
    );
    ensure!(result.total_tn == 18, "expected TN 18, got {}", result.total_tn);
    ensure!(result.auto_result == AutoResult::AutoMiss, "TN 18 is an auto miss");
    Ok(())
}

fn auto_hit_expectation(result: &GatorResult) -> Result<()> {
    ensure!(result.total_tn == -3, "expected TN -3, got {}", result.total_tn);
    ensure!(result.auto_result == AutoResult::AutoHit, "expected auto hit");
    Ok(())
}

fn auto_miss_expectation(result: &GatorResult) -> Result<()> {
    ensure!(result.total_tn == 16, "expected TN 16, got {}", result.total_tn);
    ensure!(result.auto_result == AutoResult::AutoMiss, "expected auto miss");
    Ok(())
}

fn prone_target_expectation(result: &GatorResult) -> Result<()> {
    ensure!(result.gator.t.effective_hexes == 0, "prone target has no movement");
    ensure!(result.gator.t.value == -2, "adjacent prone is -2");
    ensure!(result.total_tn == 2, "expected TN 2, got {}", result.total_tn);
    ensure!(result.auto_result == AutoResult::AutoHit, "TN 2 is an auto hit");
    Ok(())
}

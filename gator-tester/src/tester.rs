use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use gator_core::{AUTO_HIT_MAX_TN, AUTO_MISS_ABOVE_TN, AutoResult, GatorResult, RangeBracket};

use crate::scenarios::ScoringScenario;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_key: String,
    pub scenario_name: String,
    pub passed: bool,
    pub total_tn: i32,
    pub auto_result: AutoResult,
    pub bracket: RangeBracket,
    pub notes: Vec<String>,
    pub failures: Vec<String>,
    #[serde(with = "duration_micros")]
    pub duration: Duration,
}

pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_scenarios(&self, scenarios: &[ScoringScenario]) -> Vec<ScenarioResult> {
        scenarios
            .iter()
            .map(|scenario| self.run_scenario(scenario))
            .collect()
    }

    pub fn run_scenario(&self, scenario: &ScoringScenario) -> ScenarioResult {
        if self.verbose {
            println!("🧪 Testing scenario: {}", scenario.name.bright_white());
        }

        let start = Instant::now();
        let result = scenario.inputs.compute();
        let duration = start.elapsed();

        let mut failures = invariant_failures(scenario, &result);
        if let Err(err) = scenario.check(&result) {
            failures.push(format!("{err:#}"));
        }
        if !failures.is_empty() {
            log::warn!("Scenario {} failed: {}", scenario.key, failures.join("; "));
        }

        ScenarioResult {
            scenario_key: scenario.key.to_string(),
            scenario_name: scenario.name.to_string(),
            passed: failures.is_empty(),
            total_tn: result.total_tn,
            auto_result: result.auto_result,
            bracket: result.bracket(),
            notes: result.notes,
            failures,
            duration,
        }
    }
}

/// Properties every result must satisfy, whatever the scenario expects.
fn invariant_failures(scenario: &ScoringScenario, result: &GatorResult) -> Vec<String> {
    let mut failures = Vec::new();
    let gator = &result.gator;

    if gator.total() != result.total_tn {
        failures.push(format!(
            "TN {} is not G+A+T+O+R ({})",
            result.total_tn,
            gator.total()
        ));
    }
    if gator.o.term_total() != gator.o.sum {
        failures.push(format!(
            "O sum {} does not match its terms ({})",
            gator.o.sum,
            gator.o.term_total()
        ));
    }
    if gator.r.bracket_mod.saturating_add(gator.r.min_range_mod) != gator.r.value {
        failures.push("R value does not match bracket + minimum range".to_string());
    }

    let expected_auto = if result.total_tn <= AUTO_HIT_MAX_TN {
        AutoResult::AutoHit
    } else if result.total_tn > AUTO_MISS_ABOVE_TN {
        AutoResult::AutoMiss
    } else {
        AutoResult::None
    };
    if result.auto_result != expected_auto {
        failures.push(format!(
            "TN {} reported {} instead of {}",
            result.total_tn, result.auto_result, expected_auto
        ));
    }

    if scenario.inputs.compute() != *result {
        failures.push("recomputation with identical inputs differed".to_string());
    }

    failures
}

mod duration_micros {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_micros()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u64::deserialize(deserializer)?;
        Ok(Duration::from_micros(micros))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::{catalog, get_scenario};

    #[test]
    fn catalog_passes_with_invariants() {
        let tester = LogicTester::new(false);
        let results = tester.run_scenarios(&catalog());
        assert_eq!(results.len(), catalog().len());
        for result in &results {
            assert!(result.passed, "{}: {:?}", result.scenario_key, result.failures);
        }
    }

    #[test]
    fn broken_result_trips_invariants() {
        let scenario = get_scenario("smoke").unwrap();
        let mut result = scenario.inputs.compute();
        result.total_tn = 1;
        let failures = invariant_failures(&scenario, &result);
        assert!(failures.iter().any(|f| f.contains("not G+A+T+O+R")));
        assert!(failures.iter().any(|f| f.contains("instead of")));
        assert!(failures.iter().any(|f| f.contains("recomputation")));
    }

    #[test]
    fn verdict_check_follows_thresholds() {
        let scenario = get_scenario("smoke").unwrap();
        let mut result = scenario.inputs.compute();
        result.total_tn = AUTO_HIT_MAX_TN;
        result.auto_result = AutoResult::AutoHit;
        let failures = invariant_failures(&scenario, &result);
        assert!(!failures.iter().any(|f| f.contains("instead of")), "{failures:?}");

        result.total_tn = AUTO_MISS_ABOVE_TN;
        result.auto_result = AutoResult::AutoMiss;
        let failures = invariant_failures(&scenario, &result);
        assert!(failures.iter().any(|f| f.contains("instead of none")), "{failures:?}");
    }

    #[test]
    fn range_parts_use_saturating_sum() {
        let scenario = get_scenario("smoke").unwrap();
        let mut result = scenario.inputs.compute();
        result.gator.r.bracket_mod = i32::MAX;
        result.gator.r.min_range_mod = 1;
        result.gator.r.value = i32::MAX;
        let failures = invariant_failures(&scenario, &result);
        assert!(!failures.iter().any(|f| f.starts_with("R value")), "{failures:?}");
    }

    #[test]
    fn result_serializes_duration_as_micros() {
        let tester = LogicTester::new(false);
        let mut result = tester.run_scenario(&get_scenario("smoke").unwrap());
        result.duration = Duration::from_micros(42);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["duration"], 42);
        assert_eq!(json["bracket"], "medium");
    }
}

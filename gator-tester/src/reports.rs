use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use gator_core::GatorResult;

use crate::tester::ScenarioResult;

fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    #[allow(clippy::cast_precision_loss)]
    let rate = (passed as f64 / results.len() as f64) * 100.0;
    rate
}

pub fn generate_console_report(
    out: &mut dyn Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Scoring Scenario Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "============================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();

    writeln!(out, "Total scenarios: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(out, "{} {}", status, result.scenario_name.bold())?;
        writeln!(
            out,
            "   TN {} ({}), {} range",
            result.total_tn,
            result.auto_result.badge(),
            result.bracket
        )?;
        for note in &result.notes {
            writeln!(out, "   ⚠️  {note}")?;
        }
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# GATOR Scoring Scenario Results\n")?;
    writeln!(
        out,
        "_Generated {}_\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    )?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "| Scenario | TN | Result | Range | Status |")?;
    writeln!(out, "|---|---|---|---|---|")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "| {} | {} | {} | {} | {} |",
            result.scenario_name,
            result.total_tn,
            result.auto_result.badge(),
            result.bracket,
            status
        )?;
    }

    let failed: Vec<_> = results.iter().filter(|r| !r.passed).collect();
    if !failed.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for result in failed {
            writeln!(out, "### {}\n", result.scenario_name)?;
            for failure in &result.failures {
                writeln!(out, "- {failure}")?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Full breakdown for a single ad-hoc evaluation.
pub fn write_breakdown(out: &mut dyn Write, result: &GatorResult) -> Result<()> {
    let gator = &result.gator;
    writeln!(
        out,
        "{} at {} hexes ({} range)",
        result.weapon.bold(),
        result.range_hexes,
        result.bracket()
    )?;
    writeln!(out, "  G  gunnery            {:>3}", gator.g.gunnery)?;
    writeln!(
        out,
        "  A  attacker ({:<7})  {:>3}",
        gator.a.mode.label(),
        gator.a.value
    )?;
    writeln!(
        out,
        "  T  target ({} hexes)   {:>3}",
        gator.t.moved_hexes, gator.t.value
    )?;
    writeln!(out, "  O  other              {:>3}", gator.o.sum)?;
    writeln!(out, "  R  range              {:>3}", gator.r.value)?;

    let verdict = result.verdict_label();
    let verdict = match result.status() {
        gator_core::ResultStatus::Good => verdict.green(),
        gator_core::ResultStatus::Warning => verdict.yellow(),
        gator_core::ResultStatus::Danger => verdict.red(),
    };
    writeln!(out, "  {} [{}]", verdict.bold(), result.auto_result.badge())?;
    for note in &result.notes {
        writeln!(out, "  ⚠️  {note}")?;
    }
    Ok(())
}

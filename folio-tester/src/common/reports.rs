use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;

use super::ScenarioResult;

#[allow(clippy::cast_precision_loss)]
fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    (passed as f64 / results.len() as f64) * 100.0
}

pub fn generate_console_report(
    out: &mut impl Write,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Test Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "======================".cyan())?;

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(out, "Total scenarios: {total_tests}")?;
    writeln!(out, "Passed: {}", passed_tests.to_string().green())?;
    writeln!(out, "Failed: {}", failed_tests.to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };

        writeln!(out, "{status} {}", result.label().bold())?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let fastest = results.iter().min_by_key(|r| r.average_duration);
    let slowest = results.iter().max_by_key(|r| r.average_duration);
    if let (Some(fastest), Some(slowest)) = (fastest, slowest) {
        writeln!(out, "{}", "⚡ Performance Summary".bright_yellow().bold())?;
        writeln!(out, "{}", "=====================".yellow())?;
        writeln!(
            out,
            "Fastest: {} ({:?})",
            fastest.label().green(),
            fastest.average_duration
        )?;
        writeln!(
            out,
            "Slowest: {} ({:?})",
            slowest.label().yellow(),
            slowest.average_duration
        )?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut impl Write, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut impl Write, results: &[ScenarioResult]) -> Result<()> {
    writeln!(out, "# Folio Test Results\n")?;

    if results.is_empty() {
        writeln!(out, "_No scenarios executed._")?;
        return Ok(());
    }

    let total_tests = results.len();
    let passed_tests = results.iter().filter(|r| r.passed).count();
    let failed_tests = total_tests - passed_tests;

    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total scenarios**: {total_tests}")?;
    writeln!(out, "- **Passed**: {passed_tests}")?;
    writeln!(out, "- **Failed**: {failed_tests}")?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "## Detailed Results\n")?;

    for result in results {
        let status = if result.passed { "✅" } else { "❌" };

        writeln!(out, "### {status} {}\n", result.label())?;
        writeln!(
            out,
            "- **Iterations**: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "- **Average time**: {:?}", result.average_duration)?;

        if !result.failures.is_empty() {
            writeln!(out, "- **Failures**:")?;
            for failure in &result.failures {
                writeln!(out, "  - {failure}")?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> Vec<ScenarioResult> {
        vec![
            ScenarioResult::single("nav-toggle", "logic", Duration::from_millis(2), &Ok(())),
            ScenarioResult::single(
                "lightbox-cycle",
                "firefox",
                Duration::from_millis(40),
                &Err(anyhow::anyhow!("index stuck at 2")),
            ),
        ]
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).expect("report");
        String::from_utf8(buf).expect("utf8")
    }

    #[test]
    fn markdown_lists_every_result_with_failures() {
        let text = render(|out| generate_markdown_report(out, &results()));
        assert!(text.contains("- **Total scenarios**: 2"));
        assert!(text.contains("- **Success rate**: 50.0%"));
        assert!(text.contains("### ❌ lightbox-cycle [firefox]"));
        assert!(text.contains("  - index stuck at 2"));
    }

    #[test]
    fn markdown_handles_empty_runs() {
        let text = render(|out| generate_markdown_report(out, &[]));
        assert!(text.contains("_No scenarios executed._"));
    }

    #[test]
    fn json_report_is_an_array() {
        let text = render(|out| generate_json_report(out, &results()));
        let parsed: Vec<ScenarioResult> = serde_json::from_str(&text).expect("parse");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].target, "firefox");
    }

    #[test]
    fn console_report_names_fastest_and_slowest() {
        colored::control::set_override(false);
        let text = render(|out| generate_console_report(out, &results(), Duration::from_secs(1)));
        assert!(text.contains("Total scenarios: 2"));
        assert!(text.contains("Fastest: nav-toggle [logic]"));
        assert!(text.contains("Slowest: lightbox-cycle [firefox]"));
    }
}

use colored::Colorize;
use std::time::{Duration, Instant};

use crate::common::ScenarioResult;
use crate::common::scenario::CombinedScenario;

/// Runs the model half of each scenario repeatedly, without a browser.
pub struct LogicTester {
    verbose: bool,
}

impl LogicTester {
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &(dyn CombinedScenario + Send + Sync),
        iterations: usize,
    ) -> ScenarioResult {
        if self.verbose {
            println!("🧪 Testing scenario: {}", scenario.name().bright_white());
        }

        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let start_time = Instant::now();
            match scenario.run_logic() {
                Ok(()) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    if self.verbose {
                        println!("  ✅ Iteration {}/{iterations} passed ({duration:?})", i + 1);
                    }
                }
                Err(err) => {
                    if self.verbose {
                        println!("  ❌ Iteration {}/{iterations} failed: {err:#}", i + 1);
                    }
                    failures.push(format!("Iteration {}: {err:#}", i + 1));
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name().to_string(),
            target: "logic".to_string(),
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
            performance_data,
        }
    }
}

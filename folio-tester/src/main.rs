mod browser;
mod common;
mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use browser::{BrowserConfig, BrowserKind, TestBridge, new_session};
use common::scenario::{ScenarioCtx, expand_scenarios, get_scenario, list_scenarios};
use common::{ArtifactSet, ScenarioResult, artifacts_dir, reports};
use logic::LogicTester;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestMode {
    /// Page-behaviour models only (fast, no browser)
    Logic,
    /// Browser automation against a served site (slow, captures screenshots)
    Browser,
    /// Run both logic and browser tests
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run browsers in headless mode
    Headless,
    /// Run browsers with visible windows
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Parser)]
#[command(name = "folio-tester", version)]
#[command(about = "Automated QA for the Folio site - model checks and browser automation")]
struct Args {
    /// Test mode: logic (fast), browser (visual), or both
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, `all` for every scenario)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Number of iterations per scenario (logic mode only)
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    // Browser-specific options
    /// Browsers to run (chrome,edge,firefox,safari) - browser mode only
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// Base URL of the site (should include ?test=1 to expose the bridge)
    #[arg(long, default_value = "http://localhost:8080/?test=1")]
    base_url: String,

    /// Artifacts directory for screenshots and logs
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Connect to a Selenium Grid/Appium hub instead of local drivers
    #[arg(long)]
    hub: Option<String>,

    /// Run headless where supported
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,

    /// Ask Chromium browsers to report `prefers-reduced-motion: reduce`
    #[arg(long)]
    reduced_motion: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = expand_scenarios(split_csv(&args.scenarios));

    let mut all_results = run_logic_scenarios(&args, &scenarios);
    all_results.extend(run_browser_scenarios(&args, &scenarios).await);

    write_reports(&args, &all_results, start_time)?;

    if all_results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target, "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target, "  {key:20} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🖼️  Folio Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: args.headless.is_headless(),
        implicit_wait_secs: 3,
        remote_hub: args.hub.clone(),
        reduced_motion: args.reduced_motion,
    }
}

fn run_logic_scenarios(args: &Args, scenarios: &[String]) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    if !matches!(args.mode, TestMode::Logic | TestMode::Both) {
        return results;
    }

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let logic_tester = LogicTester::new(args.verbose);

    for scenario_name in scenarios {
        if let Some(scenario) = get_scenario(scenario_name) {
            results.push(logic_tester.run_scenario(scenario.as_ref(), args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }

    results
}

async fn run_browser_scenarios(args: &Args, scenarios: &[String]) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    if !matches!(args.mode, TestMode::Browser | TestMode::Both) {
        return results;
    }

    println!("{}", "🌐 Running Browser Tests".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    let cfg = build_browser_config(args);

    for browser_name in split_csv(&args.browsers) {
        let Some(kind) = BrowserKind::parse(&browser_name) else {
            eprintln!("⚠️  Unknown browser: {}", browser_name.yellow());
            continue;
        };

        let driver = match new_session(kind, &cfg).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ Could not start {}: {e}", kind.label());
                continue;
            }
        };

        results.extend(run_browser_scenarios_for_driver(args, scenarios, kind, &driver).await);
        let _ = driver.quit().await;
    }

    results
}

async fn run_browser_scenarios_for_driver(
    args: &Args,
    scenarios: &[String],
    kind: BrowserKind,
    driver: &thirtyfour::WebDriver,
) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    let label = kind.label();

    for scenario_name in scenarios {
        let Some(scenario) = get_scenario(scenario_name) else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
            continue;
        };
        let ctx = ScenarioCtx {
            base_url: args.base_url.clone(),
            bridge: TestBridge::new(driver),
            verbose: args.verbose,
        };

        let scenario_start = Instant::now();
        let outcome = scenario.run_browser(driver, &ctx).await;
        let duration = scenario_start.elapsed();

        match &outcome {
            Ok(()) => {
                println!("✅ [{}] {} - {:?}", label.green(), scenario.name(), duration);
            }
            Err(e) => {
                eprintln!(
                    "❌ [{}] {} - {:?}: {:#}",
                    label.red(),
                    scenario.name(),
                    duration,
                    e
                );
                let dir = artifacts_dir(&args.artifacts_dir, label, scenario.name());
                let artifacts = ArtifactSet::collect(driver, &ctx.bridge, e).await;
                match artifacts.write_to(&dir) {
                    Ok(files) => log::info!("{} artifacts in {}", files.len(), dir.display()),
                    Err(capture_err) => log::warn!("artifacts not captured: {capture_err:#}"),
                }
            }
        }
        results.push(ScenarioResult::single(
            scenario.name(),
            label,
            duration,
            &outcome,
        ));
    }

    results
}

/// Comma-separated flag values, trimmed, blanks dropped.
fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, results)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, results)?,
        _ => {
            if results.is_empty() {
                writeln!(output_target, "No scenarios executed.")?;
            } else {
                reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(output_target)?;
            writeln!(output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

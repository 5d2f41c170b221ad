use anyhow::{Context, Result};
use folio_core::{MotionPreference, RevealPhase, RevealSet, RevealTiming};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx};

/// Scroll positions visited, as fractions of the page height.
const SCROLL_STOPS: [f64; 5] = [0.2, 0.4, 0.6, 0.8, 1.0];
const SCROLL_PAUSE: Duration = Duration::from_millis(250);
const REVEAL_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RevealScenario;

#[async_trait::async_trait]
impl BrowserScenario for RevealScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;

        let initial = ctx.bridge.state().await?;
        anyhow::ensure!(initial.reveal_total > 0, "no reveal elements on the page");

        if initial.reduced_motion {
            anyhow::ensure!(
                initial.all_revealed(),
                "reduced motion should reveal everything at mount, got {}/{}",
                initial.revealed,
                initial.reveal_total
            );
            return Ok(());
        }

        for stop in SCROLL_STOPS {
            driver
                .execute(
                    "window.scrollTo(0, document.body.scrollHeight * arguments[0]);",
                    vec![stop.into()],
                )
                .await?;
            tokio::time::sleep(SCROLL_PAUSE).await;
        }

        let state = ctx
            .bridge
            .wait_for_state(REVEAL_TIMEOUT, folio_core::SiteSnapshot::all_revealed)
            .await
            .context("scrolling the whole page left elements hidden")?;
        anyhow::ensure!(
            state.revealed >= initial.revealed,
            "revealed count went backwards"
        );

        if ctx.verbose {
            println!(
                "  📜 {}/{} elements revealed after scrolling",
                state.revealed, state.reveal_total
            );
        }
        Ok(())
    }
}

impl CombinedScenario for RevealScenario {
    fn name(&self) -> &'static str {
        "reveal"
    }

    fn run_logic(&self) -> Result<()> {
        let timing = RevealTiming::default();

        let mut set = RevealSet::new(4);
        let delays = set.prepare_for_scroll(timing);
        for (i, delay) in &delays {
            anyhow::ensure!(
                *delay == timing.transition_delay_ms(*i),
                "element {i} got delay {delay}"
            );
        }
        anyhow::ensure!(set.activate(2), "first activation should report a change");
        anyhow::ensure!(!set.activate(2), "second activation should be a no-op");

        let steps = set.schedule(timing);
        anyhow::ensure!(
            steps.iter().all(|step| step.index != 2),
            "revealed element was rescheduled"
        );
        anyhow::ensure!(
            steps
                .iter()
                .all(|step| step.activate_after_ms >= step.transition_delay_ms),
            "activation scheduled before its transition delay"
        );

        set.reveal_all();
        anyhow::ensure!(
            (0..set.len()).all(|i| set.phase(i) == Some(RevealPhase::Revealed)),
            "reveal_all left elements pending"
        );
        anyhow::ensure!(set.schedule(timing).is_empty(), "nothing left to schedule");

        anyhow::ensure!(
            MotionPreference::from_reduce_query(true).is_reduced(),
            "reduce query should map to reduced motion"
        );
        Ok(())
    }
}

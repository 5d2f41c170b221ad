use anyhow::{Context, Result};
use folio_core::SiteConfig;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx};

pub struct SmokeScenario;

#[async_trait::async_trait]
impl BrowserScenario for SmokeScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        driver.goto(&ctx.base_url).await?;

        driver
            .find(By::Css("section, #gallery, #navToggle"))
            .await
            .context("page has none of the site's landmarks")?;

        ctx.bridge.ensure_available().await?;
        let state = ctx.bridge.state().await?;

        if ctx.verbose {
            println!("  🌐 Page loaded, bridge connected: {state:?}");
        }

        anyhow::ensure!(
            state.lightbox_index.is_none(),
            "lightbox should start closed, got {:?}",
            state.lightbox_index
        );
        anyhow::ensure!(
            state.menu_expanded != Some(true),
            "menu should start collapsed"
        );
        Ok(())
    }
}

impl CombinedScenario for SmokeScenario {
    fn name(&self) -> &'static str {
        "smoke"
    }

    fn run_logic(&self) -> Result<()> {
        let cfg = SiteConfig::load_from_static();
        anyhow::ensure!(
            cfg == SiteConfig::default(),
            "bundled site data drifted from the defaults"
        );
        cfg.log_filter().context("bundled log level")?;
        anyhow::ensure!(
            cfg.reveal.stagger_step_ms > 0,
            "stagger step must be positive"
        );
        anyhow::ensure!(
            !cfg.lightbox.overlay_id.is_empty() && !cfg.nav.toggle_id.is_empty(),
            "element ids must not be empty"
        );
        Ok(())
    }
}

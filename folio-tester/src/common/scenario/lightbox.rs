use anyhow::{Context, Result};
use folio_core::{GalleryItem, Lightbox, LightboxAction, SiteConfig};
use std::time::Duration;
use thirtyfour::prelude::*;

use super::{BrowserScenario, CombinedScenario, ScenarioCtx};

const SETTLE: Duration = Duration::from_millis(200);

fn sample_lightbox() -> Lightbox {
    Lightbox::new(
        ["Harbour", "Orchard", "Foundry"]
            .into_iter()
            .map(|title| GalleryItem {
                src: format!("{}.jpg", title.to_lowercase()),
                alt: title.to_string(),
                title: title.to_string(),
                meta: String::new(),
            })
            .collect(),
    )
}

async fn overlay_hidden(driver: &WebDriver, cfg: &SiteConfig) -> Result<bool> {
    let overlay = driver.find(By::Id(cfg.lightbox.overlay_id.as_str())).await?;
    Ok(overlay.attr("aria-hidden").await?.as_deref() == Some("true"))
}

async fn gallery_len(ctx: &ScenarioCtx<'_>) -> Result<usize> {
    let len = ctx.bridge.state().await?.gallery_len;
    anyhow::ensure!(len > 0, "gallery is empty or not mounted");
    Ok(len)
}

pub struct LightboxCycleScenario;

#[async_trait::async_trait]
impl BrowserScenario for LightboxCycleScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let cfg = SiteConfig::default();
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;
        let len = gallery_len(ctx).await?;

        anyhow::ensure!(!ctx.bridge.open(len).await?, "open past the end succeeded");
        anyhow::ensure!(ctx.bridge.open(0).await?, "could not open item 0");
        anyhow::ensure!(!overlay_hidden(driver, &cfg).await?, "overlay still hidden");

        let caption = driver
            .find(By::Id(cfg.lightbox.caption_id.as_str()))
            .await?
            .text()
            .await?;
        anyhow::ensure!(!caption.trim().is_empty(), "caption is empty");

        for _ in 0..len {
            ctx.bridge.step(1).await?;
        }
        let state = ctx.bridge.state().await?;
        anyhow::ensure!(
            state.lightbox_index == Some(0),
            "{len} steps forward should wrap to 0, got {:?}",
            state.lightbox_index
        );

        ctx.bridge.step(-1).await?;
        let state = ctx.bridge.state().await?;
        anyhow::ensure!(
            state.lightbox_index == Some(len - 1),
            "stepping back from 0 should wrap to {}, got {:?}",
            len - 1,
            state.lightbox_index
        );

        let closed = ctx.bridge.close().await?;
        anyhow::ensure!(closed == Some(len - 1), "close reported {closed:?}");
        anyhow::ensure!(overlay_hidden(driver, &cfg).await?, "overlay still visible");

        if ctx.verbose {
            println!("  🖼️  Cycled {len} images and closed");
        }
        Ok(())
    }
}

impl CombinedScenario for LightboxCycleScenario {
    fn name(&self) -> &'static str {
        "lightbox-cycle"
    }

    fn run_logic(&self) -> Result<()> {
        let mut lightbox = sample_lightbox();
        anyhow::ensure!(lightbox.open(3).is_none(), "out-of-range open succeeded");
        anyhow::ensure!(!lightbox.is_open(), "failed open left the lightbox open");

        lightbox.open(0).context("open first item")?;
        for expected in [1, 2, 0] {
            lightbox.step(1);
            anyhow::ensure!(
                lightbox.current() == Some(expected),
                "forward step landed on {:?}, expected {expected}",
                lightbox.current()
            );
        }
        lightbox.step(-1);
        anyhow::ensure!(lightbox.current() == Some(2), "backward wrap failed");
        anyhow::ensure!(lightbox.close() == Some(2), "close lost the index");
        anyhow::ensure!(lightbox.close().is_none(), "second close reported an index");
        Ok(())
    }
}

pub struct LightboxKeyboardScenario;

#[async_trait::async_trait]
impl BrowserScenario for LightboxKeyboardScenario {
    async fn run_browser(&self, driver: &WebDriver, ctx: &ScenarioCtx<'_>) -> Result<()> {
        let cfg = SiteConfig::default();
        driver.goto(&ctx.base_url).await?;
        ctx.bridge.ensure_available().await?;
        let len = gallery_len(ctx).await?;

        ctx.bridge.key("ArrowRight").await?;
        let state = ctx.bridge.state().await?;
        anyhow::ensure!(
            state.lightbox_index.is_none(),
            "arrow key opened the closed lightbox"
        );

        let thumbnail = driver
            .find(By::Css(cfg.lightbox.item_selector.as_str()))
            .await
            .context("no gallery thumbnail")?;
        thumbnail.focus().await?;
        ctx.bridge.key("Enter").await?;
        ctx.bridge
            .wait_for_state(SETTLE, |s| s.lightbox_index == Some(0))
            .await
            .context("Enter on a thumbnail did not open it")?;

        tokio::time::sleep(SETTLE).await;
        let focused = ctx.bridge.active_element_id().await?;
        anyhow::ensure!(
            focused.as_deref() == Some(cfg.lightbox.close_id.as_str()),
            "focus should move to the close button, found {focused:?}"
        );

        ctx.bridge.key("ArrowRight").await?;
        let expected = 1 % len;
        let state = ctx.bridge.state().await?;
        anyhow::ensure!(
            state.lightbox_index == Some(expected),
            "ArrowRight should show {expected}, got {:?}",
            state.lightbox_index
        );

        ctx.bridge.key("Escape").await?;
        let state = ctx.bridge.state().await?;
        anyhow::ensure!(state.lightbox_index.is_none(), "Escape did not close");

        let returned = driver
            .execute(
                "return document.activeElement === arguments[0];",
                vec![thumbnail.to_json()?],
            )
            .await?;
        anyhow::ensure!(
            returned.json().as_bool().unwrap_or(false),
            "focus did not return to the opening thumbnail"
        );
        Ok(())
    }
}

impl CombinedScenario for LightboxKeyboardScenario {
    fn name(&self) -> &'static str {
        "lightbox-keyboard"
    }

    fn run_logic(&self) -> Result<()> {
        let mut lightbox = sample_lightbox();
        for key in ["Escape", "ArrowLeft", "ArrowRight"] {
            anyhow::ensure!(
                lightbox.action_for_key(key).is_none(),
                "{key} acted on a closed lightbox"
            );
        }

        lightbox.open(1).context("open middle item")?;
        let expected = [
            ("ArrowRight", Some(LightboxAction::Next)),
            ("ArrowLeft", Some(LightboxAction::Previous)),
            ("Escape", Some(LightboxAction::Close)),
            ("Enter", None),
        ];
        for (key, action) in expected {
            anyhow::ensure!(
                lightbox.action_for_key(key) == action,
                "{key} mapped to {:?}",
                lightbox.action_for_key(key)
            );
        }
        Ok(())
    }
}

use anyhow::{Context, Result, bail};
use folio_core::SiteSnapshot;
use serde_json::Value;
use std::time::Duration;
use thirtyfour::prelude::*;

/// Poll interval for [`TestBridge::wait_for_state`].
const POLL: Duration = Duration::from_millis(50);

/// Driver-side handle on the `window.__folioTest` hooks the site exposes
/// when loaded with `?test=1`.
#[derive(Debug, Clone)]
pub struct TestBridge<'a> {
    driver: &'a WebDriver,
}

impl<'a> TestBridge<'a> {
    pub const fn new(driver: &'a WebDriver) -> Self {
        Self { driver }
    }

    async fn call(&self, script: &str, args: Vec<Value>) -> Result<Value> {
        let ret = self
            .driver
            .execute(script, args)
            .await
            .with_context(|| format!("executing `{script}`"))?;
        Ok(ret.json().clone())
    }

    pub async fn ensure_available(&self) -> Result<()> {
        let ok = self.call("return !!window.__folioTest", vec![]).await?;
        if !ok.as_bool().unwrap_or(false) {
            bail!("__folioTest is not available. Did you pass ?test=1 to the site?");
        }
        Ok(())
    }

    pub async fn state(&self) -> Result<SiteSnapshot> {
        let value = self.call("return window.__folioTest.state()", vec![]).await?;
        if value.is_null() {
            bail!("site is not mounted");
        }
        serde_json::from_value(value).context("parsing SiteSnapshot")
    }

    /// Open the lightbox on thumbnail `index`; `false` when out of range.
    pub async fn open(&self, index: usize) -> Result<bool> {
        let value = self
            .call(
                "return window.__folioTest.open(arguments[0])",
                vec![index.into()],
            )
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    pub async fn step(&self, direction: i64) -> Result<bool> {
        let value = self
            .call(
                "return window.__folioTest.step(arguments[0])",
                vec![direction.into()],
            )
            .await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Close the lightbox, returning the index that was showing.
    pub async fn close(&self) -> Result<Option<usize>> {
        let value = self.call("return window.__folioTest.close()", vec![]).await?;
        Ok(value.as_u64().and_then(|i| usize::try_from(i).ok()))
    }

    /// Flip the menu, returning the new expanded state.
    pub async fn toggle_nav(&self) -> Result<Option<bool>> {
        let value = self
            .call("return window.__folioTest.toggleNav()", vec![])
            .await?;
        Ok(value.as_bool())
    }

    /// Dispatch a bubbling `keydown` for `key` on the focused element.
    pub async fn key(&self, key: &str) -> Result<()> {
        self.call(
            "const target = document.activeElement || document.body;\
             target.dispatchEvent(new KeyboardEvent('keydown', \
             { key: arguments[0], bubbles: true, cancelable: true }));",
            vec![key.into()],
        )
        .await?;
        Ok(())
    }

    /// Id of the focused element, or `None` when it has no id.
    pub async fn active_element_id(&self) -> Result<Option<String>> {
        let value = self
            .call(
                "const el = document.activeElement; return el && el.id ? el.id : null;",
                vec![],
            )
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    /// Poll the snapshot until `done` holds or `timeout` elapses.
    pub async fn wait_for_state(
        &self,
        timeout: Duration,
        done: impl Fn(&SiteSnapshot) -> bool,
    ) -> Result<SiteSnapshot> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let state = self.state().await?;
            if done(&state) {
                return Ok(state);
            }
            if tokio::time::Instant::now() >= deadline {
                bail!("timed out after {timeout:?}; last state {state:?}");
            }
            tokio::time::sleep(POLL).await;
        }
    }
}

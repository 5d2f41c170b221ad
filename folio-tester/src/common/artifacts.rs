//! Failure evidence for browser scenarios: what the page looked like, its
//! markup, and the page-behaviour state reported by the test bridge.

use anyhow::{Context, Result};
use chrono::Utc;
use folio_core::SiteSnapshot;
use std::fs;
use std::path::{Path, PathBuf};
use thirtyfour::prelude::*;

use crate::browser::TestBridge;

/// `<base>/<browser>/<scenario>/<utc timestamp>`
pub fn artifacts_dir(base: &str, browser: &str, scenario: &str) -> PathBuf {
    let ts = Utc::now().format("%Y%m%dT%H%M%S");
    Path::new(base).join(browser).join(scenario).join(ts.to_string())
}

/// Everything gathered after a scenario fails. Each piece is optional
/// because a broken page may refuse any of them.
#[derive(Debug, Default)]
pub struct ArtifactSet {
    pub screenshot: Option<Vec<u8>>,
    pub dom: Option<String>,
    pub snapshot: Option<SiteSnapshot>,
    pub error: String,
}

impl ArtifactSet {
    pub async fn collect(
        driver: &WebDriver,
        bridge: &TestBridge<'_>,
        err: &anyhow::Error,
    ) -> Self {
        let snapshot = match bridge.state().await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                log::debug!("no bridge state for artifacts: {e:#}");
                None
            }
        };
        Self {
            screenshot: driver.screenshot_as_png().await.ok(),
            dom: driver.source().await.ok(),
            snapshot,
            error: format!("{err:#}"),
        }
    }

    /// Write the collected pieces into `dir`, returning the files created.
    pub fn write_to(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating artifacts dir {}", dir.display()))?;

        let mut written = Vec::new();
        if let Some(png) = &self.screenshot {
            written.push(write_file(dir, "screenshot.png", png)?);
        }
        if let Some(dom) = &self.dom {
            written.push(write_file(dir, "dom.html", dom.as_bytes())?);
        }
        if let Some(snapshot) = &self.snapshot {
            let json = serde_json::to_vec_pretty(snapshot).context("serializing SiteSnapshot")?;
            written.push(write_file(dir, "snapshot.json", &json)?);
        }
        written.push(write_file(dir, "error.txt", self.error.as_bytes())?);
        Ok(written)
    }
}

fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "folio-artifacts-{tag}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn artifacts_dir_nests_browser_then_scenario() {
        let dir = artifacts_dir("target/out", "chrome", "lightbox-cycle");
        assert!(dir.starts_with(Path::new("target/out/chrome/lightbox-cycle")));
        assert_eq!(dir.components().count(), 5);
    }

    #[test]
    fn snapshot_is_written_as_typed_json() {
        let base = scratch("full");
        let snapshot = SiteSnapshot {
            lightbox_index: Some(1),
            gallery_len: 3,
            ..SiteSnapshot::default()
        };
        let set = ArtifactSet {
            screenshot: Some(vec![1, 2, 3]),
            dom: Some("<html />".into()),
            snapshot: Some(snapshot.clone()),
            error: "boom".into(),
        };

        let written = set.write_to(&base).expect("write artifacts");
        assert_eq!(written.len(), 4);

        let json = fs::read_to_string(base.join("snapshot.json")).expect("snapshot file");
        let parsed: SiteSnapshot = serde_json::from_str(&json).expect("typed snapshot");
        assert_eq!(parsed, snapshot);
        assert_eq!(fs::read_to_string(base.join("error.txt")).expect("error"), "boom");
    }

    #[test]
    fn missing_pieces_still_record_the_error() {
        let base = scratch("bare");
        let set = ArtifactSet {
            error: "no driver".into(),
            ..ArtifactSet::default()
        };

        let written = set.write_to(&base).expect("write artifacts");
        assert_eq!(written, vec![base.join("error.txt")]);
        assert!(!base.join("snapshot.json").exists());
    }
}

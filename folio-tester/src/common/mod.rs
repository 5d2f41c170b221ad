pub mod artifacts;
pub mod reports;
pub mod result;
pub mod scenario;

pub use artifacts::{ArtifactSet, artifacts_dir};
pub use result::ScenarioResult;

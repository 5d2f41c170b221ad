use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outcome of one scenario against one target (`logic` or a browser name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub target: String,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

impl ScenarioResult {
    /// Single-run result, as produced by a browser scenario.
    pub fn single(
        scenario_name: &str,
        target: &str,
        duration: Duration,
        outcome: &anyhow::Result<()>,
    ) -> Self {
        let failures = match outcome {
            Ok(()) => Vec::new(),
            Err(err) => vec![format!("{err:#}")],
        };
        let passed = failures.is_empty();
        Self {
            scenario_name: scenario_name.to_string(),
            target: target.to_string(),
            passed,
            iterations_run: 1,
            successful_iterations: usize::from(passed),
            failures,
            average_duration: duration,
            performance_data: vec![duration],
        }
    }

    pub fn label(&self) -> String {
        format!("{} [{}]", self.scenario_name, self.target)
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_millis().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u128::deserialize(deserializer)?;
        Ok(Duration::from_millis(u64::try_from(millis).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let millis: Vec<u128> = durations.iter().map(Duration::as_millis).collect();
        millis.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis_vec = Vec::<u128>::deserialize(deserializer)?;
        Ok(millis_vec
            .into_iter()
            .map(|m| Duration::from_millis(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_failure_records_the_error_chain() {
        let outcome: anyhow::Result<()> =
            Err(anyhow::anyhow!("caption mismatch").context("lightbox-cycle"));
        let result = ScenarioResult::single(
            "lightbox-cycle",
            "chrome",
            Duration::from_millis(12),
            &outcome,
        );
        assert!(!result.passed);
        assert_eq!(result.successful_iterations, 0);
        assert_eq!(result.failures, vec!["lightbox-cycle: caption mismatch"]);
        assert_eq!(result.label(), "lightbox-cycle [chrome]");
    }

    #[test]
    fn durations_serialize_as_millis() {
        let result =
            ScenarioResult::single("reveal", "logic", Duration::from_millis(1500), &Ok(()));
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["average_duration"], 1500);
        assert_eq!(json["performance_data"][0], 1500);
        assert_eq!(json["successful_iterations"], 1);
    }
}

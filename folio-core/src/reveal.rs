//! Staggered reveal state for page sections.
//!
//! Each section owns a [`RevealSet`]: one [`RevealPhase`] per animatable
//! element, in document order. Phases only ever move forward
//! (`Unrevealed → Pending → Revealed`); `Revealed` is terminal.

use serde::{Deserialize, Serialize};

use crate::config::RevealConfig;

/// The user's motion preference, read from `prefers-reduced-motion`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    /// Map the result of the `(prefers-reduced-motion: reduce)` media query.
    #[must_use]
    pub const fn from_reduce_query(matches: bool) -> Self {
        if matches { Self::Reduced } else { Self::Full }
    }

    #[must_use]
    pub const fn is_reduced(self) -> bool {
        matches!(self, Self::Reduced)
    }
}

/// Stagger timings shared by the navigation and scroll reveal paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    pub stagger_step_ms: u32,
    pub settle_ms: u32,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self::from(&RevealConfig::default())
    }
}

impl From<&RevealConfig> for RevealTiming {
    fn from(cfg: &RevealConfig) -> Self {
        Self {
            stagger_step_ms: cfg.stagger_step_ms,
            settle_ms: cfg.settle_ms,
        }
    }
}

impl RevealTiming {
    /// CSS `transition-delay` for the element at `index`.
    #[must_use]
    pub fn transition_delay_ms(self, index: usize) -> u32 {
        index_u32(index).saturating_mul(self.stagger_step_ms)
    }

    /// Time after which a navigation-triggered element is activated.
    #[must_use]
    pub fn activation_delay_ms(self, index: usize) -> u32 {
        self.transition_delay_ms(index)
            .saturating_add(self.settle_ms)
    }
}

fn index_u32(index: usize) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealPhase {
    #[default]
    Unrevealed,
    Pending {
        delay_ms: u32,
    },
    Revealed,
}

impl RevealPhase {
    #[must_use]
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }
}

/// One scheduled activation produced by a navigation trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealStep {
    pub index: usize,
    pub transition_delay_ms: u32,
    pub activate_after_ms: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealSet {
    phases: Vec<RevealPhase>,
}

impl RevealSet {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            phases: vec![RevealPhase::Unrevealed; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    #[must_use]
    pub fn phase(&self, index: usize) -> Option<RevealPhase> {
        self.phases.get(index).copied()
    }

    #[must_use]
    pub fn is_revealed(&self, index: usize) -> bool {
        self.phase(index).is_some_and(RevealPhase::is_revealed)
    }

    #[must_use]
    pub fn revealed_count(&self) -> usize {
        self.phases.iter().filter(|p| p.is_revealed()).count()
    }

    /// Assign scroll-path delays to every element that has not been touched
    /// yet. Returns `(index, transition_delay_ms)` for each element that
    /// became pending; those are the ones to hand to the intersection
    /// observer.
    pub fn prepare_for_scroll(&mut self, timing: RevealTiming) -> Vec<(usize, u32)> {
        let mut prepared = Vec::new();
        for (index, phase) in self.phases.iter_mut().enumerate() {
            if *phase == RevealPhase::Unrevealed {
                let delay_ms = timing.transition_delay_ms(index);
                *phase = RevealPhase::Pending { delay_ms };
                prepared.push((index, delay_ms));
            }
        }
        prepared
    }

    /// Schedule every element that is not yet revealed for a
    /// navigation-triggered cascade. Already revealed elements are skipped;
    /// pending ones are rescheduled with the navigation delays.
    pub fn schedule(&mut self, timing: RevealTiming) -> Vec<RevealStep> {
        let mut steps = Vec::new();
        for (index, phase) in self.phases.iter_mut().enumerate() {
            if phase.is_revealed() {
                continue;
            }
            let transition_delay_ms = timing.transition_delay_ms(index);
            *phase = RevealPhase::Pending {
                delay_ms: transition_delay_ms,
            };
            steps.push(RevealStep {
                index,
                transition_delay_ms,
                activate_after_ms: timing.activation_delay_ms(index),
            });
        }
        steps
    }

    /// Move one element to `Revealed`.
    ///
    /// Returns `true` only when the element changed phase; revealing twice or
    /// revealing an unknown index is a no-op.
    pub fn activate(&mut self, index: usize) -> bool {
        match self.phases.get_mut(index) {
            Some(phase) if !phase.is_revealed() => {
                *phase = RevealPhase::Revealed;
                true
            }
            _ => false,
        }
    }

    /// Reveal everything at once (reduced-motion bypass). Returns how many
    /// elements changed phase.
    pub fn reveal_all(&mut self) -> usize {
        let mut changed = 0;
        for phase in &mut self.phases {
            if !phase.is_revealed() {
                *phase = RevealPhase::Revealed;
                changed += 1;
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing() -> RevealTiming {
        RevealTiming {
            stagger_step_ms: 90,
            settle_ms: 30,
        }
    }

    #[test]
    fn delays_scale_with_index() {
        let t = timing();
        assert_eq!(t.transition_delay_ms(0), 0);
        assert_eq!(t.transition_delay_ms(3), 270);
        assert_eq!(t.activation_delay_ms(0), 30);
        assert_eq!(t.activation_delay_ms(3), 300);
    }

    #[test]
    fn huge_indices_saturate() {
        let t = timing();
        assert_eq!(t.transition_delay_ms(usize::MAX), u32::MAX);
        assert_eq!(t.activation_delay_ms(usize::MAX), u32::MAX);
    }

    #[test]
    fn prepare_only_touches_unrevealed() {
        let mut set = RevealSet::new(3);
        assert!(set.activate(1));
        let prepared = set.prepare_for_scroll(timing());
        assert_eq!(prepared, vec![(0, 0), (2, 180)]);
        assert_eq!(set.phase(2), Some(RevealPhase::Pending { delay_ms: 180 }));
        assert!(set.prepare_for_scroll(timing()).is_empty());
    }

    #[test]
    fn schedule_skips_revealed_and_reschedules_pending() {
        let mut set = RevealSet::new(4);
        set.prepare_for_scroll(timing());
        set.activate(0);
        let steps = set.schedule(timing());
        let indices: Vec<usize> = steps.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(
            steps[1],
            RevealStep {
                index: 2,
                transition_delay_ms: 180,
                activate_after_ms: 210,
            }
        );
    }

    #[test]
    fn revealed_is_terminal() {
        let mut set = RevealSet::new(2);
        assert!(set.activate(0));
        assert!(!set.activate(0));
        set.schedule(timing());
        set.prepare_for_scroll(timing());
        assert_eq!(set.phase(0), Some(RevealPhase::Revealed));
        assert!(!set.activate(9));
    }

    #[test]
    fn reveal_all_counts_changes() {
        let mut set = RevealSet::new(3);
        set.activate(2);
        assert_eq!(set.reveal_all(), 2);
        assert_eq!(set.revealed_count(), 3);
        assert_eq!(set.reveal_all(), 0);
    }

    #[test]
    fn motion_preference_maps_query() {
        assert!(MotionPreference::from_reduce_query(true).is_reduced());
        assert!(!MotionPreference::from_reduce_query(false).is_reduced());
        assert_eq!(MotionPreference::default(), MotionPreference::Full);
    }
}

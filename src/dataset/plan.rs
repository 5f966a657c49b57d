//! Generation plans: which kinds to generate, how many of each, in what order

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::defaults;
use crate::types::GeneratorKind;

/// Ordered list of (kind, repetitions). Sample ids follow this order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationPlan {
    entries: Vec<(GeneratorKind, usize)>,
}

impl GenerationPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. A kind may appear more than once.
    #[must_use]
    pub fn with(mut self, kind: GeneratorKind, count: usize) -> Self {
        self.entries.push((kind, count));
        self
    }

    pub fn entries(&self) -> &[(GeneratorKind, usize)] {
        &self.entries
    }

    pub fn total_samples(&self) -> usize {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_samples() == 0
    }

    /// Three primitive classes, 2000 samples each
    pub fn baseline() -> Self {
        Self::new()
            .with(GeneratorKind::Smooth, defaults::BASELINE_SAMPLES_PER_CLASS)
            .with(GeneratorKind::Irregular, defaults::BASELINE_SAMPLES_PER_CLASS)
            .with(GeneratorKind::Pothole, defaults::BASELINE_SAMPLES_PER_CLASS)
    }

    /// Primitive kinds at 1500 each plus the two composites at 1000 each
    pub fn composite() -> Self {
        Self::new()
            .with(GeneratorKind::Smooth, defaults::COMPOSITE_BASE_SAMPLES)
            .with(GeneratorKind::Irregular, defaults::COMPOSITE_BASE_SAMPLES)
            .with(GeneratorKind::Pothole, defaults::COMPOSITE_BASE_SAMPLES)
            .with(GeneratorKind::PotholeInIrregular, defaults::COMPOSITE_MIXED_SAMPLES)
            .with(GeneratorKind::SmoothToIrregular, defaults::COMPOSITE_MIXED_SAMPLES)
    }
}

/// Named dataset recipes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// liso / irregular / buraco only
    Baseline,
    /// Primitive classes plus pothole-in-irregular and smooth-to-irregular
    #[default]
    Composite,
}

impl Preset {
    pub fn plan(self) -> GenerationPlan {
        match self {
            Preset::Baseline => GenerationPlan::baseline(),
            Preset::Composite => GenerationPlan::composite(),
        }
    }

    pub const fn default_output_file(self) -> &'static str {
        match self {
            Preset::Baseline => defaults::BASELINE_OUTPUT_FILE,
            Preset::Composite => defaults::COMPOSITE_OUTPUT_FILE,
        }
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Preset::Baseline => write!(f, "baseline"),
            Preset::Composite => write!(f, "composite"),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseline" => Ok(Preset::Baseline),
            "composite" => Ok(Preset::Composite),
            other => Err(format!("unknown preset '{other}' (expected baseline or composite)")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_totals() {
        let plan = GenerationPlan::baseline();
        assert_eq!(plan.entries().len(), 3);
        assert_eq!(plan.total_samples(), 6_000);
    }

    #[test]
    fn test_composite_order_and_totals() {
        let plan = Preset::Composite.plan();
        let kinds: Vec<GeneratorKind> = plan.entries().iter().map(|(k, _)| *k).collect();
        assert_eq!(kinds, GeneratorKind::ALL.to_vec());
        assert_eq!(plan.total_samples(), 3 * 1_500 + 2 * 1_000);
    }

    #[test]
    fn test_empty_plan() {
        assert!(GenerationPlan::new().is_empty());
        assert!(GenerationPlan::new().with(GeneratorKind::Smooth, 0).is_empty());
    }

    #[test]
    fn test_preset_parse_and_display() {
        assert_eq!("baseline".parse::<Preset>(), Ok(Preset::Baseline));
        assert_eq!(Preset::Composite.to_string(), "composite");
        assert!("everything".parse::<Preset>().is_err());
    }
}

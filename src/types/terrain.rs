//! Terrain classes, their severity ranking, and the generator kinds built on them

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ============================================================================
// Terrain Class (label)
// ============================================================================

/// Pavement condition used as the training label.
///
/// Variant order is the severity ranking: `Smooth < Irregular < Pothole`.
/// Composite signals are labeled with their most severe constituent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TerrainClass {
    /// Flat paved road, sensor noise only
    #[serde(rename = "liso")]
    Smooth,
    /// Rough or unpaved surface with continuous vibration
    #[serde(rename = "irregular")]
    Irregular,
    /// Single pothole strike
    #[serde(rename = "buraco")]
    Pothole,
}

impl TerrainClass {
    pub const ALL: [TerrainClass; 3] = [
        TerrainClass::Smooth,
        TerrainClass::Irregular,
        TerrainClass::Pothole,
    ];

    /// Label string written to the dataset
    pub const fn label(self) -> &'static str {
        match self {
            TerrainClass::Smooth => "liso",
            TerrainClass::Irregular => "irregular",
            TerrainClass::Pothole => "buraco",
        }
    }
}

impl std::fmt::Display for TerrainClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TerrainClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TerrainClass::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| format!("unknown terrain class '{s}'"))
    }
}

// ============================================================================
// Generator Kind
// ============================================================================

/// The five signal types the dataset is built from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GeneratorKind {
    #[serde(rename = "liso")]
    Smooth,
    #[serde(rename = "irregular")]
    Irregular,
    /// Pothole impulse on a smooth carrier
    #[serde(rename = "buraco")]
    Pothole,
    /// Pothole impulse on an irregular carrier
    #[serde(rename = "buraco_em_irregular")]
    PotholeInIrregular,
    /// First half smooth, second half irregular
    #[serde(rename = "transicao_liso_irregular")]
    SmoothToIrregular,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 5] = [
        GeneratorKind::Smooth,
        GeneratorKind::Irregular,
        GeneratorKind::Pothole,
        GeneratorKind::PotholeInIrregular,
        GeneratorKind::SmoothToIrregular,
    ];

    /// Type name as used in dataset plans and logs
    pub const fn name(self) -> &'static str {
        match self {
            GeneratorKind::Smooth => "liso",
            GeneratorKind::Irregular => "irregular",
            GeneratorKind::Pothole => "buraco",
            GeneratorKind::PotholeInIrregular => "buraco_em_irregular",
            GeneratorKind::SmoothToIrregular => "transicao_liso_irregular",
        }
    }

    /// Terrain classes present in the generated signal
    pub const fn constituents(self) -> &'static [TerrainClass] {
        match self {
            GeneratorKind::Smooth => &[TerrainClass::Smooth],
            GeneratorKind::Irregular => &[TerrainClass::Irregular],
            GeneratorKind::Pothole => &[TerrainClass::Smooth, TerrainClass::Pothole],
            GeneratorKind::PotholeInIrregular => &[TerrainClass::Irregular, TerrainClass::Pothole],
            GeneratorKind::SmoothToIrregular => &[TerrainClass::Smooth, TerrainClass::Irregular],
        }
    }

    /// Label for every sample of this kind: the most severe constituent.
    pub fn label(self) -> TerrainClass {
        self.constituents()
            .iter()
            .copied()
            .max()
            .unwrap_or(TerrainClass::Smooth)
    }

    /// True for kinds that combine two generator outputs
    pub const fn is_composite(self) -> bool {
        matches!(
            self,
            GeneratorKind::PotholeInIrregular | GeneratorKind::SmoothToIrregular
        )
    }
}

impl std::fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GeneratorKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| format!("unknown generator kind '{s}'"))
    }
}

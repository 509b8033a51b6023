//! Discrete yield tiers derived from a numeric prediction.

use serde::Serialize;

const AVERAGE_LOWER_BOUND: f64 = 2.0;
const HIGH_LOWER_BOUND: f64 = 4.0;

/// Yield classification band.
///
/// Bands are inclusive on their lower end: `[.., 2)` is low, `[2, 4)` is
/// average and `[4, ..]` is high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum YieldTier {
    /// Below-average yield.
    Low,
    /// Normal productivity.
    Average,
    /// Favourable yield.
    High,
}

impl YieldTier {
    /// Classifies a predicted yield.
    #[must_use]
    pub fn classify(value: f64) -> Self {
        if value < AVERAGE_LOWER_BOUND {
            Self::Low
        } else if value < HIGH_LOWER_BOUND {
            Self::Average
        } else {
            Self::High
        }
    }

    /// Returns the canonical tier name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Average => "Average",
            Self::High => "High",
        }
    }

    /// Returns the fixed interpretation for this tier.
    #[must_use]
    pub const fn interpretation(self) -> YieldInterpretation {
        match self {
            Self::Low => YieldInterpretation {
                tier: self,
                level: "Low Yield 🌱",
                message: "Below average yield. Conditions may not be optimal.",
                tip: "Increase irrigation, improve soil nutrients, or review weather impact.",
            },
            Self::Average => YieldInterpretation {
                tier: self,
                level: "Average Yield 🌿",
                message: "Normal productivity for current conditions.",
                tip: "Small optimizations in fertilizer or irrigation could improve output.",
            },
            Self::High => YieldInterpretation {
                tier: self,
                level: "High Yield 🌾",
                message: "Strong prediction. Conditions look favorable.",
                tip: "Maintain current farming strategy and monitor weather stability.",
            },
        }
    }
}

/// Tier together with its display label, message and actionable tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YieldInterpretation {
    /// Classification band.
    pub tier: YieldTier,
    /// Display label.
    pub level: &'static str,
    /// Short description of the outcome.
    pub message: &'static str,
    /// Suggested next step for the grower.
    pub tip: &'static str,
}

/// Interprets a predicted yield.
#[must_use]
pub fn interpret_yield(value: f64) -> YieldInterpretation {
    YieldTier::classify(value).interpretation()
}

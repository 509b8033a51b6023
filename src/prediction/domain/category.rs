//! Fixed categorical enumerations accepted by the yield model.
//!
//! Member order matches the one-hot column order the model was trained
//! against, so [`Categorical::ALL`] doubles as the encoding order.

use super::PredictionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed set of categorical values with a stable one-hot order.
pub trait Categorical: Copy + Eq + Sized + 'static {
    /// Name of the field, used in error messages.
    const FIELD: &'static str;

    /// Every member, in encoding order.
    const ALL: &'static [Self];

    /// Returns the canonical literal for this member.
    fn as_str(self) -> &'static str;

    /// Parses a submitted value into a member of the enumeration.
    ///
    /// Leading and trailing whitespace is ignored; matching is otherwise
    /// exact.
    ///
    /// # Errors
    ///
    /// Returns [`PredictionDomainError::UnrecognizedCategory`] when the value
    /// is not a member.
    fn parse(value: &str) -> Result<Self, PredictionDomainError> {
        let trimmed = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.as_str() == trimmed)
            .ok_or_else(|| PredictionDomainError::UnrecognizedCategory {
                field: Self::FIELD,
                value: value.to_owned(),
                allowed: Self::ALL
                    .iter()
                    .map(|member| member.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Returns the literal of every member, in encoding order.
    #[must_use]
    fn literals() -> Vec<&'static str> {
        Self::ALL.iter().map(|member| member.as_str()).collect()
    }
}

macro_rules! categorical {
    (
        $(#[$meta:meta])*
        $name:ident, field = $field:literal { $($(#[$vmeta:meta])* $variant:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl Categorical for $name {
            const FIELD: &'static str = $field;
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        impl TryFrom<&str> for $name {
            type Error = PredictionDomainError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                <Self as Categorical>::parse(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

categorical! {
    /// Growing region.
    Region, field = "region" {
        /// Northern region.
        North,
        /// Southern region.
        South,
        /// Western region.
        West,
    }
}

categorical! {
    /// Soil classification.
    SoilType, field = "soil type" {
        /// Clay soil.
        Clay,
        /// Loam soil.
        Loam,
        /// Peaty soil.
        Peaty,
        /// Sandy soil.
        Sandy,
        /// Silt soil.
        Silt,
    }
}

categorical! {
    /// Crop being grown.
    Crop, field = "crop" {
        /// Cotton.
        Cotton,
        /// Maize.
        Maize,
        /// Rice.
        Rice,
        /// Soybean.
        Soybean,
        /// Wheat.
        Wheat,
    }
}

categorical! {
    /// Prevailing weather condition.
    Weather, field = "weather" {
        /// Mostly rainy conditions.
        Rainy,
        /// Mostly sunny conditions.
        Sunny,
    }
}

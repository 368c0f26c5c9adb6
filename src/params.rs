#[cfg(test)]
mod tests;

use std::{fmt, str::FromStr};

use crate::error::AverageError;

/// Sharpening strength used when normalization is enabled and the caller
/// does not override it.
pub const DEFAULT_SHARPEN_STRENGTH: f32 = 0.5;

/// Number of axes of every image in a run.
///
/// The core is written for a const dimension, but only these two are ever
/// instantiated. The value is resolved once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensionality {
    Two = 2,
    Three = 3,
}

impl TryFrom<i64> for Dimensionality {
    type Error = AverageError;

    fn try_from(val: i64) -> Result<Self, Self::Error> {
        Ok(match val {
            2 => Self::Two,
            3 => Self::Three,
            _ => return Err(AverageError::UnsupportedDimensionality(val.to_string())),
        })
    }
}

/// Parses a command-line argument. Text that is not an integer is reported
/// as an unsupported dimensionality, the same as any integer other than 2 or 3.
impl FromStr for Dimensionality {
    type Err = AverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map_err(|_| AverageError::UnsupportedDimensionality(s.to_string()))
            .and_then(Self::try_from)
    }
}

impl From<Dimensionality> for usize {
    fn from(value: Dimensionality) -> Self {
        match value {
            Dimensionality::Two => 2,
            Dimensionality::Three => 3,
        }
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-D", usize::from(*self))
    }
}

/// Tunables of a single averaging run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AverageParams {
    /// Divide every input by its own mean before adding it.
    pub normalize: bool,
    /// Allow the sharpening pass. It still only runs when `normalize` is set.
    pub sharpen: bool,
    pub sharpen_strength: f32,
}

impl Default for AverageParams {
    fn default() -> Self {
        Self {
            normalize: false,
            sharpen: true,
            sharpen_strength: DEFAULT_SHARPEN_STRENGTH,
        }
    }
}

impl AverageParams {
    #[must_use]
    pub fn with_normalize(normalize: bool) -> Self {
        Self {
            normalize,
            ..Self::default()
        }
    }

    /// Whether the final sum goes through the sharpener.
    #[must_use]
    pub fn sharpening_enabled(&self) -> bool {
        self.normalize && self.sharpen
    }
}

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Percentage of each emphasized word rendered bold, `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Fixation(u8);

impl Fixation {
    pub const MAX: u8 = 100;

    pub fn new(percent: u8) -> Result<Self, EngineError> {
        if percent > Self::MAX {
            return Err(EngineError::InvalidSetting {
                name: "fixation",
                value: percent.into(),
                min: 0,
                max: Self::MAX.into(),
            });
        }
        Ok(Self(percent))
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

impl Default for Fixation {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<u8> for Fixation {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Fixation> for u8 {
    fn from(value: Fixation) -> Self {
        value.0
    }
}

/// Word interval at which emphasis is applied, `1..=5` (1 = every word).
///
/// Zero is unrepresentable, so the splitter's modulo never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Saccade(u8);

impl Saccade {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(stride: u8) -> Result<Self, EngineError> {
        if !(Self::MIN..=Self::MAX).contains(&stride) {
            return Err(EngineError::InvalidSetting {
                name: "saccade",
                value: stride.into(),
                min: Self::MIN.into(),
                max: Self::MAX.into(),
            });
        }
        Ok(Self(stride))
    }

    pub fn stride(self) -> usize {
        usize::from(self.0)
    }
}

impl Default for Saccade {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u8> for Saccade {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Saccade> for u8 {
    fn from(value: Saccade) -> Self {
        value.0
    }
}

/// The two knobs of bionic emphasis, already validated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BionicSettings {
    pub fixation: Fixation,
    pub saccade: Saccade,
}

impl BionicSettings {
    pub fn new(fixation: u8, saccade: u8) -> Result<Self, EngineError> {
        Ok(Self {
            fixation: Fixation::new(fixation)?,
            saccade: Saccade::new(saccade)?,
        })
    }
}

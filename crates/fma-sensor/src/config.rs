use crate::conversion::{FORCE_10_COUNT, FORCE_20_COUNT, FORCE_80_COUNT, FORCE_90_COUNT};
use crate::error::ConfigError;

/// Full scale force rating, part of the FMA part number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Scale {
    N5,
    N15,
    #[default]
    N25,
}

impl Scale {
    pub const ALL: [Scale; 3] = [Scale::N5, Scale::N15, Scale::N25];

    pub fn newtons(self) -> f64 {
        match self {
            Scale::N5 => 5.0,
            Scale::N15 => 15.0,
            Scale::N25 => 25.0,
        }
    }

    /// For boards that select the range with two jumpers. The 5N pin wins
    /// when both are set, neither set means the 25N part.
    pub fn from_pins(five_newton: bool, fifteen_newton: bool) -> Self {
        match (five_newton, fifteen_newton) {
            (true, _) => Scale::N5,
            (false, true) => Scale::N15,
            (false, false) => Scale::N25,
        }
    }
}

impl TryFrom<u8> for Scale {
    type Error = ConfigError;

    fn try_from(newtons: u8) -> Result<Self, Self::Error> {
        match newtons {
            5 => Ok(Scale::N5),
            15 => Ok(Scale::N15),
            25 => Ok(Scale::N25),
            other => Err(ConfigError::UnsupportedRange(other)),
        }
    }
}

/// The band of output counts the force maps onto linearly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferSpan {
    /// 10% to 90% of the 14 bit count range
    TenToNinety,
    /// 20% to 80% of the 14 bit count range
    #[default]
    TwentyToEighty,
}

impl TransferSpan {
    pub fn lower_count(self) -> f64 {
        match self {
            TransferSpan::TenToNinety => FORCE_10_COUNT,
            TransferSpan::TwentyToEighty => FORCE_20_COUNT,
        }
    }

    pub fn upper_count(self) -> f64 {
        match self {
            TransferSpan::TenToNinety => FORCE_90_COUNT,
            TransferSpan::TwentyToEighty => FORCE_80_COUNT,
        }
    }
}

/// Parses the upper limit of the transfer function in percent.
impl TryFrom<u8> for TransferSpan {
    type Error = ConfigError;

    fn try_from(upper_percent: u8) -> Result<Self, Self::Error> {
        match upper_percent {
            90 => Ok(TransferSpan::TenToNinety),
            80 => Ok(TransferSpan::TwentyToEighty),
            other => Err(ConfigError::UnsupportedSpan(other)),
        }
    }
}

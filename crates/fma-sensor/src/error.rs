use crate::decode::{RawSample, Status};

/// Everything that can go wrong talking to the sensor. `E` is the error
/// type of the i2c bus the driver was given.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    #[error("i2c transaction with the sensor failed: {0:?}")]
    Transport(E),
    /// The sensor answered but flagged its output as not normal. The
    /// decoded sample is kept so the caller can still use it.
    #[error("sensor reported status {status:?}, data may not be trusted")]
    Status { status: Status, sample: RawSample },
    #[error("none of the {attempted} zero calibration samples could be read")]
    NoCalibrationSamples { attempted: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    #[error("{0}N is not a full scale range of the FMA series (5, 15 or 25N)")]
    UnsupportedRange(u8),
    #[error("{0}% is not the upper limit of a supported transfer function (80 or 90%)")]
    UnsupportedSpan(u8),
}

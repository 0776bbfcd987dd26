//! Bit layout of the 4 byte frame the sensor sends on every read.
//!
//! ```text
//! byte 0: [S1 S0 F13 F12 F11 F10 F9 F8]
//! byte 1: [F7 F6 F5 F4 F3 F2 F1 F0]
//! byte 2: [T10 T9 T8 T7 T6 T5 T4 T3]
//! byte 3: [T2 T1 T0 x x x x x]
//! ```

pub(crate) const FRAME_LEN: usize = 4;

const STATUS_MASK: u8 = 0x03;
const FORCE_MASK: u16 = 0x3FFF;
const TEMP_MASK: u16 = 0x07FF;

/// Diagnostic state the sensor reports in the top two bits of every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Normal,
    /// The device is in command mode, only seen during factory programming
    CommandMode,
    /// No new measurement was done since the last read
    Stale,
    Fault,
}

impl Status {
    fn from_bits(bits: u8) -> Self {
        match bits & STATUS_MASK {
            0 => Status::Normal,
            1 => Status::CommandMode,
            2 => Status::Stale,
            _ => Status::Fault,
        }
    }

    pub fn is_normal(self) -> bool {
        self == Status::Normal
    }
}

/// Counts exactly as the sensor reported them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample {
    /// 14 significant bits
    pub force_counts: u16,
    /// 11 significant bits
    pub temp_counts: u16,
    pub status: Status,
}

impl RawSample {
    pub fn decode(frame: [u8; FRAME_LEN]) -> Self {
        let status = Status::from_bits(frame[0] >> 6);
        let force_counts = u16::from_be_bytes([frame[0], frame[1]]) & FORCE_MASK;
        let temp_counts =
            ((u16::from(frame[2]) << 3) | (u16::from(frame[3]) >> 5)) & TEMP_MASK;

        Self {
            force_counts,
            temp_counts,
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_mixed_frame() {
        let sample = RawSample::decode([0x43, 0x21, 0x9A, 0x60]);
        assert_eq!(sample.status, Status::CommandMode);
        assert_eq!(sample.force_counts, 0x0321);
        assert_eq!(sample.temp_counts, 1235);
    }

    #[test]
    fn status_bits_do_not_leak_into_force() {
        let sample = RawSample::decode([0xFF, 0xFF, 0x00, 0x00]);
        assert_eq!(sample.status, Status::Fault);
        assert_eq!(sample.force_counts, 0x3FFF);
    }

    #[test]
    fn temperature_ignores_low_bits_of_last_byte() {
        let sample = RawSample::decode([0x00, 0x00, 0xFF, 0xFF]);
        assert_eq!(sample.temp_counts, 0x07FF);
        let sample = RawSample::decode([0x00, 0x00, 0x00, 0x1F]);
        assert_eq!(sample.temp_counts, 0);
    }

    #[test]
    fn every_status() {
        let status = |b0| RawSample::decode([b0, 0, 0, 0]).status;
        assert_eq!(status(0x00), Status::Normal);
        assert_eq!(status(0x40), Status::CommandMode);
        assert_eq!(status(0x80), Status::Stale);
        assert_eq!(status(0xC0), Status::Fault);
    }
}

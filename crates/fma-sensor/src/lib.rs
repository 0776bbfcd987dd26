//! Driver for the Honeywell FMA series of micro force sensors, I2C variant.
//!
//! The sensor has no registers to configure. Every read returns the same 4
//! byte frame holding a status, a 14 bit force count and an 11 bit
//! temperature count. This crate decodes that frame and turns the counts
//! into Newton and degrees Celsius. It can also null the baseline of the
//! force reading with [`Fma::calibrate_zero`].
//!
//! The driver works with anything implementing [`embedded_hal::i2c::I2c`].
//! Pass `&mut bus` or a shared bus device if the bus has other users.
//!
//! ```no_run
//! # fn example(i2c: impl embedded_hal::i2c::I2c, mut delay: impl embedded_hal::delay::DelayNs) {
//! use fma_sensor::{Fma, Scale, TransferSpan};
//!
//! let mut sensor = Fma::new(i2c, Scale::N25, TransferSpan::TwentyToEighty);
//! sensor
//!     .calibrate_zero(
//!         fma_sensor::DEFAULT_CALIBRATION_SAMPLES,
//!         &mut delay,
//!         fma_sensor::DEFAULT_CALIBRATION_SETTLE,
//!     )
//!     .ok();
//! let force = sensor.get_force();
//! # }
//! ```

#![cfg_attr(not(test), no_std)]

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

mod config;
pub mod conversion;
mod decode;
mod error;

pub use config::{Scale, TransferSpan};
pub use decode::{RawSample, Status};
pub use error::{ConfigError, Error};

use decode::FRAME_LEN;

/// 7 bit address every FMA part ships with
pub const DEFAULT_ADDRESS: u8 = 0x28;
pub const DEFAULT_CALIBRATION_SAMPLES: u32 = 10;
pub const DEFAULT_CALIBRATION_SETTLE: Duration = Duration::from_millis(10);

/// Force, temperature and the status they were read with, all from a
/// single bus transaction.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Measurement {
    /// Newton, zero offset already removed
    pub force: f64,
    /// Degrees Celsius
    pub temperature: f64,
    pub status: Status,
}

pub struct Fma<I2C> {
    i2c: I2C,
    /// 7 bit address shifted left by one, as it goes on the wire
    bus_address: u8,
    scale: Scale,
    span: TransferSpan,
    zero_offset: f64,
}

impl<I2C: I2c> Fma<I2C> {
    pub fn new(i2c: I2C, scale: Scale, span: TransferSpan) -> Self {
        Self::with_address(i2c, scale, span, DEFAULT_ADDRESS)
    }

    /// Use for parts ordered with a non standard address. The address is
    /// not checked, a wrong one shows up as transport errors on read.
    pub fn with_address(
        i2c: I2C,
        scale: Scale,
        span: TransferSpan,
        address7bit: u8,
    ) -> Self {
        Self {
            i2c,
            bus_address: address7bit << 1,
            scale,
            span,
            zero_offset: 0.0,
        }
    }

    /// Give back the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn read_raw(&mut self) -> Result<RawSample, Error<I2C::Error>> {
        let mut frame = [0u8; FRAME_LEN];
        self.i2c
            .read(self.bus_address >> 1, &mut frame)
            .map_err(Error::Transport)?;
        Ok(RawSample::decode(frame))
    }

    /// Force in Newton with the zero offset removed. Fails if the sensor
    /// does not report [`Status::Normal`].
    pub fn get_force(&mut self) -> Result<f64, Error<I2C::Error>> {
        let sample = self.read_normal()?;
        Ok(self.compensated(sample.force_counts))
    }

    /// Temperature in degrees Celsius. Fails if the sensor does not report
    /// [`Status::Normal`].
    pub fn get_temp(&mut self) -> Result<f64, Error<I2C::Error>> {
        let sample = self.read_normal()?;
        Ok(conversion::temperature_celsius(sample.temp_counts))
    }

    /// Reads force and temperature in one go. Unlike [`Fma::get_force`]
    /// this does not fail on a stale or fault status, check
    /// [`Measurement::status`] instead.
    pub fn measure(&mut self) -> Result<Measurement, Error<I2C::Error>> {
        let sample = self.read_raw()?;
        Ok(Measurement {
            force: self.compensated(sample.force_counts),
            temperature: conversion::temperature_celsius(sample.temp_counts),
            status: sample.status,
        })
    }

    /// Averages `samples` force readings taken without load and stores the
    /// mean as the new zero offset. The readings are taken like
    /// [`Fma::get_force`], so with the current offset already removed.
    /// Call [`Fma::set_zero_offset`] with `0.0` first to measure the
    /// baseline from scratch. Waits `settle` before each sample after the
    /// first. Readings that fail are left out of the mean. If none succeed
    /// the previous offset is kept and an error returned.
    ///
    /// Returns the new offset.
    pub fn calibrate_zero(
        &mut self,
        samples: u32,
        delay: &mut impl DelayNs,
        settle: Duration,
    ) -> Result<f64, Error<I2C::Error>> {
        let settle_us = u32::try_from(settle.as_micros()).unwrap_or(u32::MAX);

        let mut sum = 0.0;
        let mut read = 0u32;
        for i in 0..samples {
            if i > 0 {
                delay.delay_us(settle_us);
            }

            match self.read_normal() {
                Ok(sample) => {
                    sum += self.compensated(sample.force_counts);
                    read += 1;
                }
                Err(_) => {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("skipping zero calibration sample {}, read failed", i);
                }
            }
        }

        if read == 0 {
            return Err(Error::NoCalibrationSamples { attempted: samples });
        }

        self.zero_offset = sum / f64::from(read);
        #[cfg(feature = "defmt")]
        defmt::debug!(
            "zero offset set to {}N using {}/{} samples",
            self.zero_offset,
            read,
            samples
        );
        Ok(self.zero_offset)
    }

    fn read_normal(&mut self) -> Result<RawSample, Error<I2C::Error>> {
        let sample = self.read_raw()?;
        if sample.status.is_normal() {
            Ok(sample)
        } else {
            Err(Error::Status {
                status: sample.status,
                sample,
            })
        }
    }
}

impl<I2C> Fma<I2C> {
    /// Takes the 7 bit address, see [`Fma::bus_address`] for the stored form.
    pub fn set_address(&mut self, address7bit: u8) {
        self.bus_address = address7bit << 1;
    }

    /// Transaction address: the 7 bit address shifted left by one.
    pub fn bus_address(&self) -> u8 {
        self.bus_address
    }

    /// Change the full scale range, given in Newton. Only 5, 15 and 25 are
    /// accepted, anything else leaves the current range in place.
    ///
    /// Takes a plain number rather than a [`Scale`] so ranges read from
    /// configuration can be passed in directly and rejected here. Use
    /// [`Fma::set_scale`] when a [`Scale`] is already at hand.
    pub fn set_max_range(&mut self, newtons: u8) -> Result<(), ConfigError> {
        self.scale = Scale::try_from(newtons)?;
        Ok(())
    }

    pub fn set_scale(&mut self, scale: Scale) {
        self.scale = scale;
    }

    pub fn max_range(&self) -> Scale {
        self.scale
    }

    pub fn span(&self) -> TransferSpan {
        self.span
    }

    pub fn get_zero_offset(&self) -> f64 {
        self.zero_offset
    }

    /// Restore an offset from an earlier [`Fma::calibrate_zero`].
    pub fn set_zero_offset(&mut self, offset: f64) {
        self.zero_offset = offset;
    }

    fn uncompensated(&self, force_counts: u16) -> f64 {
        conversion::force_newtons(force_counts, self.span, self.scale)
    }

    fn compensated(&self, force_counts: u16) -> f64 {
        self.uncompensated(force_counts) - self.zero_offset
    }
}

use std::num::NonZeroU32;
use std::thread;
use std::time::Duration;

use fma_sensor::{Fma, Measurement};
use governor::{Quota, RateLimiter};
use linux_embedded_hal::I2cdev;
use tracing::{debug, warn};

pub fn run(sensor: &mut Fma<I2cdev>, interval: Duration, count: Option<u64>) {
    let quota = Quota::per_minute(NonZeroU32::new(6).expect("not zero"))
        .allow_burst(NonZeroU32::new(3).expect("not zero"));
    let err_report_limiter = RateLimiter::direct(quota);

    let mut printed = 0;
    while count.is_none_or(|count| printed < count) {
        match sensor.measure() {
            Ok(measurement) if measurement.status.is_normal() => {
                print_measurement(&measurement);
                printed += 1;
            }
            Ok(Measurement { status, .. }) => {
                debug!("skipping reading, sensor status: {status:?}");
            }
            Err(e) => {
                if err_report_limiter.check().is_ok() {
                    warn!("Could not read FMA sensor: {e}");
                }
            }
        }
        thread::sleep(interval);
    }
}

fn print_measurement(m: &Measurement) {
    println!("{:.4} N\t{:.1} °C", m.force, m.temperature);
}

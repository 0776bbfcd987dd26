use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use fma_sensor::{Fma, Scale, TransferSpan};
use linux_embedded_hal::{Delay, I2cdev};
use tracing::info;

mod poll;

#[derive(Parser)]
#[command(name = "fma reader")]
#[command(version = "1.0")]
#[command(about = "reads a Honeywell FMA force sensor attached to a linux i2c bus")]
struct Cli {
    /// i2c bus the sensor is connected to
    #[arg(short, long, default_value = "/dev/i2c-1")]
    bus: PathBuf,

    /// 7 bit address of the sensor, hex needs a 0x prefix
    #[arg(short, long, default_value = "0x28", value_parser = parse_address)]
    address: u8,

    /// full scale range of the part in Newton (5, 15 or 25)
    #[arg(short, long, default_value = "25", value_parser = parse_scale)]
    range: Scale,

    /// upper limit of the transfer function in percent (80 or 90)
    #[arg(short, long, default_value = "80", value_parser = parse_span)]
    span: TransferSpan,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print force and temperature until stopped
    Read {
        /// time between readings in milliseconds
        #[arg(short, long, default_value_t = 100)]
        interval: u64,

        /// stop after this many readings
        #[arg(short, long)]
        count: Option<u64>,

        /// run zero calibration before reading, make sure there is no load
        #[arg(short, long)]
        zero: bool,

        #[command(flatten)]
        calibration: CalibrationArgs,
    },
    /// Measure the zero offset without load and print it
    Calibrate {
        #[command(flatten)]
        calibration: CalibrationArgs,
    },
}

#[derive(clap::Args)]
struct CalibrationArgs {
    /// number of readings averaged into the zero offset
    #[arg(long, default_value_t = fma_sensor::DEFAULT_CALIBRATION_SAMPLES)]
    samples: u32,

    /// milliseconds to let the output settle between calibration readings
    #[arg(long, default_value_t = 10)]
    settle: u64,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    setup_tracing();

    let i2c = I2cdev::new(&cli.bus)
        .wrap_err_with(|| format!("Could not open i2c bus: {}", cli.bus.display()))?;
    let mut sensor = Fma::with_address(i2c, cli.range, cli.span, cli.address);
    info!(
        "reading FMA sensor at 0x{:02x} on {}",
        cli.address,
        cli.bus.display()
    );

    match cli.command {
        Command::Read {
            interval,
            count,
            zero,
            calibration,
        } => {
            if zero {
                calibrate(&mut sensor, &calibration)?;
            }
            poll::run(&mut sensor, Duration::from_millis(interval), count);
        }
        Command::Calibrate { calibration } => {
            let offset = calibrate(&mut sensor, &calibration)?;
            println!("{offset}");
        }
    }

    Ok(())
}

fn calibrate(sensor: &mut Fma<I2cdev>, args: &CalibrationArgs) -> Result<f64> {
    let offset = sensor
        .calibrate_zero(args.samples, &mut Delay, Duration::from_millis(args.settle))
        .wrap_err("Zero calibration failed")?;
    info!("zero offset is {offset:.4}N");
    Ok(offset)
}

fn setup_tracing() {
    use tracing::level_filters::LevelFilter;
    use tracing_error::ErrorLayer;
    use tracing_subscriber::{filter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let env_filter = filter::EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    let fmt = fmt::layer()
        .pretty()
        .with_writer(std::io::stderr) // stdout is for the readings
        .with_file(true)
        .with_line_number(true)
        .with_target(false)
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(fmt)
        .with(ErrorLayer::default())
        .init();
}

fn parse_address(arg: &str) -> Result<u8, String> {
    let address = match arg.strip_prefix("0x") {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => arg.parse(),
    }
    .map_err(|e| format!("not a valid address: {e}"))?;

    if address > 0x7F {
        return Err(format!("0x{address:02x} does not fit in 7 bits"));
    }
    Ok(address)
}

fn parse_scale(arg: &str) -> Result<Scale, String> {
    let newtons: u8 = arg.parse().map_err(|e| format!("{e}"))?;
    Scale::try_from(newtons).map_err(|e| e.to_string())
}

fn parse_span(arg: &str) -> Result<TransferSpan, String> {
    let percent: u8 = arg.trim_end_matches('%').parse().map_err(|e| format!("{e}"))?;
    TransferSpan::try_from(percent).map_err(|e| e.to_string())
}

//! Command-line options, logging setup and host timing constants.

use std::time::Duration;

use anyhow::ensure;
use clap::Parser;
use log::{LevelFilter, debug, info};

use crate::sensor::DEFAULT_REST_VOLTAGE;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Yield between scheduler passes. The scheduler decides when to draw.
pub const PASS_YIELD: Duration = Duration::from_millis(1);

/// Refresh period of the debug page and boot screen.
pub const SCREEN_REFRESH: Duration = Duration::from_millis(16);

/// How long the calibration summary stays on screen before the gauge starts.
pub const CALIBRATION_HOLD: Duration = Duration::from_millis(1200);

/// Virtual pressure change per Up/Down key press, in bar.
pub const PRESSURE_STEP_BAR: f32 = 0.05;

// =============================================================================
// Command Line
// =============================================================================

/// Boost/vacuum gauge simulator.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Opts {
    /// Log at info level
    #[arg(short, long)]
    pub verbose: bool,
    /// Log at debug level
    #[arg(short, long)]
    pub debug: bool,
    /// Log at trace level
    #[arg(short, long)]
    pub trace: bool,

    /// Read the virtual sensor through the ADC path instead of the sine sweep
    #[arg(long)]
    pub real: bool,

    /// Window pixel scale
    #[arg(long, default_value_t = 2)]
    pub scale: u32,

    /// Virtual sensor output at atmospheric pressure, in volts
    #[arg(long, default_value_t = DEFAULT_REST_VOLTAGE)]
    pub rest_voltage: f32,

    /// Uniform ADC noise amplitude, in counts
    #[arg(long, default_value_t = 3)]
    pub noise: u16,
}

impl Opts {
    /// Reject option combinations the simulator cannot honor.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!((1..=4).contains(&self.scale), "--scale must be between 1 and 4, got {}", self.scale);
        ensure!(
            (0.1..=3.2).contains(&self.rest_voltage),
            "--rest-voltage must be between 0.1 and 3.2 V, got {}",
            self.rest_voltage
        );
        ensure!(self.noise <= 100, "--noise must be at most 100 counts, got {}", self.noise);
        Ok(())
    }

    pub fn get_loglevel(&self) -> LevelFilter {
        if self.trace {
            LevelFilter::Trace
        } else if self.debug {
            LevelFilter::Debug
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }

    pub fn start_pgm(&self) {
        env_logger::Builder::new()
            .filter_module("boost_gauge_simulator", self.get_loglevel())
            .filter_module("boost_gauge_common", self.get_loglevel())
            .format_timestamp_secs()
            .init();
        info!("Starting up {} v{}...", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        debug!("Options: {self:?}");
    }
}

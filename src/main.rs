// Crate-level lints: Allow common embedded/graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive
#![allow(clippy::too_many_lines)] // main() is long but well-structured

//! Boost/vacuum gauge simulator.
//!
//! Runs the gauge pipeline from `boost_gauge_common` in an SDL window:
//! acquisition, clamping, smoothing, frame composition and presentation all
//! happen in one scheduler pass driven from this loop.
//!
//! # Acquisition Modes
//!
//! - **Simulated** (default): a sine sweep across the full psi range. The
//!   offset from the boot auto-zero is not applied.
//! - **Real** (`--real`): a virtual MAP sensor read through the 12-bit ADC path
//!   with noise, corrected by the boot auto-zero offset.
//!
//! Both modes auto-zero the virtual sensor on the calibration screen before
//! the scheduler starts.
//!
//! # Controls
//!
//! | Key | Action |
//! |-----|--------|
//! | `Up` / `Down` | Raise / lower the virtual manifold pressure (real mode) |
//! | `D` | Pull / reconnect the virtual sensor plug (real mode) |
//! | `Y` | Switch page (Gauge <-> Debug) |
//!
//! # Pages
//!
//! - **Gauge**: the 240x240 boost/vacuum dial, redrawn on every scheduler
//!   update (16 ms while the needle moves fast, 30 ms otherwise).
//! - **Debug**: frame timing, fault counters, calibration summary and the
//!   debug log terminal.

mod clock;
mod config;
mod display;
mod profiling;
mod screens;
mod sensor;
mod source;

use core::fmt::Write;
use std::thread;
use std::time::Instant;

use boost_gauge_common::profiling::DebugLog;
use boost_gauge_common::{AcquisitionMode, FrameComposer, GaugeScheduler, Page, Poll};
use clap::Parser;
use embedded_graphics_simulator::SimulatorEvent;
use embedded_graphics_simulator::sdl2::Keycode;
use heapless::String;
use log::{debug, info};

use crate::clock::MonotonicClock;
use crate::config::{Opts, PASS_YIELD, PRESSURE_STEP_BAR, SCREEN_REFRESH};
use crate::display::WindowPresenter;
use crate::profiling::ProfilingMetrics;
use crate::screens::{DebugView, draw_debug_page, run_calibration_screen};
use crate::sensor::VirtualSensor;
use crate::source::HostSignal;

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();
    opts.validate()?;
    opts.start_pgm();

    let mut composer = FrameComposer::new(WindowPresenter::new("Boost Gauge", opts.scale));
    let mut debug_log = DebugLog::new();
    debug_log.push("System started");

    // ==========================================================================
    // Acquisition Setup
    // ==========================================================================

    let mode = if opts.real { AcquisitionMode::Real } else { AcquisitionMode::Simulated };
    let mut sensor = VirtualSensor::new(opts.rest_voltage, opts.noise);
    let Some(calibration) = run_calibration_screen(&mut composer, &mut sensor, mode)? else {
        info!("Window closed during calibration");
        return Ok(());
    };
    debug_log.push("Calibration done");
    let source = HostSignal::new(mode, sensor, &calibration);

    info!("Acquisition mode: {}", mode.label());
    debug_log.push(if mode == AcquisitionMode::Real { "Mode: REAL" } else { "Mode: SIM" });

    let clock = MonotonicClock::new();
    let mut scheduler = GaugeScheduler::new(source, clock.now_ms());
    let mut metrics = ProfilingMetrics::new();
    let mut current_page = Page::default();
    let mut last_debug_draw: Option<Instant> = None;
    let mut page_just_switched = false;

    // ==========================================================================
    // Main Loop
    // ==========================================================================

    loop {
        // Key mapping:
        //   Up/Down - Virtual manifold pressure (real mode, key repeat allowed)
        //   D       - Pull/reconnect virtual sensor plug (real mode)
        //   Y       - Switch page (Gauge <-> Debug)
        for ev in composer.presenter_mut().events() {
            match ev {
                SimulatorEvent::Quit => {
                    info!("Window closed after {} frames", metrics.total_frames);
                    return Ok(());
                },
                SimulatorEvent::KeyDown { keycode, repeat, .. } => match keycode {
                    Keycode::Up | Keycode::Down => {
                        let delta = if keycode == Keycode::Up { PRESSURE_STEP_BAR } else { -PRESSURE_STEP_BAR };
                        if let Some(sensor) = scheduler.source_mut().sensor_mut() {
                            let target = sensor.nudge(delta);
                            debug!("Virtual pressure target: {target:.2} bar");
                            if !repeat {
                                let mut msg: String<24> = String::new();
                                let _ = write!(msg, "Target: {target:+.2} bar");
                                debug_log.push(&msg);
                            }
                        }
                    },
                    // Ignore OS key repeat to prevent toggle spam when holding keys
                    Keycode::D if !repeat => {
                        if let Some(sensor) = scheduler.source_mut().sensor_mut() {
                            let open = sensor.toggle_disconnect();
                            info!("Virtual sensor {}", if open { "disconnected" } else { "reconnected" });
                            debug_log.push(if open { "Sensor: unplugged" } else { "Sensor: plugged" });
                        }
                    },
                    Keycode::Y if !repeat => {
                        current_page = current_page.toggle();
                        page_just_switched = true;
                        last_debug_draw = None;
                        debug_log.push(match current_page {
                            Page::Gauge => "Page: Gauge",
                            Page::Debug => "Page: Debug",
                        });
                    },
                    _ => {},
                },
                _ => {},
            }
        }

        // ======================================================================
        // Scheduler Pass
        // ======================================================================

        let was_in_fault = scheduler.in_fault();
        let pass_start = Instant::now();
        let now_ms = clock.now_ms();

        let poll = match current_page {
            Page::Gauge => scheduler.run_pass(now_ms, &mut composer)?,
            Page::Debug => scheduler.poll(now_ms),
        };
        metrics.record_pass(&poll, pass_start.elapsed());

        if let Poll::Fault(err) = &poll
            && !was_in_fault
        {
            let mut msg: String<48> = String::new();
            let _ = write!(msg, "{err}");
            debug_log.push(&msg);
        } else if was_in_fault && !scheduler.in_fault() {
            debug_log.push("Sensor recovered");
        }

        // Back on the gauge with no fresh readout: redraw the last one so the
        // debug page does not linger while faulted
        if page_just_switched
            && current_page == Page::Gauge
            && !matches!(poll, Poll::Frame(_))
            && let Some(readout) = scheduler.last_readout().copied()
        {
            composer.compose(scheduler.geometry(), &readout);
            composer.present()?;
        }
        page_just_switched = false;

        // ======================================================================
        // Debug Page
        // ======================================================================

        if current_page == Page::Debug && last_debug_draw.is_none_or(|t| t.elapsed() >= SCREEN_REFRESH) {
            let sensor = match scheduler.source() {
                HostSignal::Real(signal) => {
                    let sensor = signal.adc();
                    Some((sensor.target_bar(), sensor.is_disconnected()))
                },
                HostSignal::Simulated(_) => None,
            };
            let view = DebugView {
                metrics: &metrics,
                log: &debug_log,
                calibration: &calibration,
                mode,
                interval_ms: scheduler.interval_ms(),
                fault_count: scheduler.fault_count(),
                in_fault: scheduler.in_fault(),
                readout: scheduler.last_readout(),
                sensor,
            };
            composer.render_with(|fb| draw_debug_page(fb, &view));
            composer.present()?;
            last_debug_draw = Some(Instant::now());
        }

        thread::sleep(PASS_YIELD);
    }
}

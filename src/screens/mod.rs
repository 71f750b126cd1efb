//! Screen modules for the calibration boot console and the debug view.
//!
//! # Boot Sequence
//!
//! 1. **Calibration Screen** ([`calibration`]): auto-zero progress and summary (real mode only)
//! 2. Gauge face (drawn by the scheduler in `main.rs`)
//!
//! # Runtime Screens
//!
//! - **Debug Page** ([`debug`]): frame timing, sensor state, calibration summary and the debug log terminal
//!   (toggled with `Y`)
//!
//! Boot screens return `None` if the window is closed, letting the
//! application exit without entering the main loop.

mod calibration;
mod debug;

pub use calibration::run_calibration_screen;
pub use debug::{DebugView, draw_debug_page};

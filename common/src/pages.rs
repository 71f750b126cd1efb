//! Page navigation between the gauge face and the diagnostics view.
//!
//! Press `Y` to toggle between pages.

/// Available pages.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Page {
    /// Boost/vacuum gauge face, redrawn on every scheduler update.
    #[default]
    Gauge,

    /// Update timing, sensor faults, calibration summary and the debug log.
    Debug,
}

impl Page {
    /// Toggle to the other page.
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Gauge => Self::Debug,
            Self::Debug => Self::Gauge,
        }
    }
}

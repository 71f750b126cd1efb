//! Acquisition source chosen at boot.

use boost_gauge_common::{
    AcquisitionMode,
    Calibration,
    Sample,
    SensorRangeError,
    SensorSignal,
    SignalSource,
    SimulatedSignal,
};

use crate::sensor::VirtualSensor;

/// Either the sine sweep or the virtual sensor read through the ADC path.
pub enum HostSignal {
    Simulated(SimulatedSignal),
    Real(SensorSignal<VirtualSensor>),
}

impl HostSignal {
    /// Source for `mode`, built after the boot auto-zero. The offset only
    /// applies to the sensor path; simulated mode drops the sensor.
    pub fn new(
        mode: AcquisitionMode,
        sensor: VirtualSensor,
        calibration: &Calibration,
    ) -> Self {
        match mode {
            AcquisitionMode::Simulated => Self::Simulated(SimulatedSignal::new()),
            AcquisitionMode::Real => Self::Real(SensorSignal::new(sensor, calibration.offset)),
        }
    }

    /// The virtual sensor, when running in real mode.
    pub fn sensor_mut(&mut self) -> Option<&mut VirtualSensor> {
        match self {
            Self::Simulated(_) => None,
            Self::Real(signal) => Some(signal.adc_mut()),
        }
    }
}

impl SignalSource for HostSignal {
    fn mode(&self) -> AcquisitionMode {
        match self {
            Self::Simulated(signal) => signal.mode(),
            Self::Real(signal) => signal.mode(),
        }
    }

    fn acquire(&mut self) -> Result<Sample, SensorRangeError> {
        match self {
            Self::Simulated(signal) => signal.acquire(),
            Self::Real(signal) => signal.acquire(),
        }
    }
}

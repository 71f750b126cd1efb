//! End-to-end scenarios: ADC counts in, composed and presented frames out.

use core::convert::Infallible;

use boost_gauge_common::colors::{BLACK, WHITE};
use boost_gauge_common::{
    AcquisitionMode, AdcSource, CalibrationOffset, FrameBuffer, FrameComposer, FramePresenter, GaugeScheduler, Poll,
    SensorSignal, SignalSource, SimulatedSignal, auto_zero,
};
use embedded_graphics::{pixelcolor::Rgb565, prelude::Point};
use embedded_hal::delay::DelayNs;

/// ADC whose output can be changed between passes.
struct SettableAdc {
    raw: u16,
    reads: usize,
}

impl SettableAdc {
    const fn new(raw: u16) -> Self { Self { raw, reads: 0 } }
}

impl AdcSource for SettableAdc {
    fn read_raw(&mut self) -> u16 {
        self.reads += 1;
        self.raw
    }
}

struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(
        &mut self,
        _ns: u32,
    ) {
    }
}

/// Keeps a copy of the hub pixel and counts presented frames.
#[derive(Default)]
struct RecordingPresenter {
    presented: u32,
    last_hub: Option<Rgb565>,
    last_corner: Option<Rgb565>,
}

impl FramePresenter for RecordingPresenter {
    type Error = Infallible;

    fn present(
        &mut self,
        frame: &FrameBuffer,
    ) -> Result<(), Self::Error> {
        self.presented += 1;
        self.last_hub = frame.pixel(Point::new(120, 120));
        self.last_corner = frame.pixel(Point::new(0, 0));
        Ok(())
    }
}

/// Presenter that always fails, to check error propagation.
struct BrokenPresenter;

impl FramePresenter for BrokenPresenter {
    type Error = &'static str;

    fn present(
        &mut self,
        _frame: &FrameBuffer,
    ) -> Result<(), Self::Error> {
        Err("bus error")
    }
}

#[test]
fn real_mode_mid_scale_without_offset_clamps_to_full_vacuum() {
    // 2048 counts -> 1.650V -> -0.425 bar -> x4 -> -1.70 -> clamped -1.0
    let mut signal = SensorSignal::new(SettableAdc::new(2048), CalibrationOffset::ZERO);
    let sample = signal.acquire().unwrap();
    assert!((sample.bar - -1.699).abs() < 0.01);

    let mut sched = GaugeScheduler::new(signal, 0);
    let mut composer = FrameComposer::new(RecordingPresenter::default());

    let Poll::Frame(readout) = sched.run_pass(30, &mut composer).unwrap() else {
        panic!("expected a frame");
    };
    assert_eq!(readout.bar, -1.0);
    assert!((readout.psi - -1.450_38).abs() < 1e-4);
    assert_eq!(readout.mode, AcquisitionMode::Real);
    assert_eq!(composer.presenter().presented, 1);
}

#[test]
fn real_mode_converges_to_full_vacuum() {
    let signal = SensorSignal::new(SettableAdc::new(2048), CalibrationOffset::ZERO);
    let mut sched = GaugeScheduler::new(signal, 0);
    let mut composer = FrameComposer::new(RecordingPresenter::default());

    let mut now = 0;
    for _ in 0..200 {
        now += 30;
        sched.run_pass(now, &mut composer).unwrap();
    }
    let psi = sched.smoother().value();
    assert!((psi - -14.5038).abs() < 0.01, "smoothed psi should settle at full vacuum, got {psi}");
}

#[test]
fn calibrated_sensor_reads_zero_at_rest() {
    let mut adc = SettableAdc::new(1241); // ~1.0V
    let cal = auto_zero(&mut adc, &mut NoopDelay);
    assert_eq!(adc.reads, 512);

    let mut signal = SensorSignal::new(adc, cal.offset);
    let sample = signal.acquire().unwrap();
    assert!(sample.bar.abs() < 1e-5, "rest reading should be zero bar, got {}", sample.bar);
}

#[test]
fn simulated_peak_clamps_to_bar_max() {
    let mut sched = GaugeScheduler::new(SimulatedSignal::new(), 0);
    let mut max_bar = f32::MIN;
    let mut now = 0;
    // Half a period of the 0.02 rad/step sine
    for _ in 0..160 {
        now += 30;
        if let Poll::Frame(readout) = sched.poll(now) {
            max_bar = max_bar.max(readout.bar);
            assert_eq!(readout.mode, AcquisitionMode::Simulated);
            assert!((readout.volts - 1.65).abs() < 1e-6);
        }
    }
    assert!((max_bar - 1.1).abs() < 1e-6, "simulated peak should clamp to 1.1 bar, got {max_bar}");
}

#[test]
fn disconnected_sensor_skips_frames_and_recovers() {
    let signal = SensorSignal::new(SettableAdc::new(2048), CalibrationOffset::ZERO);
    let mut sched = GaugeScheduler::new(signal, 0);
    let mut composer = FrameComposer::new(RecordingPresenter::default());

    sched.run_pass(30, &mut composer).unwrap();
    let smoothed = sched.smoother().value();
    assert_eq!(composer.presenter().presented, 1);

    // ~0.05V: disconnected
    sched.source_mut().adc_mut().raw = 62;
    for now in [60, 61, 62] {
        let poll = sched.run_pass(now, &mut composer).unwrap();
        assert!(matches!(poll, Poll::Fault(err) if (err.volts - 0.05).abs() < 0.001));
    }
    assert_eq!(composer.presenter().presented, 1, "faulted passes must not present");
    assert_eq!(sched.smoother().value(), smoothed);
    assert_eq!(sched.last_update_ms(), 30);
    assert_eq!(sched.fault_count(), 3);

    // Reconnect: the very next pass draws
    sched.source_mut().adc_mut().raw = 2048;
    assert!(matches!(sched.run_pass(63, &mut composer).unwrap(), Poll::Frame(_)));
    assert_eq!(composer.presenter().presented, 2);
    assert!(!sched.in_fault());
}

#[test]
fn presented_frame_has_white_hub_and_black_background() {
    let mut sched = GaugeScheduler::new(SimulatedSignal::new(), 0);
    let mut composer = FrameComposer::new(RecordingPresenter::default());
    sched.run_pass(30, &mut composer).unwrap();

    assert_eq!(composer.presenter().last_hub, Some(WHITE));
    assert_eq!(composer.presenter().last_corner, Some(BLACK));
}

#[test]
fn presenter_errors_propagate() {
    let mut sched = GaugeScheduler::new(SimulatedSignal::new(), 0);
    let mut composer = FrameComposer::new(BrokenPresenter);

    assert_eq!(sched.run_pass(10, &mut composer), Ok(Poll::Idle), "idle passes never present");
    assert_eq!(sched.run_pass(30, &mut composer), Err("bus error"));
}

#[test]
fn small_changes_keep_slow_interval() {
    let mut sched = GaugeScheduler::new(SimulatedSignal::new(), 0);
    assert_eq!(sched.interval_ms(), 30);

    // Simulated sweep starts near zero: small steps stay on the slow interval
    let now = 30;
    assert!(matches!(sched.poll(now), Poll::Frame(_)));
    assert_eq!(sched.interval_ms(), 30);

    assert_eq!(sched.poll(now + 29), Poll::Idle);
    assert!(matches!(sched.poll(now + 30), Poll::Frame(_)));
}

use std::time::Duration;

use dimmer_core::mocks::{LineEvent, RecordingLine, RecordingTimer};
use dimmer_core::{BoxedDimmer, DimmerState, PowerLimits, PowerState, TimingCfg};
use dimmer_traits::MonotonicClock;
use rstest::rstest;

fn built() -> (BoxedDimmer, RecordingTimer, RecordingLine) {
    let timer = RecordingTimer::new();
    let line = RecordingLine::new();
    let dimmer = BoxedDimmer::builder()
        .with_trigger(line.clone())
        .with_timer(timer.clone())
        .with_clock(MonotonicClock::new())
        .build()
        .expect("dimmer build");
    (dimmer, timer, line)
}

#[rstest]
fn starts_off_and_ignores_zero_crossings() {
    let (dimmer, timer, _line) = built();
    let (controller, mut zero_cross, _pulse) = dimmer.split();

    assert_eq!(controller.power_state(), PowerState::Off);

    for _ in 0..5 {
        zero_cross.on_zero_cross();
    }
    assert_eq!(timer.arm_count(), 0);
}

#[rstest]
#[case(100, 500)]
#[case(50, 4750)]
#[case(20, 7300)]
fn edge_arms_with_the_committed_delay(#[case] power: i32, #[case] expect_us: u64) {
    let (dimmer, timer, _line) = built();
    let (controller, mut zero_cross, _pulse) = dimmer.split();

    controller.set_power(power);
    zero_cross.on_zero_cross();

    assert_eq!(timer.armed(), vec![Duration::from_micros(expect_us)]);
}

#[rstest]
fn below_minimum_requests_clamp_up() {
    let (dimmer, timer, _line) = built();
    let (controller, mut zero_cross, _pulse) = dimmer.split();

    // Default limits floor nonzero requests at 20%.
    controller.set_power(10);
    assert_eq!(
        controller.power_state(),
        PowerState::On {
            percent: 20,
            delay_us: 7300
        }
    );

    zero_cross.on_zero_cross();
    assert_eq!(timer.last_armed(), Some(Duration::from_micros(7300)));
}

#[rstest]
#[case(0)]
#[case(-1)]
#[case(i32::MIN)]
fn nonpositive_requests_turn_off(#[case] request: i32) {
    let (dimmer, timer, _line) = built();
    let (controller, mut zero_cross, _pulse) = dimmer.split();

    controller.set_power(75);
    controller.set_power(request);
    assert_eq!(controller.power_state(), PowerState::Off);
    assert_eq!(controller.state(), DimmerState::off(10_000));

    zero_cross.on_zero_cross();
    assert_eq!(timer.arm_count(), 0);
}

#[rstest]
fn above_maximum_requests_clamp_down() {
    let (dimmer, _timer, _line) = built();
    let (controller, _zero_cross, _pulse) = dimmer.split();

    controller.set_power(250);
    assert_eq!(
        controller.power_state(),
        PowerState::On {
            percent: 100,
            delay_us: 500
        }
    );
}

#[rstest]
fn each_edge_rearms_with_the_latest_power() {
    let (dimmer, timer, _line) = built();
    let (controller, mut zero_cross, _pulse) = dimmer.split();

    controller.set_power(100);
    zero_cross.on_zero_cross();
    controller.set_power(50);
    zero_cross.on_zero_cross();
    zero_cross.on_zero_cross();

    assert_eq!(
        timer.armed(),
        vec![
            Duration::from_micros(500),
            Duration::from_micros(4750),
            Duration::from_micros(4750),
        ]
    );
}

#[rstest]
fn power_change_has_no_effect_until_the_next_edge() {
    let (dimmer, timer, _line) = built();
    let (controller, mut zero_cross, _pulse) = dimmer.split();

    controller.set_power(100);
    zero_cross.on_zero_cross();
    assert_eq!(timer.arm_count(), 1);

    // A new request between edges commits state but arms nothing.
    controller.set_power(50);
    assert_eq!(timer.arm_count(), 1);

    zero_cross.on_zero_cross();
    assert_eq!(timer.last_armed(), Some(Duration::from_micros(4750)));
}

#[rstest]
fn timer_fire_emits_one_full_pulse() {
    let (dimmer, _timer, line) = built();
    let (controller, mut zero_cross, mut pulse) = dimmer.split();

    controller.set_power(50);
    zero_cross.on_zero_cross();
    pulse.on_timer_fire();

    assert_eq!(line.events(), vec![LineEvent::Active, LineEvent::Inactive]);

    pulse.on_timer_fire();
    assert_eq!(
        line.events(),
        vec![
            LineEvent::Active,
            LineEvent::Inactive,
            LineEvent::Active,
            LineEvent::Inactive,
        ]
    );
}

#[rstest]
fn pulse_holds_the_line_for_the_configured_width() {
    use dimmer_core::build_dimmer;
    use dimmer_traits::Clock;
    use std::sync::{Arc, Mutex};
    use std::time::Instant;

    // Clock spy: records every busy-wait instead of spinning.
    #[derive(Clone, Default)]
    struct SpyClock {
        waits: Arc<Mutex<Vec<Duration>>>,
    }
    impl Clock for SpyClock {
        fn now(&self) -> Instant {
            Instant::now()
        }
        fn busy_wait(&self, d: Duration) {
            if let Ok(mut v) = self.waits.lock() {
                v.push(d);
            }
        }
    }

    let line = RecordingLine::new();
    let clock = SpyClock::default();
    let timing = TimingCfg {
        pulse_width_us: 80,
        ..TimingCfg::default()
    };
    let dimmer = build_dimmer(
        line.clone(),
        RecordingTimer::new(),
        clock.clone(),
        timing,
        PowerLimits::default(),
    )
    .expect("dimmer build");
    let (_controller, _zero_cross, mut pulse) = dimmer.split();

    assert_eq!(pulse.pulse_width(), Duration::from_micros(80));
    pulse.on_timer_fire();

    // The wait happens between the two line transitions.
    assert_eq!(line.events(), vec![LineEvent::Active, LineEvent::Inactive]);
    let waits = clock.waits.lock().expect("waits");
    assert_eq!(*waits, vec![Duration::from_micros(80)]);
}

#[rstest]
fn set_power_is_idempotent() {
    let (dimmer, _timer, _line) = built();
    let (controller, _zero_cross, _pulse) = dimmer.split();

    controller.set_power(60);
    let first = controller.state();
    controller.set_power(60);
    assert_eq!(controller.state(), first);
}

#[rstest]
fn sixty_hertz_uses_the_shorter_half_cycle() {
    let timer = RecordingTimer::new();
    let dimmer = BoxedDimmer::builder()
        .with_trigger(RecordingLine::new())
        .with_timer(timer.clone())
        .with_timing(TimingCfg {
            mains_hz: 60,
            pulse_width_us: 50,
            min_delay_us: 500,
            max_delay_us: 8000,
        })
        .build()
        .expect("dimmer build");
    let (controller, mut zero_cross, _pulse) = dimmer.split();

    assert_eq!(zero_cross.half_cycle_us(), 8_333);
    assert_eq!(controller.state(), DimmerState::off(8_333));

    controller.set_power(100);
    zero_cross.on_zero_cross();
    assert_eq!(timer.last_armed(), Some(Duration::from_micros(500)));
}

#[rstest]
#[case(TimingCfg { mains_hz: 55, ..TimingCfg::default() })]
#[case(TimingCfg { min_delay_us: 0, ..TimingCfg::default() })]
#[case(TimingCfg { min_delay_us: 9000, max_delay_us: 9000, ..TimingCfg::default() })]
#[case(TimingCfg { max_delay_us: 10_000, ..TimingCfg::default() })]
#[case(TimingCfg { pulse_width_us: 0, ..TimingCfg::default() })]
#[case(TimingCfg { max_delay_us: 9_990, pulse_width_us: 50, ..TimingCfg::default() })]
fn invalid_timing_is_rejected(#[case] timing: TimingCfg) {
    let result = BoxedDimmer::builder()
        .with_trigger(RecordingLine::new())
        .with_timer(RecordingTimer::new())
        .with_timing(timing)
        .build();
    assert!(result.is_err());
}

#[rstest]
#[case(PowerLimits { min_percent: 80, max_percent: 80 })]
#[case(PowerLimits { min_percent: 20, max_percent: 101 })]
fn invalid_limits_are_rejected(#[case] limits: PowerLimits) {
    let result = BoxedDimmer::builder()
        .with_trigger(RecordingLine::new())
        .with_timer(RecordingTimer::new())
        .with_limits(limits)
        .build();
    assert!(result.is_err());
}

#[rstest]
fn missing_timer_fails_try_build() {
    let result = BoxedDimmer::builder()
        .with_trigger(RecordingLine::new())
        .try_build();
    let err = result.err().expect("should fail");
    assert!(format!("{err}").contains("one-shot timer"));
}

//! Dimmer assembly and the run / demo / self-check subcommands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use dimmer_core::{FirePulse, PowerLimits, SpeedController, TimingCfg, build_dimmer};
use dimmer_hardware::{SimulatedLineProbe, ThreadOneShot};
use dimmer_traits::{MonotonicClock, TriggerLine};

use crate::cli::{RtArgs, RtLock};
use crate::rt::setup_rt_once;

type CliPulse = FirePulse<Box<dyn TriggerLine + Send>, MonotonicClock>;

/// The assembled dimmer: the control handle, an optional observer for the
/// simulated gate line, and the owned edge source. Dropping the rig tears
/// down the edge source first, then the timer thread.
pub struct DimmerRig {
    pub controller: SpeedController,
    pub probe: Option<SimulatedLineProbe>,
    #[cfg(not(feature = "hardware"))]
    _edges: dimmer_hardware::ZeroCrossTicker,
    #[cfg(feature = "hardware")]
    _edges: dimmer_hardware::gpio::ZeroCrossInput,
}

/// Wire the three execution contexts: the timer thread runs the pulse, the
/// edge source drives the zero-cross handler, and the controller stays here.
pub fn assemble(cfg: &dimmer_config::Config) -> dimmer_core::Result<DimmerRig> {
    let timing = TimingCfg::from(&cfg.timing);
    let limits = PowerLimits::from(&cfg.power);

    // The pulse handle comes out of the builder, but the timer thread has to
    // exist before the builder runs; hand the pulse over through a slot that
    // only the timer thread reads after assembly.
    let slot: Arc<Mutex<Option<CliPulse>>> = Arc::new(Mutex::new(None));
    let fire_slot = Arc::clone(&slot);
    let timer = ThreadOneShot::spawn(move || {
        if let Ok(mut guard) = fire_slot.lock()
            && let Some(pulse) = guard.as_mut()
        {
            pulse.on_timer_fire();
        }
    });

    #[cfg(feature = "hardware")]
    let (line, probe): (Box<dyn TriggerLine + Send>, Option<SimulatedLineProbe>) = (
        Box::new(dimmer_hardware::gpio::GpioTriggerLine::new(
            cfg.pins.triac_trigger,
        )?),
        None,
    );
    #[cfg(not(feature = "hardware"))]
    let (line, probe): (Box<dyn TriggerLine + Send>, Option<SimulatedLineProbe>) = {
        let line = dimmer_hardware::SimulatedTriggerLine::new();
        let probe = line.probe();
        (Box::new(line), Some(probe))
    };

    let dimmer = build_dimmer(line, timer, MonotonicClock::new(), timing, limits)?;
    let (controller, mut zero_cross, pulse) = dimmer.split();
    if let Ok(mut guard) = slot.lock() {
        *guard = Some(pulse);
    }

    #[cfg(feature = "hardware")]
    let edges =
        dimmer_hardware::gpio::ZeroCrossInput::new(cfg.pins.zero_cross, move || {
            zero_cross.on_zero_cross()
        })?;
    #[cfg(not(feature = "hardware"))]
    let edges = {
        tracing::info!(
            half_cycle_us = timing.half_cycle_us(),
            "no hardware backend, simulating zero-crossings"
        );
        dimmer_hardware::ZeroCrossTicker::spawn(timing.half_cycle_us(), move || {
            zero_cross.on_zero_cross()
        })
    };

    Ok(DimmerRig {
        controller,
        probe,
        _edges: edges,
    })
}

fn apply_rt(rt: RtArgs) {
    #[cfg(target_os = "linux")]
    {
        let mode = rt.rt_lock.unwrap_or(RtLock::os_default());
        setup_rt_once(rt.rt, rt.rt_prio, mode, rt.rt_cpu);
    }
    #[cfg(target_os = "macos")]
    {
        let mode = rt.rt_lock.unwrap_or(RtLock::os_default());
        let _ = (rt.rt_prio, rt.rt_cpu);
        setup_rt_once(rt.rt, mode);
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    let _ = rt;
}

/// Sleep out `hold`, waking early on shutdown. Returns false on shutdown.
/// A `hold` too large for the clock (e.g. `Duration::MAX`) means forever.
fn hold_level(hold: Duration, shutdown: &AtomicBool) -> bool {
    let deadline = Instant::now().checked_add(hold);
    loop {
        if shutdown.load(Ordering::Relaxed) {
            return false;
        }
        match deadline {
            Some(d) => {
                let now = Instant::now();
                if now >= d {
                    return true;
                }
                std::thread::sleep((d - now).min(Duration::from_millis(50)));
            }
            None => std::thread::sleep(Duration::from_millis(50)),
        }
    }
}

fn print_pulse_stats(probe: &SimulatedLineProbe, since: u64) {
    println!("pulses emitted: {}", probe.pulse_count() - since);
}

/// `run`: hold one power level until Ctrl-C or the optional duration elapses.
pub fn run_fixed(
    cfg: &dimmer_config::Config,
    power: Option<i32>,
    duration_s: Option<u64>,
    rt: RtArgs,
    stats: bool,
    shutdown: Arc<AtomicBool>,
) -> dimmer_core::Result<()> {
    apply_rt(rt);
    let rig = assemble(cfg)?;

    let level = power.unwrap_or(i32::from(cfg.power.default_percent));
    rig.controller.set_power(level);

    let hold = duration_s.map_or(Duration::MAX, Duration::from_secs);
    hold_level(hold, &shutdown);

    rig.controller.set_power(0);
    if stats && let Some(probe) = &rig.probe {
        print_pulse_stats(probe, 0);
    }
    println!("run complete");
    Ok(())
}

/// `demo`: cycle through the configured power levels until Ctrl-C.
pub fn run_demo(
    cfg: &dimmer_config::Config,
    rt: RtArgs,
    stats: bool,
    shutdown: Arc<AtomicBool>,
) -> dimmer_core::Result<()> {
    apply_rt(rt);
    let rig = assemble(cfg)?;

    let hold = Duration::from_millis(cfg.demo.hold_ms);
    tracing::info!(levels = ?cfg.demo.speeds, hold_ms = cfg.demo.hold_ms, "demo start");

    'demo: loop {
        for &level in &cfg.demo.speeds {
            let before = rig.probe.as_ref().map_or(0, SimulatedLineProbe::pulse_count);
            rig.controller.set_power(i32::from(level));
            println!("level: {level}%");
            if !hold_level(hold, &shutdown) {
                break 'demo;
            }
            if stats && let Some(probe) = &rig.probe {
                print_pulse_stats(probe, before);
            }
        }
    }

    rig.controller.set_power(0);
    println!("demo complete");
    Ok(())
}

/// `self-check`: assemble the backends and, in simulation, verify that
/// pulses actually come out of the gate line.
pub fn self_check(cfg: &dimmer_config::Config) -> dimmer_core::Result<()> {
    let rig = assemble(cfg)?;

    rig.controller.set_power(i32::from(cfg.power.default_percent));
    std::thread::sleep(Duration::from_millis(100));
    rig.controller.set_power(0);

    if let Some(probe) = &rig.probe {
        let pulses = probe.pulse_count();
        if pulses == 0 {
            eyre::bail!("self-check: no pulses observed on the simulated line");
        }
        println!("self-check ok ({pulses} pulses observed)");
    } else {
        println!("self-check ok (hardware initialized)");
    }
    Ok(())
}

use anyhow::{Context, Result};
use gesture_core::{
    run_simulated, CentroidMode, Channel, CurveKey, NoiseMode, RealtimeDriver, Session,
    SlicePlacement, TrackedPointSource,
};
use log::*;
use std::path::PathBuf;
use std::time::Duration;
use structopt::StructOpt;

mod config;
mod hand;
mod report;

use hand::{Gesture, SyntheticHand};

#[derive(Debug, StructOpt)]
#[structopt(
    name = "physical-vfx",
    about = "records a tracked hand gesture and turns it into particle curves"
)]
struct Opt {
    /// TOML file with [recorder] and [hand] tables
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,

    /// still, swipe, spread or swirl
    #[structopt(short, long)]
    gesture: Option<Gesture>,

    #[structopt(long)]
    seed: Option<u64>,

    #[structopt(long)]
    recording_length: Option<f32>,

    #[structopt(long)]
    tick_interval: Option<f32>,

    #[structopt(long)]
    pre_roll: Option<u32>,

    #[structopt(long)]
    size_node: Option<usize>,

    #[structopt(short, long)]
    slices: Option<usize>,

    #[structopt(long)]
    no_velocity: bool,

    #[structopt(long)]
    no_size: bool,

    #[structopt(long)]
    no_noise: bool,

    /// Divide the tracked point sum by the point count instead of count - 1
    #[structopt(long)]
    true_mean: bool,

    /// Index the position series by the neighbour index difference for noise
    #[structopt(long)]
    index_parity_noise: bool,

    /// Truncate len / slices before placing slices
    #[structopt(long)]
    truncated_slices: bool,

    /// Run against the wall clock instead of simulated time
    #[structopt(long)]
    realtime: bool,

    /// Print each recorded tick
    #[structopt(long)]
    dump_series: bool,

    /// Print the interleaved float buffer of each curve
    #[structopt(long)]
    raw_floats: bool,

    /// Print the effective config as TOML and exit without recording
    #[structopt(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let opt = Opt::from_args();

    let mut config = match &opt.config {
        Some(path) => config::load(path)?,
        None => config::Config::default(),
    };
    apply_overrides(&opt, &mut config);
    if opt.print_config {
        print!("{}", config::render(&config)?);
        return Ok(());
    }

    let settings = config.recorder.clone();
    let mut source = SyntheticHand::new(config.hand.clone(), settings.tick_interval_sec);
    info!(
        "[hand] {:?} gesture with {} tracked point(s): {}",
        config.hand.gesture,
        source.point_count(),
        source.labels().join(", ")
    );

    let mut session = Session::new(settings, source.point_count())
        .context("cannot record with these settings")?;
    let mut emitted = 0usize;
    let mut sink = |channel: Channel, keys: &[CurveKey]| -> gesture_core::Result<()> {
        debug!("[sink] {} <- {} key(s)", channel.name(), keys.len());
        emitted += keys.len();
        Ok(())
    };

    if opt.realtime {
        let driver = RealtimeDriver {
            poll_interval: Duration::from_millis(5),
            max_duration: None,
        };
        driver.run(&mut session, &mut source, &mut sink)?;
    } else {
        let took = run_simulated(&mut session, &mut source, &mut sink, 0.05)?;
        info!("[session] simulated {:.2}s", took);
    }
    info!("[sink] {} key(s) emitted", emitted);

    if opt.dump_series {
        if let Some(series) = session.series() {
            report::print_series(series);
        }
    }
    if let Some(curves) = session.curves() {
        report::print_curves(curves, opt.raw_floats);
    }
    report::print_profile(session.profile());
    Ok(())
}

fn apply_overrides(opt: &Opt, config: &mut config::Config) {
    let r = &mut config.recorder;
    if let Some(g) = opt.gesture {
        config.hand.gesture = g;
    }
    if let Some(seed) = opt.seed {
        config.hand.seed = seed;
    }
    if let Some(v) = opt.recording_length {
        r.recording_length_sec = v;
    }
    if let Some(v) = opt.tick_interval {
        r.tick_interval_sec = v;
    }
    if let Some(v) = opt.pre_roll {
        r.pre_roll_seconds = v;
    }
    if let Some(v) = opt.size_node {
        r.size_node_index = v;
    }
    if let Some(v) = opt.slices {
        r.interpolation_slices = v;
    }
    r.channels.velocity &= !opt.no_velocity;
    r.channels.size &= !opt.no_size;
    r.channels.noise &= !opt.no_noise;
    if opt.true_mean {
        r.centroid_mode = CentroidMode::TrueMean;
    }
    if opt.index_parity_noise {
        r.noise_mode = NoiseMode::IndexParity;
    }
    if opt.truncated_slices {
        r.slice_placement = SlicePlacement::Truncated;
    }
}

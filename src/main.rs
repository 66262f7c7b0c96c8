//! Command-line entry point: open a backdrop window or render a snapshot.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use driftlight::{Backdrop, BackdropConfig, BackdropError, Preset};

/// Refresh interval used when rendering snapshots.
const SNAPSHOT_FRAME_MS: f64 = 1000.0 / 60.0;

#[derive(Parser)]
#[command(name = "driftlight")]
#[command(about = "Animated particle backdrops", long_about = None)]
#[command(version)]
struct Cli {
    /// Built-in look to start from
    #[arg(long, value_enum, default_value_t = Preset::Classic)]
    preset: Preset,

    /// Load the configuration from a JSON file instead of a preset
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Write the resolved configuration to a JSON file and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// RNG seed for a reproducible layout
    #[arg(long)]
    seed: Option<u64>,

    /// Number of particles, overriding the width-based default
    #[arg(long)]
    count: Option<usize>,

    /// Render headlessly and save the final frame as PNG
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Frames to simulate for a snapshot
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Surface size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    size: Option<(u32, u32)>,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("invalid width '{}'", w))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("invalid height '{}'", h))?;
    if w == 0 || h == 0 {
        return Err("size must be non-zero".into());
    }
    Ok((w, h))
}

fn resolve_config(cli: &Cli) -> Result<BackdropConfig, BackdropError> {
    let mut config = match &cli.config {
        Some(path) => BackdropConfig::load(path)?,
        None => BackdropConfig::from_preset(cli.preset),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.count.is_some() {
        config.particle_count = cli.count;
    }
    if let Some((w, h)) = cli.size {
        config.window_width = w;
        config.window_height = h;
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), BackdropError> {
    let config = resolve_config(&cli)?;

    if let Some(path) = &cli.write_config {
        config.save(path)?;
        log::info!("wrote config to {}", path.display());
        return Ok(());
    }

    let (width, height) = (config.window_width, config.window_height);
    let backdrop = Backdrop::from_config(config);

    match &cli.snapshot {
        Some(path) => {
            if let Some(image) = backdrop.render_snapshot(width, height, cli.frames, SNAPSHOT_FRAME_MS) {
                image.save(path)?;
                log::info!("saved {}x{} snapshot after {} frames to {}", width, height, cli.frames, path.display());
            }
            Ok(())
        }
        None => backdrop.run(),
    }
}

/// Logger level requested on the command line, if any overrides `RUST_LOG`.
fn log_level(verbose: u8, quiet: bool) -> Option<log::LevelFilter> {
    match verbose {
        0 if quiet => Some(log::LevelFilter::Error),
        0 => None,
        1 => Some(log::LevelFilter::Info),
        2 => Some(log::LevelFilter::Debug),
        _ => Some(log::LevelFilter::Trace),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = log_level(cli.verbose, cli.quiet) {
        logger.filter_level(level);
    }
    logger.init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("640x480"), Ok((640, 480)));
        assert_eq!(parse_size("10X20"), Ok((10, 20)));
        assert!(parse_size("640").is_err());
        assert!(parse_size("0x480").is_err());
        assert!(parse_size("ax480").is_err());
    }

    #[test]
    fn test_log_level_from_flags() {
        assert_eq!(log_level(0, false), None);
        assert_eq!(log_level(0, true), Some(log::LevelFilter::Error));
        assert_eq!(log_level(1, false), Some(log::LevelFilter::Info));
        assert_eq!(log_level(2, true), Some(log::LevelFilter::Debug));
        assert_eq!(log_level(5, false), Some(log::LevelFilter::Trace));
    }

    #[test]
    fn test_verbose_flag_enables_logger_level() {
        let cli = Cli::parse_from(["driftlight", "-v"]);
        let mut builder = env_logger::Builder::new();
        builder.parse_filters("warn");
        if let Some(level) = log_level(cli.verbose, cli.quiet) {
            builder.filter_level(level);
        }
        let logger = builder.build();

        let info = log::Metadata::builder().level(log::Level::Info).target("driftlight").build();
        let debug = log::Metadata::builder().level(log::Level::Debug).target("driftlight").build();
        assert!(log::Log::enabled(&logger, &info));
        assert!(!log::Log::enabled(&logger, &debug));
    }

    #[test]
    fn test_cli_overrides_preset() {
        let cli = Cli::parse_from(["driftlight", "--preset", "physics", "--seed", "3", "--count", "12", "--size", "320x200"]);
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config, {
            let mut expected = BackdropConfig::from_preset(Preset::Physics);
            expected.seed = Some(3);
            expected.particle_count = Some(12);
            expected.window_width = 320;
            expected.window_height = 200;
            expected
        });
    }
}

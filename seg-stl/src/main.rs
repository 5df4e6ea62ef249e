//! Convert a SynthSeg/FreeSurfer-style label map into two hemisphere STLs.
//!
//! ```text
//! seg-stl --nii seg.nii.gz
//! ```
//!
//! writes `seg_left.stl` and `seg_right.stl` next to the input. Label
//! defaults follow the FreeSurfer lookup table: 2/3 are left white
//! matter + cortex, 41/42 the right-hand counterparts.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use seg_stl::{convert_hemisphere, hemisphere_output_paths, PipelineOptions};
use tracing_subscriber::EnvFilter;
use volume_nifti::load_label_volume;

/// Convert a segmentation label map to left/right hemisphere STL surfaces.
#[derive(Parser)]
#[command(name = "seg-stl")]
#[command(about = "Convert a brain segmentation label map to hemisphere STLs", long_about = None)]
#[command(version)]
struct Cli {
    /// Input segmentation volume (.nii or .nii.gz)
    #[arg(long)]
    nii: PathBuf,

    /// Labels composing the LEFT surface (default: left WM + cortex)
    #[arg(long, num_args = 1.., default_values_t = [2, 3])]
    left_labels: Vec<i32>,

    /// Labels composing the RIGHT surface (default: right WM + cortex)
    #[arg(long, num_args = 1.., default_values_t = [41, 42])]
    right_labels: Vec<i32>,

    /// Downsample factor; use 2 or 3 for a smoother, less detailed STL
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    downsample: u32,

    /// Uniform scale applied to the exported geometry
    #[arg(long, default_value_t = 0.125)]
    scale: f64,

    /// Humphrey smoothing iterations; 0 disables smoothing
    #[arg(long, default_value_t = 25)]
    smooth_iters: u32,

    /// Keep only the largest connected component (the default)
    #[arg(long)]
    keep_largest: bool,

    /// Keep small disconnected islands instead of removing them
    #[arg(long)]
    no_keep_largest: bool,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Largest-component filtering defaults to on; an explicit
/// `--keep-largest` beats `--no-keep-largest` when both are given.
const fn resolve_keep_largest(keep: bool, no_keep: bool) -> bool {
    if keep {
        true
    } else {
        !no_keep
    }
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let volume = load_label_volume(&cli.nii)
        .with_context(|| format!("loading '{}'", cli.nii.display()))?;

    let options = PipelineOptions {
        downsample: cli.downsample,
        keep_largest: resolve_keep_largest(cli.keep_largest, cli.no_keep_largest),
        smooth_iterations: cli.smooth_iters,
        scale: cli.scale,
    };

    let (out_left, out_right) = hemisphere_output_paths(&cli.nii);
    if let Some(dir) = out_left.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory '{}'", dir.display()))?;
    }

    convert_hemisphere(&volume, &cli.left_labels, &options, &out_left)
        .context("left hemisphere")?;
    println!("Wrote: {}", out_left.display());

    convert_hemisphere(&volume, &cli.right_labels, &options, &out_right)
        .context("right hemisphere")?;
    println!("Wrote: {}", out_right.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keep_largest_defaults_on() {
        assert!(resolve_keep_largest(false, false));
    }

    #[test]
    fn no_keep_largest_disables() {
        assert!(!resolve_keep_largest(false, true));
    }

    #[test]
    fn keep_largest_wins_when_both_given() {
        assert!(resolve_keep_largest(true, true));
    }

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["seg-stl", "--nii", "seg.nii"]);
        assert_eq!(cli.left_labels, vec![2, 3]);
        assert_eq!(cli.right_labels, vec![41, 42]);
        assert_eq!(cli.downsample, 1);
        assert!((cli.scale - 0.125).abs() < f64::EPSILON);
        assert_eq!(cli.smooth_iters, 25);
        assert!(!cli.keep_largest);
        assert!(!cli.no_keep_largest);
    }

    #[test]
    fn cli_parses_label_lists() {
        let cli = Cli::parse_from([
            "seg-stl",
            "--nii",
            "seg.nii",
            "--left-labels",
            "2",
            "3",
            "17",
            "--no-keep-largest",
        ]);
        assert_eq!(cli.left_labels, vec![2, 3, 17]);
        assert!(cli.no_keep_largest);
    }
}

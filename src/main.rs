//! Command-line front end for the planning engine.
//!
//! Loads a JSON site list, derives every site's plan, and prints a summary.
//! With `--interference` it also evaluates the map-wide interference grid
//! and writes the samples as JSON lines to stdout, ready for an overlay
//! renderer. All file I/O lives here; the engine itself does none.

#![forbid(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use cellplan::{compute_site_coverage, interference_grid, GridSpec, NetworkStats, Site};

#[derive(Debug, Parser)]
#[command(name = "cellplan", about = "Cellular coverage and interference planner")]
struct Args {
    /// JSON file holding an array of site configurations.
    sites: PathBuf,

    /// Also compute the map-wide interference grid and print its samples
    /// as JSON lines.
    #[arg(long)]
    interference: bool,

    /// Interference rings per site.
    #[arg(long, default_value_t = GridSpec::default().rings)]
    rings: u32,

    /// Interference sample points per ring.
    #[arg(long, default_value_t = GridSpec::default().points_per_ring)]
    points_per_ring: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.sites)
        .with_context(|| format!("reading {}", args.sites.display()))?;
    let sites: Vec<Site> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.sites.display()))?;

    let mut planned = Vec::with_capacity(sites.len());
    for site in sites {
        let id = site.id;
        planned
            .push(compute_site_coverage(site).with_context(|| format!("planning site {}", id))?);
    }

    for p in &planned {
        println!(
            "site {:>3} {:<20} {:>4.0} MHz  EIRP {:>6.1} dBm  range {:>5.2} km  \
             area {:>7.2} km2  capacity {:>5.2} ch  blocking {:>6.3}%",
            p.site.id,
            p.site.name,
            p.site.band.mhz(),
            p.link_budget.eirp_dbm,
            p.coverage.max_distance_km,
            p.coverage.cell_area_km2,
            p.capacity.effective_channels,
            p.capacity.blocking_probability * 100.0,
        );
    }

    if let Some(stats) = NetworkStats::of(&planned) {
        println!(
            "network: {} sites, {:.2} km2 covered, {:.2} effective channels, \
             mean blocking {:.3}%",
            stats.sites,
            stats.total_area_km2,
            stats.total_capacity_channels,
            stats.mean_blocking_probability * 100.0,
        );
    }

    if args.interference {
        let spec = GridSpec {
            rings: args.rings,
            points_per_ring: args.points_per_ring,
        };

        let samples = interference_grid(&planned, &spec)?;
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for sample in &samples {
            serde_json::to_writer(&mut out, sample)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

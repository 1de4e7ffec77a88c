//! Multi-site carrier-to-interference analysis.
//!
//! For any geographic point this evaluates the received level from every
//! site, takes the strongest as the carrier, and aggregates the linear power
//! of every other site sharing the carrier's band into a single co-channel
//! interference term. The reduction is O(sites) per point; the map-wide
//! [`interference_grid`] runs it over a dense set of ring samples and is the
//! engine's hot loop, parallelised across points with no shared state.
//!
//! Sites are treated as omnidirectional here regardless of their sector
//! geometry; the sector fan only shapes coverage display sampling.

use geo::Point;
use rayon::prelude::*;
use serde::Serialize;

use crate::classify::CirQuality;
use crate::error::Error;
use crate::link::LinkBudget;
use crate::plan::PlannedSite;
use crate::projection::{distance_km, project};
use crate::site::Site;

/// Linear power substituted when no co-channel interferer exists, so the
/// C/I logarithm stays defined. With a single site this makes the reported
/// ratio artificially high, which is the intended reading: nothing is
/// interfering.
const FLOOR_POWER: f64 = 1e-6;

/// Received levels below this don't count towards the interferer tally
/// (display only; the C/I sum is unaffected).
const VISIBILITY_FLOOR_DBM: f64 = -100.0;

/// Interference analysis result for one query point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InterferenceSample {
    /// Query point latitude (degrees).
    pub latitude: f64,

    /// Query point longitude (degrees).
    pub longitude: f64,

    /// Id of the strongest (serving) site at this point.
    pub dominant_site: u32,

    /// Carrier-to-interference ratio (dB).
    pub cir_db: f64,

    /// Non-dominant sites received above the visibility floor, any band.
    pub interferers: usize,

    /// Display bucket for the ratio.
    pub quality: CirQuality,
}

/// Sampling density for [`interference_grid`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSpec {
    /// Concentric rings per site, out to that site's maximum range.
    pub rings: u32,

    /// Equally spaced sample angles per ring (full circle, end exclusive).
    pub points_per_ring: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rings: 30,
            points_per_ring: 80,
        }
    }
}

/// Evaluates interference at one geographic point across all sites.
///
/// The site collection is an explicit argument: the analysis is a pure
/// function of it and the query point, safe to call concurrently. An empty
/// collection is undefined and rejected; every site is validated before any
/// signal is computed.
pub fn interference_at(
    sites: &[Site],
    latitude: f64,
    longitude: f64,
) -> Result<InterferenceSample, Error> {
    check(sites)?;
    Ok(analyze(sites, latitude, longitude))
}

/// Samples interference over every site's coverage disc.
///
/// For each site: `rings` concentric rings out to its maximum coverage
/// distance, `points_per_ring` angles per ring. Output order is
/// deterministic (site, then ring, then angle); the per-point evaluation is
/// parallelised without affecting values or order.
pub fn interference_grid(
    planned: &[PlannedSite],
    spec: &GridSpec,
) -> Result<Vec<InterferenceSample>, Error> {
    let sites: Vec<Site> = planned.iter().map(|p| p.site.clone()).collect();
    check(&sites)?;

    let mut positions =
        Vec::with_capacity(planned.len() * (spec.rings * spec.points_per_ring) as usize);

    for p in planned {
        let origin = p.site.position();

        for ring in 1..=spec.rings {
            let radius =
                f64::from(ring) / f64::from(spec.rings) * p.coverage.max_distance_km;

            for i in 0..spec.points_per_ring {
                let angle = f64::from(i) / f64::from(spec.points_per_ring)
                    * 2.0
                    * std::f64::consts::PI;
                positions.push(project(origin, radius * angle.cos(), radius * angle.sin()));
            }
        }
    }

    Ok(positions
        .par_iter()
        .map(|point| analyze(&sites, point.y(), point.x()))
        .collect())
}

fn check(sites: &[Site]) -> Result<(), Error> {
    if sites.is_empty() {
        return Err(Error::NoSites);
    }

    for site in sites {
        site.validate()?;
    }

    Ok(())
}

struct Signal {
    site_id: u32,
    band: crate::site::Band,
    rssi_dbm: f64,
}

/// The per-point reduction. Sites must be non-empty and validated.
fn analyze(sites: &[Site], latitude: f64, longitude: f64) -> InterferenceSample {
    let point = Point::new(longitude, latitude);

    let mut signals: Vec<Signal> = sites
        .iter()
        .map(|site| {
            let distance = distance_km(site.position(), point).max(hata::MIN_DISTANCE_KM);
            let budget = LinkBudget::for_site(site);
            let rssi_dbm = budget.eirp_dbm - site.propagation().loss_at(distance);

            Signal {
                site_id: site.id,
                band: site.band,
                rssi_dbm,
            }
        })
        .collect();

    signals.sort_by(|a, b| b.rssi_dbm.total_cmp(&a.rssi_dbm));

    let dominant = &signals[0];

    let co_channel_power: f64 = signals[1..]
        .iter()
        .filter(|s| s.band == dominant.band)
        .map(|s| 10f64.powf(s.rssi_dbm / 10.0))
        .sum();

    let power = if co_channel_power > 0.0 {
        co_channel_power
    } else {
        FLOOR_POWER
    };

    let cir_db = dominant.rssi_dbm - 10.0 * power.log10();

    let interferers = signals[1..]
        .iter()
        .filter(|s| s.rssi_dbm > VISIBILITY_FLOOR_DBM)
        .count();

    InterferenceSample {
        latitude,
        longitude,
        dominant_site: dominant.site_id,
        cir_db,
        interferers,
        quality: CirQuality::from_cir(cir_db),
    }
}

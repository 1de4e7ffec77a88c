//! Coverage range search and geographic sampling.
//!
//! For one site this finds the maximum usable range (largest distance whose
//! path loss still fits inside the link budget) and then lays a deterministic
//! fan of sample points over each sector: concentric rings crossed with a
//! fixed angular resolution, every sample carrying its estimated received
//! level. The whole point set is a pure function of the site configuration
//! and is regenerated from scratch whenever any parameter changes.

use geo::Point;
use log::debug;

use crate::classify::SignalQuality;
use crate::error::Error;
use crate::link::LinkBudget;
use crate::projection::project;
use crate::site::Site;

/// Start and floor of the range search (km).
pub const RANGE_FLOOR_KM: f64 = 0.1;

/// Range search step (km).
const RANGE_STEP_KM: f64 = 0.05;

/// Range search ceiling (km).
pub const RANGE_CEILING_KM: f64 = 30.0;

/// Concentric sample rings per sector.
const RINGS: u32 = 15;

/// Angular steps per ring; both sector edges are sampled, so each ring
/// holds one more point than this.
const ANGLE_STEPS: u32 = 30;

/// Arc segments used for a sector outline polygon.
const OUTLINE_STEPS: u32 = 30;

/// One coverage sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoveragePoint {
    /// Geographic position (x = longitude, y = latitude).
    pub position: Point<f64>,

    /// Estimated received signal level (dBm).
    pub rssi_dbm: f64,

    /// Planar distance from the site (km).
    pub distance_km: f64,

    /// Index of the sector this sample belongs to.
    pub sector: u32,

    /// Display bucket for the received level.
    pub quality: SignalQuality,
}

/// Coverage of one site: its maximum range and the sampled point fan.
#[derive(Clone, Debug, PartialEq)]
pub struct Coverage {
    /// Largest distance still inside the link budget (km). Stays at
    /// [`RANGE_FLOOR_KM`] when no distance fits: effectively no coverage,
    /// not a failure.
    pub max_distance_km: f64,

    /// Omnidirectional-equivalent cell area, `pi * max^2` (km^2). Sector
    /// restriction is deliberately not accounted for; consumers display
    /// this number as-is.
    pub cell_area_km2: f64,

    /// Sampled coverage points, grouped by sector in generation order.
    pub points: Vec<CoveragePoint>,
}

impl Coverage {
    /// Computes coverage for a site.
    ///
    /// Validates the site first, so a domain-invalid configuration is
    /// rejected before any sampling happens.
    pub fn of(site: &Site) -> Result<Self, Error> {
        site.validate()?;

        let budget = LinkBudget::for_site(site);
        let model = site.propagation();

        let max_distance_km = max_range(&model, budget.max_path_loss_db);
        let points = sample_sectors(site, &model, budget.eirp_dbm, max_distance_km);

        debug!(
            "site {}: range {:.2} km, {} coverage points",
            site.id,
            max_distance_km,
            points.len(),
        );

        Ok(Self {
            max_distance_km,
            cell_area_km2: std::f64::consts::PI * max_distance_km * max_distance_km,
            points,
        })
    }
}

/// Iterative range search.
///
/// Walks outwards in fixed steps and keeps the last distance whose loss fits
/// the budget, stopping at the first failure. Loss is monotonic in distance
/// (a property of the propagation model), so the first failure is final.
fn max_range(model: &hata::Model, max_path_loss_db: f64) -> f64 {
    let mut max = RANGE_FLOOR_KM;

    let mut step = 0u32;
    loop {
        let d = RANGE_FLOOR_KM + RANGE_STEP_KM * f64::from(step);
        if d > RANGE_CEILING_KM {
            break;
        }

        if model.loss_at(d) <= max_path_loss_db {
            max = d;
        } else {
            break;
        }

        step += 1;
    }

    max
}

/// Samples the coverage fan of every sector.
///
/// Sector angles are planar: zero degrees points east and angles grow
/// counter-clockwise, with east mapping to longitude and north to latitude
/// through the flat-Earth projection.
fn sample_sectors(
    site: &Site,
    model: &hata::Model,
    eirp_dbm: f64,
    max_distance_km: f64,
) -> Vec<CoveragePoint> {
    let origin = site.position();
    let sectors = site.sectorization.count();
    let spacing = 360.0 / f64::from(sectors);

    let mut points = Vec::with_capacity((sectors * RINGS * (ANGLE_STEPS + 1)) as usize);

    for sector in 0..sectors {
        let azimuth = site.azimuth_deg + f64::from(sector) * spacing;
        let start = (azimuth - site.beamwidth_deg / 2.0).to_radians();
        let end = (azimuth + site.beamwidth_deg / 2.0).to_radians();

        for ring in 1..=RINGS {
            let radius = f64::from(ring) / f64::from(RINGS) * max_distance_km;

            for i in 0..=ANGLE_STEPS {
                let angle = start + f64::from(i) / f64::from(ANGLE_STEPS) * (end - start);
                let east = radius * angle.cos();
                let north = radius * angle.sin();

                let distance_km = east.hypot(north);
                if distance_km < RANGE_FLOOR_KM {
                    // Too close to the mast for the model; edge artifact.
                    continue;
                }

                let rssi_dbm = eirp_dbm - model.loss_at(distance_km);

                points.push(CoveragePoint {
                    position: project(origin, east, north),
                    rssi_dbm,
                    distance_km,
                    sector,
                    quality: SignalQuality::from_rssi(rssi_dbm),
                });
            }
        }
    }

    points
}

/// Closed fan polygons outlining each sector at a given range, for map
/// display. Each polygon starts and ends at the site position.
pub fn sector_outlines(site: &Site, max_distance_km: f64) -> Vec<Vec<Point<f64>>> {
    let origin = site.position();
    let sectors = site.sectorization.count();
    let spacing = 360.0 / f64::from(sectors);

    let mut outlines = Vec::with_capacity(sectors as usize);

    for sector in 0..sectors {
        let azimuth = site.azimuth_deg + f64::from(sector) * spacing;
        let start = (azimuth - site.beamwidth_deg / 2.0).to_radians();
        let end = (azimuth + site.beamwidth_deg / 2.0).to_radians();

        let mut polygon = Vec::with_capacity(OUTLINE_STEPS as usize + 3);
        polygon.push(origin);

        for i in 0..=OUTLINE_STEPS {
            let angle = start + f64::from(i) / f64::from(OUTLINE_STEPS) * (end - start);
            polygon.push(project(
                origin,
                max_distance_km * angle.cos(),
                max_distance_km * angle.sin(),
            ));
        }

        polygon.push(origin);
        outlines.push(polygon);
    }

    outlines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::offset;
    use crate::site::Sectorization;
    use approx::assert_relative_eq;

    #[test]
    fn default_site_range_is_a_few_km() {
        // GSM 900, urban, 152 dB tolerable loss: the Hata formula crosses
        // the budget a little above 5.3 km.
        let coverage = Coverage::of(&Site::default()).unwrap();

        assert!(coverage.max_distance_km > 5.2);
        assert!(coverage.max_distance_km < 5.4);

        let model = Site::default().propagation();
        assert!(model.loss_at(coverage.max_distance_km) <= 152.0);
        assert!(model.loss_at(coverage.max_distance_km + 0.05) > 152.0);
    }

    #[test]
    fn omni_site_samples_full_grid() {
        // 15 rings x 31 angles, nothing inside the 0.1 km skip radius.
        let coverage = Coverage::of(&Site::default()).unwrap();
        assert_eq!(coverage.points.len(), 465);
    }

    #[test]
    fn tri_sector_site_samples_each_sector() {
        let mut site = Site::default();
        site.sectorization = Sectorization::Tri;

        let coverage = Coverage::of(&site).unwrap();
        assert_eq!(coverage.points.len(), 3 * 465);

        for sector in 0..3 {
            assert!(coverage.points.iter().any(|p| p.sector == sector));
        }
    }

    #[test]
    fn cell_area_is_the_omnidirectional_circle() {
        let coverage = Coverage::of(&Site::default()).unwrap();
        assert_relative_eq!(
            coverage.cell_area_km2,
            std::f64::consts::PI * coverage.max_distance_km.powi(2),
            max_relative = 1e-12,
        );
    }

    #[test]
    fn exhausted_search_returns_the_floor() {
        // A 200 dB fade margin leaves a negative tolerable loss: nothing
        // fits, the range stays at the floor, and only the outermost ring
        // (radius 0.1 km, right on the skip boundary) can survive.
        let mut site = Site::default();
        site.fade_margin_db = 200.0;

        let coverage = Coverage::of(&site).unwrap();
        assert_eq!(coverage.max_distance_km, RANGE_FLOOR_KM);
        assert!(!coverage.points.is_empty());
        assert!(coverage.points.len() <= 31);
        for point in &coverage.points {
            assert_relative_eq!(point.distance_km, RANGE_FLOOR_KM, epsilon = 1e-12);
        }
    }

    #[test]
    fn sampling_is_deterministic() {
        let site = Site::default();
        assert_eq!(Coverage::of(&site).unwrap(), Coverage::of(&site).unwrap());
    }

    #[test]
    fn points_invert_back_to_their_polar_offsets() {
        let site = Site::default();
        let origin = site.position();
        let coverage = Coverage::of(&site).unwrap();

        for point in &coverage.points {
            let (east, north) = offset(origin, point.position);
            assert_relative_eq!(east.hypot(north), point.distance_km, epsilon = 1e-9);
        }
    }

    #[test]
    fn rssi_follows_the_link_budget() {
        let site = Site::default();
        let model = site.propagation();
        let coverage = Coverage::of(&site).unwrap();

        for point in &coverage.points {
            assert_relative_eq!(
                point.rssi_dbm,
                58.0 - model.loss_at(point.distance_km),
                epsilon = 1e-9,
            );
            assert_eq!(point.quality, SignalQuality::from_rssi(point.rssi_dbm));
        }
    }

    #[test]
    fn invalid_site_is_rejected_before_sampling() {
        let mut site = Site::default();
        site.antenna_height_m = -1.0;
        assert!(Coverage::of(&site).is_err());
    }

    #[test]
    fn outlines_are_closed_fans() {
        let site = Site::default();
        let outlines = sector_outlines(&site, 5.0);

        assert_eq!(outlines.len(), 1);
        let polygon = &outlines[0];
        assert_eq!(polygon.len(), 33);
        assert_eq!(polygon.first(), polygon.last());
    }
}

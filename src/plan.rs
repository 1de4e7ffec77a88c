//! The derived site record and network-wide totals.
//!
//! A [`PlannedSite`] bundles a site's configuration snapshot with everything
//! derived from it. The record is atomic: whenever any site parameter
//! changes the caller builds a fresh record with [`compute_site_coverage`]
//! and replaces the old one wholesale, so derived data can never drift out
//! of sync with its inputs.

use geo::Point;
use log::debug;

use crate::coverage::{sector_outlines, Coverage};
use crate::error::Error;
use crate::link::LinkBudget;
use crate::site::Site;
use crate::traffic::Capacity;

/// One site and all values derived from its configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedSite {
    /// The configuration snapshot these results were derived from.
    pub site: Site,

    /// Power accounting.
    pub link_budget: LinkBudget,

    /// Traffic blocking and served capacity.
    pub capacity: Capacity,

    /// Range and sampled coverage fan.
    pub coverage: Coverage,
}

impl PlannedSite {
    /// Sector outline fans at the site's maximum range, for map display.
    pub fn sector_outlines(&self) -> Vec<Vec<Point<f64>>> {
        sector_outlines(&self.site, self.coverage.max_distance_km)
    }
}

/// Derives the full record for one site: link budget, coverage fan, and
/// capacity. The single entry point callers use on site creation or edit.
///
/// Validation happens before anything is derived, so an error never leaves
/// a partially-populated record behind.
pub fn compute_site_coverage(site: Site) -> Result<PlannedSite, Error> {
    site.validate()?;

    let link_budget = LinkBudget::for_site(&site);
    let coverage = Coverage::of(&site)?;
    let capacity = Capacity::of(site.traffic_erlangs, site.channels);

    debug!(
        "site {} ({}): EIRP {:.1} dBm, range {:.2} km, {:.2} effective channels",
        site.id, site.name, link_budget.eirp_dbm, coverage.max_distance_km,
        capacity.effective_channels,
    );

    Ok(PlannedSite {
        site,
        link_budget,
        capacity,
        coverage,
    })
}

/// Aggregate figures over a whole plan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NetworkStats {
    /// Number of sites.
    pub sites: usize,

    /// Sum of every site's omnidirectional cell area (km^2).
    pub total_area_km2: f64,

    /// Sum of effective (post-blocking) channel capacity.
    pub total_capacity_channels: f64,

    /// Mean blocking probability across sites, in [0, 1].
    pub mean_blocking_probability: f64,
}

impl NetworkStats {
    /// Totals over a set of planned sites; `None` for an empty plan.
    pub fn of(planned: &[PlannedSite]) -> Option<Self> {
        if planned.is_empty() {
            return None;
        }

        let total_area_km2 = planned.iter().map(|p| p.coverage.cell_area_km2).sum();
        let total_capacity_channels = planned
            .iter()
            .map(|p| p.capacity.effective_channels)
            .sum();
        let mean_blocking_probability = planned
            .iter()
            .map(|p| p.capacity.blocking_probability)
            .sum::<f64>()
            / planned.len() as f64;

        Some(Self {
            sites: planned.len(),
            total_area_km2,
            total_capacity_channels,
            mean_blocking_probability,
        })
    }
}

//! Downlink power accounting.

use crate::site::Site;

/// Link budget derived from one site configuration.
///
/// Immutable given a site snapshot; recomputed (as part of the whole
/// [`crate::plan::PlannedSite`] record) whenever any site field changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkBudget {
    /// Effective isotropic radiated power (dBm).
    pub eirp_dbm: f64,

    /// Maximum tolerable path loss for a reliable link (dB).
    pub max_path_loss_db: f64,
}

impl LinkBudget {
    /// Derives the budget from a site's transmit and receive parameters.
    ///
    /// Plain dB arithmetic with no clamping: non-finite inputs propagate.
    pub fn for_site(site: &Site) -> Self {
        let eirp_dbm = site.tx_power_dbm + site.antenna_gain_dbi - site.cable_loss_db;
        let max_path_loss_db = eirp_dbm - site.rx_sensitivity_dbm - site.fade_margin_db;

        Self {
            eirp_dbm,
            max_path_loss_db,
        }
    }
}

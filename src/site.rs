//! Transmitter site configuration.
//!
//! A [`Site`] is pure configuration: everything derived from it (link
//! budget, coverage points, capacity) lives in [`crate::plan::PlannedSite`]
//! and is regenerated wholesale whenever any field here changes.

use geo::Point;
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

use crate::error::Error;

pub use hata::Environment;

/// Carrier band.
///
/// Cellular deployments pick from a fixed channel plan rather than a free
/// frequency, so the band is an enumeration: this also makes the co-channel
/// test in interference analysis an exact comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    /// GSM 900 MHz.
    Gsm900,
    /// DCS 1800 MHz.
    Dcs1800,
}

impl Band {
    /// Carrier frequency of the band (MHz).
    pub fn mhz(self) -> f64 {
        match self {
            Band::Gsm900 => 900.0,
            Band::Dcs1800 => 1800.0,
        }
    }
}

impl Default for Band {
    fn default() -> Self {
        Band::Gsm900
    }
}

/// Antenna sectorization of a site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Sectorization {
    /// Single omnidirectional sector.
    Omni,
    /// Three sectors, 120 degrees apart.
    Tri,
    /// Six sectors, 60 degrees apart.
    Hexa,
}

impl Sectorization {
    /// Number of sectors.
    pub fn count(self) -> u32 {
        match self {
            Sectorization::Omni => 1,
            Sectorization::Tri => 3,
            Sectorization::Hexa => 6,
        }
    }
}

impl Default for Sectorization {
    fn default() -> Self {
        Sectorization::Omni
    }
}

impl TryFrom<u8> for Sectorization {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, String> {
        match n {
            1 => Ok(Sectorization::Omni),
            3 => Ok(Sectorization::Tri),
            6 => Ok(Sectorization::Hexa),
            other => Err(format!("sector count must be 1, 3 or 6, got {}", other)),
        }
    }
}

impl From<Sectorization> for u8 {
    fn from(s: Sectorization) -> u8 {
        s.count() as u8
    }
}

/// A transmitter site and all of its radio, traffic and sector parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Site {
    /// Unique identifier, assigned by the caller.
    pub id: u32,

    /// What it's called.
    pub name: String,

    /// Latitude (degrees).
    pub latitude: f64,

    /// Longitude (degrees).
    pub longitude: f64,

    /// Transmit power at the amplifier output (dBm).
    pub tx_power_dbm: f64,

    /// Carrier band.
    pub band: Band,

    /// Transmit antenna gain (dBi).
    pub antenna_gain_dbi: f64,

    /// Transmit antenna height above ground (m).
    pub antenna_height_m: f64,

    /// Receiver (mobile) antenna height above ground (m).
    pub rx_height_m: f64,

    /// Receiver sensitivity threshold (dBm).
    pub rx_sensitivity_dbm: f64,

    /// Margin reserved against fading (dB).
    pub fade_margin_db: f64,

    /// Cable and feeder losses between amplifier and antenna (dB).
    pub cable_loss_db: f64,

    /// Propagation environment.
    pub environment: Environment,

    /// Offered traffic load (Erlangs).
    pub traffic_erlangs: f64,

    /// Number of traffic channels.
    pub channels: u32,

    /// Azimuth of the first sector (degrees, 0-360).
    pub azimuth_deg: f64,

    /// Angular width of each sector (degrees).
    pub beamwidth_deg: f64,

    /// Sector arrangement.
    pub sectorization: Sectorization,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            id: 0,
            name: String::new(),
            latitude: 14.6928,
            longitude: -17.4467,
            tx_power_dbm: 43.0,
            band: Band::Gsm900,
            antenna_gain_dbi: 18.0,
            antenna_height_m: 30.0,
            rx_height_m: 1.5,
            rx_sensitivity_dbm: -104.0,
            fade_margin_db: 10.0,
            cable_loss_db: 3.0,
            environment: Environment::Urban,
            traffic_erlangs: 25.0,
            channels: 8,
            azimuth_deg: 0.0,
            beamwidth_deg: 120.0,
            sectorization: Sectorization::Omni,
        }
    }
}

impl Site {
    /// Geographic position (x = longitude, y = latitude).
    pub fn position(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Checks the configuration for domain-invalid values.
    ///
    /// Called at every API boundary that derives values from a site, so a
    /// bad parameter is rejected before it can produce non-finite results.
    pub fn validate(&self) -> Result<(), Error> {
        if self.antenna_height_m <= 0.0 {
            return Err(Error::NonPositiveHeight {
                site: self.id,
                which: "transmit",
                value: self.antenna_height_m,
            });
        }

        if self.rx_height_m <= 0.0 {
            return Err(Error::NonPositiveHeight {
                site: self.id,
                which: "receive",
                value: self.rx_height_m,
            });
        }

        if self.channels == 0 {
            return Err(Error::NoChannels { site: self.id });
        }

        if self.beamwidth_deg <= 0.0 {
            return Err(Error::NonPositiveBeamwidth {
                site: self.id,
                value: self.beamwidth_deg,
            });
        }

        Ok(())
    }

    /// Propagation model for this site's radio parameters.
    ///
    /// Infallible once [`Site::validate`] has passed: the band frequency is
    /// positive by construction and the heights have been checked.
    pub(crate) fn propagation(&self) -> hata::Model {
        hata::Model::new(
            self.band.mhz(),
            self.antenna_height_m,
            self.rx_height_m,
            self.environment,
        )
        .expect("validated site parameters")
    }
}

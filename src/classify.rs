//! Quality buckets for received signal level and carrier-to-interference
//! ratio.
//!
//! The thresholds are part of the engine's contract (the map legend is built
//! from them); the hex colours are the conventional display mapping and ride
//! along so every consumer paints the same legend.

use serde::Serialize;

/// Received signal level bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalQuality {
    Excellent,
    VeryGood,
    Good,
    Fair,
    Poor,
}

impl SignalQuality {
    /// Classifies a received signal level (dBm). Thresholds are strict.
    pub fn from_rssi(rssi_dbm: f64) -> Self {
        if rssi_dbm > -70.0 {
            SignalQuality::Excellent
        } else if rssi_dbm > -85.0 {
            SignalQuality::VeryGood
        } else if rssi_dbm > -95.0 {
            SignalQuality::Good
        } else if rssi_dbm > -105.0 {
            SignalQuality::Fair
        } else {
            SignalQuality::Poor
        }
    }

    /// Display colour for the bucket.
    pub fn hex_color(self) -> &'static str {
        match self {
            SignalQuality::Excellent => "#00ff00",
            SignalQuality::VeryGood => "#80ff00",
            SignalQuality::Good => "#ffff00",
            SignalQuality::Fair => "#ff8000",
            SignalQuality::Poor => "#ff0000",
        }
    }
}

/// Carrier-to-interference ratio bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CirQuality {
    Excellent,
    Good,
    Acceptable,
    Poor,
    Critical,
}

impl CirQuality {
    /// Classifies a C/I ratio (dB). Thresholds are strict.
    pub fn from_cir(cir_db: f64) -> Self {
        if cir_db > 18.0 {
            CirQuality::Excellent
        } else if cir_db > 12.0 {
            CirQuality::Good
        } else if cir_db > 9.0 {
            CirQuality::Acceptable
        } else if cir_db > 6.0 {
            CirQuality::Poor
        } else {
            CirQuality::Critical
        }
    }

    /// Display colour for the bucket.
    pub fn hex_color(self) -> &'static str {
        match self {
            CirQuality::Excellent => "#00ff41",
            CirQuality::Good => "#39ff14",
            CirQuality::Acceptable => "#ffff00",
            CirQuality::Poor => "#ff8c00",
            CirQuality::Critical => "#ff0040",
        }
    }
}

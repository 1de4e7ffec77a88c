//! Error taxonomy for the planning engine.
//!
//! Only domain-invalid input is surfaced as an error, and it is surfaced at
//! the API boundary before any derived value is produced. Degenerate numeric
//! cases (distances under the sampling floor, an empty co-channel sum, zero
//! channels in the Erlang-B recurrence) are resolved by defined floors and
//! identities inside the computations and never become errors.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum Error {
    /// Antenna heights feed logarithms in the propagation model.
    #[error("site {site}: {which} antenna height must be positive, got {value} m")]
    NonPositiveHeight {
        site: u32,
        which: &'static str,
        value: f64,
    },

    /// A site without channels cannot carry traffic.
    #[error("site {site}: channel count must be at least 1")]
    NoChannels { site: u32 },

    /// A sector of zero or negative width has no sample geometry.
    #[error("site {site}: beamwidth must be positive, got {value} degrees")]
    NonPositiveBeamwidth { site: u32, value: f64 },

    /// Interference analysis over an empty site set is undefined.
    #[error("interference analysis needs at least one site")]
    NoSites,
}

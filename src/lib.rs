//! Cellular radio coverage, capacity and interference planning engine.
//!
//! Given a set of transmitter sites this computes, per site, the achievable
//! range and a geographic coverage sample fan (Okumura-Hata path loss fed by
//! a link budget), the traffic capacity actually served (Erlang-B), and, per
//! query point, the carrier-to-interference ratio across all sites.
//!
//! Everything here is a pure function of its explicit inputs: no I/O, no
//! caching, no ambient state. The site collection is always passed in, and
//! derived results live in an atomic [`plan::PlannedSite`] record that is
//! replaced, never mutated, when a site is edited. Map rendering, editing
//! UI, and file export are the caller's concern; this crate hands them
//! coordinates, signal levels and capacity numbers.
//!
//! The propagation model itself lives in the [`hata`] crate.

#![forbid(unsafe_code)]

pub mod classify;
pub mod coverage;
pub mod error;
pub mod interference;
pub mod link;
pub mod plan;
pub mod projection;
pub mod site;
pub mod traffic;

pub use crate::classify::{CirQuality, SignalQuality};
pub use crate::coverage::{Coverage, CoveragePoint};
pub use crate::error::Error;
pub use crate::interference::{interference_at, interference_grid, GridSpec, InterferenceSample};
pub use crate::link::LinkBudget;
pub use crate::plan::{compute_site_coverage, NetworkStats, PlannedSite};
pub use crate::site::{Band, Environment, Sectorization, Site};
pub use crate::traffic::{blocking_probability, Capacity};

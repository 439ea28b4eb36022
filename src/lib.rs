//! megqc-report: quality-control figures and HTML reports for MEG recordings.
//!
//! This crate turns precomputed QC measures (standard deviations,
//! peak-to-peak amplitudes, power spectra) into interactive Plotly figures,
//! wraps each figure as a tagged derivative, and assembles the derivatives
//! into an HTML report: either one standalone document or a section-based
//! report object.
//!
//! The design favors small, testable modules: plot builders never touch the
//! filesystem, report assembly is pure markup construction, and all file
//! output lives in `io`.
pub mod config;
pub mod derivative;
pub mod error;
pub mod io;
pub mod plots;
pub mod report;

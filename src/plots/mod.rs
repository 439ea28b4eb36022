//! Plot builders turning precomputed QC measures into plotly figures.
//!
//! Builders validate their input shapes, construct the figure, and wrap it
//! as a named `QcDerivative`. They never write files and never display
//! anything; file output is handled by `io`.
pub mod boxplots;
pub mod psd;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlotDataError;

/// MEG channel kinds, plotted separately throughout the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChannelKind {
    Magnetometers,
    Gradiometers,
}

impl ChannelKind {
    pub fn title(&self) -> &'static str {
        match self {
            ChannelKind::Magnetometers => "Magnetometers",
            ChannelKind::Gradiometers => "Gradiometers",
        }
    }

    /// Measurement unit of the raw signal.
    pub fn unit(&self) -> &'static str {
        match self {
            ChannelKind::Magnetometers => "Tesla",
            ChannelKind::Gradiometers => "Tesla/meter",
        }
    }

    /// Measurement unit of spectral amplitude.
    pub fn psd_unit(&self) -> &'static str {
        match self {
            ChannelKind::Magnetometers => "T/Hz",
            ChannelKind::Gradiometers => "T/m / Hz",
        }
    }
}

impl FromStr for ChannelKind {
    type Err = PlotDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mag" | "mags" | "magnetometers" => Ok(ChannelKind::Magnetometers),
            "grad" | "grads" | "gradiometers" => Ok(ChannelKind::Gradiometers),
            other => Err(PlotDataError::UnknownChannelKind(other.to_string())),
        }
    }
}

/// Title and unit for a channel kind given as a free-form string.
///
/// Unknown spellings degrade to placeholder text with a warning instead of
/// failing; callers format best-effort output either way.
pub fn title_and_unit(ch_type: &str, psd: bool) -> (String, String) {
    match ch_type.parse::<ChannelKind>() {
        Ok(kind) => {
            let unit = if psd { kind.psd_unit() } else { kind.unit() };
            (kind.title().to_string(), unit.to_string())
        }
        Err(_) => {
            log::warn!(
                "Channel kind '{}' not recognized, expected magnetometers or gradiometers",
                ch_type
            );
            ("?unknown?".to_string(), "?unknown unit?".to_string())
        }
    }
}

/// Which amplitude measure a boxplot shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmplitudeMeasure {
    Stds,
    Peaks,
}

impl AmplitudeMeasure {
    /// Short label used in hover templates.
    pub fn hover_title(&self) -> &'static str {
        match self {
            AmplitudeMeasure::Stds => "STD",
            AmplitudeMeasure::Peaks => "Amplitude",
        }
    }

    /// Long label used on axes and in figure titles.
    pub fn axis_title(&self) -> &'static str {
        match self {
            AmplitudeMeasure::Stds => "Standard deviation",
            AmplitudeMeasure::Peaks => "Peak-to-peak amplitude",
        }
    }

    /// File-name stem; also what classifies the figure into its section.
    pub fn name_stem(&self) -> &'static str {
        match self {
            AmplitudeMeasure::Stds => "Stds",
            AmplitudeMeasure::Peaks => "PP_manual",
        }
    }
}

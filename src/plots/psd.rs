//! Spectral figures: per-channel periodogram and relative band power pie
//! chart. The spectra themselves are computed upstream (Welch or similar);
//! these builders only visualize.

use ndarray::{Array1, Array2};
use plotly::common::{ExponentFormat, Mode};
use plotly::layout::{Axis, Layout};
use plotly::{Pie, Plot, Scatter};

use super::ChannelKind;
use crate::derivative::QcDerivative;
use crate::error::PlotDataError;

/// Canonical frequency bands, lowest first.
pub const FREQUENCY_BANDS: [&str; 5] = ["delta", "theta", "alpha", "beta", "gamma"];

/// Periodogram over the whole recording, one line per channel.
///
/// # Arguments
///
/// * `freqs` - frequencies of the spectral decomposition, in Hz.
/// * `psds` - power spectral densities, one row per channel, one column per
///   frequency. Plotted as amplitude, i.e. the square root of the power.
/// * `ch_names` - channel names, same order as the rows of `psds`.
/// * `kind` - magnetometers or gradiometers.
pub fn plot_periodogram(
    freqs: &Array1<f64>,
    psds: &Array2<f64>,
    ch_names: &[String],
    kind: ChannelKind,
) -> Result<QcDerivative, PlotDataError> {
    if freqs.is_empty() || psds.nrows() == 0 {
        return Err(PlotDataError::EmptyInput);
    }
    if psds.nrows() != ch_names.len() {
        return Err(PlotDataError::LengthMismatch {
            expected: psds.nrows(),
            actual: ch_names.len(),
        });
    }
    if psds.ncols() != freqs.len() {
        return Err(PlotDataError::LengthMismatch {
            expected: psds.ncols(),
            actual: freqs.len(),
        });
    }

    let x = freqs.to_vec();
    let mut plot = Plot::new();
    for (row, name) in psds.outer_iter().zip(ch_names) {
        let amplitudes: Vec<f64> = row.iter().map(|p| p.sqrt()).collect();
        let trace = Scatter::new(x.clone(), amplitudes)
            .mode(Mode::Lines)
            .name(name)
            .hover_template("Frequency: %{x} Hz<br>Amplitude: %{y: .2e}");
        plot.add_trace(trace);
    }

    let fig_title = format!("Welch's periodogram for all {}", kind.title());
    let y_title = format!("Amplitude, {}", kind.psd_unit());
    plot.set_layout(
        Layout::new()
            .title(fig_title.as_str())
            .x_axis(Axis::new().title("Frequency (Hz)"))
            .y_axis(
                Axis::new()
                    .title(y_title.as_str())
                    .exponent_format(ExponentFormat::SmallE),
            ),
    );

    let name = format!("PSD_over_all_data_{}", kind.title());
    let description = format!(
        "Amplitude spectrum of every {} channel over the whole recording.",
        kind.title().to_lowercase()
    );
    Ok(QcDerivative::plotly(plot, &name, &description))
}

/// Percent slice values and labels for the band power pie chart.
///
/// Relative powers come in as fractions of the total power. When the slices
/// sum to less than 100 % the remainder is attributed to an `unknown` slice;
/// at or above 100 % no slice is added.
pub fn band_slices(relative_powers: &[f64]) -> (Vec<f64>, Vec<String>) {
    let mut values: Vec<f64> = relative_powers.iter().map(|p| p * 100.0).collect();
    let mut labels: Vec<String> = FREQUENCY_BANDS.iter().map(|b| b.to_string()).collect();

    let shortfall = 100.0 - relative_powers.iter().sum::<f64>() * 100.0;
    if shortfall > 0.0 {
        values.push(shortfall);
        labels.push("unknown".to_string());
    }
    (values, labels)
}

/// Pie chart of the relative power of each frequency band over the whole
/// signal of one channel kind (not separated by individual channels).
pub fn plot_pie_chart_freq(
    relative_powers: &[f64],
    kind: ChannelKind,
) -> Result<QcDerivative, PlotDataError> {
    if relative_powers.len() != FREQUENCY_BANDS.len() {
        return Err(PlotDataError::LengthMismatch {
            expected: FREQUENCY_BANDS.len(),
            actual: relative_powers.len(),
        });
    }

    let (values, labels) = band_slices(relative_powers);
    let trace = Pie::new(values).labels(labels);

    let fig_title = format!("Relative power of each band: {}", kind.title());
    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(Layout::new().title(fig_title.as_str()));

    let name = format!(
        "PSD_relative_power_per_band_over_all_channels_{}",
        kind.title()
    );
    let description = format!(
        "Share of the total {} signal power taken by each frequency band.",
        kind.title().to_lowercase()
    );
    Ok(QcDerivative::plotly(plot, &name, &description))
}

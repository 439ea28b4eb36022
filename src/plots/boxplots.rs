//! Boxplot builders for amplitude measures (standard deviation and
//! peak-to-peak) per epoch and over the whole recording.

use itertools_num::linspace;
use ndarray::Array2;
use plotly::box_plot::{BoxPlot, BoxPoints};
use plotly::common::{ExponentFormat, Line, Marker, TickMode};
use plotly::layout::{Axis, Layout, RangeSlider};
use plotly::Plot;

use super::{AmplitudeMeasure, ChannelKind};
use crate::derivative::QcDerivative;
use crate::error::PlotDataError;

/// Boxplot of an amplitude measure over epochs: one box per channel, one
/// dot per epoch in that channel.
///
/// # Arguments
///
/// * `data` - measure values, one row per channel, one column per epoch.
/// * `ch_names` - channel names, same order as the rows of `data`.
/// * `kind` - magnetometers or gradiometers; mixed input is not supported.
/// * `measure` - which amplitude measure the values represent.
///
/// # Returns
///
/// The figure wrapped as a `QcDerivative` whose name classifies it into the
/// section matching `measure`.
pub fn boxplot_epochs_per_channel(
    data: &Array2<f64>,
    ch_names: &[String],
    kind: ChannelKind,
    measure: AmplitudeMeasure,
) -> Result<QcDerivative, PlotDataError> {
    if data.nrows() == 0 || data.ncols() == 0 {
        return Err(PlotDataError::EmptyInput);
    }
    if data.nrows() != ch_names.len() {
        return Err(PlotDataError::LengthMismatch {
            expected: data.nrows(),
            actual: ch_names.len(),
        });
    }

    let epoch_labels: Vec<String> = (0..data.ncols()).map(|e| e.to_string()).collect();
    let hover = format!("Epoch: %{{text}}<br>{}: %{{y: .2e}}", measure.hover_title());

    let mut plot = Plot::new();
    for (row, name) in data.outer_iter().zip(ch_names) {
        let trace = BoxPlot::new(row.to_vec())
            .name(name)
            .opacity(0.7)
            .box_points(BoxPoints::All)
            .point_pos(0.0)
            .marker(Marker::new().size(3))
            .line(Line::new().width(1.0))
            .text_array(epoch_labels.clone())
            .hover_template(&hover);
        plot.add_trace(trace);
    }

    let tick_values: Vec<f64> = if ch_names.len() > 1 {
        linspace(0.0, (ch_names.len() - 1) as f64, ch_names.len()).collect()
    } else {
        vec![0.0]
    };
    let fig_title = format!("{} over epochs for {}", measure.axis_title(), kind.title());
    let y_title = format!("{} in {}", measure.axis_title(), kind.unit());
    let layout = Layout::new()
        .title(fig_title.as_str())
        .x_axis(
            Axis::new()
                .tick_mode(TickMode::Array)
                .tick_values(tick_values)
                .tick_text(ch_names.to_vec())
                .range_slider(RangeSlider::new().visible(true)),
        )
        .y_axis(
            Axis::new()
                .title(y_title.as_str())
                .exponent_format(ExponentFormat::SmallE),
        );
    plot.set_layout(layout);

    let name = format!("{}_epochs_per_channel_{}", measure.name_stem(), kind.title());
    let description = format!(
        "Each box shows the {} of one {} channel over epochs; each dot is one epoch.",
        measure.axis_title().to_lowercase(),
        kind.title().to_lowercase()
    );
    Ok(QcDerivative::plotly(plot, &name, &description))
}

/// Boxplot of an amplitude measure over the entire time series: one box,
/// one dot per channel. Channels with too high or low values show up as
/// outliers.
pub fn boxplot_all_data(
    values: &[f64],
    ch_names: &[String],
    kind: ChannelKind,
    measure: AmplitudeMeasure,
) -> Result<QcDerivative, PlotDataError> {
    if values.is_empty() {
        return Err(PlotDataError::EmptyInput);
    }
    if values.len() != ch_names.len() {
        return Err(PlotDataError::LengthMismatch {
            expected: values.len(),
            actual: ch_names.len(),
        });
    }

    let hover = format!("%{{text}}<br>{}: %{{y: .2e}}", measure.hover_title());
    let trace = BoxPlot::new(values.to_vec())
        .name("")
        .opacity(0.7)
        .box_points(BoxPoints::All)
        .point_pos(0.0)
        .marker(Marker::new().size(5))
        .line(Line::new().width(1.0))
        .text_array(ch_names.to_vec())
        .hover_template(&hover);

    let fig_title = format!(
        "{} of the data for {} over the entire time series",
        measure.axis_title(),
        kind.title()
    );
    let y_title = format!("{} in {}", measure.axis_title(), kind.unit());
    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(
        Layout::new()
            .title(fig_title.as_str())
            .x_axis(Axis::new().visible(false).show_tick_labels(false))
            .y_axis(
                Axis::new()
                    .title(y_title.as_str())
                    .exponent_format(ExponentFormat::SmallE),
            ),
    );

    let name = format!("{}_all_data_{}", measure.name_stem(), kind.title());
    let description = format!(
        "Each dot is the {} of one {} channel over the whole recording.",
        measure.axis_title().to_lowercase(),
        kind.title().to_lowercase()
    );
    Ok(QcDerivative::plotly(plot, &name, &description))
}

//! Tagged QC derivatives and their report-section classification.
//!
//! A derivative is one computed output of the QC pipeline: an interactive
//! figure, a pre-rendered static image, or a table. Derivatives carry a
//! user-facing description and classify themselves into a report section by
//! matching known substrings of their name.

use maud::{html, Markup, PreEscaped};
use plotly::Plot;

/// Content kind of a derivative. Only `Plotly` and `Matplotlib` are
/// renderable inside the report; tables are written to csv files instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Plotly,
    Matplotlib,
    Csv,
    None,
}

/// Tabular payload saved as a csv file by the io layer.
#[derive(Debug, Clone, Default)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Payload of a derivative. Keeping the data inside the variant means the
/// content tag can never disagree with the actual content.
pub enum DerivativeContent {
    /// Interactive figure, embedded inline into the report.
    Plotly(Box<Plot>),
    /// Pre-rendered static image markup, e.g. an `<img>` tag with an
    /// embedded base64 PNG produced upstream.
    Matplotlib(String),
    /// Tabular derivative; shown in the report only as a csv reference.
    Csv(TableData),
    /// Nothing renderable or savable.
    None,
}

/// Report sections a derivative can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    InitialInfo,
    TimeSeries,
    Ecg,
    Eog,
    Head,
    Muscle,
    Std,
    Psd,
    PtpManual,
    PtpAuto,
    Sensors,
    Unclassified,
}

const HOWTO_INTERACTIVE: &str = "All figures are interactive. Hover over an element to see more information.";
const HOWTO_SENSORS_3D: &str = "<br> Sensors positions plot: Click and drag the figure to turn it. Enlarge the figure by running two fingers on the touchpad, or scrolling with \"Ctrl\" on the mouse.";
const HOWTO_ZOOM: &str = "<br> Click and select a part of the figure to enlarge it. Click \"Home\" button on the right upper side to return to the original view.";
const HOWTO_LEGEND: &str = "<br> With one click on the name in a legend on the right side you can select/deselect an element. <br> With a double click you can select/deselect a whole group of elements related to one lobe area.";
const HOWTO_BARS: &str = "<br> Figure with multiple bars can be enlarged by using the scrolling element on the bottom.";

impl Section {
    /// Fixed display order used when grouping derivatives into a report.
    pub const ORDER: [Section; 12] = [
        Section::InitialInfo,
        Section::TimeSeries,
        Section::Std,
        Section::Psd,
        Section::PtpManual,
        Section::PtpAuto,
        Section::Ecg,
        Section::Eog,
        Section::Head,
        Section::Muscle,
        Section::Sensors,
        Section::Unclassified,
    ];

    /// Section heading shown in the report.
    pub fn header(&self) -> &'static str {
        match self {
            Section::InitialInfo => "Data info",
            Section::TimeSeries => "Interactive time series",
            Section::Ecg => "ECG: heart beat interference",
            Section::Eog => "EOG: eye movement interference",
            Section::Head => "Head movement",
            Section::Muscle => "High frequency (Muscle) artifacts",
            Section::Std => "Standard deviation of the data",
            Section::Psd => "Frequency spectrum",
            Section::PtpManual => "Peak-to-Peak manual",
            Section::PtpAuto => "Peak-to-Peak auto",
            Section::Sensors => "Sensors locations",
            Section::Unclassified => "Other derivatives",
        }
    }

    /// Static "how to use these figures" preamble, for the sections that
    /// carry interactive figures. `None` for the rest.
    pub fn how_to_use(&self) -> Option<String> {
        match self {
            Section::Ecg | Section::Eog | Section::Psd => Some(format!(
                "{}{}{}{}",
                HOWTO_INTERACTIVE, HOWTO_SENSORS_3D, HOWTO_ZOOM, HOWTO_LEGEND
            )),
            Section::Std | Section::PtpManual => Some(format!(
                "{}{}{}{}{}",
                HOWTO_INTERACTIVE, HOWTO_SENSORS_3D, HOWTO_ZOOM, HOWTO_LEGEND, HOWTO_BARS
            )),
            Section::Muscle | Section::Head => {
                Some(format!("{}{}", HOWTO_INTERACTIVE, HOWTO_ZOOM))
            }
            _ => None,
        }
    }

    /// Classify a derivative name into a section.
    ///
    /// Known substrings are checked in a fixed priority order and the first
    /// match wins. Matching is case-insensitive. A name matching nothing is
    /// reported as `Unclassified` with a warning.
    pub fn from_derivative_name(name: &str) -> Section {
        let lower = name.to_lowercase();
        let has = |pattern: &str| lower.contains(pattern);

        if has("sensors") {
            Section::Sensors
        } else if has("initial") {
            Section::InitialInfo
        } else if has("time_series") || has("time series") {
            Section::TimeSeries
        } else if has("std") || has("rmse") {
            Section::Std
        } else if has("psd") {
            Section::Psd
        } else if has("pp_manual") || has("ptp_manual") {
            Section::PtpManual
        } else if has("pp_auto") || has("ptp_auto") {
            Section::PtpAuto
        } else if has("ecg") {
            Section::Ecg
        } else if has("eog") {
            Section::Eog
        } else if has("head") {
            Section::Head
        } else if has("muscle") {
            Section::Muscle
        } else {
            log::warn!(
                "Derivative '{}' does not match any known report section",
                name
            );
            Section::Unclassified
        }
    }
}

/// One computed output of the QC pipeline, attached to a report section.
///
/// Created by a plotting function, consumed once by the report assembler.
/// Not mutated after creation.
pub struct QcDerivative {
    pub content: DerivativeContent,
    pub name: String,
    pub description: String,
}

impl QcDerivative {
    pub fn new(content: DerivativeContent, name: &str, description: &str) -> Self {
        Self {
            content,
            name: name.to_string(),
            description: description.to_string(),
        }
    }

    /// Wrap a plotly figure as a derivative.
    pub fn plotly(plot: Plot, name: &str, description: &str) -> Self {
        Self::new(DerivativeContent::Plotly(Box::new(plot)), name, description)
    }

    pub fn content_type(&self) -> ContentType {
        match self.content {
            DerivativeContent::Plotly(_) => ContentType::Plotly,
            DerivativeContent::Matplotlib(_) => ContentType::Matplotlib,
            DerivativeContent::Csv(_) => ContentType::Csv,
            DerivativeContent::None => ContentType::None,
        }
    }

    /// Whether the derivative renders as a figure inside the report.
    pub fn is_figure(&self) -> bool {
        matches!(
            self.content_type(),
            ContentType::Plotly | ContentType::Matplotlib
        )
    }

    /// Section this derivative belongs to, classified from its name.
    pub fn section(&self) -> Section {
        Section::from_derivative_name(&self.name)
    }

    /// Deterministic html element id for the embedded figure div.
    pub fn div_id(&self) -> String {
        self.name
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_lowercase()
                } else {
                    '-'
                }
            })
            .collect()
    }

    /// Render the figure as an embeddable fragment followed by its
    /// description. Non-figure content renders to an empty fragment.
    pub fn to_html(&self) -> Markup {
        let figure = match &self.content {
            DerivativeContent::Plotly(plot) => {
                PreEscaped(plot.to_inline_html(Some(&self.div_id())))
            }
            DerivativeContent::Matplotlib(markup) => PreEscaped(markup.clone()),
            DerivativeContent::Csv(_) | DerivativeContent::None => return html! {},
        };
        html! {
            (figure)
            p { (self.description) }
            br;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn std_names_classify_as_std() {
        assert_eq!(Section::from_derivative_name("Stds_epochs_per_channel_Magnetometers"), Section::Std);
        assert_eq!(Section::from_derivative_name("rmse_over_all_data"), Section::Std);
        assert_eq!(Section::from_derivative_name("RMSE_of_channels"), Section::Std);
        assert_eq!(Section::from_derivative_name("big_STD_fig"), Section::Std);
    }

    #[test]
    fn earlier_priority_wins_over_std() {
        // "sensors" outranks "std" in the priority order
        assert_eq!(
            Section::from_derivative_name("sensors_with_std_marked"),
            Section::Sensors
        );
    }

    #[test]
    fn ptp_variants_classify() {
        assert_eq!(Section::from_derivative_name("PP_manual_all_data_Gradiometers"), Section::PtpManual);
        assert_eq!(Section::from_derivative_name("ptp_auto_amplitudes"), Section::PtpAuto);
    }

    #[test]
    fn artifact_names_classify() {
        assert_eq!(Section::from_derivative_name("ECG_affected_channels"), Section::Ecg);
        assert_eq!(Section::from_derivative_name("mean_eog_epoch"), Section::Eog);
        assert_eq!(Section::from_derivative_name("Head_position_rotation"), Section::Head);
        assert_eq!(Section::from_derivative_name("muscle_events"), Section::Muscle);
    }

    #[test]
    fn unknown_name_is_unclassified() {
        assert_eq!(Section::from_derivative_name("mystery_output"), Section::Unclassified);
    }

    #[test]
    fn content_type_follows_payload() {
        let table = QcDerivative::new(
            DerivativeContent::Csv(TableData::default()),
            "std_table",
            "per-channel values",
        );
        assert_eq!(table.content_type(), ContentType::Csv);
        assert!(!table.is_figure());

        let fig = QcDerivative::plotly(Plot::new(), "PSD_fig", "spectrum");
        assert_eq!(fig.content_type(), ContentType::Plotly);
        assert!(fig.is_figure());
        assert_eq!(fig.section(), Section::Psd);
    }

    #[test]
    fn non_figure_renders_empty() {
        let table = QcDerivative::new(
            DerivativeContent::Csv(TableData::default()),
            "std_table",
            "per-channel values",
        );
        assert!(table.to_html().into_string().is_empty());
    }

    #[test]
    fn div_id_is_sanitized() {
        let fig = QcDerivative::plotly(Plot::new(), "PSD over all (mag)", "spectrum");
        assert_eq!(fig.div_id(), "psd-over-all--mag-");
    }
}

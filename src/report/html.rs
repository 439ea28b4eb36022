//! HTML section rendering and the two report assembly modes.
//!
//! Mode (a), `make_joined_report`, concatenates every section fragment into
//! one standalone document. Mode (b), `make_joined_report_aggregated`,
//! inserts each fragment, prefixed with a how-to-use preamble, into a
//! `Report` aggregator object.

use std::collections::HashMap;

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::config::ReportConfig;
use crate::derivative::{QcDerivative, Section};
use crate::report::builder::{Report, ReportSection};

/// Placeholder shown when a section has derivatives but none is a figure.
pub const NO_FIGURES_NOTE: &str = "This measurement has no figures. Please see csv files.";

/// Caller-supplied notes to be added to the report: general notes plus a
/// note about every measurement (when it was not calculated, for example).
/// This is not a detailed description of the measurement.
#[derive(Debug, Clone, Default)]
pub struct ReportStrings {
    pub shielding: String,
    pub m_or_g_skipped: String,
    pub epoching: String,
    notes: HashMap<Section, String>,
}

impl ReportStrings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_note(&mut self, section: Section, note: impl Into<String>) {
        self.notes.insert(section, note.into());
    }

    /// Note for one section; missing notes degrade to an empty string.
    pub fn note(&self, section: Section) -> &str {
        match self.notes.get(&section) {
            Some(note) => note,
            None => {
                log::debug!("No report note supplied for section {:?}", section);
                ""
            }
        }
    }
}

/// Summary of the raw recording handle produced by the acquisition
/// pipeline, shown as the overview of an aggregated report.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RawInfo {
    pub subject: String,
    pub n_channels: usize,
    pub sampling_rate_hz: f64,
    pub duration_secs: f64,
    pub recording_date: Option<String>,
}

impl RawInfo {
    fn to_table(&self) -> Markup {
        html! {
            table class="raw-info" {
                tr { th { "Subject" } td { (self.subject) } }
                tr { th { "Channels" } td { (self.n_channels) } }
                tr { th { "Sampling rate" } td { (format!("{} Hz", self.sampling_rate_hz)) } }
                tr { th { "Duration" } td { (format!("{:.1} s", self.duration_secs)) } }
                @if let Some(date) = &self.recording_date {
                    tr { th { "Recorded" } td { (date) } }
                }
            }
        }
    }
}

/// Keep only the derivatives that render as figures.
pub fn keep_fig_derivs(derivs: &[QcDerivative]) -> Vec<&QcDerivative> {
    derivs.iter().filter(|d| d.is_figure()).collect()
}

/// Group derivatives by their classified section, in fixed display order.
///
/// This keeps classification and grouping on one source of truth: the
/// section a derivative renders under is always the section its name
/// classifies into.
pub fn group_by_section(derivs: Vec<QcDerivative>) -> Vec<(Section, Vec<QcDerivative>)> {
    let mut grouped: HashMap<Section, Vec<QcDerivative>> = HashMap::new();
    for deriv in derivs {
        grouped.entry(deriv.section()).or_default().push(deriv);
    }
    Section::ORDER
        .iter()
        .filter_map(|section| grouped.remove(section).map(|d| (*section, d)))
        .collect()
}

/// Static "how to use figures" preamble for one section; empty markup for
/// sections without one.
pub fn howto_use_plots(section: Section) -> Markup {
    match section.how_to_use() {
        Some(text) => html! {
            (PreEscaped("<!-- *** Section *** -->"))
            center {
                h4 { "How to use figures" }
                (PreEscaped(text))
                br; br; br;
            }
        },
        None => html! {},
    }
}

/// Create one section of the html report. One section describes one metric
/// like "ECG" or "EOG", "Head position" or "Muscle".
///
/// - Adds the section title.
/// - Adds the caller's note if one was supplied (for example: head
///   positions not calculated).
/// - Keeps only the figures among the section derivatives and puts them one
///   after another, each with its description underneath.
///
/// # Arguments
///
/// * `derivs` - derivatives belonging to this section.
/// * `section` - the section being rendered.
/// * `strings` - caller-supplied report notes.
pub fn make_metric_section(
    derivs: &[QcDerivative],
    section: Section,
    strings: &ReportStrings,
) -> Markup {
    let figs = keep_fig_derivs(derivs);

    let intro: Markup = if !derivs.is_empty() && figs.is_empty() {
        html! { p { (NO_FIGURES_NOTE) } }
    } else {
        match section {
            // the initial info note arrives pre-formatted
            Section::InitialInfo => PreEscaped(strings.note(section).to_string()),
            Section::Sensors => html! { p {} },
            _ => html! { p { (strings.note(section)) } },
        }
    };

    html! {
        (PreEscaped("<!-- *** Section *** -->"))
        center {
            h2 { (section.header()) }
            (intro)
            @for fig in &figs {
                (fig.to_html())
            }
            br; br;
        }
    }
}

/// How-to-use preamble followed by the metric section itself. Used as the
/// whole report fragment for one metric in the aggregated mode.
pub fn combine_howto_and_metric(
    derivs: &[QcDerivative],
    section: Section,
    strings: &ReportStrings,
) -> Markup {
    let howto = howto_use_plots(section);
    let metric = make_metric_section(derivs, section, strings);
    html! {
        (howto)
        (metric)
    }
}

/// Assemble the report as one standalone html document with all sections.
///
/// Sections appear in the order given; there is no deduplication, and a
/// section missing from `sections` is simply absent from the output.
pub fn make_joined_report(
    sections: &[(Section, Vec<QcDerivative>)],
    strings: &ReportStrings,
    config: &ReportConfig,
) -> String {
    let fragments = html! {
        @for (section, derivs) in sections {
            (make_metric_section(derivs, *section, strings))
        }
    };

    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                title { (config.title) }
                style { "body { margin: 0 100px; }" }
            }
            body style="font-family: Arial" {
                center {
                    h1 { (config.title) }
                    br;
                    (PreEscaped(&strings.shielding))
                    (PreEscaped(&strings.m_or_g_skipped))
                    (PreEscaped(&strings.epoching))
                    (fragments)
                }
            }
        }
    }
    .into_string()
}

/// Assemble the report into a section-based `Report` aggregator object.
///
/// When a raw recording summary is supplied and the config asks for it, an
/// overview section is added first. Every non-empty section is inserted as
/// how-to preamble plus metric fragment under the section header; empty
/// sections are skipped.
pub fn make_joined_report_aggregated(
    raw: Option<&RawInfo>,
    sections: &[(Section, Vec<QcDerivative>)],
    strings: &ReportStrings,
    config: &ReportConfig,
) -> Report {
    let mut report = Report::new(
        "megqc-report",
        env!("CARGO_PKG_VERSION"),
        None,
        &config.title,
    );

    if let Some(raw) = raw {
        if config.add_raw_overview {
            let mut overview = ReportSection::new("Raw recording");
            overview.add_content(raw.to_table());
            report.add_section(overview);
        }
    }

    for (section, derivs) in sections {
        if derivs.is_empty() {
            log::debug!("Skipping empty report section {:?}", section);
            continue;
        }
        let mut report_section = ReportSection::new(section.header());
        report_section.add_content(combine_howto_and_metric(derivs, *section, strings));
        report.add_section(report_section);
    }

    report
}

//! Integration tests for report section rendering and the two assembly
//! modes, driven through the public plot builders.

use ndarray::{Array1, Array2};

use megqc_report::config::ReportConfig;
use megqc_report::derivative::{DerivativeContent, QcDerivative, Section, TableData};
use megqc_report::plots::boxplots::boxplot_epochs_per_channel;
use megqc_report::plots::psd::plot_periodogram;
use megqc_report::plots::{AmplitudeMeasure, ChannelKind};
use megqc_report::report::{
    group_by_section, make_joined_report, make_joined_report_aggregated, RawInfo, ReportStrings,
};

fn ch_names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("MEG 0{:02}", i)).collect()
}

fn std_fig() -> QcDerivative {
    let data = Array2::from_elem((3, 5), 2e-12);
    boxplot_epochs_per_channel(
        &data,
        &ch_names(3),
        ChannelKind::Magnetometers,
        AmplitudeMeasure::Stds,
    )
    .unwrap()
}

fn psd_fig() -> QcDerivative {
    let freqs = Array1::from_vec(vec![1.0, 2.0, 4.0, 8.0]);
    let psds = Array2::from_elem((3, 4), 4e-24);
    plot_periodogram(&freqs, &psds, &ch_names(3), ChannelKind::Magnetometers).unwrap()
}

fn csv_table() -> QcDerivative {
    QcDerivative::new(
        DerivativeContent::Csv(TableData {
            headers: vec!["channel".to_string(), "std".to_string()],
            rows: vec![vec!["MEG 001".to_string(), "2e-12".to_string()]],
        }),
        "Stds_table_Magnetometers",
        "Per-channel values",
    )
}

#[test]
fn joined_report_has_fixed_header_footer_and_order() {
    let sections = vec![
        (Section::Std, vec![std_fig()]),
        (Section::Psd, vec![psd_fig()]),
    ];
    let strings = ReportStrings::new();
    let config = ReportConfig::default();

    let html = make_joined_report(&sections, &strings, &config);

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.ends_with("</html>"));
    assert!(html.contains("<h1>MEG data quality analysis report</h1>"));

    let std_pos = html.find("Standard deviation of the data").unwrap();
    let psd_pos = html.find("Frequency spectrum").unwrap();
    assert!(std_pos < psd_pos);
}

#[test]
fn joined_report_keeps_caller_supplied_order() {
    let sections = vec![
        (Section::Psd, vec![psd_fig()]),
        (Section::Std, vec![std_fig()]),
    ];
    let html = make_joined_report(&sections, &ReportStrings::new(), &ReportConfig::default());
    let psd_pos = html.find("Frequency spectrum").unwrap();
    let std_pos = html.find("Standard deviation of the data").unwrap();
    assert!(psd_pos < std_pos);
}

#[test]
fn joined_report_embeds_general_notes() {
    let mut strings = ReportStrings::new();
    strings.shielding = "<p>Active shielding was on.</p>".to_string();
    strings.epoching = "<p>Epoched into 5 epochs.</p>".to_string();

    let html = make_joined_report(&[], &strings, &ReportConfig::default());
    assert!(html.contains("Active shielding was on."));
    assert!(html.contains("Epoched into 5 epochs."));
}

#[test]
fn table_only_section_renders_csv_placeholder() {
    let sections = vec![(Section::Std, vec![csv_table()])];
    let html = make_joined_report(&sections, &ReportStrings::new(), &ReportConfig::default());
    assert!(html.contains("This measurement has no figures. Please see csv files."));
}

#[test]
fn figure_descriptions_follow_figures() {
    let sections = vec![(Section::Std, vec![std_fig()])];
    let html = make_joined_report(&sections, &ReportStrings::new(), &ReportConfig::default());
    assert!(html.contains("Each box shows the standard deviation"));
}

#[test]
fn aggregated_report_skips_empty_sections_and_adds_howto() {
    let sections = vec![
        (Section::Std, vec![std_fig()]),
        (Section::Muscle, vec![]),
    ];
    let strings = ReportStrings::new();
    let config = ReportConfig::default();

    let report = make_joined_report_aggregated(None, &sections, &strings, &config);
    assert_eq!(report.section_titles(), vec!["Standard deviation of the data"]);

    let html = report.render().into_string();
    assert!(html.contains("How to use figures"));
    assert!(!html.contains("High frequency (Muscle) artifacts"));
}

#[test]
fn aggregated_report_includes_raw_overview_when_configured() {
    let raw = RawInfo {
        subject: "009".to_string(),
        n_channels: 306,
        sampling_rate_hz: 1000.0,
        duration_secs: 300.0,
        recording_date: None,
    };
    let sections = vec![(Section::Std, vec![std_fig()])];
    let strings = ReportStrings::new();

    let config = ReportConfig::default();
    let report = make_joined_report_aggregated(Some(&raw), &sections, &strings, &config);
    assert_eq!(
        report.section_titles(),
        vec!["Raw recording", "Standard deviation of the data"]
    );

    let mut no_overview = ReportConfig::default();
    no_overview.add_raw_overview = false;
    let report = make_joined_report_aggregated(Some(&raw), &sections, &strings, &no_overview);
    assert_eq!(report.section_titles(), vec!["Standard deviation of the data"]);
}

#[test]
fn grouping_agrees_with_classification_end_to_end() {
    let sections = group_by_section(vec![psd_fig(), std_fig(), csv_table()]);
    // Std figures and the std table group together, ahead of Psd
    assert_eq!(sections[0].0, Section::Std);
    assert_eq!(sections[0].1.len(), 2);
    assert_eq!(sections[1].0, Section::Psd);
    for (section, derivs) in &sections {
        for deriv in derivs {
            assert_eq!(deriv.section(), *section);
        }
    }
}

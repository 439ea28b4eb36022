use anyhow::Result;
use ndarray::{Array1, Array2};
use rand::Rng;
use serde_json::json;

use megqc_report::config::ReportConfig;
use megqc_report::derivative::{DerivativeContent, QcDerivative, Section, TableData};
use megqc_report::io::FigureStore;
use megqc_report::plots::boxplots::{boxplot_all_data, boxplot_epochs_per_channel};
use megqc_report::plots::psd::{plot_periodogram, plot_pie_chart_freq};
use megqc_report::plots::{AmplitudeMeasure, ChannelKind};
use megqc_report::report::{
    group_by_section, make_joined_report, make_joined_report_aggregated, simple_metric_basic,
    RawInfo, ReportStrings,
};

const N_CHANNELS: usize = 12;
const N_EPOCHS: usize = 20;
const N_FREQS: usize = 120;

fn channel_names(kind: ChannelKind) -> Vec<String> {
    let prefix = match kind {
        ChannelKind::Magnetometers => "MEG1",
        ChannelKind::Gradiometers => "MEG2",
    };
    (0..N_CHANNELS).map(|i| format!("{}{:02}", prefix, i)).collect()
}

fn synthetic_measures(rng: &mut impl Rng, scale: f64) -> (Array2<f64>, Vec<f64>) {
    let per_epoch =
        Array2::from_shape_fn((N_CHANNELS, N_EPOCHS), |_| rng.gen_range(0.5..1.5) * scale);
    let whole: Vec<f64> = (0..N_CHANNELS)
        .map(|_| rng.gen_range(0.5..1.5) * scale)
        .collect();
    (per_epoch, whole)
}

fn build_derivatives(rng: &mut impl Rng, kind: ChannelKind) -> Result<Vec<QcDerivative>> {
    let names = channel_names(kind);
    let scale = match kind {
        ChannelKind::Magnetometers => 1e-12,
        ChannelKind::Gradiometers => 1e-11,
    };

    let mut derivs = Vec::new();

    let (stds_per_epoch, stds_whole) = synthetic_measures(rng, scale);
    derivs.push(boxplot_epochs_per_channel(
        &stds_per_epoch,
        &names,
        kind,
        AmplitudeMeasure::Stds,
    )?);
    derivs.push(boxplot_all_data(
        &stds_whole,
        &names,
        kind,
        AmplitudeMeasure::Stds,
    )?);

    let (ptp_per_epoch, ptp_whole) = synthetic_measures(rng, scale * 4.0);
    derivs.push(boxplot_epochs_per_channel(
        &ptp_per_epoch,
        &names,
        kind,
        AmplitudeMeasure::Peaks,
    )?);
    derivs.push(boxplot_all_data(
        &ptp_whole,
        &names,
        kind,
        AmplitudeMeasure::Peaks,
    )?);

    let freqs = Array1::from_shape_fn(N_FREQS, |i| 0.5 + i as f64 * 0.5);
    let psds = Array2::from_shape_fn((N_CHANNELS, N_FREQS), |(_, f)| {
        let freq = 0.5 + f as f64 * 0.5;
        (scale / (1.0 + freq)).powi(2) * rng.gen_range(0.5..1.5)
    });
    derivs.push(plot_periodogram(&freqs, &psds, &names, kind)?);
    derivs.push(plot_pie_chart_freq(&[0.35, 0.25, 0.2, 0.1, 0.05], kind)?);

    // one tabular derivative to demonstrate the csv path
    derivs.push(QcDerivative::new(
        DerivativeContent::Csv(TableData {
            headers: vec!["channel".to_string(), "std".to_string()],
            rows: names
                .iter()
                .zip(&stds_whole)
                .map(|(name, std)| vec![name.clone(), format!("{:e}", std)])
                .collect(),
        }),
        &format!("Stds_table_{}", kind.title()),
        "Per-channel standard deviation values",
    ));

    Ok(derivs)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = rand::thread_rng();
    let mut derivs = build_derivatives(&mut rng, ChannelKind::Magnetometers)?;
    derivs.extend(build_derivatives(&mut rng, ChannelKind::Gradiometers)?);

    let store = FigureStore::new("qc_demo_output/derivatives", "001");
    let written = store.save_all(&derivs)?;
    println!("Wrote {} derivative files", written.len());

    let mut strings = ReportStrings::new();
    strings.epoching = "<p>Data were epoched into 20 fixed-length epochs.</p>".to_string();
    strings.set_note(Section::Std, "Standard deviation was calculated per channel and per epoch.");
    strings.set_note(Section::Psd, "Power spectra were computed with Welch's method.");
    strings.set_note(Section::PtpManual, "Peak-to-peak amplitudes, manual thresholds.");

    let config = ReportConfig::default();
    let sections = group_by_section(derivs);

    let joined = make_joined_report(&sections, &strings, &config);
    std::fs::write("qc_demo_output/qc_report.html", joined)?;

    let raw = RawInfo {
        subject: "001".to_string(),
        n_channels: N_CHANNELS * 2,
        sampling_rate_hz: 1000.0,
        duration_secs: 600.0,
        recording_date: Some("2024-05-14".to_string()),
    };
    let report = make_joined_report_aggregated(Some(&raw), &sections, &strings, &config);
    report.save_to_file("qc_demo_output/qc_report_sections.html")?;

    let metric = simple_metric_basic(
        "STD_all_time_series",
        "Standard deviation of the data over the whole time series",
        json!({"number_of_noisy_ch": 1}),
        json!({"number_of_noisy_ch": 0}),
        None,
        false,
        true,
    );
    std::fs::write(
        "qc_demo_output/simple_metric_std.json",
        serde_json::to_string_pretty(&metric)?,
    )?;

    println!("Reports written to qc_demo_output/");
    Ok(())
}

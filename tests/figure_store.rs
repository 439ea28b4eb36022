//! Integration tests for the derivatives output tree.

use megqc_report::derivative::{DerivativeContent, QcDerivative, TableData};
use megqc_report::io::FigureStore;
use megqc_report::plots::boxplots::boxplot_all_data;
use megqc_report::plots::{AmplitudeMeasure, ChannelKind};

fn std_fig() -> QcDerivative {
    boxplot_all_data(
        &[1e-12, 2e-12],
        &["MEG 001".to_string(), "MEG 002".to_string()],
        ChannelKind::Magnetometers,
        AmplitudeMeasure::Stds,
    )
    .unwrap()
}

#[test]
fn figure_lands_under_fixed_relative_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let store = FigureStore::new(dir.path(), "1");

    let path = store.save(&std_fig()).unwrap().unwrap();
    assert_eq!(
        path,
        dir.path()
            .join("sub-1")
            .join("megqc")
            .join("figures")
            .join("Stds_all_data_Magnetometers.html")
    );
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("<html"));
    assert!(contents.contains("plotly"));
}

#[test]
fn static_figure_markup_is_wrapped_into_a_page() {
    let dir = tempfile::tempdir().unwrap();
    let store = FigureStore::new(dir.path(), "1");

    let deriv = QcDerivative::new(
        DerivativeContent::Matplotlib("<img src=\"data:image/png;base64,AAAA\">".to_string()),
        "head_rotation_static",
        "Head rotation over time",
    );
    let path = store.save(&deriv).unwrap().unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("<!DOCTYPE html>"));
    assert!(contents.contains("data:image/png;base64,AAAA"));
}

#[test]
fn table_round_trips_through_csv() {
    let dir = tempfile::tempdir().unwrap();
    let store = FigureStore::new(dir.path(), "007");

    let deriv = QcDerivative::new(
        DerivativeContent::Csv(TableData {
            headers: vec!["channel".to_string(), "std".to_string()],
            rows: vec![
                vec!["MEG 001".to_string(), "2e-12".to_string()],
                vec!["MEG 002".to_string(), "3e-12".to_string()],
            ],
        }),
        "Stds_table_Magnetometers",
        "Per-channel values",
    );

    let path = store.save(&deriv).unwrap().unwrap();
    assert!(path.ends_with("sub-007/megqc/csvs/Stds_table_Magnetometers.csv"));

    let mut reader = csv::Reader::from_path(&path).unwrap();
    assert_eq!(
        reader.headers().unwrap().iter().collect::<Vec<_>>(),
        vec!["channel", "std"]
    );
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[1][0], "MEG 002");
}

#[test]
fn empty_content_saves_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = FigureStore::new(dir.path(), "1");

    let deriv = QcDerivative::new(DerivativeContent::None, "placeholder", "nothing here");
    assert!(store.save(&deriv).unwrap().is_none());
}

#[test]
fn save_all_writes_every_savable_derivative() {
    let dir = tempfile::tempdir().unwrap();
    let store = FigureStore::new(dir.path(), "1");

    let derivs = vec![
        std_fig(),
        QcDerivative::new(DerivativeContent::None, "placeholder", "nothing here"),
        QcDerivative::new(
            DerivativeContent::Csv(TableData::default()),
            "empty_table",
            "no rows",
        ),
    ];
    let written = store.save_all(&derivs).unwrap();
    assert_eq!(written.len(), 2);
    for path in &written {
        assert!(path.exists());
    }
}

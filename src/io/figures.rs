//! Writes derivatives into the BIDS-style derivatives tree.
//!
//! Figures land under `<root>/sub-<subject>/megqc/figures/<name>.html`,
//! tabular derivatives under `<root>/sub-<subject>/megqc/csvs/<name>.csv`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::derivative::{DerivativeContent, QcDerivative, TableData};

/// Saves QC derivatives for one subject.
#[derive(Debug, Clone)]
pub struct FigureStore {
    derivatives_root: PathBuf,
    subject: String,
}

impl FigureStore {
    pub fn new<P: Into<PathBuf>>(derivatives_root: P, subject: &str) -> Self {
        Self {
            derivatives_root: derivatives_root.into(),
            subject: subject.to_string(),
        }
    }

    fn subject_dir(&self) -> PathBuf {
        self.derivatives_root
            .join(format!("sub-{}", self.subject))
            .join("megqc")
    }

    pub fn figures_dir(&self) -> PathBuf {
        self.subject_dir().join("figures")
    }

    pub fn csvs_dir(&self) -> PathBuf {
        self.subject_dir().join("csvs")
    }

    pub fn figure_path(&self, name: &str) -> PathBuf {
        self.figures_dir().join(format!("{}.html", name))
    }

    pub fn csv_path(&self, name: &str) -> PathBuf {
        self.csvs_dir().join(format!("{}.csv", name))
    }

    /// Save one derivative: figures as html, tables as csv. Returns the
    /// written path, or `None` when there is nothing to save.
    pub fn save(&self, deriv: &QcDerivative) -> Result<Option<PathBuf>> {
        let path = match &deriv.content {
            DerivativeContent::Plotly(plot) => {
                let path = self.figure_path(&deriv.name);
                ensure_parent(&path)?;
                fs::write(&path, plot.to_html())
                    .with_context(|| format!("Failed to write figure {}", path.display()))?;
                path
            }
            DerivativeContent::Matplotlib(markup) => {
                let path = self.figure_path(&deriv.name);
                ensure_parent(&path)?;
                fs::write(&path, wrap_static_figure(&deriv.name, markup))
                    .with_context(|| format!("Failed to write figure {}", path.display()))?;
                path
            }
            DerivativeContent::Csv(table) => {
                let path = self.csv_path(&deriv.name);
                ensure_parent(&path)?;
                write_csv(&path, table)?;
                path
            }
            DerivativeContent::None => return Ok(None),
        };
        log::debug!("Saved derivative '{}' to {}", deriv.name, path.display());
        Ok(Some(path))
    }

    /// Save every derivative, fanning out over the thread pool. Fails on
    /// the first error.
    pub fn save_all(&self, derivs: &[QcDerivative]) -> Result<Vec<PathBuf>> {
        let written = derivs
            .par_iter()
            .map(|d| self.save(d))
            .collect::<Result<Vec<Option<PathBuf>>>>()?;
        let written: Vec<PathBuf> = written.into_iter().flatten().collect();
        log::info!(
            "Saved {} of {} derivatives under {}",
            written.len(),
            derivs.len(),
            self.subject_dir().display()
        );
        Ok(written)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    Ok(())
}

/// Minimal standalone page around pre-rendered static figure markup.
fn wrap_static_figure(title: &str, markup: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"UTF-8\"><title>{}</title></head>\n<body>{}</body>\n</html>",
        title, markup
    )
}

fn write_csv(path: &Path, table: &TableData) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create csv file {}", path.display()))?;
    if !table.headers.is_empty() {
        writer
            .write_record(&table.headers)
            .context("Failed to write csv header")?;
    }
    for row in &table.rows {
        writer
            .write_record(row)
            .with_context(|| format!("Failed to write csv row in {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush csv file {}", path.display()))?;
    Ok(())
}

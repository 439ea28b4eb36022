use serde::{Deserialize, Serialize};

/// Central configuration for report assembly.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ReportConfig {
    /// Title shown at the top of every assembled report.
    pub title: String,
    /// Add an overview section for the raw recording when one is supplied
    /// to the aggregated assembly mode.
    pub add_raw_overview: bool,
}

impl ReportConfig {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "MEG data quality analysis report".to_string(),
            add_raw_overview: true,
        }
    }
}

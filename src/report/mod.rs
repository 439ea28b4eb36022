//! Report assembly: section rendering plus the two assembly modes
//! (standalone HTML document, section-based report object).
pub mod builder;
pub mod html;
pub mod simple_metric;

pub use builder::{Report, ReportSection};
pub use html::{
    combine_howto_and_metric, group_by_section, howto_use_plots, keep_fig_derivs,
    make_joined_report, make_joined_report_aggregated, make_metric_section, RawInfo,
    ReportStrings,
};
pub use simple_metric::{simple_metric_basic, LocalMetric};

//! Section-based report aggregator.
//!
//! `Report` collects named `ReportSection`s, each holding markup blocks and
//! plots, and renders them into one self-contained HTML document. This is
//! the target of the aggregated assembly mode in `report::html`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Local;
use maud::{html, Markup, PreEscaped, DOCTYPE};
use plotly::Plot;

const REPORT_STYLE: &str = "\
body { font-family: Arial, Helvetica, sans-serif; margin: 0 100px; color: #222; }\n\
header { text-align: center; margin: 24px 0; }\n\
header img.logo { max-height: 80px; }\n\
header p.meta { color: #555; font-size: 13px; }\n\
section { border-top: 1px solid #eee; padding: 16px 0; }\n\
section h2 { font-size: 20px; }\n\
table.raw-info { border-collapse: collapse; margin: 12px auto; }\n\
table.raw-info th, table.raw-info td { border: 1px solid #ddd; padding: 6px 10px; text-align: left; }";

enum Block {
    Content(Markup),
    Plot(Box<Plot>),
}

/// One titled section of the report, rendered in insertion order.
pub struct ReportSection {
    title: String,
    blocks: Vec<Block>,
}

impl ReportSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            blocks: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Append a markup block.
    pub fn add_content(&mut self, content: Markup) {
        self.blocks.push(Block::Content(content));
    }

    /// Append a raw, pre-rendered html fragment.
    pub fn add_html(&mut self, fragment: String) {
        self.blocks.push(Block::Content(PreEscaped(fragment)));
    }

    /// Append an interactive plot, embedded inline at render time.
    pub fn add_plot(&mut self, plot: Plot) {
        self.blocks.push(Block::Plot(Box::new(plot)));
    }

    fn render(&self, section_idx: usize) -> Markup {
        html! {
            section {
                h2 { (self.title) }
                @for (block_idx, block) in self.blocks.iter().enumerate() {
                    @match block {
                        Block::Content(markup) => { div { (markup) } },
                        Block::Plot(plot) => {
                            div {
                                (PreEscaped(plot.to_inline_html(Some(&format!("report-plot-{}-{}", section_idx, block_idx)))))
                            }
                        },
                    }
                }
            }
        }
    }
}

/// A whole report: tool banner plus an ordered list of sections.
pub struct Report {
    tool_name: String,
    version: String,
    logo_url: Option<String>,
    title: String,
    sections: Vec<ReportSection>,
}

impl Report {
    pub fn new(tool_name: &str, version: &str, logo_url: Option<&str>, title: &str) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            version: version.to_string(),
            logo_url: logo_url.map(str::to_string),
            title: title.to_string(),
            sections: Vec::new(),
        }
    }

    pub fn add_section(&mut self, section: ReportSection) {
        self.sections.push(section);
    }

    pub fn section_titles(&self) -> Vec<&str> {
        self.sections.iter().map(|s| s.title()).collect()
    }

    /// Render the full document.
    pub fn render(&self) -> Markup {
        let generated = Local::now().format("%Y-%m-%d %H:%M:%S");
        html! {
            (DOCTYPE)
            html {
                head {
                    meta charset="UTF-8";
                    title { (self.title) }
                    style { (PreEscaped(REPORT_STYLE)) }
                }
                body {
                    header {
                        @if let Some(url) = &self.logo_url {
                            img class="logo" src=(url) alt=(self.tool_name);
                        }
                        h1 { (self.title) }
                        p class="meta" { (self.tool_name) " v" (self.version) ", generated " (generated) }
                    }
                    @for (idx, section) in self.sections.iter().enumerate() {
                        (section.render(idx))
                    }
                }
            }
        }
    }

    /// Write the rendered document to `path`, creating parent directories.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create report directory {}", parent.display()))?;
        }
        fs::write(path, self.render().into_string())
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        log::info!("Report saved to {}", path.display());
        Ok(())
    }
}

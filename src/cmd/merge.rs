use camino::Utf8PathBuf;
use clap::Parser;
use snafu::prelude::*;

use crate::{
    error::*,
    fusion::merge_panels_by_group,
    helpers::{config::FusionConfig, file, output},
};

#[derive(Clone, Debug, Parser)]
pub struct MergeCommand {
    /// Base dashboard (`-` for the standard input)
    #[arg(long)]
    dashboard: Utf8PathBuf,

    /// Panel sources, each holding a panel or a list of panels. Glob patterns are expanded
    #[arg(short, long, required = true, num_args = 1..)]
    panels: Vec<String>,

    /// Write the merged dashboard here instead of the standard output
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Place new groups and panels at the top of the dashboard
    #[arg(short, long)]
    top: bool,

    /// Write the JSON on a single line instead of pretty-printing it
    #[arg(long)]
    compact: bool,
}

impl MergeCommand {
    pub fn run(&self, config: &FusionConfig) -> Result<(), Error> {
        let mut dashboard = file::read_dashboard(&self.dashboard)?;
        let base = dashboard.panels().context(DashboardLoadSnafu {
            path: self.dashboard.clone(),
        })?;
        let incoming = file::read_panel_sources(self.panels.as_slice())?;

        let placement = config.placement(self.top);
        debug!(
            "Merging {} panels into {} with placement {placement:?}",
            incoming.len(),
            self.dashboard
        );

        let merged = merge_panels_by_group(&base, &incoming, placement, &config.layout)
            .context(MergeSnafu {
                path: self.dashboard.clone(),
            })?;
        dashboard.set_panels(&merged).context(MergeSnafu {
            path: self.dashboard.clone(),
        })?;

        output::write(
            self.output.as_deref(),
            &output::format_dashboard(&dashboard, self.compact)?,
        )
    }
}

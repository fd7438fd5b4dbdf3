use camino::Utf8PathBuf;

use std::path::PathBuf;

use crate::fusion::error::FusionError;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    // ===================
    // src/cmd/merge.rs
    // ===================
    #[snafu(display("Failed to merge the panels into dashboard {path}"))]
    Merge {
        path: Utf8PathBuf,
        source: FusionError,
    },

    // ===================
    // src/cmd/repack.rs
    // ===================
    #[snafu(display("Failed to repack the panels of dashboard {path}"))]
    Repack {
        path: Utf8PathBuf,
        source: FusionError,
    },

    // ===================
    // src/helpers/config.rs
    // ===================
    #[snafu(display("Failed to read the configuration file {path}"))]
    ConfigRead {
        path: Utf8PathBuf,
        #[snafu(source(from(Error, Box::new)))]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[snafu(display("Failed to parse TOML from configuration file {path}"))]
    ConfigToml {
        path: Utf8PathBuf,
        source: toml::de::Error,
    },

    #[snafu(display("Invalid layout in configuration file {path}: {field} must be positive, not {value}"))]
    ConfigLayout {
        path: Utf8PathBuf,
        field: String,
        value: i64,
    },

    // ===================
    // src/helpers/file.rs
    // ===================

    //     fn read
    #[snafu(display("read failed to read {path}"))]
    PathRead {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("read failed to read the standard input"))]
    StdinRead { source: std::io::Error },

    //     fn read_dashboard
    #[snafu(display("Failed to load dashboard from {path}"))]
    DashboardLoad {
        path: Utf8PathBuf,
        source: FusionError,
    },

    //     fn read_panel_sources
    #[snafu(display("Failed to load panels from {path}"))]
    PanelSourceLoad {
        path: Utf8PathBuf,
        source: FusionError,
    },

    //     fn glob
    #[snafu(display("glob invalid pattern: {}", pattern))]
    GlobPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[snafu(display("glob invalid read: {}", source.path().display()))]
    Glob { source: glob::GlobError },

    #[snafu(display("glob pattern {pattern} did not match any panel source"))]
    GlobNoMatch { pattern: String },

    #[snafu(display("Utf8PathBuf::from_path_buf failed because path is not valid UTF8: {}", path.display()))]
    InvalidUnicodePath { path: PathBuf },

    // ===================
    // src/helpers/output.rs
    // ===================

    //     fn format_dashboard
    #[snafu(display("Failed to generate a JSON output for the merged dashboard"))]
    OutputJson { source: serde_json::Error },

    //     fn write
    #[snafu(display("Failed to write the merged dashboard to {path}"))]
    OutputWrite {
        path: Utf8PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Failed to write the merged dashboard to the standard output"))]
    StdoutWrite { source: std::io::Error },
}

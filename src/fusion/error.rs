use snafu::prelude::*;

use super::GridPos;

/// Broad category of a [`FusionError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The documents handed to us do not have the expected shape
    MalformedInput,
    /// We failed to encode a value we computed ourselves
    Internal,
}

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum FusionError {
    // Dashboard::from_json
    #[snafu(display("Failed to decode the dashboard document as a JSON object"))]
    DashboardDecode { source: serde_json::Error },

    // Dashboard::panels
    #[snafu(display("Failed to decode the panels field of the dashboard as a list of panels"))]
    DashboardPanels { source: serde_json::Error },

    // PanelSource::from_json
    #[snafu(display("Failed to decode the panel source document"))]
    PanelSourceDecode { source: serde_json::Error },

    #[snafu(display("The panel source document is neither a panel nor a list of panels"))]
    PanelSourceShape,

    // Panel::grid_pos
    #[snafu(display("Failed to decode gridPos of panel {panel}: {raw}"))]
    GridPosDecode {
        panel: String,
        raw: String,
        source: serde_json::Error,
    },

    // merge_panels, repack
    #[snafu(display("Position of panel {panel} does not fit in the grid: {grid_pos:?}"))]
    GridOverflow { panel: String, grid_pos: GridPos },

    // Panel::set_field, Dashboard::set_panels
    #[snafu(display("Failed to encode field {field} back to JSON"))]
    Encode {
        field: String,
        source: serde_json::Error,
    },
}

impl FusionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Encode { .. } => ErrorKind::Internal,
            Self::DashboardDecode { .. }
            | Self::DashboardPanels { .. }
            | Self::PanelSourceDecode { .. }
            | Self::PanelSourceShape
            | Self::GridPosDecode { .. }
            | Self::GridOverflow { .. } => ErrorKind::MalformedInput,
        }
    }
}

use derive_deref::{Deref, DerefMut};
use serde::Serialize;
use serde_json::value::{to_raw_value, RawValue};
use snafu::prelude::*;

use super::{error::*, Map};

/// The `type` of panels which start a new group.
pub const ROW_TYPE: &str = "row";

/// A single dashboard panel.
///
/// Every field is kept as the raw JSON text it was decoded from, so that fields
/// we don't know about are passed through untouched, and so that panels are
/// compared on their exact bytes (see [`Panel::matches`]).
#[derive(Clone, Debug, Default, Serialize, Deserialize, Deref, DerefMut)]
#[serde(transparent)]
pub struct Panel(Map<String, Box<RawValue>>);

impl From<Map<String, Box<RawValue>>> for Panel {
    fn from(fields: Map<String, Box<RawValue>>) -> Panel {
        Panel(fields)
    }
}

impl Panel {
    /// Raw JSON text of a field, if the field is set.
    pub fn raw(&self, field: &str) -> Option<&str> {
        self.get(field).map(|value| value.get())
    }

    /// Two panels are the same visual element when their `title` and `type`
    /// are the exact same JSON text. A missing field only matches a missing field.
    ///
    /// `"CPU"` and `"\u0043PU"` are different panels.
    pub fn matches(&self, other: &Panel) -> bool {
        self.raw("title") == other.raw("title") && self.raw("type") == other.raw("type")
    }

    /// The `type` field, when it can be read as a string.
    pub fn panel_type(&self) -> Option<String> {
        read_str(self.raw("type"))
    }

    /// The `title` field, when it can be read as a string.
    pub fn title(&self) -> Option<String> {
        read_str(self.raw("title"))
    }

    pub fn is_row(&self) -> bool {
        self.panel_type().as_deref() == Some(ROW_TYPE)
    }

    /// Human-friendly name for logs and errors.
    pub fn label(&self) -> String {
        match (self.title(), self.panel_type()) {
            (Some(title), Some(panel_type)) => format!("{title:?} ({panel_type})"),
            (Some(title), None) => format!("{title:?}"),
            (None, Some(panel_type)) => format!("<untitled> ({panel_type})"),
            (None, None) => "<untitled>".to_string(),
        }
    }

    /// Decodes `gridPos`. A panel without one sits at the origin with no size.
    pub fn grid_pos(&self) -> Result<GridPos, FusionError> {
        let Some(raw) = self.get("gridPos") else {
            return Ok(GridPos::default());
        };

        serde_json::from_str(raw.get()).context(GridPosDecodeSnafu {
            panel: self.label(),
            raw: raw.get().to_string(),
        })
    }

    pub fn set_grid_pos(&mut self, grid_pos: &GridPos) -> Result<(), FusionError> {
        self.set_field("gridPos", grid_pos)
    }

    /// Encodes `value` and stores it as `field`.
    pub fn set_field<T: Serialize + ?Sized>(
        &mut self,
        field: &str,
        value: &T,
    ) -> Result<(), FusionError> {
        let raw = to_raw_value(value).context(EncodeSnafu {
            field: field.to_string(),
        })?;
        self.insert(field.to_string(), raw);
        Ok(())
    }

    /// Panels collapsed under a row marker.
    ///
    /// A `panels` field which is not a list of panels counts as no panels at all.
    pub fn nested_panels(&self) -> Vec<Panel> {
        self.get("panels")
            .and_then(|raw| serde_json::from_str::<Vec<Panel>>(raw.get()).ok())
            .unwrap_or_default()
    }

    /// A copy of this row marker, emptied of its nested panels and expanded.
    pub fn expanded_row(&self) -> Result<Panel, FusionError> {
        let mut row = self.clone();
        row.set_field("panels", &Vec::<Panel>::new())?;
        row.set_field("collapsed", &false)?;
        Ok(row)
    }

    /// The content of this panel, placed in `slot`: every field is taken from
    /// `self` except `id` and `gridPos`, which stay those of `slot`.
    ///
    /// When `slot` has no `id` (or no `gridPos`), neither does the result. The
    /// field is left out rather than written as `null`.
    pub fn overwriting(&self, slot: &Panel) -> Panel {
        let mut res = self.clone();
        for field in ["id", "gridPos"] {
            match slot.get(field) {
                Some(value) => {
                    res.insert(field.to_string(), value.clone());
                }
                None => {
                    res.remove(field);
                }
            }
        }
        res
    }
}

/// Reads a raw JSON value as a string. `null` reads as the empty string.
fn read_str(raw: Option<&str>) -> Option<String> {
    serde_json::from_str::<Option<String>>(raw?)
        .ok()
        .map(Option::unwrap_or_default)
}

/// Position and size of a panel, in grid units.
///
/// Members are listed in the order they are encoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridPos {
    pub h: i64,
    pub w: i64,
    pub x: i64,
    pub y: i64,
}

impl GridPos {
    /// The first grid line below the panel, `None` when it would overflow.
    pub fn bottom(&self) -> Option<i64> {
        self.y.checked_add(self.h)
    }
}

/// A whole dashboard document. Only `panels` is ever looked at, the rest is
/// passed through as is.
#[derive(Clone, Debug, Default, Serialize, Deserialize, Deref, DerefMut)]
#[serde(transparent)]
pub struct Dashboard(Map<String, Box<RawValue>>);

impl Dashboard {
    pub fn from_json(json: &str) -> Result<Dashboard, FusionError> {
        serde_json::from_str(json).context(DashboardDecodeSnafu)
    }

    /// Decodes the `panels` field. A missing or `null` field means no panels.
    pub fn panels(&self) -> Result<Vec<Panel>, FusionError> {
        let Some(raw) = self.get("panels") else {
            return Ok(Vec::new());
        };

        let panels: Option<Vec<Panel>> =
            serde_json::from_str(raw.get()).context(DashboardPanelsSnafu)?;
        Ok(panels.unwrap_or_default())
    }

    pub fn set_panels(&mut self, panels: &[Panel]) -> Result<(), FusionError> {
        let raw = to_raw_value(panels).context(EncodeSnafu {
            field: "panels".to_string(),
        })?;
        self.insert("panels".to_string(), raw);
        Ok(())
    }
}

/// The content of a panel source: a single panel or a list of them.
#[derive(Clone, Debug)]
pub enum PanelSource {
    Single(Panel),
    Many(Vec<Panel>),
}

impl PanelSource {
    pub fn from_json(json: &str) -> Result<PanelSource, FusionError> {
        // Raw values can't go through an untagged enum, so look at the document instead
        match json.trim_start().chars().next() {
            Some('{') => Ok(PanelSource::Single(
                serde_json::from_str(json).context(PanelSourceDecodeSnafu)?,
            )),
            Some('[') => Ok(PanelSource::Many(
                serde_json::from_str(json).context(PanelSourceDecodeSnafu)?,
            )),
            _ => PanelSourceShapeSnafu.fail(),
        }
    }

    pub fn into_panels(self) -> Vec<Panel> {
        match self {
            PanelSource::Single(panel) => vec![panel],
            PanelSource::Many(panels) => panels,
        }
    }
}

//! Merging of dashboard panels.
//!
//! A base dashboard and a set of incoming panels are merged group by group,
//! where a group is the run of panels following a `row` marker (or the
//! ungrouped panels before the first marker, see [`UNGROUPED`]).
//!
//! Inside a group, an incoming panel replaces the content of every base panel
//! with the same `title` and `type`, but the base panel keeps its `id` and its
//! `gridPos`. Incoming panels without a match are appended. Once all groups are
//! merged, every panel is repacked on the grid, left to right and top to bottom.

pub mod error;
mod group;
mod group_map;
mod merge;
mod merge_group;
mod panel;
mod repack;

pub use group::{group_by_row, RowGroups, UNGROUPED};
pub use group_map::GroupMap;
pub use merge::merge_panels;
pub use merge_group::merge_panels_by_group;
pub use panel::{Dashboard, GridPos, Panel, PanelSource, ROW_TYPE};
pub use repack::{repack, Shelf};

// Sorted maps, so that re-encoded panels list their fields in a stable order
pub(crate) type Map<K, V> = std::collections::BTreeMap<K, V>;

/// Where groups which only exist in the incoming panels end up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    Top,
    #[default]
    Bottom,
}

impl Placement {
    pub fn from_top_flag(top: bool) -> Placement {
        if top {
            Placement::Top
        } else {
            Placement::Bottom
        }
    }
}

/// Grid constants used when placing and repacking panels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Number of columns in the dashboard grid
    pub grid_width: i64,
    /// Width given to an incoming panel which did not match anything
    pub default_width: i64,
    /// Height given to an incoming panel which did not match anything
    pub default_height: i64,
}

impl Default for LayoutConfig {
    fn default() -> LayoutConfig {
        LayoutConfig {
            grid_width: 24,
            default_width: 6,
            default_height: 2,
        }
    }
}

impl LayoutConfig {
    /// The first setting which is not strictly positive, if any.
    pub fn invalid_field(&self) -> Option<(&'static str, i64)> {
        [
            ("grid_width", self.grid_width),
            ("default_width", self.default_width),
            ("default_height", self.default_height),
        ]
        .into_iter()
        .find(|(_, value)| *value <= 0)
    }
}

#[cfg(test)]
pub(crate) fn panels(json: &str) -> Vec<Panel> {
    serde_json::from_str(json).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_from_flag() {
        assert_eq!(Placement::Top, Placement::from_top_flag(true));
        assert_eq!(Placement::Bottom, Placement::from_top_flag(false));
        assert_eq!(Placement::Bottom, Placement::default());
    }

    #[test]
    fn layout_defaults() {
        let layout = LayoutConfig::default();
        assert_eq!(24, layout.grid_width);
        assert_eq!(6, layout.default_width);
        assert_eq!(2, layout.default_height);
        assert_eq!(None, layout.invalid_field());
    }

    #[test]
    fn layout_sizes_must_be_positive() {
        let layout = LayoutConfig {
            grid_width: 0,
            ..LayoutConfig::default()
        };
        assert_eq!(Some(("grid_width", 0)), layout.invalid_field());

        let layout = LayoutConfig {
            default_height: -2,
            ..LayoutConfig::default()
        };
        assert_eq!(Some(("default_height", -2)), layout.invalid_field());
    }
}

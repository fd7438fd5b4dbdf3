use super::{error::*, GroupMap, Panel, ROW_TYPE};

/// Name of the group holding the panels found before the first row marker.
pub const UNGROUPED: &str = "none";

/// A panel sequence split on its row markers.
#[derive(Clone, Debug, Default)]
pub struct RowGroups {
    /// Content panels of every group, nested panels of row markers included
    pub groups: GroupMap<Vec<Panel>>,
    /// Row marker of every group, expanded and emptied of nested panels
    pub rows: GroupMap<Panel>,
    /// Panels left out because their type is not a string
    pub dropped: usize,
}

/// Splits `panels` into groups, starting a new group at every row marker.
///
/// Panels collapsed under a row marker are flattened into its group, and the
/// marker itself is recorded expanded. A row marker without a readable title
/// opens the [`UNGROUPED`] group again.
///
/// Panels whose `type` cannot be read as a string are left out of every
/// group, and counted in [`RowGroups::dropped`].
pub fn group_by_row(panels: &[Panel]) -> Result<RowGroups, FusionError> {
    let mut res = RowGroups::default();
    let mut group_name = UNGROUPED.to_string();

    for panel in panels {
        let Some(panel_type) = panel.panel_type() else {
            warn!(
                "Panel {} has no string type and is left out of the merge",
                panel.label()
            );
            res.dropped += 1;
            continue;
        };

        if panel_type != ROW_TYPE {
            res.groups
                .get_or_insert_with(&group_name, Vec::new)
                .push(panel.clone());
            continue;
        }

        group_name = panel.title().unwrap_or_else(|| UNGROUPED.to_string());
        let nested = panel.nested_panels();
        debug!(
            "Row {group_name:?} opens a group with {} collapsed panels",
            nested.len()
        );
        res.groups
            .get_or_insert_with(&group_name, Vec::new)
            .extend(nested);
        res.rows.insert(group_name.clone(), panel.expanded_row()?);
    }

    if res.dropped > 0 {
        warn!("{} panels were dropped because of a malformed type", res.dropped);
    }

    Ok(res)
}

use std::collections::BTreeSet;

use super::{
    error::*, group_by_row, merge_panels, repack, GroupMap, LayoutConfig, Panel, Placement,
    UNGROUPED,
};

/// Merges `incoming` panels into the `base` panels of a dashboard, group by group.
///
/// Both sides are split on their row markers (see [`group_by_row`]), and the
/// content of groups sharing a name is merged with [`merge_panels`]. A panel
/// is therefore only ever matched against panels of the same group.
///
/// The result is laid out as:
///
/// - the ungrouped panels, always first
/// - the groups of `base`, in the order of their row markers in `base`
/// - the groups whose row marker only exists in `incoming`, in the order they
///   appear there
///
/// with the last two swapped when `placement` is [`Placement::Top`]. Row
/// markers come out expanded, preferring the marker from `base`. Finally the
/// whole sequence is repacked on the grid.
pub fn merge_panels_by_group(
    base: &[Panel],
    incoming: &[Panel],
    placement: Placement,
    layout: &LayoutConfig,
) -> Result<Vec<Panel>, FusionError> {
    let base_groups = group_by_row(base)?;
    let incoming_groups = group_by_row(incoming)?;

    let mut merged: GroupMap<Vec<Panel>> = GroupMap::new();
    for (name, panels) in base_groups.groups.iter() {
        let panels = match incoming_groups.groups.get(name) {
            Some(updates) => {
                debug!("Merging group {name:?}");
                merge_panels(panels, updates, layout)?
            }
            None => panels.clone(),
        };
        merged.insert(name.to_string(), panels);
    }
    for (name, panels) in incoming_groups.groups.iter() {
        if !merged.contains(name) {
            merged.insert(name.to_string(), panels.clone());
        }
    }

    // Ungrouped panels always go first, so they're never emitted under a row
    let mut emitted_content: BTreeSet<String> = BTreeSet::new();
    emitted_content.insert(UNGROUPED.to_string());

    let mut new_groups: Vec<Panel> = Vec::new();
    for (name, header) in incoming_groups.rows.iter() {
        if base_groups.rows.contains(name) {
            continue;
        }

        info!("Adding new group {name:?}");
        new_groups.push(header.clone());
        if emitted_content.insert(name.to_string()) {
            if let Some(panels) = merged.get(name) {
                new_groups.extend(panels.iter().cloned());
            }
        }
    }

    let mut emitted_headers: BTreeSet<String> = BTreeSet::new();
    let mut existing_groups: Vec<Panel> = Vec::new();
    for panel in base.iter().filter(|panel| panel.is_row()) {
        let title = panel.title().unwrap_or_else(|| UNGROUPED.to_string());
        if !emitted_headers.insert(title.clone()) {
            continue;
        }

        let header = base_groups
            .rows
            .get(&title)
            .or_else(|| incoming_groups.rows.get(&title))
            .unwrap_or(panel);
        existing_groups.push(header.clone());

        if emitted_content.insert(title.clone()) {
            if let Some(panels) = merged.get(&title) {
                existing_groups.extend(panels.iter().cloned());
            }
        }
    }

    let mut res: Vec<Panel> = merged.get(UNGROUPED).cloned().unwrap_or_default();
    match placement {
        Placement::Top => {
            res.extend(new_groups);
            res.extend(existing_groups);
        }
        Placement::Bottom => {
            res.extend(existing_groups);
            res.extend(new_groups);
        }
    }

    info!(
        "Merged {} incoming panels into {} base panels, {} panels in total",
        incoming.len(),
        base.len(),
        res.len()
    );

    repack(res, layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fusion::{panels, GridPos};

    fn merge(base: &str, incoming: &str, placement: Placement) -> Vec<Panel> {
        merge_panels_by_group(
            &panels(base),
            &panels(incoming),
            placement,
            &LayoutConfig::default(),
        )
        .unwrap()
    }

    fn titles(panels: &[Panel]) -> Vec<String> {
        panels
            .iter()
            .map(|p| p.title().unwrap_or_default())
            .collect()
    }

    #[test]
    fn network_row_is_merged() {
        let res = merge(
            r#"[
                {"id": 1, "title": "Network", "type": "row", "collapsed": true, "panels": [
                    {"id": 2, "title": "A", "type": "graph", "extra": "old", "gridPos": {"x": 0, "y": 1, "w": 12, "h": 8}}
                ]}
            ]"#,
            r#"[
                {"id": 10, "title": "Network", "type": "row"},
                {"id": 11, "title": "A", "type": "graph", "extra": "new"},
                {"id": 12, "title": "B", "type": "graph"}
            ]"#,
            Placement::Bottom,
        );

        assert_eq!(vec!["Network", "A", "B"], titles(&res));
        // Header from base, expanded
        assert_eq!(Some("1"), res[0].raw("id"));
        assert_eq!(Some("false"), res[0].raw("collapsed"));
        assert_eq!(Some("[]"), res[0].raw("panels"));
        // A overwritten, keeping its id and size
        assert_eq!(Some("2"), res[1].raw("id"));
        assert_eq!(Some(r#""new""#), res[1].raw("extra"));
        assert_eq!(12, res[1].grid_pos().unwrap().w);
        // B appended
        assert_eq!(Some("12"), res[2].raw("id"));
    }

    #[test]
    fn groups_scope_matching() {
        let res = merge(
            r#"[
                {"title": "A", "type": "row"},
                {"id": 1, "title": "Latency", "type": "graph", "v": "a"}
            ]"#,
            r#"[
                {"title": "B", "type": "row"},
                {"id": 2, "title": "Latency", "type": "graph", "v": "b"}
            ]"#,
            Placement::Bottom,
        );

        assert_eq!(vec!["A", "Latency", "B", "Latency"], titles(&res));
        assert_eq!(Some(r#""a""#), res[1].raw("v"));
        assert_eq!(Some(r#""b""#), res[3].raw("v"));
    }

    #[test]
    fn ungrouped_always_first() {
        let base = r#"[
            {"title": "Top", "type": "text"},
            {"title": "Existing", "type": "row"},
            {"title": "E1", "type": "graph"}
        ]"#;
        let incoming = r#"[
            {"title": "Loose", "type": "text"},
            {"title": "Fresh", "type": "row"},
            {"title": "F1", "type": "graph"}
        ]"#;

        assert_eq!(
            vec!["Top", "Loose", "Existing", "E1", "Fresh", "F1"],
            titles(&merge(base, incoming, Placement::Bottom))
        );
        assert_eq!(
            vec!["Top", "Loose", "Fresh", "F1", "Existing", "E1"],
            titles(&merge(base, incoming, Placement::Top))
        );
    }

    #[test]
    fn new_groups_keep_incoming_order() {
        let incoming = r#"[
            {"title": "Zulu", "type": "row"},
            {"title": "Z1", "type": "graph"},
            {"title": "Alpha", "type": "row"},
            {"title": "A1", "type": "graph"},
            {"title": "Mike", "type": "row"},
            {"title": "M1", "type": "graph"}
        ]"#;

        for _ in 0..5 {
            assert_eq!(
                vec!["Zulu", "Z1", "Alpha", "A1", "Mike", "M1"],
                titles(&merge("[]", incoming, Placement::Bottom))
            );
        }
    }

    #[test]
    fn base_group_order_is_kept() {
        let base = r#"[
            {"title": "Second", "type": "row"},
            {"title": "S1", "type": "graph"},
            {"title": "First", "type": "row"},
            {"title": "F1", "type": "graph"}
        ]"#;
        let incoming = r#"[
            {"title": "First", "type": "row"},
            {"title": "F2", "type": "graph"},
            {"title": "Second", "type": "row"},
            {"title": "S2", "type": "graph"}
        ]"#;

        assert_eq!(
            vec!["Second", "S1", "S2", "First", "F1", "F2"],
            titles(&merge(base, incoming, Placement::Bottom))
        );
    }

    #[test]
    fn repeated_base_row_is_emitted_once() {
        let base = r#"[
            {"title": "Net", "type": "row"},
            {"title": "Rx", "type": "graph"},
            {"title": "Disk", "type": "row"},
            {"title": "IOPS", "type": "graph"},
            {"title": "Net", "type": "row"},
            {"title": "Tx", "type": "graph"}
        ]"#;

        assert_eq!(
            vec!["Net", "Rx", "Tx", "Disk", "IOPS"],
            titles(&merge(base, "[]", Placement::Bottom))
        );
    }

    #[test]
    fn row_titled_none_does_not_duplicate_ungrouped() {
        let base = r#"[
            {"title": "Loose", "type": "graph"},
            {"type": "row"},
            {"title": "Under", "type": "graph"}
        ]"#;

        let res = merge(base, "[]", Placement::Bottom);
        assert_eq!(3, res.len());
        assert_eq!(vec!["Loose", "Under", ""], titles(&res));
        assert!(res[2].is_row());
    }

    #[test]
    fn malformed_types_are_dropped() {
        let res = merge(
            r#"[{"title": "Good", "type": "graph"}, {"title": "Bad", "type": 1}]"#,
            r#"[{"title": "Typeless"}]"#,
            Placement::Bottom,
        );
        assert_eq!(vec!["Good"], titles(&res));
    }

    #[test]
    fn result_is_repacked() {
        let res = merge(
            r#"[
                {"title": "CPU", "type": "graph", "gridPos": {"x": 0, "y": 0, "w": 12, "h": 8}},
                {"title": "Mem", "type": "graph", "gridPos": {"x": 12, "y": 0, "w": 12, "h": 8}},
                {"title": "Net", "type": "row", "gridPos": {"x": 0, "y": 8, "w": 24, "h": 1}},
                {"title": "Rx", "type": "graph", "gridPos": {"x": 0, "y": 9, "w": 8, "h": 4}}
            ]"#,
            r#"[{"title": "Disk", "type": "graph"}]"#,
            Placement::Bottom,
        );

        assert_eq!(vec!["CPU", "Mem", "Disk", "Net", "Rx"], titles(&res));
        let grid: Vec<GridPos> = res.iter().map(|p| p.grid_pos().unwrap()).collect();
        assert_eq!(
            vec![
                GridPos { x: 0, y: 0, w: 12, h: 8 },
                GridPos { x: 12, y: 0, w: 12, h: 8 },
                GridPos { x: 0, y: 8, w: 6, h: 2 },
                GridPos { x: 0, y: 10, w: 24, h: 1 },
                GridPos { x: 0, y: 11, w: 8, h: 4 },
            ],
            grid
        );
    }

    #[test]
    fn merge_with_itself_keeps_every_panel() {
        let ps = r#"[
            {"title": "Top", "type": "text", "gridPos": {"w": 24, "h": 2}},
            {"title": "Net", "type": "row", "gridPos": {"w": 24, "h": 1}},
            {"title": "Rx", "type": "graph", "gridPos": {"w": 12, "h": 8}},
            {"title": "Tx", "type": "graph", "gridPos": {"w": 12, "h": 8}}
        ]"#;
        let res = merge(ps, ps, Placement::Top);
        assert_eq!(vec!["Top", "Net", "Rx", "Tx"], titles(&res));
    }
}

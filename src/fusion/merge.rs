use snafu::prelude::*;

use super::{error::*, GridPos, LayoutConfig, Panel};

/// Merges `incoming` panels into `base`.
///
/// Every panel of `base` is kept in order. Each incoming panel then overwrites
/// *every* panel it matches (see [`Panel::matches`]), leaving the matched
/// panel's `id` and `gridPos` in place. Duplicates in `base` are therefore all
/// overwritten the same way.
///
/// An incoming panel without a match is appended below the lowest base panel,
/// with the default size from `layout`. The bottom is tracked as a running
/// counter, bumped by the default height for each appended panel, not
/// recomputed from where panels actually end up. The final repacking pass
/// takes care of overlaps.
///
/// Errors when a `gridPos` cannot be decoded, or when the bottom of the
/// dashboard no longer fits in an `i64`.
pub fn merge_panels(
    base: &[Panel],
    incoming: &[Panel],
    layout: &LayoutConfig,
) -> Result<Vec<Panel>, FusionError> {
    let mut res: Vec<Panel> = Vec::with_capacity(base.len() + incoming.len());
    let mut max_bottom: i64 = 0;

    for panel in base {
        let grid_pos = panel.grid_pos()?;
        let bottom = grid_pos.bottom().context(GridOverflowSnafu {
            panel: panel.label(),
            grid_pos,
        })?;
        max_bottom = max_bottom.max(bottom);
        res.push(panel.clone());
    }

    for update in incoming {
        let mut matched = false;
        for slot in res.iter_mut() {
            if slot.matches(update) {
                debug!("Panel {} overwrites an existing panel", update.label());
                *slot = update.overwriting(slot);
                matched = true;
            }
        }

        if !matched {
            let mut grid_pos = GridPos {
                h: layout.default_height,
                w: layout.default_width,
                x: 0,
                y: max_bottom,
            };
            let overflow = GridOverflowSnafu {
                panel: update.label(),
                grid_pos,
            };
            grid_pos.y = max_bottom.checked_add(1).context(overflow.clone())?;
            max_bottom = max_bottom.checked_add(grid_pos.h).context(overflow)?;
            debug!("Panel {} is new, appending at y={}", update.label(), grid_pos.y);

            let mut added = update.clone();
            added.set_grid_pos(&grid_pos)?;
            res.push(added);
        }
    }

    Ok(res)
}

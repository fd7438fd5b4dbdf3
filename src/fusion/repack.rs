use snafu::prelude::*;

use super::{error::*, LayoutConfig, Panel};

/// Shelf packing state: panels are laid left to right, and a new shelf is
/// started below the tallest panel of the current one once the next panel
/// does not fit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Shelf {
    cursor_y: i64,
    row_width: i64,
    row_max_height: i64,
}

impl Shelf {
    pub fn new() -> Shelf {
        Shelf::default()
    }

    /// Returns the `(x, y)` of the next panel of size `w`×`h`, or `None` when
    /// the shelf would grow past `i64::MAX`.
    pub fn place(&mut self, w: i64, h: i64, grid_width: i64) -> Option<(i64, i64)> {
        if self.row_width.checked_add(w)? > grid_width {
            self.cursor_y = self.cursor_y.checked_add(self.row_max_height)?;
            self.row_width = 0;
            self.row_max_height = 0;
        }

        let pos = (self.row_width, self.cursor_y);
        self.row_width = self.row_width.checked_add(w)?;
        self.row_max_height = self.row_max_height.max(h);
        Some(pos)
    }
}

/// Rewrites the `x` and `y` of every panel so they don't overlap, keeping
/// their order, width and height.
///
/// Panels without a `gridPos` are treated as empty and are given one.
pub fn repack(panels: Vec<Panel>, layout: &LayoutConfig) -> Result<Vec<Panel>, FusionError> {
    let mut shelf = Shelf::new();

    panels
        .into_iter()
        .map(|mut panel| -> Result<Panel, FusionError> {
            let mut grid_pos = panel.grid_pos()?;
            (grid_pos.x, grid_pos.y) = shelf
                .place(grid_pos.w, grid_pos.h, layout.grid_width)
                .context(GridOverflowSnafu {
                    panel: panel.label(),
                    grid_pos,
                })?;
            panel.set_grid_pos(&grid_pos)?;
            Ok(panel)
        })
        .collect()
}

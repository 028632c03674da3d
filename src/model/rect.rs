// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Patchbay-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Patchbay and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Width assigned to every newly created box.
pub const DEFAULT_BOX_WIDTH: f64 = 80.0;
/// Height assigned to every newly created box.
pub const DEFAULT_BOX_HEIGHT: f64 = 22.0;

/// Patching rectangle of a box, edges in patcher coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    left: f64,
    top: f64,
    right: f64,
    bottom: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Rectangle of a freshly created box at `(left, top)` with the default size.
    pub fn at(left: f64, top: f64) -> Self {
        Self::new(left, top, left + DEFAULT_BOX_WIDTH, top + DEFAULT_BOX_HEIGHT)
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn right(&self) -> f64 {
        self.right
    }

    pub fn bottom(&self) -> f64 {
        self.bottom
    }

    pub fn edges(&self) -> [f64; 4] {
        [self.left, self.top, self.right, self.bottom]
    }
}

impl From<[f64; 4]> for Rect {
    fn from(edges: [f64; 4]) -> Self {
        Self::new(edges[0], edges[1], edges[2], edges[3])
    }
}

impl From<Rect> for [f64; 4] {
    fn from(rect: Rect) -> Self {
        rect.edges()
    }
}

/// Min/max fold over rectangles, `[0, 0, 0, 0]` when the iterator is empty.
pub fn aggregate_bounds(rects: impl IntoIterator<Item = Rect>) -> [f64; 4] {
    let mut bounds: Option<[f64; 4]> = None;
    for rect in rects {
        let acc = bounds.get_or_insert(rect.edges());
        acc[0] = acc[0].min(rect.left());
        acc[1] = acc[1].min(rect.top());
        acc[2] = acc[2].max(rect.right());
        acc[3] = acc[3].max(rect.bottom());
    }
    bounds.unwrap_or([0.0, 0.0, 0.0, 0.0])
}

#[cfg(test)]
mod tests {
    use super::{aggregate_bounds, Rect};

    #[test]
    fn rect_at_applies_default_size() {
        let rect = Rect::at(50.0, 100.0);
        assert_eq!(rect.edges(), [50.0, 100.0, 130.0, 122.0]);
    }

    #[test]
    fn bounds_of_nothing_is_zero_sentinel() {
        assert_eq!(aggregate_bounds([]), [0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn bounds_fold_min_max_over_all_edges() {
        let bounds = aggregate_bounds([Rect::at(50.0, 100.0), Rect::at(200.0, 300.0)]);
        assert_eq!(bounds, [50.0, 100.0, 280.0, 322.0]);
    }

    #[test]
    fn bounds_of_single_rect_is_that_rect() {
        let rect = Rect::new(-10.0, -4.0, 12.0, 8.0);
        assert_eq!(aggregate_bounds([rect]), rect.edges());
    }
}

// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discovery of input targets in an `understory_view_tree::Tree`.

use alloc::vec::Vec;

use understory_view_tree::{NodeId, Tree, ViewFlags};

use crate::order::reading_order;

/// Collect the text-entry descendants of `root` in reading order.
///
/// Candidates are the views flagged [`ViewFlags::TEXT_INPUT`] below `root`
/// (not `root` itself), compared by their frames in root space. The result
/// can be handed straight to
/// [`InputNavigator::add_input_items`](crate::InputNavigator::add_input_items).
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_input_nav::adapters::view_tree::input_targets;
/// use understory_view_tree::{LocalView, Tree};
///
/// let mut tree = Tree::new();
/// let screen = tree.insert(None, LocalView::with_frame(Rect::new(0.0, 0.0, 320.0, 640.0)));
/// let scroll = tree.insert(
///     Some(screen),
///     LocalView::scroll_container(Rect::new(0.0, 0.0, 320.0, 640.0), Size::new(320.0, 900.0)),
/// );
/// let email = tree.insert(Some(scroll), LocalView::text_input(Rect::new(10.0, 200.0, 310.0, 240.0)));
/// let name = tree.insert(Some(scroll), LocalView::text_input(Rect::new(10.0, 100.0, 310.0, 140.0)));
///
/// assert_eq!(input_targets(&tree, screen), [name, email]);
/// ```
pub fn input_targets(tree: &Tree, root: NodeId) -> Vec<NodeId> {
    reading_order(
        tree.descendants(root)
            .filter(|&id| id != root)
            .filter(|&id| {
                tree.flags(id)
                    .is_some_and(|flags| flags.contains(ViewFlags::TEXT_INPUT))
            })
            .filter_map(|id| Some((id, tree.world_frame(id)?))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Rect, Size};
    use understory_view_tree::LocalView;

    fn field(x: f64, y: f64) -> LocalView {
        LocalView::text_input(Rect::new(x, y, x + 100.0, y + 40.0))
    }

    #[test]
    fn nested_fields_sorted_in_root_space() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalView::with_frame(Rect::new(0.0, 0.0, 320.0, 640.0)));
        let card = tree.insert(
            Some(root),
            LocalView::with_frame(Rect::new(0.0, 300.0, 320.0, 500.0)),
        );
        // Local y = 10, but the card moves it below `top`.
        let inside = tree.insert(Some(card), field(0.0, 10.0));
        let top = tree.insert(Some(root), field(0.0, 100.0));
        let right = tree.insert(Some(root), field(160.0, 100.0));
        tree.insert(Some(root), LocalView::with_frame(Rect::new(0.0, 0.0, 50.0, 50.0)));

        assert_eq!(input_targets(&tree, root), [top, right, inside]);
    }

    #[test]
    fn root_and_other_subtrees_are_excluded() {
        let mut tree = Tree::new();
        let root = tree.insert(None, field(0.0, 0.0));
        let child = tree.insert(Some(root), field(0.0, 50.0));
        let other_root = tree.insert(None, LocalView::default());
        tree.insert(Some(other_root), field(0.0, 0.0));

        assert_eq!(input_targets(&tree, root), [child]);
    }

    #[test]
    fn scroll_offset_does_not_change_order() {
        let mut tree = Tree::new();
        let root = tree.insert(None, LocalView::default());
        let scroll = tree.insert(
            Some(root),
            LocalView::scroll_container(Rect::new(0.0, 0.0, 320.0, 480.0), Size::new(320.0, 2000.0)),
        );
        let a = tree.insert(Some(scroll), field(0.0, 400.0));
        let b = tree.insert(Some(scroll), field(0.0, 900.0));
        tree.set_bounds_origin(scroll, Point::new(0.0, 600.0));

        assert_eq!(input_targets(&tree, root), [a, b]);
    }
}

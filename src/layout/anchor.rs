use super::types::{CellRect, Point, ScreenRect};

/// Handle to a node of a UI accessibility tree.
///
/// Handles may own native resources; they are released when dropped.
pub trait AccessibilityNode: Sized {
    fn child_count(&self) -> usize;
    fn bounds_in_screen(&self) -> Option<ScreenRect>;
    fn parent(&self) -> Option<Self>;
}

/// An on-screen element that can be placed on the grid.
pub trait LayoutElement {
    type Node: AccessibilityNode;

    /// Rendered text, one entry per output line.
    fn text_lines(&self) -> &[String];

    /// Acquires a handle to the element's own node, if it still has one.
    fn accessibility_node(&self) -> Option<Self::Node>;

    fn set_location(&mut self, location: Option<CellRect>);
}

/// Representative point of an element on screen.
///
/// x is the left edge; y is the top edge for containers and the vertical
/// center for leaves. Chains of single-child wrappers are collapsed by
/// moving x to the outermost wrapper, so nested content lines up with its
/// siblings. y always comes from the element's own node.
pub fn resolve_anchor<E: LayoutElement>(element: &E) -> Option<Point> {
    let node = element.accessibility_node()?;
    anchor_from_node(node)
}

pub(crate) fn anchor_from_node<N: AccessibilityNode>(node: N) -> Option<Point> {
    let bounds = node.bounds_in_screen()?;
    let y = if node.child_count() == 0 {
        bounds.center_y()
    } else {
        bounds.top
    };
    let mut x = bounds.left;

    let mut node = node;
    while let Some(parent) = node.parent() {
        if parent.child_count() != 1 {
            break;
        }
        x = parent.bounds_in_screen()?.left;
        node = parent;
    }

    Some(Point::new(x, y))
}

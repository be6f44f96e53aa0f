mod anchor;
mod grid;
mod lanes;
pub mod text;
pub(crate) mod types;

pub use anchor::{AccessibilityNode, LayoutElement, resolve_anchor};
pub use grid::{Grid, GridBuilder};
pub use lanes::{Lane, Lanes};
pub use types::*;

use crate::config::GridConfig;
use crate::ir::Scene;

/// Builds and finishes the grid for `elements`, in input order.
pub fn build_grid<E: LayoutElement>(elements: &[E], config: &GridConfig) -> Grid {
    let mut builder = GridBuilder::new(config);
    for (index, element) in elements.iter().enumerate() {
        builder.add_element(index, element);
    }
    builder.finish()
}

/// Writes the grid's rectangles back onto `elements`.
///
/// Elements the grid did not place lose any location from an earlier pass.
pub fn apply_layout<E: LayoutElement>(grid: &Grid, elements: &mut [E]) {
    for element in elements.iter_mut() {
        element.set_location(None);
    }
    for placement in grid.placements() {
        match elements.get_mut(placement.element) {
            Some(element) => element.set_location(Some(placement.rect)),
            None => tracing::warn!(element = placement.element, "placement has no element"),
        }
    }
}

/// Computes output-cell rectangles for `elements` and assigns them.
pub fn compute_layout<E: LayoutElement>(elements: &mut [E], config: &GridConfig) {
    let grid = build_grid(elements, config);
    apply_layout(&grid, elements);
}

/// Lays out a whole scene, returning the grid for inspection.
pub fn layout_scene(scene: &mut Scene, config: &GridConfig) -> Grid {
    let mut elements = scene.bind();
    let grid = build_grid(&elements, config);
    apply_layout(&grid, &mut elements);
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::ScreenElement;

    fn scene_with(elements: &[(&str, ScreenRect, &str)]) -> Scene {
        let mut scene = Scene::new();
        let root = scene
            .tree
            .add_node("root", Some(ScreenRect::new(0, 0, 1080, 1920)));
        for (name, bounds, text) in elements {
            let node = scene.tree.add_node(name, Some(*bounds));
            scene.tree.attach(root, node);
            let lines: Vec<&str> = text.lines().collect();
            scene
                .elements
                .push(ScreenElement::new(name, Some(node), &lines));
        }
        scene
    }

    fn location(scene: &Scene, id: &str) -> Option<CellRect> {
        scene
            .elements
            .iter()
            .find(|element| element.id == id)
            .and_then(|element| element.location)
    }

    #[test]
    fn lays_out_rows_and_columns() {
        let mut scene = scene_with(&[
            ("a", ScreenRect::new(0, 0, 40, 0), "A"),
            ("b", ScreenRect::new(50, 0, 90, 0), "BB"),
            ("c", ScreenRect::new(0, 10, 40, 10), "C"),
        ]);
        let grid = layout_scene(&mut scene, &GridConfig::default());

        assert_eq!(grid.rows().len(), 2);
        assert_eq!(grid.columns().len(), 2);
        assert_eq!(
            location(&scene, "a"),
            Some(CellRect { left: 0, top: 0, right: 0, bottom: 0 })
        );
        assert_eq!(
            location(&scene, "b"),
            Some(CellRect { left: 3, top: 0, right: 4, bottom: 0 })
        );
        assert_eq!(
            location(&scene, "c"),
            Some(CellRect { left: 0, top: 1, right: 0, bottom: 1 })
        );
    }

    #[test]
    fn skips_elements_without_text_or_node() {
        let mut scene = scene_with(&[
            ("title", ScreenRect::new(0, 0, 100, 20), "Title"),
            ("blank", ScreenRect::new(200, 0, 300, 20), ""),
        ]);
        scene
            .elements
            .push(ScreenElement::new("detached", None, &["Gone"]));
        let grid = layout_scene(&mut scene, &GridConfig::default());

        assert_eq!(grid.cells().len(), 1);
        assert_eq!(grid.columns().len(), 1);
        assert!(location(&scene, "title").is_some());
        assert_eq!(location(&scene, "blank"), None);
        assert_eq!(location(&scene, "detached"), None);
    }

    #[test]
    fn stale_locations_are_cleared() {
        let mut scene = scene_with(&[("a", ScreenRect::new(0, 0, 10, 10), "A")]);
        layout_scene(&mut scene, &GridConfig::default());
        assert!(location(&scene, "a").is_some());

        scene.elements[0].text.clear();
        layout_scene(&mut scene, &GridConfig::default());
        assert_eq!(location(&scene, "a"), None);
    }

    #[test]
    fn relayout_is_idempotent() {
        let mut scene = scene_with(&[
            ("name", ScreenRect::new(10, 100, 200, 140), "Name"),
            ("value", ScreenRect::new(300, 102, 600, 138), "Ada\nLovelace"),
            ("email", ScreenRect::new(12, 160, 200, 200), "Email"),
            ("address", ScreenRect::new(297, 161, 600, 199), "ada@example.org"),
            ("ok", ScreenRect::new(450, 400, 600, 440), "OK"),
        ]);
        let config = GridConfig::default();

        layout_scene(&mut scene, &config);
        let first: Vec<_> = scene.elements.iter().map(|e| e.location).collect();
        layout_scene(&mut scene, &config);
        let second: Vec<_> = scene.elements.iter().map(|e| e.location).collect();

        assert_eq!(first, second);
        assert!(first.iter().all(Option::is_some));
    }

    #[test]
    fn form_columns_line_up() {
        let mut scene = scene_with(&[
            ("name", ScreenRect::new(10, 100, 200, 140), "Name"),
            ("value", ScreenRect::new(300, 102, 600, 138), "Ada"),
            ("email", ScreenRect::new(12, 160, 200, 200), "Email"),
            ("address", ScreenRect::new(297, 161, 600, 199), "ada@example.org"),
        ]);
        layout_scene(&mut scene, &GridConfig::default());

        let value = location(&scene, "value").unwrap();
        let address = location(&scene, "address").unwrap();
        assert_eq!(value.left, address.left);
        // "Email" is the widest label: 5 cells plus the column gap.
        assert_eq!(value.left, 7);
        assert_eq!(address.top, value.top + 1);
    }

    #[test]
    fn placements_past_the_slice_are_skipped() {
        let mut scene = scene_with(&[("a", ScreenRect::new(0, 0, 10, 10), "A")]);
        let mut builder = GridBuilder::new(&GridConfig::default());
        builder.add_cell(0, Point::new(0, 0), 1, 1);
        builder.add_cell(5, Point::new(100, 0), 1, 1);
        let grid = builder.finish();
        {
            let mut bound = scene.bind();
            apply_layout(&grid, &mut bound);
        }
        assert_eq!(
            location(&scene, "a"),
            Some(CellRect { left: 0, top: 0, right: 0, bottom: 0 })
        );
    }

    #[test]
    fn compute_layout_works_on_plain_elements() {
        let mut scene = scene_with(&[("only", ScreenRect::new(5, 5, 50, 25), "Only\ntwo")]);
        {
            let mut bound = scene.bind();
            compute_layout(&mut bound, &GridConfig::default());
        }
        assert_eq!(
            location(&scene, "only"),
            Some(CellRect { left: 0, top: 0, right: 3, bottom: 1 })
        );
    }
}

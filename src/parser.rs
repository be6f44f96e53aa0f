use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::ir::{NodeId, Scene, ScreenElement};
use crate::layout::ScreenRect;
use crate::layout::text::split_lines;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("invalid scene: {0}")]
    Syntax(String),

    #[error("duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("node {parent} lists unknown child {child}")]
    UnknownChild { parent: String, child: String },

    #[error("node {child} has more than one parent ({first}, {second})")]
    MultipleParents {
        child: String,
        first: String,
        second: String,
    },

    #[error("node {0} is its own ancestor")]
    Cycle(String),

    #[error("element {element} refers to unknown node {node}")]
    UnknownElementNode { element: String, node: String },
}

#[derive(Debug, Deserialize)]
struct SceneFile {
    #[serde(default)]
    nodes: Vec<NodeFile>,
    #[serde(default)]
    elements: Vec<ElementFile>,
}

#[derive(Debug, Deserialize)]
struct NodeFile {
    id: String,
    bounds: Option<BoundsFile>,
    #[serde(default)]
    children: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ElementFile {
    id: Option<String>,
    node: Option<String>,
    #[serde(default)]
    text: TextFile,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BoundsFile {
    Array([i32; 4]),
    Object {
        left: i32,
        top: i32,
        right: i32,
        bottom: i32,
    },
}

impl BoundsFile {
    fn to_rect(&self) -> ScreenRect {
        match *self {
            BoundsFile::Array([left, top, right, bottom]) => {
                ScreenRect::new(left, top, right, bottom)
            }
            BoundsFile::Object {
                left,
                top,
                right,
                bottom,
            } => ScreenRect::new(left, top, right, bottom),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextFile {
    Lines(Vec<String>),
    Block(String),
}

impl Default for TextFile {
    fn default() -> Self {
        TextFile::Lines(Vec::new())
    }
}

impl TextFile {
    fn into_lines(self) -> Vec<String> {
        match self {
            TextFile::Lines(lines) => lines,
            TextFile::Block(text) if text.is_empty() => Vec::new(),
            TextFile::Block(text) => split_lines(&text),
        }
    }
}

/// Parses a scene description (JSON, or JSON5 as a fallback).
pub fn parse_scene(input: &str) -> Result<Scene, SceneError> {
    let file: SceneFile = match serde_json::from_str(input) {
        Ok(file) => file,
        Err(err) => json5::from_str(input).map_err(|_| SceneError::Syntax(err.to_string()))?,
    };
    build_scene(file)
}

fn build_scene(file: SceneFile) -> Result<Scene, SceneError> {
    let mut scene = Scene::new();
    let mut ids: HashMap<String, NodeId> = HashMap::new();

    for node in &file.nodes {
        if ids.contains_key(&node.id) {
            return Err(SceneError::DuplicateNode(node.id.clone()));
        }
        let id = scene
            .tree
            .add_node(&node.id, node.bounds.as_ref().map(BoundsFile::to_rect));
        ids.insert(node.id.clone(), id);
    }

    for node in &file.nodes {
        let parent = ids[&node.id];
        for child_name in &node.children {
            let Some(&child) = ids.get(child_name) else {
                return Err(SceneError::UnknownChild {
                    parent: node.id.clone(),
                    child: child_name.clone(),
                });
            };
            if let Some(existing) = scene.tree.node(child).parent {
                return Err(SceneError::MultipleParents {
                    child: child_name.clone(),
                    first: scene.tree.node(existing).name.clone(),
                    second: node.id.clone(),
                });
            }
            scene.tree.attach(parent, child);
        }
    }

    check_acyclic(&scene)?;

    for (index, element) in file.elements.into_iter().enumerate() {
        let name = element
            .id
            .or_else(|| element.node.clone())
            .unwrap_or_else(|| format!("element-{}", index + 1));
        let node = match element.node {
            Some(node_name) => match ids.get(&node_name) {
                Some(&id) => Some(id),
                None => {
                    return Err(SceneError::UnknownElementNode {
                        element: name,
                        node: node_name,
                    });
                }
            },
            None => None,
        };
        scene.elements.push(ScreenElement {
            id: name,
            node,
            text: element.text.into_lines(),
            location: None,
        });
    }

    Ok(scene)
}

fn check_acyclic(scene: &Scene) -> Result<(), SceneError> {
    let tree = &scene.tree;
    for start in 0..tree.len() {
        let mut current = tree.node(NodeId(start)).parent;
        let mut steps = 0;
        while let Some(id) = current {
            if id.0 == start || steps > tree.len() {
                return Err(SceneError::Cycle(tree.node(NodeId(start)).name.clone()));
            }
            current = tree.node(id).parent;
            steps += 1;
        }
    }
    Ok(())
}

/// Reader for the subset of the Abaqus `.inp` format carrying nodes and node sets
pub mod abaqus;
/// Reader and writer for JSON mesh files
pub mod json_mesh;
/// A Point in Real Space
pub mod node;
/// A named group of Nodes
pub mod node_set;

pub use node::Node;
pub use node_set::NodeSet;

use nalgebra::{Point3, Vector3};
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Nodal coordinates and named node sets of a (reference) single-track mesh.
///
/// Element connectivity is never read: the scaling only moves nodes, so the topology
/// stored alongside the nodes in the original mesh file stays valid.
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Nodes in file order; `nodes[i].id == i + 1`
    pub nodes: Vec<Node>,
    pub node_sets: Vec<NodeSet>,
}

impl Mesh {
    /// Construct a Mesh, checking that node ids run from 1 without gaps and that every
    /// node set only references existing nodes.
    pub fn new(nodes: Vec<Node>, node_sets: Vec<NodeSet>) -> Result<Self, MeshError> {
        if nodes.is_empty() {
            return Err(MeshError::EmptyMesh);
        }

        for (idx, node) in nodes.iter().enumerate() {
            if node.id != idx + 1 {
                return Err(MeshError::NonContiguousNodeIds {
                    expected: idx + 1,
                    found: node.id,
                });
            }
            if !node.is_finite() {
                return Err(MeshError::InvalidCoordinate(node.id));
            }
        }

        for set in node_sets.iter() {
            if let Some(node_id) = set
                .node_ids
                .iter()
                .find(|node_id| **node_id == 0 || **node_id > nodes.len())
            {
                return Err(MeshError::NodeOutOfRange {
                    set: set.name.clone(),
                    node_id: *node_id,
                    node_count: nodes.len(),
                });
            }
        }

        Ok(Self { nodes, node_sets })
    }

    /// Read a Mesh from an Abaqus input file (`.inp`) or a JSON mesh file (`.json`).
    ///
    /// The format is chosen from the file extension. See [`json_mesh`] for the JSON layout.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let read = || {
            read_to_string(path).map_err(|source| MeshError::Io {
                path: path.to_path_buf(),
                source,
            })
        };

        let (nodes, node_sets) = match extension.as_deref() {
            Some("inp") => abaqus::parse_inp(&read()?)?,
            Some("json") => json_mesh::parse_json_mesh(&read()?)?,
            _ => return Err(MeshError::UnsupportedFormat(path.to_path_buf())),
        };

        info!(
            "Loaded mesh from {:?}: {} nodes, {} node sets",
            path,
            nodes.len(),
            node_sets.len()
        );

        Self::new(nodes, node_sets)
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// All node sets whose name matches `name` (case-insensitive)
    pub fn node_sets_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a NodeSet> + 'a {
        self.node_sets.iter().filter(move |set| set.name_matches(name))
    }

    /// Coordinates of every node along one spatial component (0 = x, 1 = y, 2 = z), indexed by `id - 1`
    pub fn coordinates_along(&self, component: usize) -> Vec<f64> {
        self.nodes.iter().map(|node| node.coords[component]).collect()
    }

    /// The componentwise minimum over all nodal coordinates
    pub fn min_corner(&self) -> Point3<f64> {
        self.nodes
            .iter()
            .skip(1)
            .fold(self.nodes[0].coords, |min, node| min.inf(&node.coords))
    }

    /// Translate every node so that the smallest coordinate along each axis is exactly zero.
    ///
    /// Returns the translation which was applied.
    pub fn translate_to_origin(&mut self) -> Vector3<f64> {
        let translation = -self.min_corner().coords;

        for node in self.nodes.iter_mut() {
            node.coords += translation;
        }

        debug!(
            "Translated nodal coordinates by [{}, {}, {}]",
            translation.x, translation.y, translation.z
        );

        translation
    }

    /// A copy of this Mesh with every node moved to the matching entry of `coords`.
    ///
    /// Node ids and node sets are unchanged.
    pub fn with_coordinates(&self, coords: &[Point3<f64>]) -> Self {
        assert_eq!(
            coords.len(),
            self.nodes.len(),
            "Expected one coordinate per node; Cannot move Mesh nodes!"
        );

        Self {
            nodes: self
                .nodes
                .iter()
                .zip(coords.iter())
                .map(|(node, coords)| Node::new(node.id, *coords))
                .collect(),
            node_sets: self.node_sets.clone(),
        }
    }

    /// Print the mesh to a JSON file specified by path.
    #[cfg(feature = "json_export")]
    pub fn export_to_json(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        json_mesh::write_json_mesh(self, path)
    }
}

/// Problems with a mesh file or with the nodes and node sets it describes
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("Failed to read mesh file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported mesh file {0:?}; expected an Abaqus '.inp' or a '.json' file")]
    UnsupportedFormat(PathBuf),
    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Mesh file is not valid JSON: {0}")]
    Json(#[from] json::Error),
    #[error("Malformed JSON mesh: {0}")]
    MalformedJson(String),
    #[error("Mesh has no nodes; Cannot construct Mesh!")]
    EmptyMesh,
    #[error("Node ids must be numbered from 1 without gaps; expected node {expected} but found node {found}")]
    NonContiguousNodeIds { expected: usize, found: usize },
    #[error("Node set '{set}' references node {node_id}, but the mesh only has {node_count} nodes")]
    NodeOutOfRange {
        set: String,
        node_id: usize,
        node_count: usize,
    },
    #[error("Node {0} has a non-finite coordinate")]
    InvalidCoordinate(usize),
}

//! JSON mesh files hold node coordinates and node sets.
//!
//! Node ids are implicit: the n'th entry of "Nodes" is node n (counting from 1).
//!
//! mesh.json
//! ```JSON
//! {
//!     "Nodes": [
//!         [x_coordinate, y_coordinate, z_coordinate],
//!         [0.0, 0.0, 0.0],
//!         [1.0, 0.0, 0.0]
//!     ],
//!     "NodeSets": {
//!         "setControllingDepositLength": [1, 2]
//!     }
//! }
//! ```

use super::{MeshError, Node, NodeSet};

use json::JsonValue;

#[cfg(feature = "json_export")]
use super::Mesh;
#[cfg(feature = "json_export")]
use json::object;
#[cfg(feature = "json_export")]
use std::fs::{self, File};
#[cfg(feature = "json_export")]
use std::io::{BufWriter, Write};
#[cfg(feature = "json_export")]
use std::path::Path;

pub(crate) fn parse_json_mesh(contents: &str) -> Result<(Vec<Node>, Vec<NodeSet>), MeshError> {
    let mesh_file_json = json::parse(contents)?;

    let nodes = parse_node_information(&mesh_file_json)?;
    let node_sets = parse_node_set_information(&mesh_file_json)?;

    Ok((nodes, node_sets))
}

fn malformed(message: impl Into<String>) -> MeshError {
    MeshError::MalformedJson(message.into())
}

fn parse_node_information(mesh_file_json: &JsonValue) -> Result<Vec<Node>, MeshError> {
    if !mesh_file_json["Nodes"].is_array() {
        return Err(malformed("Nodes must be an Array!"));
    }

    mesh_file_json["Nodes"]
        .members()
        .enumerate()
        .map(|(idx, json_node_point)| {
            if !json_node_point.is_array() || json_node_point.members().count() != 3 {
                return Err(malformed(format!(
                    "node {} must be an array of length 3!",
                    idx + 1
                )));
            }

            let mut coords = [0.0; 3];
            for (coord, json_coord) in coords.iter_mut().zip(json_node_point.members()) {
                *coord = json_coord.as_f64().ok_or_else(|| {
                    malformed(format!(
                        "node {} must be composed of numerical values!",
                        idx + 1
                    ))
                })?;
            }

            Ok(Node::from_coords(idx + 1, coords[0], coords[1], coords[2]))
        })
        .collect()
}

fn parse_node_set_information(mesh_file_json: &JsonValue) -> Result<Vec<NodeSet>, MeshError> {
    let json_sets = &mesh_file_json["NodeSets"];
    if json_sets.is_null() {
        return Ok(Vec::new());
    }
    if !json_sets.is_object() {
        return Err(malformed("NodeSets must be an Object!"));
    }

    json_sets
        .entries()
        .map(|(name, json_ids)| {
            if !json_ids.is_array() {
                return Err(malformed(format!("node set '{}' must be an Array!", name)));
            }

            let node_ids = json_ids
                .members()
                .map(|json_id| {
                    json_id.as_usize().ok_or_else(|| {
                        malformed(format!(
                            "node set '{}' must contain positive integer node ids!",
                            name
                        ))
                    })
                })
                .collect::<Result<Vec<usize>, MeshError>>()?;

            Ok(NodeSet::new(name, node_ids))
        })
        .collect()
}

/// Write the mesh next to `path` as `<file name>.partial`, then rename it into place
#[cfg(feature = "json_export")]
pub(crate) fn write_json_mesh(mesh: &Mesh, path: impl AsRef<Path>) -> std::io::Result<()> {
    let path = path.as_ref();
    let mut partial_name = path
        .file_name()
        .ok_or_else(|| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{:?} does not name a file", path),
            )
        })?
        .to_os_string();
    partial_name.push(".partial");
    let partial_path = path.with_file_name(partial_name);

    if let Err(e) = write_json_object(mesh, &partial_path) {
        let _ = fs::remove_file(&partial_path);
        return Err(e);
    }
    fs::rename(&partial_path, path)
}

#[cfg(feature = "json_export")]
fn write_json_object(mesh: &Mesh, path: &Path) -> std::io::Result<()> {
    let f = File::create(path)?;
    let mut w = BufWriter::new(&f);

    let mut json_sets = JsonValue::new_object();
    for set in mesh.node_sets.iter() {
        json_sets[set.name.as_str()] = JsonValue::from(set.node_ids.clone());
    }

    let mesh_object = object! {
        "Nodes": JsonValue::from(
            mesh.nodes
                .iter()
                .map(|node| JsonValue::from(vec![node.coords.x, node.coords.y, node.coords.z]))
                .collect::<Vec<_>>()
        ),
        "NodeSets": json_sets,
    };

    mesh_object.write_pretty(&mut w, 4)?;
    w.flush()
}

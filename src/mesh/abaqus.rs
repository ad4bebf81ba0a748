//! Only `*NODE` and `*NSET` blocks are interpreted; every other keyword block
//! (elements, materials, steps, ...) is skipped.
//!
//! ```text
//! *Node, nset=allNodes
//!       1, 0.0, 0.0, 0.0
//!       2, 1.0, 0.0, 0.0
//! *Nset, nset=left
//!  1,
//! *Nset, nset=everything, generate
//!  1, 2, 1
//! *Nset, nset=copyOfLeft
//!  left
//! ```
//!
//! A node set name (compared ignoring case) always refers to one set. Naming it again in a
//! later `*NODE, NSET=` or `*NSET` block appends the new members to that set.
//!
//! `*NODE` data lines may carry the direction cosines of a nodal normal after the
//! coordinates; they are ignored.

use super::{MeshError, Node, NodeSet};
use tracing::{debug, trace};

/// The block that following data lines belong to
#[derive(Clone, Copy)]
enum Block {
    /// nodes, optionally also collected into the node set at the given index
    Nodes(Option<usize>),
    /// members of the node set at the given index
    NodeSetMembers { set_idx: usize, generate: bool },
    Skipped,
}

/// A parsed keyword line, e.g. `*Nset, nset=setA, generate`
struct Keyword<'a> {
    name: String,
    params: Vec<(String, Option<&'a str>)>,
}

impl<'a> Keyword<'a> {
    fn parse(line: &'a str) -> Self {
        let mut fields = line.split(',').map(str::trim);
        let name = fields.next().unwrap_or_default().to_ascii_uppercase();

        let params = fields
            .filter(|field| !field.is_empty())
            .map(|field| match field.split_once('=') {
                Some((key, value)) => (key.trim().to_ascii_uppercase(), Some(value.trim())),
                None => (field.to_ascii_uppercase(), None),
            })
            .collect();

        Self { name, params }
    }

    fn param(&self, key: &str) -> Option<&'a str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, value)| *value)
    }

    fn has_flag(&self, flag: &str) -> bool {
        self.params.iter().any(|(k, _)| k == flag)
    }
}

/// Parse the nodes and node sets out of the contents of an Abaqus input file
pub(crate) fn parse_inp(contents: &str) -> Result<(Vec<Node>, Vec<NodeSet>), MeshError> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut node_sets: Vec<NodeSet> = Vec::new();
    let mut block = Block::Skipped;

    for (line_idx, raw_line) in contents.lines().enumerate() {
        let line_num = line_idx + 1;
        let line = raw_line.trim();

        if line.is_empty() || line.starts_with("**") {
            continue;
        }

        if let Some(keyword_line) = line.strip_prefix('*') {
            let keyword = Keyword::parse(keyword_line);
            block = match keyword.name.as_str() {
                "NODE" => Block::Nodes(
                    keyword
                        .param("NSET")
                        .map(|name| node_set_index(&mut node_sets, name)),
                ),
                "NSET" => {
                    let name = keyword.param("NSET").ok_or_else(|| MeshError::Parse {
                        line: line_num,
                        message: "*NSET requires an NSET=<name> parameter".to_string(),
                    })?;
                    Block::NodeSetMembers {
                        set_idx: node_set_index(&mut node_sets, name),
                        generate: keyword.has_flag("GENERATE"),
                    }
                }
                other => {
                    trace!("Skipping '*{}' block at line {}", other, line_num);
                    Block::Skipped
                }
            };
            continue;
        }

        match block {
            Block::Nodes(set_idx) => {
                let node = parse_node_line(line, line_num)?;
                if let Some(set_idx) = set_idx {
                    node_sets[set_idx].node_ids.push(node.id);
                }
                nodes.push(node);
            }
            Block::NodeSetMembers { set_idx, generate } => {
                let members = if generate {
                    parse_generate_line(line, line_num, nodes.len())?
                } else {
                    parse_member_line(line, line_num, &node_sets, set_idx)?
                };
                node_sets[set_idx].node_ids.extend(members);
            }
            Block::Skipped => (),
        }
    }

    debug!(
        "Parsed {} nodes and {} node sets from Abaqus input",
        nodes.len(),
        node_sets.len()
    );

    Ok((nodes, node_sets))
}

// blocks naming the same set (ignoring case) all add to one set
fn node_set_index(node_sets: &mut Vec<NodeSet>, name: &str) -> usize {
    match node_sets.iter().position(|set| set.name_matches(name)) {
        Some(idx) => idx,
        None => {
            node_sets.push(NodeSet::new(name, Vec::new()));
            node_sets.len() - 1
        }
    }
}

fn data_fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim).filter(|field| !field.is_empty())
}

fn parse_error(line: usize, message: String) -> MeshError {
    MeshError::Parse { line, message }
}

fn parse_node_id(field: &str, line: usize) -> Result<usize, MeshError> {
    field
        .parse::<usize>()
        .map_err(|_| parse_error(line, format!("'{}' is not a valid node id", field)))
}

/// `id, x, y[, z[, n1, n2, n3]]`
fn parse_node_line(line: &str, line_num: usize) -> Result<Node, MeshError> {
    let fields: Vec<&str> = data_fields(line).collect();
    if fields.len() < 3 || fields.len() > 7 {
        return Err(parse_error(
            line_num,
            format!(
                "expected a node id, 2 or 3 coordinates and an optional normal, found {} fields",
                fields.len()
            ),
        ));
    }

    let id = parse_node_id(fields[0], line_num)?;
    let mut coords = [0.0; 3];
    for (coord, field) in coords.iter_mut().zip(fields[1..].iter()) {
        *coord = field.parse::<f64>().map_err(|_| {
            parse_error(line_num, format!("'{}' is not a valid coordinate", field))
        })?;
    }

    Ok(Node::from_coords(id, coords[0], coords[1], coords[2]))
}

/// `start, end[, step]`; `end` may not exceed the number of nodes defined so far
fn parse_generate_line(
    line: &str,
    line_num: usize,
    node_count: usize,
) -> Result<Vec<usize>, MeshError> {
    let fields = data_fields(line)
        .map(|field| parse_node_id(field, line_num))
        .collect::<Result<Vec<usize>, MeshError>>()?;

    let (start, end, step) = match fields[..] {
        [start, end] => (start, end, 1),
        [start, end, step] => (start, end, step),
        _ => {
            return Err(parse_error(
                line_num,
                "GENERATE data lines must be 'start, end[, step]'".to_string(),
            ))
        }
    };

    if step == 0 || start > end {
        return Err(parse_error(
            line_num,
            format!("invalid node range {}..{} with step {}", start, end, step),
        ));
    }

    if end > node_count {
        return Err(parse_error(
            line_num,
            format!(
                "node range ends at {}, but only {} nodes are defined",
                end, node_count
            ),
        ));
    }

    Ok((start..=end).step_by(step).collect())
}

/// A list of node ids and/or names of other, previously defined node sets
fn parse_member_line(
    line: &str,
    line_num: usize,
    node_sets: &[NodeSet],
    own_idx: usize,
) -> Result<Vec<usize>, MeshError> {
    let mut members = Vec::new();

    for field in data_fields(line) {
        if field.starts_with(|c: char| c.is_ascii_digit()) {
            members.push(parse_node_id(field, line_num)?);
        } else {
            let referenced = node_sets
                .iter()
                .enumerate()
                .find(|(idx, set)| *idx != own_idx && set.name_matches(field))
                .map(|(_, set)| set)
                .ok_or_else(|| {
                    parse_error(line_num, format!("reference to undefined node set '{}'", field))
                })?;
            members.extend_from_slice(&referenced.node_ids);
        }
    }

    Ok(members)
}

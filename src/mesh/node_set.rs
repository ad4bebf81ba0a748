use super::Node;

/// A named group of node ids, as tagged in the mesh file
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSet {
    pub name: String,
    pub node_ids: Vec<usize>,
}

impl NodeSet {
    pub fn new(name: impl Into<String>, node_ids: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            node_ids,
        }
    }

    /// Set names are matched case-insensitively (Abaqus upper-cases them internally)
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    pub fn is_empty(&self) -> bool {
        self.node_ids.is_empty()
    }

    /// The smallest and largest coordinate of this set's members along one spatial component.
    ///
    /// Returns `None` for a set without members. Node ids must already be validated against `nodes`.
    pub fn bounds_along(&self, nodes: &[Node], component: usize) -> Option<[f64; 2]> {
        self.node_ids
            .iter()
            .map(|node_id| nodes[node_id - 1].coords[component])
            .fold(None, |bounds, c| match bounds {
                None => Some([c, c]),
                Some([min, max]) => Some([min.min(c), max.max(c)]),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_names() {
        let set = NodeSet::new("setControllingDepositLength", vec![1]);
        assert!(set.name_matches("SETCONTROLLINGDEPOSITLENGTH"));
        assert!(set.name_matches("setcontrollingdepositlength"));
        assert!(!set.name_matches("setControllingDepositLengthX"));
    }

    #[test]
    fn bounds_of_members_only() {
        let nodes = vec![
            Node::from_coords(1, 0.0, -4.0, 1.0),
            Node::from_coords(2, 3.0, 2.5, 1.0),
            Node::from_coords(3, 9.0, 7.0, 1.0),
        ];

        let set = NodeSet::new("a", vec![2, 1]);
        let [min, max] = set.bounds_along(&nodes, 1).unwrap();
        assert!((min + 4.0).abs() < 1e-14);
        assert!((max - 2.5).abs() < 1e-14);

        let [min, max] = set.bounds_along(&nodes, 2).unwrap();
        assert_eq!(min, max);

        assert!(NodeSet::new("empty", Vec::new())
            .bounds_along(&nodes, 0)
            .is_none());
    }
}

pub mod partition;

use std::fmt;

/// An input item tagged with its position in the caller's list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexedItem {
    /// Index into the caller's item list
    pub idx: usize,
    /// Width divided by height
    pub aspect_ratio: f64,
}

impl IndexedItem {
    /// Tag every aspect ratio with its index, preserving order.
    pub fn from_ratios(aspect_ratios: &[f64]) -> Vec<IndexedItem> {
        aspect_ratios
            .iter()
            .enumerate()
            .map(|(idx, &aspect_ratio)| IndexedItem { idx, aspect_ratio })
            .collect()
    }
}

/// A candidate arrangement of items.
///
/// Leaves appear in reading order (left-to-right, then top-to-bottom) at every
/// level. `Cols` and `Rows` always hold two or more children; build them with
/// [`GridNode::cols`] and [`GridNode::rows`] so that invariant holds.
#[derive(Debug, Clone, PartialEq)]
pub enum GridNode {
    /// A single input item.
    Item { idx: usize, aspect_ratio: f64 },
    /// Children placed left-to-right, sharing one height.
    Cols {
        children: Vec<GridNode>,
        /// Sum of the children's aspect ratios (gaps ignored)
        aspect_ratio: f64,
    },
    /// Children placed top-to-bottom, sharing one width.
    Rows {
        children: Vec<GridNode>,
        /// `1 / Σ(1 / child)` (gaps ignored)
        aspect_ratio: f64,
    },
}

impl GridNode {
    pub fn item(item: IndexedItem) -> Self {
        GridNode::Item {
            idx: item.idx,
            aspect_ratio: item.aspect_ratio,
        }
    }

    /// Place `children` side by side.
    ///
    /// A single child is returned as-is and children that are already `Cols`
    /// are spliced in rather than nested. Panics on an empty list.
    pub fn cols(children: Vec<GridNode>) -> Self {
        let mut children = splice(children, |node| matches!(node, GridNode::Cols { .. }));
        if children.len() == 1 {
            return children.remove(0);
        }
        let aspect_ratio = children.iter().map(GridNode::aspect_ratio).sum();
        GridNode::Cols {
            children,
            aspect_ratio,
        }
    }

    /// Stack `children` top to bottom. Same flattening rules as [`GridNode::cols`].
    pub fn rows(children: Vec<GridNode>) -> Self {
        let mut children = splice(children, |node| matches!(node, GridNode::Rows { .. }));
        if children.len() == 1 {
            return children.remove(0);
        }
        let inverse: f64 = children.iter().map(|c| 1.0 / c.aspect_ratio()).sum();
        GridNode::Rows {
            children,
            aspect_ratio: 1.0 / inverse,
        }
    }

    /// A row of leaves, one per item.
    pub fn row_of(items: &[IndexedItem]) -> Self {
        GridNode::cols(items.iter().copied().map(GridNode::item).collect())
    }

    pub fn aspect_ratio(&self) -> f64 {
        match self {
            GridNode::Item { aspect_ratio, .. }
            | GridNode::Cols { aspect_ratio, .. }
            | GridNode::Rows { aspect_ratio, .. } => *aspect_ratio,
        }
    }

    /// Number of nodes in this subtree, leaves included.
    pub fn node_count(&self) -> usize {
        match self {
            GridNode::Item { .. } => 1,
            GridNode::Cols { children, .. } | GridNode::Rows { children, .. } => {
                1 + children.iter().map(GridNode::node_count).sum::<usize>()
            }
        }
    }

    /// Item indices in reading order.
    pub fn leaf_indices(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves(&self, out: &mut Vec<usize>) {
        match self {
            GridNode::Item { idx, .. } => out.push(*idx),
            GridNode::Cols { children, .. } | GridNode::Rows { children, .. } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }
}

/// Flatten same-kind children into the parent's list.
fn splice(children: Vec<GridNode>, same_kind: impl Fn(&GridNode) -> bool) -> Vec<GridNode> {
    assert!(!children.is_empty(), "grid node needs at least one child");
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        if same_kind(&child) {
            match child {
                GridNode::Cols { children, .. } | GridNode::Rows { children, .. } => {
                    out.extend(children)
                }
                GridNode::Item { .. } => out.push(child),
            }
        } else {
            out.push(child);
        }
    }
    out
}

/// Compact form: `cols(0, rows(1, 2))`.
impl fmt::Display for GridNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, children) = match self {
            GridNode::Item { idx, .. } => return write!(f, "{}", idx),
            GridNode::Cols { children, .. } => ("cols", children),
            GridNode::Rows { children, .. } => ("rows", children),
        };
        write!(f, "{}(", name)?;
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", child)?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(idx: usize, aspect_ratio: f64) -> GridNode {
        GridNode::item(IndexedItem { idx, aspect_ratio })
    }

    #[test]
    fn cols_sums_aspect_ratios() {
        let node = GridNode::cols(vec![leaf(0, 1.0), leaf(1, 2.0)]);
        assert!((node.aspect_ratio() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn rows_combines_harmonically() {
        let node = GridNode::rows(vec![leaf(0, 1.0), leaf(1, 1.0)]);
        assert!((node.aspect_ratio() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn single_child_is_not_wrapped() {
        let node = GridNode::cols(vec![leaf(3, 1.5)]);
        assert_eq!(node, leaf(3, 1.5));
        let node = GridNode::rows(vec![leaf(3, 1.5)]);
        assert_eq!(node, leaf(3, 1.5));
    }

    #[test]
    fn same_kind_children_are_spliced() {
        let inner = GridNode::cols(vec![leaf(1, 1.0), leaf(2, 1.0)]);
        let node = GridNode::cols(vec![leaf(0, 1.0), inner]);
        match &node {
            GridNode::Cols { children, .. } => assert_eq!(children.len(), 3),
            other => panic!("expected cols, got {}", other),
        }
        assert_eq!(node.to_string(), "cols(0, 1, 2)");
    }

    #[test]
    fn other_kind_children_nest() {
        let stacked = GridNode::rows(vec![leaf(1, 1.0), leaf(2, 1.0)]);
        let node = GridNode::cols(vec![leaf(0, 1.0), stacked]);
        assert_eq!(node.to_string(), "cols(0, rows(1, 2))");
        assert_eq!(node.node_count(), 5);
        assert_eq!(node.leaf_indices(), vec![0, 1, 2]);
        assert!((node.aspect_ratio() - 1.5).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "at least one child")]
    fn empty_children_panic() {
        GridNode::rows(Vec::new());
    }
}

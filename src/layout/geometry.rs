use std::iter;

use super::linear::{LinearSystem, Solution, Var};
use super::{MosaicLayout, PlacedItem};
use crate::grid::GridNode;

/// A position expressed as a sum of solved sizes plus a constant.
#[derive(Debug, Clone, Default)]
struct Offset {
    terms: Vec<Var>,
    constant: f64,
}

impl Offset {
    /// Position just past a sibling of size `by`, followed by one gap.
    fn advanced(&self, by: Var, gap: f64) -> Offset {
        let mut terms = self.terms.clone();
        terms.push(by);
        Offset {
            terms,
            constant: self.constant + gap,
        }
    }

    fn eval(&self, solution: &Solution) -> f64 {
        self.constant + self.terms.iter().map(|&v| solution[v]).sum::<f64>()
    }
}

#[derive(Debug, Clone, Copy)]
struct NodeVars {
    width: Var,
    height: Var,
}

#[derive(Debug)]
struct LeafPlan {
    idx: usize,
    x: Offset,
    y: Offset,
    size: NodeVars,
}

struct SystemBuilder {
    system: LinearSystem,
    leaves: Vec<LeafPlan>,
    gap: f64,
}

impl SystemBuilder {
    fn build(&mut self, node: &GridNode, x: Offset, y: Offset) -> NodeVars {
        let vars = NodeVars {
            width: self.system.var(),
            height: self.system.var(),
        };

        match node {
            GridNode::Item { idx, aspect_ratio } => {
                self.system
                    .equation([(vars.height, *aspect_ratio), (vars.width, -1.0)], 0.0);
                self.leaves.push(LeafPlan {
                    idx: *idx,
                    x,
                    y,
                    size: vars,
                });
            }
            GridNode::Cols { children, .. } => {
                let mut child_x = x;
                let mut widths = Vec::with_capacity(children.len());
                for child in children {
                    let c = self.build(child, child_x.clone(), y.clone());
                    self.system
                        .equation([(c.height, 1.0), (vars.height, -1.0)], 0.0);
                    child_x = child_x.advanced(c.width, self.gap);
                    widths.push(c.width);
                }
                let terms =
                    iter::once((vars.width, 1.0)).chain(widths.iter().map(|&w| (w, -1.0)));
                self.system.equation(terms, self.gaps_between(children.len()));
            }
            GridNode::Rows { children, .. } => {
                let mut child_y = y;
                let mut heights = Vec::with_capacity(children.len());
                for child in children {
                    let c = self.build(child, x.clone(), child_y.clone());
                    self.system
                        .equation([(c.width, 1.0), (vars.width, -1.0)], 0.0);
                    child_y = child_y.advanced(c.height, self.gap);
                    heights.push(c.height);
                }
                let terms =
                    iter::once((vars.height, 1.0)).chain(heights.iter().map(|&h| (h, -1.0)));
                self.system.equation(terms, self.gaps_between(children.len()));
            }
        }

        vars
    }

    fn gaps_between(&self, count: usize) -> f64 {
        self.gap * count.saturating_sub(1) as f64
    }
}

/// Exact placement of every leaf of `root` inside a box of width 1.
///
/// Every node gets a width and height unknown tied together by the leaf aspect
/// ratios, shared row heights / column widths and the gaps between siblings.
/// Panics if the resulting system is singular, which only a malformed grid
/// can cause.
pub fn solve_geometry(root: &GridNode, gap: f64) -> MosaicLayout {
    let mut builder = SystemBuilder {
        system: LinearSystem::new(),
        leaves: Vec::new(),
        gap,
    };
    let root_vars = builder.build(root, Offset::default(), Offset::default());
    builder.system.equation([(root_vars.width, 1.0)], 1.0);

    tracing::trace!(
        "Solving mosaic system: {} unknowns, {} equations",
        builder.system.unknowns(),
        builder.system.equations()
    );

    let Some(solution) = builder.system.solve() else {
        panic!("mosaic layout system for grid {} is singular", root);
    };

    let total_w = solution[root_vars.width];
    let total_h = solution[root_vars.height];

    let mut items: Vec<PlacedItem> = builder
        .leaves
        .iter()
        .map(|leaf| PlacedItem {
            idx: leaf.idx,
            left: leaf.x.eval(&solution) / total_w,
            top: leaf.y.eval(&solution) / total_h,
            width: solution[leaf.size.width] / total_w,
            height: solution[leaf.size.height] / total_h,
        })
        .collect();
    items.sort_by_key(|item| item.idx);

    MosaicLayout {
        aspect_ratio: total_w / total_h,
        items,
    }
}

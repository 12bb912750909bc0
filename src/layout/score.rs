use crate::grid::GridNode;

/// Below this the whole mosaic is too tall.
pub const TOO_TALL_BELOW: f64 = 2.0 / 3.0;
/// Above this the whole mosaic is too wide.
pub const TOO_WIDE_ABOVE: f64 = 24.0 / 9.0;
/// Between `TOO_TALL_BELOW` and this the mosaic is mildly tall.
pub const MILDLY_TALL_BELOW: f64 = 1.0;

pub const TOO_TALL_PENALTY: f64 = 3000.0;
pub const TOO_WIDE_PENALTY: f64 = 2000.0;
pub const MILDLY_TALL_PENALTY: f64 = 1000.0;

/// A candidate grid with its badness.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub grid: GridNode,
    pub score: f64,
}

/// Badness of a candidate (lower is better).
///
/// Sizes every leaf as if the root filled a 1x1 square, ignoring gaps, and
/// returns the variance of the leaf areas plus a penalty on the root's shape.
pub fn score(node: &GridNode) -> f64 {
    let mut areas = Vec::new();
    leaf_areas(node, 1.0, 1.0, &mut areas);

    let n = areas.len() as f64;
    let avg = areas.iter().sum::<f64>() / n;
    let variance = areas.iter().map(|a| (a - avg) * (a - avg)).sum::<f64>() / n;

    variance + aspect_penalty(node.aspect_ratio())
}

/// Penalty for the overall shape of the mosaic.
pub fn aspect_penalty(aspect_ratio: f64) -> f64 {
    if aspect_ratio < TOO_TALL_BELOW {
        TOO_TALL_PENALTY
    } else if aspect_ratio > TOO_WIDE_ABOVE {
        TOO_WIDE_PENALTY
    } else if aspect_ratio < MILDLY_TALL_BELOW {
        MILDLY_TALL_PENALTY
    } else {
        0.0
    }
}

/// Distribute `width` x `height` down the tree and push each leaf's area.
fn leaf_areas(node: &GridNode, width: f64, height: f64, out: &mut Vec<f64>) {
    match node {
        GridNode::Item { .. } => out.push(width * height),
        GridNode::Cols {
            children,
            aspect_ratio,
        } => {
            for child in children {
                let w = width * child.aspect_ratio() / aspect_ratio;
                leaf_areas(child, w, height, out);
            }
        }
        GridNode::Rows {
            children,
            aspect_ratio,
        } => {
            for child in children {
                let h = height * aspect_ratio / child.aspect_ratio();
                leaf_areas(child, width, h, out);
            }
        }
    }
}

/// Score every candidate and keep the first one with the lowest score.
pub fn pick_best(candidates: impl IntoIterator<Item = GridNode>) -> Option<ScoredCandidate> {
    let mut best: Option<ScoredCandidate> = None;
    for grid in candidates {
        let score = score(&grid);
        match &best {
            Some(current) if score >= current.score => {}
            _ => best = Some(ScoredCandidate { grid, score }),
        }
    }
    best
}

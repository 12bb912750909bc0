use super::{GridNode, IndexedItem};

/// Every way to split the items into consecutive, non-empty rows.
///
/// There are 2^(N-1) of them. The first row grows from one item to all of
/// them and the remainder is split recursively, so the output order is stable.
pub fn row_partitions(aspect_ratios: &[f64]) -> Vec<Vec<Vec<IndexedItem>>> {
    let items = IndexedItem::from_ratios(aspect_ratios);
    partitions_of(&items)
}

fn partitions_of(items: &[IndexedItem]) -> Vec<Vec<Vec<IndexedItem>>> {
    if items.is_empty() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(1 << (items.len() - 1).min(16));
    for split in 1..=items.len() {
        let (head, tail) = items.split_at(split);
        if tail.is_empty() {
            result.push(vec![head.to_vec()]);
            continue;
        }
        for rest in partitions_of(tail) {
            let mut rows = Vec::with_capacity(rest.len() + 1);
            rows.push(head.to_vec());
            rows.extend(rest);
            result.push(rows);
        }
    }
    result
}

/// Every grid obtainable from one row partition by letting the first item of
/// the first row span down across 1..=rows.len() rows.
///
/// Rows that end up beside the stretched item form the "right" sub-problem,
/// rows below it the "bottom" one; both recurse. Panics on an empty row.
pub fn stretch_across_rows(rows: &[Vec<IndexedItem>]) -> Vec<GridNode> {
    assert!(
        rows.iter().all(|row| !row.is_empty()),
        "row partition contains an empty row"
    );

    match rows {
        [] => Vec::new(),
        [only] => vec![GridNode::row_of(only)],
        [first, rest @ ..] if first.len() < 2 => {
            // Nothing beside the first item to stretch against
            let top = GridNode::row_of(first);
            stretch_across_rows(rest)
                .into_iter()
                .map(|below| GridNode::rows(vec![top.clone(), below]))
                .collect()
        }
        [first, ..] => {
            let stretched = GridNode::item(first[0]);
            let mut result = Vec::new();

            for depth in 1..=rows.len() {
                let mut right_rows = Vec::with_capacity(depth);
                right_rows.push(first[1..].to_vec());
                right_rows.extend(rows[1..depth].iter().cloned());
                let bottom_rows = &rows[depth..];

                let bottoms = stretch_across_rows(bottom_rows);
                for right in stretch_across_rows(&right_rows) {
                    let top = GridNode::cols(vec![stretched.clone(), right]);
                    if bottom_rows.is_empty() {
                        result.push(top);
                        continue;
                    }
                    for bottom in &bottoms {
                        result.push(GridNode::rows(vec![top.clone(), bottom.clone()]));
                    }
                }
            }
            result
        }
    }
}

/// All candidate grids for the given items, in generation order.
pub fn candidates(aspect_ratios: &[f64]) -> Vec<GridNode> {
    row_partitions(aspect_ratios)
        .iter()
        .flat_map(|rows| stretch_across_rows(rows))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(rows: &[Vec<IndexedItem>]) -> Vec<Vec<usize>> {
        rows.iter()
            .map(|row| row.iter().map(|item| item.idx).collect())
            .collect()
    }

    #[test]
    fn empty_input_has_no_partitions() {
        assert!(row_partitions(&[]).is_empty());
        assert!(candidates(&[]).is_empty());
    }

    #[test]
    fn single_item_is_a_single_row() {
        let parts = row_partitions(&[1.5]);
        assert_eq!(parts.len(), 1);
        assert_eq!(shape(&parts[0]), vec![vec![0]]);
    }

    #[test]
    fn partition_count_is_power_of_two() {
        for n in 1..=8 {
            let ratios = vec![1.0; n];
            assert_eq!(row_partitions(&ratios).len(), 1 << (n - 1));
        }
    }

    #[test]
    fn partitions_come_out_in_generation_order() {
        let parts: Vec<_> = row_partitions(&[1.0, 1.0, 1.0])
            .iter()
            .map(|p| shape(p))
            .collect();
        assert_eq!(
            parts,
            vec![
                vec![vec![0], vec![1], vec![2]],
                vec![vec![0], vec![1, 2]],
                vec![vec![0, 1], vec![2]],
                vec![vec![0, 1, 2]],
            ]
        );
    }

    #[test]
    fn stretch_of_single_row_is_one_row() {
        let rows = row_partitions(&[1.0, 2.0]).pop().unwrap();
        let grids = stretch_across_rows(&rows);
        assert_eq!(grids.len(), 1);
        assert_eq!(grids[0].to_string(), "cols(0, 1)");
    }

    #[test]
    fn stretch_offers_hero_beside_stacked_pair() {
        // [0, 1] over [2]
        let rows = row_partitions(&[1.0, 1.0, 1.0]).swap_remove(2);
        let grids: Vec<String> = stretch_across_rows(&rows)
            .iter()
            .map(|g| g.to_string())
            .collect();
        assert_eq!(grids, vec!["rows(cols(0, 1), 2)", "cols(0, rows(1, 2))"]);
    }

    #[test]
    fn stretch_depth_runs_from_one_row_to_all_rows() {
        // [0, 1] over [2] over [3]
        let items = IndexedItem::from_ratios(&[1.0; 4]);
        let rows = vec![items[..2].to_vec(), vec![items[2]], vec![items[3]]];
        let grids: Vec<String> = stretch_across_rows(&rows)
            .iter()
            .map(|g| g.to_string())
            .collect();
        assert_eq!(
            grids,
            vec![
                "rows(cols(0, 1), 2, 3)",
                "rows(cols(0, rows(1, 2)), 3)",
                "cols(0, rows(1, 2, 3))",
            ]
        );
    }

    #[test]
    fn four_squares_include_partial_and_full_stretches() {
        let all: Vec<String> = candidates(&[1.0; 4]).iter().map(|g| g.to_string()).collect();
        assert_eq!(all.len(), 14);
        assert!(all.iter().any(|g| g == "rows(cols(0, rows(1, 2)), 3)"));
        assert!(all.iter().any(|g| g == "cols(0, rows(1, 2, 3))"));
    }

    #[test]
    fn narrow_first_row_is_kept_fixed() {
        let rows = row_partitions(&[1.0, 1.0, 1.0]).swap_remove(1);
        let grids: Vec<String> = stretch_across_rows(&rows)
            .iter()
            .map(|g| g.to_string())
            .collect();
        assert_eq!(grids, vec!["rows(0, cols(1, 2))"]);
    }

    #[test]
    fn candidates_cover_every_item_in_order() {
        let ratios = [1.0, 0.5, 2.0, 1.3, 0.8];
        let all = candidates(&ratios);
        assert!(all.len() >= row_partitions(&ratios).len());
        for grid in &all {
            assert_eq!(grid.leaf_indices(), vec![0, 1, 2, 3, 4], "{}", grid);
        }
    }

    #[test]
    #[should_panic(expected = "empty row")]
    fn empty_row_panics() {
        let item = IndexedItem {
            idx: 0,
            aspect_ratio: 1.0,
        };
        stretch_across_rows(&[vec![item], Vec::new()]);
    }
}

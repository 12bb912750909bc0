pub mod cache;
pub mod geometry;
pub mod linear;
pub mod score;

use rayon::prelude::*;

use crate::grid::partition;

/// Gap used when the caller does not pick one (1% of the container width).
pub const DEFAULT_GAP: f64 = 0.01;
/// Largest gap accepted; larger values are clamped.
pub const MAX_GAP: f64 = 0.1;
/// The search is exponential in the item count. Above this it gets slow.
pub const RECOMMENDED_MAX_ITEMS: usize = 10;

/// One item's placement, in fractions of the whole mosaic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedItem {
    /// Index into the caller's item list
    pub idx: usize,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// A placement in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub idx: usize,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

/// The full mosaic: overall shape plus one placement per input item.
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicLayout {
    /// Width:height of the whole mosaic, gaps included
    pub aspect_ratio: f64,
    /// Sorted by `idx`
    pub items: Vec<PlacedItem>,
}

impl MosaicLayout {
    /// Height of the mosaic when rendered `width` wide.
    pub fn height_for_width(&self, width: f64) -> f64 {
        width / self.aspect_ratio
    }

    /// Map every placement onto a container `width` pixels wide.
    pub fn pixel_rects(&self, width: f32) -> Vec<PixelRect> {
        let height = self.height_for_width(width as f64) as f32;
        self.items
            .iter()
            .map(|item| PixelRect {
                idx: item.idx,
                x: item.left as f32 * width,
                y: item.top as f32 * height,
                w: item.width as f32 * width,
                h: item.height as f32 * height,
            })
            .collect()
    }

    /// Pair caller items with their placements.
    ///
    /// `items` must be the list the layout was computed from; placements whose
    /// index is out of range are skipped.
    pub fn place<'a, T>(
        &'a self,
        items: &'a [T],
    ) -> impl Iterator<Item = (&'a T, &'a PlacedItem)> + 'a {
        self.items
            .iter()
            .filter_map(move |placed| items.get(placed.idx).map(|item| (item, placed)))
    }
}

/// Configuration for mosaic layout.
#[derive(Debug, Clone)]
pub struct MosaicConfig {
    /// Space between neighbouring items, as a fraction of the container width.
    /// Clamped to `0.0..=MAX_GAP` when used.
    pub gap: f64,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self { gap: DEFAULT_GAP }
    }
}

impl MosaicConfig {
    pub fn with_gap(gap: f64) -> Self {
        Self { gap }
    }

    /// The gap actually used. NaN falls back to the default and `-0.0`
    /// becomes `0.0`.
    pub fn clamped_gap(&self) -> f64 {
        if self.gap.is_nan() {
            DEFAULT_GAP
        } else {
            self.gap.clamp(0.0, MAX_GAP) + 0.0
        }
    }
}

/// Lay out items of the given aspect ratios as a mosaic.
///
/// Returns `None` when there is nothing to lay out. `gap` defaults to
/// [`DEFAULT_GAP`] and is clamped to `0.0..=MAX_GAP`.
pub fn layout_mosaic(aspect_ratios: &[f64], gap: Option<f64>) -> Option<MosaicLayout> {
    let config = gap.map_or_else(MosaicConfig::default, MosaicConfig::with_gap);
    compute_mosaic(aspect_ratios, &config)
}

/// Search every candidate grid, keep the most even one and solve its geometry.
///
/// Panics if an aspect ratio is not a positive finite number.
pub fn compute_mosaic(aspect_ratios: &[f64], config: &MosaicConfig) -> Option<MosaicLayout> {
    if aspect_ratios.is_empty() {
        return None;
    }

    if let Some((idx, bad)) = aspect_ratios
        .iter()
        .enumerate()
        .find(|(_, ar)| !(ar.is_finite() && **ar > 0.0))
    {
        panic!("item {} has invalid aspect ratio {}", idx, bad);
    }

    if aspect_ratios.len() > RECOMMENDED_MAX_ITEMS {
        tracing::warn!(
            "Laying out {} items (recommended max {}), this may take a while",
            aspect_ratios.len(),
            RECOMMENDED_MAX_ITEMS
        );
    }

    let gap = config.clamped_gap();
    let candidates = partition::candidates(aspect_ratios);
    let candidate_count = candidates.len();

    let best = score::pick_best(candidates)?;
    tracing::debug!(
        "Mosaic of {} items: {} candidates, winner {} (score={:.6})",
        aspect_ratios.len(),
        candidate_count,
        best.grid,
        best.score
    );

    Some(geometry::solve_geometry(&best.grid, gap))
}

/// Lay out many independent mosaics in parallel (e.g. every post in a feed page).
pub fn layout_many(inputs: &[Vec<f64>], config: &MosaicConfig) -> Vec<Option<MosaicLayout>> {
    inputs
        .par_iter()
        .map(|ratios| compute_mosaic(ratios, config))
        .collect()
}

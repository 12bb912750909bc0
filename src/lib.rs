// Public library interface for mosaic-rs
// The command-line tools in src/bin use these modules directly

pub mod cli;
pub mod grid;
pub mod layout;

pub use layout::{
    compute_mosaic, layout_many, layout_mosaic, MosaicConfig, MosaicLayout, PlacedItem,
};

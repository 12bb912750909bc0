use anyhow::{bail, Result};

use mosaic_rs::cli;
use mosaic_rs::layout_mosaic;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mosaic_rs=info".parse()?),
        )
        .init();

    let args = cli::parse_args(std::env::args().skip(1))?;
    if args.aspect_ratios.is_empty() {
        bail!("usage: mosaic RATIO... [--gap G] [--width W]   (e.g. mosaic 16/9 1 1 --gap 0.01)");
    }

    let Some(layout) = layout_mosaic(&args.aspect_ratios, args.gap) else {
        bail!("nothing to lay out");
    };

    println!(
        "Mosaic: {} items, aspect ratio {:.4} ({:.0}x{:.0}px)",
        layout.items.len(),
        layout.aspect_ratio,
        args.width,
        layout.height_for_width(args.width as f64)
    );
    println!();
    println!("  idx    left     top   width  height |      x      y      w      h");

    for (item, px) in layout.items.iter().zip(layout.pixel_rects(args.width)) {
        println!(
            "  {:>3}  {:>6.4}  {:>6.4}  {:>6.4}  {:>6.4} | {:>6.1} {:>6.1} {:>6.1} {:>6.1}",
            item.idx, item.left, item.top, item.width, item.height, px.x, px.y, px.w, px.h
        );
    }

    Ok(())
}

/// Exhaustive layout validation tool
/// Sweeps a palette of aspect ratios and checks every mosaic invariant
use anyhow::bail;
use mosaic_rs::layout::{layout_many, MosaicConfig, MosaicLayout};

const PALETTE: [f64; 6] = [0.5, 0.75, 1.0, 4.0 / 3.0, 16.0 / 9.0, 2.5];
const MAX_ITEMS: usize = 5;
const EPS: f64 = 1e-9;

/// Every sequence of palette entries of length `n`.
fn sequences(n: usize) -> Vec<Vec<f64>> {
    let mut out = vec![Vec::new()];
    for _ in 0..n {
        out = out
            .into_iter()
            .flat_map(|prefix| {
                PALETTE.into_iter().map(move |ar| {
                    let mut next = prefix.clone();
                    next.push(ar);
                    next
                })
            })
            .collect();
    }
    out
}

/// Describe the first broken invariant, if any.
fn check(ratios: &[f64], layout: &MosaicLayout, gap: f64) -> Option<String> {
    if layout.items.len() != ratios.len() {
        return Some(format!("{} items for {} inputs", layout.items.len(), ratios.len()));
    }
    if !(layout.aspect_ratio.is_finite() && layout.aspect_ratio > 0.0) {
        return Some(format!("bad overall aspect ratio {}", layout.aspect_ratio));
    }

    let box_h = 1.0 / layout.aspect_ratio;
    let mut area = 0.0;
    for (expected, item) in layout.items.iter().enumerate() {
        if item.idx != expected {
            return Some(format!("index {} where {} expected", item.idx, expected));
        }
        if item.left < -EPS || item.top < -EPS {
            return Some(format!("item {} starts outside the box", item.idx));
        }
        if item.left + item.width > 1.0 + EPS || item.top + item.height > 1.0 + EPS {
            return Some(format!("item {} ends outside the box", item.idx));
        }
        let actual = item.width / (item.height * box_h);
        if (actual - ratios[item.idx]).abs() > 1e-6 {
            return Some(format!("item {} aspect {} != {}", item.idx, actual, ratios[item.idx]));
        }
        area += item.width * item.height;
    }

    // Gaps only ever remove area
    if area > 1.0 + EPS || (gap == 0.0 && (area - 1.0).abs() > 1e-6) {
        return Some(format!("items cover {:.6} of the box", area));
    }
    None
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mosaic_rs=info".parse()?),
        )
        .init();

    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║           MOSAIC-RS LAYOUT VALIDATION TOOL                   ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Palette: {:?}", PALETTE);
    println!();

    let mut failures = 0usize;
    for gap in [0.0, 0.01, 0.1] {
        let config = MosaicConfig::with_gap(gap);
        println!("┌─ GAP {:<5} ─────────────────────────────────────────────────┐", gap);

        for n in 1..=MAX_ITEMS {
            let inputs = sequences(n);
            let start = std::time::Instant::now();
            let layouts = layout_many(&inputs, &config);
            let elapsed = start.elapsed();

            let mut broken = 0;
            for (ratios, layout) in inputs.iter().zip(&layouts) {
                let problem = match layout {
                    Some(layout) => check(ratios, layout, config.clamped_gap()),
                    None => Some("no layout".to_string()),
                };
                if let Some(problem) = problem {
                    if broken < 5 {
                        println!("  ✗ {:?}: {}", ratios, problem);
                    }
                    broken += 1;
                }
            }

            let mark = if broken == 0 { "✓" } else { "✗" };
            println!(
                "  {} n={}: {} layouts in {:.2}s, {} broken",
                mark,
                n,
                inputs.len(),
                elapsed.as_secs_f64(),
                broken
            );
            failures += broken;
        }
        println!("└────────────────────────────────────────────────────────────┘");
        println!();
    }

    if failures > 0 {
        bail!("{} layouts broke an invariant", failures);
    }
    println!("✓ All layouts valid");
    Ok(())
}

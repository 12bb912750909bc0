/// Diagnostic tool to verify partitions → scoring → geometry pipeline
use mosaic_rs::cli;
use mosaic_rs::grid::partition;
use mosaic_rs::layout::{geometry, score, MosaicConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mosaic_rs=debug".parse()?),
        )
        .init();

    let mut args = cli::parse_args(std::env::args().skip(1))?;
    if args.aspect_ratios.is_empty() {
        args.aspect_ratios = vec![16.0 / 9.0, 1.0, 1.0];
    }
    let ratios = &args.aspect_ratios;
    let gap = args.gap.map_or_else(MosaicConfig::default, MosaicConfig::with_gap).clamped_gap();

    println!("=== DIAGNOSTIC: Partition → Score → Geometry Pipeline ===");
    println!("Aspect ratios: {:?}", ratios);
    println!("Gap: {}", gap);

    // Row partitions
    let rows = partition::row_partitions(ratios);
    println!("\n[1] Row partitions: {}", rows.len());
    for (i, partition) in rows.iter().take(8).enumerate() {
        let shape: Vec<Vec<usize>> = partition
            .iter()
            .map(|row| row.iter().map(|item| item.idx).collect())
            .collect();
        println!("    [{}] {:?}", i, shape);
    }
    if rows.len() > 8 {
        println!("    ... ({} more)", rows.len() - 8);
    }

    // Candidates
    let candidates = partition::candidates(ratios);
    println!("\n[2] Candidate grids: {}", candidates.len());

    // Show the 10 best candidates
    let mut scored: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .map(|(i, grid)| (i, score::score(grid)))
        .collect();
    scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

    println!("\n[3] Top 10 candidates by score:");
    for (rank, &(i, s)) in scored.iter().take(10).enumerate() {
        let grid = &candidates[i];
        println!(
            "    [{}] #{} score={:.6} aspect={:.3} penalty={:.0}  {}",
            rank,
            i,
            s,
            grid.aspect_ratio(),
            score::aspect_penalty(grid.aspect_ratio()),
            grid
        );
    }

    let Some(best) = score::pick_best(candidates) else {
        println!("\nNo candidates (empty input)");
        return Ok(());
    };
    println!(
        "\n[4] Winner: {} (score={:.6}, {} nodes)",
        best.grid,
        best.score,
        best.grid.node_count()
    );

    // Exact geometry
    let layout = geometry::solve_geometry(&best.grid, gap);
    println!("\n[5] Geometry: aspect ratio {:.6}", layout.aspect_ratio);
    for item in &layout.items {
        println!(
            "    [{}] left={:.4} top={:.4} width={:.4} height={:.4}",
            item.idx, item.left, item.top, item.width, item.height
        );
    }

    // Check for anomalies
    println!("\n[6] Checking for anomalies:");
    let eps = 1e-9;
    let box_h = 1.0 / layout.aspect_ratio;
    let mut anomalies = 0;
    let mut area_sum = 0.0;
    for item in &layout.items {
        area_sum += item.width * item.height;
        if item.left < -eps
            || item.top < -eps
            || item.left + item.width > 1.0 + eps
            || item.top + item.height > 1.0 + eps
        {
            println!("    ✗ item {} leaves the box", item.idx);
            anomalies += 1;
        }
        let actual = item.width / (item.height * box_h);
        if (actual - ratios[item.idx]).abs() > 1e-6 {
            println!("    ✗ item {} aspect {:.6} != {:.6}", item.idx, actual, ratios[item.idx]);
            anomalies += 1;
        }
    }
    println!("    Coverage (excluding gaps): {:.1}%", area_sum * 100.0);
    println!("    Anomalies: {}", anomalies);

    Ok(())
}

use image::{Rgb, RgbImage};
use vasc_cli::{JunctionAnalyzer, PipelineConfig};

/// Bright background with a horizontal trunk, a vertical crossing vessel and
/// a diagonal branch leaving the trunk
fn synthetic_fundus(width: u32, height: u32) -> RgbImage {
    let vessel = Rgb([90, 55, 35]);
    let background = Rgb([190, 150, 95]);
    let (mid_y, fork_x) = (height / 2, 2 * width / 3);
    RgbImage::from_fn(width, height, |x, y| {
        let trunk = y.abs_diff(mid_y) <= 3;
        let crossing = x.abs_diff(width / 3) <= 2;
        let branch = x > fork_x && y <= mid_y && (x - fork_x).abs_diff(mid_y - y) <= 2;
        if trunk || crossing || branch {
            vessel
        } else {
            background
        }
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Vessel junction demo");
    println!("====================\n");

    let image = synthetic_fundus(320, 240);
    let config = PipelineConfig {
        name: Some("synthetic".to_string()),
        ..Default::default()
    };
    println!("{}", config.summary());

    let analyzer = JunctionAnalyzer::new(config)?;
    let analysis = analyzer.analyze(&image)?;

    println!("Time taken: {:.2?}", analysis.elapsed);
    println!("Vessel pixels: {}", analysis.vessels.count());
    println!("Skeleton pixels: {}", analysis.skeleton.count());
    for j in &analysis.junctions.bifurcations {
        println!("  bifurcation at row {}, col {}", j.row, j.col);
    }
    for j in &analysis.junctions.intersections {
        println!("  intersection at row {}, col {}", j.row, j.col);
    }

    let out_dir = std::env::temp_dir();
    let output = out_dir.join("synthetic_fundus_calculated.png");
    analysis.annotated.save(&output)?;
    println!("\nSaved result image as {}", output.display());
    println!("{}", analysis.report().with_source("synthetic").to_json()?);

    Ok(())
}

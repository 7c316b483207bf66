//! Quadmap - walks a small map through zoom and pan steps.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use spatial::{Config, Map, MapPoint};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Quadmap v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load()?;
    let boundary = config.boundary.rect();
    info!("Loaded configuration");
    info!("  Boundary: {}x{} at ({}, {})", boundary.width, boundary.height, boundary.x, boundary.y);
    info!("  Node capacity: {}", config.index.capacity);
    info!("  Max depth: {}", config.index.max_depth);

    let mut map = Map::from_config(&config)?;

    let named = [
        (100.0, 100.0, "Point A"),
        (200.0, 200.0, "Point B"),
        (300.0, 300.0, "Point C"),
        (400.0, 400.0, "Point D"),
        (500.0, 500.0, "Point E"),
    ];
    for (x, y, name) in named {
        if !map.add_point(MapPoint::new(x, y, name.to_string())) {
            warn!("{} at ({}, {}) is outside the map", name, x, y);
        }
    }

    if config.demo.random_points > 0 {
        let mut rng = StdRng::seed_from_u64(config.demo.seed);
        for i in 0..config.demo.random_points {
            let x = boundary.x + rng.random::<f64>() * boundary.width;
            let y = boundary.y + rng.random::<f64>() * boundary.height;
            map.add_point(MapPoint::new(x, y, format!("Random #{i}")));
        }
        info!("Scattered {} random points", config.demo.random_points);
    }

    info!(
        "Index holds {} points in {} nodes (depth {})",
        map.tree().len(),
        map.tree().node_count(),
        map.tree().depth()
    );

    report("Initial view", &map);

    map.zoom_in();
    map.zoom_in();
    report("After zooming in twice", &map);

    map.pan(100.0, 100.0);
    report("After panning", &map);

    map.zoom_out();
    report("After zooming out once", &map);

    Ok(())
}

fn report(title: &str, map: &Map<String>) {
    let center = map.center();
    let visible = map.visible_points();

    info!("{}:", title);
    info!("  Zoom level: {}", map.zoom_level());
    info!("  Center: ({:.1}, {:.1})", center.x, center.y);
    info!("  Visible points: {}", visible.len());
    for v in &visible {
        info!("    ({}, {}) {}", v.point.x, v.point.y, v.data.join(", "));
    }
}

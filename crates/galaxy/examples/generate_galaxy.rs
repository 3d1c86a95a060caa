//! Generates a galaxy and prints a summary of its systems.
//!
//! ```text
//! cargo run -p galaxy --example generate_galaxy -- [config.toml]
//! RUST_LOG=galaxy=debug cargo run -p galaxy --example generate_galaxy
//! ```

use anyhow::Context;
use galaxy::{GalaxyGenerator, GenerationConfig};
use nalgebra::{Point3, Vector3};
use octree::Ray;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn load_config() -> anyhow::Result<GenerationConfig> {
    let Some(path) = std::env::args().nth(1) else {
        return Ok(GenerationConfig {
            star_count: 20_000,
            star_per_point: 100,
            ..GenerationConfig::default()
        });
    };
    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    GenerationConfig::from_toml_str(&text).with_context(|| format!("parsing {}", path))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config()?;
    info!(?config, "starting generation");

    let mut generator = GalaxyGenerator::new(config)?;
    let mut stars = 0;
    let mut planets = 0;
    for system in generator.by_ref() {
        let system = system?;
        stars += system.stars.len();
        planets += system.planets.len();
        if system.id.0 < 5 {
            println!("{}", system);
            for star in &system.stars {
                println!("  {}", star);
            }
            for planet in &system.planets {
                println!("  {}", planet);
            }
        }
    }

    println!(
        "{} systems, {} stars, {} planets and moons, farthest placement {:.1}",
        generator.systems().len(),
        stars,
        planets,
        generator.farthest_distance()
    );

    let ray = Ray::new(Point3::new(0.0, 0.0, 500.0), Vector3::new(0.1, 0.05, -1.0));
    match generator.pick_system(&ray, 2.0) {
        Some(system) => println!("ray from above the core hits {}", system),
        None => println!("ray from above the core hits nothing"),
    }

    let nearby = generator.systems_near(Point3::origin(), 50.0);
    println!("{} systems within 50 of the centre", nearby.len());

    Ok(())
}

//! pickray CLI - cast rays against collision scenes
//!
//! Loads a JSON scene description and runs pick queries or prints
//! per-object statistics.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pickray_math::{Point3, Vec3};
use pickray_raytrace::{PickHit, Ray, Scene};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pickray")]
#[command(about = "Ray picking against triangle-mesh collision scenes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast a ray and report the nearest hit
    Cast {
        /// Scene description (.json)
        scene: PathBuf,
        /// Ray origin as x,y,z
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        origin: Vec3,
        /// Ray direction as x,y,z (need not be unit length)
        #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
        dir: Vec3,
        /// Report every hit, nearest first
        #[arg(long)]
        all: bool,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        overrides: SettingsArgs,
    },
    /// Print each object's world-space bounding region
    Bounds {
        /// Scene description (.json)
        scene: PathBuf,
    },
    /// Display information about a scene
    Info {
        /// Scene description (.json)
        scene: PathBuf,
    },
}

/// Overrides for the scene file's raycast settings.
#[derive(clap::Args)]
struct SettingsArgs {
    /// Plane-test tolerance on dot products (0 for exact comparisons)
    #[arg(long)]
    epsilon: Option<f64>,
    /// Outward slack of the point-in-triangle test
    #[arg(long)]
    radius: Option<f64>,
    /// Test every triangle without the bounding-region reject
    #[arg(long)]
    no_broad_phase: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Cast {
            scene,
            origin,
            dir,
            all,
            json,
            overrides,
        } => {
            let mut scene = load_scene(&scene)?;
            apply_overrides(&mut scene, &overrides);
            cast(&scene, origin, dir, all, json)?;
        }
        Commands::Bounds { scene } => {
            show_bounds(&load_scene(&scene)?);
        }
        Commands::Info { scene } => {
            show_info(&scene, &load_scene(&scene)?);
        }
    }

    Ok(())
}

fn load_scene(path: &Path) -> Result<Scene> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let scene = Scene::from_json(&json)
        .with_context(|| format!("failed to load scene {}", path.display()))?;
    log::info!("loaded {} objects from {}", scene.len(), path.display());
    Ok(scene)
}

fn apply_overrides(scene: &mut Scene, args: &SettingsArgs) {
    let mut settings = *scene.settings();
    if let Some(eps) = args.epsilon {
        settings.parallel_epsilon = eps;
    }
    if let Some(radius) = args.radius {
        settings.face_radius = radius;
    }
    if args.no_broad_phase {
        settings.broad_phase = false;
    }
    scene.set_settings(settings);
}

/// Parse `x,y,z` into a vector.
fn parse_vec3(s: &str) -> Result<Vec3> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        anyhow::bail!("expected three comma-separated numbers, got `{s}`");
    }
    let mut v = Vec3::zeros();
    for (i, part) in parts.iter().enumerate() {
        v[i] = part
            .parse::<f64>()
            .with_context(|| format!("invalid number `{part}`"))?;
    }
    Ok(v)
}

/// One hit, flattened for output.
#[derive(Debug, Serialize)]
struct HitReport {
    object: usize,
    name: String,
    t: f64,
    point: [f64; 3],
    normal: [f64; 3],
    mesh: usize,
    triangle: usize,
}

impl HitReport {
    fn new(scene: &Scene, pick: &PickHit) -> Self {
        let name = scene
            .get(pick.object)
            .map(|o| o.name.clone())
            .unwrap_or_default();
        let hit = &pick.hit;
        Self {
            object: pick.object,
            name,
            t: hit.t,
            point: [hit.point.x, hit.point.y, hit.point.z],
            normal: [hit.normal.x, hit.normal.y, hit.normal.z],
            mesh: hit.mesh_index,
            triangle: hit.triangle_index,
        }
    }
}

fn cast(scene: &Scene, origin: Vec3, dir: Vec3, all: bool, json: bool) -> Result<()> {
    let ray = Ray::try_new(Point3::from(origin), dir).context("invalid ray")?;

    let hits: Vec<PickHit> = if all {
        scene.pick_all(&ray)
    } else {
        scene.pick(&ray).into_iter().collect()
    };
    let reports: Vec<HitReport> = hits.iter().map(|h| HitReport::new(scene, h)).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("no hit");
    }
    for r in &reports {
        println!(
            "{} `{}`: t = {} at ({}, {}, {}) mesh {} triangle {}",
            r.object, r.name, r.t, r.point[0], r.point[1], r.point[2], r.mesh, r.triangle
        );
    }
    Ok(())
}

fn show_bounds(scene: &Scene) {
    for (id, object) in scene.objects().iter().enumerate() {
        let b = object.world_bounds();
        if b.is_empty() {
            println!("{}: {} (empty)", id, object.name);
        } else {
            println!(
                "{}: {} min ({}, {}, {}) max ({}, {}, {})",
                id, object.name, b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
            );
        }
    }
}

fn show_info(path: &Path, scene: &Scene) {
    println!("pickray scene: {}", path.display());
    println!("  Objects: {}", scene.len());
    let settings = scene.settings();
    println!(
        "  Settings: epsilon {}, face radius {}, broad phase {}",
        settings.parallel_epsilon, settings.face_radius, settings.broad_phase
    );

    let total: usize = scene.objects().iter().map(|o| o.model.num_triangles()).sum();
    for (id, object) in scene.objects().iter().enumerate() {
        println!(
            "  {}: {} ({} meshes, {} triangles)",
            id,
            object.name,
            object.model.meshes.len(),
            object.model.num_triangles()
        );
    }
    println!("  Total triangles: {}", total);
}

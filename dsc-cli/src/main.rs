//! dsc CLI: inspect display surface geometry and calibrated cameras.

use clap::{Args, Parser, Subcommand};
use dsc_core::surface::{ColorBinding, PrimitiveMode};
use dsc_core::{CalibratedCamera, SurfaceGeometry};
use nalgebra::{Matrix4, Vector2, Vector3};
use serde_json::json;
use std::path::PathBuf;

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "dsc")]
#[command(about = "Display surface and projector camera calibration tools")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the named landmarks of a display surface.
    KeyPoints(GeometryArgs),

    /// Tessellate a display surface and summarize or export the mesh.
    Mesh {
        #[command(flatten)]
        geometry: GeometryArgs,

        /// Color vertices by texture coordinate instead of a flat color.
        #[arg(long)]
        texcoord_colors: bool,

        /// Path to write the mesh (JSON).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print projection and view matrices of a camera.
    Camera {
        #[command(flatten)]
        camera: CameraArgs,

        /// Near clip plane distance.
        #[arg(long, default_value = "0.1")]
        znear: f64,

        /// Far clip plane distance.
        #[arg(long, default_value = "10.0")]
        zfar: f64,
    },

    /// Back-project a pixel into the camera frame and the world.
    Pixel {
        #[command(flatten)]
        camera: CameraArgs,

        /// Pixel column.
        #[arg(long)]
        u: f64,

        /// Pixel row.
        #[arg(long)]
        v: f64,

        /// Distance from the camera center along the pixel ray.
        #[arg(long, default_value = "1.0")]
        distance: f64,
    },

    /// Print the world-space corners of a camera's viewing frustum.
    Frustum {
        #[command(flatten)]
        camera: CameraArgs,

        /// Far plane distance; the near plane sits at a tenth of it.
        #[arg(long, default_value = "1.0")]
        size: f64,
    },
}

#[derive(Debug, Clone, Args)]
struct GeometryArgs {
    /// Path to the display geometry document (JSON).
    #[arg(long, default_value = "geom.json")]
    geometry: PathBuf,
}

#[derive(Debug, Clone, Args)]
struct CameraArgs {
    /// Path to a camera calibration document (JSON). Uses the built-in
    /// reference camera when omitted.
    #[arg(long)]
    camera: Option<PathBuf>,
}

impl CameraArgs {
    fn load(&self) -> CliResult<CalibratedCamera> {
        let camera = match &self.camera {
            Some(path) => dsc_io::load_camera(path)?,
            None => {
                tracing::info!("no camera document given, using the reference camera");
                dsc_io::reference_camera()?
            }
        };
        Ok(camera)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::KeyPoints(args) => run_key_points(&args),
        Commands::Mesh {
            geometry,
            texcoord_colors,
            out,
        } => run_mesh(&geometry, texcoord_colors, out.as_ref()),
        Commands::Camera { camera, znear, zfar } => run_camera(&camera, znear, zfar),
        Commands::Pixel {
            camera,
            u,
            v,
            distance,
        } => run_pixel(&camera, u, v, distance),
        Commands::Frustum { camera, size } => run_frustum(&camera, size),
    }
}

fn fmt_vec3(v: &Vector3<f64>) -> String {
    format!("({:.6}, {:.6}, {:.6})", v.x, v.y, v.z)
}

fn print_matrix(name: &str, m: &Matrix4<f64>) {
    println!("{}:", name);
    for row in m.row_iter() {
        println!(
            "  [{:>12.6} {:>12.6} {:>12.6} {:>12.6}]",
            row[0], row[1], row[2], row[3]
        );
    }
}

// ── key-points ────────────────────────────────────────────────────────

fn run_key_points(args: &GeometryArgs) -> CliResult<()> {
    let catalog = dsc_io::load_catalog(&args.geometry)?;

    println!("{} key points", catalog.model().name());
    for (name, point) in catalog.key_points() {
        println!("  {:<10} {}", name, fmt_vec3(&point));
    }
    Ok(())
}

// ── mesh ──────────────────────────────────────────────────────────────

fn mode_name(mode: PrimitiveMode) -> &'static str {
    match mode {
        PrimitiveMode::Points => "points",
        PrimitiveMode::Lines => "lines",
        PrimitiveMode::LineLoop => "line_loop",
        PrimitiveMode::QuadStrip => "quad_strip",
    }
}

fn run_mesh(args: &GeometryArgs, texcoord_colors: bool, out: Option<&PathBuf>) -> CliResult<()> {
    let catalog = dsc_io::load_catalog(&args.geometry)?;
    let mesh = catalog.make_mesh(texcoord_colors);

    println!("{} mesh", catalog.model().name());
    println!("  vertices:    {}", mesh.vertex_count());
    println!("  primitives:  {}", mesh.primitives.len());
    if let Some(first) = mesh.primitives.first() {
        println!("  first:       {} x{}", mode_name(first.mode), first.len());
    }

    if let Some(path) = out {
        let colors = match &mesh.colors {
            ColorBinding::Overall(c) => json!({ "overall": c }),
            ColorBinding::PerVertex(cs) => json!({ "per_vertex": cs }),
        };
        let doc = json!({
            "model": catalog.model().name(),
            "vertices": mesh.vertices.iter().map(|v| [v.x, v.y, v.z]).collect::<Vec<_>>(),
            "normals": mesh.normals.iter().map(|n| [n.x, n.y, n.z]).collect::<Vec<_>>(),
            "texcoords": mesh.texcoords.iter().map(|t| [t.x, t.y]).collect::<Vec<_>>(),
            "colors": colors,
            "primitives": mesh.primitives.iter().map(|p| json!({
                "mode": mode_name(p.mode),
                "indices": p.index_list(),
            })).collect::<Vec<_>>(),
        });
        std::fs::write(path, serde_json::to_string(&doc)?)?;
        tracing::info!(path = %path.display(), "mesh written");
    }
    Ok(())
}

// ── camera ────────────────────────────────────────────────────────────

fn run_camera(args: &CameraArgs, znear: f64, zfar: f64) -> CliResult<()> {
    let camera = args.load()?;
    let (width, height) = camera.image_size();

    println!("camera {}x{} (y_up={})", width, height, camera.y_up());
    if camera.is_intrinsic_valid() {
        print_matrix("projection", &camera.projection(znear, zfar)?);
    } else {
        println!("  intrinsics not set");
    }
    if camera.is_extrinsic_valid() {
        print_matrix("view", &camera.view()?);
        println!("eye:         {}", fmt_vec3(&camera.eye()?));
        println!("translation: {}", fmt_vec3(&camera.translation()?));
    } else {
        println!("  extrinsics not set");
    }
    Ok(())
}

// ── pixel ─────────────────────────────────────────────────────────────

fn run_pixel(args: &CameraArgs, u: f64, v: f64, distance: f64) -> CliResult<()> {
    let camera = args.load()?;
    let uv = Vector2::new(u, v);

    let xyz_c = camera.project_pixel_to_camera_frame(&uv, false, distance)?;
    println!("camera frame: {}", fmt_vec3(&xyz_c));

    if camera.is_extrinsic_valid() {
        let world = camera.project_camera_frame_to_3d(&xyz_c)?;
        let ray = camera.pixel_ray(&uv)?;
        println!("world:        {}", fmt_vec3(&world));
        println!("ray origin:   {}", fmt_vec3(&ray.origin));
        println!("ray dir:      {}", fmt_vec3(&ray.direction));
    }
    Ok(())
}

// ── frustum ───────────────────────────────────────────────────────────

fn run_frustum(args: &CameraArgs, size: f64) -> CliResult<()> {
    let camera = args.load()?;
    let frustum = camera.make_rendering(size)?;

    println!("frustum near={:.4} far={:.4}", frustum.near, frustum.far);
    let labels = [
        "apex", "near bl", "near br", "near tr", "near tl", "far bl", "far br", "far tr",
        "far tl",
    ];
    for (label, v) in labels.iter().zip(frustum.world_vertices()) {
        println!("  {:<8} {}", label, fmt_vec3(&v));
    }
    Ok(())
}

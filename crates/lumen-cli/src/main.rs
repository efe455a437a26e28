//! lumen CLI - render built-in scenes with the lumen renderer
//!
//! Renders still images or whole keyframe animations to PNG files.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use lumen_anim::Animator;
use lumen_render::{RenderMethod, Renderer};
use lumen_scene::{NodeId, Scene};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod scenes;

use config::Config;
use scenes::Preset;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "Ray-traced and ray-marched scene renderer", long_about = None)]
struct Cli {
    /// TOML file with [render] and [animation] tables
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one image
    Render {
        /// Output image (format determined by extension)
        #[arg(short, long, default_value = "render.png")]
        output: PathBuf,
        /// Hit-test algorithm
        #[arg(short, long, value_enum, default_value_t = Method::Trace)]
        method: Method,
        /// Scene to render
        #[arg(short, long, value_enum, default_value_t = Preset::Studio)]
        scene: Preset,
    },
    /// Render every frame of the scene's animation as anim<frame>.png
    RenderAnimation {
        /// Directory for the frames
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Hit-test algorithm
        #[arg(short, long, value_enum, default_value_t = Method::Trace)]
        method: Method,
        /// Scene to animate
        #[arg(short, long, value_enum, default_value_t = Preset::Arm)]
        scene: Preset,
    },
    /// Print the node hierarchy of a scene
    Info {
        /// Scene to describe
        #[arg(short, long, value_enum, default_value_t = Preset::Studio)]
        scene: Preset,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    /// Analytic ray tracing
    Trace,
    /// Sphere-traced ray marching
    March,
}

impl From<Method> for RenderMethod {
    fn from(m: Method) -> Self {
        match m {
            Method::Trace => RenderMethod::RayTrace,
            Method::March => RenderMethod::RayMarch,
        }
    }
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            output,
            method,
            scene,
        } => {
            render_still(&config, scene, method.into(), &output)?;
        }
        Commands::RenderAnimation {
            out_dir,
            method,
            scene,
        } => {
            render_animation(&config, scene, method.into(), &out_dir)?;
        }
        Commands::Info { scene } => {
            show_info(&scenes::build(scene)?)?;
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn render_still(config: &Config, preset: Preset, method: RenderMethod, output: &Path) -> Result<()> {
    let scene = scenes::build(preset)?;
    let renderer = Renderer::new(&scene, config.render)?;
    renderer.render(output, method)?;
    println!("Rendered {:?} to {}", preset, output.display());
    Ok(())
}

fn render_animation(
    config: &Config,
    preset: Preset,
    method: RenderMethod,
    out_dir: &Path,
) -> Result<()> {
    std::fs::create_dir_all(out_dir)?;
    let mut scene = scenes::build(preset)?;
    let mut anim =
        Animator::new(config.animation.range())?.with_easing(config.animation.easing);
    scenes::keyframe(preset, &mut scene, &mut anim)?;

    let mut written = 0usize;
    anim.play_through(&mut scene, |scene, frame| -> Result<()> {
        let path = out_dir.join(format!("anim{frame}.png"));
        Renderer::new(scene, config.render)?.render(&path, method)?;
        written += 1;
        Ok(())
    })?;

    info!(frames = written, dir = %out_dir.display(), "animation finished");
    println!("Rendered {} frames to {}", written, out_dir.display());
    Ok(())
}

fn show_info(scene: &Scene) -> Result<()> {
    println!("Nodes: {}", scene.len());
    println!("Lights: {}", scene.lights().count());
    println!("Ambient: {:.2}", scene.ambient().intensity);
    println!();

    let roots: Vec<NodeId> = scene.ids().filter(|&id| scene.parent(id).is_none()).collect();
    for root in roots {
        print_subtree(scene, root, 0)?;
    }
    Ok(())
}

fn print_subtree(scene: &Scene, id: NodeId, depth: usize) -> Result<()> {
    let node = scene.get(id)?;
    let p = scene.world_position(id)?;
    println!(
        "{:indent$}{} [{}] at ({:.2}, {:.2}, {:.2})",
        "",
        node.name(),
        node.shape().kind(),
        p.x,
        p.y,
        p.z,
        indent = depth * 2
    );
    for &child in scene.children(id) {
        print_subtree(scene, child, depth + 1)?;
    }
    Ok(())
}


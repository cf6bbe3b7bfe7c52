use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec2;
use tracing_subscriber::EnvFilter;

use tileworks_common::{DrawLayer, TILE_PX, TextureId};
use tileworks_content::{ContentView, Section, default_recipes};
use tileworks_render::{Camera2d, FloorRenderer, NullBatch, RecordingSink, SinkOp};
use tileworks_world::{AIR, Block, Floor, StaticBlock, StaticFloor, World};

#[derive(Parser)]
#[command(name = "tileworks-cli", about = "Headless tileworks diagnostics")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print engine version and crate info
    Info,
    /// Build a synthetic world and fill its chunk caches
    Cache {
        /// World width in tiles
        #[arg(long, default_value = "96")]
        width: i32,
        /// World height in tiles
        #[arg(long, default_value = "96")]
        height: i32,
    },
    /// Run one headless frame and report what would be drawn
    Draw {
        #[arg(long, default_value = "96")]
        width: i32,
        #[arg(long, default_value = "96")]
        height: i32,
        /// Camera x position, in tiles
        #[arg(long, default_value = "48")]
        cam_x: f32,
        /// Camera y position, in tiles
        #[arg(long, default_value = "48")]
        cam_y: f32,
        #[arg(long, default_value = "1.0")]
        zoom: f32,
    },
    /// List recipes, optionally filtered to one section
    Recipes {
        /// Section to list (defense, distribution, weapon, ...)
        #[arg(long)]
        section: Option<Section>,
        /// Include debug-only recipes
        #[arg(long)]
        debug: bool,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

static GRASS: StaticFloor = StaticFloor::new(DrawLayer::Floor, TextureId(1));
static MOSS: StaticFloor =
    StaticFloor::new(DrawLayer::Floor, TextureId(2)).with_decoration(TextureId(3));
static IRON_WALL: StaticBlock = StaticBlock::wall(TextureId(7));

/// Deterministic synthetic world: mossy patches over grass, sparse walls.
fn synthetic_world(width: i32, height: i32) -> World {
    World::generate(width, height, |x, y| {
        let floor: &'static dyn Floor = if (x / 4 + y / 4) % 3 == 0 { &MOSS } else { &GRASS };
        let block: &'static dyn Block = if (x * 31 + y * 17) % 97 == 0 {
            &IRON_WALL
        } else {
            &AIR
        };
        (floor, block)
    })
}

fn rebuild(width: i32, height: i32) -> FloorRenderer<RecordingSink> {
    let world = synthetic_world(width, height);
    let mut renderer = FloorRenderer::new();
    renderer.rebuild(&world, |_| RecordingSink::new());
    renderer
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("tileworks-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", tileworks_common::crate_info());
            println!("world: {}", tileworks_world::crate_info());
            println!("grid: {}", tileworks_grid::crate_info());
            println!("render: {}", tileworks_render::crate_info());
            println!("content: {}", tileworks_content::crate_info());
        }
        Commands::Cache { width, height } => {
            let renderer = rebuild(width, height);
            let (cx, cy) = renderer.dims();
            println!("world: {width}x{height} tiles, chunk table: {cx}x{cy}");

            let sink = renderer.sink().expect("rebuild installs a sink");
            let total_sprites: usize = sink.caches().iter().map(Vec::len).sum();
            println!("caches recorded: {}, sprites: {total_sprites}", sink.caches().len());

            for layer in DrawLayer::ALL {
                let filled = (0..cx)
                    .flat_map(|x| (0..cy).map(move |y| (x, y)))
                    .filter(|&(x, y)| renderer.layer_handle(x, y, layer).is_some())
                    .count();
                println!("  {layer:?}: {filled}/{} chunks non-empty", cx * cy);
            }
        }
        Commands::Draw {
            width,
            height,
            cam_x,
            cam_y,
            zoom,
        } => {
            let mut renderer = rebuild(width, height);
            let camera = Camera2d::new(
                Vec2::new(cam_x * TILE_PX, cam_y * TILE_PX),
                Vec2::new(800.0, 600.0),
                zoom,
            );

            let window = FloorRenderer::<RecordingSink>::window(&camera);
            println!(
                "visible window: center ({}, {}), range ({}, {}), {} chunks in bounds",
                window.center.x,
                window.center.y,
                window.range_x,
                window.range_y,
                window.clipped(renderer.dims()).count()
            );

            renderer.draw_floor(&camera, &mut NullBatch);
            renderer.draw_layer(&camera, DrawLayer::Walls);

            println!("layer union: {:?}", renderer.drawn_layers());
            let sink = renderer.sink().expect("rebuild installs a sink");
            let replays = sink
                .ops()
                .iter()
                .filter(|op| matches!(op, SinkOp::Replay(_)))
                .count();
            println!(
                "replays: {replays}, sprites submitted: {}",
                sink.replayed_sprites().len()
            );
        }
        Commands::Recipes { section, debug, json } => {
            let registry = default_recipes().context("loading stock recipe table")?;
            let view = if debug {
                ContentView::DESKTOP.with_debug()
            } else {
                ContentView::DESKTOP
            };

            let sections: Vec<Section> = match section {
                Some(s) => vec![s],
                None => Section::ALL.to_vec(),
            };

            for section in sections {
                let recipes = registry.section(section, view);
                if json {
                    println!("{}", serde_json::to_string_pretty(&recipes)?);
                    continue;
                }
                println!("[{section}]");
                for recipe in recipes {
                    let costs: Vec<String> = recipe
                        .inputs
                        .iter()
                        .map(|s| format!("{:?} x{}", s.item, s.amount))
                        .collect();
                    let mut flags = String::new();
                    if recipe.desktop_only {
                        flags.push_str(" [desktop]");
                    }
                    if recipe.debug_only {
                        flags.push_str(" [debug]");
                    }
                    println!("  {} <- {}{flags}", recipe.output, costs.join(", "));
                }
            }
        }
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use std::io;
use std::process::ExitCode;
use termplay::config::{BoidsConfig, LifeConfig, MinesConfig, NoiseConfig, SnakeConfig, SortConfig};
use termplay::links::{resolve, JsonLinkStore, LinkError, LinkStore, Redirect, REDIRECT_STATUS};
use termplay::pace::{totals, Hms, Leg};
use termplay::settings::{
    BoidsSettings, LifeSettings, MinesSettings, NoiseSettings, Settings, SnakeSettings, SortSettings,
};
use termplay::{logging, widgets};

#[derive(Parser)]
#[command(name = "termplay")]
#[command(author = "Terminal Art Generator")]
#[command(version = "0.1.0")]
#[command(about = "Terminal toy box: boids, game of life, minesweeper, snake, sorting, noise and short links", long_about = None)]
struct Cli {
    /// Log at debug level (written to the cache directory)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flocking boids
    Boids {
        /// Number of boids (1-500)
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Separation weight
        #[arg(long)]
        separation: Option<f32>,

        /// Alignment weight
        #[arg(long)]
        alignment: Option<f32>,

        /// Cohesion weight
        #[arg(long)]
        cohesion: Option<f32>,

        /// Maximum turn per step in degrees
        #[arg(short, long)]
        turn: Option<f32>,

        /// Per-boid trait spread (0.0-1.0)
        #[arg(long)]
        variance: Option<f32>,

        /// Field of view in degrees (360 = all around)
        #[arg(long)]
        cone: Option<f32>,

        /// Frames per second
        #[arg(long)]
        fps: Option<u32>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Conway's Game of Life (starts paused, edit then press p)
    Life {
        /// Grid width in cells (default: fit terminal)
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Grid height in cells (default: fit terminal)
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Generations per second (1-10)
        #[arg(long)]
        speed: Option<u32>,

        /// Fill ratio for random soups
        #[arg(short, long)]
        density: Option<f64>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Minesweeper
    Mines {
        #[arg(short, long)]
        rows: Option<usize>,

        #[arg(short, long)]
        cols: Option<usize>,

        /// Number of mines
        #[arg(short, long)]
        mines: Option<usize>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Snake
    Snake {
        /// Board width in cells
        #[arg(short = 'W', long)]
        width: Option<usize>,

        /// Board height in cells
        #[arg(short = 'H', long)]
        height: Option<usize>,

        /// Milliseconds per move
        #[arg(short, long)]
        tick_ms: Option<u64>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Bubble sort visualiser
    Sort {
        /// Number of bars (capped at the terminal width)
        #[arg(short, long)]
        bars: Option<usize>,

        /// Milliseconds per frame
        #[arg(short, long)]
        tick_ms: Option<u64>,

        /// Swaps shown per frame
        #[arg(long)]
        swaps: Option<u32>,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Seeded noise canvas
    Noise {
        /// Canvas seed in base 36 (default: from the clock)
        #[arg(short, long)]
        seed: Option<String>,
    },

    /// Time saved by going faster, per leg and in total
    Faster {
        /// Legs as SPEED1,SPEED2,DISTANCE (e.g. 60,80,120)
        #[arg(required = true)]
        legs: Vec<Leg>,
    },

    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },
}

#[derive(Subcommand)]
enum LinkAction {
    /// Store a new short link
    Add { slug: String, url: String },
    /// Print the URL for a slug
    Get { slug: String },
    /// Print every stored link
    List,
    /// Show what an inbound path such as /ls/abc redirects to
    Resolve { path: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let settings = Settings::load();

    let result = match cli.command {
        Commands::Link { action } => {
            return match run_link(&settings, action) {
                Ok(code) => code,
                Err(e) => {
                    eprintln!("termplay: {}", e);
                    ExitCode::FAILURE
                }
            };
        }
        Commands::Faster { legs } => {
            print_faster(&legs);
            Ok(())
        }
        command => run_widget(&settings, command),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("termplay: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Built-in defaults, then the settings file, then command-line flags.
/// Flags go through the same `apply` as the file so they get the same checks.
fn run_widget(settings: &Settings, command: Commands) -> io::Result<()> {
    match command {
        Commands::Boids {
            count,
            separation,
            alignment,
            cohesion,
            turn,
            variance,
            cone,
            fps,
            seed,
        } => {
            let mut config = BoidsConfig::default();
            config.apply(&settings.boids);
            config.apply(&BoidsSettings {
                count,
                separation,
                alignment,
                cohesion,
                max_turn: turn,
                view_radius: None,
                view_cone: cone,
                variance,
                fps,
            });
            config.seed = seed;
            widgets::boids::run(&config)
        }
        Commands::Life {
            width,
            height,
            speed,
            density,
            seed,
        } => {
            let mut config = LifeConfig::default();
            config.apply(&settings.life);
            config.apply(&LifeSettings {
                width,
                height,
                speed,
                density,
            });
            config.seed = seed;
            widgets::life::run(&config)
        }
        Commands::Mines { rows, cols, mines, seed } => {
            let mut config = MinesConfig::default();
            config.apply(&settings.mines);
            config.apply(&MinesSettings { rows, cols, mines });
            config.seed = seed;
            widgets::mines::run(&config)
        }
        Commands::Snake {
            width,
            height,
            tick_ms,
            seed,
        } => {
            let mut config = SnakeConfig::default();
            config.apply(&settings.snake);
            config.apply(&SnakeSettings {
                width,
                height,
                tick_ms,
            });
            config.seed = seed;
            widgets::snake::run(&config)
        }
        Commands::Sort {
            bars,
            tick_ms,
            swaps,
            seed,
        } => {
            let mut config = SortConfig::default();
            config.apply(&settings.sort);
            config.apply(&SortSettings {
                bars,
                tick_ms,
                swaps_per_tick: swaps,
            });
            config.seed = seed;
            widgets::sort::run(&config)
        }
        Commands::Noise { seed } => {
            let mut config = NoiseConfig::default();
            config.apply(&settings.noise);
            config.apply(&NoiseSettings { seed });
            widgets::noise::run(&config)
        }
        Commands::Faster { .. } | Commands::Link { .. } => Ok(()),
    }
}

fn print_faster(legs: &[Leg]) {
    println!("{:>10} {:>10} {:>10} {:>10}", "Speed 1", "Speed 2", "Dist", "Time");
    for leg in legs {
        let saved = if leg.is_empty() { "--:--:--".to_string() } else { Hms(leg.time_saved()).to_string() };
        println!("{:>10} {:>10} {:>10} {:>10}", leg.speed1, leg.speed2, leg.distance, saved);
    }
    let (distance, saved) = totals(legs);
    println!("{:>10} {:>10} {:>10} {:>10}", "", "total", distance, Hms(saved).to_string());
}

fn run_link(settings: &Settings, action: LinkAction) -> Result<ExitCode, LinkError> {
    let mut store = JsonLinkStore::open(settings.links_path());

    match action {
        LinkAction::Add { slug, url } => {
            store.create(&slug, &url)?;
            println!("{} -> {}", slug.trim(), url.trim());
        }
        LinkAction::Get { slug } => match store.lookup(&slug)? {
            Some(url) => println!("{}", url),
            None => {
                eprintln!("no short link named {}", slug);
                return Ok(ExitCode::FAILURE);
            }
        },
        LinkAction::List => {
            for link in store.list()? {
                println!("{}\t{}", link.slug, link.long_link);
            }
        }
        LinkAction::Resolve { path } => match resolve(&store, &path)? {
            Redirect::Found(url) => println!("{} {}", REDIRECT_STATUS, url),
            Redirect::FallThrough => println!("no redirect for {}", path),
        },
    }

    Ok(ExitCode::SUCCESS)
}

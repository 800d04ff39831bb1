use clap::{Parser, Subcommand};
use prerender_plan::{config, output, plan, routes, shard};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "prerender-plan")]
#[command(about = "Plan static prerendering for a single-page app")]
#[command(long_about = "\
Plan static prerendering for a single-page app

Routes are collected from three places, in this order, and deduplicated:

  routes        explicit list in prerender.toml
  routes_file   text file, one route per line
  guess_routes  routing table (routes.json); parameterized routes are
                expanded from their \"prerender\" entries, wildcards skipped

The route list is then split round-robin into shards, one per worker.

Run 'prerender-plan gen-config' to generate a documented prerender.toml.")]
#[command(version)]
struct Cli {
    /// Workspace root; relative paths in the config are resolved against it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (defaults to <root>/prerender.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Number of shards, overriding processing.max_processes
    #[arg(long, global = true)]
    shards: Option<NonZeroUsize>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve and list the routes to prerender
    Routes,
    /// Resolve routes and show how they are split into shards
    Shard,
    /// Resolve, shard, and write the plan for render workers
    Plan {
        /// Output directory for routes.json and shard files
        #[arg(long, default_value = ".prerender")]
        out: PathBuf,
    },
    /// Print a stock prerender.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Routes => {
            let (_, resolution) = resolve(&cli.root, cli.config.as_deref())?;
            output::print_routes_output(&resolution);
        }
        Command::Shard => {
            let (site, resolution) = resolve(&cli.root, cli.config.as_deref())?;
            let count = cli
                .shards
                .unwrap_or_else(|| config::effective_shards(&site.processing));
            let shards = shard::shard(&resolution.routes.routes, count);
            output::print_shards_output(&shards);
        }
        Command::Plan { ref out } => {
            let (site, resolution) = resolve(&cli.root, cli.config.as_deref())?;
            let count = cli
                .shards
                .unwrap_or_else(|| config::effective_shards(&site.processing));
            init_thread_pool(count);
            let planned = plan::build_plan(&resolution.routes, count, &site.index);
            plan::write_plan(&planned, out)?;
            tracing::info!(
                routes = planned.manifest.routes.len(),
                shards = planned.shards.len(),
                "Plan written"
            );
            output::print_plan_output(&planned, out);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the default `info` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load config and resolve routes.
fn resolve(
    root: &Path,
    config_path: Option<&Path>,
) -> Result<(config::PrerenderConfig, routes::Resolution), Box<dyn std::error::Error>> {
    let config_path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(config::CONFIG_FILENAME));
    let site = config::load_config(&config_path)?;
    tracing::debug!(config = ?config_path, guess_routes = site.guess_routes, "Loaded config");
    let resolution = futures::executor::block_on(routes::get_routes(&site, root))?;
    Ok((site, resolution))
}

/// Initialize the rayon thread pool used to write shard files.
///
/// One thread per shard, capped at the number of CPU cores.
fn init_thread_pool(shards: NonZeroUsize) {
    let threads = config::effective_threads(shards);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

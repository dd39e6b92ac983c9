//! `cssvars` command-line front end.
//!
//! Shades colors, builds shade palettes and applies variable manifests,
//! printing the resulting `:root` block on stdout.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cssvars::{
    init_color_scheme, ColorVariable, HttpSource, ManagerConfig, MemoryRoot, StaticSource,
    VariableManager,
};

#[derive(Parser)]
#[command(name = "cssvars")]
#[command(version)]
#[command(about = "Manage CSS custom properties and derive light/dark shades")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// JSON file with manager settings (update_mode, shade_step, log_prefix)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shade a hex color: negative power darkens, positive lightens
    Shade {
        /// Color such as #3366CC
        hex: String,
        /// Signed shading power
        #[arg(allow_negative_numbers = true)]
        power: i32,
    },
    /// Print a :root block with a color and its derived shades
    Palette {
        /// Variable name, e.g. --brand
        tag: String,
        /// Base color
        hex: String,
        /// Number of light and dark levels
        #[arg(short, long, default_value_t = 3)]
        shades: u32,
        /// Power per level (overrides the config file)
        #[arg(long)]
        step: Option<u8>,
    },
    /// Apply a variable manifest and print the resulting :root block
    Import {
        /// URL of the manifest
        #[arg(conflicts_with = "file", required_unless_present = "file")]
        url: Option<String>,
        /// Read the manifest from a local file instead
        #[arg(long, value_name = "PATH")]
        file: Option<PathBuf>,
        /// Give up on the request after this many seconds
        #[arg(long, value_name = "SECS")]
        timeout: Option<u64>,
    },
    /// Print the preferred color scheme (light or dark)
    Scheme,
}

fn load_config(path: Option<&PathBuf>) -> Result<ManagerConfig> {
    let Some(path) = path else {
        return Ok(ManagerConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    ManagerConfig::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = cssvars::logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {}", err);
    }

    let mut config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Shade { hex, power } => {
            println!("{}", cssvars_shade::shade_from(&hex, power)?);
        }
        Commands::Palette {
            tag,
            hex,
            shades,
            step,
        } => {
            if let Some(step) = step {
                config = config.shade_step(step);
            }
            let mut vars = VariableManager::new(MemoryRoot::new()).with_config(config);
            vars.set_variable(&ColorVariable::new(tag, hex).with_shades(shades))?;
            print_root(vars);
        }
        Commands::Import { url, file, timeout } => {
            let mut vars = VariableManager::new(MemoryRoot::new()).with_config(config);
            let summary = match (url, file) {
                (_, Some(path)) => {
                    let body = std::fs::read_to_string(&path)
                        .with_context(|| format!("failed to read {}", path.display()))?;
                    let source = StaticSource::named(path.display().to_string(), body);
                    vars.import_collection(&source).await?
                }
                (Some(url), None) => {
                    let mut source = HttpSource::new(url);
                    if let Some(secs) = timeout {
                        source = source.timeout(Duration::from_secs(secs));
                    }
                    vars.import_collection(&source).await?
                }
                (None, None) => bail!("either a URL or --file is required"),
            };
            tracing::info!(
                plain = summary.plain,
                colors = summary.colors,
                shades = summary.shades,
                "manifest applied"
            );
            print_root(vars);
        }
        Commands::Scheme => {
            println!("{}", init_color_scheme());
        }
    }

    Ok(())
}

fn print_root(vars: VariableManager<MemoryRoot>) {
    if let Some(root) = vars.into_root() {
        print!("{}", root.to_css());
    }
}

use clap::{Args, Parser, Subcommand};
use cli::{output_paths, process_image, run_batch, BatchConfig};
use color_eyre::eyre::{bail, eyre, Result};
use outpaint::{
    classify_transform, coerce_image, resolution_ladder, AspectCatalog, CatalogConfig, Dimensions, Direction,
    OutpaintOptions,
};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{self, EnvFilter};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Catalog configuration (TOML or JSON); defaults come from the environment
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the aspect catalog
    Aspects,
    /// Resolve an aspect label to pixel dimensions
    Resolve {
        label: String,
        /// Pixel budget, defaults to the catalog's maximum
        #[arg(long)]
        budget: Option<u64>,
    },
    /// Classify a source -> target transform
    Classify {
        #[arg(long)]
        source: Dimensions,
        #[arg(long)]
        target: Dimensions,
        #[arg(long, default_value = "center")]
        anchor: Direction,
    },
    /// Prepare a single image for outpainting
    Outpaint {
        input: PathBuf,
        #[arg(long, requires = "height", conflicts_with = "aspect")]
        width: Option<u32>,
        #[arg(long, requires = "width")]
        height: Option<u32>,
        /// Catalog label to resolve the target from
        #[arg(long)]
        aspect: Option<String>,
        /// Output directory, defaults to the input's directory
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
        #[command(flatten)]
        options: OptionArgs,
    },
    /// List actionable outpaint candidates for a source size
    Options {
        #[arg(long)]
        source: Dimensions,
    },
    /// Resize an image onto the nearest aligned size of its own aspect
    Coerce {
        input: PathBuf,
        /// Output file, defaults to `<stem>_coerced.png` next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the resolution ladder between two budgets
    Ladder {
        #[arg(long)]
        min_pixels: Option<u64>,
        #[arg(long)]
        max_pixels: Option<u64>,
    },
    /// Print the JSON schema of the batch configuration
    Schema,
    /// Run a batch configuration file (.toml or .json)
    Batch {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Args)]
struct OptionArgs {
    #[arg(long, default_value = "center")]
    anchor: Direction,
    #[arg(long)]
    mask_background: Option<u16>,
    #[arg(long, default_value_t = 0)]
    blur_radius: u32,
    #[arg(long)]
    decorrelate: bool,
    #[arg(long)]
    edge_offset: Option<u32>,
    #[arg(long)]
    seed: Option<u64>,
}

impl From<&OptionArgs> for OutpaintOptions {
    fn from(args: &OptionArgs) -> Self {
        let defaults = OutpaintOptions::default();
        OutpaintOptions {
            anchor: args.anchor,
            mask_background: args.mask_background.unwrap_or(defaults.mask_background),
            blur_radius: args.blur_radius,
            decorrelate: args.decorrelate,
            edge_offset: args.edge_offset.unwrap_or(defaults.edge_offset),
            seed: args.seed.unwrap_or(defaults.seed),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.catalog {
        Some(path) => CatalogConfig::from_file(path)?,
        None => CatalogConfig::from_env(),
    };
    let catalog = AspectCatalog::from_config(&config);

    match &cli.command {
        Commands::Aspects => list_aspects(&catalog),
        Commands::Resolve { label, budget } => {
            let budget = budget.unwrap_or(catalog.max_pixels());
            let (width, height) = catalog.resolve_dimensions(label, budget)?;
            println!("{label}: {width}x{height}");
        }
        Commands::Classify { source, target, anchor } => classify(*source, *target, *anchor),
        Commands::Outpaint {
            input,
            width,
            height,
            aspect,
            output_dir,
            options,
        } => {
            let target = match (width, height, aspect) {
                (Some(width), Some(height), _) => Dimensions::new(*width, *height),
                (_, _, Some(label)) => {
                    let (width, height) = catalog.resolve_dimensions(label, catalog.max_pixels())?;
                    Dimensions::new(width, height)
                }
                _ => bail!("either --width and --height or --aspect is required"),
            };
            outpaint_image(input, target, output_dir.as_deref(), &options.into())?;
        }
        Commands::Options { source } => list_options(&catalog, *source)?,
        Commands::Coerce { input, output } => coerce(&catalog, input, output.as_deref())?,
        Commands::Ladder { min_pixels, max_pixels } => {
            let ladder = resolution_ladder(
                min_pixels.unwrap_or(config.min_pixels),
                max_pixels.unwrap_or(config.max_pixels),
                config.dimension_step,
                config.min_dimension,
                config.max_dimension,
            );
            for aspect in ladder.iter() {
                println!("{:>6}  {:>10}  {:>9}", aspect.label, aspect.dimensions().to_string(), aspect.dimensions().area());
            }
        }
        Commands::Schema => println!("{}", BatchConfig::schema_json()?),
        Commands::Batch { config } => batch(config).await?,
    }

    Ok(())
}

fn list_aspects(catalog: &AspectCatalog) {
    info!(
        "Catalog: {} entries, budget {} px, step {}",
        catalog.len(),
        catalog.max_pixels(),
        catalog.step()
    );
    for aspect in catalog.iter() {
        println!(
            "{:>6}  {:>10}  {:>9}  {:.4}",
            aspect.label,
            aspect.dimensions().to_string(),
            aspect.dimensions().area(),
            aspect.ratio()
        );
    }
}

fn classify(source: Dimensions, target: Dimensions, anchor: Direction) {
    let condition = classify_transform(source, target, anchor);
    let corrected = condition.self_corrected();
    let action = corrected.action();
    println!("condition: {condition}");
    println!("corrected: {corrected}");
    println!("action:    {action}");
    if let Some(description) = action.description() {
        println!("           {} {}", description, description.label);
    }
}

fn outpaint_image(input: &Path, target: Dimensions, output_dir: Option<&Path>, options: &OutpaintOptions) -> Result<()> {
    let output_dir = output_dir
        .or_else(|| input.parent())
        .unwrap_or_else(|| Path::new("."));
    let stem = file_stem(input)?;
    std::fs::create_dir_all(output_dir)?;

    info!("Preparing {:?} for {}", input, target);
    let output = process_image(input, target, options, output_dir, &stem)?;
    info!("✅ {} -> {:?}", output.action, output.canvas);
    match &output.mask {
        Some(mask) => info!("Mask written to {:?}", mask),
        None => info!("No mask needed, scaled to {}", output.scaled),
    }
    Ok(())
}

fn list_options(catalog: &AspectCatalog, source: Dimensions) -> Result<()> {
    for candidate in catalog.outpaint_options(source) {
        if candidate.outpaints.is_empty() {
            continue;
        }
        println!("{} ({})", candidate.aspect.label, candidate.aspect.dimensions());
        for description in &candidate.outpaints {
            println!("    {}  {}", description, description.label);
        }
    }
    Ok(())
}

fn coerce(catalog: &AspectCatalog, input: &Path, output: Option<&Path>) -> Result<()> {
    let bytes = std::fs::read(input)?;
    let coerced = coerce_image(catalog, &bytes)?;
    let output = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let dir = input.parent().unwrap_or_else(|| Path::new("."));
            dir.join(format!("{}_coerced.png", file_stem(input)?))
        }
    };
    std::fs::write(&output, &coerced.bytes)?;
    info!("{} -> {} written to {:?}", coerced.source, coerced.scaled, output);
    Ok(())
}

async fn batch(config_path: &Path) -> Result<()> {
    let config = BatchConfig::from_file(config_path)?;
    let (canvas, mask) = output_paths(&config.output_dir, "<name>");
    info!("Batch of {} jobs, writing {:?} and {:?}", config.jobs.len(), canvas, mask);

    let outcomes = run_batch(config).await?;
    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        error!("{} of {} jobs failed", failed, outcomes.len());
        bail!("{failed} jobs failed");
    }
    info!("✅ Batch completed: {} jobs", outcomes.len());
    Ok(())
}

fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map(str::to_string)
        .ok_or_else(|| eyre!("cannot derive a file name from {:?}", path))
}

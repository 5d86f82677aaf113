use outpaint::{
    prepare_outpaint, AspectCatalog, CatalogConfig, Dimensions, OutpaintAction, OutpaintError, OutpaintOptions,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    Outpaint(#[from] OutpaintError),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
    #[error("Worker failed: {0}")]
    Worker(String),
}

/// Canvas size of a job: a catalog label or explicit pixels
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum TargetSpec {
    Aspect(String),
    Size { width: u32, height: u32 },
}

impl TargetSpec {
    pub fn resolve(&self, catalog: &AspectCatalog) -> Result<Dimensions, CliError> {
        match self {
            Self::Aspect(label) => {
                let (width, height) = catalog.resolve_dimensions(label, catalog.max_pixels())?;
                Ok(Dimensions::new(width, height))
            }
            Self::Size { width, height } => Ok(Dimensions::new(*width, *height)),
        }
    }
}

/// One image to prepare
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct OutpaintJob {
    pub name: String,
    pub input: PathBuf,
    pub target: TargetSpec,
    /// Overrides the batch-wide options when set
    #[serde(default)]
    pub options: Option<OutpaintOptions>,
}

/// Batch configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct BatchConfig {
    pub output_dir: PathBuf,
    /// Worker pool size, defaults to the available parallelism
    #[serde(default)]
    pub workers: Option<usize>,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub options: OutpaintOptions,
    pub jobs: Vec<OutpaintJob>,
}

impl BatchConfig {
    /// Load BatchConfig from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(content)?)
    }

    /// Load BatchConfig from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, CliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(CliError::UnsupportedFileFormat),
        }
    }

    pub fn to_toml(&self) -> Result<String, CliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    pub fn to_json(&self) -> Result<String, CliError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    /// JSON schema of the configuration file
    pub fn schema_json() -> Result<String, CliError> {
        let schema = schemars::schema_for!(BatchConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

/// Files written for one job
#[derive(Debug, Clone, PartialEq)]
pub struct JobOutput {
    pub canvas: PathBuf,
    pub mask: Option<PathBuf>,
    pub action: OutpaintAction,
    pub scaled: Dimensions,
}

#[derive(Debug)]
pub struct JobOutcome {
    pub name: String,
    pub result: Result<JobOutput, CliError>,
}

impl JobOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// `<dir>/<stem>_outpaint.png` and `<dir>/<stem>_mask.png`
pub fn output_paths(output_dir: &Path, stem: &str) -> (PathBuf, PathBuf) {
    (
        output_dir.join(format!("{stem}_outpaint.png")),
        output_dir.join(format!("{stem}_mask.png")),
    )
}

/// Reads, prepares and writes a single image.
pub fn process_image(
    input: &Path,
    target: Dimensions,
    options: &OutpaintOptions,
    output_dir: &Path,
    stem: &str,
) -> Result<JobOutput, CliError> {
    let bytes = fs::read(input)?;
    let result = prepare_outpaint(&bytes, target.width, target.height, options)?;

    let (canvas_path, mask_path) = output_paths(output_dir, stem);
    fs::write(&canvas_path, &result.canvas)?;
    let mask = match &result.mask {
        Some(mask) => {
            fs::write(&mask_path, mask)?;
            Some(mask_path)
        }
        None => None,
    };

    Ok(JobOutput {
        canvas: canvas_path,
        mask,
        action: result.action,
        scaled: result.scaled,
    })
}

fn process_job(
    catalog: &AspectCatalog,
    defaults: &OutpaintOptions,
    job: &OutpaintJob,
    output_dir: &Path,
) -> Result<JobOutput, CliError> {
    let target = job.target.resolve(catalog)?;
    let options = job.options.as_ref().unwrap_or(defaults);
    process_image(&job.input, target, options, output_dir, &job.name)
}

/// Runs every job on a bounded pool of blocking workers.
///
/// A failing job is reported in its outcome and does not stop the batch.
/// Outcomes arrive in completion order.
pub async fn run_batch(config: BatchConfig) -> Result<Vec<JobOutcome>, CliError> {
    fs::create_dir_all(&config.output_dir)?;

    let workers = config
        .workers
        .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
        .max(1);
    let catalog = Arc::new(AspectCatalog::from_config(&config.catalog));
    let defaults = Arc::new(config.options);
    let output_dir = Arc::new(config.output_dir);
    let semaphore = Arc::new(Semaphore::new(workers));
    info!("Running {} jobs on {} workers", config.jobs.len(), workers);

    let mut tasks = JoinSet::new();
    for job in config.jobs {
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| CliError::Worker(e.to_string()))?;
        let catalog = Arc::clone(&catalog);
        let defaults = Arc::clone(&defaults);
        let output_dir = Arc::clone(&output_dir);

        tasks.spawn(async move {
            let name = job.name.clone();
            let result = tokio::task::spawn_blocking(move || {
                let _permit = permit;
                process_job(&catalog, &defaults, &job, &output_dir)
            })
            .await
            .map_err(|e| CliError::Worker(e.to_string()))
            .and_then(|result| result);
            JobOutcome { name, result }
        });
    }

    let mut outcomes = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(outcome) => {
                match &outcome.result {
                    Ok(output) => info!("Job '{}' -> {:?} ({})", outcome.name, output.canvas, output.action),
                    Err(e) => error!("Job '{}' failed: {}", outcome.name, e),
                }
                outcomes.push(outcome);
            }
            Err(e) => error!("Batch task failed: {}", e),
        }
    }
    Ok(outcomes)
}

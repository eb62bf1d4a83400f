use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use version_sync::cancel::CancellationToken;
use version_sync::config::Config;
use version_sync::discovery::{Discoverer, DiscoveryResult};
use version_sync::fs::OsFileSystem;
use version_sync::sync::{self, SyncStatus};
use version_sync::version::{FileConfig, VersionStore};

const LOG_ENV: &str = "VERSION_SYNC_LOG";

#[derive(Parser)]
#[command(name = "version-sync")]
#[command(version, about = "Find and update the version across a project's files")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log at debug level unless VERSION_SYNC_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List version markers, manifests and mismatches under a directory
    Discover(DiscoverArgs),

    /// Write the primary version (or the given one) to every sync candidate,
    /// and to the root marker when it differs
    Sync {
        #[command(flatten)]
        discover: DiscoverArgs,

        /// Version to write; defaults to the primary version
        #[arg(long, value_name = "VERSION")]
        to: Option<String>,
    },

    /// Print the version stored in a single file
    Get(FileArgs),

    /// Replace the version stored in a single file
    Set {
        #[command(flatten)]
        file: FileArgs,

        #[arg(value_name = "VERSION")]
        new_version: String,
    },
}

#[derive(Args)]
struct DiscoverArgs {
    /// Directory to scan
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Manifest scan depth
    #[arg(long)]
    depth: Option<usize>,

    /// Only look for a version marker at the root
    #[arg(long)]
    no_recursive: bool,

    /// Glob pattern to skip; repeatable
    #[arg(long = "exclude", value_name = "GLOB")]
    excludes: Vec<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct FileArgs {
    path: PathBuf,

    /// json, yaml, toml, raw or regex; detected from the file name if omitted
    #[arg(long)]
    format: Option<String>,

    /// Dot-separated field address for structured formats
    #[arg(long)]
    field: Option<String>,

    /// Regular expression with one capture group around the version
    #[arg(long)]
    pattern: Option<String>,
}

impl DiscoverArgs {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                Config::from_toml_str(&content)
                    .with_context(|| format!("invalid configuration in {}", path.display()))?
            }
            None => Config::default(),
        };

        config.exclude.extend(self.excludes.iter().cloned());
        if self.no_recursive {
            config.discovery.recursive = false;
        }
        Ok(config)
    }
}

impl FileArgs {
    fn file_config(&self) -> anyhow::Result<FileConfig> {
        FileConfig::from_parts(
            &self.path,
            self.format.as_deref(),
            self.field.clone(),
            self.pattern.clone(),
        )
        .context("invalid file description")
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let json_layer = json.then(|| fmt::layer().json().with_writer(std::io::stderr));
    let text_layer = (!json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(json_layer)
        .with(text_layer)
        .with(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let fs = Arc::new(OsFileSystem);
    let cancel = CancellationToken::new();

    match cli.command {
        Command::Discover(args) => {
            let result = discover(fs, &args, &cancel)?;
            print_report(&args.root, &result);
        }
        Command::Sync { discover: args, to } => {
            let result = discover(fs.clone(), &args, &cancel)?;
            let version = to.unwrap_or_else(|| result.primary_version().to_string());
            if version.is_empty() {
                bail!("no version found under {}", args.root.display());
            }

            let store = VersionStore::new(fs);
            let outcomes = sync::apply_to_result(&store, &result, &version, &cancel)?;

            let mut failed = 0;
            for outcome in &outcomes {
                match &outcome.result {
                    Ok(SyncStatus::Updated) => println!("updated   {}", outcome.path.display()),
                    Ok(SyncStatus::Unchanged) => println!("unchanged {}", outcome.path.display()),
                    Err(e) => {
                        failed += 1;
                        println!("failed    {}: {}", outcome.path.display(), e);
                    }
                }
            }
            if failed > 0 {
                bail!("{} of {} files could not be updated", failed, outcomes.len());
            }
        }
        Command::Get(args) => {
            let info = VersionStore::new(fs).read(&args.file_config()?, &cancel)?;
            println!("{}", info.version);
        }
        Command::Set { file, new_version } => {
            VersionStore::new(fs).write(&file.file_config()?, &new_version, &cancel)?;
        }
    }

    Ok(())
}

fn discover(
    fs: Arc<OsFileSystem>,
    args: &DiscoverArgs,
    cancel: &CancellationToken,
) -> anyhow::Result<DiscoveryResult> {
    let config = args.load_config()?;
    let result = Discoverer::new(fs, &config)
        .discover(&args.root, args.depth, cancel)
        .with_context(|| format!("discovery under {} failed", args.root.display()))?;
    Ok(result)
}

fn print_report(root: &Path, result: &DiscoveryResult) {
    println!("root:    {}", root.display());
    println!("mode:    {}", result.mode().as_str());
    if result.is_empty() {
        println!("no version markers or manifests found");
        return;
    }
    println!("version: {}", result.primary_version());

    if result.has_modules() {
        println!("\nmodules:");
        for module in result.modules() {
            println!(
                "  {:<24} {:<12} {}",
                module.name,
                module.version,
                module.relative_path.display()
            );
        }
    }

    if result.has_manifests() {
        println!("\nmanifests:");
        for manifest in result.manifests() {
            let location = if manifest.field.is_empty() {
                manifest.relative_path.display().to_string()
            } else {
                format!("{} ({})", manifest.relative_path.display(), manifest.field)
            };
            println!(
                "  {:<24} {:<12} {}",
                manifest.description, manifest.version, location
            );
        }
    }

    if result.has_mismatches() {
        println!("\nmismatches:");
        for mismatch in result.mismatches() {
            println!(
                "  {}: expected {}, found {}",
                mismatch.source, mismatch.expected, mismatch.actual
            );
        }
    }
}

//! changelog - Build a grouped, dated release index from a Markdown changelog

#[cfg(feature = "watch")]
mod watcher;

use anyhow::{Context, Result};
use changelog_core::config::MalformedPolicy;
use changelog_core::{build_release_groups, Changelog, Config, DateIndex};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

/// Output format of the release index
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Standalone HTML page
    Html,
    /// Release groups as JSON
    Json,
}

/// Build a grouped, dated release index from a Markdown changelog
#[derive(Parser, Debug)]
#[command(name = "changelog")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the changelog markdown file
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Release date index (JSON array, or TOML with [[release]] tables)
    #[arg(long, value_name = "PATH")]
    dates: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// Write to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Leave out release sections whose title cannot be classified
    #[arg(long)]
    skip_malformed: bool,

    /// Rebuild the output whenever the changelog or date index changes
    #[cfg(feature = "watch")]
    #[arg(long)]
    watch: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    if args.skip_malformed {
        config.classify.on_malformed = MalformedPolicy::Skip;
    }

    // Load inputs
    let doc = Changelog::load(&args.file)
        .with_context(|| format!("Failed to load changelog: {}", args.file.display()))?;
    let dates = load_dates(args.dates.as_deref())?;

    let output = render(&doc.text, &dates, &config, args.format)?;
    write_output(&output, args.output.as_deref())?;

    #[cfg(feature = "watch")]
    {
        if args.watch {
            watch(&args, &config, doc)?;
        }
    }

    Ok(())
}

fn load_dates(path: Option<&Path>) -> Result<DateIndex> {
    match path {
        Some(path) => DateIndex::load(path),
        None => Ok(DateIndex::default()),
    }
}

/// Run the full rebuild and format the result
fn render(text: &str, dates: &DateIndex, config: &Config, format: Format) -> Result<String> {
    let groups = build_release_groups(text, dates, config)
        .context("Failed to classify changelog releases")?;

    match format {
        Format::Html => Ok(changelog_html::render_page(&groups, &config.render)),
        Format::Json => {
            serde_json::to_string_pretty(&groups).context("Failed to serialize release groups")
        }
    }
}

fn write_output(output: &str, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("Failed to write output: {}", path.display())),
        None => {
            use std::io::Write as _;
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .context("Failed to write to stdout")
        }
    }
}

#[cfg(feature = "watch")]
fn watch(args: &Args, config: &Config, mut doc: Changelog) -> Result<()> {
    use std::time::Duration;

    let dates_path = args
        .dates
        .as_ref()
        .map(|path| path.canonicalize())
        .transpose()
        .context("Failed to resolve date index path")?;

    let mut paths = vec![doc.path.clone()];
    paths.extend(dates_path.clone());
    let mut watcher = watcher::FileWatcher::new(&paths)?;
    log::info!("watching {} file(s) for changes", paths.len());

    loop {
        std::thread::sleep(Duration::from_millis(100));
        if !watcher.check_changed(250) {
            continue;
        }

        // A failed rebuild keeps the previous output in place
        if let Err(e) = doc.reload() {
            log::warn!("{e:#}");
            continue;
        }
        let dates = match load_dates(dates_path.as_deref()) {
            Ok(dates) => dates,
            Err(e) => {
                log::warn!("{e:#}");
                continue;
            }
        };
        match render(&doc.text, &dates, config, args.format) {
            Ok(output) => {
                write_output(&output, args.output.as_deref())?;
                log::info!("rebuilt release index (rev {})", doc.rev);
            }
            Err(e) => log::warn!("{e:#}"),
        }
    }
}

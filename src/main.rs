//! compdoc: generate component reference pages from react-docgen output.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `compdoc < switch.json` prints the page(s) to stdout
//! - **file mode**: `compdoc -o docs/components metadata/*.json`

use anyhow::{Context, Result};
use clap::Parser;
use compdoc::{docgen, render, Config};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (`EnvFilter` syntax).
const LOG_ENV: &str = "COMPDOC_LOG";

#[derive(Parser)]
#[command(
    name = "compdoc",
    about = "Generate Markdown component reference pages from react-docgen metadata"
)]
struct Cli {
    /// Input files (glob patterns supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// JSON config file with extra type links and platform labels
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Output format: markdown (default), json
    #[arg(short = 'f', long, default_value = "markdown")]
    format: String,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    if cli.files.is_empty() {
        return stdin_mode(&cli, &config);
    }

    file_mode(&cli, &config)
}

/// Log to stderr so stdout stays clean in stdin mode.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    Config::from_json(&content).with_context(|| format!("invalid config {}", path.display()))
}

/// stdin mode: read one page or an array of pages, write all of them to stdout.
fn stdin_mode(cli: &Cli, config: &Config) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let pages = docgen::parse_pages(&input).context("failed to parse stdin as docgen JSON")?;
    let renderer = render::create_renderer(&cli.format, config)?;
    for page in &pages {
        let output = compdoc::render_page(page, renderer.as_ref())
            .with_context(|| format!("failed to render page {}", page.id))?;
        print!("{}", output);
    }
    Ok(())
}

/// file mode: render every page of every input file into the output directory.
fn file_mode(cli: &Cli, config: &Config) -> Result<()> {
    let output_dir = cli
        .output
        .as_deref()
        .context("--output is required when files are given")?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("failed to create output directory: {}", output_dir.display()))?;

    let renderer = render::create_renderer(&cli.format, config)?;
    let ext = renderer.file_extension();

    let input_files = expand_globs(&cli.files)?;
    let mut written = 0usize;
    for path in &input_files {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let pages = match docgen::parse_pages(&content) {
            Ok(pages) => pages,
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "skipping unparsable file");
                continue;
            }
        };

        for page in &pages {
            let output = match compdoc::render_page(page, renderer.as_ref()) {
                Ok(output) => output,
                Err(e) => {
                    tracing::warn!(file = %path.display(), page = %page.id, error = %e, "skipping page");
                    continue;
                }
            };
            if !is_safe_id(&page.id) {
                tracing::warn!(file = %path.display(), page = %page.id, "skipping page with unsafe id");
                continue;
            }
            let out_path = output_dir.join(format!("{}.{}", page.id, ext));
            fs::write(&out_path, &output)
                .with_context(|| format!("failed to write {}", out_path.display()))?;
            tracing::info!(page = %page.id, path = %out_path.display(), "wrote page");
            written += 1;
        }
    }

    tracing::debug!(files = input_files.len(), pages = written, "done");
    Ok(())
}

/// Expand glob patterns into a list of real file paths.
/// Bare directory paths are scanned (non-recursively) for `.json` files.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() && is_json(&p) {
                    files.push(p);
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            tracing::warn!(pattern = %pattern, "no files matched");
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// A page id must name a single file inside the output directory.
fn is_safe_id(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\', '\0'])
        && !Path::new(id).is_absolute()
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_extension_only() {
        assert!(is_json(Path::new("metadata/switch.json")));
        assert!(!is_json(Path::new("metadata/switch.js")));
        assert!(!is_json(Path::new("README")));
    }

    #[test]
    fn page_ids_stay_inside_output_dir() {
        assert!(is_safe_id("switch"));
        assert!(is_safe_id("activity-indicator"));
        assert!(is_safe_id("..switch"));
        assert!(!is_safe_id(""));
        assert!(!is_safe_id(".."));
        assert!(!is_safe_id("../escape"));
        assert!(!is_safe_id("nested/page"));
        assert!(!is_safe_id("..\\escape"));
        assert!(!is_safe_id("/etc/passwd"));
    }

    #[test]
    fn missing_config_uses_defaults() {
        let config = load_config(None).unwrap();
        assert!(config.links.get("ColorValue").is_some());
    }
}

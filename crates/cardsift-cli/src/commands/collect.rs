//! Collect command - copy likely card dump files into a staging directory.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use glob::Pattern;
use tracing::{debug, warn};
use walkdir::WalkDir;

use cardsift_core::heuristic::{content_has_sensitive_data, name_matches};

/// Arguments for the collect command.
#[derive(Args)]
pub struct CollectArgs {
    /// Directory to search
    source: PathBuf,

    /// Staging directory the matches are copied into
    dest: PathBuf,

    /// Keyword matched against folder and file names
    #[arg(short, long)]
    keyword: Option<String>,

    /// Only match on names, never read file contents
    #[arg(long)]
    names_only: bool,

    /// Size cap in bytes for content matching
    #[arg(long)]
    max_size: Option<u64>,

    /// Glob pattern for paths to leave out (repeatable)
    #[arg(short = 'x', long)]
    exclude: Vec<String>,
}

/// Why a file was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchReason {
    Folder,
    File,
    Content,
}

impl MatchReason {
    fn label(self) -> &'static str {
        match self {
            MatchReason::Folder => "Folder Match",
            MatchReason::File => "File Match",
            MatchReason::Content => "Content Match",
        }
    }
}

pub fn run(args: CollectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;
    let mut collector = config.collector;

    if let Some(keyword) = args.keyword {
        collector.keyword = keyword;
    }
    if args.names_only {
        collector.scan_contents = false;
    }
    if let Some(max_size) = args.max_size {
        collector.max_file_size = max_size;
    }
    collector.exclude.extend(args.exclude);

    if !args.source.is_dir() {
        anyhow::bail!("Source directory not found: {}", args.source.display());
    }

    let excludes = collector
        .exclude
        .iter()
        .map(|p| Pattern::new(p).map_err(|e| anyhow::anyhow!("Invalid exclude pattern '{}': {}", p, e)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    fs::create_dir_all(&args.dest)?;
    let source_root = args.source.canonicalize()?;
    let dest_root = args.dest.canonicalize()?;

    println!(
        "{} Searching {} (keyword: '{}')",
        style("ℹ").blue(),
        source_root.display(),
        collector.keyword
    );

    let mut collected = 0usize;
    let mut failed = 0usize;

    let walker = WalkDir::new(&source_root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| !e.path().starts_with(&dest_root));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(&source_root).unwrap_or(path);
        let relative_str = relative.to_string_lossy().replace('\\', "/");

        if is_excluded(&excludes, &relative_str, entry.file_name()) {
            debug!("Excluded {}", relative_str);
            continue;
        }

        let reason = if folder_matches(relative, &collector.keyword) {
            MatchReason::Folder
        } else if name_matches(&entry.file_name().to_string_lossy(), &collector.keyword).is_some() {
            MatchReason::File
        } else if collector.scan_contents
            && content_has_sensitive_data(path, collector.max_file_size)
        {
            MatchReason::Content
        } else {
            continue;
        };

        let target = unique_destination(&dest_root, entry.file_name());
        match fs::copy(path, &target) {
            Ok(_) => {
                collected += 1;
                debug!("{} -> {}", relative_str, target.display());
                println!(
                    "[{}] {} -> {}",
                    style(reason.label()).cyan(),
                    relative_str,
                    target.file_name().unwrap_or_default().to_string_lossy()
                );
            }
            Err(e) => {
                failed += 1;
                warn!("Failed to copy {}: {}", relative_str, e);
                println!("[{}] {}: {}", style("Failed").red(), relative_str, e);
            }
        }
    }

    println!();
    println!(
        "{} Collected {} files into {}",
        style("✓").green(),
        collected,
        dest_root.display()
    );
    if failed > 0 {
        println!("   {} copies failed", style(failed).red());
    }

    Ok(())
}

/// Whether any folder between the source root and the file matches.
fn folder_matches(relative: &Path, keyword: &str) -> bool {
    relative
        .parent()
        .map(|parent| {
            parent
                .components()
                .any(|c| name_matches(&c.as_os_str().to_string_lossy(), keyword).is_some())
        })
        .unwrap_or(false)
}

fn is_excluded(patterns: &[Pattern], relative: &str, file_name: &OsStr) -> bool {
    let name = file_name.to_string_lossy();
    patterns
        .iter()
        .any(|p| p.matches(relative) || p.matches(&name))
}

/// First free path for `file_name` in `dir`: `name.ext`, then `name_1.ext`,
/// `name_2.ext`, ...
fn unique_destination(dir: &Path, file_name: &OsStr) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let as_path = Path::new(file_name);
    let stem = as_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = as_path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut counter = 1;
    loop {
        let candidate = dir.join(format!("{}_{}{}", stem, counter, extension));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

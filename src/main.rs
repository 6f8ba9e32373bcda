//! Main entry point for the zipwalk CLI application.
//!
//! This binary loads a ZIP archive from the local filesystem or an HTTP URL
//! and walks its local file headers to list, print, or extract entries.

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use zipwalk::zip::ratio;
use zipwalk::{ArchiveSource, Cli, HttpSource, LocalFileEntry, LocalFileSource, ZipExtractor};

/// Application entry point.
///
/// Parses command-line arguments, loads the archive and dispatches to the
/// handler for the requested mode.
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    if cli.is_http_url() {
        let source = HttpSource::new(cli.file.clone())?;
        let data = source.load().await?;

        process_zip(data, &cli).await?;

        // Display network transfer statistics for HTTP sources
        if !cli.is_quiet() {
            eprintln!(
                "\nTotal bytes transferred: {}",
                format_size(source.transferred_bytes())
            );
        }
    } else {
        let source = LocalFileSource::new(Path::new(&cli.file));
        let data = source.load().await?;
        process_zip(data, &cli).await?;
    }

    Ok(())
}

/// Process a loaded ZIP archive based on CLI options.
///
/// - List mode (`-l` or `-v`): display archive contents
/// - Print mode (`-c`): write timestamp, name and contents of each entry
/// - Extract mode: extract (or pipe with `-p`) the selected entries
async fn process_zip(data: Vec<u8>, cli: &Cli) -> Result<()> {
    let extractor = ZipExtractor::with_options(data, cli.decode_options());
    let entries = extractor.entries()?;

    tracing::info!(
        entries = entries.len(),
        size = extractor.archive_size(),
        "walked local file headers"
    );

    if cli.list || cli.verbose {
        list_files(&entries, cli.verbose);
        return Ok(());
    }

    let selected: Vec<_> = entries.iter().filter(|e| is_selected(e, cli)).collect();

    if cli.print {
        for entry in selected {
            println!(
                "{} {} {}",
                entry.last_modified,
                entry.file_name,
                entry.contents_lossy()
            );
        }
        return Ok(());
    }

    // Directories are created on demand when extracting files
    let files_to_extract: Vec<_> = selected.into_iter().filter(|e| !e.is_directory()).collect();

    let multiple_files = cli.pipe && files_to_extract.len() > 1;
    for entry in files_to_extract {
        extract_file(&extractor, entry, cli, multiple_files).await?;
    }

    Ok(())
}

/// Apply the positional FILES selection and the `-x` exclusions.
fn is_selected(entry: &LocalFileEntry, cli: &Cli) -> bool {
    // If specific files are requested, only include entries that match
    if !cli.files.is_empty() {
        let matches = cli.files.iter().any(|f| {
            if has_glob_chars(f) {
                glob_match(f, &entry.file_name)
            } else {
                entry.file_name == *f || entry.base_name() == *f
            }
        });
        if !matches {
            return false;
        }
    }

    !cli
        .exclude
        .iter()
        .any(|x| entry.file_name.contains(x.as_str()) || glob_match(x, &entry.file_name))
}

/// List entries in the archive.
///
/// - Simple format (`-l`): just file names, one per line
/// - Verbose format (`-v`): size, compression ratio, method and timestamps
fn list_files(entries: &[LocalFileEntry], verbose: bool) {
    if !verbose {
        for entry in entries {
            println!("{}", entry.file_name);
        }
        return;
    }

    println!(
        "{:>10}  {:>6}  {:>10}  {:>5}  {:>10}  {:>8}  {:>8}  Name",
        "Length", "Method", "Size", "Cmpr", "Date", "Time", "CRC-32"
    );
    println!("{}", "-".repeat(80));

    let mut total_uncompressed = 0u64;
    let mut total_compressed = 0u64;
    let mut file_count = 0usize;

    for entry in entries {
        let ts = &entry.last_modified;
        println!(
            "{:>10}  {:>6}  {:>10}  {:>4}%  {:04}-{:02}-{:02}  {:02}:{:02}:{:02}  {:08x}  {}",
            entry.uncompressed_size,
            entry.compression_method.name(),
            entry.compressed_size,
            entry.compression_ratio(),
            ts.year,
            ts.month,
            ts.day,
            ts.hour,
            ts.minute,
            ts.second,
            entry.crc32,
            entry.file_name
        );

        if !entry.is_directory() {
            total_uncompressed += entry.uncompressed_size as u64;
            total_compressed += entry.compressed_size as u64;
            file_count += 1;
        }
    }

    println!("{}", "-".repeat(80));
    println!(
        "{:>10}  {:>6}  {:>10}  {:>4}%  {:>40}  {} files",
        total_uncompressed,
        "",
        total_compressed,
        ratio(total_compressed, total_uncompressed),
        "",
        file_count
    );
}

/// Extract a single entry from the archive.
///
/// - Pipe mode (`-p`): write to stdout instead of a file
/// - Custom output directory (`-d`)
/// - Junk paths (`-j`): ignore directory structure in the archive
/// - Overwrite control (`-n`, `-o`)
async fn extract_file(
    extractor: &ZipExtractor,
    entry: &LocalFileEntry,
    cli: &Cli,
    show_filename: bool,
) -> Result<()> {
    if cli.pipe {
        if show_filename {
            use tokio::io::AsyncWriteExt;
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(format!("--- {} ---\n", entry.file_name).as_bytes())
                .await?;
        }
        return extractor.extract_to_stdout(entry).await;
    }

    let root = cli.extract_dir.as_deref().map(PathBuf::from).unwrap_or_default();
    let output_path = match extractor.output_path(entry, &root, cli.junk_paths) {
        Ok(path) => path,
        Err(e) => {
            if !cli.is_very_quiet() {
                eprintln!("Skipping: {e}");
            }
            return Ok(());
        }
    };

    if output_path.exists() {
        if cli.never_overwrite {
            if !cli.is_very_quiet() {
                eprintln!("Skipping: {} (file exists)", entry.file_name);
            }
            return Ok(());
        }

        if !cli.overwrite {
            if !cli.is_very_quiet() {
                eprintln!("Skipping: {} (use -o to overwrite)", entry.file_name);
            }
            return Ok(());
        }
    }

    if !cli.is_quiet() {
        println!("  extracting: {}", entry.file_name);
    }

    extractor.extract_to_file(entry, &output_path).await?;

    Ok(())
}

/// Check if a pattern contains glob wildcard characters.
fn has_glob_chars(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?') || pattern.contains('[')
}

/// Match `text` against a glob pattern; invalid patterns match nothing.
fn glob_match(pattern: &str, text: &str) -> bool {
    glob::Pattern::new(pattern)
        .map(|p| p.matches(text))
        .unwrap_or(false)
}

/// Format a byte size into a human-readable string.
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

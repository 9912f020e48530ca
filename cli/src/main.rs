#![forbid(unsafe_code)]

use std::io::{self, BufWriter, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use iso9660::{Iso9660, OpenOptions, SectorSource, Source};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// List or extract files from an ISO9660 image, local or over HTTP.
///
/// Without PATH every path in the image is printed, one per line. With
/// PATH the file's bytes are written to stdout.
#[derive(Parser)]
#[command(name = "isofetch", version)]
struct Cli {
    /// Image path or `http(s)://` URL.
    source: String,
    /// File inside the image to extract.
    path: Option<String>,
    /// List directories only (reads nothing but the path table).
    #[arg(long)]
    dirs_only: bool,
    /// HTTP request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
    /// Volume descriptors to scan before giving up on a terminator.
    #[arg(long, value_name = "N")]
    max_descriptors: Option<u32>,
    /// Print primary volume descriptor fields instead of listing.
    #[arg(long, conflicts_with = "path")]
    info: bool,
}

impl Cli {
    fn open_options(&self) -> OpenOptions {
        let mut options = OpenOptions::new();
        if let Some(secs) = self.timeout {
            options = options.http_timeout(Duration::from_secs(secs));
        }
        if let Some(limit) = self.max_descriptors {
            options = options.max_descriptor_sectors(limit);
        }
        options
    }
}

fn init_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .with_target(true)
        .compact()
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to initialize logger: {err}"))
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;

    let options = cli.open_options();
    let mut iso = Iso9660::open_with(&cli.source, &options)
        .with_context(|| format!("failed to open image: {}", cli.source))?;
    info!(source = %cli.source, volume = %iso.primary_descriptor().volume_id, "image opened");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if cli.info {
        print_info(&iso, &mut out)?;
    } else if let Some(path) = &cli.path {
        extract(&mut iso, path, &mut out)?;
    } else {
        let paths = iso
            .tree(!cli.dirs_only)
            .with_context(|| format!("failed to list {}", cli.source))?;
        debug!(entries = paths.len(), "listing complete");
        for path in paths {
            writeln!(out, "{path}")?;
        }
    }

    out.flush().context("failed to flush stdout")?;
    Ok(())
}

/// Write one file to `out`
///
/// The whole file is read before the first byte is written, so a truncated
/// image or a dropped connection leaves `out` untouched.
fn extract<S: SectorSource>(iso: &mut Iso9660<S>, path: &str, out: &mut impl Write) -> Result<()> {
    let data = iso
        .get_file(path)
        .with_context(|| format!("failed to read {path}"))?;
    out.write_all(&data)
        .with_context(|| format!("failed to write {path}"))?;
    debug!(path, size = data.len(), "extracted");
    Ok(())
}

fn print_info(iso: &Iso9660<Source>, out: &mut impl Write) -> Result<()> {
    let pvd = iso.primary_descriptor();
    writeln!(out, "System ID:       {}", pvd.system_id)?;
    writeln!(out, "Volume ID:       {}", pvd.volume_id)?;
    writeln!(out, "Volume set ID:   {}", pvd.volume_set_id)?;
    writeln!(out, "Publisher:       {}", pvd.publisher_id)?;
    writeln!(out, "Data preparer:   {}", pvd.data_preparer_id)?;
    writeln!(out, "Application:     {}", pvd.application_id)?;
    writeln!(out, "Block size:      {}", pvd.logical_block_size)?;
    writeln!(out, "Volume size:     {} blocks", pvd.volume_space_size)?;
    writeln!(out, "Path table:      {} bytes at LBA {}", pvd.path_table_size, pvd.type_l_path_table)?;
    writeln!(out, "Root directory:  LBA {}, {} bytes", pvd.root_extent_lba(), pvd.root_extent_len())?;
    writeln!(out, "Directories:     {}", iso.path_table().len())?;

    let dates = [
        ("Created:", pvd.created),
        ("Modified:", pvd.modified),
        ("Expires:", pvd.expires),
        ("Effective:", pvd.effective),
    ];
    for (label, date) in dates {
        match date.and_then(|d| d.to_datetime()) {
            Some(when) => writeln!(out, "{label:<16} {}", when.to_rfc3339())?,
            None => writeln!(out, "{label:<16} not specified")?,
        }
    }
    Ok(())
}

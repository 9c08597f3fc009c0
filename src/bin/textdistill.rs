//! Command-line interface.
//!
//! Reads HTML from stdin, files, or a directory tree, extracts the main
//! content, and writes the serialized result to stdout or to an output
//! directory with content-hashed file names. URL-fetching modes are parsed
//! for compatibility but this build ships no downloader.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use clap::Parser;
use md5::{Digest, Md5};

use textdistill::{Focus, Options, OutputFormat};

/// Outputs per directory before numbered subdirectories are created.
const MAX_FILES_PER_DIRECTORY: usize = 1000;

#[derive(Parser)]
#[command(name = "textdistill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Distill HTML pages into clean article text and metadata", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input HTML file
    #[arg(short = 'i', long = "input-file")]
    input_file: Option<PathBuf>,

    /// Directory of HTML files to process
    #[arg(long = "input-dir")]
    input_dir: Option<PathBuf>,

    /// Fetch and process a URL (requires a downloader; not built in)
    #[arg(short = 'u', long = "URL")]
    url: Option<String>,

    /// Number of worker threads for directory processing
    #[arg(long, default_value_t = 1)]
    parallel: usize,

    /// File with blacklisted URLs, one per line
    #[arg(short = 'b', long = "blacklist")]
    blacklist: Option<PathBuf>,

    /// List inputs instead of processing them
    #[arg(long)]
    list: bool,

    /// Write outputs into this directory instead of stdout
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Keep a copy of raw inputs in this directory
    #[arg(long = "backup-dir")]
    backup_dir: Option<PathBuf>,

    /// Mirror the input directory layout instead of hashed file names
    #[arg(long = "keep-dirs")]
    keep_dirs: bool,

    /// Process a feed URL (requires a downloader; not built in)
    #[arg(long)]
    feed: Option<String>,

    /// Process a sitemap URL (requires a downloader; not built in)
    #[arg(long)]
    sitemap: Option<String>,

    /// Crawl a site (requires a downloader; not built in)
    #[arg(long)]
    crawl: Option<String>,

    /// Explore a site (requires a downloader; not built in)
    #[arg(long)]
    explore: Option<String>,

    /// Probe a homepage for links (requires a downloader; not built in)
    #[arg(long)]
    probe: Option<String>,

    /// Use archived versions of URLs (requires a downloader; not built in)
    #[arg(long)]
    archived: bool,

    /// Only process inputs whose path or URL contains this string
    #[arg(long = "url-filter")]
    url_filter: Vec<String>,

    /// Skip the slower fallback extractors
    #[arg(short = 'f', long)]
    fast: bool,

    /// Preserve inline formatting
    #[arg(long)]
    formatting: bool,

    /// Preserve link targets
    #[arg(long)]
    links: bool,

    /// Keep image references
    #[arg(long)]
    images: bool,

    /// Skip comment extraction
    #[arg(long = "no-comments")]
    no_comments: bool,

    /// Skip table content
    #[arg(long = "no-tables")]
    no_tables: bool,

    /// Reject documents missing date, title, or URL
    #[arg(long = "only-with-metadata")]
    only_with_metadata: bool,

    /// Attach metadata to the output
    #[arg(long = "with-metadata")]
    with_metadata: bool,

    /// Expected document language (ISO 639-1)
    #[arg(long = "target-language")]
    target_language: Option<String>,

    /// Drop repeated text segments across documents
    #[arg(long)]
    deduplicate: bool,

    /// Read size thresholds from a key=value file
    #[arg(long = "config-file")]
    config_file: Option<PathBuf>,

    /// Favor precision over coverage
    #[arg(long)]
    precision: bool,

    /// Favor coverage over precision
    #[arg(long)]
    recall: bool,

    /// Output format
    #[arg(long = "output-format", value_parser = ["csv", "html", "json", "markdown", "txt", "xml", "xmltei"])]
    output_format: Option<String>,

    /// Shorthand for --output-format csv
    #[arg(long)]
    csv: bool,

    /// Shorthand for --output-format html
    #[arg(long)]
    html: bool,

    /// Shorthand for --output-format json
    #[arg(long)]
    json: bool,

    /// Shorthand for --output-format markdown
    #[arg(long)]
    markdown: bool,

    /// Shorthand for --output-format xml
    #[arg(long)]
    xml: bool,

    /// Shorthand for --output-format xmltei
    #[arg(long)]
    xmltei: bool,

    /// Check produced TEI against the closed vocabulary
    #[arg(long = "validate-tei")]
    validate_tei: bool,

    /// Verbose logging
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn output_format(cli: &Cli) -> Result<OutputFormat, String> {
    if let Some(name) = &cli.output_format {
        return OutputFormat::from_str(name).map_err(|e| e.to_string());
    }
    let shorthands = [
        (cli.csv, OutputFormat::Csv),
        (cli.html, OutputFormat::Html),
        (cli.json, OutputFormat::Json),
        (cli.markdown, OutputFormat::Markdown),
        (cli.xml, OutputFormat::Xml),
        (cli.xmltei, OutputFormat::XmlTei),
    ];
    let selected: Vec<OutputFormat> = shorthands
        .into_iter()
        .filter_map(|(on, format)| on.then_some(format))
        .collect();
    match selected.as_slice() {
        [] => Ok(OutputFormat::Txt),
        [format] => Ok(*format),
        _ => Err("conflicting output format flags".to_string()),
    }
}

fn build_options(cli: &Cli) -> Result<Options, String> {
    let mut options = Options {
        focus: if cli.precision {
            Focus::Precision
        } else if cli.recall {
            Focus::Recall
        } else {
            Focus::Balanced
        },
        comments: !cli.no_comments,
        formatting: cli.formatting,
        links: cli.links,
        images: cli.images,
        tables: !cli.no_tables,
        fast: cli.fast,
        dedup: cli.deduplicate,
        with_metadata: cli.with_metadata,
        only_with_metadata: cli.only_with_metadata,
        target_language: cli.target_language.clone(),
        output_format: output_format(cli)?,
        ..Options::default()
    };

    if let Some(path) = &cli.blacklist {
        let content = fs::read_to_string(path).map_err(|e| format!("blacklist: {e}"))?;
        options.url_blacklist = content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(ToString::to_string)
            .collect();
    }

    if let Some(path) = &cli.config_file {
        let content = fs::read_to_string(path).map_err(|e| format!("config: {e}"))?;
        apply_config(&content, &mut options)?;
    }

    Ok(options.normalized())
}

/// Apply `key = value` threshold overrides from a config file.
fn apply_config(content: &str, options: &mut Options) -> Result<(), String> {
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');
        let parsed: usize = value
            .parse()
            .map_err(|_| format!("config: invalid value for {key}: {value}"))?;
        match key {
            "min_extracted_size" => options.min_extracted_size = parsed,
            "min_output_size" => options.min_output_size = parsed,
            "min_extracted_comm_size" => options.min_extracted_comm_size = parsed,
            "min_output_comm_size" => options.min_output_comm_size = parsed,
            "min_duplcheck_size" => options.min_duplcheck_size = parsed,
            "max_repetitions" => options.max_repetitions = parsed,
            "max_file_size" => options.max_file_size = parsed,
            "min_file_size" => options.min_file_size = parsed,
            _ => return Err(format!("config: unknown key {key}")),
        }
    }
    Ok(())
}

fn collect_inputs(cli: &Cli) -> Result<Vec<PathBuf>, String> {
    if let Some(file) = &cli.input_file {
        return Ok(vec![file.clone()]);
    }
    let Some(dir) = &cli.input_dir else {
        return Ok(Vec::new());
    };
    let mut files = Vec::new();
    walk_dir(dir, &mut files).map_err(|e| format!("input-dir: {e}"))?;
    files.sort();
    if !cli.url_filter.is_empty() {
        files.retain(|path| {
            let name = path.to_string_lossy();
            cli.url_filter.iter().any(|f| name.contains(f.as_str()))
        });
    }
    Ok(files)
}

fn walk_dir(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            walk_dir(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

/// Content-hashed output name: first 12 URL-safe base64 characters of the
/// MD5 of the serialized result.
fn hashed_name(output: &str, extension: &str) -> String {
    let digest = Md5::digest(output.as_bytes());
    let encoded = URL_SAFE_NO_PAD.encode(digest);
    let stem: String = encoded.chars().take(12).collect();
    format!("{stem}.{extension}")
}

struct OutputWriter {
    dir: PathBuf,
    count: AtomicUsize,
}

impl OutputWriter {
    fn write(&self, content: &str, extension: &str) -> std::io::Result<PathBuf> {
        let index = self.count.fetch_add(1, Ordering::SeqCst);
        let subdir = if index >= MAX_FILES_PER_DIRECTORY {
            self.dir.join(format!("{}", index / MAX_FILES_PER_DIRECTORY))
        } else {
            self.dir.clone()
        };
        fs::create_dir_all(&subdir)?;
        let path = subdir.join(hashed_name(content, extension));
        fs::write(&path, content)?;
        Ok(path)
    }
}

fn process_one(
    raw: &[u8],
    source: &str,
    options: &Options,
    cli: &Cli,
    writer: Option<&OutputWriter>,
    dest: Option<&Path>,
    stdout_lock: &Mutex<()>,
) -> bool {
    let Some(output) = textdistill::extract_bytes(raw, options) else {
        eprintln!("ERROR: no content extracted from {source}");
        return false;
    };

    if cli.validate_tei && options.output_format == OutputFormat::XmlTei {
        if let Some(doc) = textdistill::extract_with_metadata_bytes(raw, options) {
            let converted = textdistill::output::xml::tei_body(&doc.body);
            if let Err(problem) = textdistill::output::xml::validate_tei(&converted) {
                eprintln!("ERROR: TEI validation failed for {source}: {problem}");
                return false;
            }
        }
    }

    if let Some(dest) = dest {
        let attempt = dest
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .and_then(|()| fs::write(dest, &output));
        return match attempt {
            Ok(()) => true,
            Err(e) => {
                eprintln!("ERROR: could not write output for {source}: {e}");
                false
            }
        };
    }
    match writer {
        Some(writer) => match writer.write(&output, options.output_format.extension()) {
            Ok(_) => true,
            Err(e) => {
                eprintln!("ERROR: could not write output for {source}: {e}");
                false
            }
        },
        None => {
            let _guard = stdout_lock.lock();
            println!("{output}");
            true
        }
    }
}

#[allow(clippy::too_many_lines)]
fn run() -> Result<(usize, usize), String> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let options = build_options(&cli)?;

    // Fetching modes need the downloader collaborator
    let fetch_requests: Vec<&str> = [
        cli.url.as_deref(),
        cli.feed.as_deref(),
        cli.sitemap.as_deref(),
        cli.crawl.as_deref(),
        cli.explore.as_deref(),
        cli.probe.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !fetch_requests.is_empty() || cli.archived {
        for request in &fetch_requests {
            eprintln!("ERROR: no downloader built in, cannot fetch {request}");
        }
        return Ok((0, fetch_requests.len().max(1)));
    }

    let inputs = collect_inputs(&cli)?;

    if cli.list {
        for path in &inputs {
            println!("{}", path.display());
        }
        return Ok((inputs.len(), 0));
    }

    let writer = cli.output_dir.as_ref().map(|dir| OutputWriter {
        dir: dir.clone(),
        count: AtomicUsize::new(0),
    });
    let stdout_lock = Mutex::new(());

    // Stdin is the default input
    if inputs.is_empty() {
        let mut raw = Vec::new();
        std::io::stdin()
            .read_to_end(&mut raw)
            .map_err(|e| format!("stdin: {e}"))?;
        let ok = process_one(&raw, "<stdin>", &options, &cli, writer.as_ref(), None, &stdout_lock);
        return Ok(if ok { (1, 0) } else { (0, 1) });
    }

    if let Some(backup_dir) = &cli.backup_dir {
        fs::create_dir_all(backup_dir).map_err(|e| format!("backup-dir: {e}"))?;
        for path in &inputs {
            if let Some(name) = path.file_name() {
                let _ = fs::copy(path, backup_dir.join(name));
            }
        }
    }

    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let workers = cli.parallel.max(1).min(inputs.len().max(1));
    let chunk_size = inputs.len().div_ceil(workers);
    // Shared state is captured by reference in each worker
    let options = &options;
    let cli = &cli;
    let writer = writer.as_ref();
    let stdout_lock = &stdout_lock;
    let succeeded_ref = &succeeded;
    let failed_ref = &failed;
    std::thread::scope(|scope| {
        for chunk in inputs.chunks(chunk_size) {
            scope.spawn(move || {
                for path in chunk {
                    let source = path.display().to_string();
                    // --keep-dirs mirrors the input layout under the output dir
                    let dest = match (&cli.output_dir, cli.keep_dirs, &cli.input_dir) {
                        (Some(out_dir), true, Some(in_dir)) => path
                            .strip_prefix(in_dir)
                            .ok()
                            .map(|rel| out_dir.join(rel).with_extension(options.output_format.extension())),
                        _ => None,
                    };
                    match fs::read(path) {
                        Ok(raw) => {
                            if process_one(
                                &raw,
                                &source,
                                options,
                                cli,
                                writer,
                                dest.as_deref(),
                                stdout_lock,
                            ) {
                                succeeded_ref.fetch_add(1, Ordering::SeqCst);
                            } else {
                                failed_ref.fetch_add(1, Ordering::SeqCst);
                            }
                        }
                        Err(e) => {
                            eprintln!("ERROR: could not read {source}: {e}");
                            failed_ref.fetch_add(1, Ordering::SeqCst);
                        }
                    }
                }
            });
        }
    });

    Ok((succeeded.load(Ordering::SeqCst), failed.load(Ordering::SeqCst)))
}

fn main() -> ExitCode {
    match run() {
        Ok((_, 0)) => ExitCode::SUCCESS,
        Ok((succeeded, failed)) => {
            let total = succeeded + failed;
            if total > 0 && failed * 100 > total * 99 {
                ExitCode::from(126)
            } else {
                ExitCode::from(1)
            }
        }
        Err(message) => {
            eprintln!("ERROR: {message}");
            ExitCode::from(2)
        }
    }
}

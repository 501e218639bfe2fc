//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use url::Url;

use docindex_core::{IndexController, IndexedDoc};
use docindex_loader::{FetchedResource, Fetcher, FileFetcher, HttpFetcher};
use docindex_markdown::CmarkRenderer;
use docindex_shared::{ConfigOverrides, LinkPolicy, Manifest};

use crate::surface::PageSurface;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// docindex — browsable Markdown document collections.
#[derive(Parser)]
#[command(
    name = "docindex",
    version,
    about = "Validate docindex.json manifests, render the index page, and fetch documents.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Link processing policy: none, post or auto.
    #[arg(long, global = true)]
    pub linkproc: Option<String>,

    /// Do not append a cache-busting timestamp to document URLs.
    #[arg(long, global = true)]
    pub no_cache_bust: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Validate a manifest and print a summary.
    Check {
        /// Manifest path or URL.
        manifest: String,
    },

    /// Render the full index page to a file or stdout.
    Render {
        /// Manifest path or URL.
        manifest: String,

        /// Output file (stdout when omitted).
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Fetch, convert and print one document.
    Show {
        /// Manifest path or URL.
        manifest: String,

        /// Document selector: a 0-based index into `docs`, or a urlpath.
        doc: String,
    },
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "docindex=info",
        1 => "docindex=debug",
        _ => "docindex=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let overrides = overrides_from(&cli)?;

    match &cli.command {
        Command::Check { manifest } => {
            let summary = check_summary(manifest).await?;
            print!("{summary}");
            Ok(())
        }
        Command::Render { manifest, out } => {
            let page = render_page(manifest, &overrides).await?;
            match out {
                Some(path) => {
                    std::fs::write(path, &page)
                        .map_err(|e| eyre!("cannot write {}: {e}", path.display()))?;
                    info!(path = %path.display(), "index page written");
                }
                None => print!("{page}"),
            }
            Ok(())
        }
        Command::Show { manifest, doc } => {
            let html = show_doc(manifest, doc, &overrides).await?;
            print!("{html}");
            Ok(())
        }
    }
}

/// Map global CLI flags onto constructor-level config overrides.
fn overrides_from(cli: &Cli) -> Result<ConfigOverrides> {
    let linkproc = cli
        .linkproc
        .as_deref()
        .map(str::parse::<LinkPolicy>)
        .transpose()?;

    Ok(ConfigOverrides {
        linkproc,
        avoidcaching: cli.no_cache_bust.then_some(false),
        settitle: Some(true),
        ..Default::default()
    })
}

// ---------------------------------------------------------------------------
// Manifest source resolution
// ---------------------------------------------------------------------------

/// Transport picked from the manifest location: HTTP for URLs, the local
/// filesystem for paths. Relative doc urlpaths resolve against the manifest.
enum AnyFetcher {
    Http(HttpFetcher),
    File(FileFetcher),
}

impl Fetcher for AnyFetcher {
    async fn fetch(&self, url: &str) -> docindex_shared::Result<FetchedResource> {
        match self {
            Self::Http(f) => f.fetch(url).await,
            Self::File(f) => f.fetch(url).await,
        }
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Load the raw manifest JSON and build the matching document fetcher.
async fn load_manifest(source: &str) -> Result<(serde_json::Value, AnyFetcher)> {
    if is_remote(source) {
        let url = Url::parse(source).map_err(|e| eyre!("invalid manifest URL '{source}': {e}"))?;
        let fetcher = HttpFetcher::new()?.with_base(url.clone());
        let raw = match fetcher.fetch(url.as_str()).await? {
            FetchedResource::Json(value) => value,
            // Some servers deliver .json as text/plain; parse it ourselves.
            FetchedResource::Text(text) => serde_json::from_str(&text)
                .map_err(|e| eyre!("manifest at {url} is not valid JSON: {e}"))?,
        };
        return Ok((raw, AnyFetcher::Http(fetcher)));
    }

    let path = Path::new(source);
    let content = std::fs::read_to_string(path)
        .map_err(|e| eyre!("cannot read manifest {}: {e}", path.display()))?;
    let raw = serde_json::from_str(&content)
        .map_err(|e| eyre!("manifest {} is not valid JSON: {e}", path.display()))?;

    let base = path.parent().filter(|p| !p.as_os_str().is_empty());
    let fetcher = FileFetcher::new(base.unwrap_or_else(|| Path::new(".")));
    Ok((raw, AnyFetcher::File(fetcher)))
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

/// Validate a manifest and produce a human-readable summary.
async fn check_summary(source: &str) -> Result<String> {
    let (raw, _fetcher) = load_manifest(source).await?;
    let manifest = Manifest::ingest(raw)?;

    let mut out = String::new();
    out.push_str(&format!("  Title:   {}\n", manifest.display_title()));
    out.push_str(&format!("  Docs:    {}\n", manifest.docs.len()));
    out.push_str(&format!(
        "  Groups:  {}\n",
        manifest.groups.as_ref().map_or(0, |g| g.len())
    ));

    match (&manifest.defdoc, manifest.resolve_default()) {
        (None, _) => out.push_str("  Default: (none)\n"),
        (Some(_), Some(pos)) => {
            out.push_str(&format!("  Default: {}\n", manifest.docs[pos].urlpath));
        }
        (Some(_), None) => out.push_str("  Default: UNRESOLVED selector\n"),
    }

    if let Some(linkproc) = manifest.linkproc {
        out.push_str(&format!("  Links:   {linkproc}\n"));
    }

    for doc in &manifest.docs {
        match &doc.grp {
            Some(grp) => out.push_str(&format!("    [{grp}] {} -> {}\n", doc.title, doc.urlpath)),
            None => out.push_str(&format!("    {} -> {}\n", doc.title, doc.urlpath)),
        }
    }

    Ok(out)
}

/// Build the full static index page for a manifest.
async fn render_page(source: &str, overrides: &ConfigOverrides) -> Result<String> {
    let (raw, fetcher) = load_manifest(source).await?;

    let mut controller = IndexController::with_parts(overrides, CmarkRenderer, fetcher);
    let mut surface = PageSurface::new();
    controller.initialize(raw, &mut surface).await?;

    Ok(surface.into_page(controller.config()))
}

/// Fetch, convert and link-process one document, selected like `defdoc`.
async fn show_doc(source: &str, selector: &str, overrides: &ConfigOverrides) -> Result<String> {
    let (raw, fetcher) = load_manifest(source).await?;

    // The selected doc replaces any manifest default; drop it before render.
    let mut controller = IndexController::with_parts(overrides, CmarkRenderer, fetcher)
        .with_post_load(|manifest| manifest.defdoc = None);
    let mut surface = PageSurface::new();
    controller.initialize(raw, &mut surface).await?;

    let id = resolve_doc_selector(controller.docs(), selector)
        .ok_or_else(|| eyre!("no doc matching '{selector}' in the manifest"))?;
    controller.activate(id, &mut surface).await?;

    let config = controller.config();
    surface
        .region(&config.docareaid)
        .map(|html| html.to_string())
        .ok_or_else(|| eyre!("document produced no content"))
}

/// Resolve a doc selector the same way `defdoc` resolves: numeric index
/// into the doc list, or a urlpath match.
fn resolve_doc_selector(docs: &[IndexedDoc], selector: &str) -> Option<u32> {
    if let Ok(index) = selector.parse::<usize>() {
        return docs.get(index).map(|d| d.id);
    }
    docs.iter().find(|d| d.urlpath == selector).map(|d| d.id)
}

// src/config.rs
// =============================================================================
// The immutable settings of one run.
//
// Built once from the command line, wrapped in an Arc, and shared by every
// task of the traversal. Nothing mutates it after construction.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use chrono::Datelike;
use url::Url;

use crate::cli::{Cli, LinkOrder};
use crate::filter::FilterConfig;
use crate::layout::RootScope;

pub const DEFAULT_ROOT_PREFIX: &str = "/wp-content/uploads/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_CONCURRENCY: usize = 4;

#[derive(Debug, Clone)]
pub struct MirrorConfig {
    pub scope: RootScope,
    pub output_dir: PathBuf,
    pub filter: FilterConfig,
    pub timeout: Duration,
    /// Listing fetches plus downloads in flight; always at least 1
    pub concurrency: usize,
    /// Deepest directory level still listed (the root is level 0)
    pub max_depth: Option<usize>,
    pub order: LinkOrder,
    pub skip_existing: bool,
    pub dry_run: bool,
    /// Print "Downloaded: <path>" for each file as it completes
    pub echo_downloads: bool,
    /// Upper bound for year directories
    pub current_year: i32,
}

impl MirrorConfig {
    /// Settings with every optional behavior at its default.
    pub fn new(root: Url, output_dir: impl Into<PathBuf>) -> Self {
        MirrorConfig {
            scope: RootScope::new(root),
            output_dir: output_dir.into(),
            filter: FilterConfig::default(),
            timeout: DEFAULT_TIMEOUT,
            concurrency: DEFAULT_CONCURRENCY,
            max_depth: None,
            order: LinkOrder::Document,
            skip_existing: false,
            dry_run: false,
            echo_downloads: true,
            current_year: chrono::Local::now().year(),
        }
    }

    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = root_url(&cli.scheme, &cli.domain, &cli.root_prefix)?;

        if cli.concurrency == 0 {
            bail!("--concurrency must be at least 1");
        }
        if cli.timeout == 0 {
            bail!("--timeout must be at least 1 second");
        }

        let mut config = MirrorConfig::new(root, &cli.output);
        config.filter = FilterConfig::new(&cli.only_types, &cli.skip_types, cli.keyword.as_deref());
        config.timeout = Duration::from_secs(cli.timeout);
        config.concurrency = cli.concurrency;
        config.max_depth = cli.max_depth;
        config.order = cli.order;
        config.skip_existing = cli.skip_existing;
        config.dry_run = cli.dry_run;
        config.echo_downloads = !cli.json;
        Ok(config)
    }

    pub fn root_url(&self) -> &Url {
        self.scope.url()
    }
}

/// Builds `{scheme}://{domain}{prefix}`, with the prefix forced to start
/// and end with '/'.
pub fn root_url(scheme: &str, domain: &str, prefix: &str) -> Result<Url> {
    if scheme != "http" && scheme != "https" {
        bail!("Unsupported scheme '{}': expected http or https", scheme);
    }

    let domain = domain.trim().trim_end_matches('/');
    if domain.is_empty() || domain.contains(['/', '?', '#']) {
        return Err(anyhow!(
            "Invalid domain '{}': expected a host name, optionally with a port",
            domain
        ));
    }

    let prefix = normalize_prefix(prefix);
    let input = format!("{}://{}{}", scheme, domain, prefix);
    let url = Url::parse(&input).with_context(|| format!("Invalid root URL '{}'", input))?;

    if url.host().is_none() {
        bail!("Root URL has no host: {}", input);
    }
    Ok(url)
}

// "wp-content/uploads" -> "/wp-content/uploads/"
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

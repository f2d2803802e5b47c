//! Per-address discovery pipeline.
//!
//! For one normalized address the [`Discoverer`]:
//!
//! 1. Fetches the page, follows redirects, and extracts its links
//! 2. Rewrites the working host from any `rel="canonical"` link
//! 3. Emits link and meta icons, expanding manifests in place
//! 4. Checks `/favicon.ico` at the root of the working host
//!
//! Only address normalization can fail an address outright. Every later
//! failure is recorded as a [`Diagnostic`] and the pipeline moves on, so a
//! page that cannot be fetched still gets its domain-root check.

use tracing::{debug, instrument};

use super::address::normalize_address;
use super::links::parse_links;
use super::manifest::fetch_manifest_icons;
use crate::config::{Config, DiscoveryConfig};
use crate::diagnostics::{Diagnostic, Report, Stage};
use crate::fetcher::Fetcher;
use crate::types::{Discovery, Icon, IconSource, Link, LinkKind};
use crate::uri::{Reference, resolve};
use crate::Result;

/// Runs discovery for one address at a time.
pub struct Discoverer {
    fetcher: Fetcher,
    config: DiscoveryConfig,
}

impl Discoverer {
    /// Build a discoverer with its own HTTP client.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self::with_fetcher(
            Fetcher::from_config(&config.fetch)?,
            config.discovery.clone(),
        ))
    }

    /// Build a discoverer around an existing fetcher.
    pub fn with_fetcher(fetcher: Fetcher, config: DiscoveryConfig) -> Self {
        Self { fetcher, config }
    }

    /// Normalize `raw` and discover its icons.
    ///
    /// # Errors
    ///
    /// Returns an error only when `raw` is not a usable address; see
    /// [`normalize_address`].
    pub async fn discover_address(&self, raw: &str) -> Result<Discovery> {
        let address = normalize_address(raw)?;
        Ok(self.discover(&address).await)
    }

    /// Discover every icon candidate for a normalized address.
    #[instrument(skip_all, fields(address = %address))]
    pub async fn discover(&self, address: &Reference) -> Discovery {
        let mut working = address.clone();
        let mut icons = Vec::new();
        let mut diagnostics = Vec::new();

        match self.fetch_page(&mut working).await {
            Ok(report) => {
                let (mut links, link_diagnostics) = report.into_parts();
                diagnostics.extend(link_diagnostics);
                debug!(links = links.len(), "extracted links");

                apply_canonical(&mut working, &mut links);

                for link in &links {
                    self.collect(&working, link, &mut icons, &mut diagnostics)
                        .await;
                }
            },
            Err(err) => {
                debug!(error = %err, "page fetch failed");
                diagnostics.push(Diagnostic::from_error(Stage::Page, &err));
            },
        }

        if self.config.domain_root_fallback {
            let candidate = domain_root_url(&working);
            match self.fetcher.exists(&candidate).await {
                Ok(_) => icons.push(Icon {
                    url: candidate,
                    source: IconSource::DomainRoot,
                }),
                Err(err) => {
                    debug!(url = %candidate, error = %err, "no icon at domain root");
                    diagnostics.push(Diagnostic::from_error(Stage::DomainRoot, &err));
                },
            }
        }

        Discovery {
            original_url: address.to_string(),
            resolved_url: working.to_string(),
            icons,
            diagnostics,
        }
    }

    /// Fetch the page at `working` and extract its links.
    ///
    /// `working` adopts the post-redirect URL before the content type is
    /// checked, so a redirect is kept even when the landing page is unusable.
    async fn fetch_page(&self, working: &mut Reference) -> Result<Report<Vec<Link>>> {
        let requested = working.to_string();
        let fetched = self.fetcher.fetch(&requested).await?;

        if fetched.final_url() != requested {
            debug!(from = %requested, to = %fetched.final_url(), "page redirected");
            *working = Reference::parse(fetched.final_url())?;
        }

        fetched.expect_media_type(&self.config.page_content_types)?;
        let body = fetched.text().await?;
        Ok(parse_links(&body))
    }

    async fn collect(
        &self,
        working: &Reference,
        link: &Link,
        icons: &mut Vec<Icon>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let target = resolve(working, &link.target);
        match link.kind {
            LinkKind::Icon => icons.push(Icon {
                url: target.to_string(),
                source: link.source,
            }),
            LinkKind::Manifest => {
                match fetch_manifest_icons(
                    &self.fetcher,
                    &target,
                    &self.config.manifest_content_types,
                )
                .await
                {
                    Ok(report) => {
                        let (urls, manifest_diagnostics) = report.into_parts();
                        icons.extend(urls.into_iter().map(|url| Icon {
                            url,
                            source: IconSource::Manifest,
                        }));
                        diagnostics.extend(manifest_diagnostics);
                    },
                    Err(err) => {
                        debug!(url = %target, error = %err, "manifest failed");
                        diagnostics.push(Diagnostic::from_error(Stage::Manifest, &err));
                    },
                }
            },
            LinkKind::Canonical => {},
        }
    }
}

/// Adopt the host of every canonical link that differs from `working`.
///
/// Canonical targets are replaced by their resolved form. Only the host of
/// `working` changes; its scheme and path stay. Canonical links without a
/// host after resolution (opaque references) are ignored.
pub fn apply_canonical(working: &mut Reference, links: &mut [Link]) {
    for link in links.iter_mut().filter(|link| link.kind == LinkKind::Canonical) {
        link.target = resolve(working, &link.target);
        if link.target.host().is_empty() || link.target.to_string() == working.to_string() {
            continue;
        }
        debug!(from = %working.host(), to = %link.target.host(), "canonical host rewrite");
        working.set_host(link.target.host());
    }
}

/// `{scheme}://{host}/favicon.ico` for the working URL.
pub fn domain_root_url(working: &Reference) -> String {
    format!("{}://{}/favicon.ico", working.scheme(), working.host())
}

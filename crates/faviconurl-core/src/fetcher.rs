use crate::config::FetchConfig;
use crate::{Error, Result};
use reqwest::header::{CONTENT_TYPE, LOCATION};
use reqwest::{Client, Response, redirect};
use tracing::{debug, instrument, trace};
use url::Url;

/// HTTP client that follows redirects itself instead of letting the
/// transport do it, so every hop is observable.
pub struct Fetcher {
    client: Client,
    max_redirects: usize,
}

impl Fetcher {
    /// Creates a new fetcher with default settings
    pub fn new() -> Result<Self> {
        Self::from_config(&FetchConfig::default())
    }

    /// Creates a fetcher from explicit settings
    pub fn from_config(config: &FetchConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(redirect::Policy::none())
            .gzip(true)
            .brotli(true);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(Error::Network)?;
        Ok(Self {
            client,
            max_redirects: config.max_redirects,
        })
    }

    /// GETs `url`, following 3xx responses until a 2xx arrives.
    ///
    /// - 3xx without a `Location` header: [`Error::RedirectWithoutLocation`]
    /// - any status outside 2xx/3xx: [`Error::UnexpectedStatus`] naming the
    ///   URL that produced it
    /// - more than `max_redirects` hops: [`Error::TooManyRedirects`]
    ///
    /// Intermediate bodies are dropped unread.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<Fetched> {
        let mut current = url.to_string();
        let mut hops = 0usize;

        loop {
            trace!(url = %current, hops, "sending request");
            let response = self.client.get(&current).send().await?;
            let status = response.status();
            trace!(status = status.as_u16(), headers = ?response.headers(), "received response");

            if status.is_redirection() {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::trim)
                    .unwrap_or_default()
                    .to_string();
                drop(response);

                if location.is_empty() {
                    return Err(Error::RedirectWithoutLocation {
                        url: current,
                        status: status.as_u16(),
                    });
                }
                if hops >= self.max_redirects {
                    return Err(Error::TooManyRedirects {
                        url: url.to_string(),
                        limit: self.max_redirects,
                    });
                }

                let next = resolve_location(&current, &location);
                debug!(status = status.as_u16(), from = %current, to = %next, "following redirect");
                current = next;
                hops += 1;
                continue;
            }

            if !status.is_success() {
                return Err(Error::UnexpectedStatus {
                    url: current,
                    status: status.as_u16(),
                });
            }

            debug!(status = status.as_u16(), url = %current, hops, "fetched");
            return Ok(Fetched {
                final_url: current,
                response,
            });
        }
    }

    /// Checks that `url` resolves to a 2xx response and returns the URL it
    /// finally landed on. The body is released unread.
    pub async fn exists(&self, url: &str) -> Result<String> {
        let fetched = self.fetch(url).await?;
        Ok(fetched.final_url)
    }
}

/// Absolute locations are used as given; relative ones are joined onto the
/// URL that produced the redirect.
fn resolve_location(current: &str, location: &str) -> String {
    if Url::parse(location).is_ok() {
        return location.to_string();
    }
    Url::parse(current)
        .and_then(|base| base.join(location))
        .map_or_else(|_| location.to_string(), |joined| joined.to_string())
}

/// A successful (2xx) response at the end of a redirect chain.
///
/// Dropping it releases the underlying connection whether or not the body
/// was read.
#[derive(Debug)]
pub struct Fetched {
    final_url: String,
    response: Response,
}

impl Fetched {
    /// URL that produced this response, after all redirects
    pub fn final_url(&self) -> &str {
        &self.final_url
    }

    /// `Content-Type` without parameters, trimmed and lower-cased
    pub fn media_type(&self) -> Option<String> {
        self.response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(media_type)
    }

    /// Fails with [`Error::UnexpectedContentType`] unless the media type is
    /// one of `accepted`.
    pub fn expect_media_type<S: AsRef<str>>(&self, accepted: &[S]) -> Result<()> {
        let actual = self.media_type().unwrap_or_default();
        if accepted
            .iter()
            .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(&actual))
        {
            Ok(())
        } else {
            Err(Error::UnexpectedContentType {
                url: self.final_url.clone(),
                content_type: actual,
            })
        }
    }

    /// Reads the body as text, consuming the response
    pub async fn text(self) -> Result<String> {
        Ok(self.response.text().await?)
    }

    /// Reads the body as raw bytes, consuming the response
    pub async fn bytes(self) -> Result<Vec<u8>> {
        Ok(self.response.bytes().await?.to_vec())
    }
}

fn media_type(header: &str) -> String {
    header
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

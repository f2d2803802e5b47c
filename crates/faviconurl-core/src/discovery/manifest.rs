//! Web-app manifest decoding and icon resolution.
//!
//! Only the `icons` array is read. Every entry is emitted; `sizes` and
//! `type` are carried but never used to pick between icons.

use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, instrument};

use super::links::parse_link_value;
use crate::diagnostics::{Diagnostic, Report, Stage};
use crate::fetcher::Fetcher;
use crate::uri::{Reference, resolve};
use crate::{Error, Result};

/// The subset of a web-app manifest this crate consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Icons in manifest order. Missing or `null` reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub icons: Vec<ManifestIcon>,
}

/// One entry of a manifest's `icons` array. Missing fields read as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestIcon {
    /// Icon URL, usually relative to the manifest.
    pub src: String,
    /// Space-separated sizes such as `192x192`.
    pub sizes: String,
    /// Declared media type (`type` in JSON).
    #[serde(rename = "type")]
    pub media_type: String,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decode a manifest body. Unknown fields are ignored.
pub fn parse_manifest(body: &[u8]) -> Result<Manifest> {
    serde_json::from_slice(body)
        .map_err(|e| Error::Decode(format!("failed to decode manifest: {e}")))
}

/// Resolve every icon `src` against `manifest_url`.
///
/// An unparseable `src` is skipped with a diagnostic; the remaining icons
/// are still returned.
pub fn manifest_icons(manifest_url: &Reference, manifest: &Manifest) -> Report<Vec<String>> {
    let mut report = Report::new(Vec::with_capacity(manifest.icons.len()));

    for icon in &manifest.icons {
        match parse_link_value(&icon.src) {
            Ok(src) => report.value.push(resolve(manifest_url, &src).to_string()),
            Err(err) => {
                debug!(src = %icon.src, error = %err, "skipping manifest icon");
                report.push(Diagnostic::from_error(Stage::Manifest, &err));
            },
        }
    }

    report
}

/// Fetch the manifest at `manifest_url` and resolve its icons.
///
/// # Errors
///
/// Fails on any fetch error, a media type outside `accepted`, or a body that
/// is not valid manifest JSON.
#[instrument(skip_all, fields(url = %manifest_url))]
pub async fn fetch_manifest_icons<S: AsRef<str>>(
    fetcher: &Fetcher,
    manifest_url: &Reference,
    accepted: &[S],
) -> Result<Report<Vec<String>>> {
    let fetched = fetcher.fetch(&manifest_url.to_string()).await?;
    fetched.expect_media_type(accepted)?;
    let body = fetched.bytes().await?;

    let manifest = parse_manifest(&body)?;
    debug!(icons = manifest.icons.len(), "decoded manifest");
    Ok(manifest_icons(manifest_url, &manifest))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn reference(input: &str) -> Reference {
        Reference::parse(input).unwrap()
    }

    #[test]
    fn test_parse_manifest_full_shape() {
        let manifest = parse_manifest(
            br#"{
                "name": "Example",
                "icons": [
                    {"src": "/m1.png", "sizes": "192x192", "type": "image/png"},
                    {"src": "m2.png", "purpose": "maskable"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(manifest.icons.len(), 2);
        assert_eq!(manifest.icons[0].sizes, "192x192");
        assert_eq!(manifest.icons[0].media_type, "image/png");
        assert_eq!(manifest.icons[1].sizes, "");
    }

    #[test]
    fn test_parse_manifest_missing_or_null_icons() {
        assert!(parse_manifest(b"{}").unwrap().icons.is_empty());
        assert!(parse_manifest(br#"{"icons": null}"#).unwrap().icons.is_empty());
    }

    #[test]
    fn test_parse_manifest_malformed() {
        let err = parse_manifest(b"{\"icons\": [").unwrap_err();
        assert_eq!(err.category(), "decode_failure");
    }

    #[test]
    fn test_manifest_icons_skips_malformed_src() {
        let manifest = parse_manifest(
            br#"{"icons": [{"src": "/m1.png"}, {"src": "bad uri \u0000"}]}"#,
        )
        .unwrap();
        let report = manifest_icons(&reference("https://a.com/site.webmanifest"), &manifest);
        assert_eq!(report.value, vec!["https://a.com/m1.png".to_string()]);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].stage, Stage::Manifest);
        assert_eq!(report.diagnostics[0].category, "link_parse_failure");
    }

    #[test]
    fn test_manifest_icons_resolve_against_manifest_path() {
        let manifest = Manifest {
            icons: vec![
                ManifestIcon {
                    src: "icon-512.png".to_string(),
                    ..ManifestIcon::default()
                },
                ManifestIcon::default(),
                ManifestIcon {
                    src: "https://cdn.a.com/i.png".to_string(),
                    ..ManifestIcon::default()
                },
            ],
        };
        let report = manifest_icons(&reference("https://a.com/app/manifest.json"), &manifest);
        assert_eq!(
            report.value,
            vec![
                "https://a.com/app/manifest.json/icon-512.png".to_string(),
                "https://a.com/app/manifest.json/".to_string(),
                "https://cdn.a.com/i.png".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_manifest_icons() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/manifest.json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"icons": [{"src": "/m1.png"}, {"src": "/m2.png"}]}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new()?;
        let url = reference(&format!("{}/manifest.json", server.uri()));
        let report = fetch_manifest_icons(&fetcher, &url, &["application/json"]).await?;

        assert_eq!(
            report.value,
            vec![
                format!("{}/m1.png", server.uri()),
                format!("{}/m2.png", server.uri()),
            ]
        );
        assert!(report.diagnostics.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_manifest_rejects_wrong_content_type() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/site.webmanifest"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"icons": []}"#, "application/manifest+json"),
            )
            .mount(&server)
            .await;

        let fetcher = Fetcher::new()?;
        let url = reference(&format!("{}/site.webmanifest", server.uri()));
        let result = fetch_manifest_icons(&fetcher, &url, &["application/json"]).await;
        assert!(matches!(result, Err(Error::UnexpectedContentType { .. })));

        let report = fetch_manifest_icons(
            &fetcher,
            &url,
            &["application/json", "application/manifest+json"],
        )
        .await?;
        assert!(report.value.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_manifest_malformed_body() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/manifest.json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("not json", "application/json"))
            .mount(&server)
            .await;

        let fetcher = Fetcher::new()?;
        let url = reference(&format!("{}/manifest.json", server.uri()));
        let result = fetch_manifest_icons(&fetcher, &url, &["application/json"]).await;
        assert!(matches!(result, Err(Error::Decode(_))));
        Ok(())
    }
}

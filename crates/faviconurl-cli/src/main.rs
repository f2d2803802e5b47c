//! faviconurl CLI - find every favicon URL a site advertises
//!
//! Thin entry point; everything lives in the library so it can be tested.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    faviconurl_cli::run().await
}

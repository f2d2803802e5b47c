//! Discover icons for each address on the command line.
//!
//! Addresses are processed strictly one after another. A failure for one
//! address is reported and the loop moves on; nothing here changes the exit
//! status except a failure to write to stdout.

use anyhow::Result;
use faviconurl_core::Discoverer;
use std::io::{self, Write};
use tracing::debug;

use crate::output::{AddressOutput, JsonFormatter, OutputFormat, TextFormatter};

/// Run discovery for every address and print the results.
pub async fn execute(
    discoverer: &Discoverer,
    addresses: &[String],
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let mut collected = Vec::new();

    for raw in addresses {
        let output = match discoverer.discover_address(raw).await {
            Ok(discovery) => {
                debug!(address = %raw, icons = discovery.icons.len(), "discovered");
                if !quiet && !format.is_machine_readable() {
                    for diagnostic in &discovery.diagnostics {
                        eprintln!("{}", TextFormatter::format_diagnostic(diagnostic));
                    }
                }
                AddressOutput::from_discovery(raw, discovery)
            },
            Err(err) => {
                eprintln!("{}", TextFormatter::format_error(raw, &err));
                AddressOutput::from_error(raw, &err)
            },
        };

        let written = match format {
            OutputFormat::Text => {
                TextFormatter::write_address(&mut io::stdout(), &output).map_err(Into::into)
            },
            OutputFormat::Jsonl => JsonFormatter::write_line(&mut io::stdout(), &output),
            OutputFormat::Json => {
                collected.push(output);
                Ok(())
            },
        };
        if stop_on_closed_pipe(written)? {
            return Ok(());
        }
    }

    if format == OutputFormat::Json {
        stop_on_closed_pipe(JsonFormatter::write_all(&mut io::stdout(), &collected))?;
    }
    io::stdout().flush().or_else(ignore_broken_pipe)
}

/// `Ok(true)` when stdout was closed by the reader (e.g. `| head`).
fn stop_on_closed_pipe(result: Result<()>) -> Result<bool> {
    match result {
        Ok(()) => Ok(false),
        Err(err) if is_broken_pipe(&err) => Ok(true),
        Err(err) => Err(err),
    }
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| io_err.kind() == io::ErrorKind::BrokenPipe)
    })
}

fn ignore_broken_pipe(err: io::Error) -> Result<()> {
    if err.kind() == io::ErrorKind::BrokenPipe {
        Ok(())
    } else {
        Err(err.into())
    }
}

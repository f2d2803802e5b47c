//! JSON output formatting

use anyhow::Result;
use std::io::Write;

use super::AddressOutput;

pub struct JsonFormatter;

impl JsonFormatter {
    /// Write every address as one pretty-printed JSON array
    pub fn write_all<W: Write>(out: &mut W, outputs: &[AddressOutput]) -> Result<()> {
        let json = serde_json::to_string_pretty(outputs)?;
        writeln!(out, "{json}")?;
        Ok(())
    }

    /// Write one address as a single JSON line
    pub fn write_line<W: Write>(out: &mut W, output: &AddressOutput) -> Result<()> {
        writeln!(out, "{}", serde_json::to_string(output)?)?;
        Ok(())
    }
}

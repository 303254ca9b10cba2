use anyhow::Result;
use flexmls_api::types::Results;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Pretty,
    Compact,
}

/// Prints a collection (records, details, paging) or a bare count as JSON.
pub fn print_results(results: &Results, format: &OutputFormat) -> Result<()> {
    println!("{}", render(results, format)?);
    Ok(())
}

fn render(results: &Results, format: &OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(results)?,
        OutputFormat::Compact => serde_json::to_string(results)?,
    })
}

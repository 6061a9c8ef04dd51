//! Helpers shared by the Sitecheck CLI binary.

use anyhow::Context;
use serde::Serialize;

/// Pretty-print a serializable value to stdout.
pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

/// Split a comma-separated id list, dropping empty segments.
pub fn parse_id_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_list_splitting() {
        assert_eq!(
            parse_id_list("a,b,c"),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert_eq!(parse_id_list(" a , ,b,"), vec!["a".to_string(), "b".to_string()]);
        assert!(parse_id_list("").is_empty());
        assert!(parse_id_list(" , ").is_empty());
    }
}

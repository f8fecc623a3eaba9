//! Parsing of Terraform CLI output used by stack discovery.
//!
//! Two discovery methods feed the locator: the structured
//! `terraform output -raw <name>` query, and a fallback that scrapes
//! `terraform state show <addr>` free text for a quoted attribute value.

use regex::Regex;

/// Interpret `terraform output -raw` stdout. Whitespace-only output means
/// the output is not defined in state and counts as unresolved.
pub fn parse_output_value(stdout: &str) -> Option<String> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Extract a quoted attribute value from `terraform state show` output.
///
/// Matches lines of the form `    bucket = "value"`; the attribute name is
/// escaped so it is matched literally, and only the first occurrence is
/// returned.
pub fn parse_state_attribute(stdout: &str, attribute: &str) -> Option<String> {
    let pattern = format!(r#"(?m)^\s*{}\s*=\s*"([^"]+)""#, regex::escape(attribute));
    let matcher = Regex::new(&pattern).ok()?;
    matcher
        .captures(stdout)
        .map(|captures| captures[1].to_string())
}

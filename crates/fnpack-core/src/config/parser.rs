//! TOML parser with helpful error messages

use super::schema::FnpackSettings;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse fnpack.toml with detailed error messages
pub fn parse_settings_toml(path: &Path) -> Result<FnpackSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_settings_toml_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse fnpack.toml content from string
pub fn parse_settings_toml_str(content: &str) -> Result<FnpackSettings> {
    let settings: FnpackSettings =
        toml::from_str(content).map_err(|e| enhance_toml_error(e, content))?;

    settings.validate()?;

    Ok(settings)
}

/// Enhance TOML parsing errors with the offending line and its neighbours
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let message = error.message().to_string();

    let line_num = error
        .span()
        .map(|span| content[..span.start.min(content.len())].matches('\n').count() + 1);

    match line_num {
        Some(line_num) => {
            let context = get_line_context(content, line_num);
            anyhow::anyhow!(
                "TOML parsing error at line {}:\n{}\n\nError: {}",
                line_num,
                context,
                message
            )
        }
        None => anyhow::anyhow!("TOML parsing error: {}", message),
    }
}

/// Get context lines around an error
pub(crate) fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2);
    let end = (line_num + 2).min(lines.len());

    lines[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_empty_config() {
        let settings = parse_settings_toml_str("").unwrap();
        assert_eq!(settings, FnpackSettings::default());
    }

    #[test]
    fn test_parse_overrides() {
        let toml = r#"
functions_dir = "lambdas"
package_manager = "npm"
templates_dir = "templates"
"#;

        let settings = parse_settings_toml_str(toml).unwrap();
        assert_eq!(settings.functions_dir, "lambdas");
        assert_eq!(settings.package_manager, "npm");
        assert_eq!(settings.manifest, "serverless.yml");
        assert_eq!(
            settings.templates_dir.as_deref(),
            Some(Path::new("templates"))
        );
    }

    #[test]
    fn test_parse_unknown_key_fails() {
        let result = parse_settings_toml_str("functions_folder = \"x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_enhance_toml_error_reports_line() {
        let toml = "manifest = \"serverless.yml\"\nfunctions_dir = [unclosed\n";
        let err = parse_settings_toml_str(toml).unwrap_err().to_string();
        assert!(err.contains("line 2") || err.contains("TOML parsing error"));
    }

    #[test]
    fn test_parse_invalid_values_fail_validation() {
        let result = parse_settings_toml_str("functions_dir = \"../outside\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "manifest = \"serverless.yaml\"").unwrap();

        let settings = parse_settings_toml(temp_file.path()).unwrap();
        assert_eq!(settings.manifest, "serverless.yaml");
    }

    #[test]
    fn test_parse_nonexistent_file() {
        let result = parse_settings_toml(Path::new("/nonexistent/path/fnpack.toml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }

    #[test]
    fn test_line_context_marks_offending_line() {
        let context = get_line_context("a\nb\nc\nd", 2);
        assert!(context.contains(">>>    2 | b"));
        assert!(context.contains("      1 | a"));
    }
}

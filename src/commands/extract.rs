//! Implementation of the `neosapiens extract` command.

use crate::cli::ExtractArgs;
use crate::error::{Result, SwarmError};
use crate::plan::extract_plan;
use std::io::Read;
use std::path::Path;

/// Execute the `neosapiens extract` command.
pub fn cmd_extract(args: ExtractArgs) -> Result<()> {
    let input = match &args.file {
        Some(path) => read_file(path)?,
        None => read_stdin()?,
    };

    println!("{}", extract_to_json(&input)?);
    Ok(())
}

/// Validate a model response and render the plan as pretty JSON.
fn extract_to_json(input: &str) -> Result<String> {
    Ok(extract_plan(input)?.to_json_pretty())
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        SwarmError::UserError(format!("failed to read '{}': {}", path.display(), e))
    })
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| SwarmError::UserError(format!("failed to read stdin: {}", e)))?;
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;
    use crate::plan::ExtractionError;
    use crate::test_support::support_team_reply;
    use tempfile::TempDir;

    #[test]
    fn test_extract_to_json_normalizes_fenced_reply() {
        let json = extract_to_json(&support_team_reply()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["agents"][0]["name"], "Triage");
        assert_eq!(value["agents"].as_array().unwrap().len(), 2);
        assert!(!json.contains("```"));
    }

    #[test]
    fn test_extract_to_json_reports_plan_failure() {
        let err = extract_to_json("   ").unwrap_err();

        assert!(matches!(err, SwarmError::Plan(ExtractionError::EmptyInput)));
        assert_eq!(err.exit_code(), exit_codes::PLAN_FAILURE);
    }

    #[test]
    fn test_read_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reply.md");
        std::fs::write(&path, support_team_reply()).unwrap();

        assert_eq!(read_file(&path).unwrap(), support_team_reply());

        let err = read_file(&temp_dir.path().join("missing.md")).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    }
}

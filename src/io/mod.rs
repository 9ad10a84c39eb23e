//! JSON boundary with the parsing and rendering collaborators.
//!
//! The engine core is I/O-free; this module is the only place that
//! touches the file system. Input is the ordered fact-bundle sequence,
//! output is the serialized [`ProjectAnalysisResult`].

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::core::errors::Result;
use crate::core::facts::FactBundle;
use crate::core::ProjectAnalysisResult;

/// Read the parsing collaborator's fact sequence from a JSON file.
pub fn read_facts(path: &Path) -> Result<Vec<FactBundle>> {
    let content = fs::read_to_string(path)?;
    let facts = serde_json::from_str(&content)?;
    Ok(facts)
}

/// Serialize a result to pretty JSON.
pub fn result_to_json(result: &ProjectAnalysisResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Write a result to a file, or to the writer when no path is given.
pub fn write_result(
    result: &ProjectAnalysisResult,
    output: Option<&Path>,
    writer: &mut dyn Write,
) -> Result<()> {
    let json = result_to_json(result)?;
    match output {
        Some(path) => fs::write(path, json)?,
        None => writeln!(writer, "{json}")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_serializes_with_stable_field_names() {
        let result = ProjectAnalysisResult::new();
        let json = result_to_json(&result).unwrap();
        for field in [
            "components",
            "relationships",
            "navigation_flows",
            "user_flows",
            "business_processes",
        ] {
            assert!(json.contains(field), "missing field {field}");
        }
    }

    #[test]
    fn missing_input_file_is_an_io_error() {
        let err = read_facts(Path::new("/nonexistent/facts.json")).unwrap_err();
        assert!(matches!(err, crate::core::errors::Error::Io(_)));
    }
}

//! Manifest and dry-run presentation

use super::shared::{format_size, new_table, to_pretty_json};
use crate::api::NewDeployment;
use crate::deploy::PreparedDeploy;
use crate::error::ApiError;
use serde_json::json;

pub fn format_manifest(prepared: &PreparedDeploy, format: &str) -> Result<String, ApiError> {
    let manifest = &prepared.manifest;
    if format == "json" {
        let out = json!({
            "project_type": prepared.project_type,
            "files": manifest.records(),
            "digests": manifest.len(),
            "total_size": manifest.total_size(),
            "unique_size": manifest.unique_size(),
        });
        return to_pretty_json(&out);
    }

    if manifest.is_empty() {
        return Ok(format!(
            "Project type: {}\nNo files to deploy.",
            prepared.project_type
        ));
    }

    let mut table = new_table(vec!["SHA", "Size", "Mode", "Files"]);
    for group in manifest.groups() {
        let mode = group
            .names
            .first()
            .map(|r| format!("{:o}", r.mode))
            .unwrap_or_default();
        let files: Vec<&str> = group.file_names().collect();
        table.add_row(vec![
            group.sha.clone(),
            format_size(group.size()),
            mode,
            files.join("\n"),
        ]);
    }

    Ok(format!(
        "Project type: {}\n{}\n\n{} file(s), {} unique digest(s), {} to upload ({} total)",
        prepared.project_type,
        table,
        manifest.records().len(),
        manifest.len(),
        format_size(manifest.unique_size()),
        format_size(manifest.total_size()),
    ))
}

/// The create request a deploy would send.
pub fn format_dry_run(request: &NewDeployment) -> Result<String, ApiError> {
    to_pretty_json(request)
}

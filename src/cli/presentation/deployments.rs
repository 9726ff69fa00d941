//! Deployment command presentation: list, get, files, aliases, deploy outcome.

use super::shared::{format_size, format_time, new_table, to_pretty_json};
use crate::api::{Alias, Deployment, DeploymentContent};
use crate::deploy::DeployOutcome;
use crate::error::ApiError;
use serde_json::json;

pub fn format_deployments(deployments: &[Deployment], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_pretty_json(&json!({ "deployments": deployments, "total": deployments.len() }));
    }
    if deployments.is_empty() {
        return Ok("No deployments found.".to_string());
    }
    let mut table = new_table(vec!["ID", "Host", "State", "Updated"]);
    for d in deployments {
        table.add_row(vec![
            d.uid.clone(),
            d.host.clone(),
            d.state.clone(),
            format_time(d.state_ts.as_ref()),
        ]);
    }
    Ok(format!("{}\n\nTotal: {} deployment(s)", table, deployments.len()))
}

pub fn format_deployment(deployment: &Deployment, format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_pretty_json(deployment);
    }
    Ok(format!(
        "Deployment: {}\nHost: {}\nState: {}\nUpdated: {}",
        deployment.uid,
        deployment.host,
        deployment.state,
        format_time(deployment.state_ts.as_ref())
    ))
}

/// Render the file tree as an indented listing, directories suffixed with `/`.
pub fn format_deployment_files(
    files: &[DeploymentContent],
    format: &str,
) -> Result<String, ApiError> {
    if format == "json" {
        return to_pretty_json(files);
    }
    let mut lines = Vec::new();
    for node in files {
        push_tree_lines(node, 0, &mut lines);
    }
    if lines.is_empty() {
        return Ok("No files.".to_string());
    }
    Ok(lines.join("\n"))
}

fn push_tree_lines(node: &DeploymentContent, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    match node {
        DeploymentContent::Directory { name, children } => {
            lines.push(format!("{}{}/", indent, name));
            for child in children {
                push_tree_lines(child, depth + 1, lines);
            }
        }
        DeploymentContent::File { name, .. } => lines.push(format!("{}{}", indent, name)),
    }
}

pub fn format_aliases(aliases: &[Alias], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_pretty_json(&json!({ "aliases": aliases, "total": aliases.len() }));
    }
    if aliases.is_empty() {
        return Ok("No aliases.".to_string());
    }
    let mut table = new_table(vec!["Alias", "ID", "Created"]);
    for a in aliases {
        table.add_row(vec![
            a.alias.clone(),
            a.uid.clone().unwrap_or_else(|| "-".to_string()),
            format_time(a.created.as_ref()),
        ]);
    }
    Ok(table.to_string())
}

pub fn format_deploy_outcome(outcome: &DeployOutcome) -> String {
    let mut out = format!(
        "Deployed {} ({})\n  ID: {}\n  Files: {} ({} unique)\n  Uploaded: {} of {} digest(s), {}",
        outcome.deployment.url,
        outcome.project_type,
        outcome.deployment.deployment_id,
        outcome.manifest.records().len(),
        outcome.manifest.len(),
        outcome.uploaded.len(),
        outcome.manifest.len(),
        format_size(
            outcome
                .uploaded
                .iter()
                .filter_map(|sha| outcome.manifest.group(sha))
                .map(|g| g.size())
                .sum()
        ),
    );
    for warning in &outcome.deployment.warnings {
        out.push_str(&format!("\n  Warning: {}", warning));
    }
    out
}

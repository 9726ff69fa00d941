//! Domains, certificates, teams and plan presentation

use super::shared::{format_time, new_table, to_pretty_json};
use crate::api::{Cert, Domain, Subscription, Team, TeamMember};
use crate::error::ApiError;
use serde_json::json;

pub fn format_domains(domains: &[Domain], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_pretty_json(&json!({ "domains": domains, "total": domains.len() }));
    }
    if domains.is_empty() {
        return Ok("No domains found.".to_string());
    }
    let mut table = new_table(vec!["Name", "ID", "Verified", "Created"]);
    for d in domains {
        table.add_row(vec![
            d.name.clone(),
            d.uid.clone(),
            if d.verified { "yes" } else { "no" }.to_string(),
            format_time(d.created.as_ref()),
        ]);
    }
    Ok(table.to_string())
}

pub fn format_certs(certs: &[Cert], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_pretty_json(&json!({ "certificates": certs, "total": certs.len() }));
    }
    if certs.is_empty() {
        return Ok("No certificates found.".to_string());
    }
    let mut table = new_table(vec!["ID", "Created"]);
    for c in certs {
        table.add_row(vec![c.uid.clone(), format_time(c.created.as_ref())]);
    }
    Ok(table.to_string())
}

pub fn format_teams(teams: &[Team], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_pretty_json(&json!({ "teams": teams, "total": teams.len() }));
    }
    if teams.is_empty() {
        return Ok("No teams found.".to_string());
    }
    let mut table = new_table(vec!["ID", "Slug", "Name", "Created"]);
    for t in teams {
        table.add_row(vec![
            t.id.clone(),
            t.slug.clone(),
            t.name.clone(),
            format_time(t.created.as_ref()),
        ]);
    }
    Ok(table.to_string())
}

pub fn format_team_members(members: &[TeamMember], format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_pretty_json(&json!({ "members": members, "total": members.len() }));
    }
    if members.is_empty() {
        return Ok("No members.".to_string());
    }
    let mut table = new_table(vec!["Username", "Email", "Role"]);
    for m in members {
        table.add_row(vec![m.username.clone(), m.email.clone(), m.role.clone()]);
    }
    Ok(table.to_string())
}

pub fn format_plan(subscription: &Subscription, format: &str) -> Result<String, ApiError> {
    if format == "json" {
        return to_pretty_json(subscription);
    }
    let plan = &subscription.plan;
    let price = plan.amount as f64 / 100.0;
    Ok(format!(
        "Plan: {} ({})\nPrice: {:.2} {} every {} {}",
        plan.name,
        plan.id,
        price,
        plan.currency.to_uppercase(),
        plan.interval_count,
        plan.interval
    ))
}

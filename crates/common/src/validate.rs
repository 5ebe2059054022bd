//! Manifest consistency checks

use crate::naming::{is_identifier_safe, slugify};
use crate::{FieldDefinition, ProviderManifest};
use std::collections::HashSet;
use std::fmt;

/// A problem found in a manifest; `path` points at the offending element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Check a manifest for missing identity, malformed names and duplicates
pub fn validate(manifest: &ProviderManifest) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if manifest.id.is_empty() {
        issues.push(issue("id", "must not be empty"));
    } else if slugify(&manifest.id) != manifest.id {
        issues.push(issue("id", "must be a lowercase hyphenated slug"));
    }
    if manifest.name.trim().is_empty() {
        issues.push(issue("name", "must not be empty"));
    }

    check_fields(&manifest.auth_fields, "auth.fields", &mut issues);

    let mut action_ids = HashSet::new();
    for (i, action) in manifest.actions.iter().enumerate() {
        let path = format!("actions[{i}]");
        if !is_identifier_safe(&action.id) {
            issues.push(issue(&path, &format!("invalid action id '{}'", action.id)));
        }
        if !action_ids.insert(action.id.as_str()) {
            issues.push(issue(&path, &format!("duplicate action id '{}'", action.id)));
        }
        check_fields(&action.inputs, &format!("{path}.inputs"), &mut issues);
        check_fields(&action.outputs, &format!("{path}.outputs"), &mut issues);
    }

    let mut trigger_ids = HashSet::new();
    for (i, trigger) in manifest.triggers.iter().enumerate() {
        let path = format!("triggers[{i}]");
        if !is_identifier_safe(&trigger.id) {
            issues.push(issue(&path, &format!("invalid trigger id '{}'", trigger.id)));
        }
        if !trigger_ids.insert(trigger.id.as_str()) {
            issues.push(issue(&path, &format!("duplicate trigger id '{}'", trigger.id)));
        }
        check_fields(&trigger.outputs, &format!("{path}.outputs"), &mut issues);
        check_fields(&trigger.config_fields, &format!("{path}.config_fields"), &mut issues);
    }

    issues
}

fn check_fields(fields: &[FieldDefinition], path: &str, issues: &mut Vec<ValidationIssue>) {
    let mut seen = HashSet::new();
    for (i, field) in fields.iter().enumerate() {
        let field_path = format!("{path}[{i}]");
        if !is_identifier_safe(&field.name) {
            issues.push(issue(&field_path, &format!("invalid field name '{}'", field.name)));
        }
        if !seen.insert(field.name.as_str()) {
            issues.push(issue(&field_path, &format!("duplicate field name '{}'", field.name)));
        }
    }
}

fn issue(path: &str, message: &str) -> ValidationIssue {
    ValidationIssue {
        path: path.to_string(),
        message: message.to_string(),
    }
}

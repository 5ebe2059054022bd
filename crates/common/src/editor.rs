//! Manifest editing as pure transforms
//!
//! Every edit takes the current manifest by reference and returns a new
//! value, so a rejected edit leaves the caller's manifest untouched.

use crate::naming::{normalize_field_name, sanitize_identifier, slugify};
use crate::{
    ActionDefinition, AuthType, FieldDefinition, ManifestError, Protocol, ProviderManifest,
    Result, TriggerDefinition,
};

/// A single edit to a manifest
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestEdit {
    SetId(String),
    SetName(String),
    SetDescription(String),
    SetVersion(String),
    SetIconUrl(Option<String>),
    SetProtocol(Protocol),
    SetAuthType(AuthType),
    SetBaseUrl(Option<String>),
    SetSupportsWebhooks(bool),
    AddCategory(String),
    RemoveCategory(String),
    AddTag(String),
    RemoveTag(String),
    AddAuthField(FieldDefinition),
    RemoveAuthField(String),
    AddAction(ActionDefinition),
    /// Replace the action with the same id
    UpdateAction(ActionDefinition),
    RemoveAction(String),
    AddActionInput {
        action_id: String,
        field: FieldDefinition,
    },
    AddActionOutput {
        action_id: String,
        field: FieldDefinition,
    },
    AddTrigger(TriggerDefinition),
    RemoveTrigger(String),
    /// Wholesale replacement (import result or template)
    Replace(ProviderManifest),
}

/// Apply one edit, returning the edited copy
pub fn apply_edit(manifest: &ProviderManifest, edit: ManifestEdit) -> Result<ProviderManifest> {
    let mut next = manifest.clone();

    match edit {
        ManifestEdit::SetId(id) => next.id = slugify(&id),
        ManifestEdit::SetName(name) => next.name = name,
        ManifestEdit::SetDescription(description) => next.description = description,
        ManifestEdit::SetVersion(version) => next.version = version,
        ManifestEdit::SetIconUrl(url) => next.icon_url = non_empty(url),
        ManifestEdit::SetProtocol(protocol) => next.protocol = protocol,
        ManifestEdit::SetAuthType(auth_type) => next.auth_type = auth_type,
        ManifestEdit::SetBaseUrl(url) => next.base_url = non_empty(url),
        ManifestEdit::SetSupportsWebhooks(flag) => next.supports_webhooks = flag,
        ManifestEdit::AddCategory(category) => insert_label(&mut next.categories, &category),
        ManifestEdit::RemoveCategory(category) => next.categories.retain(|c| *c != category),
        ManifestEdit::AddTag(tag) => insert_label(&mut next.tags, &tag),
        ManifestEdit::RemoveTag(tag) => next.tags.retain(|t| *t != tag),
        ManifestEdit::AddAuthField(field) => push_field(&mut next.auth_fields, field, "auth field")?,
        ManifestEdit::RemoveAuthField(name) => {
            let name = normalize_field_name(&name);
            remove_where(&mut next.auth_fields, |f| f.name == name, "auth field", &name)?;
        }
        ManifestEdit::AddAction(action) => {
            let action = normalize_action(action)?;
            if next.action(&action.id).is_some() {
                return Err(duplicate("action", &action.id));
            }
            next.actions.push(action);
        }
        ManifestEdit::UpdateAction(action) => {
            let action = normalize_action(action)?;
            let slot = next
                .actions
                .iter_mut()
                .find(|a| a.id == action.id)
                .ok_or_else(|| not_found("action", &action.id))?;
            *slot = action;
        }
        ManifestEdit::RemoveAction(id) => {
            remove_where(&mut next.actions, |a| a.id == id, "action", &id)?;
        }
        ManifestEdit::AddActionInput { action_id, field } => {
            let action = action_mut(&mut next, &action_id)?;
            push_field(&mut action.inputs, field, "input")?;
        }
        ManifestEdit::AddActionOutput { action_id, field } => {
            let action = action_mut(&mut next, &action_id)?;
            push_field(&mut action.outputs, field, "output")?;
        }
        ManifestEdit::AddTrigger(trigger) => {
            let trigger = normalize_trigger(trigger)?;
            if next.trigger(&trigger.id).is_some() {
                return Err(duplicate("trigger", &trigger.id));
            }
            next.triggers.push(trigger);
        }
        ManifestEdit::RemoveTrigger(id) => {
            remove_where(&mut next.triggers, |t| t.id == id, "trigger", &id)?;
        }
        ManifestEdit::Replace(replacement) => next = replacement,
    }

    Ok(next)
}

/// Apply a sequence of edits; the first failure aborts the whole batch
pub fn apply_edits<I>(manifest: &ProviderManifest, edits: I) -> Result<ProviderManifest>
where
    I: IntoIterator<Item = ManifestEdit>,
{
    edits
        .into_iter()
        .try_fold(manifest.clone(), |current, edit| apply_edit(&current, edit))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Labels are unique; re-adding an existing one is a no-op
fn insert_label(labels: &mut Vec<String>, label: &str) {
    let label = label.trim();
    if !label.is_empty() && !labels.iter().any(|l| l == label) {
        labels.push(label.to_string());
    }
}

fn push_field(
    fields: &mut Vec<FieldDefinition>,
    mut field: FieldDefinition,
    kind: &'static str,
) -> Result<()> {
    field.name = normalize_field_name(&field.name);
    if field.name.is_empty() {
        return Err(ManifestError::Validation(format!("{kind} name must not be empty")));
    }
    if fields.iter().any(|f| f.name == field.name) {
        return Err(duplicate(kind, &field.name));
    }
    fields.push(field);
    Ok(())
}

fn normalize_fields(fields: Vec<FieldDefinition>, kind: &'static str) -> Result<Vec<FieldDefinition>> {
    let mut normalized = Vec::with_capacity(fields.len());
    for field in fields {
        push_field(&mut normalized, field, kind)?;
    }
    Ok(normalized)
}

fn normalize_action(mut action: ActionDefinition) -> Result<ActionDefinition> {
    action.id = sanitize_identifier(&normalize_field_name(&action.id));
    if action.id.is_empty() {
        return Err(ManifestError::Validation("action id must not be empty".to_string()));
    }
    action.category = non_empty(action.category);
    action.inputs = normalize_fields(action.inputs, "input")?;
    action.outputs = normalize_fields(action.outputs, "output")?;
    Ok(action)
}

fn normalize_trigger(mut trigger: TriggerDefinition) -> Result<TriggerDefinition> {
    trigger.id = sanitize_identifier(&normalize_field_name(&trigger.id));
    if trigger.id.is_empty() {
        return Err(ManifestError::Validation("trigger id must not be empty".to_string()));
    }
    trigger.outputs = normalize_fields(trigger.outputs, "output")?;
    trigger.config_fields = normalize_fields(trigger.config_fields, "config field")?;
    Ok(trigger)
}

fn action_mut<'a>(manifest: &'a mut ProviderManifest, id: &str) -> Result<&'a mut ActionDefinition> {
    manifest
        .actions
        .iter_mut()
        .find(|a| a.id == id)
        .ok_or_else(|| not_found("action", id))
}

fn remove_where<T>(
    items: &mut Vec<T>,
    matches: impl Fn(&T) -> bool,
    kind: &'static str,
    name: &str,
) -> Result<()> {
    let before = items.len();
    items.retain(|item| !matches(item));
    if items.len() == before {
        return Err(not_found(kind, name));
    }
    Ok(())
}

fn duplicate(kind: &'static str, name: &str) -> ManifestError {
    ManifestError::Duplicate {
        kind,
        name: name.to_string(),
    }
}

fn not_found(kind: &'static str, name: &str) -> ManifestError {
    ManifestError::NotFound {
        kind,
        name: name.to_string(),
    }
}

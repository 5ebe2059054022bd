//! Manifest YAML rendering
//!
//! Output is emitted line by line rather than through a YAML library so
//! the key order and layout stay fixed. Every string value is written as a
//! double-quoted scalar; enums, booleans and keys are written bare.

use provider_manifest_common::{
    ActionDefinition, FieldDefinition, ProviderManifest, Result, TriggerDefinition,
};
use std::fmt::Write as FmtWrite;

/// Render a manifest as YAML text
///
/// Rendering the same manifest twice yields byte-identical output.
pub fn render_manifest(manifest: &ProviderManifest) -> Result<String> {
    let mut output = String::new();

    write_header(&mut output)?;
    write_identity(&mut output, manifest)?;
    write_auth(&mut output, manifest)?;
    write_connection(&mut output, manifest)?;
    write_actions(&mut output, &manifest.actions)?;
    write_triggers(&mut output, &manifest.triggers)?;

    Ok(output)
}

fn write_header(output: &mut String) -> Result<()> {
    writeln!(output, "# Provider manifest")?;
    writeln!(output, "# Generated by provider-manifest")?;
    writeln!(output)?;
    Ok(())
}

fn write_identity(output: &mut String, manifest: &ProviderManifest) -> Result<()> {
    writeln!(output, "id: {}", quote(&manifest.id))?;
    writeln!(output, "name: {}", quote(&manifest.name))?;
    writeln!(output, "description: {}", quote(&manifest.description))?;
    writeln!(output, "version: {}", quote(&manifest.version))?;
    if let Some(ref icon_url) = manifest.icon_url {
        writeln!(output, "icon_url: {}", quote(icon_url))?;
    }
    writeln!(output, "protocol: {}", manifest.protocol)?;
    writeln!(output)?;

    write_string_list(output, "categories", &manifest.categories)?;
    if !manifest.tags.is_empty() {
        write_string_list(output, "tags", &manifest.tags)?;
    }
    writeln!(output)?;
    Ok(())
}

fn write_auth(output: &mut String, manifest: &ProviderManifest) -> Result<()> {
    writeln!(output, "auth:")?;
    writeln!(output, "  type: {}", manifest.auth_type)?;
    if !manifest.auth_fields.is_empty() {
        write_fields(output, 2, "fields", &manifest.auth_fields)?;
    }
    writeln!(output)?;
    Ok(())
}

fn write_connection(output: &mut String, manifest: &ProviderManifest) -> Result<()> {
    if let Some(ref base_url) = manifest.base_url {
        writeln!(output, "base_url: {}", quote(base_url))?;
    }
    writeln!(output, "supports_webhooks: {}", manifest.supports_webhooks)?;
    writeln!(output)?;
    Ok(())
}

fn write_actions(output: &mut String, actions: &[ActionDefinition]) -> Result<()> {
    if actions.is_empty() {
        writeln!(output, "actions: []")?;
        writeln!(output)?;
        return Ok(());
    }

    writeln!(output, "actions:")?;
    for action in actions {
        writeln!(output, "  - id: {}", quote(&action.id))?;
        writeln!(output, "    name: {}", quote(&action.name))?;
        writeln!(output, "    description: {}", quote(&action.description))?;
        if let Some(ref category) = action.category {
            writeln!(output, "    category: {}", quote(category))?;
        }
        writeln!(output, "    is_idempotent: {}", action.is_idempotent)?;
        write_fields(output, 4, "inputs", &action.inputs)?;
        write_fields(output, 4, "outputs", &action.outputs)?;
    }
    writeln!(output)?;
    Ok(())
}

fn write_triggers(output: &mut String, triggers: &[TriggerDefinition]) -> Result<()> {
    if triggers.is_empty() {
        writeln!(output, "triggers: []")?;
        return Ok(());
    }

    writeln!(output, "triggers:")?;
    for trigger in triggers {
        writeln!(output, "  - id: {}", quote(&trigger.id))?;
        writeln!(output, "    name: {}", quote(&trigger.name))?;
        writeln!(output, "    description: {}", quote(&trigger.description))?;
        writeln!(output, "    trigger_type: {}", trigger.trigger_type)?;
        if !trigger.outputs.is_empty() {
            write_fields(output, 4, "outputs", &trigger.outputs)?;
        }
        if !trigger.config_fields.is_empty() {
            write_fields(output, 4, "config_fields", &trigger.config_fields)?;
        }
    }
    Ok(())
}

/// Write `key:` followed by one list item per field, at `indent` spaces
fn write_fields(
    output: &mut String,
    indent: usize,
    key: &str,
    fields: &[FieldDefinition],
) -> Result<()> {
    let pad = " ".repeat(indent);
    if fields.is_empty() {
        writeln!(output, "{pad}{key}: []")?;
        return Ok(());
    }

    writeln!(output, "{pad}{key}:")?;
    for field in fields {
        writeln!(output, "{pad}  - name: {}", quote(&field.name))?;
        writeln!(output, "{pad}    label: {}", quote(&field.label))?;
        writeln!(output, "{pad}    type: {}", field.field_type)?;
        writeln!(output, "{pad}    description: {}", quote(&field.description))?;
        writeln!(output, "{pad}    required: {}", field.required)?;
        if field.secret {
            writeln!(output, "{pad}    secret: true")?;
        }
        if let Some(ref placeholder) = field.placeholder {
            writeln!(output, "{pad}    placeholder: {}", quote(placeholder))?;
        }
        if let Some(ref default_value) = field.default_value {
            writeln!(output, "{pad}    default: {}", quote(default_value))?;
        }
    }
    Ok(())
}

fn write_string_list(output: &mut String, key: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        writeln!(output, "{key}: []")?;
        return Ok(());
    }

    writeln!(output, "{key}:")?;
    for value in values {
        writeln!(output, "  - {}", quote(value))?;
    }
    Ok(())
}

/// Double-quoted YAML scalar
///
/// ```
/// use provider_manifest_generator::quote;
///
/// assert_eq!(quote("say \"hi\""), r#""say \"hi\"""#);
/// assert_eq!(quote("two\nlines"), r#""two\nlines""#);
/// ```
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => {
                // Writing to a String cannot fail
                let _ = write!(quoted, "\\u{:04x}", c as u32);
            }
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

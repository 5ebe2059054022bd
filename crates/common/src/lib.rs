//! Common types and utilities for Provider Manifest
//!
//! This crate contains the manifest data model, naming helpers, the
//! manifest editor, built-in templates, validation, and the shared error
//! type used across the parser, generator, and CLI components.

mod editor;
mod manifest;
mod naming;
mod templates;
mod validate;

pub use editor::{apply_edit, apply_edits, ManifestEdit};
pub use manifest::{
    ActionDefinition, AuthType, FieldDefinition, FieldType, Protocol, ProviderManifest,
    TriggerDefinition, TriggerType,
};
pub use naming::{
    humanize_label, is_identifier_safe, normalize_field_name, sanitize_identifier, slugify,
    to_snake_case,
};
pub use templates::{builtin_templates, template, TemplateInfo};
pub use validate::{validate, ValidationIssue};

use thiserror::Error;

/// Errors that can occur while importing, editing, rendering or saving a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Please enter a URL to an OpenAPI/Swagger spec")]
    EmptyUrl,

    #[error("Failed to fetch spec: {status} {status_text}")]
    Fetch { status: u16, status_text: String },

    #[error("Failed to fetch spec: {0}")]
    Network(String),

    #[error("Invalid OpenAPI/Swagger spec: missing 'openapi' or 'swagger' version field")]
    InvalidSpec,

    #[error("Failed to parse spec as JSON: {0}")]
    InvalidJson(String),

    #[error("Failed to parse spec as YAML: {0}")]
    InvalidYaml(String),

    #[error("Duplicate {kind} '{name}'")]
    Duplicate { kind: &'static str, name: String },

    #[error("No {kind} named '{name}'")]
    NotFound { kind: &'static str, name: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Failed to save provider manifest: {0}")]
    Save(String),

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Failed to format output: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for manifest operations
pub type Result<T> = std::result::Result<T, ManifestError>;

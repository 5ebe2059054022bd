//! OpenAPI / Swagger import for provider manifests
//!
//! This crate turns an API description into the parts of a
//! `ProviderManifest` that can be derived from it (`ImportedManifest`).
//!
//! ## Import Strategy
//!
//! - The spec is fetched over HTTP (optionally authenticated) or read from disk
//! - JSON is tried first; YAML is accepted when the URL or content type says so
//! - OpenAPI 3.x and Swagger 2.0 are normalized into one shape
//! - Security schemes become auth fields, operations become actions:
//!   - GET → `get_*`, POST → `create_*`, PUT → `update_*`
//!   - PATCH → `patch_*`, DELETE → `delete_*`
//!
//! Importing never touches a manifest directly; callers commit the result
//! with `ImportedManifest::apply_to` once they are happy with it.

mod fetch;
mod importer;
pub mod openapi;
mod operation_mapper;
mod type_mapper;

pub use fetch::{FetchAuth, FetchedDocument, FileSpecSource, HttpSpecSource, SpecSource};
pub use importer::{import, import_from_file, import_from_str, import_from_url};
pub use openapi::{ImportedManifest, OpenApiParser, SpecEncoding};
pub use operation_mapper::{HttpMethod, OperationNamer};
pub use type_mapper::TypeMapper;

//! OpenAPI 3.x and Swagger 2.0 importer
//!
//! Parses an API description into the manifest fields an import can derive:
//! name, description, version, base URL, authentication and actions.
//!
//! ## Pipeline
//! 1. **Parse**: JSON (or YAML when the source hints it) into a `serde_json::Value`
//! 2. **Discriminate**: the `openapi` / `swagger` version field selects the dialect
//! 3. **Normalize**: both dialects collapse into one `NormalizedSpec`
//! 4. **Convert**: security schemes become auth fields, operations become actions
//!
//! ## Usage
//! ```rust,ignore
//! use provider_manifest_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("petstore.json")?;
//! let imported = parser.parse();
//! ```

mod converter;
mod normalize;
mod parser;
mod types;

pub use converter::{convert_to_manifest, ImportedManifest};
pub use normalize::{normalize, NormalizedBody, NormalizedOperation, NormalizedParameter, NormalizedSpec};
pub use parser::{OpenApiParser, SpecEncoding};
pub use types::*;

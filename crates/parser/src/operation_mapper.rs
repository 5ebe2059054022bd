//! HTTP method classification and action naming
//!
//! Maps `(path, method)` pairs to action ids and display names when an
//! operation does not declare its own `operationId` or `summary`.

use provider_manifest_common::sanitize_identifier;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// HTTP methods that produce actions, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 5] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    /// Verb used as the action id prefix
    pub fn keyword(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "create",
            HttpMethod::Put => "update",
            HttpMethod::Patch => "patch",
            HttpMethod::Delete => "delete",
        }
    }

    /// Verb used as the action name prefix
    pub fn title(&self) -> &'static str {
        match self {
            HttpMethod::Get => "Get",
            HttpMethod::Post => "Create",
            HttpMethod::Put => "Update",
            HttpMethod::Patch => "Patch",
            HttpMethod::Delete => "Delete",
        }
    }

    /// Safe-to-retry heuristic: GET, PUT and DELETE
    ///
    /// This follows HTTP method semantics, not anything the API declares.
    pub fn is_idempotent(&self) -> bool {
        matches!(self, HttpMethod::Get | HttpMethod::Put | HttpMethod::Delete)
    }

    /// Whether a request body contributes action inputs
    pub fn accepts_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derives action ids and names from operations
pub struct OperationNamer;

impl OperationNamer {
    /// Final action id: the declared operationId, else one derived from the
    /// path, restricted to `[a-z0-9_]`
    ///
    /// # Examples
    /// ```
    /// use provider_manifest_parser::{HttpMethod, OperationNamer};
    ///
    /// assert_eq!(
    ///     OperationNamer::action_id(None, "/api/v1/hosts/{id}", HttpMethod::Get),
    ///     "get_hosts_by_id"
    /// );
    /// assert_eq!(
    ///     OperationNamer::action_id(Some("listPets"), "/pets", HttpMethod::Get),
    ///     "listpets"
    /// );
    /// ```
    pub fn action_id(operation_id: Option<&str>, path: &str, method: HttpMethod) -> String {
        let raw = match operation_id.map(str::trim).filter(|id| !id.is_empty()) {
            Some(id) => id.to_string(),
            None => Self::derive_action_id(path, method),
        };
        sanitize_identifier(&raw)
    }

    /// Derive an action id from the path and method
    pub fn derive_action_id(path: &str, method: HttpMethod) -> String {
        let stripped = strip_api_prefix(path);
        let with_params = param_regex().replace_all(stripped, "by_$1");
        let underscored = separator_regex().replace_all(&with_params, "_");
        let body = underscored.trim_matches('_').to_lowercase();

        if body.is_empty() {
            method.keyword().to_string()
        } else {
            format!("{}_{}", method.keyword(), body)
        }
    }

    /// Action name: the declared summary, else `<Verb> <humanized path>`
    pub fn action_name(summary: Option<&str>, path: &str, method: HttpMethod) -> String {
        match summary.map(str::trim).filter(|s| !s.is_empty()) {
            Some(summary) => summary.to_string(),
            None => Self::derive_action_name(path, method),
        }
    }

    /// Humanize a path for display (`/users/{id}/posts` -> `Users by id posts`)
    pub fn derive_action_name(path: &str, method: HttpMethod) -> String {
        let stripped = strip_api_prefix(path);
        let with_params = param_regex().replace_all(stripped, " by $1 ");
        let spaced = with_params.replace(['/', '-', '_', '.'], " ");
        let words: Vec<&str> = spaced.split_whitespace().collect();

        if words.is_empty() {
            return method.title().to_string();
        }

        let mut humanized = words.join(" ");
        if let Some(first) = humanized.chars().next() {
            humanized = first.to_uppercase().chain(humanized.chars().skip(1)).collect();
        }
        format!("{} {}", method.title(), humanized)
    }
}

/// Strip a leading `/api/vN/` or `/api/` segment
fn strip_api_prefix(path: &str) -> &str {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    let prefix = PREFIX.get_or_init(|| Regex::new(r"^/api/(v\d+/)?").expect("valid regex"));
    match prefix.find(path) {
        Some(m) => &path[m.end()..],
        None => path,
    }
}

fn param_regex() -> &'static Regex {
    static PARAM: OnceLock<Regex> = OnceLock::new();
    PARAM.get_or_init(|| Regex::new(r"\{([^}/]+)\}").expect("valid regex"))
}

fn separator_regex() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| Regex::new(r"[/\-.]+").expect("valid regex"))
}

//! Type mapping from OpenAPI primitive types to manifest field types

use provider_manifest_common::FieldType;

/// Maps OpenAPI/Swagger `type` and `format` pairs to FieldType
pub struct TypeMapper;

impl TypeMapper {
    /// Map an OpenAPI type name (and optional format) to FieldType
    ///
    /// # Examples
    /// ```
    /// use provider_manifest_parser::TypeMapper;
    /// use provider_manifest_common::FieldType;
    ///
    /// assert_eq!(TypeMapper::map_type(Some("int64"), None), FieldType::Integer);
    /// assert_eq!(TypeMapper::map_type(Some("double"), None), FieldType::Number);
    /// assert_eq!(TypeMapper::map_type(None, None), FieldType::String);
    /// ```
    pub fn map_type(type_name: Option<&str>, format: Option<&str>) -> FieldType {
        match type_name.map(str::to_lowercase).as_deref() {
            Some("integer" | "int" | "int32" | "int64") => FieldType::Integer,
            Some("number" | "float" | "double") => FieldType::Number,
            Some("boolean" | "bool") => FieldType::Boolean,
            Some("array") => FieldType::Array,
            Some("object") => FieldType::Object,
            _ => Self::map_string_format(format),
        }
    }

    /// String formats that have a dedicated field type
    fn map_string_format(format: Option<&str>) -> FieldType {
        match format {
            Some("password") => FieldType::Password,
            Some("email") => FieldType::Email,
            Some("uri" | "url") => FieldType::Url,
            _ => FieldType::String,
        }
    }

    /// Check if a field name suggests it holds a credential
    pub fn is_sensitive(field_name: &str) -> bool {
        let lower = field_name.to_lowercase();
        lower.contains("password")
            || lower.contains("secret")
            || lower.contains("token")
            || lower.contains("credential")
            || lower.ends_with("api_key")
    }
}

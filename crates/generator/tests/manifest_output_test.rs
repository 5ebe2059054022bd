//! Integration tests for rendering, loading and exporting manifests

use provider_manifest_common::{
    apply_edits, builtin_templates, template, ActionDefinition, AuthType, FieldDefinition,
    FieldType, ManifestEdit, ProviderManifest, TriggerDefinition, TriggerType,
};
use provider_manifest_generator::{
    export_to_directory, load_manifest, load_manifest_file, render_manifest, write_manifest,
    ManifestGenerator,
};
use tempfile::TempDir;

fn full_manifest() -> ProviderManifest {
    let mut manifest = ProviderManifest::new("acme", "Acme \"Cloud\"");
    manifest.description = "Line one\nLine two: with colon\tand tab".to_string();
    manifest.icon_url = Some("https://acme.example/icon.png".to_string());
    manifest.categories = vec!["crm".to_string(), "sales & marketing".to_string()];
    manifest.tags = vec!["beta".to_string()];
    manifest.auth_type = AuthType::Custom;
    manifest.auth_fields = vec![
        FieldDefinition::new("tenant", "Tenant", FieldType::String)
            .with_placeholder("my-org")
            .required(true),
        FieldDefinition::new("token", "Token", FieldType::Password)
            .with_description("Path like C:\\keys\\acme")
            .secret(true),
    ];
    manifest.base_url = Some("https://api.acme.example".to_string());
    manifest.supports_webhooks = true;
    manifest.actions = vec![ActionDefinition {
        id: "create_contact".to_string(),
        name: "Create contact".to_string(),
        description: "Adds a \"contact\"".to_string(),
        category: Some("contacts".to_string()),
        is_idempotent: false,
        inputs: vec![
            FieldDefinition::new("email", "Email", FieldType::Email).required(true),
            FieldDefinition::new("score", "Score", FieldType::Number).with_default("0.5"),
        ],
        outputs: vec![FieldDefinition::new("response", "Response", FieldType::Object)],
    }];
    manifest.triggers = vec![TriggerDefinition {
        id: "contact_created".to_string(),
        name: "Contact created".to_string(),
        description: "Fires on new contacts".to_string(),
        trigger_type: TriggerType::Event,
        outputs: vec![FieldDefinition::new("contact", "Contact", FieldType::Object)],
        config_fields: vec![FieldDefinition::new("list_id", "List", FieldType::Select)],
    }];
    manifest
}

#[test]
fn test_round_trip_preserves_everything() {
    let manifest = full_manifest();
    let yaml = render_manifest(&manifest).unwrap();
    let loaded = load_manifest(&yaml).unwrap();
    assert_eq!(loaded, manifest);

    // Rendering the loaded copy is byte-identical
    assert_eq!(render_manifest(&loaded).unwrap(), yaml);
}

#[test]
fn test_free_text_is_escaped() {
    let yaml = render_manifest(&full_manifest()).unwrap();
    assert!(yaml.contains(r#"name: "Acme \"Cloud\"""#));
    assert!(yaml.contains(r#"description: "Line one\nLine two: with colon\tand tab""#));
    assert!(yaml.contains(r#"description: "Path like C:\\keys\\acme""#));
    assert!(yaml.contains("  - \"sales & marketing\"\n"));
}

#[test]
fn test_trigger_outputs_and_config_fields_survive() {
    let loaded = load_manifest(&render_manifest(&full_manifest()).unwrap()).unwrap();
    let trigger = loaded.trigger("contact_created").unwrap();
    assert_eq!(trigger.outputs.len(), 1);
    assert_eq!(trigger.config_fields[0].field_type, FieldType::Select);
}

#[test]
fn test_every_template_renders_and_loads() {
    for info in builtin_templates() {
        let manifest = template(info.name).unwrap();
        let loaded = load_manifest(&render_manifest(&manifest).unwrap()).unwrap();
        assert_eq!(loaded, manifest, "template {}", info.name);
    }
}

#[test]
fn test_edited_manifest_renders() {
    let manifest = apply_edits(
        &ProviderManifest::default(),
        vec![
            ManifestEdit::SetId("Slack Bot".to_string()),
            ManifestEdit::SetName("Slack Bot".to_string()),
            ManifestEdit::AddCategory("chat".to_string()),
        ],
    )
    .unwrap();

    let yaml = render_manifest(&manifest).unwrap();
    assert!(yaml.contains("id: \"slack-bot\"\n"));
    assert!(yaml.contains("categories:\n  - \"chat\"\n"));
}

#[test]
fn test_export_to_directory() {
    let temp_dir = TempDir::new().unwrap();
    let manifest = full_manifest();

    let path = export_to_directory(&manifest, temp_dir.path()).unwrap();
    assert_eq!(path, temp_dir.path().join("acme.yaml"));
    assert!(path.exists());

    let loaded = load_manifest_file(&path).unwrap();
    assert_eq!(loaded.id, "acme");
    assert_eq!(loaded.actions.len(), 1);
}

#[test]
fn test_write_manifest_creates_parent_dirs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("out").join("custom.yaml");

    write_manifest(&ProviderManifest::default(), &path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# Provider manifest\n"));
    assert!(content.contains("id: \"\"\n"));
}

#[test]
fn test_generator_uses_provider_yaml_without_id() {
    let temp_dir = TempDir::new().unwrap();
    let generator = ManifestGenerator::new(ProviderManifest::default());

    let path = generator.generate_to_directory(temp_dir.path()).unwrap();
    assert!(path.ends_with("provider.yaml"));
    assert!(!generator.issues().is_empty());
}

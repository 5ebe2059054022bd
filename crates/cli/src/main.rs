//! Provider Manifest CLI
//!
//! Command-line interface for building provider manifests from
//! OpenAPI/Swagger specs and built-in templates.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use provider_manifest_common::{
    apply_edit, builtin_templates, template, validate, ManifestEdit, ProviderManifest,
    ValidationIssue,
};
use provider_manifest_generator::{
    export_file_name, load_manifest_file, render_manifest, write_manifest, ManifestClient,
};
use provider_manifest_parser::{import_from_file, import_from_url, FetchAuth, ImportedManifest};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "provider-manifest")]
#[command(version, about = "Build provider manifests from OpenAPI/Swagger specs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an OpenAPI 3.x or Swagger 2.0 spec into a manifest
    #[command(after_help = "EXAMPLES:\n  \
        # Import a public spec\n  \
        provider-manifest import https://petstore3.swagger.io/api/v3/openapi.json\n\n  \
        # Import a protected spec with a bearer token\n  \
        provider-manifest import https://api.example.com/openapi.json \\\n    \
        --auth bearer --token $TOKEN\n\n  \
        # Refresh an existing manifest from a local file\n  \
        provider-manifest import ./openapi.yaml --merge acme.yaml --output acme.yaml")]
    Import {
        /// URL or local path of the spec
        source: String,

        /// How to authenticate the spec download
        #[arg(long, value_enum, default_value_t = AuthMode::None)]
        auth: AuthMode,

        /// Username for --auth basic
        #[arg(long)]
        username: Option<String>,

        /// Password for --auth basic
        #[arg(long, env = "PROVIDER_MANIFEST_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Token for --auth bearer
        #[arg(long, env = "PROVIDER_MANIFEST_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Header name for --auth api-key / custom-header
        #[arg(long)]
        header: Option<String>,

        /// Header value for --auth api-key / custom-header
        #[arg(long)]
        value: Option<String>,

        /// Override the manifest id
        #[arg(long)]
        id: Option<String>,

        /// Output file (defaults to <id>.yaml)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the manifest instead of writing a file
        #[arg(long)]
        stdout: bool,

        /// Existing manifest to update; its id, icon, protocol, labels and triggers are kept
        #[arg(long)]
        merge: Option<PathBuf>,
    },

    /// Start a manifest from a built-in template
    New {
        /// Template name (see `templates`)
        #[arg(short, long, default_value = "blank")]
        template: String,

        /// Manifest id
        #[arg(long)]
        id: Option<String>,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Output file (defaults to <id>.yaml)
        #[arg(short, long, conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the manifest instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// List built-in templates
    Templates,

    /// Check a manifest for problems
    Validate {
        /// Manifest YAML file
        manifest: PathBuf,
    },

    /// Load a manifest and print it in canonical form
    Render {
        /// Manifest YAML file
        manifest: PathBuf,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Save a manifest to a provider registry
    Publish {
        /// Manifest YAML file
        manifest: PathBuf,

        /// Registry base URL
        #[arg(
            long,
            env = "PROVIDER_MANIFEST_API_URL",
            default_value = "http://localhost:3000"
        )]
        api_url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AuthMode {
    None,
    Basic,
    Bearer,
    ApiKey,
    CustomHeader,
}

/// Credentials given on the command line, before they are checked
#[derive(Debug, Default)]
struct AuthArgs {
    username: Option<String>,
    password: Option<String>,
    token: Option<String>,
    header: Option<String>,
    value: Option<String>,
}

struct ImportConfig {
    source: String,
    auth: FetchAuth,
    id: Option<String>,
    output: Option<PathBuf>,
    stdout: bool,
    merge: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Import {
            source,
            auth,
            username,
            password,
            token,
            header,
            value,
            id,
            output,
            stdout,
            merge,
        } => {
            let auth = fetch_auth(
                auth,
                AuthArgs {
                    username,
                    password,
                    token,
                    header,
                    value,
                },
            )?;
            import_command(ImportConfig {
                source,
                auth,
                id,
                output,
                stdout,
                merge,
            })
            .await?;
        }
        Commands::New {
            template,
            id,
            name,
            output,
            stdout,
        } => {
            new_command(&template, id, name, output.as_deref(), stdout)?;
        }
        Commands::Templates => templates_command(),
        Commands::Validate { manifest } => validate_command(&manifest)?,
        Commands::Render { manifest, output } => render_command(&manifest, output.as_deref())?,
        Commands::Publish { manifest, api_url } => publish_command(&manifest, &api_url).await?,
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fetch_auth(mode: AuthMode, args: AuthArgs) -> Result<FetchAuth> {
    let auth = match mode {
        AuthMode::None => FetchAuth::None,
        AuthMode::Basic => FetchAuth::Basic {
            username: args.username.context("--auth basic requires --username")?,
            password: args.password.unwrap_or_default(),
        },
        AuthMode::Bearer => FetchAuth::Bearer {
            token: args.token.context("--auth bearer requires --token")?,
        },
        AuthMode::ApiKey => FetchAuth::ApiKey {
            header: args.header.unwrap_or_else(|| "X-API-Key".to_string()),
            value: args.value.context("--auth api-key requires --value")?,
        },
        AuthMode::CustomHeader => FetchAuth::CustomHeader {
            header: args
                .header
                .context("--auth custom-header requires --header")?,
            value: args.value.unwrap_or_default(),
        },
    };
    Ok(auth)
}

fn is_url(source: &str) -> bool {
    let lower = source.trim().to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

async fn import_command(config: ImportConfig) -> Result<()> {
    status(
        config.stdout,
        format!("{} Importing spec: {}", "→".cyan(), config.source),
    );

    let imported: ImportedManifest = if is_url(&config.source) {
        import_from_url(&config.source, config.auth)
            .await
            .context("Failed to import spec")?
    } else {
        if config.auth != FetchAuth::None {
            status(
                config.stdout,
                format!("{} --auth is ignored for local files", "⚠".yellow()),
            );
        }
        import_from_file(&config.source)
            .await
            .with_context(|| format!("Failed to import spec from {}", config.source))?
    };

    status(
        config.stdout,
        format!(
            "{} Found {} actions and {} auth fields ({})",
            "✓".green(),
            imported.actions.len(),
            imported.auth_fields.len(),
            imported.auth_type.to_string().yellow()
        ),
    );

    let base = match config.merge {
        Some(ref path) => load_manifest_file(path)
            .with_context(|| format!("Failed to load manifest {}", path.display()))?,
        None => ProviderManifest::default(),
    };

    let mut manifest = apply_edit(&base, ManifestEdit::Replace(imported.apply_to(&base)))?;
    if let Some(id) = config.id {
        manifest = apply_edit(&manifest, ManifestEdit::SetId(id))?;
    }

    report_issues(&validate(&manifest), config.stdout);
    emit(&manifest, config.output.as_deref(), config.stdout)
}

fn new_command(
    template_name: &str,
    id: Option<String>,
    name: Option<String>,
    output: Option<&Path>,
    stdout: bool,
) -> Result<()> {
    let Some(mut manifest) = template(template_name) else {
        let known: Vec<&str> = builtin_templates().iter().map(|t| t.name).collect();
        bail!(
            "Unknown template '{}' (available: {})",
            template_name,
            known.join(", ")
        );
    };

    if let Some(name) = name {
        if id.is_none() {
            manifest = apply_edit(&manifest, ManifestEdit::SetId(name.clone()))?;
        }
        manifest = apply_edit(&manifest, ManifestEdit::SetName(name))?;
    }
    if let Some(id) = id {
        manifest = apply_edit(&manifest, ManifestEdit::SetId(id))?;
    }

    status(
        stdout,
        format!("{} Created manifest from template {}", "✓".green(), template_name.yellow()),
    );
    emit(&manifest, output, stdout)
}

fn templates_command() {
    println!("{}", "Built-in templates:".bold());
    for info in builtin_templates() {
        println!("  • {:<16} {}", info.name.cyan(), info.summary);
    }
}

fn validate_command(path: &Path) -> Result<()> {
    let manifest = load_manifest_file(path)
        .with_context(|| format!("Failed to load manifest {}", path.display()))?;
    let issues = validate(&manifest);

    if issues.is_empty() {
        println!("{} {} is valid", "✓".green(), path.display());
        return Ok(());
    }

    report_issues(&issues, false);
    bail!("{} has {} problem(s)", path.display(), issues.len());
}

fn render_command(path: &Path, output: Option<&Path>) -> Result<()> {
    let manifest = load_manifest_file(path)
        .with_context(|| format!("Failed to load manifest {}", path.display()))?;

    match output {
        Some(output) => {
            write_manifest(&manifest, output).context("Failed to write manifest")?;
            println!("{} Wrote {}", "✓".green(), output.display());
        }
        None => print!("{}", render_manifest(&manifest)?),
    }
    Ok(())
}

async fn publish_command(path: &Path, api_url: &str) -> Result<()> {
    let manifest = load_manifest_file(path)
        .with_context(|| format!("Failed to load manifest {}", path.display()))?;

    let issues = validate(&manifest);
    if !issues.is_empty() {
        report_issues(&issues, false);
        bail!("Refusing to publish a manifest with {} problem(s)", issues.len());
    }

    println!("{} Publishing {} to {}", "→".cyan(), manifest.id.yellow(), api_url);
    ManifestClient::new(api_url)
        .save(&manifest)
        .await
        .context("Publish failed")?;
    println!("\n{}", "✓ Manifest saved!".green().bold());
    Ok(())
}

/// Write the rendered manifest to stdout, `output`, or `<id>.yaml`
fn emit(manifest: &ProviderManifest, output: Option<&Path>, stdout: bool) -> Result<()> {
    if stdout {
        print!("{}", render_manifest(manifest)?);
        return Ok(());
    }

    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(export_file_name(manifest)));
    write_manifest(manifest, &path).context("Failed to write manifest")?;

    println!("\n{}", "✓ Manifest written!".green().bold());
    println!("  📄 {}", path.display());
    println!("\n{}", "Next steps:".bold());
    println!("  1. Review the actions and auth fields in {}", path.display());
    println!("  2. Check it: provider-manifest validate {}", path.display());
    println!("  3. Publish it: provider-manifest publish {}", path.display());
    Ok(())
}

/// Progress line; goes to stderr when stdout carries the manifest
fn status(to_stderr: bool, line: String) {
    if to_stderr {
        eprintln!("{line}");
    } else {
        println!("{line}");
    }
}

fn report_issues(issues: &[ValidationIssue], to_stderr: bool) {
    for issue in issues {
        status(to_stderr, format!("{} {}", "⚠".yellow(), issue));
    }
}

use anyhow::{Context, Result};
use contentful_i18n_backend::{BackendModule, BackendOptions, ClientParams, ContentfulBackend, InitOptions, Services};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("contentful_i18n_backend=info".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let language = args.next().context("Usage: contentful-i18n-backend <language> [namespace]")?;
    let namespace = args.next().unwrap_or_else(|| "translation".to_string());

    let mut options = BackendOptions::new(ClientParams::from_env()?);
    options.content_type = std::env::var("CONTENT_TYPE").ok();
    options.entry_key_accessor = std::env::var("ENTRY_KEY_ACCESSOR").ok();
    options.entry_value_accessor = std::env::var("ENTRY_VALUE_ACCESSOR").ok();

    let mut backend = ContentfulBackend::new();
    backend.init(&Services, options, &InitOptions { debug: true })?;

    info!("Loading translations for {}/{}", language, namespace);
    let resources = backend.load(&language, &namespace).await?;

    println!(
        "{}",
        serde_json::to_string_pretty(&resources).context("Failed to serialize resources")?
    );
    info!("Loaded {} translations", resources.len());
    Ok(())
}

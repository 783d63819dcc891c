use std::env;
use std::fs;
use std::sync::Arc;

use cms_transfer_source::{
    BoxError, InMemoryInstance, InMemoryStreams, ProviderOptions, ProviderSettings, RawEntity,
    Schema, SourceProvider, create_local_source_provider,
};
use futures::stream::TryStreamExt;
use serde_json::{Map, json};
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}

fn demo_instance() -> InMemoryInstance {
    let entities = (1..=3)
        .map(|id| {
            let mut entity = Map::new();
            entity.insert("id".into(), json!(id));
            entity.insert("title".into(), json!(format!("Article {id}")));
            RawEntity::new("api::article.article", entity)
        })
        .collect();

    InMemoryInstance::new()
        .with_content_types(vec![Schema::content_type("api::article.article")])
        .with_components(vec![Schema::component("shared.seo")])
        .with_entities(entities)
}

async fn run() -> Result<(), BoxError> {
    // Optional JSON settings file as the first argument.
    let settings = match env::args().nth(1) {
        Some(path) => ProviderSettings::from_json_str(&fs::read_to_string(path)?)?,
        None => ProviderSettings::default(),
    };

    let instance = Arc::new(demo_instance());
    let factory = move || {
        let instance = Arc::clone(&instance);
        async move { Ok::<_, BoxError>(instance) }
    };

    let mut provider = create_local_source_provider(
        ProviderOptions::from_settings(settings, factory),
        InMemoryStreams::new(),
    );
    provider.bootstrap().await?;

    let schemas = provider.get_schemas()?;
    let entities: Vec<_> = provider.stream_entities()?.try_collect().await?;
    let links: Vec<_> = provider.stream_links()?.try_collect().await?;
    let configuration: Vec<_> = provider.stream_configuration()?.try_collect().await?;

    tracing::info!(
        schemas = schemas.len(),
        entities = entities.len(),
        links = links.len(),
        configuration = configuration.len(),
        "transfer drained"
    );
    println!("{}", serde_json::to_string_pretty(provider.results())?);

    provider.close().await?;
    Ok(())
}

fn main() {
    init_logging();
    if let Err(e) = run_blocking() {
        eprintln!("cms-source-demo error: {e}");
        std::process::exit(1);
    }
}

fn run_blocking() -> Result<(), BoxError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(run())
}

//! Tests for the provider's record streams and schema enumeration.

use std::sync::Arc;

use futures::stream::{StreamExt, TryStreamExt};
use serde_json::json;

use crate::error::StreamError;
use crate::instance::{InMemoryInstance, InMemoryStreams};
use crate::pipeline::{BoxStage, MapStage, RecordStream};
use crate::provider::{LocalSourceProvider, SourceProvider};
use crate::record::{ConfigurationEntry, Entity, Link, ModelType, RawEntity, Schema};
use crate::results::StageResult;
use crate::stage::TransferStage;
use crate::tests::support::{
    components, content_types, core_store, entity, factory_for, link, provider_for,
    sample_instance,
};
use crate::{ProviderOptions, SourceStreams};

#[tokio::test]
async fn entities_are_transformed_and_counted() {
    let instance = sample_instance();
    let mut provider = provider_for(&instance);
    provider.bootstrap().await.unwrap();

    let entities: Vec<Entity> = provider
        .stream_entities()
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(entities.len(), 3);
    assert_eq!(entities[0].type_uid, "api::article.article");
    assert_eq!(entities[0].id, json!(1));
    assert_eq!(entities[2].type_uid, "api::author.author");
    assert_eq!(entities[2].data.get("title"), Some(&json!("entry 1")));
    assert_eq!(
        provider.results().get(TransferStage::Entities),
        Some(StageResult { items: 3 })
    );
}

#[tokio::test]
async fn links_and_configuration_pass_through_unchanged() {
    let instance = Arc::new(
        InMemoryInstance::new()
            .with_links(vec![link(1, 2), link(3, 4)])
            .with_configuration(vec![
                core_store("plugin_upload"),
                core_store("strapi_content_types"),
            ]),
    );
    let mut provider = provider_for(&instance);
    provider.bootstrap().await.unwrap();

    let links: Vec<Link> = provider.stream_links().unwrap().try_collect().await.unwrap();
    let config: Vec<ConfigurationEntry> = provider
        .stream_configuration()
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(links, instance.links());
    assert_eq!(config, instance.configuration());
    assert_eq!(provider.results().items(TransferStage::Links), 2);
    assert_eq!(provider.results().items(TransferStage::Configuration), 2);
}

#[tokio::test]
async fn entity_count_reflects_raw_records_not_transform_output() {
    struct DroppingTransform;
    impl SourceStreams<InMemoryInstance> for DroppingTransform {
        fn entities(&self, instance: &Arc<InMemoryInstance>) -> RecordStream<RawEntity> {
            InMemoryStreams::new().entities(instance)
        }
        fn links(&self, instance: &Arc<InMemoryInstance>) -> RecordStream<Link> {
            InMemoryStreams::new().links(instance)
        }
        fn configuration(
            &self,
            instance: &Arc<InMemoryInstance>,
        ) -> RecordStream<ConfigurationEntry> {
            InMemoryStreams::new().configuration(instance)
        }
        fn entity_transform(&self) -> BoxStage<RawEntity, Entity> {
            // Collapses every record of a content type after the first.
            Box::new(crate::FnStage::new(|input: RecordStream<RawEntity>| {
                let mut seen = std::collections::HashSet::new();
                input
                    .try_filter(move |raw| {
                        futures::future::ready(seen.insert(raw.content_type.clone()))
                    })
                    .map_ok(Entity::from)
                    .boxed()
            }))
        }
    }

    let instance = sample_instance();
    let options = ProviderOptions::new(factory_for(&instance));
    let mut provider = LocalSourceProvider::new(options, DroppingTransform);
    provider.bootstrap().await.unwrap();

    let entities: Vec<Entity> = provider.stream_entities().unwrap().try_collect().await.unwrap();

    assert_eq!(entities.len(), 2);
    assert_eq!(provider.results().items(TransferStage::Entities), 3);
}

#[tokio::test]
async fn custom_entity_transform_replaces_default() {
    struct Uppercase;
    impl SourceStreams<InMemoryInstance> for Uppercase {
        fn entities(&self, instance: &Arc<InMemoryInstance>) -> RecordStream<RawEntity> {
            InMemoryStreams::new().entities(instance)
        }
        fn links(&self, instance: &Arc<InMemoryInstance>) -> RecordStream<Link> {
            InMemoryStreams::new().links(instance)
        }
        fn configuration(
            &self,
            instance: &Arc<InMemoryInstance>,
        ) -> RecordStream<ConfigurationEntry> {
            InMemoryStreams::new().configuration(instance)
        }
        fn entity_transform(&self) -> BoxStage<RawEntity, Entity> {
            Box::new(MapStage::new(|raw: RawEntity| {
                let mut entity = Entity::from(raw);
                entity.type_uid = entity.type_uid.to_uppercase();
                Ok(entity)
            }))
        }
    }

    let instance = sample_instance();
    let options = ProviderOptions::new(factory_for(&instance));
    let mut provider = LocalSourceProvider::new(options, Uppercase);
    provider.bootstrap().await.unwrap();

    let entities: Vec<Entity> = provider.stream_entities().unwrap().try_collect().await.unwrap();
    assert_eq!(entities[0].type_uid, "API::ARTICLE.ARTICLE");
}

#[tokio::test]
async fn producer_error_terminates_stream_and_keeps_partial_count() {
    let instance = sample_instance();
    let streams = InMemoryStreams::new().fail_after(TransferStage::Entities, 2);
    let options = ProviderOptions::new(factory_for(&instance));
    let mut provider = LocalSourceProvider::new(options, streams);
    provider.bootstrap().await.unwrap();

    let items: Vec<Result<Entity, StreamError>> =
        provider.stream_entities().unwrap().collect().await;

    assert_eq!(items.len(), 3);
    let err = items[2].as_ref().unwrap_err();
    assert_eq!(err.stage, TransferStage::Entities);
    assert_eq!(err.error.to_string(), "injected producer failure");
    assert_eq!(provider.results().items(TransferStage::Entities), 2);
}

#[tokio::test]
async fn link_records_after_an_error_are_neither_pulled_nor_counted() {
    let instance = Arc::new(InMemoryInstance::new().with_links(vec![
        link(1, 1),
        link(2, 1),
        link(3, 1),
    ]));
    // Producer yields [l1, error, l2, l3].
    let streams = InMemoryStreams::new().fail_and_resume(TransferStage::Links, 1);
    let options = ProviderOptions::new(factory_for(&instance));
    let mut provider = LocalSourceProvider::new(options, streams.clone());
    provider.bootstrap().await.unwrap();

    let items: Vec<Result<Link, StreamError>> = provider.stream_links().unwrap().collect().await;

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].as_ref().unwrap(), &link(1, 1));
    assert_eq!(items[1].as_ref().unwrap_err().stage, TransferStage::Links);
    assert_eq!(provider.results().items(TransferStage::Links), 1);
    assert_eq!(streams.pulled(), 2);
}

#[tokio::test]
async fn entity_records_after_an_error_are_neither_pulled_nor_counted() {
    let instance = sample_instance();
    let streams = InMemoryStreams::new().fail_and_resume(TransferStage::Entities, 2);
    let options = ProviderOptions::new(factory_for(&instance));
    let mut provider = LocalSourceProvider::new(options, streams.clone());
    provider.bootstrap().await.unwrap();

    let items: Vec<Result<Entity, StreamError>> =
        provider.stream_entities().unwrap().collect().await;

    assert_eq!(items.len(), 3);
    assert!(items[0].is_ok() && items[1].is_ok());
    assert!(items[2].is_err());
    assert_eq!(provider.results().items(TransferStage::Entities), 2);
    assert_eq!(streams.pulled(), 3);
}

#[tokio::test]
async fn get_schemas_lists_content_types_then_components() {
    let instance = Arc::new(
        InMemoryInstance::new()
            .with_content_types(content_types(2))
            .with_components(components(3)),
    );
    let mut provider = provider_for(&instance);
    provider.bootstrap().await.unwrap();

    let schemas = provider.get_schemas().unwrap();

    let kinds: Vec<ModelType> = schemas.iter().map(|s| s.model_type).collect();
    assert_eq!(
        kinds,
        vec![
            ModelType::ContentType,
            ModelType::ContentType,
            ModelType::Component,
            ModelType::Component,
            ModelType::Component,
        ]
    );
    assert_eq!(schemas[0].uid, "api::type-0.type-0");
    assert_eq!(schemas[2].uid, "shared.component-0");
    assert_eq!(provider.results().items(TransferStage::Schemas), 5);
}

#[tokio::test]
async fn get_schemas_overwrites_rather_than_accumulates() {
    let instance = sample_instance();
    let mut provider = provider_for(&instance);
    provider.bootstrap().await.unwrap();

    let first = provider.get_schemas().unwrap().len();
    let second = provider.get_schemas().unwrap().len();

    assert_eq!(first, 6);
    assert_eq!(second, 6);
    assert_eq!(provider.results().items(TransferStage::Schemas), 6);
}

#[tokio::test]
async fn stream_schemas_yields_same_sequence_and_sets_count_eagerly() {
    let instance = sample_instance();
    let mut provider = provider_for(&instance);
    provider.bootstrap().await.unwrap();

    let expected = provider.get_schemas().unwrap();
    provider.results().set(TransferStage::Schemas, 0);

    let stream = provider.stream_schemas().unwrap();
    // Count is recorded when the stream is created, not as it drains.
    assert_eq!(provider.results().items(TransferStage::Schemas), 6);

    let streamed: Vec<Schema> = stream.try_collect().await.unwrap();
    assert_eq!(streamed, expected);
    assert_eq!(provider.results().items(TransferStage::Schemas), 6);
}

#[tokio::test]
async fn empty_instance_produces_no_stream_entries() {
    let instance = Arc::new(InMemoryInstance::new());
    let mut provider = provider_for(&instance);
    provider.bootstrap().await.unwrap();

    let entities: Vec<Entity> = provider.stream_entities().unwrap().try_collect().await.unwrap();
    let links: Vec<Link> = provider.stream_links().unwrap().try_collect().await.unwrap();

    assert!(entities.is_empty() && links.is_empty());
    assert!(provider.results().is_empty());

    // Schemas are recorded even when there are none.
    assert!(provider.get_schemas().unwrap().is_empty());
    assert_eq!(
        provider.results().get(TransferStage::Schemas),
        Some(StageResult { items: 0 })
    );
}

#[tokio::test]
async fn streams_outlive_provider_borrow_and_drain_concurrently() {
    let instance = Arc::new(
        InMemoryInstance::new()
            .with_entities((1..=50).map(|i| entity("api::article.article", i)).collect())
            .with_links((1..=30).map(|i| link(i, i)).collect()),
    );
    let mut provider = provider_for(&instance);
    provider.bootstrap().await.unwrap();

    let entities = provider.stream_entities().unwrap();
    let links = provider.stream_links().unwrap();

    let entities_task = tokio::spawn(async move { entities.try_collect::<Vec<Entity>>().await });
    let links_task = tokio::spawn(async move { links.try_collect::<Vec<Link>>().await });

    let entities = entities_task.await.unwrap().unwrap();
    let links = links_task.await.unwrap().unwrap();

    let ids: Vec<i64> = entities.iter().map(|e| e.id.as_i64().unwrap()).collect();
    assert_eq!(ids, (1..=50).collect::<Vec<i64>>());
    assert_eq!(links.len(), 30);
    assert_eq!(provider.results().items(TransferStage::Entities), 50);
    assert_eq!(provider.results().items(TransferStage::Links), 30);
}

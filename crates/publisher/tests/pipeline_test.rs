//! End-to-end pipeline tests against the in-memory collaborators.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use ssm_publish::{Error, ParameterValue, PublisherBuilder, RawParameter};
use ssm_store::{
    InMemoryParameterStore, InMemoryStackOutputs, ParameterType, RemoteParameter, StackOutput,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn declarations() -> Vec<RawParameter> {
    let mut hosts = RawParameter::literal(
        "/app/hosts",
        ParameterValue::List(vec!["a.example.com".to_string(), "b.example.com".to_string()]),
    );
    hosts.kind = Some(ParameterType::StringList);
    hosts.secure = Some(ssm_publish::Toggle::Bool(false));

    vec![
        RawParameter::literal("/app/token", "s3cret"),
        RawParameter::sourced("/app/url", "ApiUrl"),
        hosts,
    ]
}

fn stack_outputs() -> Arc<InMemoryStackOutputs> {
    InMemoryStackOutputs::with_outputs(vec![StackOutput {
        key: "ApiUrl".to_string(),
        value: "https://api.example.com".to_string(),
        description: Some("Service endpoint".to_string()),
    }])
}

#[tokio::test]
async fn first_run_creates_everything() {
    init_tracing();
    let memory = InMemoryParameterStore::new_arc();
    let publisher = PublisherBuilder::new()
        .with_store(memory.clone())
        .with_outputs(stack_outputs())
        .build()
        .unwrap();

    let summary = publisher.run(declarations()).await.unwrap();

    assert!(summary.all_succeeded());
    assert_eq!(summary.created.len(), 3);
    assert!(summary.updated.is_empty());
    assert!(summary.unchanged.is_empty());

    let token = memory.get("/app/token").await.unwrap();
    assert_eq!(token.kind, ParameterType::SecureString);

    let url = memory.get("/app/url").await.unwrap();
    assert_eq!(url.value, "https://api.example.com");

    let hosts = memory.get("/app/hosts").await.unwrap();
    assert_eq!(hosts.value, "a.example.com,b.example.com");
    assert_eq!(hosts.kind, ParameterType::StringList);
}

#[tokio::test]
async fn second_run_is_idempotent() {
    let memory = InMemoryParameterStore::new_arc();
    let publisher = PublisherBuilder::new()
        .with_store(memory.clone())
        .with_outputs(stack_outputs())
        .build()
        .unwrap();

    publisher.run(declarations()).await.unwrap();
    let second = publisher.run(declarations()).await.unwrap();

    assert!(second.all_succeeded());
    assert!(second.created.is_empty());
    assert!(second.updated.is_empty());
    assert_eq!(second.unchanged.len(), 3);

    // No write happened, so versions stay at 1.
    let token = memory.get("/app/token").await.unwrap();
    assert_eq!(token.value, "s3cret");
}

#[tokio::test]
async fn changed_remote_value_is_updated_only() {
    let memory = InMemoryParameterStore::new_arc();
    memory
        .seed(RemoteParameter {
            name: "/app/token".to_string(),
            value: "stale".to_string(),
            kind: ParameterType::SecureString,
        })
        .await;

    let publisher = PublisherBuilder::new()
        .with_store(memory.clone())
        .with_outputs(stack_outputs())
        .build()
        .unwrap();

    let summary = publisher.run(declarations()).await.unwrap();

    assert_eq!(summary.updated, vec!["/app/token".to_string()]);
    assert_eq!(summary.created.len(), 2);
    assert_eq!(memory.get("/app/token").await.unwrap().value, "s3cret");
}

#[tokio::test]
async fn write_failure_is_isolated_and_reported() {
    let memory = InMemoryParameterStore::new_arc();
    memory.fail_puts_for("/app/url").await;

    let publisher = PublisherBuilder::new()
        .with_store(memory.clone())
        .with_outputs(stack_outputs())
        .build()
        .unwrap();

    let summary = publisher.run(declarations()).await.unwrap();

    assert!(!summary.all_succeeded());
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].path, "/app/url");

    // Sibling writes landed despite the failure.
    assert!(memory.get("/app/token").await.is_some());
    assert!(memory.get("/app/hosts").await.is_some());
    assert!(memory.get("/app/url").await.is_none());

    // Every declaration is accounted for exactly once.
    let total = summary.created.len()
        + summary.updated.len()
        + summary.unchanged.len()
        + summary.failed.len();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn unresolved_source_halts_before_any_write() {
    let memory = InMemoryParameterStore::new_arc();
    let publisher = PublisherBuilder::new()
        .with_store(memory.clone())
        .build()
        .unwrap();

    let err = publisher.run(declarations()).await.unwrap_err();
    assert!(matches!(err, Error::UnresolvedSource { .. }));
    assert!(memory.is_empty().await);
}

#[tokio::test]
async fn validation_failure_halts_before_any_write() {
    let memory = InMemoryParameterStore::new_arc();
    let publisher = PublisherBuilder::new()
        .with_store(memory.clone())
        .build()
        .unwrap();

    let mut raw = declarations();
    raw.push(RawParameter::literal("aws/forbidden", "v"));

    let err = publisher.run(raw).await.unwrap_err();
    assert!(matches!(err, Error::InvalidName { .. }));
    assert!(memory.is_empty().await);
}

#[tokio::test]
async fn many_params_cross_the_batch_limit() {
    let memory = InMemoryParameterStore::new_arc();
    let publisher = PublisherBuilder::new()
        .with_store(memory.clone())
        .build()
        .unwrap();

    let raw: Vec<RawParameter> = (0..27)
        .map(|i| RawParameter::literal(format!("/bulk/{i}"), format!("v{i}")))
        .collect();

    let summary = publisher.run(raw.clone()).await.unwrap();
    assert!(summary.all_succeeded());
    assert_eq!(summary.created.len(), 27);
    assert_eq!(memory.len().await, 27);

    // Second run sees them all through the chunked fetch.
    let second = publisher.run(raw).await.unwrap();
    assert_eq!(second.unchanged.len(), 27);
}

#[tokio::test]
async fn empty_string_list_stays_unchanged_on_second_run() {
    let memory = InMemoryParameterStore::new_arc();
    let publisher = PublisherBuilder::new()
        .with_store(memory.clone())
        .build()
        .unwrap();

    let mut empty = RawParameter::literal("/app/empty", ParameterValue::List(vec![]));
    empty.kind = Some(ParameterType::StringList);
    empty.secure = Some(ssm_publish::Toggle::Bool(false));
    let raw = vec![empty];

    let first = publisher.run(raw.clone()).await.unwrap();
    assert_eq!(first.created, vec!["/app/empty".to_string()]);

    let second = publisher.run(raw).await.unwrap();
    assert!(second.updated.is_empty());
    assert_eq!(second.unchanged, vec!["/app/empty".to_string()]);
}

#[tokio::test]
async fn empty_declaration_list_is_fatal() {
    let publisher = PublisherBuilder::new()
        .with_store(InMemoryParameterStore::new_arc())
        .build()
        .unwrap();

    let err = publisher.run(vec![]).await.unwrap_err();
    assert_eq!(err.to_string(), "No params defined");
}

//! Behaviour of the moka-backed cache storage.

use bytes::Bytes;
use http::{HeaderValue, Method, header};
use swcache_backend::{BackendError, CacheStorage, DeleteStatus, Partition};
use swcache_core::{Request, Response};
use swcache_moka::MokaStorage;
use url::Url;

fn get(url: &str) -> Request {
    Request::get(url).unwrap()
}

#[tokio::test]
async fn partitions_are_created_lazily_on_open() {
    let storage = MokaStorage::builder().unbounded().build();

    assert!(storage.keys().await.unwrap().is_empty());
    assert!(!storage.has("core-v1").await.unwrap());

    storage.open("pages-v1").await.unwrap();
    storage.open("core-v1").await.unwrap();
    storage.open("core-v1").await.unwrap();

    assert!(storage.has("core-v1").await.unwrap());
    let names: Vec<String> = storage
        .keys()
        .await
        .unwrap()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["core-v1", "pages-v1"]);
}

#[tokio::test]
async fn reopened_partition_sees_earlier_writes() {
    let storage = MokaStorage::builder().unbounded().build();
    let request = get("https://example.com/app.css");

    let first = storage.open("core-v1").await.unwrap();
    first
        .put(&request, Response::ok_with_body("body { }"))
        .await
        .unwrap();

    let second = storage.open("core-v1").await.unwrap();
    let cached = second.match_request(&request).await.unwrap().unwrap();
    assert_eq!(cached.body(), &Bytes::from_static(b"body { }"));
}

#[tokio::test]
async fn last_writer_wins() {
    let storage = MokaStorage::builder().unbounded().build();
    let partition = storage.open("pages-v1").await.unwrap();
    let request = get("https://example.com/");

    partition
        .put(&request, Response::ok_with_body("old"))
        .await
        .unwrap();
    partition
        .put(&request, Response::ok_with_body("new"))
        .await
        .unwrap();

    let cached = partition.match_request(&request).await.unwrap().unwrap();
    assert_eq!(cached.body(), &Bytes::from_static(b"new"));
    assert_eq!(partition.len().await.unwrap(), 1);
}

#[tokio::test]
async fn fragments_do_not_split_entries() {
    let storage = MokaStorage::builder().unbounded().build();
    let partition = storage.open("pages-v1").await.unwrap();

    partition
        .put(&get("https://example.com/archive.html#today"), Response::ok_with_body("a"))
        .await
        .unwrap();

    assert!(partition
        .match_request(&get("https://example.com/archive.html"))
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn only_get_requests_can_be_stored() {
    let storage = MokaStorage::builder().unbounded().build();
    let partition = storage.open("core-v1").await.unwrap();
    let post = Request::new(Method::POST, Url::parse("https://example.com/api").unwrap());

    let result = partition.put(&post, Response::ok_with_body("")).await;

    assert!(matches!(result, Err(BackendError::UnsupportedMethod(m)) if m == Method::POST));
    assert!(partition.is_empty().await.unwrap());
}

#[tokio::test]
async fn vary_headers_are_honoured() {
    let storage = MokaStorage::builder().unbounded().build();
    let partition = storage.open("pages-v1").await.unwrap();
    let html = get("https://example.com/")
        .with_header(header::ACCEPT, HeaderValue::from_static("text/html"));
    let json = get("https://example.com/")
        .with_header(header::ACCEPT, HeaderValue::from_static("application/json"));

    let response = Response::ok_with_body("<html>")
        .with_header(header::VARY, HeaderValue::from_static("Accept"));
    partition.put(&html, response).await.unwrap();

    assert!(partition.match_request(&html).await.unwrap().is_some());
    assert!(partition.match_request(&json).await.unwrap().is_none());
}

#[tokio::test]
async fn deleting_a_partition_drops_it_and_its_entries() {
    let storage = MokaStorage::builder().unbounded().build();
    let request = get("https://example.com/logo.png");
    let partition = storage.open("core-v1").await.unwrap();
    partition
        .put(&request, Response::ok_with_body("png"))
        .await
        .unwrap();

    assert_eq!(storage.delete("core-v1").await.unwrap(), DeleteStatus::Deleted(1));
    assert_eq!(storage.delete("core-v1").await.unwrap(), DeleteStatus::Missing);
    assert!(!storage.has("core-v1").await.unwrap());

    let reopened = storage.open("core-v1").await.unwrap();
    assert!(reopened.match_request(&request).await.unwrap().is_none());
}

#[tokio::test]
async fn entry_capacity_bounds_each_partition() {
    let storage = MokaStorage::builder()
        .max_entries(2)
        .eviction_policy(swcache_moka::EvictionPolicy::lru())
        .build();
    let partition = storage.open("core-v1").await.unwrap();

    for i in 0..5 {
        let request = get(&format!("https://example.com/{i}.js"));
        partition
            .put(&request, Response::ok_with_body("js"))
            .await
            .unwrap();
    }

    assert_eq!(partition.len().await.unwrap(), 2);
}

#[tokio::test]
async fn entry_delete_reports_status() {
    let storage = MokaStorage::builder().unbounded().build();
    let partition = storage.open("core-v1").await.unwrap();
    let request = get("https://example.com/manifest.json");
    partition
        .put(&request, Response::ok_with_body("{}"))
        .await
        .unwrap();

    assert_eq!(partition.delete(&request).await.unwrap(), DeleteStatus::Deleted(1));
    assert_eq!(partition.delete(&request).await.unwrap(), DeleteStatus::Missing);
}

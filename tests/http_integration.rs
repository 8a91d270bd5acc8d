//! Integration tests for the HTTP backend and the store on top of it.
//!
//! A wiremock server stands in for the git-log API so request bodies and
//! error mapping are checked on the wire.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gitscope::backend::{Backend, BackendError, GitLogRequest, HttpBackend, RepoInfoRequest};
use gitscope::core::types::RepoConfig;
use gitscope::store::{RepoStore, StoreError};

fn log_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "commits": [
                {
                    "hash": "b2",
                    "author": "Bob",
                    "email": "bob@example.com",
                    "time": "2024-03-02T08:00:00Z",
                    "message": "Fix parser",
                    "insertions": 10,
                    "deletions": 2,
                    "graph": "*"
                },
                {
                    "hash": "",
                    "author": "",
                    "time": "",
                    "message": "",
                    "graph": "|\\",
                    "is_graph_only": true
                },
                {
                    "hash": "a1",
                    "author": "Alice",
                    "time": "2024-03-01 17:45:00 +0000",
                    "message": "Initial commit",
                    "refs": "tag: v0.1"
                }
            ],
            "stats": {
                "total_commits": 2,
                "total_authors": 2,
                "date_range": { "start": "2024-03-01", "end": "2024-03-02" },
                "top_authors": [
                    { "author": "Alice", "commits": 1 },
                    { "author": "Bob", "commits": 1 }
                ]
            }
        }
    })
}

fn info_body() -> serde_json::Value {
    json!({
        "success": true,
        "data": {
            "name": "demo",
            "path": "/repo",
            "current_branch": "main",
            "total_branches": 3,
            "remote_url": "https://example.com/demo.git"
        }
    })
}

fn api_base(server: &MockServer) -> String {
    format!("{}/api", server.uri())
}

fn store_for(server: &MockServer) -> RepoStore {
    RepoStore::new(Arc::new(HttpBackend::with_api_base(api_base(server))))
}

/// Base URL nothing listens on.
const DEAD_API_BASE: &str = "http://127.0.0.1:1/api";

mod backend {
    use super::*;

    #[tokio::test]
    async fn git_log_decodes_commits_and_stats() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .respond_with(ResponseTemplate::new(200).set_body_json(log_body()))
            .mount(&server)
            .await;

        let backend = HttpBackend::with_api_base(api_base(&server));
        let log = backend
            .git_log(GitLogRequest {
                repo_path: "/repo".to_string(),
                max_count: None,
            })
            .await
            .unwrap();

        assert_eq!(log.commits.len(), 3);
        assert_eq!(log.commits[0].insertions, Some(10));
        assert!(!log.commits[1].is_real());
        assert_eq!(log.stats.unwrap().top_authors.len(), 2);
    }

    #[tokio::test]
    async fn git_log_decodes_statistics_author_counts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": {
                    "commits": [],
                    "statistics": {
                        "total_commits": 2,
                        "total_lines": 3,
                        "authors": [{ "name": "Alice", "count": 2 }],
                        "branches": ["main"]
                    }
                }
            })))
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.set_repo_config(RepoConfig::new("/repo", 0));
        store.fetch_git_log().await.unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total_commits, 2);
        assert_eq!(stats.total_authors, 1);
        assert_eq!(stats.top_authors[0].author, "Alice");
        assert_eq!(stats.top_authors[0].commits, 2);
    }

    #[tokio::test]
    async fn rejection_with_error_status_keeps_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/repository-info"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "success": false, "error": "invalid repository path" })),
            )
            .mount(&server)
            .await;

        let backend = HttpBackend::with_api_base(api_base(&server));
        let result = backend
            .repository_info(RepoInfoRequest {
                repo_path: "".to_string(),
            })
            .await;

        assert_eq!(
            result,
            Err(BackendError::Rejected {
                message: Some("invalid repository path".to_string())
            })
        );
    }

    #[tokio::test]
    async fn bare_error_status_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let backend = HttpBackend::with_api_base(api_base(&server));
        let result = backend
            .git_log(GitLogRequest {
                repo_path: "/repo".to_string(),
                max_count: None,
            })
            .await;

        assert_eq!(result, Err(BackendError::Status(502)));
    }

    #[tokio::test]
    async fn error_status_without_error_field_maps_to_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/repository-info"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "success": false })))
            .mount(&server)
            .await;

        let backend = HttpBackend::with_api_base(api_base(&server));
        let log = backend
            .git_log(GitLogRequest {
                repo_path: "/repo".to_string(),
                max_count: None,
            })
            .await;
        let info = backend
            .repository_info(RepoInfoRequest {
                repo_path: "/repo".to_string(),
            })
            .await;

        assert_eq!(log, Err(BackendError::Status(404)));
        assert_eq!(info, Err(BackendError::Status(500)));
    }

    #[tokio::test]
    async fn garbage_success_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let backend = HttpBackend::with_api_base(api_base(&server));
        let result = backend
            .git_log(GitLogRequest {
                repo_path: "/repo".to_string(),
                max_count: None,
            })
            .await;

        assert!(matches!(result, Err(BackendError::Decode(_))));
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        let backend = HttpBackend::with_api_base(DEAD_API_BASE);
        let result = backend.health().await;

        assert!(matches!(result, Err(BackendError::Network(_))));
    }

    #[tokio::test]
    async fn health_decodes_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "healthy", "message": "running" })),
            )
            .mount(&server)
            .await;

        let backend = HttpBackend::with_api_base(api_base(&server));
        let health = backend.health().await.unwrap();

        assert!(health.is_healthy());
        assert_eq!(health.message.as_deref(), Some("running"));
    }
}

mod store {
    use super::*;

    #[tokio::test]
    async fn unbounded_config_omits_max_count() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .and(body_json(json!({ "repo_path": "/repo" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(log_body()))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.set_repo_config(RepoConfig::new("/repo", 0));
        store.fetch_git_log().await.unwrap();

        assert!(store.has_data());
    }

    #[tokio::test]
    async fn bounded_config_sends_max_count() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .and(body_json(json!({ "repo_path": "/repo", "max_count": 50 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(log_body()))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.set_repo_config(RepoConfig::new("/repo", 50));
        store.fetch_git_log().await.unwrap();

        assert_eq!(store.commits().len(), 3);
    }

    #[tokio::test]
    async fn bad_path_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": false, "error": "bad path" })),
            )
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.set_repo_config(RepoConfig::new("/missing", 0));
        let result = store.fetch_git_log().await;

        assert_eq!(result, Err(StoreError::Server("bad path".to_string())));
        assert_eq!(result.unwrap_err().to_string(), "bad path");
        assert_eq!(store.error().as_deref(), Some("bad path"));
        assert!(!store.is_loading());
        assert!(store.commits().is_empty());
    }

    #[tokio::test]
    async fn not_found_is_reported_as_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.set_repo_config(RepoConfig::new("/repo", 0));
        let result = store.fetch_git_log().await;

        assert_eq!(
            result,
            Err(StoreError::Transport("HTTP status 404".to_string()))
        );
        assert_eq!(store.error().as_deref(), Some("HTTP status 404"));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn loading_is_set_while_request_is_in_flight() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(log_body())
                    .set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.set_repo_config(RepoConfig::new("/repo", 0));
        assert!(!store.is_loading());

        let (result, mid_flight) = tokio::join!(store.fetch_git_log(), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            (store.is_loading(), store.error())
        });

        result.unwrap();
        assert_eq!(mid_flight, (true, None));
        assert!(!store.is_loading());
        assert!(store.has_data());
    }

    #[tokio::test]
    async fn dropped_fetch_clears_loading() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(log_body())
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.set_repo_config(RepoConfig::new("/repo", 0));

        let outcome = tokio::time::timeout(Duration::from_millis(100), store.fetch_git_log()).await;

        assert!(outcome.is_err());
        assert!(!store.is_loading());
        assert!(store.error().is_none());
        assert!(store.commits().is_empty());
    }

    #[tokio::test]
    async fn load_data_fetches_concurrently() {
        let delay = Duration::from_millis(400);
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(log_body())
                    .set_delay(delay),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/repository-info"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(info_body())
                    .set_delay(delay),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.set_repo_config(RepoConfig::new("/repo", 0));

        let started = Instant::now();
        store.load_data().await.unwrap();
        let elapsed = started.elapsed();

        assert!(elapsed >= delay);
        assert!(elapsed < delay * 2, "fetches ran back to back: {:?}", elapsed);
        assert!(store.has_data());
        assert!(store.repo_info().is_some());
    }

    #[tokio::test]
    async fn repo_info_transport_error_is_swallowed() {
        let store = RepoStore::new(Arc::new(HttpBackend::with_api_base(DEAD_API_BASE)));
        store.set_repo_config(RepoConfig::new("/repo", 0));

        assert!(store.fetch_repo_info().await.is_ok());
        assert!(store.repo_info().is_none());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn load_data_succeeds_when_repo_info_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .respond_with(ResponseTemplate::new(200).set_body_json(log_body()))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/repository-info"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({ "success": false, "error": "git not found" })),
            )
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.set_repo_config(RepoConfig::new("/repo", 0));

        store.load_data().await.unwrap();

        assert!(store.has_data());
        assert!(store.repo_info().is_none());
        assert!(store.error().is_none());
    }

    #[tokio::test]
    async fn load_data_populates_everything() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/git-log"))
            .respond_with(ResponseTemplate::new(200).set_body_json(log_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/repository-info"))
            .and(body_json(json!({ "repo_path": "/repo" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(info_body()))
            .expect(1)
            .mount(&server)
            .await;

        let store = store_for(&server);
        store.set_repo_config(RepoConfig::new("/repo", 0));
        store.load_data().await.unwrap();

        let info = store.repo_info().unwrap();
        assert_eq!(info.current_branch, "main");
        assert_eq!(info.remote_url.as_deref(), Some("https://example.com/demo.git"));

        assert_eq!(store.author_list(), vec!["Bob", "Alice"]);
        let by_date = store.commits_by_date();
        assert_eq!(by_date.len(), 2);
        assert_eq!(by_date["2024-03-01"][0].hash, "a1");
        let range = store.time_range().unwrap();
        assert_eq!(range.start.to_rfc3339(), "2024-03-01T17:45:00+00:00");
        assert_eq!(range.end.to_rfc3339(), "2024-03-02T08:00:00+00:00");
    }

    #[tokio::test]
    async fn check_health_variants() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
            .mount(&server)
            .await;

        let up = store_for(&server);
        let down = RepoStore::new(Arc::new(HttpBackend::with_api_base(DEAD_API_BASE)));

        assert!(up.check_health().await);
        assert!(!down.check_health().await);
    }
}

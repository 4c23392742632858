//! Integration tests for remote-mode loading using wiremock
//!
//! These tests verify fetch ordering, fail-fast batches and the full load
//! pipeline against mocked content hosts.

use rek_loader::config::Config;
use rek_loader::images::ImageCache;
use rek_loader::loader::ViewModelLoader;
use rek_loader::net::error::{classify, LoadErrorKind};
use rek_loader::resource::{FetcherConfig, Payload, PayloadKind, ResourceDef, ResourceFetcher};
use rek_loader::templates::HandlebarsRegistry;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEMPLATE: &str =
    r#"{{#each fields}}<h3>{{value}}</h3>{{#if image}}<img data-remotesrc="{{image}}">{{/if}}{{/each}}"#;

fn remote_fetcher(host: &str) -> ResourceFetcher {
    ResourceFetcher::new(FetcherConfig {
        local_mode: false,
        dev_resources_dir: "unused".into(),
        host: host.to_string(),
    })
    .expect("Fetcher should build")
}

/// Test module for resource fetcher tests
mod fetcher_tests {
    use super::*;

    /// Results keep input order even when later resources answer first
    #[tokio::test]
    async fn test_batch_preserves_input_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"lang": "slow"}))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/fast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"lang": "fast"})))
            .mount(&server)
            .await;

        let fetcher = remote_fetcher(&server.uri());
        let loaded = fetcher
            .load_resources(
                &[
                    ResourceDef::new("slow", "/api/slow", "slow.json"),
                    ResourceDef::new("fast", "/api/fast", "fast.json"),
                ],
                PayloadKind::Json,
            )
            .await
            .expect("Batch should succeed");

        assert_eq!(loaded[0].name, "slow");
        assert_eq!(loaded[0].data, Payload::Json(json!({"lang": "slow"})));
        assert_eq!(loaded[1].name, "fast");
    }

    /// Text payloads are returned unparsed
    #[tokio::test]
    async fn test_text_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/templates/en.hbs"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<p>{{value}}</p>"))
            .mount(&server)
            .await;

        let fetcher = remote_fetcher(&server.uri());
        let loaded = fetcher
            .load_resources(
                &[ResourceDef::new("en", "/templates/en.hbs", "en.hbs")],
                PayloadKind::Text,
            )
            .await
            .expect("Batch should succeed");

        assert_eq!(loaded[0].data.as_text(), Some("<p>{{value}}</p>"));
    }

    /// One failing resource fails the whole batch
    #[tokio::test]
    async fn test_one_failure_fails_batch() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/sv"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = remote_fetcher(&server.uri());
        let err = fetcher
            .load_resources(
                &[
                    ResourceDef::new("en", "/api/en", "en.json"),
                    ResourceDef::new("sv", "/api/sv", "sv.json"),
                ],
                PayloadKind::Json,
            )
            .await
            .expect_err("Batch should fail");

        assert_eq!(classify(&err), LoadErrorKind::Generic);
    }

    /// Invalid JSON is an error in JSON mode
    #[tokio::test]
    async fn test_invalid_json_fails() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/en"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let fetcher = remote_fetcher(&server.uri());
        let result = fetcher
            .load_resources(&[ResourceDef::new("en", "/api/en", "en.json")], PayloadKind::Json)
            .await;

        assert!(result.is_err());
    }

    /// An unreachable host is classified as no network
    #[tokio::test]
    async fn test_unreachable_host_is_no_network() {
        let fetcher = remote_fetcher("http://127.0.0.1:1");
        let err = fetcher
            .load_resources(&[ResourceDef::new("en", "/api/en", "en.json")], PayloadKind::Json)
            .await
            .expect_err("Connection should be refused");

        assert_eq!(classify(&err), LoadErrorKind::NoNetwork);
    }
}

/// Test module for the full load pipeline
mod pipeline_tests {
    use super::*;

    async fn mount_content(server: &MockServer) {
        for lang in ["en", "sv"] {
            Mock::given(method("GET"))
                .and(path(format!("/templates/{lang}.hbs")))
                .respond_with(ResponseTemplate::new(200).set_body_string(TEMPLATE))
                .mount(server)
                .await;
        }

        Mock::given(method("GET"))
            .and(path("/api/en"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"title": "Food", "fields": [
                    {"value": "Pizza", "image": "/img/a.png"},
                    {"value": ""}
                ]}
            ])))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/sv"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"title": "Food", "fields": [{"value": "Pizza"}]}
            ])))
            .mount(server)
            .await;
    }

    fn defs() -> (Vec<ResourceDef>, Vec<ResourceDef>, Vec<ResourceDef>) {
        (
            vec![
                ResourceDef::new("en", "/api/en", "en.json"),
                ResourceDef::new("sv", "/api/sv", "sv.json"),
            ],
            vec![
                ResourceDef::new("en", "/templates/en.hbs", "en.hbs"),
                ResourceDef::new("sv", "/templates/sv.hbs", "sv.hbs"),
            ],
            vec![ResourceDef::new("details", "/css/details.css", "details.css")],
        )
    }

    /// Two languages merge into one section with one item
    #[tokio::test]
    async fn test_remote_load_merges_languages() {
        let server = MockServer::start().await;
        mount_content(&server).await;

        Mock::given(method("GET"))
            .and(path("/css/details.css"))
            .respond_with(ResponseTemplate::new(200).set_body_string("h3 {}"))
            .mount(&server)
            .await;

        let config = Config {
            host: server.uri(),
            ..Config::default()
        };
        let fetcher = remote_fetcher(&server.uri());
        let cache_dir = tempfile::tempdir().unwrap();
        let mut templates = HandlebarsRegistry::new();
        let mut images = ImageCache::new(cache_dir.path());

        let (json, tpl, css) = defs();
        let view_model = ViewModelLoader::new(&fetcher, &mut templates, &mut images, &config)
            .load_view_model(&json, &tpl, &css)
            .await
            .expect("Load should succeed");

        assert_eq!(view_model.title, "REKListan");
        assert_eq!(view_model.lists.len(), 1);

        let food = &view_model.lists[0];
        assert_eq!(food.title, "Food");
        assert_eq!(food.id, "food");
        assert_eq!(food.items.len(), 1);

        let pizza = &food.items[0];
        assert_eq!(pizza.title, "Pizza");
        assert_eq!(pizza.content.keys().collect::<Vec<_>>(), vec!["en", "sv"]);
        assert_eq!(pizza.order.keys().collect::<Vec<_>>(), vec!["en", "sv"]);

        let pending = images.drain();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].url, format!("{}/img/a.png", server.uri()));
        assert_eq!(pending[0].filename, "img-a-png");

        assert_eq!(templates.css("details"), Some("h3 {}"));
    }

    /// A missing template fails the load
    #[tokio::test]
    async fn test_missing_template_fails_load() {
        let server = MockServer::start().await;
        mount_content(&server).await;

        let config = Config {
            host: server.uri(),
            ..Config::default()
        };
        let fetcher = remote_fetcher(&server.uri());
        let cache_dir = tempfile::tempdir().unwrap();
        let mut templates = HandlebarsRegistry::new();
        let mut images = ImageCache::new(cache_dir.path());

        let (json, _, css) = defs();
        let templates_defs = vec![ResourceDef::new("en", "/templates/missing.hbs", "en.hbs")];

        let err = ViewModelLoader::new(&fetcher, &mut templates, &mut images, &config)
            .load_view_model(&json, &templates_defs, &css)
            .await
            .expect_err("Load should fail");

        assert_eq!(classify(&err), LoadErrorKind::Generic);
    }

    /// A failing stylesheet does not fail an otherwise complete load
    #[tokio::test]
    async fn test_stylesheet_failure_is_tolerated() {
        let server = MockServer::start().await;
        mount_content(&server).await;

        Mock::given(method("GET"))
            .and(path("/css/details.css"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let config = Config {
            host: server.uri(),
            ..Config::default()
        };
        let fetcher = remote_fetcher(&server.uri());
        let cache_dir = tempfile::tempdir().unwrap();
        let mut templates = HandlebarsRegistry::new();
        let mut images = ImageCache::new(cache_dir.path());

        let (json, tpl, css) = defs();
        let view_model = ViewModelLoader::new(&fetcher, &mut templates, &mut images, &config)
            .load_view_model(&json, &tpl, &css)
            .await
            .expect("Load should succeed");

        assert_eq!(view_model.item_count(), 1);
        assert_eq!(templates.css("details"), None);
    }
}

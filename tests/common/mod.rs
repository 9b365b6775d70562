//! A mock Prismic repository for integration tests
//!
//! Five posts, served four per page. The search endpoint answers list
//! queries, uid queries and the `page=2` cursor.

#![allow(dead_code)]

use serde_json::{json, Value};
use spacetraveling::config::SiteConfig;
use spacetraveling::Blog;
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const MASTER_REF: &str = "YFt2ZRAAACMAqEq4";

pub const UIDS: [&str; 5] = [
    "como-utilizar-hooks",
    "criando-um-app-cra-do-zero",
    "mapas-com-react-usando-leaflet",
    "typescript-pra-que",
    "react-native-ou-flutter",
];

/// API root of the mock repository
pub fn endpoint(server: &MockServer) -> String {
    format!("{}/api/v2", server.uri())
}

/// Cursor the first page points at
pub fn second_page_url(server: &MockServer) -> String {
    format!(
        "{}/documents/search?ref={}&page=2&pageSize=4",
        endpoint(server),
        MASTER_REF
    )
}

fn title(uid: &str) -> String {
    let words = uid.replace('-', " ");
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn summary(uid: &str) -> Value {
    json!({
        "id": format!("id-{}", uid),
        "uid": uid,
        "type": "posts",
        "tags": [],
        "lang": "pt-br",
        "first_publication_date": "2021-03-25T19:25:28+0000",
        "last_publication_date": "2021-03-25T19:25:28+0000",
        "data": {
            "title": title(uid),
            "subtitle": "Pensando em sincronização em vez de ciclos de vida.",
            "author": "Joseph Oliveira"
        }
    })
}

fn detail(uid: &str) -> Value {
    json!({
        "id": format!("id-{}", uid),
        "uid": uid,
        "type": "posts",
        "first_publication_date": "2021-03-25T19:25:28+0000",
        "last_publication_date": "2021-03-25T19:25:28+0000",
        "data": {
            "title": title(uid),
            "subtitle": "Pensando em sincronização em vez de ciclos de vida.",
            "author": "Joseph Oliveira",
            "banner": { "url": "https://images.prismic.io/spacetraveling/banner.png", "alt": null },
            "content": [
                {
                    "heading": "Proin et varius",
                    "body": [
                        { "type": "paragraph", "text": "Nullam dolor sapien, vulputate eu diam at.", "spans": [
                            { "start": 0, "end": 6, "type": "strong" }
                        ] }
                    ]
                },
                {
                    "heading": "Cras laoreet mi",
                    "body": [
                        { "type": "list-item", "text": "Lorem ipsum", "spans": [] },
                        { "type": "list-item", "text": "Dolor sit amet", "spans": [] }
                    ]
                }
            ]
        }
    })
}

fn page(number: u32, results: Vec<Value>, next_page: Option<String>) -> Value {
    json!({
        "page": number,
        "results_per_page": 4,
        "results_size": results.len(),
        "total_results_size": UIDS.len(),
        "total_pages": 2,
        "next_page": next_page,
        "prev_page": null,
        "results": results
    })
}

/// Answers `/documents/search` the way the repository would
struct SearchResponder {
    next_page: String,
}

impl Respond for SearchResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let param = |name: &str| {
            request
                .url
                .query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };

        if param("ref").as_deref() != Some(MASTER_REF) {
            return ResponseTemplate::new(400).set_body_string("missing or stale ref");
        }

        if param("page").as_deref() == Some("2") {
            return ResponseTemplate::new(200)
                .set_body_json(page(2, vec![summary(UIDS[4])], None));
        }

        let q = param("q").unwrap_or_default();
        if q.contains("my.posts.uid") {
            let results: Vec<Value> = UIDS
                .iter()
                .filter(|uid| q.contains(&format!("\"{}\"", uid)))
                .map(|uid| detail(uid))
                .collect();
            return ResponseTemplate::new(200).set_body_json(page(1, results, None));
        }

        let first: Vec<Value> = UIDS[..4].iter().map(|uid| summary(uid)).collect();
        ResponseTemplate::new(200).set_body_json(page(1, first, Some(self.next_page.clone())))
    }
}

/// Start a mock repository with the API root and search endpoint mounted
pub async fn mock_repository() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "refs": [
                { "id": "master", "ref": MASTER_REF, "label": "Master", "isMasterRef": true }
            ],
            "types": { "posts": "Posts" }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v2/documents/search"))
        .respond_with(SearchResponder {
            next_page: second_page_url(&server),
        })
        .mount(&server)
        .await;

    server
}

/// A blog in `base_dir` pointed at the mock repository
pub fn blog(base_dir: &Path, server: &MockServer) -> Blog {
    let mut config = SiteConfig::default();
    config.api.endpoint = endpoint(server);
    config.revalidate = 0;
    Blog::with_config(base_dir, config)
}

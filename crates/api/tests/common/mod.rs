//! Shared fixtures for the HTTP integration tests
//!
//! The archive is seeded once per test and the router is driven with
//! `tower::ServiceExt::oneshot`. Wall-clock time is pinned through a
//! [`FixedClock`] that tests move between phases.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, header},
    response::Response,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use pacsocial_api::{AppState, PageLimits, build_router};
use pacsocial_config::CompetitionConfig;
use pacsocial_search::EntityKind;
use pacsocial_store::{Archive, Edge, EdgeStore, NewScan, NewTeam, NewTweet, NewUser, SqliteEdgeStore};
use pacsocial_timeline::{CompetitionClock, FixedClock, ScanType};

pub const START: i64 = 1_417_996_800;
pub const BETA_START: i64 = 1_422_230_400;
pub const DETECTION_START: i64 = 1_424_149_200;
pub const DETECTION_END: i64 = 1_426_564_800;
pub const DAY: i64 = 86_400;

/// Ten days into detection; the virtual "now" is `START + 10 days`
pub const DETECTION_NOW: i64 = DETECTION_START + 10 * DAY;

pub const RED_PASSCODE: &str = "s3cret";
pub const BLUE_PASSCODE: &str = "hunter2";

pub struct TestApp {
    pub router: Router,
    pub clock: Arc<FixedClock>,
    pub archive: Archive,
}

impl TestApp {
    pub async fn new() -> Self {
        let archive = Archive::in_memory().await.unwrap();
        seed(&archive).await;

        let config = CompetitionConfig::default();
        let clock = Arc::new(FixedClock::new(DETECTION_NOW));
        let state = AppState::new(
            archive.clone(),
            CompetitionClock::new(&config, clock.clone()),
            PageLimits {
                default_size: config.default_page_size,
                max_size: config.max_page_size,
            },
        );

        Self {
            router: build_router(state),
            clock,
            archive,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.get_with(uri, &[]).await
    }

    pub async fn get_with(&self, uri: &str, headers: &[(&str, &str)]) -> Response {
        let mut builder = Request::builder().method(Method::GET).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Authenticated request with an optional JSON body
    pub async fn authed(
        &self,
        method: Method,
        uri: &str,
        passcode: &str,
        body: Option<Value>,
    ) -> Response {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", passcode));
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        };
        self.send(request.unwrap()).await
    }

    /// Authenticated form submission
    pub async fn form(&self, method: Method, uri: &str, passcode: &str, body: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", passcode))
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}

pub async fn response_json(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap_or(json!({}))
}

pub fn header_str<'a>(response: &'a Response, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Ids of a JSON array under `field`
pub fn ids(body: &Value, field: &str) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|item| item[field].as_i64().unwrap())
        .collect()
}

/// Users 1 (alice) and 2 (bob) are public, 3 (carol) is beta-only.
/// Alice has two observations; the newer one (surrogate 4) has 5 followers.
async fn seed(archive: &Archive) {
    let users = archive.users();
    users.insert(&NewUser::new(1, "alice", false)).await.unwrap();
    users.insert(&NewUser::new(2, "bob", false)).await.unwrap();
    users.insert(&NewUser::new(3, "carol", true)).await.unwrap();
    let mut alice = NewUser::new(1, "alice", false);
    alice.followers = 5;
    users.insert(&alice).await.unwrap();

    let tweets = archive.tweets();
    tweets
        .insert(&NewTweet::new(10, 1, START + 100, "hello #rust").with_entity(EntityKind::Hashtag, "rust"))
        .await
        .unwrap();
    tweets
        .insert(&NewTweet::new(11, 2, START + 200, "@alice hi").with_entity(EntityKind::Mention, "1"))
        .await
        .unwrap();
    tweets
        .insert(&NewTweet::new(12, 3, START + 300, "beta only #rust").with_entity(EntityKind::Hashtag, "rust"))
        .await
        .unwrap();
    tweets
        .insert(&NewTweet::new(13, 1, START + 20 * DAY, "from the future #rust").with_entity(EntityKind::Hashtag, "rust"))
        .await
        .unwrap();
    tweets
        .insert(&NewTweet::new(14, 2, START + 2 * DAY, "rust without a tag"))
        .await
        .unwrap();

    let scans = archive.scans();
    scans
        .insert(&NewScan {
            scan_type: ScanType::UserInfo,
            start: START,
            end: START + DAY,
            ref_start: Some(1),
            ref_end: Some(4),
        })
        .await
        .unwrap();
    scans
        .insert(&NewScan {
            scan_type: ScanType::Followers,
            start: START,
            end: START + DAY,
            ref_start: Some(1),
            ref_end: Some(100),
        })
        .await
        .unwrap();

    let edges = SqliteEdgeStore::new(archive.clone());
    for (id, from_user, to_user) in [(1, 2, 1), (2, 3, 1), (3, 2, 1), (4, 1, 2)] {
        edges
            .insert(&Edge {
                id,
                from_user,
                to_user,
                timestamp: START + id,
            })
            .await
            .unwrap();
    }

    let teams = archive.teams();
    teams
        .create(&NewTeam {
            name: "red".to_string(),
            passcode: RED_PASSCODE.to_string(),
        })
        .await
        .unwrap();
    teams
        .create(&NewTeam {
            name: "blue".to_string(),
            passcode: BLUE_PASSCODE.to_string(),
        })
        .await
        .unwrap();

    archive.bots().add(2, None).await.unwrap();
}

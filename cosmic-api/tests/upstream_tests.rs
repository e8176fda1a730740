//! Handler behaviour against stand-in upstream services
//!
//! Each test spins up a local axum server that mimics one third-party API
//! and checks the shaped response (or the mapped error) the handler returns.

mod helpers;

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::{StatusCode, Uri};
use axum::routing::{get, post};
use axum::{Json, Router};
use cosmic_common::config::Credential;
use helpers::{
    all_credentials, credentials_without, get_json, spawn_upstream, test_app,
    unreachable_endpoints,
};
use serde_json::{json, Value};

// ============================================================================
// Planet info
// ============================================================================

async fn solar_system_upstream() -> String {
    let router = Router::new().route(
        "/bodies/:id",
        get(|Path(id): Path<String>| async move {
            match id.as_str() {
                "mars" => (
                    StatusCode::OK,
                    Json(json!({ "id": "mars", "englishName": "Mars", "gravity": 3.71 })),
                ),
                "flaky" => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({}))),
                _ => (StatusCode::NOT_FOUND, Json(json!({ "message": "not found" }))),
            }
        }),
    );
    spawn_upstream(router).await
}

#[tokio::test]
async fn test_planet_info_passes_body_through() {
    let mut endpoints = unreachable_endpoints();
    endpoints.solar_system = solar_system_upstream().await;
    let app = test_app(endpoints, all_credentials()).await;

    // Lookup key is lowercased
    let (status, _, body) = get_json(app, "/api/getPlanetInfo?planet=Mars").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["englishName"], "Mars");
    assert_eq!(body["gravity"], 3.71);
}

#[tokio::test]
async fn test_planet_info_not_found_is_forwarded() {
    let mut endpoints = unreachable_endpoints();
    endpoints.solar_system = solar_system_upstream().await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/getPlanetInfo?planet=Vulcan").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Data not found for Vulcan");
}

#[tokio::test]
async fn test_planet_info_other_status_is_forwarded() {
    let mut endpoints = unreachable_endpoints();
    endpoints.solar_system = solar_system_upstream().await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/getPlanetInfo?planet=flaky").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Failed to fetch data from external API for flaky");
}

#[tokio::test]
async fn test_planet_info_key_stays_inside_bodies_path() {
    let router = Router::new()
        .route(
            "/bodies/:id",
            get(|uri: Uri, Path(id): Path<String>| async move {
                Json(json!({ "path": uri.path(), "id": id, "query": uri.query() }))
            }),
        )
        .fallback(|uri: Uri| async move {
            (StatusCode::IM_A_TEAPOT, Json(json!({ "escaped": uri.to_string() })))
        });
    let mut endpoints = unreachable_endpoints();
    endpoints.solar_system = spawn_upstream(router).await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) =
        get_json(app, "/api/getPlanetInfo?planet=..%2F..%2Fadmin%3Fx%3D1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["path"], "/bodies/..%2F..%2Fadmin%3Fx=1");
    assert_eq!(body["id"], "../../admin?x=1");
    assert!(body["query"].is_null());
}

// ============================================================================
// Picture of the day
// ============================================================================

fn apod_payload() -> Value {
    json!({
        "copyright": "Jane Stargazer",
        "date": "2024-05-01",
        "explanation": "A galaxy far away.",
        "hdurl": "https://apod.test/hd.jpg",
        "media_type": "image",
        "service_version": "v1",
        "title": "Distant Galaxy",
        "url": "https://apod.test/sd.jpg",
        "resource": { "image_set": "apod" }
    })
}

#[tokio::test]
async fn test_apod_is_narrowed_and_cacheable() {
    let router = Router::new().route(
        "/planetary/apod",
        get(|Query(q): Query<HashMap<String, String>>| async move {
            assert_eq!(q.get("api_key").map(String::as_str), Some("test-key"));
            Json(apod_payload())
        }),
    );
    let mut endpoints = unreachable_endpoints();
    endpoints.nasa_api = spawn_upstream(router).await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, headers, body) = get_json(app, "/api/getApod").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get("cache-control").unwrap(),
        "s-maxage=3600, stale-while-revalidate=59"
    );

    let mut keys: Vec<&str> = body.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec!["copyright", "date", "explanation", "hdurl", "media_type", "title", "url"]
    );
    assert_eq!(body["title"], "Distant Galaxy");
    assert_eq!(body["hdurl"], "https://apod.test/hd.jpg");
}

#[tokio::test]
async fn test_apod_upstream_failure_keeps_status_and_body() {
    let router = Router::new().route(
        "/planetary/apod",
        get(|| async { (StatusCode::FORBIDDEN, "API_KEY_INVALID") }),
    );
    let mut endpoints = unreachable_endpoints();
    endpoints.nasa_api = spawn_upstream(router).await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, headers, body) = get_json(app, "/api/getApod").await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(headers.get("cache-control").is_none());
    assert!(body["error"].as_str().unwrap().contains("403"));
    assert_eq!(body["details"], "API_KEY_INVALID");
}

// ============================================================================
// Image and video search
// ============================================================================

#[tokio::test]
async fn test_nasa_images_filtered_and_capped() {
    let router = Router::new().route(
        "/search",
        get(|Query(q): Query<HashMap<String, String>>| async move {
            assert_eq!(q.get("q").map(String::as_str), Some("Jupiter"));
            assert_eq!(q.get("media_type").map(String::as_str), Some("image"));

            let mut items: Vec<Value> = (0..12)
                .map(|i| {
                    json!({
                        "data": [{ "title": format!("Jupiter {}", i) }],
                        "links": [{ "href": format!("https://images.test/{}.jpg", i) }]
                    })
                })
                .collect();
            items.push(json!({ "data": [{ "title": "No links" }], "links": [] }));
            items.push(json!({ "data": [], "links": [{ "href": "https://images.test/untitled.jpg" }] }));
            Json(json!({ "collection": { "items": items } }))
        }),
    );
    let mut endpoints = unreachable_endpoints();
    endpoints.nasa_images = spawn_upstream(router).await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/getNasaImages?planet=Jupiter").await;

    assert_eq!(status, StatusCode::OK);
    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 10);
    for image in images {
        let url = image["url"].as_str().unwrap();
        assert!(url.starts_with("https://images.test/") && !url.contains("untitled"));
        assert!(image["title"].as_str().unwrap().starts_with("Jupiter "));
    }
}

#[tokio::test]
async fn test_nasa_images_empty_collection() {
    let router = Router::new().route("/search", get(|| async { Json(json!({ "collection": { "items": [] } })) }));
    let mut endpoints = unreachable_endpoints();
    endpoints.nasa_images = spawn_upstream(router).await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/getNasaImages?planet=Eris").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "images": [] }));
}

#[tokio::test]
async fn test_planet_videos_shaped() {
    let router = Router::new().route(
        "/search",
        get(|Query(q): Query<HashMap<String, String>>| async move {
            assert_eq!(q.get("q").map(String::as_str), Some("Saturn planet documentary"));
            assert_eq!(q.get("type").map(String::as_str), Some("video"));
            assert_eq!(q.get("maxResults").map(String::as_str), Some("10"));
            assert_eq!(q.get("key").map(String::as_str), Some("test-key"));
            Json(json!({
                "items": [
                    {
                        "id": { "videoId": "abc" },
                        "snippet": {
                            "title": "Rings of Saturn",
                            "thumbnails": {
                                "default": { "url": "https://yt.test/abc/default.jpg" },
                                "medium": { "url": "https://yt.test/abc/medium.jpg" }
                            }
                        }
                    },
                    {
                        "id": { "videoId": "def" },
                        "snippet": {
                            "title": "Titan",
                            "thumbnails": { "default": { "url": "https://yt.test/def/default.jpg" } }
                        }
                    },
                    {
                        "id": { "kind": "youtube#channel" },
                        "snippet": { "title": "A channel", "thumbnails": {} }
                    }
                ]
            }))
        }),
    );
    let mut endpoints = unreachable_endpoints();
    endpoints.youtube = spawn_upstream(router).await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/getPlanetVideos?planet=Saturn").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "videos": [
                { "videoId": "abc", "title": "Rings of Saturn", "thumbnailUrl": "https://yt.test/abc/medium.jpg" },
                { "videoId": "def", "title": "Titan", "thumbnailUrl": "https://yt.test/def/default.jpg" }
            ]
        })
    );
}

#[tokio::test]
async fn test_planet_videos_upstream_failure_is_server_error() {
    let router = Router::new().route(
        "/search",
        get(|| async { (StatusCode::FORBIDDEN, Json(json!({ "error": { "message": "quota" } }))) }),
    );
    let mut endpoints = unreachable_endpoints();
    endpoints.youtube = spawn_upstream(router).await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/getPlanetVideos?planet=Saturn").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

// ============================================================================
// Text endpoints
// ============================================================================

fn chat_reply(content: &str) -> Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
}

#[tokio::test]
async fn test_planet_description_from_model() {
    let router = Router::new().route(
        "/chat/completions",
        post(|Json(request): Json<Value>| async move {
            assert_eq!(request["model"], "gpt-4o-mini");
            assert_eq!(request["max_tokens"], 600);
            let prompt = request["messages"][0]["content"].as_str().unwrap_or_default();
            assert!(prompt.contains("Venus"));
            Json(chat_reply("  Venus is the hottest planet.\n"))
        }),
    );
    let mut endpoints = unreachable_endpoints();
    endpoints.openai = spawn_upstream(router).await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/getPlanetDescription?planet=Venus").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "description": "Venus is the hottest planet." }));
}

#[tokio::test]
async fn test_planet_description_model_error_is_server_error() {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async { Json(json!({ "error": { "message": "model overloaded" } })) }),
    );
    let mut endpoints = unreachable_endpoints();
    endpoints.openai = spawn_upstream(router).await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/getPlanetDescription?planet=Venus").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("model overloaded"));
}

#[tokio::test]
async fn test_astrology_info_known_and_unknown() {
    let app = test_app(unreachable_endpoints(), all_credentials()).await;
    let (status, _, body) = get_json(app, "/api/getAstrologyInfo?planet=saturn").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["astrologyText"].as_str().unwrap().contains("Capricorn"));

    let app = test_app(unreachable_endpoints(), all_credentials()).await;
    let (status, _, body) = get_json(app, "/api/getAstrologyInfo?planet=Ceres").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["astrologyText"].as_str().unwrap().contains("Ceres"));
}

// ============================================================================
// Landscape
// ============================================================================

#[tokio::test]
async fn test_landscape_generated() {
    let router = Router::new().route(
        "/fal-ai/fast-sdxl",
        post(|Json(input): Json<Value>| async move {
            assert_eq!(input["width"], 1024);
            assert_eq!(input["height"], 576);
            assert!(input["prompt"].as_str().unwrap().contains("rings"));
            Json(json!({ "images": [{ "url": "https://fal.test/saturn.png" }], "seed": 42 }))
        }),
    );
    let mut endpoints = unreachable_endpoints();
    endpoints.fal = spawn_upstream(router).await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/generateLandscape?planet=Saturn").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "imageUrl": "https://fal.test/saturn.png" }));
}

#[tokio::test]
async fn test_landscape_skipped_for_unlisted_body() {
    // Unreachable fal endpoint: a skipped body must not call it
    let app = test_app(unreachable_endpoints(), all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/generateLandscape?planet=Ceres").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["imageUrl"].is_null());
    assert_eq!(body["message"], "Image generation skipped for Ceres.");
}

#[tokio::test]
async fn test_landscape_without_url_is_server_error() {
    let router = Router::new().route(
        "/fal-ai/fast-sdxl",
        post(|| async { Json(json!({ "images": [] })) }),
    );
    let mut endpoints = unreachable_endpoints();
    endpoints.fal = spawn_upstream(router).await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/generateLandscape?planet=Mars").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("no URL"));
    assert!(body["details"].is_string());
}

// ============================================================================
// Species fan-out
// ============================================================================

const SPECIES_REPLY: &str = r#"Here you go:
```json
[
  {"category": "Micro-organism", "name": "Ferrospore", "description": "Iron-eating spores in the regolith."},
  {"category": "Animal", "name": "Glimmerbeast", "description": "A six-legged grazer with reflective scales."},
  {"category": "Humanoid", "name": "Duneweaver", "description": "Tall nomads who weave shelters from dust."}
]
```"#;

fn species_openai_router(reply: &'static str) -> Router {
    Router::new().route(
        "/chat/completions",
        post(move |Json(request): Json<Value>| async move {
            assert_eq!(request["max_tokens"], 1000);
            Json(chat_reply(reply))
        }),
    )
}

/// Image stand-in that fails for one named species
fn species_fal_router(failing: &'static str) -> Router {
    Router::new().route(
        "/fal-ai/flux/dev",
        post(move |Json(input): Json<Value>| async move {
            let prompt = input["prompt"].as_str().unwrap_or_default().to_string();
            if prompt.contains(failing) {
                return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "detail": "boom" })));
            }
            let name = ["Ferrospore", "Glimmerbeast", "Duneweaver"]
                .into_iter()
                .find(|n| prompt.contains(n))
                .unwrap_or("unknown");
            (
                StatusCode::OK,
                Json(json!({ "images": [{ "url": format!("https://fal.test/{}.png", name) }] })),
            )
        }),
    )
}

#[tokio::test]
async fn test_species_one_image_failure_nulls_only_that_entry() {
    let mut endpoints = unreachable_endpoints();
    endpoints.openai = spawn_upstream(species_openai_router(SPECIES_REPLY)).await;
    endpoints.fal = spawn_upstream(species_fal_router("Glimmerbeast")).await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/generateSpecies?planet=Mars").await;

    assert_eq!(status, StatusCode::OK);
    let species = body["species"].as_array().unwrap();
    assert_eq!(species.len(), 3);

    assert_eq!(species[0]["category"], "Micro-organism");
    assert_eq!(species[0]["imageUrl"], "https://fal.test/Ferrospore.png");
    assert_eq!(species[1]["name"], "Glimmerbeast");
    assert!(species[1]["imageUrl"].is_null());
    assert_eq!(species[2]["imageUrl"], "https://fal.test/Duneweaver.png");
}

#[tokio::test]
async fn test_species_without_image_key_still_returns_descriptions() {
    let mut endpoints = unreachable_endpoints();
    endpoints.openai = spawn_upstream(species_openai_router(SPECIES_REPLY)).await;
    let app = test_app(endpoints, credentials_without(Credential::Fal)).await;

    let (status, _, body) = get_json(app, "/api/generateSpecies?planet=Mars").await;

    assert_eq!(status, StatusCode::OK);
    let species = body["species"].as_array().unwrap();
    assert_eq!(species.len(), 3);
    assert!(species.iter().all(|s| s["imageUrl"].is_null()));
    assert_eq!(species[2]["category"], "Humanoid");
}

#[tokio::test]
async fn test_species_malformed_reply_is_server_error() {
    let mut endpoints = unreachable_endpoints();
    endpoints.openai = spawn_upstream(species_openai_router(
        r#"[{"category": "Animal", "name": "Lonely", "description": "Only one."}]"#,
    ))
    .await;
    let app = test_app(endpoints, all_credentials()).await;

    let (status, _, body) = get_json(app, "/api/generateSpecies?planet=Mars").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Failed to get species descriptions:"));
}

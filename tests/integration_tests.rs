//! Integration tests for the recommendation API

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use travel_recommender::config::{ScoringWeights, ServerConfig};
use travel_recommender::recommender::catalog;
use travel_recommender::{
    AppState, Geocoder, Location, RecommenderError, TravelRecommender, WeatherData,
    WeatherProvider, web,
};

struct FakeGeocoder;

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn geocode(&self, address: &str) -> travel_recommender::Result<Option<Location>> {
        match address.trim() {
            "Paris" => Ok(Some(Location::new(48.8566, 2.3522, "Paris, Île-de-France, France"))),
            "Offline" => Err(RecommenderError::geocoding("connection refused")),
            _ => Ok(None),
        }
    }
}

struct FakeWeather {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl WeatherProvider for FakeWeather {
    async fn current(&self, _lat: f64, _lon: f64) -> travel_recommender::Result<Option<WeatherData>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RecommenderError::weather("upstream timeout"));
        }
        Ok(Some(WeatherData {
            temperature: 22.0,
            conditions: "clear".to_string(),
            humidity: 45,
            wind_speed: 3.0,
        }))
    }
}

/// Answers only after `delay`
struct SlowWeather {
    delay: Duration,
}

#[async_trait]
impl WeatherProvider for SlowWeather {
    async fn current(&self, _lat: f64, _lon: f64) -> travel_recommender::Result<Option<WeatherData>> {
        tokio::time::sleep(self.delay).await;
        Ok(None)
    }
}

fn app_from(weather: Arc<dyn WeatherProvider>, config: &ServerConfig) -> Router {
    let recommender =
        TravelRecommender::new(catalog::builtin_destinations(), ScoringWeights::default(), 5)
            .unwrap();
    let state = AppState {
        geocoder: Arc::new(FakeGeocoder),
        weather,
        recommender: Arc::new(recommender),
    };
    web::app(state, config)
}

fn app_with(weather: Arc<FakeWeather>) -> Router {
    app_from(weather, &ServerConfig::default())
}

fn app() -> Router {
    app_with(Arc::new(FakeWeather {
        calls: AtomicUsize::new(0),
        fail: false,
    }))
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], travel_recommender::VERSION);
}

#[tokio::test]
async fn test_location_lookup() {
    let (status, body) = send(app(), get("/api/location?address=Paris")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lat"], 48.8566);
    assert_eq!(body["lon"], 2.3522);
    assert_eq!(body["address"], "Paris, Île-de-France, France");
}

#[tokio::test]
async fn test_location_not_found() {
    let (status, body) = send(app(), get("/api/location?address=Atlantis")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Could not find location");
}

#[tokio::test]
async fn test_location_requires_address() {
    for uri in ["/api/location", "/api/location?address=%20%20"] {
        let (status, body) = send(app(), get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["status"], "error");
    }
}

#[tokio::test]
async fn test_location_upstream_failure_is_bad_gateway() {
    let (status, body) = send(app(), get("/api/location?address=Offline")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!body["message"].as_str().unwrap().contains("connection refused"));
}

#[tokio::test]
async fn test_weather_endpoint() {
    let (status, body) = send(app(), get("/api/weather?lat=48.85&lon=2.35")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["weather"]["conditions"], "clear");
}

#[tokio::test]
async fn test_weather_requires_coordinates() {
    let (status, body) = send(app(), get("/api/weather?lat=48.85")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Latitude and longitude are required");

    let (status, _) = send(app(), get("/api/weather?lat=north&lon=2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(app(), get("/api/weather?lat=95&lon=2")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_form_payload() {
    let weather = Arc::new(FakeWeather {
        calls: AtomicUsize::new(0),
        fail: false,
    });
    let payload = json!({
        "preferences": {"preferred_type": "beach", "budget_level": "", "activities": []},
        "location": {"lat": 48.8566, "lon": 2.3522, "address": "Paris"}
    });

    let (status, body) = send(app_with(weather.clone()), post_json("/api/recommendations", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert_eq!(weather.calls.load(Ordering::SeqCst), 1);

    for rec in recs {
        let destination = &rec["destination"];
        for field in ["name", "type", "climate", "best_season", "budget_level", "activities"] {
            assert!(!destination[field].is_null(), "missing {field}");
        }
        assert!(rec["score"].is_f64());
        assert!(rec["distance_km"].is_f64());
    }

    let scores: Vec<f64> = recs.iter().map(|r| r["score"].as_f64().unwrap()).collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "not sorted: {scores:?}");
    assert!(recs.iter().all(|r| r["breakdown"]["weather"] == 1.0));
}

#[tokio::test]
async fn test_recommendations_without_location_skip_weather() {
    let weather = Arc::new(FakeWeather {
        calls: AtomicUsize::new(0),
        fail: false,
    });
    let (status, body) =
        send(app_with(weather.clone()), post_json("/api/recommendations", &json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(weather.calls.load(Ordering::SeqCst), 0);
    let recs = body["recommendations"].as_array().unwrap();
    assert!(recs.iter().all(|r| r["breakdown"]["weather"] == 0.5));
    assert!(recs.iter().all(|r| r.get("distance_km").is_none()));
}

#[tokio::test]
async fn test_recommendations_survive_weather_failure() {
    let weather = Arc::new(FakeWeather {
        calls: AtomicUsize::new(0),
        fail: true,
    });
    let payload = json!({"location": {"lat": 1.0, "lon": 2.0}});
    let (status, body) =
        send(app_with(weather), post_json("/api/recommendations", &payload)).await;

    assert_eq!(status, StatusCode::OK);
    let recs = body["recommendations"].as_array().unwrap();
    assert!(recs.iter().all(|r| r["breakdown"]["weather"] == 0.5));
}

#[tokio::test]
async fn test_recommendations_reject_bad_input() {
    let cases = [
        json!({"preferences": {"preferred_type": "desert"}}),
        json!({"location": {"lat": 123.0, "lon": 0.0}}),
        json!({"location": {"lat": "north"}}),
    ];
    for payload in cases {
        let (status, body) = send(app(), post_json("/api/recommendations", &payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert_eq!(body["status"], "error");
    }

    let not_json = Request::builder()
        .method("POST")
        .uri("/api/recommendations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{oops"))
        .unwrap();
    let (status, _) = send(app(), not_json).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_blank_type_choice_is_a_mismatch() {
    let blank = json!({"preferences": {"preferred_type": "", "budget_level": "", "activities": []}});
    let (status, body) = send(app(), post_json("/api/recommendations", &blank)).await;
    assert_eq!(status, StatusCode::OK);
    let recs = body["recommendations"].as_array().unwrap();
    assert_eq!(recs.len(), 3);
    assert!(recs.iter().all(|r| r["breakdown"]["preference"] == 0.3));

    let absent = json!({"preferences": {"activities": []}});
    let (_, body) = send(app(), post_json("/api/recommendations", &absent)).await;
    let recs = body["recommendations"].as_array().unwrap();
    assert!(recs.iter().all(|r| r["breakdown"]["preference"] == 0.5));
}

#[tokio::test]
async fn test_static_dir_fallback() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>Travel</h1>").unwrap();
    let config = ServerConfig {
        static_dir: Some(dir.path().to_string_lossy().into_owned()),
        ..ServerConfig::default()
    };
    let weather = Arc::new(FakeWeather {
        calls: AtomicUsize::new(0),
        fail: false,
    });
    let app = app_from(weather, &config);

    let response = app.clone().oneshot(get("/index.html")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<h1>Travel</h1>");

    let (status, body) = send(app.clone(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let response = app.oneshot(get("/missing.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_slow_request_times_out() {
    let config = ServerConfig {
        request_timeout_seconds: 1,
        ..ServerConfig::default()
    };
    let weather = Arc::new(SlowWeather {
        delay: Duration::from_secs(5),
    });
    let response = app_from(weather, &config)
        .oneshot(get("/api/weather?lat=1&lon=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let config = ServerConfig {
        body_limit_kb: 1,
        ..ServerConfig::default()
    };
    let weather = Arc::new(FakeWeather {
        calls: AtomicUsize::new(0),
        fail: false,
    });
    let activities: Vec<String> = (0..200).map(|i| format!("activity-{i}")).collect();
    let body = json!({"preferences": {"activities": activities}}).to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/api/recommendations")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();
    let response = app_from(weather, &config).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_destinations_listing() {
    let (status, body) = send(app(), get("/api/destinations")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["destinations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Bali, Indonesia", "Paris, France", "Kyoto, Japan"]);
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/recommendations")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

/// Runs the form flow against a real listener serving the API.
#[tokio::test]
async fn test_form_flow_end_to_end() {
    use travel_recommender::BackendClient;
    use travel_recommender::ui::{self, TripForm, ViewState};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });

    let client = BackendClient::new(format!("http://{addr}")).unwrap();

    let form = TripForm {
        location: "Paris".to_string(),
        ..TripForm::default()
    };
    let state = ui::submit(&client, &form).await;
    let ViewState::Loaded(recs) = &state else {
        panic!("unexpected state {state:?}");
    };
    assert_eq!(recs.len(), 3);
    assert!(ui::render(&state).contains("Match Score:"));

    let missing = TripForm {
        location: "Atlantis".to_string(),
        ..TripForm::default()
    };
    assert_eq!(
        ui::submit(&client, &missing).await,
        ViewState::Failed("Could not find location".to_string())
    );
}

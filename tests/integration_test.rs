use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use cloudburst_sentinel::notifier::{Delivery, MockChannel, NotificationChannel};
use cloudburst_sentinel::{
    routes, ChannelError, HistoryStore, IngestService, Notifier, QuerySurface,
};

#[derive(Debug, Deserialize)]
struct Data {
    rainfall: f64,
    humidity: f64,
    temperature: f64,
    pressure: f64,
}

#[derive(Debug, Deserialize)]
struct Record {
    status: String,
    timestamp: DateTime<Utc>,
    data: Data,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Health {
    status: String,
    readings_count: usize,
    notifier_enabled: bool,
}

/// Live channel whose sends outlast any request in these tests.
struct StalledChannel;

#[async_trait]
impl NotificationChannel for StalledChannel {
    fn name(&self) -> &'static str {
        "stalled"
    }

    fn is_live(&self) -> bool {
        true
    }

    async fn send(&self, _message: &str, _recipient: &str) -> Result<Delivery, ChannelError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(ChannelError::Rejected {
            status: 504,
            body: "stalled".to_string(),
        })
    }
}

/// Serve the full router with the mock channel and return its base URL.
async fn spawn_app(recipients: &[&str]) -> Result<String> {
    spawn_app_with(Arc::new(MockChannel), recipients, Duration::from_secs(2)).await
}

/// Serve the full router on an ephemeral port and return its base URL.
async fn spawn_app_with(
    channel: Arc<dyn NotificationChannel>,
    recipients: &[&str],
    timeout: Duration,
) -> Result<String> {
    // ---
    let history = Arc::new(HistoryStore::new());
    let notifier = Notifier::new(
        channel,
        recipients.iter().map(|r| r.to_string()).collect(),
        timeout,
    );
    let query = QuerySurface::new(Arc::clone(&history), notifier.is_enabled());
    let service = IngestService::new(history, notifier);
    let app = routes::router(service, query);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(format!("http://{addr}"))
}

async fn post_reading(client: &Client, base: &str, body: Value) -> Result<Record> {
    // ---
    let resp = client
        .post(format!("{base}/sensor-data"))
        .json(&body)
        .send()
        .await?;
    assert_eq!(resp.status(), StatusCode::OK, "body: {body}");
    Ok(resp.json().await?)
}

#[tokio::test]
async fn sensor_data_classifies_scenarios() -> Result<()> {
    // ---
    let base = spawn_app(&[]).await?;
    let client = Client::new();

    let cases = [
        (json!({"rainfall": 10, "humidity": 60, "temperature": 25, "pressure": 1015}), "safe"),
        (json!({"rainfall": 30, "humidity": 70, "temperature": 22, "pressure": 1010}), "warning"),
        (
            json!({"rainfall": 60, "humidity": 80, "temperature": 20, "pressure": 1005}),
            "cloudburst_detected",
        ),
        (
            json!({"rainfall": 15, "humidity": 90, "temperature": 18, "pressure": 995}),
            "cloudburst_detected",
        ),
    ];

    for (body, expected) in cases {
        let record = post_reading(&client, &base, body.clone()).await?;
        assert_eq!(record.status, expected, "body: {body}");
        assert_eq!(record.data.rainfall, body["rainfall"].as_f64().unwrap());
        assert_eq!(record.data.humidity, body["humidity"].as_f64().unwrap());
        assert_eq!(record.data.temperature, body["temperature"].as_f64().unwrap());
        assert_eq!(record.data.pressure, body["pressure"].as_f64().unwrap());
    }

    Ok(())
}

#[tokio::test]
async fn malformed_body_is_rejected_and_not_stored() -> Result<()> {
    // ---
    let base = spawn_app(&[]).await?;
    let client = Client::new();

    let bodies = [
        r#"{"rainfall": 10, "humidity": 60, "temperature": 25}"#,
        r#"{"rainfall": "lots", "humidity": 60, "temperature": 25, "pressure": 1015}"#,
        "not json at all",
        "",
    ];

    for body in bodies {
        let resp = client
            .post(format!("{base}/sensor-data"))
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");

        let detail: Value = resp.json().await?;
        let message = detail["detail"].as_str().unwrap_or_default();
        assert!(message.starts_with("Invalid sensor data"), "got: {message}");
    }

    let readings: Vec<Record> = client
        .get(format!("{base}/latest-readings"))
        .send()
        .await?
        .json()
        .await?;
    assert!(readings.is_empty());

    Ok(())
}

#[tokio::test]
async fn latest_readings_are_bounded_and_ordered() -> Result<()> {
    // ---
    let base = spawn_app(&[]).await?;
    let client = Client::new();

    for i in 0..55 {
        let body = json!({"rainfall": i, "humidity": 50, "temperature": 20, "pressure": 1013});
        post_reading(&client, &base, body).await?;
    }

    let readings: Vec<Record> = client
        .get(format!("{base}/latest-readings"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(readings.len(), 50);
    assert_eq!(readings.first().unwrap().data.rainfall, 5.0);
    assert_eq!(readings.last().unwrap().data.rainfall, 54.0);
    for pair in readings.windows(2) {
        assert!(pair[0].data.rainfall < pair[1].data.rainfall);
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }

    Ok(())
}

#[tokio::test]
async fn sensor_data_is_not_delayed_by_stalled_notifier() -> Result<()> {
    // ---
    let base = spawn_app_with(
        Arc::new(StalledChannel),
        &["1111111111", "2222222222", "3333333333"],
        Duration::from_secs(5),
    )
    .await?;
    let client = Client::new();

    let body = json!({"rainfall": 75, "humidity": 95, "temperature": 18, "pressure": 985});
    let started = Instant::now();
    let record = post_reading(&client, &base, body).await?;

    assert!(started.elapsed() < Duration::from_secs(1), "took {:?}", started.elapsed());
    assert_eq!(record.status, "cloudburst_detected");

    let health: Health = client.get(format!("{base}/health")).send().await?.json().await?;
    assert_eq!(health.readings_count, 1);
    assert!(health.notifier_enabled);

    Ok(())
}

#[tokio::test]
async fn health_reports_count_and_mock_notifier() -> Result<()> {
    // ---
    let base = spawn_app(&["9937424848"]).await?;
    let client = Client::new();

    let health: Health = client.get(format!("{base}/health")).send().await?.json().await?;
    assert_eq!(health.status, "healthy");
    assert_eq!(health.readings_count, 0);
    assert!(!health.notifier_enabled);

    let body = json!({"rainfall": 80, "humidity": 95, "temperature": 18, "pressure": 980});
    post_reading(&client, &base, body).await?;

    let health: Health = client.get(format!("{base}/health")).send().await?.json().await?;
    assert_eq!(health.readings_count, 1);

    Ok(())
}

#[tokio::test]
async fn root_lists_endpoints() -> Result<()> {
    // ---
    let base = spawn_app(&[]).await?;
    let meta: Value = Client::new().get(&base).send().await?.json().await?;

    assert_eq!(meta["message"], "Cloudburst Early Warning System API");
    let endpoints = meta["endpoints"].as_object().unwrap();
    for key in [
        "POST /sensor-data",
        "POST /trigger-cloudburst",
        "GET /latest-readings",
        "GET /health",
    ] {
        assert!(endpoints.contains_key(key), "missing {key}");
    }

    Ok(())
}

#[tokio::test]
async fn trigger_cloudburst_runs_full_pipeline() -> Result<()> {
    // ---
    let base = spawn_app(&["1111111111", "2222222222", "3333333333"]).await?;
    let client = Client::new();

    let resp: Value = client
        .post(format!("{base}/trigger-cloudburst"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(resp["status"], "cloudburst_detected");
    assert!(resp["timestamp"].as_str().is_some());
    assert_eq!(resp["data"]["rainfall"], 75.0);

    let alerts = resp["alerts"].as_array().unwrap();
    assert_eq!(alerts.len(), 3);
    assert_eq!(alerts[0]["recipient"], "1111111111");
    assert_eq!(alerts[2]["recipient"], "3333333333");
    for alert in alerts {
        assert_eq!(alert["status"], "mock_sent");
        assert!(alert["deliveryId"].as_str().unwrap().starts_with("MOCK-"));
    }

    let readings: Vec<Record> = client
        .get(format!("{base}/latest-readings"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(readings.len(), 1);
    assert_eq!(readings[0].status, "cloudburst_detected");

    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_posts_all_succeed() -> Result<()> {
    // ---
    let base = spawn_app(&["1111111111"]).await?;
    let client = Client::new();

    let tasks: Vec<_> = (0..100)
        .map(|i| {
            let client = client.clone();
            let base = base.clone();
            tokio::spawn(async move {
                let body = json!({
                    "rainfall": i % 70,
                    "humidity": 80,
                    "temperature": 20,
                    "pressure": 1005
                });
                client
                    .post(format!("{base}/sensor-data"))
                    .json(&body)
                    .send()
                    .await
                    .map(|resp| resp.status())
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await??, StatusCode::OK);
    }

    let readings: Vec<Record> = client
        .get(format!("{base}/latest-readings"))
        .send()
        .await?
        .json()
        .await?;

    assert_eq!(readings.len(), 50);
    for pair in readings.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }

    Ok(())
}

//! Synthetic sensor feed for the cloudburst service.
//!
//! Posts one generated reading to `/sensor-data` every interval and logs
//! the classification the service returns. Transport errors are logged and
//! the loop carries on; Ctrl-C stops it.
//!
//! # Environment Variables
//! - `GENERATOR_API_URL` (optional) – service base URL (default: `http://localhost:8000`)
//! - `GENERATOR_INTERVAL_SECS` (optional) – seconds between readings (default: 5)
//! - `GENERATOR_MODE` (optional) – `realistic` or `random` (default: `realistic`)
use std::time::Duration;

use anyhow::Result;
use dotenvy::dotenv;
use reqwest::Client;
use tracing::{error, info, warn};

use cloudburst_sentinel::config::{self, GeneratorConfig};
use cloudburst_sentinel::generator::SensorGenerator;
use cloudburst_sentinel::{telemetry, ClassifiedRecord, Reading, Status};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    telemetry::init_tracing();

    let cfg = config::load_generator_from_env()?;
    info!(
        "Sending {} readings to {}/sensor-data every {}s",
        cfg.mode, cfg.api_url, cfg.interval_secs
    );

    let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
    probe_health(&client, &cfg).await;

    let mut generator = SensorGenerator::from_entropy();
    let mut ticker = tokio::time::interval(Duration::from_secs(cfg.interval_secs.into()));
    let mut sent: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                sent += 1;
                let reading = generator.next_reading(cfg.mode);
                send_reading(&client, &cfg, sent, &reading).await;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Simulation stopped after {} readings", sent);
                break;
            }
        }
    }

    Ok(())
}

async fn probe_health(client: &Client, cfg: &GeneratorConfig) {
    // ---
    let url = format!("{}/health", cfg.api_url);
    match client.get(&url).timeout(Duration::from_secs(5)).send().await {
        Ok(resp) if resp.status().is_success() => {
            info!("Connected to API server at {}", cfg.api_url)
        }
        Ok(resp) => warn!("API server responded with HTTP {}", resp.status()),
        Err(e) => warn!("Could not verify API server connection: {}", e),
    }
}

async fn send_reading(client: &Client, cfg: &GeneratorConfig, seq: u64, reading: &Reading) {
    // ---
    let url = format!("{}/sensor-data", cfg.api_url);

    let response = match client.post(&url).json(reading).send().await {
        Ok(resp) => resp,
        Err(e) if e.is_connect() => {
            error!("Reading #{}: could not connect to {}", seq, cfg.api_url);
            return;
        }
        Err(e) if e.is_timeout() => {
            error!("Reading #{}: request timed out", seq);
            return;
        }
        Err(e) => {
            error!("Reading #{}: {}", seq, e);
            return;
        }
    };

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!("Reading #{}: HTTP {} - {}", seq, status, body);
        return;
    }

    let record: ClassifiedRecord = match response.json().await {
        Ok(record) => record,
        Err(e) => {
            error!("Reading #{}: unreadable response: {}", seq, e);
            return;
        }
    };

    let line = format!(
        "Reading #{}: {} | Rainfall: {}mm/hr | Humidity: {}% | Pressure: {}hPa",
        seq,
        record.status.as_str().to_uppercase(),
        reading.rainfall,
        reading.humidity,
        reading.pressure
    );
    match record.status {
        Status::Safe => info!("{}", line),
        Status::Warning => warn!("{} - elevated rainfall", line),
        Status::CloudburstDetected => error!("{} - CLOUDBURST CONDITION DETECTED", line),
    }
}

use actix_web::{web, HttpResponse, Responder};

use crate::api::{endpoint_map, timestamp, HEALTH, HEALTH_ENHANCED, TEST};
use crate::metrics::METRICS;
use crate::models::EnhancedHealth;
use crate::services::check_database;
use crate::state::AppState;

pub async fn health(data: web::Data<AppState>) -> impl Responder {
    METRICS.hit(HEALTH);
    HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "message": "Server is running",
        "timestamp": timestamp(),
        "port": data.port
    }))
}

pub async fn health_enhanced(data: web::Data<AppState>) -> impl Responder {
    METRICS.hit(HEALTH_ENHANCED);

    let database = check_database(data.database_uri.as_deref()).await;
    let memory = data.sampler.memory_usage().unwrap_or_else(|| {
        log::warn!("Could not sample memory of PID {}", std::process::id());
        Default::default()
    });

    HttpResponse::Ok().json(EnhancedHealth {
        status: "OK",
        port: data.port,
        database: database.as_str().to_string(),
        uptime: data.started_at.elapsed().as_secs_f64(),
        memory,
        endpoints: endpoint_map(),
    })
}

pub async fn test_endpoint(data: web::Data<AppState>) -> impl Responder {
    METRICS.hit(TEST);
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Test endpoint working",
        "timestamp": timestamp(),
        "environment": data.environment
    }))
}

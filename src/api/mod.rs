pub mod health;
pub mod metrics;
pub mod resources;

pub use health::{health, health_enhanced, test_endpoint};
pub use metrics::get_metrics;
pub use resources::{dashboard_scores, resource_index, RESOURCES};

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use chrono::{SecondsFormat, Utc};
use std::collections::BTreeMap;

pub const HEALTH: &str = "/api/health";
pub const HEALTH_ENHANCED: &str = "/api/health-enhanced";
pub const TEST: &str = "/api/test";
pub const DASHBOARD_SCORES: &str = "/api/dashboard/scores";
pub const METRICS_PATH: &str = "/metrics";

/// 响应中使用的时间戳，毫秒精度
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 已挂载接口的名称到路径映射
pub fn endpoint_map() -> BTreeMap<&'static str, &'static str> {
    let mut endpoints = BTreeMap::from([
        ("health", HEALTH),
        ("healthEnhanced", HEALTH_ENHANCED),
        ("test", TEST),
        ("dashboardScores", DASHBOARD_SCORES),
        ("metrics", METRICS_PATH),
    ]);
    for resource in RESOURCES.iter() {
        endpoints.insert(resource.name, resource.path);
    }
    endpoints
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(HEALTH, web::get().to(health))
        .route(HEALTH_ENHANCED, web::get().to(health_enhanced))
        .route(TEST, web::get().to(test_endpoint))
        .route(DASHBOARD_SCORES, web::get().to(dashboard_scores))
        .route(METRICS_PATH, web::get().to(get_metrics));

    for resource in RESOURCES.iter() {
        cfg.route(resource.path, web::get().to(move || resource_index(resource)));
    }
}

pub async fn not_found(req: HttpRequest) -> impl Responder {
    log::debug!("No route for {} {}", req.method(), req.path());
    HttpResponse::NotFound().json(serde_json::json!({
        "status": "error",
        "message": "Route not found",
        "path": req.path()
    }))
}

use actix_web::{HttpResponse, Responder};

use crate::api::timestamp;
use crate::metrics::METRICS;

/// 占位资源路由
pub struct Resource {
    pub name: &'static str,
    pub path: &'static str,
    pub message: &'static str,
}

pub static RESOURCES: [Resource; 5] = [
    Resource { name: "assessments", path: "/api/assessments", message: "Assessments route working" },
    Resource { name: "questions", path: "/api/questions", message: "Questions route working" },
    Resource { name: "dashboard", path: "/api/dashboard", message: "Dashboard route working" },
    Resource { name: "users", path: "/api/users", message: "Users route working" },
    Resource { name: "auth", path: "/api/auth", message: "Auth route working" },
];

pub async fn resource_index(resource: &'static Resource) -> impl Responder {
    METRICS.hit(resource.path);
    HttpResponse::Ok().json(serde_json::json!({
        "message": resource.message,
        "timestamp": timestamp()
    }))
}

pub async fn dashboard_scores() -> impl Responder {
    METRICS.hit(crate::api::DASHBOARD_SCORES);
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Dashboard scores endpoint working",
        "timestamp": timestamp(),
        "scores": []
    }))
}

use actix_web::{web, HttpResponse, Responder};

use crate::metrics::METRICS;
use crate::state::AppState;

pub async fn get_metrics(data: web::Data<AppState>) -> impl Responder {
    METRICS.uptime_seconds.set(data.started_at.elapsed().as_secs_f64());
    METRICS.registered_processes.set(data.registry.get_processes().len() as i64);

    if let Some(memory) = data.sampler.memory_usage() {
        METRICS.process_memory_bytes.set(memory.rss as i64);
    }

    match METRICS.render() {
        Ok(metrics_text) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(metrics_text),
        Err(e) => {
            log::error!("Failed to render metrics: {}", e);
            HttpResponse::InternalServerError().body("Failed to render metrics")
        }
    }
}

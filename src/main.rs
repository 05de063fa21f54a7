use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use std::time::Duration;

mod api;
mod cli;
mod commands;
mod metrics;
mod models;
mod services;
mod state;

use cli::{CommandArgs, Commands, ProbeArgs, ProcessesCommand, ServeArgs};
use services::{HealthProbe, ProcessRegistry};
use state::new_state;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CommandArgs::parse();

    match args.command {
        Commands::Serve(serve_args) => serve(serve_args).await,
        Commands::Probe(probe_args) => probe(probe_args).await,
        Commands::Processes { command } => processes(command),
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let bind_address = format!("{}:{}", args.address, args.port);
    let state = new_state(&args);

    commands::register_self(&args, &state.registry);

    if args.database_uri.is_none() {
        log::warn!("MONGODB_URI is not set, health will report the database as not configured");
    }

    print_banner(&args);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(middleware::NormalizePath::trim())
            .wrap(middleware::Logger::default())
            .configure(api::configure)
            .default_service(web::route().to(api::not_found))
    })
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    log::info!("👋 Server on {} stopped", bind_address);
    Ok(())
}

async fn probe(args: ProbeArgs) -> anyhow::Result<()> {
    let base_url = args.resolved_base_url();
    let timeout = Duration::from_secs(args.timeout);
    let probe = HealthProbe::new(&base_url, timeout).context("failed to build HTTP client")?;

    commands::run_probes(&probe, &args.endpoints).await?;
    Ok(())
}

fn processes(command: ProcessesCommand) -> anyhow::Result<()> {
    match command {
        ProcessesCommand::List { registry, json } => {
            let registry = ProcessRegistry::new(registry);
            let records = registry.get_processes();

            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
                return Ok(());
            }

            if records.is_empty() {
                println!("No processes recorded in {}", registry.path().display());
                return Ok(());
            }

            println!("{:<10} {:>6} {:>8}  {:<24}  {}", "TYPE", "PORT", "PID", "TIMESTAMP", "FILE");
            for r in &records {
                println!(
                    "{:<10} {:>6} {:>8}  {:<24}  {}",
                    r.kind,
                    r.port,
                    r.pid,
                    r.timestamp.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                    r.file
                );
            }
        }
        ProcessesCommand::Clear { registry } => {
            let registry = ProcessRegistry::new(registry);
            registry
                .clear_processes()
                .with_context(|| format!("failed to clear {}", registry.path().display()))?;
            println!("🧹 Cleared {}", registry.path().display());
        }
    }

    Ok(())
}

fn print_banner(args: &ServeArgs) {
    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║      HVI-Continuity Server v{:<30}║", env!("CARGO_PKG_VERSION"));
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();
    println!("🚀 Server starting on http://{}:{} ({})", args.address, args.port, args.environment);
    println!();
    println!("📋 Available endpoints:");
    println!("  GET    {:<26}- Health check", api::HEALTH);
    println!("  GET    {:<26}- Health with database, memory, uptime", api::HEALTH_ENHANCED);
    println!("  GET    {:<26}- Test endpoint", api::TEST);
    for resource in api::RESOURCES.iter() {
        println!("  GET    {:<26}- {} stub", resource.path, resource.name);
    }
    println!("  GET    {:<26}- Dashboard scores", api::DASHBOARD_SCORES);
    println!("  GET    {:<26}- Prometheus metrics", api::METRICS_PATH);
    println!();
    println!("🗂  Process registry: {}", args.registry.display());
    println!("═══════════════════════════════════════════════════════════");
}

//! Maintenance Server - equipment maintenance planning
//!
//! REST API server plus maintenance commands for plan generation and sample data.

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use maintenance_server::{
    api,
    config::AppConfig,
    models::Actor,
    repository::Repository,
    services::Services,
    AppState,
};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Generate missing plans for all equipment
    GeneratePlans {
        /// Planning horizon in years
        #[clap(short, long, default_value = "3", value_parser = clap::value_parser!(i32).range(1..=100))]
        years: i32,
    },
    /// Replace all data with the sample data set
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_tracing(&config);

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    tracing::info!("Database migrations completed");

    let repository = Repository::new(pool);
    let services = Services::new(repository, &config.planning);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config, services).await,
        Commands::GeneratePlans { years } => {
            let created = services
                .planner
                .generate_all(years.saturating_mul(12), &Actor::System)
                .await?;
            println!("Created {} maintenance plans for a {}-year horizon", created, years);
            Ok(())
        }
        Commands::Seed => {
            let report = services.seed.run().await?;
            println!(
                "Seeded {} equipment types, {} maintenance types, {} standards, {} equipment, {} plans",
                report.equipment_types,
                report.maintenance_types,
                report.standards,
                report.equipment,
                report.plans
            );
            Ok(())
        }
    }
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("maintenance_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn serve(config: AppConfig, services: Services) -> anyhow::Result<()> {
    tracing::info!("Starting Maintenance Server v{}", env!("CARGO_PKG_VERSION"));

    let addr = SocketAddr::new(
        config.server.host.parse::<IpAddr>().context("Invalid host address")?,
        config.server.port,
    );

    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    let app = create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Equipment types
        .route(
            "/equipment-types",
            get(api::equipment::list_equipment_types).post(api::equipment::create_equipment_type),
        )
        .route(
            "/equipment-types/:id",
            get(api::equipment::get_equipment_type)
                .put(api::equipment::update_equipment_type)
                .delete(api::equipment::delete_equipment_type),
        )
        // Equipment
        .route(
            "/equipment",
            get(api::equipment::list_equipment).post(api::equipment::create_equipment),
        )
        .route(
            "/equipment/:id",
            get(api::equipment::get_equipment)
                .put(api::equipment::update_equipment)
                .delete(api::equipment::delete_equipment),
        )
        .route("/equipment/:id/generate-plans", post(api::equipment::generate_plans))
        // Maintenance types
        .route(
            "/maintenance-types",
            get(api::standards::list_maintenance_types).post(api::standards::create_maintenance_type),
        )
        .route(
            "/maintenance-types/:id",
            get(api::standards::get_maintenance_type)
                .put(api::standards::update_maintenance_type)
                .delete(api::standards::delete_maintenance_type),
        )
        // Standards
        .route(
            "/standards",
            get(api::standards::list_standards).post(api::standards::create_standard),
        )
        .route(
            "/standards/:id",
            get(api::standards::get_standard)
                .put(api::standards::update_standard)
                .delete(api::standards::delete_standard),
        )
        // Plans
        .route("/plans", get(api::plans::list_plans).post(api::plans::create_plan))
        .route(
            "/plans/:id",
            get(api::plans::get_plan)
                .put(api::plans::update_plan)
                .delete(api::plans::delete_plan),
        )
        // Calendar
        .route("/calendar", get(api::calendar::calendar_events))
        // Profile
        .route("/profile", get(api::profile::get_profile))
        .with_state(state);

    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

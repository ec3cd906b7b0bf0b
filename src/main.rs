mod config;
mod db;
mod dtos;
mod error;
mod events;
mod handler;
mod middleware;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use config::Config;
use dotenv::dotenv;
use routes::create_router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use crate::db::db::DBClient;
use crate::events::EventHub;
use service::{
    attendance_service::AttendanceService, group_service::GroupService, job_service::JobService,
    rating_service::RatingService, settlement_service::SettlementService,
};

#[derive(Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    pub events: EventHub,
    pub job_service: Arc<JobService>,
    pub attendance_service: Arc<AttendanceService>,
    pub settlement_service: Arc<SettlementService>,
    pub rating_service: Arc<RatingService>,
    pub group_service: Arc<GroupService>,
}

impl AppState {
    pub fn new(db_client: DBClient, config: Config, events: EventHub) -> Self {
        let db_client_arc = Arc::new(db_client);

        let job_service = Arc::new(JobService::new(db_client_arc.clone(), events.clone()));
        let attendance_service = Arc::new(AttendanceService::new(
            db_client_arc.clone(),
            events.clone(),
        ));
        let settlement_service = Arc::new(SettlementService::new(db_client_arc.clone()));
        let rating_service = Arc::new(RatingService::new(db_client_arc.clone()));
        let group_service = Arc::new(GroupService::new(db_client_arc.clone()));

        Self {
            env: config,
            db_client: db_client_arc,
            events,
            job_service,
            attendance_service,
            settlement_service,
            rating_service,
            group_service,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            tracing::info!("connected to postgres");
            pool
        }
        Err(err) => {
            tracing::error!("failed to connect to the database: {:?}", err);
            std::process::exit(1);
        }
    };

    let db_client = DBClient::new(pool);

    let allowed_origins = vec![
        "http://localhost:5173".parse::<HeaderValue>().unwrap(),
        "http://localhost:8000".parse::<HeaderValue>().unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE]);

    // The hub is wired into services here; nothing reaches for a global.
    let events = EventHub::new();

    let app_state = Arc::new(AppState::new(db_client, config.clone(), events.clone()));

    let app = create_router(app_state.clone()).layer(cors);

    // Topic channels linger after their last SSE client disconnects;
    // sweep them periodically.
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            interval.tick().await;
            events.cleanup().await;
        }
    });

    tracing::info!("server is running on http://localhost:{}", config.port);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", &config.port))
        .await
        .unwrap();

    axum::serve(listener, app).await.unwrap();
}

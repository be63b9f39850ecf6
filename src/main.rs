use std::io::Error;
use std::sync::Arc;

use broadcaster::{
    application::{
        context::BroadcastContext,
        services::{
            authorization::AdminAllowList,
            jwt::{JwtService, JwtServiceConfig},
            scheduler::StoreBackedScheduler,
        },
    },
    config::Config,
    domain::repositories::JobStore,
    infrastructure::{
        messaging::telegram::TelegramChannel,
        repositories::{postgres::PostgresRecipientDirectory, redis_store::RedisJobStore},
        scheduling::worker::SchedulerWorker,
    },
    presentation::http::{build_app, endpoints::root::ApiState},
    telemetry,
};
use poem::{Server, listener::TcpListener};
use sqlx::postgres::PgPoolOptions;
use tokio::main;
use tracing::info;

#[main]
async fn main() -> Result<(), Error> {
    telemetry::init();
    let config = Config::try_parse().map_err(Error::other)?;

    let server_url = config.server_url();

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .map_err(Error::other)?;
    sqlx::migrate!().run(&pool).await.map_err(Error::other)?;

    let store: Arc<dyn JobStore> = Arc::new(
        RedisJobStore::connect(&config.redis_url, &config.jobs_namespace)
            .await
            .map_err(Error::other)?,
    );

    let context = BroadcastContext {
        scheduler: Arc::new(StoreBackedScheduler::new(store.clone())),
        channel: TelegramChannel::new(&config.telegram_api_url, &config.telegram_bot_token)
            .map_err(Error::other)?,
        directory: PostgresRecipientDirectory::new(pool),
        authorizer: Arc::new(AdminAllowList::new(config.admin_ids.clone())),
    };

    let registry = Arc::new(context.task_registry(config.broadcast()));
    let worker = SchedulerWorker::new(store, registry, config.worker()).spawn();

    let state = Arc::new(ApiState {
        submit_broadcast_usecase: Arc::new(context.submitter()),
        manage_jobs_usecase: Arc::new(context.job_manager()),
        jwt: JwtService::new(JwtServiceConfig {
            secret: config.jwt_secret.clone(),
            expiration: config.jwt_expiration,
        }),
    });
    let app = build_app(state, &server_url);

    info!(%server_url, admins = config.admin_ids.len(), "starting server");

    let result = Server::new(TcpListener::bind(format!("{}:{}", config.host, config.port)))
        .run_with_graceful_shutdown(
            app,
            async {
                let _ = tokio::signal::ctrl_c().await;
            },
            None,
        )
        .await;

    // In-flight broadcasts are abandoned; only jobs still in the store survive.
    worker.abort();
    result
}

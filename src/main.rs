use std::io;
use std::net::TcpListener;

use secrecy::ExposeSecret;

use footbally_backend::config::settings::{get_config, get_jwt_settings};
use footbally_backend::db::helpers::connect_pool;
use footbally_backend::db::seed::seed_sample_data;
use footbally_backend::run;
use footbally_backend::telemetry::{get_subscriber, init_subscriber};

fn startup_error(context: &str, error: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, error))
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = get_config().map_err(|e| startup_error("Failed to read the config", e))?;

    let subscriber = get_subscriber(
        "footbally-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout,
    );
    init_subscriber(subscriber);

    let jwt_settings = get_jwt_settings(&config);

    let connection_pool = connect_pool(
        config.database.url.expose_secret(),
        config.database.max_connections,
    )
    .await
    .map_err(|e| startup_error("Failed to open the database", e))?;

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .map_err(|e| startup_error("Failed to run migrations", e))?;
    tracing::info!("Database migrations applied");

    if config.application.seed_sample_data {
        match seed_sample_data(&connection_pool).await {
            Ok(true) => tracing::info!("Sample data seeded"),
            Ok(false) => tracing::info!("Database already has teams, skipping sample data"),
            Err(e) => tracing::error!("Failed to seed sample data: {}", e),
        }
    }

    let address = config.application.address();
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Listening on {}", address);

    run(
        listener,
        connection_pool,
        jwt_settings,
        config.application.allowed_origins.clone(),
    )?
    .await
}

use anyhow::Result;
use lms_core::application::{
    commands::notifications::{NotificationCommandService, NotificationDispatcher},
    ports::time::Clock,
    services::ApplicationServices,
};
use lms_core::config::AppConfig;
use lms_core::infrastructure::{delivery, storage, time::SystemClock};
use lms_core::presentation::http::{
    error::set_expose_internal_errors,
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::{signal, task::JoinHandle};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    lms_core::telemetry::init_tracing();

    let config = AppConfig::from_env()?;
    set_expose_internal_errors(config.app_env().is_development());

    let repos = storage::connect(config.storage()).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let dispatcher = Arc::new(NotificationDispatcher::new(
        delivery::default_senders(),
        config.retry_policy(),
        config.circuit_breaker(),
    ));

    let services = Arc::new(ApplicationServices::new(
        repos.audit_logs,
        repos.notifications,
        dispatcher,
        clock,
    ));

    let dispatch_task = spawn_dispatch_loop(
        Arc::clone(&services.notification_commands),
        services.clock(),
        config.dispatch_interval(),
    );

    let app = build_router(
        HttpState::new(Arc::clone(&services)),
        RouterOptions {
            allowed_origins: config.allowed_origins().to_vec(),
            rate_limit: config.rate_limit_enabled(),
        },
    );

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(
        %address,
        env = ?config.app_env(),
        rate_limit = config.rate_limit_enabled(),
        "listening"
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    dispatch_task.abort();
    tracing::info!("server stopped");
    Ok(())
}

/// Periodically delivers scheduled notifications whose time has come.
fn spawn_dispatch_loop(
    commands: Arc<NotificationCommandService>,
    clock: Arc<dyn Clock>,
    every: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if let Err(err) = commands.dispatch_due(clock.now()).await {
                tracing::error!(error = %err, "scheduled notification dispatch failed");
            }
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}

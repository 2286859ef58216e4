use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_portal_routes;
use acc_portal::config::AppConfig;
use acc_portal::error::AppError;
use acc_portal::seed::{seed, SeedError};
use acc_portal::telemetry;
use acc_portal::Portal;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry, config.environment)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let portal = Portal::in_memory(&config);
    if args.seed {
        seed(&portal, &config.auth)?;
    } else {
        portal
            .accounts
            .ensure_admin(&config.auth.admin_email, &config.auth.admin_password)
            .map_err(SeedError::from)?;
    }

    if let Some(path) = args.statistics_csv.take() {
        let summary = portal.statistics.import_path(&path)?;
        for skipped in &summary.skipped {
            warn!(line = skipped.line, period = %skipped.period, reason = %skipped.reason, "statistics row skipped");
        }
        info!(path = %path.display(), imported = summary.imported, "recovery statistics loaded");
    }

    let _sweeper = portal.limiter.spawn_sweeper();

    let app = with_portal_routes(&portal)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, uploads = %portal.uploads.root().display(), "asset recovery portal ready");

    axum::serve(listener, app).await?;
    Ok(())
}

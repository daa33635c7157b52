use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use realty_console::auth::guard::{RedirectTargets, RouteGuard};
use realty_console::auth::identity::HttpIdentityClient;
use realty_console::auth::notice::TracingNoticePublisher;
use realty_console::auth::router::AuthRuntime;
use realty_console::config::{AppConfig, AppEnvironment};
use realty_console::console::careers::CareerService;
use realty_console::console::contact::ContactService;
use realty_console::console::directory::DirectoryService;
use realty_console::console::inquiries::InquiryService;
use realty_console::console::properties::PropertyService;
use realty_console::error::AppError;
use realty_console::telemetry;

use crate::cli::ServeArgs;
use crate::infra::{
    seed_contact, seed_directory, AppState, InMemoryCatalogue, InMemoryContactCard,
    InMemoryDirectory, InMemoryInbox, InMemoryJobBoard,
};
use crate::routes::{console_router, with_operational_routes, ConsoleRuntime};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let identity = Arc::new(HttpIdentityClient::new(&config.identity)?);
    let auth = AuthRuntime::new(identity);
    let guard = Arc::new(RouteGuard::new(
        auth.resolver.clone(),
        Arc::new(TracingNoticePublisher),
        RedirectTargets::default(),
    ));

    let catalogue = Arc::new(InMemoryCatalogue::default());
    let job_board = Arc::new(InMemoryJobBoard::default());
    let inbox = Arc::new(InMemoryInbox::default());
    let directory = Arc::new(InMemoryDirectory::default());
    let contact_card = Arc::new(InMemoryContactCard::default());

    if config.environment == AppEnvironment::Development {
        seed_directory(&directory);
        seed_contact(&contact_card);
    }

    let runtime = ConsoleRuntime {
        auth,
        guard,
        properties: Arc::new(PropertyService::new(catalogue)),
        careers: Arc::new(CareerService::new(job_board)),
        inquiries: Arc::new(InquiryService::new(inbox)),
        directory: Arc::new(DirectoryService::new(directory)),
        contact: Arc::new(ContactService::new(contact_card)),
    };

    let app = with_operational_routes(console_router(&runtime))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "realty back-office console ready");

    axum::serve(listener, app).await?;
    Ok(())
}

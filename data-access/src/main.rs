//! Demo entry-point: loads street names through the configured controller
//! and polls its view until the loading indicator clears.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use data_access::config::{ControllerVariant, DataAccessSettings};
use data_access::domain::LoadingStatusRegistry;
use data_access::domain::ports::NamedResourceSource;
use data_access::inbound::controllers::{
    BadExampleController, BetterExampleController, SimpleGoodExampleController, StreetNamesView,
};
use data_access::outbound::http::HttpNamedResourceSource;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DataAccessSettings::load_from_iter(std::env::args_os())
        .map_err(|error| eyre!("load data access settings: {error}"))?;
    let uri = settings.street_names_uri()?;
    let variant = settings.variant()?;

    let source: Arc<dyn NamedResourceSource> = Arc::new(
        HttpNamedResourceSource::with_timeout(settings.request_timeout())
            .wrap_err("build HTTP client")?,
    );

    info!(%variant, %uri, "starting street names load");
    let view: Box<dyn StreetNamesView> = match variant {
        ControllerVariant::Bad => Box::new(BadExampleController::start(source, uri).0),
        ControllerVariant::SimpleGood => {
            Box::new(SimpleGoodExampleController::start(source, uri).0)
        }
        ControllerVariant::Better => {
            let registry = Arc::new(LoadingStatusRegistry::new(source));
            Box::new(BetterExampleController::start(registry, uri).0)
        }
    };

    render_until_settled(view.as_ref(), &settings).await
}

async fn render_until_settled(
    view: &dyn StreetNamesView,
    settings: &DataAccessSettings,
) -> Result<()> {
    let mut ticker = tokio::time::interval(settings.poll_interval());
    for poll in 1..=settings.max_polls() {
        ticker.tick().await;
        if !view.street_names_loading() {
            let street_names = view.street_names();
            info!(
                poll,
                record_count = street_names.len(),
                "loading indicator hidden"
            );
            return Ok(());
        }
        info!(poll, "loading indicator shown");
    }
    Err(eyre!(
        "loading indicator still shown after {} polls",
        settings.max_polls()
    ))
}

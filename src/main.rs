//! Directory Site HTTP server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use directory_site::adapters::creem::{CreemCheckoutAdapter, CreemConfig};
use directory_site::adapters::email::{ResendAudience, ResendEmailSender};
use directory_site::adapters::http::{app_router, AppState};
use directory_site::adapters::oauth::{GitHubOAuthAdapter, GoogleOAuthAdapter, OAuthClientConfig};
use directory_site::adapters::sanity::{SanityClient, SanityStore};
use directory_site::adapters::stripe::{StripeCheckoutAdapter, StripeConfig};
use directory_site::application::handlers::checkout::CheckoutPricing;
use directory_site::config::AppConfig;
use directory_site::domain::auth::OAuthProviderKind;
use directory_site::domain::session::SessionCodec;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let addr = config.server.socket_addr()?;
    let app = app_router(build_state(&config), &config.server.cors_origins_list());

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, app_url = %config.server.app_url(), "Directory site listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn build_state(config: &AppConfig) -> AppState {
    let app_url = config.server.app_url();
    let store = Arc::new(SanityStore::new(SanityClient::new(&config.cms)));
    let sessions = SessionCodec::new(config.auth.session_secret.as_bytes());

    let mut state = AppState::new(app_url, sessions, store)
        .with_secure_cookies(config.is_production())
        .with_pricing(CheckoutPricing::from_config(&config.payment));

    if let Some(credentials) = config.auth.google_credentials() {
        let client = OAuthClientConfig::new(OAuthProviderKind::Google, credentials, app_url);
        state = state.with_oauth(Arc::new(GoogleOAuthAdapter::new(client)));
    }
    if let Some(credentials) = config.auth.github_credentials() {
        let client = OAuthClientConfig::new(OAuthProviderKind::GitHub, credentials, app_url);
        state = state.with_oauth(Arc::new(GitHubOAuthAdapter::new(client)));
    }

    if let Some(api_key) = config.payment.creem_api_key() {
        let creem = CreemConfig::new(api_key, config.payment.creem_base_url());
        state = state.with_creem(Arc::new(CreemCheckoutAdapter::new(creem)));
    }
    if let Some(secret) = config.payment.creem_webhook_secret() {
        state = state.with_webhook_secret(secret);
    } else {
        tracing::warn!("Creem webhook secret not set; webhooks will be rejected");
    }
    if let Some(api_key) = config.payment.stripe_secret_key() {
        if config.payment.is_stripe_test_mode() {
            tracing::info!("Stripe running with a test key");
        }
        let stripe = StripeConfig::new(api_key);
        state = state.with_stripe(Arc::new(StripeCheckoutAdapter::new(stripe)));
    }

    match config.email.resend_api_key() {
        Some(api_key) => {
            state = state.with_mailer(Arc::new(ResendEmailSender::new(
                api_key,
                config.email.from_header(),
            )));
            if let Some(audience_id) = config.email.audience_id() {
                state = state.with_audience(Arc::new(ResendAudience::new(api_key, audience_id)));
            }
        }
        None => tracing::warn!("Resend API key not set; emails are disabled"),
    }

    state
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

//! `tienda serve`: configuration to running server.

use std::path::Path;

use tienda_api::{AppState, Server};
use tienda_auth::TokenIssuer;
use tienda_auth::secret::resolve_secret_key;

use crate::Result;
use crate::cli::ServeArgs;
use crate::config::TiendaConfig;

/// Fold command-line overrides into the loaded configuration.
pub fn apply_serve_args(config: &mut TiendaConfig, args: &ServeArgs) {
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
}

/// Build the server described by `config`.
///
/// Resolves the signing secret, which may create or append to the
/// configured secret file.
pub fn build_server(config: &TiendaConfig) -> Result<Server> {
    let secret = resolve_secret_key(
        config.auth.secret_key.as_deref(),
        Path::new(&config.auth.secret_file),
    )?;
    let tokens = TokenIssuer::new(secret.as_bytes(), config.auth.issuer.clone(), config.token_ttl());

    tracing::debug!(
        ttl_secs = config.token_ttl().as_secs(),
        issuer = tokens.issuer(),
        "Token issuer ready"
    );

    Ok(Server::new(config.server_config(), AppState::new(tokens)))
}

/// Run the API server until shutdown.
pub async fn serve(config: &TiendaConfig) -> Result<()> {
    let server = build_server(config)?;
    server.run().await?;
    Ok(())
}

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::catalog::api_client::CharacterApiClient;
use crate::catalog::CharacterSource;
use crate::config::Config;
use crate::routes;
use crate::session_factory::actor::SessionFactoryActor;

pub async fn create_web_server(config: Config, listener: TcpListener) -> Result<(), std::io::Error> {
    let source: Arc<dyn CharacterSource> =
        Arc::new(CharacterApiClient::new(config.characters.clone()));
    let session_factory_tx = Arc::new(SessionFactoryActor::spawn(config.session.clone(), source));

    let router = routes::create_router(&config).with_state(session_factory_tx);

    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service()).await
}

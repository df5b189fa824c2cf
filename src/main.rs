use tokio::net::TcpListener;

use faceless::config::Config;
use faceless::metrics::register_metrics;
use faceless::startup::create_web_server;

#[tokio::main]
async fn main() {
    std_logger::Config::logfmt().init();
    register_metrics();

    let config = Config::get().expect("ERROR: Unable to get the Config.");
    let address = format!(
        "{}:{}",
        config.application.host, config.application.port
    );
    let listener = TcpListener::bind(&address).await.unwrap_or_else(|error| {
        panic!("Could not bind to the address. Address: '{address}', Error: '{error}'.")
    });

    if let Err(error) = create_web_server(config, listener).await {
        log::error!("The web server stopped. Error: '{error}'.");
    }
}

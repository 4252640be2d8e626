use tokio::net::TcpListener;

use encyclopedia::logger::Logger;
use encyclopedia::{app, Config, FileService, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    Logger::init()?;

    let config = Config::from_env();
    FileService::new(config.entries_dir.as_ref().clone()).ensure_base_dir()?;

    let router = app(config.app_state());

    let addr = config.socket_addr();
    log::info!("Encyclopedia listening on http://{} (entries in {:?})", addr, config.entries_dir);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await.map_err(WikiError::from)
}

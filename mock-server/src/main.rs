use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    env_logger::init();
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let username = std::env::var("FOREMAN_USER").unwrap_or_else(|_| "admin".to_string());
    let password = std::env::var("FOREMAN_PASSWORD").unwrap_or_else(|_| "changeme".to_string());
    let addr = format!("127.0.0.1:{port}");
    let listener = TcpListener::bind(&addr).await?;
    info!("listening on http://{addr}/api/ as {username}");
    mock_server::run(listener, &username, &password).await
}

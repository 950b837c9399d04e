#![cfg(not(tarpaulin_include))]

use sheetcrud::app;
use std::env;

/// Main entry point for the CRUD dashboard server.
///
/// Usage: `server [bind_addr] [uploads_dir]`
///
/// # Default Configuration
/// * Binds to 127.0.0.1:3000
/// * Serves datasets from the `uploads` directory
///
/// # Returns
/// * `Result<(), Box<dyn std::error::Error>>` - Success or error object
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let addr = args
        .get(1)
        .cloned()
        .unwrap_or_else(|| "127.0.0.1:3000".to_string());
    let uploads_dir = args.get(2).cloned().unwrap_or_else(|| "uploads".to_string());

    app::run(&addr, &uploads_dir).await
}

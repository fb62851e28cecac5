#[tokio::main]
async fn main() {
  // Minimal CLI: support --version/-V
  let mut args = std::env::args().skip(1);
  if let Some(arg) = args.next() {
    if arg == "--version" || arg == "-V" {
      println!("logbook {}", env!("CARGO_PKG_VERSION"));
      return;
    }
    if arg == "--help" || arg == "-h" {
      eprintln!("Usage: logbook [--version]");
      eprintln!();
      eprintln!("Environment:");
      eprintln!("  LOGBOOK_DATABASE            sqlx SQLite URL (default sqlite://logbook.db)");
      eprintln!("  LOGBOOK_ADDR                listen address (default 127.0.0.1:8080)");
      eprintln!("  LOGBOOK_MAX_CONNECTIONS     pool size (default 5)");
      eprintln!("  LOGBOOK_AUTH_HEADER         auth header name (default X-Token)");
      eprintln!("  LOGBOOK_AUTH_TOKEN          shared secret");
      eprintln!("  LOGBOOK_REQUEST_TIMEOUT_MS  per-request store deadline (default 5000)");
      eprintln!("  RUST_LOG                    log filter (default info)");
      return;
    }
  }

  if let Err(e) = logbook::app::run().await {
    eprintln!("error: {e}");
    std::process::exit(1);
  }
}

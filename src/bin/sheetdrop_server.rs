//! Sheetdrop server binary
//!
//! Serves the browser upload page without the rest of the CLI.

use clap::Parser;
use sheetdrop::api::{run_api_server, ApiConfig};
use sheetdrop::types::RowPolicy;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sheetdrop-server")]
#[command(version)]
#[command(about = "Sheetdrop server - browser upload page for semicolon-delimited text")]
#[command(long_about = r#"
Sheetdrop server

Endpoints:
  - GET  /                  - Upload page
  - POST /api/v1/upload     - Upload a .txt or .csv file (multipart field "file")
  - GET  /api/v1/table      - Current parsed table
  - POST /api/v1/save       - Save the table as .xlsx in the output directory
  - GET  /api/v1/download   - Download the table as .xlsx
  - GET  /health            - Health check
  - GET  /version           - Server version info

Example usage:
  sheetdrop-server                           # Start on localhost:8080
  sheetdrop-server --host 0.0.0.0 --port 3000 --output-dir ./exports

  curl -F file=@orders.csv http://localhost:8080/api/v1/upload
  curl -X POST http://localhost:8080/api/v1/save \
    -H "Content-Type: application/json" \
    -d '{"filename": "orders.xlsx"}'
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "SHEETDROP_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "SHEETDROP_PORT")]
    port: u16,

    /// Directory for saved workbooks (defaults to the program's directory)
    #[arg(short = 'd', long, env = "SHEETDROP_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// How to treat rows whose length differs from the first row
    #[arg(long, default_value_t = RowPolicy::Accept)]
    policy: RowPolicy,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        output_dir: args.output_dir,
        policy: args.policy,
        ..Default::default()
    };

    run_api_server(config).await
}

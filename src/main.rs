use clap::{Parser, Subcommand};
use sheetdrop::api::ApiConfig;
use sheetdrop::cli;
use sheetdrop::types::RowPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetdrop")]
#[command(about = "Turn semicolon-delimited text into Excel workbooks.")]
#[command(long_about = "Sheetdrop - semicolon-delimited text to Excel

Upload a .txt or .csv file in the browser (or point the CLI at one), preview
it as a table and save it as an .xlsx workbook.

COMMANDS:
  serve    - Start the browser upload page
  convert  - Convert a file to .xlsx
  preview  - Show the raw content and parsed table
  inspect  - Read an .xlsx workbook back

ROW POLICY:
  accept   - keep rows as parsed (default)
  pad      - pad short rows, truncate long rows to the header width
  reject   - fail on the first row whose length differs from the first row

EXAMPLES:
  sheetdrop serve --port 3000
  sheetdrop convert orders.csv -o orders.xlsx -d ./out
  sheetdrop preview orders.csv --policy pad")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the browser upload page
    Serve {
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
    },

    /// Convert a delimited text file to .xlsx
    Convert {
        /// Path to a .txt or .csv file
        input: PathBuf,

        /// Output file name (default: data.xlsx)
        #[arg(short, long)]
        output: Option<String>,

        /// Directory to write into (defaults to the program's directory)
        #[arg(short = 'd', long, env = "SHEETDROP_OUTPUT_DIR")]
        dir: Option<PathBuf>,

        /// How to treat rows whose length differs from the first row
        #[arg(long, default_value_t = RowPolicy::Accept)]
        policy: RowPolicy,

        /// Show parse details
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the raw content and the parsed table
    Preview {
        /// Path to a .txt or .csv file
        input: PathBuf,

        /// How to treat rows whose length differs from the first row
        #[arg(long, default_value_t = RowPolicy::Accept)]
        policy: RowPolicy,
    },

    /// Read an .xlsx workbook back and print its first sheet
    Inspect {
        /// Path to an .xlsx file
        input: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            output_dir,
            policy,
        } => cli::serve(ApiConfig {
            host,
            port,
            output_dir,
            policy,
            ..Default::default()
        }),

        Commands::Convert {
            input,
            output,
            dir,
            policy,
            verbose,
        } => Ok(cli::convert(input, output, dir, policy, verbose)?),

        Commands::Preview { input, policy } => Ok(cli::preview(input, policy)?),

        Commands::Inspect { input } => Ok(cli::inspect(input)?),
    }
}

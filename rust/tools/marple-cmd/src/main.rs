use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod utils;

#[derive(Parser)]
#[command(name = "marple-cmd")]
#[command(about = "Command-line utility for inspecting index doc values")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display the doc values of one field of a segment
    Docvalues {
        /// Segment to inspect
        #[arg(short, long, default_value = "0")]
        segment: String,

        /// Field to inspect
        #[arg(short, long)]
        field: String,

        /// Doc ids to display (e.g. "1, 5, 10-100"); all documents with values if omitted
        #[arg(short, long)]
        docs: Option<String>,

        /// Encoding to request for textual values
        #[arg(short, long)]
        encoding: Option<String>,

        /// JSON file holding persisted encoding preferences
        #[arg(long)]
        prefs: Option<String>,

        /// JSON file with inspector configuration
        #[arg(long)]
        config: Option<String>,

        /// Print the rendered view as JSON
        #[arg(long)]
        json: bool,

        /// Doc values fixture (JSON) to read from
        fixture_path: String,
    },

    /// List the fields of every segment and their doc values types
    Fields {
        /// Doc values fixture (JSON) to read from
        fixture_path: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_logging(cli.verbose);

    match cli.command {
        Commands::Docvalues {
            segment,
            field,
            docs,
            encoding,
            prefs,
            config,
            json,
            fixture_path,
        } => commands::docvalues::run(commands::docvalues::DocValuesArgs {
            segment,
            field,
            docs,
            encoding,
            prefs,
            config,
            json,
            fixture_path,
        }),
        Commands::Fields { fixture_path } => commands::fields::run(fixture_path),
    }
}

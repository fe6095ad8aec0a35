use anyhow::Result;
use clap::{Parser, Subcommand};
use codeweave::commands;

/// Template toolbox for a block-based visual scripting platform.
///
/// This CLI is a thin wrapper around `weave-core`. All substantive logic
/// lives in the library so it can be tested thoroughly and reused from other
/// frontends.
#[derive(Parser, Debug)]
#[command(
    name = "codeweave",
    version,
    about = "Build, inspect, and slice visual-scripting code templates",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a wire string and list its blocks.
    Decode {
        /// Template code given inline.
        #[arg(long)]
        code: Option<String>,

        /// File containing the template code.
        #[arg(long)]
        input: Option<String>,

        /// Emit the raw wire document as pretty-printed JSON instead.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Encode a wire-shaped JSON document into a wire string.
    Encode {
        /// File containing the template document (`{ "blocks": [...] }`).
        #[arg(long)]
        input: String,

        /// Catalog data file used for tag defaults and validation.
        #[arg(long)]
        catalog: Option<String>,
    },

    /// Slice a template into pieces that fit a footprint budget.
    Slice {
        /// Template code given inline.
        #[arg(long)]
        code: Option<String>,

        /// File containing the template code.
        #[arg(long)]
        input: Option<String>,

        /// Maximum footprint of each resulting template.
        #[arg(long)]
        budget: u32,

        /// Catalog data file used when re-encoding the pieces.
        #[arg(long)]
        catalog: Option<String>,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Ship a built wire string through a registered transport.
    Send {
        /// Template code given inline.
        #[arg(long)]
        code: Option<String>,

        /// File containing the template code.
        #[arg(long)]
        input: Option<String>,

        /// Transport to ship through.
        #[arg(long, default_value = "log")]
        transport: String,
    },

    /// Show summary information about a template.
    Info {
        /// Template code given inline.
        #[arg(long)]
        code: Option<String>,

        /// File containing the template code.
        #[arg(long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    codeweave::init_logging();

    let cli = Cli::parse();
    match cli.command {
        Command::Decode { code, input, json } => commands::decode_command(code, input, json)?,
        Command::Encode { input, catalog } => commands::encode_command(input, catalog)?,
        Command::Slice { code, input, budget, catalog, json } => {
            commands::slice_command(code, input, budget, catalog, json)?
        }
        Command::Send { code, input, transport } => commands::send_command(code, input, transport)?,
        Command::Info { code, input } => commands::info_command(code, input)?,
    }

    Ok(())
}

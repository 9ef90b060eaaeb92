//! CLI struct definitions for the `ark-resolver` command-line interface.
//!
//! All clap-derived types live here. Dispatch logic lives in `lib.rs`.

use crate::core::config::DEFAULT_CONFIG_FILE;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "ark-resolver",
    version = env!("CARGO_PKG_VERSION"),
    about = "Resolve ARK identifiers to redirect targets or metadata records."
)]
pub(crate) struct Cli {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Args, Debug)]
pub(crate) struct ConfigArgs {
    /// Resolver configuration file (defaults apply when it does not exist).
    #[clap(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ListFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Resolve an ARK. A trailing `?` or `??` asks for metadata.
    Resolve {
        /// Identifier path, e.g. `ark:/77298/example0abc`.
        path: String,
        /// Return the metadata record instead of the redirect target.
        #[clap(long)]
        metadata: bool,
        /// Metadata format: 'rdf-json' or 'erc-anvl'.
        #[clap(long, default_value = "rdf-json")]
        format: String,
        #[clap(flatten)]
        config: ConfigArgs,
    },
    /// Parse and normalize an ARK without resolving it.
    Parse {
        /// Identifier path.
        path: String,
    },
    /// List loaded mappers in routing priority order.
    Mappers {
        #[clap(flatten)]
        config: ConfigArgs,
        /// Output format.
        #[clap(long, value_enum, default_value_t = ListFormat::Text)]
        format: ListFormat,
    },
    /// Print the registry and backend schemas.
    Schema,
}

//! CLI commands and argument parsing

use clap::{Parser, Subcommand};

/// Nuclear power plant department registry
#[derive(Parser, Debug)]
#[command(name = "plant-registry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "3000")]
        port: u16,

        /// Address to bind
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: String,

        /// Record store (memory://, duckdb://:memory:, duckdb://<path>)
        #[arg(long, env = "STORE_URL", default_value = "memory://")]
        store_url: String,

        /// Shared secret for the documentation endpoint
        #[arg(long, env = "API_KEY", hide_env_values = true)]
        api_key: Option<String>,

        /// Server URL advertised in the API document
        /// Defaults to http://localhost:<port>
        #[arg(long, env = "PUBLIC_URL")]
        public_url: Option<String>,
    },

    /// Print the OpenAPI document
    Docs {
        /// Server URL advertised in the document
        #[arg(long, env = "PUBLIC_URL", default_value = "http://localhost:3000")]
        public_url: String,
    },

    /// List department resources and their fields
    Resources {
        /// Only show this collection
        collection: Option<String>,
    },

    /// Open the record store and report whether it is reachable
    Check {
        /// Record store (memory://, duckdb://:memory:, duckdb://<path>)
        #[arg(long, env = "STORE_URL", default_value = "memory://")]
        store_url: String,
    },
}

pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "recipebox")]
#[command(about = "Recipe import and ingredient search service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Run database migrations
    Migrate,

    /// Batch-import recipes from a JSON file
    Import {
        /// Path to a JSON file containing an array of recipe records
        file: String,
    },

    /// Search stored recipes by ingredients
    Search {
        /// Comma-separated ingredient list
        ingredients: String,
    },
}

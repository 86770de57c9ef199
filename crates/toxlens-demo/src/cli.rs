use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "toxlens-demo")]
#[command(
    author,
    version,
    about = "SMILES toxicity prediction demo with n-gram explanations"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the demo server with the web UI
    Serve {
        /// Listen port
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Listen address
        #[arg(short, long, default_value = "127.0.0.1")]
        address: String,

        /// Directory holding vectorizer.json, model.json and label.txt
        #[arg(long, default_value = "./artifacts")]
        artifacts: String,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the model-wide n-gram ranking without starting the server
    Explain {
        /// Directory holding vectorizer.json, model.json and label.txt
        #[arg(long, default_value = "./artifacts")]
        artifacts: String,

        /// Rows per table
        #[arg(short, long, default_value = "15")]
        top: usize,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },
}

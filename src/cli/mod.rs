use clap::Subcommand;

use crate::DEFAULT_ENDPOINT;

#[derive(Subcommand)]
pub enum Commands {
    /// Run the chat endpoint (POST /api/chat)
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Answer with an offline echo generator instead of calling Gemini
        #[arg(long)]
        mock: bool,
    },

    /// Open the terminal chat client
    Chat {
        #[arg(short, long, env = "CHATGATE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Append client logs to this file (logs are discarded otherwise)
        #[arg(long)]
        log_file: Option<String>,
    },

    /// Send a single message and print the bot's answer
    Ask {
        message: String,

        #[arg(short, long, env = "CHATGATE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
        endpoint: String,
    },
}

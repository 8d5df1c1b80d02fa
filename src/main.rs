use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tokio::io::AsyncBufReadExt;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use chatrelay::{AppState, ChatSession, GroqClient, HttpChatProxy};

#[derive(Parser)]
#[command(name = "chatrelay")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the chat API server (proxy to the completion service)
    Serve {
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,
    },

    /// Interactive terminal conversation against a running server
    Chat {
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        server_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve { port, public } => {
            let completion = Arc::new(GroqClient::from_env());
            let state = AppState::new(completion);

            let host = if public { [0, 0, 0, 0] } else { [127, 0, 0, 1] };
            let addr = SocketAddr::from((host, port));
            chatrelay::serve(state, addr).await?;
        }

        Commands::Chat { server_url } => {
            info!("Connecting to {}", server_url);
            run_chat(server_url).await?;
        }
    }

    Ok(())
}

/// Line-oriented conversation loop. Input is read only between round trips,
/// so at most one proxy call is ever in flight.
async fn run_chat(server_url: String) -> Result<()> {
    let proxy = Arc::new(HttpChatProxy::new(server_url));
    let mut session = ChatSession::new(proxy);

    println!("Type a message and press Enter. Ctrl-D to quit.");

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match session.submit(&line).await {
            Ok(reply) => println!("{}", reply.display_line()),
            // Blank input; the conversation is untouched.
            Err(_) => continue,
        }
    }

    if !session.conversation().is_empty() {
        println!("({} messages this session)", session.conversation().len());
    }

    Ok(())
}

//! Squirrels CLI Client
//!
//! Command-line interface for the squirrels API.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reqwest::{Client, RequestBuilder};

/// Squirrels CLI
#[derive(Parser, Debug)]
#[command(name = "squirrels-cli")]
#[command(about = "CLI for the squirrels REST API")]
struct Args {
    /// Server address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List all squirrels
    List,

    /// Get a squirrel by id
    Get {
        /// The squirrel id
        id: String,
    },

    /// Create a squirrel
    Create {
        /// Name of the squirrel
        name: String,

        /// Size of the squirrel
        size: String,
    },

    /// Replace name and size of a squirrel
    Update {
        /// The squirrel id
        id: String,

        /// New name
        name: String,

        /// New size
        size: String,
    },

    /// Delete a squirrel
    Delete {
        /// The squirrel id
        id: String,
    },
}

impl Commands {
    fn to_request(&self, client: &Client, base_url: &str) -> RequestBuilder {
        match self {
            Commands::List => client.get(format!("{}/squirrels", base_url)),
            Commands::Get { id } => client.get(format!("{}/squirrels/{}", base_url, id)),
            Commands::Create { name, size } => client
                .post(format!("{}/squirrels", base_url))
                .form(&[("name", name), ("size", size)]),
            Commands::Update { id, name, size } => client
                .put(format!("{}/squirrels/{}", base_url, id))
                .form(&[("name", name), ("size", size)]),
            Commands::Delete { id } => client.delete(format!("{}/squirrels/{}", base_url, id)),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let client = Client::new();
    let base_url = format!("http://{}", args.server);

    let response = match args.command.to_request(&client, &base_url).send().await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let status = response.status();
    println!("{}", status);

    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            eprintln!("error: failed to read response body: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if !body.is_empty() {
        match serde_json::from_slice::<serde_json::Value>(&body) {
            Ok(value) => match serde_json::to_string_pretty(&value) {
                Ok(pretty) => println!("{}", pretty),
                Err(_) => println!("{}", String::from_utf8_lossy(&body)),
            },
            Err(_) => println!("{}", String::from_utf8_lossy(&body)),
        }
    }

    if status.is_client_error() || status.is_server_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

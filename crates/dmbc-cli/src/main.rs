use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

/// DMBC transaction command-line interface.
#[derive(Parser)]
#[command(name = "dmbc")]
#[command(about = "Build, sign, and inspect DMBC add_assets transactions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fresh Ed25519 key pair.
    Keygen,

    /// Build an add_assets transaction from a JSON request.
    Build {
        /// Request file (see dmbc_tx::request for the format).
        #[arg(long)]
        request: PathBuf,

        /// Secret key (hex) to sign the encoded transaction with.
        #[arg(long)]
        secret_key: Option<String>,

        /// Header config file (JSON with network_id, protocol_version, service_id).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the header network id.
        #[arg(long)]
        network_id: Option<u8>,

        /// Override the header protocol version.
        #[arg(long)]
        protocol_version: Option<u8>,

        /// Override the header service id.
        #[arg(long)]
        service_id: Option<u16>,
    },

    /// Verify a detached signature over encoded transaction bytes.
    Verify {
        /// Encoded transaction (hex).
        #[arg(long)]
        tx: String,

        /// Signature (hex, 64 bytes).
        #[arg(long)]
        signature: String,

        /// Signer public key (hex). Defaults to the creator key in the transaction.
        #[arg(long)]
        public_key: Option<String>,
    },

    /// Decode an encoded transaction and print it as JSON.
    Decode {
        /// Encoded transaction (hex).
        #[arg(long)]
        tx: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Keygen => commands::keygen(),
        Commands::Build {
            request,
            secret_key,
            config,
            network_id,
            protocol_version,
            service_id,
        } => {
            let header = commands::HeaderArgs {
                config,
                network_id,
                protocol_version,
                service_id,
            };
            commands::build(&request, secret_key.as_deref(), &header)
        }
        Commands::Verify {
            tx,
            signature,
            public_key,
        } => commands::verify(&tx, &signature, public_key.as_deref()),
        Commands::Decode { tx } => commands::decode(&tx),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

use std::fs;
use std::path::PathBuf;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_signer_local::PrivateKeySigner;
use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use delegation::{
    hash_message, AttestationRequest, RevocationRequest, SignedRequest, TypedMessage,
};
use serde::Serialize;
use tracing::info;

use app::args::DomainArgs;

/// CLI to sign a delegated attestation or revocation and print the signed request.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(flatten)]
    domain: DomainArgs,

    /// Private key of the attester or revoker; if omitted, a random key is generated.
    #[clap(long, env = "USER_PRIVATE_KEY")]
    private_key: Option<PrivateKeySigner>,

    /// Write the signed request JSON to this file instead of stdout.
    #[clap(long, value_name = "FILE")]
    output: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign a delegated attestation.
    Attest {
        #[clap(long)]
        schema: B256,
        #[clap(long)]
        recipient: Address,
        /// Unix timestamp; 0 for no expiration.
        #[clap(long, default_value_t = 0)]
        expiration_time: u64,
        #[clap(long, default_value_t = true, action = ArgAction::Set)]
        revocable: bool,
        #[clap(long)]
        ref_uid: Option<B256>,
        /// Hex-encoded attestation data.
        #[clap(long)]
        data: Option<Bytes>,
        #[clap(long)]
        value: Option<U256>,
        /// Current delegation nonce of the attester, as read from the contract.
        #[clap(long)]
        nonce: U256,
        /// Unix timestamp; 0 for no deadline.
        #[clap(long, default_value_t = 0)]
        deadline: u64,
    },
    /// Sign a delegated revocation.
    Revoke {
        #[clap(long)]
        schema: B256,
        #[clap(long)]
        uid: B256,
        #[clap(long)]
        value: Option<U256>,
        #[clap(long)]
        nonce: U256,
        #[clap(long, default_value_t = 0)]
        deadline: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    app::init_tracing();
    app::load_dotenv()?;

    let args = Args::parse();
    let client = args.domain.client().await?;

    // Obtain signer (existing or random)
    let signer = match args.private_key {
        Some(pk) => pk,
        None => PrivateKeySigner::random(),
    };
    info!("Signing as {:#x}", signer.address());

    let separator = client.domain_separator()?;
    let (json, digest, signature) = match args.command {
        Command::Attest {
            schema,
            recipient,
            expiration_time,
            revocable,
            ref_uid,
            data,
            value,
            nonce,
            deadline,
        } => {
            let request = AttestationRequest {
                schema,
                recipient,
                expiration_time,
                revocable,
                ref_uid: ref_uid.unwrap_or_default(),
                data: data.unwrap_or_default(),
                value: value.unwrap_or_default(),
                nonce,
                deadline,
            };
            let signed = client.sign_delegated_attestation(&signer, request).await?;
            render(&signed, separator)?
        }
        Command::Revoke { schema, uid, value, nonce, deadline } => {
            let request = RevocationRequest {
                schema,
                uid,
                value: value.unwrap_or_default(),
                nonce,
                deadline,
            };
            let signed = client.sign_delegated_revocation(&signer, request).await?;
            render(&signed, separator)?
        }
    };

    match &args.output {
        Some(path) => fs::write(path, &json)?,
        None => println!("{json}"),
    }
    eprintln!("Digest: {digest}");
    eprintln!("Signature: {signature}");
    eprintln!("Signer: {:#x}", signer.address());

    Ok(())
}

/// Serialize a signed request and recompute its digest for display.
fn render<P: TypedMessage + Serialize>(
    signed: &SignedRequest<P>,
    separator: B256,
) -> Result<(String, B256, String)> {
    let digest = hash_message(separator, &signed.params)?;
    info!("Signed {} request", P::DECLARATION.primary_type);
    Ok((serde_json::to_string_pretty(signed)?, digest, signed.signature.to_hex()))
}

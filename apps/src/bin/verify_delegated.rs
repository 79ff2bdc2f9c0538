use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use delegation::{
    hash_message, AttestationParams, MessageKind, Party, RevocationParams, SignedRequest,
    TypedMessage,
};
use tracing::{debug, info};

use app::args::DomainArgs;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Kind {
    Attest,
    Revoke,
}

impl From<Kind> for MessageKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Attest => MessageKind::Attest,
            Kind::Revoke => MessageKind::Revoke,
        }
    }
}

/// CLI to check a signed delegated request before relaying it on-chain.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(flatten)]
    domain: DomainArgs,

    /// Which message the request file holds.
    #[clap(long, value_enum)]
    kind: Kind,

    /// Path to the signed request JSON, as printed by `sign_delegated`.
    #[clap(long, value_name = "FILE")]
    request: PathBuf,

    /// Claimed signer; defaults to the attester or revoker named in the request.
    #[clap(long)]
    signer: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    app::init_tracing();
    app::load_dotenv()?;

    let args = Args::parse();
    let client = args.domain.client().await?;
    let declaration = MessageKind::from(args.kind).declaration();
    debug!("Type signature: {}", declaration.type_signature());

    let bytes = fs::read(&args.request)?;
    let claimed = args.signer.as_deref().map(Party::parse).transpose()?;
    let separator = client.domain_separator()?;

    let (valid, digest) = match args.kind {
        Kind::Attest => {
            let request: SignedRequest<AttestationParams> = serde_json::from_slice(&bytes)?;
            let claimed = claimed.unwrap_or(Party::Address(request.params.signer()));
            (
                client.verify_delegated_attestation_signature(claimed, &request)?,
                hash_message(separator, &request.params)?,
            )
        }
        Kind::Revoke => {
            let request: SignedRequest<RevocationParams> = serde_json::from_slice(&bytes)?;
            let claimed = claimed.unwrap_or(Party::Address(request.params.signer()));
            (
                client.verify_delegated_revocation_signature(claimed, &request)?,
                hash_message(separator, &request.params)?,
            )
        }
    };

    info!("Digest: {digest}");
    if !valid {
        bail!("signature over {digest} was not produced by the claimed signer");
    }
    println!("valid {} signature, digest {digest}", declaration.primary_type);

    Ok(())
}

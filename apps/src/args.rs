use std::time::Duration;

use alloy_primitives::Address;
use anyhow::{bail, Result};
use clap::Args;
use delegation::{ClientConfig, Eip712Client, StaticVerifier, VerifyingContract};
use url::Url;

use crate::rpc::RpcVerifier;

/// Where the EIP-712 domain of the verifying contract comes from.
#[derive(Args, Debug, Clone)]
pub struct DomainArgs {
    /// URL of the Ethereum RPC endpoint. When omitted the domain must be given
    /// with --contract-name, --contract-version and --chain-id.
    #[clap(short, long, env)]
    pub rpc_url: Option<Url>,

    /// Address of the verifying contract.
    #[clap(short = 'a', long, env = "VERIFIER_ADDRESS")]
    pub verifier_address: Address,

    /// EIP-712 domain name, for offline use.
    #[clap(long, conflicts_with = "rpc_url")]
    pub contract_name: Option<String>,

    /// EIP-712 domain version, for offline use.
    #[clap(long, conflicts_with = "rpc_url")]
    pub contract_version: Option<String>,

    /// Chain id; read from the RPC endpoint when omitted.
    #[clap(long)]
    pub chain_id: Option<u64>,

    /// Timeout for each contract query or signing call, in seconds.
    #[clap(long)]
    pub timeout_secs: Option<u64>,
}

impl DomainArgs {
    /// Build a client with its domain captured.
    pub async fn client(&self) -> Result<Eip712Client<Box<dyn VerifyingContract>>> {
        let (verifier, chain_id): (Box<dyn VerifyingContract>, u64) = match &self.rpc_url {
            Some(url) => {
                let rpc = RpcVerifier::new(url.clone(), self.verifier_address);
                let chain_id = match self.chain_id {
                    Some(id) => id,
                    None => rpc.chain_id().await?,
                };
                (Box::new(rpc), chain_id)
            }
            None => {
                let (Some(name), Some(version), Some(chain_id)) =
                    (&self.contract_name, &self.contract_version, self.chain_id)
                else {
                    bail!("without --rpc-url, --contract-name, --contract-version and --chain-id are required");
                };
                let verifier = StaticVerifier::new(self.verifier_address, name.clone(), version.clone());
                (Box::new(verifier), chain_id)
            }
        };

        let mut config = ClientConfig::new(chain_id);
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(Eip712Client::from_verifier(verifier, config).await?)
    }
}

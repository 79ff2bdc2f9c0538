use alloy_primitives::Address;
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_sol_types::sol;
use async_trait::async_trait;
use delegation::{Eip712Error, VerifyingContract};
use url::Url;

sol! {
    /// The EIP-712 metadata getters of an attestation service deployment.
    #[sol(rpc)]
    interface IEip712Verifier {
        function getName() external view returns (string memory);
        function version() external view returns (string memory);
    }
}

/// Reads domain metadata from a deployed contract over JSON-RPC.
pub struct RpcVerifier {
    contract: IEip712Verifier::IEip712VerifierInstance<DynProvider>,
}

impl RpcVerifier {
    pub fn new(rpc_url: Url, address: Address) -> Self {
        let provider = ProviderBuilder::new().connect_http(rpc_url).erased();
        Self { contract: IEip712Verifier::new(address, provider) }
    }

    /// Chain id of the connected network.
    pub async fn chain_id(&self) -> anyhow::Result<u64> {
        Ok(self.contract.provider().get_chain_id().await?)
    }
}

#[async_trait]
impl VerifyingContract for RpcVerifier {
    async fn address(&self) -> delegation::Result<Address> {
        Ok(*self.contract.address())
    }

    async fn contract_name(&self) -> delegation::Result<String> {
        self.contract
            .getName()
            .call()
            .await
            .map_err(|e| Eip712Error::ContractQuery(format!("getName(): {e}")))
    }

    async fn contract_version(&self) -> delegation::Result<String> {
        self.contract
            .version()
            .call()
            .await
            .map_err(|e| Eip712Error::ContractQuery(format!("version(): {e}")))
    }
}

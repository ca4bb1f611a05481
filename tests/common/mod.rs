//! Shared mocks for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use iscn_registrar::blockchain::{
    AccountData, AccountState, BlockchainError, BlockchainResult, BroadcastReceipt, ChainConfig,
    Connector, Mnemonic, RpcEndpoint, SequenceResponse, SignerData, SigningClient, Wallet,
    WalletFactory,
};
use iscn_registrar::fees::GasEstimate;
use iscn_registrar::iscn::proto::TxRaw;
use iscn_registrar::iscn::{IscnMessage, Registry};
use prost::Message;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

pub const TEST_MNEMONIC: &str =
    "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
pub const SIGNER_ADDRESS: &str = "like1qyqszqgpqyqszqgpqyqszqgpqyqszqgpjnp7du";
pub const CHAIN_ID: &str = "likecoin-mainnet-2";

pub struct MockWallet {
    pub address: String,
}

#[async_trait]
impl Wallet for MockWallet {
    async fn accounts(&self) -> BlockchainResult<Vec<AccountData>> {
        Ok(vec![AccountData {
            address: self.address.clone(),
            algo: "secp256k1".into(),
            pubkey: vec![2; 33],
        }])
    }
}

/// Counts derivations; optionally fails the first `fail_first` attempts.
#[derive(Default)]
pub struct MockWalletFactory {
    pub derivations: AtomicUsize,
    pub fail_first: AtomicUsize,
    pub delay: Duration,
}

impl MockWalletFactory {
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay,
            ..Default::default()
        }
    }

    pub fn failing(times: usize) -> Self {
        Self {
            fail_first: AtomicUsize::new(times),
            ..Default::default()
        }
    }
}

#[async_trait]
impl WalletFactory for MockWalletFactory {
    async fn from_mnemonic(&self, mnemonic: &Mnemonic) -> BlockchainResult<Arc<dyn Wallet>> {
        assert_eq!(mnemonic.phrase(), TEST_MNEMONIC);
        self.derivations.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        let remaining = self.fail_first.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_first.store(remaining - 1, Ordering::SeqCst);
            return Err(BlockchainError::Wallet("derivation failed".into()));
        }
        Ok(Arc::new(MockWallet {
            address: SIGNER_ADDRESS.into(),
        }))
    }
}

/// What the signing client saw for one `sign` call.
#[derive(Debug, Clone)]
pub struct SignCall {
    pub signer: String,
    pub message_json: serde_json::Value,
    pub type_url: String,
    pub fee: GasEstimate,
    pub memo: String,
    pub signer_data: SignerData,
    pub looked_up_sequence: bool,
}

pub struct MockSigningClient {
    pub registry: Arc<Registry>,
    pub receipt: Mutex<BroadcastReceipt>,
    pub sequence: SequenceResponse,
    pub sign_calls: Mutex<Vec<SignCall>>,
    pub broadcasts: Mutex<Vec<Vec<u8>>>,
    pub sequence_queries: AtomicUsize,
}

impl MockSigningClient {
    pub fn new(registry: Arc<Registry>, receipt: BroadcastReceipt) -> Self {
        Self {
            registry,
            receipt: Mutex::new(receipt),
            sequence: SequenceResponse {
                account_number: 42,
                sequence: 7,
            },
            sign_calls: Mutex::new(Vec::new()),
            broadcasts: Mutex::new(Vec::new()),
            sequence_queries: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SigningClient for MockSigningClient {
    async fn sign(
        &self,
        signer: &str,
        messages: &[IscnMessage],
        fee: &GasEstimate,
        memo: &str,
        explicit_signer_data: Option<&SignerData>,
    ) -> BlockchainResult<TxRaw> {
        let (signer_data, looked_up_sequence) = match explicit_signer_data {
            Some(data) => (data.clone(), false),
            None => {
                let sequence = self.get_sequence(signer).await?;
                let data = SignerData {
                    account_number: sequence.account_number,
                    sequence: sequence.sequence,
                    chain_id: self.get_chain_id().await?,
                };
                (data, true)
            }
        };

        let any = self.registry.encode(&messages[0])?;
        self.sign_calls.lock().unwrap().push(SignCall {
            signer: signer.into(),
            message_json: serde_json::to_value(&messages[0]).unwrap(),
            type_url: any.type_url.clone(),
            fee: fee.clone(),
            memo: memo.into(),
            signer_data: signer_data.clone(),
            looked_up_sequence,
        });

        Ok(TxRaw {
            body_bytes: any.encode_to_vec(),
            auth_info_bytes: signer_data.sequence.to_be_bytes().to_vec(),
            signatures: vec![vec![0xab; 64]],
        })
    }

    async fn broadcast_tx(&self, tx_bytes: &[u8]) -> BlockchainResult<BroadcastReceipt> {
        self.broadcasts.lock().unwrap().push(tx_bytes.to_vec());
        Ok(self.receipt.lock().unwrap().clone())
    }

    async fn get_sequence(&self, address: &str) -> BlockchainResult<SequenceResponse> {
        assert_eq!(address, SIGNER_ADDRESS);
        self.sequence_queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.sequence)
    }

    async fn get_chain_id(&self) -> BlockchainResult<String> {
        Ok(CHAIN_ID.into())
    }
}

/// Hands out one shared `MockSigningClient`, counting connects; optionally
/// fails the first `fail_first` attempts.
pub struct MockConnector {
    pub connects: AtomicUsize,
    pub fail_first: AtomicUsize,
    pub receipt: BroadcastReceipt,
    pub client: Mutex<Option<Arc<MockSigningClient>>>,
    pub endpoints: Mutex<Vec<RpcEndpoint>>,
    pub delay: Duration,
}

impl MockConnector {
    pub fn new(receipt: BroadcastReceipt) -> Self {
        Self {
            connects: AtomicUsize::new(0),
            fail_first: AtomicUsize::new(0),
            receipt,
            client: Mutex::new(None),
            endpoints: Mutex::new(Vec::new()),
            delay: Duration::ZERO,
        }
    }

    pub fn failing(receipt: BroadcastReceipt, times: usize) -> Self {
        let connector = Self::new(receipt);
        connector.fail_first.store(times, Ordering::SeqCst);
        connector
    }

    pub fn client(&self) -> Arc<MockSigningClient> {
        self.client.lock().unwrap().clone().expect("not connected")
    }
}

#[async_trait]
impl Connector for MockConnector {
    async fn connect_with_signer(
        &self,
        endpoint: &RpcEndpoint,
        wallet: Arc<dyn Wallet>,
        registry: Arc<Registry>,
    ) -> BlockchainResult<Arc<dyn SigningClient>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;

        let remaining = self.fail_first.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_first.store(remaining - 1, Ordering::SeqCst);
            return Err(BlockchainError::Rpc("connection refused".into()));
        }
        assert_eq!(wallet.accounts().await?[0].address, SIGNER_ADDRESS);
        self.endpoints.lock().unwrap().push(endpoint.clone());

        let client = Arc::new(MockSigningClient::new(registry, self.receipt.clone()));
        *self.client.lock().unwrap() = Some(client.clone());
        Ok(client)
    }
}

pub fn success_receipt(iscn_id: &str) -> BroadcastReceipt {
    BroadcastReceipt {
        height: 1_234_567,
        code: 0,
        transaction_hash: "ABC123".into(),
        raw_log: Some(format!(
            r#"[{{"events":[{{"type":"message","attributes":[{{"key":"action","value":"create_iscn_record"}}]}},{{"type":"iscn_record","attributes":[{{"key":"iscn_id","value":"{}"}}]}}]}}]"#,
            iscn_id
        )),
        gas_used: 160_000,
        gas_wanted: 170_000,
    }
}

pub fn chain_config() -> ChainConfig {
    ChainConfig {
        rpc_url: "https://mainnet-node.like.co/rpc/".into(),
        rpc_timeout_secs: 15,
        ..Default::default()
    }
}

pub fn account_state(
    wallets: Arc<MockWalletFactory>,
    connector: Arc<MockConnector>,
) -> Arc<AccountState> {
    Arc::new(AccountState::new(
        &chain_config(),
        Mnemonic::new(TEST_MNEMONIC).unwrap(),
        wallets,
        connector,
    ))
}

/// Start a programmable HTTP backend answering every request with `f()`.
pub async fn start_programmable_backend<F, Fut>(addr: SocketAddr, f: F)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind(addr).await.unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;

                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

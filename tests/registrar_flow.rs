//! End-to-end submit flow against mock wallet and signing client.

use futures_util::future::join_all;
use iscn_registrar::blockchain::{BlockchainError, IscnRegistrar, SignerData};
use iscn_registrar::fees::GasModel;
use iscn_registrar::iscn::proto::{Any, MsgUpdateIscnRecord, TxRaw};
use iscn_registrar::iscn::{
    format_payload, ContentPayload, IscnMessage, IscnTxInput, MSG_CREATE_ISCN_RECORD,
    MSG_UPDATE_ISCN_RECORD,
};
use prost::Message;
use serde_json::json;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

mod common;

use common::{
    account_state, success_receipt, MockConnector, MockWalletFactory, CHAIN_ID, SIGNER_ADDRESS,
};

const MINTED_ID: &str = "iscn://likecoin-chain/abc123/1";

fn article() -> ContentPayload {
    serde_json::from_value(json!({
        "hash": "ipfs://bafy-article",
        "title": "On Registries",
        "author": "Alice",
        "url": "https://example.com/registries",
        "keywords": "iscn,registry"
    }))
    .unwrap()
}

fn registrar(
    wallets: Arc<MockWalletFactory>,
    connector: Arc<MockConnector>,
) -> IscnRegistrar {
    IscnRegistrar::new(account_state(wallets, connector), GasModel::default())
}

#[tokio::test]
async fn test_create_record() {
    let wallets = Arc::new(MockWalletFactory::default());
    let connector = Arc::new(MockConnector::new(success_receipt(MINTED_ID)));
    let registrar = registrar(wallets.clone(), connector.clone());

    let result = registrar
        .submit(&IscnTxInput::create(article()), None)
        .await
        .unwrap();
    assert_eq!(result.tx_hash, "ABC123");
    assert_eq!(result.iscn_id.as_deref(), Some(MINTED_ID));

    let client = connector.client();
    let calls = client.sign_calls.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    let call = &calls[0];
    assert_eq!(call.signer, SIGNER_ADDRESS);
    assert_eq!(call.type_url, MSG_CREATE_ISCN_RECORD);
    assert_eq!(call.memo, "");
    assert_eq!(call.message_json["value"]["from"], SIGNER_ADDRESS);
    assert!(call.message_json["value"].get("iscnId").is_none());
    assert_eq!(
        call.message_json["value"]["record"]["contentFingerprints"],
        json!(["ipfs://bafy-article"])
    );

    // Sequence came from the chain.
    assert!(call.looked_up_sequence);
    assert_eq!(call.signer_data.sequence, 7);
    assert_eq!(call.signer_data.chain_id, CHAIN_ID);

    // Fee is the gas model applied to the exact message that was signed.
    let expected = GasModel::default()
        .estimate(&IscnMessage::new(
            SIGNER_ADDRESS,
            None,
            format_payload(&article(), 1).unwrap(),
        ))
        .unwrap();
    assert_eq!(call.fee, expected);
    assert_eq!(call.fee.amount[0].denom, "nanolike");
}

#[tokio::test]
async fn test_update_record() {
    let existing = "iscn://likecoin-chain/abc123";
    let wallets = Arc::new(MockWalletFactory::default());
    let connector = Arc::new(MockConnector::new(success_receipt(
        "iscn://likecoin-chain/abc123/2",
    )));
    let registrar = registrar(wallets, connector.clone());

    let result = registrar
        .submit(&IscnTxInput::update(existing, article()), None)
        .await
        .unwrap();
    assert_eq!(
        result.iscn_id.as_deref(),
        Some("iscn://likecoin-chain/abc123/2")
    );

    let client = connector.client();
    let call = client.sign_calls.lock().unwrap()[0].clone();
    assert_eq!(call.type_url, MSG_UPDATE_ISCN_RECORD);
    assert_eq!(call.message_json["value"]["iscnId"], existing);

    // The broadcast bytes carry the update message.
    let broadcasts = client.broadcasts.lock().unwrap().clone();
    assert_eq!(broadcasts.len(), 1);
    let tx = TxRaw::decode(broadcasts[0].as_slice()).unwrap();
    let any = Any::decode(tx.body_bytes.as_slice()).unwrap();
    assert_eq!(any.type_url, MSG_UPDATE_ISCN_RECORD);
    let msg = MsgUpdateIscnRecord::decode(any.value.as_slice()).unwrap();
    assert_eq!(msg.from, SIGNER_ADDRESS);
    assert_eq!(msg.iscn_id, existing);
}

#[tokio::test]
async fn test_empty_iscn_id_creates() {
    let wallets = Arc::new(MockWalletFactory::default());
    let connector = Arc::new(MockConnector::new(success_receipt(MINTED_ID)));
    let registrar = registrar(wallets, connector.clone());

    let input = IscnTxInput {
        iscn_id: Some(String::new()),
        payload: article(),
    };
    registrar.submit(&input, None).await.unwrap();

    let call = connector.client().sign_calls.lock().unwrap()[0].clone();
    assert_eq!(call.type_url, MSG_CREATE_ISCN_RECORD);
}

#[tokio::test]
async fn test_explicit_signer_data_skips_lookup() {
    let wallets = Arc::new(MockWalletFactory::default());
    let connector = Arc::new(MockConnector::new(success_receipt(MINTED_ID)));
    let registrar = registrar(wallets, connector.clone());

    let signer_data = SignerData {
        account_number: 42,
        sequence: 19,
        chain_id: CHAIN_ID.into(),
    };
    registrar
        .submit(&IscnTxInput::create(article()), Some(signer_data.clone()))
        .await
        .unwrap();

    let client = connector.client();
    let call = client.sign_calls.lock().unwrap()[0].clone();
    assert!(!call.looked_up_sequence);
    assert_eq!(call.signer_data, signer_data);
    assert_eq!(client.sequence_queries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_chain_rejection() {
    let mut receipt = success_receipt(MINTED_ID);
    receipt.code = 5;
    receipt.raw_log = Some("insufficient funds".into());

    let wallets = Arc::new(MockWalletFactory::default());
    let connector = Arc::new(MockConnector::new(receipt));
    let registrar = registrar(wallets, connector);

    let err = registrar
        .submit(&IscnTxInput::create(article()), None)
        .await
        .unwrap_err();
    match err {
        BlockchainError::ChainRejected {
            tx_hash,
            code,
            raw_log,
        } => {
            assert_eq!(tx_hash, "ABC123");
            assert_eq!(code, 5);
            assert_eq!(raw_log, "insufficient funds");
        }
        other => panic!("expected ChainRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_fingerprint_rejected_before_signing() {
    let wallets = Arc::new(MockWalletFactory::default());
    let connector = Arc::new(MockConnector::new(success_receipt(MINTED_ID)));
    let registrar = registrar(wallets, connector.clone());

    let payload: ContentPayload = serde_json::from_value(json!({"title": "no hash"})).unwrap();
    let err = registrar
        .submit(&IscnTxInput::create(payload), None)
        .await
        .unwrap_err();
    assert!(matches!(err, BlockchainError::Payload(_)));
    assert_eq!(connector.connects.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_event_yields_no_id() {
    let mut receipt = success_receipt(MINTED_ID);
    receipt.raw_log = Some("[]".into());

    let wallets = Arc::new(MockWalletFactory::default());
    let connector = Arc::new(MockConnector::new(receipt));
    let registrar = registrar(wallets, connector);

    let result = registrar
        .submit(&IscnTxInput::create(article()), None)
        .await
        .unwrap();
    assert_eq!(result.tx_hash, "ABC123");
    assert_eq!(result.iscn_id, None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_first_callers_share_one_initialization() {
    let wallets = Arc::new(MockWalletFactory::slow(Duration::from_millis(50)));
    let connector = Arc::new(MockConnector::new(success_receipt(MINTED_ID)));
    let accounts = account_state(wallets.clone(), connector.clone());

    let tasks = (0..16).map(|_| {
        let accounts = accounts.clone();
        tokio::spawn(async move {
            let identity = accounts.resolve_identity().await.unwrap();
            accounts.signing_client().await.unwrap();
            identity.address().to_string()
        })
    });
    let addresses: Vec<String> = join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    assert!(addresses.iter().all(|a| a == SIGNER_ADDRESS));
    assert_eq!(wallets.derivations.load(Ordering::SeqCst), 1);
    assert_eq!(connector.connects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_derivation_retried_on_next_call() {
    let wallets = Arc::new(MockWalletFactory::failing(1));
    let connector = Arc::new(MockConnector::new(success_receipt(MINTED_ID)));
    let registrar = registrar(wallets.clone(), connector.clone());

    let err = registrar
        .submit(&IscnTxInput::create(article()), None)
        .await
        .unwrap_err();
    assert!(matches!(err, BlockchainError::Wallet(_)));
    assert!(!registrar.accounts().is_identity_resolved());
    assert!(!registrar.accounts().is_connected());

    registrar
        .submit(&IscnTxInput::create(article()), None)
        .await
        .unwrap();
    assert_eq!(wallets.derivations.load(Ordering::SeqCst), 2);
    assert_eq!(connector.connects.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failed_connect_retried_on_next_call() {
    let wallets = Arc::new(MockWalletFactory::default());
    let connector = Arc::new(MockConnector::failing(success_receipt(MINTED_ID), 1));
    let registrar = registrar(wallets.clone(), connector.clone());

    let err = registrar
        .submit(&IscnTxInput::create(article()), None)
        .await
        .unwrap_err();
    assert!(matches!(err, BlockchainError::Rpc(_)));
    assert!(registrar.accounts().is_identity_resolved());
    assert!(!registrar.accounts().is_connected());

    assert_eq!(registrar.accounts().get_sequence().await.unwrap(), 7);
    assert!(registrar.accounts().is_connected());
    assert_eq!(wallets.derivations.load(Ordering::SeqCst), 1);
    assert_eq!(connector.connects.load(Ordering::SeqCst), 2);

    let result = registrar
        .submit(&IscnTxInput::create(article()), None)
        .await
        .unwrap();
    assert_eq!(result.iscn_id.as_deref(), Some(MINTED_ID));
    assert_eq!(connector.connects.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_sequence_queries() {
    let wallets = Arc::new(MockWalletFactory::default());
    let connector = Arc::new(MockConnector::new(success_receipt(MINTED_ID)));
    let accounts = account_state(wallets.clone(), connector.clone());
    assert!(!accounts.is_connected());

    assert_eq!(accounts.get_sequence().await.unwrap(), 7);
    let data = accounts.get_signer_data().await.unwrap();
    assert_eq!(
        data,
        SignerData {
            account_number: 42,
            sequence: 7,
            chain_id: CHAIN_ID.into(),
        }
    );

    // Repeated queries reuse the identity and client.
    assert_eq!(wallets.derivations.load(Ordering::SeqCst), 1);
    assert_eq!(connector.connects.load(Ordering::SeqCst), 1);
    assert_eq!(connector.client().sequence_queries.load(Ordering::SeqCst), 2);

    let endpoints = connector.endpoints.lock().unwrap().clone();
    assert_eq!(endpoints[0].url, common::chain_config().rpc_url);
    assert_eq!(endpoints[0].timeout, Duration::from_secs(15));
}

#[tokio::test]
async fn test_account_state_from_config() {
    use iscn_registrar::blockchain::AccountState;
    use iscn_registrar::RegistrarConfig;

    let mut config = RegistrarConfig::default();
    config.signer.mnemonic_env = "ISCN_REGISTRAR_FLOW_TEST_MNEMONIC".into();
    config.chain = common::chain_config();

    let wallets = Arc::new(MockWalletFactory::default());
    let connector = Arc::new(MockConnector::new(success_receipt(MINTED_ID)));
    let missing = AccountState::from_config(&config, wallets.clone(), connector.clone());
    assert!(matches!(missing, Err(BlockchainError::Wallet(_))));

    std::env::set_var(&config.signer.mnemonic_env, common::TEST_MNEMONIC);
    let accounts = AccountState::from_config(&config, wallets, connector).unwrap();
    let identity = accounts.resolve_identity().await.unwrap();
    assert_eq!(identity.address(), SIGNER_ADDRESS);
    assert_eq!(accounts.endpoint().url, config.chain.rpc_url);
}

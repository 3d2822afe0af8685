// SPDX-License-Identifier: GPL-3.0-or-later
//
// masterpass
// Copyright (C) 2025  Nikita Podvirnyi <krypt0nn@vk.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use masterpass_protocol::prelude::*;
use masterpass_protocol::crypto::base64_decode;

use crate::config::AlgodConfig;

/// Header used by algod for API token authentication.
pub const ALGOD_TOKEN_HEADER: &str = "X-Algo-API-Token";

/// Amount of rounds a transaction stays valid after the node's last round.
pub const VALIDITY_WINDOW: u64 = 1000;

/// Parameters of a new asset creation.
#[derive(Clone)]
pub struct AssetCreateParams {
    pub sender: Address,
    pub signer: Arc<dyn TransactionSigner>,

    /// Total amount of base units.
    pub total: u64,
    pub decimals: u32,
    pub default_frozen: bool,

    pub asset_name: String,
    pub unit_name: String,

    pub url: Option<String>,
    pub metadata_hash: Option<[u8; 32]>
}

impl AssetCreateParams {
    pub fn new(
        sender: Address,
        signer: Arc<dyn TransactionSigner>,
        params: AssetParams
    ) -> Self {
        Self {
            sender,
            signer,
            total: params.total,
            decimals: params.decimals,
            default_frozen: params.default_frozen,
            asset_name: params.asset_name,
            unit_name: params.unit_name,
            url: params.url,
            metadata_hash: params.metadata_hash
        }
    }

    /// On-chain asset parameters. Created assets have no management
    /// addresses.
    pub fn asset_params(&self) -> AssetParams {
        AssetParams {
            total: self.total,
            decimals: self.decimals,
            default_frozen: self.default_frozen,
            unit_name: self.unit_name.clone(),
            asset_name: self.asset_name.clone(),
            url: self.url.clone(),
            metadata_hash: self.metadata_hash,
            ..AssetParams::default()
        }
    }
}

impl std::fmt::Debug for AssetCreateParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetCreateParams")
            .field("sender", &self.sender)
            .field("total", &self.total)
            .field("decimals", &self.decimals)
            .field("default_frozen", &self.default_frozen)
            .field("asset_name", &self.asset_name)
            .field("unit_name", &self.unit_name)
            .field("url", &self.url)
            .field("metadata_hash", &self.metadata_hash)
            .finish_non_exhaustive()
    }
}

/// Parameters of an Algo transfer.
#[derive(Clone)]
pub struct PaymentParams {
    pub sender: Address,
    pub signer: Arc<dyn TransactionSigner>,
    pub receiver: Address,

    /// Amount in microAlgos.
    pub amount: u64
}

impl std::fmt::Debug for PaymentParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentParams")
            .field("sender", &self.sender)
            .field("receiver", &self.receiver)
            .field("amount", &self.amount)
            .finish_non_exhaustive()
    }
}

/// Result of a sent transaction.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SendResult {
    pub tx_ids: Vec<String>,
    pub confirmed_round: Option<u64>,

    /// Index of the created asset.
    pub asset_id: Option<u64>
}

impl SendResult {
    /// Id of the first sent transaction.
    #[inline]
    pub fn tx_id(&self) -> &str {
        self.tx_ids.first()
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Blockchain client used by the dialogs.
#[async_trait]
pub trait AlgorandClient: Send + Sync {
    async fn send_asset_create(&self, params: AssetCreateParams) -> anyhow::Result<SendResult>;

    async fn send_payment(&self, params: PaymentParams) -> anyhow::Result<SendResult>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct TransactionParamsResponse {
    fee: u64,
    min_fee: u64,
    last_round: u64,
    genesis_id: String,
    genesis_hash: String
}

#[derive(Debug, Deserialize)]
struct PostTransactionResponse {
    #[serde(rename = "txId")]
    tx_id: String
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct NodeStatusResponse {
    last_round: u64
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String
}

/// State of a transaction in the node's pool.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PendingTransaction {
    #[serde(default)]
    pub confirmed_round: Option<u64>,

    #[serde(default)]
    pub asset_index: Option<u64>,

    /// Non-empty when the transaction was kicked out of the pool.
    #[serde(default)]
    pub pool_error: String
}

impl PendingTransaction {
    #[inline]
    pub fn is_confirmed(&self) -> bool {
        self.confirmed_round.is_some_and(|round| round > 0)
    }
}

/// Algod REST API client.
#[derive(Debug, Clone)]
pub struct AlgodClient {
    url: Url,
    token: String,
    wait_rounds: u64,
    client: reqwest::Client
}

impl AlgodClient {
    pub fn new(config: &AlgodConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let mut url = config.url()?;

        // Keep the base path when joining endpoints.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());

            url.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .user_agent(concat!("masterpass/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            url,
            token: config.token.clone(),
            wait_rounds: config.wait_rounds,
            client
        })
    }

    #[inline(always)]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        self.url.join(path)
            .with_context(|| format!("failed to build algod endpoint url: {path}"))
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.token.is_empty() {
            request
        } else {
            request.header(ALGOD_TOKEN_HEADER, &self.token)
        }
    }

    async fn read_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response
    ) -> anyhow::Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|error| error.message)
                .unwrap_or(body);

            anyhow::bail!("algod request failed with status {status}: {message}");
        }

        response.json::<T>().await
            .context("failed to decode algod response")
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> anyhow::Result<T> {
        let response = self.authorize(self.client.get(self.endpoint(path)?))
            .send()
            .await
            .with_context(|| format!("failed to request algod endpoint {path}"))?;

        Self::read_response(response).await
    }

    /// Get transaction params suggested by the node.
    pub async fn suggested_params(&self) -> anyhow::Result<SuggestedParams> {
        let params = self.get::<TransactionParamsResponse>("v2/transactions/params").await?;

        let genesis_hash = base64_decode(&params.genesis_hash)
            .context("failed to decode genesis hash")?;

        let genesis_hash = <[u8; 32]>::try_from(genesis_hash.as_slice())
            .map_err(|_| anyhow::anyhow!("genesis hash must be 32 bytes long"))?;

        Ok(SuggestedParams {
            fee: params.fee,
            min_fee: params.min_fee,
            first_valid: params.last_round,
            last_valid: params.last_round + VALIDITY_WINDOW,
            genesis_id: params.genesis_id,
            genesis_hash
        })
    }

    /// Get the last round known to the node.
    pub async fn last_round(&self) -> anyhow::Result<u64> {
        Ok(self.get::<NodeStatusResponse>("v2/status").await?.last_round)
    }

    /// Wait until the node has a block after the given round.
    pub async fn wait_for_block_after(&self, round: u64) -> anyhow::Result<u64> {
        let status = self.get::<NodeStatusResponse>(
            &format!("v2/status/wait-for-block-after/{round}")
        ).await?;

        Ok(status.last_round)
    }

    pub async fn pending_transaction(&self, tx_id: &str) -> anyhow::Result<PendingTransaction> {
        self.get(&format!("v2/transactions/pending/{tx_id}")).await
    }

    /// Submit signed transaction bytes to the pool and return its id.
    pub async fn send_raw_transaction(&self, transaction: Vec<u8>) -> anyhow::Result<String> {
        let request = self.client.post(self.endpoint("v2/transactions")?)
            .header(reqwest::header::CONTENT_TYPE, "application/x-binary")
            .body(transaction);

        let response = self.authorize(request)
            .send()
            .await
            .context("failed to send transaction to algod")?;

        let response = Self::read_response::<PostTransactionResponse>(response).await?;

        Ok(response.tx_id)
    }

    /// Poll the pending transaction until it's confirmed, at most
    /// `wait_rounds` rounds.
    pub async fn wait_for_confirmation(
        &self,
        tx_id: &str,
        wait_rounds: u64
    ) -> anyhow::Result<PendingTransaction> {
        let start_round = self.last_round().await? + 1;
        let mut current_round = start_round;

        while current_round < start_round + wait_rounds {
            let pending = self.pending_transaction(tx_id).await?;

            if pending.is_confirmed() {
                return Ok(pending);
            }

            if !pending.pool_error.is_empty() {
                anyhow::bail!("transaction {tx_id} was rejected: {}", pending.pool_error);
            }

            self.wait_for_block_after(current_round).await?;

            current_round += 1;
        }

        anyhow::bail!("transaction {tx_id} not confirmed after {wait_rounds} rounds")
    }

    /// Build, sign, send and confirm a transaction.
    pub async fn send_transaction(
        &self,
        sender: Address,
        signer: &dyn TransactionSigner,
        kind: TransactionKind
    ) -> anyhow::Result<SendResult> {
        let params = self.suggested_params().await
            .context("failed to get suggested params")?;

        let transaction = Transaction::new(sender, &params, kind);

        tracing::debug!(
            kind = transaction.kind.type_name(),
            %sender,
            fee = transaction.fee,
            first_valid = transaction.first_valid,
            last_valid = transaction.last_valid,
            "signing transaction"
        );

        let transaction = signer.sign(transaction)?;
        let local_id = transaction.id();

        let tx_id = self.send_raw_transaction(transaction.encode()).await?;

        if tx_id != local_id {
            tracing::warn!(?tx_id, ?local_id, "algod returned unexpected transaction id");
        }

        tracing::info!(?tx_id, "transaction sent, waiting for confirmation");

        let pending = self.wait_for_confirmation(&tx_id, self.wait_rounds).await?;

        tracing::info!(?tx_id, confirmed_round = ?pending.confirmed_round, "transaction confirmed");

        Ok(SendResult {
            tx_ids: vec![tx_id],
            confirmed_round: pending.confirmed_round,
            asset_id: pending.asset_index
        })
    }
}

#[async_trait]
impl AlgorandClient for AlgodClient {
    async fn send_asset_create(&self, params: AssetCreateParams) -> anyhow::Result<SendResult> {
        let asset_params = params.asset_params();

        asset_params.validate()?;

        self.send_transaction(
            params.sender,
            params.signer.as_ref(),
            TransactionKind::AssetConfig {
                asset_id: 0,
                params: asset_params
            }
        ).await
    }

    async fn send_payment(&self, params: PaymentParams) -> anyhow::Result<SendResult> {
        self.send_transaction(
            params.sender,
            params.signer.as_ref(),
            TransactionKind::Payment {
                receiver: params.receiver,
                amount: params.amount
            }
        ).await
    }
}

#[test]
fn test_asset_params() {
    let secret_key = SecretKey::from_bytes(&[7; 32]);

    let url = "ipfs://bafkreih5aznjvttude6c3wbvqeebb6rlx5wkbzyppv7garjiubll2ceym4#arc3";

    let params = AssetCreateParams::new(
        secret_key.address(),
        Arc::new(secret_key),
        AssetParams::masterpass_ticket(url)
    );

    assert_eq!(params.asset_params(), AssetParams::masterpass_ticket(url));
    assert!(!format!("{params:?}").contains("signer"));
}

#[test]
fn test_pending_transaction() -> anyhow::Result<()> {
    let pending = serde_json::from_str::<PendingTransaction>(r#"{
        "confirmed-round": 42,
        "asset-index": 1003,
        "pool-error": "",
        "txn": {}
    }"#)?;

    assert!(pending.is_confirmed());
    assert_eq!(pending.asset_index, Some(1003));

    let pending = serde_json::from_str::<PendingTransaction>(r#"{ "pool-error": "overspend" }"#)?;

    assert!(!pending.is_confirmed());
    assert_eq!(pending.pool_error, "overspend");

    Ok(())
}

#[test]
fn test_endpoint() -> anyhow::Result<()> {
    let client = AlgodClient::new(&AlgodConfig {
        server: String::from("https://node.example/algod"),
        port: None,
        ..AlgodConfig::default()
    })?;

    assert_eq!(
        client.endpoint("v2/transactions/params")?.as_str(),
        "https://node.example/algod/v2/transactions/params"
    );

    Ok(())
}

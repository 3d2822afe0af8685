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

use std::io::{Read, Write};
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use spin::RwLock;

use masterpass_protocol::prelude::*;

pub mod consts;
pub mod utils;
pub mod config;
pub mod logging;
pub mod accounts;
pub mod wallet;
pub mod notifications;
pub mod algod;
pub mod dialogs;
pub mod tui;

use accounts::Account;
use algod::AlgodClient;
use config::AlgodConfig;
use dialogs::{Dialog, Form, Outcome};
use notifications::Console;
use wallet::WalletSession;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    node: NodeArgs,

    #[command(subcommand)]
    command: Option<Command>
}

/// Algod connection flags. Take priority over the environment variables.
#[derive(Args)]
struct NodeArgs {
    /// Algod server URL (`ALGOD_SERVER`).
    #[arg(long, global = true)]
    algod_server: Option<String>,

    /// Algod server port (`ALGOD_PORT`).
    #[arg(long, global = true)]
    algod_port: Option<u16>,

    /// Algod API token (`ALGOD_TOKEN`).
    #[arg(long, global = true)]
    algod_token: Option<String>,

    /// Algod network name (`ALGOD_NETWORK`).
    #[arg(long, global = true)]
    algod_network: Option<String>,

    /// Amount of rounds to wait for transaction confirmation.
    #[arg(long, global = true)]
    wait_rounds: Option<u64>
}

impl NodeArgs {
    fn config(&self) -> anyhow::Result<AlgodConfig> {
        let mut config = AlgodConfig::from_env()
            .context("failed to read algod config")?;

        if let Some(server) = &self.algod_server {
            config.server = server.clone();
        }

        if let Some(port) = self.algod_port {
            config.port = Some(port);
        }

        if let Some(token) = &self.algod_token {
            config.token = token.clone();
        }

        if let Some(network) = &self.algod_network {
            config.network = network.clone();
        }

        if let Some(wait_rounds) = self.wait_rounds {
            config.wait_rounds = wait_rounds;
        }

        config.validate()?;

        Ok(config)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Wallet accounts management tools.
    Account {
        #[command(subcommand)]
        command: AccountCommand
    },

    /// Create new assets.
    Mint {
        #[command(subcommand)]
        command: MintCommand
    },

    /// Send algos to another address.
    Pay {
        /// Title or address of the sender account.
        #[arg(long)]
        account: String,

        /// Receiver address.
        #[arg(long)]
        receiver: String,

        /// Amount in algos.
        #[arg(long)]
        amount: String
    }
}

impl Command {
    #[inline]
    pub async fn run(self, node: &NodeArgs) -> anyhow::Result<()> {
        match self {
            Self::Account { command } => command.run(),
            Self::Mint { command } => command.run(node).await,

            Self::Pay { account, receiver, amount } => {
                submit_headless(node, &account, dialogs::PaymentForm {
                    receiver,
                    amount
                }).await
            }
        }
    }
}

#[derive(Subcommand)]
enum AccountCommand {
    /// Create new random account and print its address.
    Create {
        #[arg(long)]
        title: Option<String>
    },

    /// Import account from the base64 secret key.
    ///
    /// If `secret-key` argument is not specified then stdin value will be
    /// used as input.
    Import {
        #[arg(long)]
        secret_key: Option<String>,

        #[arg(long)]
        title: Option<String>
    },

    /// List stored accounts.
    List,

    /// Print address of the stored account.
    Export {
        /// Title or address of the account.
        #[arg(long)]
        title: String
    }
}

impl AccountCommand {
    pub fn run(self) -> anyhow::Result<()> {
        let mut stdout = std::io::stdout();

        match self {
            Self::Create { title } => {
                let secret_key = SecretKey::random(&mut utils::get_rng());

                let account = save_account(title, secret_key)?;

                stdout.write_all(format!("{}\n", account.address()).as_bytes())?;
            }

            Self::Import { secret_key, title } => {
                let secret_key = match secret_key {
                    Some(secret_key) => secret_key,
                    None => {
                        let mut secret_key = String::new();

                        std::io::stdin().read_to_string(&mut secret_key)?;

                        secret_key
                    }
                };

                let secret_key = SecretKey::from_base64(secret_key.trim())
                    .ok_or_else(|| anyhow::anyhow!("failed to decode secret key"))?;

                let account = save_account(title, secret_key)?;

                stdout.write_all(format!("{}\n", account.address()).as_bytes())?;
            }

            Self::List => {
                let accounts = accounts::read()?;

                let table = utils::make_table(["#", "Title", "Address", "Created at"], accounts.iter()
                    .enumerate()
                    .map(|(i, account)| [
                        (i + 1).to_string(),
                        format!("{} {}", account.emoji(), account.title()),
                        account.address().to_string(),
                        account.created_at().to_string()
                    ]));

                stdout.write_all(format!("{table}\n").as_bytes())?;
            }

            Self::Export { title } => {
                let accounts = accounts::read()?;

                let account = accounts::find(&accounts, &title)
                    .ok_or_else(|| anyhow::anyhow!("account {title} not found"))?;

                stdout.write_all(format!("{}\n", account.address()).as_bytes())?;
            }
        }

        stdout.flush()?;

        Ok(())
    }
}

#[derive(Subcommand)]
enum MintCommand {
    /// Mint a single MasterPass ticket NFT.
    Nft {
        /// Title or address of the creator account.
        #[arg(long)]
        account: String,

        /// Metadata URL, e.g. `ipfs://<cid>#arc3`.
        #[arg(long)]
        url: String
    },

    /// Mint a fungible token.
    Token {
        /// Title or address of the creator account.
        #[arg(long)]
        account: String,

        /// Asset name.
        #[arg(long)]
        name: String,

        /// Unit name.
        #[arg(long)]
        unit: String,

        /// Human-readable total supply, scaled by `10^decimals`.
        #[arg(long)]
        supply: String,

        #[arg(long, default_value = "0")]
        decimals: String
    }
}

impl MintCommand {
    pub async fn run(self, node: &NodeArgs) -> anyhow::Result<()> {
        match self {
            Self::Nft { account, url } => {
                submit_headless(node, &account, dialogs::NftMintForm {
                    metadata_url: url
                }).await
            }

            Self::Token { account, name, unit, supply, decimals } => {
                submit_headless(node, &account, dialogs::TokenMintForm {
                    asset_name: name,
                    unit_name: unit,
                    total_supply: supply,
                    decimals
                }).await
            }
        }
    }
}

fn save_account(title: Option<String>, secret_key: SecretKey) -> anyhow::Result<Account> {
    let title = title.unwrap_or_else(|| utils::bytes_to_shortname(secret_key.public_key()));

    let account = Account::new(title, secret_key);

    let mut accounts = accounts::read()?;

    let (index, inserted) = accounts::insert(&mut accounts, account);

    let account = accounts[index].clone();

    if !inserted {
        tracing::info!(address = %account.address(), title = %account.title(), "account already stored");

        return Ok(account);
    }

    accounts::write(accounts)
        .context("failed to save accounts")?;

    tracing::info!(address = %account.address(), "account saved");

    Ok(account)
}

/// Run the dialog workflow without the TUI, printing notices to the console.
async fn submit_headless<F: Form>(
    node: &NodeArgs,
    account: &str,
    form: F
) -> anyhow::Result<()> {
    let accounts = accounts::read()?;

    let account = accounts::find(&accounts, account)
        .ok_or_else(|| anyhow::anyhow!("account {account} not found"))?;

    let mut session = WalletSession::default();

    session.connect(account);

    let client = AlgodClient::new(&node.config()?)?;

    let dialog = RwLock::new(Dialog {
        open: true,
        form,
        ..Dialog::default()
    });

    match dialogs::submit(&dialog, &session, &client, &Console).await {
        Outcome::Sent(result) => {
            if let Some(asset_id) = result.asset_id {
                let mut stdout = std::io::stdout();

                stdout.write_all(format!("asset id: {asset_id}\n").as_bytes())?;
                stdout.flush()?;
            }

            Ok(())
        }

        outcome => anyhow::bail!("{} request was not completed: {outcome:?}", F::TITLE)
    }
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    std::fs::create_dir_all(consts::DATA_FOLDER.as_path())
        .map_err(|err| {
            anyhow::anyhow!(err)
                .context("failed to create masterpass data folder")
        })?;

    let _logging_guard = logging::init_logging(consts::LOGS_FOLDER.as_path())?;

    let cli = Cli::parse();

    tracing::info!(version = VERSION, "masterpass started");

    match cli.command {
        Some(command) => command.run(&cli.node).await,
        None => {
            let config = cli.node.config()?;

            let client = AlgodClient::new(&config)
                .context("failed to create algod client")?;

            tracing::info!(url = %client.url(), network = %config.network, "using algod node");

            let state = tui::app::AppState::new(
                Arc::new(client),
                &config.network,
                consts::ACCOUNTS_PATH.as_path()
            );

            let mut terminal = ratatui::init();

            let result = tui::run_app(
                tokio::runtime::Handle::current(),
                state,
                &mut terminal
            ).await;

            ratatui::restore();

            result?;

            Ok(())
        }
    }
}

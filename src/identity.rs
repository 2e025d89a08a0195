use std::path::Path;

use anyhow::{anyhow, Result};
use log::{info, warn};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    native_token::lamports_to_sol,
    pubkey::Pubkey,
    signature::{read_keypair_file, write_keypair_file, Keypair},
    signer::Signer,
};

use crate::config::Network;

/// Balance lookups and faucet requests used to fund the signing identity.
pub trait Faucet {
    fn balance(&self, pubkey: &Pubkey) -> Result<u64>;

    /// Requests `lamports` and blocks until the airdrop is finalized.
    fn airdrop(&self, receiver: &Pubkey, lamports: u64) -> Result<()>;
}

impl Faucet for RpcClient {
    fn balance(&self, pubkey: &Pubkey) -> Result<u64> {
        Ok(self.get_balance(pubkey)?)
    }

    fn airdrop(&self, receiver: &Pubkey, lamports: u64) -> Result<()> {
        let recent_blockhash = self.get_latest_blockhash()?;
        let signature =
            self.request_airdrop_with_blockhash(receiver, lamports, &recent_blockhash)?;

        info!(
            "Airdropping {} SOL to {}...",
            lamports_to_sol(lamports),
            receiver
        );
        self.confirm_transaction_with_spinner(
            &signature,
            &recent_blockhash,
            CommitmentConfig::finalized(),
        )?;

        Ok(())
    }
}

/// Loads the keypair at `path`, generating and saving a new one if it is absent.
pub fn load_or_generate_keypair(path: &Path) -> Result<Keypair> {
    if path.exists() {
        let keypair = read_keypair_file(path)
            .map_err(|e| anyhow!("Failed to read keypair {}: {}", path.display(), e))?;
        info!("Loaded keypair from {}", path.display());
        return Ok(keypair);
    }

    let keypair = Keypair::new();
    write_keypair_file(&keypair, path)
        .map_err(|e| anyhow!("Failed to write keypair {}: {}", path.display(), e))?;
    info!("Generated new keypair at {}", path.display());

    Ok(keypair)
}

/// Tops the identity up to `min_balance` lamports where the cluster has a faucet.
///
/// Returns the number of lamports airdropped.
pub fn fund_identity<F: Faucet + ?Sized>(
    faucet: &F,
    identity: &Pubkey,
    network: Network,
    min_balance: u64,
) -> Result<u64> {
    let balance = faucet.balance(identity)?;
    info!("Current balance is {} SOL", lamports_to_sol(balance));

    if balance >= min_balance {
        return Ok(0);
    }

    if !network.allows_airdrop() {
        warn!(
            "Balance of {} is below {} SOL and {} has no faucet",
            identity,
            lamports_to_sol(min_balance),
            network
        );
        return Ok(0);
    }

    let shortfall = min_balance - balance;
    faucet.airdrop(identity, shortfall)?;
    info!(
        "New balance is {} SOL",
        lamports_to_sol(faucet.balance(identity)?)
    );

    Ok(shortfall)
}

/// The signing identity for a run: loaded or generated, then funded.
pub fn get_or_create_identity<F: Faucet + ?Sized>(
    faucet: &F,
    path: &Path,
    network: Network,
    min_balance: u64,
) -> Result<Keypair> {
    let keypair = load_or_generate_keypair(path)?;
    fund_identity(faucet, &keypair.pubkey(), network, min_balance)?;

    Ok(keypair)
}

use anyhow::{anyhow, Result};
use log::debug;
use solana_client::rpc_client::RpcClient;
use solana_program::instruction::Instruction;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};

/// The parts of a cluster connection the minting flow talks to.
///
/// Implemented for `RpcClient`; tests substitute a recording fake.
pub trait Cluster {
    fn latest_blockhash(&self) -> Result<Hash>;

    /// Sends `tx` and blocks until it is finalized.
    fn send_and_confirm(&self, tx: &Transaction) -> Result<Signature>;

    /// Account data at finalized commitment. Missing accounts are an error.
    fn account_data(&self, pubkey: &Pubkey) -> Result<Vec<u8>>;
}

impl Cluster for RpcClient {
    fn latest_blockhash(&self) -> Result<Hash> {
        Ok(self.get_latest_blockhash()?)
    }

    fn send_and_confirm(&self, tx: &Transaction) -> Result<Signature> {
        let signature = self.send_and_confirm_transaction_with_spinner_and_commitment(
            tx,
            CommitmentConfig::finalized(),
        )?;
        Ok(signature)
    }

    fn account_data(&self, pubkey: &Pubkey) -> Result<Vec<u8>> {
        let account = self
            .get_account_with_commitment(pubkey, CommitmentConfig::finalized())?
            .value
            .ok_or_else(|| anyhow!("Account {} not found", pubkey))?;
        Ok(account.data)
    }
}

macro_rules! transaction {
    ($signers:expr, $instructions:expr, $client:expr) => {
        Transaction::new_signed_with_payer(
            $instructions,
            Some(&$signers[0].pubkey()),
            $signers,
            $client.latest_blockhash()?,
        )
    };
}

/// Signs with `signers`, the first of which pays, and waits for finalization.
pub fn send_and_confirm_tx<C: Cluster + ?Sized>(
    client: &C,
    signers: &[&Keypair],
    ixs: &[Instruction],
) -> Result<Signature> {
    let tx = transaction!(signers, ixs, client);

    let signature = client.send_and_confirm(&tx)?;
    debug!("Transaction {} finalized", signature);

    Ok(signature)
}

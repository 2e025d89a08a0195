use std::{cell::RefCell, collections::HashMap, path::PathBuf};

use anyhow::{bail, Result};
use nft_minter::{config::NftConfig, data::NftDescriptor, transaction::Cluster};
use solana_sdk::{hash::Hash, pubkey::Pubkey, signature::Signature, transaction::Transaction};

/// Records every transaction it is asked to send and can reject one of them.
#[derive(Default)]
pub struct FakeCluster {
    sent: RefCell<Vec<Transaction>>,
    accounts: RefCell<HashMap<Pubkey, Vec<u8>>>,
    reject_at: Option<usize>,
}

impl FakeCluster {
    pub fn rejecting_at(index: usize) -> Self {
        Self {
            reject_at: Some(index),
            ..Self::default()
        }
    }

    pub fn set_account(&self, pubkey: Pubkey, data: Vec<u8>) {
        self.accounts.borrow_mut().insert(pubkey, data);
    }

    pub fn sent(&self) -> Vec<Transaction> {
        self.sent.borrow().clone()
    }
}

impl Cluster for FakeCluster {
    fn latest_blockhash(&self) -> Result<Hash> {
        Ok(Hash::new_unique())
    }

    fn send_and_confirm(&self, tx: &Transaction) -> Result<Signature> {
        let index = self.sent.borrow().len();
        self.sent.borrow_mut().push(tx.clone());

        if self.reject_at == Some(index) {
            bail!("Transaction simulation failed: Attempt to debit an account but found no record of a prior credit.");
        }
        Ok(tx.signatures[0])
    }

    fn account_data(&self, pubkey: &Pubkey) -> Result<Vec<u8>> {
        match self.accounts.borrow().get(pubkey) {
            Some(data) => Ok(data.clone()),
            None => bail!("Account {} not found", pubkey),
        }
    }
}

pub fn descriptor(name: &str, image_file: &str) -> NftDescriptor {
    NftDescriptor {
        name: name.to_string(),
        symbol: "$X".to_string(),
        description: "d".to_string(),
        seller_fee_basis_points: 100,
        image_file: image_file.into(),
    }
}

pub fn nft_config() -> NftConfig {
    NftConfig {
        collection: descriptor("X Collection", "collection.png"),
        member: descriptor("X", "x.png"),
    }
}

/// A fresh directory holding the images named by `nft_config`.
pub fn image_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("nft-minter-{}", Pubkey::new_unique()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("collection.png"), b"\x89PNG collection").unwrap();
    std::fs::write(dir.join("x.png"), b"\x89PNG member").unwrap();
    dir
}

pub fn account_keys(tx: &Transaction) -> &[Pubkey] {
    &tx.message.account_keys
}

fn push_string(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(&(s.len() as u32).to_le_bytes());
    buf.extend_from_slice(s.as_bytes());
}

/// Borsh layout of a Token Metadata `MetadataV1` account for a non-fungible
/// with a single verified creator and an optional collection.
pub fn metadata_account(
    mint: &Pubkey,
    update_authority: &Pubkey,
    collection: Option<(Pubkey, bool)>,
) -> Vec<u8> {
    let mut data = vec![4]; // Key::MetadataV1
    data.extend_from_slice(update_authority.as_ref());
    data.extend_from_slice(mint.as_ref());
    push_string(&mut data, "X");
    push_string(&mut data, "$X");
    push_string(&mut data, "https://mockstorage.example.com/x");
    data.extend_from_slice(&100u16.to_le_bytes());

    // creators: Some(vec![Creator { update_authority, verified: true, share: 100 }])
    data.push(1);
    data.extend_from_slice(&1u32.to_le_bytes());
    data.extend_from_slice(update_authority.as_ref());
    data.push(1);
    data.push(100);

    data.push(0); // primary_sale_happened
    data.push(1); // is_mutable
    data.extend_from_slice(&[1, 255]); // edition_nonce
    data.extend_from_slice(&[1, 0]); // token_standard: NonFungible

    match collection {
        Some((key, verified)) => {
            data.push(1);
            data.push(verified as u8);
            data.extend_from_slice(key.as_ref());
        }
        None => data.push(0),
    }

    data.push(0); // uses
    data.push(0); // collection_details
    data.push(0); // programmable_config
    data
}

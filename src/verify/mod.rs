use anyhow::{bail, Result};
use log::info;
use mpl_token_metadata::{instructions::VerifyCollectionV1Builder, types::Collection};
use retry::{delay::Exponential, retry};
use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
};

use crate::{
    data::{CollectionNft, MintedNft},
    decode::decode_metadata_from_mint,
    transaction::{send_and_confirm_tx, Cluster},
};

mod collection;

pub use collection::*;

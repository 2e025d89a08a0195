use std::path::PathBuf;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use solana_program::pubkey::Pubkey;
use solana_sdk::signature::Signature;

use crate::{
    constants::{MAX_NAME_LENGTH, MAX_SELLER_FEE_BASIS_POINTS, MAX_SYMBOL_LENGTH},
    derive::{derive_edition_pda, derive_metadata_pda, derive_token_account},
};

/// Token Metadata accounts owned by a single mint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nft {
    pub mint: Pubkey,
    pub metadata: Pubkey,
    pub edition: Pubkey,
}

impl Nft {
    pub fn new(mint: Pubkey) -> Self {
        let metadata = derive_metadata_pda(&mint);
        let edition = derive_edition_pda(&mint);

        Self {
            mint,
            metadata,
            edition,
        }
    }

    pub fn get_token_account(&self, owner: &Pubkey) -> Pubkey {
        derive_token_account(owner, &self.mint)
    }
}

/// Describes an NFT before anything is uploaded or minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NftDescriptor {
    pub name: String,
    pub symbol: String,
    pub description: String,
    #[serde(alias = "sellerFeeBasisPoints")]
    pub seller_fee_basis_points: u16,
    /// Relative to the configured image directory.
    #[serde(alias = "imageFile")]
    pub image_file: PathBuf,
}

impl NftDescriptor {
    /// Checks the fields against the limits enforced by Token Metadata.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            bail!("NFT name must not be empty");
        }
        if self.name.len() > MAX_NAME_LENGTH {
            bail!(
                "NFT name \"{}\" is longer than {} bytes",
                self.name,
                MAX_NAME_LENGTH
            );
        }
        if self.symbol.len() > MAX_SYMBOL_LENGTH {
            bail!(
                "NFT symbol \"{}\" is longer than {} bytes",
                self.symbol,
                MAX_SYMBOL_LENGTH
            );
        }
        if self.seller_fee_basis_points > MAX_SELLER_FEE_BASIS_POINTS {
            bail!(
                "Seller fee basis points must be at most {}, got {}",
                MAX_SELLER_FEE_BASIS_POINTS,
                self.seller_fee_basis_points
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionDescriptor {
    pub nft: NftDescriptor,
    pub is_collection: bool,
    pub collection_authority: Pubkey,
}

impl CollectionDescriptor {
    pub fn new(nft: NftDescriptor, collection_authority: Pubkey) -> Self {
        Self {
            nft,
            is_collection: true,
            collection_authority,
        }
    }
}

/// Off-chain JSON document the on-chain `uri` points to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataDocument {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub image: String,
}

impl MetadataDocument {
    pub fn new(descriptor: &NftDescriptor, image_uri: &str) -> Self {
        Self {
            name: descriptor.name.clone(),
            symbol: descriptor.symbol.clone(),
            description: descriptor.description.clone(),
            image: image_uri.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintedNft {
    pub mint: Pubkey,
    pub metadata: Pubkey,
    pub edition: Pubkey,
    pub token_account: Pubkey,
    pub signature: Signature,
}

impl MintedNft {
    pub(crate) fn new(nft: Nft, owner: &Pubkey, signature: Signature) -> Self {
        Self {
            mint: nft.mint,
            metadata: nft.metadata,
            edition: nft.edition,
            token_account: nft.get_token_account(owner),
            signature,
        }
    }

    pub fn address(&self) -> Pubkey {
        self.mint
    }
}

/// A sized collection NFT that is known to exist on-chain.
///
/// Only `mint::mint_collection` hands these out, so holding one proves the
/// collection was minted before any member refers to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionNft(MintedNft);

impl CollectionNft {
    pub(crate) fn new(minted: MintedNft) -> Self {
        Self(minted)
    }

    pub fn nft(&self) -> &MintedNft {
        &self.0
    }

    pub fn address(&self) -> Pubkey {
        self.0.mint
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> NftDescriptor {
        NftDescriptor {
            name: "X".to_string(),
            symbol: "$X".to_string(),
            description: "d".to_string(),
            seller_fee_basis_points: 100,
            image_file: PathBuf::from("x.png"),
        }
    }

    #[test]
    fn valid_descriptor_passes() {
        descriptor().validate().unwrap();
    }

    #[test]
    fn rejects_long_name_and_symbol() {
        let mut d = descriptor();
        d.name = "n".repeat(MAX_NAME_LENGTH + 1);
        assert!(d.validate().is_err());

        let mut d = descriptor();
        d.symbol = "SYMBOLSYMBOL".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn rejects_royalty_above_100_percent() {
        let mut d = descriptor();
        d.seller_fee_basis_points = 10_000;
        d.validate().unwrap();
        d.seller_fee_basis_points = 10_001;
        assert!(d.validate().is_err());
    }

    #[test]
    fn descriptor_accepts_camel_case_keys() {
        let d: NftDescriptor = serde_json::from_str(
            r#"{"name":"X","symbol":"$X","description":"d","sellerFeeBasisPoints":100,"imageFile":"x.png"}"#,
        )
        .unwrap();
        assert_eq!(d, descriptor());
    }

    #[test]
    fn metadata_document_serializes_image_locator() {
        let doc = MetadataDocument::new(&descriptor(), "https://example.com/img");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "X",
                "symbol": "$X",
                "description": "d",
                "image": "https://example.com/img",
            })
        );
    }
}

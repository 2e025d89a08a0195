//! The mint sequence as a chain of typed stages.
//!
//! Each stage consumes the previous stage's output, so a member can't be
//! minted before its collection exists and membership can't be verified before
//! the member exists. A failure at any point stops the run; nothing already on
//! chain is rolled back.

use std::path::Path;

use anyhow::Result;
use log::info;
use solana_sdk::{
    signature::{Keypair, Signature},
    signer::Signer,
};

use crate::{
    config::{Network, NftConfig},
    data::{CollectionDescriptor, CollectionNft, MintedNft},
    mint::{mint_collection, mint_member, MintCollectionArgs, MintMemberArgs},
    transaction::Cluster,
    upload::{upload_metadata, LoadedAsset, Storage},
    verify::{verify_collection, VerifyCollectionArgs},
};

/// Both assets validated and their images read, before any network traffic.
#[derive(Debug, Clone)]
pub struct Prepared {
    collection: LoadedAsset,
    member: LoadedAsset,
}

impl Prepared {
    pub fn load(nfts: &NftConfig, image_dir: &Path) -> Result<Self> {
        Ok(Self {
            collection: LoadedAsset::load(nfts.collection.clone(), image_dir)?,
            member: LoadedAsset::load(nfts.member.clone(), image_dir)?,
        })
    }
}

#[derive(Debug)]
pub struct CollectionMinted {
    collection: CollectionNft,
    member: LoadedAsset,
}

impl CollectionMinted {
    pub fn collection(&self) -> &CollectionNft {
        &self.collection
    }
}

#[derive(Debug)]
pub struct MemberMinted {
    collection: CollectionNft,
    member: MintedNft,
}

impl MemberMinted {
    pub fn member(&self) -> &MintedNft {
        &self.member
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minted {
    pub collection: CollectionNft,
    pub member: MintedNft,
    pub verify_signature: Signature,
}

pub struct Minter<'a, C: Cluster + ?Sized, S: Storage + ?Sized> {
    client: &'a C,
    storage: &'a S,
    authority: &'a Keypair,
    network: Network,
}

impl<'a, C: Cluster + ?Sized, S: Storage + ?Sized> Minter<'a, C, S> {
    pub fn new(client: &'a C, storage: &'a S, authority: &'a Keypair, network: Network) -> Self {
        Self {
            client,
            storage,
            authority,
            network,
        }
    }

    pub fn run(&self, prepared: Prepared) -> Result<Minted> {
        let stage = self.mint_collection(prepared)?;
        let stage = self.mint_member(stage)?;
        self.verify(stage)
    }

    pub fn mint_collection(&self, prepared: Prepared) -> Result<CollectionMinted> {
        let Prepared { collection, member } = prepared;

        let uploaded = upload_metadata(self.storage, &collection)?;
        let descriptor =
            CollectionDescriptor::new(collection.descriptor, self.authority.pubkey());

        let collection = mint_collection(
            self.client,
            MintCollectionArgs::V1 {
                payer: None,
                authority: self.authority,
                descriptor: &descriptor,
                uri: &uploaded.uri,
            },
        )?;
        info!(
            "Collection minted: {}",
            self.network.address_url(&collection.address())
        );

        Ok(CollectionMinted { collection, member })
    }

    pub fn mint_member(&self, stage: CollectionMinted) -> Result<MemberMinted> {
        let CollectionMinted { collection, member } = stage;

        let uploaded = upload_metadata(self.storage, &member)?;

        let member = mint_member(
            self.client,
            MintMemberArgs::V1 {
                payer: None,
                authority: self.authority,
                descriptor: &member.descriptor,
                uri: &uploaded.uri,
                collection: &collection,
            },
        )?;
        info!("Token minted: {}", self.network.address_url(&member.address()));

        Ok(MemberMinted { collection, member })
    }

    pub fn verify(&self, stage: MemberMinted) -> Result<Minted> {
        let MemberMinted { collection, member } = stage;

        let verify_signature = verify_collection(
            self.client,
            VerifyCollectionArgs::V1 {
                authority: self.authority,
                member: &member,
                collection: &collection,
            },
        )?;
        info!(
            "Collection verified: {}",
            self.network.tx_url(&verify_signature)
        );

        Ok(Minted {
            collection,
            member,
            verify_signature,
        })
    }
}

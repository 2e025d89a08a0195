use anyhow::{bail, Result};
use log::info;
use mpl_token_metadata::{
    instructions::{CreateV1Builder, MintV1Builder},
    types::{Collection, CollectionDetails, Creator, PrintSupply, TokenStandard},
};
use solana_program::instruction::Instruction;
use solana_sdk::{
    pubkey::Pubkey,
    signer::{keypair::Keypair, Signer},
};

use crate::{
    data::{CollectionDescriptor, CollectionNft, MintedNft, Nft, NftDescriptor},
    transaction::{send_and_confirm_tx, Cluster},
};

pub enum MintCollectionArgs<'a> {
    V1 {
        payer: Option<&'a Keypair>,
        authority: &'a Keypair,
        descriptor: &'a CollectionDescriptor,
        uri: &'a str,
    },
}

pub enum MintMemberArgs<'a> {
    V1 {
        payer: Option<&'a Keypair>,
        authority: &'a Keypair,
        descriptor: &'a NftDescriptor,
        uri: &'a str,
        collection: &'a CollectionNft,
    },
}

/// Where the new token sits relative to a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// A sized collection parent, starting with zero members.
    Collection,
    /// An unverified member of the collection with this mint.
    MemberOf(Pubkey),
}

/// Builds the `CreateV1` + `MintV1` pair for a one-of-one NFT held by `owner`.
pub fn create_nft_ixs(
    nft: &Nft,
    authority: &Pubkey,
    payer: &Pubkey,
    owner: &Pubkey,
    descriptor: &NftDescriptor,
    uri: &str,
    grouping: Grouping,
) -> Vec<Instruction> {
    let mut create_builder = CreateV1Builder::new();
    create_builder
        .metadata(nft.metadata)
        .master_edition(Some(nft.edition))
        .mint(nft.mint, true)
        .authority(*authority)
        .payer(*payer)
        .update_authority(*authority, true)
        .spl_token_program(Some(spl_token::ID))
        .name(descriptor.name.clone())
        .symbol(descriptor.symbol.clone())
        .uri(uri.to_string())
        .seller_fee_basis_points(descriptor.seller_fee_basis_points)
        .creators(vec![Creator {
            address: *authority,
            verified: true,
            share: 100,
        }])
        .primary_sale_happened(false)
        .is_mutable(true)
        .token_standard(TokenStandard::NonFungible)
        .print_supply(PrintSupply::Zero);

    match grouping {
        Grouping::Collection => {
            create_builder.collection_details(CollectionDetails::V1 { size: 0 });
        }
        Grouping::MemberOf(collection_mint) => {
            create_builder.collection(Collection {
                verified: false,
                key: collection_mint,
            });
        }
    }

    let create_ix = create_builder.instruction();

    let mint_ix = MintV1Builder::new()
        .token(nft.get_token_account(owner))
        .token_owner(Some(*owner))
        .metadata(nft.metadata)
        .master_edition(Some(nft.edition))
        .mint(nft.mint)
        .authority(*authority)
        .payer(*payer)
        .amount(1)
        .instruction();

    vec![create_ix, mint_ix]
}

pub fn mint_collection<C: Cluster + ?Sized>(
    client: &C,
    args: MintCollectionArgs,
) -> Result<CollectionNft> {
    match args {
        MintCollectionArgs::V1 { .. } => mint_collection_v1(client, args),
    }
}

fn mint_collection_v1<C: Cluster + ?Sized>(
    client: &C,
    args: MintCollectionArgs,
) -> Result<CollectionNft> {
    let MintCollectionArgs::V1 {
        payer,
        authority,
        descriptor,
        uri,
    } = args;

    if !descriptor.is_collection {
        bail!("Descriptor for {} is not marked as a collection", descriptor.nft.name);
    }
    if descriptor.collection_authority != authority.pubkey() {
        bail!(
            "Collection authority {} does not match signing authority {}",
            descriptor.collection_authority,
            authority.pubkey()
        );
    }

    let minted = create_and_mint(
        client,
        payer,
        authority,
        &descriptor.nft,
        uri,
        Grouping::Collection,
    )?;

    Ok(CollectionNft::new(minted))
}

pub fn mint_member<C: Cluster + ?Sized>(client: &C, args: MintMemberArgs) -> Result<MintedNft> {
    match args {
        MintMemberArgs::V1 { .. } => mint_member_v1(client, args),
    }
}

fn mint_member_v1<C: Cluster + ?Sized>(client: &C, args: MintMemberArgs) -> Result<MintedNft> {
    let MintMemberArgs::V1 {
        payer,
        authority,
        descriptor,
        uri,
        collection,
    } = args;

    create_and_mint(
        client,
        payer,
        authority,
        descriptor,
        uri,
        Grouping::MemberOf(collection.address()),
    )
}

fn create_and_mint<C: Cluster + ?Sized>(
    client: &C,
    payer: Option<&Keypair>,
    authority: &Keypair,
    descriptor: &NftDescriptor,
    uri: &str,
    grouping: Grouping,
) -> Result<MintedNft> {
    descriptor.validate()?;

    let payer = payer.unwrap_or(authority);
    let mint_signer = Keypair::new();
    let nft = Nft::new(mint_signer.pubkey());
    let owner = authority.pubkey();

    let ixs = create_nft_ixs(
        &nft,
        &authority.pubkey(),
        &payer.pubkey(),
        &owner,
        descriptor,
        uri,
        grouping,
    );

    let signature = send_and_confirm_tx(client, &[payer, authority, &mint_signer], &ixs)?;
    info!("Minted {} ({}) in {}", descriptor.name, nft.mint, signature);

    Ok(MintedNft::new(nft, &owner, signature))
}

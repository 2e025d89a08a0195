use solana_program::instruction::Instruction;

use super::*;

pub enum VerifyCollectionArgs<'a> {
    V1 {
        authority: &'a Keypair,
        member: &'a MintedNft,
        collection: &'a CollectionNft,
    },
}

/// Marks `member` as a verified item of a sized collection.
///
/// Takes the already-minted member and collection, so it can only run once
/// both creation transactions are finalized.
pub fn verify_collection<C: Cluster + ?Sized>(
    client: &C,
    args: VerifyCollectionArgs,
) -> Result<Signature> {
    match args {
        VerifyCollectionArgs::V1 { .. } => verify_collection_v1(client, args),
    }
}

pub fn verify_collection_ix(args: &VerifyCollectionArgs) -> Instruction {
    match args {
        VerifyCollectionArgs::V1 {
            authority,
            member,
            collection,
        } => verify_collection_v1_ix(&authority.pubkey(), member, collection),
    }
}

fn verify_collection_v1<C: Cluster + ?Sized>(
    client: &C,
    args: VerifyCollectionArgs,
) -> Result<Signature> {
    let verify_ix = verify_collection_ix(&args);
    let VerifyCollectionArgs::V1 {
        authority,
        member,
        collection,
    } = args;

    let signature = send_and_confirm_tx(client, &[authority], &[verify_ix])?;
    info!(
        "Verified {} as a member of collection {} in {}",
        member.mint,
        collection.address(),
        signature
    );

    Ok(signature)
}

fn verify_collection_v1_ix(
    authority: &Pubkey,
    member: &MintedNft,
    collection: &CollectionNft,
) -> Instruction {
    let collection = collection.nft();

    let mut verify_builder = VerifyCollectionV1Builder::new();
    verify_builder
        .authority(*authority)
        .metadata(member.metadata)
        .collection_mint(collection.mint)
        .collection_metadata(Some(collection.metadata))
        .collection_master_edition(Some(collection.edition));

    verify_builder.instruction()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    Verified,
    Unverified,
    NotAMember,
}

pub fn membership(collection: Option<&Collection>, collection_mint: &Pubkey) -> Membership {
    match collection {
        Some(c) if c.key == *collection_mint && c.verified => Membership::Verified,
        Some(c) if c.key == *collection_mint => Membership::Unverified,
        _ => Membership::NotAMember,
    }
}

/// Reads the member's metadata back and fails unless the membership is verified.
pub fn confirm_membership<C: Cluster + ?Sized>(
    client: &C,
    member: &MintedNft,
    collection: &CollectionNft,
) -> Result<()> {
    // The RPC node may lag behind the verify transaction by a slot or two.
    let metadata = retry(
        Exponential::from_millis_with_factor(250, 2.0).take(3),
        || decode_metadata_from_mint(client, &member.mint),
    )?;

    match membership(metadata.collection.as_ref(), &collection.address()) {
        Membership::Verified => {
            info!(
                "{} is a verified member of {}",
                member.mint,
                collection.address()
            );
            Ok(())
        }
        Membership::Unverified => bail!(
            "{} references collection {} but is not verified",
            member.mint,
            collection.address()
        ),
        Membership::NotAMember => bail!(
            "{} does not reference collection {}",
            member.mint,
            collection.address()
        ),
    }
}

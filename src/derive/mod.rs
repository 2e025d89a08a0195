use mpl_token_metadata::ID as TOKEN_METADATA_PROGRAM_ID;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;

use crate::constants::{EDITION_PREFIX, METADATA_PREFIX};

pub fn derive_metadata_pda(mint: &Pubkey) -> Pubkey {
    let seeds = &[
        METADATA_PREFIX.as_bytes(),
        TOKEN_METADATA_PROGRAM_ID.as_ref(),
        mint.as_ref(),
    ];

    let (pda, _) = Pubkey::find_program_address(seeds, &TOKEN_METADATA_PROGRAM_ID);
    pda
}

pub fn derive_edition_pda(mint: &Pubkey) -> Pubkey {
    let seeds = &[
        METADATA_PREFIX.as_bytes(),
        TOKEN_METADATA_PROGRAM_ID.as_ref(),
        mint.as_ref(),
        EDITION_PREFIX.as_bytes(),
    ];

    let (pda, _) = Pubkey::find_program_address(seeds, &TOKEN_METADATA_PROGRAM_ID);
    pda
}

/// The token account that holds the single token of `mint` for `owner`.
pub fn derive_token_account(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(owner, mint)
}

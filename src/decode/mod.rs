use mpl_token_metadata::accounts::Metadata;
use solana_sdk::pubkey::Pubkey;

pub mod errors;
use errors::DecodeError;

use crate::{derive::derive_metadata_pda, transaction::Cluster};

pub fn decode_metadata_from_mint<C: Cluster + ?Sized>(
    client: &C,
    mint: &Pubkey,
) -> Result<Metadata, DecodeError> {
    let metadata_pda = derive_metadata_pda(mint);

    let account_data = client
        .account_data(&metadata_pda)
        .map_err(|err| DecodeError::ClientError(err.to_string()))?;

    decode_metadata(&account_data)
}

pub fn decode_metadata(account_data: &[u8]) -> Result<Metadata, DecodeError> {
    Metadata::from_bytes(account_data)
        .map_err(|err| DecodeError::DecodeMetadataFailed(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_not_metadata() {
        let err = decode_metadata(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, DecodeError::DecodeMetadataFailed(_)));
    }
}

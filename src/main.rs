use std::process;

use anyhow::Result;
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use nft_minter::{
    config::Config,
    identity::get_or_create_identity,
    pipeline::{Minter, Prepared},
    verify::confirm_membership,
};
use solana_client::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, signer::Signer};

fn run() -> Result<()> {
    let config = Config::from_env()?;

    // Fail on missing or invalid assets before touching the network.
    let prepared = Prepared::load(&config.nfts, &config.image_dir)?;

    let client =
        RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::finalized());

    let authority = get_or_create_identity(
        &client,
        &config.keypair_path,
        config.network,
        config.min_balance_lamports,
    )?;
    info!("PublicKey: {}", authority.pubkey());

    let storage = config.storage.build()?;
    let minter = Minter::new(&client, storage.as_ref(), &authority, config.network);

    let minted = minter.run(prepared)?;
    confirm_membership(&client, &minted.member, &minted.collection)?;

    Ok(())
}

fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => {
            info!("Finished successfully");
            process::exit(0);
        }
        Err(err) => {
            error!("{:?}", err);
            process::exit(1);
        }
    }
}

pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_URI_LENGTH: usize = 200;
pub const MAX_SYMBOL_LENGTH: usize = 10;
pub const MAX_SELLER_FEE_BASIS_POINTS: u16 = 10_000;

pub const METADATA_PREFIX: &str = "metadata";
pub const EDITION_PREFIX: &str = "edition";

pub const EXPLORER_URL: &str = "https://explorer.solana.com";

pub const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";
pub const TESTNET_RPC_URL: &str = "https://api.testnet.solana.com";
pub const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const LOCALNET_RPC_URL: &str = "http://localhost:8899";

pub const DEFAULT_KEYPAIR_PATH: &str = "keypair.json";
pub const DEFAULT_IMAGE_DIR: &str = "assets";
pub const DEFAULT_STORAGE_TIMEOUT_SECS: u64 = 60;

pub const PINATA_PIN_FILE_URL: &str = "https://api.pinata.cloud/pinning/pinFileToIPFS";
pub const PINATA_GATEWAY_URL: &str = "https://gateway.pinata.cloud/ipfs";
pub const MOCK_STORAGE_URL: &str = "https://mockstorage.example.com";

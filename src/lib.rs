pub mod config;
pub mod constants;
pub mod data;
pub mod decode;
pub mod derive;
pub mod identity;
pub mod mint;
pub mod pipeline;
pub mod transaction;
pub mod upload;
pub mod verify;

#[cfg(feature = "cli")]
pub mod cli;
pub mod draft;
pub mod storage;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use draft::DraftConfig;
pub use storage::LocalStorage;

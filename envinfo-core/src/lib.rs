//! Core library for Magento environment diagnostics.

pub mod cache_status;
pub mod env_data;
pub mod error;
pub mod interpreter;
pub mod locator;
pub mod php_array;
pub mod report;
pub mod settings;
pub mod stores;

pub use cache_status::{CacheStates, CacheStatusProvider, EnvCacheStatus};
pub use env_data::EnvData;
pub use error::{Error, Result};
pub use interpreter::{InterpreterProbe, PhpBinary, XdebugStatus};
pub use locator::{ConfigFileLocator, Location, LogPaths, MatchScan, Selection};
pub use report::{EnvReport, Field, Sources};
pub use settings::Settings;
pub use stores::{ConfiguredStores, ScopeStores, StoreProvider};

mod config;
mod debounce;
mod device_adapter;
mod environment;
mod error;
pub mod fake;
mod layout;
mod literal;
mod signatures;
mod types;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::*;
pub use debounce::Debouncer;
pub use device_adapter::{AdapterEvent, DeviceAdapter, MANAGED_BODY_CLASSES};
pub use environment::{DocumentWriter, Environment};
pub use error::{Error, Result};
pub use layout::frame_style;
pub use signatures::Signatures;
pub use types::*;

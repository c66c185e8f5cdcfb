//! Hydrate statically-typed configuration records from a remote parameter store.
//!
//! A configuration type declares which of its fields are bound to remote
//! parameter names by implementing [`Hydrate`]. [`process`] walks those
//! bindings (including nested sub-records), fetches every bound parameter in
//! a single batched [`ParameterStore`] call, and decodes the returned string
//! values into the fields in place. Fields whose parameter the store does not
//! return keep their prior values.
//!
//! ## Example
//!
//! ```
//! use param_hydrate::{process, Binding, Hydrate, MemoryStore};
//! use std::time::Duration;
//!
//! #[derive(Debug, Default)]
//! struct AppConfig {
//!     endpoint: String,
//!     timeout: Duration,
//!     replicas: u32,
//! }
//!
//! impl Hydrate for AppConfig {
//!     fn bindings(&mut self) -> Vec<Binding<'_>> {
//!         vec![
//!             Binding::leaf("/app/endpoint", &mut self.endpoint),
//!             Binding::leaf("/app/timeout", &mut self.timeout),
//!             Binding::leaf("/app/replicas", &mut self.replicas),
//!         ]
//!     }
//! }
//!
//! let mut store = MemoryStore::new();
//! store.insert("/prod/app/endpoint", "https://example.com");
//! store.insert("/prod/app/timeout", "1h30m");
//!
//! let mut config = AppConfig::default();
//! process(&store, "/prod", &mut config)?;
//!
//! assert_eq!(config.endpoint, "https://example.com");
//! assert_eq!(config.timeout, Duration::from_secs(5400));
//! assert_eq!(config.replicas, 0); // never returned by the store
//! # Ok::<(), param_hydrate::HydrateError>(())
//! ```

pub mod hydrate;
pub mod store;
mod error;

pub use error::HydrateError;
pub use hydrate::{process, Binding, DecodeError, FromParam, Hydrate};
pub use store::{
    GetParametersRequest, GetParametersResponse, MemoryStore, Parameter, ParameterStore,
    StoreError,
};

//! The remote parameter store interface.

mod memory;

pub use memory::MemoryStore;

use serde::{Deserialize, Serialize};

/// Error produced by a [`ParameterStore`] implementation.
///
/// Stores own their transport and permission failures; hydration forwards
/// them verbatim inside [`HydrateError::Store`](crate::HydrateError::Store).
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A named parameter and its raw string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub value: String,
}

/// One batched fetch: the full set of bound names, plus whether encrypted
/// values should come back decrypted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetParametersRequest {
    pub names: Vec<String>,
    pub with_decryption: bool,
}

/// The parameters the store recognized, in no particular order.
///
/// Stores may omit requested names and may include names that were never
/// requested; callers handle both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetParametersResponse {
    pub parameters: Vec<Parameter>,
}

/// An opaque capability over a remote key-value parameter store.
///
/// Implementations own session setup, authentication, timeouts, and retries;
/// hydration issues exactly one call per [`process`](crate::process)
/// invocation and imposes no policy of its own.
pub trait ParameterStore {
    fn get_parameters(
        &self,
        request: GetParametersRequest,
    ) -> Result<GetParametersResponse, StoreError>;
}

use crate::hydrate::DecodeError;
use crate::store::StoreError;
use thiserror::Error;

/// Top-level error type for the param-hydrate library.
///
/// Every failure aborts the whole [`process`](crate::process) call; fields
/// decoded before the failure keep their new values (there is no rollback),
/// fields after it are untouched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HydrateError {
    /// A leaf binding was registered with an empty parameter name.
    #[error("leaf binding under prefix '{prefix}' has an empty parameter name")]
    UnnamedBinding { prefix: String },

    /// Two bindings resolved to the same fully-qualified parameter name.
    #[error("duplicate parameter name in bindings: {0}")]
    DuplicateName(String),

    /// The parameter store failed; the underlying error is preserved verbatim.
    #[error("parameter store request failed: {source}")]
    Store {
        #[source]
        source: StoreError,
    },

    /// A returned value could not be converted into its destination field.
    #[error("failed to decode parameter '{name}': {source}")]
    Decode {
        name: String,
        #[source]
        source: DecodeError,
    },
}

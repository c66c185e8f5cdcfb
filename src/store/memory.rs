use std::collections::HashMap;

use super::{GetParametersRequest, GetParametersResponse, Parameter, ParameterStore, StoreError};

/// An in-memory [`ParameterStore`] backed by a map.
///
/// Returns exactly the requested names it holds, omitting the rest. The
/// decryption flag is accepted and ignored; nothing here is encrypted.
/// Intended for tests, demos, and local development.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, replacing any previous value under the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
}

impl ParameterStore for MemoryStore {
    fn get_parameters(
        &self,
        request: GetParametersRequest,
    ) -> Result<GetParametersResponse, StoreError> {
        let parameters = request
            .names
            .iter()
            .filter_map(|name| {
                self.values.get(name).map(|value| Parameter {
                    name: name.clone(),
                    value: value.clone(),
                })
            })
            .collect();
        Ok(GetParametersResponse { parameters })
    }
}

//! Orchestration: walk the record, fetch once, decode in place.

use super::binding::{walk, Hydrate};
use crate::error::HydrateError;
use crate::store::{GetParametersRequest, ParameterStore};

/// Hydrates `record` from `store`, prefixing every bound parameter name
/// with `prefix`.
///
/// Issues exactly one batched fetch for the full set of bound names (an
/// empty list if nothing is bound), requesting decrypted values, then
/// decodes each returned value into its field. Parameters the store returns
/// that were never requested are ignored; bound parameters the store omits
/// leave their fields at their prior values.
///
/// Fails fast: a store failure ([`HydrateError::Store`]) means no field was
/// mutated; the first decode failure ([`HydrateError::Decode`]) aborts with
/// earlier fields already written.
pub fn process<S, R>(store: &S, prefix: &str, record: &mut R) -> Result<(), HydrateError>
where
    S: ParameterStore + ?Sized,
    R: Hydrate + ?Sized,
{
    let mut fields = walk(prefix, record.bindings())?;

    let request = GetParametersRequest {
        names: fields.keys().cloned().collect(),
        with_decryption: true,
    };
    let response = store
        .get_parameters(request)
        .map_err(|source| HydrateError::Store { source })?;

    for parameter in response.parameters {
        // the store may return entries that were never requested
        let Some(setter) = fields.get_mut(&parameter.name) else {
            continue;
        };
        setter(&parameter.value).map_err(|source| HydrateError::Decode {
            name: parameter.name,
            source,
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydrate::Binding;
    use crate::store::{GetParametersResponse, Parameter, StoreError};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::time::Duration;

    /// Records the request it receives and replays a canned response.
    #[derive(Default)]
    struct MockStore {
        response: GetParametersResponse,
        fail_with: Option<String>,
        seen: RefCell<Option<GetParametersRequest>>,
    }

    impl MockStore {
        fn returning(parameters: Vec<(&str, &str)>) -> Self {
            MockStore {
                response: GetParametersResponse {
                    parameters: parameters
                        .into_iter()
                        .map(|(name, value)| Parameter {
                            name: name.to_string(),
                            value: value.to_string(),
                        })
                        .collect(),
                },
                ..Self::default()
            }
        }

        fn requested_names(&self) -> Vec<String> {
            self.seen
                .borrow()
                .as_ref()
                .expect("store was never called")
                .names
                .clone()
        }
    }

    impl ParameterStore for MockStore {
        fn get_parameters(
            &self,
            request: GetParametersRequest,
        ) -> Result<GetParametersResponse, StoreError> {
            *self.seen.borrow_mut() = Some(request);
            if let Some(message) = &self.fail_with {
                return Err(message.clone().into());
            }
            Ok(self.response.clone())
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct NestedConfig {
        nested_key: String,
    }

    impl Hydrate for NestedConfig {
        fn bindings(&mut self) -> Vec<Binding<'_>> {
            vec![Binding::leaf("/nested/key", &mut self.nested_key)]
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct FullConfig {
        key: String,
        number: i64,
        unsigned: u64,
        flag: bool,
        ratio: f64,
        samples: Vec<f64>,
        window: Duration,
        labels: HashMap<String, String>,
        nested: NestedConfig,
    }

    impl Hydrate for FullConfig {
        fn bindings(&mut self) -> Vec<Binding<'_>> {
            vec![
                Binding::leaf("/test/key", &mut self.key),
                Binding::leaf("/test/number", &mut self.number),
                Binding::leaf("/test/uint", &mut self.unsigned),
                Binding::leaf("/test/bool", &mut self.flag),
                Binding::leaf("/test/float", &mut self.ratio),
                Binding::leaf("/test/floatslice", &mut self.samples),
                Binding::leaf("/test/duration", &mut self.window),
                Binding::leaf("/test/map", &mut self.labels),
                Binding::record(&mut self.nested),
            ]
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct GroupedConfig {
        nested: NestedConfig,
    }

    impl Hydrate for GroupedConfig {
        fn bindings(&mut self) -> Vec<Binding<'_>> {
            vec![Binding::group("/prefixnested", &mut self.nested)]
        }
    }

    struct UnboundConfig {
        key: String,
    }

    impl Hydrate for UnboundConfig {
        fn bindings(&mut self) -> Vec<Binding<'_>> {
            Vec::new()
        }
    }

    #[test]
    fn hydrates_every_supported_field_kind() {
        let store = MockStore::returning(vec![
            ("/test/key", "testkey"),
            ("/test/number", "-314"),
            ("/test/uint", "314"),
            ("/test/bool", "true"),
            ("/test/float", "3.14159"),
            ("/test/floatslice", "3.14159,2.618034,2.718"),
            ("/test/duration", "5m"),
            ("/test/map", "first_name:Test,last_name:McTest,email:Test@test.com"),
            ("/nested/key", "nestedkey"),
        ]);

        let mut config = FullConfig::default();
        process(&store, "", &mut config).unwrap();

        assert_eq!(
            config,
            FullConfig {
                key: "testkey".to_string(),
                number: -314,
                unsigned: 314,
                flag: true,
                ratio: 3.14159,
                samples: vec![3.14159, 2.618034, 2.718],
                window: Duration::from_secs(300),
                labels: HashMap::from([
                    ("first_name".to_string(), "Test".to_string()),
                    ("last_name".to_string(), "McTest".to_string()),
                    ("email".to_string(), "Test@test.com".to_string()),
                ]),
                nested: NestedConfig {
                    nested_key: "nestedkey".to_string(),
                },
            }
        );

        let mut expected: Vec<String> = [
            "/test/key",
            "/test/number",
            "/test/uint",
            "/test/bool",
            "/test/float",
            "/test/floatslice",
            "/test/duration",
            "/test/map",
            "/nested/key",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        expected.sort();
        assert_eq!(store.requested_names(), expected);
    }

    #[test]
    fn unbound_record_requests_nothing_and_stays_untouched() {
        let store = MockStore::returning(vec![("/test/key", "testkey")]);

        let mut config = UnboundConfig {
            key: "nooverride".to_string(),
        };
        process(&store, "", &mut config).unwrap();

        assert_eq!(config.key, "nooverride");
        assert!(store.requested_names().is_empty());
    }

    #[test]
    fn prefixes_build_as_traversal_descends() {
        let store = MockStore::returning(vec![("/test/prefixnested/nested/key", "nestedkey")]);

        let mut config = GroupedConfig::default();
        process(&store, "/test", &mut config).unwrap();

        assert_eq!(config.nested.nested_key, "nestedkey");
        assert_eq!(
            store.requested_names(),
            vec!["/test/prefixnested/nested/key".to_string()]
        );
    }

    #[test]
    fn unknown_returned_names_are_ignored() {
        let store = MockStore::returning(vec![
            ("/test/prefixnested/nested/key", "nestedkey"),
            ("/never/asked", "surprise"),
        ]);

        let mut config = GroupedConfig::default();
        process(&store, "/test", &mut config).unwrap();

        assert_eq!(config.nested.nested_key, "nestedkey");
    }

    #[test]
    fn omitted_parameters_leave_fields_at_prior_values() {
        let store = MockStore::returning(vec![("/test/number", "7")]);

        let mut config = FullConfig {
            key: "kept".to_string(),
            ..FullConfig::default()
        };
        process(&store, "", &mut config).unwrap();

        assert_eq!(config.number, 7);
        assert_eq!(config.key, "kept");
        assert_eq!(config.window, Duration::default());
    }

    #[test]
    fn store_failure_propagates_verbatim_and_mutates_nothing() {
        let store = MockStore {
            fail_with: Some("access denied by test".to_string()),
            ..MockStore::default()
        };

        let mut config = FullConfig::default();
        let err = process(&store, "", &mut config).unwrap_err();

        assert!(matches!(err, HydrateError::Store { .. }));
        assert!(err.to_string().contains("access denied by test"));
        assert_eq!(config, FullConfig::default());
    }

    #[test]
    fn decode_failure_names_the_offending_parameter() {
        let store = MockStore::returning(vec![("/test/number", "not-a-number")]);

        let mut config = FullConfig::default();
        let err = process(&store, "", &mut config).unwrap_err();

        match err {
            HydrateError::Decode { ref name, .. } => assert_eq!(name, "/test/number"),
            other => panic!("expected decode error, got {other:?}"),
        }
        assert!(err.to_string().contains("/test/number"));
    }

    #[test]
    fn duplicate_bound_names_fail_before_any_fetch() {
        struct Clashing {
            first: String,
            second: String,
        }

        impl Hydrate for Clashing {
            fn bindings(&mut self) -> Vec<Binding<'_>> {
                vec![
                    Binding::leaf("/key", &mut self.first),
                    Binding::leaf("/key", &mut self.second),
                ]
            }
        }

        let store = MockStore::default();
        let mut config = Clashing {
            first: String::new(),
            second: String::new(),
        };
        let err = process(&store, "", &mut config).unwrap_err();

        assert!(matches!(err, HydrateError::DuplicateName(ref name) if name == "/key"));
        assert!(store.seen.borrow().is_none());
    }
}

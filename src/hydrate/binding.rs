//! Binding tables: how a record declares which fields the store fills.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use super::decode::{DecodeError, FromParam};
use crate::error::HydrateError;

/// Writes a decoded value into its destination field.
pub(crate) type Setter<'a> = Box<dyn FnMut(&str) -> Result<(), DecodeError> + 'a>;

/// A record whose fields can be hydrated from a parameter store.
///
/// Implementations list one [`Binding`] per bound field or nested sub-record.
/// Fields without a binding are left untouched; unexported or read-only state
/// is simply never listed.
///
/// ## Example
///
/// ```
/// use param_hydrate::{Binding, Hydrate};
///
/// #[derive(Default)]
/// struct Database {
///     host: String,
///     port: u16,
/// }
///
/// impl Hydrate for Database {
///     fn bindings(&mut self) -> Vec<Binding<'_>> {
///         vec![
///             Binding::leaf("/host", &mut self.host),
///             Binding::leaf("/port", &mut self.port),
///         ]
///     }
/// }
///
/// #[derive(Default)]
/// struct AppConfig {
///     name: String,
///     database: Database,
/// }
///
/// impl Hydrate for AppConfig {
///     fn bindings(&mut self) -> Vec<Binding<'_>> {
///         vec![
///             Binding::leaf("/name", &mut self.name),
///             // fields land under "<prefix>/database/..."
///             Binding::group("/database", &mut self.database),
///         ]
///     }
/// }
/// ```
pub trait Hydrate {
    /// Returns the bindings for this record's fields, in declaration order.
    fn bindings(&mut self) -> Vec<Binding<'_>>;
}

/// One entry in a record's binding table: a bound leaf field or a nested
/// sub-record grouped under an added path segment.
pub struct Binding<'a> {
    tag: String,
    slot: Slot<'a>,
}

enum Slot<'a> {
    Leaf(Setter<'a>),
    Record(&'a mut dyn Hydrate),
}

impl<'a> Binding<'a> {
    /// Binds a field to a remote parameter name segment.
    ///
    /// The field's fully-qualified name is the accumulated prefix of all
    /// enclosing groups concatenated with `tag`.
    pub fn leaf<T: FromParam>(tag: impl Into<String>, field: &'a mut T) -> Self {
        Binding {
            tag: tag.into(),
            slot: Slot::Leaf(Box::new(move |raw| {
                *field = T::from_param(raw)?;
                Ok(())
            })),
        }
    }

    /// Nests a sub-record, adding `tag` to the prefix of all its fields.
    pub fn group<R: Hydrate>(tag: impl Into<String>, record: &'a mut R) -> Self {
        Binding {
            tag: tag.into(),
            slot: Slot::Record(record),
        }
    }

    /// Nests a sub-record without adding a path segment (flattened style).
    pub fn record<R: Hydrate>(record: &'a mut R) -> Self {
        Self::group("", record)
    }
}

impl fmt::Debug for Binding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.slot {
            Slot::Leaf(_) => "leaf",
            Slot::Record(_) => "record",
        };
        f.debug_struct("Binding")
            .field("tag", &self.tag)
            .field("kind", &kind)
            .finish()
    }
}

struct QueueEntry<'a> {
    prefix: String,
    binding: Binding<'a>,
}

/// Walks a binding table breadth-first, accumulating prefixes, and returns
/// the mapping from fully-qualified parameter name to destination field.
///
/// Sub-record bindings enqueue their own fields (discovered only when the
/// entry is dequeued) under `prefix + tag` rather than being descended into
/// immediately. Pure structural analysis; nothing is mutated.
pub(crate) fn walk<'a>(
    prefix: &str,
    bindings: Vec<Binding<'a>>,
) -> Result<BTreeMap<String, Setter<'a>>, HydrateError> {
    let mut queue: VecDeque<QueueEntry<'a>> = bindings
        .into_iter()
        .map(|binding| QueueEntry {
            prefix: prefix.to_string(),
            binding,
        })
        .collect();

    let mut fields = BTreeMap::new();

    while let Some(QueueEntry { prefix, binding }) = queue.pop_front() {
        match binding.slot {
            Slot::Record(record) => {
                let child_prefix = format!("{}{}", prefix, binding.tag);
                for child in record.bindings() {
                    queue.push_back(QueueEntry {
                        prefix: child_prefix.clone(),
                        binding: child,
                    });
                }
            }
            Slot::Leaf(setter) => {
                if binding.tag.is_empty() {
                    return Err(HydrateError::UnnamedBinding { prefix });
                }
                let name = format!("{}{}", prefix, binding.tag);
                if fields.insert(name.clone(), setter).is_some() {
                    return Err(HydrateError::DuplicateName(name));
                }
            }
        }
    }

    Ok(fields)
}

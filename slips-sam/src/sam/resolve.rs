use indexmap::IndexMap;
use log::debug;
use serde_json::Value;

use crate::errors::Result;
use crate::sam::arn;
use crate::sam::reference::Reference;
use crate::sam::storage;

/// The outcome of deciding between an externally supplied resource and one
/// this template creates. `definition` is only present in the latter case.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<T> {
    pub logical_name: String,
    pub value: T,
    pub definition: Option<Value>,
}

impl<T> Resolution<T> {
    pub fn is_managed(&self) -> bool {
        self.definition.is_some()
    }

    /// Moves a synthesized definition into `resources` under its logical name
    /// and returns the resolved value.
    pub fn place(self, resources: &mut IndexMap<String, Value>) -> T {
        if let Some(definition) = self.definition {
            resources.insert(self.logical_name, definition);
        }
        self.value
    }
}

/// An ARN plus the short name functions are configured with.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedResource {
    pub arn: Reference,
    pub name: Reference,
}

impl NamedResource {
    fn managed(logical_name: &str) -> Self {
        NamedResource {
            arn: Reference::arn_of(logical_name),
            name: Reference::name_of(logical_name),
        }
    }
}

/// Resolve-or-synthesize: an `external` identifier is turned into a value by
/// `from_external` and nothing is created; otherwise `synthesize` builds the
/// definition and `from_managed` references it by `logical_name`.
pub fn resolve<I, T, S, E, M>(
    external: Option<I>,
    logical_name: &str,
    synthesize: S,
    from_external: E,
    from_managed: M,
) -> Result<Resolution<T>>
where
    S: FnOnce() -> Value,
    I: std::fmt::Debug,
    E: FnOnce(I) -> Result<T>,
    M: FnOnce(&str) -> T,
{
    match external {
        Some(id) => {
            debug!("{logical_name}: using existing resource {id:?}");
            Ok(Resolution {
                logical_name: logical_name.to_string(),
                value: from_external(id)?,
                definition: None,
            })
        }
        None => {
            debug!("{logical_name}: creating managed resource");
            Ok(Resolution {
                logical_name: logical_name.to_string(),
                value: from_managed(logical_name),
                definition: Some(synthesize()),
            })
        }
    }
}

pub fn stream(external: Option<&str>, logical_name: &str) -> Result<Resolution<NamedResource>> {
    resolve(
        external,
        logical_name,
        storage::kinesis_stream,
        |id| {
            Ok(NamedResource {
                arn: Reference::external(id),
                name: Reference::external(&arn::stream_name(id)?),
            })
        },
        NamedResource::managed,
    )
}

pub fn table(external: Option<&str>, logical_name: &str) -> Result<Resolution<NamedResource>> {
    resolve(
        external,
        logical_name,
        storage::error_table,
        |id| {
            Ok(NamedResource {
                arn: Reference::external(id),
                name: Reference::external(&arn::table_name(id)?),
            })
        },
        NamedResource::managed,
    )
}

pub fn topic(external: Option<&Value>, logical_name: &str) -> Result<Resolution<Reference>> {
    resolve(
        external,
        logical_name,
        storage::error_notification_topic,
        |id| Ok(Reference::External(id.clone())),
        |name| Reference::Ref(name.to_string()),
    )
}

pub fn role<S>(external: Option<&Value>, logical_name: &str, synthesize: S) -> Result<Resolution<Reference>>
where
    S: FnOnce() -> Value,
{
    resolve(
        external,
        logical_name,
        synthesize,
        |id| Ok(Reference::External(id.clone())),
        Reference::arn_of,
    )
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod resolve_tests;

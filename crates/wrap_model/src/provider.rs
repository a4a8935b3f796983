//! Where wrap-requests and type surfaces come from.
//!
//! A host (compiler plugin, build script, the CLI) implements
//! [DescriptorProvider] and the generator never looks past it.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use common::{wrap_fn, wrapper, MyResult, MyResultTrait, OptionVecTrait};
use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::descriptor::{ManualOverrideSet, OperationSignature, TargetTypeDescriptor, TypeRef, WrapRequest};
use crate::error::WrapError;

#[enum_dispatch]
pub trait DescriptorProvider {
    /// Every wrap-request in the unit, in discovery order.
    fn wrap_requests(&self) -> Vec<WrapRequest>;
    fn resolve_target(&self, request: &WrapRequest) -> Result<TargetTypeDescriptor, WrapError>;
    /// Operations hand-written on the wrapper. Unknown wrappers have none.
    fn manual_overrides(&self, request: &WrapRequest) -> Result<ManualOverrideSet, WrapError>;
}

#[enum_dispatch(DescriptorProvider)]
#[derive(Debug)]
pub enum Provider {
    InMemoryProvider,
    JsonProvider,
}

/// Descriptors held in memory, registered through a builder.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProvider {
    types: Vec<TargetTypeDescriptor>,
    requests: Vec<(WrapRequest, ManualOverrideSet)>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_type(mut self, descriptor: TargetTypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }
    pub fn with_request<O>(mut self, request: WrapRequest, overrides: O) -> Self
        where O: IntoIterator<Item = OperationSignature>
    {
        self.requests.push((request, overrides.into_iter().collect()));
        self
    }
}

impl DescriptorProvider for InMemoryProvider {
    fn wrap_requests(&self) -> Vec<WrapRequest> {
        self.requests.iter().map(|(r, _)| r.clone()).collect()
    }

    fn resolve_target(&self, request: &WrapRequest) -> Result<TargetTypeDescriptor, WrapError> {
        let mut candidates = self.types.iter().filter(|t| t.answers_to(&request.target));
        match (candidates.next(), candidates.next()) {
            (Some(found), None) => Ok(found.clone()),
            (Some(_), Some(_)) => {
                log::warn!("{} matches more than one type; qualify it with a namespace", request.target);
                Err(WrapError::unresolved(&request.wrapper_name, &request.target))
            }
            (None, _) => Err(WrapError::unresolved(&request.wrapper_name, &request.target)),
        }
    }

    fn manual_overrides(&self, request: &WrapRequest) -> Result<ManualOverrideSet, WrapError> {
        Ok(self.requests.iter()
            .find(|(r, _)| r.wrapper_name == request.wrapper_name && r.namespace == request.namespace)
            .map(|(_, overrides)| overrides.clone())
            .unwrap_or_default())
    }
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
struct WrapperSchema {
    name: String,
    #[serde(default)]
    namespace: String,
    target: TypeRef,
    manual: Option<Vec<OperationSignature>>,
}

/// The descriptor document:
///
/// ```json
/// {
///   "types": [{"name": "ToWrap", "namespace": "Lib",
///              "operations": ["public void Run(string name)"]}],
///   "wrappers": [{"name": "Runner", "namespace": "App", "target": "Lib.ToWrap",
///                 "manual": ["public void Run(string name)"]}]
/// }
/// ```
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
struct DescriptorSchema {
    #[serde(default)]
    types: Vec<TargetTypeDescriptor>,
    #[serde(default)]
    wrappers: Vec<WrapperSchema>,
}

impl From<DescriptorSchema> for InMemoryProvider {
    fn from(schema: DescriptorSchema) -> Self {
        let provider = schema.types.into_iter()
            .fold(InMemoryProvider::new(), |p, t| p.with_type(t));
        schema.wrappers.into_iter().fold(provider, |p, w| {
            let request = WrapRequest::new(w.name, w.namespace, w.target);
            p.with_request(request, w.manual.to_vec())
        })
    }
}

wrapper!(
/// Descriptors read from a JSON document.
#[derive(Debug)]
pub JsonProvider wraps InMemoryProvider
);

impl JsonProvider {
    pub fn from_reader<R: Read>(reader: R) -> MyResult<Self> {
        let schema: DescriptorSchema = serde_json::from_reader(reader)?;
        log::debug!("Loaded {} types and {} wrappers", schema.types.len(), schema.wrappers.len());
        Ok(Self(schema.into()))
    }
    pub fn from_json<S: AsRef<str>>(json: S) -> MyResult<Self> {
        serde_json::from_str::<DescriptorSchema>(json.as_ref())
            .my_result()
            .map(|schema| Self(schema.into()))
    }
    pub fn from_path<P: AsRef<Path>>(path: P) -> MyResult<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| simple_error::simple_error!("{}: {}", path.as_ref().display(), e))?;
        Self::from_reader(BufReader::new(file))
    }
}

impl DescriptorProvider for JsonProvider {
    wrap_fn!(fn wrap_requests(&self) -> Vec<WrapRequest>);
    wrap_fn!(fn resolve_target(&self, request: &WrapRequest) -> Result<TargetTypeDescriptor, WrapError>);
    wrap_fn!(fn manual_overrides(&self, request: &WrapRequest) -> Result<ManualOverrideSet, WrapError>);
}

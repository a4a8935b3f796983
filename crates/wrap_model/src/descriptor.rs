use std::fmt::{self, Display};
use std::str::FromStr;

use common::{wrap_fn, wrapper, StrCaseExt};
use serde::{Deserialize, Serialize};

use crate::error::WrapError;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Accessibility {
    #[default]
    Public,
    Protected,
    Internal,
    ProtectedInternal,
    PrivateProtected,
    Private,
}

impl Accessibility {
    /// Lower-cased modifier as it appears in a declaration.
    pub fn keyword(&self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Protected => "protected",
            Accessibility::Internal => "internal",
            Accessibility::ProtectedInternal => "protected internal",
            Accessibility::PrivateProtected => "private protected",
            Accessibility::Private => "private",
        }
    }
}

impl Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Accessibility {
    type Err = WrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words = s.split_whitespace()
            .map(|w| w.to_ascii_lowercase())
            .collect::<Vec<_>>();
        let words = words.iter().map(String::as_str).collect::<Vec<_>>();
        match words.as_slice() {
            [] | ["public"] => Ok(Accessibility::Public),
            ["protected"] => Ok(Accessibility::Protected),
            ["internal"] => Ok(Accessibility::Internal),
            ["protected", "internal"] | ["internal", "protected"] => Ok(Accessibility::ProtectedInternal),
            ["private", "protected"] | ["protected", "private"] => Ok(Accessibility::PrivateProtected),
            ["private"] => Ok(Accessibility::Private),
            _ => Err(WrapError::signature(s, "unknown accessibility")),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    #[default]
    Method,
    Constructor,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    #[serde(alias = "type")]
    pub type_name: String,
    pub name: String,
}

impl Parameter {
    pub fn new<T: Into<String>, N: Into<String>>(type_name: T, name: N) -> Self {
        Self { type_name: type_name.into(), name: name.into() }
    }
}

/// One operation on a target type or on a wrapper.
///
/// Deserializes either from the structured form or from the one-line
/// shorthand `"public void Run(string name, int count)"` (prefix `ctor `
/// for constructors).
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(try_from = "SignatureRepr")]
pub struct OperationSignature {
    pub name: String,
    pub kind: OperationKind,
    pub accessibility: Accessibility,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
}

impl OperationSignature {
    /// A public method with no parameters yet.
    pub fn method<N: Into<String>, R: Into<String>>(name: N, return_type: R) -> Self {
        Self {
            name: name.into(),
            kind: OperationKind::Method,
            accessibility: Accessibility::Public,
            return_type: return_type.into(),
            parameters: Vec::new(),
        }
    }
    pub fn constructor<N: Into<String>>(type_name: N) -> Self {
        Self {
            kind: OperationKind::Constructor,
            ..Self::method(type_name, "void")
        }
    }
    pub fn param<T: Into<String>, N: Into<String>>(mut self, type_name: T, name: N) -> Self {
        self.parameters.push(Parameter::new(type_name, name));
        self
    }
    pub fn with_accessibility(mut self, accessibility: Accessibility) -> Self {
        self.accessibility = accessibility;
        self
    }
    pub fn is_constructor(&self) -> bool {
        self.kind == OperationKind::Constructor
    }
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
    pub fn returns_void(&self) -> bool {
        self.return_type.trim().eq_ignore_case("void")
    }
}

impl Display for OperationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_constructor() {
            write!(f, "ctor {} {}(", self.accessibility, self.name)?;
        } else {
            write!(f, "{} {} {}(", self.accessibility, self.return_type, self.name)?;
        }
        for (idx, p) in self.parameters.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", p.type_name, p.name)?;
        }
        f.write_str(")")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SignatureRepr {
    Shorthand(String),
    Structured(StructuredSignature),
}

#[derive(Deserialize)]
struct StructuredSignature {
    name: String,
    #[serde(default)]
    kind: OperationKind,
    #[serde(default)]
    accessibility: Accessibility,
    #[serde(default = "void")]
    return_type: String,
    #[serde(default)]
    parameters: Vec<Parameter>,
}
fn void() -> String { "void".to_string() }

impl TryFrom<SignatureRepr> for OperationSignature {
    type Error = WrapError;

    fn try_from(repr: SignatureRepr) -> Result<Self, Self::Error> {
        match repr {
            SignatureRepr::Shorthand(s) => s.parse(),
            SignatureRepr::Structured(s) => Ok(OperationSignature {
                name: s.name,
                kind: s.kind,
                accessibility: s.accessibility,
                return_type: s.return_type,
                parameters: s.parameters,
            }),
        }
    }
}

wrapper!(
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub TypeRef wraps String
);

impl TypeRef {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }
    /// Last dotted segment: `ThopDev.Test.ToWrap` -> `ToWrap`.
    pub fn simple_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
    pub fn namespace(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(ns, _)| ns)
    }
}

impl Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeRef {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The public surface of a type that gets wrapped.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TargetTypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub operations: Vec<OperationSignature>,
}

impl TargetTypeDescriptor {
    pub fn new<N: Into<String>, S: Into<String>>(name: N, namespace: S) -> Self {
        Self { name: name.into(), namespace: namespace.into(), operations: Vec::new() }
    }
    pub fn with_operation(mut self, op: OperationSignature) -> Self {
        self.operations.push(op);
        self
    }
    /// Operations in declaration order, constructors left out.
    pub fn methods(&self) -> impl Iterator<Item = &OperationSignature> {
        self.operations.iter().filter(|op| !op.is_constructor())
    }
    pub fn has_methods(&self) -> bool {
        self.methods().next().is_some()
    }
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
    /// Whether `target` names this type, either simply or fully qualified.
    pub fn answers_to(&self, target: &TypeRef) -> bool {
        match target.namespace() {
            Some(_) => target.get_ref() == &self.qualified_name(),
            None => target.get_ref() == &self.name,
        }
    }
}

wrapper!(
/// Operations the user already wrote by hand on the wrapper.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub ManualOverrideSet wraps Vec<OperationSignature>
);

impl ManualOverrideSet {
    wrap_fn!(pub fn len(&self) -> usize);
    wrap_fn!(pub fn is_empty(&self) -> bool);
    wrap_fn!(pub fn iter(&self) -> std::slice::Iter<'_, OperationSignature>);
}

impl FromIterator<OperationSignature> for ManualOverrideSet {
    fn from_iter<I: IntoIterator<Item = OperationSignature>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ManualOverrideSet {
    type Item = &'a OperationSignature;
    type IntoIter = std::slice::Iter<'a, OperationSignature>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One wrapper-name to target-type pairing.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WrapRequest {
    pub wrapper_name: String,
    #[serde(default)]
    pub namespace: String,
    pub target: TypeRef,
}

impl WrapRequest {
    pub fn new<W, N, T>(wrapper_name: W, namespace: N, target: T) -> Self
        where W: Into<String>, N: Into<String>, T: Into<TypeRef>
    {
        Self { wrapper_name: wrapper_name.into(), namespace: namespace.into(), target: target.into() }
    }
    pub fn interface_name(&self) -> String {
        format!("I{}", self.wrapper_name)
    }
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.wrapper_name.clone()
        } else {
            format!("{}.{}", self.namespace, self.wrapper_name)
        }
    }
}

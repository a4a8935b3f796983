//! One-line signature notation used by descriptor documents and tests:
//!
//! ```text
//! public void TestFunction(string ab, bool test, int number)
//! protected internal int Count()
//! ctor public ToWrap(int seed)
//! ```
//!
//! Return types cannot contain whitespace; parameter types may
//! (`Dictionary<string, int> map`).
use std::str::FromStr;

use common::StrCaseExt;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::descriptor::{OperationKind, OperationSignature, Parameter};
use crate::error::WrapError;

static SIGNATURE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^\s*(?P<ctor>ctor\s+)?",
        r"(?P<access>(?:(?:public|protected|internal|private)\s+){0,2})",
        r"(?:(?P<ret>[^\s()]+)\s+)?",
        r"(?P<name>[A-Za-z_][A-Za-z0-9_]*)\s*",
        r"\((?P<params>.*)\)\s*;?\s*$",
    ))
    .expect("signature pattern is valid")
});

impl FromStr for OperationSignature {
    type Err = WrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = SIGNATURE.captures(s)
            .ok_or_else(|| WrapError::signature(s, "expected `<access> <return> <Name>(<params>)`"))?;
        let kind = if caps.name("ctor").is_some() {
            OperationKind::Constructor
        } else {
            OperationKind::Method
        };
        let return_type = match (kind, caps.name("ret")) {
            (OperationKind::Constructor, None) => "void".to_string(),
            (OperationKind::Constructor, Some(_)) =>
                return Err(WrapError::signature(s, "constructors have no return type")),
            (OperationKind::Method, Some(ret)) => ret.as_str().to_string(),
            (OperationKind::Method, None) =>
                return Err(WrapError::signature(s, "missing return type")),
        };
        let accessibility = caps.name("access").map_or("", |m| m.as_str()).parse()?;
        let parameters = split_parameters(caps.name("params").map_or("", |m| m.as_str()))
            .into_iter()
            .map(|p| parse_parameter(s, p))
            .collect::<Result<Vec<_>, _>>()?;
        let op = OperationSignature {
            name: caps["name"].to_string(),
            kind,
            accessibility,
            return_type,
            parameters,
        };
        log::debug!("Read signature {s:?} as {op}");
        Ok(op)
    }
}

/// Splits on commas that are not nested inside `<>`, `[]` or `()`.
fn split_parameters(params: &str) -> Vec<&str> {
    if params.is_blank() {
        return Vec::new();
    }
    let mut depth = 0i32;
    let mut start = 0;
    let mut parts = Vec::new();
    for (idx, ch) in params.char_indices() {
        match ch {
            '<' | '[' | '(' => depth += 1,
            '>' | ']' | ')' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&params[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&params[start..]);
    parts
}

fn parse_parameter(signature: &str, param: &str) -> Result<Parameter, WrapError> {
    let param = param.trim();
    let (type_name, name) = param.rsplit_once(char::is_whitespace)
        .ok_or_else(|| WrapError::signature(signature, format!("parameter {param:?} needs a type and a name")))?;
    let type_name = type_name.trim();
    if type_name.is_empty() || name.is_empty() {
        return Err(WrapError::signature(signature, format!("parameter {param:?} needs a type and a name")));
    }
    Ok(Parameter::new(type_name, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::Accessibility;

    #[test]
    fn nested_generic_parameters() {
        assert_eq!(
            split_parameters("Dictionary<string, int> map, int[] xs"),
            vec!["Dictionary<string, int> map", " int[] xs"]
        );
        assert!(split_parameters("  ").is_empty());
    }

    #[test]
    fn reads_method() {
        let op: OperationSignature = "public void TestFunction(string ab, bool test, int number)".parse().unwrap();
        assert_eq!(op.name, "TestFunction");
        assert_eq!(op.return_type, "void");
        assert_eq!(op.accessibility, Accessibility::Public);
        assert_eq!(op.parameters, vec![
            Parameter::new("string", "ab"),
            Parameter::new("bool", "test"),
            Parameter::new("int", "number"),
        ]);
    }

    #[test]
    fn reads_constructor() {
        let op: OperationSignature = "ctor public ToWrap(int seed)".parse().unwrap();
        assert!(op.is_constructor());
        assert_eq!(op.name, "ToWrap");
        assert!("ctor public void ToWrap()".parse::<OperationSignature>().is_err());
    }

    #[test]
    fn rejects_incomplete() {
        assert!("Run()".parse::<OperationSignature>().is_err());
        assert!("public void Run(string)".parse::<OperationSignature>().is_err());
        assert!("public void".parse::<OperationSignature>().is_err());
    }
}

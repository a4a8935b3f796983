use std::fmt::{self, Display};
use std::sync::{Mutex, PoisonError};

use common::Warning;
use itertools::Itertools;
use serde::Serialize;
use simple_error::simple_error;
use wrap_model::WrapError;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Interface,
    Class,
    MarkerAttribute,
}

/// One emitted source text and the synthetic file name it goes under.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub file_id: String,
    pub kind: ArtifactKind,
    pub source: String,
}

impl GeneratedArtifact {
    pub fn new<F: Into<String>>(file_id: F, kind: ArtifactKind, source: String) -> Self {
        Self { file_id: file_id.into(), kind, source }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub wrapper: String,
    pub error: WrapError,
}

impl Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.wrapper, self.error)
    }
}

/// Shared sink the workers append to. Order of arrival does not matter;
/// [ArtifactCollector::into_report] sorts by file name.
#[derive(Debug, Default)]
pub struct ArtifactCollector {
    artifacts: Mutex<Vec<GeneratedArtifact>>,
    failures: Mutex<Vec<RequestFailure>>,
}

impl ArtifactCollector {
    pub fn push<I: IntoIterator<Item = GeneratedArtifact>>(&self, artifacts: I) {
        self.artifacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(artifacts);
    }
    pub fn fail<W: Into<String>>(&self, wrapper: W, error: WrapError) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RequestFailure { wrapper: wrapper.into(), error });
    }
    pub fn into_report(self) -> GenerationReport {
        let mut artifacts = self.artifacts.into_inner().unwrap_or_else(PoisonError::into_inner);
        let mut failures = self.failures.into_inner().unwrap_or_else(PoisonError::into_inner);
        artifacts.sort_by(|a, b| a.file_id.cmp(&b.file_id).then_with(|| a.source.cmp(&b.source)));
        failures.sort_by_cached_key(|f| (f.wrapper.clone(), f.error.to_string()));
        GenerationReport { artifacts, failures }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub artifacts: Vec<GeneratedArtifact>,
    pub failures: Vec<RequestFailure>,
}

impl GenerationReport {
    pub fn artifact(&self, file_id: &str) -> Option<&GeneratedArtifact> {
        self.artifacts.iter().find(|a| a.file_id == file_id)
    }
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
    pub fn failure_summary(&self) -> Option<String> {
        (!self.failures.is_empty()).then(|| self.failures.iter().join("\n"))
    }
    /// Artifacts, plus an error summarizing the requests that produced none.
    pub fn into_warning(self) -> Warning<Vec<GeneratedArtifact>> {
        let summary = self.failure_summary().map(|s| simple_error!(s));
        Warning::from(self.artifacts, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_is_sorted_regardless_of_arrival() {
        let collector = ArtifactCollector::default();
        collector.push(vec![
            GeneratedArtifact::new("b.g", ArtifactKind::Class, String::new()),
            GeneratedArtifact::new("Ib.g", ArtifactKind::Interface, String::new()),
        ]);
        collector.push(vec![GeneratedArtifact::new("a.g", ArtifactKind::Class, String::new())]);
        collector.fail("z", WrapError::unresolved("z", "Z"));
        collector.fail("y", WrapError::unresolved("y", "Y"));
        let report = collector.into_report();
        assert_eq!(report.artifacts.iter().map(|a| a.file_id.as_str()).collect::<Vec<_>>(), vec!["Ib.g", "a.g", "b.g"]);
        assert_eq!(report.failures[0].wrapper, "y");
        assert!(!report.is_clean());
        assert!(report.into_warning().is_partial());
    }

    #[test]
    fn equal_file_ids_sort_by_source() {
        let arrivals = [("W.g", "namespace NsB"), ("W.g", "namespace NsA"), ("IW.g", "x")];
        let sorted = |order: &[usize]| {
            let collector = ArtifactCollector::default();
            for &i in order {
                let (id, source) = arrivals[i];
                collector.push([GeneratedArtifact::new(id, ArtifactKind::Class, source.to_string())]);
            }
            collector.into_report()
        };
        let report = sorted(&[0, 1, 2]);
        assert_eq!(report, sorted(&[2, 1, 0]));
        assert_eq!(report.artifacts[1].source, "namespace NsA");
    }
}

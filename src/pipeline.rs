//! Per-request generation of the interface and class artifacts, and the
//! fan-out over every request a provider knows about.
use std::collections::HashMap;

use common::{MyResult, StrCaseExt};
use simple_error::simple_error;
use wrap_emit::{IndentWriter, MemberDecision, MemberEmitter};
use wrap_model::{DescriptorProvider, ManualOverrideSet, TargetTypeDescriptor, WrapError, WrapRequest};

use crate::artifact::{ArtifactCollector, ArtifactKind, GeneratedArtifact, GenerationReport};
use crate::config::GeneratorConfig;

pub const MARKER_FILE_ID: &str = "WrapAttribute.g";

/// The two artifacts produced for one wrap-request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperArtifacts {
    pub interface: GeneratedArtifact,
    pub class: GeneratedArtifact,
}

impl IntoIterator for WrapperArtifacts {
    type Item = GeneratedArtifact;
    type IntoIter = std::array::IntoIter<GeneratedArtifact, 2>;

    fn into_iter(self) -> Self::IntoIter {
        [self.interface, self.class].into_iter()
    }
}

/// Builds both artifacts from already resolved inputs.
pub fn generate_wrapper(
    request: &WrapRequest,
    target: &TargetTypeDescriptor,
    overrides: &ManualOverrideSet,
    config: &GeneratorConfig,
) -> Result<WrapperArtifacts, WrapError> {
    if !target.has_methods() {
        log::debug!("{}", WrapError::EmptyOperationSet { target: target.qualified_name() });
    }
    let emitter = MemberEmitter::new(config.indent.as_str());
    let interface = GeneratedArtifact::new(
        config.interface_file_id(&request.wrapper_name)?,
        ArtifactKind::Interface,
        interface_source(request, target, &emitter, config),
    );
    let class = GeneratedArtifact::new(
        config.class_file_id(&request.wrapper_name)?,
        ArtifactKind::Class,
        class_source(request, target, overrides, &emitter, config),
    );
    log::debug!("{} -> {}, {}", request.wrapper_name, interface.file_id, class.file_id);
    Ok(WrapperArtifacts { interface, class })
}

fn preamble(w: &mut IndentWriter, request: &WrapRequest, target: &TargetTypeDescriptor, config: &GeneratorConfig) {
    if config.emit_usings && !target.namespace.is_empty() && target.namespace != request.namespace {
        w.line(format!("using {};", target.namespace)).blank();
    }
    if !request.namespace.is_empty() {
        w.open(format!("namespace {}", request.namespace));
    }
}

fn close_all(mut w: IndentWriter) -> String {
    while w.level() > 0 {
        w.close();
    }
    w.finish()
}

fn interface_source(
    request: &WrapRequest,
    target: &TargetTypeDescriptor,
    emitter: &MemberEmitter,
    config: &GeneratorConfig,
) -> String {
    let mut w = IndentWriter::new(config.indent.as_str());
    preamble(&mut w, request, target, config);
    w.open(format!("public interface {}", request.interface_name()));
    for member in target.methods().filter_map(|op| emitter.emit_interface_member(op)) {
        w.line(member);
    }
    close_all(w)
}

fn class_source(
    request: &WrapRequest,
    target: &TargetTypeDescriptor,
    overrides: &ManualOverrideSet,
    emitter: &MemberEmitter,
    config: &GeneratorConfig,
) -> String {
    let field = format!("_{}", target.name);
    let mut w = IndentWriter::new(config.indent.as_str());
    preamble(&mut w, request, target, config);
    w.open(format!("public partial class {}", request.wrapper_name));
    w.line(format!("private readonly {} {};", target.name, field));
    w.blank();
    w.open(format!("public {}({} wrapObject)", request.wrapper_name, target.name));
    w.line(format!("{field} = wrapObject;"));
    w.close();
    for op in target.methods() {
        let decision = MemberDecision::decide(op, overrides, &config.match_policy);
        if let Some(member) = emitter.render_class_member(op, decision, &field) {
            w.blank().fragment(member);
        }
    }
    close_all(w)
}

fn marker_source(config: &GeneratorConfig) -> String {
    let mut w = IndentWriter::new(config.indent.as_str());
    w.line("using System;").blank();
    if !config.marker_namespace.is_blank() {
        w.open(format!("namespace {}", config.marker_namespace.trim()));
    }
    w.line("[AttributeUsage(AttributeTargets.Class, Inherited = false, AllowMultiple = false)]");
    w.open("public sealed class WrapAttribute : Attribute");
    w.open("public WrapAttribute(Type typeInfo)");
    close_all(w)
}

/// Runs every wrap-request of a provider, spreading requests over
/// `config.workers` threads.
pub struct WrapperGenerationPipeline<'p, P> {
    provider: &'p P,
    config: GeneratorConfig,
}

impl<'p, P> WrapperGenerationPipeline<'p, P>
    where P: DescriptorProvider + Sync
{
    pub fn new(provider: &'p P, config: GeneratorConfig) -> Self {
        Self { provider, config }
    }

    /// Resolves one request and builds its artifacts. Failure here only
    /// concerns this request.
    pub fn generate_request(&self, request: &WrapRequest) -> Result<WrapperArtifacts, WrapError> {
        let target = self.provider.resolve_target(request)?;
        let overrides = self.provider.manual_overrides(request)?;
        generate_wrapper(request, &target, &overrides, &self.config)
    }

    /// Reserves the request's file names, or names the request that
    /// already holds one of them.
    fn claim_file_ids(&self, request: &WrapRequest, claimed: &mut HashMap<String, String>) -> Result<(), WrapError> {
        let owner = request.qualified_name();
        let ids = [
            self.config.interface_file_id(&request.wrapper_name)?,
            self.config.class_file_id(&request.wrapper_name)?,
        ];
        if let Some((file_id, holder)) = ids.iter().find_map(|id| claimed.get(id).map(|h| (id, h))) {
            return Err(WrapError::DuplicateFileId {
                wrapper: owner,
                file_id: file_id.clone(),
                owner: holder.clone(),
            });
        }
        for id in ids {
            claimed.insert(id, owner.clone());
        }
        Ok(())
    }

    pub fn generate_all(&self) -> MyResult<GenerationReport> {
        let requests = self.provider.wrap_requests();
        if requests.is_empty() {
            log::debug!("{}", WrapError::MissingWrapRequest);
            return Ok(GenerationReport::default());
        }

        let collector = ArtifactCollector::default();
        let mut claimed = HashMap::new();
        if self.config.emit_marker_attribute {
            claimed.insert(MARKER_FILE_ID.to_string(), "the marker attribute".to_string());
            collector.push([GeneratedArtifact::new(MARKER_FILE_ID, ArtifactKind::MarkerAttribute, marker_source(&self.config))]);
        }
        // Claims happen in discovery order, before any thread starts.
        let mut runnable = Vec::with_capacity(requests.len());
        for request in &requests {
            match self.claim_file_ids(request, &mut claimed) {
                Ok(()) => runnable.push(request),
                Err(err) => {
                    log::warn!("Skipping {}: {}", request.wrapper_name, err);
                    collector.fail(request.wrapper_name.as_str(), err);
                }
            }
        }

        let workers = self.config.worker_count().min(runnable.len()).max(1);
        let chunk = ((runnable.len() + workers - 1) / workers).max(1);
        std::thread::scope(|s| {
            for batch in runnable.chunks(chunk) {
                let collector = &collector;
                s.spawn(move || {
                    for request in batch {
                        match self.generate_request(request) {
                            Ok(artifacts) => collector.push(artifacts),
                            Err(err) => {
                                log::warn!("Skipping {}: {}", request.wrapper_name, err);
                                collector.fail(request.wrapper_name.as_str(), err);
                            }
                        }
                    }
                });
            }
        });

        let report = collector.into_report();
        log::info!(
            "Generated {} artifacts for {} wrap-requests ({} failed)",
            report.artifacts.len(),
            requests.len(),
            report.failures.len()
        );
        match report.failure_summary() {
            Some(summary) if !self.config.skip_if_error => Err(simple_error!(summary).into()),
            _ => Ok(report),
        }
    }
}

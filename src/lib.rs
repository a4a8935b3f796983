//! Generates a forwarding partial class and a companion interface for a
//! target type, leaving alone every operation the wrapper already
//! implements by hand.
//!
//! ```no_run
//! use auto_wrapper::*;
//!
//! let provider = JsonProvider::from_path("descriptors.json")?;
//! let report = generate(&provider, GeneratorConfig::default())?;
//! for artifact in report.artifacts {
//!     println!("// {}\n{}", artifact.file_id, artifact.source);
//! }
//! # Ok::<(), AnyErr>(())
//! ```
mod artifact;
mod config;
mod pipeline;

pub use artifact::*;
pub use config::*;
pub use pipeline::*;

pub use common::{AnyErr, MyResult, MyResultTrait, Warning};
pub use wrap_emit::{
    IndentWriter, MatchPolicy, MemberDecision, MemberEmitter, PositionalPrefix, SignatureMatcher,
    StrictSignature,
};
pub use wrap_model::{
    Accessibility, DescriptorProvider, InMemoryProvider, JsonProvider, ManualOverrideSet,
    OperationKind, OperationSignature, Parameter, Provider, TargetTypeDescriptor, TypeRef,
    WrapError, WrapRequest,
};

/// Runs every wrap-request the provider knows about.
pub fn generate<P>(provider: &P, config: GeneratorConfig) -> MyResult<GenerationReport>
    where P: DescriptorProvider + Sync
{
    WrapperGenerationPipeline::new(provider, config).generate_all()
}

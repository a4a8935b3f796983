use std::{collections::HashMap, fs::File, io::{BufReader, Read}, num::NonZeroUsize, path::Path};

use common::{MyResult, MyResultTrait};
use serde::{Deserialize, Serialize};
use simple_error::simple_error;
use wrap_emit::MatchPolicy;
use wrap_model::WrapError;

/// Generation settings. Every field has a default, so `{}` is a valid
/// configuration document.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
    pub match_policy: MatchPolicy,
    pub indent: String,
    /// strfmt pattern for the interface artifact; `{name}` is the wrapper name.
    pub interface_file: String,
    pub class_file: String,
    /// Emit `using <target namespace>;` when it differs from the wrapper's.
    pub emit_usings: bool,
    pub emit_marker_attribute: bool,
    pub marker_namespace: String,
    pub skip_if_error: bool,
    pub workers: Option<NonZeroUsize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            match_policy: MatchPolicy::default(),
            indent: "    ".to_string(),
            interface_file: "I{name}.g".to_string(),
            class_file: "{name}.g".to_string(),
            emit_usings: true,
            emit_marker_attribute: false,
            marker_namespace: "AutoWrapper".to_string(),
            skip_if_error: true,
            workers: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_reader<R: Read>(reader: R) -> MyResult<Self> {
        let config: Self = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
    pub fn from_path<P: AsRef<Path>>(path: P) -> MyResult<Self> {
        File::open(path.as_ref())
            .map_err(|e| simple_error!("{}: {}", path.as_ref().display(), e))
            .my_result()
            .and_then(|f| Self::from_reader(BufReader::new(f)))
    }

    /// Catches unusable file patterns before any request runs.
    pub fn validate(&self) -> MyResult<&Self> {
        self.interface_file_id("Probe")?;
        let class = self.class_file_id("Probe")?;
        if class == self.interface_file_id("Probe")? {
            return Err(simple_error!("interface and class file patterns produce the same name {:?}", class).into());
        }
        Ok(self)
    }

    pub fn interface_file_id(&self, wrapper_name: &str) -> Result<String, WrapError> {
        file_id(&self.interface_file, wrapper_name)
    }
    pub fn class_file_id(&self, wrapper_name: &str) -> Result<String, WrapError> {
        file_id(&self.class_file, wrapper_name)
    }

    pub fn worker_count(&self) -> usize {
        self.workers
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }
}

fn file_id(pattern: &str, wrapper_name: &str) -> Result<String, WrapError> {
    let vars = HashMap::from([("name".to_string(), wrapper_name.to_string())]);
    strfmt::strfmt(pattern, &vars).map_err(|e| WrapError::InvalidFilePattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

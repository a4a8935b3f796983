use std::{io::Write, path::PathBuf};

use auto_wrapper::{generate, GeneratorConfig, JsonProvider, MyResult, MyResultTrait, Warning};
use clap::Parser;

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about=None)]
struct Args {
    /// JSON descriptor document listing target types and wrappers:
    /// ```
    /// {"types": [{"name": "ToWrap", "namespace": "Lib",
    ///             "operations": ["public void Run(string name)"]}],
    ///  "wrappers": [{"name": "Runner", "namespace": "App", "target": "Lib.ToWrap"}]}
    /// ```
    #[clap(short, long, value_parser)]
    descriptors: PathBuf,
    /// Optional generator configuration (JSON). Defaults apply to
    /// every field left out.
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,
    /// Print the artifacts as a JSON array instead of source text.
    #[clap(long)]
    json: bool,
}

fn main_result() -> MyResult<()> {
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => GeneratorConfig::from_path(path)?,
        None => GeneratorConfig::default(),
    };
    let provider = JsonProvider::from_path(&args.descriptors)?;
    let outcome = generate(&provider, config)?.into_warning();
    if let Warning::Partial(_, err) = &outcome {
        log::warn!("Some wrappers were not generated:\n{err}");
    }
    let artifacts = outcome.into_value();
    let mut out = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &artifacts)?;
        return writeln!(out).my_result();
    }
    for artifact in artifacts {
        writeln!(out, "// {}", artifact.file_id)?;
        out.write_all(artifact.source.as_bytes())?;
        writeln!(out)?;
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(err) = main_result() {
        log::error!("{err}");
        eprintln!("auto_wrapper: {err}");
        std::process::exit(1);
    }
}

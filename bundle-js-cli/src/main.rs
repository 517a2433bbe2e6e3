use ast_js::ast::node::Node;
use ast_js::ast::stx::TopLevel;
use bundle_js::bundle;
use bundle_js::external::HostCapabilities;
use bundle_js::BundleOptions;
use bundle_js::ModuleInput;
use clap::Parser;
use diagnostics::Severity;
use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fs;
use std::io;
use std::io::stdout;
use std::io::Write;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "bundle-js", about = "Bundle pre-parsed JS module trees")]
struct Cli {
  /// Module to bundle as `<id>=<tree.json>`; repeatable.
  #[arg(short, long = "module", value_name = "ID=PATH")]
  modules: Vec<String>,

  /// Entry module id.
  #[arg(short, long)]
  entry: String,

  /// Output destination; omit for stdout.
  #[arg(short, long)]
  output: Option<PathBuf>,

  /// Report tolerated anomalies (skipped destructuring, dangling edges,
  /// overwrites, missing entry) and fail on error-severity diagnostics.
  #[arg(long)]
  strict: bool,

  /// Module name the host provides to `require` at run time; repeatable.
  #[arg(long = "external", value_name = "NAME")]
  externals: Vec<String>,
}

#[derive(Debug)]
enum CliError {
  InvalidModuleSpec(String),
  Read(String, io::Error),
  Parse(String, serde_json::Error),
  Write(String, io::Error),
}

impl Display for CliError {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      CliError::InvalidModuleSpec(spec) => {
        write!(f, "invalid --module value `{spec}`; expected `<id>=<tree.json>`")
      }
      CliError::Read(path, err) => write!(f, "failed to read {path}: {err}"),
      CliError::Parse(path, err) => write!(f, "failed to parse tree {path}: {err}"),
      CliError::Write(dest, err) => write!(f, "failed to write {dest}: {err}"),
    }
  }
}

impl Error for CliError {}

fn run(args: &Cli) -> Result<i32, CliError> {
  let mut modules = Vec::new();
  for spec in &args.modules {
    let (id, path) = spec
      .split_once('=')
      .ok_or_else(|| CliError::InvalidModuleSpec(spec.clone()))?;
    let text =
      fs::read_to_string(path).map_err(|err| CliError::Read(path.to_string(), err))?;
    let top_level: Node<TopLevel> =
      serde_json::from_str(&text).map_err(|err| CliError::Parse(path.to_string(), err))?;
    modules.push(ModuleInput::new(id, top_level));
  }

  let host: HostCapabilities = args.externals.iter().cloned().collect();
  let options = BundleOptions {
    strict: args.strict,
  };
  let output = bundle(&options, &args.entry, modules, &host);

  for diagnostic in &output.diagnostics {
    eprintln!("{diagnostic}");
  }

  match args.output.as_ref() {
    Some(path) => fs::write(path, &output.code)
      .map_err(|err| CliError::Write(path.display().to_string(), err))?,
    None => {
      let mut out = stdout();
      out
        .write_all(output.code.as_bytes())
        .and_then(|()| out.write_all(b"\n"))
        .map_err(|err| CliError::Write("<stdout>".to_string(), err))?;
    }
  }

  let failed = args.strict
    && output
      .diagnostics
      .iter()
      .any(|d| d.severity == Severity::Error);
  Ok(if failed { 1 } else { 0 })
}

fn main() {
  let args = Cli::parse();
  match run(&args) {
    Ok(code) => process::exit(code),
    Err(err) => {
      eprintln!("error: {err}");
      process::exit(1);
    }
  }
}

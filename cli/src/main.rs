use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::{ArgAction, Parser, Subcommand};
use propath::{FlatMap, Node, NormalizeOptions, ParseOptions};
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "propath",
    version,
    about = "Flatten, unflatten and query JSON documents by property path"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Output file path (prints to stdout if omitted).
    #[arg(short, long, value_name = "file", global = true)]
    output: Option<String>,

    /// Indentation size for JSON output; 0 prints compact JSON (default: 2).
    #[arg(long, value_name = "number", default_value_t = 2, global = true)]
    indent: usize,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten a JSON document into a `{"path": leaf}` object.
    Flatten {
        /// Input file path. Omit or use '-' to read from stdin.
        input: Option<String>,
    },
    /// Rebuild a JSON document from a `{"path": leaf}` object.
    Unflatten {
        /// Input file path. Omit or use '-' to read from stdin.
        input: Option<String>,

        /// Keep holes left by sparse array indices (printed as null).
        #[arg(long = "no-compact", action = ArgAction::SetFalse, default_value_t = true)]
        compact: bool,
    },
    /// Print the value at a path.
    Get {
        path: String,

        /// Input file path. Omit or use '-' to read from stdin.
        input: Option<String>,

        /// JSON value to print when the path does not resolve.
        #[arg(long, value_name = "json")]
        fallback: Option<String>,
    },
    /// Write a JSON value at a path and print the resulting document.
    Set {
        path: String,

        /// JSON value to write.
        value: String,

        /// Input file path. Omit or use '-' to read from stdin.
        input: Option<String>,

        /// Start from an empty document instead of reading input.
        #[arg(long)]
        new: bool,
    },
    /// Print the tokens of a path expression as a JSON array.
    Parse {
        path: String,

        /// Accept the empty path and a leading array index.
        #[arg(long)]
        lenient: bool,
    },
    /// Build a path expression from a JSON array of keys and indices.
    Name {
        /// For example '["dates", 0, "type"]'.
        segments: String,
    },
}

#[derive(Debug)]
enum InputSource {
    Stdin,
    File(String),
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("ERROR  {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PROPATH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let output_target = OutputTarget::from_arg(args.output.as_deref());
    tracing::debug!(command = ?args.command, "running");

    match &args.command {
        Command::Flatten { input } => {
            let (text, source) = read_input(input.as_deref())?;
            let doc: Node = serde_json::from_str(&text)?;
            let flat = propath::denormalize_properties(&doc);
            tracing::debug!(entries = flat.len(), "flattened document");
            emit_json(&output_target, &flat, args.indent)?;
            report_status("Flattened", &source, &output_target);
        }
        Command::Unflatten { input, compact } => {
            let (text, source) = read_input(input.as_deref())?;
            let flat: FlatMap = serde_json::from_str(&text)?;
            let options = NormalizeOptions::new().with_compact_arrays(*compact);
            let doc = propath::normalize_properties_with_options(&flat, &options)?;
            emit_json(&output_target, &doc, args.indent)?;
            report_status("Unflattened", &source, &output_target);
        }
        Command::Get {
            path,
            input,
            fallback,
        } => {
            let (text, _) = read_input(input.as_deref())?;
            let doc: Node = serde_json::from_str(&text)?;
            let fallback = fallback
                .as_deref()
                .map(serde_json::from_str::<Node>)
                .transpose()?;
            let found = match (propath::get_property(&doc, path.as_str())?, &fallback) {
                (Some(found), _) => found,
                (None, Some(fallback)) => fallback,
                (None, None) => return Err(format!("no value at '{path}'").into()),
            };
            emit_json(&output_target, found, args.indent)?;
        }
        Command::Set {
            path,
            value,
            input,
            new,
        } => {
            let (doc, source) = if *new {
                (None, None)
            } else {
                let (text, source) = read_input(input.as_deref())?;
                (Some(serde_json::from_str::<Node>(&text)?), Some(source))
            };
            let value: Node = serde_json::from_str(value)
                .map_err(|err| format!("invalid JSON value {value:?}: {err}"))?;
            let doc = propath::set_property(doc, path.as_str(), value)?;
            emit_json(&output_target, &doc, args.indent)?;
            if let Some(source) = source {
                report_status("Updated", &source, &output_target);
            }
        }
        Command::Parse { path, lenient } => {
            let options = ParseOptions::new().with_strict(!lenient);
            let parsed = propath::parse_property_name_with_options(path, &options)?;
            emit_json(&output_target, &parsed, 0)?;
        }
        Command::Name { segments } => {
            let segments: Vec<Value> = serde_json::from_str(segments)?;
            let name = propath::create_property_name_from_values(&segments)?;
            with_output_writer(output_target.path(), |writer| {
                writer.write_all(name.as_bytes())?;
                Ok(())
            })?;
        }
    }
    Ok(())
}

fn read_input(input: Option<&str>) -> Result<(String, InputSource), Box<dyn Error>> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok((buf, InputSource::Stdin))
        }
        Some(path) => {
            let buf = fs::read_to_string(path)?;
            Ok((buf, InputSource::File(path.to_string())))
        }
    }
}

#[derive(Clone, Debug)]
enum OutputTarget {
    Stdout,
    File(String),
}

impl OutputTarget {
    fn from_arg(output: Option<&str>) -> Self {
        match output {
            Some(path) if path != "-" => OutputTarget::File(path.to_string()),
            _ => OutputTarget::Stdout,
        }
    }

    fn path(&self) -> Option<&str> {
        match self {
            OutputTarget::Stdout => None,
            OutputTarget::File(path) => Some(path.as_str()),
        }
    }
}

fn with_output_writer<F>(path: Option<&str>, f: F) -> Result<(), Box<dyn Error>>
where
    F: FnOnce(&mut dyn Write) -> Result<(), Box<dyn Error>>,
{
    match path {
        Some(path) => {
            let mut file = fs::File::create(path)?;
            f(&mut file)
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            f(&mut handle)
        }
    }
}

fn emit_json<T: Serialize + ?Sized>(
    target: &OutputTarget,
    value: &T,
    indent: usize,
) -> Result<(), Box<dyn Error>> {
    with_output_writer(target.path(), |writer| write_json(writer, value, indent))
}

fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
    indent: usize,
) -> Result<(), Box<dyn Error>> {
    if indent == 0 {
        serde_json::to_writer(writer, value)?;
        return Ok(());
    }

    let indent_bytes = vec![b' '; indent];
    let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent_bytes);
    let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}

fn report_status(verb: &str, input_source: &InputSource, output: &OutputTarget) {
    let OutputTarget::File(output_path) = output else {
        return;
    };
    let input_label = match input_source {
        InputSource::Stdin => "stdin".to_string(),
        InputSource::File(path) => display_path(path),
    };
    println!("✔ {verb} {input_label} → {}", display_path(output_path));
}

fn display_path(path: &str) -> String {
    let path = Path::new(path);
    let Ok(cwd) = std::env::current_dir() else {
        return path.to_string_lossy().into_owned();
    };
    match path.strip_prefix(&cwd) {
        Ok(rel) => rel.to_string_lossy().into_owned(),
        Err(_) => path.to_string_lossy().into_owned(),
    }
}

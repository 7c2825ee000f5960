//! Mascot CLI - Command-line interface for the mascot engine
//!
//! Commands:
//! - replay: Replay a recorded interaction session deterministically
//! - validate: Validate a recorded session file
//! - schema: Print schema information

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use mascot_engine::{
    replay, InteractionSession, MascotError, Mood, ENGINE_VERSION, PRODUCER_NAME,
    SESSION_SCHEMA_VERSION,
};

/// Mascot - Deterministic behavioral engine for an interactive mascot
#[derive(Parser)]
#[command(name = "mascot")]
#[command(version = ENGINE_VERSION)]
#[command(about = "Replay and inspect recorded mascot interaction sessions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a recorded session and report the emitted events
    Replay {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,

        /// RNG seed for the replayed engine
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Base mood for ndjson input (which carries no session header)
        #[arg(long, default_value = "pensive")]
        mood: String,

        /// Keep ticking this long past the last input (ms)
        #[arg(long, default_value = "15000")]
        trailing_ms: f64,
    },

    /// Validate a recorded session file
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "json")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print schema information
    Schema {
        /// Schema to print
        #[arg(value_enum)]
        schema_type: SchemaType,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Full session document
    Json,
    /// Newline-delimited events (one per line, no session header)
    Ndjson,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Newline-delimited JSON (one replayed event per line)
    Ndjson,
    /// Full replay report
    Json,
    /// Pretty-printed replay report
    JsonPretty,
}

#[derive(Clone, ValueEnum)]
enum SchemaType {
    /// Input schema (mascot.session.v1)
    Session,
    /// Output schema (replay report)
    Report,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), MascotCliError> {
    match cli.command {
        Commands::Replay {
            input,
            output,
            input_format,
            output_format,
            seed,
            mood,
            trailing_ms,
        } => cmd_replay(
            &input,
            &output,
            input_format,
            output_format,
            seed,
            &mood,
            trailing_ms,
        ),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Schema { schema_type } => {
            cmd_schema(schema_type);
            Ok(())
        }
    }
}

fn read_input(input: &PathBuf) -> Result<String, MascotCliError> {
    if input.to_string_lossy() == "-" {
        if atty::is(atty::Stream::Stdin) {
            eprintln!("Reading session from stdin (end with EOF)...");
        }
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn parse_session(
    raw: &str,
    input_format: InputFormat,
    mood: &str,
) -> Result<InteractionSession, MascotCliError> {
    match input_format {
        InputFormat::Json => Ok(InteractionSession::from_json(raw)?),
        InputFormat::Ndjson => {
            let base_mood = parse_mood(mood)?;
            Ok(InteractionSession::from_ndjson(raw, base_mood)?)
        }
    }
}

fn parse_mood(mood: &str) -> Result<Mood, MascotCliError> {
    serde_json::from_value(serde_json::Value::String(mood.to_string()))
        .map_err(|_| MascotCliError::UnknownMood(mood.to_string()))
}

fn cmd_replay(
    input: &PathBuf,
    output: &PathBuf,
    input_format: InputFormat,
    output_format: OutputFormat,
    seed: u64,
    mood: &str,
    trailing_ms: f64,
) -> Result<(), MascotCliError> {
    let raw = read_input(input)?;
    let session = parse_session(&raw, input_format, mood)?;

    let report = replay(&session, seed, trailing_ms)?;

    let output_data = match output_format {
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for event in &report.events {
                lines.push(serde_json::to_string(event)?);
            }
            lines.join("\n") + "\n"
        }
        OutputFormat::Json => serde_json::to_string(&report)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&report)?,
    };

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    Ok(())
}

fn cmd_validate(
    input: &PathBuf,
    input_format: InputFormat,
    json: bool,
) -> Result<(), MascotCliError> {
    let raw = read_input(input)?;

    let result = parse_session(&raw, input_format, "pensive");

    let report = match &result {
        Ok(session) => ValidationReport {
            valid: true,
            session_id: Some(session.session_id.to_string()),
            events: session.events.len(),
            duration_ms: session.duration_ms(),
            error: None,
        },
        Err(e) => ValidationReport {
            valid: false,
            session_id: None,
            events: 0,
            duration_ms: 0.0,
            error: Some(e.to_string()),
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Valid:       {}", report.valid);
        if let Some(id) = &report.session_id {
            println!("Session:     {}", id);
        }
        println!("Events:      {}", report.events);
        println!("Duration:    {} ms", report.duration_ms);
        if let Some(error) = &report.error {
            println!("Error:       {}", error);
        }
    }

    result.map(|_| ())
}

fn cmd_schema(schema_type: SchemaType) {
    match schema_type {
        SchemaType::Session => {
            println!("Input Schema: {}", SESSION_SCHEMA_VERSION);
            println!();
            println!("A session document contains:");
            println!();
            println!("- schema_version: \"{}\"", SESSION_SCHEMA_VERSION);
            println!("- session_id: UUID");
            println!("- started_at: RFC 3339 timestamp");
            println!("- base_mood: one of the engine's mood names (snake_case)");
            println!("- events: array of timestamped inputs, non-decreasing order");
            println!();
            println!("Event kinds:");
            println!("  pointer_move {{ x, y }} - page-coordinate pointer sample");
            println!("  pointer_enter / pointer_leave - avatar hover boundary");
            println!("  click - click on the avatar");
            println!("  key_down {{ key }} - browser-style key name");
            println!("  scroll {{ progress }} - reading progress in [0, 1]");
            println!("  set_mood {{ mood }} - externally driven base mood change");
        }
        SchemaType::Report => {
            println!("Output Schema: replay report");
            println!();
            println!("- producer: {}", PRODUCER_NAME);
            println!("- engine_version: {}", ENGINE_VERSION);
            println!("- session_id, base_mood, seed");
            println!("- events: array of {{ timestamp, offset_ms, event }}");
            println!("- final_snapshot: the render snapshot after the trailing window");
        }
    }
}

// Error types

#[derive(Debug)]
enum MascotCliError {
    Io(io::Error),
    Engine(MascotError),
    Json(serde_json::Error),
    UnknownMood(String),
}

impl std::fmt::Display for MascotCliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MascotCliError::Io(e) => write!(f, "{}", e),
            MascotCliError::Engine(e) => write!(f, "{}", e),
            MascotCliError::Json(e) => write!(f, "{}", e),
            MascotCliError::UnknownMood(mood) => write!(f, "Unknown mood '{}'", mood),
        }
    }
}

impl From<io::Error> for MascotCliError {
    fn from(e: io::Error) -> Self {
        MascotCliError::Io(e)
    }
}

impl From<MascotError> for MascotCliError {
    fn from(e: MascotError) -> Self {
        MascotCliError::Engine(e)
    }
}

impl From<serde_json::Error> for MascotCliError {
    fn from(e: serde_json::Error) -> Self {
        MascotCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<MascotCliError> for CliError {
    fn from(e: MascotCliError) -> Self {
        match e {
            MascotCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            MascotCliError::Engine(e) => CliError {
                code: "SESSION_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'mascot validate' for details".to_string()),
            },
            MascotCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            MascotCliError::UnknownMood(mood) => CliError {
                code: "UNKNOWN_MOOD".to_string(),
                message: format!("Unknown mood '{}'", mood),
                hint: Some("Run 'mascot schema session' for the mood vocabulary".to_string()),
            },
        }
    }
}

#[derive(serde::Serialize)]
struct ValidationReport {
    valid: bool,
    session_id: Option<String>,
    events: usize,
    duration_ms: f64,
    error: Option<String>,
}

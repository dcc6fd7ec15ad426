//! `enigma`: encipher text on a configured machine.
//!
//! ```text
//! enigma --model enigma-i --rotors "II IV V" --rings "02 21 12" \
//!        --positions BLA --plugs "AV BS CG DL FU HZ IN KM OW RX" EDPUD
//! ```

use std::error::Error;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use enigmacrypt::utils::converter::group;
use enigmacrypt::{Alphabet, EnigmaError, MachineBuilder, MachineSpec, SteppingMode, Variant};

#[derive(Parser, Debug)]
#[command(name = "enigma", version, about = "Enigma rotor cipher machine")]
struct Cli {
    /// Historical machine model (enigma-i, m3, m4, enigma-d).
    #[arg(long, short = 'm', default_value = "enigma-i", conflicts_with = "spec")]
    model: Variant,

    /// JSON machine description to use instead of a historical model.
    #[arg(long, value_name = "FILE")]
    spec: Option<PathBuf>,

    /// Rotor names, leftmost first (e.g. "I II III").
    #[arg(long, short = 'r')]
    rotors: Option<String>,

    /// Ring settings, leftmost first, as letters ("AUL", "A U L") or
    /// 1-based numbers ("01 21 12").
    #[arg(long)]
    rings: Option<String>,

    /// Window letters, leftmost first (e.g. "AAA").
    #[arg(long, short = 'p')]
    positions: Option<String>,

    /// Reflector name.
    #[arg(long)]
    reflector: Option<String>,

    /// Plugboard cables (e.g. "AB CD EF").
    #[arg(long, default_value = "")]
    plugs: String,

    /// Stepping rule: pawl (historical double step) or odometer.
    #[arg(long, default_value = "pawl")]
    stepping: SteppingMode,

    /// Print the output in groups of this many letters (0 disables).
    #[arg(long, default_value_t = 5)]
    group: usize,

    /// Log to stderr (repeat for more).
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,

    /// Text to encipher; read from stdin when omitted.
    text: Vec<String>,
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Parses ring settings given as letters or 1-based numbers.
fn parse_rings(rings: &str, alphabet: &Alphabet) -> Result<Vec<usize>, EnigmaError> {
    let tokens: Vec<&str> = rings.split_whitespace().collect();
    let letters: Vec<String> = match tokens.as_slice() {
        [word] if word.parse::<usize>().is_err() => word.chars().map(String::from).collect(),
        _ => tokens.iter().map(|t| t.to_string()).collect(),
    };
    letters
        .iter()
        .map(|token| {
            if let Ok(number) = token.parse::<usize>() {
                return number.checked_sub(1).ok_or_else(|| {
                    EnigmaError::Configuration("ring settings are numbered from 1".to_string())
                });
            }
            let mut chars = token.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => alphabet.index_of(c),
                _ => Err(EnigmaError::Configuration(format!(
                    "ring setting '{}' is neither a letter nor a number",
                    token
                ))),
            }
        })
        .collect()
}

fn run(cli: &Cli) -> Result<String, Box<dyn Error>> {
    let (spec, default_rotors, default_reflector) = match &cli.spec {
        Some(path) => {
            let spec = MachineSpec::from_json(&fs::read_to_string(path)?)?;
            let rotors: Vec<String> = spec
                .rotor_names()
                .take(spec.rotor_slots)
                .map(String::from)
                .collect();
            let reflector = spec.reflector_names().next().unwrap_or_default().to_string();
            (spec, rotors, reflector)
        }
        None => (
            cli.model.spec(),
            cli.model.default_rotors().iter().map(|r| r.to_string()).collect(),
            cli.model.default_reflector().to_string(),
        ),
    };
    let alphabet = spec.alphabet()?;

    let rotors: Vec<String> = match &cli.rotors {
        Some(names) => names.split_whitespace().map(String::from).collect(),
        None => default_rotors,
    };
    let reflector = cli.reflector.clone().unwrap_or(default_reflector);

    let mut builder = MachineBuilder::new(spec)
        .rotors(&rotors)
        .reflector(&reflector)
        .plugs(&cli.plugs)
        .stepping(cli.stepping);
    if let Some(rings) = &cli.rings {
        builder = builder.ring_settings(&parse_rings(rings, &alphabet)?);
    }
    if let Some(positions) = &cli.positions {
        let positions: String = positions.split_whitespace().collect();
        builder = builder.ground_positions(&positions);
    }
    let mut machine = builder.build()?;

    let text = if cli.text.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        input
    } else {
        cli.text.join(" ")
    };
    let output = machine.encode_text(&text)?;
    debug!(window = %machine.window(), letters = output.chars().count(), "message done");
    Ok(group(&output, cli.group))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("enigma: {}", err);
            ExitCode::FAILURE
        }
    }
}

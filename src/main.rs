//! Dicepass CLI
//!
//! Command-line front end for generating passphrases and passwords from
//! system randomness or physical dice.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use dicepass::{
    analysis::{sample_counts, AnalysisError, UniformityCheck, MAX_SAMPLE_UPPER},
    config::{ConfigError, Settings},
    secret::{PassphraseGenerator, PasswordGenerator, SecretResult},
    source::{registry, SourceError, SourceOptions, SystemSource},
    symbols::{Alphabet, WordFilter, Wordlist, PRESETS, SHORTCUTS},
};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "dicepass", version, about = "Unbiased passphrases and passwords")]
struct Cli {
    /// Settings file (TOML); command-line options override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Source of randomness ('system' or 'dice').
    #[arg(short = 'r', long)]
    randomness_source: Option<String>,

    /// Number of sides of the dice.
    #[arg(short = 's', long)]
    dice_sides: Option<u32>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a passphrase.
    Pp {
        /// Number of words to generate.
        #[arg(short, long)]
        length: usize,

        /// A file with a newline-separated list of words.
        #[arg(short, long)]
        wordlist_file: PathBuf,

        /// Separator between the words (empty or one character).
        #[arg(short, long)]
        delimiter: Option<String>,

        /// Drop words shorter than this.
        #[arg(long, visible_alias = "minw")]
        min_word_size: Option<usize>,

        /// Drop words longer than this.
        #[arg(long, visible_alias = "maxw")]
        max_word_size: Option<usize>,

        /// Normalize entries like `123 foo` to `foo`.
        #[arg(long, visible_alias = "rld")]
        remove_leading_digits: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Create a password.
    Pw {
        /// Number of characters to generate.
        #[arg(short, long)]
        length: usize,

        /// Characters for the password.
        #[arg(short = 'i', long)]
        alpha_include: Option<String>,

        /// Comma-separated alphabet preset names.
        #[arg(short = 'p', long, value_delimiter = ',')]
        alpha_preset: Vec<String>,

        /// Characters to exclude from the alphabet.
        #[arg(short = 'e', long)]
        alpha_exclude: Option<String>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show available alphabet presets.
    Presets,

    /// Check the system source for obvious bias.
    Check {
        /// Size of the drawn range.
        #[arg(long, default_value_t = 10)]
        upper: u64,

        /// Number of draws.
        #[arg(long, default_value_t = 100_000)]
        samples: u64,
    },
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error("check range must be between 2 and {max}, got {0}", max = MAX_SAMPLE_UPPER)]
    CheckRange(u64),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            eprintln!("Try again!");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .init();
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    info!("Dicepass v{}", dicepass::VERSION);

    match cli.command {
        Command::Pp {
            length,
            wordlist_file,
            delimiter,
            min_word_size,
            max_word_size,
            remove_leading_digits,
            source,
        } => {
            apply_source_args(&mut settings, source);
            let passphrase = &mut settings.passphrase;
            if let Some(delimiter) = delimiter {
                passphrase.delimiter = delimiter;
            }
            if let Some(min) = min_word_size {
                passphrase.min_word_size = min;
            }
            if max_word_size.is_some() {
                passphrase.max_word_size = max_word_size;
            }
            passphrase.remove_leading_digits |= remove_leading_digits;
            settings.validate()?;

            let wordlist =
                Wordlist::from_file(&wordlist_file, &WordFilter::from(&settings.passphrase))?;
            info!(words = wordlist.len(), "Wordlist loaded");

            let rng = registry::build_source(
                &settings.source.name,
                &SourceOptions::from(&settings.source),
            )?;
            let mut generator =
                PassphraseGenerator::new(wordlist, rng, &settings.passphrase.delimiter)?;
            let result = generator.generate(length)?;

            print_result("Passphrase", &result);
            if !result.entropy_is_guaranteed() {
                eprintln!(
                    "WARNING: Entropy might be slightly lower than estimated \
                     (the delimiter does not reliably separate words)."
                );
            }
        }
        Command::Pw {
            length,
            alpha_include,
            alpha_preset,
            alpha_exclude,
            source,
        } => {
            apply_source_args(&mut settings, source);
            let password = &mut settings.password;
            if let Some(include) = alpha_include {
                password.include = include;
            }
            if !alpha_preset.is_empty() {
                password.presets = alpha_preset;
            }
            if let Some(exclude) = alpha_exclude {
                password.exclude = exclude;
            }
            settings.validate()?;

            let alphabet = Alphabet::build(
                &settings.password.include,
                &settings.password.presets,
                &settings.password.exclude,
            )?;
            info!(size = alphabet.len(), "Alphabet ready");

            let rng = registry::build_source(
                &settings.source.name,
                &SourceOptions::from(&settings.source),
            )?;
            let mut generator = PasswordGenerator::new(alphabet, rng);
            let result = generator.generate(length)?;

            print_result("Password", &result);
        }
        Command::Presets => print_presets(),
        Command::Check { upper, samples } => {
            if !(2..=MAX_SAMPLE_UPPER).contains(&upper) {
                return Err(AppError::CheckRange(upper));
            }

            let mut source = SystemSource::new();
            let counts = sample_counts(&mut source, upper, samples)?;
            let check = UniformityCheck::from_counts(&counts);

            println!("Samples: {}", check.sample_size);
            println!(
                "Chi-squared: {:.2} (critical {:.2}, {} degrees of freedom)",
                check.statistic, check.critical_value, check.degrees_of_freedom
            );
            if check.looks_uniform() {
                println!("Result: no bias detected");
            } else {
                println!("Result: counts deviate from uniform");
            }
        }
    }

    Ok(())
}

fn apply_source_args(settings: &mut Settings, args: SourceArgs) {
    if let Some(name) = args.randomness_source {
        settings.source.name = name;
    }
    if let Some(sides) = args.dice_sides {
        settings.source.dice_sides = sides;
    }
}

fn print_result(label: &str, result: &SecretResult) {
    println!("{label}: {}", result.text());
    println!("Entropy: {:.2} bits", result.entropy_bits());
}

fn print_presets() {
    println!("The following values can be used with -p, --alpha-preset:");
    for (name, chars) in PRESETS {
        println!("{name:9}: {chars}");
    }

    println!("\nIn addition the following shortcuts can be used:");
    for (name, parts) in SHORTCUTS {
        println!("{name:9}: {}", parts.join(","));
    }

    println!("\nExample: -p letters,digits");
}

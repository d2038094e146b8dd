use clap::{Parser, Subcommand};
use phonogram::{Grammar, Settings, PLAINS_CREE};
use std::path::PathBuf;

/// Pseudo-word generator driven by a phonotactic grammar
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the grammar file
    #[arg(short, long, help = "Grammar file (defaults to the bundled Plains Cree grammar)")]
    grammar: Option<PathBuf>,

    /// Path to a JSON settings file
    #[arg(short, long, help = "JSON settings file")]
    config: Option<PathBuf>,

    /// Subcommands
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a sentence of pseudo-words
    Lorem,
    /// Print single pseudo-words
    Word {
        /// Number of words to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },
    /// Print the regular expression equivalent to the grammar's start rule
    Regex {
        /// Anchor the pattern at both ends
        #[arg(long)]
        anchored: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };

    let mut grammar = match &cli.grammar {
        Some(path) => {
            log::info!("loading grammar from {}", path.display());
            Grammar::from_file(path)?
        }
        None => PLAINS_CREE.parse::<Grammar>()?,
    };
    grammar.set_config(settings.grammar.clone());
    log::info!(
        "loaded {} rules, start rule {}",
        grammar.rules().len(),
        grammar.start_symbol().unwrap_or("<none>")
    );

    match cli.command.unwrap_or(Commands::Lorem) {
        Commands::Lorem => {
            println!("{}", phonogram::lorem(&grammar, &settings.utterance, &settings.lorem)?);
        }
        Commands::Word { count } => {
            let mut rng = rand::thread_rng();
            for _ in 0..count {
                println!("{}", phonogram::assemble_with(&grammar, &settings.utterance, &mut rng)?);
            }
        }
        Commands::Regex { anchored } => {
            let pattern = grammar.to_pattern()?;
            if anchored {
                println!("^(?:{})$", pattern);
            } else {
                println!("{}", pattern);
            }
        }
    }

    Ok(())
}

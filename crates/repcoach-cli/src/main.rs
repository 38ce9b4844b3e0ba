use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use repcoach_application::SessionUseCase;
use repcoach_core::analysis::ConversationAnalyzer;
use repcoach_core::persona::PersonaCatalog;
use repcoach_core::transcript::parse_transcript;
use repcoach_infrastructure::{MockAgentClient, MockSynthesizer, MockTranscriber};

#[derive(Parser)]
#[command(name = "repcoach")]
#[command(about = "RepCoach - heuristic conversation coaching for sales reps", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a "role: text" transcript file and print the coaching report
    Analyze {
        /// Path to the transcript file
        file: PathBuf,
        /// Seed for the rewrite phrasing RNG
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run a scripted practice session against the mock agent stack
    Simulate {
        /// Persona key (see `repcoach personas`)
        #[arg(long, default_value = "feature_engineer")]
        persona: String,
        /// Rep lines to send, in order
        #[arg(long = "say", default_values_t = default_script())]
        script: Vec<String>,
        /// Seed for the mock agent RNG
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List the available personas
    Personas {
        /// Optional TOML catalog file (defaults to the built-in presets)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

fn default_script() -> Vec<String> {
    vec![
        "Hi! Can I tell you about our new model?".to_string(),
        "It has a 120 km range and the battery charges in an hour.".to_string(),
        "Would you like to book a test drive?".to_string(),
    ]
}

fn load_catalog(path: Option<&PathBuf>) -> Result<PersonaCatalog> {
    match path {
        Some(path) => PersonaCatalog::from_toml_file(path)
            .with_context(|| format!("failed to load catalog from {}", path.display())),
        None => Ok(PersonaCatalog::from_presets()),
    }
}

async fn analyze(file: &PathBuf, seed: Option<u64>) -> Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let turns = parse_transcript(&raw);
    let mut analyzer = match seed {
        Some(seed) => ConversationAnalyzer::with_seed(seed),
        None => ConversationAnalyzer::new(),
    };
    let report = analyzer.analyze(&turns);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn simulate(persona: &str, script: &[String], seed: Option<u64>) -> Result<()> {
    let agent = match seed {
        Some(seed) => MockAgentClient::with_seed(seed),
        None => MockAgentClient::new(),
    };
    let usecase = SessionUseCase::new(
        PersonaCatalog::from_presets(),
        Arc::new(agent),
        Arc::new(MockTranscriber),
        Arc::new(MockSynthesizer),
    );

    let (session_id, _) = usecase.create_session(persona).await?;
    for line in script {
        let outcome = usecase.send_message(&session_id, line).await?;
        println!("rep: {line}");
        if outcome.reply.is_empty() {
            println!("customer: (no reply)");
        } else {
            println!("customer: {}", outcome.reply);
        }
    }

    let report = usecase.end_session(&session_id).await?;
    println!("\n{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze { file, seed } => analyze(&file, seed).await?,
        Commands::Simulate {
            persona,
            script,
            seed,
        } => simulate(&persona, &script, seed).await?,
        Commands::Personas { catalog } => {
            for persona in load_catalog(catalog.as_ref())?.all() {
                println!("{}\t{}", persona.key, persona.name);
            }
        }
    }

    Ok(())
}

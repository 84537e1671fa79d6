use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use artm_constructor::config::{parse_list, Config};
use artm_constructor::constructor::{init_simple_default_model, DefaultModelRequest};
use artm_constructor::dictionary::{DictionaryDataset, TextDictionary};
use artm_constructor::error::require_main_modality;
use artm_constructor::logging;
use artm_constructor::model::{RecordingBackend, TopicModel};
use artm_constructor::model_id::pad_model_name;
use artm_constructor::output::terminal;
use artm_constructor::topics::{TopicGroups, TopicSpec};
use artm_constructor::vocab;

/// Configure additive regularized topic models.
///
/// Resolves topic names, weighs modalities against a dictionary, and lays
/// out the regularizers and scores a model starts with.
#[derive(Parser)]
#[command(name = "artm-constructor", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the default model for a dictionary and show its configuration
    Plan {
        #[command(flatten)]
        model: ModelArgs,

        /// Fixed seed for reproducible initialization
        #[arg(long)]
        seed: Option<u64>,

        /// Model id (padded to 26 characters; defaults to a timestamp)
        #[arg(long)]
        model_id: Option<String>,

        /// Model id already in use; a clashing id gets a version suffix (repeatable)
        #[arg(long = "taken")]
        taken: Vec<String>,

        /// Print the plan as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show per-modality token counts and absolute weights
    Weights {
        #[command(flatten)]
        model: ModelArgs,
    },

    /// Show the topic names a specification resolves to
    Topics {
        /// Specific topics: a count or comma-separated names
        #[arg(long)]
        specific: Option<String>,

        /// Background topics: a count or comma-separated names
        #[arg(long)]
        background: Option<String>,
    },
}

/// Flags shared by commands that read a dictionary. Unset flags fall back
/// to the environment configuration.
#[derive(Args)]
struct ModelArgs {
    /// Text dump of the dictionary
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Main modality (e.g. @lemmatized)
    #[arg(long)]
    main_modality: Option<String>,

    /// Comma-separated modalities to use
    #[arg(long)]
    modalities: Option<String>,

    /// Specific topics: a count or comma-separated names
    #[arg(long)]
    specific: Option<String>,

    /// Background topics: a count or comma-separated names
    #[arg(long)]
    background: Option<String>,
}

impl ModelArgs {
    /// Overlay flags on top of the loaded config.
    fn apply(self, mut config: Config) -> Result<Config> {
        if let Some(path) = self.dictionary {
            config.dictionary_path = Some(path);
        }
        if let Some(main) = self.main_modality {
            config.main_modality = main;
        }
        if let Some(modalities) = self.modalities {
            config.modalities = parse_list(&modalities);
        }
        if let Some(specific) = self.specific {
            config.specific_topics = specific.parse::<TopicSpec>()?;
        }
        if let Some(background) = self.background {
            config.background_topics = background.parse::<TopicSpec>()?;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    logging::init_tracing(logging::DEFAULT_FILTER);

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Plan {
            model,
            seed,
            model_id,
            taken,
            json,
        } => {
            let config = model.apply(config)?;
            let path = config.require_dictionary()?;

            let mut backend = RecordingBackend::new();
            logging::suppress_library_logging(&mut backend, config.library_log_level)?;

            let dataset = DictionaryDataset::new(TextDictionary::load(&path)?);
            let request = DefaultModelRequest {
                modalities_to_use: config.modalities.clone(),
                main_modality: config.main_modality.clone(),
                specific_topics: config.specific_topics.clone(),
                background_topics: config.background_topics.clone(),
                seed: seed.or(config.seed),
                model_id,
                existing_model_ids: taken.iter().map(|id| pad_model_name(id)).collect(),
            };

            let (model, plan) = init_simple_default_model(&backend, &dataset, &request)?;
            info!(
                scores = model.score_names().len(),
                regularizers = model.regularizer_names().len(),
                "Default model ready"
            );

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                terminal::display_plan(&plan);
                if let Some((tokens, topics)) = model.phi_shape() {
                    println!(
                        "{}",
                        format!("Phi matrix: {tokens} tokens x {topics} topics").dimmed()
                    );
                }
            }
        }

        Commands::Weights { model } => {
            let config = model.apply(config)?;
            let path = config.require_dictionary()?;
            require_main_modality(&config.main_modality, &config.modalities)?;

            let dictionary = TextDictionary::load(&path)?;
            let vocab_sizes = vocab::count_vocab_size(&dictionary, &config.modalities);
            let relative = vocab::baseline_weights(&config.modalities);
            let weights =
                vocab::modality_weight_rel2abs(&vocab_sizes, &relative, &config.main_modality)?;

            println!(
                "\n{}",
                format!("=== Modality weights ({}) ===", dictionary.name).bold()
            );
            println!();
            terminal::display_weights(&vocab_sizes, &weights, &config.main_modality);
            println!();
        }

        Commands::Topics {
            specific,
            background,
        } => {
            let specific = match specific {
                Some(raw) => raw.parse::<TopicSpec>()?,
                None => config.specific_topics,
            };
            let background = match background {
                Some(raw) => raw.parse::<TopicSpec>()?,
                None => config.background_topics,
            };

            let topics = TopicGroups::resolve(&specific, &background)?;
            println!();
            terminal::display_topics(&topics);
            println!();
        }
    }

    Ok(())
}

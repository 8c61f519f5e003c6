mod display;
mod interactive;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;

use leloto_core::config::{load_config, save_config, GeneratorConfig};
use leloto_core::dataset::Dataset;
use leloto_core::report::{grid_reports, summarize, summarize_batch};
use leloto_core::sampler::{generate, GenerationMode};
use leloto_core::scores::NumberScores;

use crate::display::{
    display_batch_summary, display_draws, display_grids, display_import_summary, display_scores,
    display_summary,
};

const DEFAULT_FILE: &str = "data/loto.csv";

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum PredictionMode {
    #[default]
    Standard,
    #[value(name = "consecutifs", alias = "consecutive")]
    Consecutive,
}

impl From<PredictionMode> for GenerationMode {
    fn from(mode: PredictionMode) -> Self {
        match mode {
            PredictionMode::Standard => GenerationMode::Standard,
            PredictionMode::Consecutive => GenerationMode::Consecutive,
        }
    }
}

#[derive(Parser)]
#[command(name = "leloto", about = "Analyse des tirages du Loto et grilles inédites")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Default)]
struct GeneratorArgs {
    /// Fichier de configuration JSON (voir `leloto config`)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fenêtre de calcul des scores (nombre de tirages récents)
    #[arg(short, long)]
    window: Option<usize>,

    /// Nombre de grilles à générer
    #[arg(short, long)]
    count: Option<usize>,

    /// Nombre maximal de tentatives de génération
    #[arg(long)]
    max_attempts: Option<usize>,
}

impl GeneratorArgs {
    fn resolve(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => GeneratorConfig::default(),
        };
        if let Some(window) = self.window {
            config.window = window;
        }
        if let Some(count) = self.count {
            config.target_count = count;
        }
        if let Some(max_attempts) = self.max_attempts {
            config.max_attempts = max_attempts;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Command {
    /// Statistiques de l'historique : consécutifs, zones et scores
    Stats {
        /// Chemin vers le fichier CSV
        #[arg(short, long, default_value = DEFAULT_FILE)]
        file: PathBuf,

        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// Lister les derniers tirages
    List {
        /// Chemin vers le fichier CSV
        #[arg(short, long, default_value = DEFAULT_FILE)]
        file: PathBuf,

        /// Nombre de tirages à afficher
        #[arg(short, long, default_value = "10")]
        last: usize,
    },

    /// Générer des grilles jamais sorties
    Predict {
        /// Chemin vers le fichier CSV
        #[arg(short, long, default_value = DEFAULT_FILE)]
        file: PathBuf,

        /// Mode de génération
        #[arg(short, long, default_value = "standard")]
        mode: PredictionMode,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        generator: GeneratorArgs,
    },

    /// Afficher ou enregistrer la configuration par défaut
    Config {
        /// Fichier de sortie (sinon affichage)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Mode interactif
    Interactive {
        /// Fichier CSV à charger au démarrage
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Seed pour la reproductibilité
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        generator: GeneratorArgs,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Stats { file, generator } => cmd_stats(&file, &generator.resolve()?),
        Command::List { file, last } => cmd_list(&file, last),
        Command::Predict {
            file,
            mode,
            seed,
            generator,
        } => cmd_predict(&file, mode, &generator.resolve()?, seed),
        Command::Config { output } => cmd_config(output.as_deref()),
        Command::Interactive {
            file,
            seed,
            generator,
        } => interactive::run_interactive(file.as_deref(), generator.resolve()?, make_rng(seed)),
    }
}

pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

pub(crate) fn load_dataset(file: &Path, window: usize) -> Result<Dataset> {
    let (dataset, rejected) = Dataset::load(file, window)?;
    display_import_summary(file, dataset.len(), &rejected);
    Ok(dataset)
}

pub(crate) fn show_stats(dataset: &Dataset, config: &GeneratorConfig) {
    display_summary(&summarize(dataset));
    let window = dataset.last(config.window);
    display_scores(&NumberScores::compute(window), window.len(), config);
}

pub(crate) fn show_predictions(
    dataset: &Dataset,
    mode: GenerationMode,
    config: &GeneratorConfig,
    rng: &mut StdRng,
) -> Result<()> {
    let outcome = generate(dataset, mode, config, rng)?;
    let reports = grid_reports(&outcome);
    display_grids(&mode.to_string(), &reports);
    let window_len = dataset.last(config.window).len();
    display_batch_summary(&summarize_batch(&reports, &outcome, window_len));
    Ok(())
}

fn cmd_stats(file: &Path, config: &GeneratorConfig) -> Result<()> {
    let dataset = load_dataset(file, config.window)?;
    if dataset.is_empty() {
        println!("Aucun tirage valide dans {}", file.display());
        return Ok(());
    }
    show_stats(&dataset, config);
    Ok(())
}

fn load_for_listing(file: &Path) -> Result<Dataset> {
    load_dataset(file, GeneratorConfig::default().window)
}

fn cmd_list(file: &Path, last: usize) -> Result<()> {
    let dataset = load_for_listing(file)?;
    display_draws(dataset.last(last));
    Ok(())
}

fn cmd_predict(file: &Path, mode: PredictionMode, config: &GeneratorConfig, seed: Option<u64>) -> Result<()> {
    let dataset = load_dataset(file, config.window)?;
    if dataset.is_empty() {
        println!("Aucun tirage valide dans {}", file.display());
        return Ok(());
    }
    let mut rng = make_rng(seed);
    show_predictions(&dataset, mode.into(), config, &mut rng)
}

fn cmd_config(output: Option<&Path>) -> Result<()> {
    let config = GeneratorConfig::default();
    match output {
        Some(path) => {
            save_config(&config, path)?;
            println!("Configuration enregistrée dans {}", path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(&config)?),
    }
    Ok(())
}

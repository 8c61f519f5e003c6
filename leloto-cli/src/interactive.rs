use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rand::rngs::StdRng;

use leloto_core::config::GeneratorConfig;
use leloto_core::dataset::Dataset;
use leloto_core::sampler::GenerationMode;

use crate::display::display_draws;

#[derive(Debug, PartialEq)]
enum InteractiveCommand {
    Load(Option<PathBuf>),
    Standard,
    Consecutive,
    Stats,
    History,
    Quit,
}

fn parse_command(input: &str) -> Option<InteractiveCommand> {
    let mut parts = input.trim().splitn(2, char::is_whitespace);
    let name = parts.next()?.to_lowercase();
    let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match name.as_str() {
        "1" | "charger" | "load" => Some(InteractiveCommand::Load(arg.map(PathBuf::from))),
        "2" | "standard" | "std" => Some(InteractiveCommand::Standard),
        "3" | "consecutifs" | "consécutifs" | "consecutive" | "consec" => {
            Some(InteractiveCommand::Consecutive)
        }
        "4" | "stats" | "statistiques" => Some(InteractiveCommand::Stats),
        "5" | "historique" | "history" | "hist" => Some(InteractiveCommand::History),
        "6" | "quitter" | "quit" | "q" | "exit" => Some(InteractiveCommand::Quit),
        _ => None,
    }
}

fn display_menu() {
    println!();
    println!("── Mode interactif ──");
    println!("  1. charger      Charger un fichier CSV");
    println!("  2. standard     Prédictions standard");
    println!("  3. consecutifs  Prédictions mode consécutifs");
    println!("  4. stats        Statistiques de l'historique");
    println!("  5. historique   Derniers tirages");
    println!("  6. quitter      Quitter");
    println!();
}

fn prompt(msg: &str) -> Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut input = String::new();
    let read = io::stdin()
        .read_line(&mut input)
        .context("Erreur de lecture")?;
    if read == 0 {
        bail!("Fin de l'entrée");
    }
    Ok(input.trim().to_string())
}

struct Session {
    dataset: Option<Dataset>,
    config: GeneratorConfig,
    rng: StdRng,
}

impl Session {
    /// Remplace l'historique courant ; en cas d'erreur l'ancien est conservé.
    fn load(&mut self, path: &Path) -> Result<()> {
        let dataset = super::load_dataset(path, self.config.window)?;
        self.dataset = Some(dataset);
        Ok(())
    }

    fn loaded(&self) -> Option<&Dataset> {
        match &self.dataset {
            Some(dataset) if !dataset.is_empty() => Some(dataset),
            _ => {
                notice_not_loaded();
                None
            }
        }
    }

    fn predict(&mut self, mode: GenerationMode) -> Result<()> {
        let Session { dataset, config, rng } = self;
        match dataset {
            Some(dataset) if !dataset.is_empty() => super::show_predictions(dataset, mode, config, rng),
            _ => {
                notice_not_loaded();
                Ok(())
            }
        }
    }
}

fn notice_not_loaded() {
    println!("Veuillez d'abord charger un fichier CSV (commande : charger <chemin>).");
}

fn cmd_load_interactive(session: &mut Session, arg: Option<PathBuf>) -> Result<()> {
    let path = match arg {
        Some(path) => path,
        None => PathBuf::from(prompt("Chemin du fichier CSV : ")?),
    };
    if path.as_os_str().is_empty() {
        println!("Veuillez sélectionner un fichier CSV.");
        return Ok(());
    }
    session.load(&path)
}

fn cmd_history_interactive(session: &Session) -> Result<()> {
    let Some(dataset) = session.loaded() else {
        return Ok(());
    };
    let input = prompt("Nombre de tirages [10] : ")?;
    let n: usize = if input.is_empty() {
        10
    } else {
        input.parse().context("Nombre invalide")?
    };
    display_draws(dataset.last(n));
    Ok(())
}

pub fn run_interactive(file: Option<&Path>, config: GeneratorConfig, rng: StdRng) -> Result<()> {
    println!("Bienvenue dans le mode interactif de leloto !");

    let mut session = Session {
        dataset: None,
        config,
        rng,
    };
    if let Some(path) = file {
        if let Err(e) = session.load(path) {
            println!("Erreur: {e:#}");
        }
    }

    loop {
        display_menu();
        let input = match prompt("> ") {
            Ok(s) => s,
            Err(_) => break, // EOF / Ctrl+D
        };

        if input.is_empty() {
            continue;
        }

        let result = match parse_command(&input) {
            Some(InteractiveCommand::Quit) => {
                println!("Au revoir !");
                break;
            }
            Some(InteractiveCommand::Load(arg)) => cmd_load_interactive(&mut session, arg),
            Some(InteractiveCommand::Standard) => session.predict(GenerationMode::Standard),
            Some(InteractiveCommand::Consecutive) => session.predict(GenerationMode::Consecutive),
            Some(InteractiveCommand::Stats) => {
                if let Some(dataset) = session.loaded() {
                    super::show_stats(dataset, &session.config);
                }
                Ok(())
            }
            Some(InteractiveCommand::History) => cmd_history_interactive(&session),
            None => {
                println!("Commande inconnue : '{}'. Tapez un numéro (1-6) ou un nom de commande.", input);
                Ok(())
            }
        };

        if let Err(e) = result {
            println!("Erreur: {e:#}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(text: &str) -> Session {
        let (dataset, _) = Dataset::parse(text, 50);
        Session {
            dataset: Some(dataset),
            config: GeneratorConfig::default(),
            rng: crate::make_rng(Some(1)),
        }
    }

    #[test]
    fn test_parse_command_by_number() {
        assert_eq!(parse_command("1"), Some(InteractiveCommand::Load(None)));
        assert_eq!(parse_command("2"), Some(InteractiveCommand::Standard));
        assert_eq!(parse_command("3"), Some(InteractiveCommand::Consecutive));
        assert_eq!(parse_command("4"), Some(InteractiveCommand::Stats));
        assert_eq!(parse_command("5"), Some(InteractiveCommand::History));
        assert_eq!(parse_command("6"), Some(InteractiveCommand::Quit));
    }

    #[test]
    fn test_parse_command_load_with_path() {
        assert_eq!(
            parse_command("charger  data/loto.csv "),
            Some(InteractiveCommand::Load(Some(PathBuf::from("data/loto.csv"))))
        );
        assert_eq!(parse_command("load"), Some(InteractiveCommand::Load(None)));
    }

    #[test]
    fn test_parse_command_by_alias() {
        assert_eq!(parse_command("std"), Some(InteractiveCommand::Standard));
        assert_eq!(parse_command("consécutifs"), Some(InteractiveCommand::Consecutive));
        assert_eq!(parse_command("consec"), Some(InteractiveCommand::Consecutive));
        assert_eq!(parse_command("hist"), Some(InteractiveCommand::History));
        assert_eq!(parse_command("q"), Some(InteractiveCommand::Quit));
        assert_eq!(parse_command("exit"), Some(InteractiveCommand::Quit));
    }

    #[test]
    fn test_parse_command_case_insensitive() {
        assert_eq!(parse_command("QUITTER"), Some(InteractiveCommand::Quit));
        assert_eq!(parse_command("Standard"), Some(InteractiveCommand::Standard));
        assert_eq!(parse_command("STATS"), Some(InteractiveCommand::Stats));
    }

    #[test]
    fn test_parse_command_unknown() {
        assert_eq!(parse_command("foo"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("7"), None);
    }

    #[test]
    fn test_predict_without_dataset_is_notice() {
        let mut session = Session {
            dataset: None,
            config: GeneratorConfig::default(),
            rng: crate::make_rng(Some(1)),
        };
        assert!(session.predict(GenerationMode::Standard).is_ok());
        assert!(session.dataset.is_none());
    }

    #[test]
    fn test_failed_load_keeps_previous_dataset() {
        let mut session = session_with("h\n2020-01-01,1,2,3,4,5,1\n");
        assert!(session.load(Path::new("/nonexistent/leloto.csv")).is_err());
        assert_eq!(session.dataset.as_ref().map(|d| d.len()), Some(1));
    }

    #[test]
    fn test_predict_with_dataset() {
        let mut session = session_with("h\n2020-01-01,1,2,3,4,5,1\n2020-01-02,10,20,30,40,49,2\n");
        assert!(session.predict(GenerationMode::Consecutive).is_ok());
    }
}

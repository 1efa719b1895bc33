use triplex::core::config::{init_workspace, Credentials, TriplexConfig, CONFIG_FILE, TRIPLEX_DIR};
use triplex::core::openai::OpenAiCompletions;
use triplex::core::provider::CompletionProvider;
use triplex::io::console::{Console, ConsoleEvent};
use triplex::knowledge::{parse_triples, TripleExtractor};

use anyhow::{Context, Result};
use colored::*;
use std::env;
use std::path::Path;

pub const DEFAULT_TEXT: &str = "The city of Paris is the capital and most populous city of France. The Eiffel Tower is a famous landmark in Paris.";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Init,
    Extract {
        text: String,
        triples: bool,
        dry_run: bool,
    },
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Command {
    let mut triples = false;
    let mut dry_run = false;
    let mut words = Vec::new();
    for (i, arg) in args.into_iter().enumerate() {
        match arg.as_str() {
            "init" if i == 0 => return Command::Init,
            "--triples" => triples = true,
            "--dry-run" => dry_run = true,
            _ => words.push(arg),
        }
    }
    let text = if words.is_empty() {
        DEFAULT_TEXT.to_string()
    } else {
        words.join(" ")
    };
    Command::Extract { text, triples, dry_run }
}

#[tokio::main]
async fn main() -> Result<()> {
    let console = Console::from_env();
    let command = parse_args(env::args().skip(1));

    if command == Command::Init {
        if init_workspace(Path::new("."))? {
            eprintln!("{}", "🧬 triplex workspace initialised.".green().bold());
        } else {
            eprintln!("{}", "✅ triplex is already set up in this workspace.".green());
        }
        return Ok(());
    }

    if dotenvy::from_filename(".env").is_err() {
        console.say(ConsoleEvent::Warning("no .env file, using process environment".to_string()));
    }

    let config_path = Path::new(TRIPLEX_DIR).join(CONFIG_FILE);
    let config = TriplexConfig::load(&config_path)?.with_env_overrides();
    if config_path.exists() {
        console.say(ConsoleEvent::Config(config_path.display().to_string()));
    }

    let credentials = Credentials::from_env(&config.api_key_env);
    let provider = OpenAiCompletions::new(&config.api_base, credentials);
    let extractor = TripleExtractor::new(provider, &config).context("Failed to build extraction prompt")?;

    let Command::Extract { text, triples, dry_run } = command else {
        return Ok(());
    };

    if dry_run {
        println!("{}", extractor.render(&text));
        return Ok(());
    }

    console.say(ConsoleEvent::Request {
        provider: extractor.provider().name().to_string(),
        model: config.model.clone(),
    });
    let response = extractor.extract(&text).await?;
    console.say(ConsoleEvent::Done);

    if triples {
        for triple in parse_triples(&response) {
            println!("{}", triple);
        }
    } else {
        println!("{}", response);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_args_uses_default_text() {
        assert_eq!(
            parse_args(args(&[])),
            Command::Extract {
                text: DEFAULT_TEXT.to_string(),
                triples: false,
                dry_run: false
            }
        );
    }

    #[test]
    fn test_words_and_flags() {
        assert_eq!(
            parse_args(args(&["--triples", "Rust", "is", "fast.", "--dry-run"])),
            Command::Extract {
                text: "Rust is fast.".to_string(),
                triples: true,
                dry_run: true
            }
        );
    }

    #[test]
    fn test_init_only_as_first_word() {
        assert_eq!(parse_args(args(&["init"])), Command::Init);
        assert_eq!(
            parse_args(args(&["we", "init"])),
            Command::Extract {
                text: "we init".to_string(),
                triples: false,
                dry_run: false
            }
        );
    }
}

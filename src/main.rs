use std::io::{self, BufRead, Write};

use dotenv::dotenv;
use log::{debug, info};
use quiz_attempt::{
    config::Config,
    quiz::{
        command::{Command, HELP_TEXT},
        manager::QuizManager,
        state::QuizState,
    },
    render::TerminalRenderer,
    storage::{KeyValueStore, MemoryStore, SqliteStore, StorageService},
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

fn main() -> HandlerResult {
    // A missing .env file is fine, everything has a default
    dotenv().ok();
    pretty_env_logger::init();
    info!("Starting quiz...");

    let config = Config::from_env();
    debug!("{:?}", config);

    if config.ephemeral {
        info!("Answers are kept in memory only");
        run(&config, MemoryStore::new())?;
    } else {
        run(&config, SqliteStore::open(&config.database)?)?;
    }

    info!("Bye!");
    Ok(())
}

fn run<S: KeyValueStore>(config: &Config, store: S) -> HandlerResult {
    let questions = config.questions()?;
    let state = QuizState::with_keys(
        StorageService::new(store),
        &config.attempt_key,
        &config.finished_key,
    );
    let mut manager = QuizManager::new(questions, state, TerminalRenderer::new(io::stdout()));

    println!("{}", HELP_TEXT);
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };
        if !handle_command(&mut manager, command) {
            break;
        }
        io::stdout().flush()?;
    }
    Ok(())
}

/// Returns false when the user asked to leave.
fn handle_command<S: KeyValueStore, W: Write>(
    manager: &mut QuizManager<S, TerminalRenderer<W>>,
    command: Command,
) -> bool {
    match command {
        Command::Answer {
            question_id,
            choice_id,
        } => {
            if !manager.select(&question_id, &choice_id) {
                println!(
                    "Cannot select '{}' for question {} right now",
                    choice_id, question_id
                );
            }
        }
        Command::Submit => {
            manager.submit();
        }
        Command::Reset | Command::Retry => manager.reset(),
        Command::Show => manager.redraw(),
        Command::Help => println!("{}", HELP_TEXT),
        Command::Quit => return false,
    }
    true
}

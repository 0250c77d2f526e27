use anyhow::Result;
use chrono::Local;
use colored::Colorize;
use pomoclock::prelude::*;
use pomoclock::{ENGINE_NAME, VERSION as LIB_VERSION};
use rustyline::highlight::Highlighter;
use rustyline::Editor;
use rustyline_derive::{Completer, Helper, Hinter, Validator};
use std::borrow::Cow;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const SHELL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tasks `0..SEEDED_TASKS` are queued when the shell starts.
const SEEDED_TASKS: i64 = 10;

/// A custom helper struct for rustyline that enables syntax highlighting.
#[derive(Completer, Helper, Hinter, Validator)]
struct MyHighlighter;

impl Highlighter for MyHighlighter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if let Some((command, rest)) = line.split_once(' ') {
            let colored_command = command.yellow().bold();
            let colored_rest = rest.yellow();
            Cow::Owned(format!("{} {}", colored_command, colored_rest))
        } else {
            Cow::Owned(line.yellow().bold().to_string())
        }
    }
    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

/// What the REPL loop should do after a command.
enum Flow {
    Continue,
    Exit,
}

fn print_banner() {
    if env::var("QUIET_MODE").is_ok() {
        return;
    }
    // Embedded at compile time from the crate root.
    const LOGO_TEXT: &str = include_str!("../logo.log");
    println!("{}", LOGO_TEXT.red());

    let version_string = format!(
        "          Shell   v{:<8} Library   v{:<8}",
        SHELL_VERSION, LIB_VERSION
    );
    let rule = "-".repeat(64);

    println!("{}", rule.dimmed());
    println!("{}", version_string);
    println!("{}", rule.dimmed());
}

fn print_help() {
    println!("Available commands:");
    println!("  s, start        - (S)tart the timer from round 0.");
    println!("  t, time         - Remaining (t)ime in the current round or break.");
    println!("  a, add [ID]     - (A)dd a task; ID defaults to the next free number.");
    println!("  f, finish       - (F)inish the oldest task.");
    println!("  l, list         - (L)ist queued tasks and the current interval.");
    println!("  r, reset        - (R)eset the timer to round 0.");
    println!("  e, stop         - Stop/(e)nd the timer and exit.");
    println!("  q, quit         - Shut the session down and (q)uit.");
    println!("  h, ?, help      - Show this (h)elp.");
}

/// Prints a failed call without ending the shell.
fn report<T>(result: pomoclock::error::Result<T>) {
    if let Err(e) = result {
        println!("{} {}", "Error:".red().bold(), e);
    }
}

fn describe(state: IntervalState) -> String {
    match state {
        IntervalState::Idle => "idle".to_string(),
        IntervalState::InRound { round } => format!("round {}", round),
        IntervalState::InBreak { round, long: true } => format!("long break {}", round),
        IntervalState::InBreak { round, long: false } => format!("break {}", round),
    }
}

async fn dispatch(
    scheduler: &IntervalScheduler,
    args: &[&str],
    next_task: &mut i64,
) -> Flow {
    let Some(command) = args.first() else {
        return Flow::Continue;
    };
    match command.to_lowercase().as_str() {
        "s" | "start" => report(scheduler.start().await),
        "t" | "time" => {
            scheduler.remaining_time().await;
        }
        "a" | "add" => {
            let id = match args.get(1) {
                Some(id_str) => match id_str.parse::<i64>() {
                    Ok(id) => id,
                    Err(_) => {
                        println!("Error: '{}' is not a valid task id.", id_str);
                        return Flow::Continue;
                    }
                },
                None => *next_task,
            };
            *next_task = (*next_task).max(id.saturating_add(1));
            scheduler.add_task(TaskId(id)).await;
        }
        "f" | "finish" => report(scheduler.finish_task().await),
        "l" | "list" => {
            let tasks = scheduler.tasks().await;
            let state = scheduler.state().await;
            println!("Interval: {}", describe(state).cyan());
            println!("Queued tasks ({}):", tasks.len());
            for id in tasks {
                println!("  #{}", id);
            }
        }
        "r" | "reset" => report(scheduler.reset().await),
        "e" | "stop" => {
            scheduler.stop().await;
            return Flow::Exit;
        }
        "q" | "quit" | "exit" => {
            scheduler.shutdown().await;
            return Flow::Exit;
        }
        "h" | "?" | "help" => print_help(),
        _ => println!("Unknown command: '{}'. Type 'h' for help.", args.join(" ")),
    }
    Flow::Continue
}

#[tokio::main]
async fn main() -> Result<()> {
    print_banner();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let config_path = env::var_os("POMOSHELL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("pomoshell.toml"));
    let config = PomodoroConfig::load(Some(&config_path))?;
    info!(?config, path = %config_path.display(), "Configuration loaded.");

    let scheduler = IntervalScheduler::new(config)?;
    scheduler
        .set_notifier(|text| {
            let stamp = Local::now().format("%H:%M:%S");
            println!("\n<-- [{}] {}", stamp.to_string().dimmed(), text.green());
        })
        .await;

    for id in 0..SEEDED_TASKS {
        scheduler.add_task(TaskId(id)).await;
    }
    let mut next_task = SEEDED_TASKS;

    let mut rl = Editor::new()?;
    let helper = MyHighlighter {};
    rl.set_helper(Some(helper));

    println!(
        "{} is ready. Type 's' to start, 'h' or '?' for help.",
        ENGINE_NAME.red()
    );

    loop {
        let prompt = format!("{}", ">> ".red().bold());
        match rl.readline(&prompt) {
            Ok(line) => {
                rl.add_history_entry(line.as_str())?;
                let args = line.split_whitespace().collect::<Vec<_>>();
                if let Flow::Exit = dispatch(&scheduler, &args, &mut next_task).await {
                    break;
                }
            }
            Err(e) => {
                warn!("Input closed: {}", e);
                println!("Exiting pomoshell...");
                scheduler.shutdown().await;
                break;
            }
        }
    }

    Ok(())
}

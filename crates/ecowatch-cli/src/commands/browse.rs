//! Interactive live search.
//!
//! Every line is treated as the new content of the search field and pushed
//! through the debounced query pipeline. Lines starting with `:` are commands.

use std::borrow::Cow::{self, Borrowed, Owned};

use anyhow::Result;
use colored::Colorize;
use ecowatch_application::annotate;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context as LineContext, Editor, Helper};
use tokio::sync::mpsc;

use super::Context;
use crate::render;

const COMMANDS: [&str; 5] = [":fav", ":favs", ":ls", ":help", ":quit"];

/// Completion and hints for `:` commands.
#[derive(Clone)]
struct BrowseHelper {
    commands: Vec<String>,
}

impl BrowseHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for BrowseHelper {}

impl Completer for BrowseHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &LineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with(':') {
            return Ok((0, vec![]));
        }
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for BrowseHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with(':') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for BrowseHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &LineContext<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with(':') || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for BrowseHelper {}

enum Command {
    Search(String),
    ToggleFavorite(usize),
    ListFavorites,
    ListResults,
    Help,
    Quit,
    Unknown(String),
}

fn parse(line: &str) -> Command {
    let Some(rest) = line.trim().strip_prefix(':') else {
        return Command::Search(line.to_string());
    };
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("fav"), Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Command::ToggleFavorite(n),
            _ => Command::Unknown(line.to_string()),
        },
        (Some("favs"), None) => Command::ListFavorites,
        (Some("ls"), None) => Command::ListResults,
        (Some("help"), None) => Command::Help,
        (Some("quit") | Some("q"), None) => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}

fn print_help() {
    println!("{}", "Type to search by title, place or type. An empty line lists everything.".bright_black());
    println!("{}", "  :ls        results with favorite markers".bright_black());
    println!("{}", "  :fav N     toggle result N as favorite".bright_black());
    println!("{}", "  :favs      list favorites".bright_black());
    println!("{}", "  :quit      leave".bright_black());
}

pub async fn run(ctx: &mut Context) -> Result<()> {
    let mut pipeline = ctx.app.spawn_query_pipeline();
    let view = pipeline.subscribe_state();

    // The pipeline lives in its own task: it takes input lines and prints
    // every emitted result list.
    let (lines_tx, mut lines_rx) = mpsc::unbounded_channel::<String>();
    let printer = tokio::spawn(async move {
        loop {
            tokio::select! {
                line = lines_rx.recv() => match line {
                    Some(line) => pipeline.push(line),
                    None => break,
                },
                results = pipeline.next() => match results {
                    Some(results) => render::print_results(&results),
                    None => break,
                },
            }
        }
    });

    let mut rl: Editor<BrowseHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(BrowseHelper::new()));

    println!("{}", "=== Ecowatch browse ===".bright_magenta().bold());
    print_help();
    println!();

    loop {
        match rl.readline("search> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(&line);
                }
                match parse(&line) {
                    Command::Search(term) => {
                        if lines_tx.send(term).is_err() {
                            break;
                        }
                    }
                    Command::ToggleFavorite(n) => {
                        let results = view.borrow().results.clone();
                        match results.get(n - 1) {
                            Some(record) => {
                                let now = ctx.app.favorites_mut().toggle(record);
                                let mark = if now { "♥ added" } else { "removed" };
                                println!("{} {}", mark.red(), record.title);
                                if let Err(e) = ctx.save_favorites().await {
                                    eprintln!("{}", format!("Could not save favorites: {}", e).red());
                                }
                            }
                            None => println!("{}", format!("No result #{}", n).yellow()),
                        }
                    }
                    Command::ListFavorites => super::favorites::list(ctx),
                    Command::ListResults => {
                        let state = view.borrow().clone();
                        if state.in_flight {
                            println!("{}", "(searching...)".bright_black());
                        }
                        render::print_items(&annotate(&state.results, ctx.app.favorites()));
                    }
                    Command::Help => print_help(),
                    Command::Quit => break,
                    Command::Unknown(line) => {
                        println!("{}", format!("Unknown command: {}", line.trim()).yellow())
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type :quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    drop(lines_tx);
    let _ = printer.await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert!(matches!(parse(":fav 2"), Command::ToggleFavorite(2)));
        assert!(matches!(parse(":fav 0"), Command::Unknown(_)));
        assert!(matches!(parse(" :favs "), Command::ListFavorites));
        assert!(matches!(parse(":q"), Command::Quit));
        assert!(matches!(parse(":nope"), Command::Unknown(_)));
    }

    #[test]
    fn test_plain_lines_are_searches_verbatim() {
        match parse("  plastique ") {
            Command::Search(term) => assert_eq!(term, "  plastique "),
            _ => panic!("expected a search"),
        }
        assert!(matches!(parse(""), Command::Search(ref t) if t.is_empty()));
    }
}

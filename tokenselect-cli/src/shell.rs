//! Line-oriented front end for the token select controller.

use tokio::io::{AsyncBufReadExt, BufReader};

use tokenselect_lib::loader::{LoadState, Outcome};
use tokenselect_lib::selection::CheckState;
use tokenselect_lib::source::ItemSource;
use tokenselect_lib::tree::walk;
use tokenselect_lib::{ExpandOutcome, Node, Token, TokenSelect, View};

use crate::CliError;

const HELP: &str = "\
commands:
  ls                 show the dropdown
  expand <id>        expand a node (fetches children on first expand)
  toggle <id>        check or uncheck a node
  all                toggle select-all
  search <text>      type into the input (empty text clears it)
  add                commit the selection as tokens
  cancel             discard input and close the dropdown
  open               open the dropdown with the committed tokens
  remove <label>     remove a committed token
  tokens             show committed tokens
  quit";

enum Command<'a> {
    List,
    Expand(&'a str),
    Toggle(&'a str),
    All,
    Search(&'a str),
    Add,
    Cancel,
    Open,
    Remove(&'a str),
    Tokens,
    Help,
    Quit,
}

impl<'a> Command<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        let command = match (word, rest.is_empty()) {
            ("ls", _) => Self::List,
            ("expand", false) => Self::Expand(rest),
            ("toggle", false) => Self::Toggle(rest),
            ("all", _) => Self::All,
            ("search", _) => Self::Search(rest),
            ("add", _) => Self::Add,
            ("cancel", _) => Self::Cancel,
            ("open", _) => Self::Open,
            ("remove", false) => Self::Remove(rest),
            ("tokens", _) => Self::Tokens,
            ("help", _) => Self::Help,
            ("quit" | "exit", _) => Self::Quit,
            _ => return None,
        };
        Some(command)
    }
}

/// Reads commands from stdin until `quit` or end of input.
pub async fn run<S: ItemSource + ?Sized>(
    mut select: TokenSelect<S>,
    mut tokens: Vec<Token>,
) -> Result<(), CliError> {
    println!("{}", HELP);
    select.open(&tokens);
    print_view(&select);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            if !line.trim().is_empty() {
                println!("unknown command, try `help`");
            }
            continue;
        };

        match command {
            Command::List => print_view(&select),
            Command::Expand(id) => match select.expand(id).await {
                Ok(ExpandOutcome::NotFound) => println!("no node {}", id),
                Ok(ExpandOutcome::NotExpandable) => println!("{} is a leaf", id),
                Ok(_) => print_view(&select),
                Err(e) => println!("expand failed: {}", e),
            },
            Command::Toggle(id) => {
                select.toggle(id);
                print_view(&select);
            }
            Command::All => {
                select.toggle_all();
                print_view(&select);
            }
            Command::Search(text) => match select.search(text).await {
                Ok(Some(Outcome::Stale)) => log::debug!("search {:?} superseded", text),
                Ok(_) => print_view(&select),
                Err(e) => println!("search failed: {}", e),
            },
            Command::Add => {
                tokens = select.commit();
                print_tokens(&tokens);
            }
            Command::Cancel => select.cancel(),
            Command::Open => {
                select.open(&tokens);
                print_view(&select);
            }
            Command::Remove(label) => match select.remove_token_by_label(&tokens, label) {
                Some(remaining) => {
                    tokens = remaining;
                    print_tokens(&tokens);
                }
                None => println!("no token labelled {:?}", label),
            },
            Command::Tokens => print_tokens(&tokens),
            Command::Help => println!("{}", HELP),
            Command::Quit => break,
        }
    }

    Ok(())
}

fn print_view<S: ItemSource + ?Sized>(select: &TokenSelect<S>) {
    let marker = match select.check_all_state() {
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
        CheckState::Unchecked => "[ ]",
    };
    println!("{} select all", marker);

    match select.view() {
        View::Tree(roots) => print_nodes(select, &roots),
        View::Search { query, results } => {
            println!("results for {:?}:", query);
            if !results.parents.is_empty() {
                println!("categories");
                let nodes: Vec<Node> = results.parents.iter().map(|r| r.node.clone()).collect();
                print_nodes(select, &nodes);
            }
            if !results.leaves.is_empty() {
                println!("items");
                let nodes: Vec<Node> = results.leaves.iter().map(|r| r.node.clone()).collect();
                print_nodes(select, &nodes);
            }
        }
    }

    println!("selected: {}", select.selected_count());
}

fn print_nodes<S: ItemSource + ?Sized>(select: &TokenSelect<S>, nodes: &[Node]) {
    walk(nodes, &mut |node, depth| {
        let checkbox = match select.node_state(&node.id) {
            CheckState::Checked => "[x]",
            CheckState::Indeterminate => "[-]",
            CheckState::Unchecked => "[ ]",
        };
        let expander = match select.load_state(&node.id) {
            LoadState::Loading => "…",
            LoadState::Failed(_) => "!",
            _ if node.needs_fetch() => "+",
            _ => " ",
        };
        println!(
            "{}{} {} {} ({})",
            "  ".repeat(depth),
            expander,
            checkbox,
            node.label,
            node.id
        );
    });
}

fn print_tokens(tokens: &[Token]) {
    if tokens.is_empty() {
        println!("no tokens");
        return;
    }
    for token in tokens {
        match token.counter {
            Some(counter) => println!("  {} ({})", token.label, counter),
            None => println!("  {}", token.label),
        }
    }
}

use balanced_trees::avl_tree::AvlSet;
use balanced_trees::bst::Order;
use balanced_trees::red_black_tree::RedBlackSet;
use balanced_trees::Result;
use log::{info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::env;
use std::fmt::Display;
use std::io::{self, BufRead};

const LOG_ENV_VAR: &str = "BALANCED_TREES_LOG";

const HELP: &str = "\
commands:
  avl | rb          start a new, empty avl or red black tree
  insert <key>      insert an integer key
  remove <key>      remove an integer key
  search <key>      look up a key and show its node
  show [pre|in|post]
                    print one traversal, or all three
  validate          check the red black properties
  help              print this message
  quit";

enum Session {
    Avl(AvlSet<i64>),
    RedBlack(RedBlackSet<i64>),
}

impl Session {
    fn name(&self) -> &'static str {
        match self {
            Session::Avl(_) => "avl",
            Session::RedBlack(_) => "red black",
        }
    }

    fn insert(&mut self, key: i64) -> bool {
        match self {
            Session::Avl(set) => set.insert(key),
            Session::RedBlack(set) => set.insert(key),
        }
    }

    fn remove(&mut self, key: i64) -> bool {
        match self {
            Session::Avl(set) => set.remove(&key),
            Session::RedBlack(set) => set.remove(&key),
        }
    }

    fn search(&self, key: i64) -> Option<String> {
        match self {
            Session::Avl(set) => set.search(&key).map(|node| node.to_string()),
            Session::RedBlack(set) => set.search(&key).map(|node| node.to_string()),
        }
    }

    fn show(&self, kind: &str) -> Result<String> {
        match self {
            Session::Avl(set) => set.show_str(kind).map(|keys| join(&keys)),
            Session::RedBlack(set) => set.show_str(kind).map(|keys| join(&keys)),
        }
    }

    fn validate(&self) -> Option<bool> {
        match self {
            Session::Avl(_) => None,
            Session::RedBlack(set) => Some(set.validate_properties()),
        }
    }
}

fn join<T: Display>(keys: &[&T]) -> String {
    keys.iter()
        .map(|key| key.to_string())
        .collect::<Vec<String>>()
        .join(", ")
}

fn init_logging() {
    let level = match env::var(LOG_ENV_VAR).as_ref().map(String::as_str) {
        Ok("trace") => LevelFilter::Trace,
        Ok("debug") => LevelFilter::Debug,
        Ok("info") => LevelFilter::Info,
        _ => LevelFilter::Warn,
    };
    if TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("failed to install the terminal logger");
    }
}

fn parse_key(arg: Option<&str>) -> Option<i64> {
    let key = arg.and_then(|arg| arg.parse().ok());
    if key.is_none() {
        println!("expected an integer key");
    }
    key
}

fn execute(session: &mut Option<Session>, line: &str) -> bool {
    let mut args = line.split_whitespace();
    let command = match args.next() {
        Some(command) => command,
        None => return true,
    };

    match command {
        "quit" | "exit" => return false,
        "help" => println!("{}", HELP),
        "avl" => {
            *session = Some(Session::Avl(AvlSet::new()));
            println!("avl tree selected");
        },
        "rb" => {
            *session = Some(Session::RedBlack(RedBlackSet::new()));
            println!("red black tree selected");
        },
        _ => {
            let session = match session {
                Some(session) => session,
                None => {
                    println!("select a tree first with `avl` or `rb`");
                    return true;
                },
            };
            match command {
                "insert" => {
                    if let Some(key) = parse_key(args.next()) {
                        if session.insert(key) {
                            println!("inserted {}", key);
                        } else {
                            println!("{} is already present", key);
                        }
                    }
                },
                "remove" => {
                    if let Some(key) = parse_key(args.next()) {
                        if session.remove(key) {
                            println!("removed {}", key);
                        } else {
                            println!("{} is not present", key);
                        }
                    }
                },
                "search" => {
                    if let Some(key) = parse_key(args.next()) {
                        match session.search(key) {
                            Some(node) => println!("found {}", node),
                            None => println!("{} is not present", key),
                        }
                    }
                },
                "show" => match args.next() {
                    Some(kind) => match session.show(kind) {
                        Ok(keys) => println!("{}: {}", kind, keys),
                        Err(err) => println!("{}", err),
                    },
                    None => {
                        for order in Order::ALL.iter() {
                            match session.show(order.as_str()) {
                                Ok(keys) => println!("{}: {}", order, keys),
                                Err(err) => println!("{}", err),
                            }
                        }
                    },
                },
                "validate" => match session.validate() {
                    Some(valid) => println!("valid: {}", valid),
                    None => println!("validation is only defined for the red black tree"),
                },
                _ => {
                    warn!("unknown command `{}`", command);
                    println!("unknown command `{}`, try `help`", command);
                },
            }
            info!("{} tree handled `{}`", session.name(), line.trim());
        },
    }
    true
}

fn main() {
    init_logging();

    let stdin = io::stdin();
    let mut session = None;
    println!("{}", HELP);

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("failed to read from stdin: {}", err);
                break;
            },
        };
        if !execute(&mut session, &line) {
            break;
        }
    }
}

mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod parser;
mod reader;
mod value;

use builtins::register_builtins;
use clap::Parser;
use config::{HISTORY_FILE, PRELUDE_PATHS, PROMPT, WELCOME_MESSAGE, WELCOME_SUBTITLE};
use env::Environment;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use std::path::PathBuf;
use std::rc::Rc;
use value::Value;

/// A Lisp-family interpreter with lexical closures, Q-expressions, and a REPL
#[derive(Parser, Debug)]
#[command(name = "lithpy")]
#[command(version = config::VERSION)]
#[command(about = "A Lisp-family interpreter with lexical closures and Q-expressions")]
struct CliArgs {
    /// Script files to execute in order (no files starts the REPL instead)
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    let env = Environment::new();
    register_builtins(Rc::clone(&env));
    load_prelude(&env);

    if args.files.is_empty() {
        run_repl(&env)
    } else {
        for path in &args.files {
            println!("Loading '{}'", path.display());
            run_file(path, &env);
        }
        Ok(())
    }
}

/// Loads the bundled prelude files, same as any other script — missing or
/// malformed prelude files print a warning but never stop startup, since
/// the language is also usable with no prelude at all.
fn load_prelude(env: &Rc<Environment>) {
    for path in PRELUDE_PATHS {
        match std::fs::read_to_string(path) {
            Ok(contents) => eval_source(env, &contents, path),
            Err(_) => continue,
        }
    }
}

fn run_file(path: &PathBuf, env: &Rc<Environment>) {
    match std::fs::read_to_string(path) {
        Ok(contents) => eval_source(env, &contents, &path.display().to_string()),
        Err(e) => eprintln!("Could not load Library {}: {}", path.display(), e),
    }
}

/// Evaluates every top-level form in `source` one at a time, printing any
/// `Error` result (spec.md §6: a load never aborts partway through a file
/// on account of one bad form — each form is independent).
fn eval_source(env: &Rc<Environment>, source: &str, label: &str) {
    match reader::read_source(source) {
        Ok(forms) => {
            for form in forms {
                let result = eval::eval(env, form);
                if let Value::Error(_) = result {
                    println!("{}", result);
                }
            }
        }
        Err(e) => eprintln!("Parse error in {}: {}", label, e),
    }
}

fn run_repl(env: &Rc<Environment>) -> Result<(), Box<dyn std::error::Error>> {
    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl = DefaultEditor::with_config(rl_config)?;
    let _ = rl.load_history(HISTORY_FILE);

    println!("{}", WELCOME_MESSAGE);
    println!("{}", WELCOME_SUBTITLE);

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                match reader::read_source(&line) {
                    Ok(forms) => {
                        for form in forms {
                            println!("{}", eval::eval(env, form));
                        }
                    }
                    Err(e) => eprintln!("Parse error: {}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("Error: {}", err);
                break;
            }
        }
    }

    let _ = rl.save_history(HISTORY_FILE);
    Ok(())
}

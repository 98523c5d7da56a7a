// ABOUTME: Version info, banner text, and fixed paths used by the REPL and CLI

pub const VERSION: &str = "0.0.0.1.0";
pub const WELCOME_MESSAGE: &str = "Lithpy Version 0.0.0.1.0";
pub const WELCOME_SUBTITLE: &str = "Press Ctrl+c to Exit";

pub const PROMPT: &str = "lithpy> ";

pub const PRELUDE_PATHS: &[&str] = &["src/stdlib/prelude.lspy", "src/stdlib/fun.lthpy"];

pub const HISTORY_FILE: &str = ".lithpy_history";

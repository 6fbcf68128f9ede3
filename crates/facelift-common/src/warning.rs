//! Deduplicated warnings on stderr.
//!
//! The HTML front end meets constructs it intentionally does not handle
//! (exotic doctypes, unknown character references, table parsing). Those
//! are worth one line on stderr, not one line per occurrence, so every
//! warning is keyed by component and message and printed only the first
//! time it is raised.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

/// ANSI escape for the warning color.
const YELLOW: &str = "\x1b[33m";
/// ANSI escape to reset the terminal color.
const RESET: &str = "\x1b[0m";

/// Registry of warning keys that have already been printed.
fn printed() -> &'static Mutex<HashSet<String>> {
    static PRINTED: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();
    PRINTED.get_or_init(|| Mutex::new(HashSet::new()))
}

/// Warn about an unsupported construct, once per unique message.
///
/// `component` names the subsystem raising the warning (for example
/// `"HTML Parser"`) and becomes part of the dedup key, so two components
/// can raise the same message independently.
///
/// # Example
/// ```ignore
/// warn_once("HTML", "table parsing is not supported; treating <td> as a plain element");
/// ```
///
/// # Panics
/// Panics if the warning registry mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("{component}\u{1f}{message}");
    let first_time = printed().lock().unwrap().insert(key);
    if first_time {
        eprintln!("{YELLOW}facelift [{component}] {message}{RESET}");
    }
}

/// Forget every warning raised so far, so the next page load reports its
/// own problems from a clean slate.
///
/// # Panics
/// Panics if the warning registry mutex is poisoned.
pub fn clear_warnings() {
    printed().lock().unwrap().clear();
}

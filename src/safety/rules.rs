//! Declarative rule tables for the command classifier
//!
//! Keyword, flag, and path-pattern sets are kept as plain tables so the
//! blocklist can be audited and tested without reading the matching logic.
//! All matching is done against a lowercased copy of the command, so every
//! entry here is lowercase.

use once_cell::sync::Lazy;
use regex::Regex;

/// Destructive Unix command keywords
///
/// A command is rejected when it equals one of these or starts with one
/// followed by a space. Matching is prefix based, not tokenized.
pub const UNIX_DANGER_COMMANDS: &[&str] = &[
    "rm", "mkfs", "dd", "chmod", "chown", "shutdown", "reboot", "del", "format", "rd", "deltree",
];

/// Destructive PowerShell cmdlets, matched as substrings
pub const POWERSHELL_DANGER_COMMANDS: &[&str] = &[
    "out-file",
    "format-volume",
    "clear-disk",
    "initialize-disk",
    "stop-computer",
    "restart-computer",
    "shutdown",
];

/// Destructive PowerShell flags, matched as substrings
pub const POWERSHELL_DANGER_FLAGS: &[&str] = &["-recurse", "-force", "-confirm:$false"];

/// Commands whose leading text exempts them from the path-pattern scan
///
/// Read-only listings are allowed to carry wildcards and system paths.
pub const READ_ONLY_COMMANDS: &[&str] = &["dir", "ls", "get-childitem"];

/// Path patterns that indicate a destructive target on Windows
pub static DANGER_PATH_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"^c:\\windows", // system root
        r"^\\\\",        // UNC path
        r"\*$",          // trailing wildcard
    ]
    .iter()
    .map(|p| Regex::new(p).expect("invalid path pattern"))
    .collect()
});

/// Matches PowerShell encoded-command flags, which hide the real payload
pub static ENCODED_COMMAND_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s-(enc|encodedcommand)\b").expect("invalid encoded-command regex"));

/// Captures the quoted payload of a `powershell -Command "..."` invocation
///
/// Case-insensitive and dot-matches-newline so multi-line payloads are
/// still extracted. Double- and single-quoted forms capture into separate
/// groups because the payload delimiter must match on both ends.
pub static INNER_COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)-command\s+(?:"([^"]*)"|'([^']*)')"#).expect("invalid inner-command regex")
});

/// Extract the inner command from a `powershell -Command "..."` invocation
///
/// Returns `None` when the command is not of that shape, in which case no
/// recursion happens.
pub fn extract_powershell_inner_command(command: &str) -> Option<String> {
    let caps = INNER_COMMAND_RE.captures(command)?;
    let inner = caps.get(1).or_else(|| caps.get(2))?;
    Some(inner.as_str().trim().to_string())
}

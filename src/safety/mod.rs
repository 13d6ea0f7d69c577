//! Safety classifier for shell commands
//!
//! Pure decision function over normalized command text: dangerous or safe.
//! The host dialect is decided once at startup and never per call; the
//! dialect-explicit [`classify`] form exists so both branches can be
//! exercised in tests on any host.
//!
//! Matching is substring/prefix based rather than tokenized, so keywords
//! appearing inside arguments produce false positives. That bias is
//! intentional: an unrecognizable command is treated as dangerous.

mod rules;

pub use rules::{
    POWERSHELL_DANGER_COMMANDS, POWERSHELL_DANGER_FLAGS, READ_ONLY_COMMANDS, UNIX_DANGER_COMMANDS,
    extract_powershell_inner_command,
};

use rules::{DANGER_PATH_PATTERNS, ENCODED_COMMAND_RE};

/// Recursion ceiling for nested `powershell -Command` payloads
///
/// Anything nested deeper is rejected without inspection.
const MAX_RECURSION_DEPTH: u32 = 3;

/// Shell dialect of the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellDialect {
    /// Bash/Zsh style shells
    Unix,
    /// PowerShell/CMD
    Windows,
}

impl ShellDialect {
    /// Detect the dialect of the host OS
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }

    /// Human-readable label used in confirmation messages
    pub fn label(self) -> &'static str {
        match self {
            Self::Unix => "Bash/Zsh",
            Self::Windows => "PowerShell/CMD",
        }
    }

    /// Shell program and flag used to interpret a command string
    pub fn shell_invocation(self) -> (&'static str, &'static str) {
        match self {
            Self::Unix => ("bash", "-c"),
            Self::Windows => ("cmd", "/C"),
        }
    }

    /// Danger keyword table for this dialect, for tool descriptions
    pub fn danger_commands(self) -> &'static [&'static str] {
        match self {
            Self::Unix => UNIX_DANGER_COMMANDS,
            Self::Windows => POWERSHELL_DANGER_COMMANDS,
        }
    }
}

/// Check whether a command is dangerous on the host platform
pub fn is_dangerous_command(command: &str) -> bool {
    classify(ShellDialect::host(), command, 0)
}

/// Check whether a command is dangerous under an explicit dialect
///
/// `depth` tracks nesting through `powershell -Command` payloads; above
/// [`MAX_RECURSION_DEPTH`] the command is rejected outright. Only the
/// Windows branch recurses.
pub fn classify(dialect: ShellDialect, command: &str, depth: u32) -> bool {
    if depth > MAX_RECURSION_DEPTH {
        return true;
    }

    let cmd = command.to_lowercase();

    match dialect {
        ShellDialect::Windows => classify_windows(dialect, command, &cmd, depth),
        ShellDialect::Unix => classify_unix(&cmd),
    }
}

fn classify_windows(dialect: ShellDialect, original: &str, cmd: &str, depth: u32) -> bool {
    // Encoded payloads cannot be inspected, so they are rejected outright.
    if ENCODED_COMMAND_RE.is_match(cmd) {
        return true;
    }

    if let Some(inner) = extract_powershell_inner_command(original) {
        if classify(dialect, &inner, depth + 1) {
            return true;
        }
    }

    if POWERSHELL_DANGER_COMMANDS.iter().any(|kw| cmd.contains(kw)) {
        return true;
    }

    if POWERSHELL_DANGER_FLAGS.iter().any(|flag| cmd.contains(flag)) {
        return true;
    }

    // Read-only listings may carry wildcards and system paths.
    if !READ_ONLY_COMMANDS.iter().any(|c| cmd.starts_with(c))
        && DANGER_PATH_PATTERNS.iter().any(|p| p.is_match(cmd))
    {
        return true;
    }

    false
}

fn classify_unix(cmd: &str) -> bool {
    UNIX_DANGER_COMMANDS
        .iter()
        .any(|kw| cmd == *kw || cmd.starts_with(&format!("{kw} ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_destructive_keywords() {
        for cmd in ["rm -rf /tmp/x", "dd if=/dev/zero of=/dev/sda", "chmod 777 /", "shutdown now"]
        {
            assert!(classify(ShellDialect::Unix, cmd, 0), "{cmd} should be dangerous");
        }
    }

    #[test]
    fn test_unix_bare_keyword() {
        assert!(classify(ShellDialect::Unix, "rm", 0));
        assert!(classify(ShellDialect::Unix, "reboot", 0));
    }

    #[test]
    fn test_unix_keyword_is_case_insensitive() {
        assert!(classify(ShellDialect::Unix, "RM -rf /", 0));
    }

    #[test]
    fn test_unix_safe_commands() {
        for cmd in ["echo hi", "ls -la", "cargo build", "git status", "rmdir-helper --check"] {
            assert!(!classify(ShellDialect::Unix, cmd, 0), "{cmd} should be safe");
        }
    }

    #[test]
    fn test_unix_never_recurses_into_nested_payloads() {
        // The Unix branch has no nesting rules; the payload keyword is not
        // at the command's leading position, so this passes.
        assert!(!classify(ShellDialect::Unix, "bash -c 'echo rm'", 0));
    }

    #[test]
    fn test_windows_encoded_command_rejected() {
        assert!(classify(ShellDialect::Windows, "powershell -enc SQBFAFgA", 0));
        assert!(classify(ShellDialect::Windows, "powershell -EncodedCommand SQBFAFgA", 0));
    }

    #[test]
    fn test_windows_nested_removal_rejected() {
        let cmd = r#"powershell -Command "Remove-Item -Recurse -Force C:\data\*""#;
        assert!(classify(ShellDialect::Windows, cmd, 0));
    }

    #[test]
    fn test_windows_danger_cmdlets() {
        assert!(classify(ShellDialect::Windows, "Format-Volume -DriveLetter D", 0));
        assert!(classify(ShellDialect::Windows, "Stop-Computer", 0));
    }

    #[test]
    fn test_windows_danger_flags() {
        assert!(classify(ShellDialect::Windows, "Remove-Item x -Confirm:$false", 0));
    }

    #[test]
    fn test_windows_path_patterns() {
        assert!(classify(ShellDialect::Windows, r"C:\Windows\System32\config", 0));
        assert!(classify(ShellDialect::Windows, r"\\server\share\file", 0));
        assert!(classify(ShellDialect::Windows, r"type c:\data\*", 0));
    }

    #[test]
    fn test_windows_read_only_commands_skip_path_scan() {
        assert!(!classify(ShellDialect::Windows, r"dir c:\data\*", 0));
        assert!(!classify(ShellDialect::Windows, r"Get-ChildItem \\server\share", 0));
    }

    #[test]
    fn test_windows_safe_commands() {
        assert!(!classify(ShellDialect::Windows, "Get-Process", 0));
        assert!(!classify(ShellDialect::Windows, "echo hello", 0));
    }

    #[test]
    fn test_depth_ceiling_always_dangerous() {
        assert!(classify(ShellDialect::Windows, "echo hello", 4));
        assert!(classify(ShellDialect::Unix, "echo hello", 4));
    }

    #[test]
    fn test_substring_false_positive_is_accepted() {
        // Fail-safe bias: the cmdlet table matches anywhere in the text.
        assert!(classify(ShellDialect::Windows, "echo shutdown", 0));
    }

    #[test]
    fn test_dialect_labels() {
        assert_eq!(ShellDialect::Unix.label(), "Bash/Zsh");
        assert_eq!(ShellDialect::Windows.label(), "PowerShell/CMD");
    }

    #[test]
    fn test_shell_invocation() {
        assert_eq!(ShellDialect::Unix.shell_invocation(), ("bash", "-c"));
        assert_eq!(ShellDialect::Windows.shell_invocation(), ("cmd", "/C"));
    }
}

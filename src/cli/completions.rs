//! Completions command implementation

use crate::cli::{Cli, CompletionsArgs};
use clap::CommandFactory;
use clap_complete::generate;
use std::io;

/// Handle `serverdeck completions` command
pub fn handle_completions(args: &CompletionsArgs) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, bin_name, &mut io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;

    #[test]
    fn test_command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_completions_bash_mentions_binary() {
        let mut cmd = Cli::command();
        let mut buffer = Vec::new();
        generate(Shell::Bash, &mut cmd, "serverdeck", &mut buffer);

        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("serverdeck"));
    }

    #[test]
    fn test_completions_zsh_mentions_subcommands() {
        let mut cmd = Cli::command();
        let mut buffer = Vec::new();
        generate(Shell::Zsh, &mut cmd, "serverdeck", &mut buffer);

        let script = String::from_utf8(buffer).unwrap();
        assert!(script.contains("servers"));
        assert!(script.contains("watch"));
    }
}

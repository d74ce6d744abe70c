// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::io::{self, Write};

use clap::{ArgMatches, Command, ValueEnum, arg, value_parser};
use clap_complete::{Generator, generate};

use crate::{APP_NAME, Cli};

/// Print a completion script for `recur` to stdout.
#[derive(Debug, Clone, Copy)]
pub struct CmdGenerateCompletion {
    pub shell: Shell,
}

impl CmdGenerateCompletion {
    pub const NAME: &str = "generate-completion";

    pub fn command() -> Command {
        Command::new(Self::NAME)
            .about("Print a shell completion script")
            .hide(true)
            .arg(arg!(shell: <SHELL> "Target shell").value_parser(value_parser!(Shell)))
    }

    pub fn from(matches: &ArgMatches) -> Self {
        let shell = matches.get_one::<Shell>("shell").copied();
        Self {
            shell: shell.unwrap_or(Shell::Bash),
        }
    }

    pub fn run(self) -> Result<(), Box<dyn Error>> {
        tracing::debug!(shell = ?self.shell, "writing completion script");
        self.generate(&mut io::stdout().lock());
        Ok(())
    }

    pub fn generate(self, out: &mut dyn Write) {
        match self.shell.clap_shell() {
            Some(shell) => write_script(shell, out),
            None => write_script(clap_complete_nushell::Nushell {}, out),
        }
    }
}

fn write_script(generator: impl Generator, out: &mut dyn Write) {
    generate(generator, &mut Cli::command(), APP_NAME, out);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Elvish,
    Fish,
    Nushell,
    #[clap(name = "powershell")]
    #[allow(clippy::enum_variant_names)]
    PowerShell,
    Zsh,
}

impl Shell {
    fn clap_shell(self) -> Option<clap_complete::Shell> {
        use clap_complete::Shell as S;

        match self {
            Shell::Bash => Some(S::Bash),
            Shell::Elvish => Some(S::Elvish),
            Shell::Fish => Some(S::Fish),
            Shell::PowerShell => Some(S::PowerShell),
            Shell::Zsh => Some(S::Zsh),
            Shell::Nushell => None,
        }
    }
}

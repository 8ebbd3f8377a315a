use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::navigator::PANEL_COUNT;

#[derive(Parser)]
#[command(name = "edudeck")]
#[command(author, version, about)]
#[command(long_about = "Interactive dashboard of higher-education enrollment in the \
    Magallanes region (2021).\n\n\
    Examples:\n  \
    edudeck                      Open the dashboard (fullscreen)\n  \
    edudeck --windowed --panel 3 Open in a window on the institutions panel\n  \
    edudeck tables --json        Print every frequency table as JSON\n  \
    edudeck export -o shots      Save every screen as PNG")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Launch in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific panel (1-indexed)
    #[arg(long, global = false, value_parser = parse_panel)]
    pub panel: Option<usize>,

    /// Color theme
    #[arg(long, value_enum, global = false)]
    pub theme: Option<ThemeName>,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Export every screen as PNG images
    Export {
        /// Output directory for PNG files
        #[arg(short, long, default_value = "export")]
        output_dir: PathBuf,

        /// Export width in pixels
        #[arg(long, default_value = "1920")]
        width: u32,

        /// Export height in pixels
        #[arg(long, default_value = "1080")]
        height: u32,
    },

    /// Print the frequency tables behind the charts
    Tables {
        /// Only this panel (1-indexed)
        #[arg(long, value_parser = parse_panel)]
        panel: Option<usize>,

        /// Print JSON instead of aligned text
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.start_panel)
        key: String,

        /// Value to set
        value: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeName {
    Light,
    Dark,
}

impl ThemeName {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

fn parse_panel(value: &str) -> Result<usize, String> {
    let n: usize = value
        .parse()
        .map_err(|_| format!("'{value}' is not a panel number"))?;
    if (1..=PANEL_COUNT).contains(&n) {
        Ok(n)
    } else {
        Err(format!("panel must be between 1 and {PANEL_COUNT}"))
    }
}

impl Cli {
    /// Log level implied by `-q` / `-v` flags.
    pub fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "edudeck=error";
        }
        match self.verbose {
            0 => "edudeck=warn",
            1 => "edudeck=info",
            2 => "edudeck=debug",
            _ => "edudeck=trace",
        }
    }

    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Export {
                output_dir,
                width,
                height,
            }) => crate::commands::export::run(output_dir, width, height),
            Some(Commands::Tables { panel, json }) => crate::commands::tables::run(panel, json),
            Some(Commands::Version) => {
                crate::banner::print_banner_with_version();
                Ok(())
            }
            None => crate::app::run(
                self.windowed,
                self.panel,
                self.theme.map(|t| t.as_str()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_panel_flag() {
        let cli = Cli::try_parse_from(["edudeck", "--panel", "3", "--windowed"]).unwrap();
        assert_eq!(cli.panel, Some(3));
        assert!(cli.windowed);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_panel_out_of_range_is_usage_error() {
        assert!(Cli::try_parse_from(["edudeck", "--panel", "0"]).is_err());
        assert!(Cli::try_parse_from(["edudeck", "--panel", "9"]).is_err());
        assert!(Cli::try_parse_from(["edudeck", "--panel", "two"]).is_err());
    }

    #[test]
    fn test_theme_flag() {
        let cli = Cli::try_parse_from(["edudeck", "--theme", "dark"]).unwrap();
        assert_eq!(cli.theme, Some(ThemeName::Dark));
        assert!(Cli::try_parse_from(["edudeck", "--theme", "sepia"]).is_err());
    }

    #[test]
    fn test_subcommands() {
        let cli = Cli::try_parse_from(["edudeck", "tables", "--panel", "7", "--json"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Tables {
                panel: Some(7),
                json: true
            })
        ));

        let cli = Cli::try_parse_from(["edudeck", "export", "-o", "out", "--width", "1280"]).unwrap();
        match cli.command {
            Some(Commands::Export {
                output_dir,
                width,
                height,
            }) => {
                assert_eq!(output_dir, PathBuf::from("out"));
                assert_eq!(width, 1280);
                assert_eq!(height, 1080);
            }
            _ => panic!("expected export"),
        }

        let cli = Cli::try_parse_from(["edudeck", "config", "set", "defaults.theme", "dark"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: ConfigCommands::Set { .. }
            })
        ));
    }

    #[test]
    fn test_dashboard_flags_conflict_with_subcommands() {
        assert!(Cli::try_parse_from(["edudeck", "--panel", "2", "version"]).is_err());
    }

    #[test]
    fn test_log_filter() {
        let cli = Cli::try_parse_from(["edudeck", "-vv"]).unwrap();
        assert_eq!(cli.log_filter(), "edudeck=debug");
        let cli = Cli::try_parse_from(["edudeck", "-q"]).unwrap();
        assert_eq!(cli.log_filter(), "edudeck=error");
        let cli = Cli::try_parse_from(["edudeck"]).unwrap();
        assert_eq!(cli.log_filter(), "edudeck=warn");
    }
}

//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored text
    #[default]
    Text,
    /// JSON output
    Json,
}

/// CLI arguments for examforge
#[derive(Parser, Debug)]
#[command(name = "examforge")]
#[command(author, version, about = "Generate exam questions with AI and curate them")]
#[command(long_about = r#"
examforge asks an AI model for multiple-choice exam questions and keeps
them as provisional until you confirm which ones to keep.

Workflow:
1. generate: questions are created and stored as provisional
2. confirm:  selected questions are kept, every other provisional one is erased
3. list / show / delete: manage confirmed questions

Configuration files are loaded from (in priority order):
1. Environment: DEEPSEEK_API_KEY, DEEPSEEK_API_URL, TONGYI_API_KEY,
   TONGYI_API_URL, EXAMFORGE_DATABASE_URL
2. --config <path>       Explicit config file
3. ./examforge.toml      Project-level config
4. ~/.config/examforge/config.toml   Global config

Example:
  examforge generate --user 7 --model deepseek --language Go --keywords slices --count 2
  examforge confirm --user 7 --select 2 --select 4
  examforge list --user 7 --language Go
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files (environment still applies)
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long, value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate provisional questions
    Generate(GenerateArgs),
    /// Keep the selected provisional questions and erase the rest
    Confirm(ConfirmArgs),
    /// List confirmed questions
    List(ListArgs),
    /// Show one confirmed question
    Show(QuestionRefArgs),
    /// Soft delete a confirmed question
    Delete(QuestionRefArgs),
    /// Show configuration sources and resolved providers
    Config,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Owning user id
    #[arg(long, value_name = "ID")]
    pub user: i64,

    /// Model selector: deepseek or 通义千问 (alias: tongyi)
    #[arg(short, long, default_value = "deepseek")]
    pub model: String,

    /// Target programming language
    #[arg(short, long)]
    pub language: String,

    /// Question kind: single or multiple
    #[arg(short, long, default_value = "single")]
    pub kind: String,

    /// Topic keywords embedded in the prompt
    #[arg(long, default_value = "")]
    pub keywords: String,

    /// Number of questions to request
    #[arg(short, long, default_value_t = 5)]
    pub count: u32,
}

#[derive(Args, Debug)]
pub struct ConfirmArgs {
    /// Owning user id
    #[arg(long, value_name = "ID")]
    pub user: i64,

    /// Question ids to keep (repeatable); omitted ids are erased
    #[arg(short, long = "select", value_name = "ID")]
    pub select: Vec<i64>,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Owning user id
    #[arg(long, value_name = "ID")]
    pub user: i64,

    /// Only questions for this language
    #[arg(short, long)]
    pub language: Option<String>,

    /// Only questions of this kind (single or multiple)
    #[arg(short, long)]
    pub kind: Option<String>,

    /// Only questions whose title contains this text
    #[arg(long)]
    pub keyword: Option<String>,
}

#[derive(Args, Debug)]
pub struct QuestionRefArgs {
    /// Owning user id
    #[arg(long, value_name = "ID")]
    pub user: i64,

    /// Question id
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::try_parse_from([
            "examforge", "generate", "--user", "7", "--language", "Go",
        ])
        .unwrap();

        match cli.command {
            Command::Generate(args) => {
                assert_eq!(args.user, 7);
                assert_eq!(args.model, "deepseek");
                assert_eq!(args.kind, "single");
                assert_eq!(args.keywords, "");
                assert_eq!(args.count, 5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.output, OutputFormat::Text);
    }

    #[test]
    fn test_confirm_collects_repeated_select() {
        let cli = Cli::try_parse_from([
            "examforge", "confirm", "--user", "7", "--select", "2", "-s", "4",
        ])
        .unwrap();

        match cli.command {
            Command::Confirm(args) => assert_eq!(args.select, vec![2, 4]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "examforge", "list", "--user", "7", "-o", "json", "-vv", "--quiet",
        ])
        .unwrap();

        assert_eq!(cli.output, OutputFormat::Json);
        assert_eq!(cli.verbose, 2);
        assert!(cli.quiet);
    }

    #[test]
    fn test_show_requires_id() {
        assert!(Cli::try_parse_from(["examforge", "show", "--user", "7"]).is_err());
        let cli = Cli::try_parse_from(["examforge", "show", "--user", "7", "12"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Show(QuestionRefArgs { user: 7, id: 12 })
        ));
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

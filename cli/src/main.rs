//! CLI entrypoint for examforge
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use examforge_application::{
    ConfirmQuestionsError, ConfirmQuestionsInput, ConfirmQuestionsUseCase, GatewayError,
    GenerateQuestionsError, GenerateQuestionsInput, GenerateQuestionsUseCase, GenerationProgress,
    ManageQuestionsError, ManageQuestionsUseCase, NoProgress, StoreError, UserLocks,
};
use examforge_domain::{DomainError, ErrorKind, QuestionFilter, QuestionId, QuestionKind, UserId};
use examforge_infrastructure::{
    ChatCompletionGateway, ConfigError, ConfigLoader, FileConfig, SqliteQuestionStore,
};
use examforge_presentation::{
    Cli, Command, ConfirmArgs, GenerateArgs, ListArgs, OutputFormatter, ProgressReporter,
    QuestionRefArgs, formatter_for,
};
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref());

    info!("Starting examforge");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = error_kind(&err);
            error!("Command failed ({}): {:#}", kind.map_or("internal", |k| k.as_str()), err);
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(kind))
        }
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "examforge.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    guard
}

async fn run(cli: Cli) -> Result<()> {
    if let Command::Config = cli.command {
        return show_config(&cli);
    }

    let config = load_config(&cli)?;
    let formatter = formatter_for(cli.output);

    // === Dependency Injection ===
    let store = Arc::new(
        SqliteQuestionStore::connect(&config.database.url)
            .await
            .with_context(|| format!("failed to open database {}", config.database.url))?,
    );
    let locks = Arc::new(UserLocks::new());

    match cli.command {
        Command::Generate(args) => {
            let gateway = Arc::new(ChatCompletionGateway::new(
                config.chat_settings(),
                config.retry_policy(),
            )?);
            let use_case =
                GenerateQuestionsUseCase::new(gateway, store, config.model_profiles())
                    .with_user_locks(locks);
            generate(&use_case, args, cli.quiet, formatter.as_ref()).await
        }
        Command::Confirm(args) => {
            let use_case = ConfirmQuestionsUseCase::new(store).with_user_locks(locks);
            confirm(&use_case, args, formatter.as_ref()).await
        }
        Command::List(args) => {
            list(&ManageQuestionsUseCase::new(store), args, formatter.as_ref()).await
        }
        Command::Show(args) => {
            show(&ManageQuestionsUseCase::new(store), args, formatter.as_ref()).await
        }
        Command::Delete(args) => {
            delete(&ManageQuestionsUseCase::new(store), args, formatter.as_ref()).await
        }
        Command::Config => Ok(()),
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig, ConfigError> {
    if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
    }
}

fn show_config(cli: &Cli) -> Result<()> {
    ConfigLoader::print_config_sources(cli.config.as_ref());
    let config = load_config(cli)?;

    println!();
    println!("Database: {}", config.database.url);
    println!("Gateway:  {:?}", config.gateway);
    println!("DeepSeek: {:?}", config.providers.deepseek);
    println!("Tongyi:   {:?}", config.providers.tongyi);

    let usable: Vec<String> = config
        .model_profiles()
        .configured_models()
        .iter()
        .map(|m| m.to_string())
        .collect();
    if usable.is_empty() {
        println!("Usable models: none (set DEEPSEEK_API_KEY or TONGYI_API_KEY)");
    } else {
        println!("Usable models: {}", usable.join(", "));
    }
    Ok(())
}

async fn generate(
    use_case: &GenerateQuestionsUseCase<ChatCompletionGateway, SqliteQuestionStore>,
    args: GenerateArgs,
    quiet: bool,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let input = GenerateQuestionsInput::new(
        UserId(args.user),
        args.model,
        args.language,
        args.kind,
        args.keywords,
        args.count,
    );

    let progress: Box<dyn GenerationProgress> = if quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };
    let questions = use_case
        .execute_with_progress(input, progress.as_ref())
        .await?;

    print!("{}", formatter.generated(&questions));
    Ok(())
}

async fn confirm(
    use_case: &ConfirmQuestionsUseCase<SqliteQuestionStore>,
    args: ConfirmArgs,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let input = ConfirmQuestionsInput::new(
        UserId(args.user),
        args.select.into_iter().map(QuestionId),
    );
    let output = use_case.execute(input).await?;

    print!("{}", formatter.confirmation(&output));
    Ok(())
}

async fn list(
    use_case: &ManageQuestionsUseCase<SqliteQuestionStore>,
    args: ListArgs,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let kind = args
        .kind
        .as_deref()
        .map(str::parse::<QuestionKind>)
        .transpose()?;
    let filter = QuestionFilter {
        language: args.language,
        kind,
        title_keyword: args.keyword,
    };
    let questions = use_case.list(UserId(args.user), &filter).await?;

    print!("{}", formatter.question_list(&questions));
    Ok(())
}

async fn show(
    use_case: &ManageQuestionsUseCase<SqliteQuestionStore>,
    args: QuestionRefArgs,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let question = use_case
        .get(UserId(args.user), QuestionId(args.id))
        .await?;

    print!("{}", formatter.question(&question));
    Ok(())
}

async fn delete(
    use_case: &ManageQuestionsUseCase<SqliteQuestionStore>,
    args: QuestionRefArgs,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let id = QuestionId(args.id);
    use_case.delete(UserId(args.user), id).await?;

    print!("{}", formatter.deleted(id));
    Ok(())
}

/// Classify a top-level error, if it came from a known layer
fn error_kind(err: &anyhow::Error) -> Option<ErrorKind> {
    if let Some(e) = err.downcast_ref::<GenerateQuestionsError>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<ConfirmQuestionsError>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<ManageQuestionsError>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<DomainError>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<GatewayError>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return Some(e.kind());
    }
    if let Some(e) = err.downcast_ref::<StoreError>() {
        return Some(e.kind());
    }
    None
}

fn exit_code(kind: Option<ErrorKind>) -> u8 {
    match kind {
        None => 1,
        Some(ErrorKind::InvalidInput) => 2,
        Some(ErrorKind::UnknownModel) => 3,
        Some(ErrorKind::TransportError) => 4,
        Some(ErrorKind::ProviderError) => 5,
        Some(ErrorKind::ParseError) => 6,
        Some(ErrorKind::EmptyResult) => 7,
        Some(ErrorKind::StoreError) => 8,
        Some(ErrorKind::PermissionDenied) => 9,
        Some(ErrorKind::NotFound) => 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let kinds = [
            ErrorKind::InvalidInput,
            ErrorKind::UnknownModel,
            ErrorKind::TransportError,
            ErrorKind::ProviderError,
            ErrorKind::ParseError,
            ErrorKind::EmptyResult,
            ErrorKind::StoreError,
            ErrorKind::PermissionDenied,
            ErrorKind::NotFound,
        ];
        let mut codes: Vec<u8> = kinds.iter().map(|k| exit_code(Some(*k))).collect();
        codes.push(exit_code(None));
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len() + 1);
    }

    #[test]
    fn test_error_kind_survives_context() {
        let err = anyhow::Error::new(ManageQuestionsError::PermissionDenied(QuestionId(5)))
            .context("deleting question");
        assert_eq!(error_kind(&err), Some(ErrorKind::PermissionDenied));

        let err = anyhow::Error::new(DomainError::InvalidQuestionType("essay".into()));
        assert_eq!(error_kind(&err), Some(ErrorKind::InvalidInput));

        assert_eq!(error_kind(&anyhow::anyhow!("boom")), None);
    }
}

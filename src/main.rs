use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use gpu_profit_matrix::app::{self, AppError, Command, Context};
use gpu_profit_matrix::config::{self, DEFAULT_CONFIG_PATH};
use gpu_profit_matrix::i18n::{self, keys, Translator};

#[derive(Parser)]
#[command(name = "gpu_profit_matrix")]
#[command(about = "GPU batch cash-flow projection matrix")]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 출력 언어(auto, ko, en)
    #[arg(long, default_value = "auto")]
    lang: String,

    /// 디버그 로그 출력
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령을 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let fallback = Translator::new(&i18n::resolve_language(&cli.lang, None));
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err}", fallback.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let config_created = !cli.config.exists();
    let cfg = config::load_or_default(&cli.config)?;
    let lang = i18n::resolve_language(&cli.lang, Some(&cfg.language));
    let ctx = Context {
        config_path: cli.config,
        config: cfg,
        config_created,
        tr: Translator::new(&lang),
    };
    app::run(&ctx, cli.command)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

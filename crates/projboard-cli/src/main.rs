use projboard_core::app::{AppBuilder, BuildError};
use projboard_core::settings::BoardSettings;
use projboard_core::trace_init;
use tokio::io::{AsyncBufReadExt, BufReader};

mod command;

use command::{Command, HELP, Reply, execute};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("config: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

/// `Projboard.toml`（任意）→ `PROJBOARD_*` 環境変数の順に上書き
fn load_settings() -> Result<BoardSettings, CliError> {
    read_settings(config::File::with_name("Projboard").required(false), None)
}

/// `env` が `Some` ならプロセスの環境変数の代わりに使う
fn read_settings<F>(
    file: F,
    env: Option<config::Map<String, String>>,
) -> Result<BoardSettings, CliError>
where
    F: config::Source + Send + Sync + 'static,
{
    let settings = config::Config::builder()
        .add_source(file)
        .add_source(
            config::Environment::with_prefix("PROJBOARD")
                .try_parsing(true)
                .source(env),
        )
        .build()?
        .try_deserialize::<BoardSettings>()?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // (A) 設定とログ
    let settings = load_settings()?;
    trace_init(&settings.log_level);
    tracing::debug!(?settings, "settings loaded");

    // (B) store を作って view を mount
    let mut app = AppBuilder::new().settings(settings).build()?;

    // (C) 1 行ずつコマンドを実行
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match execute(&mut app, command)? {
            Reply::Output(out) if out.is_empty() => {}
            Reply::Output(out) => println!("{out}"),
            Reply::Quit => break,
        }
    }

    // (D) 終了時の件数
    tracing::info!(counts = ?app.store().snapshot().counts(), "board closed");
    Ok(())
}

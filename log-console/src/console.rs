//! 交互式控制台
//!
//! 逐行读取命令并输出文本结果,相当于浏览器页面的终端版本。
//! 界面中的编号从1开始,内部操作使用从0开始的位置。

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::commands::{compose_commands, log_commands, view_commands};
use crate::state::AppState;

pub const HELP: &str = "\
Commands:
  refresh                      fetch logs from the backend
  generate                     ask the backend to generate sample logs
  filter <all|info|warn|error|debug>
  expand <n>                   show/hide the fields of log n
  show                         print the log list
  status                       backend health check
  compose                      open/close the custom log form
  message <text>               set the custom log message
  level <info|warn|error|debug>
  field add                    append an empty field
  field set <n> <key> <value>  edit field n
  field rm <n>                 remove field n
  submit                       send the custom log
  help | quit";

/// 单条命令的执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

pub struct Console {
    state: Arc<AppState>,
}

impl Console {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// 会话开始时拉取一次日志
    pub async fn start(&self) -> String {
        let _ = log_commands::fetch_logs(&self.state).await;
        view_commands::render_logs(&self.state).await
    }

    /// 执行一行命令
    pub async fn execute(&self, line: &str) -> Reply {
        let (command, rest) = next_token(line);

        let state = self.state.as_ref();
        let result: Result<String, String> = match command {
            "" => Ok(String::new()),
            "help" | "?" => Ok(HELP.to_string()),
            "quit" | "exit" => {
                return Reply {
                    output: String::new(),
                    quit: true,
                }
            }
            "refresh" => self.after(log_commands::fetch_logs(state).await).await,
            "generate" => self.after(log_commands::generate_logs(state).await).await,
            "show" => Ok(view_commands::render_logs(state).await),
            "filter" => match view_commands::set_filter(state, rest).await {
                Ok(_) => Ok(view_commands::render_logs(state).await),
                Err(e) => Err(e),
            },
            "expand" => match parse_number(rest) {
                Ok(n) => {
                    view_commands::toggle_expand(state, n).await;
                    Ok(view_commands::render_logs(state).await)
                }
                Err(e) => Err(e),
            },
            "status" => match log_commands::server_status(state).await {
                Ok(status) => {
                    let mut lines = vec![format!("Server: {}", status.message)];
                    if let Some(version) = status.version {
                        lines.push(format!("Version: {}", version));
                    }
                    if let Some(time) = status.time {
                        lines.push(format!("Time: {}", time));
                    }
                    lines.push(format!(
                        "Counts: {}",
                        view_commands::level_summary(state).await
                    ));
                    Ok(lines.join("\n"))
                }
                Err(e) => Err(e),
            },
            "compose" => {
                compose_commands::toggle_compose_form(state).await;
                Ok(compose_commands::render_form(state).await)
            }
            "message" => self
                .form(compose_commands::set_compose_message(state, rest).await)
                .await,
            "level" => self
                .form(compose_commands::set_compose_level(state, rest).await)
                .await,
            "field" => self.field(rest).await,
            "submit" => match compose_commands::submit_custom_log(state).await {
                Ok(()) => Ok(format!(
                    "Log sent.\n{}",
                    view_commands::render_logs(state).await
                )),
                Err(e) => Err(e),
            },
            other => Err(format!("Unknown command: {} (type `help`)", other)),
        };

        match result {
            Ok(output) => Reply::text(output),
            Err(error) => {
                tracing::debug!(command, error = %error, "Console command failed");
                Reply::text(format!("Error: {}", error))
            }
        }
    }

    async fn field(&self, args: &str) -> Result<String, String> {
        let state = self.state.as_ref();
        let (action, rest) = next_token(args);
        match action {
            "add" => self.form(compose_commands::add_field(state).await).await,
            "set" => {
                let (position, rest) = next_token(rest);
                let position = parse_number(position)?;
                let (key, value) = next_token(rest);
                if !compose_commands::update_field(state, position, key, value).await? {
                    return Err(format!("No field #{}", position + 1));
                }
                Ok(compose_commands::render_form(state).await)
            }
            "rm" => {
                let position = parse_number(next_token(rest).0)?;
                if !compose_commands::remove_field(state, position).await? {
                    return Err(format!("No field #{}", position + 1));
                }
                Ok(compose_commands::render_form(state).await)
            }
            other => Err(format!("Unknown field command: {}", other)),
        }
    }

    async fn after(&self, result: Result<usize, String>) -> Result<String, String> {
        result?;
        Ok(view_commands::render_logs(&self.state).await)
    }

    async fn form<T>(&self, result: Result<T, String>) -> Result<String, String> {
        result?;
        Ok(compose_commands::render_form(&self.state).await)
    }

    /// 读取命令直到输入结束或 `quit`
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let banner = self.start().await;
        writer.write_all(banner.as_bytes()).await?;
        writer.write_all(b"Type `help` for commands.\n> ").await?;
        writer.flush().await?;

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            let reply = self.execute(&line).await;
            if reply.quit {
                break;
            }
            if !reply.output.is_empty() {
                writer.write_all(reply.output.as_bytes()).await?;
                if !reply.output.ends_with('\n') {
                    writer.write_all(b"\n").await?;
                }
            }
            writer.write_all(b"> ").await?;
            writer.flush().await?;
        }
        Ok(())
    }
}

/// 取出第一个词,返回该词与去掉首尾空白的剩余部分
///
/// 连续空白视为一个分隔符; 剩余部分内部的空白原样保留。
fn next_token(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], input[end..].trim()),
        None => (input, ""),
    }
}

/// 解析从1开始的编号,返回从0开始的位置
fn parse_number(raw: &str) -> Result<usize, String> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Expected a number starting at 1, got `{}`", raw.trim())),
    }
}

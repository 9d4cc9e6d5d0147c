use anyhow::{Context, Result};
use clap::Parser;
use product_catalog::app::catalog::orchestrator::DELETE_PROMPT;
use product_catalog::app::catalog::{ActionBinding, Orchestrator, UiEvent};
use product_catalog::config::load_config;
use product_catalog::infrastructure::api_client::{HttpProductApi, ProductApi};
use product_catalog::infrastructure::cache::{FileStore, KeyValueStore, LocalCache};
use product_catalog::infrastructure::logger::Logger;
use product_catalog::NoticeBoard;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// 商品目录编辑器（终端版）
#[derive(Debug, Parser)]
#[command(name = "catalog", version, about)]
struct Args {
    /// 配置文件路径
    #[arg(long)]
    config: Option<PathBuf>,
    /// 覆盖配置中的商品 API 地址
    #[arg(long)]
    base_url: Option<String>,
    /// 覆盖配置中的缓存目录
    #[arg(long)]
    cache_dir: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Name(String),
    Price(String),
    Desc(String),
    Submit,
    Edit(usize),
    Delete(usize),
    Cancel,
    Reload,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let row = |rest: &str| -> Result<usize, String> {
        match rest.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("无效的行号: {:?}", rest)),
        }
    };

    match word {
        "name" => Ok(Command::Name(rest.to_string())),
        "price" => Ok(Command::Price(rest.to_string())),
        "desc" => Ok(Command::Desc(rest.to_string())),
        "submit" => Ok(Command::Submit),
        "edit" => row(rest).map(Command::Edit),
        "delete" => row(rest).map(Command::Delete),
        "cancel" => Ok(Command::Cancel),
        "reload" => Ok(Command::Reload),
        "show" | "" => Ok(Command::Show),
        "help" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(format!("未知命令: {}", other)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }
    if let Some(dir) = args.cache_dir {
        config.cache.dir = dir;
    }
    config.validate()?;

    // 初始化日志
    Logger::init(&config.logging.level);
    info!("商品目录编辑器启动，API: {}", config.api.base_url);

    let api = HttpProductApi::new(&config.api.base_url).context("创建 API 客户端失败")?;
    let cache = LocalCache::with_key(FileStore::new(&config.cache.dir), config.cache.key.clone());
    let notices = NoticeBoard::new(config.notice.clear_after());
    let mut orchestrator = Orchestrator::new(api, cache, notices);

    orchestrator.handle(UiEvent::Ready, &mut |_: &str| false).await;
    print_view(&orchestrator);
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::Name(value) => orchestrator.form_mut().set_name(value),
            Command::Price(value) => orchestrator.form_mut().set_price(value),
            Command::Desc(value) => orchestrator.form_mut().set_description(value),
            Command::Submit => {
                orchestrator.handle(UiEvent::Submit, &mut |_: &str| false).await;
                print_view(&orchestrator);
            }
            Command::Edit(n) => match row_binding(&orchestrator, n, |row| row.edit) {
                Some(binding) => {
                    orchestrator
                        .handle(UiEvent::Action(binding), &mut |_: &str| false)
                        .await;
                    print_form(&orchestrator);
                }
                None => println!("没有第 {} 行", n),
            },
            Command::Delete(n) => match row_binding(&orchestrator, n, |row| row.delete) {
                Some(binding) => {
                    print!("{} [y/N] ", DELETE_PROMPT);
                    std::io::stdout().flush()?;
                    let answer = lines.next_line().await?.unwrap_or_default();
                    let accepted = matches!(answer.trim(), "y" | "Y" | "yes");
                    orchestrator
                        .handle(UiEvent::Action(binding), &mut |_: &str| accepted)
                        .await;
                    print_view(&orchestrator);
                }
                None => println!("没有第 {} 行", n),
            },
            Command::Cancel => {
                orchestrator.handle(UiEvent::Cancel, &mut |_: &str| false).await;
                print_form(&orchestrator);
            }
            Command::Reload => {
                orchestrator.handle(UiEvent::Ready, &mut |_: &str| false).await;
                print_view(&orchestrator);
            }
            Command::Show => print_view(&orchestrator),
            Command::Help => print_help(),
            Command::Quit => break,
        }
    }

    info!("商品目录编辑器退出");
    Ok(())
}

fn row_binding<A, S>(
    orchestrator: &Orchestrator<A, S>,
    n: usize,
    pick: impl Fn(&product_catalog::app::catalog::RenderedRow) -> ActionBinding,
) -> Option<ActionBinding>
where
    A: ProductApi,
    S: KeyValueStore,
{
    orchestrator.renderer().rows().get(n - 1).map(pick)
}

fn print_view<A: ProductApi, S: KeyValueStore>(orchestrator: &Orchestrator<A, S>) {
    println!("{}", orchestrator.renderer());
    print_form(orchestrator);
}

fn print_form<A: ProductApi, S: KeyValueStore>(orchestrator: &Orchestrator<A, S>) {
    let form = orchestrator.form();
    println!("----------------------------------------");
    println!("名称: {}", form.name());
    println!("价格: {}", form.price());
    println!("描述: {}", form.description());
    match form.cancel_control() {
        Some(cancel) => println!("[{}] [{}]", form.submit_control().label, cancel),
        None => println!("[{}]", form.submit_control().label),
    }
    if let Some(notice) = orchestrator.notices().current() {
        println!("{}", notice);
    }
}

fn print_help() {
    println!("命令:");
    println!("  name <文本>    设置商品名称");
    println!("  price <文本>   设置价格");
    println!("  desc <文本>    设置描述");
    println!("  submit         添加商品，编辑模式下更新商品");
    println!("  edit <行号>    编辑该行商品");
    println!("  delete <行号>  删除该行商品");
    println!("  cancel         取消编辑");
    println!("  reload         重新加载目录");
    println!("  show           显示目录和表单");
    println!("  quit           退出");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_commands_keep_inner_spaces() {
        assert_eq!(
            parse_command("desc  Bolígrafo azul  "),
            Ok(Command::Desc("Bolígrafo azul".to_string()))
        );
        assert_eq!(parse_command("name"), Ok(Command::Name(String::new())));
    }

    #[test]
    fn test_parse_row_commands() {
        assert_eq!(parse_command("edit 2"), Ok(Command::Edit(2)));
        assert_eq!(parse_command("delete 1"), Ok(Command::Delete(1)));
        assert!(parse_command("delete 0").is_err());
        assert!(parse_command("edit x").is_err());
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(parse_command(""), Ok(Command::Show));
        assert_eq!(parse_command("exit"), Ok(Command::Quit));
        assert!(parse_command("launch").is_err());
    }
}

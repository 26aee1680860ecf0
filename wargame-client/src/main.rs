extern crate wargame;

use async_std::io::{self, BufReader};
use async_std::prelude::*;
use clap::Parser;
use log::info;
use wargame::*;
use crate::ui::GameUi;

pub mod ui;

/// 控制台版比大小（War）
#[derive(Parser, Debug)]
#[command(version, about)]
struct Config {
    /// 牌堆服务地址，必须以 / 结尾
    #[arg(long, env = "WARGAME_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// 每局使用几副牌
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..=MAX_DECKS as i64))]
    decks: u32,
}

fn print_ui<T: Transport, F: Fn() -> DeckClient<T>>(ui: &GameUi<T, F>) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    ui.render(&mut out)?;
    Ok(())
}

#[async_std::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    info!("Using deck service at {}", config.base_url);

    let rules = CardGameRules::with_decks(config.decks)
        .ok_or_else(|| anyhow::anyhow!("invalid deck count {}", config.decks))?;
    let base_url = config.base_url.clone();
    let mut ui = GameUi::new(
        move || DeckClient::with_base_url(base_url.clone()),
        rules,
    );

    print_ui(&ui)?;
    let mut lines = BufReader::new(io::stdin()).lines();
    while let Some(line) = lines.next().await {
        let line = line?;
        match line.trim() {
            "" => continue,
            "exit" => break,
            "start" | "开始游戏" => ui.start_new_game().await,
            "draw" | "出牌" => ui.draw_cards().await,
            _ => println!("未知指令"),
        }
        print_ui(&ui)?;
    }
    Ok(())
}

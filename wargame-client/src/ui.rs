use std::io::{self, Write};
use log::{error, info};
use wargame::*;

/// 可以显示/隐藏的控件
pub trait Displayable {
    fn show(&mut self);
    fn hide(&mut self);
    fn is_visible(&self) -> bool;
}

/// 可以启用/禁用的控件
pub trait Toggleable {
    fn enable(&mut self);
    fn disable(&mut self);
    fn is_enabled(&self) -> bool;
}

pub struct Button {
    pub label: String,
    visible: bool,
    enabled: bool,
}

impl Button {
    pub fn new(label: &str) -> Button {
        Button {
            label: label.to_string(),
            visible: true,
            enabled: true,
        }
    }
}

impl Displayable for Button {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

impl Toggleable for Button {
    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// 显示一张牌
#[derive(Default)]
pub struct CardFace {
    pub card: Option<Card>,
    visible: bool,
}

impl CardFace {
    pub fn show_card(&mut self, card: &Card) {
        self.card = Some(card.clone());
        self.show();
    }
}

impl Displayable for CardFace {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Default)]
pub struct Heading {
    pub text: String,
    visible: bool,
}

impl Heading {
    pub fn show_text(&mut self, text: &str) {
        self.text = text.to_string();
        self.show();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.hide();
    }
}

impl Displayable for Heading {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// 控制台界面
/// 生命周期：整个进程
pub struct GameUi<T: Transport, F: Fn() -> DeckClient<T>> {
    /// 每局开始时新建一个客户端
    new_client: F,
    rules: CardGameRules,

    pub game: Option<CardGame<T>>,

    pub start_game_button: Button,
    pub draw_cards_button: Button,
    pub human_card_face: CardFace,
    pub computer_card_face: CardFace,
    pub result_heading: Heading,
}

impl<T: Transport, F: Fn() -> DeckClient<T>> GameUi<T, F> {
    pub fn new(new_client: F, rules: CardGameRules) -> GameUi<T, F> {
        let mut ui = GameUi {
            new_client,
            rules,
            game: None,
            start_game_button: Button::new("start"),
            draw_cards_button: Button::new("draw"),
            human_card_face: CardFace::default(),
            computer_card_face: CardFace::default(),
            result_heading: Heading::default(),
        };
        ui.clear_game_state();
        ui
    }

    pub fn clear_game_state(&mut self) {
        self.game = None;
        self.start_game_button.show();
        self.draw_cards_button.hide();
        self.draw_cards_button.enable();
        self.human_card_face.hide();
        self.computer_card_face.hide();
        self.result_heading.hide();
    }

    pub async fn start_new_game(&mut self) {
        if !self.start_game_button.is_visible() {
            return;
        }
        info!("Starting a new round...");
        self.start_game_button.hide();

        match CardGame::create_new((self.new_client)(), self.rules).await {
            Ok(game) => {
                self.game = Some(game);
                self.draw_cards_button.show();
            }
            Err(err) => {
                error!("Unable to start a new round: {}", err);
                self.clear_game_state();
            }
        }
    }

    pub async fn draw_cards(&mut self) {
        if !self.draw_cards_button.is_visible() || !self.draw_cards_button.is_enabled() {
            return;
        }
        let game = match self.game.as_mut() {
            Some(game) => game,
            None => return,
        };

        self.draw_cards_button.disable();
        self.result_heading.clear();

        match game.draw_round().await {
            Ok(round) => {
                self.human_card_face.show_card(&round.human_card);
                self.computer_card_face.show_card(&round.computer_card);
                self.result_heading.show_text(&round.outcome.to_string());
                self.draw_cards_button.enable();
            }
            Err(err) => {
                error!("Unable to draw cards: {}", err);
                self.clear_game_state();
            }
        }
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.human_card_face.is_visible() {
            if let Some(card) = &self.human_card_face.card {
                writeln!(out, "你的牌：{} {}", card, card.image_url)?;
            }
        }
        if self.computer_card_face.is_visible() {
            if let Some(card) = &self.computer_card_face.card {
                writeln!(out, "电脑的牌：{} {}", card, card.image_url)?;
            }
        }
        if self.result_heading.is_visible() {
            writeln!(out, "{}", self.result_heading.text)?;
        }
        if let Some(game) = &self.game {
            writeln!(
                out,
                "剩余：你 {} 张，电脑 {} 张",
                game.human_pile.remaining, game.computer_pile.remaining
            )?;
        }

        let mut commands = vec![];
        if self.start_game_button.is_visible() {
            commands.push(self.start_game_button.label.as_str());
        }
        if self.draw_cards_button.is_visible() && self.draw_cards_button.is_enabled() {
            commands.push(self.draw_cards_button.label.as_str());
        }
        commands.push("exit");
        writeln!(out, "可用命令：{}", commands.join(", "))
    }
}

use std::fmt::{Display, Formatter};
use log::{debug, info};
use crate::api::Transport;
use crate::card::Card;
use crate::deck::{Deck, DeckClient, Pile};
use crate::error::DeckError;
use crate::rule::*;

/// 一次比牌的结果
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    HumanWins,
    ComputerWins,

    /// 点数相同，需要加赛，目前不自动处理
    War,
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Outcome::HumanWins => write!(f, "Human wins!"),
            Outcome::ComputerWins => write!(f, "Computer wins!"),
            Outcome::War => write!(f, "WAR!"),
        }
    }
}

pub fn evaluate_cards(human: &Card, computer: &Card) -> Outcome {
    if human.beats(computer) {
        Outcome::HumanWins
    } else if computer.beats(human) {
        Outcome::ComputerWins
    } else {
        // TODO 加赛（三张暗牌后再比一次）
        Outcome::War
    }
}

/// 每次抽牌双方各出的一张牌
#[derive(Clone, Debug)]
pub struct RoundResult {
    pub human_card: Card,
    pub computer_card: Card,
    pub outcome: Outcome,
}

/// 按下标奇偶分成两份：偶数下标给第一份，奇数下标给第二份
pub fn split_alternating(cards: Vec<Card>) -> (Vec<Card>, Vec<Card>) {
    let mut even = Vec::with_capacity(cards.len() / 2 + 1);
    let mut odd = Vec::with_capacity(cards.len() / 2);
    for (i, card) in cards.into_iter().enumerate() {
        if i % 2 == 0 {
            even.push(card);
        } else {
            odd.push(card);
        }
    }
    (even, odd)
}

/// 一局游戏：一副牌加上人类、电脑两个牌堆
/// 生命周期：开始新一局时整体替换
pub struct CardGame<T: Transport> {
    client: DeckClient<T>,

    pub deck: Deck,

    pub human_pile: Pile,

    pub computer_pile: Pile,
}

impl<T: Transport> CardGame<T> {
    /// 洗牌、抽牌、分成两堆，任何一步失败都放弃这一局
    pub async fn create_new(client: DeckClient<T>, rules: CardGameRules) -> Result<CardGame<T>, DeckError> {
        let deck = client.create_shuffled_deck(rules.decks).await?;
        let (human_pile, computer_pile) = Self::draw_cards_and_split_into_piles(&client, &deck, rules).await?;
        info!(
            "New game on deck {}: {} vs {} cards",
            deck.id, human_pile.remaining, computer_pile.remaining
        );

        Ok(CardGame {
            client,
            deck,
            human_pile,
            computer_pile,
        })
    }

    async fn draw_cards_and_split_into_piles(
        client: &DeckClient<T>,
        deck: &Deck,
        rules: CardGameRules,
    ) -> Result<(Pile, Pile), DeckError> {
        let cards = deck.draw(client, rules.cards_per_draw).await?;
        let (human_cards, computer_cards) = split_alternating(cards);

        let human_pile = deck.create_pile(client, HUMAN_PILE, &human_cards).await?;
        let computer_pile = deck.create_pile(client, COMPUTER_PILE, &computer_cards).await?;
        Ok((human_pile, computer_pile))
    }

    /// 双方各抽一张并比大小
    pub async fn draw_round(&mut self) -> Result<RoundResult, DeckError> {
        let human_card = self.human_pile.draw_one(&self.client).await?;
        let computer_card = self.computer_pile.draw_one(&self.client).await?;
        let outcome = evaluate_cards(&human_card, &computer_card);
        debug!("{} vs {}: {}", human_card, computer_card, outcome);

        Ok(RoundResult {
            human_card,
            computer_card,
            outcome,
        })
    }

    pub fn client(&self) -> &DeckClient<T> {
        &self.client
    }
}

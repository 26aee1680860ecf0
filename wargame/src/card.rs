use std::cmp::Ordering;
use std::fmt::{Display, Formatter};
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};
use crate::deck::DeckId;
use crate::error::CardError;

/// 牌的点数，数值即比较大小用的整数
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Hash, FromPrimitive)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn value(&self) -> u32 {
        *self as u32
    }

    pub fn from_value(i: u32) -> Option<Rank> {
        Rank::from_u32(i)
    }
}

/// 把服务返回的 value 字段转换成点数。
/// "2".."10" 返回本身，JACK/QUEEN/KING/ACE 为 11..14，其余一律报错。
pub fn numeric_value_of(value: &str) -> Result<Rank, CardError> {
    if let Ok(n) = value.parse::<u32>() {
        return match Rank::from_value(n) {
            Some(rank) if rank <= Rank::Ten => Ok(rank),
            _ => Err(CardError::UnknownValue(value.to_string())),
        };
    }

    match value {
        "JACK" => Ok(Rank::Jack),
        "QUEEN" => Ok(Rank::Queen),
        "KING" => Ok(Rank::King),
        "ACE" => Ok(Rank::Ace),
        _ => Err(CardError::UnknownValue(value.to_string())),
    }
}

#[derive(Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub fn from_name(name: &str) -> Result<Suit, CardError> {
        match name {
            "SPADES" => Ok(Suit::Spades),
            "HEARTS" => Ok(Suit::Hearts),
            "DIAMONDS" => Ok(Suit::Diamonds),
            "CLUBS" => Ok(Suit::Clubs),
            _ => Err(CardError::UnknownSuit(name.to_string())),
        }
    }
}

/// 服务返回的单张牌
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct CardJson {
    pub code: String,
    pub image: String,
    pub value: String,
    pub suit: String,
}

/// 一张牌，构造后不可变
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Card {
    /// 所属牌组
    pub deck: DeckId,

    /// 例如 "AS"、"0H"
    pub code: String,

    pub image_url: String,

    /// 牌面，例如 "KING"、"5"
    pub value: String,

    pub suit: Suit,

    rank: Rank,
}

impl Card {
    pub fn new(deck: DeckId, code: String, image_url: String, value: String, suit: Suit) -> Result<Card, CardError> {
        let rank = numeric_value_of(&value)?;
        Ok(Card {
            deck,
            code,
            image_url,
            value,
            suit,
            rank,
        })
    }

    pub fn from_json(json: CardJson, deck: &DeckId) -> Result<Card, CardError> {
        let suit = Suit::from_name(&json.suit)?;
        Card::new(deck.clone(), json.code, json.image, json.value, suit)
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn numeric_value(&self) -> u32 {
        self.rank.value()
    }

    pub fn compare_rank(&self, other: &Card) -> Ordering {
        self.rank.cmp(&other.rank)
    }

    /// 点数严格大于对方才算赢，相等不算
    pub fn beats(&self, other: &Card) -> bool {
        beats(self, other)
    }
}

pub fn beats(a: &Card, b: &Card) -> bool {
    a.rank > b.rank
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code)
    }
}

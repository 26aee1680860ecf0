/// 一副标准牌的张数
pub const CARDS_PER_DECK: u32 = 52;

/// 开局要把所有牌一次抽完，张数不能超过 u32
pub const MAX_DECKS: u32 = u32::MAX / CARDS_PER_DECK;

pub const HUMAN_PILE: &str = "human";
pub const COMPUTER_PILE: &str = "computer";

/// 游戏规则：用几副牌，开局抽多少张
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CardGameRules {
    pub decks: u32,
    pub cards_per_draw: u32,
}

impl CardGameRules {
    /// 把 decks 副牌全部抽出来，decks 为 0 或张数溢出时返回 None
    pub fn with_decks(decks: u32) -> Option<CardGameRules> {
        if decks == 0 {
            return None;
        }
        let cards_per_draw = decks.checked_mul(CARDS_PER_DECK)?;
        Some(CardGameRules {
            decks,
            cards_per_draw,
        })
    }
}

impl Default for CardGameRules {
    fn default() -> Self {
        CardGameRules {
            decks: 1,
            cards_per_draw: CARDS_PER_DECK,
        }
    }
}

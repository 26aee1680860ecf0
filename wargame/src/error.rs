use crate::deck::DeckId;

/// 牌面解析错误
#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum CardError {
    /// 既不是 2-10 的数字，也不是 JACK/QUEEN/KING/ACE
    #[error("unknown card value {0:?}")]
    UnknownValue(String),

    #[error("unknown card suit {0:?}")]
    UnknownSuit(String),
}

/// 牌堆服务相关错误
#[derive(Debug, thiserror::Error)]
pub enum DeckError {
    /// 网络请求失败
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// 返回的 JSON 缺少需要的字段
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// 服务端返回 success: false
    #[error("deck service error: {0}")]
    Service(String),

    #[error("pile {0} missing from response")]
    MissingPile(String),

    /// 牌堆已经抽空
    #[error("pile {0} returned no card")]
    EmptyPile(String),

    #[error("cannot create a pile from an empty card list")]
    NoCards,

    /// 建堆的牌来自不同的牌组
    #[error("cards belong to different decks: {expected} and {found}")]
    MixedDecks { expected: DeckId, found: DeckId },

    #[error("count must be positive")]
    InvalidCount,

    #[error(transparent)]
    Card(#[from] CardError),
}

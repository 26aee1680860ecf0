use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::api::{ApiClient, SurfTransport, Transport};
use crate::card::{Card, CardJson};
use crate::error::DeckError;

pub const DEFAULT_BASE_URL: &str = "https://deckofcardsapi.com/api/";

/// 服务端签发的牌组 ID
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, Hash)]
pub struct DeckId(pub String);

impl From<&str> for DeckId {
    fn from(id: &str) -> Self {
        DeckId(id.to_string())
    }
}

impl Display for DeckId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 服务端洗好的一副（或几副合并的）牌
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Deck {
    pub id: DeckId,
}

impl Deck {
    pub async fn draw<T: Transport>(&self, client: &DeckClient<T>, count: u32) -> Result<Vec<Card>, DeckError> {
        client.draw_from_deck(self, count).await
    }

    pub async fn create_pile<T: Transport>(&self, client: &DeckClient<T>, name: &str, cards: &[Card]) -> Result<Pile, DeckError> {
        client.create_pile_from_cards(name, cards).await
    }
}

/// 服务端维护的具名牌堆
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pile {
    pub name: String,
    pub deck: DeckId,

    /// 最后一次得知的剩余张数，仅作缓存
    pub remaining: u32,
}

impl Pile {
    /// 从牌堆顶抽一张，牌堆为空时报错
    pub async fn draw_one<T: Transport>(&mut self, client: &DeckClient<T>) -> Result<Card, DeckError> {
        client
            .draw_from_pile(self, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DeckError::EmptyPile(self.name.clone()))
    }
}

#[derive(Deserialize)]
struct Status {
    #[serde(default = "default_success")]
    success: bool,
    error: Option<String>,
}

fn default_success() -> bool {
    true
}

#[derive(Deserialize)]
struct NewDeckResponse {
    deck_id: String,
}

#[derive(Deserialize)]
struct DrawResponse {
    cards: Vec<CardJson>,
}

#[derive(Deserialize)]
struct PileStatus {
    remaining: u32,
}

#[derive(Deserialize)]
struct PilesResponse {
    piles: HashMap<String, PileStatus>,
}

/// 牌堆服务客户端，只负责把领域操作翻译成请求，不关心具体玩法
pub struct DeckClient<T: Transport> {
    api: ApiClient<T>,
}

impl DeckClient<SurfTransport> {
    pub fn with_base_url(base_url: impl Into<String>) -> DeckClient<SurfTransport> {
        DeckClient::new(ApiClient::new(base_url, SurfTransport::new()))
    }
}

impl Default for DeckClient<SurfTransport> {
    fn default() -> Self {
        DeckClient::with_base_url(DEFAULT_BASE_URL)
    }
}

impl<T: Transport> DeckClient<T> {
    pub fn new(api: ApiClient<T>) -> DeckClient<T> {
        DeckClient { api }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    async fn fetch<R: DeserializeOwned>(&self, endpoint: &str) -> Result<R, DeckError> {
        let value: Value = self.api.fetch_as_json(endpoint).await?;
        check_status(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// 牌不够时服务端返回 success: false，但仍带着抽到的牌，此时照常返回
    async fn fetch_draw(&self, endpoint: &str) -> Result<DrawResponse, DeckError> {
        let value: Value = self.api.fetch_as_json(endpoint).await?;
        if !value.get("cards").map_or(false, Value::is_array) {
            check_status(&value)?;
        }
        Ok(serde_json::from_value(value)?)
    }

    /// 新建并洗好 deck_count 副牌
    pub async fn create_shuffled_deck(&self, deck_count: u32) -> Result<Deck, DeckError> {
        if deck_count == 0 {
            return Err(DeckError::InvalidCount);
        }
        let response: NewDeckResponse = self
            .fetch(&format!("deck/new/shuffle/?deck_count={}", deck_count))
            .await?;
        info!("Shuffled new deck {}", response.deck_id);
        Ok(Deck {
            id: DeckId(response.deck_id),
        })
    }

    /// 返回服务端给出的所有牌，牌不够时可能少于 count
    pub async fn draw_from_deck(&self, deck: &Deck, count: u32) -> Result<Vec<Card>, DeckError> {
        if count == 0 {
            return Err(DeckError::InvalidCount);
        }
        let response = self
            .fetch_draw(&format!("deck/{}/draw/?count={}", deck.id, count))
            .await?;
        debug!("Drew {} cards from deck {}", response.cards.len(), deck.id);
        to_cards(response, &deck.id)
    }

    pub async fn draw_from_pile(&self, pile: &mut Pile, count: u32) -> Result<Vec<Card>, DeckError> {
        if count == 0 {
            return Err(DeckError::InvalidCount);
        }
        let response = self
            .fetch_draw(&format!("deck/{}/pile/{}/draw/?count={}", pile.deck, pile.name, count))
            .await?;
        let cards = to_cards(response, &pile.deck)?;
        pile.remaining = pile.remaining.saturating_sub(cards.len() as u32);
        debug!("Drew {} cards from pile {}, {} left", cards.len(), pile.name, pile.remaining);
        Ok(cards)
    }

    /// 所有牌必须来自同一副牌组
    pub async fn create_pile_from_cards(&self, pile_name: &str, cards: &[Card]) -> Result<Pile, DeckError> {
        let deck = match cards.first() {
            Some(card) => card.deck.clone(),
            None => return Err(DeckError::NoCards),
        };
        if let Some(other) = cards.iter().find(|c| c.deck != deck) {
            return Err(DeckError::MixedDecks {
                expected: deck,
                found: other.deck.clone(),
            });
        }

        let codes = cards
            .iter()
            .map(|c| c.code.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let mut response: PilesResponse = self
            .fetch(&format!("deck/{}/pile/{}/add/?cards={}", deck, pile_name, codes))
            .await?;
        let status = response
            .piles
            .remove(pile_name)
            .ok_or_else(|| DeckError::MissingPile(pile_name.to_string()))?;
        info!("Created pile {} with {} cards", pile_name, status.remaining);

        Ok(Pile {
            name: pile_name.to_string(),
            deck,
            remaining: status.remaining,
        })
    }
}

fn check_status(value: &Value) -> Result<(), DeckError> {
    let status: Status = serde_json::from_value(value.clone())?;
    if status.success {
        Ok(())
    } else {
        Err(DeckError::Service(
            status.error.unwrap_or_else(|| String::from("unknown error")),
        ))
    }
}

fn to_cards(response: DrawResponse, deck: &DeckId) -> Result<Vec<Card>, DeckError> {
    response
        .cards
        .into_iter()
        .map(|json| Card::from_json(json, deck).map_err(DeckError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::api::mock::{card_json, full_deck_json, MockTransport};
    use crate::card::Suit;
    use super::*;

    fn client(transport: MockTransport) -> DeckClient<MockTransport> {
        DeckClient::new(ApiClient::new("api/", transport))
    }

    fn card(deck: &str, code: &str) -> Card {
        Card::new(DeckId::from(deck), code.to_string(), String::new(), String::from("5"), Suit::Clubs).unwrap()
    }

    #[async_std::test]
    async fn shuffle() {
        let transport = MockTransport::new();
        transport.respond(
            "api/deck/new/shuffle/?deck_count=1",
            json!({"success": true, "deck_id": "abc", "shuffled": true, "remaining": 52}),
        );
        let client = client(transport);

        let deck = client.create_shuffled_deck(1).await.unwrap();
        assert_eq!(deck.id, DeckId::from("abc"));
    }

    #[async_std::test]
    async fn zero_counts_send_nothing() {
        let client = client(MockTransport::new());
        let deck = Deck { id: DeckId::from("abc") };
        let mut pile = Pile { name: String::from("human"), deck: deck.id.clone(), remaining: 3 };

        assert!(matches!(client.create_shuffled_deck(0).await, Err(DeckError::InvalidCount)));
        assert!(matches!(client.draw_from_deck(&deck, 0).await, Err(DeckError::InvalidCount)));
        assert!(matches!(client.draw_from_pile(&mut pile, 0).await, Err(DeckError::InvalidCount)));
        assert!(client.api().transport().requests().is_empty());
    }

    #[async_std::test]
    async fn service_error() {
        let transport = MockTransport::new();
        transport.respond(
            "api/deck/nope/draw/?count=2",
            json!({"success": false, "error": "Deck ID does not exist."}),
        );
        let client = client(transport);

        let result = client.draw_from_deck(&Deck { id: DeckId::from("nope") }, 2).await;
        match result {
            Err(DeckError::Service(msg)) => assert_eq!(msg, "Deck ID does not exist."),
            _ => panic!("expected service error"),
        }
    }

    #[async_std::test]
    async fn missing_field_is_decode_error() {
        let transport = MockTransport::new();
        transport.respond("api/deck/new/shuffle/?deck_count=1", json!({"success": true}));
        let client = client(transport);

        assert!(matches!(client.create_shuffled_deck(1).await, Err(DeckError::Decode(_))));
    }

    #[async_std::test]
    async fn draw_from_deck() {
        let transport = MockTransport::new();
        transport.respond(
            "api/deck/abc/draw/?count=52",
            json!({"success": true, "deck_id": "abc", "cards": full_deck_json(), "remaining": 0}),
        );
        let client = client(transport);
        let deck = Deck { id: DeckId::from("abc") };

        let cards = deck.draw(&client, 52).await.unwrap();
        assert_eq!(cards.len(), 52);
        assert!(cards.iter().all(|c| c.deck == deck.id));
        assert_eq!(cards[0].code, "2S");
        assert_eq!(cards[12].numeric_value(), 14);
    }

    #[async_std::test]
    async fn exhausted_deck_returns_fewer_cards() {
        let transport = MockTransport::new();
        transport.respond(
            "api/deck/abc/draw/?count=5",
            json!({
                "success": false,
                "deck_id": "abc",
                "cards": [card_json("AS", "ACE", "SPADES")],
                "remaining": 0,
                "error": "Not enough cards remaining to draw 5 additional"
            }),
        );
        let client = client(transport);

        let cards = client.draw_from_deck(&Deck { id: DeckId::from("abc") }, 5).await.unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].code, "AS");
    }

    #[async_std::test]
    async fn unknown_card_value_fails() {
        let transport = MockTransport::new();
        transport.respond(
            "api/deck/abc/draw/?count=1",
            json!({"success": true, "cards": [card_json("XS", "JOKER", "SPADES")]}),
        );
        let client = client(transport);

        assert!(matches!(
            client.draw_from_deck(&Deck { id: DeckId::from("abc") }, 1).await,
            Err(DeckError::Card(_))
        ));
    }

    #[async_std::test]
    async fn create_pile() {
        let transport = MockTransport::new();
        transport.respond(
            "api/deck/abc/pile/human/add/?cards=AS,2S,KH",
            json!({"success": true, "deck_id": "abc", "remaining": 49, "piles": {"human": {"remaining": 3}}}),
        );
        let client = client(transport);
        let deck = Deck { id: DeckId::from("abc") };
        let cards = vec![card("abc", "AS"), card("abc", "2S"), card("abc", "KH")];

        let pile = deck.create_pile(&client, "human", &cards).await.unwrap();
        assert_eq!(pile, Pile { name: String::from("human"), deck: deck.id, remaining: 3 });
    }

    #[async_std::test]
    async fn create_pile_rejects_bad_input() {
        let client = client(MockTransport::new());

        assert!(matches!(client.create_pile_from_cards("human", &[]).await, Err(DeckError::NoCards)));

        let mixed = vec![card("abc", "AS"), card("xyz", "2S")];
        match client.create_pile_from_cards("human", &mixed).await {
            Err(DeckError::MixedDecks { expected, found }) => {
                assert_eq!(expected, DeckId::from("abc"));
                assert_eq!(found, DeckId::from("xyz"));
            }
            _ => panic!("expected mixed decks"),
        }
        assert!(client.api().transport().requests().is_empty());
    }

    #[async_std::test]
    async fn create_pile_missing_from_response() {
        let transport = MockTransport::new();
        transport.respond(
            "api/deck/abc/pile/human/add/?cards=AS",
            json!({"success": true, "piles": {"computer": {"remaining": 1}}}),
        );
        let client = client(transport);

        assert!(matches!(
            client.create_pile_from_cards("human", &[card("abc", "AS")]).await,
            Err(DeckError::MissingPile(name)) if name == "human"
        ));
    }

    #[async_std::test]
    async fn draw_from_pile_updates_remaining() {
        let transport = MockTransport::new();
        transport.respond(
            "api/deck/abc/pile/human/draw/?count=1",
            json!({"success": true, "cards": [card_json("KH", "KING", "HEARTS")], "piles": {"human": {"remaining": 25}}}),
        );
        let client = client(transport);
        let mut pile = Pile { name: String::from("human"), deck: DeckId::from("abc"), remaining: 26 };

        let card = pile.draw_one(&client).await.unwrap();
        assert_eq!(card.code, "KH");
        assert_eq!(card.numeric_value(), 13);
        assert_eq!(pile.remaining, 25);
    }

    #[async_std::test]
    async fn empty_pile() {
        let transport = MockTransport::new();
        let exhausted = json!({
            "success": false,
            "deck_id": "abc",
            "cards": [],
            "piles": {"human": {"remaining": 0}},
            "error": "Not enough cards remaining to draw 1 additional"
        });
        transport.respond("api/deck/abc/pile/human/draw/?count=1", exhausted.clone());
        transport.respond("api/deck/abc/pile/human/draw/?count=1", exhausted);
        let client = client(transport);
        let mut pile = Pile { name: String::from("human"), deck: DeckId::from("abc"), remaining: 0 };

        // 抽空本身不报错，只返回空列表
        assert!(client.draw_from_pile(&mut pile, 1).await.unwrap().is_empty());
        assert_eq!(pile.remaining, 0);

        assert!(matches!(pile.draw_one(&client).await, Err(DeckError::EmptyPile(name)) if name == "human"));
    }
}

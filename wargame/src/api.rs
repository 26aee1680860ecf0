use log::debug;
use serde_json::Value;
use crate::error::DeckError;

/// 发送一次 GET 并把响应体解析成 JSON
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn get_json(&self, url: &str) -> Result<Value, DeckError>;
}

/// 基于 surf 的 HTTP 传输
#[derive(Clone)]
pub struct SurfTransport {
    client: surf::Client,
}

impl SurfTransport {
    pub fn new() -> SurfTransport {
        SurfTransport {
            client: surf::Client::new(),
        }
    }
}

impl Default for SurfTransport {
    fn default() -> Self {
        SurfTransport::new()
    }
}

impl Transport for SurfTransport {
    async fn get_json(&self, url: &str) -> Result<Value, DeckError> {
        self.client
            .get(url)
            .recv_json::<Value>()
            .await
            .map_err(|e| DeckError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}

/// 通用 REST 客户端，只知道基础地址，对牌堆服务一无所知
pub struct ApiClient<T: Transport> {
    base_url: String,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> ApiClient<T> {
        ApiClient {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 直接拼接，不做任何转义
    pub fn assemble_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    pub async fn fetch_as_json(&self, endpoint: &str) -> Result<Value, DeckError> {
        let url = self.assemble_url(endpoint);
        debug!("GET {}", url);
        self.transport.get_json(&url).await
    }
}

#[cfg(any(test, feature = "test-util"))]
pub mod mock {
    use std::cell::RefCell;
    use std::collections::{HashMap, VecDeque};
    use serde_json::{json, Value};
    use super::Transport;
    use crate::error::DeckError;

    /// 按 URL 回放预先准备好的响应，并记录所有请求
    #[derive(Default)]
    pub struct MockTransport {
        responses: RefCell<HashMap<String, VecDeque<Value>>>,
        pub requests: RefCell<Vec<String>>,
    }

    impl MockTransport {
        pub fn new() -> MockTransport {
            MockTransport::default()
        }

        pub fn respond(&self, url: &str, body: Value) -> &MockTransport {
            self.responses
                .borrow_mut()
                .entry(url.to_string())
                .or_default()
                .push_back(body);
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.borrow().clone()
        }
    }

    impl Transport for MockTransport {
        async fn get_json(&self, url: &str) -> Result<Value, DeckError> {
            self.requests.borrow_mut().push(url.to_string());
            self.responses
                .borrow_mut()
                .get_mut(url)
                .and_then(|queue| queue.pop_front())
                .ok_or_else(|| DeckError::Transport {
                    url: url.to_string(),
                    reason: String::from("connection refused"),
                })
        }
    }

    const VALUES: [(&str, &str); 13] = [
        ("2", "2"), ("3", "3"), ("4", "4"), ("5", "5"), ("6", "6"), ("7", "7"), ("8", "8"),
        ("9", "9"), ("0", "10"), ("J", "JACK"), ("Q", "QUEEN"), ("K", "KING"), ("A", "ACE"),
    ];
    const SUITS: [(&str, &str); 4] = [("S", "SPADES"), ("D", "DIAMONDS"), ("C", "CLUBS"), ("H", "HEARTS")];

    pub fn card_json(code: &str, value: &str, suit: &str) -> Value {
        json!({
            "code": code,
            "image": format!("https://deckofcardsapi.com/static/img/{}.png", code),
            "value": value,
            "suit": suit,
        })
    }

    /// 一副完整的 52 张牌，按花色、点数排列
    pub fn full_deck_json() -> Vec<Value> {
        let mut cards = vec![];
        for (suit_code, suit) in SUITS.iter() {
            for (value_code, value) in VALUES.iter() {
                cards.push(card_json(&format!("{}{}", value_code, suit_code), value, suit));
            }
        }
        cards
    }
}

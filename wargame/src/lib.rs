extern crate num_derive;
extern crate num_traits;
extern crate serde;
extern crate serde_json;

pub mod api;
pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod rule;

pub use api::{ApiClient, SurfTransport, Transport};
pub use card::*;
pub use deck::*;
pub use error::{CardError, DeckError};
pub use game::*;
pub use rule::*;

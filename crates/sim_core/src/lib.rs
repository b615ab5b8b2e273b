pub mod envelope;
pub mod game;
pub mod time;
pub mod types;

pub use envelope::ActionEnvelope;
pub use game::Game;
pub use time::Millis;
pub use types::{ActionId, SessionId, Tick};

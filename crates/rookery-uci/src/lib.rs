//! Client side of the UCI protocol: asks an external engine for moves in a
//! rookery game.

pub mod command;
pub mod config;
pub mod engine;
pub mod error;

pub use command::{BestMove, EngineLine};
pub use config::BridgeConfig;
pub use engine::{EngineProcess, MoveAdvisor, Session, suggest};
pub use error::UciError;

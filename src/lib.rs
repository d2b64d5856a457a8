pub mod config_loader;
pub mod domain;
pub mod engine;
pub mod infrastructure;

pub use domain::constants::*;
pub use domain::enums::*;
pub use domain::error::{EngineError, GatewayError};
pub use domain::events::SessionEvent;
pub use domain::model::amounts::*;
pub use domain::model::market::*;
pub use domain::model::order::*;
pub use domain::model::quote::*;
pub use domain::model::tick::*;
pub use domain::traits::DexGateway;
pub use engine::*;
pub use infrastructure::gateway::HttpGateway;

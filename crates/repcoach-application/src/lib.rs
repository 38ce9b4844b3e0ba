//! Application layer: session lifecycle orchestration over the core
//! domain and the collaborator services.

pub mod session_usecase;

pub use session_usecase::{AudioExchangeOutcome, ExchangeOutcome, SessionUseCase};

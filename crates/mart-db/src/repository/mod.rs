//! SurrealDB repository implementations.

mod account;
mod business;
mod product;
mod session;
mod settings;
mod user;

pub use account::SurrealAccountRepository;
pub use business::SurrealBusinessRepository;
pub use product::SurrealProductRepository;
pub use session::SurrealSessionRepository;
pub use settings::SurrealSettingsRepository;
pub use user::SurrealUserRepository;

/// Command and message handlers
pub mod handlers;
/// Resilient messaging with automatic retry for Telegram API operations
pub mod resilient;
/// Telegram implementation of the routing transport
pub mod transport;
/// User-facing texts for commands
pub mod views;

pub use transport::TelegramTransport;

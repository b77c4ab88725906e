pub mod config;
pub mod endpoint;
pub mod events;
pub mod message;
pub mod transcript;
pub mod ui;
pub mod widget;

// Re-export main types for convenience
pub use config::{ClientConfig, ConfigError};
pub use endpoint::{ChatEndpoint, EndpointError, EndpointFactory, EndpointInfo, ErrorKind};
pub use events::{AppEvent, EventBus, EventSender, Reply};
pub use message::{Message, Sender};
pub use transcript::Transcript;
pub use ui::UiState;
pub use widget::ChatWidget;

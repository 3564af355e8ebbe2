//! CLI commands

mod completions;
mod init;
mod link;
mod message;
mod render;
mod validate;

pub use completions::CompletionsCommand;
pub use init::InitCommand;
pub use link::LinkCommand;
pub use message::MessageCommand;
pub use render::RenderCommand;
pub use validate::ValidateCommand;

//! Crate-level error, for the places that juggle more than one layer.
use crate::api::ApiError;
use crate::config::ConfigError;
use crate::kitchen_board::KitchenError;
use crate::ready_display::DisplayError;
use crate::session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Display(#[from] DisplayError),
    #[error(transparent)]
    Kitchen(#[from] KitchenError),
    /// An actor task panicked or was aborted.
    #[error("Actor task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

//! Desk error types

use bfinit_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("page size {0} is not one of 5, 10, 25, 50, 100")]
    InvalidPageSize(usize),

    #[error("no row with id {0}")]
    UnknownRow(String),

    #[error("row {0} is locked")]
    RowLocked(String),

    #[error("row {0} is already submitting")]
    RowBusy(String),

    #[error("row {0} has no pending change")]
    NothingToConfirm(String),

    #[error("status {status} cannot be selected for row {id}")]
    InvalidStatus { id: String, status: String },
}

pub type DeskResult<T> = Result<T, DeskError>;

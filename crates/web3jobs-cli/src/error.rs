use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Board(#[from] web3jobs::BoardError),

    #[error("Failed to encode output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sign in to save jobs")]
    LoginRequired,
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::LoginRequired => 2,
            CliError::Board(web3jobs::BoardError::Admin(web3jobs::AdminError::Forbidden)) => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

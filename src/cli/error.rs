use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("Missing argument: {message}")]
    #[diagnostic(
        code(gradebook::cli::missing_argument),
        help("Run with --help to see which flags each model requires.")
    )]
    MissingArgument { message: String },

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(gradebook::cli::invalid_argument))]
    InvalidArgument { message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Db(#[from] DbError),
}

pub type CliResult<T> = Result<T, CliError>;

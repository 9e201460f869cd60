pub mod formats;

use flexi_logger::{Logger, LoggerHandle};

use crate::Error;

/// Starts logging to stderr so stdout carries only the conversation.
/// The returned handle must outlive the program's logging.
pub fn init() -> Result<LoggerHandle, Error> {
    let handle = Logger::try_with_env_or_str("warn")?
        .format(formats::cli_format)
        .log_to_stderr()
        .start()?;

    Ok(handle)
}

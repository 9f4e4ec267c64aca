use flexi_logger::{Logger, LoggerHandle};

use crate::MctsZeroError;

/// Start the logger, honouring `RUST_LOG` with an "info" fallback.
///
/// The returned handle must stay alive for the duration of the program;
/// dropping it shuts the logger down.
pub fn setup_logging() -> crate::Result<LoggerHandle> {
    Logger::try_with_env_or_str("info")
        .map_err(|e| MctsZeroError::Config(e.to_string()))?
        .start()
        .map_err(|e| MctsZeroError::Config(e.to_string()))
}

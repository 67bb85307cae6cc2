use crate::library::logger::interface::{join_namespace, Level, Logger};
use chrono::Utc;
use std::io::Write;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct LoggerConsole {
    namespace: Option<String>,
    timezone: chrono::FixedOffset,
}

impl LoggerConsole {
    pub fn new(timezone: chrono::FixedOffset) -> Self {
        Self {
            namespace: None,
            timezone,
        }
    }

    fn format_line(&self, level: Level, message: &str) -> String {
        let local_time = Utc::now().with_timezone(&self.timezone);
        let formatted = local_time.format("%Y-%m-%d %I:%M:%S%.3f %p");
        match &self.namespace {
            Some(namespace) => format!(
                "[{}] {} {}: {}",
                formatted,
                level.as_str(),
                namespace,
                message
            ),
            None => format!("[{}] {} {}", formatted, level.as_str(), message),
        }
    }
}

impl Logger for LoggerConsole {
    fn log(&self, level: Level, message: &str) {
        let line = self.format_line(level, message);
        // Logs go to stderr so stdout stays free for the console display.
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerConsole {
            namespace: Some(join_namespace(self.namespace.as_deref(), namespace)),
            timezone: self.timezone,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, Utc};

    #[test]
    fn test_format_line_with_namespace() {
        let logger = LoggerConsole::new(Utc.fix());
        let child = LoggerConsole {
            namespace: Some(join_namespace(Some("app"), "camera")),
            ..logger
        };

        let line = child.format_line(Level::Error, "denied");

        assert!(line.ends_with("] ERROR app:camera: denied"));
    }

    #[test]
    fn test_format_line_without_namespace() {
        let logger = LoggerConsole::new(Utc.fix());

        let line = logger.format_line(Level::Info, "hello");

        assert!(line.starts_with('['));
        assert!(line.ends_with("] INFO hello"));
    }
}

use crate::library::logger::interface::{join_namespace, Level, Logger};
use std::sync::{Arc, Mutex, PoisonError};

/// Keeps every line in memory; children created with `with_namespace`
/// write into the same buffer.
#[derive(Debug, Clone, Default)]
pub struct LoggerFake {
    namespace: Option<String>,
    lines: Arc<Mutex<Vec<String>>>,
}

impl LoggerFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Logger for LoggerFake {
    fn log(&self, level: Level, message: &str) {
        let line = match &self.namespace {
            Some(namespace) => format!("{} {}: {}", level.as_str(), namespace, message),
            None => format!("{} {}", level.as_str(), message),
        };
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line);
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerFake {
            namespace: Some(join_namespace(self.namespace.as_deref(), namespace)),
            lines: self.lines.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_children_share_lines() {
        let logger = LoggerFake::new();
        let child = logger.with_namespace("camera").with_namespace("fake");

        logger.info("root");
        child.error("denied");

        assert_eq!(
            logger.lines(),
            vec![
                "INFO root".to_string(),
                "ERROR camera:fake: denied".to_string()
            ]
        );
    }
}

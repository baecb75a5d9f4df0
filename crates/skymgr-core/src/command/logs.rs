// ── App log reader ──
//
// Pulls an app's log in increments, resuming each read from the newest
// timestamp the visor reported.

use std::sync::Arc;

use tracing::trace;

use super::collaborators::AppLogSource;
use crate::error::CoreError;

/// Start of the log when no earlier moment is given.
pub const LOG_EPOCH: &str = "1970-01-01T00:00:00Z";

pub struct LogReader {
    source: Arc<dyn AppLogSource>,
    app_name: String,
    since: String,
}

impl LogReader {
    pub fn new(source: Arc<dyn AppLogSource>, app_name: impl Into<String>) -> Self {
        Self {
            source,
            app_name: app_name.into(),
            since: LOG_EPOCH.to_owned(),
        }
    }

    /// Start reading after `since` instead of from the beginning.
    #[must_use]
    pub fn starting_at(mut self, since: impl Into<String>) -> Self {
        self.since = since.into();
        self
    }

    pub fn since(&self) -> &str {
        &self.since
    }

    /// Lines logged since the previous read.
    ///
    /// The position only moves forward when the visor reports a newer
    /// timestamp, so an empty reply is retried from the same point.
    pub async fn next_batch(&mut self, device_key: &str) -> Result<Vec<String>, CoreError> {
        let batch = self
            .source
            .logs_since(device_key, &self.app_name, &self.since)
            .await?;
        trace!(app = %self.app_name, lines = batch.lines.len(), "read app log");
        if !batch.last_timestamp.is_empty() {
            self.since = batch.last_timestamp;
        }
        Ok(batch.lines)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::AppLogBatch;

    #[derive(Default)]
    struct ScriptedLog {
        replies: Mutex<VecDeque<AppLogBatch>>,
        asked: Mutex<Vec<String>>,
    }

    impl ScriptedLog {
        fn reply(self, last: &str, lines: &[&str]) -> Self {
            self.replies.lock().unwrap().push_back(AppLogBatch {
                last_timestamp: last.into(),
                lines: lines.iter().map(|l| (*l).to_owned()).collect(),
            });
            self
        }
    }

    #[async_trait]
    impl AppLogSource for ScriptedLog {
        async fn logs_since(
            &self,
            device_key: &str,
            app_name: &str,
            since: &str,
        ) -> Result<AppLogBatch, CoreError> {
            self.asked
                .lock()
                .unwrap()
                .push(format!("{device_key}:{app_name}:{since}"));
            Ok(self.replies.lock().unwrap().pop_front().unwrap_or_default())
        }
    }

    #[tokio::test]
    async fn each_read_resumes_after_the_last_line() {
        let source = Arc::new(
            ScriptedLog::default()
                .reply("2024-05-01T10:00:01Z", &["a", "b"])
                .reply("", &[])
                .reply("2024-05-01T10:00:09Z", &["c"]),
        );
        let mut reader = LogReader::new(source.clone(), "skychat");

        assert_eq!(reader.next_batch("02v").await.unwrap(), ["a", "b"]);
        assert!(reader.next_batch("02v").await.unwrap().is_empty());
        assert_eq!(reader.next_batch("02v").await.unwrap(), ["c"]);
        assert_eq!(reader.since(), "2024-05-01T10:00:09Z");

        assert_eq!(
            *source.asked.lock().unwrap(),
            [
                "02v:skychat:1970-01-01T00:00:00Z",
                "02v:skychat:2024-05-01T10:00:01Z",
                "02v:skychat:2024-05-01T10:00:01Z",
            ]
        );
    }

    #[tokio::test]
    async fn explicit_start_is_sent_first() {
        let source = Arc::new(ScriptedLog::default());
        let mut reader =
            LogReader::new(source.clone(), "skysocks").starting_at("2024-06-01T00:00:00Z");
        reader.next_batch("02v").await.unwrap();
        assert_eq!(
            *source.asked.lock().unwrap(),
            ["02v:skysocks:2024-06-01T00:00:00Z"]
        );
    }
}

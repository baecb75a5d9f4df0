#![allow(clippy::unwrap_used, dead_code)]
// Recording fakes for the collaborator seams.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use skymgr_core::{
    AppSettings, BatchSequencer, Collaborators, Confirmation, CoreError, DefaultErrorTranslator,
    Dialogs, Notifier, OwningPage, RemoteCommandService,
};

pub const VISOR: &str = "02visor";
pub const SETTLE: Duration = Duration::from_millis(50);

/// Ordered log of everything the collaborators were asked to do.
#[derive(Clone, Default)]
pub struct Log(Arc<Mutex<Vec<String>>>);

impl Log {
    pub fn push(&self, event: impl Into<String>) {
        self.0.lock().unwrap().push(event.into());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events().iter().filter(|e| e.starts_with(prefix)).count()
    }
}

// ── Remote ──────────────────────────────────────────────────────────

pub struct FakeRemote {
    log: Log,
    fail_on: Option<String>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeRemote {
    async fn call(&self, event: String, key: &str) -> Result<(), CoreError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.log.push(event);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_on.as_deref() == Some(key) {
            return Err(CoreError::Remote {
                message: format!("{key} refused"),
                status: Some(500),
            });
        }
        Ok(())
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteCommandService for FakeRemote {
    async fn set_run_state(&self, device: &str, name: &str, running: bool) -> Result<(), CoreError> {
        self.call(format!("remote:run:{device}:{name}:{running}"), name)
            .await
    }

    async fn set_autostart(
        &self,
        device: &str,
        name: &str,
        autostart: bool,
    ) -> Result<(), CoreError> {
        self.call(format!("remote:autostart:{device}:{name}:{autostart}"), name)
            .await
    }

    async fn delete_transport(&self, device: &str, id: &str) -> Result<(), CoreError> {
        self.call(format!("remote:delete:{device}:{id}"), id).await
    }

    async fn apply_settings(
        &self,
        device: &str,
        name: &str,
        settings: &AppSettings,
    ) -> Result<(), CoreError> {
        let value = match settings {
            AppSettings::Passcode(p) => format!("passcode={p}"),
            AppSettings::RemotePk(pk) => format!("pk={pk}"),
        };
        self.call(format!("remote:settings:{device}:{name}:{value}"), name)
            .await
    }
}

// ── Dialogs ─────────────────────────────────────────────────────────

pub struct FakeDialogs {
    log: Log,
    accept: bool,
}

struct FakeConfirmation {
    log: Log,
    accept: bool,
}

#[async_trait]
impl Confirmation for FakeConfirmation {
    async fn accepted(&self) -> bool {
        self.log
            .push(if self.accept { "dialog:accepted" } else { "dialog:cancelled" });
        self.accept
    }

    fn show_processing(&self) {
        self.log.push("dialog:processing");
    }

    fn show_done(&self, header_key: &str, message: &str) {
        self.log.push(format!("dialog:done:{header_key}:{message}"));
    }

    fn close(&self) {
        self.log.push("dialog:close");
    }
}

impl Dialogs for FakeDialogs {
    fn confirm(&self, text_key: &str) -> Box<dyn Confirmation> {
        self.log.push(format!("dialog:open:{text_key}"));
        Box::new(FakeConfirmation {
            log: self.log.clone(),
            accept: self.accept,
        })
    }
}

// ── Notifier and page ───────────────────────────────────────────────

pub struct FakeNotifier {
    log: Log,
}

impl Notifier for FakeNotifier {
    fn show_done(&self, key: &str) {
        self.log.push(format!("notify:done:{key}"));
    }

    fn show_error(&self, message: &str) {
        self.log.push(format!("notify:error:{message}"));
    }

    fn show_warning(&self, key: &str) {
        self.log.push(format!("notify:warning:{key}"));
    }
}

pub struct FakePage {
    log: Log,
}

impl OwningPage for FakePage {
    fn refresh_displayed_data(&self) {
        self.log.push("page:refresh");
    }

    fn current_device_key(&self) -> String {
        VISOR.to_owned()
    }
}

// ── Harness ─────────────────────────────────────────────────────────

pub struct Harness {
    pub log: Log,
    pub remote: Arc<FakeRemote>,
    pub collaborators: Collaborators,
}

pub struct HarnessBuilder {
    accept: bool,
    fail_on: Option<String>,
    delay: Duration,
}

impl HarnessBuilder {
    pub fn declining(mut self) -> Self {
        self.accept = false;
        self
    }

    pub fn failing_on(mut self, key: &str) -> Self {
        self.fail_on = Some(key.to_owned());
        self
    }

    pub fn remote_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn build(self) -> Harness {
        let log = Log::default();
        let remote = Arc::new(FakeRemote {
            log: log.clone(),
            fail_on: self.fail_on,
            delay: self.delay,
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        });
        let collaborators = Collaborators {
            remote: remote.clone(),
            translator: Arc::new(DefaultErrorTranslator),
            dialogs: Arc::new(FakeDialogs {
                log: log.clone(),
                accept: self.accept,
            }),
            notifier: Arc::new(FakeNotifier { log: log.clone() }),
            page: Arc::new(FakePage { log: log.clone() }),
        };
        Harness {
            log,
            remote,
            collaborators,
        }
    }
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder {
            accept: true,
            fail_on: None,
            delay: Duration::ZERO,
        }
    }

    pub fn sequencer(&self) -> BatchSequencer {
        BatchSequencer::new(self.collaborators.clone(), SETTLE)
    }

    pub fn events(&self) -> Vec<String> {
        self.log.events()
    }

    pub fn remote_calls(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.starts_with("remote:"))
            .collect()
    }

    pub fn refreshes(&self) -> usize {
        self.log.count("page:refresh")
    }
}

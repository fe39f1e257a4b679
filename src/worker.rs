use crate::error::{TranslateError, TranslateResult};
use crate::orchestrator::{self, ModelClient};
use crate::session::TranslationJob;
use crate::types::translation::TranslationResponse;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

/// A translation running on a background thread.
pub struct PendingTranslation {
    job: TranslationJob,
    rx: Receiver<TranslateResult<TranslationResponse>>,
}

impl PendingTranslation {
    pub fn job(&self) -> &TranslationJob {
        &self.job
    }

    /// Non-blocking check for the outcome.
    ///
    /// A worker that exited without reporting counts as a failed call, so
    /// the caller always gets an outcome eventually.
    pub fn poll(&self) -> Option<TranslateResult<TranslationResponse>> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(TranslateError::ModelCallFailure(
                "translation worker stopped without a result".to_string(),
            ))),
        }
    }
}

/// Runs `job` on its own thread. `notify` fires once the outcome is queued,
/// typically to wake the UI for a repaint.
pub fn spawn_translation<F>(
    client: Arc<dyn ModelClient + Send + Sync>,
    job: TranslationJob,
    temperature: f32,
    notify: F,
) -> PendingTranslation
where
    F: FnOnce() + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    let thread_job = job.clone();

    let spawned = thread::Builder::new()
        .name("translation-worker".to_string())
        .spawn(move || {
            let outcome = orchestrator::translate(
                client.as_ref(),
                &thread_job.text,
                thread_job.source,
                &thread_job.targets,
                temperature,
            );
            // The receiver is gone if the window closed; nothing left to do.
            let _ = tx.send(outcome);
            notify();
        });

    if let Err(e) = spawned {
        // `tx` was moved into the failed closure and dropped, so `poll`
        // reports the disconnect as a failure.
        log::error!("Could not start translation worker: {}", e);
    }

    PendingTranslation { job, rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::GenerationRequest;
    use crate::types::translation::Language;
    use std::time::{Duration, Instant};

    struct FixedClient(TranslateResult<Option<String>>);

    impl ModelClient for FixedClient {
        fn generate_content(&self, _request: &GenerationRequest) -> TranslateResult<Option<String>> {
            self.0.clone()
        }
    }

    fn job() -> TranslationJob {
        TranslationJob {
            text: "cat".into(),
            source: Language::English,
            targets: vec![Language::French],
        }
    }

    fn wait(pending: &PendingTranslation) -> TranslateResult<TranslationResponse> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(outcome) = pending.poll() {
                return outcome;
            }
            assert!(Instant::now() < deadline, "worker did not finish");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn outcome_is_delivered_and_notify_fires() {
        let reply = r#"{"sourceSegments":[{"text":"cat","matchId":1}],"translations":[{"language":"French","segments":[{"text":"chat","matchId":1}]}]}"#;
        let client: Arc<dyn ModelClient + Send + Sync> = Arc::new(FixedClient(Ok(Some(reply.into()))));
        let (notified_tx, notified_rx) = mpsc::channel();
        let pending = spawn_translation(client, job(), 0.2, move || {
            let _ = notified_tx.send(());
        });

        let response = wait(&pending).unwrap();
        assert_eq!(response.translations[0].segments[0].text, "chat");
        assert!(notified_rx.recv_timeout(Duration::from_secs(5)).is_ok());
        assert_eq!(pending.job().source, Language::English);
    }

    #[test]
    fn failures_come_back_as_errors() {
        let client: Arc<dyn ModelClient + Send + Sync> = Arc::new(FixedClient(Ok(None)));
        let pending = spawn_translation(client, job(), 0.2, || {});
        assert!(matches!(wait(&pending), Err(TranslateError::ModelCallFailure(_))));
    }
}

//! Shared helpers.

use std::collections::VecDeque;
use std::sync::Arc;

use formcheck_validator::{Outcome, RuleError, Validator, Verdict};
use parking_lot::Mutex;
use tokio::sync::oneshot;

/// Routes `RUST_LOG` output through the test harness.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

type Answer = Result<Verdict, String>;

/// An asynchronous rule answered by hand, one call at a time.
#[derive(Clone, Default)]
pub struct Remote {
    calls: Arc<Mutex<VecDeque<oneshot::Sender<Answer>>>>,
}

impl Remote {
    /// Registers the rule under `name`.
    pub fn install(&self, validator: &mut Validator, name: &str) {
        let calls = Arc::clone(&self.calls);
        validator.add_rule_fn(name, move |_| {
            let (tx, rx) = oneshot::channel::<Answer>();
            calls.lock().push_back(tx);
            Ok(Outcome::pending(async move {
                let answer = rx.await?;
                answer.map_err(RuleError::from)
            }))
        });
    }

    /// Calls not answered yet.
    pub fn waiting(&self) -> usize {
        self.calls.lock().len()
    }

    /// Answers the oldest unanswered call.
    pub fn answer_first(&self, answer: Answer) {
        let tx = self.calls.lock().pop_front().expect("no call waiting");
        let _ = tx.send(answer);
    }

    /// Answers the newest unanswered call.
    pub fn answer_last(&self, answer: Answer) {
        let tx = self.calls.lock().pop_back().expect("no call waiting");
        let _ = tx.send(answer);
    }
}

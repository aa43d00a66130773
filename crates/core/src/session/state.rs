use std::fmt::{self, Debug};

use parley_model::{ChatRequest, ErrorKind};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::Instrument;

use super::SessionView;
use crate::dispatch::{EndpointClient, Resolution};
use crate::transcript::Transcript;

pub type Mailbox = mpsc::WeakUnboundedSender<Command>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Stage {
    #[default]
    Idle,
    Pending,
}

pub enum Command {
    Submit(String),
    SetDraft(String),
    SubmitDraft,
    WaitIdle(oneshot::Sender<SessionView>),
    DispatchFinished(Resolution),
}

impl Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Submit(text) => {
                f.debug_tuple("Submit").field(text).finish()
            }
            Command::SetDraft(text) => {
                f.debug_tuple("SetDraft").field(text).finish()
            }
            Command::SubmitDraft => f.write_str("SubmitDraft"),
            Command::WaitIdle(_) => f.write_str("WaitIdle"),
            Command::DispatchFinished(resolution) => f
                .debug_tuple("DispatchFinished")
                .field(resolution)
                .finish(),
        }
    }
}

pub struct SessionState {
    pub client: EndpointClient,
    pub transcript: Transcript,
    pub stage: Stage,
    pub draft: String,
    pub view_tx: watch::Sender<SessionView>,
    pub idle_waiters: Vec<oneshot::Sender<SessionView>>,
}

impl SessionState {
    fn handle(&mut self, cmd: Command, mailbox: &Mailbox) {
        let changed = match cmd {
            Command::Submit(text) => self.submit(text, mailbox),
            Command::SetDraft(text) => {
                self.draft = text;
                true
            }
            Command::SubmitDraft => {
                let text = self.draft.clone();
                self.submit(text, mailbox)
            }
            Command::WaitIdle(waiter) => {
                self.idle_waiters.push(waiter);
                false
            }
            Command::DispatchFinished(resolution) => {
                self.finish_dispatch(resolution)
            }
        };

        if changed {
            self.view_tx.send_replace(self.view());
        }
        if self.stage == Stage::Idle && !self.idle_waiters.is_empty() {
            let view = self.view();
            for waiter in self.idle_waiters.drain(..) {
                waiter.send(view.clone()).ok();
            }
        }
    }

    /// Starts a dispatch cycle if the session is idle and `text` is not
    /// blank. Returns whether the submission was accepted.
    fn submit(&mut self, text: String, mailbox: &Mailbox) -> bool {
        if self.stage != Stage::Idle {
            debug!("a reply is still pending, dropping the submission");
            return false;
        }
        let Some(reply_tx) = mailbox.upgrade() else {
            // Every handle is gone, nobody would see the reply.
            return false;
        };

        let request = ChatRequest::new(text.as_str());
        let Some(msg) = self.transcript.append_human(text) else {
            debug!("ignoring a blank submission");
            return false;
        };
        debug!("accepted {}", msg.id());

        self.stage = Stage::Pending;
        self.draft.clear();
        spawn_dispatch(self.client.clone(), request, reply_tx);
        true
    }

    /// Appends the outcome of the in-flight cycle and returns to idle.
    fn finish_dispatch(&mut self, resolution: Resolution) -> bool {
        if self.stage != Stage::Pending {
            warn!("got a dispatch result while idle, discarding it");
            return false;
        }

        let msg = match resolution {
            Resolution::Reply(text) => self.transcript.append_assistant(text),
            Resolution::Failed(kind) => {
                self.transcript.append_assistant_error(kind)
            }
        };
        debug!("cycle finished with {}", msg.id());

        self.stage = Stage::Idle;
        true
    }

    #[inline]
    fn view(&self) -> SessionView {
        SessionView::capture(&self.transcript, self.stage, &self.draft)
    }
}

/// Reports the end of a cycle back to the session, exactly once.
///
/// If the dispatch task goes away without a resolution (a panic inside
/// the endpoint, or the task being dropped), the cycle is reported as a
/// general failure so the session never stays pending.
struct FinishGuard {
    reply_tx: Option<mpsc::UnboundedSender<Command>>,
}

impl FinishGuard {
    fn finish(mut self, resolution: Resolution) {
        if let Some(reply_tx) = self.reply_tx.take() {
            reply_tx.send(Command::DispatchFinished(resolution)).ok();
        }
    }
}

impl Drop for FinishGuard {
    fn drop(&mut self) {
        if let Some(reply_tx) = self.reply_tx.take() {
            error!("dispatch ended without a resolution");
            let resolution = Resolution::Failed(ErrorKind::General);
            reply_tx.send(Command::DispatchFinished(resolution)).ok();
        }
    }
}

fn spawn_dispatch(
    client: EndpointClient,
    request: ChatRequest,
    reply_tx: mpsc::UnboundedSender<Command>,
) {
    let guard = FinishGuard {
        reply_tx: Some(reply_tx),
    };
    tokio::spawn(
        async move {
            let resolution = client.dispatch(request).await;
            guard.finish(resolution);
        }
        .instrument(debug_span!("dispatch")),
    );
}

pub async fn run_session(
    mut state: SessionState,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    mailbox: Mailbox,
) {
    debug!("started");
    while let Some(cmd) = cmd_rx.recv().await {
        trace!("received command: {cmd:?}");
        state.handle(cmd, &mailbox);
    }
    debug!("will terminate");
}

mod builder;
mod state;

use std::error::Error;
use std::fmt;

use parley_model::Message;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::Instrument;

pub use builder::SessionBuilder;
use state::{Command, SessionState, Stage, run_session};

use crate::transcript::Transcript;

/// A type of error which is returned when commands are sent to a session
/// whose task has already ended.
pub struct SessionClosedError;

impl fmt::Debug for SessionClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClosedError").finish()
    }
}

impl fmt::Display for SessionClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "the session has been closed".fmt(f)
    }
}

impl Error for SessionClosedError {}

/// Everything a rendering surface needs to draw the session.
///
/// A new view is published on every state change, see
/// [`Session::subscribe`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionView {
    messages: Vec<Message>,
    pending: bool,
    draft: String,
}

impl SessionView {
    fn capture(transcript: &Transcript, stage: Stage, draft: &str) -> Self {
        Self {
            messages: transcript.snapshot().to_vec(),
            pending: stage == Stage::Pending,
            draft: draft.to_owned(),
        }
    }

    /// Returns the transcript in order, oldest first.
    #[inline]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the newest message.
    #[inline]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Returns whether a dispatch is in flight. Surfaces show a typing
    /// indicator and disable input while this is true.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns the text currently in the input box.
    #[inline]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Returns whether submitting the draft would be accepted.
    #[inline]
    pub fn can_submit(&self) -> bool {
        !self.pending && !self.draft.trim().is_empty()
    }
}

/// A chat session, like a window that displays messages and has an input
/// box.
///
/// The session state lives in a background task. This type is a cheap
/// handle to it: commands are processed in the order they are sent, and
/// every change is published as a [`SessionView`].
///
/// Only one message can be in flight. Anything submitted while a reply is
/// pending is dropped, not queued.
#[derive(Clone)]
pub struct Session {
    cmd_tx: mpsc::UnboundedSender<Command>,
    view_rx: watch::Receiver<SessionView>,
}

impl Session {
    /// Submits a message.
    ///
    /// Blank text and submissions made while a reply is pending are
    /// ignored.
    #[inline]
    pub fn submit<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), SessionClosedError> {
        self.send(Command::Submit(text.into()))
    }

    /// Replaces the text in the input box.
    #[inline]
    pub fn set_draft<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), SessionClosedError> {
        self.send(Command::SetDraft(text.into()))
    }

    /// Submits the text in the input box, clearing it if accepted.
    #[inline]
    pub fn submit_draft(&self) -> Result<(), SessionClosedError> {
        self.send(Command::SubmitDraft)
    }

    /// Returns the latest published view.
    #[inline]
    pub fn view(&self) -> SessionView {
        self.view_rx.borrow().clone()
    }

    /// Returns a receiver that is notified on every state change.
    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view_rx.clone()
    }

    /// Waits until every command sent so far has been processed and no
    /// dispatch is in flight, then returns the view at that point.
    ///
    /// A dispatch that never completes keeps this pending forever.
    pub async fn wait_idle(&self) -> Result<SessionView, SessionClosedError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::WaitIdle(tx))?;
        rx.await.map_err(|_| SessionClosedError)
    }

    #[inline]
    fn send(&self, cmd: Command) -> Result<(), SessionClosedError> {
        self.cmd_tx.send(cmd).map_err(|_| SessionClosedError)
    }
}

impl Session {
    fn spawn_from_builder(builder: SessionBuilder) -> Self {
        let SessionBuilder { client, greeting } = builder;

        let transcript = Transcript::with_greeting(greeting);
        let (view_tx, view_rx) = watch::channel(SessionView::capture(
            &transcript,
            Stage::Idle,
            "",
        ));
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();

        let state = SessionState {
            client,
            transcript,
            stage: Stage::Idle,
            draft: String::new(),
            view_tx,
            idle_waiters: Vec::new(),
        };
        tokio::spawn(
            run_session(state, cmd_rx, cmd_tx.downgrade())
                .instrument(debug_span!("session")),
        );

        Self { cmd_tx, view_rx }
    }
}

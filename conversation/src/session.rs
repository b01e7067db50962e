//! One conversation session: owns the turn history, the memory state and both stores, and
//! processes one turn at a time.
//!
//! Turn phases: `Idle -> AwaitingReply -> ReplyReceived -> MemoryUpdating -> Idle`.
//!
//! - **AwaitingReply**: assemble the prompt and ask the gateway. Failure ends the turn with
//!   nothing appended and no file touched.
//! - **ReplyReceived**: append the pair to the history log, then to the in-memory history.
//! - **MemoryUpdating**: regenerate both memories and save them. Failure leaves memory (in
//!   session and on disk) as it was; the reply is still delivered.

use std::sync::Arc;

use chrono::Utc;
use companion_core::{AuthenticatedUser, CompanionError, Result};
use llm_client::LlmClient;
use memory::{ContextAssembler, MemoryPolicy, MemoryUpdater};
use memory_core::{MemoryState, Turn};
use storage::{HistoryStore, MemoryFileStore};
use tracing::{debug, error, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    Idle,
    AwaitingReply,
    ReplyReceived,
    MemoryUpdating,
}

/// Result of a turn whose reply was delivered.
#[derive(Debug)]
pub struct TurnOutcome {
    pub reply: String,
    /// Set when the memory refresh failed; the reply and history are unaffected.
    pub memory_error: Option<CompanionError>,
}

impl TurnOutcome {
    pub fn memory_updated(&self) -> bool {
        self.memory_error.is_none()
    }
}

pub struct Session {
    user: AuthenticatedUser,
    history: Vec<Turn>,
    memory: MemoryState,
    history_store: HistoryStore,
    memory_store: MemoryFileStore,
    llm: Arc<dyn LlmClient>,
    assembler: ContextAssembler,
    updater: MemoryUpdater,
    phase: TurnPhase,
}

impl Session {
    /// Opens a session for `user`, reloading history and memory from the stores.
    ///
    /// An unreadable history file fails the open; a missing or malformed memory record is the
    /// empty initial state.
    pub async fn open(
        user: AuthenticatedUser,
        history_store: HistoryStore,
        memory_store: MemoryFileStore,
        llm: Arc<dyn LlmClient>,
    ) -> Result<Self> {
        let history = history_store
            .load_all()
            .await
            .map_err(|e| CompanionError::Store(e.to_string()))?;
        let memory = memory_store.load().await;
        info!(
            user = %user.username(),
            history_turns = history.len(),
            has_persistent = !memory.persistent.is_empty(),
            has_ephemeral = !memory.ephemeral.is_empty(),
            "Session opened"
        );
        Ok(Self {
            user,
            history,
            memory,
            history_store,
            memory_store,
            updater: MemoryUpdater::new(llm.clone()),
            llm,
            assembler: ContextAssembler::new(),
            phase: TurnPhase::Idle,
        })
    }

    pub fn with_persona(mut self, persona: impl Into<String>) -> Self {
        self.assembler = self.assembler.with_persona(persona);
        self
    }

    pub fn with_policy(mut self, policy: MemoryPolicy) -> Self {
        self.assembler = self.assembler.with_policy(policy);
        self.updater = self.updater.with_policy(policy);
        self
    }

    pub fn user(&self) -> &AuthenticatedUser {
        &self.user
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    pub fn memory(&self) -> &MemoryState {
        &self.memory
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn assembler(&self) -> &ContextAssembler {
        &self.assembler
    }

    fn set_phase(&mut self, phase: TurnPhase) {
        debug!(from = ?self.phase, to = ?phase, "Turn phase");
        self.phase = phase;
    }

    /// Runs one full turn: reply, history persist, memory refresh, memory persist.
    ///
    /// `Err` means no reply was delivered (gateway failure, history write failure or blank
    /// input). A memory refresh failure is reported in [`TurnOutcome::memory_error`].
    #[instrument(skip(self, user_input), fields(user = %self.user.username()))]
    pub async fn take_turn(&mut self, user_input: &str) -> Result<TurnOutcome> {
        let input = user_input.trim();
        if input.is_empty() {
            return Err(CompanionError::EmptyInput);
        }

        self.set_phase(TurnPhase::AwaitingReply);
        let asked_at = Utc::now();
        let messages = self
            .assembler
            .build_prompt_at(asked_at, input, &self.memory, &self.history);
        let reply = match self.llm.get_llm_response_with_messages(messages).await {
            // Stored trimmed so the live turn matches what the log reloads.
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                self.set_phase(TurnPhase::Idle);
                error!(error = %format!("{:#}", e), "Reply request failed; turn aborted");
                return Err(CompanionError::Gateway(e));
            }
        };

        self.set_phase(TurnPhase::ReplyReceived);
        if let Err(e) = self.history_store.append(input, &reply).await {
            self.set_phase(TurnPhase::Idle);
            error!(error = %e, reply = %reply, "Could not persist turn; reply dropped");
            return Err(CompanionError::Store(e.to_string()));
        }
        self.history.push(Turn::user(input, asked_at));
        self.history.push(Turn::assistant(reply.clone(), Utc::now()));

        self.set_phase(TurnPhase::MemoryUpdating);
        let memory_error = self.refresh_memory().await.err();
        if let Some(e) = &memory_error {
            warn!(error = %e, "Memory update failed; keeping previous memory");
        }
        self.set_phase(TurnPhase::Idle);

        Ok(TurnOutcome {
            reply,
            memory_error,
        })
    }

    async fn refresh_memory(&mut self) -> Result<()> {
        let update = self
            .updater
            .update(&self.history, &self.memory)
            .await
            .map_err(CompanionError::Gateway)?;
        let saved = self
            .memory_store
            .save(&update.persistent, &update.ephemeral)
            .await
            .map_err(|e| CompanionError::Store(e.to_string()))?;
        self.memory
            .advance(saved.persistent, saved.ephemeral, saved.ephemeral_last_updated);
        info!(
            ephemeral_last_updated = %self.memory.ephemeral_last_updated,
            "Memory updated"
        );
        Ok(())
    }
}

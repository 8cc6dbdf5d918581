use crate::application::error::Result;
use crate::application::{
    route, BatchReport, DispatchError, DispatchStats, DispatcherConfig, DispatcherError, Routed,
};
use crate::infrastructure::{Transport, TransportEvent, TransportListener};
use instant::Instant;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use wordquiz_core::{GameConsumer, Message, MessageBuffer, PlayerId};

/// Lifecycle of a dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatcherState {
    Idle,
    Initializing,
    Running,
    ShuttingDown,
    /// Terminal
    Stopped,
}

/// Transport listener that feeds received messages into the buffer
struct BufferingListener {
    buffer: MessageBuffer,
    peer: String,
}

impl TransportListener for BufferingListener {
    fn on_event(&self, event: TransportEvent) {
        match event {
            TransportEvent::MessageReceived(msg) => {
                tracing::debug!(
                    "📥 {} queued {} from {}",
                    self.peer,
                    msg.event_kind(),
                    msg.sender_id()
                );
                self.buffer.add(msg);
            }
            TransportEvent::Connected => tracing::info!("🟢 {}: transport connected", self.peer),
            TransportEvent::Disconnected => {
                tracing::info!("🔴 {}: transport disconnected", self.peer)
            }
            TransportEvent::Error(e) => tracing::error!("❌ {}: transport error: {}", self.peer, e),
        }
    }
}

/// Owns one transport, buffers what it receives and routes it to the
/// game consumer one batch per tick
pub struct Dispatcher<T: Transport, C: GameConsumer> {
    local_player_id: PlayerId,
    transport: T,
    consumer: C,
    buffer: MessageBuffer,
    config: DispatcherConfig,
    state: DispatcherState,
    stats: DispatchStats,
}

impl<T: Transport, C: GameConsumer> Dispatcher<T, C> {
    pub fn new(local_player_id: PlayerId, transport: T, consumer: C) -> Self {
        Self::with_config(local_player_id, transport, consumer, DispatcherConfig::default())
    }

    pub fn with_config(
        local_player_id: PlayerId,
        transport: T,
        consumer: C,
        config: DispatcherConfig,
    ) -> Self {
        Self {
            local_player_id,
            transport,
            consumer,
            buffer: MessageBuffer::with_capacity(config.buffer_capacity),
            config,
            state: DispatcherState::Idle,
            stats: DispatchStats::default(),
        }
    }

    /// Subscribe to the transport and initialize it (`Idle → Running`)
    ///
    /// A failed initialize leaves the dispatcher `Stopped`.
    pub fn start(&mut self) -> Result<()> {
        self.expect_state(DispatcherState::Idle)?;
        self.state = DispatcherState::Initializing;

        let listener = Arc::new(BufferingListener {
            buffer: self.buffer.clone(),
            peer: self.transport.peer_label().to_string(),
        });
        self.transport.subscribe(listener);

        if let Err(e) = self.transport.initialize() {
            tracing::error!(
                "❌ {}: transport failed to initialize: {}",
                self.transport.peer_label(),
                e
            );
            self.transport.unsubscribe();
            self.state = DispatcherState::Stopped;
            return Err(DispatcherError::Transport(e));
        }

        self.state = DispatcherState::Running;
        tracing::info!(
            "🎯 Dispatcher for {} running (interval {}ms)",
            self.local_player_id,
            self.config.dispatch_interval_ms
        );
        Ok(())
    }

    /// Drain the buffer and route every message, in arrival order
    ///
    /// Each message is isolated: consumer errors and panics are logged and
    /// the rest of the batch still runs. Does nothing unless `Running`.
    pub fn tick(&mut self) -> BatchReport {
        if self.state != DispatcherState::Running {
            return BatchReport::default();
        }

        let batch = self.buffer.drain_all();
        if batch.is_empty() {
            return BatchReport::default();
        }

        let started = Instant::now();
        let mut report = BatchReport {
            drained: batch.len(),
            ..Default::default()
        };

        tracing::debug!(
            "📦 {} dispatching batch of {}",
            self.local_player_id,
            batch.len()
        );

        for msg in &batch {
            let outcome = self.dispatch_one(msg);
            report.record(&outcome);
        }

        report.elapsed = started.elapsed();
        self.stats.absorb(&report);
        report
    }

    fn dispatch_one(&mut self, msg: &Message) -> std::result::Result<Routed, DispatchError> {
        if let Some(latency) = msg.latency_ms() {
            tracing::trace!("⏱️  {} delivered after {}ms", msg.event_kind(), latency);
        }

        let local_player_id = &self.local_player_id;
        let consumer = &mut self.consumer;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            route(local_player_id, consumer, msg)
        }))
        .unwrap_or_else(|panic| Err(DispatchError::Panicked(panic_message(panic))));

        match &outcome {
            Ok(_) => {}
            Err(e) if e.is_warning() => tracing::warn!(
                "⚠️  {} dropped {} from {}: {}",
                self.local_player_id,
                msg.event_kind(),
                msg.sender_id(),
                e
            ),
            Err(e) => tracing::error!(
                "❌ {} failed to dispatch {} from {}: {}",
                self.local_player_id,
                msg.event_kind(),
                msg.sender_id(),
                e
            ),
        }

        outcome
    }

    /// Hand an outgoing message to the transport (only while `Running`)
    pub fn send(&mut self, msg: Message) {
        if self.state != DispatcherState::Running {
            tracing::warn!(
                "⚠️  {} is {:?}, not sending {}",
                self.local_player_id,
                self.state,
                msg.event_kind()
            );
            return;
        }
        self.transport.send(msg);
    }

    /// Stop dispatching and tear the transport down (best effort)
    ///
    /// Messages still buffered are discarded. Calling it again is a no-op.
    pub fn shutdown(&mut self) {
        match self.state {
            DispatcherState::Stopped | DispatcherState::ShuttingDown => return,
            DispatcherState::Idle => {
                self.state = DispatcherState::Stopped;
                return;
            }
            DispatcherState::Initializing | DispatcherState::Running => {}
        }

        self.state = DispatcherState::ShuttingDown;

        if let Err(e) = self.transport.shutdown() {
            tracing::error!(
                "❌ {}: transport shutdown failed: {}",
                self.transport.peer_label(),
                e
            );
        }
        self.transport.unsubscribe();

        let undelivered = self.buffer.len();
        if undelivered > 0 {
            tracing::debug!(
                "🗑️  {} discarding {} undelivered messages",
                self.local_player_id,
                undelivered
            );
        }

        self.state = DispatcherState::Stopped;
        tracing::info!(
            "🛑 Dispatcher for {} stopped ({} messages dispatched in {} batches)",
            self.local_player_id,
            self.stats.dispatched,
            self.stats.batches
        );
    }

    pub fn local_player_id(&self) -> &PlayerId {
        &self.local_player_id
    }

    pub fn state(&self) -> DispatcherState {
        self.state
    }

    pub fn stats(&self) -> DispatchStats {
        self.stats
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Messages received but not yet dispatched
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    pub fn consumer_mut(&mut self) -> &mut C {
        &mut self.consumer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    fn expect_state(&self, expected: DispatcherState) -> Result<()> {
        if self.state != expected {
            return Err(DispatcherError::InvalidState {
                expected,
                actual: self.state,
            });
        }
        Ok(())
    }
}

impl<T: Transport, C: GameConsumer> std::fmt::Debug for Dispatcher<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("local_player_id", &self.local_player_id)
            .field("peer", &self.transport.peer_label())
            .field("state", &self.state)
            .field("pending", &self.buffer.len())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

impl<T: Transport, C: GameConsumer> Drop for Dispatcher<T, C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

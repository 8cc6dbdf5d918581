use crate::application::error::Result;
use crate::application::{DispatchStats, Dispatcher, DispatcherError, DispatcherState};
use crate::infrastructure::Transport;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use wordquiz_core::{GameConsumer, Message};

/// Runs a dispatcher on a tokio task, draining once per configured interval
///
/// The game side keeps a handle: outgoing messages go through `send`, the
/// latest totals are readable through `stats`. `shutdown` lets the batch in
/// progress finish, tears the transport down and returns the dispatcher.
pub struct DispatchLoop<T: Transport, C: GameConsumer> {
    /// Outgoing messages for the transport
    outbound_tx: mpsc::Sender<Message>,

    /// Latest totals (updated after every tick)
    stats_rx: watch::Receiver<DispatchStats>,

    /// Stop signal
    shutdown_tx: oneshot::Sender<()>,

    /// Background task, yields the dispatcher back
    task_handle: JoinHandle<Dispatcher<T, C>>,
}

impl<T, C> DispatchLoop<T, C>
where
    T: Transport + 'static,
    C: GameConsumer + Send + 'static,
{
    /// Start the dispatcher (if still idle) and spawn its loop
    pub fn spawn(mut dispatcher: Dispatcher<T, C>) -> Result<Self> {
        if dispatcher.state() == DispatcherState::Idle {
            dispatcher.start()?;
        }
        if dispatcher.state() != DispatcherState::Running {
            return Err(DispatcherError::InvalidState {
                expected: DispatcherState::Running,
                actual: dispatcher.state(),
            });
        }

        let (outbound_tx, mut outbound_rx) = mpsc::channel::<Message>(100);
        let (stats_tx, stats_rx) = watch::channel(dispatcher.stats());
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let period = dispatcher.config().dispatch_interval();

        let task_handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately; the first drain waits one period
            interval.tick().await;

            tracing::info!(
                "DispatchLoop started for {} ({:?} interval)",
                dispatcher.local_player_id(),
                period
            );

            loop {
                tokio::select! {
                    biased;

                    // Also fires when the handle is dropped without shutdown
                    _ = &mut shutdown_rx => break,

                    Some(msg) = outbound_rx.recv() => dispatcher.send(msg),

                    _ = interval.tick() => {
                        let report = dispatcher.tick();
                        if !report.is_empty() {
                            tracing::debug!(
                                "DispatchLoop {} routed {}/{} in {:?}",
                                dispatcher.local_player_id(),
                                report.dispatched,
                                report.drained,
                                report.elapsed
                            );
                            let _ = stats_tx.send(dispatcher.stats());
                        }
                    }
                }
            }

            dispatcher.shutdown();
            let _ = stats_tx.send(dispatcher.stats());
            dispatcher
        });

        Ok(Self {
            outbound_tx,
            stats_rx,
            shutdown_tx,
            task_handle,
        })
    }

    /// Queue an outgoing message (sent on the loop's task)
    pub async fn send(&self, msg: Message) -> Result<()> {
        self.outbound_tx
            .send(msg)
            .await
            .map_err(|_| DispatcherError::ChannelClosed)
    }

    /// Non-async variant of `send` for callers outside the runtime
    pub fn try_send(&self, msg: Message) -> Result<()> {
        self.outbound_tx
            .try_send(msg)
            .map_err(|_| DispatcherError::ChannelClosed)
    }

    /// Latest totals (never blocks)
    pub fn stats(&self) -> DispatchStats {
        *self.stats_rx.borrow()
    }

    /// Subscribe to stats updates
    pub fn subscribe(&self) -> watch::Receiver<DispatchStats> {
        self.stats_rx.clone()
    }

    /// Stop the loop and get the dispatcher back (in `Stopped`)
    pub async fn shutdown(self) -> Result<Dispatcher<T, C>> {
        let _ = self.shutdown_tx.send(());
        self.task_handle
            .await
            .map_err(|e| DispatcherError::LoopFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{SimulatedNetwork, SimulatedTransport};
    use std::time::Duration;
    use wordquiz_core::{ConsumerError, PlayerId};

    #[derive(Default)]
    struct Counter {
        questions: usize,
    }

    impl GameConsumer for Counter {
        fn load_next_question(&mut self) -> std::result::Result<(), ConsumerError> {
            self.questions += 1;
            Ok(())
        }

        fn on_remote_answer_result(&mut self, _: bool) -> std::result::Result<(), ConsumerError> {
            Ok(())
        }
    }

    fn dispatcher(
        network: &SimulatedNetwork,
        name: &str,
    ) -> Dispatcher<SimulatedTransport, Counter> {
        let config = crate::application::DispatcherConfig::new().with_dispatch_interval(10);
        Dispatcher::with_config(
            PlayerId::new(name).unwrap(),
            SimulatedTransport::with_network(network.clone(), name),
            Counter::default(),
            config,
        )
    }

    #[tokio::test]
    async fn test_loop_dispatches_and_shuts_down() {
        let network = SimulatedNetwork::new();
        let host = DispatchLoop::spawn(dispatcher(&network, "P1")).unwrap();
        let guest = DispatchLoop::spawn(dispatcher(&network, "P2")).unwrap();

        host.send(Message::broadcast_question(PlayerId::new("P1").unwrap()))
            .await
            .unwrap();

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert_eq!(guest.stats().dispatched, 1);

        let host = host.shutdown().await.unwrap();
        let guest = guest.shutdown().await.unwrap();

        assert_eq!(host.state(), DispatcherState::Stopped);
        assert_eq!(guest.state(), DispatcherState::Stopped);
        assert_eq!(host.consumer().questions, 0);
        assert_eq!(guest.consumer().questions, 1);
        assert_eq!(network.peer_count(), 0);
    }

    #[tokio::test]
    async fn test_spawn_rejects_stopped_dispatcher() {
        let network = SimulatedNetwork::new();
        let mut d = dispatcher(&network, "P1");
        d.shutdown();

        let result = DispatchLoop::spawn(d);
        assert!(matches!(
            result,
            Err(DispatcherError::InvalidState {
                actual: DispatcherState::Stopped,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_send_after_shutdown_fails() {
        let network = SimulatedNetwork::new();
        let handle = DispatchLoop::spawn(dispatcher(&network, "P1")).unwrap();
        let outbound = handle.outbound_tx.clone();

        handle.shutdown().await.unwrap();

        let result = outbound
            .send(Message::broadcast_question(PlayerId::new("P1").unwrap()))
            .await;
        assert!(result.is_err());
    }
}

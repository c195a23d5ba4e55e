use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use super::machine::{RevealSnapshot, RevealStateMachine};
use crate::config::RevealConfig;

/// Placeholder deadline for the disabled timer branch
const IDLE_WAIT: Duration = Duration::from_secs(3600);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealCommand {
    Advance,
    Reset,
}

/// Runs a [`RevealStateMachine`] on the tokio timer wheel
///
/// Commands go in over an mpsc channel; every state or zoom change is
/// published on a watch channel. Dropping the driver stops its task.
pub struct RevealDriver {
    cmd_tx: mpsc::UnboundedSender<RevealCommand>,
    snapshot_rx: watch::Receiver<RevealSnapshot>,
    task: JoinHandle<()>,
}

impl RevealDriver {
    /// Spawn the driver task; must be called inside a tokio runtime
    pub fn spawn(config: RevealConfig) -> Self {
        let machine = RevealStateMachine::new(config);
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(machine.snapshot());

        let task = tokio::spawn(run(machine, cmd_rx, snapshot_tx));

        Self {
            cmd_tx,
            snapshot_rx,
            task,
        }
    }

    pub fn advance(&self) {
        self.send(RevealCommand::Advance);
    }

    pub fn reset(&self) {
        self.send(RevealCommand::Reset);
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> RevealSnapshot {
        *self.snapshot_rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<RevealSnapshot> {
        self.snapshot_rx.clone()
    }

    fn send(&self, command: RevealCommand) {
        if self.cmd_tx.send(command).is_err() {
            warn!(?command, "Reveal driver task has stopped");
        }
    }
}

impl Drop for RevealDriver {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    mut machine: RevealStateMachine,
    mut cmd_rx: mpsc::UnboundedReceiver<RevealCommand>,
    snapshot_tx: watch::Sender<RevealSnapshot>,
) {
    loop {
        let deadline = machine.next_deadline();
        let timer = sleep_until(deadline.unwrap_or_else(|| Instant::now() + IDLE_WAIT));

        tokio::select! {
            command = cmd_rx.recv() => {
                let now = Instant::now();
                match command {
                    Some(RevealCommand::Advance) => {
                        machine.advance(now);
                    }
                    Some(RevealCommand::Reset) => {
                        machine.reset(now);
                    }
                    None => {
                        debug!("Reveal driver command channel closed");
                        break;
                    }
                }
            }

            _ = timer, if deadline.is_some() => {
                machine.poll(Instant::now());
            }
        }

        publish(&snapshot_tx, machine.snapshot());
    }
}

fn publish(tx: &watch::Sender<RevealSnapshot>, snapshot: RevealSnapshot) {
    tx.send_if_modified(|current| {
        if current.state == snapshot.state && current.zoomed == snapshot.zoomed {
            false
        } else {
            *current = snapshot;
            true
        }
    });
}

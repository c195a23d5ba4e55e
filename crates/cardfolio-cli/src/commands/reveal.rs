use std::time::Duration;

use anyhow::{anyhow, Result};
use tokio::time::{timeout, Instant};

use cardfolio_core::{AppConfig, RevealDriver, RevealState};

/// Upper bound for one full advance/reset cycle
const CYCLE_TIMEOUT: Duration = Duration::from_secs(30);

pub async fn run(config: &AppConfig) -> Result<()> {
    let driver = RevealDriver::spawn(config.reveal);
    let mut rx = driver.subscribe();
    let start = Instant::now();

    let print = |state: RevealState, zoomed: bool| {
        println!(
            "{:>6} ms  {:<10} {}",
            start.elapsed().as_millis(),
            state.to_string(),
            if zoomed { "zoomed" } else { "" }
        );
    };

    let initial = driver.snapshot();
    print(initial.state, initial.zoomed);
    driver.advance();

    let mut reset_sent = false;
    let cycle = async {
        loop {
            if rx.changed().await.is_err() {
                return Err(anyhow!("reveal driver stopped"));
            }
            let snapshot = *rx.borrow_and_update();
            print(snapshot.state, snapshot.zoomed);

            match snapshot.state {
                RevealState::Flipped if !reset_sent => {
                    driver.reset();
                    reset_sent = true;
                }
                RevealState::Idle if reset_sent => return Ok(()),
                _ => {}
            }
        }
    };

    timeout(CYCLE_TIMEOUT, cycle)
        .await
        .map_err(|_| anyhow!("reveal cycle did not finish within {:?}", CYCLE_TIMEOUT))?
}

use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

pub const REFRESH_EVERY: Duration = Duration::from_secs(30);

/// Re-pulls today's slate on a fixed period. Yesterday and the team season
/// only change on demand, so they are never polled.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
    period: Duration,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>) -> Self {
        Self { network_requests, period: REFRESH_EVERY }
    }

    pub async fn run(self) {
        // First tick one period out; startup already asked for today.
        let mut ticks = interval_at(Instant::now() + self.period, self.period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticks.tick().await;
            if self.network_requests.send(NetworkRequest::RefreshScores).await.is_err() {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_refresh_waits_one_period() {
        let (tx, mut rx) = mpsc::channel(4);
        let task = tokio::spawn(PeriodicRefresher { network_requests: tx, period: Duration::from_secs(30) }.run());

        tokio::time::sleep(Duration::from_secs(29)).await;
        assert!(rx.try_recv().is_err());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert!(matches!(rx.recv().await, Some(NetworkRequest::RefreshScores)));
        task.abort();
    }
}

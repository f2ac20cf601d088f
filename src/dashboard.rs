//! Orchestrates the three analytics fetches as one all-or-nothing unit and
//! owns the visible state machine.

use anyhow::Result;
use futures::try_join;
use indicatif::ProgressBar;
use tracing::debug;

use crate::client::{AnalyticsProvider, DeviationStats, PriceStats};
use crate::coin::Coin;
use crate::history::{self, PricePoint};

/// The result of one combined fetch, committed atomically. Stats, deviation
/// and history always come from the same fetch cycle; a partial mix is never
/// constructed.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub coin: Coin,
    pub days: u32,
    pub stats: PriceStats,
    pub deviation: DeviationStats,
    pub history: Vec<PricePoint>,
}

/// Visible dashboard state. Exactly one phase at a time.
#[derive(Debug, Clone)]
pub enum Phase {
    Idle,
    Loading,
    Ready(Snapshot),
    Error(String),
}

/// Identifies one fetch triple. Only the latest issued token may commit;
/// completions presenting a superseded token are discarded, so a slow
/// response can never overwrite state for a newer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

pub struct Dashboard<'a> {
    provider: &'a dyn AnalyticsProvider,
    days: u32,
    phase: Phase,
    latest_token: u64,
}

impl<'a> Dashboard<'a> {
    pub fn new(provider: &'a dyn AnalyticsProvider, days: u32) -> Self {
        Dashboard {
            provider,
            days,
            phase: Phase::Idle,
            latest_token: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Starts a new fetch triple: clears any previous error, enters Loading
    /// and issues the token its completion must present to commit.
    pub fn begin(&mut self) -> RequestToken {
        self.latest_token += 1;
        self.phase = Phase::Loading;
        RequestToken(self.latest_token)
    }

    /// Issues the three requests concurrently and joins them all-or-nothing:
    /// if any one fails, the whole triple fails and no partial data survives.
    pub async fn fetch(&self, coin: Coin, pb: ProgressBar) -> Result<Snapshot> {
        debug!("Fetching analytics for {coin} over {} days", self.days);

        let stats = async {
            let stats = self.provider.fetch_stats(coin).await?;
            pb.inc(1);
            Ok::<_, anyhow::Error>(stats)
        };
        let deviation = async {
            let deviation = self.provider.fetch_deviation(coin).await?;
            pb.inc(1);
            Ok::<_, anyhow::Error>(deviation)
        };
        let chart = async {
            let chart = self.provider.fetch_market_chart(coin, self.days).await?;
            pb.inc(1);
            Ok::<_, anyhow::Error>(chart)
        };

        let (stats, deviation, chart) = try_join!(stats, deviation, chart)?;

        Ok(Snapshot {
            coin,
            days: self.days,
            stats,
            deviation,
            history: history::price_points(&chart),
        })
    }

    /// Applies a completed fetch, unless a newer selection superseded it.
    /// Returns whether the outcome was committed.
    pub fn commit(&mut self, token: RequestToken, outcome: Result<Snapshot>) -> bool {
        if token.0 != self.latest_token {
            debug!(
                "Discarding stale fetch result (token {} superseded by {})",
                token.0, self.latest_token
            );
            return false;
        }
        self.phase = match outcome {
            Ok(snapshot) => Phase::Ready(snapshot),
            Err(e) => Phase::Error(e.to_string()),
        };
        true
    }

    /// Convenience path: begin, fetch and commit one selection.
    pub async fn select_coin(&mut self, coin: Coin, pb: ProgressBar) {
        let token = self.begin();
        let outcome = self.fetch(coin, pb).await;
        self.commit(token, outcome);
    }
}

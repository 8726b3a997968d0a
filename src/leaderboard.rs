//! Per-domain leaderboard
//!
//! Mirrors the server's cumulative table: one row per domain, ordered by
//! lifetime score. Cached in LocalStorage so the menu has something to
//! show while the network is down.

use serde::{Deserialize, Serialize};

use crate::domain::Domain;

/// Cumulative stats for one domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub domain: Domain,
    /// Best single-run score
    #[serde(default)]
    pub high_score: u64,
    /// Sum of every reported run score
    #[serde(default)]
    pub total_score: u64,
    /// Sum of every reported run's beans
    #[serde(default)]
    pub total_beans: u64,
}

impl CategoryStats {
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            high_score: 0,
            total_score: 0,
            total_beans: 0,
        }
    }

    /// Fold one finished run in. Returns true if it set a new high score.
    pub fn merge(&mut self, score: u64, beans: u64) -> bool {
        self.total_score = self.total_score.saturating_add(score);
        self.total_beans = self.total_beans.saturating_add(beans);
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }
}

/// All domains, sorted by total score (descending)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Leaderboard {
    pub rows: Vec<CategoryStats>,
}

impl Leaderboard {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "alley_run_leaderboard";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build from rows in any order (e.g. a server response)
    pub fn from_rows(rows: Vec<CategoryStats>) -> Self {
        let mut board = Self { rows };
        board.sort();
        board
    }

    /// Record a finished run. Returns true if it is a new high for its domain.
    pub fn record(&mut self, domain: Domain, score: u64, beans: u64) -> bool {
        let new_high = match self.rows.iter_mut().find(|r| r.domain == domain) {
            Some(row) => row.merge(score, beans),
            None => {
                let mut row = CategoryStats::new(domain);
                let new_high = row.merge(score, beans);
                self.rows.push(row);
                new_high
            }
        };
        self.sort();
        new_high
    }

    pub fn get(&self, domain: Domain) -> Option<&CategoryStats> {
        self.rows.iter().find(|r| r.domain == domain)
    }

    /// 1-indexed position of a domain, None if it never reported
    pub fn rank(&self, domain: Domain) -> Option<usize> {
        self.rows.iter().position(|r| r.domain == domain).map(|i| i + 1)
    }

    /// Leading domain (if any)
    pub fn leader(&self) -> Option<&CategoryStats> {
        self.rows.first()
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn sort(&mut self) {
        // Stable: ties keep first-reported order
        self.rows.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    }

    /// Load the cached leaderboard from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(board) = serde_json::from_str::<Leaderboard>(&json) {
                    log::info!("Loaded cached leaderboard ({} domains)", board.rows.len());
                    return Self::from_rows(board.rows);
                }
            }
        }

        log::info!("No cached leaderboard, starting fresh");
        Self::new()
    }

    /// Save the leaderboard to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Leaderboard cached ({} domains)", self.rows.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

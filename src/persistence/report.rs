//! Leaderboard service contract
//!
//! The engine never talks to the network. At game over the caller builds a
//! `ScoreReport` from the final state and hands it to a `ScoreSink`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Domain;
use crate::leaderboard::{CategoryStats, Leaderboard};
use crate::sim::GameState;

/// Current update route
pub const UPDATE_PATH: &str = "/api/update";
pub const LEADERBOARD_PATH: &str = "/api/leaderboard";

/// Body of `POST /api/update`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    pub domain: Domain,
    pub score: u64,
    pub beans: u64,
}

impl ScoreReport {
    /// Report for a finished run; None while the run is still live
    pub fn from_state(state: &GameState) -> Option<Self> {
        if !state.is_terminal() {
            return None;
        }
        Some(Self {
            domain: state.domain,
            score: state.stats.score,
            beans: state.stats.beans_collected as u64,
        })
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        serde_json::to_string(self).map_err(|e| ReportError::Encode(e.to_string()))
    }
}

/// Server reply: `{ message }` on success, `{ error }` on rejection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    Encode(String),
    Network(String),
    Status { status: u16, body: String },
    Decode(String),
    Rejected(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encode(msg) => write!(f, "could not encode report: {msg}"),
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Status { status, body } => write!(f, "HTTP {status}: {body}"),
            Self::Decode(msg) => write!(f, "could not decode response: {msg}"),
            Self::Rejected(msg) => write!(f, "server rejected report: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {}

/// Anything that accepts finished-run reports
pub trait ScoreSink {
    fn submit(&mut self, report: &ScoreReport) -> Result<(), ReportError>;
}

/// In-process sink: merges straight into a leaderboard
impl ScoreSink for Leaderboard {
    fn submit(&mut self, report: &ScoreReport) -> Result<(), ReportError> {
        self.record(report.domain, report.score, report.beans);
        Ok(())
    }
}

/// Submit once. Failures are logged and swallowed so end-of-run UI never waits on them.
pub fn report_run(sink: &mut impl ScoreSink, report: &ScoreReport) -> bool {
    match sink.submit(report) {
        Ok(()) => {
            log::info!(
                "Reported {} run: score {}, beans {}",
                report.domain,
                report.score,
                report.beans
            );
            true
        }
        Err(e) => {
            log::warn!("Failed to update leaderboard: {e}");
            false
        }
    }
}

/// Interpret the reply to an update request
pub fn parse_update_response(status: u16, body: &str) -> Result<UpdateResponse, ReportError> {
    if !(200..300).contains(&status) {
        return Err(ReportError::Status {
            status,
            body: body.to_string(),
        });
    }
    let response: UpdateResponse =
        serde_json::from_str(body).map_err(|e| ReportError::Decode(e.to_string()))?;
    if let Some(error) = &response.error {
        return Err(ReportError::Rejected(error.clone()));
    }
    Ok(response)
}

/// Interpret the reply to `GET /api/leaderboard`. Unknown domains are skipped.
pub fn parse_leaderboard(status: u16, body: &str) -> Result<Leaderboard, ReportError> {
    if !(200..300).contains(&status) {
        return Err(ReportError::Status {
            status,
            body: body.to_string(),
        });
    }
    let raw: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| ReportError::Decode(e.to_string()))?;
    let rows = raw
        .into_iter()
        .filter_map(|row| match serde_json::from_value::<CategoryStats>(row) {
            Ok(stats) => Some(stats),
            Err(e) => {
                log::debug!("Skipping leaderboard row: {e}");
                None
            }
        })
        .collect();
    Ok(Leaderboard::from_rows(rows))
}

/// Browser gateway using `fetch`
#[cfg(target_arch = "wasm32")]
pub struct FetchGateway {
    base_url: String,
}

#[cfg(target_arch = "wasm32")]
impl FetchGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Fetch the shared leaderboard (used by the menu)
    pub async fn fetch_leaderboard(&self) -> Result<Leaderboard, ReportError> {
        let url = format!("{}{}", self.base_url, LEADERBOARD_PATH);
        let (status, body) = send(&url, "GET", None).await?;
        parse_leaderboard(status, &body)
    }
}

/// Dispatches without waiting; the outcome only reaches the log
#[cfg(target_arch = "wasm32")]
impl ScoreSink for FetchGateway {
    fn submit(&mut self, report: &ScoreReport) -> Result<(), ReportError> {
        let body = report.to_json()?;
        let url = format!("{}{}", self.base_url, UPDATE_PATH);
        wasm_bindgen_futures::spawn_local(async move {
            let outcome = match send(&url, "POST", Some(&body)).await {
                Ok((status, text)) => parse_update_response(status, &text),
                Err(e) => Err(e),
            };
            match outcome {
                Ok(response) => log::info!(
                    "Leaderboard updated: {}",
                    response.message.unwrap_or_default()
                ),
                Err(e) => log::warn!("Failed to update leaderboard: {e}"),
            }
        });
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
async fn send(url: &str, method: &str, body: Option<&str>) -> Result<(u16, String), ReportError> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    fn js_err(value: JsValue) -> ReportError {
        ReportError::Network(format!("{value:?}"))
    }

    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = body {
        opts.set_body(&JsValue::from_str(body));
    }
    let request = Request::new_with_str_and_init(url, &opts).map_err(js_err)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(js_err)?;

    let window = web_sys::window().ok_or_else(|| ReportError::Network("no window".into()))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_err)?;
    let response: Response = value.dyn_into().map_err(js_err)?;
    let status = response.status();
    let text = JsFuture::from(response.text().map_err(js_err)?)
        .await
        .map_err(js_err)?;
    Ok((status, text.as_string().unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;
    use crate::tuning::Tuning;

    struct FailingSink;

    impl ScoreSink for FailingSink {
        fn submit(&mut self, _report: &ScoreReport) -> Result<(), ReportError> {
            Err(ReportError::Network("connection refused".into()))
        }
    }

    fn report() -> ScoreReport {
        ScoreReport {
            domain: Domain::Water,
            score: 321,
            beans: 7,
        }
    }

    #[test]
    fn test_report_body_matches_route_contract() {
        let json = report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["domain"], "water");
        assert_eq!(value["score"], 321);
        assert_eq!(value["beans"], 7);
    }

    #[test]
    fn test_report_only_for_finished_runs() {
        let mut state = GameState::new(Domain::Fire, Tuning::desktop(), 1);
        state.phase = GamePhase::Running;
        assert!(ScoreReport::from_state(&state).is_none());

        state.phase = GamePhase::Terminal;
        state.stats.lives = 0;
        state.stats.score = 55;
        state.stats.beans_collected = 2;
        assert_eq!(
            ScoreReport::from_state(&state),
            Some(ScoreReport {
                domain: Domain::Fire,
                score: 55,
                beans: 2
            })
        );
    }

    #[test]
    fn test_failures_are_swallowed() {
        assert!(!report_run(&mut FailingSink, &report()));
    }

    #[test]
    fn test_leaderboard_sink_merges() {
        let mut board = Leaderboard::new();
        assert!(report_run(&mut board, &report()));
        assert!(report_run(&mut board, &report()));
        let row = board.get(Domain::Water).unwrap();
        assert_eq!(row.total_score, 642);
        assert_eq!(row.total_beans, 14);
        assert_eq!(row.high_score, 321);
    }

    #[test]
    fn test_parse_update_response() {
        let ok = parse_update_response(200, r#"{"message":"Updated successfully"}"#).unwrap();
        assert_eq!(ok.message.as_deref(), Some("Updated successfully"));

        assert!(matches!(
            parse_update_response(400, r#"{"error":"Missing or invalid data."}"#),
            Err(ReportError::Status { status: 400, .. })
        ));
        assert!(matches!(
            parse_update_response(200, r#"{"error":"Server error"}"#),
            Err(ReportError::Rejected(_))
        ));
        assert!(matches!(
            parse_update_response(200, "<html>"),
            Err(ReportError::Decode(_))
        ));
    }

    #[test]
    fn test_parse_leaderboard_skips_unknown_domains() {
        let body = r#"[
            {"domain":"fire","total_score":10,"total_beans":1},
            {"domain":"air","total_score":99,"total_beans":9},
            {"domain":"earth","high_score":40,"total_score":80,"total_beans":3}
        ]"#;
        let board = parse_leaderboard(200, body).unwrap();
        assert_eq!(board.rows.len(), 2);
        assert_eq!(board.leader().unwrap().domain, Domain::Earth);
        assert!(parse_leaderboard(500, "").is_err());
    }
}

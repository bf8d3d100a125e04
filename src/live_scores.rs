// Simulated live score feed for the LiveSports view
//
// There is no scores backend; the ticker advances a plausible T20
// scoreboard on every poll and the front-end just renders it.

use std::sync::Mutex;

use rand::Rng;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBoard {
    pub fixture: &'static str,
    pub note: &'static str,
    pub runs: u32,
    pub wickets: u32,
    /// Cricket overs: the fraction counts balls, .5 carries to the next over
    pub overs: f64,
}

impl ScoreBoard {
    fn opening() -> Self {
        Self {
            fixture: "IND vs AUS",
            note: "India elected to bat",
            runs: 142,
            wickets: 3,
            overs: 18.4,
        }
    }

    /// One ball: advance overs with six-ball carry, sometimes score,
    /// rarely lose a wicket (never past 10).
    fn tick<R: Rng>(&mut self, rng: &mut R) {
        let mut overs = self.overs + 0.1;
        let tenths = ((overs - overs.floor()) * 10.0).round();
        if tenths >= 6.0 {
            overs = overs.floor() + 1.0;
        }
        self.overs = (overs * 10.0).round() / 10.0;

        let event: f64 = rng.gen();
        if event > 0.7 {
            self.runs += rng.gen_range(1..=4);
        }
        if event > 0.95 && self.wickets < 10 {
            self.wickets += 1;
        }
    }
}

pub struct LiveScoreFeed {
    board: Mutex<ScoreBoard>,
}

impl LiveScoreFeed {
    pub fn new() -> Self {
        Self {
            board: Mutex::new(ScoreBoard::opening()),
        }
    }

    /// Advance the simulation one ball and return the new board.
    pub fn poll(&self) -> ScoreBoard {
        let mut board = self.board.lock().unwrap();
        board.tick(&mut rand::thread_rng());
        board.clone()
    }
}

impl Default for LiveScoreFeed {
    fn default() -> Self {
        Self::new()
    }
}

// --- Commands ---

#[tauri::command]
pub fn poll_live_score(state: tauri::State<'_, crate::AppState>) -> Result<ScoreBoard, String> {
    Ok(state.scores.poll())
}

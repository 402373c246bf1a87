//! Core data models for basketball league data
//!
//! This module contains the typed records for every resource kind the client
//! fetches: games, standings, league leaders, box scores, rosters, player
//! profiles, and game logs. Remote JSON is decoded into these records once at
//! the adapter boundary; fields the feeds may omit are `Option<T>` so each
//! consumer decides what "missing" means.

pub mod teams;

pub use teams::{all_teams, team_by_id, team_by_tricode, team_id_for, tricode_from_name, Team};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled, live, or finished game from a scoreboard feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    /// League-assigned game identifier
    pub game_id: String,
    /// Feed status label, e.g. "7:30 pm ET", "Q3 5:02", "Final", "Final/OT"
    pub status_text: String,
    /// Current period, when the game is underway
    pub period: Option<u32>,
    /// Raw feed clock, e.g. "PT05M30.00S"
    pub game_clock: Option<String>,
    /// Scheduled tip-off in UTC
    pub game_time_utc: Option<DateTime<Utc>>,
    /// Visiting team
    pub away: TeamSide,
    /// Home team
    pub home: TeamSide,
}

/// One team's side of a game: identity, running score, per-period scores
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamSide {
    /// League-assigned team identifier
    pub team_id: Option<i64>,
    /// Three-letter team code, the join key across feeds
    pub tricode: String,
    /// Franchise city
    pub city: Option<String>,
    /// Franchise nickname
    pub name: Option<String>,
    /// Running total score; absent before tip-off
    pub score: Option<u32>,
    /// Score per period, in feed order
    pub periods: Vec<PeriodScore>,
}

/// Points scored by one team in one period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodScore {
    /// Period number; 1-4 regulation, 5+ overtime
    pub period: u32,
    /// Points in that period
    pub score: u32,
}

/// Conference standings; `(None, None)` is the neutral empty value the
/// client returns when nothing could be fetched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Standings {
    /// Eastern conference rows, sorted by playoff rank
    pub east: Option<Vec<StandingRow>>,
    /// Western conference rows, sorted by playoff rank
    pub west: Option<Vec<StandingRow>>,
}

impl Standings {
    /// True when neither conference has any rows
    pub fn is_empty(&self) -> bool {
        self.east.as_ref().map_or(true, Vec::is_empty)
            && self.west.as_ref().map_or(true, Vec::is_empty)
    }
}

/// One team's line in the conference standings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingRow {
    pub team_id: Option<i64>,
    pub team_city: String,
    pub team_name: String,
    /// "East" or "West" as reported by the feed
    pub conference: String,
    pub playoff_rank: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_pct: f64,
}

/// Top players per statistical category; all-empty is the neutral value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeagueLeaders {
    pub points: Vec<LeaderEntry>,
    pub rebounds: Vec<LeaderEntry>,
    pub assists: Vec<LeaderEntry>,
    pub triple_doubles: Vec<TripleDoubleEntry>,
}

impl LeagueLeaders {
    /// True when every category is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
            && self.rebounds.is_empty()
            && self.assists.is_empty()
            && self.triple_doubles.is_empty()
    }
}

/// One leader-board line: player, team code, category value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderEntry {
    pub player: String,
    pub team: String,
    pub value: f64,
}

/// Triple-double tally for one player over the season
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripleDoubleEntry {
    pub player: String,
    pub team: String,
    pub count: u32,
}

/// Full box score for one game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxScore {
    pub game_id: String,
    pub status_text: String,
    pub away: BoxTeam,
    pub home: BoxTeam,
}

/// One team's box-score side: score lines plus per-player stats
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoxTeam {
    pub team_id: Option<i64>,
    pub tricode: String,
    pub name: Option<String>,
    pub score: Option<u32>,
    pub periods: Vec<PeriodScore>,
    pub players: Vec<BoxPlayer>,
}

/// One player's box-score row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxPlayer {
    pub person_id: i64,
    pub name: String,
    /// True for the starting five
    pub starter: bool,
    /// Absent for players who did not enter the game
    pub statistics: Option<PlayerStatLine>,
}

/// Counting stats for one player in one game
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerStatLine {
    /// Raw feed minutes, e.g. "PT31M12.00S"
    pub minutes: Option<String>,
    pub points: u32,
    pub rebounds_total: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub field_goals_made: u32,
    pub field_goals_attempted: u32,
    pub three_pointers_made: u32,
    pub three_pointers_attempted: u32,
    pub free_throws_made: u32,
    pub free_throws_attempted: u32,
    pub turnovers: u32,
    pub plus_minus: i32,
}

/// One player-game line from the league-wide game log, the raw material for
/// milestone detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerGameLine {
    pub player: String,
    pub team: String,
    pub stats: PlayerStatLine,
}

/// One roster line for a team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterPlayer {
    pub player_id: i64,
    pub name: String,
    pub jersey_number: Option<String>,
    pub position: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
}

/// Biographical and season-average profile for one player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub person_id: i64,
    pub display_name: String,
    /// Feed height string, e.g. "6-9"
    pub height: Option<String>,
    /// Feed weight string, in pounds
    pub weight: Option<String>,
    pub school: Option<String>,
    pub country: Option<String>,
    pub birthdate: Option<String>,
    pub points_per_game: Option<f64>,
    pub rebounds_per_game: Option<f64>,
    pub assists_per_game: Option<f64>,
}

/// One line of a team's or player's season game log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameLogEntry {
    pub game_id: Option<String>,
    /// Feed date string, e.g. "2025-02-01"
    pub game_date: String,
    /// Matchup label, e.g. "LAL vs. BOS" (home) or "LAL @ BOS" (road)
    pub matchup: String,
    /// "W" or "L" once the game is final
    pub win_loss: Option<String>,
    pub points: Option<u32>,
}

/// Season head-to-head summary between two teams; the zero-value default is
/// returned when either log fetch fails or the teams have not met
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeadToHead {
    pub last_meeting: Option<LastMeeting>,
    pub series: SeasonSeries,
}

/// The most recent game the two teams played against each other
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastMeeting {
    pub date: String,
    pub points_a: Option<u32>,
    pub points_b: Option<u32>,
}

/// Win tally over the shared games this season
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonSeries {
    pub wins_a: u32,
    pub wins_b: u32,
    pub games: u32,
}

/// Aligned quarter-by-quarter score table for rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterScores {
    /// Column labels: "Q1".."Q4", optionally "OT", then "Total"
    pub headers: Vec<String>,
    pub away: Vec<u32>,
    pub home: Vec<u32>,
}

/// Resource kinds with their own cache tiers and served-from-cache flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Games,
    Standings,
    LeagueLeaders,
    BoxScore,
}

//! Remote statistics endpoint adapter
//!
//! This module wraps the two remote surfaces the dashboard reads from: the
//! live CDN feeds (today's scoreboard, box scores) which serve plain
//! camelCase JSON, and the stats host (standings, leaders, rosters, profiles,
//! game logs) which serves tabular `resultSets` payloads of header names plus
//! row arrays. Each response is decoded here, once, into the typed records in
//! `crate::data`; absent fields become `None` and every failure surfaces as a
//! `FetchError` for the retry layer above.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::data::{
    BoxPlayer, BoxScore, BoxTeam, Game, GameLogEntry, LeaderEntry, PeriodScore, PlayerGameLine,
    PlayerProfile, PlayerStatLine, RosterPlayer, StandingRow, Standings, TeamSide,
};

/// Base URL for the live CDN feeds
const LIVE_BASE_URL: &str = "https://cdn.nba.com/static/json/liveData";

/// Base URL for the stats host
const STATS_BASE_URL: &str = "https://stats.nba.com/stats";

/// Per-request timeout; the stats host is slow and occasionally hangs
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when fetching or decoding remote data
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed (transport, timeout, or non-success status)
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field or table in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),
}

/// Leader-board statistical categories the stats host can rank by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaderCategory {
    Points,
    Rebounds,
    Assists,
}

impl LeaderCategory {
    /// Column abbreviation used both as query parameter and result column
    pub fn stat_column(self) -> &'static str {
        match self {
            LeaderCategory::Points => "PTS",
            LeaderCategory::Rebounds => "REB",
            LeaderCategory::Assists => "AST",
        }
    }
}

/// Client for the remote statistics endpoints
#[derive(Debug, Clone)]
pub struct StatsApi {
    http: Client,
    live_base: String,
    stats_base: String,
}

impl Default for StatsApi {
    fn default() -> Self {
        Self::new()
    }
}

impl StatsApi {
    /// Creates an adapter pointing at the production hosts
    pub fn new() -> Self {
        Self {
            http: Client::new(),
            live_base: LIVE_BASE_URL.to_string(),
            stats_base: STATS_BASE_URL.to_string(),
        }
    }

    /// Creates an adapter with custom base URLs (tests, proxies)
    pub fn with_bases(live_base: impl Into<String>, stats_base: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            live_base: live_base.into(),
            stats_base: stats_base.into(),
        }
    }

    /// Today's scoreboard from the live CDN.
    ///
    /// Returns the games plus the feed's scoreboard date string.
    pub async fn today_scoreboard(&self) -> Result<(Vec<Game>, String), FetchError> {
        let url = format!("{}/scoreboard/todaysScoreboard_00.json", self.live_base);
        let text = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let response: LiveScoreboardResponse = serde_json::from_str(&text)?;
        Ok(parse_scoreboard(response.scoreboard))
    }

    /// Scoreboard for an arbitrary date from the stats host (`scoreboardv3`)
    pub async fn scoreboard_by_date(
        &self,
        date: NaiveDate,
    ) -> Result<(Vec<Game>, String), FetchError> {
        let url = format!("{}/scoreboardv3", self.stats_base);
        let date_param = date.format("%Y-%m-%d").to_string();
        let text = self
            .http
            .get(&url)
            .query(&[("GameDate", date_param.as_str()), ("LeagueID", "00")])
            .headers(stats_headers())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let response: LiveScoreboardResponse = serde_json::from_str(&text)?;
        let (games, mut board_date) = parse_scoreboard(response.scoreboard);
        if board_date.is_empty() {
            board_date = date_param;
        }
        Ok((games, board_date))
    }

    /// Conference standings (`leaguestandingsv3`)
    pub async fn standings(&self) -> Result<Standings, FetchError> {
        let response = self
            .get_stats(
                "leaguestandingsv3",
                &[
                    ("LeagueID", "00".to_string()),
                    ("Season", current_season()),
                    ("SeasonType", "Regular Season".to_string()),
                ],
            )
            .await?;
        let table = response.table("Standings")?;
        Ok(parse_standings(&table))
    }

    /// Top of the leader board for one statistical category (`leagueleaders`)
    pub async fn league_leaders(
        &self,
        category: LeaderCategory,
        top: usize,
    ) -> Result<Vec<LeaderEntry>, FetchError> {
        let response = self
            .get_stats(
                "leagueleaders",
                &[
                    ("LeagueID", "00".to_string()),
                    ("PerMode", "PerGame".to_string()),
                    ("Scope", "S".to_string()),
                    ("Season", current_season()),
                    ("SeasonType", "Regular Season".to_string()),
                    ("StatCategory", category.stat_column().to_string()),
                ],
            )
            .await?;
        let table = response.table("LeagueLeaders")?;
        Ok(parse_leaders(&table, category, top))
    }

    /// Every player-game of the season (`leaguegamelog`), newest first.
    ///
    /// This is the raw material for the triple-double leader derivation.
    pub async fn league_player_games(&self) -> Result<Vec<PlayerGameLine>, FetchError> {
        let response = self
            .get_stats(
                "leaguegamelog",
                &[
                    ("Counter", "1000".to_string()),
                    ("Direction", "DESC".to_string()),
                    ("LeagueID", "00".to_string()),
                    ("PlayerOrTeam", "P".to_string()),
                    ("Season", current_season()),
                    ("SeasonType", "Regular Season".to_string()),
                    ("Sorter", "DATE".to_string()),
                ],
            )
            .await?;
        let table = response.table("LeagueGameLog")?;
        Ok(parse_league_game_rows(&table))
    }

    /// Full box score for one game from the live CDN
    pub async fn box_score(&self, game_id: &str) -> Result<BoxScore, FetchError> {
        let url = format!("{}/boxscore/boxscore_{}.json", self.live_base, game_id);
        let text = self
            .http
            .get(&url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let response: LiveBoxResponse = serde_json::from_str(&text)?;
        Ok(parse_box_score(response.game))
    }

    /// Current roster for a team (`commonteamroster`)
    pub async fn team_roster(&self, team_id: i64) -> Result<Vec<RosterPlayer>, FetchError> {
        let response = self
            .get_stats(
                "commonteamroster",
                &[
                    ("LeagueID", "00".to_string()),
                    ("Season", current_season()),
                    ("TeamID", team_id.to_string()),
                ],
            )
            .await?;
        let table = response.table("CommonTeamRoster")?;
        Ok(parse_roster(&table))
    }

    /// Biographical profile plus headline season averages
    /// (`commonplayerinfo`)
    pub async fn player_profile(&self, person_id: i64) -> Result<PlayerProfile, FetchError> {
        let response = self
            .get_stats(
                "commonplayerinfo",
                &[("PlayerID", person_id.to_string()), ("LeagueID", "00".to_string())],
            )
            .await?;
        let info = response.table("CommonPlayerInfo")?;
        // Headline averages ride in a sibling table; profiles render without
        // them, so a missing table is not an error.
        let headline = response.table("PlayerHeadlineStats").ok();
        parse_player_profile(&info, headline.as_ref(), person_id)
    }

    /// Season game log for a player (`playergamelog`), newest first
    pub async fn player_game_log(&self, person_id: i64) -> Result<Vec<GameLogEntry>, FetchError> {
        let response = self
            .get_stats(
                "playergamelog",
                &[
                    ("PlayerID", person_id.to_string()),
                    ("Season", current_season()),
                    ("SeasonType", "Regular Season".to_string()),
                ],
            )
            .await?;
        let table = response.table("PlayerGameLog")?;
        Ok(parse_game_log(&table))
    }

    /// Season game log for a team (`teamgamelog`), newest first
    pub async fn team_game_log(&self, team_id: i64) -> Result<Vec<GameLogEntry>, FetchError> {
        let response = self
            .get_stats(
                "teamgamelog",
                &[
                    ("TeamID", team_id.to_string()),
                    ("Season", current_season()),
                    ("SeasonType", "Regular Season".to_string()),
                ],
            )
            .await?;
        let table = response.table("TeamGameLog")?;
        Ok(parse_game_log(&table))
    }

    /// GET a stats-host endpoint and decode the tabular envelope
    async fn get_stats(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<StatsResponse, FetchError> {
        let url = format!("{}/{}", self.stats_base, endpoint);
        let text = self
            .http
            .get(&url)
            .query(params)
            .headers(stats_headers())
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Browser-like headers the stats host requires before it will answer
fn stats_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "User-Agent",
        HeaderValue::from_static(
            "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
        ),
    );
    headers.insert("Referer", HeaderValue::from_static("https://stats.nba.com/"));
    headers.insert("Origin", HeaderValue::from_static("https://stats.nba.com"));
    headers.insert("x-nba-stats-origin", HeaderValue::from_static("stats"));
    headers.insert("x-nba-stats-token", HeaderValue::from_static("true"));
    headers.insert("Accept", HeaderValue::from_static("application/json"));
    headers
}

/// Season string for today, e.g. "2025-26". Seasons roll over in October.
fn current_season() -> String {
    season_for(Utc::now().date_naive())
}

fn season_for(date: NaiveDate) -> String {
    let start_year = if date.month() >= 10 {
        date.year()
    } else {
        date.year() - 1
    };
    format!("{}-{:02}", start_year, (start_year + 1) % 100)
}

// ---------------------------------------------------------------------------
// Live CDN feed shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct LiveScoreboardResponse {
    scoreboard: LiveScoreboard,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LiveScoreboard {
    #[serde(default)]
    game_date: String,
    #[serde(default)]
    games: Vec<LiveGame>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LiveGame {
    game_id: String,
    #[serde(default)]
    game_status_text: String,
    #[serde(default)]
    period: Option<u32>,
    #[serde(default)]
    game_clock: Option<String>,
    #[serde(default, rename = "gameTimeUTC")]
    game_time_utc: Option<String>,
    #[serde(default)]
    away_team: LiveTeam,
    #[serde(default)]
    home_team: LiveTeam,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LiveTeam {
    team_id: Option<i64>,
    team_tricode: String,
    team_city: Option<String>,
    team_name: Option<String>,
    score: Option<u32>,
    periods: Vec<LivePeriod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LivePeriod {
    #[serde(default)]
    period: u32,
    #[serde(default)]
    score: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct LiveBoxResponse {
    game: LiveBoxGame,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LiveBoxGame {
    game_id: String,
    #[serde(default)]
    game_status_text: String,
    away_team: LiveBoxTeam,
    home_team: LiveBoxTeam,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LiveBoxTeam {
    #[serde(default)]
    team_id: Option<i64>,
    #[serde(default)]
    team_tricode: String,
    #[serde(default)]
    team_name: Option<String>,
    #[serde(default)]
    score: Option<u32>,
    #[serde(default)]
    periods: Vec<LivePeriod>,
    #[serde(default)]
    players: Vec<LiveBoxPlayer>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LiveBoxPlayer {
    person_id: i64,
    name: String,
    /// "1" for the starting five in the feed
    #[serde(default)]
    starter: Option<String>,
    #[serde(default)]
    statistics: Option<LiveStatLine>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LiveStatLine {
    minutes: Option<String>,
    points: u32,
    rebounds_total: u32,
    assists: u32,
    steals: u32,
    blocks: u32,
    field_goals_made: u32,
    field_goals_attempted: u32,
    three_pointers_made: u32,
    three_pointers_attempted: u32,
    free_throws_made: u32,
    free_throws_attempted: u32,
    turnovers: u32,
    plus_minus_points: f64,
}

fn parse_scoreboard(board: LiveScoreboard) -> (Vec<Game>, String) {
    let games = board.games.into_iter().map(parse_live_game).collect();
    (games, board.game_date)
}

fn parse_live_game(game: LiveGame) -> Game {
    Game {
        game_id: game.game_id,
        status_text: game.game_status_text,
        period: game.period.filter(|&p| p > 0),
        game_clock: game.game_clock.filter(|c| !c.is_empty()),
        game_time_utc: game
            .game_time_utc
            .as_deref()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc)),
        away: parse_live_team(game.away_team),
        home: parse_live_team(game.home_team),
    }
}

fn parse_live_team(team: LiveTeam) -> TeamSide {
    TeamSide {
        team_id: team.team_id,
        tricode: team.team_tricode,
        city: team.team_city.filter(|c| !c.is_empty()),
        name: team.team_name.filter(|n| !n.is_empty()),
        score: team.score,
        periods: parse_periods(team.periods),
    }
}

fn parse_periods(periods: Vec<LivePeriod>) -> Vec<PeriodScore> {
    periods
        .into_iter()
        .filter(|p| p.period > 0)
        .map(|p| PeriodScore {
            period: p.period,
            score: p.score.unwrap_or(0),
        })
        .collect()
}

fn parse_box_score(game: LiveBoxGame) -> BoxScore {
    BoxScore {
        game_id: game.game_id,
        status_text: game.game_status_text,
        away: parse_box_team(game.away_team),
        home: parse_box_team(game.home_team),
    }
}

fn parse_box_team(team: LiveBoxTeam) -> BoxTeam {
    BoxTeam {
        team_id: team.team_id,
        tricode: team.team_tricode,
        name: team.team_name.filter(|n| !n.is_empty()),
        score: team.score,
        periods: parse_periods(team.periods),
        players: team.players.into_iter().map(parse_box_player).collect(),
    }
}

fn parse_box_player(player: LiveBoxPlayer) -> BoxPlayer {
    BoxPlayer {
        person_id: player.person_id,
        name: player.name,
        starter: player.starter.as_deref() == Some("1"),
        statistics: player.statistics.map(|s| PlayerStatLine {
            minutes: s.minutes.filter(|m| !m.is_empty()),
            points: s.points,
            rebounds_total: s.rebounds_total,
            assists: s.assists,
            steals: s.steals,
            blocks: s.blocks,
            field_goals_made: s.field_goals_made,
            field_goals_attempted: s.field_goals_attempted,
            three_pointers_made: s.three_pointers_made,
            three_pointers_attempted: s.three_pointers_attempted,
            free_throws_made: s.free_throws_made,
            free_throws_attempted: s.free_throws_attempted,
            turnovers: s.turnovers,
            plus_minus: s.plus_minus_points as i32,
        }),
    }
}

// ---------------------------------------------------------------------------
// Stats-host resultSets envelope
// ---------------------------------------------------------------------------

/// Tabular stats-host envelope. Most endpoints return `resultSets` (plural);
/// `leagueleaders` returns a single `resultSet`.
#[derive(Debug, Deserialize)]
struct StatsResponse {
    #[serde(default, rename = "resultSets")]
    result_sets: Vec<ResultSet>,
    #[serde(default, rename = "resultSet")]
    result_set: Option<ResultSet>,
}

#[derive(Debug, Deserialize)]
struct ResultSet {
    #[serde(default)]
    name: String,
    #[serde(default)]
    headers: Vec<String>,
    #[serde(default, rename = "rowSet")]
    row_set: Vec<Vec<Value>>,
}

impl StatsResponse {
    /// Finds a result table by name (case-insensitive)
    fn table(&self, name: &str) -> Result<Table, FetchError> {
        self.result_sets
            .iter()
            .chain(self.result_set.iter())
            .find(|rs| rs.name.eq_ignore_ascii_case(name))
            .map(Table::from_result_set)
            .ok_or_else(|| FetchError::MissingField(format!("result set {name}")))
    }
}

/// Column-indexed view over one result table
struct Table<'a> {
    columns: HashMap<String, usize>,
    rows: &'a [Vec<Value>],
}

impl<'a> Table<'a> {
    fn from_result_set(rs: &'a ResultSet) -> Self {
        let columns = rs
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.to_ascii_uppercase(), i))
            .collect();
        Self {
            columns,
            rows: &rs.row_set,
        }
    }

    fn rows<'b>(&'b self) -> impl Iterator<Item = Row<'a, 'b>> {
        self.rows.iter().map(move |values| Row {
            columns: &self.columns,
            values,
        })
    }
}

/// One row of a result table with column-name access.
///
/// Header casing is inconsistent across endpoints ("GAME_DATE" vs
/// "Game_ID"), so lookups are case-insensitive; numeric columns sometimes
/// arrive as strings and are coerced.
struct Row<'a, 'b> {
    columns: &'b HashMap<String, usize>,
    values: &'a [Value],
}

impl Row<'_, '_> {
    fn value(&self, column: &str) -> Option<&Value> {
        let index = *self.columns.get(&column.to_ascii_uppercase())?;
        self.values.get(index)
    }

    fn str(&self, column: &str) -> Option<String> {
        match self.value(column)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn f64(&self, column: &str) -> Option<f64> {
        match self.value(column)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    fn i64(&self, column: &str) -> Option<i64> {
        match self.value(column)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }

    fn u32(&self, column: &str) -> Option<u32> {
        self.i64(column).and_then(|v| u32::try_from(v).ok())
    }
}

fn parse_standings(table: &Table<'_>) -> Standings {
    let mut east = Vec::new();
    let mut west = Vec::new();
    for row in table.rows() {
        let conference = match row.str("Conference") {
            Some(c) => c,
            None => continue,
        };
        let standing = StandingRow {
            team_id: row.i64("TeamID"),
            team_city: row.str("TeamCity").unwrap_or_default(),
            team_name: row.str("TeamName").unwrap_or_default(),
            conference: conference.clone(),
            playoff_rank: row.u32("PlayoffRank").unwrap_or(0),
            wins: row.u32("WINS").unwrap_or(0),
            losses: row.u32("LOSSES").unwrap_or(0),
            win_pct: row.f64("WinPCT").unwrap_or(0.0),
        };
        match conference.as_str() {
            "East" => east.push(standing),
            "West" => west.push(standing),
            _ => {}
        }
    }
    east.sort_by_key(|r| r.playoff_rank);
    west.sort_by_key(|r| r.playoff_rank);
    Standings {
        east: (!east.is_empty()).then_some(east),
        west: (!west.is_empty()).then_some(west),
    }
}

fn parse_leaders(table: &Table<'_>, category: LeaderCategory, top: usize) -> Vec<LeaderEntry> {
    table
        .rows()
        .take(top)
        .map(|row| LeaderEntry {
            player: row.str("PLAYER").unwrap_or_else(|| "-".to_string()),
            team: row.str("TEAM").unwrap_or_else(|| "-".to_string()),
            value: row.f64(category.stat_column()).unwrap_or(0.0),
        })
        .collect()
}

fn parse_league_game_rows(table: &Table<'_>) -> Vec<PlayerGameLine> {
    table
        .rows()
        .filter_map(|row| {
            let player = row.str("PLAYER_NAME")?;
            Some(PlayerGameLine {
                player,
                team: row.str("TEAM_ABBREVIATION").unwrap_or_else(|| "-".to_string()),
                stats: PlayerStatLine {
                    points: row.u32("PTS").unwrap_or(0),
                    rebounds_total: row.u32("REB").unwrap_or(0),
                    assists: row.u32("AST").unwrap_or(0),
                    steals: row.u32("STL").unwrap_or(0),
                    blocks: row.u32("BLK").unwrap_or(0),
                    ..PlayerStatLine::default()
                },
            })
        })
        .collect()
}

fn parse_roster(table: &Table<'_>) -> Vec<RosterPlayer> {
    table
        .rows()
        .filter_map(|row| {
            Some(RosterPlayer {
                player_id: row.i64("PLAYER_ID")?,
                name: row.str("PLAYER")?,
                jersey_number: row.str("NUM"),
                position: row.str("POSITION"),
                height: row.str("HEIGHT"),
                weight: row.str("WEIGHT"),
            })
        })
        .collect()
}

fn parse_player_profile(
    info: &Table<'_>,
    headline: Option<&Table<'_>>,
    person_id: i64,
) -> Result<PlayerProfile, FetchError> {
    let row = info
        .rows()
        .next()
        .ok_or_else(|| FetchError::MissingField("CommonPlayerInfo row".to_string()))?;
    let headline_row = headline.and_then(|t| t.rows().next());
    Ok(PlayerProfile {
        person_id: row.i64("PERSON_ID").unwrap_or(person_id),
        display_name: row
            .str("DISPLAY_FIRST_LAST")
            .ok_or_else(|| FetchError::MissingField("DISPLAY_FIRST_LAST".to_string()))?,
        height: row.str("HEIGHT"),
        weight: row.str("WEIGHT"),
        school: row.str("SCHOOL"),
        country: row.str("COUNTRY"),
        birthdate: row.str("BIRTHDATE"),
        points_per_game: headline_row.as_ref().and_then(|r| r.f64("PTS")),
        rebounds_per_game: headline_row.as_ref().and_then(|r| r.f64("REB")),
        assists_per_game: headline_row.as_ref().and_then(|r| r.f64("AST")),
    })
}

fn parse_game_log(table: &Table<'_>) -> Vec<GameLogEntry> {
    table
        .rows()
        .filter_map(|row| {
            Some(GameLogEntry {
                game_id: row.str("Game_ID"),
                game_date: row.str("GAME_DATE")?,
                matchup: row.str("MATCHUP")?,
                win_loss: row.str("WL"),
                points: row.u32("PTS"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trimmed live scoreboard payload in the CDN feed's shape
    const SCOREBOARD_RESPONSE: &str = r#"{
        "meta": {"version": 1},
        "scoreboard": {
            "gameDate": "2025-02-16",
            "leagueId": "00",
            "games": [
                {
                    "gameId": "0022400741",
                    "gameCode": "20250216/LALBOS",
                    "gameStatus": 2,
                    "gameStatusText": "Q3 5:02",
                    "period": 3,
                    "gameClock": "PT05M02.00S",
                    "gameTimeUTC": "2025-02-16T00:30:00Z",
                    "awayTeam": {
                        "teamId": 1610612747,
                        "teamTricode": "LAL",
                        "teamCity": "Los Angeles",
                        "teamName": "Lakers",
                        "score": 78,
                        "periods": [
                            {"period": 1, "periodType": "REGULAR", "score": 25},
                            {"period": 2, "periodType": "REGULAR", "score": 28},
                            {"period": 3, "periodType": "REGULAR", "score": 25}
                        ]
                    },
                    "homeTeam": {
                        "teamId": 1610612738,
                        "teamTricode": "BOS",
                        "teamCity": "Boston",
                        "teamName": "Celtics",
                        "score": 80,
                        "periods": [
                            {"period": 1, "periodType": "REGULAR", "score": 20},
                            {"period": 2, "periodType": "REGULAR", "score": 30},
                            {"period": 3, "periodType": "REGULAR", "score": 30}
                        ]
                    }
                },
                {
                    "gameId": "0022400742",
                    "gameStatusText": "7:30 pm ET",
                    "period": 0,
                    "gameClock": "",
                    "gameTimeUTC": "2025-02-17T00:30:00Z",
                    "awayTeam": {"teamTricode": "MIA", "teamCity": "", "score": 0},
                    "homeTeam": {"teamTricode": "NYK", "score": 0}
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_live_scoreboard() {
        let response: LiveScoreboardResponse =
            serde_json::from_str(SCOREBOARD_RESPONSE).expect("Failed to parse scoreboard");
        let (games, date) = parse_scoreboard(response.scoreboard);

        assert_eq!(date, "2025-02-16");
        assert_eq!(games.len(), 2);

        let live = &games[0];
        assert_eq!(live.game_id, "0022400741");
        assert_eq!(live.status_text, "Q3 5:02");
        assert_eq!(live.period, Some(3));
        assert_eq!(live.away.tricode, "LAL");
        assert_eq!(live.away.score, Some(78));
        assert_eq!(live.away.periods.len(), 3);
        assert_eq!(live.home.periods[1], PeriodScore { period: 2, score: 30 });
        assert!(live.game_time_utc.is_some());

        let upcoming = &games[1];
        assert_eq!(upcoming.period, None, "period 0 reads as not started");
        assert_eq!(upcoming.game_clock, None, "empty clock reads as absent");
        assert_eq!(upcoming.away.city, None, "empty city reads as absent");
        assert!(upcoming.away.periods.is_empty());
    }

    #[test]
    fn test_parse_malformed_scoreboard_fails() {
        let result: Result<LiveScoreboardResponse, _> = serde_json::from_str("{ not json }");
        assert!(result.is_err());
    }

    /// Trimmed live box-score payload
    const BOX_SCORE_RESPONSE: &str = r#"{
        "game": {
            "gameId": "0022400741",
            "gameStatusText": "Final",
            "awayTeam": {
                "teamId": 1610612747,
                "teamTricode": "LAL",
                "teamName": "Lakers",
                "score": 110,
                "periods": [
                    {"period": 1, "score": 25}, {"period": 2, "score": 28},
                    {"period": 3, "score": 25}, {"period": 4, "score": 32}
                ],
                "players": [
                    {
                        "personId": 2544,
                        "name": "LeBron James",
                        "starter": "1",
                        "statistics": {
                            "minutes": "PT36M12.00S",
                            "points": 31,
                            "reboundsTotal": 11,
                            "assists": 10,
                            "steals": 1,
                            "blocks": 2,
                            "fieldGoalsMade": 12,
                            "fieldGoalsAttempted": 21,
                            "threePointersMade": 3,
                            "threePointersAttempted": 8,
                            "freeThrowsMade": 4,
                            "freeThrowsAttempted": 5,
                            "turnovers": 4,
                            "plusMinusPoints": 7.0
                        }
                    },
                    {
                        "personId": 1629659,
                        "name": "Bench Player",
                        "starter": "0"
                    }
                ]
            },
            "homeTeam": {
                "teamId": 1610612738,
                "teamTricode": "BOS",
                "teamName": "Celtics",
                "score": 104,
                "periods": [],
                "players": []
            }
        }
    }"#;

    #[test]
    fn test_parse_box_score() {
        let response: LiveBoxResponse =
            serde_json::from_str(BOX_SCORE_RESPONSE).expect("Failed to parse box score");
        let box_score = parse_box_score(response.game);

        assert_eq!(box_score.game_id, "0022400741");
        assert_eq!(box_score.status_text, "Final");
        assert_eq!(box_score.away.players.len(), 2);

        let lebron = &box_score.away.players[0];
        assert!(lebron.starter);
        let stats = lebron.statistics.as_ref().expect("played");
        assert_eq!(stats.points, 31);
        assert_eq!(stats.rebounds_total, 11);
        assert_eq!(stats.plus_minus, 7);
        assert_eq!(stats.minutes.as_deref(), Some("PT36M12.00S"));

        let bench = &box_score.away.players[1];
        assert!(!bench.starter);
        assert!(bench.statistics.is_none());
    }

    /// Trimmed standings payload in the stats host's tabular shape
    const STANDINGS_RESPONSE: &str = r#"{
        "resource": "leaguestandingsv3",
        "resultSets": [{
            "name": "Standings",
            "headers": ["TeamID", "TeamCity", "TeamName", "Conference", "PlayoffRank", "WINS", "LOSSES", "WinPCT"],
            "rowSet": [
                [1610612752, "New York", "Knicks", "East", 2, 35, 15, 0.7],
                [1610612738, "Boston", "Celtics", "East", 1, 40, 10, 0.8],
                [1610612744, "Golden State", "Warriors", "West", 2, 36, 14, 0.72],
                [1610612747, "Los Angeles", "Lakers", "West", 1, 38, 12, 0.76]
            ]
        }]
    }"#;

    #[test]
    fn test_parse_standings_splits_and_sorts_conferences() {
        let response: StatsResponse =
            serde_json::from_str(STANDINGS_RESPONSE).expect("Failed to parse standings");
        let table = response.table("Standings").expect("table present");
        let standings = parse_standings(&table);

        let east = standings.east.expect("east rows");
        let west = standings.west.expect("west rows");
        assert_eq!(east.len(), 2);
        assert_eq!(west.len(), 2);
        assert_eq!(east[0].team_name, "Celtics", "sorted by playoff rank");
        assert_eq!(east[0].playoff_rank, 1);
        assert_eq!(west[0].team_city, "Los Angeles");
        assert!((east[0].win_pct - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_standings_empty_rows_is_neutral() {
        let empty = r#"{"resultSets": [{"name": "Standings", "headers": ["Conference"], "rowSet": []}]}"#;
        let response: StatsResponse = serde_json::from_str(empty).expect("parse");
        let table = response.table("Standings").expect("table present");
        let standings = parse_standings(&table);
        assert!(standings.is_empty());
    }

    /// `leagueleaders` answers with a singular resultSet
    const LEADERS_RESPONSE: &str = r#"{
        "resource": "leagueleaders",
        "resultSet": {
            "name": "LeagueLeaders",
            "headers": ["PLAYER_ID", "RANK", "PLAYER", "TEAM", "GP", "PTS"],
            "rowSet": [
                [203507, 1, "Giannis Antetokounmpo", "MIL", 50, 31.5],
                [1628983, 2, "Shai Gilgeous-Alexander", "OKC", 52, 31.1],
                [1629029, 3, "Luka Doncic", "DAL", 48, 30.2],
                [201939, 4, "Stephen Curry", "GSW", 49, 27.8]
            ]
        }
    }"#;

    #[test]
    fn test_parse_leaders_takes_top_n_from_singular_result_set() {
        let response: StatsResponse =
            serde_json::from_str(LEADERS_RESPONSE).expect("Failed to parse leaders");
        let table = response.table("LeagueLeaders").expect("table present");
        let leaders = parse_leaders(&table, LeaderCategory::Points, 3);

        assert_eq!(leaders.len(), 3);
        assert_eq!(leaders[0].player, "Giannis Antetokounmpo");
        assert_eq!(leaders[0].team, "MIL");
        assert!((leaders[0].value - 31.5).abs() < f64::EPSILON);
    }

    const ROSTER_RESPONSE: &str = r#"{
        "resultSets": [{
            "name": "CommonTeamRoster",
            "headers": ["TeamID", "SEASON", "PLAYER", "NUM", "POSITION", "HEIGHT", "WEIGHT", "PLAYER_ID"],
            "rowSet": [
                [1610612747, "2024-25", "LeBron James", "23", "F", "6-9", "250", 2544],
                [1610612747, "2024-25", "Austin Reaves", "15", "G", "6-5", "197", 1630559]
            ]
        }]
    }"#;

    #[test]
    fn test_parse_roster() {
        let response: StatsResponse =
            serde_json::from_str(ROSTER_RESPONSE).expect("Failed to parse roster");
        let table = response.table("CommonTeamRoster").expect("table present");
        let roster = parse_roster(&table);

        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].player_id, 2544);
        assert_eq!(roster[0].name, "LeBron James");
        assert_eq!(roster[0].jersey_number.as_deref(), Some("23"));
        assert_eq!(roster[1].position.as_deref(), Some("G"));
    }

    const PROFILE_RESPONSE: &str = r#"{
        "resultSets": [
            {
                "name": "CommonPlayerInfo",
                "headers": ["PERSON_ID", "DISPLAY_FIRST_LAST", "HEIGHT", "WEIGHT", "SCHOOL", "COUNTRY", "BIRTHDATE"],
                "rowSet": [[2544, "LeBron James", "6-9", "250", "St. Vincent-St. Mary HS (OH)", "USA", "1984-12-30T00:00:00"]]
            },
            {
                "name": "PlayerHeadlineStats",
                "headers": ["PLAYER_ID", "PLAYER_NAME", "TimeFrame", "PTS", "AST", "REB"],
                "rowSet": [[2544, "LeBron James", "2024-25", 24.8, 8.6, 7.7]]
            }
        ]
    }"#;

    #[test]
    fn test_parse_player_profile_merges_headline_stats() {
        let response: StatsResponse =
            serde_json::from_str(PROFILE_RESPONSE).expect("Failed to parse profile");
        let info = response.table("CommonPlayerInfo").expect("info table");
        let headline = response.table("PlayerHeadlineStats").ok();
        let profile =
            parse_player_profile(&info, headline.as_ref(), 2544).expect("profile parses");

        assert_eq!(profile.display_name, "LeBron James");
        assert_eq!(profile.height.as_deref(), Some("6-9"));
        assert_eq!(profile.country.as_deref(), Some("USA"));
        assert_eq!(profile.points_per_game, Some(24.8));
        assert_eq!(profile.rebounds_per_game, Some(7.7));
    }

    const GAME_LOG_RESPONSE: &str = r#"{
        "resultSets": [{
            "name": "TeamGameLog",
            "headers": ["Team_ID", "Game_ID", "GAME_DATE", "MATCHUP", "WL", "PTS"],
            "rowSet": [
                [1610612747, "0022400741", "2025-02-01", "LAL vs. BOS", "W", 110],
                [1610612747, "0022400701", "2024-12-15", "LAL @ BOS", "L", 98]
            ]
        }]
    }"#;

    #[test]
    fn test_parse_game_log_is_case_insensitive_on_headers() {
        let response: StatsResponse =
            serde_json::from_str(GAME_LOG_RESPONSE).expect("Failed to parse game log");
        let table = response.table("TeamGameLog").expect("table present");
        let log = parse_game_log(&table);

        assert_eq!(log.len(), 2);
        assert_eq!(log[0].game_id.as_deref(), Some("0022400741"));
        assert_eq!(log[0].matchup, "LAL vs. BOS");
        assert_eq!(log[0].win_loss.as_deref(), Some("W"));
        assert_eq!(log[1].points, Some(98));
    }

    #[test]
    fn test_parse_league_game_rows() {
        let payload = r#"{
            "resultSets": [{
                "name": "LeagueGameLog",
                "headers": ["PLAYER_NAME", "TEAM_ABBREVIATION", "PTS", "REB", "AST", "STL", "BLK"],
                "rowSet": [
                    ["Nikola Jokic", "DEN", 26, 14, 12, 1, 1],
                    ["Role Player", "DEN", 8, 3, 1, 0, 0]
                ]
            }]
        }"#;
        let response: StatsResponse = serde_json::from_str(payload).expect("parse");
        let table = response.table("LeagueGameLog").expect("table present");
        let rows = parse_league_game_rows(&table);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].player, "Nikola Jokic");
        assert_eq!(rows[0].stats.rebounds_total, 14);
        assert!(crate::summary::is_triple_double(&rows[0].stats));
        assert!(!crate::summary::is_triple_double(&rows[1].stats));
    }

    #[test]
    fn test_row_coercions_accept_stringified_numbers() {
        let payload = r#"{
            "resultSets": [{
                "name": "T",
                "headers": ["A", "B", "C"],
                "rowSet": [["12", 3.5, null]]
            }]
        }"#;
        let response: StatsResponse = serde_json::from_str(payload).expect("parse");
        let table = response.table("T").expect("table present");
        let row = table.rows().next().expect("one row");

        assert_eq!(row.u32("a"), Some(12));
        assert_eq!(row.f64("B"), Some(3.5));
        assert_eq!(row.str("C"), None);
        assert_eq!(row.str("MISSING"), None);
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let response: StatsResponse =
            serde_json::from_str(r#"{"resultSets": []}"#).expect("parse");
        let result = response.table("Standings");
        assert!(matches!(result, Err(FetchError::MissingField(_))));
    }

    #[test]
    fn test_season_rolls_over_in_october() {
        let january = NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date");
        let october = NaiveDate::from_ymd_opt(2025, 10, 25).expect("valid date");
        assert_eq!(season_for(january), "2024-25");
        assert_eq!(season_for(october), "2025-26");
    }

    #[test]
    fn test_leader_category_columns() {
        assert_eq!(LeaderCategory::Points.stat_column(), "PTS");
        assert_eq!(LeaderCategory::Rebounds.stat_column(), "REB");
        assert_eq!(LeaderCategory::Assists.stat_column(), "AST");
    }
}

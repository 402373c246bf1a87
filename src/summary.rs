//! Pure derived views over fetched data
//!
//! Deterministic transformations with no I/O: the quarter-by-quarter score
//! table, game categorization for the dashboard, live-clock formatting,
//! triple-double milestone detection, and the head-to-head series summary
//! derived from two teams' season game logs.

use std::collections::{BTreeMap, HashMap};

use crate::data::{
    Game, GameLogEntry, HeadToHead, LastMeeting, PlayerGameLine, PlayerStatLine, QuarterScores,
    SeasonSeries, TeamSide, TripleDoubleEntry,
};

/// Regulation period numbers
const REGULATION: [u32; 4] = [1, 2, 3, 4];

/// Builds the aligned quarter-score table for a game.
///
/// Periods 1-4 become the regulation columns; any higher period numbers are
/// summed into a single "OT" column. A team's total comes from the feed score
/// when present, otherwise from the sum of its period scores. Returns `None`
/// when neither team has period data.
pub fn build_quarter_scores(away: &TeamSide, home: &TeamSide) -> Option<QuarterScores> {
    if away.periods.is_empty() && home.periods.is_empty() {
        return None;
    }

    // period number -> (away, home)
    let mut by_period: BTreeMap<u32, (u32, u32)> = BTreeMap::new();
    for p in &away.periods {
        by_period.entry(p.period).or_insert((0, 0)).0 = p.score;
    }
    for p in &home.periods {
        by_period.entry(p.period).or_insert((0, 0)).1 = p.score;
    }

    let mut headers: Vec<String> = REGULATION.iter().map(|q| format!("Q{q}")).collect();
    let mut away_scores: Vec<u32> = REGULATION
        .iter()
        .map(|q| by_period.get(q).map_or(0, |s| s.0))
        .collect();
    let mut home_scores: Vec<u32> = REGULATION
        .iter()
        .map(|q| by_period.get(q).map_or(0, |s| s.1))
        .collect();

    let overtime: Vec<&(u32, u32)> = by_period
        .iter()
        .filter(|(period, _)| !REGULATION.contains(*period))
        .map(|(_, scores)| scores)
        .collect();
    if !overtime.is_empty() {
        headers.push("OT".to_string());
        away_scores.push(overtime.iter().map(|s| s.0).sum());
        home_scores.push(overtime.iter().map(|s| s.1).sum());
    }

    let away_total = away.score.unwrap_or_else(|| away_scores.iter().sum());
    let home_total = home.score.unwrap_or_else(|| home_scores.iter().sum());
    headers.push("Total".to_string());
    away_scores.push(away_total);
    home_scores.push(home_total);

    Some(QuarterScores {
        headers,
        away: away_scores,
        home: home_scores,
    })
}

/// Splits games into (live, upcoming, finished) for dashboard ordering.
///
/// A game is finished when its status says so, live when either side has
/// points on the board, and upcoming otherwise.
pub fn categorize_games(games: &[Game]) -> (Vec<&Game>, Vec<&Game>, Vec<&Game>) {
    let mut live = Vec::new();
    let mut upcoming = Vec::new();
    let mut finished = Vec::new();
    for game in games {
        if matches!(game.status_text.as_str(), "Final" | "Final/OT") {
            finished.push(game);
        } else if game.away.score.unwrap_or(0) > 0 || game.home.score.unwrap_or(0) > 0 {
            live.push(game);
        } else {
            upcoming.push(game);
        }
    }
    (live, upcoming, finished)
}

/// Formats the game clock for a live game, e.g. "Q3 5:02".
///
/// Prefers the feed's status text when it already carries a clock or
/// halftime label; otherwise derives one from the period number and the raw
/// "PT5M30S"-style clock. Falls back to the status text, then "-".
pub fn format_live_clock(game: &Game) -> String {
    let status = game.status_text.as_str();
    if !status.is_empty()
        && (status.starts_with('Q') || status.contains(':') || status.contains("Halftime"))
    {
        return status.to_string();
    }
    if let (Some(period), Some(clock)) = (game.period, game.game_clock.as_deref()) {
        if period > 0 {
            if let Some((mins, secs)) = parse_feed_clock(clock) {
                return format!("Q{period} {mins}:{secs:02}");
            }
        }
    }
    if status.is_empty() {
        "-".to_string()
    } else {
        status.to_string()
    }
}

/// Parses an ISO-8601-duration-style feed clock ("PT05M30.00S") into whole
/// minutes and seconds
fn parse_feed_clock(clock: &str) -> Option<(u32, u32)> {
    let trimmed = clock.trim_start_matches("PT").trim_end_matches('S');
    let (mins_part, secs_part) = match trimmed.split_once('M') {
        Some((m, s)) => (m, s),
        None => ("", trimmed),
    };
    let mins = if mins_part.is_empty() {
        0
    } else {
        mins_part.parse::<f64>().ok()? as u32
    };
    let secs = secs_part.parse::<f64>().ok()? as u32;
    Some((mins, secs))
}

/// True when at least three of points, rebounds, assists, steals, and blocks
/// reach double digits
pub fn is_triple_double(stats: &PlayerStatLine) -> bool {
    let categories = [
        stats.points,
        stats.rebounds_total,
        stats.assists,
        stats.steals,
        stats.blocks,
    ];
    categories.iter().filter(|&&v| v >= 10).count() >= 3
}

/// Tallies triple-doubles per player across a season of player-game lines
/// and returns the top scorers of the milestone, most first.
///
/// Ties break alphabetically by player name so the board is stable across
/// refreshes.
pub fn triple_double_leaders(lines: &[PlayerGameLine], top: usize) -> Vec<TripleDoubleEntry> {
    let mut counts: HashMap<(&str, &str), u32> = HashMap::new();
    for line in lines {
        if is_triple_double(&line.stats) {
            *counts
                .entry((line.player.as_str(), line.team.as_str()))
                .or_insert(0) += 1;
        }
    }
    let mut board: Vec<TripleDoubleEntry> = counts
        .into_iter()
        .map(|((player, team), count)| TripleDoubleEntry {
            player: player.to_string(),
            team: team.to_string(),
            count,
        })
        .collect();
    board.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.player.cmp(&b.player)));
    board.truncate(top);
    board
}

/// Extracts the opponent code from a matchup label.
///
/// Matchup strings read "LAL vs. BOS" at home and "LAL @ BOS" on the road;
/// the opponent is the final whitespace-separated token.
pub fn matchup_opponent(matchup: &str) -> Option<&str> {
    let last = matchup.split_whitespace().last()?;
    if last.len() == 3 && last.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(last)
    } else {
        None
    }
}

/// Derives the head-to-head summary between two teams from their season game
/// logs.
///
/// Each log is filtered to games against the other team by the opponent code
/// in its matchup string; the two filtered logs are then joined by game date.
/// The most recent shared game (logs arrive newest-first) becomes the last
/// meeting, and the W/L columns produce each side's win tally. Returns the
/// zero-value summary when there are no shared games.
pub fn derive_head_to_head(
    log_a: &[GameLogEntry],
    log_b: &[GameLogEntry],
    tricode_a: &str,
    tricode_b: &str,
) -> HeadToHead {
    let versus_b: Vec<&GameLogEntry> = log_a
        .iter()
        .filter(|entry| {
            matchup_opponent(&entry.matchup).is_some_and(|op| op.eq_ignore_ascii_case(tricode_b))
        })
        .collect();
    let versus_a: Vec<&GameLogEntry> = log_b
        .iter()
        .filter(|entry| {
            matchup_opponent(&entry.matchup).is_some_and(|op| op.eq_ignore_ascii_case(tricode_a))
        })
        .collect();

    let shared: Vec<(&GameLogEntry, &GameLogEntry)> = versus_b
        .iter()
        .filter_map(|a| {
            versus_a
                .iter()
                .find(|b| b.game_date == a.game_date)
                .map(|b| (*a, *b))
        })
        .collect();
    if shared.is_empty() {
        return HeadToHead::default();
    }

    let (recent_a, recent_b) = shared[0];
    let last_meeting = LastMeeting {
        date: recent_a.game_date.clone(),
        points_a: recent_a.points,
        points_b: recent_b.points,
    };

    let wins_a = shared
        .iter()
        .filter(|(a, _)| a.win_loss.as_deref() == Some("W"))
        .count() as u32;
    let wins_b = shared
        .iter()
        .filter(|(_, b)| b.win_loss.as_deref() == Some("W"))
        .count() as u32;

    HeadToHead {
        last_meeting: Some(last_meeting),
        series: SeasonSeries {
            wins_a,
            wins_b,
            games: shared.len() as u32,
        },
    }
}

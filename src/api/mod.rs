//! Data-acquisition facade
//!
//! `ApiClient` fronts the slow, rate-limited, occasionally-unreliable remote
//! statistics endpoints with a two-tier cache: per-resource-kind in-memory
//! TTL caches backed by a durable disk store whose long "offline" window is
//! read only after every network path has failed. Each public fetch
//! operation runs the same sequence (memory cache, short-TTL disk cache
//! where applicable, rate limit, retried remote call) and on success
//! populates both tiers. Fetch operations never return an error to the
//! caller: failures are absorbed here, classified into a short user-facing
//! message readable via `last_error`, and converted into a neutral empty
//! value, after the offline disk tier has had its chance.

mod endpoints;
mod rate_limit;
mod retry;

pub use endpoints::{FetchError, LeaderCategory, StatsApi};
pub use rate_limit::RateLimiter;
pub use retry::RetryPolicy;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::{DiskCache, TtlCache};
use crate::data::{
    team_by_id, BoxScore, Game, GameLogEntry, LeagueLeaders, HeadToHead, PlayerProfile,
    ResourceKind, RosterPlayer, Standings,
};
use crate::summary;

/// Games change every ~90 seconds during live play
const CACHE_TTL_GAMES: Duration = Duration::from_secs(90);
const CACHE_CAP_GAMES: usize = 128;

/// Standings and leaders are expensive league-wide computations that move
/// roughly hourly
const CACHE_TTL_STANDINGS: Duration = Duration::from_secs(3600);
const CACHE_CAP_STANDINGS: usize = 4;
const CACHE_TTL_LEAGUE_LEADERS: Duration = Duration::from_secs(3600);
const CACHE_CAP_LEAGUE_LEADERS: usize = 4;

const CACHE_TTL_BOX_SCORE: Duration = Duration::from_secs(300);
const CACHE_CAP_BOX_SCORE: usize = 64;

/// Last-resort disk window, read only when live and short-TTL paths fail
const CACHE_TTL_OFFLINE: Duration = Duration::from_secs(86_400);

/// Minimum spacing between outgoing requests (soft rate limiting)
const RATE_LIMIT_MIN_INTERVAL: Duration = Duration::from_millis(600);

/// Leader boards show the top three per category
const TOP_LEADERS: usize = 3;

const STANDINGS_KEY: &str = "standings";
const LEAGUE_LEADERS_KEY: &str = "league_leaders";

/// Games plus the scoreboard date they belong to, as cached in both tiers
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedGames {
    games: Vec<Game>,
    date: String,
}

/// The first paint's worth of data: games, standings, and leaders
#[derive(Debug, Clone, Default)]
pub struct InitialData {
    pub games: Vec<Game>,
    pub scoreboard_date: String,
    pub standings: Standings,
    pub leaders: LeagueLeaders,
}

/// Per-resource-kind "served from the offline tier" flags
#[derive(Debug, Default)]
struct FromCacheFlags {
    games: AtomicBool,
    standings: AtomicBool,
    leaders: AtomicBool,
    box_score: AtomicBool,
}

impl FromCacheFlags {
    fn slot(&self, kind: ResourceKind) -> &AtomicBool {
        match kind {
            ResourceKind::Games => &self.games,
            ResourceKind::Standings => &self.standings,
            ResourceKind::LeagueLeaders => &self.leaders,
            ResourceKind::BoxScore => &self.box_score,
        }
    }

    fn get(&self, kind: ResourceKind) -> bool {
        self.slot(kind).load(Ordering::Relaxed)
    }

    fn set(&self, kind: ResourceKind, value: bool) {
        self.slot(kind).store(value, Ordering::Relaxed);
    }

    fn any(&self) -> bool {
        self.games.load(Ordering::Relaxed)
            || self.standings.load(Ordering::Relaxed)
            || self.leaders.load(Ordering::Relaxed)
            || self.box_score.load(Ordering::Relaxed)
    }
}

/// Client for basketball league data with caching, rate limiting, retry, and
/// degraded-mode reads
///
/// Cheap to clone; clones share all state. Safe to call from concurrent
/// tasks: cache tiers are mutex-guarded and the rate limiter serializes
/// outgoing requests process-wide.
#[derive(Debug, Clone)]
pub struct ApiClient {
    api: StatsApi,
    disk: Option<DiskCache>,
    retry: RetryPolicy,
    limiter: Arc<RateLimiter>,
    games_cache: Arc<TtlCache<String, CachedGames>>,
    standings_cache: Arc<TtlCache<String, Standings>>,
    leaders_cache: Arc<TtlCache<String, LeagueLeaders>>,
    box_cache: Arc<TtlCache<String, BoxScore>>,
    last_error: Arc<Mutex<Option<String>>>,
    from_cache: Arc<FromCacheFlags>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    /// Creates a client against the production endpoints with the platform
    /// cache directory
    pub fn new() -> Self {
        Self::with_components(
            StatsApi::new(),
            DiskCache::open(),
            RetryPolicy::default(),
            RATE_LIMIT_MIN_INTERVAL,
        )
    }

    /// Creates a client from explicit parts (tests, custom hosts, custom
    /// cache locations)
    pub fn with_components(
        api: StatsApi,
        disk: Option<DiskCache>,
        retry: RetryPolicy,
        min_interval: Duration,
    ) -> Self {
        Self {
            api,
            disk,
            retry,
            limiter: Arc::new(RateLimiter::new(min_interval)),
            games_cache: Arc::new(TtlCache::new(CACHE_CAP_GAMES, CACHE_TTL_GAMES)),
            standings_cache: Arc::new(TtlCache::new(CACHE_CAP_STANDINGS, CACHE_TTL_STANDINGS)),
            leaders_cache: Arc::new(TtlCache::new(
                CACHE_CAP_LEAGUE_LEADERS,
                CACHE_TTL_LEAGUE_LEADERS,
            )),
            box_cache: Arc::new(TtlCache::new(CACHE_CAP_BOX_SCORE, CACHE_TTL_BOX_SCORE)),
            last_error: Arc::new(Mutex::new(None)),
            from_cache: Arc::new(FromCacheFlags::default()),
        }
    }

    /// The user-facing message for the most recent failed fetch, if the most
    /// recent fetch failed
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().ok().and_then(|e| e.clone())
    }

    /// Whether the last fetch of `kind` was served from the offline disk tier
    pub fn served_from_cache(&self, kind: ResourceKind) -> bool {
        self.from_cache.get(kind)
    }

    /// Whether any resource kind is currently served from the offline tier
    /// (drives the dashboard's offline indicator)
    pub fn any_from_cache(&self) -> bool {
        self.from_cache.any()
    }

    /// Games for a date (today when `None`), plus the scoreboard date string.
    ///
    /// Today's games come from the live feed; other dates from the dated
    /// scoreboard endpoint. Returns `([], requested-date)` when everything
    /// fails.
    pub async fn fetch_games(&self, game_date: Option<NaiveDate>) -> (Vec<Game>, String) {
        let today = Local::now().date_naive();
        let date = game_date.unwrap_or(today);
        let date_str = date.format("%Y-%m-%d").to_string();
        let key = format!("games:{date_str}");

        if let Some(hit) = self.games_cache.get(&key) {
            return (hit.games, hit.date);
        }

        self.clear_error();
        self.limiter.acquire().await;
        let result = if date == today {
            self.retry.run(|| self.api.today_scoreboard()).await
        } else {
            self.retry.run(|| self.api.scoreboard_by_date(date)).await
        };

        match result {
            Ok((games, board_date)) => {
                let record = CachedGames {
                    games,
                    date: if board_date.is_empty() {
                        date_str
                    } else {
                        board_date
                    },
                };
                self.games_cache.insert(key.clone(), record.clone());
                self.disk_write(&key, &record);
                self.from_cache.set(ResourceKind::Games, false);
                (record.games, record.date)
            }
            Err(err) => {
                self.record_error(&err, "Games");
                if let Some(record) = self.disk_read::<CachedGames>(&key, CACHE_TTL_OFFLINE) {
                    self.from_cache.set(ResourceKind::Games, true);
                    return (record.games, record.date);
                }
                self.from_cache.set(ResourceKind::Games, false);
                (Vec::new(), date_str)
            }
        }
    }

    /// Conference standings. Returns the `(None, None)` pair when everything
    /// fails.
    pub async fn fetch_standings(&self) -> Standings {
        if let Some(hit) = self.standings_cache.get(&STANDINGS_KEY.to_string()) {
            return hit;
        }
        if let Some(disk) = self.disk_read::<Standings>(STANDINGS_KEY, CACHE_TTL_STANDINGS) {
            return disk;
        }

        self.clear_error();
        self.limiter.acquire().await;
        match self.retry.run(|| self.api.standings()).await {
            Ok(standings) => {
                self.standings_cache
                    .insert(STANDINGS_KEY.to_string(), standings.clone());
                self.disk_write(STANDINGS_KEY, &standings);
                self.from_cache.set(ResourceKind::Standings, false);
                standings
            }
            Err(err) => {
                self.record_error(&err, "Standings");
                if let Some(standings) =
                    self.disk_read::<Standings>(STANDINGS_KEY, CACHE_TTL_OFFLINE)
                {
                    self.from_cache.set(ResourceKind::Standings, true);
                    return standings;
                }
                self.from_cache.set(ResourceKind::Standings, false);
                Standings::default()
            }
        }
    }

    /// League leader boards: top three in points, rebounds, and assists,
    /// plus the triple-double tally derived from the league-wide game log.
    ///
    /// Categories fail independently; the operation takes the failure path
    /// only when every category came back empty with an error in hand.
    pub async fn fetch_league_leaders(&self) -> LeagueLeaders {
        if let Some(hit) = self.leaders_cache.get(&LEAGUE_LEADERS_KEY.to_string()) {
            return hit;
        }
        if let Some(disk) =
            self.disk_read::<LeagueLeaders>(LEAGUE_LEADERS_KEY, CACHE_TTL_LEAGUE_LEADERS)
        {
            return disk;
        }

        self.clear_error();
        self.limiter.acquire().await;

        let mut leaders = LeagueLeaders::default();
        let mut last_failure: Option<FetchError> = None;
        for category in [
            LeaderCategory::Points,
            LeaderCategory::Rebounds,
            LeaderCategory::Assists,
        ] {
            match self
                .retry
                .run(|| self.api.league_leaders(category, TOP_LEADERS))
                .await
            {
                Ok(entries) => match category {
                    LeaderCategory::Points => leaders.points = entries,
                    LeaderCategory::Rebounds => leaders.rebounds = entries,
                    LeaderCategory::Assists => leaders.assists = entries,
                },
                Err(err) => {
                    warn!(%err, ?category, "leader category fetch failed");
                    last_failure = Some(err);
                }
            }
        }
        match self.retry.run(|| self.api.league_player_games()).await {
            Ok(lines) => {
                leaders.triple_doubles = summary::triple_double_leaders(&lines, TOP_LEADERS);
            }
            Err(err) => {
                warn!(%err, "triple-double source fetch failed");
                last_failure = Some(err);
            }
        }

        match last_failure {
            Some(err) if leaders.is_empty() => {
                self.record_error(&err, "Leaders");
                if let Some(leaders) =
                    self.disk_read::<LeagueLeaders>(LEAGUE_LEADERS_KEY, CACHE_TTL_OFFLINE)
                {
                    self.from_cache.set(ResourceKind::LeagueLeaders, true);
                    return leaders;
                }
                self.from_cache.set(ResourceKind::LeagueLeaders, false);
                LeagueLeaders::default()
            }
            _ => {
                self.leaders_cache
                    .insert(LEAGUE_LEADERS_KEY.to_string(), leaders.clone());
                self.disk_write(LEAGUE_LEADERS_KEY, &leaders);
                self.from_cache.set(ResourceKind::LeagueLeaders, false);
                leaders
            }
        }
    }

    /// Full box score for a game; `None` when the id is empty or everything
    /// fails
    pub async fn fetch_box_score(&self, game_id: &str) -> Option<BoxScore> {
        if game_id.is_empty() {
            return None;
        }
        let key = format!("box:{game_id}");
        if let Some(hit) = self.box_cache.get(&key) {
            return Some(hit);
        }

        self.clear_error();
        self.limiter.acquire().await;
        match self.retry.run(|| self.api.box_score(game_id)).await {
            Ok(box_score) => {
                self.box_cache.insert(key.clone(), box_score.clone());
                self.disk_write(&key, &box_score);
                self.from_cache.set(ResourceKind::BoxScore, false);
                Some(box_score)
            }
            Err(err) => {
                self.record_error(&err, "Box score");
                if let Some(box_score) = self.disk_read::<BoxScore>(&key, CACHE_TTL_OFFLINE) {
                    self.from_cache.set(ResourceKind::BoxScore, true);
                    return Some(box_score);
                }
                self.from_cache.set(ResourceKind::BoxScore, false);
                None
            }
        }
    }

    /// Current roster for a team; empty when the fetch fails
    pub async fn fetch_team_roster(&self, team_id: i64) -> Vec<RosterPlayer> {
        self.clear_error();
        self.limiter.acquire().await;
        match self.retry.run(|| self.api.team_roster(team_id)).await {
            Ok(roster) => roster,
            Err(err) => {
                self.record_error(&err, "Roster");
                Vec::new()
            }
        }
    }

    /// Biographical profile and headline averages for a player
    pub async fn fetch_player_profile(&self, person_id: i64) -> Option<PlayerProfile> {
        self.clear_error();
        self.limiter.acquire().await;
        match self.retry.run(|| self.api.player_profile(person_id)).await {
            Ok(profile) => Some(profile),
            Err(err) => {
                self.record_error(&err, "Player");
                None
            }
        }
    }

    /// A player's most recent games, newest first, at most `limit` entries
    pub async fn fetch_player_game_log(
        &self,
        person_id: i64,
        limit: usize,
    ) -> Vec<GameLogEntry> {
        self.clear_error();
        self.limiter.acquire().await;
        match self.retry.run(|| self.api.player_game_log(person_id)).await {
            Ok(mut log) => {
                log.truncate(limit);
                log
            }
            Err(err) => {
                self.record_error(&err, "Game log");
                Vec::new()
            }
        }
    }

    /// A team's most recent games, newest first, at most `limit` entries
    pub async fn fetch_team_game_log(&self, team_id: i64, limit: usize) -> Vec<GameLogEntry> {
        self.clear_error();
        self.limiter.acquire().await;
        match self.retry.run(|| self.api.team_game_log(team_id)).await {
            Ok(mut log) => {
                log.truncate(limit);
                log
            }
            Err(err) => {
                self.record_error(&err, "Game log");
                Vec::new()
            }
        }
    }

    /// Season head-to-head between two teams: last meeting and series win
    /// tally, derived from both teams' game logs.
    ///
    /// Returns the zero-value summary when either id is unknown, either log
    /// fetch fails, or the teams have not met.
    pub async fn fetch_head_to_head(&self, team_a: i64, team_b: i64) -> HeadToHead {
        let (Some(a), Some(b)) = (team_by_id(team_a), team_by_id(team_b)) else {
            return HeadToHead::default();
        };

        self.clear_error();
        self.limiter.acquire().await;
        let log_a = match self.retry.run(|| self.api.team_game_log(team_a)).await {
            Ok(log) => log,
            Err(err) => {
                self.record_error(&err, "Head-to-head");
                return HeadToHead::default();
            }
        };
        let log_b = match self.retry.run(|| self.api.team_game_log(team_b)).await {
            Ok(log) => log,
            Err(err) => {
                self.record_error(&err, "Head-to-head");
                return HeadToHead::default();
            }
        };

        summary::derive_head_to_head(&log_a, &log_b, a.tricode, b.tricode)
    }

    /// Offline-tier reads for today's games, standings, and leaders, with no
    /// network access at all.
    ///
    /// This is the cold-start path: first paint is never blocked by a dead
    /// network. `last_error` is untouched because nothing was attempted.
    pub fn initial_data_from_cache_only(&self) -> InitialData {
        let date_str = Local::now().date_naive().format("%Y-%m-%d").to_string();
        let games_key = format!("games:{date_str}");

        let mut data = InitialData {
            scoreboard_date: date_str,
            ..InitialData::default()
        };
        if let Some(record) = self.disk_read::<CachedGames>(&games_key, CACHE_TTL_OFFLINE) {
            data.games = record.games;
            data.scoreboard_date = record.date;
            self.from_cache.set(ResourceKind::Games, true);
        }
        if let Some(standings) = self.disk_read::<Standings>(STANDINGS_KEY, CACHE_TTL_OFFLINE) {
            data.standings = standings;
            self.from_cache.set(ResourceKind::Standings, true);
        }
        if let Some(leaders) =
            self.disk_read::<LeagueLeaders>(LEAGUE_LEADERS_KEY, CACHE_TTL_OFFLINE)
        {
            data.leaders = leaders;
            self.from_cache.set(ResourceKind::LeagueLeaders, true);
        }
        data
    }

    /// Races the live startup fetches against a deadline.
    ///
    /// The fetches run on a spawned clone of the client; when they beat the
    /// window their results are returned, otherwise the cache-only read
    /// answers and the spawned task keeps running in the background,
    /// populating both cache tiers for the next call.
    pub async fn load_initial_data(&self, window: Duration) -> InitialData {
        let live = {
            let client = self.clone();
            tokio::spawn(async move {
                let (games, scoreboard_date) = client.fetch_games(None).await;
                let standings = client.fetch_standings().await;
                let leaders = client.fetch_league_leaders().await;
                InitialData {
                    games,
                    scoreboard_date,
                    standings,
                    leaders,
                }
            })
        };

        match tokio::time::timeout(window, live).await {
            Ok(Ok(data)) => data,
            Ok(Err(join_err)) => {
                warn!(%join_err, "initial load task failed");
                self.initial_data_from_cache_only()
            }
            Err(_) => self.initial_data_from_cache_only(),
        }
    }

    fn clear_error(&self) {
        if let Ok(mut error) = self.last_error.lock() {
            *error = None;
        }
    }

    fn record_error(&self, err: &FetchError, prefix: &str) {
        warn!(%err, prefix, "fetch failed after retries");
        let message = user_facing_error(err, prefix);
        if let Ok(mut error) = self.last_error.lock() {
            *error = Some(message);
        }
    }

    fn disk_read<T: serde::de::DeserializeOwned>(&self, key: &str, max_age: Duration) -> Option<T> {
        self.disk.as_ref()?.read(key, max_age)
    }

    fn disk_write<T: Serialize>(&self, key: &str, value: &T) {
        if let Some(disk) = &self.disk {
            let _ = disk.write(key, value);
        }
    }
}

/// Maximum length of a generic error message before truncation
const ERROR_MESSAGE_LIMIT: usize = 60;

/// Classifies a failure into a short user-facing message.
///
/// Classification is by the failure's message, not its type: the transport
/// stack wraps timeouts, refused connections, and HTTP statuses in layers of
/// error types, but their rendered messages are stable enough to route on.
fn user_facing_error(err: &FetchError, prefix: &str) -> String {
    let message = err.to_string();
    let lower = message.to_lowercase();
    if lower.contains("timeout") || lower.contains("timed out") {
        return "Connection timeout. Try again later.".to_string();
    }
    if lower.contains("connection") || lower.contains("network") || lower.contains("unreachable") {
        return "No connection. Check your network.".to_string();
    }
    if lower.contains("rate") || message.contains("429") || lower.contains("too many") {
        return "Too many requests. Wait a moment and retry.".to_string();
    }
    if message.contains("404") || lower.contains("not found") {
        return "Data not found.".to_string();
    }
    if message.chars().count() > ERROR_MESSAGE_LIMIT {
        let truncated: String = message.chars().take(ERROR_MESSAGE_LIMIT - 3).collect();
        return format!("{prefix}: {truncated}...");
    }
    format!("{prefix}: {message}")
}

//! Static league table
//!
//! The 30 franchises with their tricodes and league-assigned team ids. The
//! tricode is the join key between box-score data and standings/roster data;
//! the numeric id is what the stats endpoints take as a parameter.

/// One franchise entry in the static league table
#[derive(Debug, Clone, Copy)]
pub struct Team {
    /// Three-letter team code
    pub tricode: &'static str,
    /// Full franchise name
    pub name: &'static str,
    /// League-assigned team identifier
    pub team_id: i64,
}

/// All 30 franchises, alphabetical by tricode
pub static TEAMS: [Team; 30] = [
    Team { tricode: "ATL", name: "Atlanta Hawks", team_id: 1610612737 },
    Team { tricode: "BKN", name: "Brooklyn Nets", team_id: 1610612751 },
    Team { tricode: "BOS", name: "Boston Celtics", team_id: 1610612738 },
    Team { tricode: "CHA", name: "Charlotte Hornets", team_id: 1610612766 },
    Team { tricode: "CHI", name: "Chicago Bulls", team_id: 1610612741 },
    Team { tricode: "CLE", name: "Cleveland Cavaliers", team_id: 1610612739 },
    Team { tricode: "DAL", name: "Dallas Mavericks", team_id: 1610612742 },
    Team { tricode: "DEN", name: "Denver Nuggets", team_id: 1610612743 },
    Team { tricode: "DET", name: "Detroit Pistons", team_id: 1610612765 },
    Team { tricode: "GSW", name: "Golden State Warriors", team_id: 1610612744 },
    Team { tricode: "HOU", name: "Houston Rockets", team_id: 1610612745 },
    Team { tricode: "IND", name: "Indiana Pacers", team_id: 1610612754 },
    Team { tricode: "LAC", name: "LA Clippers", team_id: 1610612746 },
    Team { tricode: "LAL", name: "Los Angeles Lakers", team_id: 1610612747 },
    Team { tricode: "MEM", name: "Memphis Grizzlies", team_id: 1610612763 },
    Team { tricode: "MIA", name: "Miami Heat", team_id: 1610612748 },
    Team { tricode: "MIL", name: "Milwaukee Bucks", team_id: 1610612749 },
    Team { tricode: "MIN", name: "Minnesota Timberwolves", team_id: 1610612750 },
    Team { tricode: "NOP", name: "New Orleans Pelicans", team_id: 1610612740 },
    Team { tricode: "NYK", name: "New York Knicks", team_id: 1610612752 },
    Team { tricode: "OKC", name: "Oklahoma City Thunder", team_id: 1610612760 },
    Team { tricode: "ORL", name: "Orlando Magic", team_id: 1610612753 },
    Team { tricode: "PHI", name: "Philadelphia 76ers", team_id: 1610612755 },
    Team { tricode: "PHX", name: "Phoenix Suns", team_id: 1610612756 },
    Team { tricode: "POR", name: "Portland Trail Blazers", team_id: 1610612757 },
    Team { tricode: "SAC", name: "Sacramento Kings", team_id: 1610612758 },
    Team { tricode: "SAS", name: "San Antonio Spurs", team_id: 1610612759 },
    Team { tricode: "TOR", name: "Toronto Raptors", team_id: 1610612761 },
    Team { tricode: "UTA", name: "Utah Jazz", team_id: 1610612762 },
    Team { tricode: "WAS", name: "Washington Wizards", team_id: 1610612764 },
];

/// Returns the full league table
pub fn all_teams() -> &'static [Team] {
    &TEAMS
}

/// Looks up a franchise by tricode (case-insensitive)
pub fn team_by_tricode(tricode: &str) -> Option<&'static Team> {
    TEAMS.iter().find(|t| t.tricode.eq_ignore_ascii_case(tricode))
}

/// Returns the league id for a tricode
pub fn team_id_for(tricode: &str) -> Option<i64> {
    team_by_tricode(tricode).map(|t| t.team_id)
}

/// Looks up a franchise by its league-assigned id
pub fn team_by_id(team_id: i64) -> Option<&'static Team> {
    TEAMS.iter().find(|t| t.team_id == team_id)
}

/// Resolves a free-form team name to its tricode.
///
/// Standings feeds spell names slightly differently ("LA Lakers",
/// "Los Angeles Lakers"), so a containment match against the canonical name
/// is used before an exact comparison.
pub fn tricode_from_name(team_name: &str) -> Option<&'static str> {
    let trimmed = team_name.trim();
    if trimmed.is_empty() {
        return None;
    }
    TEAMS
        .iter()
        .find(|t| trimmed.contains(t.name) || t.name.contains(trimmed))
        .map(|t| t.tricode)
}

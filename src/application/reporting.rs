//! Console rendering of roster, teams and history.

use crate::domain::balancing::Assignment;
use crate::domain::history::MatchRecord;
use crate::domain::participant::{Participant, RatedParticipant, Side};
use crate::domain::rating::{RANKS, RatingModel};
use crate::domain::roster::{Roster, StreakLeaders};
use std::collections::HashMap;

/// Reporter for session output.
pub struct SessionReporter {
    model: RatingModel,
    lookback: usize,
}

impl SessionReporter {
    pub fn new(model: RatingModel, lookback: usize) -> Self {
        Self { model, lookback }
    }

    /// One roster line: selection, name, rank, record and streak bonus.
    pub fn format_participant(&self, p: &Participant) -> String {
        let adjustment = self.model.streak_adjustment(p.streak);
        let streak = match p.streak {
            s if s > 0 => format!("{}W streak ({:+})", s, adjustment),
            s if s < 0 => format!("{}L streak ({:+})", s.unsigned_abs(), adjustment),
            _ => "no streak".to_string(),
        };
        format!(
            "[{}] {:<16} {:<12} eff {:>5} | W-L {}-{} | {}",
            if p.selected { "x" } else { " " },
            p.name,
            p.rank.to_uppercase(),
            self.model.effective_rating(&p.rank, p.streak),
            p.wins,
            p.losses,
            streak
        )
    }

    pub fn print_roster(&self, roster: &Roster) {
        println!(
            "\n👥 Roster ({}/{}), selected {}/{}",
            roster.len(),
            roster.max_size(),
            roster.selected_count(),
            roster.max_selected()
        );
        println!("{}", "-".repeat(80));
        if roster.is_empty() {
            println!("  No players registered yet.");
        }
        for p in roster.participants() {
            println!("  {}  ({})", self.format_participant(p), p.id);
        }
        println!("{}", "-".repeat(80));
    }

    pub fn print_ranks(&self) {
        println!("\n🏅 Rank table:");
        for (label, rating) in RANKS.iter() {
            println!("  {:<12} {:>5}", label.to_uppercase(), rating);
        }
    }

    fn team_lines(
        &self,
        team: &[RatedParticipant],
        changes: &HashMap<String, bool>,
    ) -> Vec<String> {
        let mut sorted: Vec<&RatedParticipant> = team.iter().collect();
        sorted.sort_by(|a, b| b.rating.cmp(&a.rating));
        sorted
            .into_iter()
            .map(|p| {
                let marker = if changes.get(&p.id).copied().unwrap_or(false) {
                    "⇄ "
                } else {
                    "  "
                };
                format!("{}{:<16} {:>5}", marker, p.name, p.rating)
            })
            .collect()
    }

    pub fn print_assignment(&self, assignment: &Assignment, changes: &HashMap<String, bool>) {
        println!("\n{}", "=".repeat(80));
        println!("⚖️  BALANCED TEAMS");
        println!("{}", "=".repeat(80));
        for side in [Side::A, Side::B] {
            let total = match side {
                Side::A => assignment.rating_a,
                Side::B => assignment.rating_b,
            };
            println!("Team {} (rating {}):", side, total);
            for line in self.team_lines(assignment.team(side), changes) {
                println!("  {}", line);
            }
        }
        println!("{}", "-".repeat(80));
        println!(
            "Cost {} = rating gap {} + teammate repeats {} (last {} matches)",
            assignment.total_cost, assignment.imbalance_cost, assignment.repeat_cost, self.lookback
        );
        if changes.values().any(|&moved| moved) {
            println!("⇄ = switched sides since the previous teams");
        }
        println!("{}\n", "=".repeat(80));
    }

    pub fn format_record(&self, record: &MatchRecord) -> String {
        format!(
            "#{:<3} {} | team {} won | A {} / B {} | cost {}\n      A: {}\n      B: {}",
            record.index,
            record.recorded_at.format("%Y-%m-%d %H:%M"),
            record.winner,
            record.rating_a,
            record.rating_b,
            record.cost,
            record.team_a.join(", "),
            record.team_b.join(", ")
        )
    }

    pub fn print_history(&self, history: &[MatchRecord]) {
        println!("\n📜 Match history ({} matches)", history.len());
        if history.is_empty() {
            println!("  No matches recorded yet.");
        }
        for record in history {
            println!("  {}", self.format_record(record));
        }
    }

    pub fn format_streak_leaders(&self, leaders: &StreakLeaders) -> Vec<String> {
        let wins = if leaders.longest_win > 0 {
            format!(
                "🔥 {} on a {}-win streak",
                leaders.win_names.join(", "),
                leaders.longest_win
            )
        } else {
            "Nobody is on a win streak.".to_string()
        };
        let losses = if leaders.longest_loss > 0 {
            format!(
                "💧 {} on a {}-loss streak",
                leaders.loss_names.join(", "),
                leaders.longest_loss
            )
        } else {
            "Nobody is on a loss streak.".to_string()
        };
        vec![wins, losses]
    }

    pub fn print_streak_leaders(&self, leaders: &StreakLeaders) {
        for line in self.format_streak_leaders(leaders) {
            println!("  {}", line);
        }
    }
}

impl Default for SessionReporter {
    fn default() -> Self {
        Self::new(RatingModel::default(), crate::domain::balancing::DEFAULT_LOOKBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::balancing::{PairCounts, score};

    #[test]
    fn test_format_participant_shows_streak_bonus() {
        let mut p = Participant::new("Ann", "gold4");
        p.streak = 3;
        p.wins = 5;
        p.losses = 2;
        p.selected = true;

        let line = SessionReporter::default().format_participant(&p);
        assert!(line.starts_with("[x] Ann"));
        assert!(line.contains("GOLD4"));
        assert!(line.contains("1250"));
        assert!(line.contains("W-L 5-2"));
        assert!(line.contains("3W streak (+50)"));
    }

    #[test]
    fn test_team_lines_mark_switched_players() {
        let team_a = vec![
            RatedParticipant::new("1", "Low", 1000),
            RatedParticipant::new("2", "High", 2000),
        ];
        let assignment = score(team_a, Vec::new(), &PairCounts::default());
        let changes = HashMap::from([("1".to_string(), true), ("2".to_string(), false)]);

        let lines = SessionReporter::default().team_lines(&assignment.team_a, &changes);
        assert!(lines[0].starts_with("  High"));
        assert!(lines[1].starts_with("⇄ Low"));
    }

    #[test]
    fn test_streak_leaders_text() {
        let reporter = SessionReporter::default();
        let quiet = reporter.format_streak_leaders(&StreakLeaders::default());
        assert_eq!(quiet[0], "Nobody is on a win streak.");

        let leaders = StreakLeaders {
            longest_win: 4,
            win_names: vec!["Ann".to_string(), "Bob".to_string()],
            longest_loss: 0,
            loss_names: Vec::new(),
        };
        let lines = reporter.format_streak_leaders(&leaders);
        assert!(lines[0].contains("Ann, Bob on a 4-win streak"));
    }
}

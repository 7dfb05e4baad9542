//! Initial team creation from a list of names.

use crate::types::{Team, TeamId};

/// Build the roster: ids follow input order starting at 1, names are trimmed
/// and blank entries fall back to `"Team N"`.
pub fn create_initial_teams<S: AsRef<str>>(names: &[S]) -> Vec<Team> {
    names
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let id = index as TeamId + 1;
            let trimmed = name.as_ref().trim();
            if trimmed.is_empty() {
                Team::new(id, format!("Team {}", id))
            } else {
                Team::new(id, trimmed)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_input_order() {
        let teams = create_initial_teams(&["Les Boulistes", "Carreau", "Cochonnet"]);
        let ids: Vec<_> = teams.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(teams[1].name, "Carreau");
    }

    #[test]
    fn test_names_trimmed_and_defaulted() {
        let teams = create_initial_teams(&["  Pointeurs ", "", "   "]);
        assert_eq!(teams[0].name, "Pointeurs");
        assert_eq!(teams[1].name, "Team 2");
        assert_eq!(teams[2].name, "Team 3");
    }

    #[test]
    fn test_records_start_at_zero() {
        let teams = create_initial_teams(&[String::from("A")]);
        assert_eq!(teams[0], Team::new(1, "A"));
        assert!(create_initial_teams::<&str>(&[]).is_empty());
    }
}

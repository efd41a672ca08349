use crate::model::ScoreRules;

/// Points for a task: the first rule whose keyword occurs in the title or
/// equals one of the tags, otherwise `default`.
///
/// Title matching is by substring, tag matching by whole-tag equality; both
/// ignore case.
pub fn score(title: &str, tags: &[String], rules: &ScoreRules, default: u32) -> u32 {
    let title = title.to_lowercase();
    let tags = tags.iter().map(|t| t.to_lowercase()).collect::<Vec<_>>();
    rules
        .iter()
        .find(|rule| title.contains(&rule.keyword) || tags.contains(&rule.keyword))
        .map_or(default, |rule| rule.points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_SCORE;

    fn rules() -> ScoreRules {
        ScoreRules::new([("urgent", 10), ("bug", 5), ("design", 3)])
    }

    fn tags(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn first_configured_rule_wins() {
        assert_eq!(score("Fix urgent bug", &[], &rules(), DEFAULT_SCORE), 10);
        assert_eq!(score("Fix bug, urgent", &[], &rules(), DEFAULT_SCORE), 10);

        let reversed = ScoreRules::new([("bug", 5), ("urgent", 10)]);
        assert_eq!(score("Fix urgent bug", &[], &reversed, DEFAULT_SCORE), 5);
    }

    #[test]
    fn title_matches_by_substring_ignoring_case() {
        assert_eq!(score("DEBUGGING session", &[], &rules(), DEFAULT_SCORE), 5);
    }

    #[test]
    fn tags_match_by_equality_ignoring_case() {
        assert_eq!(score("Landing page", &tags(&["Design"]), &rules(), DEFAULT_SCORE), 3);
        assert_eq!(
            score("Landing page", &tags(&["design-system"]), &rules(), DEFAULT_SCORE),
            DEFAULT_SCORE
        );
    }

    #[test]
    fn title_match_outranks_later_tag_match() {
        assert_eq!(score("Bug triage", &tags(&["urgent"]), &rules(), DEFAULT_SCORE), 10);
    }

    #[test]
    fn falls_back_to_default() {
        assert_eq!(score("Weekly sync", &tags(&["meeting"]), &rules(), DEFAULT_SCORE), 2);
        assert_eq!(score("Anything", &[], &ScoreRules::default(), 7), 7);
    }

    #[test]
    fn zero_point_rules_are_honoured() {
        let rules = ScoreRules::new([("duplicate", 0), ("bug", 5)]);
        assert_eq!(score("Duplicate bug report", &[], &rules, DEFAULT_SCORE), 0);
    }
}

//! Skill extraction and scoring heuristic (local mode).
//!
//! A "skill candidate" is a capitalized word of the job text, treated as a
//! proxy for a named skill or technology. The whole heuristic is exact
//! string work: deterministic, fully testable, no model call.

/// Display caps for the wizard's tag lists.
pub const MATCHED_SKILLS_CAP: usize = 8;
pub const MISSING_SKILLS_CAP: usize = 5;

/// Unconditional display floor. Keyword overlap is a coarse signal and
/// product treats sub-65 output as noise, so even a zero-match CV reports
/// 65. Confirmed product decision; do not remove without sign-off.
pub const SCORE_FLOOR: u32 = 65;

/// Candidates must be longer than two characters ("Go" and "R" lose out,
/// "AWS" stays in).
const MIN_CANDIDATE_LEN: usize = 3;

/// Extracts the candidate skill set from a job description: maximal runs of
/// word characters that are entirely ASCII letters, start uppercase, and
/// meet the length bar. First-appearance order, duplicates removed.
pub fn candidate_skills(jd_text: &str) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();

    for word in jd_text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_')) {
        if word.len() < MIN_CANDIDATE_LEN {
            continue;
        }
        let mut chars = word.chars();
        let leading_upper = chars.next().is_some_and(|c| c.is_ascii_uppercase());
        // Runs with digits or underscores are not skill-shaped words.
        if !leading_upper || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            continue;
        }
        if !candidates.iter().any(|c| c == word) {
            candidates.push(word.to_string());
        }
    }

    candidates
}

/// Splits candidates into (matched, missing) against the extracted CV text.
/// A candidate matches iff it appears verbatim anywhere in the CV.
pub fn classify_skills(candidates: &[String], cv_text: &str) -> (Vec<String>, Vec<String>) {
    let mut matched = Vec::new();
    let mut missing = Vec::new();

    for skill in candidates {
        if cv_text.contains(skill.as_str()) {
            matched.push(skill.clone());
        } else {
            missing.push(skill.clone());
        }
    }

    (matched, missing)
}

/// Percentage of matched candidates, rounded half-up. Zero candidates score
/// zero here; the floor is applied separately.
pub fn raw_score(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((matched as f64 / total as f64) * 100.0).round() as u32
}

pub fn floored_score(raw: u32) -> u32 {
    raw.max(SCORE_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_preserve_first_appearance_order() {
        let skills = candidate_skills("React and TypeScript. More React, then AWS.");
        assert_eq!(skills, vec!["React", "TypeScript", "More", "AWS"]);
    }

    #[test]
    fn test_candidates_require_leading_uppercase() {
        let skills = candidate_skills("we need react and kubernetes experience");
        assert!(skills.is_empty());
    }

    #[test]
    fn test_candidates_require_length_over_two() {
        let skills = candidate_skills("Go and R are nice but AWS pays");
        assert_eq!(skills, vec!["AWS"]);
    }

    #[test]
    fn test_candidates_skip_runs_with_digits() {
        // "React18" is one word-character run; the digit disqualifies it.
        let skills = candidate_skills("React18 exposure required");
        assert!(skills.is_empty());
    }

    #[test]
    fn test_candidates_split_on_punctuation() {
        let skills = candidate_skills("Node.js, Object-Oriented design");
        assert_eq!(skills, vec!["Node", "Object", "Oriented"]);
    }

    #[test]
    fn test_candidates_empty_text() {
        assert!(candidate_skills("").is_empty());
        assert!(candidate_skills("   \n\t").is_empty());
    }

    #[test]
    fn test_classify_partitions_candidates() {
        let candidates = vec![
            "React".to_string(),
            "TypeScript".to_string(),
            "AWS".to_string(),
        ];
        let (matched, missing) = classify_skills(&candidates, "Shipped React dashboards.");
        assert_eq!(matched, vec!["React"]);
        assert_eq!(missing, vec!["TypeScript", "AWS"]);
        // Disjoint, and their union is exactly the candidate set.
        assert_eq!(matched.len() + missing.len(), candidates.len());
        assert!(matched.iter().all(|s| !missing.contains(s)));
    }

    #[test]
    fn test_classify_is_case_sensitive_substring_search() {
        let candidates = vec!["React".to_string()];
        let (matched, missing) = classify_skills(&candidates, "built react apps");
        assert!(matched.is_empty());
        assert_eq!(missing, vec!["React"]);
    }

    #[test]
    fn test_raw_score_zero_candidates_is_zero() {
        assert_eq!(raw_score(0, 0), 0);
    }

    #[test]
    fn test_raw_score_rounds_to_nearest() {
        assert_eq!(raw_score(1, 3), 33);
        assert_eq!(raw_score(2, 3), 67);
        assert_eq!(raw_score(1, 2), 50);
        assert_eq!(raw_score(3, 3), 100);
    }

    #[test]
    fn test_raw_score_monotonic_in_matched_count() {
        for total in 1..=20 {
            let mut previous = 0;
            for matched in 0..=total {
                let score = raw_score(matched, total);
                assert!(score >= previous, "score regressed at {matched}/{total}");
                previous = score;
            }
        }
    }

    #[test]
    fn test_floor_lifts_low_scores_only() {
        assert_eq!(floored_score(0), SCORE_FLOOR);
        assert_eq!(floored_score(33), SCORE_FLOOR);
        assert_eq!(floored_score(65), 65);
        assert_eq!(floored_score(90), 90);
    }
}

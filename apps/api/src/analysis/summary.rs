//! Rewritten-summary template for heuristic runs. Interpolates the skill
//! lists into a fixed ATS-friendly skeleton; every slot has a fallback
//! literal so the template never renders a hole.

const FALLBACK_ROLE: &str = "Target Role";
const FALLBACK_PROFILE: &str = "software development";
const FALLBACK_FIRST_SKILL: &str = "skills";
const FALLBACK_SECOND_SKILL: &str = "technology";
const FALLBACK_MISSING: &str = "new technologies";

/// Number of matched skills named in the profile sentence.
const PROFILE_SKILLS: usize = 3;
/// Number of missing skills appended to the core-skills line.
const CORE_MISSING_SKILLS: usize = 2;

/// Builds the rewritten CV summary from the *uncapped* matched/missing
/// lists; display caps are applied later, on the response lists only.
pub fn build_rewritten_summary(
    top_skill: Option<&str>,
    matched: &[String],
    missing: &[String],
) -> String {
    let role = top_skill.unwrap_or(FALLBACK_ROLE);

    let profile = match &matched[..matched.len().min(PROFILE_SKILLS)] {
        [] => FALLBACK_PROFILE.to_string(),
        head => head.join(", "),
    };

    let core_skills: Vec<&str> = matched
        .iter()
        .chain(missing.iter().take(CORE_MISSING_SKILLS))
        .map(String::as_str)
        .collect();
    let core_skills = core_skills.join(" • ");

    let first = matched.first().map_or(FALLBACK_FIRST_SKILL, String::as_str);
    let second = matched.get(1).map_or(FALLBACK_SECOND_SKILL, String::as_str);
    let gap = missing.first().map_or(FALLBACK_MISSING, String::as_str);

    format!(
        "# Optimized CV for {role}\n\
         \n\
         ## Profile\n\
         Results-oriented professional with strong experience in {profile}.\n\
         Proven track record of delivering high-quality solutions.\n\
         \n\
         ## Core Skills\n\
         {core_skills}\n\
         \n\
         ## Professional Experience\n\
         **Candidate's Previous Role**\n\
         * Leveraged {first} to improve system performance.\n\
         * Implemented solutions using {second}, resulting in efficiency gains.\n\
         * Addressed requirements for {gap} by rapid upskilling.\n\
         \n\
         (Note: This is an AI-generated optimization based on the JD requirements.)"
    )
}

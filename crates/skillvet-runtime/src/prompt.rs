use std::path::Path;

/// System prompt for every review session.
pub const REVIEW_SYSTEM_PROMPT: &str = "You are a meticulous reviewer of agent skills. \
A skill is a directory of markdown documentation and supporting scripts that teaches \
an AI agent a reusable capability. You judge clarity, completeness, and correctness, \
and you ground every observation in the actual files you read.";

/// The fixed review instruction template. `{skill_path}` is the only
/// interpolation point; the same template is used for every skill.
const REVIEW_TEMPLATE: &str = "\
Review the skill at {skill_path}.

Use the file_list tool to explore the directory and the file_read tool to read its
files. Start with the primary markdown document, then look into the references/ and
scripts/ subdirectories if they exist.

When you are done exploring, produce an improvement report with exactly these five
sections, as markdown headings:

## Summary
What the skill does and how it is organized.

## Strengths
What the skill does well.

## Areas for Improvement
Gaps, ambiguities, outdated or contradictory material.

## Priority Actions
The most valuable concrete changes, ordered by impact.

## Code Quality
Assessment of any scripts or examples the skill ships.

Respond with the report only — no preamble.";

/// Render the review prompt for one skill. Pure function of the path.
pub fn build_review_prompt(skill_path: &Path) -> String {
    REVIEW_TEMPLATE.replace("{skill_path}", &skill_path.display().to_string())
}

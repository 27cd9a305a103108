use std::path::{Path, PathBuf};
use tracing::debug;

/// Placeholder entries that never count as skills even if they were directories.
const DENYLIST: &[&str] = &[".gitkeep", ".DS_Store"];

/// A reference to one skill directory, the unit of review.
///
/// The path existed at enumeration time; it may be gone by read time
/// (TOCTOU is accepted — the file tools report it to the model).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRef {
    pub name: String,
    pub path: PathBuf,
}

/// Enumerate the skills under `root`: immediate subdirectories only,
/// dot-prefixed and placeholder entries excluded, sorted by name so runs
/// are reproducible (a deliberate deviation from raw filesystem order).
/// `limit` truncates to the first N after sorting.
pub fn enumerate_skills(root: &Path, limit: Option<usize>) -> skillvet_core::Result<Vec<SkillRef>> {
    let entries = std::fs::read_dir(root).map_err(|e| {
        skillvet_core::VetError::Enumeration(format!(
            "failed to read skills dir {}: {}",
            root.display(),
            e
        ))
    })?;

    let mut skills = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| skillvet_core::VetError::Enumeration(e.to_string()))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().to_string();

        if !path.is_dir() {
            debug!(entry = %name, "skipping non-directory entry");
            continue;
        }
        if name.starts_with('.') || DENYLIST.contains(&name.as_str()) {
            debug!(entry = %name, "skipping placeholder entry");
            continue;
        }

        skills.push(SkillRef { name, path });
    }

    skills.sort_by(|a, b| a.name.cmp(&b.name));
    if let Some(n) = limit {
        skills.truncate(n);
    }

    Ok(skills)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_skills_root(names: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::create_dir_all(dir.path().join(name)).unwrap();
        }
        dir
    }

    #[test]
    fn enumerates_exactly_the_directories() {
        let root = make_skills_root(&["alpha", "beta", "gamma"]);
        let skills = enumerate_skills(root.path(), None).unwrap();
        let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn skips_files_and_placeholders() {
        let root = make_skills_root(&["alpha", "beta"]);
        std::fs::write(root.path().join(".gitkeep"), "").unwrap();
        std::fs::write(root.path().join("README.md"), "not a skill").unwrap();
        std::fs::create_dir_all(root.path().join(".hidden")).unwrap();

        let skills = enumerate_skills(root.path(), None).unwrap();
        let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn sorted_by_name_regardless_of_creation_order() {
        let root = make_skills_root(&["zebra", "apple", "mango"]);
        let skills = enumerate_skills(root.path(), None).unwrap();
        let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["apple", "mango", "zebra"]);
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let root = make_skills_root(&["charlie", "alpha", "beta"]);
        let skills = enumerate_skills(root.path(), Some(2)).unwrap();
        let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
    }

    #[test]
    fn limit_larger_than_count_is_a_noop() {
        let root = make_skills_root(&["alpha", "beta"]);
        let skills = enumerate_skills(root.path(), Some(10)).unwrap();
        assert_eq!(skills.len(), 2);
    }

    #[test]
    fn missing_root_is_an_enumeration_error() {
        let err = enumerate_skills(Path::new("/nonexistent/skills"), None).unwrap_err();
        assert!(matches!(err, skillvet_core::VetError::Enumeration(_)));
    }

    #[test]
    fn paths_point_into_the_root() {
        let root = make_skills_root(&["alpha"]);
        let skills = enumerate_skills(root.path(), None).unwrap();
        assert_eq!(skills[0].path, root.path().join("alpha"));
    }
}

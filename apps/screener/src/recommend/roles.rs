//! Role suggestion: ranks target roles by overlap with the detected skills.

use serde::{Deserialize, Serialize};

const TOP_ROLES: usize = 5;
const MISSING_SKILL_WINDOW: usize = 5;

pub const ROLE_SKILLS: &[(&str, &[&str])] = &[
    (
        "Data Scientist",
        &[
            "Python",
            "R",
            "Machine Learning",
            "Data Science",
            "TensorFlow",
            "PyTorch",
            "Pandas",
            "NumPy",
            "SQL",
            "Tableau",
            "Power BI",
        ],
    ),
    (
        "Machine Learning Engineer",
        &[
            "Python",
            "TensorFlow",
            "PyTorch",
            "Machine Learning",
            "AI",
            "Docker",
            "Kubernetes",
            "AWS",
            "Azure",
        ],
    ),
    (
        "Frontend Developer",
        &[
            "JavaScript",
            "React",
            "Angular",
            "Vue.js",
            "HTML",
            "CSS",
            "TypeScript",
            "Webpack",
            "Sass",
        ],
    ),
    (
        "Backend Developer",
        &[
            "Python",
            "Java",
            "Node.js",
            "Express",
            "Django",
            "Flask",
            "Spring Boot",
            "SQL",
            "MongoDB",
            "REST API",
        ],
    ),
    (
        "Full Stack Developer",
        &[
            "JavaScript",
            "React",
            "Node.js",
            "Python",
            "SQL",
            "MongoDB",
            "HTML",
            "CSS",
            "REST API",
        ],
    ),
    (
        "DevOps Engineer",
        &[
            "Docker",
            "Kubernetes",
            "AWS",
            "Azure",
            "Jenkins",
            "CI/CD",
            "Linux",
            "Git",
            "Terraform",
        ],
    ),
    (
        "Cloud Engineer",
        &[
            "AWS",
            "Azure",
            "GCP",
            "Docker",
            "Kubernetes",
            "Terraform",
            "Linux",
            "Python",
        ],
    ),
    (
        "Mobile Developer",
        &["Swift", "Kotlin", "React Native", "Flutter", "Java", "Objective-C"],
    ),
    (
        "Game Developer",
        &["Unity", "Unreal Engine", "C#", "C++", "Python", "JavaScript"],
    ),
    (
        "UI/UX Designer",
        &["Figma", "Sketch", "Adobe XD", "Photoshop", "Illustrator", "HTML", "CSS"],
    ),
    (
        "Data Engineer",
        &[
            "Python",
            "SQL",
            "Apache Spark",
            "Hadoop",
            "Kafka",
            "Airflow",
            "AWS",
            "Docker",
        ],
    ),
    (
        "Cybersecurity Analyst",
        &[
            "Python",
            "Linux",
            "Network Security",
            "Penetration Testing",
            "CISSP",
            "CEH",
        ],
    ),
    (
        "Product Manager",
        &["Agile", "Scrum", "JIRA", "Analytics", "SQL", "Excel", "Tableau"],
    ),
    (
        "Software Engineer",
        &[
            "Python",
            "Java",
            "JavaScript",
            "Git",
            "SQL",
            "REST API",
            "Agile",
            "Testing",
        ],
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleSuggestion {
    pub role: String,
    pub score: u32,
    /// matched / required × 100, capped at 100.
    pub match_percentage: f32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn fallback_roles(skills: &[String]) -> Vec<RoleSuggestion> {
    let head = |n: usize, filler: &str| -> Vec<String> {
        if skills.is_empty() {
            vec![filler.to_string()]
        } else {
            skills.iter().take(n).cloned().collect()
        }
    };
    vec![
        RoleSuggestion {
            role: "Software Engineer".to_string(),
            score: 1,
            match_percentage: 60.0,
            matched_skills: head(3, "Programming"),
            missing_skills: owned(&["Python", "JavaScript", "Git"]),
        },
        RoleSuggestion {
            role: "Data Analyst".to_string(),
            score: 1,
            match_percentage: 50.0,
            matched_skills: head(2, "Analysis"),
            missing_skills: owned(&["SQL", "Excel", "Python"]),
        },
    ]
}

/// Ranks roles by how many of their required skills appear in `skills`.
/// Ties keep table order. Falls back to two generic roles when nothing overlaps.
pub fn suggest_roles(skills: &[String]) -> Vec<RoleSuggestion> {
    let mut ranked: Vec<RoleSuggestion> = ROLE_SKILLS
        .iter()
        .filter_map(|(role, required)| {
            let matched: Vec<String> = skills
                .iter()
                .filter(|s| required.contains(&s.as_str()))
                .cloned()
                .collect();
            if matched.is_empty() {
                return None;
            }
            let score = matched.len() as u32;
            let missing = required
                .iter()
                .take(MISSING_SKILL_WINDOW)
                .filter(|r| !skills.iter().any(|s| s == *r))
                .map(|r| r.to_string())
                .collect();
            Some(RoleSuggestion {
                role: role.to_string(),
                score,
                match_percentage: (score as f32 / required.len() as f32 * 100.0).min(100.0),
                matched_skills: matched,
                missing_skills: missing,
            })
        })
        .collect();

    if ranked.is_empty() {
        return fallback_roles(skills);
    }

    // sort_by is stable, so equal scores keep table order
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(TOP_ROLES);
    ranked
}

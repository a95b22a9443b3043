use once_cell::sync::Lazy;
use regex::Regex;

/// One scoring category: a set of patterns sharing a weight.
///
/// Each matching pattern contributes `weight / patterns.len()`.
#[derive(Debug)]
pub struct ScoreCriterion {
    pub name: &'static str,
    pub patterns: Vec<Regex>,
    pub weight: u32,
    pub suggestion: &'static str,
}

impl ScoreCriterion {
    fn new(
        name: &'static str,
        patterns: &[&str],
        weight: u32,
        suggestion: &'static str,
    ) -> Self {
        Self {
            name,
            patterns: patterns
                .iter()
                .map(|p| Regex::new(p).expect("criterion pattern must compile"))
                .collect(),
            weight,
            suggestion,
        }
    }
}

/// The six criteria in declaration order. Suggestions are emitted in this order.
/// Patterns are lower-case and run against lower-cased text.
pub static CRITERIA: Lazy<Vec<ScoreCriterion>> = Lazy::new(|| {
    vec![
        ScoreCriterion::new(
            "contact_info",
            &[
                r"email|@",
                r"phone|tel|\d{3}[-.]?\d{3}[-.]?\d{4}",
                r"linkedin|github",
            ],
            15,
            "Include complete contact information (email, phone, LinkedIn)",
        ),
        ScoreCriterion::new(
            "experience",
            &[
                r"experience|work|job|position|role",
                r"company|organization|corp",
            ],
            25,
            "Add more detailed work experience with specific roles and companies",
        ),
        ScoreCriterion::new(
            "education",
            &[
                r"education|degree|university|college|school",
                r"bachelor|master|phd|diploma",
            ],
            20,
            "Include educational background with degrees and institutions",
        ),
        ScoreCriterion::new(
            "skills",
            &[
                r"skills|technical|programming|software",
                r"python|java|javascript|html|css",
            ],
            20,
            "List relevant technical and soft skills",
        ),
        ScoreCriterion::new(
            "achievements",
            &[
                r"achievement|award|project|accomplishment",
                r"led|managed|developed|created",
            ],
            10,
            "Highlight key achievements and projects",
        ),
        ScoreCriterion::new(
            "keywords",
            &[r"responsible|managed|developed|implemented|designed|created"],
            10,
            "Use more action verbs and industry-specific keywords",
        ),
    ]
});

use serde::Deserialize;

/// Form body for posting a job from the employer dashboard.
#[derive(Debug, Deserialize)]
pub struct NewJobForm {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub salary: String,
}

/// Form body for applying to a job.
#[derive(Debug, Deserialize)]
pub struct ApplyForm {
    #[serde(default)]
    pub cover_letter: String,
}

/// Empty optional form fields become NULL columns.
pub fn blank_to_none(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Sample protected resource
use axum::Json;
use serde::Serialize;

use crate::middleware::CurrentUser;

#[derive(Debug, Clone, Serialize)]
pub struct JobApplication {
    pub company: String,
    pub position: String,
}

/// List job applications.
///
/// Requires an authenticated request; anonymous requests are rejected by the
/// `CurrentUser` extractor before this body runs.
pub async fn list_applications(_user: CurrentUser) -> Json<Vec<JobApplication>> {
    let applications = [
        ("Google", "Software Engineer"),
        ("Microsoft", "Backend Developer"),
        ("Amazon", "Cloud Engineer"),
        ("Apple", "iOS Developer"),
        ("Facebook", "Data Scientist"),
        ("Netflix", "DevOps Engineer"),
        ("Tesla", "AI Researcher"),
        ("Airbnb", "Full Stack Developer"),
        ("Uber", "Mobile Developer"),
        ("Salesforce", "Solutions Architect"),
    ]
    .into_iter()
    .map(|(company, position)| JobApplication {
        company: company.to_string(),
        position: position.to_string(),
    })
    .collect();

    Json(applications)
}

use crate::scope::identity::EntityId;
use crate::scope::{Level, ResolvedScope};

/// Every statistics resource the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Organization { org_id: EntityId },
    Department { department_id: EntityId },
    Occupation { department_id: EntityId, occupation_id: EntityId },
    JobAd { job_ad_id: EntityId },
    JobAdCandidates { job_ad_id: EntityId },
    JobAdCandidateSummary { job_ad_id: EntityId },
    CandidateStats { candidate_id: EntityId },
    JobAdSteps { job_ad_id: EntityId },
    Step { job_ad_id: EntityId, step_id: EntityId },
    StepQuestions { job_ad_id: EntityId, step_id: EntityId },
    Question { job_ad_id: EntityId, question_id: EntityId },
    QuestionSkills { question_id: EntityId },
    Skill { skill_id: EntityId },
}

impl Endpoint {
    /// Path relative to the API base, without a leading slash.
    pub fn path(&self) -> String {
        match *self {
            Endpoint::Organization { org_id } => format!("statistics/organization/{org_id}"),
            Endpoint::Department { department_id } => {
                format!("statistics/department/{department_id}")
            }
            Endpoint::Occupation {
                department_id,
                occupation_id,
            } => format!("statistics/occupation/{department_id}/{occupation_id}"),
            Endpoint::JobAd { job_ad_id } => format!("statistics/jobad/{job_ad_id}"),
            Endpoint::JobAdCandidates { job_ad_id } => {
                format!("statistics/jobad/{job_ad_id}/candidates")
            }
            Endpoint::JobAdCandidateSummary { job_ad_id } => {
                format!("statistics/jobad/{job_ad_id}/candidateSummary")
            }
            Endpoint::CandidateStats { candidate_id } => {
                format!("statistics/candidate/{candidate_id}/stats")
            }
            Endpoint::JobAdSteps { job_ad_id } => format!("statistics/jobad/{job_ad_id}/steps"),
            Endpoint::Step { job_ad_id, step_id } => {
                format!("statistics/jobad/{job_ad_id}/step/{step_id}")
            }
            Endpoint::StepQuestions { job_ad_id, step_id } => {
                format!("statistics/jobad/{job_ad_id}/step/{step_id}/questions")
            }
            Endpoint::Question {
                job_ad_id,
                question_id,
            } => format!("statistics/jobad/{job_ad_id}/question/{question_id}"),
            Endpoint::QuestionSkills { question_id } => {
                format!("statistics/question/{question_id}/skills")
            }
            Endpoint::Skill { skill_id } => format!("statistics/skill/{skill_id}"),
        }
    }

    /// Overview endpoint for a resolved scope. `None` when an id the path
    /// needs is missing (an occupation without a known department).
    pub fn overview(scope: &ResolvedScope) -> Option<Self> {
        match scope.level {
            Level::Organization => Some(Endpoint::Organization {
                org_id: scope.org_id,
            }),
            Level::Department => scope
                .department_id
                .map(|department_id| Endpoint::Department { department_id }),
            Level::Occupation => match (scope.department_id, scope.occupation_id) {
                (Some(department_id), Some(occupation_id)) => Some(Endpoint::Occupation {
                    department_id,
                    occupation_id,
                }),
                _ => None,
            },
            Level::JobAd => scope.job_ad_id.map(|job_ad_id| Endpoint::JobAd { job_ad_id }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/endpoints.rs"]
mod tests;

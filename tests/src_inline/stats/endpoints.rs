use serde_json::json;

use super::*;

fn scope(
    level: Level,
    department_id: Option<i64>,
    occupation_id: Option<i64>,
    job_ad_id: Option<i64>,
) -> ResolvedScope {
    ResolvedScope {
        level,
        org_id: 1,
        department_id,
        occupation_id,
        job_ad_id,
        scope_data: json!({}),
    }
}

#[test]
fn test_paths() {
    assert_eq!(
        Endpoint::Organization { org_id: 1 }.path(),
        "statistics/organization/1"
    );
    assert_eq!(
        Endpoint::Occupation {
            department_id: 4,
            occupation_id: 9
        }
        .path(),
        "statistics/occupation/4/9"
    );
    assert_eq!(
        Endpoint::JobAdCandidateSummary { job_ad_id: 101 }.path(),
        "statistics/jobad/101/candidateSummary"
    );
    assert_eq!(
        Endpoint::StepQuestions {
            job_ad_id: 101,
            step_id: 3
        }
        .path(),
        "statistics/jobad/101/step/3/questions"
    );
    assert_eq!(
        Endpoint::QuestionSkills { question_id: 8 }.path(),
        "statistics/question/8/skills"
    );
    assert_eq!(
        Endpoint::CandidateStats { candidate_id: 55 }.path(),
        "statistics/candidate/55/stats"
    );
}

#[test]
fn test_overview_per_level() {
    assert_eq!(
        Endpoint::overview(&scope(Level::Organization, Some(4), None, None)),
        Some(Endpoint::Organization { org_id: 1 })
    );
    assert_eq!(
        Endpoint::overview(&scope(Level::Department, Some(4), None, None)),
        Some(Endpoint::Department { department_id: 4 })
    );
    assert_eq!(
        Endpoint::overview(&scope(Level::Occupation, Some(4), Some(9), None)),
        Some(Endpoint::Occupation {
            department_id: 4,
            occupation_id: 9
        })
    );
    assert_eq!(
        Endpoint::overview(&scope(Level::JobAd, Some(4), Some(9), Some(101))),
        Some(Endpoint::JobAd { job_ad_id: 101 })
    );
}

#[test]
fn test_occupation_without_department_has_no_endpoint() {
    assert_eq!(
        Endpoint::overview(&scope(Level::Occupation, None, Some(9), None)),
        None
    );
}

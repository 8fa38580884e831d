pub mod json;
pub mod text;
pub mod widgets;

use std::str::FromStr;

use crate::stats::RankedKind;

pub const RANKING_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err("invalid format (use text|json)".to_string()),
        }
    }
}

pub fn ranking_title(kind: RankedKind) -> String {
    let plural = match kind {
        RankedKind::Department => "departments",
        RankedKind::Occupation => "occupations",
        RankedKind::JobAd => "job ads",
        RankedKind::Candidate => "candidates",
        RankedKind::Step => "steps",
        RankedKind::Question => "questions",
        RankedKind::Skill => "skills",
    };
    format!("Hardest {plural} (lowest average first)")
}

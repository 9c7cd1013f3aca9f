//! Alumnus domain models.
//!
//! The gateway has two historical shapes for alumnus identifiers: some
//! deployments return `alumniId`, others `id`, and either may arrive as a
//! number or a string. The variance is absorbed here, at ingestion, so that
//! internal logic only ever sees one canonical string identifier.

use serde::{Deserialize, Serialize};

/// An alumnus summary record with a canonical identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawAlumnus")]
pub struct AlumnusSummary {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub major: Option<String>,
    #[serde(default)]
    pub graduation_year: Option<i32>,
}

impl AlumnusSummary {
    /// String-normalized identifier comparison.
    ///
    /// Numeric and string forms of the same id must compare equal, so both
    /// sides are compared as trimmed strings.
    pub fn matches_id(&self, candidate: &str) -> bool {
        self.id.trim() == candidate.trim()
    }
}

/// Either spelling of the identifier field, number or string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IdValue {
    Number(i64),
    Text(String),
}

impl IdValue {
    fn into_canonical(self) -> String {
        match self {
            IdValue::Number(n) => n.to_string(),
            IdValue::Text(s) => s.trim().to_string(),
        }
    }
}

/// Wire shape before identifier normalization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAlumnus {
    #[serde(default)]
    alumni_id: Option<IdValue>,
    #[serde(default)]
    id: Option<IdValue>,
    name: String,
    #[serde(default)]
    job_title: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default)]
    major: Option<String>,
    #[serde(default)]
    graduation_year: Option<i32>,
}

impl TryFrom<RawAlumnus> for AlumnusSummary {
    type Error = String;

    fn try_from(raw: RawAlumnus) -> Result<Self, Self::Error> {
        let id = raw
            .alumni_id
            .or(raw.id)
            .map(IdValue::into_canonical)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| format!("alumnus record '{}' carries no identifier", raw.name))?;

        Ok(Self {
            id,
            name: raw.name,
            job_title: raw.job_title,
            company: raw.company,
            major: raw.major,
            graduation_year: raw.graduation_year,
        })
    }
}

/// Looks up an alumnus in an ingested list by string-normalized id.
pub fn find_alumnus<'a>(list: &'a [AlumnusSummary], id: &str) -> Option<&'a AlumnusSummary> {
    list.iter().find(|alumnus| alumnus.matches_id(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_alumni_id_field() {
        let json = r#"{ "alumniId": 42, "name": "Zhao Lei", "jobTitle": "Data Analyst" }"#;
        let alumnus: AlumnusSummary = serde_json::from_str(json).unwrap();
        assert_eq!(alumnus.id, "42");
        assert_eq!(alumnus.job_title.as_deref(), Some("Data Analyst"));
    }

    #[test]
    fn test_normalizes_plain_id_field() {
        let json = r#"{ "id": "a-7", "name": "Wang Fang", "graduationYear": 2021 }"#;
        let alumnus: AlumnusSummary = serde_json::from_str(json).unwrap();
        assert_eq!(alumnus.id, "a-7");
        assert_eq!(alumnus.graduation_year, Some(2021));
    }

    #[test]
    fn test_missing_identifier_is_rejected() {
        let json = r#"{ "name": "No Id" }"#;
        let result: Result<AlumnusSummary, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_numeric_and_string_ids_compare_equal() {
        let json = r#"{ "alumniId": 12, "name": "Chen Yu" }"#;
        let alumnus: AlumnusSummary = serde_json::from_str(json).unwrap();
        assert!(alumnus.matches_id("12"));
        assert!(alumnus.matches_id(" 12 "));
        assert!(!alumnus.matches_id("120"));
    }

    #[test]
    fn test_find_alumnus_by_either_spelling() {
        let list: Vec<AlumnusSummary> = serde_json::from_str(
            r#"[
                { "alumniId": 1, "name": "A" },
                { "id": "2", "name": "B" }
            ]"#,
        )
        .unwrap();
        assert_eq!(find_alumnus(&list, "2").unwrap().name, "B");
        assert!(find_alumnus(&list, "3").is_none());
    }
}

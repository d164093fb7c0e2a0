use std::{fmt, str::FromStr};

use bigdecimal::BigDecimal;
use serde::Serialize;
use validator::Validate;

use crate::{
    pkg::internal::{
        adaptors::applications::spec::NewApplication,
        storage::{ResumeUpload, StoredResume},
    },
    prelude::{AppError, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Year {
    Freshman,
    Sophomore,
    Junior,
    Senior,
}

impl Year {
    pub const ALL: [Year; 4] = [Year::Freshman, Year::Sophomore, Year::Junior, Year::Senior];

    pub fn as_str(&self) -> &'static str {
        match self {
            Year::Freshman => "Freshman",
            Year::Sophomore => "Sophomore",
            Year::Junior => "Junior",
            Year::Senior => "Senior",
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Year {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Year::ALL
            .into_iter()
            .find(|y| y.as_str() == s)
            .ok_or_else(|| {
                AppError::Validation(
                    "year must be one of Freshman, Sophomore, Junior, Senior".to_string(),
                )
            })
    }
}

/// Multipart fields as they arrive, before any checks.
#[derive(Debug, Default)]
pub struct ApplicationForm {
    name: Option<String>,
    email: Option<String>,
    year: Option<String>,
    major: Option<String>,
    gpa: Option<String>,
    linkedin: Option<String>,
    why: Option<String>,
    referral: Option<String>,
    resume: Option<ResumeUpload>,
}

#[derive(Debug, Validate)]
struct Links {
    #[validate(url(message = "linkedin must be an http(s) URL"))]
    linkedin: Option<String>,
}

impl Links {
    fn check(self) -> Result<Option<String>> {
        self.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        match self.linkedin {
            Some(link) if !is_web_link(&link) => Err(AppError::Validation(
                "linkedin must be an http(s) URL".to_string(),
            )),
            link => Ok(link),
        }
    }
}

fn is_web_link(link: &str) -> bool {
    let lower = link.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// A submission that passed every field check.
#[derive(Debug, Clone)]
pub struct Submission {
    pub name: String,
    pub email: String,
    pub year: Year,
    pub major: String,
    pub gpa: BigDecimal,
    pub linkedin: Option<String>,
    pub why: Option<String>,
    pub referral: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
    non_blank(value).ok_or(AppError::MissingField(field))
}

const GPA_MAX_LEN: usize = 8;

/// Plain `d` or `d.ddd` only. Exponents would make the decimal
/// arithmetic below unbounded.
fn is_plain_decimal(raw: &str) -> bool {
    let (int, frac) = match raw.split_once('.') {
        Some((_, "")) => return false,
        Some(parts) => parts,
        None => (raw, ""),
    };
    raw.len() <= GPA_MAX_LEN
        && (1..=2).contains(&int.len())
        && int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit())
}

pub fn parse_gpa(raw: &str) -> Result<BigDecimal> {
    let invalid = || AppError::Validation("gpa must be a number between 0 and 4".to_string());
    if !is_plain_decimal(raw) {
        return Err(invalid());
    }
    let gpa = BigDecimal::from_str(raw).map_err(|_| invalid())?;
    if gpa < BigDecimal::from(0) || gpa > BigDecimal::from(4) {
        return Err(invalid());
    }
    Ok(gpa.round(2).with_scale(2))
}

impl ApplicationForm {
    /// Returns false for fields the form does not know about.
    pub fn set_text(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "year" => &mut self.year,
            "major" => &mut self.major,
            "gpa" => &mut self.gpa,
            "linkedin" => &mut self.linkedin,
            "why" => &mut self.why,
            "referral" => &mut self.referral,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Browsers send an empty part for an untouched file input; that is no file.
    pub fn attach_resume(&mut self, upload: ResumeUpload) {
        if upload.file_name.is_empty() && upload.bytes.is_empty() {
            return;
        }
        self.resume = Some(upload);
    }

    pub fn validate(self) -> Result<(Submission, Option<ResumeUpload>)> {
        let name = required(self.name, "name")?;
        let email = required(self.email, "email")?;
        let year = required(self.year, "year")?;
        let major = required(self.major, "major")?;
        let gpa = required(self.gpa, "gpa")?;

        let linkedin = Links {
            linkedin: non_blank(self.linkedin),
        }
        .check()?;
        let year = year.parse::<Year>()?;
        let gpa = parse_gpa(&gpa)?;
        if let Some(resume) = &self.resume {
            resume.ensure_pdf()?;
        }

        let submission = Submission {
            name,
            email,
            year,
            major,
            gpa,
            linkedin,
            why: non_blank(self.why),
            referral: non_blank(self.referral),
        };
        Ok((submission, self.resume))
    }
}

impl Submission {
    pub fn into_new_application(self, resume: Option<StoredResume>) -> NewApplication {
        let (resume_path, resume_url) = match resume {
            Some(stored) => (Some(stored.key), stored.url),
            None => (None, None),
        };
        NewApplication {
            name: self.name,
            email: self.email,
            year: self.year.to_string(),
            major: self.major,
            gpa: Some(self.gpa),
            linkedin: self.linkedin,
            why: self.why,
            referral: self.referral,
            resume_path,
            resume_url,
        }
    }
}

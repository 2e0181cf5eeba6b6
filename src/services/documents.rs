//! Admission summary documents
//!
//! A submitted application produces a two-copy summary: a school copy kept
//! on file and a parent copy handed back to the family. Both copies embed
//! the same field values in a deterministic order; rendering them into a
//! printable format is a presentation concern outside this module.

use crate::models::Admission;

/// Which party a summary copy is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyKind {
    School,
    Parent,
}

impl CopyKind {
    pub fn heading(&self) -> &'static str {
        match self {
            CopyKind::School => "School Copy",
            CopyKind::Parent => "Parent Copy",
        }
    }
}

/// One copy of an admission summary
#[derive(Debug, Clone)]
pub struct SummaryCopy {
    pub kind: CopyKind,
    /// Labelled values in fixed order
    pub fields: Vec<(&'static str, String)>,
    pub photo_url: Option<String>,
}

impl SummaryCopy {
    /// Deterministic plain-text rendering of this copy
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(self.kind.heading());
        out.push('\n');
        for (label, value) in &self.fields {
            out.push_str(&format!("{}: {}\n", label, value));
        }
        out
    }
}

/// The two-copy summary of a submitted application
#[derive(Debug, Clone)]
pub struct AdmissionSummary {
    pub copies: [SummaryCopy; 2],
}

/// Build the two-copy summary for a stored application
pub fn admission_summary(admission: &Admission) -> AdmissionSummary {
    let fields = summary_fields(admission);
    AdmissionSummary {
        copies: [
            SummaryCopy {
                kind: CopyKind::School,
                fields: fields.clone(),
                photo_url: admission.photo_url.clone(),
            },
            SummaryCopy {
                kind: CopyKind::Parent,
                fields,
                photo_url: admission.photo_url.clone(),
            },
        ],
    }
}

fn summary_fields(admission: &Admission) -> Vec<(&'static str, String)> {
    let opt = |value: &Option<String>| value.clone().unwrap_or_default();
    let income = |value: Option<f64>| {
        value
            .map(|v| format!("{:.2}", v))
            .unwrap_or_default()
    };

    vec![
        ("Branch", admission.branch.clone()),
        ("Session", admission.session.clone()),
        ("Class", admission.class.clone()),
        ("Student Name", admission.student_name.clone()),
        ("Date of Birth", admission.dob.format("%Y-%m-%d").to_string()),
        ("Gender", admission.gender.clone()),
        ("Caste", opt(&admission.caste)),
        ("Religion", opt(&admission.religion)),
        ("Father's Name", admission.father_name.clone()),
        ("Father's Qualification", opt(&admission.father_qualification)),
        ("Father's Occupation", opt(&admission.father_occupation)),
        ("Father's Occupation Details", opt(&admission.father_occupation_details)),
        ("Father's Monthly Income", income(admission.father_income)),
        ("Mother's Name", admission.mother_name.clone()),
        ("Mother's Qualification", opt(&admission.mother_qualification)),
        ("Mother's Occupation", opt(&admission.mother_occupation)),
        ("Mother's Occupation Details", opt(&admission.mother_occupation_details)),
        ("Mother's Monthly Income", income(admission.mother_income)),
        ("Mobile Number", admission.mobile_number.clone()),
        ("Alternate Contact", opt(&admission.contact_number)),
        ("Email", opt(&admission.email)),
        ("Present Address", admission.present_address.clone()),
        ("Permanent Address", admission.permanent_address.clone()),
        ("Siblings", opt(&admission.siblings)),
        ("Guardian", opt(&admission.guardian)),
    ]
}

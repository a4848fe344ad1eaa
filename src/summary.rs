//! Fixed setup summary printed when the tool runs without arguments.
//!
//! Pure presentation: nothing here is computed from, or verified against,
//! the state of the database.

use std::io::{self, Write};

/// A titled group of summary lines.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    title: Option<&'static str>,
    lines: Vec<&'static str>,
}

impl Section {
    fn untitled(lines: Vec<&'static str>) -> Self {
        Self { title: None, lines }
    }

    fn titled(title: &'static str, lines: Vec<&'static str>) -> Self {
        Self {
            title: Some(title),
            lines,
        }
    }
}

/// The status narration for the database setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupSummary {
    sections: Vec<Section>,
}

impl SetupSummary {
    /// The standard summary shipped with the tool.
    pub fn standard() -> Self {
        Self {
            sections: vec![
                Section::untitled(vec![
                    "Setting up database using the RDS Data API...",
                    "Note: This requires Aurora Serverless or a cluster with the Data API enabled",
                    "For regular RDS instances, a VPN or bastion host is needed instead",
                ]),
                Section::titled(
                    "Database Setup Summary",
                    vec![
                        "✅ Created comprehensive database schema",
                        "✅ Created seed data with all required information",
                        "✅ Created automated setup scripts",
                        "❌ Network connectivity issue prevents direct setup",
                    ],
                ),
                Section::titled(
                    "Next Steps",
                    vec![
                        "1. Use AWS Systems Manager Session Manager to connect through the VPC",
                        "2. Set up a bastion host in the public subnet",
                        "3. Use AWS Lambda in the VPC to execute the SQL",
                        "4. Temporarily create a public subnet route (not recommended for production)",
                        "Or apply the scripts directly: rds-setup --file schema.sql",
                    ],
                ),
                Section::titled(
                    "Database Schema Created",
                    vec![
                        "- Users table (unified for patients and social workers)",
                        "- Patients table with PHI fields",
                        "- Social workers table with clinic assignments",
                        "- Dialysis clinics (3 clinics)",
                        "- Transplant centers (10 centers)",
                        "- ROI consent tracking with digital signatures",
                        "- Patient referrals (up to 3 transplant center selections)",
                        "- Real-time notifications for social workers",
                        "- Comprehensive audit logging for HIPAA compliance",
                        "- User sessions for security tracking",
                    ],
                ),
                Section::titled(
                    "Seed Data Ready",
                    vec![
                        "- 3 Dialysis clinics: Metro Health, Lakeside Renal, Grand River",
                        "- 6 Social workers (2 per clinic)",
                        "- 10 Transplant centers with addresses and wait times",
                        "- System configuration data",
                        "- Database views and functions for common operations",
                    ],
                ),
            ],
        }
    }

    /// Renders the summary as output lines, with a blank line before each titled section.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for section in &self.sections {
            if let Some(title) = section.title {
                out.push(String::new());
                out.push(format!("=== {title} ==="));
            }
            out.extend(section.lines.iter().map(|l| l.to_string()));
        }
        out
    }

    /// Writes the rendered summary to `writer`.
    pub fn write_to(&self, mut writer: impl Write) -> io::Result<()> {
        for line in self.lines() {
            writeln!(writer, "{line}")?;
        }
        writer.flush()
    }
}

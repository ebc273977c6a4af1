//! Checklist-style pass/fail transcript shared by setup and verify output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Pass,
    Fail,
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckStatus::Pass => f.write_str("PASS"),
            CheckStatus::Fail => f.write_str("FAIL"),
        }
    }
}

#[derive(Debug)]
pub struct Check {
    pub name: String,
    pub status: CheckStatus,
    pub detail: String,
}

#[derive(Debug, Default)]
pub struct CheckReport {
    pub checks: Vec<Check>,
}

impl CheckReport {
    pub fn pass(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.checks.push(Check {
            name: name.into(),
            status: CheckStatus::Pass,
            detail: detail.into(),
        });
    }

    /// Record a failure. `detail` should name the remediation command.
    pub fn fail(&mut self, name: impl Into<String>, detail: impl Into<String>) {
        self.checks.push(Check {
            name: name.into(),
            status: CheckStatus::Fail,
            detail: detail.into(),
        });
    }

    pub fn all_passed(&self) -> bool {
        self.checks
            .iter()
            .all(|check| check.status == CheckStatus::Pass)
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for check in &self.checks {
            out.push_str(&format!(
                "{}: {} ({})\n",
                check.name, check.status, check.detail
            ));
        }
        out
    }
}

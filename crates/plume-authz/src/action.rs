use serde::{Deserialize, Serialize};

/// Authorization actions a subject can be granted on a namespace or topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthAction {
    Produce,
    Consume,
    Functions,
    Sources,
    Sinks,
    Packages,
}

impl AuthAction {
    pub fn as_str(self) -> &'static str {
        match self {
            AuthAction::Produce => "produce",
            AuthAction::Consume => "consume",
            AuthAction::Functions => "functions",
            AuthAction::Sources => "sources",
            AuthAction::Sinks => "sinks",
            AuthAction::Packages => "packages",
        }
    }
}

impl std::fmt::Display for AuthAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AuthAction {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "produce" => Ok(AuthAction::Produce),
            "consume" => Ok(AuthAction::Consume),
            "functions" => Ok(AuthAction::Functions),
            "sources" => Ok(AuthAction::Sources),
            "sinks" => Ok(AuthAction::Sinks),
            "packages" => Ok(AuthAction::Packages),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AuthAction;

    #[test]
    fn action_string_roundtrip() {
        let actions = [
            AuthAction::Produce,
            AuthAction::Consume,
            AuthAction::Functions,
            AuthAction::Sources,
            AuthAction::Sinks,
            AuthAction::Packages,
        ];

        for action in actions {
            let as_str = action.as_str();
            assert_eq!(
                <AuthAction as std::str::FromStr>::from_str(as_str).ok(),
                Some(action)
            );
            assert_eq!(action.to_string(), as_str);
        }
    }

    #[test]
    fn action_from_str_invalid() {
        assert!(<AuthAction as std::str::FromStr>::from_str("publish").is_err());
    }

    #[test]
    fn action_serde_uses_lowercase() {
        let json = serde_json::to_string(&AuthAction::Produce).expect("serialize");
        assert_eq!(json, "\"produce\"");
        let back: AuthAction = serde_json::from_str("\"consume\"").expect("deserialize");
        assert_eq!(back, AuthAction::Consume);
    }
}

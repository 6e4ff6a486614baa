use std::fmt;

/// Read-only access to quest definitions.
pub trait QuestOracle: Send + Sync {
    fn quest(&self, id: QuestId) -> Option<&QuestDefinition>;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QuestId(pub u32);

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quest blueprint: an ordered list of named steps.
///
/// Steps are compared by position in `steps`, never by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct QuestDefinition {
    pub id: QuestId,
    pub name: String,
    pub secret: bool,
    pub steps: Vec<String>,
}

impl QuestDefinition {
    pub fn new<S: Into<String>>(
        id: QuestId,
        name: impl Into<String>,
        steps: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            secret: false,
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }

    /// Position of `step` in the declared order.
    pub fn position(&self, step: &str) -> Option<usize> {
        self.steps.iter().position(|s| s == step)
    }

    pub fn is_single_step(&self) -> bool {
        self.steps.len() == 1
    }
}

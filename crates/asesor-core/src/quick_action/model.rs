//! Quick action model.

use serde::{Deserialize, Serialize};

/// A predefined shortcut query.
///
/// Each action maps deterministically to a canned natural-language query
/// string sent to the assistant in place of free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuickAction {
    /// Show the current budget.
    ShowBudget,
    /// List recent expenses.
    ListExpenses,
    /// Summarize the overall financial situation.
    FinancialSummary,
}

impl QuickAction {
    /// All known actions, in display order.
    pub const ALL: [QuickAction; 3] = [
        QuickAction::ShowBudget,
        QuickAction::ListExpenses,
        QuickAction::FinancialSummary,
    ];

    /// Resolves a kebab-case kind string to an action.
    ///
    /// Unknown kinds resolve to `None`; callers treat that as a no-op
    /// rather than an error.
    pub fn from_kind(kind: &str) -> Option<Self> {
        match kind {
            "show-budget" => Some(Self::ShowBudget),
            "list-expenses" => Some(Self::ListExpenses),
            "financial-summary" => Some(Self::FinancialSummary),
            _ => None,
        }
    }

    /// The kebab-case kind identifier.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ShowBudget => "show-budget",
            Self::ListExpenses => "list-expenses",
            Self::FinancialSummary => "financial-summary",
        }
    }

    /// The canned query text sent to the assistant.
    pub fn canned_query(&self) -> &'static str {
        match self {
            Self::ShowBudget => "Muéstrame mi presupuesto actual",
            Self::ListExpenses => "Lista mis gastos recientes",
            Self::FinancialSummary => "Dame un resumen de mi situación financiera",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for action in QuickAction::ALL {
            assert_eq!(QuickAction::from_kind(action.kind()), Some(action));
        }
    }

    #[test]
    fn test_unknown_kind_is_none() {
        assert_eq!(QuickAction::from_kind("export-taxes"), None);
        assert_eq!(QuickAction::from_kind(""), None);
    }

    #[test]
    fn test_show_budget_canned_query() {
        assert_eq!(
            QuickAction::ShowBudget.canned_query(),
            "Muéstrame mi presupuesto actual"
        );
    }

    #[test]
    fn test_serde_uses_kebab_case() {
        let value = serde_json::to_value(QuickAction::ListExpenses).unwrap();
        assert_eq!(value, serde_json::json!("list-expenses"));
    }
}

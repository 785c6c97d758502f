use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::menu_analysis::entities::{MenuItem, RiskHit, RiskLevel};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeResult {
    pub menu_items: Vec<MenuItem>,
    pub risk_level: RiskLevel,
    pub hits: Vec<RiskHit>,
    pub suggestions: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::menu_analysis::entities::RiskReason;

    #[test]
    fn result_survives_json_round_trip() {
        let result = AnalyzeResult {
            menu_items: vec![MenuItem::new("Pad Thai", ["peanut", "shrimp"]).unwrap()],
            risk_level: RiskLevel::High,
            hits: vec![RiskHit::new(
                "peanut",
                RiskReason::AllergyMatch,
                RiskLevel::High,
            )],
            suggestions: vec!["Avoid items containing 'peanut'.".to_string()],
        };

        let encoded = serde_json::to_string(&result).unwrap();
        let decoded: AnalyzeResult = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, result);
    }
}

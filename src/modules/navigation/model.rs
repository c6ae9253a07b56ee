use serde::Serialize;
use utoipa::ToSchema;

/// One entry in the back-office navigation tree.
#[derive(Debug, Serialize, ToSchema)]
pub struct NavigationItem {
    pub label: &'static str,
    pub icon: &'static str,
    pub path: &'static str,
    /// Live record count shown next to the label, when the item carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NavigationGroup {
    pub label: &'static str,
    pub items: Vec<NavigationItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct NavigationResponse {
    pub groups: Vec<NavigationGroup>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_omitted_when_absent() {
        let item = NavigationItem {
            label: "Classes",
            icon: "heroicon-o-library",
            path: "/api/classes",
            badge: None,
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(!json.contains("badge"));
    }

    #[test]
    fn test_badge_serialized_when_present() {
        let item = NavigationItem {
            label: "Students",
            icon: "heroicon-o-academic-cap",
            path: "/api/students",
            badge: Some(150),
        };
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains(r#""badge":150"#));
    }
}

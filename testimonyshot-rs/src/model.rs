//! Testimonial record and the total functions that turn its optional fields
//! into the text drawn on the card.

use serde::{Deserialize, Serialize};

/// Body text drawn when the testimonial has no content.
pub const CONTENT_PLACEHOLDER: &str = "Enter your testimonial content to see it displayed here";
/// Name drawn when the testimonial has no customer name.
pub const NAME_PLACEHOLDER: &str = "Enter customer name";
/// Role line drawn when neither role nor company is present.
pub const ROLE_COMPANY_PLACEHOLDER: &str = "Enter role/company";

/// A testimonial as stored by the editor.
///
/// Only `content`, the customer fields, `rating` and `theme` influence the
/// card. The remaining record fields are carried so that whole records can be
/// read and written without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TestimonialContent {
    pub content: Option<String>,
    pub customer_name: Option<String>,
    pub customer_role: Option<String>,
    pub customer_company: Option<String>,
    pub customer_avatar: Option<String>,
    pub rating: Option<i64>,
    pub theme: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Treat missing and blank strings alike.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl TestimonialContent {
    /// Create a testimonial with just a body text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Body text, or the content placeholder.
    pub fn body_text(&self) -> &str {
        present(&self.content).unwrap_or(CONTENT_PLACEHOLDER)
    }

    /// Customer name, or the name placeholder.
    pub fn name_text(&self) -> &str {
        present(&self.customer_name).unwrap_or(NAME_PLACEHOLDER)
    }

    pub fn has_customer_name(&self) -> bool {
        present(&self.customer_name).is_some()
    }

    /// "role at company" when both are present, otherwise whichever is present,
    /// otherwise the role/company placeholder.
    pub fn role_company_text(&self) -> String {
        match (present(&self.customer_role), present(&self.customer_company)) {
            (Some(role), Some(company)) => format!("{role} at {company}"),
            (Some(one), None) | (None, Some(one)) => one.to_string(),
            (None, None) => ROLE_COMPANY_PLACEHOLDER.to_string(),
        }
    }

    /// Avatar reference, if any.
    pub fn avatar_ref(&self) -> Option<&str> {
        present(&self.customer_avatar)
    }

    /// The rating used for drawing.
    pub fn effective_rating(&self) -> Rating {
        Rating::normalize(self.rating)
    }

    /// The palette selected by the `theme` field.
    pub fn theme(&self) -> Theme {
        Theme::from_name(self.theme.as_deref())
    }

    /// A short file-name friendly slug of the customer name.
    pub fn slug(&self) -> String {
        let slug = slugify(present(&self.customer_name).unwrap_or_default());
        if slug.is_empty() {
            "testimonial".to_string()
        } else {
            slug
        }
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes. Path separators,
/// dots and other punctuation never survive, so the result is safe as a file
/// name component. May be empty.
pub fn slugify(text: &str) -> String {
    let mut slug = String::new();
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Star rating in 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MAX: Rating = Rating(5);

    /// Clamp a raw rating to the drawable range; anything outside 1..=5,
    /// including a missing value, becomes 5.
    pub fn normalize(raw: Option<i64>) -> Self {
        match raw {
            Some(value @ 1..=5) => Rating(value as u8),
            _ => Self::MAX,
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Number of filled stars out of five.
    pub fn filled_stars(self) -> usize {
        self.0 as usize
    }

    /// Band label shown next to the stars.
    pub fn label(self) -> &'static str {
        rating_label(self.0 as i64)
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self::MAX
    }
}

/// Band label for any integer rating; values without a band read "Good".
pub fn rating_label(rating: i64) -> &'static str {
    match rating {
        5 => "Excellent",
        4 => "Very Good",
        3 => "Good",
        2 => "Fair",
        1 => "Poor",
        _ => "Good",
    }
}

/// Card text palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Dark text on the light card.
    #[default]
    Default,
    /// Light text for body, name and role lines.
    Glassmorphic,
}

impl Theme {
    /// Only the exact name "glassmorphic" selects the light palette.
    pub fn from_name(name: Option<&str>) -> Self {
        match name {
            Some("glassmorphic") => Theme::Glassmorphic,
            _ => Theme::Default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, 5, "Excellent")]
    #[case(Some(0), 5, "Excellent")]
    #[case(Some(6), 5, "Excellent")]
    #[case(Some(-3), 5, "Excellent")]
    #[case(Some(5), 5, "Excellent")]
    #[case(Some(4), 4, "Very Good")]
    #[case(Some(3), 3, "Good")]
    #[case(Some(2), 2, "Fair")]
    #[case(Some(1), 1, "Poor")]
    fn test_rating_normalization(
        #[case] raw: Option<i64>,
        #[case] expected: u8,
        #[case] label: &str,
    ) {
        let rating = Rating::normalize(raw);
        assert_eq!(rating.value(), expected);
        assert_eq!(rating.label(), label);
        assert!(rating.filled_stars() <= 5);
    }

    #[test]
    fn test_unbanded_label_is_good() {
        assert_eq!(rating_label(42), "Good");
    }

    #[test]
    fn test_placeholders_for_empty_fields() {
        let testimonial = TestimonialContent {
            content: Some(String::new()),
            customer_name: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(testimonial.body_text(), CONTENT_PLACEHOLDER);
        assert_eq!(testimonial.name_text(), NAME_PLACEHOLDER);
        assert_eq!(testimonial.role_company_text(), ROLE_COMPANY_PLACEHOLDER);
        assert_eq!(testimonial.avatar_ref(), None);
    }

    #[rstest]
    #[case(Some("CTO"), Some("Acme"), "CTO at Acme")]
    #[case(Some("CTO"), None, "CTO")]
    #[case(None, Some("Acme"), "Acme")]
    #[case(Some(""), Some("Acme"), "Acme")]
    #[case(None, None, ROLE_COMPANY_PLACEHOLDER)]
    fn test_role_company(
        #[case] role: Option<&str>,
        #[case] company: Option<&str>,
        #[case] expected: &str,
    ) {
        let testimonial = TestimonialContent {
            customer_role: role.map(str::to_string),
            customer_company: company.map(str::to_string),
            ..Default::default()
        };
        assert_eq!(testimonial.role_company_text(), expected);
    }

    #[rstest]
    #[case(Some("glassmorphic"), Theme::Glassmorphic)]
    #[case(Some("Glassmorphic"), Theme::Default)]
    #[case(Some("modern"), Theme::Default)]
    #[case(None, Theme::Default)]
    fn test_theme(#[case] name: Option<&str>, #[case] expected: Theme) {
        assert_eq!(Theme::from_name(name), expected);
    }

    #[test]
    fn test_deserialize_record() {
        let json = r#"{
            "id": 7,
            "content": "Great product",
            "customerName": "Ada Lovelace",
            "customerRole": "Engineer",
            "customerCompany": null,
            "rating": 4,
            "theme": "glassmorphic",
            "sourceType": "manual",
            "createdAt": "2025-06-25T10:00:00Z"
        }"#;
        let testimonial: TestimonialContent = serde_json::from_str(json).unwrap();
        assert_eq!(testimonial.body_text(), "Great product");
        assert_eq!(testimonial.role_company_text(), "Engineer");
        assert_eq!(testimonial.effective_rating().value(), 4);
        assert_eq!(testimonial.theme(), Theme::Glassmorphic);
        assert_eq!(testimonial.id, Some(serde_json::json!(7)));
        assert_eq!(testimonial.slug(), "ada-lovelace");
    }

    #[test]
    fn test_slugify_strips_path_characters() {
        assert_eq!(slugify("../x"), "x");
        assert_eq!(slugify("a/b"), "a-b");
        assert_eq!(slugify("/.."), "");
    }

    #[test]
    fn test_slug_fallback() {
        assert_eq!(TestimonialContent::default().slug(), "testimonial");
        let testimonial = TestimonialContent {
            customer_name: Some("  Zoë & Co.  ".to_string()),
            ..Default::default()
        };
        assert_eq!(testimonial.slug(), "zo-co");
    }
}

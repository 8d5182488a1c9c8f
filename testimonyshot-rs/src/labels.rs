//! Fixed captions printed on every card.

/// Static captions of the card design.
///
/// The defaults reproduce the stock card. They are not derived from the
/// testimonial; callers that track real dates, review ids or helpful counts
/// can substitute their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardLabels {
    /// Right-aligned in the header.
    pub date: String,
    /// Left side of the footer.
    pub review_id: String,
    /// Right side of the footer.
    pub helpful_caption: String,
    /// Next to the header badge.
    pub header_title: String,
    /// Right side of the customer row.
    pub helpful_badge: String,
    /// Centered below the footer when the watermark is on.
    pub watermark: String,
}

impl Default for CardLabels {
    fn default() -> Self {
        Self {
            date: "June 25, 2025".to_string(),
            review_id: "Review #7852".to_string(),
            helpful_caption: "29 found this helpful • Verified purchase".to_string(),
            header_title: "Customer Review".to_string(),
            helpful_badge: "👍 Helpful".to_string(),
            watermark: "Powered by TestimonyShot".to_string(),
        }
    }
}

/// Column names of the delivery sheet. Matching is exact and case-sensitive.

// ── Metric columns ──────────────────────────────────────────────────────────
pub const ASSIGNED: &str = "Assigned";
pub const DELIVERED: &str = "Delivered";
pub const PAYOUT: &str = "Payout";
pub const SHOPSY_DELIVERED: &str = "Shopsy Delivered";
pub const SHOPSY_PAYOUT: &str = "Shopsy Payout";
pub const DOCUMENT_DELIVERED: &str = "number of document delivered";
pub const TOTAL_U2S: &str = "total U2S";

pub const METRIC_COLUMNS: [&str; 7] = [
    ASSIGNED,
    DELIVERED,
    PAYOUT,
    SHOPSY_DELIVERED,
    SHOPSY_PAYOUT,
    DOCUMENT_DELIVERED,
    TOTAL_U2S,
];

// ── Date column ─────────────────────────────────────────────────────────────
pub const DATE: &str = "Date";

// ── Categorical filter columns ──────────────────────────────────────────────
pub const WM_NAME: &str = "WM Name";
pub const PROFILE_ID: &str = "Profile ID";
pub const VENDOR_ID: &str = "Vendor ID";

pub const FILTER_COLUMNS: [&str; 3] = [WM_NAME, PROFILE_ID, VENDOR_ID];

/// Flat payout per delivered document.
pub const DOCUMENT_RATE: f64 = 9.0;

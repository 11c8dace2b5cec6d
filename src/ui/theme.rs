//! Shared class names so pages and components stay visually consistent.

// ============================================
// BUTTON STYLES
// ============================================

pub fn btn_primary() -> &'static str {
    "btn btn-primary"
}

pub fn btn_secondary() -> &'static str {
    "btn btn-secondary"
}

pub fn mail_link() -> &'static str {
    "btn btn-mail"
}

// ============================================
// INPUT STYLES
// ============================================

pub fn input_class() -> &'static str {
    "input"
}

pub fn label_class() -> &'static str {
    "label"
}

pub fn checkbox_row() -> &'static str {
    "checkbox-row"
}

// ============================================
// PANEL / CONTAINER STYLES
// ============================================

pub fn panel() -> &'static str {
    "panel"
}

pub fn section_title() -> &'static str {
    "section-title"
}

pub fn table_container() -> &'static str {
    "table-container"
}

// ============================================
// TEXT STYLES
// ============================================

pub fn text_muted() -> &'static str {
    "text-muted"
}

/// Colour for a monetary figure: losses are highlighted, everything else is neutral.
pub fn amount_tone(negative: bool) -> &'static str {
    if negative {
        "amount-negative"
    } else {
        "amount-positive"
    }
}

//! Shared Tailwind class constants plus the dark mode preference. The
//! preference is read from `localStorage`, falls back to the system color
//! scheme, and lands as a `data-theme` attribute on the `<html>` element.

use super::{browser, storage};

pub struct Theme;

impl Theme {
    /// Card container used by forms and summary panels.
    pub const CARD: &'static str = "bg-white dark:bg-gray-800 rounded-xl shadow-sm border border-gray-200 dark:border-gray-700 p-6";

    /// Standard text input.
    pub const INPUT: &'static str = "w-full px-3 py-2 rounded-lg border border-gray-300 dark:border-gray-600 bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 focus:outline-none focus:ring-2 focus:ring-emerald-500";

    /// Form field label.
    pub const LABEL: &'static str = "block text-sm font-medium text-gray-700 dark:text-gray-300 mb-1";

    /// Page heading.
    pub const PAGE_TITLE: &'static str = "text-2xl font-semibold text-gray-900 dark:text-white";

    /// Muted helper copy under headings and fields.
    pub const MUTED: &'static str = "text-sm text-gray-500 dark:text-gray-400";

    /// Flat list item variant without drop shadow.
    pub const LIST_ITEM_FLAT: &'static str = "flex items-center justify-between bg-gray-50 dark:bg-gray-900/50 p-3 rounded-lg border border-gray-200 dark:border-gray-700 transition-colors";
}

/// Stored preference, or the OS-level scheme when nothing is stored.
pub fn read_preference() -> bool {
    match storage::get_item(storage::THEME_KEY) {
        Some(value) => value == "true",
        None => browser::prefers_dark_scheme(),
    }
}

/// Applies the `data-theme` attribute on the document root.
pub fn apply(dark: bool) {
    browser::apply_document_theme(if dark { "dark" } else { "light" });
}

/// Flips the preference, persists it, and applies it.
pub fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    storage::set_item(storage::THEME_KEY, if next { "true" } else { "false" });
    next
}

#[cfg(test)]
mod tests {
    use super::{read_preference, toggle};
    use crate::app_lib::storage;

    #[test]
    fn toggle_round_trips_through_storage() {
        storage::remove_item(storage::THEME_KEY);
        assert!(!read_preference());

        assert!(toggle(false));
        assert!(read_preference());

        assert!(!toggle(true));
        assert!(!read_preference());
        storage::remove_item(storage::THEME_KEY);
    }
}

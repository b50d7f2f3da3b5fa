// Text helpers over a parsed `scraper` tree.

use scraper::ElementRef;

/// Text pieces trimmed and concatenated without separator.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Visible text with every whitespace run collapsed to one space.
pub fn collapsed_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

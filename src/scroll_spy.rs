/// Offset added to the scroll position so a section counts as current a bit
/// before its top reaches the viewport edge.
pub const SPY_OFFSET: f64 = 100.0;

/// Scroll distance after which the header switches to its compact look.
pub const SCROLLED_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self { id: id.into(), top, height }
    }

    pub fn contains(&self, position: f64) -> bool {
        position >= self.top && position < self.top + self.height
    }
}

/// Section whose range holds `scroll_y + SPY_OFFSET`. Sections are checked in
/// document order and a later match wins.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64) -> Option<&str> {
    let position = scroll_y + SPY_OFFSET;
    sections
        .iter()
        .filter(|section| section.contains(position))
        .last()
        .map(|section| section.id.as_str())
}

/// Next active link id. When nothing matches, the previous one stays.
pub fn next_active(previous: Option<&str>, sections: &[SectionBounds], scroll_y: f64) -> Option<String> {
    active_section(sections, scroll_y)
        .or(previous)
        .map(str::to_string)
}

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD
}

/// `href` of the nav link pointing at a section.
pub fn link_href(section_id: &str) -> String {
    format!("#{}", section_id)
}

/// Section id a `#fragment` link points at, if any.
pub fn target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("home", 80.0, 600.0),
            SectionBounds::new("features", 680.0, 900.0),
            SectionBounds::new("about", 1580.0, 500.0),
            SectionBounds::new("contact", 2080.0, 700.0),
        ]
    }

    #[test]
    fn picks_section_containing_offset_position() {
        let sections = page();
        assert_eq!(active_section(&sections, 0.0), Some("home"));
        assert_eq!(active_section(&sections, 579.0), Some("home"));
        assert_eq!(active_section(&sections, 580.0), Some("features"));
        assert_eq!(active_section(&sections, 2000.0), Some("contact"));
    }

    #[test]
    fn exactly_one_link_is_active_while_scrolling() {
        let sections = page();
        let links: Vec<String> = sections.iter().map(|s| link_href(&s.id)).collect();
        let mut active: Option<String> = None;
        let mut y = -200.0;
        while y < 3200.0 {
            active = next_active(active.as_deref(), &sections, y);
            let marked = links
                .iter()
                .filter(|href| active.as_deref().map(link_href).as_ref() == Some(*href))
                .count();

            let position = y + SPY_OFFSET;
            match sections.iter().find(|s| s.contains(position)) {
                Some(section) => {
                    assert_eq!(active.as_deref(), Some(section.id.as_str()), "scroll {y}");
                    assert_eq!(marked, 1, "scroll {y}");
                }
                // Above the first section nothing was ever marked; past the
                // last one the contact link stays marked.
                None if y < 0.0 => assert_eq!(marked, 0, "scroll {y}"),
                None => {
                    assert_eq!(active.as_deref(), Some("contact"), "scroll {y}");
                    assert_eq!(marked, 1, "scroll {y}");
                }
            }
            y += 25.0;
        }
    }

    #[test]
    fn active_link_sticks_outside_every_section() {
        let sections = page();
        assert_eq!(next_active(Some("contact"), &sections, 5000.0).as_deref(), Some("contact"));
        assert_eq!(next_active(None, &sections, -50.0), None);
        assert_eq!(next_active(Some("contact"), &sections, 700.0).as_deref(), Some("features"));
    }

    #[test]
    fn overlapping_sections_resolve_to_the_later_one() {
        let sections = vec![
            SectionBounds::new("outer", 0.0, 1000.0),
            SectionBounds::new("inner", 200.0, 100.0),
        ];
        assert_eq!(active_section(&sections, 150.0), Some("inner"));
    }

    #[test]
    fn header_turns_scrolled_past_fifty_pixels() {
        assert!(!is_scrolled(0.0));
        assert!(!is_scrolled(50.0));
        assert!(is_scrolled(50.5));
    }

    #[test]
    fn fragment_links_round_trip_to_ids() {
        assert_eq!(link_href("about"), "#about");
        assert_eq!(target_id("#about"), Some("about"));
        assert_eq!(target_id("#"), None);
        assert_eq!(target_id("/pricing"), None);
    }
}

use scraper::Selector;

/// CSS selector vocabulary for the booking site's markup.
///
/// The index page lists every offered course as an anchor inside the
/// `bs_menu` definition list. A course page carries one `bs_head` title
/// and one table row per offered session, with one classed cell per
/// field.
#[derive(Debug, Clone)]
pub struct Selectors {
    /// Course anchors on the index page. The final match is a
    /// navigation link, not a course.
    pub index_anchor: Selector,
    /// Course title node on a course page.
    pub course_head: Selector,
    pub level: Selector,
    pub day: Selector,
    pub time: Selector,
    pub period: Selector,
    pub price: Selector,
    /// Present on a course page iff the course is offered free of
    /// charge.
    pub free_marker: Selector,
}

impl Selectors {
    pub fn new() -> Self {
        // Selector strings are static and known-good; a parse failure
        // here is a programmer error, not a data error.
        Self {
            index_anchor: Selector::parse("dl.bs_menu dd a").unwrap(),
            course_head: Selector::parse("div.bs_head").unwrap(),
            level: Selector::parse("td.bs_sdet").unwrap(),
            day: Selector::parse("td.bs_stag").unwrap(),
            time: Selector::parse("td.bs_szeit").unwrap(),
            period: Selector::parse("td.bs_szr").unwrap(),
            price: Selector::parse("td.bs_spreis").unwrap(),
            free_marker: Selector::parse("span.bs_fg").unwrap(),
        }
    }
}

impl Default for Selectors {
    fn default() -> Self {
        Self::new()
    }
}

use log::{error, info, warn};
use scraper::Html;

use crate::{
    error::ScrapeError,
    records::{CoursePage, CourseRef, SessionRecord, SessionTable},
    requests::RequestClient,
    selectors::Selectors,
    text_manipulators::{clean_price, extract_text, get_html_link_to_page, tidy_cell},
};

/// Fetches every course page named on the index, in index order.
///
/// All fetches of the batch complete before any page is parsed. A fetch
/// that fails is reported with the course it belonged to and skipped;
/// the rest of the batch is unaffected.
pub async fn fetch_course_pages(
    client: &RequestClient,
    base_url: &str,
    course_refs: &[CourseRef],
) -> Vec<CoursePage> {
    let urls: Vec<String> = course_refs
        .iter()
        .map(|course_ref| get_html_link_to_page(base_url, &course_ref.href))
        .collect();
    let bodies = client.fetch_all_bodies(urls).await;

    let mut pages = Vec::new();
    for (course_ref, (url, body)) in course_refs.iter().zip(bodies) {
        match body {
            Ok(body) => pages.push(CoursePage {
                course_name: course_ref.name.clone(),
                body,
            }),
            Err(e) => warn!("skipping {:?}: fetch of {url} failed: {e:#}", course_ref.name),
        }
    }
    pages
}

/// A course is free of charge iff its page carries the fee-exempt
/// marker. Only the first match matters.
pub fn is_free_course(document: &Html, selectors: &Selectors) -> bool {
    document.select(&selectors.free_marker).next().is_some()
}

/// Extracts the per-session field vectors from one parsed course page
/// and assembles them into a table.
///
/// The five vectors must agree on the session count; a disagreement is a
/// selector or page-structure error and fails the page hard. A page with
/// a title but no session rows yields a zero-row table.
pub fn extract_session_table(
    index_name: &str,
    document: &Html,
    selectors: &Selectors,
    currency_marker: char,
) -> Result<SessionTable, ScrapeError> {
    let head = document.select(&selectors.course_head).next();

    let levels: Vec<String> = document
        .select(&selectors.level)
        .map(|node| tidy_cell(&extract_text(node)))
        .collect();
    let days: Vec<String> = document
        .select(&selectors.day)
        .map(|node| tidy_cell(&extract_text(node)))
        .collect();
    let times: Vec<String> = document
        .select(&selectors.time)
        .map(|node| tidy_cell(&extract_text(node)))
        .collect();
    let periods: Vec<String> = document
        .select(&selectors.period)
        .map(|node| tidy_cell(&extract_text(node)))
        .collect();

    let mut prices = Vec::new();
    for node in document.select(&selectors.price) {
        prices.push(clean_price(&extract_text(node), currency_marker, index_name)?);
    }

    let lengths = [
        levels.len(),
        days.len(),
        times.len(),
        periods.len(),
        prices.len(),
    ];

    if head.is_none() && lengths.iter().all(|&l| l == 0) {
        return Err(ScrapeError::EmptyDocument {
            page: index_name.to_string(),
        });
    }

    // The course name appears once per page and is replicated onto
    // every session row.
    let course = match head {
        Some(node) => tidy_cell(&extract_text(node)),
        None => {
            warn!("page {index_name:?} has no title node, using the index entry name");
            index_name.to_string()
        }
    };

    if lengths.iter().any(|&l| l != lengths[0]) {
        return Err(ScrapeError::LengthMismatch {
            page: course,
            lengths,
        });
    }

    let rows: Vec<SessionRecord> = levels
        .into_iter()
        .zip(days)
        .zip(times)
        .zip(periods)
        .zip(prices)
        .map(|((((level, day), time), period), prices)| SessionRecord {
            course: course.clone(),
            level,
            day,
            time,
            period,
            prices,
        })
        .collect();

    Ok(SessionTable::new(rows))
}

/// Runs the free-course filter and the record extractor over a batch of
/// fetched pages, in order. Free pages are dropped; a page whose
/// extraction fails is reported and skipped.
pub fn extract_session_tables(
    pages: &[CoursePage],
    selectors: &Selectors,
    currency_marker: char,
) -> Vec<SessionTable> {
    let mut tables = Vec::new();
    for page in pages {
        let document = Html::parse_document(&page.body);
        if is_free_course(&document, selectors) {
            info!("skipping {:?}: offered free of charge", page.course_name);
            continue;
        }
        match extract_session_table(&page.course_name, &document, selectors, currency_marker) {
            Ok(table) => tables.push(table),
            Err(e) => error!("skipping {:?}: {e}", page.course_name),
        }
    }
    tables
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_row(day: &str, time: &str) -> String {
        format!(
            r#"<tr>
                 <td class="bs_sknr">101</td>
                 <td class="bs_sdet">Alle Level</td>
                 <td class="bs_stag">{day}</td>
                 <td class="bs_szeit">{time}</td>
                 <td class="bs_szr">13.04.-18.07.</td>
                 <td class="bs_spreis"><div>24/ 36/ 36/ 56 €</div></td>
               </tr>"#
        )
    }

    fn course_page(title: &str, rows: &str) -> String {
        format!(
            r#"<html><body><div id="bs_content">
                 <div class="bs_head">{title}</div>
                 <table class="bs_kurse"><tbody>{rows}</tbody></table>
               </div></body></html>"#
        )
    }

    #[test]
    fn course_name_is_replicated_onto_every_row() {
        let rows: String = (0..10)
            .map(|i| session_row("Mo", &format!("{:02}:00-{:02}:30", 8 + i, 9 + i)))
            .collect();
        let html = course_page("Aikido", &rows);
        let document = Html::parse_document(&html);
        let table =
            extract_session_table("Aikido", &document, &Selectors::new(), '€').unwrap();
        assert_eq!(table.len(), 10);
        assert!(table.rows().iter().all(|r| r.course == "Aikido"));
    }

    #[test]
    fn extracted_fields_are_cleaned() {
        let html = course_page("Badminton", &session_row("Di", "18:00-19:30"));
        let document = Html::parse_document(&html);
        let table =
            extract_session_table("Badminton", &document, &Selectors::new(), '€').unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.level, "Alle Level");
        assert_eq!(row.day, "Di");
        assert_eq!(row.time, "18:00-19:30");
        assert_eq!(row.period, "13.04.-18.07.");
        assert_eq!(row.prices, "24/ 36/ 36/ 56");
    }

    #[test]
    fn page_without_sessions_yields_an_empty_table() {
        let html = course_page("Aikido", "");
        let document = Html::parse_document(&html);
        let table =
            extract_session_table("Aikido", &document, &Selectors::new(), '€').unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn ragged_field_vectors_fail_hard() {
        // A row missing its day cell: 1 level but 0 days.
        let html = course_page(
            "Aikido",
            r#"<tr>
                 <td class="bs_sdet">Alle Level</td>
                 <td class="bs_szeit">18:00-19:30</td>
                 <td class="bs_szr">13.04.-18.07.</td>
                 <td class="bs_spreis">24 €</td>
               </tr>"#,
        );
        let document = Html::parse_document(&html);
        let err =
            extract_session_table("Aikido", &document, &Selectors::new(), '€').unwrap_err();
        assert!(matches!(err, ScrapeError::LengthMismatch { .. }));
    }

    #[test]
    fn fee_exempt_marker_classifies_a_course_as_free() {
        let html = course_page(
            "Lacrosse",
            r#"<tr><td class="bs_spreis"><span class="bs_fg">entgeltfrei</span></td></tr>"#,
        );
        let document = Html::parse_document(&html);
        assert!(is_free_course(&document, &Selectors::new()));

        let paid = course_page("Badminton", &session_row("Di", "18:00-19:30"));
        assert!(!is_free_course(
            &Html::parse_document(&paid),
            &Selectors::new()
        ));
    }

    #[test]
    fn batch_extraction_drops_free_pages_and_keeps_order() {
        let pages = vec![
            CoursePage {
                course_name: "Aikido".to_string(),
                body: course_page("Aikido", &session_row("Mo", "18:00-19:30")),
            },
            CoursePage {
                course_name: "Lacrosse".to_string(),
                body: course_page(
                    "Lacrosse",
                    r#"<tr><td class="bs_spreis"><span class="bs_fg">entgeltfrei</span></td></tr>"#,
                ),
            },
            CoursePage {
                course_name: "Volleyball".to_string(),
                body: course_page("Volleyball", &session_row("Fr", "20:00-22:00")),
            },
        ];
        let tables = extract_session_tables(&pages, &Selectors::new(), '€');
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows()[0].course, "Aikido");
        assert_eq!(tables[1].rows()[0].course, "Volleyball");
    }

    #[test]
    fn unparseable_price_skips_the_page_in_batch_mode() {
        // Marker-less price text on a page without the fee-exempt flag.
        let pages = vec![CoursePage {
            course_name: "Aikido".to_string(),
            body: course_page(
                "Aikido",
                r#"<tr>
                     <td class="bs_sdet">Alle Level</td>
                     <td class="bs_stag">Mo</td>
                     <td class="bs_szeit">18:00-19:30</td>
                     <td class="bs_szr">13.04.-18.07.</td>
                     <td class="bs_spreis">auf Anfrage</td>
                   </tr>"#,
            ),
        }];
        let tables = extract_session_tables(&pages, &Selectors::new(), '€');
        assert!(tables.is_empty());
    }
}

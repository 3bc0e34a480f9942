//! Paginated plain-text rendering of the full curriculum.
//!
//! The document starts with a title block, followed by one section per
//! department. Each section is a boxed table of code, name, credits and
//! prerequisite. Pages are separated by form feeds and end with a
//! `Page N of M` footer. A table cut by a page break repeats its header on
//! the next page.

use crate::core::catalog::CatalogStore;
use crate::domain::model::Course;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use tabled::{settings::Style, Table, Tabled};

pub const MIN_LINES_PER_PAGE: usize = 10;
pub const DEFAULT_LINES_PER_PAGE: usize = 60;

const PAGE_BREAK: char = '\u{000C}';
// blank line + footer
const FOOTER_LINES: usize = 2;

#[derive(Debug, Clone)]
pub struct DocumentOptions {
    pub lines_per_page: usize,
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            lines_per_page: DEFAULT_LINES_PER_PAGE,
            generated_at: None,
        }
    }
}

/// Table row for one course of a department section
#[derive(Tabled)]
struct CourseRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Credits")]
    credits: u8,
    #[tabled(rename = "Prerequisites")]
    prerequisites: String,
}

impl From<&Course> for CourseRow {
    fn from(course: &Course) -> Self {
        Self {
            code: course.code.clone(),
            name: course.name.clone(),
            credits: course.credits,
            prerequisites: course.prerequisite.to_string(),
        }
    }
}

fn render_table(rows: &[CourseRow]) -> Vec<String> {
    Table::new(rows)
        .with(Style::ascii())
        .to_string()
        .lines()
        .map(str::to_string)
        .collect()
}

struct Paginator {
    body_capacity: usize,
    pages: Vec<Vec<String>>,
}

impl Paginator {
    fn new(lines_per_page: usize) -> Self {
        Self {
            body_capacity: lines_per_page.max(MIN_LINES_PER_PAGE) - FOOTER_LINES,
            pages: vec![Vec::new()],
        }
    }

    fn remaining(&self) -> usize {
        let used = self.pages.last().map_or(0, Vec::len);
        self.body_capacity.saturating_sub(used)
    }

    fn page_is_empty(&self) -> bool {
        self.pages.last().map_or(true, Vec::is_empty)
    }

    fn break_page(&mut self) {
        self.pages.push(Vec::new());
    }

    fn push(&mut self, line: String) {
        if self.remaining() == 0 {
            self.break_page();
        }
        if let Some(page) = self.pages.last_mut() {
            page.push(line);
        }
    }

    /// Blank separator line, dropped when it would open a new page.
    fn push_spacer(&mut self) {
        if self.remaining() > 0 {
            self.push(String::new());
        }
    }

    fn push_block(&mut self, lines: Vec<String>) {
        if lines.len() > self.remaining() && lines.len() <= self.body_capacity {
            self.break_page();
        }
        for line in lines {
            self.push(line);
        }
    }

    /// Places a heading and its table. The heading stays with at least one
    /// row; rows that do not fit go to the next page as a fresh table, so the
    /// header row is repeated.
    fn push_section(&mut self, heading: &str, rows: &[CourseRow]) {
        let mut heading = Some(heading);
        let mut start = 0;

        loop {
            let reserved = usize::from(heading.is_some());
            let mut end = rows.len();
            let mut lines = render_table(&rows[start..end]);
            while lines.len() + reserved > self.remaining() && end > start + 1 {
                end -= 1;
                lines = render_table(&rows[start..end]);
            }

            if lines.len() + reserved > self.remaining() && !self.page_is_empty() {
                self.break_page();
                continue;
            }

            if let Some(heading) = heading.take() {
                self.push(heading.to_string());
            }
            for line in lines {
                self.push(line);
            }

            if end >= rows.len() {
                break;
            }
            start = end;
            self.break_page();
        }
    }

    fn finish(self) -> String {
        let total = self.pages.len();
        self.pages
            .into_iter()
            .enumerate()
            .map(|(idx, mut page)| {
                page.push(String::new());
                page.push(format!("Page {} of {}", idx + 1, total));
                let mut text = page.join("\n");
                text.push('\n');
                text
            })
            .collect::<Vec<_>>()
            .join(&PAGE_BREAK.to_string())
    }
}

pub fn export_document(catalog: &CatalogStore, options: &DocumentOptions) -> Result<Vec<u8>> {
    let mut paginator = Paginator::new(options.lines_per_page);

    let mut title_block = vec![catalog.title().to_string()];
    title_block.push("=".repeat(catalog.title().chars().count()));
    if let Some(subtitle) = catalog.subtitle() {
        title_block.push(subtitle.to_string());
    }
    if let Some(tagline) = catalog.tagline() {
        title_block.push(tagline.to_string());
    }
    if let Some(generated_at) = options.generated_at {
        title_block.push(format!(
            "Generated {}",
            generated_at.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    title_block.push(String::new());
    paginator.push_block(title_block);

    if let Some(mission) = catalog.mission() {
        let mut mission_block = vec!["Mission:".to_string()];
        mission_block.extend(mission.trim().lines().map(|line| line.trim().to_string()));
        mission_block.push(String::new());
        paginator.push_block(mission_block);
    }

    for department in catalog.departments() {
        let rows: Vec<CourseRow> = department.courses.iter().map(CourseRow::from).collect();
        paginator.push_section(&department.name, &rows);
        paginator.push_spacer();
    }

    let pages = paginator.pages.len();
    let text = paginator.finish();
    tracing::debug!(
        "Rendered curriculum document: {} departments, {} pages",
        catalog.departments().len(),
        pages
    );
    Ok(text.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Course, Department, Prerequisite};
    use chrono::TimeZone;

    fn catalog_with(courses_per_department: usize, departments: usize) -> CatalogStore {
        let departments = (0..departments)
            .map(|d| {
                let prefix = format!("D{}X", char::from(b'A' + d as u8));
                let courses = (1..=courses_per_department)
                    .map(|n| {
                        Course::new(
                            format!("{}{}", prefix, n * 101),
                            format!("Course {}", n),
                            "",
                            3,
                            Prerequisite::None,
                        )
                    })
                    .collect();
                Department::new(format!("Department {}", d), courses)
            })
            .collect();
        CatalogStore::from_departments("Test Curriculum", departments).unwrap()
    }

    #[test]
    fn test_single_page_layout() {
        let catalog = catalog_with(2, 1);
        let options = DocumentOptions {
            lines_per_page: 60,
            generated_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()),
        };
        let text = String::from_utf8(export_document(&catalog, &options).unwrap()).unwrap();

        assert!(!text.contains(PAGE_BREAK));
        assert!(text.starts_with("Test Curriculum\n===============\n"));
        assert!(text.contains("Generated 2024-05-01 12:30 UTC"));
        assert!(text.contains("| Code   | Name     | Credits | Prerequisites |"));
        assert!(text.contains("| DAX101 | Course 1 | 3       | None          |"));
        assert!(text.contains("\nDepartment 0\n+--------+"));
        assert!(text.trim_end().ends_with("Page 1 of 1"));
    }

    #[test]
    fn test_long_table_repeats_header_across_pages() {
        let catalog = catalog_with(30, 1);
        let options = DocumentOptions {
            lines_per_page: 20,
            generated_at: None,
        };
        let text = String::from_utf8(export_document(&catalog, &options).unwrap()).unwrap();
        let pages: Vec<&str> = text.split(PAGE_BREAK).collect();

        assert!(pages.len() > 1);
        for (idx, page) in pages.iter().enumerate() {
            assert!(page.lines().count() <= 20);
            assert!(page.contains(&format!("Page {} of {}", idx + 1, pages.len())));
            assert!(page.contains("| Code"));
        }
    }

    #[test]
    fn test_lines_per_page_is_clamped() {
        let catalog = catalog_with(3, 2);
        let options = DocumentOptions {
            lines_per_page: 1,
            generated_at: None,
        };
        let text = String::from_utf8(export_document(&catalog, &options).unwrap()).unwrap();
        for page in text.split(PAGE_BREAK) {
            assert!(page.lines().count() <= MIN_LINES_PER_PAGE);
        }
    }
}

use catalog_browser::{
    export_csv, export_document, CatalogStore, DocumentOptions, SelectionTracker,
};
use pretty_assertions::assert_eq;

#[test]
fn test_csv_of_three_course_selection() {
    let catalog = CatalogStore::bundled().unwrap();
    let mut tracker = SelectionTracker::new(&catalog);
    tracker.replace_selection(&["AE202", "PSY101", "SL404"]);

    let text = String::from_utf8(export_csv(tracker.current()).unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "Department,Code,Name,Description,Credits,Prerequisites");
    assert_eq!(
        lines[1],
        "Department of Aerospace Engineering,AE202,Orbital Mechanics,\"Navigate space with cold, hard math.\",4,AE101"
    );
    assert_eq!(
        lines[2],
        "Department of Psychology for STEM,PSY101,Intro to Scientific Psychology,\"Study minds with data, not feelings.\",3,None"
    );
    assert!(lines[3].starts_with("Department of Space Law and Policy,SL404,Anti-Woke Policy Frameworks,"));
    assert!(lines[3].ends_with(",4,SL202"));
}

#[test]
fn test_csv_parses_back_with_csv_reader() {
    let catalog = CatalogStore::bundled().unwrap();
    let mut tracker = SelectionTracker::new(&catalog);
    tracker.replace_selection(&["AI303", "BI101"]);

    let data = export_csv(tracker.current()).unwrap();
    let mut reader = csv::Reader::from_reader(data.as_slice());
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();

    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][1], "AI303");
    assert_eq!(&rows[0][2], "Ethics in AI: Truth Over Trash");
    assert_eq!(&rows[1][5], "None");
}

#[test]
fn test_document_has_one_section_per_department() {
    let catalog = CatalogStore::bundled().unwrap();
    let options = DocumentOptions {
        lines_per_page: 50,
        generated_at: None,
    };
    let text = String::from_utf8(export_document(&catalog, &options).unwrap()).unwrap();

    assert!(text.starts_with("Texas Institute of Technology and Science (TITS)\n"));
    assert!(text.contains("\nAnti-Woke Mission: Merit, Truth, Freedom\n"));
    assert!(text.contains("\nMission:\nTITS is a fortress of meritocracy"));
    for department in catalog.departments() {
        let headings = text
            .split(|c: char| c == '\n' || c == '\u{000C}')
            .filter(|line| *line == department.name)
            .count();
        assert_eq!(headings, 1, "{}", department.name);
    }
    for course in catalog.all_courses() {
        assert!(text.contains(&format!("| {} ", course.code())), "{}", course.code());
    }

    let pages: Vec<&str> = text.split('\u{000C}').collect();
    assert!(pages.len() > 1);
    let last = pages.last().unwrap();
    assert!(last.contains(&format!("Page {} of {}", pages.len(), pages.len())));
}

mod common;

use std::rc::Rc;

use common::{indexes, mem_set};
use renum::{FileOps, FileSet, MemFs, Pattern};

#[test]
fn files_list_is_ordered_and_round_trips() {
    let (mem, set) = mem_set("p", &["p2.png", "p0.jpg", "p2.jpg", "p10.jpg"]);

    let list = set.get_files_list();
    assert_eq!(list, vec!["p0.jpg", "p2.jpg", "p2.png", "p10.jpg"]);

    let rebuilt = FileSet::from_names(Pattern::new("p", ""), list, mem.clone());
    assert_eq!(rebuilt.files(), set.files());
    assert_eq!(rebuilt.max_index(), set.max_index());
}

#[test]
fn file_in_set_distinguishes_members_and_strangers() {
    let mem = Rc::new(MemFs::seeded(["page (1).jpg", "page (2).jpg"]));
    let set = FileSet::detect(Pattern::new("page (", ")"), mem).unwrap();

    assert_eq!(set.file_in_set("page (1).jpg"), (true, Some(1)));
    // Fits the pattern but is not a member; the index is still reported.
    assert_eq!(set.file_in_set("page (9).jpg"), (false, Some(9)));
    assert_eq!(set.file_in_set("cover.jpg"), (false, None));
}

#[test]
fn len_counts_every_type() {
    let (_, set) = mem_set("p", &["p0.jpg", "p1.jpg", "p1.png"]);
    assert_eq!(set.len(), 3);
    assert!(!set.is_empty());
}

#[test]
fn change_pattern_renames_every_file() {
    let (mem, mut set) = mem_set("p", &["p0.jpg", "p1.jpg", "p1.png"]);
    set.change_pattern(Pattern::new("scan-", "")).unwrap();

    assert!(mem.contains("scan-0.jpg"));
    assert!(mem.contains("scan-1.jpg"));
    assert!(mem.contains("scan-1.png"));
    assert!(!mem.contains("p0.jpg"));
    assert_eq!(set.pattern().prefix(), "scan-");
}

#[test]
fn update_picks_up_outside_changes() {
    let mem = Rc::new(MemFs::seeded(["p0.jpg", "loose.jpg"]));
    let mut set = FileSet::detect(Pattern::new("p", ""), mem.clone()).unwrap();
    assert_eq!(indexes(&set), vec![0]);

    // Another program renames a file into the set behind our back.
    mem.rename("loose.jpg", "p4.jpg").unwrap();
    set.update().unwrap();

    assert_eq!(indexes(&set), vec![0, 4]);
    assert_eq!(set.max_index(), 4);
}

#[test]
fn display_uses_the_index_indicator() {
    let mem = Rc::new(MemFs::seeded(["page (1).jpg"]));
    let set = FileSet::detect(Pattern::new("page (", ")"), mem).unwrap();
    assert_eq!(set.to_string(), "page (*)");
}

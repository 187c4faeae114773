#![allow(dead_code)]

use std::rc::Rc;

use renum::{FileSet, MemFs, Pattern};

/// A file set detected over an in-memory directory seeded with `names`.
pub fn mem_set(prefix: &str, names: &[&str]) -> (Rc<MemFs>, FileSet) {
    let mem = Rc::new(MemFs::seeded(names.iter().copied()));
    let set = FileSet::detect(Pattern::new(prefix, ""), mem.clone()).unwrap();
    (mem, set)
}

pub fn indexes(set: &FileSet) -> Vec<i64> {
    set.files().keys().copied().collect()
}

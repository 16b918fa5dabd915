//! Merging externally produced JUnit reports
//!
//! [`merge_report`] pulls the `testsuite` elements of another report into the
//! journal's current group; when the journal is written, they appear in place
//! of that group's own `testsuite`. [`merge_files`] does the same for two
//! reports that are already on disk.

use crate::error::{Error, Result};
use crate::journal::Journal;
use crate::xml::{Document, Node};
use std::path::Path;

/// Splices the `testsuite` elements of the report at `path` into the current
/// group of `journal`, beginning an anonymous group if none is current.
///
/// Returns the number of `testsuite` elements taken over. Unexpected elements
/// inside a `testsuites` collection are skipped with a warning.
pub fn merge_report(journal: &mut Journal, path: &Path) -> Result<usize> {
    let g = journal.ensure_group();
    let mut doc = read_report(path)?;

    if let Some(other) = doc
        .root()
        .children()
        .iter()
        .find(|node| node.name() != "testsuites")
    {
        return Err(Error::MergeRead {
            path: path.to_path_buf(),
            reason: format!("expected root element <testsuites>, found <{}>", other.name()),
        });
    }

    let mut count = 0;
    for mut collection in doc.root_mut().take_children() {
        let children = collection.take_children();
        if children.is_empty() {
            continue;
        }

        let merged = journal
            .group_mut(g)
            .merged
            .get_or_insert_with(|| Node::new("testsuites"));
        for node in children {
            if node.name() == "testsuite" {
                merged.push(node);
                count += 1;
            } else {
                tracing::warn!("{}: ignoring element <{}>", path.display(), node.name());
            }
        }
    }

    tracing::info!(
        "merged {} testsuite(s) from {} into {}",
        count,
        path.display(),
        journal.groups()[g].name()
    );
    Ok(count)
}

/// Moves every suite of the `secondary` report into the `primary` report and
/// rewrites `primary`.
///
/// The primary file is only rewritten if something was moved; the return
/// value says whether that happened.
pub fn merge_files(primary: &Path, secondary: &Path) -> Result<bool> {
    let mut dst = read_report(primary)?;
    let mut src = read_report(secondary)?;

    let root = dst.root_mut();
    if root.child("testsuites").is_none() {
        root.add_child("testsuites");
    }

    let mut merged = false;
    if let Some(target) = root.child_mut("testsuites") {
        for mut collection in src.root_mut().take_children() {
            if collection.name() != "testsuites" {
                continue;
            }
            for node in collection.take_children() {
                target.push(node);
                merged = true;
            }
        }
    }

    if merged {
        dst.write(primary)?;
        tracing::info!("merged {} into {}", secondary.display(), primary.display());
    }
    Ok(merged)
}

fn read_report(path: &Path) -> Result<Document> {
    let doc = Document::read(path).map_err(|e| Error::MergeRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    if doc.is_empty() {
        return Err(Error::MergeRead {
            path: path.to_path_buf(),
            reason: "empty document".to_string(),
        });
    }
    Ok(doc)
}
